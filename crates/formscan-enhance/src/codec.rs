// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Byte-level decode/encode helpers around the `image` crate. The pipeline
// itself only ever sees pixel buffers; these functions sit at its edges.

use std::io::Cursor;

use formscan_core::OutputFormat;
use formscan_core::error::{FormscanError, Result};
use image::{DynamicImage, GrayImage, ImageFormat};
use tracing::{debug, instrument};

/// Decode raw image bytes, returning the image and the format it was stored in.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode(data: &[u8]) -> Result<(DynamicImage, ImageFormat)> {
    if data.is_empty() {
        return Err(FormscanError::Decode("input is empty".into()));
    }

    let format = image::guess_format(data)
        .map_err(|err| FormscanError::Decode(format!("unrecognised image format: {}", err)))?;

    let image = image::load_from_memory_with_format(data, format).map_err(|err| {
        FormscanError::Decode(format!("failed to decode {:?} image: {}", format, err))
    })?;

    debug!(
        width = image.width(),
        height = image.height(),
        ?format,
        "Image decoded from bytes"
    );
    Ok((image, format))
}

/// Pick the container for grayscale output.
///
/// `SameAsInput` keeps the input's format when it stores 8-bit grayscale
/// losslessly and falls back to PNG otherwise. A lossy format such as JPEG
/// would put compression ringing back into the bitmap, so it is only written
/// when the caller asks for it explicitly.
pub fn resolve_output_format(requested: OutputFormat, input: ImageFormat) -> ImageFormat {
    match requested {
        OutputFormat::Png => ImageFormat::Png,
        OutputFormat::Jpeg => ImageFormat::Jpeg,
        OutputFormat::Bmp => ImageFormat::Bmp,
        OutputFormat::Tiff => ImageFormat::Tiff,
        OutputFormat::SameAsInput => match input {
            ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Tiff | ImageFormat::Pnm => input,
            _ => ImageFormat::Png,
        },
    }
}

/// Encode a single-channel image into the given format.
pub fn encode_gray(image: &GrayImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| FormscanError::Encode(format!("{:?} encoding failed: {}", format, err)))?;
    Ok(buffer)
}

/// Preferred file extension for an encoded format.
pub fn extension_for(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn sample_png() -> Vec<u8> {
        let image = GrayImage::from_fn(8, 6, |x, y| Luma([(x * 30 + y) as u8]));
        encode_gray(&image, ImageFormat::Png).unwrap()
    }

    #[test]
    fn decode_round_trips_png() {
        let (image, format) = decode(&sample_png()).unwrap();
        assert_eq!(format, ImageFormat::Png);
        assert_eq!((image.width(), image.height()), (8, 6));
        assert_eq!(image.to_luma8().get_pixel(2, 1).0[0], 61);
    }

    #[test]
    fn empty_input_is_a_decode_error() {
        assert!(matches!(decode(&[]), Err(FormscanError::Decode(_))));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(
            decode(b"definitely not an image"),
            Err(FormscanError::Decode(_))
        ));
    }

    #[test]
    fn truncated_png_is_a_decode_error() {
        let png = sample_png();
        assert!(matches!(
            decode(&png[..png.len() / 2]),
            Err(FormscanError::Decode(_))
        ));
    }

    #[test]
    fn same_as_input_keeps_lossless_formats() {
        for format in [
            ImageFormat::Png,
            ImageFormat::Bmp,
            ImageFormat::Tiff,
            ImageFormat::Pnm,
        ] {
            assert_eq!(resolve_output_format(OutputFormat::SameAsInput, format), format);
        }
        assert_eq!(
            resolve_output_format(OutputFormat::SameAsInput, ImageFormat::Jpeg),
            ImageFormat::Png
        );
        assert_eq!(
            resolve_output_format(OutputFormat::SameAsInput, ImageFormat::WebP),
            ImageFormat::Png
        );
        assert_eq!(
            resolve_output_format(OutputFormat::SameAsInput, ImageFormat::Tga),
            ImageFormat::Png
        );
        assert_eq!(
            resolve_output_format(OutputFormat::Jpeg, ImageFormat::Png),
            ImageFormat::Jpeg
        );
        assert_eq!(
            resolve_output_format(OutputFormat::SameAsInput, ImageFormat::Gif),
            ImageFormat::Png
        );
        assert_eq!(
            resolve_output_format(OutputFormat::Bmp, ImageFormat::Png),
            ImageFormat::Bmp
        );
    }

    #[test]
    fn extensions_follow_format() {
        assert_eq!(extension_for(ImageFormat::Png), "png");
        assert_eq!(extension_for(ImageFormat::Bmp), "bmp");
    }
}
