use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use pdf_compose::*;

/// 200x100 image: left half red, right half blue
fn two_tone() -> DynamicImage {
    let mut image = RgbImage::new(200, 100);
    for (x, _, pixel) in image.enumerate_pixels_mut() {
        *pixel = if x < 100 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        };
    }
    DynamicImage::ImageRgb8(image)
}

fn decode(cropped: &CroppedImage) -> DynamicImage {
    image::load_from_memory(&cropped.bytes).unwrap()
}

#[test]
fn test_output_uses_display_space_size() {
    // Displayed at half size: a 40x30 selection samples 80x60 source pixels
    let cropped = crop_decoded(
        &two_tone(),
        CropRect::new(10.0, 10.0, 40.0, 30.0),
        DisplaySize::new(100.0, 50.0),
        100,
    )
    .unwrap();

    assert_eq!((cropped.width, cropped.height), (40, 30));
    assert_eq!(decode(&cropped).dimensions(), (40, 30));
}

#[test]
fn test_selection_maps_through_scale() {
    // Display x 60..90 is source x 120..180, entirely in the blue half
    let cropped = crop_decoded(
        &two_tone(),
        CropRect::new(60.0, 5.0, 30.0, 20.0),
        DisplaySize::new(100.0, 50.0),
        100,
    )
    .unwrap();

    let center = decode(&cropped).to_rgb8().get_pixel(15, 10).0;
    assert!(center[2] > 200 && center[0] < 60, "expected blue, got {center:?}");
}

#[test]
fn test_fractional_selection_is_truncated() {
    let cropped = crop_decoded(
        &two_tone(),
        CropRect::new(0.0, 0.0, 12.9, 7.5),
        DisplaySize::new(200.0, 100.0),
        100,
    )
    .unwrap();
    assert_eq!((cropped.width, cropped.height), (12, 7));
}

#[test]
fn test_degenerate_selection_fails() {
    for rect in [
        CropRect::new(5.0, 5.0, 0.0, 10.0),
        CropRect::new(5.0, 5.0, 10.0, 0.0),
        CropRect::new(5.0, 5.0, 0.4, 0.4),
    ] {
        let result = crop_decoded(&two_tone(), rect, DisplaySize::new(200.0, 100.0), 100);
        assert!(
            matches!(result, Err(ComposeError::InvalidCrop(_))),
            "{rect:?} should be rejected"
        );
    }
}

#[test]
fn test_empty_display_size_fails() {
    let result = crop_decoded(
        &two_tone(),
        CropRect::new(0.0, 0.0, 10.0, 10.0),
        DisplaySize::new(0.0, 100.0),
        100,
    );
    assert!(matches!(result, Err(ComposeError::InvalidCrop(_))));
}

#[test]
fn test_crop_from_corners_normalizes() {
    let rect = CropRect::from_corners((50.0, 40.0), (10.0, 60.0));
    assert_eq!(rect, CropRect::new(10.0, 40.0, 40.0, 20.0));
}

#[test]
fn test_undecodable_source_fails() {
    let result = crop_image(
        b"not an image",
        CropRect::new(0.0, 0.0, 10.0, 10.0),
        DisplaySize::new(10.0, 10.0),
        100,
    );
    assert!(matches!(result, Err(ComposeError::Image(_))));
}

#[tokio::test]
async fn test_async_crop() {
    let mut bytes = Vec::new();
    two_tone()
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let cropped = crop(
        bytes.into(),
        CropRect::new(0.0, 0.0, 50.0, 25.0),
        DisplaySize::new(100.0, 50.0),
        100,
    )
    .await
    .unwrap();
    assert_eq!((cropped.width, cropped.height), (50, 25));
}
