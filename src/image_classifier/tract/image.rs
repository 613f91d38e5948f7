use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

pub fn central_crop(image: &DynamicImage, fraction: f32) -> DynamicImage {
    if fraction >= 1.0 {
        return image.clone();
    }

    let (w, h) = (image.width(), image.height());
    let crop_w = ((w as f32 * fraction).round() as u32).max(1);
    let crop_h = ((h as f32 * fraction).round() as u32).max(1);
    let x_offset = (w - crop_w) / 2;
    let y_offset = (h - crop_h) / 2;

    image.crop_imm(x_offset, y_offset, crop_w, crop_h)
}

/// NCHW tensor with channels scaled to [0, 1].
fn image_to_tensor(image: &DynamicImage) -> Tensor {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let pixel = rgb.get_pixel(x as u32, y as u32);
        pixel[c] as f32 / 255.0
    })
    .into_tensor()
}

pub fn preprocess_image(
    image: &DynamicImage,
    width: u32,
    height: u32,
    central_crop_fraction: f32,
) -> Tensor {
    let cropped = central_crop(image, central_crop_fraction);
    let resized = cropped.resize_exact(width, height, imageops::FilterType::Triangle);
    image_to_tensor(&resized)
}
