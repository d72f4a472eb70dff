//! Image preprocessing for the nail-condition classifier.
//!
//! The artifact was trained on 150×150 RGB crops fed through the VGG16
//! Caffe-style input pipeline: channels flipped to BGR and per-channel
//! ImageNet means subtracted, with no further scaling. Preprocessing here
//! reproduces that pipeline exactly so the exported model sees the same
//! distribution it was trained on.

use std::path::Path;

use image::{imageops::FilterType, DynamicImage};
use ndarray::Array4;

use crate::error::{NailDxError, Result};

/// Side length of the square model input
pub const INPUT_SIZE: u32 = 150;

/// Per-channel means in BGR order (Caffe convention used by VGG16)
const VGG_MEAN_BGR: [f32; 3] = [103.939, 116.779, 123.68];

/// Decode the image at `path` and preprocess it into a model input tensor.
///
/// Fails with [`NailDxError::ImageDecode`] if the file cannot be decoded.
pub fn load_input(path: &Path) -> Result<Array4<f32>> {
    let img = image::open(path)
        .map_err(|e| NailDxError::ImageDecode(path.to_path_buf(), e.to_string()))?;
    Ok(preprocess(&img))
}

/// Resize to 150×150 and normalize into an NHWC `[1, 150, 150, 3]` tensor.
///
/// Nearest-neighbor resizing matches the interpolation the training pipeline
/// used; the channel order of the output is BGR.
pub fn preprocess(img: &DynamicImage) -> Array4<f32> {
    let resized = img.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Nearest);
    let rgb = resized.to_rgb8();

    let size = INPUT_SIZE as usize;
    let mut tensor = Array4::<f32>::zeros((1, size, size, 3));

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        tensor[[0, y, x, 0]] = f32::from(pixel[2]) - VGG_MEAN_BGR[0];
        tensor[[0, y, x, 1]] = f32::from(pixel[1]) - VGG_MEAN_BGR[1];
        tensor[[0, y, x, 2]] = f32::from(pixel[0]) - VGG_MEAN_BGR[2];
    }

    tensor
}
