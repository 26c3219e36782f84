//! Bilinear image resampling.

use crate::{common::*, AugmentError, Image};
use image::{
    imageops::{self, FilterType},
    ImageBuffer, Luma,
};

/// Resize an (H, W, C) image to `height` x `width` with bilinear interpolation.
///
/// Each channel is resampled by the `image` crate's triangle filter. The
/// filter clamps its output at zero, so the whole image is lifted by its
/// minimum beforehand and shifted back afterwards.
pub fn resize(image: ArrayView3<f32>, width: usize, height: usize) -> Result<Image> {
    let (src_h, src_w, _) = image.dim();
    ensure!(
        width > 0 && height > 0,
        AugmentError::invalid_config(format!(
            "target size must be positive, but get {}x{}",
            width, height
        ))
    );
    ensure!(
        src_h > 0 && src_w > 0,
        AugmentError::invalid_shape(image.shape(), "cannot resize an empty image")
    );
    let to_u32 = |len: usize| {
        u32::try_from(len).map_err(|_| {
            AugmentError::invalid_config(format!("image side {} does not fit into u32", len))
        })
    };
    let (src_w, src_h) = (to_u32(src_w)?, to_u32(src_h)?);
    let (dst_w, dst_h) = (to_u32(width)?, to_u32(height)?);

    let floor = image.fold(0f32, |min, &value| min.min(value));

    let channels: Vec<Array2<f32>> = image
        .axis_iter(Axis(2))
        .map(|plane| -> Result<_> {
            let pixels: Vec<f32> = plane.iter().map(|&value| value - floor).collect();
            let buffer: ImageBuffer<Luma<f32>, Vec<f32>> =
                ImageBuffer::from_raw(src_w, src_h, pixels).ok_or_else(|| {
                    AugmentError::invalid_shape(plane.shape(), "image plane size mismatch")
                })?;
            let resized = imageops::resize(&buffer, dst_w, dst_h, FilterType::Triangle);
            let plane = Array2::from_shape_vec((height, width), resized.into_raw())?;
            Ok(plane)
        })
        .collect::<Result<_>>()?;

    let views: Vec<_> = channels.iter().map(|plane| plane.view()).collect();
    let output = ndarray::stack(Axis(2), &views)? + floor;
    Ok(output)
}
