//! Bridges between the row-major (H, W, C) pixel layout and the channel-first
//! (C, H, W) layout consumed by model code.

use crate::common::*;

/// Reorder an (H, W, C) image into a contiguous (C, H, W) tensor.
pub fn to_channel_first(image: ArrayView3<f32>) -> Array3<f32> {
    image.permuted_axes([2, 0, 1]).as_standard_layout().into_owned()
}

/// Reorder a (C, H, W) tensor into a contiguous (H, W, C) image.
pub fn to_row_major(tensor: ArrayView3<f32>) -> Array3<f32> {
    tensor.permuted_axes([1, 2, 0]).as_standard_layout().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_channel_first() {
        let image = Array3::from_shape_fn((2, 3, 3), |(y, x, c)| (y * 100 + x * 10 + c) as f32);
        let tensor = to_channel_first(image.view());
        assert_eq!(tensor.dim(), (3, 2, 3));
        assert_eq!(tensor[[2, 1, 0]], image[[1, 0, 2]]);
        assert!(tensor.is_standard_layout());
        assert_eq!(to_row_major(tensor.view()), image);
    }
}
