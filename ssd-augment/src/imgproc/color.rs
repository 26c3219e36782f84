//! Color space conversion on floating-point images.
//!
//! HSV images follow the floating-point convention of common vision
//! libraries: hue in degrees within [0, 360), saturation within [0, 1] and
//! value on the same scale as the source channels.

use crate::{common::*, sample::NUM_CHANNELS, AugmentError, Image};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColorSpace {
    Bgr,
    Rgb,
    Hsv,
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Bgr => "BGR",
            Self::Rgb => "RGB",
            Self::Hsv => "HSV",
        };
        write!(f, "{}", text)
    }
}

/// Check that a conversion between the two color spaces is available.
///
/// Converting a space to itself is reported as unsupported, since it signals
/// a misplaced step in a pipeline.
pub fn check_conversion(from: ColorSpace, to: ColorSpace) -> Result<(), AugmentError> {
    if from == to {
        return Err(AugmentError::UnsupportedConversion { from, to });
    }
    Ok(())
}

/// Convert every pixel of an (H, W, 3) image from one color space to another.
pub fn convert_color_space(mut image: Image, from: ColorSpace, to: ColorSpace) -> Result<Image> {
    use ColorSpace as C;

    check_conversion(from, to)?;
    let (_, _, channels) = image.dim();
    ensure!(
        channels == NUM_CHANNELS,
        AugmentError::invalid_shape(image.shape(), "color conversion expects 3 channels")
    );

    let convert: fn([f32; 3]) -> [f32; 3] = match (from, to) {
        (C::Bgr, C::Rgb) | (C::Rgb, C::Bgr) => |[a, b, c]| [c, b, a],
        (C::Rgb, C::Hsv) => rgb_to_hsv,
        (C::Bgr, C::Hsv) => |[b, g, r]| rgb_to_hsv([r, g, b]),
        (C::Hsv, C::Rgb) => hsv_to_rgb,
        (C::Hsv, C::Bgr) => |hsv| {
            let [r, g, b] = hsv_to_rgb(hsv);
            [b, g, r]
        },
        (C::Bgr, C::Bgr) | (C::Rgb, C::Rgb) | (C::Hsv, C::Hsv) => {
            bail!(AugmentError::UnsupportedConversion { from, to })
        }
    };

    image.lanes_mut(Axis(2)).into_iter().for_each(|mut pixel| {
        let [x, y, z] = convert([pixel[0], pixel[1], pixel[2]]);
        pixel[0] = x;
        pixel[1] = y;
        pixel[2] = z;
    });

    Ok(image)
}

/// Convert one RGB pixel into (hue, saturation, value).
pub fn rgb_to_hsv([r, g, b]: [f32; 3]) -> [f32; 3] {
    let value = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = value - min;
    let saturation = diff / (value.abs() + f32::EPSILON);

    let scale = 60.0 / (diff + f32::EPSILON);
    let hue = if diff == 0.0 {
        0.0
    } else if value == r {
        (g - b) * scale
    } else if value == g {
        (b - r) * scale + 120.0
    } else {
        (r - g) * scale + 240.0
    };
    let hue = if hue < 0.0 { hue + 360.0 } else { hue };

    [hue, saturation, value]
}

/// Convert one (hue, saturation, value) pixel into RGB.
pub fn hsv_to_rgb([hue, saturation, value]: [f32; 3]) -> [f32; 3] {
    if saturation == 0.0 {
        return [value, value, value];
    }

    let hue = hue / 60.0;
    let sector = hue.floor();
    let frac = hue - sector;
    let sector = (sector as i64).rem_euclid(6);

    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * frac);
    let t = value * (1.0 - saturation * (1.0 - frac));

    match sector {
        0 => [value, t, p],
        1 => [q, value, p],
        2 => [p, value, t],
        3 => [p, q, value],
        4 => [t, p, value],
        _ => [value, p, q],
    }
}
