//! Hub-and-spoke color space conversion
//!
//! Every supported space implements `IntoCieXyz` and `FromCieXyz`;
//! converting between any two spaces routes through the XYZ hub. The
//! converter is configured with a reference white point and an enable
//! flag for chromatic adaptation (Bradford transform), applied when a
//! source space's native white differs from the configured one.

use crate::color::spaces::*;
use crate::tiff::errors::{TiffError, TiffResult};

/// D50 reference white, the converter default
pub const D50: CieXyz = CieXyz::new(0.96422, 1.0, 0.82521);

/// D65 reference white, the native white of sRGB
pub const D65: CieXyz = CieXyz::new(0.95047, 1.0, 1.08883);

const LAB_EPSILON: f32 = 216.0 / 24389.0;
const LAB_KAPPA: f32 = 24389.0 / 27.0;

// Bradford cone response matrix and its inverse
const BRADFORD: [[f32; 3]; 3] = [
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
];
const BRADFORD_INV: [[f32; 3]; 3] = [
    [0.986993, -0.147054, 0.159963],
    [0.432305, 0.518360, 0.049291],
    [-0.008529, 0.040043, 0.968487],
];

// sRGB (D65) linear RGB <-> XYZ matrices
const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];
const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

fn mul(m: &[[f32; 3]; 3], v: (f32, f32, f32)) -> (f32, f32, f32) {
    (
        m[0][0] * v.0 + m[0][1] * v.1 + m[0][2] * v.2,
        m[1][0] * v.0 + m[1][1] * v.1 + m[1][2] * v.2,
        m[2][0] * v.0 + m[2][1] * v.1 + m[2][2] * v.2,
    )
}

/// Capability of converting a color into the XYZ hub space
pub trait IntoCieXyz {
    /// Converts this color to CIE XYZ under the given converter
    fn into_xyz(self, converter: &ColorSpaceConverter) -> CieXyz;
}

/// Capability of constructing a color from the XYZ hub space
pub trait FromCieXyz {
    /// Builds this color from CIE XYZ under the given converter
    fn from_xyz(xyz: CieXyz, converter: &ColorSpaceConverter) -> Self;
}

/// Converts colors between colorimetric spaces through a CIE XYZ hub
///
/// Stateful only in its configuration: the reference white point and
/// whether chromatic adaptation is performed. Every conversion is
/// side-effect-free.
#[derive(Debug, Clone, Copy)]
pub struct ColorSpaceConverter {
    /// Reference white point for Lab/Luv scaling and adaptation target
    pub white_point: CieXyz,
    /// Whether sources with a different native white are adapted
    pub adapt_chromaticity: bool,
}

impl Default for ColorSpaceConverter {
    fn default() -> Self {
        ColorSpaceConverter {
            white_point: D50,
            adapt_chromaticity: true,
        }
    }
}

impl ColorSpaceConverter {
    /// Creates a converter with the D50 white point and adaptation on
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a converter with an explicit white point and adaptation flag
    pub fn with_white_point(white_point: CieXyz, adapt_chromaticity: bool) -> Self {
        ColorSpaceConverter {
            white_point,
            adapt_chromaticity,
        }
    }

    /// Converts one color between any two supported spaces
    pub fn convert<S: IntoCieXyz, D: FromCieXyz>(&self, color: S) -> D {
        let xyz = color.into_xyz(self);
        D::from_xyz(xyz, self)
    }

    /// Converts a sequence of colors into a pre-allocated destination
    ///
    /// Each element's conversion is independent; element i of the
    /// destination receives the conversion of element i of the source.
    ///
    /// # Arguments
    /// * `source` - The colors to convert
    /// * `destination` - Receives the converted colors; must hold at
    ///   least `source.len()` elements
    pub fn convert_slice<S: IntoCieXyz + Copy, D: FromCieXyz>(
        &self,
        source: &[S],
        destination: &mut [D],
    ) -> TiffResult<()> {
        if destination.len() < source.len() {
            return Err(TiffError::ArgumentError(format!(
                "destination holds {} elements, {} required",
                destination.len(),
                source.len()
            )));
        }

        for (src, dst) in source.iter().zip(destination.iter_mut()) {
            *dst = self.convert(*src);
        }

        Ok(())
    }

    /// Bradford chromatic adaptation from one white point to another
    fn adapt(&self, xyz: CieXyz, from: CieXyz, to: CieXyz) -> CieXyz {
        if !self.adapt_chromaticity {
            return xyz;
        }

        let cone = mul(&BRADFORD, (xyz.x, xyz.y, xyz.z));
        let cone_from = mul(&BRADFORD, (from.x, from.y, from.z));
        let cone_to = mul(&BRADFORD, (to.x, to.y, to.z));

        let scaled = (
            cone.0 * cone_to.0 / cone_from.0,
            cone.1 * cone_to.1 / cone_from.1,
            cone.2 * cone_to.2 / cone_from.2,
        );
        let (x, y, z) = mul(&BRADFORD_INV, scaled);
        CieXyz::new(x, y, z)
    }

    /// Adapts an XYZ value from the sRGB native white to the configured one
    fn adapt_from_srgb(&self, xyz: CieXyz) -> CieXyz {
        self.adapt(xyz, D65, self.white_point)
    }

    /// Adapts an XYZ value from the configured white to the sRGB native one
    fn adapt_to_srgb(&self, xyz: CieXyz) -> CieXyz {
        self.adapt(xyz, self.white_point, D65)
    }
}

// ---------------------------------------------------------------------------
// sRGB companding

fn expand(channel: f32) -> f32 {
    if channel > 0.04045 {
        ((channel + 0.055) / 1.055).powf(2.4)
    } else {
        channel / 12.92
    }
}

fn compress(channel: f32) -> f32 {
    let compressed = if channel > 0.0031308 {
        1.055 * channel.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * channel
    };
    compressed.clamp(0.0, 1.0)
}

impl Rgb {
    /// Expands companded sRGB to linear RGB
    pub fn to_linear(self) -> LinearRgb {
        LinearRgb::new(expand(self.r), expand(self.g), expand(self.b))
    }
}

impl LinearRgb {
    /// Compresses linear RGB to companded sRGB
    pub fn to_companded(self) -> Rgb {
        Rgb::new(compress(self.r), compress(self.g), compress(self.b))
    }
}

// ---------------------------------------------------------------------------
// Hub identity

impl IntoCieXyz for CieXyz {
    fn into_xyz(self, _converter: &ColorSpaceConverter) -> CieXyz {
        self
    }
}

impl FromCieXyz for CieXyz {
    fn from_xyz(xyz: CieXyz, _converter: &ColorSpaceConverter) -> Self {
        xyz
    }
}

// ---------------------------------------------------------------------------
// RGB family (native white D65)

impl IntoCieXyz for LinearRgb {
    fn into_xyz(self, converter: &ColorSpaceConverter) -> CieXyz {
        let (x, y, z) = mul(&RGB_TO_XYZ, (self.r, self.g, self.b));
        converter.adapt_from_srgb(CieXyz::new(x, y, z))
    }
}

impl FromCieXyz for LinearRgb {
    fn from_xyz(xyz: CieXyz, converter: &ColorSpaceConverter) -> Self {
        let xyz = converter.adapt_to_srgb(xyz);
        let (r, g, b) = mul(&XYZ_TO_RGB, (xyz.x, xyz.y, xyz.z));
        LinearRgb::new(r, g, b)
    }
}

impl IntoCieXyz for Rgb {
    fn into_xyz(self, converter: &ColorSpaceConverter) -> CieXyz {
        self.to_linear().into_xyz(converter)
    }
}

impl FromCieXyz for Rgb {
    fn from_xyz(xyz: CieXyz, converter: &ColorSpaceConverter) -> Self {
        LinearRgb::from_xyz(xyz, converter).to_companded()
    }
}

// ---------------------------------------------------------------------------
// CIE xyY

impl IntoCieXyz for CieXyy {
    fn into_xyz(self, _converter: &ColorSpaceConverter) -> CieXyz {
        if self.y <= 0.0 {
            return CieXyz::new(0.0, 0.0, 0.0);
        }
        let x = self.x * self.yl / self.y;
        let z = (1.0 - self.x - self.y) * self.yl / self.y;
        CieXyz::new(x, self.yl, z)
    }
}

impl FromCieXyz for CieXyy {
    fn from_xyz(xyz: CieXyz, _converter: &ColorSpaceConverter) -> Self {
        let sum = xyz.x + xyz.y + xyz.z;
        if sum <= 0.0 {
            return CieXyy::new(0.0, 0.0, 0.0);
        }
        CieXyy::new(xyz.x / sum, xyz.y / sum, xyz.y)
    }
}

// ---------------------------------------------------------------------------
// CIE Lab / LCh

fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        (LAB_KAPPA * t + 16.0) / 116.0
    }
}

fn lab_f_inv(t: f32) -> f32 {
    let cubed = t * t * t;
    if cubed > LAB_EPSILON {
        cubed
    } else {
        (116.0 * t - 16.0) / LAB_KAPPA
    }
}

impl IntoCieXyz for CieLab {
    fn into_xyz(self, converter: &ColorSpaceConverter) -> CieXyz {
        let white = converter.white_point;
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;

        let yr = if self.l > LAB_KAPPA * LAB_EPSILON {
            let t = (self.l + 16.0) / 116.0;
            t * t * t
        } else {
            self.l / LAB_KAPPA
        };

        CieXyz::new(lab_f_inv(fx) * white.x, yr * white.y, lab_f_inv(fz) * white.z)
    }
}

impl FromCieXyz for CieLab {
    fn from_xyz(xyz: CieXyz, converter: &ColorSpaceConverter) -> Self {
        let white = converter.white_point;
        let fx = lab_f(xyz.x / white.x);
        let fy = lab_f(xyz.y / white.y);
        let fz = lab_f(xyz.z / white.z);

        CieLab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
    }
}

fn to_polar(a: f32, b: f32) -> (f32, f32) {
    let c = (a * a + b * b).sqrt();
    let mut h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h += 360.0;
    }
    (c, h)
}

fn from_polar(c: f32, h: f32) -> (f32, f32) {
    let radians = h.to_radians();
    (c * radians.cos(), c * radians.sin())
}

impl IntoCieXyz for CieLch {
    fn into_xyz(self, converter: &ColorSpaceConverter) -> CieXyz {
        let (a, b) = from_polar(self.c, self.h);
        CieLab::new(self.l, a, b).into_xyz(converter)
    }
}

impl FromCieXyz for CieLch {
    fn from_xyz(xyz: CieXyz, converter: &ColorSpaceConverter) -> Self {
        let lab = CieLab::from_xyz(xyz, converter);
        let (c, h) = to_polar(lab.a, lab.b);
        CieLch::new(lab.l, c, h)
    }
}

// ---------------------------------------------------------------------------
// CIE Luv / LChuv

fn luv_u_prime(xyz: CieXyz) -> f32 {
    let denominator = xyz.x + 15.0 * xyz.y + 3.0 * xyz.z;
    if denominator <= 0.0 {
        0.0
    } else {
        4.0 * xyz.x / denominator
    }
}

fn luv_v_prime(xyz: CieXyz) -> f32 {
    let denominator = xyz.x + 15.0 * xyz.y + 3.0 * xyz.z;
    if denominator <= 0.0 {
        0.0
    } else {
        9.0 * xyz.y / denominator
    }
}

impl IntoCieXyz for CieLuv {
    fn into_xyz(self, converter: &ColorSpaceConverter) -> CieXyz {
        if self.l <= 0.0 {
            return CieXyz::new(0.0, 0.0, 0.0);
        }

        let white = converter.white_point;
        let u0 = luv_u_prime(white);
        let v0 = luv_v_prime(white);

        let y = if self.l > LAB_KAPPA * LAB_EPSILON {
            let t = (self.l + 16.0) / 116.0;
            t * t * t
        } else {
            self.l / LAB_KAPPA
        };

        let u_prime = self.u / (13.0 * self.l) + u0;
        let v_prime = self.v / (13.0 * self.l) + v0;
        if v_prime <= 0.0 {
            return CieXyz::new(0.0, y, 0.0);
        }

        let x = y * 9.0 * u_prime / (4.0 * v_prime);
        let z = y * (12.0 - 3.0 * u_prime - 20.0 * v_prime) / (4.0 * v_prime);
        CieXyz::new(x, y, z)
    }
}

impl FromCieXyz for CieLuv {
    fn from_xyz(xyz: CieXyz, converter: &ColorSpaceConverter) -> Self {
        let white = converter.white_point;
        let yr = xyz.y / white.y;

        let l = if yr > LAB_EPSILON {
            116.0 * yr.cbrt() - 16.0
        } else {
            LAB_KAPPA * yr
        };

        if l <= 0.0 {
            return CieLuv::new(0.0, 0.0, 0.0);
        }

        let u = 13.0 * l * (luv_u_prime(xyz) - luv_u_prime(white));
        let v = 13.0 * l * (luv_v_prime(xyz) - luv_v_prime(white));
        CieLuv::new(l, u, v)
    }
}

impl IntoCieXyz for CieLchuv {
    fn into_xyz(self, converter: &ColorSpaceConverter) -> CieXyz {
        let (u, v) = from_polar(self.c, self.h);
        CieLuv::new(self.l, u, v).into_xyz(converter)
    }
}

impl FromCieXyz for CieLchuv {
    fn from_xyz(xyz: CieXyz, converter: &ColorSpaceConverter) -> Self {
        let luv = CieLuv::from_xyz(xyz, converter);
        let (c, h) = to_polar(luv.u, luv.v);
        CieLchuv::new(luv.l, c, h)
    }
}

// ---------------------------------------------------------------------------
// HSL / HSV (defined on companded sRGB)

fn rgb_min_max(rgb: Rgb) -> (f32, f32) {
    (
        rgb.r.min(rgb.g).min(rgb.b),
        rgb.r.max(rgb.g).max(rgb.b),
    )
}

fn rgb_hue(rgb: Rgb, min: f32, max: f32) -> f32 {
    if max <= min {
        return 0.0;
    }

    let delta = max - min;
    let mut h = if (max - rgb.r).abs() < f32::EPSILON {
        (rgb.g - rgb.b) / delta
    } else if (max - rgb.g).abs() < f32::EPSILON {
        2.0 + (rgb.b - rgb.r) / delta
    } else {
        4.0 + (rgb.r - rgb.g) / delta
    } * 60.0;

    if h < 0.0 {
        h += 360.0;
    }
    h
}

impl IntoCieXyz for Hsl {
    fn into_xyz(self, converter: &ColorSpaceConverter) -> CieXyz {
        let c = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
        let h = self.h / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = self.l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new(r + m, g + m, b + m).into_xyz(converter)
    }
}

impl FromCieXyz for Hsl {
    fn from_xyz(xyz: CieXyz, converter: &ColorSpaceConverter) -> Self {
        let rgb = Rgb::from_xyz(xyz, converter);
        let (min, max) = rgb_min_max(rgb);
        let l = (max + min) / 2.0;

        let s = if max <= min {
            0.0
        } else if l <= 0.5 {
            (max - min) / (max + min)
        } else {
            (max - min) / (2.0 - max - min)
        };

        Hsl::new(rgb_hue(rgb, min, max), s, l)
    }
}

impl IntoCieXyz for Hsv {
    fn into_xyz(self, converter: &ColorSpaceConverter) -> CieXyz {
        let c = self.v * self.s;
        let h = self.h / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = self.v - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new(r + m, g + m, b + m).into_xyz(converter)
    }
}

impl FromCieXyz for Hsv {
    fn from_xyz(xyz: CieXyz, converter: &ColorSpaceConverter) -> Self {
        let rgb = Rgb::from_xyz(xyz, converter);
        let (min, max) = rgb_min_max(rgb);

        let s = if max <= 0.0 { 0.0 } else { (max - min) / max };
        Hsv::new(rgb_hue(rgb, min, max), s, max)
    }
}

// ---------------------------------------------------------------------------
// CMYK (defined on companded sRGB)

impl IntoCieXyz for Cmyk {
    fn into_xyz(self, converter: &ColorSpaceConverter) -> CieXyz {
        let white = 1.0 - self.k;
        let rgb = Rgb::new(
            (1.0 - self.c) * white,
            (1.0 - self.m) * white,
            (1.0 - self.y) * white,
        );
        rgb.into_xyz(converter)
    }
}

impl FromCieXyz for Cmyk {
    fn from_xyz(xyz: CieXyz, converter: &ColorSpaceConverter) -> Self {
        let rgb = Rgb::from_xyz(xyz, converter);
        let k = 1.0 - rgb.r.max(rgb.g).max(rgb.b);

        if k >= 1.0 {
            return Cmyk::new(0.0, 0.0, 0.0, 1.0);
        }

        let white = 1.0 - k;
        Cmyk::new(
            (1.0 - rgb.r - k) / white,
            (1.0 - rgb.g - k) / white,
            (1.0 - rgb.b - k) / white,
            k,
        )
    }
}

// ---------------------------------------------------------------------------
// YCbCr (BT.601 full range, defined on companded sRGB)

impl IntoCieXyz for YCbCr {
    fn into_xyz(self, converter: &ColorSpaceConverter) -> CieXyz {
        let cb = self.cb - 128.0;
        let cr = self.cr - 128.0;

        let r = self.y + 1.402 * cr;
        let g = self.y - 0.344136 * cb - 0.714136 * cr;
        let b = self.y + 1.772 * cb;

        Rgb::new(
            (r / 255.0).clamp(0.0, 1.0),
            (g / 255.0).clamp(0.0, 1.0),
            (b / 255.0).clamp(0.0, 1.0),
        )
        .into_xyz(converter)
    }
}

impl FromCieXyz for YCbCr {
    fn from_xyz(xyz: CieXyz, converter: &ColorSpaceConverter) -> Self {
        let rgb = Rgb::from_xyz(xyz, converter);
        let r = rgb.r * 255.0;
        let g = rgb.g * 255.0;
        let b = rgb.b * 255.0;

        let y = 0.299 * r + 0.587 * g + 0.114 * b;
        let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
        let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;
        YCbCr::new(y, cb, cr)
    }
}
