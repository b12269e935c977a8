//! Colorimetric space value types
//!
//! Plain value structs, one per supported space. All conversions live
//! in the converter module; the types themselves carry no math beyond
//! construction.

/// sRGB color with companded components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Rgb { r, g, b }
    }

    /// Builds a color from 8-bit components
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Rgb {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }
}

/// sRGB color with linear (gamma-expanded) components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearRgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        LinearRgb { r, g, b }
    }
}

/// CIE XYZ tristimulus values, the hub space of the conversion network
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CieXyz {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CieXyz {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        CieXyz { x, y, z }
    }
}

/// CIE xyY chromaticity plus luminance
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CieXyy {
    /// Chromaticity x
    pub x: f32,
    /// Chromaticity y
    pub y: f32,
    /// Luminance Y
    pub yl: f32,
}

impl CieXyy {
    pub fn new(x: f32, y: f32, yl: f32) -> Self {
        CieXyy { x, y, yl }
    }
}

/// CIE L*a*b*, relative to the converter's white point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CieLab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl CieLab {
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        CieLab { l, a, b }
    }
}

/// CIE L*C*h°, the cylindrical form of L*a*b* (hue in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CieLch {
    pub l: f32,
    pub c: f32,
    pub h: f32,
}

impl CieLch {
    pub fn new(l: f32, c: f32, h: f32) -> Self {
        CieLch { l, c, h }
    }
}

/// CIE L*u*v*, relative to the converter's white point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CieLuv {
    pub l: f32,
    pub u: f32,
    pub v: f32,
}

impl CieLuv {
    pub fn new(l: f32, u: f32, v: f32) -> Self {
        CieLuv { l, u, v }
    }
}

/// CIE L*C*h°uv, the cylindrical form of L*u*v* (hue in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CieLchuv {
    pub l: f32,
    pub c: f32,
    pub h: f32,
}

impl CieLchuv {
    pub fn new(l: f32, c: f32, h: f32) -> Self {
        CieLchuv { l, c, h }
    }
}

/// Hue (degrees), saturation and lightness in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Hsl { h, s, l }
    }
}

/// Hue (degrees), saturation and value in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Hsv { h, s, v }
    }
}

/// Cyan, magenta, yellow and key components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cmyk {
    pub c: f32,
    pub m: f32,
    pub y: f32,
    pub k: f32,
}

impl Cmyk {
    pub fn new(c: f32, m: f32, y: f32, k: f32) -> Self {
        Cmyk { c, m, y, k }
    }
}

/// Luma and chroma components in [0, 255] (BT.601, full range)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YCbCr {
    pub y: f32,
    pub cb: f32,
    pub cr: f32,
}

impl YCbCr {
    pub fn new(y: f32, cb: f32, cr: f32) -> Self {
        YCbCr { y, cb, cr }
    }
}
