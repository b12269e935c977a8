//! Colorimetric conversion network
//!
//! A post-decode collaborator: converts already-decoded colors between
//! colorimetric spaces. Every space converts to and from the CIE XYZ
//! hub, so any pair of spaces is reachable without a pairwise matrix
//! of converters.

mod converter;
mod spaces;

pub use converter::{ColorSpaceConverter, FromCieXyz, IntoCieXyz};
pub use spaces::{
    CieLab, CieLch, CieLchuv, CieLuv, CieXyy, CieXyz, Cmyk, Hsl, Hsv, LinearRgb, Rgb, YCbCr,
};
