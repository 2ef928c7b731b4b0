// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and frame fixtures.
//!
//! Playback positions and gains are `f64`; compare them with the `approx`
//! macros re-exported here instead of `assert_eq!`.

pub use approx::assert_abs_diff_eq;

use image_rs::{Rgba, RgbaImage};

/// A uniformly colored RGBA frame.
pub fn solid_frame(width: u32, height: u32, red: u8) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([red, 0, 0, 255]))
}
