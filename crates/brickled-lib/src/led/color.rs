//! Color parsing, naming, and the two color-cycling schemes.
//!
//! Colors are packed `0xRRGGBB`, the same layout the driver's
//! `effect_rgb_hex_*` files expect.

use crate::models::{MAX_COLOR, PALETTE};

/// Hue-wheel step used in extended color mode.
pub const HUE_STEP: i32 = 16;

/// Parse a color string into packed `0xRRGGBB`.
///
/// Accepts:
/// - Hex: `"#FF0000"`, `"0xFF0000"`, `"FF0000"`, `"#ff0000"`
/// - Palette names, case-insensitive: `"red"`, `"light blue"`, `"light-blue"`, ...
pub fn parse_color(s: &str) -> crate::error::Result<u32> {
    let s = s.trim();

    let wanted = s.to_lowercase().replace(['-', '_'], " ");
    if let Some((rgb, _)) = PALETTE
        .iter()
        .find(|(_, name)| name.to_lowercase() == wanted)
    {
        return Ok(*rgb);
    }
    if wanted == "off" || wanted == "black" {
        return Ok(0);
    }

    let hex = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if hex.len() != 6 {
        return Err(crate::BrickledError::Color(format!(
            "Invalid color: {s} (use #RRGGBB or a palette name)"
        )));
    }
    u32::from_str_radix(hex, 16)
        .map_err(|_| crate::BrickledError::Color(format!("Invalid hex color: {s}")))
}

/// Format a color the way the driver reads it: six uppercase hex digits, no prefix.
pub fn format_color(rgb: u32) -> String {
    format!("{:06X}", rgb & MAX_COLOR)
}

/// Palette name for `rgb`, or `0xRRGGBB` when it is not a palette entry.
pub fn color_name(rgb: u32) -> String {
    match PALETTE.iter().find(|(c, _)| *c == rgb) {
        Some((_, name)) => (*name).to_string(),
        None => format!("0x{}", format_color(rgb)),
    }
}

/// Move `delta` entries through the palette, wrapping at both ends.
///
/// A color that is not in the palette is treated as sitting at position 0,
/// so it quietly normalizes to a palette entry.
pub fn palette_step(rgb: u32, delta: i32) -> u32 {
    let n = PALETTE.len() as i32;
    let pos = PALETTE.iter().position(|(c, _)| *c == rgb).unwrap_or(0) as i32;
    PALETTE[(pos + delta).rem_euclid(n) as usize].0
}

/// Walk the edge of the RGB cube: Red → Yellow → Green → Cyan → Blue → Magenta → Red.
///
/// The current edge is found by exact 0/255 tests on two channels; the free
/// channel moves by `sign * HUE_STEP`, clamped to `0..=255`. A color on no
/// edge snaps to pure red.
pub fn next_color(rgb: u32, sign: i32) -> u32 {
    let mut r = ((rgb >> 16) & 0xFF) as i32;
    let mut g = ((rgb >> 8) & 0xFF) as i32;
    let mut b = (rgb & 0xFF) as i32;
    let step = sign * HUE_STEP;

    log::debug!("hue cycle start r={r} g={g} b={b}");
    if r == 255 && g < 255 && b == 0 {
        // red -> yellow
        g = (g + step).clamp(0, 255);
    } else if r > 0 && g == 255 && b == 0 {
        // yellow -> green
        r = (r - step).clamp(0, 255);
    } else if g == 255 && r == 0 && b < 255 {
        // green -> cyan
        b = (b + step).clamp(0, 255);
    } else if g > 0 && b == 255 && r == 0 {
        // cyan -> blue
        g = (g - step).clamp(0, 255);
    } else if b == 255 && g == 0 && r < 255 {
        // blue -> magenta
        r = (r + step).clamp(0, 255);
    } else if r == 255 && g == 0 && b > 0 {
        // magenta -> red
        b = (b - step).clamp(0, 255);
    } else {
        r = 255;
        g = 0;
        b = 0;
    }
    log::debug!("hue cycle end   r={r} g={g} b={b}");

    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}
