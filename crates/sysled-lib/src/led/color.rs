//! Color type, parsing and formatting.
//!
//! Components are 16-bit with premultiplied alpha: a half-transparent red is
//! stored as `r = 0x8080, a = 0x8080`, not `r = 0xFFFF`.

use std::fmt;

use serde::Serialize;

use crate::error::LedError;

/// Full scale of a 16-bit component.
pub const FULL_SCALE: u16 = 0xFFFF;

/// Premultiplied-alpha color with 16-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, FULL_SCALE);
    pub const WHITE: Color = Color::new(FULL_SCALE, FULL_SCALE, FULL_SCALE, FULL_SCALE);

    /// Build from premultiplied 16-bit components.
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Color { r, g, b, a }
    }

    /// Build from premultiplied 8-bit components (`0x80` widens to `0x8080`).
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::new(widen(r), widen(g), widen(b), widen(a))
    }

    /// Opaque color from 8-bit components.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Color::rgba8(r, g, b, 0xFF)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == FULL_SCALE
    }

    /// Straight (non-premultiplied) red, green, blue in `0.0..=1.0`.
    ///
    /// Alpha 0 is fully transparent and maps every channel to 0.0. A
    /// channel larger than alpha is malformed premultiplied input and is
    /// clamped to 1.0.
    pub fn intensities(&self) -> [f64; 3] {
        let a = u32::from(self.a);
        if a == 0 {
            return [0.0; 3];
        }
        let full = u32::from(FULL_SCALE);
        [self.r, self.g, self.b].map(|c| {
            let c = u32::from(c);
            // c * full fits in u32 for any pair of 16-bit values.
            let straight = if a == full { c } else { c * full / a };
            (f64::from(straight) / f64::from(full)).min(1.0)
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_color(self))
    }
}

const fn widen(c: u8) -> u16 {
    c as u16 * 0x101
}

fn premultiply(c: u8, a: u8) -> u16 {
    let c = u32::from(widen(c));
    let a = u32::from(widen(a));
    (c * a / u32::from(FULL_SCALE)) as u16
}

/// Parse a color string.
///
/// Accepts:
/// - Hex: `"#FF0000"`, `"FF0000"`, `"#ff0000"`
/// - Hex with straight alpha: `"#FF000080"`
/// - Named: `"red"`, `"green"`, `"blue"`, `"white"`, `"orange"`, `"yellow"`, `"purple"`, `"cyan"`, `"off"`/`"black"`
pub fn parse_color(s: &str) -> crate::error::Result<Color> {
    let s = s.trim();

    match s.to_lowercase().as_str() {
        "red" => return Ok(Color::rgb8(0xFF, 0x00, 0x00)),
        "green" => return Ok(Color::rgb8(0x00, 0xFF, 0x00)),
        "blue" => return Ok(Color::rgb8(0x00, 0x00, 0xFF)),
        "white" => return Ok(Color::WHITE),
        "orange" => return Ok(Color::rgb8(0xFF, 0x80, 0x00)),
        "yellow" => return Ok(Color::rgb8(0xFF, 0xFF, 0x00)),
        "purple" => return Ok(Color::rgb8(0x80, 0x00, 0xFF)),
        "cyan" => return Ok(Color::rgb8(0x00, 0xFF, 0xFF)),
        "off" | "black" => return Ok(Color::BLACK),
        _ => {}
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if (hex.len() != 6 && hex.len() != 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(LedError::Color(format!(
            "Invalid color: {s} (use #RRGGBB, #RRGGBBAA or a color name)"
        )));
    }
    let val = u32::from_str_radix(hex, 16)
        .map_err(|_| LedError::Color(format!("Invalid hex color: {s}")))?;
    let [r, g, b, a] = if hex.len() == 6 {
        (val << 8 | 0xFF).to_be_bytes()
    } else {
        val.to_be_bytes()
    };
    Ok(Color::new(
        premultiply(r, a),
        premultiply(g, a),
        premultiply(b, a),
        widen(a),
    ))
}

/// Format a color as straight `#RRGGBB`, with `AA` appended when not opaque.
pub fn format_color(color: &Color) -> String {
    let [r, g, b] = color.intensities().map(|c| (c * 255.0).round() as u8);
    if color.is_opaque() {
        format!("#{r:02X}{g:02X}{b:02X}")
    } else {
        let a = color.a >> 8;
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}
