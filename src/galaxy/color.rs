//! Mood colors.
//!
//! The palette is kept as CSS hex strings and parsed once on lookup, so the
//! same parser validates user palette overrides from the config file.

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to normalized f32 (for rendering)
    #[inline(always)]
    pub fn to_f32(self) -> [f32; 4] {
        const INV_255: f32 = 1.0 / 255.0;
        [
            self.r as f32 * INV_255,
            self.g as f32 * INV_255,
            self.b as f32 * INV_255,
            self.a as f32 * INV_255,
        ]
    }

    /// Scale RGB by `brightness` (saturating) and alpha by `opacity`.
    ///
    /// Brightness above 1 washes the color toward white, the way an emissive
    /// material blooms.
    pub fn shade(self, brightness: f32, opacity: f32) -> Self {
        let b = brightness.max(0.0);
        let lift = ((b - 1.0).max(0.0) * 0.25).min(1.0);
        let ch = |c: u8| {
            let base = (c as f32 * b.min(1.0)).min(255.0);
            (base + (255.0 - base) * lift).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: ch(self.r),
            g: ch(self.g),
            b: ch(self.b),
            a: (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8,
        }
    }
}

/// Hex character → 4-bit value, or `None` for a non-hex byte.
#[inline(always)]
fn hex_digit(b: u8) -> Option<u8> {
    let is_digit = b.wrapping_sub(b'0') < 10;
    let is_lower = b.wrapping_sub(b'a') < 6;
    let is_upper = b.wrapping_sub(b'A') < 6;
    match (is_digit, is_lower, is_upper) {
        (true, _, _) => Some(b - b'0'),
        (_, true, _) => Some(b - b'a' + 10),
        (_, _, true) => Some(b - b'A' + 10),
        _ => None,
    }
}

#[inline(always)]
fn hex_byte(hi: u8, lo: u8) -> Option<u8> {
    Some((hex_digit(hi)? << 4) | hex_digit(lo)?)
}

#[inline(always)]
fn hex_nibble_doubled(b: u8) -> Option<u8> {
    let v = hex_digit(b)?;
    Some(v << 4 | v)
}

/// Parse a CSS hex color: `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
pub fn parse_hex_color(s: &str) -> Option<Rgba> {
    let bytes = s.trim().as_bytes();
    if bytes.first() != Some(&b'#') {
        return None;
    }

    match bytes.len() {
        4 => Some(Rgba {
            r: hex_nibble_doubled(bytes[1])?,
            g: hex_nibble_doubled(bytes[2])?,
            b: hex_nibble_doubled(bytes[3])?,
            a: 255,
        }),
        5 => Some(Rgba {
            r: hex_nibble_doubled(bytes[1])?,
            g: hex_nibble_doubled(bytes[2])?,
            b: hex_nibble_doubled(bytes[3])?,
            a: hex_nibble_doubled(bytes[4])?,
        }),
        7 => Some(Rgba {
            r: hex_byte(bytes[1], bytes[2])?,
            g: hex_byte(bytes[3], bytes[4])?,
            b: hex_byte(bytes[5], bytes[6])?,
            a: 255,
        }),
        9 => Some(Rgba {
            r: hex_byte(bytes[1], bytes[2])?,
            g: hex_byte(bytes[3], bytes[4])?,
            b: hex_byte(bytes[5], bytes[6])?,
            a: hex_byte(bytes[7], bytes[8])?,
        }),
        _ => None,
    }
}

/// Built-in mood palette.
pub const MOOD_PALETTE: &[(&str, &str)] = &[
    ("Joy", "#FFD700"),      // gold
    ("Calm", "#00FFCC"),     // aqua
    ("Neutral", "#FFFFFF"),  // white
    ("Tired", "#8A2BE2"),    // violet
    ("Stressed", "#FF4500"), // orange-red
    ("Angry", "#FF0000"),    // red
    ("Crying", "#00BFFF"),   // sky blue
    ("Excited", "#FF1493"),  // deep pink
    ("Sick", "#32CD32"),     // lime green
    ("Proud", "#FF8C00"),    // dark orange
    ("Love", "#FF69B4"),     // hot pink
];

/// Color for unknown, custom or empty mood labels.
pub const FALLBACK_COLOR: Rgba = Rgba::WHITE;

/// Look up a mood in the built-in palette.
pub fn palette_color(mood: &str) -> Option<Rgba> {
    MOOD_PALETTE
        .iter()
        .find(|(name, _)| *name == mood)
        .and_then(|(_, hex)| parse_hex_color(hex))
}
