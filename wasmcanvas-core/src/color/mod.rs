//! Packed RGBA colors and their textual form.
//!
//! Colors cross the module boundary as one packed 32-bit integer, channel
//! order red/green/blue/alpha from high to low byte. The drawing surface
//! consumes the textual `#rrggbbaa` form, so the bridge converts on every
//! draw call.

/// One 8-bit-per-channel RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Unpack from the wire format (red in the most significant byte).
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> 24) & 0xFF) as u8,
            g: ((packed >> 16) & 0xFF) as u8,
            b: ((packed >> 8) & 0xFF) as u8,
            a: (packed & 0xFF) as u8,
        }
    }

    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }

    /// Parse the `#rrggbbaa` textual form (case-insensitive).
    pub fn parse_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#')?;
        if hex.len() != 8 {
            return None;
        }
        let packed = u32::from_str_radix(hex, 16).ok()?;
        Some(Self::from_packed(packed))
    }
}

/// Format a packed color as `#rrggbbaa`, two lowercase hex digits per channel.
pub fn to_hex_string(packed: u32) -> String {
    let c = Rgba::from_packed(packed);
    format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
}
