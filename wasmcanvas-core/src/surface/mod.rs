//! The 2D drawing surface the bridge renders into.
//!
//! The surface is a single piece of mutable state: font size, text alignment
//! and fill/stroke styles persist across calls, exactly like the draw calls
//! observe them. The bridge only ever talks to [`Surface`]; the framebuffer
//! implementation lives in [`software`].

mod software;

use std::str::FromStr;
use thiserror::Error;

pub use software::SoftwareSurface;

/// Horizontal text alignment keywords recognized by the surface.
///
/// The wire form is a null-terminated keyword string in guest memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized text alignment keyword `{0}`")]
pub struct AlignmentParseError(pub String);

impl FromStr for Alignment {
    type Err = AlignmentParseError;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword {
            "left" | "start" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" | "end" => Ok(Self::Right),
            other => Err(AlignmentParseError(other.to_owned())),
        }
    }
}

/// A stateful immediate-mode 2D rendering target.
///
/// Styling setters mutate surface-wide state; draw calls use whatever state
/// is current. Colors arrive in the textual `#rrggbbaa` form produced by
/// [`crate::color::to_hex_string`].
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn set_font_size(&mut self, px: u32);
    fn set_alignment(&mut self, alignment: Alignment);
    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);

    fn fill_text(&mut self, text: &str, x: i32, y: i32);
    fn stroke_text(&mut self, text: &str, x: i32, y: i32);
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32);
    fn stroke_rect(&mut self, x: i32, y: i32, width: u32, height: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_module_keywords() {
        assert_eq!("left".parse(), Ok(Alignment::Left));
        assert_eq!("center".parse(), Ok(Alignment::Center));
        assert_eq!("right".parse(), Ok(Alignment::Right));
    }

    #[test]
    fn parses_start_end_synonyms() {
        assert_eq!("start".parse(), Ok(Alignment::Left));
        assert_eq!("end".parse(), Ok(Alignment::Right));
    }

    #[test]
    fn rejects_unknown_keywords() {
        assert_eq!(
            Alignment::from_str("middle"),
            Err(AlignmentParseError("middle".into()))
        );
        // Keyword matching is exact; no case folding.
        assert!(Alignment::from_str("Center").is_err());
    }
}
