//! Keyboard input mapping.
//!
//! The module receives one numeric code per key press. Printable characters
//! map to their character code; the four arrow keys have no character code
//! and use the reserved platform codes instead.

/// Reserved codes for the arrow keys.
pub const KEY_CODE_ARROW_LEFT: u32 = 37;
pub const KEY_CODE_ARROW_UP: u32 = 38;
pub const KEY_CODE_ARROW_RIGHT: u32 = 39;
pub const KEY_CODE_ARROW_DOWN: u32 = 40;

/// A pressed key as delivered by the host environment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// A printable character; its code is the character code.
    Character(char),
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
}

impl Key {
    /// The numeric code forwarded to `game_key_down`.
    pub fn code(self) -> u32 {
        match self {
            Key::Character(ch) => ch as u32,
            Key::ArrowLeft => KEY_CODE_ARROW_LEFT,
            Key::ArrowUp => KEY_CODE_ARROW_UP,
            Key::ArrowRight => KEY_CODE_ARROW_RIGHT,
            Key::ArrowDown => KEY_CODE_ARROW_DOWN,
        }
    }

    /// Map a key-event name to a `Key`.
    ///
    /// Single-character names are printable keys; the arrow keys arrive under
    /// their event names. Anything else (modifiers, function keys) has no
    /// mapping and is not forwarded.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowDown" => Some(Key::ArrowDown),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(Key::Character(ch)),
                    _ => None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_arrow_maps_to_reserved_code_not_a_character() {
        let key = Key::from_name("ArrowLeft").unwrap();
        assert_eq!(key, Key::ArrowLeft);
        assert_eq!(key.code(), 37);
    }

    #[test]
    fn all_four_arrows_have_distinct_reserved_codes() {
        assert_eq!(Key::ArrowUp.code(), 38);
        assert_eq!(Key::ArrowRight.code(), 39);
        assert_eq!(Key::ArrowDown.code(), 40);
    }

    #[test]
    fn printable_keys_use_their_character_code() {
        assert_eq!(Key::from_name("a").unwrap().code(), 97);
        assert_eq!(Key::from_name("t").unwrap().code(), b't' as u32);
        assert_eq!(Key::from_name(" ").unwrap().code(), 32);
    }

    #[test]
    fn unmapped_event_names_are_dropped() {
        assert_eq!(Key::from_name("Shift"), None);
        assert_eq!(Key::from_name("F1"), None);
        assert_eq!(Key::from_name(""), None);
    }
}
