//! Key and mouse button codes carried by input events
//!
//! Codes are plain integers so platform layers can map into them without
//! the core knowing about any windowing library.

use std::fmt;

/// Keyboard key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub i32);

impl KeyCode {
    pub const UNKNOWN: KeyCode = KeyCode(-1);

    // Printable keys
    pub const SPACE: KeyCode = KeyCode(32);
    pub const APOSTROPHE: KeyCode = KeyCode(39);
    pub const COMMA: KeyCode = KeyCode(44);
    pub const MINUS: KeyCode = KeyCode(45);
    pub const PERIOD: KeyCode = KeyCode(46);
    pub const SLASH: KeyCode = KeyCode(47);

    pub const NUM_0: KeyCode = KeyCode(48);
    pub const NUM_1: KeyCode = KeyCode(49);
    pub const NUM_2: KeyCode = KeyCode(50);
    pub const NUM_3: KeyCode = KeyCode(51);
    pub const NUM_4: KeyCode = KeyCode(52);
    pub const NUM_5: KeyCode = KeyCode(53);
    pub const NUM_6: KeyCode = KeyCode(54);
    pub const NUM_7: KeyCode = KeyCode(55);
    pub const NUM_8: KeyCode = KeyCode(56);
    pub const NUM_9: KeyCode = KeyCode(57);

    pub const SEMICOLON: KeyCode = KeyCode(59);
    pub const EQUAL: KeyCode = KeyCode(61);

    pub const A: KeyCode = KeyCode(65);
    pub const B: KeyCode = KeyCode(66);
    pub const C: KeyCode = KeyCode(67);
    pub const D: KeyCode = KeyCode(68);
    pub const E: KeyCode = KeyCode(69);
    pub const F: KeyCode = KeyCode(70);
    pub const G: KeyCode = KeyCode(71);
    pub const H: KeyCode = KeyCode(72);
    pub const I: KeyCode = KeyCode(73);
    pub const J: KeyCode = KeyCode(74);
    pub const K: KeyCode = KeyCode(75);
    pub const L: KeyCode = KeyCode(76);
    pub const M: KeyCode = KeyCode(77);
    pub const N: KeyCode = KeyCode(78);
    pub const O: KeyCode = KeyCode(79);
    pub const P: KeyCode = KeyCode(80);
    pub const Q: KeyCode = KeyCode(81);
    pub const R: KeyCode = KeyCode(82);
    pub const S: KeyCode = KeyCode(83);
    pub const T: KeyCode = KeyCode(84);
    pub const U: KeyCode = KeyCode(85);
    pub const V: KeyCode = KeyCode(86);
    pub const W: KeyCode = KeyCode(87);
    pub const X: KeyCode = KeyCode(88);
    pub const Y: KeyCode = KeyCode(89);
    pub const Z: KeyCode = KeyCode(90);

    pub const LEFT_BRACKET: KeyCode = KeyCode(91);
    pub const BACKSLASH: KeyCode = KeyCode(92);
    pub const RIGHT_BRACKET: KeyCode = KeyCode(93);
    pub const GRAVE_ACCENT: KeyCode = KeyCode(96);

    // Lock and system keys share the block after the grave accent
    pub const CAPS_LOCK: KeyCode = KeyCode(97);
    pub const SCROLL_LOCK: KeyCode = KeyCode(98);
    pub const NUM_LOCK: KeyCode = KeyCode(99);
    pub const PRINT_SCREEN: KeyCode = KeyCode(100);
    pub const PAUSE: KeyCode = KeyCode(101);
    pub const MENU: KeyCode = KeyCode(102);

    // Special keys
    pub const ESCAPE: KeyCode = KeyCode(256);
    pub const ENTER: KeyCode = KeyCode(257);
    pub const TAB: KeyCode = KeyCode(258);
    pub const BACKSPACE: KeyCode = KeyCode(259);
    pub const INSERT: KeyCode = KeyCode(260);
    pub const DELETE: KeyCode = KeyCode(261);

    // Arrow keys
    pub const RIGHT: KeyCode = KeyCode(262);
    pub const LEFT: KeyCode = KeyCode(263);
    pub const DOWN: KeyCode = KeyCode(264);
    pub const UP: KeyCode = KeyCode(265);

    pub const F1: KeyCode = KeyCode(266);
    pub const F2: KeyCode = KeyCode(267);
    pub const F3: KeyCode = KeyCode(268);
    pub const F4: KeyCode = KeyCode(269);
    pub const F5: KeyCode = KeyCode(270);
    pub const F6: KeyCode = KeyCode(271);
    pub const F7: KeyCode = KeyCode(272);
    pub const F8: KeyCode = KeyCode(273);
    pub const F9: KeyCode = KeyCode(274);
    pub const F10: KeyCode = KeyCode(275);
    pub const F11: KeyCode = KeyCode(276);
    pub const F12: KeyCode = KeyCode(277);

    // Modifiers
    pub const LEFT_SHIFT: KeyCode = KeyCode(278);
    pub const RIGHT_SHIFT: KeyCode = KeyCode(279);
    pub const LEFT_CONTROL: KeyCode = KeyCode(280);
    pub const RIGHT_CONTROL: KeyCode = KeyCode(281);
    pub const LEFT_ALT: KeyCode = KeyCode(282);
    pub const RIGHT_ALT: KeyCode = KeyCode(283);
    /// Command key on macOS
    pub const LEFT_SUPER: KeyCode = KeyCode(284);
    pub const RIGHT_SUPER: KeyCode = KeyCode(285);

    // Numpad
    pub const NUMPAD_0: KeyCode = KeyCode(286);
    pub const NUMPAD_1: KeyCode = KeyCode(287);
    pub const NUMPAD_2: KeyCode = KeyCode(288);
    pub const NUMPAD_3: KeyCode = KeyCode(289);
    pub const NUMPAD_4: KeyCode = KeyCode(290);
    pub const NUMPAD_5: KeyCode = KeyCode(291);
    pub const NUMPAD_6: KeyCode = KeyCode(292);
    pub const NUMPAD_7: KeyCode = KeyCode(293);
    pub const NUMPAD_8: KeyCode = KeyCode(294);
    pub const NUMPAD_9: KeyCode = KeyCode(295);
    pub const NUMPAD_DECIMAL: KeyCode = KeyCode(296);
    pub const NUMPAD_DIVIDE: KeyCode = KeyCode(297);
    pub const NUMPAD_MULTIPLY: KeyCode = KeyCode(298);
    pub const NUMPAD_SUBTRACT: KeyCode = KeyCode(299);
    pub const NUMPAD_ADD: KeyCode = KeyCode(300);
    pub const NUMPAD_ENTER: KeyCode = KeyCode(301);
    pub const NUMPAD_EQUAL: KeyCode = KeyCode(302);

    pub fn is_unknown(self) -> bool {
        self == KeyCode::UNKNOWN
    }

    pub fn is_modifier(self) -> bool {
        (Self::LEFT_SHIFT.0..=Self::RIGHT_SUPER.0).contains(&self.0)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mouse button code
///
/// Codes past `FORWARD` are extra buttons, numbered as the platform reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MouseButton(pub u16);

impl MouseButton {
    pub const LEFT: MouseButton = MouseButton(0);
    pub const RIGHT: MouseButton = MouseButton(1);
    pub const MIDDLE: MouseButton = MouseButton(2);
    pub const BACK: MouseButton = MouseButton(3);
    pub const FORWARD: MouseButton = MouseButton(4);
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_follow_special_block() {
        assert_eq!(KeyCode::ESCAPE.0, 256);
        assert_eq!(KeyCode::LEFT.0, 263);
        assert_eq!(KeyCode::UP.0, 265);
        assert_eq!(KeyCode::F12.0, 277);
        assert_eq!(KeyCode::NUMPAD_EQUAL.0, 302);
    }

    #[test]
    fn modifier_range() {
        assert!(KeyCode::LEFT_SHIFT.is_modifier());
        assert!(KeyCode::RIGHT_SUPER.is_modifier());
        assert!(!KeyCode::F12.is_modifier());
        assert!(!KeyCode::NUMPAD_0.is_modifier());
    }

    #[test]
    fn codes_display_as_numbers() {
        assert_eq!(KeyCode::LEFT.to_string(), "263");
        assert_eq!(MouseButton::MIDDLE.to_string(), "2");
        assert!(KeyCode::UNKNOWN.is_unknown());
    }

    #[test]
    fn extra_mouse_buttons_keep_distinct_codes() {
        assert_ne!(MouseButton(256), MouseButton(257));
        assert_eq!(MouseButton(300).to_string(), "300");
    }
}
