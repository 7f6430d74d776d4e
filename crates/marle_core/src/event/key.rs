//! Keyboard events

use super::EventCategory;
use crate::input::KeyCode;
use std::fmt;

const KEY_CATEGORIES: EventCategory = EventCategory::KEYBOARD.union(EventCategory::INPUT);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressedEvent {
    key: KeyCode,
    repeat_count: u32,
}

impl KeyPressedEvent {
    pub fn new(key: KeyCode, repeat_count: u32) -> Self {
        Self { key, repeat_count }
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }

    /// Zero for the initial press, counting up while the key is held.
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat_count > 0
    }
}

impl fmt::Display for KeyPressedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPressedEvent: {} ({} repeats)", self.key, self.repeat_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyReleasedEvent {
    key: KeyCode,
}

impl KeyReleasedEvent {
    pub fn new(key: KeyCode) -> Self {
        Self { key }
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }
}

impl fmt::Display for KeyReleasedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyReleasedEvent: {}", self.key)
    }
}

/// Text input, one character per event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTypedEvent {
    character: char,
}

impl KeyTypedEvent {
    pub fn new(character: char) -> Self {
        Self { character }
    }

    pub fn character(&self) -> char {
        self.character
    }
}

impl fmt::Display for KeyTypedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyTypedEvent: {}", self.character)
    }
}

event_variant!(KeyPressedEvent, KeyPressed, KEY_CATEGORIES);
event_variant!(KeyReleasedEvent, KeyReleased, KEY_CATEGORIES);
event_variant!(KeyTypedEvent, KeyTyped, KEY_CATEGORIES);
