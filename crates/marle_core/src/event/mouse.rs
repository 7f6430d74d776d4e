//! Mouse events

use super::EventCategory;
use crate::input::MouseButton;
use std::fmt;

const MOUSE_CATEGORIES: EventCategory = EventCategory::MOUSE.union(EventCategory::INPUT);
const BUTTON_CATEGORIES: EventCategory = MOUSE_CATEGORIES.union(EventCategory::MOUSE_BUTTON);

/// Cursor position in window pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMovedEvent {
    x: f32,
    y: f32,
}

impl MouseMovedEvent {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}

impl fmt::Display for MouseMovedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MouseMovedEvent: {}, {}", self.x, self.y)
    }
}

/// Scroll offsets in lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrolledEvent {
    x_offset: f32,
    y_offset: f32,
}

impl MouseScrolledEvent {
    pub fn new(x_offset: f32, y_offset: f32) -> Self {
        Self { x_offset, y_offset }
    }

    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    pub fn y_offset(&self) -> f32 {
        self.y_offset
    }
}

impl fmt::Display for MouseScrolledEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MouseScrolledEvent: {}, {}", self.x_offset, self.y_offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonPressedEvent {
    button: MouseButton,
}

impl MouseButtonPressedEvent {
    pub fn new(button: MouseButton) -> Self {
        Self { button }
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }
}

impl fmt::Display for MouseButtonPressedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MouseButtonPressedEvent: {}", self.button)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonReleasedEvent {
    button: MouseButton,
}

impl MouseButtonReleasedEvent {
    pub fn new(button: MouseButton) -> Self {
        Self { button }
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }
}

impl fmt::Display for MouseButtonReleasedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MouseButtonReleasedEvent: {}", self.button)
    }
}

event_variant!(MouseMovedEvent, MouseMoved, MOUSE_CATEGORIES);
event_variant!(MouseScrolledEvent, MouseScrolled, MOUSE_CATEGORIES);
event_variant!(MouseButtonPressedEvent, MouseButtonPressed, BUTTON_CATEGORIES);
event_variant!(MouseButtonReleasedEvent, MouseButtonReleased, BUTTON_CATEGORIES);
