//! Window and application lifecycle events

use super::EventCategory;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowCloseEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowResizeEvent {
    width: u32,
    height: u32,
}

impl WindowResizeEvent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for WindowResizeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowResizeEvent: {}, {}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowFocusEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowLostFocusEvent;

/// Window moved; position of the window's top-left corner in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMovedEvent {
    x: i32,
    y: i32,
}

impl WindowMovedEvent {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }
}

impl fmt::Display for WindowMovedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowMovedEvent: {}, {}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppTickEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppUpdateEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppRenderEvent;

display_as_name!(WindowCloseEvent);
display_as_name!(WindowFocusEvent);
display_as_name!(WindowLostFocusEvent);
display_as_name!(AppTickEvent);
display_as_name!(AppUpdateEvent);
display_as_name!(AppRenderEvent);

event_variant!(WindowCloseEvent, WindowClose, EventCategory::APPLICATION);
event_variant!(WindowResizeEvent, WindowResize, EventCategory::APPLICATION);
event_variant!(WindowFocusEvent, WindowFocus, EventCategory::APPLICATION);
event_variant!(WindowLostFocusEvent, WindowLostFocus, EventCategory::APPLICATION);
event_variant!(WindowMovedEvent, WindowMoved, EventCategory::APPLICATION);
event_variant!(AppTickEvent, AppTick, EventCategory::APPLICATION);
event_variant!(AppUpdateEvent, AppUpdate, EventCategory::APPLICATION);
event_variant!(AppRenderEvent, AppRender, EventCategory::APPLICATION);
