//! Engine events
//!
//! Events are blocking: a producer builds one when the platform signal
//! arrives and hands it straight to `on_event`, where it is dispatched and
//! dropped within the same call. Nothing is queued.
//!
//! The variant set is closed. Each variant is a payload struct implementing
//! [`EventVariant`], which fixes its type tag and categories at compile time;
//! [`Event`] wraps the tagged union together with the handled flag.

use bitflags::bitflags;
use std::fmt;

/// Implements [`EventVariant`] for a payload struct.
macro_rules! event_variant {
    ($payload:ident, $variant:ident, $categories:expr) => {
        impl $crate::event::EventVariant for $payload {
            const TYPE: $crate::event::EventType = $crate::event::EventType::$variant;
            const CATEGORIES: $crate::event::EventCategory = $categories;
            const NAME: &'static str = stringify!($variant);

            fn from_kind(kind: &$crate::event::EventKind) -> Option<&Self> {
                match kind {
                    $crate::event::EventKind::$variant(e) => Some(e),
                    _ => None,
                }
            }

            fn from_kind_mut(kind: &mut $crate::event::EventKind) -> Option<&mut Self> {
                match kind {
                    $crate::event::EventKind::$variant(e) => Some(e),
                    _ => None,
                }
            }

            fn into_kind(self) -> $crate::event::EventKind {
                $crate::event::EventKind::$variant(self)
            }
        }

        impl From<$payload> for $crate::event::Event {
            fn from(payload: $payload) -> Self {
                $crate::event::Event::new(payload)
            }
        }
    };
}

/// Payload-less variants display as their bare type name.
macro_rules! display_as_name {
    ($payload:ident) => {
        impl std::fmt::Display for $payload {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(<$payload as $crate::event::EventVariant>::NAME)
            }
        }
    };
}

/// Declares [`EventKind`] and the per-variant lookups over it.
macro_rules! event_kinds {
    ($($variant:ident($payload:ty)),* $(,)?) => {
        /// Tagged union over every concrete event payload
        #[derive(Debug, Clone, PartialEq)]
        pub enum EventKind {
            $($variant($payload)),*
        }

        impl EventKind {
            pub fn event_type(&self) -> EventType {
                match self {
                    $(EventKind::$variant(_) => <$payload as EventVariant>::TYPE),*
                }
            }

            pub fn category_flags(&self) -> EventCategory {
                match self {
                    $(EventKind::$variant(_) => <$payload as EventVariant>::CATEGORIES),*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(EventKind::$variant(_) => <$payload as EventVariant>::NAME),*
                }
            }
        }

        impl fmt::Display for EventKind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(EventKind::$variant(e) => fmt::Display::fmt(e, f)),*
                }
            }
        }
    };
}

pub mod application;
pub mod dispatcher;
pub mod key;
pub mod mouse;

pub use application::{
    AppRenderEvent, AppTickEvent, AppUpdateEvent, WindowCloseEvent, WindowFocusEvent,
    WindowLostFocusEvent, WindowMovedEvent, WindowResizeEvent,
};
pub use dispatcher::EventDispatcher;
pub use key::{KeyPressedEvent, KeyReleasedEvent, KeyTypedEvent};
pub use mouse::{MouseButtonPressedEvent, MouseButtonReleasedEvent, MouseMovedEvent, MouseScrolledEvent};

/// Type tag of every event variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    None,
    WindowClose,
    WindowResize,
    WindowFocus,
    WindowLostFocus,
    WindowMoved,
    AppTick,
    AppUpdate,
    AppRender,
    KeyPressed,
    KeyReleased,
    KeyTyped,
    MouseButtonPressed,
    MouseButtonReleased,
    MouseMoved,
    MouseScrolled,
}

bitflags! {
    /// Coarse event grouping for filtering without a full dispatch
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventCategory: u8 {
        const APPLICATION = 1 << 0;
        const INPUT = 1 << 1;
        const KEYBOARD = 1 << 2;
        const MOUSE = 1 << 3;
        const MOUSE_BUTTON = 1 << 4;
    }
}

/// A concrete event payload with a static type tag.
pub trait EventVariant: fmt::Display + Sized + 'static {
    const TYPE: EventType;
    const CATEGORIES: EventCategory;
    const NAME: &'static str;

    fn from_kind(kind: &EventKind) -> Option<&Self>;
    fn from_kind_mut(kind: &mut EventKind) -> Option<&mut Self>;
    fn into_kind(self) -> EventKind;
}

event_kinds! {
    WindowClose(WindowCloseEvent),
    WindowResize(WindowResizeEvent),
    WindowFocus(WindowFocusEvent),
    WindowLostFocus(WindowLostFocusEvent),
    WindowMoved(WindowMovedEvent),
    AppTick(AppTickEvent),
    AppUpdate(AppUpdateEvent),
    AppRender(AppRenderEvent),
    KeyPressed(KeyPressedEvent),
    KeyReleased(KeyReleasedEvent),
    KeyTyped(KeyTypedEvent),
    MouseButtonPressed(MouseButtonPressedEvent),
    MouseButtonReleased(MouseButtonReleasedEvent),
    MouseMoved(MouseMovedEvent),
    MouseScrolled(MouseScrolledEvent),
}

/// An event plus its handled flag.
///
/// The kind never changes after construction. The handled flag is written
/// only by [`EventDispatcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: EventKind,
    handled: bool,
}

impl Event {
    pub fn new<T: EventVariant>(payload: T) -> Self {
        Self {
            kind: payload.into_kind(),
            handled: false,
        }
    }

    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    pub fn category_flags(&self) -> EventCategory {
        self.kind.category_flags()
    }

    /// True if the event belongs to any of the given categories.
    pub fn is_in_category(&self, category: EventCategory) -> bool {
        self.category_flags().intersects(category)
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Typed read access, `None` if the event is another variant.
    pub fn get<T: EventVariant>(&self) -> Option<&T> {
        T::from_kind(&self.kind)
    }

    pub(crate) fn kind_mut(&mut self) -> &mut EventKind {
        &mut self.kind
    }

    pub(crate) fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}
