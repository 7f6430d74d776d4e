//! Typed routing of one event to at most one handler

use super::{Event, EventVariant};

/// Borrows a single event for a run of [`dispatch`](Self::dispatch) calls.
///
/// Build one per incoming event, issue `dispatch` for each variant you care
/// about, then drop it. Only the call whose type matches the bound event
/// runs its handler; check [`Event::is_handled`] afterwards to learn whether
/// anything consumed it.
pub struct EventDispatcher<'a> {
    event: &'a mut Event,
}

impl<'a> EventDispatcher<'a> {
    pub fn new(event: &'a mut Event) -> Self {
        Self { event }
    }

    /// Run `handler` if the bound event is a `T`.
    ///
    /// Returns whether the type matched, not what the handler decided. On a
    /// match the handler's return value replaces the event's handled flag;
    /// on a mismatch nothing is touched.
    pub fn dispatch<T, F>(&mut self, handler: F) -> bool
    where
        T: EventVariant,
        F: FnOnce(&mut T) -> bool,
    {
        if self.event.event_type() != T::TYPE {
            return false;
        }
        let Some(payload) = T::from_kind_mut(self.event.kind_mut()) else {
            return false;
        };
        let handled = handler(payload);
        self.event.set_handled(handled);
        true
    }

    pub fn event(&self) -> &Event {
        self.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{
        KeyPressedEvent, KeyReleasedEvent, MouseMovedEvent, WindowCloseEvent, WindowResizeEvent,
    };
    use crate::input::KeyCode;

    #[test]
    fn mismatch_leaves_event_untouched() {
        let mut event: Event = WindowResizeEvent::new(1280, 720).into();
        let mut called = false;

        let mut dispatcher = EventDispatcher::new(&mut event);
        let matched = dispatcher.dispatch(|_: &mut KeyPressedEvent| {
            called = true;
            true
        });

        assert!(!matched);
        assert!(!called);
        assert!(!event.is_handled());
    }

    #[test]
    fn mismatch_keeps_prior_handled_value() {
        let mut event: Event = WindowCloseEvent.into();
        let mut dispatcher = EventDispatcher::new(&mut event);
        assert!(dispatcher.dispatch(|_: &mut WindowCloseEvent| true));
        assert!(!dispatcher.dispatch(|_: &mut MouseMovedEvent| false));
        assert!(event.is_handled());
    }

    #[test]
    fn match_records_handler_decision() {
        for decision in [true, false] {
            let mut event: Event = WindowCloseEvent.into();
            let mut calls = 0;
            let matched = EventDispatcher::new(&mut event).dispatch(|_: &mut WindowCloseEvent| {
                calls += 1;
                decision
            });
            assert!(matched);
            assert_eq!(calls, 1);
            assert_eq!(event.is_handled(), decision);
        }
    }

    #[test]
    fn handler_sees_payload() {
        let mut event: Event = WindowResizeEvent::new(1024, 768).into();
        let mut seen = None;
        EventDispatcher::new(&mut event).dispatch(|e: &mut WindowResizeEvent| {
            seen = Some((e.width(), e.height()));
            false
        });
        assert_eq!(seen, Some((1024, 768)));
    }

    #[test]
    fn left_arrow_press_reaches_only_pressed_handler() {
        let mut event: Event = KeyPressedEvent::new(KeyCode::LEFT, 0).into();
        let mut pressed_calls = 0;
        let mut released_calls = 0;

        let mut dispatcher = EventDispatcher::new(&mut event);
        let pressed_matched = dispatcher.dispatch(|e: &mut KeyPressedEvent| {
            pressed_calls += 1;
            assert_eq!(e.key(), KeyCode::LEFT);
            assert_eq!(e.repeat_count(), 0);
            true
        });
        let released_matched = dispatcher.dispatch(|_: &mut KeyReleasedEvent| {
            released_calls += 1;
            false
        });

        assert!(pressed_matched);
        assert!(!released_matched);
        assert_eq!(pressed_calls, 1);
        assert_eq!(released_calls, 0);
        assert!(event.is_handled());
    }

    #[test]
    fn repeated_dispatch_reinvokes_and_overwrites() {
        let mut event: Event = KeyPressedEvent::new(KeyCode::A, 1).into();
        let mut calls = 0;

        let mut dispatcher = EventDispatcher::new(&mut event);
        assert!(dispatcher.dispatch(|_: &mut KeyPressedEvent| {
            calls += 1;
            true
        }));
        assert!(dispatcher.event().is_handled());
        assert!(dispatcher.dispatch(|_: &mut KeyPressedEvent| {
            calls += 1;
            false
        }));

        assert_eq!(calls, 2);
        assert!(!event.is_handled());
    }
}
