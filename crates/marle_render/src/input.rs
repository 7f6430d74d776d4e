//! winit input to engine events

use marle_core::event::{
    KeyPressedEvent, KeyReleasedEvent, KeyTypedEvent, MouseButtonPressedEvent,
    MouseButtonReleasedEvent, MouseMovedEvent, MouseScrolledEvent, WindowCloseEvent,
    WindowFocusEvent, WindowLostFocusEvent, WindowMovedEvent, WindowResizeEvent,
};
use marle_core::input::{KeyCode, MouseButton};
use marle_core::Event;
use std::collections::HashMap;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};

/// Pixel scroll deltas are reported in lines of this height
const PIXELS_PER_LINE: f64 = 20.0;

/// Converts window events into engine events.
///
/// Tracks held keys so auto-repeat presses carry an increasing repeat count.
#[derive(Debug, Default)]
pub struct InputTranslator {
    held: HashMap<KeyCode, u32>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit zero or more engine events for one window event.
    pub fn translate(&mut self, event: &WindowEvent, sink: &mut dyn FnMut(Event)) {
        match event {
            WindowEvent::CloseRequested => sink(WindowCloseEvent.into()),
            WindowEvent::Resized(size) => sink(WindowResizeEvent::new(size.width, size.height).into()),
            WindowEvent::Moved(pos) => sink(WindowMovedEvent::new(pos.x, pos.y).into()),
            WindowEvent::Focused(true) => sink(WindowFocusEvent.into()),
            WindowEvent::Focused(false) => {
                // Releases are not delivered to unfocused windows
                self.held.clear();
                sink(WindowLostFocusEvent.into());
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let key = match event.physical_key {
                    PhysicalKey::Code(code) => key_code(code),
                    PhysicalKey::Unidentified(_) => KeyCode::UNKNOWN,
                };
                self.key_input(
                    key,
                    event.state == ElementState::Pressed,
                    event.repeat,
                    event.text.as_deref(),
                    sink,
                );
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = mouse_button(*button);
                let event: Event = match state {
                    ElementState::Pressed => MouseButtonPressedEvent::new(button).into(),
                    ElementState::Released => MouseButtonReleasedEvent::new(button).into(),
                };
                sink(event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                sink(MouseMovedEvent::new(position.x as f32, position.y as f32).into());
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = scroll_offsets(*delta);
                sink(MouseScrolledEvent::new(x, y).into());
            }
            _ => {}
        }
    }

    /// Keyboard handling split out from [`translate`](Self::translate);
    /// winit key events cannot be built outside winit.
    pub fn key_input(
        &mut self,
        key: KeyCode,
        pressed: bool,
        repeat: bool,
        text: Option<&str>,
        sink: &mut dyn FnMut(Event),
    ) {
        if !pressed {
            self.held.remove(&key);
            sink(KeyReleasedEvent::new(key).into());
            return;
        }

        let count = self.held.entry(key).or_insert(0);
        if repeat {
            *count += 1;
        } else {
            *count = 0;
        }
        sink(KeyPressedEvent::new(key, *count).into());

        for character in text.into_iter().flat_map(str::chars).filter(|c| !c.is_control()) {
            sink(KeyTypedEvent::new(character).into());
        }
    }
}

pub fn key_code(code: WinitKey) -> KeyCode {
    match code {
        WinitKey::Space => KeyCode::SPACE,
        WinitKey::Quote => KeyCode::APOSTROPHE,
        WinitKey::Comma => KeyCode::COMMA,
        WinitKey::Minus => KeyCode::MINUS,
        WinitKey::Period => KeyCode::PERIOD,
        WinitKey::Slash => KeyCode::SLASH,
        WinitKey::Digit0 => KeyCode::NUM_0,
        WinitKey::Digit1 => KeyCode::NUM_1,
        WinitKey::Digit2 => KeyCode::NUM_2,
        WinitKey::Digit3 => KeyCode::NUM_3,
        WinitKey::Digit4 => KeyCode::NUM_4,
        WinitKey::Digit5 => KeyCode::NUM_5,
        WinitKey::Digit6 => KeyCode::NUM_6,
        WinitKey::Digit7 => KeyCode::NUM_7,
        WinitKey::Digit8 => KeyCode::NUM_8,
        WinitKey::Digit9 => KeyCode::NUM_9,
        WinitKey::Semicolon => KeyCode::SEMICOLON,
        WinitKey::Equal => KeyCode::EQUAL,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyB => KeyCode::B,
        WinitKey::KeyC => KeyCode::C,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::KeyE => KeyCode::E,
        WinitKey::KeyF => KeyCode::F,
        WinitKey::KeyG => KeyCode::G,
        WinitKey::KeyH => KeyCode::H,
        WinitKey::KeyI => KeyCode::I,
        WinitKey::KeyJ => KeyCode::J,
        WinitKey::KeyK => KeyCode::K,
        WinitKey::KeyL => KeyCode::L,
        WinitKey::KeyM => KeyCode::M,
        WinitKey::KeyN => KeyCode::N,
        WinitKey::KeyO => KeyCode::O,
        WinitKey::KeyP => KeyCode::P,
        WinitKey::KeyQ => KeyCode::Q,
        WinitKey::KeyR => KeyCode::R,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyT => KeyCode::T,
        WinitKey::KeyU => KeyCode::U,
        WinitKey::KeyV => KeyCode::V,
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyX => KeyCode::X,
        WinitKey::KeyY => KeyCode::Y,
        WinitKey::KeyZ => KeyCode::Z,
        WinitKey::BracketLeft => KeyCode::LEFT_BRACKET,
        WinitKey::Backslash => KeyCode::BACKSLASH,
        WinitKey::BracketRight => KeyCode::RIGHT_BRACKET,
        WinitKey::Backquote => KeyCode::GRAVE_ACCENT,
        WinitKey::CapsLock => KeyCode::CAPS_LOCK,
        WinitKey::ScrollLock => KeyCode::SCROLL_LOCK,
        WinitKey::NumLock => KeyCode::NUM_LOCK,
        WinitKey::PrintScreen => KeyCode::PRINT_SCREEN,
        WinitKey::Pause => KeyCode::PAUSE,
        WinitKey::ContextMenu => KeyCode::MENU,
        WinitKey::Escape => KeyCode::ESCAPE,
        WinitKey::Enter => KeyCode::ENTER,
        WinitKey::Tab => KeyCode::TAB,
        WinitKey::Backspace => KeyCode::BACKSPACE,
        WinitKey::Insert => KeyCode::INSERT,
        WinitKey::Delete => KeyCode::DELETE,
        WinitKey::ArrowRight => KeyCode::RIGHT,
        WinitKey::ArrowLeft => KeyCode::LEFT,
        WinitKey::ArrowDown => KeyCode::DOWN,
        WinitKey::ArrowUp => KeyCode::UP,
        WinitKey::F1 => KeyCode::F1,
        WinitKey::F2 => KeyCode::F2,
        WinitKey::F3 => KeyCode::F3,
        WinitKey::F4 => KeyCode::F4,
        WinitKey::F5 => KeyCode::F5,
        WinitKey::F6 => KeyCode::F6,
        WinitKey::F7 => KeyCode::F7,
        WinitKey::F8 => KeyCode::F8,
        WinitKey::F9 => KeyCode::F9,
        WinitKey::F10 => KeyCode::F10,
        WinitKey::F11 => KeyCode::F11,
        WinitKey::F12 => KeyCode::F12,
        WinitKey::ShiftLeft => KeyCode::LEFT_SHIFT,
        WinitKey::ShiftRight => KeyCode::RIGHT_SHIFT,
        WinitKey::ControlLeft => KeyCode::LEFT_CONTROL,
        WinitKey::ControlRight => KeyCode::RIGHT_CONTROL,
        WinitKey::AltLeft => KeyCode::LEFT_ALT,
        WinitKey::AltRight => KeyCode::RIGHT_ALT,
        WinitKey::SuperLeft => KeyCode::LEFT_SUPER,
        WinitKey::SuperRight => KeyCode::RIGHT_SUPER,
        WinitKey::Numpad0 => KeyCode::NUMPAD_0,
        WinitKey::Numpad1 => KeyCode::NUMPAD_1,
        WinitKey::Numpad2 => KeyCode::NUMPAD_2,
        WinitKey::Numpad3 => KeyCode::NUMPAD_3,
        WinitKey::Numpad4 => KeyCode::NUMPAD_4,
        WinitKey::Numpad5 => KeyCode::NUMPAD_5,
        WinitKey::Numpad6 => KeyCode::NUMPAD_6,
        WinitKey::Numpad7 => KeyCode::NUMPAD_7,
        WinitKey::Numpad8 => KeyCode::NUMPAD_8,
        WinitKey::Numpad9 => KeyCode::NUMPAD_9,
        WinitKey::NumpadDecimal => KeyCode::NUMPAD_DECIMAL,
        WinitKey::NumpadDivide => KeyCode::NUMPAD_DIVIDE,
        WinitKey::NumpadMultiply => KeyCode::NUMPAD_MULTIPLY,
        WinitKey::NumpadSubtract => KeyCode::NUMPAD_SUBTRACT,
        WinitKey::NumpadAdd => KeyCode::NUMPAD_ADD,
        WinitKey::NumpadEnter => KeyCode::NUMPAD_ENTER,
        WinitKey::NumpadEqual => KeyCode::NUMPAD_EQUAL,
        _ => KeyCode::UNKNOWN,
    }
}

pub fn mouse_button(button: winit::event::MouseButton) -> MouseButton {
    use winit::event::MouseButton as Winit;
    match button {
        Winit::Left => MouseButton::LEFT,
        Winit::Right => MouseButton::RIGHT,
        Winit::Middle => MouseButton::MIDDLE,
        Winit::Back => MouseButton::BACK,
        Winit::Forward => MouseButton::FORWARD,
        Winit::Other(n) => MouseButton(n),
    }
}

/// Scroll offsets in lines, positive y scrolls up
pub fn scroll_offsets(delta: MouseScrollDelta) -> (f32, f32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (x, y),
        MouseScrollDelta::PixelDelta(pos) => {
            ((pos.x / PIXELS_PER_LINE) as f32, (pos.y / PIXELS_PER_LINE) as f32)
        }
    }
}
