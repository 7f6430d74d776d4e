//! Glass sandbox client

use glam::Vec2;
use marle_core::event::KeyPressedEvent;
use marle_core::input::KeyCode;
use marle_core::{
    Application, BoxError, Context, Event, EventCategory, EventDispatcher, LoopControl, WindowProps,
};
use marle_render::{ClearColor, WinitPlatform};

pub const TITLE: &str = "Glass - The Sunken Orangerie";

pub fn window_props() -> WindowProps {
    WindowProps::new(TITLE, 1024, 768)
}

/// A point bouncing inside the unit square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bouncer {
    previous: Vec2,
    current: Vec2,
    velocity: Vec2,
}

impl Default for Bouncer {
    fn default() -> Self {
        let start = Vec2::new(0.2, 0.6);
        Self {
            previous: start,
            current: start,
            velocity: Vec2::new(0.31, 0.47),
        }
    }
}

impl Bouncer {
    pub fn step(&mut self, dt: f32) {
        self.previous = self.current;
        let mut next = self.current + self.velocity * dt;
        for axis in 0..2 {
            if next[axis] < 0.0 {
                next[axis] = -next[axis];
                self.velocity[axis] = -self.velocity[axis];
            } else if next[axis] > 1.0 {
                next[axis] = 2.0 - next[axis];
                self.velocity[axis] = -self.velocity[axis];
            }
        }
        self.current = next;
    }

    pub fn position(&self) -> Vec2 {
        self.current
    }

    /// Blend between the last two simulated states
    pub fn interpolated(&self, alpha: f64) -> Vec2 {
        self.previous.lerp(self.current, alpha as f32)
    }
}

const DEEP: ClearColor = ClearColor::rgb(0.02, 0.06, 0.12);
const SHALLOW: ClearColor = ClearColor::rgb(0.25, 0.55, 0.45);

pub fn clear_color(point: Vec2) -> ClearColor {
    let depth = DEEP.lerp(SHALLOW, f64::from(point.y));
    ClearColor {
        r: depth.r + 0.2 * f64::from(point.x),
        ..depth
    }
}

#[derive(Debug, Default)]
pub struct Sandbox {
    bouncer: Bouncer,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bouncer(&self) -> &Bouncer {
        &self.bouncer
    }
}

impl Application<WinitPlatform> for Sandbox {
    fn on_start(&mut self, ctx: &mut Context<'_, WinitPlatform>) -> Result<(), BoxError> {
        if let Some(graphics) = ctx.platform().graphics() {
            let (width, height) = graphics.size();
            tracing::info!(
                adapter = %graphics.capabilities().adapter_name,
                width,
                height,
                "sandbox started"
            );
        }
        Ok(())
    }

    fn on_update(&mut self, _ctx: &mut Context<'_, WinitPlatform>, fixed_delta: f64) -> Result<(), BoxError> {
        self.bouncer.step(fixed_delta as f32);
        Ok(())
    }

    fn on_render(&mut self, ctx: &mut Context<'_, WinitPlatform>, alpha: f64) -> Result<(), BoxError> {
        let color = clear_color(self.bouncer.interpolated(alpha));
        ctx.platform().graphics_mut()?.clear(color)?;
        Ok(())
    }

    fn on_event(&mut self, event: &mut Event, control: &mut LoopControl) {
        if event.is_in_category(EventCategory::INPUT) {
            tracing::debug!(%event, "input");
        }

        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch(|key: &mut KeyPressedEvent| {
            if key.key() == KeyCode::ESCAPE {
                control.stop();
                return true;
            }
            false
        });
    }

    fn on_shutdown(&mut self) {
        let position = self.bouncer.position();
        tracing::info!(x = position.x, y = position.y, "sandbox shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marle_core::event::MouseMovedEvent;

    #[test]
    fn bouncer_stays_inside_the_square() {
        let mut bouncer = Bouncer::default();
        for _ in 0..10_000 {
            bouncer.step(1.0 / 60.0);
            let p = bouncer.position();
            assert!((0.0..=1.0).contains(&p.x), "x escaped: {p}");
            assert!((0.0..=1.0).contains(&p.y), "y escaped: {p}");
        }
    }

    #[test]
    fn interpolation_spans_previous_to_current() {
        let mut bouncer = Bouncer::default();
        let before = bouncer.position();
        bouncer.step(0.1);
        assert_eq!(bouncer.interpolated(0.0), before);
        assert_eq!(bouncer.interpolated(1.0), bouncer.position());
    }

    #[test]
    fn escape_stops_the_loop() {
        let mut sandbox = Sandbox::new();
        let mut control = LoopControl::new();

        let mut other: Event = KeyPressedEvent::new(KeyCode::SPACE, 0).into();
        sandbox.on_event(&mut other, &mut control);
        assert!(control.is_running());
        assert!(!other.is_handled());

        let mut escape: Event = KeyPressedEvent::new(KeyCode::ESCAPE, 0).into();
        sandbox.on_event(&mut escape, &mut control);
        assert!(!control.is_running());
        assert!(escape.is_handled());
    }

    #[test]
    fn mouse_events_pass_through() {
        let mut sandbox = Sandbox::new();
        let mut control = LoopControl::new();
        let mut moved: Event = MouseMovedEvent::new(3.0, 4.0).into();
        sandbox.on_event(&mut moved, &mut control);
        assert!(control.is_running());
        assert!(!moved.is_handled());
    }

    #[test]
    fn window_props_match_sandbox() {
        let props = window_props();
        assert_eq!(props.title, TITLE);
        assert_eq!((props.width, props.height), (1024, 768));
    }
}
