use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use super::event::{Action, InputEvent, Key, Modifiers, PointerButton};

/// Pixel scroll deltas (touchpads) are converted to lines at this rate
pub const PIXELS_PER_LINE: f64 = 20.0;

/// Translates winit window events into the core's [`InputEvent`]s.
///
/// Tracks the platform scale factor and modifier state, neither of which
/// winit repeats on every event.
#[derive(Debug, Clone)]
pub struct WinitInputAdapter {
    platform_scale: f64,
    modifiers: Modifiers,
}

impl WinitInputAdapter {
    pub fn new(platform_scale: f64) -> Self {
        Self {
            platform_scale: if platform_scale > 0.0 { platform_scale } else { 1.0 },
            modifiers: Modifiers::NONE,
        }
    }

    /// Translate one event. `window_scale` is the window's effective scale,
    /// used to express cursor positions in frame-buffer pixels.
    pub fn translate(&mut self, event: &WindowEvent, window_scale: f64) -> Vec<InputEvent> {
        match event {
            WindowEvent::Focused(focused) => vec![InputEvent::Focused(*focused)],
            WindowEvent::Resized(size) => vec![InputEvent::Resized {
                width: size.width as f64 / self.platform_scale,
                height: size.height as f64 / self.platform_scale,
            }],
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.platform_scale = *scale_factor;
                // winit follows up with a Resized event
                Vec::new()
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = device_position(position.x, position.y, self.platform_scale, window_scale);
                vec![InputEvent::CursorMoved { x, y }]
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = map_modifiers(modifiers.state());
                Vec::new()
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let action = map_action(event.state, event.repeat);
                let key = match event.physical_key {
                    PhysicalKey::Code(code) => map_keycode(code),
                    PhysicalKey::Unidentified(_) => Key::Other,
                };

                let mut events = vec![InputEvent::Key {
                    key,
                    action,
                    modifiers: self.modifiers,
                }];
                if action != Action::Release && !self.modifiers.control && !self.modifiers.super_key {
                    if let Some(text) = event.text.as_ref() {
                        events.extend(text.chars().filter(|c| !c.is_control()).map(InputEvent::Character));
                    }
                }
                events
            }
            WindowEvent::MouseInput { state, button, .. } => vec![InputEvent::MouseButton {
                button: map_mouse_button(*button),
                action: map_action(*state, false),
            }],
            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = scroll_lines(*delta);
                vec![InputEvent::Scroll { dx, dy }]
            }
            WindowEvent::CloseRequested => vec![InputEvent::CloseRequested],
            _ => Vec::new(),
        }
    }
}

impl Default for WinitInputAdapter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Physical platform pixels to pixels of a frame buffer at `window_scale`
pub fn device_position(x: f64, y: f64, platform_scale: f64, window_scale: f64) -> (f64, f64) {
    let factor = window_scale / platform_scale;
    (x * factor, y * factor)
}

pub fn map_action(state: ElementState, repeat: bool) -> Action {
    match state {
        ElementState::Released => Action::Release,
        ElementState::Pressed if repeat => Action::Repeat,
        ElementState::Pressed => Action::Press,
    }
}

pub fn map_keycode(code: KeyCode) -> Key {
    match code {
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::KeyV => Key::V,
        _ => Key::Other,
    }
}

pub fn map_mouse_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Back => PointerButton::Other(3),
        MouseButton::Forward => PointerButton::Other(4),
        MouseButton::Other(n) => PointerButton::Other(n),
    }
}

pub fn map_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
        super_key: state.super_key(),
    }
}

/// Scroll delta in lines
pub fn scroll_lines(delta: MouseScrollDelta) -> (f64, f64) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (x as f64, y as f64),
        MouseScrollDelta::PixelDelta(pos) => (pos.x / PIXELS_PER_LINE, pos.y / PIXELS_PER_LINE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{PhysicalPosition, PhysicalSize};

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_keycode(KeyCode::Backspace), Key::Backspace);
        assert_eq!(map_keycode(KeyCode::NumpadEnter), Key::Enter);
        assert_eq!(map_keycode(KeyCode::ArrowLeft), Key::Left);
        assert_eq!(map_keycode(KeyCode::KeyV), Key::V);
        assert_eq!(map_keycode(KeyCode::KeyW), Key::Other);
    }

    #[test]
    fn test_action_mapping() {
        assert_eq!(map_action(ElementState::Pressed, false), Action::Press);
        assert_eq!(map_action(ElementState::Pressed, true), Action::Repeat);
        assert_eq!(map_action(ElementState::Released, false), Action::Release);
    }

    #[test]
    fn test_mouse_button_mapping() {
        assert_eq!(map_mouse_button(MouseButton::Left), PointerButton::Left);
        assert_eq!(map_mouse_button(MouseButton::Right), PointerButton::Right);
        assert_eq!(map_mouse_button(MouseButton::Other(7)), PointerButton::Other(7));
    }

    #[test]
    fn test_modifier_mapping() {
        let mods = map_modifiers(ModifiersState::CONTROL | ModifiersState::SHIFT);
        assert!(mods.control && mods.shift);
        assert!(!mods.alt && !mods.super_key);
    }

    #[test]
    fn test_device_position_scales_between_platform_and_window() {
        // Platform at 2x, window without hiDPI: physical px are halved
        assert_eq!(device_position(200.0, 100.0, 2.0, 1.0), (100.0, 50.0));
        // Same scale on both sides passes through
        assert_eq!(device_position(200.0, 100.0, 2.0, 2.0), (200.0, 100.0));
    }

    #[test]
    fn test_scroll_lines() {
        assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(0.0, -2.0)), (0.0, -2.0));
        let pixels = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0));
        assert_eq!(scroll_lines(pixels), (0.0, 2.0));
    }

    #[test]
    fn test_resize_reports_logical_size() {
        let mut adapter = WinitInputAdapter::new(2.0);
        let events = adapter.translate(&WindowEvent::Resized(PhysicalSize::new(1600, 1200)), 1.0);
        assert_eq!(
            events,
            vec![InputEvent::Resized {
                width: 800.0,
                height: 600.0
            }]
        );
    }

    #[test]
    fn test_close_and_focus_pass_through() {
        let mut adapter = WinitInputAdapter::default();
        assert_eq!(
            adapter.translate(&WindowEvent::CloseRequested, 1.0),
            vec![InputEvent::CloseRequested]
        );
        assert_eq!(
            adapter.translate(&WindowEvent::Focused(true), 1.0),
            vec![InputEvent::Focused(true)]
        );
        assert!(adapter.translate(&WindowEvent::Occluded(false), 1.0).is_empty());
    }
}
