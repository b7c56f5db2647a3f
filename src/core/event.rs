/// Key identifiers the router reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Backspace,
    Escape,
    Enter,
    Up,
    Down,
    Left,
    Right,
    V,
    Other,
}

/// Key or button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Press,
    Repeat,
    Release,
}

/// Held modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub super_key: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, control: false, alt: false, super_key: false };

    pub const CONTROL: Modifiers = Modifiers { shift: false, control: true, alt: false, super_key: false };

    pub const SUPER: Modifiers = Modifiers { shift: false, control: false, alt: false, super_key: true };

    /// Exactly the platform paste modifier (Cmd on macOS, Ctrl elsewhere)
    pub fn is_paste_shortcut(&self) -> bool {
        if cfg!(target_os = "macos") {
            *self == Self::SUPER
        } else {
            *self == Self::CONTROL
        }
    }
}

/// Mouse button reported to click listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Platform-neutral input event, queued by the native callbacks and
/// dispatched at the end of each frame.
///
/// Coordinates are raw surface coordinates, i.e. device pixels at the
/// window's effective scale. Sizes are logical.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Focused(bool),
    Resized { width: f64, height: f64 },
    CursorMoved { x: f64, y: f64 },
    Character(char),
    Key { key: Key, action: Action, modifiers: Modifiers },
    MouseButton { button: PointerButton, action: Action },
    /// Signed scroll amount in lines; positive scrolls up. Scroll listeners
    /// only see `dy`, and a zero `dy` does not reach them.
    Scroll { dx: f64, dy: f64 },
    CloseRequested,
}

impl InputEvent {
    pub fn key(key: Key, action: Action) -> Self {
        InputEvent::Key { key, action, modifiers: Modifiers::NONE }
    }

    pub fn release(key: Key) -> Self {
        Self::key(key, Action::Release)
    }

    pub fn click(button: PointerButton) -> Self {
        InputEvent::MouseButton { button, action: Action::Release }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paste_shortcut_requires_exact_modifier() {
        let paste = if cfg!(target_os = "macos") { Modifiers::SUPER } else { Modifiers::CONTROL };
        assert!(paste.is_paste_shortcut());
        assert!(!Modifiers::NONE.is_paste_shortcut());

        let with_shift = Modifiers { shift: true, ..paste };
        assert!(!with_shift.is_paste_shortcut());
    }

    #[test]
    fn test_helpers() {
        assert_eq!(
            InputEvent::release(Key::Escape),
            InputEvent::Key { key: Key::Escape, action: Action::Release, modifiers: Modifiers::NONE }
        );
        assert_eq!(
            InputEvent::click(PointerButton::Left),
            InputEvent::MouseButton { button: PointerButton::Left, action: Action::Release }
        );
    }
}
