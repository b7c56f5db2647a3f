//! Maps raw input events to widget-level actions and listeners.
//!
//! Every handler tolerates missing state (no active input, dropped widget,
//! empty value) by doing nothing; dispatch has no error channel.

use std::cell::RefCell;
use std::rc::Rc;

use crate::traits::{CursorShape, Direction, Focusable, NativeSurface};

use super::elements::{TextInput, TreeState};
use super::event::{Action, InputEvent, Key, Modifiers, PointerButton};
use super::registry::Hit;
use super::state::WindowState;

/// Scroll distance in lines reported to scroll listeners; any non-zero
/// movement counts as at least one line in its direction
pub fn scroll_steps(delta: f64) -> i32 {
    if delta == 0.0 || !delta.is_finite() {
        return 0;
    }
    let steps = delta.round() as i32;
    if steps == 0 {
        delta.signum() as i32
    } else {
        steps
    }
}

/// Event dispatcher working on borrowed window state
pub struct InputRouter<'a> {
    state: &'a mut WindowState,
    surface: &'a mut dyn NativeSurface,
}

impl<'a> InputRouter<'a> {
    pub fn new(state: &'a mut WindowState, surface: &'a mut dyn NativeSurface) -> Self {
        Self { state, surface }
    }

    /// Dispatch one event
    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::Focused(focused) => self.state.focused = focused,
            InputEvent::Resized { width, height } => {
                let scale = self.surface.content_scale();
                self.state.apply_resize(width, height, scale);
            }
            InputEvent::CursorMoved { x, y } => self.pointer_moved(x, y),
            InputEvent::Character(ch) => self.character(ch),
            InputEvent::Key { key, action, modifiers } => self.key(key, action, modifiers),
            InputEvent::MouseButton { button, action } => {
                if action == Action::Release {
                    self.pointer_click(button);
                }
            }
            InputEvent::Scroll { dy, .. } => self.scroll(dy),
            InputEvent::CloseRequested => {
                log::info!("close requested for '{}'", self.state.title);
                self.state.close_requested = true;
            }
        }
    }

    fn pointer_moved(&mut self, raw_x: f64, raw_y: f64) {
        let scale = self.state.effective_scale(self.surface.content_scale());
        let (x, y) = (raw_x / scale, raw_y / scale);
        self.state.cursor = (x, y);

        for listener in self.state.listeners.pointer_position.iter_mut() {
            listener(x, y);
        }

        let hit = self.state.registry.hit_test(raw_x, raw_y);
        let hovered = match &hit {
            Some(Hit::Button(id, _)) => Some(*id),
            _ => None,
        };
        for (id, button) in self.state.registry.buttons() {
            button.borrow_mut().set_hovered(hovered == Some(id));
        }

        let shape = match hit {
            Some(Hit::Button(..)) | Some(Hit::Input(..)) => CursorShape::Pointer,
            _ => CursorShape::Default,
        };
        if shape != self.state.cursor_shape {
            self.state.cursor_shape = shape;
            self.surface.set_cursor(shape);
        }
    }

    fn pointer_click(&mut self, button: PointerButton) {
        if button == PointerButton::Left {
            let (x, y) = self.state.cursor;
            let scale = self.state.scale;
            self.activate_at(x * scale, y * scale);
        }

        for listener in self.state.listeners.click.iter_mut() {
            listener(button);
        }
    }

    fn activate_at(&mut self, x: f64, y: f64) {
        match self.state.registry.hit_test(x, y) {
            Some(Hit::Button(_, button)) => {
                self.state.deactivate_input();
                self.state.focused_tree = None;

                let callback = button.borrow_mut().take_on_click();
                if let Some(mut callback) = callback {
                    callback();
                    button.borrow_mut().restore_on_click(callback);
                }
            }
            Some(Hit::Input(id, input)) => {
                if self.state.active_input != Some(id) {
                    self.state.deactivate_input();
                    self.state.active_input = Some(id);
                }
                self.state.focused_tree = None;
                input.borrow_mut().activate();
            }
            Some(Hit::Tree(id, tree)) => {
                self.state.deactivate_input();
                self.state.focused_tree = Some(id);
                tree.borrow_mut().select_at(y);
            }
            None => {
                self.state.deactivate_input();
                self.state.focused_tree = None;
            }
        }
    }

    fn scroll(&mut self, dy: f64) {
        let steps = scroll_steps(dy);
        if steps == 0 {
            return;
        }
        for listener in self.state.listeners.scroll.iter_mut() {
            listener(steps);
        }
    }

    fn character(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        if let Some(input) = self.active_input() {
            input.borrow_mut().insert_char(ch);
        }
    }

    fn key(&mut self, key: Key, action: Action, modifiers: Modifiers) {
        let released = action == Action::Release;
        let repeating = released || action == Action::Repeat;

        match key {
            Key::Backspace if repeating => {
                if let Some(input) = self.active_input() {
                    input.borrow_mut().backspace();
                }
            }
            Key::Escape if released => {
                self.state.destroy_context_menu();
                self.state.deactivate_input();
            }
            Key::Up if repeating => self.navigate(Direction::Up),
            Key::Down if repeating => self.navigate(Direction::Down),
            Key::Left if repeating => self.navigate(Direction::Left),
            Key::Right if repeating => self.navigate(Direction::Right),
            Key::V if released && modifiers.is_paste_shortcut() => self.paste(),
            Key::Enter if released => self.commit(),
            _ => {}
        }
    }

    fn paste(&mut self) {
        let Some(input) = self.active_input() else {
            return;
        };
        if let Some(text) = self.surface.clipboard_text() {
            input.borrow_mut().insert_str(&text);
        }
    }

    /// Relay a direction to whichever component owns focus
    fn navigate(&mut self, direction: Direction) {
        if let Some(input) = self.active_input() {
            input.borrow_mut().navigate(direction);
        } else if let Some(tree) = self.focused_tree() {
            tree.borrow_mut().navigate(direction);
        }
    }

    /// Callbacks run with the element released so they may borrow it again
    fn commit(&mut self) {
        if let Some(input) = self.active_input() {
            let (callback, value) = {
                let mut input = input.borrow_mut();
                (input.take_on_commit(), input.value.clone())
            };
            if let Some(mut callback) = callback {
                callback(&value);
                input.borrow_mut().restore_on_commit(callback);
            }
        } else if let Some(tree) = self.focused_tree() {
            let selection = {
                let mut tree = tree.borrow_mut();
                let selection = match tree.toggle_selected() {
                    Some(path) => tree.take_on_select().map(|callback| (callback, path)),
                    None => None,
                };
                selection
            };
            if let Some((mut callback, path)) = selection {
                callback(&path);
                tree.borrow_mut().restore_on_select(callback);
            }
        }
    }

    fn active_input(&mut self) -> Option<Rc<RefCell<TextInput>>> {
        let id = self.state.active_input?;
        let input = self.state.registry.input(id);
        if input.is_none() {
            log::warn!("active input {:?} no longer exists", id);
            self.state.active_input = None;
        }
        input
    }

    fn focused_tree(&mut self) -> Option<Rc<RefCell<TreeState>>> {
        let id = self.state.focused_tree?;
        let tree = self.state.registry.tree(id);
        if tree.is_none() {
            log::warn!("focused tree {:?} no longer exists", id);
            self.state.focused_tree = None;
        }
        tree
    }
}
