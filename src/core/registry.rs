use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::elements::{ButtonState, TextInput, TreeState};
use super::event::PointerButton;

/// Stable identifier of a registered element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

/// Non-owning handle to a registered element
#[derive(Debug, Clone)]
pub enum ElementRef {
    Button(Weak<RefCell<ButtonState>>),
    Input(Weak<RefCell<TextInput>>),
    Tree(Weak<RefCell<TreeState>>),
}

impl ElementRef {
    fn is_alive(&self) -> bool {
        match self {
            ElementRef::Button(w) => w.strong_count() > 0,
            ElementRef::Input(w) => w.strong_count() > 0,
            ElementRef::Tree(w) => w.strong_count() > 0,
        }
    }
}

/// Element found under a point, upgraded for the duration of dispatch
#[derive(Debug, Clone)]
pub enum Hit {
    Button(ElementId, Rc<RefCell<ButtonState>>),
    Input(ElementId, Rc<RefCell<TextInput>>),
    Tree(ElementId, Rc<RefCell<TreeState>>),
}

#[derive(Debug)]
struct Registration {
    id: ElementId,
    element: ElementRef,
}

/// Interactive elements registered with a window, in registration order.
///
/// Later registrations are treated as top-most for hit-testing.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    next_id: u64,
    entries: Vec<Registration>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_button(&mut self, button: &Rc<RefCell<ButtonState>>) -> ElementId {
        self.insert(ElementRef::Button(Rc::downgrade(button)))
    }

    pub fn register_input(&mut self, input: &Rc<RefCell<TextInput>>) -> ElementId {
        self.insert(ElementRef::Input(Rc::downgrade(input)))
    }

    pub fn register_tree(&mut self, tree: &Rc<RefCell<TreeState>>) -> ElementId {
        self.insert(ElementRef::Tree(Rc::downgrade(tree)))
    }

    fn insert(&mut self, element: ElementRef) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.entries.push(Registration { id, element });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-most live element whose bounds contain the point
    pub fn hit_test(&self, x: f64, y: f64) -> Option<Hit> {
        self.entries.iter().rev().find_map(|entry| match &entry.element {
            ElementRef::Button(weak) => {
                let button = weak.upgrade()?;
                let hit = button.borrow().bounds.contains(x, y);
                hit.then(|| Hit::Button(entry.id, button))
            }
            ElementRef::Input(weak) => {
                let input = weak.upgrade()?;
                let hit = input.borrow().bounds.contains(x, y);
                hit.then(|| Hit::Input(entry.id, input))
            }
            ElementRef::Tree(weak) => {
                let tree = weak.upgrade()?;
                let hit = tree.borrow().bounds.contains(x, y);
                hit.then(|| Hit::Tree(entry.id, tree))
            }
        })
    }

    pub fn input(&self, id: ElementId) -> Option<Rc<RefCell<TextInput>>> {
        self.entries.iter().find(|e| e.id == id).and_then(|e| match &e.element {
            ElementRef::Input(weak) => weak.upgrade(),
            _ => None,
        })
    }

    pub fn tree(&self, id: ElementId) -> Option<Rc<RefCell<TreeState>>> {
        self.entries.iter().find(|e| e.id == id).and_then(|e| match &e.element {
            ElementRef::Tree(weak) => weak.upgrade(),
            _ => None,
        })
    }

    /// Live buttons in registration order
    pub fn buttons(&self) -> impl Iterator<Item = (ElementId, Rc<RefCell<ButtonState>>)> + '_ {
        self.entries.iter().filter_map(|e| match &e.element {
            ElementRef::Button(weak) => weak.upgrade().map(|button| (e.id, button)),
            _ => None,
        })
    }

    /// Drop registrations whose widget no longer exists, returning how many went away
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.element.is_alive());
        before - self.entries.len()
    }
}

pub type PointerListener = Box<dyn FnMut(f64, f64)>;
pub type ScrollListener = Box<dyn FnMut(i32)>;
pub type ClickListener = Box<dyn FnMut(PointerButton)>;

/// Generic listeners attached to a window
#[derive(Default)]
pub struct Listeners {
    pub pointer_position: Vec<PointerListener>,
    pub scroll: Vec<ScrollListener>,
    pub click: Vec<ClickListener>,
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("pointer_position", &self.pointer_position.len())
            .field("scroll", &self.scroll.len())
            .field("click", &self.click.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BoxRect;

    fn button_at(bounds: BoxRect) -> Rc<RefCell<ButtonState>> {
        let button = Rc::new(RefCell::new(ButtonState::new("b")));
        button.borrow_mut().bounds = bounds;
        button
    }

    #[test]
    fn test_hit_test_prefers_latest_registration() {
        let mut registry = ElementRegistry::new();
        let below = button_at(BoxRect::new(0, 0, 100, 100));
        let above = Rc::new(RefCell::new(TextInput::new("")));
        above.borrow_mut().bounds = BoxRect::new(10, 10, 20, 20);

        registry.register_button(&below);
        let input_id = registry.register_input(&above);

        match registry.hit_test(15.0, 15.0) {
            Some(Hit::Input(id, _)) => assert_eq!(id, input_id),
            other => panic!("expected input hit, got {:?}", other),
        }
        assert!(matches!(registry.hit_test(50.0, 50.0), Some(Hit::Button(..))));
        assert!(registry.hit_test(150.0, 50.0).is_none());
    }

    #[test]
    fn test_dropped_widgets_are_skipped_and_pruned() {
        let mut registry = ElementRegistry::new();
        let kept = button_at(BoxRect::new(0, 0, 10, 10));
        registry.register_button(&kept);
        {
            let dropped = button_at(BoxRect::new(0, 0, 10, 10));
            registry.register_button(&dropped);
        }

        assert!(matches!(registry.hit_test(5.0, 5.0), Some(Hit::Button(..))));
        assert_eq!(registry.buttons().count(), 1);
        assert_eq!(registry.prune(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_by_id_checks_kind() {
        let mut registry = ElementRegistry::new();
        let input = Rc::new(RefCell::new(TextInput::new("x")));
        let tree = Rc::new(RefCell::new(TreeState::new(Vec::new(), 10)));
        let input_id = registry.register_input(&input);
        let tree_id = registry.register_tree(&tree);

        assert!(registry.input(input_id).is_some());
        assert!(registry.input(tree_id).is_none());
        assert!(registry.tree(tree_id).is_some());
        assert!(registry.tree(input_id).is_none());
    }

    #[test]
    fn test_ids_are_distinct() {
        let mut registry = ElementRegistry::new();
        let a = button_at(BoxRect::default());
        let id1 = registry.register_button(&a);
        let id2 = registry.register_button(&a);
        assert_ne!(id1, id2);
    }
}
