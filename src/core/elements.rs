//! State of interactive elements shared between a widget and the router.
//!
//! The widget tree owns each element through an `Rc<RefCell<_>>`; the window
//! only keeps `Weak` handles for dispatch.

use std::collections::BTreeSet;
use std::fmt;

use crate::traits::{Direction, Focusable};

use super::geometry::BoxRect;

/// Click target
#[derive(Default)]
pub struct ButtonState {
    pub label: String,
    pub bounds: BoxRect,
    pub hovered: bool,
    pub needs_repaint: bool,
    on_click: Option<Box<dyn FnMut()>>,
}

impl ButtonState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            needs_repaint: true,
            ..Self::default()
        }
    }

    pub fn set_on_click(&mut self, callback: Box<dyn FnMut()>) {
        self.on_click = Some(callback);
    }

    pub(crate) fn take_on_click(&mut self) -> Option<Box<dyn FnMut()>> {
        self.on_click.take()
    }

    /// Put a callback back unless a new one was installed while it ran
    pub(crate) fn restore_on_click(&mut self, callback: Box<dyn FnMut()>) {
        if self.on_click.is_none() {
            self.on_click = Some(callback);
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.needs_repaint = true;
        }
    }
}

impl fmt::Debug for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonState")
            .field("label", &self.label)
            .field("bounds", &self.bounds)
            .field("hovered", &self.hovered)
            .field("needs_repaint", &self.needs_repaint)
            .field("has_on_click", &self.on_click.is_some())
            .finish()
    }
}

/// Single-line text field.
///
/// `cursor_position` is an end-relative offset in characters: 0 is the end
/// of the value, -1 is just before the last character, and so on. It is
/// never positive.
#[derive(Default)]
pub struct TextInput {
    pub value: String,
    pub cursor_position: i32,
    pub active: bool,
    pub selected: bool,
    pub needs_repaint: bool,
    pub bounds: BoxRect,
    on_commit: Option<Box<dyn FnMut(&str)>>,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            needs_repaint: true,
            ..Self::default()
        }
    }

    pub fn set_on_commit(&mut self, callback: Box<dyn FnMut(&str)>) {
        self.on_commit = Some(callback);
    }

    pub(crate) fn take_on_commit(&mut self) -> Option<Box<dyn FnMut(&str)>> {
        self.on_commit.take()
    }

    /// Put a callback back unless a new one was installed while it ran
    pub(crate) fn restore_on_commit(&mut self, callback: Box<dyn FnMut(&str)>) {
        if self.on_commit.is_none() {
            self.on_commit = Some(callback);
        }
    }

    /// Number of characters in the value
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insertion point as a character index (`len + cursor_position`),
    /// or `None` when the offset falls outside the value
    pub fn insertion_index(&self) -> Option<usize> {
        if self.cursor_position > 0 {
            return None;
        }
        let len = self.char_len() as i64;
        let idx = len + self.cursor_position as i64;
        (idx >= 0).then_some(idx as usize)
    }

    /// Insert `text` at the cursor; the end-relative offset stays unchanged
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let Some(idx) = self.insertion_index() else {
            return;
        };
        let byte = self.byte_offset(idx);
        self.value.insert_str(byte, text);
        self.needs_repaint = true;
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Delete the character just before the cursor
    pub fn backspace(&mut self) {
        if self.value.is_empty() {
            return;
        }
        let Some(idx) = self.insertion_index() else {
            return;
        };
        if idx == 0 {
            return;
        }
        let start = self.byte_offset(idx - 1);
        let end = self.byte_offset(idx);
        self.value.replace_range(start..end, "");
        self.needs_repaint = true;
    }

    /// Make this the focused, selected input
    pub fn activate(&mut self) {
        self.active = true;
        self.selected = true;
        self.needs_repaint = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.selected = false;
        self.needs_repaint = true;
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(byte, _)| byte)
            .unwrap_or(self.value.len())
    }
}

impl Focusable for TextInput {
    /// Left/right move the cursor within the value; up/down are ignored
    fn navigate(&mut self, direction: Direction) {
        let len = self.char_len() as i32;
        let next = match direction {
            Direction::Left => (self.cursor_position - 1).max(-len),
            Direction::Right => (self.cursor_position + 1).min(0),
            Direction::Up | Direction::Down => return,
        };
        if next != self.cursor_position {
            self.cursor_position = next;
            self.needs_repaint = true;
        }
    }

    fn commit(&mut self) {
        if let Some(mut callback) = self.take_on_commit() {
            callback(&self.value);
            self.restore_on_commit(callback);
        }
    }
}

impl fmt::Debug for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextInput")
            .field("value", &self.value)
            .field("cursor_position", &self.cursor_position)
            .field("active", &self.active)
            .field("selected", &self.selected)
            .field("needs_repaint", &self.needs_repaint)
            .field("bounds", &self.bounds)
            .finish()
    }
}

/// One row of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self { label: label.into(), children: Vec::new() }
    }

    pub fn branch(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self { label: label.into(), children }
    }
}

/// Visible row produced by flattening the expanded part of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Index path from the roots
    pub path: Vec<usize>,
    pub depth: usize,
    pub label: String,
    pub has_children: bool,
    pub expanded: bool,
}

/// Selection and expansion state of a tree view
#[derive(Default)]
pub struct TreeState {
    pub roots: Vec<TreeNode>,
    pub expanded: BTreeSet<Vec<usize>>,
    /// Index into `visible_rows()`
    pub selected: Option<usize>,
    pub row_height: u32,
    pub bounds: BoxRect,
    pub needs_repaint: bool,
    on_select: Option<Box<dyn FnMut(&[usize])>>,
}

impl TreeState {
    pub fn new(roots: Vec<TreeNode>, row_height: u32) -> Self {
        Self {
            roots,
            row_height: row_height.max(1),
            needs_repaint: true,
            ..Self::default()
        }
    }

    pub fn set_on_select(&mut self, callback: Box<dyn FnMut(&[usize])>) {
        self.on_select = Some(callback);
    }

    pub(crate) fn take_on_select(&mut self) -> Option<Box<dyn FnMut(&[usize])>> {
        self.on_select.take()
    }

    pub(crate) fn restore_on_select(&mut self, callback: Box<dyn FnMut(&[usize])>) {
        if self.on_select.is_none() {
            self.on_select = Some(callback);
        }
    }

    /// Expand or collapse the selected row, returning its path
    pub fn toggle_selected(&mut self) -> Option<Vec<usize>> {
        let row = self.selected_row()?;
        self.set_expanded(!row.expanded);
        Some(row.path)
    }

    /// Rows currently shown, depth first, skipping collapsed subtrees
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let mut stack: Vec<(Vec<usize>, &TreeNode)> = self
            .roots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| (vec![i], node))
            .collect();

        while let Some((path, node)) = stack.pop() {
            let expanded = self.expanded.contains(&path);
            if expanded {
                for (i, child) in node.children.iter().enumerate().rev() {
                    let mut child_path = path.clone();
                    child_path.push(i);
                    stack.push((child_path, child));
                }
            }
            rows.push(TreeRow {
                depth: path.len() - 1,
                label: node.label.clone(),
                has_children: !node.children.is_empty(),
                expanded,
                path,
            });
        }

        rows
    }

    pub fn selected_row(&self) -> Option<TreeRow> {
        let idx = self.selected?;
        self.visible_rows().into_iter().nth(idx)
    }

    /// Select the row under a device-pixel y coordinate
    pub fn select_at(&mut self, y: f64) {
        let offset = y - self.bounds.top as f64;
        if offset < 0.0 {
            return;
        }
        let row = (offset / self.row_height as f64) as usize;
        if row < self.visible_rows().len() && self.selected != Some(row) {
            self.selected = Some(row);
            self.needs_repaint = true;
        }
    }

    fn set_expanded(&mut self, expand: bool) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if !row.has_children {
            return;
        }
        let changed = if expand {
            self.expanded.insert(row.path)
        } else {
            self.expanded.remove(&row.path)
        };
        if changed {
            self.needs_repaint = true;
        }
    }
}

impl Focusable for TreeState {
    fn navigate(&mut self, direction: Direction) {
        let count = self.visible_rows().len();
        if count == 0 {
            return;
        }
        match direction {
            Direction::Up => {
                let next = self.selected.map_or(0, |s| s.saturating_sub(1));
                if self.selected != Some(next) {
                    self.selected = Some(next);
                    self.needs_repaint = true;
                }
            }
            Direction::Down => {
                let next = self.selected.map_or(0, |s| (s + 1).min(count - 1));
                if self.selected != Some(next) {
                    self.selected = Some(next);
                    self.needs_repaint = true;
                }
            }
            Direction::Right => self.set_expanded(true),
            Direction::Left => self.set_expanded(false),
        }
    }

    /// Toggle the selected row and report it to the select callback
    fn commit(&mut self) {
        let Some(path) = self.toggle_selected() else {
            return;
        };
        if let Some(mut callback) = self.take_on_select() {
            callback(&path);
            self.restore_on_select(callback);
        }
    }
}

impl fmt::Debug for TreeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeState")
            .field("roots", &self.roots.len())
            .field("expanded", &self.expanded)
            .field("selected", &self.selected)
            .field("bounds", &self.bounds)
            .finish()
    }
}
