//! Small widget tree used by the `mustard` binary.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use image::Rgba;

use crate::core::elements::{ButtonState, TextInput, TreeNode, TreeState};
use crate::core::geometry::Point;
use crate::core::graphics_context::GraphicsContext;
use crate::core::overlay::Overlay;
use crate::core::window::Window;
use crate::traits::{FrameRenderer, NativeSurface};
use crate::widgets::{draw_text, ButtonWidget, FrameWidget, InputWidget, TreeWidget, ACCENT, FIELD};

pub const BADGE_REFERENCE: &str = "version-badge";

const BACKGROUND: Rgba<u8> = Rgba([245, 245, 245, 255]);
const BADGE_SIZE: (u32, u32) = (72, 20);

/// Shared handles to the demo's interactive elements
pub struct Demo {
    pub button: Rc<RefCell<ButtonState>>,
    pub input: Rc<RefCell<TextInput>>,
    pub tree: Rc<RefCell<TreeState>>,
    pub clicks: Rc<Cell<u32>>,
}

fn sample_tree() -> Vec<TreeNode> {
    vec![
        TreeNode::branch(
            "src",
            vec![
                TreeNode::branch("core", vec![TreeNode::leaf("window.rs"), TreeNode::leaf("router.rs")]),
                TreeNode::leaf("lib.rs"),
            ],
        ),
        TreeNode::branch("tests", vec![TreeNode::leaf("window_tests.rs")]),
        TreeNode::leaf("Cargo.toml"),
    ]
}

/// Version badge pinned to the top-right corner
pub fn badge(window_width: u32) -> Overlay {
    let (width, height) = BADGE_SIZE;
    let mut ctx = GraphicsContext::filled(width, height, ACCENT);
    draw_text(&mut ctx, "v0.1", 20, 5, FIELD);

    let x = window_width.saturating_sub(width + 8) as i32;
    Overlay::from_context(BADGE_REFERENCE, &ctx, Point::new(x, 8))
}

/// Install the demo tree, registrations, listeners and badge on `window`
pub fn build<S: NativeSurface, R: FrameRenderer>(window: &mut Window<S, R>) -> Demo {
    let button = ButtonWidget::new("Say hello");
    let input = InputWidget::new("hello");
    let tree = TreeWidget::new(sample_tree(), 22);
    let demo = Demo {
        button: button.state(),
        input: input.state(),
        tree: tree.state(),
        clicks: Rc::new(Cell::new(0)),
    };

    let clicks = demo.clicks.clone();
    window.register_button(&demo.button, move || {
        clicks.set(clicks.get() + 1);
        log::info!("hello #{}", clicks.get());
    });

    demo.input
        .borrow_mut()
        .set_on_commit(Box::new(|value| log::info!("committed '{}'", value)));
    window.register_input(&demo.input);

    demo.tree
        .borrow_mut()
        .set_on_select(Box::new(|path| log::info!("selected {:?}", path)));
    window.register_tree(&demo.tree);

    window.attach_scroll_listener(|lines| log::debug!("scrolled {} lines", lines));
    window.attach_click_listener(|button| log::debug!("{:?} click", button));

    let root = FrameWidget::new(BACKGROUND)
        .with_padding(16)
        .with_spacing(12)
        .with_child(Box::new(button), 32)
        .with_child(Box::new(input), 28)
        .with_child(Box::new(tree), 0);
    window.set_root_frame(Box::new(root));

    window.add_static_overlay(badge(window.size().0));
    window.request_reflow();
    demo
}
