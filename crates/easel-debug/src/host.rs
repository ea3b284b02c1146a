//! Contracts the overlay consumes from the host application.
//!
//! The editor owns shapes, tools and hit testing; the toast and dialog
//! services own their presentation. The overlay only reads and requests.

use std::fmt;
use std::rc::Rc;

use easel_engine::coords::Vec2;
use easel_engine::reactive::Subscription;

use crate::error::DebugResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape:{}", self.0)
    }
}

/// What the readout needs to know about one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeInfo {
    pub id: ShapeId,
    /// Shape type, e.g. `geo`, `arrow`, `text`.
    pub kind: String,
    /// Geometric variant for `geo` shapes, e.g. `rectangle`.
    pub geo: Option<String>,
}

/// Request to create one shape at a page position.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShape {
    pub kind: String,
    pub geo: Option<String>,
    pub position: Vec2,
}

/// Read/command surface of the canvas editor.
///
/// Methods take `&self`; implementations use interior mutability the way
/// their own reactive store does.
pub trait Editor {
    /// Dot-separated tool state path, e.g. `select.idle`.
    fn path(&self) -> String;
    fn hovered_shape(&self) -> Option<ShapeInfo>;
    /// The selected shape when exactly one is selected.
    fn only_selected_shape(&self) -> Option<ShapeInfo>;
    fn selected_shape_ids(&self) -> Vec<ShapeId>;
    fn current_page_point(&self) -> Vec2;
    /// Page point where the current pointer gesture began.
    fn origin_page_point(&self) -> Vec2;
    fn point_in_shape_space(&self, shape: ShapeId, point: Vec2) -> Vec2;
    fn rendering_shape_count(&self) -> usize;
    fn create_shapes(&self, shapes: Vec<NewShape>) -> DebugResult<Vec<ShapeId>>;
    fn select_shapes(&self, ids: &[ShapeId]);
    /// Calls `listener` after every editor state change until the returned
    /// subscription is dropped.
    fn subscribe(&self, listener: Box<dyn Fn()>) -> Subscription;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Primary,
    Normal,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastAction {
    pub label: String,
    pub kind: ActionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    /// Stays until dismissed instead of timing out.
    pub keep_open: bool,
    pub actions: Vec<ToastAction>,
}

pub trait Toasts {
    fn add_toast(&self, toast: Toast);
}

/// Confirmation dialog request.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub title: String,
    pub body: String,
    pub cancel_label: String,
    pub confirm_label: String,
    /// Label of an opt-out checkbox, if the dialog shows one.
    pub dont_show_again: Option<String>,
}

pub trait Dialogs {
    fn add_dialog(&self, dialog: Dialog);
}

/// Everything the overlay talks to, bundled for sharing between the panel,
/// its menu and the actions it runs.
#[derive(Clone)]
pub struct DebugHost {
    pub editor: Rc<dyn Editor>,
    pub toasts: Rc<dyn Toasts>,
    pub dialogs: Rc<dyn Dialogs>,
    pub on_hard_reset: Option<Rc<dyn Fn()>>,
}

impl DebugHost {
    pub fn new(editor: Rc<dyn Editor>, toasts: Rc<dyn Toasts>, dialogs: Rc<dyn Dialogs>) -> Self {
        Self { editor, toasts, dialogs, on_hard_reset: None }
    }

    pub fn on_hard_reset(mut self, f: impl Fn() + 'static) -> Self {
        self.on_hard_reset = Some(Rc::new(f));
        self
    }
}
