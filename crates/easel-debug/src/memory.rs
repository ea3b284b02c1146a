//! In-memory host collaborators for demos and tests.

use std::cell::RefCell;

use easel_engine::coords::Vec2;
use easel_engine::reactive::{Atom, Subscription};

use crate::error::DebugResult;
use crate::host::{Dialog, Dialogs, Editor, NewShape, ShapeId, ShapeInfo, Toast, Toasts};

struct StoredShape {
    info: ShapeInfo,
    origin: Vec2,
}

struct EditorState {
    path: String,
    shapes: Vec<StoredShape>,
    hovered: Option<ShapeInfo>,
    selected: Vec<ShapeId>,
    current_point: Vec2,
    origin_point: Vec2,
    next_id: u64,
}

/// Minimal editor: a flat shape list, a selection and a pointer.
///
/// Every mutation bumps a revision atom, which is what subscribers observe.
pub struct MemoryEditor {
    state: RefCell<EditorState>,
    revision: Atom<u64>,
}

impl MemoryEditor {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(EditorState {
                path: "select.idle".to_string(),
                shapes: Vec::new(),
                hovered: None,
                selected: Vec::new(),
                current_point: Vec2::zero(),
                origin_point: Vec2::zero(),
                next_id: 1,
            }),
            revision: Atom::new(0),
        }
    }

    pub fn set_path(&self, path: impl Into<String>) {
        self.mutate(|s| s.path = path.into());
    }

    pub fn set_hovered(&self, shape: Option<ShapeInfo>) {
        self.mutate(|s| s.hovered = shape);
    }

    /// Moves the pointer; `origin` is where the current gesture began.
    pub fn set_pointer(&self, current: Vec2, origin: Vec2) {
        self.mutate(|s| {
            s.current_point = current;
            s.origin_point = origin;
        });
    }

    /// Inserts a shape with a caller-chosen id.
    pub fn add_shape(&self, info: ShapeInfo, origin: Vec2) {
        self.mutate(|s| {
            s.next_id = s.next_id.max(info.id.0 + 1);
            s.shapes.push(StoredShape { info, origin });
        });
    }

    pub fn set_shape_origin(&self, id: ShapeId, origin: Vec2) {
        self.mutate(|s| {
            if let Some(shape) = s.shapes.iter_mut().find(|sh| sh.info.id == id) {
                shape.origin = origin;
            } else {
                s.shapes.push(StoredShape {
                    info: ShapeInfo { id, kind: "geo".into(), geo: None },
                    origin,
                });
            }
        });
    }

    pub fn clear(&self) {
        self.mutate(|s| {
            s.shapes.clear();
            s.selected.clear();
            s.hovered = None;
        });
    }

    pub fn shape_origin(&self, id: ShapeId) -> Option<Vec2> {
        self.state.borrow().shapes.iter().find(|s| s.info.id == id).map(|s| s.origin)
    }

    pub fn listener_count(&self) -> usize {
        self.revision.listener_count()
    }

    fn mutate(&self, f: impl FnOnce(&mut EditorState)) {
        f(&mut self.state.borrow_mut());
        // Borrow released before listeners read the editor back.
        self.revision.update(|r| r.wrapping_add(1));
    }
}

impl Default for MemoryEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor for MemoryEditor {
    fn path(&self) -> String {
        self.state.borrow().path.clone()
    }

    fn hovered_shape(&self) -> Option<ShapeInfo> {
        self.state.borrow().hovered.clone()
    }

    fn only_selected_shape(&self) -> Option<ShapeInfo> {
        let state = self.state.borrow();
        match state.selected.as_slice() {
            [id] => state.shapes.iter().find(|s| s.info.id == *id).map(|s| s.info.clone()),
            _ => None,
        }
    }

    fn selected_shape_ids(&self) -> Vec<ShapeId> {
        self.state.borrow().selected.clone()
    }

    fn current_page_point(&self) -> Vec2 {
        self.state.borrow().current_point
    }

    fn origin_page_point(&self) -> Vec2 {
        self.state.borrow().origin_point
    }

    fn point_in_shape_space(&self, shape: ShapeId, point: Vec2) -> Vec2 {
        match self.shape_origin(shape) {
            Some(origin) => point - origin,
            None => point,
        }
    }

    fn rendering_shape_count(&self) -> usize {
        self.state.borrow().shapes.len()
    }

    fn create_shapes(&self, shapes: Vec<NewShape>) -> DebugResult<Vec<ShapeId>> {
        let mut ids = Vec::with_capacity(shapes.len());
        self.mutate(|s| {
            for shape in shapes {
                let id = ShapeId(s.next_id);
                s.next_id += 1;
                s.shapes.push(StoredShape {
                    info: ShapeInfo { id, kind: shape.kind, geo: shape.geo },
                    origin: shape.position,
                });
                ids.push(id);
            }
        });
        Ok(ids)
    }

    fn select_shapes(&self, ids: &[ShapeId]) {
        self.mutate(|s| s.selected = ids.to_vec());
    }

    fn subscribe(&self, listener: Box<dyn Fn()>) -> Subscription {
        self.revision.subscribe(move |_| listener())
    }
}

/// Toast service that keeps every toast it is asked to show.
#[derive(Default)]
pub struct MemoryToasts {
    toasts: RefCell<Vec<Toast>>,
}

impl MemoryToasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }
}

impl Toasts for MemoryToasts {
    fn add_toast(&self, toast: Toast) {
        log::info!("toast [{}] {}: {}", toast.id, toast.title, toast.description);
        self.toasts.borrow_mut().push(toast);
    }
}

/// Dialog service that keeps every dialog it is asked to show.
#[derive(Default)]
pub struct MemoryDialogs {
    dialogs: RefCell<Vec<Dialog>>,
}

impl MemoryDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialogs(&self) -> Vec<Dialog> {
        self.dialogs.borrow().clone()
    }
}

impl Dialogs for MemoryDialogs {
    fn add_dialog(&self, dialog: Dialog) {
        log::info!("dialog: {}", dialog.title);
        self.dialogs.borrow_mut().push(dialog);
    }
}
