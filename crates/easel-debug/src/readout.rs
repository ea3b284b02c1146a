//! Status line and shape counter.

use std::rc::Rc;

use easel_engine::reactive::{Atom, Subscription};

use crate::host::Editor;

/// `"{path}{shape_info}{ruler}"` for the editor's current state.
///
/// While idle (or outside the select tool) the hovered shape is described,
/// otherwise the single selected one. During a select gesture the ruler
/// shows origin, current point and their distance in page space.
pub fn current_state_text(editor: &dyn Editor) -> String {
    let path = editor.path();
    let in_select = path.contains("select.");

    let shape = if path == "select.idle" || !in_select {
        editor.hovered_shape()
    } else {
        editor.only_selected_shape()
    };

    let mut text = path.clone();

    if let Some(shape) = shape.filter(|_| in_select) {
        text.push_str(" / ");
        text.push_str(&shape.kind);
        if let Some(geo) = &shape.geo {
            text.push_str(" / ");
            text.push_str(geo);
        }
        let local = editor.point_in_shape_space(shape.id, editor.current_page_point());
        text.push_str(&format!(" / {local}"));
    }

    if path.starts_with("select.") && !path.contains(".idle") {
        let origin = editor.origin_page_point();
        let current = editor.current_page_point();
        let dist = origin.distance(current).round();
        text.push_str(&format!(" / {origin} → {current} = {dist:.0}"));
    }

    text
}

pub fn shape_count_text(count: usize) -> String {
    format!("{count} Shapes")
}

/// Both readouts, kept current by an editor subscription that lives as long
/// as this value.
pub struct Readouts {
    current_state: Atom<String>,
    shape_count: Atom<String>,
    _subscription: Subscription,
}

impl Readouts {
    pub fn mount(editor: &Rc<dyn Editor>) -> Self {
        let current_state = Atom::new(current_state_text(editor.as_ref()));
        let shape_count = Atom::new(shape_count_text(editor.rendering_shape_count()));

        let weak = Rc::downgrade(editor);
        let (state, count) = (current_state.clone(), shape_count.clone());
        let subscription = editor.subscribe(Box::new(move || {
            let Some(editor) = weak.upgrade() else { return };
            state.set(current_state_text(editor.as_ref()));
            count.set(shape_count_text(editor.rendering_shape_count()));
        }));

        Self { current_state, shape_count, _subscription: subscription }
    }

    pub fn current_state(&self) -> String {
        self.current_state.get()
    }

    pub fn shape_count(&self) -> String {
        self.shape_count.get()
    }
}

#[cfg(test)]
mod tests {
    use easel_engine::coords::Vec2;

    use super::*;
    use crate::host::{ShapeId, ShapeInfo};
    use crate::memory::MemoryEditor;

    fn rect_shape(id: u64) -> ShapeInfo {
        ShapeInfo { id: ShapeId(id), kind: "geo".into(), geo: Some("rectangle".into()) }
    }

    #[test]
    fn idle_describes_hovered_shape() {
        let editor = MemoryEditor::new();
        editor.set_path("select.idle");
        editor.set_hovered(Some(rect_shape(1)));
        editor.set_shape_origin(ShapeId(1), Vec2::new(100.0, 100.0));
        editor.set_pointer(Vec2::new(110.4, 120.6), Vec2::zero());
        assert_eq!(current_state_text(&editor), "select.idle / geo / rectangle / [10, 21]");
    }

    #[test]
    fn hovered_shape_hidden_outside_select() {
        let editor = MemoryEditor::new();
        editor.set_path("draw.drawing");
        editor.set_hovered(Some(rect_shape(1)));
        assert_eq!(current_state_text(&editor), "draw.drawing");
    }

    #[test]
    fn gesture_uses_selection_and_ruler() {
        let editor = MemoryEditor::new();
        editor.set_path("select.translating");
        editor.set_hovered(Some(rect_shape(1)));
        editor.add_shape(ShapeInfo { id: ShapeId(2), kind: "arrow".into(), geo: None }, Vec2::zero());
        editor.select_shapes(&[ShapeId(2)]);
        editor.set_pointer(Vec2::new(30.0, 40.0), Vec2::zero());
        assert_eq!(
            current_state_text(&editor),
            "select.translating / arrow / [30, 40] / [0, 0] → [30, 40] = 50"
        );
    }

    #[test]
    fn ruler_without_shape() {
        let editor = MemoryEditor::new();
        editor.set_path("select.brushing");
        editor.set_pointer(Vec2::new(3.0, 4.0), Vec2::new(-0.2, 0.0));
        assert_eq!(current_state_text(&editor), "select.brushing / [0, 0] → [3, 4] = 5");
    }

    #[test]
    fn shape_count_format() {
        assert_eq!(shape_count_text(0), "0 Shapes");
        assert_eq!(shape_count_text(100), "100 Shapes");
    }

    #[test]
    fn readouts_follow_editor_until_dropped() {
        let editor = Rc::new(MemoryEditor::new());
        let dyn_editor: Rc<dyn Editor> = editor.clone();
        let readouts = Readouts::mount(&dyn_editor);
        assert_eq!(readouts.shape_count(), "0 Shapes");
        assert_eq!(editor.listener_count(), 1);

        editor.add_shape(rect_shape(7), Vec2::zero());
        editor.set_path("select.idle");
        assert_eq!(readouts.shape_count(), "1 Shapes");
        assert_eq!(readouts.current_state(), "select.idle");

        drop(readouts);
        assert_eq!(editor.listener_count(), 0);
    }
}
