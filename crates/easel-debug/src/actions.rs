//! Test actions offered by the debug menu.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use easel_engine::coords::Vec2;

use crate::error::{DebugError, DebugResult};
use crate::flags::FlagRegistry;
use crate::host::{ActionKind, DebugHost, Dialog, NewShape, Severity, Toast, ToastAction};

/// Grid pitch of shapes created by [`DebugAction::CreateShapes`].
pub const SHAPE_GRID_PITCH: f32 = 132.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugAction {
    HardReset,
    ShowToast,
    ShowDialog,
    CreateShapes,
    CountNodes,
    ThrowError,
}

impl DebugAction {
    /// Menu order.
    pub const ALL: [DebugAction; 6] = [
        DebugAction::HardReset,
        DebugAction::ShowToast,
        DebugAction::ShowDialog,
        DebugAction::CreateShapes,
        DebugAction::CountNodes,
        DebugAction::ThrowError,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DebugAction::HardReset => "hard-reset",
            DebugAction::ShowToast => "show-toast",
            DebugAction::ShowDialog => "show-dialog",
            DebugAction::CreateShapes => "create-shapes",
            DebugAction::CountNodes => "count-nodes",
            DebugAction::ThrowError => "throw-error",
        }
    }

    /// Menu label; the shape count appears in the create action's label.
    pub fn label(self, create_shape_count: usize) -> String {
        match self {
            DebugAction::HardReset => "Hard reset".into(),
            DebugAction::ShowToast => "Show toast".into(),
            DebugAction::ShowDialog => "Show dialog".into(),
            DebugAction::CreateShapes => format!("Create {create_shape_count} shapes"),
            DebugAction::CountNodes => "Count shapes / nodes".into(),
            DebugAction::ThrowError => "Throw error".into(),
        }
    }
}

impl fmt::Display for DebugAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DebugAction {
    type Err = DebugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DebugAction::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| DebugError::UnknownAction(s.to_string()))
    }
}

/// One-shot failure switch: armed by "Throw error", consumed by the next
/// overlay frame.
#[derive(Debug, Clone, Default)]
pub struct ErrorLatch(Rc<Cell<bool>>);

impl ErrorLatch {
    pub fn arm(&self) {
        self.0.set(true);
    }

    pub fn is_armed(&self) -> bool {
        self.0.get()
    }

    /// Disarms and reports whether the latch was armed.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// Positions of `count` shapes laid out in a `floor(sqrt(count))`-column grid.
pub fn shape_grid(count: usize) -> Vec<Vec2> {
    let cols = ((count as f64).sqrt().floor() as usize).max(1);
    (0..count)
        .map(|i| Vec2::new((i % cols) as f32 * SHAPE_GRID_PITCH, (i / cols) as f32 * SHAPE_GRID_PITCH))
        .collect()
}

/// Runs test actions against the host. Cheap to clone into menu callbacks.
#[derive(Clone)]
pub struct ActionRunner {
    host: DebugHost,
    flags: Rc<FlagRegistry>,
    latch: ErrorLatch,
    create_shape_count: usize,
    /// Draw items recorded by the most recent overlay frame.
    frame_items: Rc<Cell<usize>>,
}

impl ActionRunner {
    pub fn new(
        host: DebugHost,
        flags: Rc<FlagRegistry>,
        latch: ErrorLatch,
        create_shape_count: usize,
        frame_items: Rc<Cell<usize>>,
    ) -> Self {
        Self { host, flags, latch, create_shape_count, frame_items }
    }

    pub fn create_shape_count(&self) -> usize {
        self.create_shape_count
    }

    pub fn run(&self, action: DebugAction) -> DebugResult<()> {
        log::info!("debug action: {action}");
        match action {
            DebugAction::HardReset => {
                self.flags.reset_all();
                if let Some(hook) = &self.host.on_hard_reset {
                    hook();
                }
            }
            DebugAction::ShowToast => self.host.toasts.add_toast(Toast {
                id: "debug".into(),
                title: "Something happened".into(),
                description: "Hey, attend to this thing over here. It might be important!".into(),
                severity: Severity::Info,
                keep_open: true,
                actions: [("Primary", ActionKind::Primary), ("Normal", ActionKind::Normal), ("Danger", ActionKind::Danger)]
                    .into_iter()
                    .map(|(label, kind)| ToastAction { label: label.into(), kind })
                    .collect(),
            }),
            DebugAction::ShowDialog => self.host.dialogs.add_dialog(Dialog {
                title: "Are you sure?".into(),
                body: "Do you really want to do that?".into(),
                cancel_label: "Cancel".into(),
                confirm_label: "Continue".into(),
                dont_show_again: Some("Don't show again".into()),
            }),
            DebugAction::CreateShapes => {
                let shapes = shape_grid(self.create_shape_count)
                    .into_iter()
                    .map(|position| NewShape { kind: "geo".into(), geo: Some("rectangle".into()), position })
                    .collect();
                let ids = self.host.editor.create_shapes(shapes)?;
                self.host.editor.select_shapes(&ids);
            }
            DebugAction::CountNodes => {
                let selected = self.host.editor.selected_shape_ids().len();
                let shapes = if selected > 0 { selected } else { self.host.editor.rendering_shape_count() };
                let nodes = self.frame_items.get();
                self.host.toasts.add_toast(Toast {
                    id: "count-nodes".into(),
                    title: "Count shapes / nodes".into(),
                    description: format!("Shapes: {shapes}, overlay nodes: {nodes}"),
                    severity: Severity::Info,
                    keep_open: false,
                    actions: Vec::new(),
                });
            }
            DebugAction::ThrowError => {
                self.latch.arm();
                log::warn!("error latch armed; the next overlay frame fails");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use easel_engine::coords::Vec2;

    use super::*;
    use crate::config::Environment;
    use crate::flags::SHOW_FPS;
    use crate::host::{Editor, ShapeId};
    use crate::memory::{MemoryDialogs, MemoryEditor, MemoryToasts};

    struct Fixture {
        editor: Rc<MemoryEditor>,
        toasts: Rc<MemoryToasts>,
        dialogs: Rc<MemoryDialogs>,
        resets: Rc<Cell<u32>>,
        flags: Rc<FlagRegistry>,
        latch: ErrorLatch,
        runner: ActionRunner,
    }

    fn fixture(count: usize) -> Fixture {
        let editor = Rc::new(MemoryEditor::new());
        let toasts = Rc::new(MemoryToasts::new());
        let dialogs = Rc::new(MemoryDialogs::new());
        let resets = Rc::new(Cell::new(0));
        let r = resets.clone();
        let host = DebugHost::new(editor.clone(), toasts.clone(), dialogs.clone())
            .on_hard_reset(move || r.set(r.get() + 1));
        let flags = Rc::new(FlagRegistry::with_debug_flags(Environment::Development));
        let latch = ErrorLatch::default();
        let runner = ActionRunner::new(host, flags.clone(), latch.clone(), count, Rc::new(Cell::new(42)));
        Fixture { editor, toasts, dialogs, resets, flags, latch, runner }
    }

    #[test]
    fn ids_round_trip_and_reject_unknown() {
        for action in DebugAction::ALL {
            assert_eq!(action.id().parse::<DebugAction>(), Ok(action));
        }
        assert_eq!("explode".parse::<DebugAction>(), Err(DebugError::UnknownAction("explode".into())));
        assert_eq!(DebugAction::CreateShapes.label(100), "Create 100 shapes");
    }

    #[test]
    fn grid_layout() {
        let grid = shape_grid(100);
        assert_eq!(grid.len(), 100);
        assert_eq!(grid[9], Vec2::new(9.0 * 132.0, 0.0));
        assert_eq!(grid[10], Vec2::new(0.0, 132.0));
        assert_eq!(grid[99], Vec2::new(9.0 * 132.0, 9.0 * 132.0));

        // 5 shapes: two columns.
        assert_eq!(shape_grid(5)[2], Vec2::new(0.0, 132.0));
        assert!(shape_grid(0).is_empty());
    }

    #[test]
    fn create_shapes_selects_them() {
        let f = fixture(100);
        f.runner.run(DebugAction::CreateShapes).unwrap();
        assert_eq!(f.editor.rendering_shape_count(), 100);
        assert_eq!(f.editor.selected_shape_ids().len(), 100);
        assert_eq!(f.editor.shape_origin(ShapeId(11)), Some(Vec2::new(0.0, 132.0)));
    }

    #[test]
    fn toast_and_dialog() {
        let f = fixture(100);
        f.runner.run(DebugAction::ShowToast).unwrap();
        f.runner.run(DebugAction::ShowDialog).unwrap();

        let toast = &f.toasts.toasts()[0];
        assert_eq!(toast.id, "debug");
        assert_eq!(toast.title, "Something happened");
        assert!(toast.keep_open);
        assert_eq!(toast.actions.iter().map(|a| a.kind).collect::<Vec<_>>(),
                   vec![ActionKind::Primary, ActionKind::Normal, ActionKind::Danger]);

        let dialog = &f.dialogs.dialogs()[0];
        assert_eq!(dialog.title, "Are you sure?");
        assert_eq!(dialog.dont_show_again.as_deref(), Some("Don't show again"));
    }

    #[test]
    fn count_nodes_prefers_selection() {
        let f = fixture(4);
        f.runner.run(DebugAction::CreateShapes).unwrap();
        f.editor.select_shapes(&[ShapeId(1)]);
        f.runner.run(DebugAction::CountNodes).unwrap();
        f.editor.select_shapes(&[]);
        f.runner.run(DebugAction::CountNodes).unwrap();

        let descriptions: Vec<String> = f.toasts.toasts().into_iter().map(|t| t.description).collect();
        assert_eq!(descriptions, vec![
            "Shapes: 1, overlay nodes: 42".to_string(),
            "Shapes: 4, overlay nodes: 42".to_string(),
        ]);
    }

    #[test]
    fn hard_reset_restores_flags_and_calls_hook() {
        let f = fixture(100);
        f.flags.set(SHOW_FPS, false).unwrap();
        f.flags.set("debugSvg", true).unwrap();
        f.runner.run(DebugAction::HardReset).unwrap();
        assert_eq!(f.flags.get(SHOW_FPS), Ok(true));
        assert_eq!(f.flags.get("debugSvg"), Ok(false));
        assert_eq!(f.resets.get(), 1);
    }

    #[test]
    fn throw_error_arms_latch_once() {
        let f = fixture(100);
        f.runner.run(DebugAction::ThrowError).unwrap();
        assert!(f.latch.is_armed());
        assert!(f.latch.take());
        assert!(!f.latch.take());
    }
}
