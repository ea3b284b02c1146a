//! Dropdown menu with the test actions and flag checkboxes.

use std::cell::RefCell;
use std::rc::Rc;

use easel_ui::prelude::*;

use crate::actions::{ActionRunner, DebugAction};
use crate::error::{DebugError, DebugResult};
use crate::flags::{DebugFlag, FlagRegistry};

/// Colors and metrics shared by the overlay widgets.
#[derive(Debug, Clone, Copy)]
pub struct MenuStyle {
    pub font: FontId,
    pub font_size: f32,
    pub text: Color,
    pub item_hover: Color,
    pub separator: Color,
}

impl MenuStyle {
    pub fn new(font: FontId, font_size: f32) -> Self {
        Self {
            font,
            font_size,
            text: Color::from_straight(0.9, 0.9, 0.92, 1.0),
            item_hover: Color::from_straight(1.0, 1.0, 1.0, 0.08),
            separator: Color::from_straight(1.0, 1.0, 1.0, 0.15),
        }
    }
}

/// The overlay's menu. Holds the state that must survive the per-frame
/// rebuild of its dropdown.
pub struct DebugMenu {
    state: DropdownState,
    runner: ActionRunner,
    flags: Rc<FlagRegistry>,
    last_error: Rc<RefCell<Option<DebugError>>>,
}

impl DebugMenu {
    pub fn new(runner: ActionRunner, flags: Rc<FlagRegistry>) -> Self {
        Self {
            state: DropdownState::new(),
            runner,
            flags,
            last_error: Rc::new(RefCell::new(None)),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn state(&self) -> &DropdownState {
        &self.state
    }

    /// Error of the most recent failed action, if any.
    pub fn last_error(&self) -> Option<DebugError> {
        self.last_error.borrow().clone()
    }

    /// Runs `action` as if it had been picked from the menu.
    pub fn run_action(&self, action: DebugAction) -> DebugResult<()> {
        run_recorded(&self.runner, &self.last_error, action)
    }

    /// Builds this frame's dropdown.
    pub fn build(&self, style: &MenuStyle) -> Dropdown {
        let trigger = Button::new(Text::new("Debug", style.font, style.font_size, style.text))
            .padding(Edges::symmetric(1.0, 6.0))
            .hover_background(style.item_hover)
            .corner_radius(3.0);

        let mut dropdown = Dropdown::new(trigger, self.state.clone());

        for action in DebugAction::ALL {
            let runner = self.runner.clone();
            let last_error = self.last_error.clone();
            let label = action.label(self.runner.create_shape_count());
            dropdown = dropdown.item(
                Button::new(Text::new(label, style.font, style.font_size, style.text))
                    .padding(Edges::symmetric(3.0, 8.0))
                    .hover_background(style.item_hover)
                    .corner_radius(3.0)
                    .on_click(move || {
                        let _ = run_recorded(&runner, &last_error, action);
                    }),
            );
        }

        dropdown = dropdown.sticky_item(Container::new().min_size(0.0, 1.0).background(style.separator));

        for flag in self.flags.debug_flags() {
            dropdown = dropdown.sticky_item(flag_checkbox(flag, style));
        }

        let mut features = self.flags.feature_flags().peekable();
        if features.peek().is_some() {
            dropdown = dropdown.sticky_item(Container::new().min_size(0.0, 1.0).background(style.separator));
            for flag in features {
                dropdown = dropdown.sticky_item(flag_checkbox(flag, style));
            }
        }

        dropdown
    }
}

fn run_recorded(
    runner: &ActionRunner,
    last_error: &RefCell<Option<DebugError>>,
    action: DebugAction,
) -> DebugResult<()> {
    let result = runner.run(action);
    if let Err(err) = &result {
        log::error!("debug action {action} failed: {err}");
        *last_error.borrow_mut() = Some(err.clone());
    }
    result
}

fn flag_checkbox(flag: &DebugFlag, style: &MenuStyle) -> Checkbox {
    let target = flag.clone();
    Checkbox::new()
        .checked(flag.get())
        .label(flag.label())
        .font(style.font)
        .font_size(style.font_size)
        .label_color(style.text)
        .on_change(move |v| {
            target.set(v);
        })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use easel_engine::coords::Vec2;
    use easel_engine::reactive::Subscription;

    use super::*;
    use crate::actions::ErrorLatch;
    use crate::config::Environment;
    use crate::flags::FlagDefaults;
    use crate::host::{DebugHost, Editor, NewShape, ShapeId, ShapeInfo};
    use crate::memory::{MemoryDialogs, MemoryToasts};

    /// Editor whose shape creation always fails.
    struct BrokenEditor;

    impl Editor for BrokenEditor {
        fn path(&self) -> String { "select.idle".into() }
        fn hovered_shape(&self) -> Option<ShapeInfo> { None }
        fn only_selected_shape(&self) -> Option<ShapeInfo> { None }
        fn selected_shape_ids(&self) -> Vec<ShapeId> { Vec::new() }
        fn current_page_point(&self) -> Vec2 { Vec2::zero() }
        fn origin_page_point(&self) -> Vec2 { Vec2::zero() }
        fn point_in_shape_space(&self, _: ShapeId, p: Vec2) -> Vec2 { p }
        fn rendering_shape_count(&self) -> usize { 0 }
        fn create_shapes(&self, _: Vec<NewShape>) -> DebugResult<Vec<ShapeId>> {
            Err(DebugError::Editor("page is locked".into()))
        }
        fn select_shapes(&self, _: &[ShapeId]) {}
        fn subscribe(&self, _: Box<dyn Fn()>) -> Subscription { Subscription::empty() }
    }

    fn menu_with(flags: FlagRegistry) -> DebugMenu {
        let host = DebugHost::new(Rc::new(BrokenEditor), Rc::new(MemoryToasts::new()), Rc::new(MemoryDialogs::new()));
        let flags = Rc::new(flags);
        let runner = ActionRunner::new(host, flags.clone(), ErrorLatch::default(), 100, Rc::new(Cell::new(0)));
        DebugMenu::new(runner, flags)
    }

    #[test]
    fn lists_actions_separator_and_flags() {
        let menu = menu_with(FlagRegistry::with_debug_flags(Environment::Development));
        let dropdown = menu.build(&MenuStyle::new(FontId::DEFAULT, 12.0));
        assert_eq!(dropdown.len(), DebugAction::ALL.len() + 1 + 13);
    }

    #[test]
    fn feature_flags_get_their_own_section() {
        let mut flags = FlagRegistry::with_debug_flags(Environment::Development);
        flags.register_feature("newArrows", FlagDefaults::all(false));
        let menu = menu_with(flags);
        let dropdown = menu.build(&MenuStyle::new(FontId::DEFAULT, 12.0));
        assert_eq!(dropdown.len(), DebugAction::ALL.len() + 1 + 13 + 1 + 1);
    }

    #[test]
    fn failed_action_is_recorded() {
        let menu = menu_with(FlagRegistry::with_debug_flags(Environment::Development));
        assert!(menu.run_action(DebugAction::CreateShapes).is_err());
        assert_eq!(menu.last_error(), Some(DebugError::Editor("page is locked".into())));
    }
}
