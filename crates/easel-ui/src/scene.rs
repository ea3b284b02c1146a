use easel_engine::coords::{Rect, Vec2};
use easel_engine::scene::DrawList;
use easel_engine::text::{FontId, FontLoadError, FontSystem};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Element;

/// Pointer state for one UI frame.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    /// Cursor position in logical pixels.
    pub mouse_pos: Vec2,
    /// Primary button released this frame.
    pub mouse_clicked: bool,
}

impl UiInput {
    /// A frame in which the primary button was clicked at `pos`.
    pub fn click(pos: Vec2) -> Self {
        Self { mouse_pos: pos, mouse_clicked: true }
    }
}

/// Fonts and the draw list, kept across frames.
///
/// [`frame`](Self::frame) lays out and paints a tree, then routes this
/// frame's pointer events through it. Events therefore change state that
/// the next frame paints.
pub struct UiScene {
    pub font_system: FontSystem,
    /// Output of the most recent frame.
    pub draw_list: DrawList,
}

impl UiScene {
    pub fn new() -> Self {
        Self { font_system: FontSystem::new(), draw_list: DrawList::new() }
    }

    /// Loads a TrueType / OpenType font from raw bytes.
    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    pub fn frame(&mut self, root: impl Into<Element>, viewport: Vec2, input: &UiInput) -> &mut DrawList {
        let mut root = root.into();
        self.draw_list.clear();

        let ctx = LayoutCtx { fonts: &self.font_system };
        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);
        // The root fills the viewport; measuring lets it settle child sizes.
        let _ = root.measure(Constraints::loose(viewport), &ctx);

        root.paint(
            &mut Painter::new(&mut self.draw_list, &self.font_system, input.mouse_pos),
            rect,
        );

        root.on_event(&UiEvent::Hover { pos: input.mouse_pos }, rect, &ctx);
        if input.mouse_clicked {
            root.on_event(&UiEvent::Click { pos: input.mouse_pos }, rect, &ctx);
        }

        &mut self.draw_list
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}
