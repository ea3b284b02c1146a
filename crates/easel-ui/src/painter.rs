use easel_engine::coords::{CornerRadii, Rect, Vec2};
use easel_engine::paint::{Color, Paint};
use easel_engine::scene::{Border, DrawList, RectCmd, RoundedRectCmd, TextCmd, ZIndex};
use easel_engine::text::{FontId, FontSystem};

use crate::constraints::LayoutCtx;

/// Z offset applied while painting popups so they sit above the base layer.
const OVERLAY_Z: i32 = 1 << 16;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Records into the engine's `DrawList`, assigning increasing z values in
/// paint order, and carries the pointer position so widgets can draw hover
/// feedback without retained state.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    font_system: &'a FontSystem,
    z: i32,
    /// Pointer position in logical pixels.
    pub mouse_pos: Vec2,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, font_system: &'a FontSystem, mouse_pos: Vec2) -> Self {
        Self { draw_list, font_system, z: 0, mouse_pos }
    }

    // ── input queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        rect.contains(self.mouse_pos)
    }

    // ── layout ────────────────────────────────────────────────────────────

    /// Returns a [`LayoutCtx`] borrowing this painter's font system, for
    /// containers that re-measure children while painting.
    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx { fonts: self.font_system }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Solid axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push(z, RectCmd { rect, paint: Paint::Solid(color) });
    }

    /// Rounded rectangle with optional border. `radius = 0.0` for sharp corners.
    pub fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        paint: impl Into<Paint>,
        border: Option<Border>,
    ) {
        let z = self.next_z();
        self.draw_list.push(z, RoundedRectCmd {
            rect,
            radii: CornerRadii::all(radius),
            paint: paint.into(),
            border,
        });
    }

    /// Text at `origin` (top-left of the first line), wrapped at `max_width`.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        let z = self.next_z();
        self.draw_list.push(z, TextCmd { text: text.into(), font, size, color, origin, max_width });
    }

    /// Paints `f` on the overlay layer, above everything painted normally
    /// this frame regardless of order.
    pub fn overlay<R>(&mut self, f: impl FnOnce(&mut Painter<'a>) -> R) -> R {
        let base = self.z;
        self.z = self.z.max(0) + OVERLAY_Z;
        let out = f(self);
        self.z = base.max(self.z - OVERLAY_Z);
        out
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
