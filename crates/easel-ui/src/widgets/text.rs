use easel_engine::coords::{Rect, Vec2};
use easel_engine::paint::Color;
use easel_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// A single-style text run. Wraps at the width the parent allows.
///
/// # Example
/// ```rust,ignore
/// Text::new("FPS 60", FontId::DEFAULT, 12.0, Color::white())
/// ```
pub struct Text {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
}

impl Text {
    pub fn new(text: impl Into<String>, font: FontId, size: f32, color: Color) -> Self {
        Self { text: text.into(), font, size, color }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for Text {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        let max_w = constraints.max.x.is_finite().then_some(constraints.max.x);
        let size = ctx.fonts.measure_text(&self.text, self.font, self.size, max_w);
        constraints.constrain(size)
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        let max_w = (rect.size.x > 0.0).then_some(rect.size.x);
        painter.text(&self.text, self.font, self.size, self.color, rect.origin, max_w);
    }
}
