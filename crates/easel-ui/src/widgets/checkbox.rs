use easel_engine::coords::{Rect, Vec2};
use easel_engine::paint::{Color, Paint};
use easel_engine::scene::Border;
use easel_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// A checkbox with an optional text label. The whole row is clickable.
///
/// # Example
/// ```rust,ignore
/// Checkbox::new()
///     .label("Debug svg")
///     .checked(flag.get())
///     .on_change(move |v| flag.set(v))
/// ```
pub struct Checkbox {
    checked: bool,
    label: String,
    font: FontId,
    font_size: f32,
    label_color: Color,
    box_size: f32,
    bg: Color,
    checked_color: Color,
    border_color: Color,
    gap: f32,
    on_change: Option<Box<dyn FnMut(bool)>>,
}

impl Checkbox {
    pub fn new() -> Self {
        Self {
            checked: false,
            label: String::new(),
            font: FontId::DEFAULT,
            font_size: 12.0,
            label_color: Color::from_straight(0.85, 0.85, 0.9, 1.0),
            box_size: 12.0,
            bg: Color::from_straight(0.1, 0.12, 0.18, 1.0),
            checked_color: Color::from_straight(0.2, 0.65, 1.0, 1.0),
            border_color: Color::from_straight(0.35, 0.45, 0.6, 1.0),
            gap: 6.0,
            on_change: None,
        }
    }

    pub fn checked(mut self, v: bool) -> Self { self.checked = v; self }
    pub fn label(mut self, v: impl Into<String>) -> Self { self.label = v.into(); self }
    pub fn font(mut self, v: FontId) -> Self { self.font = v; self }
    pub fn font_size(mut self, v: f32) -> Self { self.font_size = v; self }
    pub fn label_color(mut self, v: Color) -> Self { self.label_color = v; self }
    pub fn on_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

impl Default for Checkbox { fn default() -> Self { Self::new() } }

impl Widget for Checkbox {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        if self.label.is_empty() {
            return constraints.constrain(Vec2::new(self.box_size, self.box_size));
        }
        let text = ctx.fonts.measure_text(&self.label, self.font, self.font_size, None);
        constraints.constrain(Vec2::new(
            self.box_size + self.gap + text.x,
            self.box_size.max(text.y),
        ))
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        let hovered = painter.is_hovered(rect);

        let box_y = rect.origin.y + (rect.size.y - self.box_size) * 0.5;
        let box_rect = Rect::new(rect.origin.x, box_y, self.box_size, self.box_size);

        let bg = match (self.checked, hovered) {
            (true, true) => self.checked_color.lighten(0.1),
            (true, false) => self.checked_color,
            (false, _) => self.bg,
        };
        let border = if hovered && !self.checked {
            self.border_color.lighten(0.25)
        } else {
            self.border_color
        };
        painter.fill_rounded_rect(box_rect, 2.0, Paint::Solid(bg), Some(Border::new(1.0, border)));

        if self.checked {
            let m = self.box_size * 0.25;
            painter.fill_rect(
                Rect::new(box_rect.origin.x + m, box_rect.origin.y + m,
                          self.box_size - m * 2.0, self.box_size - m * 2.0),
                Color::from_straight(1.0, 1.0, 1.0, 0.9),
            );
        }

        if !self.label.is_empty() {
            let text_x = rect.origin.x + self.box_size + self.gap;
            let text_y = rect.origin.y + (rect.size.y - self.font_size * 1.2).max(0.0) * 0.5;
            painter.text(
                &self.label, self.font, self.font_size, self.label_color,
                Vec2::new(text_x, text_y),
                None,
            );
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        if let UiEvent::Click { pos } = event {
            if rect.contains(*pos) {
                self.checked = !self.checked;
                if let Some(f) = &mut self.on_change { f(self.checked); }
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}
