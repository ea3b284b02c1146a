use easel_engine::coords::{Rect, Vec2};
use easel_engine::paint::Color;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Clickable wrapper around any child.
///
/// Stateless: the hover highlight is derived from the painter's pointer, so
/// the button can be rebuilt every frame.
///
/// # Example
/// ```rust,ignore
/// Button::new(Text::new("Show toast", font, 12.0, white))
///     .hover_background(Color::from_straight(1.0, 1.0, 1.0, 0.08))
///     .padding(Edges::symmetric(3.0, 8.0))
///     .on_click(move || { runner.run(DebugAction::ShowToast).ok(); })
/// ```
pub struct Button {
    child: Element,
    on_click: Option<Box<dyn FnMut()>>,
    hover_background: Color,
    corner_radius: f32,
    padding: Edges,
}

impl Button {
    pub fn new(child: impl Into<Element>) -> Self {
        Self {
            child: child.into(),
            on_click: None,
            hover_background: Color::transparent(),
            corner_radius: 0.0,
            padding: Edges::default(),
        }
    }

    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Fill drawn while the pointer is over the button.
    pub fn hover_background(mut self, color: Color) -> Self {
        self.hover_background = color;
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }
}

impl Widget for Button {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        let inner = self.child.measure(constraints.shrink(self.padding), ctx);
        constraints.constrain(inner + Vec2::new(self.padding.h(), self.padding.v()))
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        if painter.is_hovered(rect) && self.hover_background.a > 0.0 {
            painter.fill_rounded_rect(rect, self.corner_radius, self.hover_background, None);
        }
        self.child.paint(painter, inset_rect(rect, self.padding));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        match event {
            UiEvent::Click { pos } if rect.contains(*pos) => {
                if let Some(f) = &mut self.on_click {
                    f();
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use easel_engine::scene::DrawList;
    use easel_engine::text::FontSystem;

    use super::*;
    use crate::widgets::container::Container;

    #[test]
    fn click_inside_fires_once() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let mut button = Button::new(Container::new().min_size(10.0, 10.0)).on_click(move || h.set(h.get() + 1));
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        assert!(button.on_event(&UiEvent::Click { pos: Vec2::new(5.0, 5.0) }, rect, &ctx).is_consumed());
        assert!(!button.on_event(&UiEvent::Click { pos: Vec2::new(15.0, 5.0) }, rect, &ctx).is_consumed());
        assert!(!button.on_event(&UiEvent::Hover { pos: Vec2::new(5.0, 5.0) }, rect, &ctx).is_consumed());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn hover_highlight_only_under_pointer() {
        let fonts = FontSystem::new();
        let button = Button::new(Container::new()).hover_background(Color::white());
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        let mut list = DrawList::new();
        button.paint(&mut Painter::new(&mut list, &fonts, Vec2::new(20.0, 20.0)), rect);
        assert!(list.is_empty());
        button.paint(&mut Painter::new(&mut list, &fonts, Vec2::new(2.0, 2.0)), rect);
        assert_eq!(list.len(), 1);
    }
}
