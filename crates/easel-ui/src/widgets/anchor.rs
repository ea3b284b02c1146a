use easel_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Parent corner a child is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Pins a child at its natural size against one corner of the parent rect,
/// optionally stretched across the parent's full width.
///
/// Reports the full available size, so it is meant to sit at the root of an
/// overlay that covers the viewport.
///
/// # Example
/// ```rust,ignore
/// Anchor::new(Corner::BottomLeft, panel).fill_width(true).margin(0.0)
/// ```
pub struct Anchor {
    child: Element,
    corner: Corner,
    margin: f32,
    fill_width: bool,
}

impl Anchor {
    pub fn new(corner: Corner, child: impl Into<Element>) -> Self {
        Self { child: child.into(), corner, margin: 0.0, fill_width: false }
    }

    pub fn margin(mut self, v: f32) -> Self {
        self.margin = v;
        self
    }

    pub fn fill_width(mut self, v: bool) -> Self {
        self.fill_width = v;
        self
    }

    fn child_rect(&self, rect: Rect, ctx: &LayoutCtx<'_>) -> Rect {
        let avail = Vec2::new(
            (rect.size.x - self.margin * 2.0).max(0.0),
            (rect.size.y - self.margin * 2.0).max(0.0),
        );
        let constraints = if self.fill_width {
            Constraints { min: Vec2::new(avail.x, 0.0), max: avail }
        } else {
            Constraints::loose(avail)
        };
        let size = self.child.measure(constraints, ctx);

        let left = rect.origin.x + self.margin;
        let top = rect.origin.y + self.margin;
        let right = rect.origin.x + rect.size.x - self.margin - size.x;
        let bottom = rect.origin.y + rect.size.y - self.margin - size.y;

        let origin = match self.corner {
            Corner::TopLeft => Vec2::new(left, top),
            Corner::TopRight => Vec2::new(right, top),
            Corner::BottomLeft => Vec2::new(left, bottom),
            Corner::BottomRight => Vec2::new(right, bottom),
        };
        Rect::from_origin_size(origin, size)
    }
}

impl Widget for Anchor {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx<'_>) -> Vec2 {
        constraints.max
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        let ctx = painter.layout_ctx();
        let child_rect = self.child_rect(rect, &ctx);
        self.child.paint(painter, child_rect);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let child_rect = self.child_rect(rect, ctx);
        self.child.on_event(event, child_rect, ctx)
    }
}

#[cfg(test)]
mod tests {
    use easel_engine::text::FontSystem;

    use super::*;
    use crate::widgets::container::Container;

    #[test]
    fn bottom_right_respects_margin() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let anchor = Anchor::new(Corner::BottomRight, Container::new().min_size(20.0, 10.0)).margin(5.0);
        let r = anchor.child_rect(Rect::new(0.0, 0.0, 200.0, 100.0), &ctx);
        assert_eq!(r, Rect::new(175.0, 85.0, 20.0, 10.0));
    }

    #[test]
    fn fill_width_stretches_child() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let anchor = Anchor::new(Corner::BottomLeft, Container::new().min_size(20.0, 10.0)).fill_width(true);
        let r = anchor.child_rect(Rect::new(0.0, 0.0, 200.0, 100.0), &ctx);
        assert_eq!(r, Rect::new(0.0, 90.0, 200.0, 10.0));
    }
}
