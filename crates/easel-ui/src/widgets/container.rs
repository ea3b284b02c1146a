use easel_engine::coords::{Rect, Vec2};
use easel_engine::paint::Paint;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Optional child plus padding, a background fill and a minimum size.
///
/// Childless containers are fixed-size boxes, which is how menu separators
/// are drawn.
///
/// # Example
/// ```rust,ignore
/// Container::new()
///     .padding(Edges::symmetric(2.0, 8.0))
///     .background(Color::from_straight(0.08, 0.08, 0.1, 0.92))
///     .child(row)
/// ```
#[derive(Default)]
pub struct Container {
    child: Option<Element>,
    padding: Edges,
    background: Option<Paint>,
    min_size: Vec2,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.child = Some(child.into());
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn background(mut self, paint: impl Into<Paint>) -> Self {
        self.background = Some(paint.into());
        self
    }

    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_size = Vec2::new(width, height);
        self
    }
}

impl Widget for Container {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        let content = match &self.child {
            Some(child) => child.measure(constraints.shrink(self.padding), ctx),
            None => Vec2::zero(),
        };
        let padded = content + Vec2::new(self.padding.h(), self.padding.v());
        constraints.constrain(Vec2::new(padded.x.max(self.min_size.x), padded.y.max(self.min_size.y)))
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        if let Some(paint) = &self.background {
            painter.fill_rounded_rect(rect, 0.0, paint.clone(), None);
        }
        if let Some(child) = &self.child {
            child.paint(painter, inset_rect(rect, self.padding));
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        match &mut self.child {
            Some(child) => child.on_event(event, inset_rect(rect, self.padding), ctx),
            None => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use easel_engine::text::FontSystem;

    use super::*;

    #[test]
    fn padding_adds_to_child_and_min_size_wins() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let inner = Container::new().min_size(10.0, 4.0);
        let outer = Container::new().padding(Edges::all(2.0)).min_size(0.0, 20.0).child(inner);
        assert_eq!(outer.measure(Constraints::unbounded(), &ctx), Vec2::new(14.0, 20.0));
    }
}
