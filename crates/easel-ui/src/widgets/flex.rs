use easel_engine::coords::{Rect, Vec2};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

// ── Align ─────────────────────────────────────────────────────────────────

/// Cross-axis alignment inside a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Children fill the full cross-axis extent.
    Stretch,
    /// Children are placed at the start of the cross axis.
    #[default]
    Start,
    /// Children are centered on the cross axis.
    Center,
    /// Children are placed at the end of the cross axis.
    End,
}

impl Align {
    fn offset(self, available: f32, child: f32) -> f32 {
        match self {
            Align::Stretch | Align::Start => 0.0,
            Align::Center => (available - child) * 0.5,
            Align::End => available - child,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Splits a vector into (main, cross) components.
    fn split(self, v: Vec2) -> (f32, f32) {
        match self {
            Axis::Horizontal => (v.x, v.y),
            Axis::Vertical => (v.y, v.x),
        }
    }

    fn join(self, main: f32, cross: f32) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::new(main, cross),
            Axis::Vertical => Vec2::new(cross, main),
        }
    }
}

// ── shared layout ─────────────────────────────────────────────────────────

struct Flex {
    axis: Axis,
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
    cross_align: Align,
}

impl Flex {
    fn new(axis: Axis) -> Self {
        Self { axis, children: Vec::new(), spacing: 0.0, padding: Edges::default(), cross_align: Align::Start }
    }

    fn child_constraints(&self, inner: Vec2) -> Constraints {
        let (_, cross) = self.axis.split(inner);
        let min_cross = if self.cross_align == Align::Stretch && cross.is_finite() { cross } else { 0.0 };
        Constraints {
            min: self.axis.join(0.0, min_cross),
            max: self.axis.join(f32::INFINITY, cross),
        }
    }

    fn spacing_total(&self) -> f32 {
        self.children.len().saturating_sub(1) as f32 * self.spacing
    }

    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        let inner = constraints.shrink(self.padding).max;
        let child_c = self.child_constraints(inner);

        let (mut main, mut cross) = (self.spacing_total(), 0.0f32);
        for child in &self.children {
            let (m, c) = self.axis.split(child.measure(child_c, ctx));
            main += m;
            cross = cross.max(c);
        }

        let (_, avail_cross) = self.axis.split(inner);
        if self.cross_align == Align::Stretch && avail_cross.is_finite() {
            cross = avail_cross;
        }

        let content = self.axis.join(main, cross);
        constraints.constrain(Vec2::new(content.x + self.padding.h(), content.y + self.padding.v()))
    }

    /// Child rects in child order, placed inside `rect`.
    fn layout(&self, rect: Rect, ctx: &LayoutCtx<'_>) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let child_c = self.child_constraints(inner.size);
        let (_, avail_cross) = self.axis.split(inner.size);

        let mut cursor = 0.0;
        self.children
            .iter()
            .map(|child| {
                let size = child.measure(child_c, ctx);
                let (m, c) = self.axis.split(size);
                let offset = self.axis.join(cursor, self.cross_align.offset(avail_cross, c));
                cursor += m + self.spacing;
                Rect::from_origin_size(inner.origin + offset, size)
            })
            .collect()
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        let ctx = painter.layout_ctx();
        for (child, child_rect) in self.children.iter().zip(self.layout(rect, &ctx)) {
            child.paint(painter, child_rect);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let rects = self.layout(rect, ctx);
        for (child, child_rect) in self.children.iter_mut().zip(rects) {
            if child.on_event(event, child_rect, ctx).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

macro_rules! flex_container {
    ($(#[$doc:meta])* $name:ident, $axis:expr) => {
        $(#[$doc])*
        pub struct $name(Flex);

        impl $name {
            pub fn new() -> Self {
                Self(Flex::new($axis))
            }

            pub fn spacing(mut self, v: f32) -> Self {
                self.0.spacing = v;
                self
            }

            pub fn padding(mut self, edges: Edges) -> Self {
                self.0.padding = edges;
                self
            }

            pub fn cross_align(mut self, align: Align) -> Self {
                self.0.cross_align = align;
                self
            }

            pub fn child(mut self, child: impl Into<Element>) -> Self {
                self.0.children.push(child.into());
                self
            }

            /// Appends `child` only when it is `Some`.
            pub fn child_opt(self, child: Option<impl Into<Element>>) -> Self {
                match child {
                    Some(c) => self.child(c),
                    None => self,
                }
            }

            pub fn children(mut self, iter: impl IntoIterator<Item = impl Into<Element>>) -> Self {
                self.0.children.extend(iter.into_iter().map(Into::into));
                self
            }

            pub fn len(&self) -> usize {
                self.0.children.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.children.is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Widget for $name {
            fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
                self.0.measure(constraints, ctx)
            }

            fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
                self.0.paint(painter, rect)
            }

            fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
                self.0.on_event(event, rect, ctx)
            }
        }
    };
}

flex_container!(
    /// Vertical flex container. Children are stacked top to bottom.
    Column,
    Axis::Vertical
);

flex_container!(
    /// Horizontal flex container. Children are placed left to right.
    Row,
    Axis::Horizontal
);

#[cfg(test)]
mod tests {
    use easel_engine::text::FontSystem;

    use super::*;
    use crate::widgets::container::Container;

    fn boxed(w: f32, h: f32) -> Container {
        Container::new().min_size(w, h)
    }

    #[test]
    fn row_measures_sum_of_children_plus_spacing() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let row = Row::new().spacing(4.0).child(boxed(10.0, 5.0)).child(boxed(20.0, 8.0));
        let size = row.measure(Constraints::unbounded(), &ctx);
        assert_eq!(size, Vec2::new(34.0, 8.0));
    }

    #[test]
    fn column_centers_on_cross_axis() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let col = Column::new()
            .cross_align(Align::Center)
            .child(boxed(10.0, 5.0))
            .child(boxed(30.0, 5.0));
        let rects = col.0.layout(Rect::new(0.0, 0.0, 30.0, 10.0), &ctx);
        assert_eq!(rects[0], Rect::new(10.0, 0.0, 10.0, 5.0));
        assert_eq!(rects[1], Rect::new(0.0, 5.0, 30.0, 5.0));
    }

    #[test]
    fn stretch_fills_cross_axis() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let col = Column::new().cross_align(Align::Stretch).child(boxed(10.0, 5.0));
        let rects = col.0.layout(Rect::new(0.0, 0.0, 50.0, 20.0), &ctx);
        assert_eq!(rects[0].size, Vec2::new(50.0, 5.0));
    }
}
