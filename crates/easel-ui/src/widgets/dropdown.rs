use std::cell::Cell;
use std::rc::Rc;

use easel_engine::coords::{Rect, Vec2};
use easel_engine::paint::{Color, Paint};
use easel_engine::scene::Border;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Open/closed flag shared between a [`Dropdown`] and whoever rebuilds it.
///
/// Widget trees are rebuilt every frame, so the state lives outside them.
#[derive(Debug, Clone, Default)]
pub struct DropdownState(Rc<Cell<bool>>);

impl DropdownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.0.get()
    }

    pub fn open(&self) {
        self.0.set(true);
    }

    pub fn close(&self) {
        self.0.set(false);
    }

    pub fn toggle(&self) {
        self.0.set(!self.0.get());
    }
}

/// Which side of the trigger the popup opens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    #[default]
    Above,
    Below,
}

struct Item {
    element: Element,
    /// Keeps the popup open after the item handles a click.
    sticky: bool,
}

/// A trigger widget that toggles a popup list of items.
///
/// The popup is painted on the overlay layer, right-aligned with the trigger.
/// Clicking a regular item closes the popup; sticky items (checkboxes) keep it
/// open. A click anywhere outside both trigger and popup closes it.
///
/// # Example
/// ```rust,ignore
/// Dropdown::new(Text::new("≡", font, 12.0, white), state.clone())
///     .item(Button::new(Text::new("Show toast", font, 12.0, white)).on_click(show))
///     .sticky_item(Checkbox::new().label("Debug svg"))
/// ```
pub struct Dropdown {
    trigger: Element,
    state: DropdownState,
    items: Vec<Item>,
    placement: Placement,
    background: Color,
    border: Option<Border>,
    padding: Edges,
    spacing: f32,
    gap: f32,
    corner_radius: f32,
    min_width: f32,
}

impl Dropdown {
    pub fn new(trigger: impl Into<Element>, state: DropdownState) -> Self {
        Self {
            trigger: trigger.into(),
            state,
            items: Vec::new(),
            placement: Placement::default(),
            background: Color::from_straight(0.12, 0.12, 0.14, 0.97),
            border: Some(Border::new(1.0, Color::from_straight(0.3, 0.3, 0.35, 1.0))),
            padding: Edges::all(4.0),
            spacing: 2.0,
            gap: 4.0,
            corner_radius: 6.0,
            min_width: 160.0,
        }
    }

    pub fn item(mut self, element: impl Into<Element>) -> Self {
        self.items.push(Item { element: element.into(), sticky: false });
        self
    }

    pub fn sticky_item(mut self, element: impl Into<Element>) -> Self {
        self.items.push(Item { element: element.into(), sticky: true });
        self
    }

    pub fn placement(mut self, v: Placement) -> Self { self.placement = v; self }
    pub fn background(mut self, v: Color) -> Self { self.background = v; self }
    pub fn border(mut self, v: Option<Border>) -> Self { self.border = v; self }
    pub fn padding(mut self, v: Edges) -> Self { self.padding = v; self }
    pub fn spacing(mut self, v: f32) -> Self { self.spacing = v; self }
    pub fn corner_radius(mut self, v: f32) -> Self { self.corner_radius = v; self }
    pub fn min_width(mut self, v: f32) -> Self { self.min_width = v; self }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Popup rect plus the rect of every item inside it.
    fn popup_layout(&self, trigger: Rect, ctx: &LayoutCtx<'_>) -> (Rect, Vec<Rect>) {
        let sizes: Vec<Vec2> = self
            .items
            .iter()
            .map(|it| it.element.measure(Constraints::unbounded(), ctx))
            .collect();

        let inner_w = sizes.iter().map(|s| s.x).fold(0.0_f32, f32::max);
        let width = (inner_w + self.padding.h()).max(self.min_width);
        let inner_h = sizes.iter().map(|s| s.y).sum::<f32>()
            + self.spacing * sizes.len().saturating_sub(1) as f32;
        let height = inner_h + self.padding.v();

        let x = (trigger.origin.x + trigger.size.x - width).max(0.0);
        let y = match self.placement {
            Placement::Above => (trigger.origin.y - self.gap - height).max(0.0),
            Placement::Below => trigger.origin.y + trigger.size.y + self.gap,
        };
        let popup = Rect::new(x, y, width, height);

        let inner = inset_rect(popup, self.padding);
        let mut cursor = inner.origin.y;
        let rects = sizes
            .iter()
            .map(|s| {
                let r = Rect::new(inner.origin.x, cursor, inner.size.x, s.y);
                cursor += s.y + self.spacing;
                r
            })
            .collect();
        (popup, rects)
    }
}

impl Widget for Dropdown {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        self.trigger.measure(constraints, ctx)
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        self.trigger.paint(painter, rect);
        if !self.state.is_open() {
            return;
        }

        let ctx = painter.layout_ctx();
        let (popup, rects) = self.popup_layout(rect, &ctx);
        painter.overlay(|p| {
            p.fill_rounded_rect(popup, self.corner_radius, Paint::Solid(self.background), self.border.clone());
            for (item, r) in self.items.iter().zip(rects) {
                item.element.paint(p, r);
            }
        });
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        if self.state.is_open() {
            let (popup, rects) = self.popup_layout(rect, ctx);
            if popup.contains(event.pos()) {
                for (item, r) in self.items.iter_mut().zip(rects) {
                    if item.element.on_event(event, r, ctx).is_consumed() {
                        if matches!(event, UiEvent::Click { .. }) && !item.sticky {
                            self.state.close();
                        }
                        break;
                    }
                }
                return EventResult::Consumed;
            }
        }

        let UiEvent::Click { pos } = event else {
            return self.trigger.on_event(event, rect, ctx);
        };
        if rect.contains(*pos) {
            self.trigger.on_event(event, rect, ctx);
            self.state.toggle();
            log::trace!("dropdown toggled: open={}", self.state.is_open());
            return EventResult::Consumed;
        }
        if self.state.is_open() {
            self.state.close();
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use easel_engine::text::FontSystem;

    use super::*;
    use crate::widgets::button::Button;
    use crate::widgets::checkbox::Checkbox;
    use crate::widgets::container::Container;

    fn boxed(w: f32, h: f32) -> Container {
        Container::new().min_size(w, h)
    }

    fn click(dd: &mut Dropdown, trigger: Rect, pos: Vec2) -> EventResult {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        dd.on_event(&UiEvent::Click { pos }, trigger, &ctx)
    }

    const TRIGGER: Rect = Rect::new(300.0, 200.0, 20.0, 20.0);

    #[test]
    fn trigger_click_toggles() {
        let state = DropdownState::new();
        let mut dd = Dropdown::new(boxed(20.0, 20.0), state.clone()).item(boxed(100.0, 20.0));
        assert_eq!(click(&mut dd, TRIGGER, Vec2::new(310.0, 210.0)), EventResult::Consumed);
        assert!(state.is_open());
        click(&mut dd, TRIGGER, Vec2::new(310.0, 210.0));
        assert!(!state.is_open());
    }

    #[test]
    fn popup_sits_above_and_right_aligned() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let dd = Dropdown::new(boxed(20.0, 20.0), DropdownState::new())
            .padding(Edges::all(0.0))
            .spacing(0.0)
            .min_width(0.0)
            .item(boxed(100.0, 20.0))
            .item(boxed(80.0, 10.0));
        let (popup, rects) = dd.popup_layout(TRIGGER, &ctx);
        assert_eq!(popup, Rect::new(220.0, 166.0, 100.0, 30.0));
        assert_eq!(rects[1], Rect::new(220.0, 186.0, 100.0, 10.0));
    }

    #[test]
    fn item_click_runs_and_closes() {
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        let state = DropdownState::new();
        state.open();
        let mut dd = Dropdown::new(boxed(20.0, 20.0), state.clone())
            .padding(Edges::all(0.0))
            .min_width(0.0)
            .item(Button::new(boxed(100.0, 20.0)).padding(Edges::all(0.0)).on_click(move || *h.borrow_mut() += 1));
        // Popup spans x 220..320, y 176..196.
        click(&mut dd, TRIGGER, Vec2::new(250.0, 180.0));
        assert_eq!(*hits.borrow(), 1);
        assert!(!state.is_open());
    }

    #[test]
    fn sticky_item_keeps_open() {
        let state = DropdownState::new();
        state.open();
        let mut dd = Dropdown::new(boxed(20.0, 20.0), state.clone())
            .padding(Edges::all(0.0))
            .min_width(200.0)
            .sticky_item(Checkbox::new().label("Debug svg"));
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let (_, rects) = dd.popup_layout(TRIGGER, &ctx);
        let pos = rects[0].origin + Vec2::new(2.0, 2.0);
        assert_eq!(click(&mut dd, TRIGGER, pos), EventResult::Consumed);
        assert!(state.is_open());
    }

    #[test]
    fn outside_click_closes() {
        let state = DropdownState::new();
        state.open();
        let mut dd = Dropdown::new(boxed(20.0, 20.0), state.clone()).item(boxed(100.0, 20.0));
        assert_eq!(click(&mut dd, TRIGGER, Vec2::new(5.0, 5.0)), EventResult::Ignored);
        assert!(!state.is_open());
    }
}
