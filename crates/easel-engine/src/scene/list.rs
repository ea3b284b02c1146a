use super::{DrawCmd, TextCmd};

/// Layer of a draw item. Higher values paint on top.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}

/// Paint-order key: `z` first, insertion `order` breaks ties.
///
/// Field order matters: the derived `Ord` compares `z` before `order`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Draw stream of one frame.
///
/// Recording is append-only; items are stored in recording order and
/// sorted by [`SortKey`] only when a consumer asks for paint order.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all items, keeping capacity.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in recording order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records `cmd` on layer `z`.
    pub fn push(&mut self, z: ZIndex, cmd: impl Into<DrawCmd>) {
        let key = SortKey { z, order: self.items.len() as u32 };
        self.items.push(DrawItem { key, cmd: cmd.into() });
    }

    /// Text commands in recording order.
    pub fn texts(&self) -> impl Iterator<Item = &TextCmd> {
        self.items.iter().filter_map(|item| match &item.cmd {
            DrawCmd::Text(t) => Some(t),
            _ => None,
        })
    }

    /// First text command whose whole string equals `text`.
    pub fn find_text(&self, text: &str) -> Option<&TextCmd> {
        self.texts().find(|t| t.text == text)
    }

    /// Items back-to-front.
    pub fn iter_in_paint_order(&self) -> impl Iterator<Item = &DrawItem> {
        let mut order: Vec<&DrawItem> = self.items.iter().collect();
        // Keys are unique, so an unstable sort is deterministic.
        order.sort_unstable_by_key(|item| item.key);
        order.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::{Color, Paint};
    use crate::scene::RectCmd;
    use crate::text::FontId;

    fn square(x: f32) -> RectCmd {
        RectCmd { rect: Rect::new(x, 0.0, 1.0, 1.0), paint: Paint::Solid(Color::white()) }
    }

    #[test]
    fn overlay_layer_paints_last() {
        let mut list = DrawList::new();
        list.push(ZIndex::new(1 << 16), square(0.0));
        list.push(ZIndex::new(0), square(1.0));
        list.push(ZIndex::new(0), square(2.0));

        let orders: Vec<u32> = list.iter_in_paint_order().map(|i| i.key.order).collect();
        assert_eq!(orders, vec![1, 2, 0]);
    }

    #[test]
    fn clear_restarts_numbering() {
        let mut list = DrawList::new();
        list.push(ZIndex::new(0), square(0.0));
        list.clear();
        assert!(list.is_empty());
        list.push(ZIndex::new(3), square(0.0));
        assert_eq!(list.items()[0].key, SortKey { z: ZIndex(3), order: 0 });
        assert_eq!(list.iter_in_paint_order().count(), 1);
    }

    #[test]
    fn find_text_matches_whole_string() {
        let mut list = DrawList::new();
        list.push(ZIndex::new(0), TextCmd {
            text: "FPS 60".into(),
            font: FontId::DEFAULT,
            size: 12.0,
            color: Color::white(),
            origin: Vec2::zero(),
            max_width: None,
        });
        assert!(list.find_text("FPS 60").is_some());
        assert!(list.find_text("FPS").is_none());
    }
}
