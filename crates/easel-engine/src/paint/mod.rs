//! Paint model shared between the UI and whatever renders the draw list.
//!
//! Colors are stored linear premultiplied. Geometry types remain in `coords`.

mod color;

pub use color::Color;

/// Paint source for filling geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
}

impl From<Color> for Paint {
    #[inline]
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}
