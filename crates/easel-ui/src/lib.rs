//! Easel UI: a small retained widget tree on top of `easel-engine`.
//!
//! Widgets measure themselves against [`Constraints`](constraints::Constraints),
//! paint into a [`Painter`](painter::Painter) that records engine draw
//! commands, and receive pointer events after painting.
//!
//! ```rust,ignore
//! use easel_ui::prelude::*;
//!
//! let mut scene = UiScene::new();
//! let draw_list = scene.frame(
//!     Row::new()
//!         .spacing(8.0)
//!         .child(Text::new("Hello", FontId::DEFAULT, 12.0, Color::white()))
//!         .child(Button::new(Text::new("Click", FontId::DEFAULT, 12.0, Color::white()))
//!             .on_click(|| log::info!("clicked"))),
//!     viewport,
//!     &input,
//! );
//! ```

pub mod constraints;
pub mod event;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

/// Everything needed to build and extend UI.
pub mod prelude {
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::painter::Painter;
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        anchor::{Anchor, Corner},
        button::Button,
        checkbox::Checkbox,
        container::Container,
        dropdown::{Dropdown, DropdownState, Placement},
        flex::{Align, Column, Row},
        text::Text,
    };

    pub use easel_engine::coords::{CornerRadii, Rect, Vec2};
    pub use easel_engine::paint::{Color, Paint};
    pub use easel_engine::scene::Border;
    pub use easel_engine::text::FontId;
}
