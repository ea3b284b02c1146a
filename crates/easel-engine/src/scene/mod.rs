//! Recorded draw stream.
//!
//! The overlay never talks to a GPU. Widgets record commands into a
//! [`DrawList`] and the host hands that list to whatever renderer it owns.
//! Ordering is deterministic: z-index first, then insertion order.

mod cmd;
mod list;

pub use cmd::{Border, DrawCmd, RectCmd, RoundedRectCmd, TextCmd};
pub use list::{DrawItem, DrawList, SortKey, ZIndex};
