//! Built-in widgets.

pub mod anchor;
pub mod button;
pub mod checkbox;
pub mod container;
pub mod dropdown;
pub mod flex;
pub mod text;
