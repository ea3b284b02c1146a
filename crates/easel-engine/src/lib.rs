//! Easel engine crate.
//!
//! Renderer-agnostic building blocks shared by the UI toolkit and the debug
//! overlay: geometry, paint, the recorded draw stream, font metrics, frame
//! timing and scheduling, and small reactive cells.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod reactive;
pub mod scene;
pub mod text;
pub mod time;
