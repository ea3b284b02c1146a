//! Time subsystem.
//!
//! Frame timing and frame-driven scheduling, decoupled from any windowing
//! runtime. Intended usage:
//! - one `FrameScheduler` per render loop
//! - call `run_frame()` once per presented frame; scheduled tasks observe
//!   the same `FrameTime` snapshot

mod cancel;
mod frame_clock;
mod scheduler;

pub use cancel::CancelToken;
pub use frame_clock::{FrameClock, FrameTime};
pub use scheduler::{FrameControl, FrameHandle, FrameScheduler, FrameTask, TaskId};
