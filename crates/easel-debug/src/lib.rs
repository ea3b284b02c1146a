//! Developer debug overlay for the Easel canvas editor.
//!
//! The overlay is a bar pinned to the bottom of the viewport showing the
//! editor's tool state, a frame-rate meter, the shape count and a menu of
//! debug flags and test actions. It records into an `easel-engine` draw list
//! and talks to the host through the traits in [`host`].
//!
//! ```rust,ignore
//! let flags = FlagRegistry::with_debug_flags(config.environment);
//! let mut panel = DebugPanel::new(config, host, flags)?;
//! loop {
//!     scheduler.run_frame();
//!     let draw_list = panel.frame(&mut scheduler, viewport, &input)?;
//!     renderer.submit(draw_list);
//! }
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod flags;
pub mod fps;
pub mod host;
pub mod memory;
pub mod menu;
pub mod panel;
pub mod readout;

pub use actions::{ActionRunner, DebugAction, ErrorLatch};
pub use config::{Environment, FpsConfig, OverlayConfig};
pub use error::{DebugError, DebugResult};
pub use flags::{flag_label, DebugFlag, FlagDefaults, FlagGroup, FlagRegistry, SHOW_FPS};
pub use fps::{FpsEstimator, FpsMeter, FpsMonitor, FpsSample};
pub use host::{DebugHost, Dialog, Dialogs, Editor, NewShape, ShapeId, ShapeInfo, Toast, Toasts};
pub use menu::DebugMenu;
pub use panel::DebugPanel;
pub use readout::{current_state_text, shape_count_text, Readouts};
