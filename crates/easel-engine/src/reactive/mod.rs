//! Minimal single-threaded reactive cells.
//!
//! An [`Atom`] holds a value and notifies listeners when it changes.
//! Listening returns a [`Subscription`]; dropping it unregisters the
//! listener, so observers acquire it on mount and release it on unmount.

mod atom;
mod subscription;

pub use atom::Atom;
pub use subscription::Subscription;
