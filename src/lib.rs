//! Pascal's triangle and the identities hiding in it
//!
//! The numeric core is free of any terminal code: build a [`Triangle`],
//! plan its Fibonacci diagonals, and ask [`colorize::color_for`] how each
//! cell should look under the active [`ViewMode`]. A [`Session`] bundles
//! the per-viewer state and produces complete [`render::Frame`]s.

pub mod animation;
pub mod colorize;
pub mod error;
pub mod fibonacci;
pub mod mode;
pub mod prime;
pub mod render;
pub mod session;
pub mod triangle;

pub use error::{PascalError, Result};
pub use fibonacci::FibonacciPlan;
pub use mode::ViewMode;
pub use prime::is_prime;
pub use session::Session;
pub use triangle::{Cell, Triangle};
