//! Pointer input for driftfx
//!
//! Tracks the cursor position over the effect surface so interactive
//! effects can attract particles toward it.

mod pointer;

pub use pointer::PointerTracker;
