//! Presentation: number formatting and terminal rendering.

pub mod format;
pub mod number;

pub use format::*;
pub use number::{DeltaBadge, DeltaClass, compact, delta, full, tooltip, tooltip_with_prefix};
