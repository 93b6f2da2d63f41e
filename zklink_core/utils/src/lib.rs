//! Various helpers used in the zkLink stack.

mod format;
mod serde_wrappers;

pub use format::*;
pub use serde_wrappers::*;
