//! Container module for bounded-quantity accounting
//!
//! - `Container`: a capacity and a balance kept within `[0, capacity]`
//! - `Registry`: named containers keyed by never-reused numeric ids

mod registry;
mod types;

pub use registry::{Entry, Registry};
pub use types::Container;
