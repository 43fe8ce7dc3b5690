//! Frame-driven animation loop.

pub(crate) mod clock;
pub(crate) mod scheduler;
