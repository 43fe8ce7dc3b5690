//! Scene-to-draw-list compilation.

pub(crate) mod fingerprint;
pub(crate) mod plan;
