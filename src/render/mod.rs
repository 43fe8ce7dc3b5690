//! Rasterization: draw-plan execution, backends and the layer compositor.

pub(crate) mod backend;
pub(crate) mod blur;
pub(crate) mod compositor;
pub(crate) mod cpu;
pub(crate) mod text;
