//! Designer sessions tying selection, animation, rendering and pricing together.

pub(crate) mod design;
pub(crate) mod designer;
