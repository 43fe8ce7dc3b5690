//! Artwork decoding and catalog color parsing.

pub(crate) mod color;
pub(crate) mod decode;
