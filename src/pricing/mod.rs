//! Price derivation from catalog records and artwork size.

pub(crate) mod calculator;
