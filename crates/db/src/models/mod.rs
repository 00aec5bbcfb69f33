//! Row structs and response projections.

pub mod world;
