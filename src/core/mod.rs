// PlaceBoard - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library plus data crates (serde, chrono, csv, uuid).
// Must NOT depend on: platform, app, or perform any I/O beyond Write sinks.

pub mod applications;
pub mod export;
pub mod facet;
pub mod feedback;
pub mod filter;
pub mod model;
pub mod predicate;
