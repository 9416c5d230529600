// PlaceBoard - app/mod.rs
//
// Application layer: Record Store access, background loading, board state,
// and write workflows.
// Dependencies: core layer, platform::fs.

pub mod loader;
pub mod state;
pub mod store;
pub mod workflow;
