// PlaceBoard - lib.rs
//
// Library entry point, exposing every module for integration testing and
// programmatic use.
//
// The command handlers in `cli.rs` belong to the binary and are not part of
// the library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
