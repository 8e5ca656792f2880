//! # pulsvakt-engine
//!
//! Drives the generators: one tick per interval, one `generate` call per
//! patient per tick, every emitted event handed to the injected sink.

pub mod runtime;

pub use runtime::SimulationRuntime;
