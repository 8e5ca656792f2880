//! Per-patient data generators.
//!
//! Each generator owns the state for the whole declared patient population
//! and is invoked once per patient per tick by an external driver.

pub mod alert;

pub use alert::AlertGenerator;
