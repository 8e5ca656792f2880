//! Event types shared between generators and output sinks.

pub mod alert;

pub use alert::{AlertEvent, AlertStatus, ALERT_LABEL};
