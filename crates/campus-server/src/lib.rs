//! # Campus Server Library
//!
//! Wiring and startup utilities for the Campus CRM server binary.

pub mod app;
pub mod startup;
pub mod telemetry;
