// LeadGrid - app/mod.rs
//
// Application layer: session orchestration and configuration.
// Dependencies: core layer.

pub mod config;
pub mod session;
