// LeadGrid - core/mod.rs
//
// Core business logic layer.
// Dependencies: std plus codec crates behind Read/Write seams.
// Must NOT depend on: app layer or any process-hosting concern.

pub mod assign;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod reconcile;
pub mod roster;
