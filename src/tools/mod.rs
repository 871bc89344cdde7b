//! Operation layer
//!
//! The calls a UI makes against this crate: calculator runs, food catalog
//! CRUD and history management.

pub mod calculators;
pub mod foods;
pub mod history;
