//! NutriCalc Library
//!
//! Core functionality for the NutriCalc nutrition manager: body metric
//! calculators, a foods catalog and per-user calculation history.

pub mod calc;
pub mod db;
pub mod models;
pub mod session;
pub mod tools;
