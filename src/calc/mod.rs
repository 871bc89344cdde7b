//! Calculation engines
//!
//! Pure, closed-form derivations: BMI, TMB/TDEE and macro distribution,
//! plus the shared-input pipeline that chains them.

pub mod bmi;
pub mod energy;
pub mod input;
pub mod macros;
pub mod pipeline;

pub use bmi::{BmiClassification, BmiResult};
pub use energy::{ActivityLevel, EnergyResult, Sex};
pub use input::parse_positive;
pub use macros::{Goal, MacroComponent, MacroResult};
pub use pipeline::{CalculatorInputs, CalculatorState, Derived};
