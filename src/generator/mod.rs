//! Rule generation: toggle and layer builders, assembly, validation, output.
//!
//! Builders produce manipulators and rule groups, [`RuleSet`] orders and
//! validates them, and [`serializer`] writes the finished [`Document`].
//!
//! [`Document`]: crate::models::Document

pub mod assembler;
pub mod layers;
pub mod serializer;
pub mod toggle;
pub mod validator;

// Re-export generator types
pub use assembler::RuleSet;
pub use layers::{HyperKey, HyperLayers, LayerBinding, ManipulatorOverride};
pub use toggle::{DisableOptions, Toggle, ToggleState};
pub use validator::{RuleSetValidator, ValidationReport};
