//! Data models for the generated remapping document.
//!
//! These types mirror the host's JSON schema. They are built fresh on every
//! run and never mutated once assembled into a [`Document`].

pub mod action;
pub mod condition;
pub mod document;
pub mod key;
pub mod manipulator;
pub mod modifier;
pub mod rule;

// Re-export all model types
pub use action::{Action, OpenTarget};
pub use condition::Condition;
pub use document::{ComplexModifications, Document, GlobalSettings, Profile};
pub use key::{KeyCode, KeyReference, KeyStroke};
pub use manipulator::{Manipulator, ManipulatorKind};
pub use modifier::{Modifier, ModifierSet};
pub use rule::RuleGroup;
