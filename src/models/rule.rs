//! Named, ordered groups of manipulators.

use crate::models::manipulator::Manipulator;
use serde::Serialize;

/// A named list of manipulators.
///
/// The host walks groups and their manipulators top to bottom and stops at
/// the first full match for each key event, so order is part of the meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleGroup {
    /// Label shown in the host's rule list
    pub description: String,
    /// Manipulators in evaluation order
    pub manipulators: Vec<Manipulator>,
}

impl RuleGroup {
    /// Creates an empty group.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            manipulators: Vec::new(),
        }
    }

    /// Appends a manipulator.
    #[must_use]
    pub fn with(mut self, manipulator: Manipulator) -> Self {
        self.manipulators.push(manipulator);
        self
    }

    /// Appends every manipulator from `manipulators`.
    #[must_use]
    pub fn with_all(mut self, manipulators: impl IntoIterator<Item = Manipulator>) -> Self {
        self.manipulators.extend(manipulators);
        self
    }
}
