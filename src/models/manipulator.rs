//! The atomic rule unit: trigger, guards, and effects.

use crate::models::action::Action;
use crate::models::condition::Condition;
use crate::models::key::KeyReference;
use serde::Serialize;

/// Manipulator kind. The host only defines `basic` for this document shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManipulatorKind {
    /// Plain key-to-actions rule
    #[default]
    Basic,
}

/// One input-to-output rule.
///
/// The host fires a manipulator when `from` matches the key event and every
/// condition holds; otherwise the event falls through to the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manipulator {
    /// Always `basic`
    #[serde(rename = "type")]
    pub kind: ManipulatorKind,
    /// Optional label shown by the host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Trigger key
    pub from: KeyReference,
    /// Effects applied in order when the rule fires
    pub to: Vec<Action>,
    /// Effects when the trigger is pressed and released alone
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to_if_alone: Vec<Action>,
    /// Effects when the trigger is released
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to_after_key_up: Vec<Action>,
    /// Guards, AND-ed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Manipulator {
    /// Creates a manipulator with no effects or guards.
    #[must_use]
    pub fn new(from: KeyReference) -> Self {
        Self {
            kind: ManipulatorKind::Basic,
            description: None,
            from,
            to: Vec::new(),
            to_if_alone: Vec::new(),
            to_after_key_up: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends an effect.
    #[must_use]
    pub fn to(mut self, action: Action) -> Self {
        self.to.push(action);
        self
    }

    /// Appends an effect for a lone press.
    #[must_use]
    pub fn to_if_alone(mut self, action: Action) -> Self {
        self.to_if_alone.push(action);
        self
    }

    /// Appends an effect for key release.
    #[must_use]
    pub fn to_after_key_up(mut self, action: Action) -> Self {
        self.to_after_key_up.push(action);
        self
    }

    /// Appends a guard.
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Every action across all effect lists.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.to
            .iter()
            .chain(self.to_if_alone.iter())
            .chain(self.to_after_key_up.iter())
    }

    /// Names of variables any effect list writes.
    #[must_use]
    pub fn written_variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .actions()
            .filter_map(|a| a.written_variable().map(|(name, _)| name))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
