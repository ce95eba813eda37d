//! Construction-time validation of an assembled rule set.
//!
//! Everything here runs before serialization; a report with errors stops the
//! run without touching the output file.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::generator::layers::HyperLayers;
use crate::models::condition::mutually_exclusive;
use crate::models::{KeyCode, Manipulator, RuleGroup};
use std::collections::BTreeMap;

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Problems that prevent writing the document
    pub errors: Vec<ValidationError>,
    /// Non-critical findings
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Errors of the given kind.
    pub fn errors_of(&self, kind: ValidationErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    /// Formats the report as a user-friendly error message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("{} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("\n{} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Description of the rule group at fault
    pub group: Option<String>,
    /// Index of the manipulator within that group
    pub manipulator: Option<usize>,
    /// Human-readable error message
    pub message: String,
    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            group: None,
            manipulator: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Sets the group and manipulator context.
    pub fn at(mut self, group: impl Into<String>, manipulator: usize) -> Self {
        self.group = Some(group.into());
        self.manipulator = Some(manipulator);
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.group, self.manipulator) {
            (Some(group), Some(idx)) => {
                write!(f, "[{group} #{idx}] {}: {}", self.kind, self.message)?;
            }
            _ => write!(f, "{}: {}", self.kind, self.message)?,
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }

        Ok(())
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Key code the host cannot name
    MalformedKey,
    /// Mandatory/optional modifier lists overlap or misuse the wildcard
    ModifierConflict,
    /// Same sub-key bound under two hyper layers
    DuplicateSubKey,
    /// Hyper activator and a toggle share one variable
    SharedVariable,
    /// Two same-trigger manipulators write a variable under overlapping guards
    ConflictingWriters,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedKey => write!(f, "Malformed Key"),
            Self::ModifierConflict => write!(f, "Modifier Conflict"),
            Self::DuplicateSubKey => write!(f, "Duplicate Sub-key"),
            Self::SharedVariable => write!(f, "Shared Variable"),
            Self::ConflictingWriters => write!(f, "Conflicting Writers"),
        }
    }
}

/// Validation warning (non-blocking).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Warning message
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new validation warning
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Rule set validator.
pub struct RuleSetValidator<'a> {
    groups: &'a [RuleGroup],
    layers: &'a [HyperLayers],
    toggle_variables: &'a [String],
}

impl<'a> RuleSetValidator<'a> {
    /// Creates a validator over fully expanded `groups`.
    ///
    /// `layers` and `toggle_variables` describe where the groups came from so
    /// cross-layer and cross-variable checks can name the offending entry.
    #[must_use]
    pub const fn new(
        groups: &'a [RuleGroup],
        layers: &'a [HyperLayers],
        toggle_variables: &'a [String],
    ) -> Self {
        Self {
            groups,
            layers,
            toggle_variables,
        }
    }

    /// Validates the rule set.
    ///
    /// Checks:
    /// - Trigger and emitted key codes are well formed
    /// - Modifier lists are disjoint and the wildcard is only optional
    /// - No sub-key is bound by two hyper layers
    /// - Hyper activators and toggles use distinct variables
    /// - Same-trigger manipulators writing one variable have exclusive guards
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        self.check_keys(&mut report);
        self.check_sub_keys(&mut report);
        self.check_variables(&mut report);
        self.check_writers(&mut report);

        for group in self.groups {
            if group.manipulators.is_empty() {
                report.add_warning(ValidationWarning::new(format!(
                    "Rule group '{}' has no manipulators",
                    group.description
                )));
            }
        }

        report
    }

    fn manipulators(&self) -> impl Iterator<Item = (&'a RuleGroup, usize, &'a Manipulator)> {
        self.groups.iter().flat_map(|group| {
            group
                .manipulators
                .iter()
                .enumerate()
                .map(move |(idx, m)| (group, idx, m))
        })
    }

    fn check_keys(&self, report: &mut ValidationReport) {
        for (group, idx, manipulator) in self.manipulators() {
            if !manipulator.from.key_code.is_well_formed() {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::MalformedKey,
                        format!(
                            "Trigger key '{}' is not a host key code",
                            manipulator.from.key_code
                        ),
                    )
                    .at(&group.description, idx),
                );
            }

            if let Some(modifiers) = &manipulator.from.modifiers {
                if let Err(message) = modifiers.check() {
                    report.add_error(
                        ValidationError::new(ValidationErrorKind::ModifierConflict, message)
                            .at(&group.description, idx),
                    );
                }
            }

            for key in manipulator.actions().filter_map(|a| a.key_code()) {
                if !key.is_well_formed() {
                    report.add_error(
                        ValidationError::new(
                            ValidationErrorKind::MalformedKey,
                            format!("Emitted key '{key}' is not a host key code"),
                        )
                        .at(&group.description, idx),
                    );
                }
            }
        }
    }

    fn check_sub_keys(&self, report: &mut ValidationReport) {
        let mut owners: BTreeMap<(&str, &KeyCode), &KeyCode> = BTreeMap::new();

        for layers in self.layers {
            for (top, sub) in layers.sub_keys() {
                match owners.get(&(layers.variable(), sub)) {
                    Some(owner) => report.add_error(
                        ValidationError::new(
                            ValidationErrorKind::DuplicateSubKey,
                            format!(
                                "Layer '{top}' key '{sub}' is already bound in layer '{owner}'"
                            ),
                        )
                        .with_suggestion("Bind the key in only one layer"),
                    ),
                    None => {
                        owners.insert((layers.variable(), sub), top);
                    }
                }
            }
        }
    }

    fn check_variables(&self, report: &mut ValidationReport) {
        for layers in self.layers {
            if self.toggle_variables.iter().any(|v| v == layers.variable()) {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::SharedVariable,
                        format!(
                            "Variable '{}' is used both as hyper activator and as a toggle",
                            layers.variable()
                        ),
                    )
                    .with_suggestion("Give the toggle its own variable name"),
                );
            }
        }
    }

    fn check_writers(&self, report: &mut ValidationReport) {
        let all: Vec<_> = self.manipulators().collect();

        for (i, (group_a, idx_a, a)) in all.iter().enumerate() {
            for (group_b, idx_b, b) in &all[i + 1..] {
                if !a.from.overlaps(&b.from) {
                    continue;
                }

                let shared = a
                    .written_variables()
                    .into_iter()
                    .find(|v| b.written_variables().contains(v));

                if let Some(variable) = shared {
                    if !mutually_exclusive(&a.conditions, &b.conditions) {
                        report.add_error(
                            ValidationError::new(
                                ValidationErrorKind::ConflictingWriters,
                                format!(
                                    "Trigger '{}' writes '{variable}' here and in [{} #{idx_b}] \
                                     without exclusive guards",
                                    a.from, group_b.description
                                ),
                            )
                            .at(&group_a.description, *idx_a)
                            .with_suggestion(
                                "Guard the two manipulators on different values of the variable",
                            ),
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::layers::{HyperKey, LayerBinding};
    use crate::generator::toggle::{DisableOptions, Toggle};
    use crate::models::{Action, KeyReference, Modifier, ModifierSet};

    fn ctrl_space() -> KeyReference {
        KeyReference::with_mandatory("spacebar", [Modifier::Control]).unwrap()
    }

    #[test]
    fn test_enable_disable_same_trigger_is_valid() {
        let toggle = Toggle::shift_lock();
        let groups = vec![RuleGroup::new("Shift-lock toggle")
            .with(toggle.enable(ctrl_space()))
            .with(toggle.disable(ctrl_space(), DisableOptions::default()))];

        let report = RuleSetValidator::new(&groups, &[], &[]).validate();
        assert!(report.is_valid(), "{}", report.format_message());
    }

    #[test]
    fn test_unguarded_writers_conflict() {
        let a = Manipulator::new(ctrl_space()).to(Action::set_variable("shiftlock", 1));
        let b = Manipulator::new(ctrl_space()).to(Action::set_variable("shiftlock", 0));
        let groups = vec![RuleGroup::new("one").with(a), RuleGroup::new("two").with(b)];

        let report = RuleSetValidator::new(&groups, &[], &[]).validate();
        assert_eq!(report.errors_of(ValidationErrorKind::ConflictingWriters).count(), 1);
        assert!(report.errors[0].to_string().contains("[one #0]"));
    }

    #[test]
    fn test_overlapping_triggers_conflict() {
        let wildcard = KeyReference::any_modifiers("spacebar").unwrap();
        let a = Manipulator::new(ctrl_space()).to(Action::set_variable("shiftlock", 1));
        let b = Manipulator::new(wildcard).to(Action::set_variable("shiftlock", 0));
        let groups = vec![RuleGroup::new("lock").with(a), RuleGroup::new("unlock").with(b)];

        let report = RuleSetValidator::new(&groups, &[], &[]).validate();
        let errors: Vec<_> = report.errors_of(ValidationErrorKind::ConflictingWriters).collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("[lock #0]"));
    }

    #[test]
    fn test_overlapping_triggers_with_exclusive_guards_are_valid() {
        let toggle = Toggle::shift_lock();
        let wildcard = KeyReference::any_modifiers("spacebar").unwrap();
        let groups = vec![RuleGroup::new("Shift-lock toggle")
            .with(toggle.enable(ctrl_space()))
            .with(toggle.disable(wildcard, DisableOptions::default()))];

        let report = RuleSetValidator::new(&groups, &[], &[]).validate();
        assert!(report.is_valid(), "{}", report.format_message());
    }

    #[test]
    fn test_different_triggers_do_not_conflict() {
        let toggle = Toggle::shift_lock();
        let groups = vec![RuleGroup::new("g")
            .with(toggle.disable(KeyReference::new("escape").unwrap(), DisableOptions::default()))
            .with(toggle.disable(ctrl_space(), DisableOptions::default()))];

        assert!(RuleSetValidator::new(&groups, &[], &[]).validate().is_valid());
    }

    #[test]
    fn test_duplicate_sub_key_across_layer_sets() {
        let hyper = HyperKey::right_command().unwrap();
        let first = HyperLayers::new(&hyper)
            .layer("o", [("c", LayerBinding::app("Notion Calendar"))])
            .unwrap();
        let second = HyperLayers::new(&hyper)
            .layer("r", [("c", LayerBinding::open("raycast://color"))])
            .unwrap();
        let layers = vec![first, second];

        let report = RuleSetValidator::new(&[], &layers, &[]).validate();
        let errors: Vec<_> = report.errors_of(ValidationErrorKind::DuplicateSubKey).collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Layer 'r' key 'c'"));
    }

    #[test]
    fn test_shared_variable_is_rejected() {
        let hyper = HyperKey::right_command().unwrap().with_variable("shiftlock");
        let layers = vec![HyperLayers::new(&hyper)];
        let toggles = vec!["shiftlock".to_string()];

        let report = RuleSetValidator::new(&[], &layers, &toggles).validate();
        assert_eq!(report.errors_of(ValidationErrorKind::SharedVariable).count(), 1);
    }

    #[test]
    fn test_modifier_conflict_is_reported() {
        let from = KeyReference {
            modifiers: Some(ModifierSet::mandatory([Modifier::Any])),
            ..KeyReference::new("a").unwrap()
        };
        let groups = vec![RuleGroup::new("bad").with(Manipulator::new(from))];

        let report = RuleSetValidator::new(&groups, &[], &[]).validate();
        assert_eq!(report.errors_of(ValidationErrorKind::ModifierConflict).count(), 1);
    }

    #[test]
    fn test_empty_group_is_warning_only() {
        let groups = vec![RuleGroup::new("nothing")];
        let report = RuleSetValidator::new(&groups, &[], &[]).validate();
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.format_message().contains("nothing"));
    }
}
