//! Ordered assembly of static rule groups and expanded hyper layers.

use crate::error::{GeneratorError, Result};
use crate::generator::layers::HyperLayers;
use crate::generator::toggle::Toggle;
use crate::generator::validator::RuleSetValidator;
use crate::models::RuleGroup;
use tracing::{debug, warn};

/// Collects rule groups in evaluation order.
///
/// Static groups come first in the order they were pushed, followed by the
/// groups of every pushed [`HyperLayers`] in push order. Nothing is
/// deduplicated or reordered: the host stops at the first match, so a
/// specific static rule must be pushed before a general one.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    static_groups: Vec<RuleGroup>,
    layers: Vec<HyperLayers>,
    toggle_variables: Vec<String>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a static rule group.
    #[must_use]
    pub fn push_static(mut self, group: RuleGroup) -> Self {
        self.static_groups.push(group);
        self
    }

    /// Appends a static group built from `toggle` and records its variable.
    #[must_use]
    pub fn push_toggle(mut self, toggle: &Toggle, group: RuleGroup) -> Self {
        if !self.toggle_variables.iter().any(|v| v == toggle.variable()) {
            self.toggle_variables.push(toggle.variable().to_string());
        }
        self.static_groups.push(group);
        self
    }

    /// Appends a set of hyper layers, expanded after all static groups.
    #[must_use]
    pub fn push_layers(mut self, layers: HyperLayers) -> Self {
        self.layers.push(layers);
        self
    }

    /// Expands, validates, and returns the final ordered group list.
    ///
    /// # Errors
    ///
    /// Returns a configuration error listing every validation failure.
    pub fn build(self) -> Result<Vec<RuleGroup>> {
        let mut groups = self.static_groups;
        for layers in &self.layers {
            groups.extend(layers.expand());
        }

        let report =
            RuleSetValidator::new(&groups, &self.layers, &self.toggle_variables).validate();

        for warning in &report.warnings {
            warn!("{warning}");
        }

        if !report.is_valid() {
            return Err(GeneratorError::config("rule set", report.format_message()));
        }

        debug!(
            groups = groups.len(),
            manipulators = groups.iter().map(|g| g.manipulators.len()).sum::<usize>(),
            "assembled rule set"
        );

        Ok(groups)
    }
}
