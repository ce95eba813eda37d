//! Hyper-key layers: nested key maps expanded into flat rule groups.
//!
//! A [`HyperKey`] holds one host variable at 1 while a physical key is down.
//! [`HyperLayers`] maps top-level keys to sub-key bindings; every expanded
//! sub-key manipulator is guarded by that variable, so the bindings only
//! fire while the hyper key is held.

use crate::constants::HYPER_VARIABLE;
use crate::error::{GeneratorError, Result};
use crate::models::{
    Action, Condition, KeyCode, KeyReference, KeyStroke, Manipulator, RuleGroup,
};
use crate::variables::VariableStore;
use std::collections::BTreeMap;
use tracing::debug;

/// Fully specified manipulator body for a sub-key.
///
/// The expander supplies `from` and prepends the activator guard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManipulatorOverride {
    /// Optional label
    pub description: Option<String>,
    /// Effects on press
    pub to: Vec<Action>,
    /// Effects on a lone press
    pub to_if_alone: Vec<Action>,
    /// Effects on release
    pub to_after_key_up: Vec<Action>,
    /// Extra guards, checked after the activator
    pub conditions: Vec<Condition>,
}

impl ManipulatorOverride {
    /// Override that performs `actions` on press.
    pub fn to(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            to: actions.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// What a sub-key does while its layer is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerBinding {
    /// Open an application by name
    App(String),
    /// Open a URI or path
    Open(String),
    /// Send a key
    Key(KeyStroke),
    /// Use a fully specified manipulator body
    Override(ManipulatorOverride),
}

impl LayerBinding {
    /// Opens the named application.
    pub fn app(name: impl Into<String>) -> Self {
        Self::App(name.into())
    }

    /// Opens a URI or path.
    pub fn open(target: impl Into<String>) -> Self {
        Self::Open(target.into())
    }

    /// Sends `key` without modifiers.
    pub fn key(key: &str) -> Result<Self> {
        KeyStroke::new(key).map(Self::Key).map_err(|e| {
            GeneratorError::config(format!("layer key binding '{key}'"), e.to_string())
        })
    }

    fn into_manipulator(self, from: KeyReference, activator: Condition) -> Manipulator {
        let base = Manipulator::new(from);
        match self {
            Self::App(name) => base
                .with_description(format!("Open {name}"))
                .to(Action::open_app(name))
                .when(activator),
            Self::Open(target) => base
                .with_description(format!("Open {target}"))
                .to(Action::open_uri(target))
                .when(activator),
            Self::Key(stroke) => base.to(Action::Key(stroke)).when(activator),
            Self::Override(body) => {
                let mut manipulator = Manipulator {
                    description: body.description,
                    to: body.to,
                    to_if_alone: body.to_if_alone,
                    to_after_key_up: body.to_after_key_up,
                    conditions: vec![activator],
                    ..base
                };
                manipulator.conditions.extend(body.conditions);
                manipulator
            }
        }
    }
}

/// The activator: a physical key that holds a variable at 1 while down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperKey {
    trigger: KeyReference,
    variable: String,
    description: String,
    if_alone: KeyStroke,
}

impl HyperKey {
    /// Makes `key` (with any modifiers) the hyper key.
    pub fn new(key: &str) -> Result<Self> {
        let trigger = KeyReference::any_modifiers(key)
            .map_err(|e| GeneratorError::config("hyper key", e.to_string()))?;
        let if_alone = KeyStroke::new("escape")
            .map_err(|e| GeneratorError::config("hyper key", e.to_string()))?;
        Ok(Self {
            description: format!("{key} -> Hyper Key"),
            trigger,
            variable: HYPER_VARIABLE.to_string(),
            if_alone,
        })
    }

    /// Right command as the hyper key.
    pub fn right_command() -> Result<Self> {
        Ok(Self::new("right_command")?.with_description("Right ⌘ -> Hyper Key"))
    }

    /// Uses `variable` instead of the default activator variable.
    #[must_use]
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    /// Replaces the manipulator description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Name of the activator variable.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Guard that holds while the hyper key is down.
    #[must_use]
    pub fn condition(&self) -> Condition {
        Condition::variable_if(&self.variable, 1)
    }

    /// Sets the variable on press, clears it on release, sends escape when tapped alone.
    #[must_use]
    pub fn manipulator(&self) -> Manipulator {
        Manipulator::new(self.trigger.clone())
            .with_description(self.description.clone())
            .to(Action::set_variable(&self.variable, 1))
            .to_after_key_up(Action::set_variable(&self.variable, 0))
            .to_if_alone(Action::Key(self.if_alone.clone()))
    }

    /// Rule group holding the activator manipulator.
    #[must_use]
    pub fn group(&self) -> RuleGroup {
        RuleGroup::new("Hyper Key (⌃⌥⇧⌘)").with(self.manipulator())
    }

    /// Returns true if the activator variable is set in `store`.
    pub fn is_held(&self, store: &impl VariableStore) -> bool {
        store.get(&self.variable) == 1
    }
}

/// Top-level key to sub-key bindings, all guarded by one activator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperLayers {
    activator: Condition,
    variable: String,
    layers: BTreeMap<KeyCode, BTreeMap<KeyCode, LayerBinding>>,
}

impl HyperLayers {
    /// Creates an empty set of layers gated by `hyper`.
    #[must_use]
    pub fn new(hyper: &HyperKey) -> Self {
        Self {
            activator: hyper.condition(),
            variable: hyper.variable().to_string(),
            layers: BTreeMap::new(),
        }
    }

    /// Adds bindings under top-level key `key`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a key code is malformed or a sub-key
    /// is already bound under any top-level key.
    pub fn layer<'k>(
        mut self,
        key: &str,
        bindings: impl IntoIterator<Item = (&'k str, LayerBinding)>,
    ) -> Result<Self> {
        let top = KeyCode::new(key)
            .map_err(|e| GeneratorError::config(format!("layer '{key}'"), e.to_string()))?;

        for (sub, binding) in bindings {
            let sub_key = KeyCode::new(sub).map_err(|e| {
                GeneratorError::config(format!("layer '{key}' key '{sub}'"), e.to_string())
            })?;

            if let Some(owner) = self.owner_of(&sub_key) {
                return Err(GeneratorError::config(
                    format!("layer '{key}' key '{sub}'"),
                    format!("sub-key already bound in layer '{owner}'"),
                ));
            }

            self.layers
                .entry(top.clone())
                .or_default()
                .insert(sub_key, binding);
        }

        Ok(self)
    }

    /// Top-level key that already binds `sub`, if any.
    #[must_use]
    pub fn owner_of(&self, sub: &KeyCode) -> Option<&KeyCode> {
        self.layers
            .iter()
            .find(|(_, bindings)| bindings.contains_key(sub))
            .map(|(top, _)| top)
    }

    /// Every (top-level key, sub-key) pair in expansion order.
    pub fn sub_keys(&self) -> impl Iterator<Item = (&KeyCode, &KeyCode)> {
        self.layers
            .iter()
            .flat_map(|(top, bindings)| bindings.keys().map(move |sub| (top, sub)))
    }

    /// Name of the activator variable.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns true if no bindings were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns true if the layers' activator is held in `store`.
    pub fn is_active(&self, store: &impl VariableStore) -> bool {
        store.get(&self.variable) == 1
    }

    /// One rule group per top-level key, in key order.
    #[must_use]
    pub fn expand(&self) -> Vec<RuleGroup> {
        self.layers
            .iter()
            .map(|(top, bindings)| {
                debug!(layer = %top, bindings = bindings.len(), "expanding hyper sublayer");

                let manipulators = bindings.iter().map(|(sub, binding)| {
                    let from = KeyReference {
                        key_code: sub.clone(),
                        modifiers: None,
                    };
                    binding.clone().into_manipulator(from, self.activator.clone())
                });

                RuleGroup::new(format!("Hyper Key sublayer \"{top}\"")).with_all(manipulators)
            })
            .collect()
    }
}
