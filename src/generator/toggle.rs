//! Sticky-modifier toggle backed by one host variable.
//!
//! The toggle has two states, Off (0) and On (1). Only matched key events
//! move it: an `enable` manipulator guarded by `== 0` sets it to 1 and a
//! `disable` manipulator guarded by `== 1` sets it back to 0. While On,
//! `transform` manipulators re-send navigation keys with the lock modifier
//! held, which is how shift-lock selection works.

use crate::constants::SHIFT_LOCK_VARIABLE;
use crate::models::{Action, Condition, KeyReference, KeyStroke, Manipulator, Modifier};
use crate::variables::VariableStore;

/// Observable state of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    /// Variable is 0 (host default)
    Off,
    /// Variable is 1
    On,
}

impl ToggleState {
    /// Value stored in the host variable for this state.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }
}

/// Extra effects for a `disable` manipulator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisableOptions {
    /// Re-send the trigger key after clearing the toggle
    pub pass_through: bool,
    /// Additional key sent last
    pub auxiliary: Option<KeyStroke>,
}

impl DisableOptions {
    /// Options that re-send the trigger.
    #[must_use]
    pub fn pass_through() -> Self {
        Self {
            pass_through: true,
            auxiliary: None,
        }
    }

    /// Adds an auxiliary key.
    #[must_use]
    pub fn with_auxiliary(mut self, stroke: KeyStroke) -> Self {
        self.auxiliary = Some(stroke);
        self
    }
}

/// Builder for manipulators that read and write one toggle variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    variable: String,
    lock_modifier: Modifier,
}

impl Toggle {
    /// Creates a toggle over `variable` that adds `lock_modifier` to transformed keys.
    pub fn new(variable: impl Into<String>, lock_modifier: Modifier) -> Self {
        Self {
            variable: variable.into(),
            lock_modifier,
        }
    }

    /// The shift-lock toggle.
    #[must_use]
    pub fn shift_lock() -> Self {
        Self::new(SHIFT_LOCK_VARIABLE, Modifier::Shift)
    }

    /// Name of the backing variable.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Modifier added by `transform`.
    #[must_use]
    pub const fn lock_modifier(&self) -> Modifier {
        self.lock_modifier
    }

    fn guard(&self, state: ToggleState) -> Condition {
        Condition::variable_if(&self.variable, state.value())
    }

    fn assign(&self, state: ToggleState) -> Action {
        Action::set_variable(&self.variable, state.value())
    }

    /// Turns the toggle on when `trigger` is pressed while it is off.
    ///
    /// A second press while already on does not match this manipulator.
    #[must_use]
    pub fn enable(&self, trigger: KeyReference) -> Manipulator {
        Manipulator::new(trigger)
            .to(self.assign(ToggleState::On))
            .when(self.guard(ToggleState::Off))
    }

    /// Turns the toggle off when `trigger` is pressed while it is on.
    ///
    /// Effects run in order: clear the variable, re-send the trigger (if
    /// `pass_through`), then send the auxiliary key (if any).
    #[must_use]
    pub fn disable(&self, trigger: KeyReference, options: DisableOptions) -> Manipulator {
        let pass_through = options
            .pass_through
            .then(|| Action::Key(trigger.to_stroke()));

        let mut manipulator = Manipulator::new(trigger).to(self.assign(ToggleState::Off));

        if let Some(action) = pass_through {
            manipulator = manipulator.to(action);
        }

        if let Some(stroke) = options.auxiliary {
            manipulator = manipulator.to(Action::Key(stroke));
        }

        manipulator.when(self.guard(ToggleState::On))
    }

    /// Sends `target` with the lock modifier added while the toggle is on.
    ///
    /// Modifiers already on `target` are kept.
    #[must_use]
    pub fn transform(&self, trigger: KeyReference, target: KeyStroke) -> Manipulator {
        let mut modifiers = vec![self.lock_modifier];
        modifiers.extend(
            target
                .modifiers
                .into_iter()
                .filter(|m| *m != self.lock_modifier && *m != Modifier::Any),
        );

        let stroke = KeyStroke {
            key_code: target.key_code,
            modifiers,
        };

        Manipulator::new(trigger)
            .to(Action::Key(stroke))
            .when(self.guard(ToggleState::On))
    }

    /// Reads the toggle's state from the host store.
    pub fn state(&self, store: &impl VariableStore) -> ToggleState {
        if store.get(&self.variable) == ToggleState::On.value() {
            ToggleState::On
        } else {
            ToggleState::Off
        }
    }
}
