//! Evaluation of generated rules against key events.
//!
//! Mirrors the host's model: for each event, groups and manipulators are
//! tried top to bottom, the first manipulator whose trigger matches and
//! whose conditions all hold fires, and its variable writes go to the
//! injected [`VariableStore`]. Nothing here touches real input devices; it
//! exists to check what a rule set does before it is written.

use crate::models::{Action, Condition, KeyCode, Manipulator, Modifier, RuleGroup};
use crate::variables::VariableStore;
use anyhow::Result;

/// A physical key press with the modifiers held at the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Pressed key
    pub key: KeyCode,
    /// Held modifiers
    pub held: Vec<Modifier>,
}

impl KeyEvent {
    /// A press of `key` with no modifiers held.
    pub fn new(key: &str) -> Result<Self> {
        Ok(Self {
            key: KeyCode::new(key)?,
            held: Vec::new(),
        })
    }

    /// Adds a held modifier.
    #[must_use]
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.held.push(modifier);
        self
    }
}

/// A manipulator that matched an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<'a> {
    /// Description of the group the manipulator belongs to
    pub group: &'a str,
    /// Index of the manipulator within the group
    pub index: usize,
    /// The manipulator itself
    pub manipulator: &'a Manipulator,
}

impl Fired<'_> {
    /// Actions the press emitted, in order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.manipulator.to
    }
}

/// Sequential first-match evaluator over an ordered group list.
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'a> {
    groups: &'a [RuleGroup],
}

impl<'a> Simulator<'a> {
    /// Creates a simulator over `groups`.
    #[must_use]
    pub const fn new(groups: &'a [RuleGroup]) -> Self {
        Self { groups }
    }

    /// Finds the manipulator that would fire for `event` without applying it.
    pub fn lookup(&self, event: &KeyEvent, store: &impl VariableStore) -> Option<Fired<'a>> {
        self.groups.iter().find_map(|group| {
            group
                .manipulators
                .iter()
                .enumerate()
                .find(|(_, m)| {
                    m.from.matches(&event.key, &event.held)
                        && m.conditions.iter().all(|c| condition_holds(c, store))
                })
                .map(|(index, manipulator)| Fired {
                    group: &group.description,
                    index,
                    manipulator,
                })
        })
    }

    /// Presses `event`: fires the first match and applies its `to` writes.
    ///
    /// Returns `None` when no manipulator matched and the key passes through.
    pub fn press(&self, event: &KeyEvent, store: &mut impl VariableStore) -> Option<Fired<'a>> {
        let fired = self.lookup(event, &*store)?;
        apply(fired.manipulator.to.iter(), store);
        Some(fired)
    }

    /// Releases the key behind `fired`, applying its key-up writes.
    pub fn release(&self, fired: &Fired<'a>, store: &mut impl VariableStore) {
        apply(fired.manipulator.to_after_key_up.iter(), store);
    }

    /// Presses and releases `event` with no other key in between.
    ///
    /// Returns every emitted action: press effects, then lone-press effects.
    pub fn tap(&self, event: &KeyEvent, store: &mut impl VariableStore) -> Vec<Action> {
        let Some(fired) = self.press(event, store) else {
            return Vec::new();
        };

        let mut emitted = fired.manipulator.to.clone();
        apply(fired.manipulator.to_if_alone.iter(), store);
        emitted.extend(fired.manipulator.to_if_alone.iter().cloned());
        self.release(&fired, store);
        emitted
    }
}

fn condition_holds(condition: &Condition, store: &impl VariableStore) -> bool {
    match condition {
        Condition::VariableIf { name, value } => store.get(name) == *value,
    }
}

fn apply<'x>(actions: impl Iterator<Item = &'x Action>, store: &mut impl VariableStore) {
    for (name, value) in actions.filter_map(Action::written_variable) {
        store.set(name, value);
    }
}
