//! Modifier keys and the mandatory/optional modifier sets used by triggers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A modifier key as named by the host application.
///
/// `Any` is the wildcard accepted only in the optional list of a
/// [`ModifierSet`]; it means "any additional modifiers may be held".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Either command key
    Command,
    /// Either control key
    Control,
    /// Either option key
    Option,
    /// Either shift key
    Shift,
    /// Left command key
    LeftCommand,
    /// Left control key
    LeftControl,
    /// Left option key
    LeftOption,
    /// Left shift key
    LeftShift,
    /// Right command key
    RightCommand,
    /// Right control key
    RightControl,
    /// Right option key
    RightOption,
    /// Right shift key
    RightShift,
    /// Function key
    Fn,
    /// Caps lock
    CapsLock,
    /// Wildcard: any combination of modifiers
    Any,
}

impl Modifier {
    /// Returns the host identifier for this modifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Control => "control",
            Self::Option => "option",
            Self::Shift => "shift",
            Self::LeftCommand => "left_command",
            Self::LeftControl => "left_control",
            Self::LeftOption => "left_option",
            Self::LeftShift => "left_shift",
            Self::RightCommand => "right_command",
            Self::RightControl => "right_control",
            Self::RightOption => "right_option",
            Self::RightShift => "right_shift",
            Self::Fn => "fn",
            Self::CapsLock => "caps_lock",
            Self::Any => "any",
        }
    }

    /// Returns true if `held` satisfies this modifier.
    ///
    /// The side-agnostic modifiers accept either the left or the right key.
    #[must_use]
    pub fn is_satisfied_by(self, held: Self) -> bool {
        match self {
            Self::Command => matches!(held, Self::Command | Self::LeftCommand | Self::RightCommand),
            Self::Control => matches!(held, Self::Control | Self::LeftControl | Self::RightControl),
            Self::Option => matches!(held, Self::Option | Self::LeftOption | Self::RightOption),
            Self::Shift => matches!(held, Self::Shift | Self::LeftShift | Self::RightShift),
            Self::Any => true,
            other => other == held,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier requirements of a trigger key.
///
/// A key press matches when every mandatory modifier is held and, unless the
/// optional list contains [`Modifier::Any`], nothing outside the two lists is
/// held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierSet {
    /// Modifiers that must be held
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mandatory: Vec<Modifier>,
    /// Modifiers that may be held without affecting the match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<Modifier>,
}

impl ModifierSet {
    /// Creates a set requiring exactly the given modifiers.
    #[must_use]
    pub fn mandatory(modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        Self {
            mandatory: modifiers.into_iter().collect(),
            optional: Vec::new(),
        }
    }

    /// Creates a set that ignores whatever modifiers are held.
    #[must_use]
    pub fn any() -> Self {
        Self {
            mandatory: Vec::new(),
            optional: vec![Modifier::Any],
        }
    }

    /// Adds the `any` wildcard to the optional list.
    #[must_use]
    pub fn with_any(mut self) -> Self {
        if !self.optional.contains(&Modifier::Any) {
            self.optional.push(Modifier::Any);
        }
        self
    }

    /// Returns true if the optional list carries the wildcard.
    #[must_use]
    pub fn allows_any(&self) -> bool {
        self.optional.contains(&Modifier::Any)
    }

    /// Returns true if both lists are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mandatory.is_empty() && self.optional.is_empty()
    }

    /// Mandatory modifiers with any wildcard marker removed.
    #[must_use]
    pub fn mandatory_without_wildcard(&self) -> Vec<Modifier> {
        self.mandatory
            .iter()
            .copied()
            .filter(|m| *m != Modifier::Any)
            .collect()
    }

    /// Checks the set's structural rules.
    ///
    /// Returns a message describing the first problem found.
    pub fn check(&self) -> Result<(), String> {
        if self.mandatory.contains(&Modifier::Any) {
            return Err("'any' is only allowed as an optional modifier".to_string());
        }

        if let Some(shared) = self.mandatory.iter().find(|m| self.optional.contains(m)) {
            return Err(format!(
                "modifier '{shared}' is listed as both mandatory and optional"
            ));
        }

        Ok(())
    }

    /// Returns true if a press with `held` modifiers satisfies this set.
    #[must_use]
    pub fn matches(&self, held: &[Modifier]) -> bool {
        let mandatory_held = self
            .mandatory
            .iter()
            .all(|required| held.iter().any(|h| required.is_satisfied_by(*h)));

        if !mandatory_held {
            return false;
        }

        if self.allows_any() {
            return true;
        }

        held.iter().all(|h| {
            self.mandatory
                .iter()
                .chain(self.optional.iter())
                .any(|allowed| allowed.is_satisfied_by(*h))
        })
    }

    /// Returns true if some combination of held modifiers satisfies both sets.
    ///
    /// Only modifiers named by either set need to be tried: an unnamed one
    /// never satisfies a mandatory entry and is at best allowed by a wildcard.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let mut named: Vec<Modifier> = Vec::new();
        for modifier in self
            .mandatory
            .iter()
            .chain(&self.optional)
            .chain(&other.mandatory)
            .chain(&other.optional)
        {
            if *modifier != Modifier::Any && !named.contains(modifier) {
                named.push(*modifier);
            }
        }

        (0..1u32 << named.len()).any(|mask| {
            let held: Vec<Modifier> = named
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, modifier)| *modifier)
                .collect();
            self.matches(&held) && other.matches(&held)
        })
    }
}
