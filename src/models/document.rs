//! Top-level document envelope read by the host application.

use crate::constants::DEFAULT_PROFILE_NAME;
use crate::models::rule::RuleGroup;
use serde::Serialize;

/// Host-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobalSettings {
    /// Whether the host shows its menu bar icon
    pub show_in_menu_bar: bool,
}

/// Rule container inside a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplexModifications {
    /// Rule groups in evaluation order
    pub rules: Vec<RuleGroup>,
}

/// A named host profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    /// Profile name
    pub name: String,
    /// Rules for this profile
    pub complex_modifications: ComplexModifications,
}

/// The complete generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Global settings
    pub global: GlobalSettings,
    /// Profiles; the generator writes exactly one
    pub profiles: Vec<Profile>,
}

impl Document {
    /// Wraps `rules` in a single profile named `profile_name`.
    pub fn new(profile_name: impl Into<String>, rules: Vec<RuleGroup>) -> Self {
        Self {
            global: GlobalSettings {
                show_in_menu_bar: false,
            },
            profiles: vec![Profile {
                name: profile_name.into(),
                complex_modifications: ComplexModifications { rules },
            }],
        }
    }

    /// Wraps `rules` in the default profile.
    #[must_use]
    pub fn with_default_profile(rules: Vec<RuleGroup>) -> Self {
        Self::new(DEFAULT_PROFILE_NAME, rules)
    }

    /// Rule groups of the first profile.
    #[must_use]
    pub fn rules(&self) -> &[RuleGroup] {
        self.profiles
            .first()
            .map(|p| p.complex_modifications.rules.as_slice())
            .unwrap_or_default()
    }
}
