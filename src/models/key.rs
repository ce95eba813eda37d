//! Key identifiers, trigger references, and emitted key strokes.

use crate::models::modifier::{Modifier, ModifierSet};
use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Host key identifier (e.g., "spacebar", "left_arrow", "1").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(String);

fn key_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9_]+$").expect("static key code pattern"))
}

impl KeyCode {
    /// Creates a key code, rejecting identifiers the host cannot name.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or contains anything
    /// other than lowercase letters, digits, and underscores.
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Validates a raw key identifier.
    pub fn validate(code: &str) -> Result<()> {
        if code.is_empty() {
            anyhow::bail!("Key code cannot be empty");
        }

        if !key_code_pattern().is_match(code) {
            anyhow::bail!(
                "Key code '{code}' must be lowercase letters, digits, and underscores only"
            );
        }

        Ok(())
    }

    /// Returns true if this identifier is well formed.
    ///
    /// Deserialized codes bypass [`KeyCode::new`], so the validator re-checks them.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        Self::validate(&self.0).is_ok()
    }

    /// Returns the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trigger side of a manipulator: a key plus the modifiers it must be pressed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyReference {
    /// Physical key
    pub key_code: KeyCode,
    /// Modifier requirements; omitted when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<ModifierSet>,
}

impl KeyReference {
    /// Creates a reference that matches only a bare press of `key`.
    pub fn new(key: &str) -> Result<Self> {
        Ok(Self {
            key_code: KeyCode::new(key)?,
            modifiers: None,
        })
    }

    /// Creates a reference requiring the given modifiers.
    pub fn with_mandatory(
        key: &str,
        mandatory: impl IntoIterator<Item = Modifier>,
    ) -> Result<Self> {
        Ok(Self {
            key_code: KeyCode::new(key)?,
            modifiers: Some(ModifierSet::mandatory(mandatory)),
        })
    }

    /// Creates a reference that fires regardless of held modifiers.
    pub fn any_modifiers(key: &str) -> Result<Self> {
        Ok(Self {
            key_code: KeyCode::new(key)?,
            modifiers: Some(ModifierSet::any()),
        })
    }

    /// Adds the `any` wildcard to this reference's optional modifiers.
    #[must_use]
    pub fn with_any(mut self) -> Self {
        self.modifiers = Some(self.modifiers.unwrap_or_default().with_any());
        self
    }

    /// Mandatory modifiers, wildcard stripped.
    #[must_use]
    pub fn mandatory_modifiers(&self) -> Vec<Modifier> {
        self.modifiers
            .as_ref()
            .map(ModifierSet::mandatory_without_wildcard)
            .unwrap_or_default()
    }

    /// Returns true if a press of `key` with `held` modifiers matches.
    #[must_use]
    pub fn matches(&self, key: &KeyCode, held: &[Modifier]) -> bool {
        if &self.key_code != key {
            return false;
        }

        match &self.modifiers {
            Some(set) => set.matches(held),
            None => held.is_empty(),
        }
    }

    /// Returns true if a single key press can match both references.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let bare = ModifierSet::default();
        self.key_code == other.key_code
            && self
                .modifiers
                .as_ref()
                .unwrap_or(&bare)
                .overlaps(other.modifiers.as_ref().unwrap_or(&bare))
    }

    /// Re-emits this trigger as an output stroke with its mandatory modifiers.
    #[must_use]
    pub fn to_stroke(&self) -> KeyStroke {
        KeyStroke {
            key_code: self.key_code.clone(),
            modifiers: self.mandatory_modifiers(),
        }
    }
}

impl fmt::Display for KeyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.mandatory_modifiers() {
            write!(f, "{modifier}+")?;
        }
        write!(f, "{}", self.key_code)
    }
}

/// An output key press with the modifiers held while it is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStroke {
    /// Key to send
    pub key_code: KeyCode,
    /// Modifiers held while sending; omitted when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

impl KeyStroke {
    /// Creates a stroke without modifiers.
    pub fn new(key: &str) -> Result<Self> {
        Ok(Self {
            key_code: KeyCode::new(key)?,
            modifiers: Vec::new(),
        })
    }

    /// Creates a stroke sent with the given modifiers.
    pub fn with_modifiers(
        key: &str,
        modifiers: impl IntoIterator<Item = Modifier>,
    ) -> Result<Self> {
        Ok(Self {
            key_code: KeyCode::new(key)?,
            modifiers: modifiers.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_accepts_host_identifiers() {
        assert!(KeyCode::new("spacebar").is_ok());
        assert!(KeyCode::new("delete_or_backspace").is_ok());
        assert!(KeyCode::new("1").is_ok());
    }

    #[test]
    fn test_key_code_rejects_malformed() {
        assert!(KeyCode::new("").is_err());
        assert!(KeyCode::new("Space Bar").is_err());
        assert!(KeyCode::new("KC_A").is_err());
    }

    #[test]
    fn test_reference_serialization_omits_empty_modifiers() {
        let from = KeyReference::new("escape").unwrap();
        assert_eq!(serde_json::to_string(&from).unwrap(), r#"{"key_code":"escape"}"#);
    }

    #[test]
    fn test_reference_with_mandatory_serialization() {
        let from = KeyReference::with_mandatory("spacebar", [Modifier::Control]).unwrap();
        assert_eq!(
            serde_json::to_string(&from).unwrap(),
            r#"{"key_code":"spacebar","modifiers":{"mandatory":["control"]}}"#
        );
    }

    #[test]
    fn test_bare_reference_matches_only_bare_press() {
        let from = KeyReference::new("escape").unwrap();
        let escape = KeyCode::new("escape").unwrap();
        assert!(from.matches(&escape, &[]));
        assert!(!from.matches(&escape, &[Modifier::Shift]));
    }

    #[test]
    fn test_to_stroke_strips_wildcard() {
        let from = KeyReference::with_mandatory("h", [Modifier::Command])
            .unwrap()
            .with_any();
        let stroke = from.to_stroke();
        assert_eq!(stroke.modifiers, vec![Modifier::Command]);
    }

    #[test]
    fn test_wildcard_trigger_overlaps_chord_on_same_key() {
        let chord = KeyReference::with_mandatory("spacebar", [Modifier::Control]).unwrap();
        let wildcard = KeyReference::any_modifiers("spacebar").unwrap();

        assert!(chord.overlaps(&wildcard));
        assert!(!chord.overlaps(&KeyReference::new("spacebar").unwrap()));
        assert!(!wildcard.overlaps(&KeyReference::any_modifiers("escape").unwrap()));
    }

    #[test]
    fn test_display_lists_modifiers() {
        let from = KeyReference::with_mandatory("g", [Modifier::Control]).unwrap();
        assert_eq!(from.to_string(), "control+g");
    }
}
