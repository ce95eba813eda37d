//! Actions a matched manipulator performs.

use crate::models::key::{KeyCode, KeyStroke};
use crate::models::modifier::Modifier;
use anyhow::Result;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// What an open action launches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenTarget {
    /// Application bundle by display name (e.g., "Google Chrome")
    Application(String),
    /// URI or filesystem path handed to `open`
    Uri(String),
}

impl OpenTarget {
    /// Shell command the host runs for this target.
    #[must_use]
    pub fn shell_command(&self) -> String {
        match self {
            Self::Application(name) => format!("open -a '{name}.app'"),
            Self::Uri(uri) => format!("open {uri}"),
        }
    }

    /// Human-readable label for manipulator descriptions.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Application(name) | Self::Uri(name) => name,
        }
    }
}

/// Terminal output of a matched rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send a key, optionally with modifiers held
    Key(KeyStroke),
    /// Write an integer to a host-managed named variable
    SetVariable {
        /// Variable name
        name: String,
        /// New value
        value: i64,
    },
    /// Launch an application or open a URI
    Open(OpenTarget),
}

impl Action {
    /// Sends `key` without modifiers.
    pub fn key(key: &str) -> Result<Self> {
        Ok(Self::Key(KeyStroke::new(key)?))
    }

    /// Sends `key` with `modifiers` held.
    pub fn key_with(key: &str, modifiers: impl IntoIterator<Item = Modifier>) -> Result<Self> {
        Ok(Self::Key(KeyStroke::with_modifiers(key, modifiers)?))
    }

    /// Sets variable `name` to `value`.
    pub fn set_variable(name: impl Into<String>, value: i64) -> Self {
        Self::SetVariable {
            name: name.into(),
            value,
        }
    }

    /// Opens the named application.
    pub fn open_app(name: impl Into<String>) -> Self {
        Self::Open(OpenTarget::Application(name.into()))
    }

    /// Opens a URI or path.
    pub fn open_uri(uri: impl Into<String>) -> Self {
        Self::Open(OpenTarget::Uri(uri.into()))
    }

    /// Variable this action writes, if any.
    #[must_use]
    pub fn written_variable(&self) -> Option<(&str, i64)> {
        match self {
            Self::SetVariable { name, value } => Some((name.as_str(), *value)),
            _ => None,
        }
    }

    /// Key this action sends, if any.
    #[must_use]
    pub fn key_code(&self) -> Option<&KeyCode> {
        match self {
            Self::Key(stroke) => Some(&stroke.key_code),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct VariableAssignment<'a> {
    name: &'a str,
    value: i64,
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Key(stroke) => stroke.serialize(serializer),
            Self::SetVariable { name, value } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(
                    "set_variable",
                    &VariableAssignment {
                        name,
                        value: *value,
                    },
                )?;
                map.end()
            }
            Self::Open(target) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("shell_command", &target.shell_command())?;
                map.end()
            }
        }
    }
}
