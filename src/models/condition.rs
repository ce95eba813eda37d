//! Guards evaluated against host-side named variables.

use serde::Serialize;

/// A manipulator guard. Conditions on one manipulator are AND-ed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Named variable equals a literal value
    VariableIf {
        /// Variable name
        name: String,
        /// Required value
        value: i64,
    },
}

impl Condition {
    /// Requires variable `name` to equal `value`.
    pub fn variable_if(name: impl Into<String>, value: i64) -> Self {
        Self::VariableIf {
            name: name.into(),
            value,
        }
    }

    /// Returns true if this guard and `other` can never hold at the same time.
    #[must_use]
    pub fn excludes(&self, other: &Self) -> bool {
        let (Self::VariableIf { name, value }, Self::VariableIf { name: o_name, value: o_value }) =
            (self, other);
        name == o_name && value != o_value
    }
}

/// Returns true if no variable assignment can satisfy both guard lists.
#[must_use]
pub fn mutually_exclusive(left: &[Condition], right: &[Condition]) -> bool {
    left.iter().any(|l| right.iter().any(|r| l.excludes(r)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_serialization() {
        let condition = Condition::variable_if("shiftlock", 1);
        assert_eq!(
            serde_json::to_string(&condition).unwrap(),
            r#"{"type":"variable_if","name":"shiftlock","value":1}"#
        );
    }

    #[test]
    fn test_mutually_exclusive_on_differing_values() {
        let off = [Condition::variable_if("shiftlock", 0)];
        let on = [Condition::variable_if("shiftlock", 1)];
        assert!(mutually_exclusive(&off, &on));
    }

    #[test]
    fn test_not_exclusive_across_variables() {
        let a = [Condition::variable_if("shiftlock", 0)];
        let b = [Condition::variable_if("hyper", 1)];
        assert!(!mutually_exclusive(&a, &b));
        assert!(!mutually_exclusive(&a, &[]));
    }
}
