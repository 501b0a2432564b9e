//! Cross-column consistency implications.
//!
//! Two one-directional rules tie STATUS and PRIORITY together:
//!
//! - editing STATUS to the completed value forces PRIORITY to the default priority
//! - editing PRIORITY to the default priority forces STATUS to the completed value
//!
//! Only an edit to the antecedent column fires a rule, so a forced write never
//! triggers the paired rule.

use super::cell::CellValue;
use super::roles::Role;

/// `when` edited to `equals` implies `then` := `set`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Implication {
    pub when: Role,
    pub equals: String,
    pub then: Role,
    pub set: String,
}

impl Implication {
    /// Loose comparison on the displayed value, so a numeric 0 matches "0".
    pub fn matches(&self, value: &CellValue) -> bool {
        value.to_string() == self.equals
    }
}

/// The STATUS/PRIORITY pair for the given vocabulary.
pub fn consistency_rules(completed_status: &str, default_priority: &str) -> [Implication; 2] {
    [
        Implication {
            when: Role::Status,
            equals: completed_status.to_string(),
            then: Role::Priority,
            set: default_priority.to_string(),
        },
        Implication {
            when: Role::Priority,
            equals: default_priority.to_string(),
            then: Role::Status,
            set: completed_status.to_string(),
        },
    ]
}

/// The rule fired by an edit to a column holding `role`.
pub fn rule_for(rules: &[Implication], role: Role) -> Option<&Implication> {
    rules.iter().find(|rule| rule.when == role)
}
