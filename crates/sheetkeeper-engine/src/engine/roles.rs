//! Logical column roles and the "important cell" test.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cell_ref::CellRef;

/// A column with bookkeeping meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Last-modified timestamp, background faded by age.
    Date,
    Priority,
    Status,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Date, Role::Priority, Role::Status];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Date => "date",
            Role::Priority => "priority",
            Role::Status => "status",
        };
        f.write_str(name)
    }
}

fn default_date() -> usize {
    9
}

fn default_priority() -> usize {
    7
}

fn default_status() -> usize {
    3
}

/// Fixed mapping from role to 1-based column index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnRoles {
    #[serde(default = "default_date")]
    pub date: usize,
    #[serde(default = "default_priority")]
    pub priority: usize,
    #[serde(default = "default_status")]
    pub status: usize,
}

impl Default for ColumnRoles {
    fn default() -> Self {
        ColumnRoles {
            date: default_date(),
            priority: default_priority(),
            status: default_status(),
        }
    }
}

impl ColumnRoles {
    pub fn column(&self, role: Role) -> usize {
        match role {
            Role::Date => self.date,
            Role::Priority => self.priority,
            Role::Status => self.status,
        }
    }

    /// The role mapped to `col`, if any.
    pub fn role_of(&self, col: usize) -> Option<Role> {
        Role::ALL.into_iter().find(|&role| self.column(role) == col)
    }

    /// A cell is important when it sits below the header row in a role-mapped column.
    pub fn is_important(&self, cell: &CellRef) -> bool {
        !cell.is_header() && self.role_of(cell.col).is_some()
    }

    /// The first pair of roles sharing a column, if any.
    pub fn duplicate(&self) -> Option<(Role, Role)> {
        for (i, &a) in Role::ALL.iter().enumerate() {
            for &b in &Role::ALL[i + 1..] {
                if self.column(a) == self.column(b) {
                    return Some((a, b));
                }
            }
        }
        None
    }
}
