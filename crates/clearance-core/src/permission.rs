//! Permission vocabulary
//!
//! A permission key pairs an action with a classification level. The
//! canonical vocabulary is the full cross-product of [`PermissionAction`] and
//! [`ClassificationLevel`]; nothing outside it can be represented as a
//! [`PermissionKey`], so raw submissions are validated by parsing.
//!
//! ```text
//! read_0  write_0  read_1  write_1  read_2  write_2  read_3  write_3
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ClassificationLevel, ClearanceError};

/// Action a grant authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    /// View a resource
    Read,
    /// Create or modify a resource
    Write,
}

impl PermissionAction {
    /// Both actions, in canonical order
    pub const ALL: [PermissionAction; 2] = [PermissionAction::Read, PermissionAction::Write];

    /// Lowercase name used in permission keys
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionAction {
    type Err = ClearanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            _ => Err(ClearanceError::invalid(format!("Unknown action: {s}"))),
        }
    }
}

/// An (action, level) pair from the canonical vocabulary
///
/// Orders by level first, then action, which is the order grants are
/// listed in and returned from grant-set replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionKey {
    /// Authorized action
    pub action: PermissionAction,
    /// Level the action is authorized at
    pub level: ClassificationLevel,
}

impl PermissionKey {
    /// The canonical vocabulary: every action at every level
    pub const ALL: [PermissionKey; 8] = [
        PermissionKey::read(ClassificationLevel::Unclassified),
        PermissionKey::write(ClassificationLevel::Unclassified),
        PermissionKey::read(ClassificationLevel::Confidential),
        PermissionKey::write(ClassificationLevel::Confidential),
        PermissionKey::read(ClassificationLevel::Secret),
        PermissionKey::write(ClassificationLevel::Secret),
        PermissionKey::read(ClassificationLevel::TopSecret),
        PermissionKey::write(ClassificationLevel::TopSecret),
    ];

    /// Create a key
    pub const fn new(action: PermissionAction, level: ClassificationLevel) -> Self {
        Self { action, level }
    }

    /// Read permission at `level`
    pub const fn read(level: ClassificationLevel) -> Self {
        Self::new(PermissionAction::Read, level)
    }

    /// Write permission at `level`
    pub const fn write(level: ClassificationLevel) -> Self {
        Self::new(PermissionAction::Write, level)
    }

    /// Both actions at every level up to and including `ceiling`
    pub fn all_at_or_below(ceiling: ClassificationLevel) -> impl Iterator<Item = PermissionKey> {
        Self::ALL.into_iter().filter(move |key| key.level <= ceiling)
    }

    /// Label for permission editors, e.g. "Read Top Secret"
    pub fn label(&self) -> String {
        let verb = match self.action {
            PermissionAction::Read => "Read",
            PermissionAction::Write => "Write",
        };
        format!("{verb} {}", self.level.label())
    }
}

impl Ord for PermissionKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.level, self.action).cmp(&(other.level, other.action))
    }
}

impl PartialOrd for PermissionKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.action, self.level.ordinal())
    }
}

impl FromStr for PermissionKey {
    type Err = ClearanceError;

    /// Parses the canonical `<action>_<ordinal>` form only. Anything else,
    /// including levels outside 0..=3, is an invalid permission.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (action, level) = s
            .split_once('_')
            .ok_or_else(|| ClearanceError::invalid_permission(s))?;

        let action = match action {
            "read" => PermissionAction::Read,
            "write" => PermissionAction::Write,
            _ => return Err(ClearanceError::invalid_permission(s)),
        };

        // The suffix must be exactly one canonical digit.
        let level = match level {
            "0" => ClassificationLevel::Unclassified,
            "1" => ClassificationLevel::Confidential,
            "2" => ClassificationLevel::Secret,
            "3" => ClassificationLevel::TopSecret,
            _ => return Err(ClearanceError::invalid_permission(s)),
        };

        Ok(Self::new(action, level))
    }
}

impl From<PermissionKey> for String {
    fn from(key: PermissionKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for PermissionKey {
    type Error = ClearanceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
