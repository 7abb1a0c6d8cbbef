//! Classification levels
//!
//! A fixed, totally ordered enumeration. The ordinal is the wire and storage
//! form; labels and badge tones are presentation metadata that collaborators
//! share so every surface names a level the same way.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ClearanceError;

/// Sensitivity level attached to a resource, and the ceiling of a clearance
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum ClassificationLevel {
    /// Level 0
    #[default]
    Unclassified,
    /// Level 1
    Confidential,
    /// Level 2
    Secret,
    /// Level 3
    TopSecret,
}

impl ClassificationLevel {
    /// Every level, ascending
    pub const ALL: [ClassificationLevel; 4] = [
        ClassificationLevel::Unclassified,
        ClassificationLevel::Confidential,
        ClassificationLevel::Secret,
        ClassificationLevel::TopSecret,
    ];

    /// Highest level in the enumeration
    pub const MAX: ClassificationLevel = ClassificationLevel::TopSecret;

    /// Ordinal value (0..=3)
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Level for an ordinal, `None` outside 0..=3
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Unclassified),
            1 => Some(Self::Confidential),
            2 => Some(Self::Secret),
            3 => Some(Self::TopSecret),
            _ => None,
        }
    }

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unclassified => "Unclassified",
            Self::Confidential => "Confidential",
            Self::Secret => "Secret",
            Self::TopSecret => "Top Secret",
        }
    }

    /// Badge tone used by listing surfaces
    pub const fn tone(self) -> &'static str {
        match self {
            Self::Unclassified => "success",
            Self::Confidential => "info",
            Self::Secret => "warning",
            Self::TopSecret => "danger",
        }
    }

    /// Levels `0..=ceiling`, ascending
    pub fn up_to(ceiling: ClassificationLevel) -> impl Iterator<Item = ClassificationLevel> {
        Self::ALL.into_iter().filter(move |level| *level <= ceiling)
    }
}

impl fmt::Display for ClassificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<ClassificationLevel> for u8 {
    fn from(level: ClassificationLevel) -> Self {
        level.ordinal()
    }
}

impl TryFrom<u8> for ClassificationLevel {
    type Error = ClearanceError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(ordinal).ok_or_else(|| {
            ClearanceError::invalid(format!("Classification level out of range: {ordinal}"))
        })
    }
}

impl FromStr for ClassificationLevel {
    type Err = ClearanceError;

    /// Accepts the ordinal (`"2"`) or the name in any case, with spaces,
    /// dashes, or underscores between words (`"top secret"`, `"TOP_SECRET"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(ordinal) = trimmed.parse::<u8>() {
            return Self::try_from(ordinal);
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "unclassified" => Ok(Self::Unclassified),
            "confidential" => Ok(Self::Confidential),
            "secret" => Ok(Self::Secret),
            "topsecret" => Ok(Self::TopSecret),
            _ => Err(ClearanceError::invalid(format!(
                "Unknown classification level: {s}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_totally_ordered() {
        assert!(ClassificationLevel::Unclassified < ClassificationLevel::Confidential);
        assert!(ClassificationLevel::Confidential < ClassificationLevel::Secret);
        assert!(ClassificationLevel::Secret < ClassificationLevel::TopSecret);
    }

    #[test]
    fn ordinals_match_positions() {
        for (index, level) in ClassificationLevel::ALL.iter().enumerate() {
            assert_eq!(level.ordinal() as usize, index);
            assert_eq!(ClassificationLevel::from_ordinal(index as u8), Some(*level));
        }
        assert_eq!(ClassificationLevel::from_ordinal(4), None);
    }

    #[test]
    fn parses_names_and_ordinals() {
        assert_eq!(
            "top secret".parse::<ClassificationLevel>().unwrap(),
            ClassificationLevel::TopSecret
        );
        assert_eq!(
            "TOP_SECRET".parse::<ClassificationLevel>().unwrap(),
            ClassificationLevel::TopSecret
        );
        assert_eq!(
            "1".parse::<ClassificationLevel>().unwrap(),
            ClassificationLevel::Confidential
        );
        assert!("5".parse::<ClassificationLevel>().is_err());
        assert!("cosmic".parse::<ClassificationLevel>().is_err());
    }

    #[test]
    fn up_to_is_inclusive() {
        let levels: Vec<_> = ClassificationLevel::up_to(ClassificationLevel::Confidential).collect();
        assert_eq!(
            levels,
            vec![
                ClassificationLevel::Unclassified,
                ClassificationLevel::Confidential
            ]
        );
    }

    #[test]
    fn serializes_as_ordinal() {
        let json = serde_json::to_string(&ClassificationLevel::Secret).unwrap();
        assert_eq!(json, "2");
        let parsed: ClassificationLevel = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, ClassificationLevel::TopSecret);
        assert!(serde_json::from_str::<ClassificationLevel>("9").is_err());
    }

    #[test]
    fn labels_and_tones() {
        assert_eq!(ClassificationLevel::TopSecret.label(), "Top Secret");
        assert_eq!(ClassificationLevel::TopSecret.tone(), "danger");
        assert_eq!(ClassificationLevel::Unclassified.to_string(), "Unclassified");
    }
}
