//! Entity ID type (domain.object_id)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for invalid entity IDs
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityIdError {
    #[error("entity_id '{0}' must be of the form domain.object_id")]
    InvalidFormat(String),

    #[error("entity_id '{0}' contains invalid characters (lowercase alphanumeric and '_' only)")]
    InvalidChars(String),
}

/// An entity ID such as `camera.front_door` or `alarm_control_panel.home`.
///
/// Stored as the full string with the position of the separator, so domain
/// and object_id are cheap slices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    full: String,
    dot: usize,
}

impl EntityId {
    /// Build an entity ID from its two parts
    pub fn new(domain: &str, object_id: &str) -> Result<Self, EntityIdError> {
        format!("{domain}.{object_id}").parse()
    }

    /// The domain part (`camera` in `camera.front_door`)
    pub fn domain(&self) -> &str {
        &self.full[..self.dot]
    }

    /// The object_id part (`front_door` in `camera.front_door`)
    pub fn object_id(&self) -> &str {
        &self.full[self.dot + 1..]
    }

    /// The full `domain.object_id` string
    pub fn as_str(&self) -> &str {
        &self.full
    }

    fn part_is_valid(part: &str) -> bool {
        !part.is_empty()
            && !part.starts_with('_')
            && !part.ends_with('_')
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dot = match s.find('.') {
            Some(i) if s[i + 1..].contains('.') => {
                return Err(EntityIdError::InvalidFormat(s.to_string()))
            }
            Some(i) => i,
            None => return Err(EntityIdError::InvalidFormat(s.to_string())),
        };
        if !Self::part_is_valid(&s[..dot]) || !Self::part_is_valid(&s[dot + 1..]) {
            return Err(EntityIdError::InvalidChars(s.to_string()));
        }
        Ok(Self {
            full: s.to_string(),
            dot,
        })
    }
}

impl TryFrom<String> for EntityId {
    type Error = EntityIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> String {
        id.full
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}
