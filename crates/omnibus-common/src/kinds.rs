//! The six catalog entity kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A franchise character (hero, villain, supporting cast).
    Character,
    /// A team of characters.
    Team,
    /// A comic issue or volume.
    Comic,
    /// A feature film.
    Movie,
    /// A television show.
    Show,
    /// A writer, artist, or other credited creator.
    Creator,
}

impl EntityKind {
    /// Every kind, in catalog order.
    pub const ALL: [EntityKind; 6] = [
        Self::Character,
        Self::Team,
        Self::Comic,
        Self::Movie,
        Self::Show,
        Self::Creator,
    ];
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Team => write!(f, "team"),
            Self::Comic => write!(f, "comic"),
            Self::Movie => write!(f, "movie"),
            Self::Show => write!(f, "show"),
            Self::Creator => write!(f, "creator"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "character" => Ok(Self::Character),
            "team" => Ok(Self::Team),
            "comic" => Ok(Self::Comic),
            "movie" => Ok(Self::Movie),
            "show" => Ok(Self::Show),
            "creator" => Ok(Self::Creator),
            other => Err(format!("Unknown entity kind: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        for kind in EntityKind::ALL {
            let parsed: EntityKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Character".parse::<EntityKind>().unwrap(), EntityKind::Character);
        assert_eq!("MOVIE".parse::<EntityKind>().unwrap(), EntityKind::Movie);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("villain".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&EntityKind::Show).unwrap();
        assert_eq!(json, "\"show\"");
        let kind: EntityKind = serde_json::from_str("\"creator\"").unwrap();
        assert_eq!(kind, EntityKind::Creator);
    }
}
