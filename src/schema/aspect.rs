use serde::{Deserialize, Serialize};
use std::fmt;

/// Elemental/thematic tag carried by an aspect.
///
/// The named variants are the types the synergy tables know about; anything
/// else round-trips through `Other` untouched. Serializes as a plain string
/// so game data can introduce new types without a schema change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AspectType {
    Fire,
    Lightning,
    Ice,
    Shadow,
    Poison,
    Other(String),
}

impl AspectType {
    pub fn name(&self) -> &str {
        match self {
            Self::Fire => "Fire",
            Self::Lightning => "Lightning",
            Self::Ice => "Ice",
            Self::Shadow => "Shadow",
            Self::Poison => "Poison",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&str> for AspectType {
    fn from(value: &str) -> Self {
        match value {
            "Fire" => Self::Fire,
            "Lightning" => Self::Lightning,
            "Ice" => Self::Ice,
            "Shadow" => Self::Shadow,
            "Poison" => Self::Poison,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for AspectType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<AspectType> for String {
    fn from(value: AspectType) -> Self {
        match value {
            AspectType::Other(name) => name,
            named => named.name().to_string(),
        }
    }
}

/// A selectable base ability with a power rating and elemental type.
///
/// Aspects are immutable once created; fusion consumes them from the
/// available pool without mutating them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aspect {
    pub id: String,
    pub name: String,
    pub power: u32,
    #[serde(rename = "type")]
    pub aspect_type: AspectType,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_type_round_trip() {
        assert_eq!(AspectType::from("Fire"), AspectType::Fire);
        assert_eq!(AspectType::from("Shadow"), AspectType::Shadow);
        assert_eq!(String::from(AspectType::Lightning), "Lightning");
    }

    #[test]
    fn aspect_type_unknown_preserved() {
        let ty = AspectType::from("Gravity");
        assert_eq!(ty, AspectType::Other("Gravity".to_string()));
        assert_eq!(String::from(ty), "Gravity");
    }

    #[test]
    fn aspect_type_display() {
        assert_eq!(AspectType::Ice.to_string(), "Ice");
        assert_eq!(AspectType::Other("Arcane".to_string()).to_string(), "Arcane");
    }

    #[test]
    fn aspect_serializes_type_as_string() {
        let aspect = Aspect {
            id: "1".to_string(),
            name: "Burning Blade".to_string(),
            power: 15,
            aspect_type: AspectType::Fire,
            description: "Inflicts burning damage".to_string(),
        };
        let serialized = ron::to_string(&aspect).unwrap();
        assert!(serialized.contains("\"Fire\""));

        let deserialized: Aspect = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized.aspect_type, AspectType::Fire);
        assert_eq!(deserialized.power, 15);
    }
}
