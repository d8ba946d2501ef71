use serde::{Deserialize, Serialize};

/// A persistent ability container accumulating essence, mutations, and
/// learned abilities.
///
/// `mutations` and `abilities` are append-only within a session; fusion
/// results are absorbed via the core-update rule in `core::fusion`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Core {
    pub name: String,
    pub essence: u32,
    pub tier: u32,
    pub mutations: Vec<String>,
    pub abilities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_ron_round_trip() {
        let core = Core {
            name: "Void Core".to_string(),
            essence: 50,
            tier: 1,
            mutations: vec![],
            abilities: vec!["Shadow Touch".to_string()],
        };
        let serialized = ron::to_string(&core).unwrap();
        let deserialized: Core = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized.name, "Void Core");
        assert_eq!(deserialized.essence, 50);
        assert_eq!(deserialized.abilities, vec!["Shadow Touch".to_string()]);
    }
}
