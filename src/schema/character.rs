use serde::{Deserialize, Serialize};

/// The player character as the story engine sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub level: u32,
}
