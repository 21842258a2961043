use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub white: String,
    pub black: String,
    pub date: String,
    pub result: String, // "1-0", "0-1", "1/2-1/2" or "*"
}

impl Default for GameMetadata {
    fn default() -> Self {
        Self {
            white: "Unknown".to_string(),
            black: "Unknown".to_string(),
            date: "Unknown".to_string(),
            result: "*".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    pub metadata: GameMetadata,
    pub moves: Vec<String>, // SAN notation, play order
}
