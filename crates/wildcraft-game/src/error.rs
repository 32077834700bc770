//! Error types for registry loading and world setup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown species: {0}")]
    UnknownSpecies(String),

    #[error("unknown resource node type: {0}")]
    UnknownNodeType(String),

    #[error("duplicate registry id: {0}")]
    DuplicateId(String),

    #[error("drop chance {chance} for {item} on {owner} is outside [0, 1]")]
    InvalidDropChance {
        owner: String,
        item: String,
        chance: f32,
    },

    #[error("invalid value for {field} on {owner}: {value}")]
    InvalidStat {
        owner: String,
        field: &'static str,
        value: f32,
    },

    #[error("invalid registry JSON: {0}")]
    Json(#[from] serde_json::Error),
}
