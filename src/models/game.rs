use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Global counters of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStatistics {
    pub game_nights: i64,
    pub units: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionAnswer {
    pub question_id: String,
    pub selected_answer_id: String,
    pub answered_correctly: bool,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameNightNotification {
    pub winner: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameNightResult {
    pub winner: String,
    pub units: u32,
    pub participants: Vec<String>,
    pub played_at: DateTime<Utc>,
}

/// Winner and units only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SimpleGameNightResult {
    pub winner: String,
    pub units: u32,
}
