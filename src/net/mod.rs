//! Remote high-score service
//!
//! Two calls against `{server_base}`:
//! - `POST /save_score` with `{ "userId": .., "record": .. }`
//! - `GET /highscores` returning `[{ "name": .., "record": .. }]`
//!
//! The browser build talks to it through `fetch`, native builds through a
//! blocking HTTP agent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::highscores::HighScoreEntry;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::HttpScoreService;
#[cfg(target_arch = "wasm32")]
pub use web::FetchScoreService;

/// Errors from the score service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetError {
    /// The request never produced a response (offline, CORS, DNS...)
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("server responded with status {0}")]
    Status(u16),

    /// Body could not be encoded or decoded
    #[error("invalid payload: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for NetError {
    fn from(e: serde_json::Error) -> Self {
        NetError::Payload(e.to_string())
    }
}

/// Body of `POST /save_score`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveScore {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub record: u32,
}

/// Client side of the high-score service
#[allow(async_fn_in_trait)]
pub trait ScoreService {
    /// Store a finished run's score for a user
    async fn save_score(&self, body: &SaveScore) -> Result<(), NetError>;

    /// Current leaderboard, in the order the service returns it
    async fn fetch_highscores(&self) -> Result<Vec<HighScoreEntry>, NetError>;
}

/// Join the server base and an endpoint name
pub fn endpoint(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_score_wire_format() {
        let body = SaveScore {
            user_id: "abc-123".to_string(),
            record: 7,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "userId": "abc-123", "record": 7 })
        );
    }

    #[test]
    fn test_highscores_wire_format() {
        let json = r#"[{"name":"ann","record":12},{"name":"bob","record":3}]"#;
        let entries: Vec<HighScoreEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "ann");
        assert_eq!(entries[1].record, 3);
    }

    #[test]
    fn test_bad_payload_maps_to_error() {
        let err: NetError = serde_json::from_str::<Vec<HighScoreEntry>>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, NetError::Payload(_)));
    }

    #[test]
    fn test_endpoint_join() {
        assert_eq!(
            endpoint("http://localhost:5000/api", "save_score"),
            "http://localhost:5000/api/save_score"
        );
        assert_eq!(
            endpoint("http://localhost:5000/api/", "highscores"),
            "http://localhost:5000/api/highscores"
        );
    }
}
