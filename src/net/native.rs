//! Blocking HTTP transport for native builds

use super::{NetError, SaveScore, ScoreService, endpoint};
use crate::highscores::HighScoreEntry;

impl From<ureq::Error> for NetError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => NetError::Status(code),
            ureq::Error::Transport(t) => NetError::Transport(t.to_string()),
        }
    }
}

/// Score service reached through a `ureq` agent. Calls block the current
/// thread; the futures complete on first poll.
#[derive(Clone)]
pub struct HttpScoreService {
    base: String,
    agent: ureq::Agent,
}

impl HttpScoreService {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            agent: ureq::AgentBuilder::new()
                .user_agent("flappy-bird")
                .build(),
        }
    }
}

impl ScoreService for HttpScoreService {
    async fn save_score(&self, body: &SaveScore) -> Result<(), NetError> {
        self.agent
            .post(&endpoint(&self.base, "save_score"))
            .send_json(body)?;
        Ok(())
    }

    async fn fetch_highscores(&self) -> Result<Vec<HighScoreEntry>, NetError> {
        self.agent
            .get(&endpoint(&self.base, "highscores"))
            .call()?
            .into_json()
            .map_err(|e| NetError::Payload(e.to_string()))
    }
}
