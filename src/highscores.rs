//! High score leaderboard
//!
//! The list is owned by the remote service; the game only displays it. After
//! every run the score is saved and the list refreshed. A failed round trip
//! is logged and the previous list stays on screen.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::net::{NetError, SaveScore, ScoreService};

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name as the service knows it
    pub name: String,
    /// Best score
    pub record: u32,
}

/// Displayed leaderboard, in service order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First row as returned by the service
    pub fn top(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Swap in a freshly fetched list
    pub fn replace(&mut self, entries: Vec<HighScoreEntry>) {
        self.entries = entries;
    }

    /// One `name: record` line per entry, for the leaderboard dialog
    pub fn listing(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.name, e.record))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Save a score, then fetch the updated leaderboard
pub async fn save_and_fetch<S: ScoreService>(
    service: &S,
    user_id: &str,
    record: u32,
) -> Result<Vec<HighScoreEntry>, NetError> {
    let body = SaveScore {
        user_id: user_id.to_string(),
        record,
    };
    service.save_score(&body).await?;
    service.fetch_highscores().await
}

/// Submit a finished run. On success the board is replaced with the
/// service's list; on failure the error is logged and the board is left as
/// it was. Never retried. Returns whether the board was refreshed.
///
/// The board is only borrowed after the network calls finish, so it can be
/// shared with the game loop while the submission is in flight.
pub async fn submit_score<S: ScoreService>(
    service: &S,
    board: &RefCell<HighScores>,
    user_id: &str,
    record: u32,
) -> bool {
    match save_and_fetch(service, user_id, record).await {
        Ok(entries) => {
            log::info!("Score {} saved, {} high scores loaded", record, entries.len());
            board.borrow_mut().replace(entries);
            true
        }
        Err(e) => {
            log::error!("Failed to save score {}: {}", record, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// In-memory service; `fail_save`/`fail_fetch` simulate rejections
    #[derive(Default)]
    struct MockService {
        fail_save: bool,
        fail_fetch: bool,
        saved: RefCell<Vec<SaveScore>>,
        fetches: Cell<u32>,
        board: Vec<HighScoreEntry>,
    }

    impl ScoreService for MockService {
        async fn save_score(&self, body: &SaveScore) -> Result<(), NetError> {
            if self.fail_save {
                return Err(NetError::Transport("connection refused".into()));
            }
            self.saved.borrow_mut().push(body.clone());
            Ok(())
        }

        async fn fetch_highscores(&self) -> Result<Vec<HighScoreEntry>, NetError> {
            self.fetches.set(self.fetches.get() + 1);
            if self.fail_fetch {
                return Err(NetError::Status(500));
            }
            Ok(self.board.clone())
        }
    }

    fn entry(name: &str, record: u32) -> HighScoreEntry {
        HighScoreEntry {
            name: name.to_string(),
            record,
        }
    }

    fn previous_board() -> RefCell<HighScores> {
        let mut board = HighScores::new();
        board.replace(vec![entry("old", 5)]);
        RefCell::new(board)
    }

    #[test]
    fn test_submit_refreshes_board() {
        let service = MockService {
            board: vec![entry("ann", 12), entry("me", 9)],
            ..Default::default()
        };
        let board = previous_board();

        let refreshed = pollster::block_on(submit_score(&service, &board, "user-1", 9));

        assert!(refreshed);
        assert_eq!(
            service.saved.borrow().as_slice(),
            &[SaveScore {
                user_id: "user-1".into(),
                record: 9
            }]
        );
        assert_eq!(board.borrow().entries(), &[entry("ann", 12), entry("me", 9)]);
    }

    #[test]
    fn test_save_failure_keeps_board() {
        let service = MockService {
            fail_save: true,
            board: vec![entry("new", 99)],
            ..Default::default()
        };
        let board = previous_board();

        let refreshed = pollster::block_on(submit_score(&service, &board, "user-1", 3));

        assert!(!refreshed);
        assert_eq!(board.borrow().entries(), &[entry("old", 5)]);
        // Save failed, so no refresh was attempted
        assert_eq!(service.fetches.get(), 0);
    }

    #[test]
    fn test_fetch_failure_keeps_board() {
        let service = MockService {
            fail_fetch: true,
            ..Default::default()
        };
        let board = previous_board();

        let refreshed = pollster::block_on(submit_score(&service, &board, "user-1", 3));

        assert!(!refreshed);
        assert_eq!(board.borrow().entries(), &[entry("old", 5)]);
        assert_eq!(service.saved.borrow().len(), 1);
    }

    #[test]
    fn test_save_and_fetch_surfaces_error() {
        let service = MockService {
            fail_fetch: true,
            ..Default::default()
        };
        let result = pollster::block_on(save_and_fetch(&service, "u", 1));
        assert_eq!(result, Err(NetError::Status(500)));
    }

    #[test]
    fn test_listing_format() {
        let mut board = HighScores::new();
        assert_eq!(board.listing(), "");
        board.replace(vec![entry("ann", 12), entry("bob", 3)]);
        assert_eq!(board.listing(), "ann: 12\nbob: 3");
        assert_eq!(board.top(), Some(&entry("ann", 12)));
        assert_eq!(board.len(), 2);
    }
}
