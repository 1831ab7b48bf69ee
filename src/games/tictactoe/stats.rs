//! Scoreboard derived from the game history.

use derive_getters::Getters;
use tracing::instrument;

use super::session::Session;
use super::types::{GameStatus, Player};

/// Win count for one player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct PlayerWithStats {
    /// The player.
    player: Player,
    /// Completed games this player won.
    wins: u32,
}

/// Wins per player and ties across completed history games.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Stats {
    /// One entry per seat, player 1 first.
    player_with_stats: [PlayerWithStats; 2],
    /// Completed games with no winner.
    ties: u32,
}

impl Stats {
    /// Aggregates the session's history.
    ///
    /// Only games moved into history by a new round are counted; the
    /// current game is excluded whether or not it is finished, so clearing
    /// it never changes the scoreboard.
    #[instrument(skip(session), fields(history = session.history().len()))]
    pub fn from_session(session: &Session) -> Self {
        let [p1, p2] = session.players();
        let mut wins = [0u32; 2];
        let mut ties = 0u32;

        for game in session.history() {
            match game.status() {
                GameStatus::Won(winner) if winner.same_seat(p1) => wins[0] += 1,
                GameStatus::Won(_) => wins[1] += 1,
                GameStatus::Tie => ties += 1,
                GameStatus::InProgress => {}
            }
        }

        let [w1, w2] = wins;
        Self {
            player_with_stats: [
                PlayerWithStats::new(p1.clone(), w1),
                PlayerWithStats::new(p2.clone(), w2),
            ],
            ties,
        }
    }

    /// Total games counted.
    pub fn completed_games(&self) -> u32 {
        let [a, b] = &self.player_with_stats;
        a.wins + b.wins + self.ties
    }
}
