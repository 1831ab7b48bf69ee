//! The persisted session: both players plus every game played.
//!
//! On disk the session is `{players: [p1, p2], games: [...]}` with the
//! current game last. In memory the current game is held apart from the
//! history so it always exists.

use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::position::SquareSet;
use super::rules;
use super::types::{Game, Player};

/// Stored record is structurally invalid.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Invalid session record: {}", message)]
pub struct SessionError {
    /// What was wrong.
    pub message: String,
}

impl SessionError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::error::Error for SessionError {}

/// Wire shape of the session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    players: [Player; 2],
    games: Vec<Game>,
}

/// Players plus the ordered games (history, then current).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(try_from = "SessionRecord", into = "SessionRecord")]
pub struct Session {
    /// Player 1 and player 2, in seat order.
    players: [Player; 2],
    /// Games before the current one, oldest first.
    history: Vec<Game>,
    /// The game being played.
    current: Game,
}

impl Session {
    /// A fresh session: no history and one empty game with player 1 to move.
    #[instrument(skip(players))]
    pub fn new(players: [Player; 2]) -> Self {
        let [first, _] = &players;
        let current = Game::new(first.clone());
        Self {
            players,
            history: Vec::new(),
            current,
        }
    }

    /// Player 1.
    pub fn first_player(&self) -> &Player {
        let [first, _] = &self.players;
        first
    }

    /// The seat opposite `player`.
    pub fn opponent_of(&self, player: &Player) -> &Player {
        let [p1, p2] = &self.players;
        if p1.same_seat(player) { p2 } else { p1 }
    }

    /// All games, oldest first, current last.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.history.iter().chain(std::iter::once(&self.current))
    }

    /// Number of games including the current one.
    pub fn game_count(&self) -> usize {
        self.history.len() + 1
    }

    pub(crate) fn current_mut(&mut self) -> &mut Game {
        &mut self.current
    }

    /// Moves the current game into history and starts an empty one.
    pub(crate) fn start_new_game(&mut self) {
        let next = Game::new(self.first_player().clone());
        let finished = std::mem::replace(&mut self.current, next);
        self.history.push(finished);
    }

    /// Checks the invariants every reachable session satisfies.
    #[instrument(skip(self), fields(games = self.game_count()))]
    pub fn validate(&self) -> Result<(), SessionError> {
        let [p1, p2] = &self.players;
        if *p1.id() != 1 || *p2.id() != 2 {
            return Err(SessionError::new(format!(
                "player ids must be 1 and 2, found {} and {}",
                p1.id(),
                p2.id()
            )));
        }
        for (idx, game) in self.games().enumerate() {
            self.validate_game(game)
                .map_err(|e| SessionError::new(format!("game {idx}: {}", e.message)))?;
        }
        Ok(())
    }

    fn validate_game(&self, game: &Game) -> Result<(), SessionError> {
        let moves = game.moves();
        if moves.len() > 9 {
            return Err(SessionError::new(format!("{} moves", moves.len())));
        }

        let mut claimed = SquareSet::new();
        let mut expected = self.first_player();
        for (turn, m) in moves.iter().enumerate() {
            if !claimed.insert(*m.square_id()) {
                return Err(SessionError::new(format!(
                    "square {} claimed twice",
                    m.square_id().square_id()
                )));
            }
            if *m.player() != *expected {
                return Err(SessionError::new(format!(
                    "move {turn} played by {} out of turn",
                    m.player().name()
                )));
            }
            if turn + 1 < moves.len() && rules::evaluate(&moves[..=turn]).is_complete() {
                return Err(SessionError::new(format!("move after completion at {turn}")));
            }
            expected = self.opponent_of(expected);
        }

        if *game.current_player() != *expected {
            return Err(SessionError::new(format!(
                "current player {} does not match move count",
                game.current_player().name()
            )));
        }
        Ok(())
    }
}

impl TryFrom<SessionRecord> for Session {
    type Error = SessionError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let SessionRecord { players, mut games } = record;
        let current = games
            .pop()
            .ok_or_else(|| SessionError::new("no games"))?;
        let session = Session {
            players,
            history: games,
            current,
        };
        session.validate()?;
        Ok(session)
    }
}

impl From<Session> for SessionRecord {
    fn from(session: Session) -> Self {
        let Session {
            players,
            mut history,
            current,
        } = session;
        history.push(current);
        SessionRecord {
            players,
            games: history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Position;

    fn fresh() -> Session {
        Session::new(Player::defaults())
    }

    fn play(session: &mut Session, pos: Position) {
        let next = session.opponent_of(session.current().current_player()).clone();
        session.current_mut().push_move(pos, next);
    }

    #[test]
    fn test_fresh_session_has_one_empty_game() {
        let session = fresh();
        assert_eq!(session.game_count(), 1);
        assert!(session.current().moves().is_empty());
        assert_eq!(session.current().current_player(), session.first_player());
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_wire_format_uses_camel_case_and_flat_games() {
        let mut session = fresh();
        play(&mut session, Position::Center);
        let value = serde_json::to_value(&session).unwrap();

        assert_eq!(value["players"][0]["iconClass"], "fa-x");
        assert_eq!(value["players"][1]["colorClass"], "yellow");
        assert_eq!(value["games"].as_array().unwrap().len(), 1);
        assert_eq!(value["games"][0]["moves"][0]["squareId"], 4);
        assert_eq!(value["games"][0]["moves"][0]["player"]["id"], 1);
        assert_eq!(value["games"][0]["currentPlayer"]["id"], 2);
    }

    #[test]
    fn test_history_round_trips_in_order() {
        let mut session = fresh();
        play(&mut session, Position::TopLeft);
        session.start_new_game();
        play(&mut session, Position::BottomRight);

        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
        assert_eq!(back.history().len(), 1);
        assert_eq!(*back.history()[0].moves()[0].square_id(), Position::TopLeft);
    }

    #[test]
    fn test_empty_games_rejected() {
        let json = serde_json::json!({
            "players": serde_json::to_value(Player::defaults()).unwrap(),
            "games": []
        });
        assert!(serde_json::from_value::<Session>(json).is_err());
    }

    #[test]
    fn test_duplicate_square_rejected() {
        let mut session = fresh();
        play(&mut session, Position::Center);
        let mut value = serde_json::to_value(&session).unwrap();
        let dup = value["games"][0]["moves"][0].clone();
        let mut second = dup.clone();
        second["player"] = value["players"][1].clone();
        value["games"][0]["moves"] = serde_json::json!([dup, second]);
        value["games"][0]["currentPlayer"] = value["players"][0].clone();
        assert!(serde_json::from_value::<Session>(value).is_err());
    }

    #[test]
    fn test_wrong_turn_order_rejected() {
        let mut session = fresh();
        play(&mut session, Position::Center);
        let mut value = serde_json::to_value(&session).unwrap();
        value["games"][0]["moves"][0]["player"] = value["players"][1].clone();
        assert!(serde_json::from_value::<Session>(value).is_err());
    }

    #[test]
    fn test_move_after_win_rejected() {
        let mut session = fresh();
        for pos in [
            Position::TopLeft,
            Position::MiddleLeft,
            Position::TopCenter,
            Position::Center,
            Position::TopRight,
            Position::BottomRight,
        ] {
            play(&mut session, pos);
        }
        assert!(session.validate().is_err());
    }

    #[test]
    fn test_opponent_of() {
        let session = fresh();
        let [p1, p2] = Player::defaults();
        assert_eq!(*session.opponent_of(&p1), p2);
        assert_eq!(*session.opponent_of(&p2), p1);
    }
}
