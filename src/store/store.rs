//! The authoritative session store.

use tracing::{debug, info, instrument, warn};

use super::error::{StorageError, StoreError};
use super::observer::{SubscriptionId, Subscribers};
use super::storage::Storage;
use crate::games::tictactoe::{Game, Player, Position, Session, Stats, validate_move};

/// Owns the session, persists every change and notifies subscribers.
///
/// Every mutation is staged on a copy of the session, written in full to
/// storage, and only then committed and announced. A failed write leaves
/// the store exactly as it was.
///
/// Several stores may share one storage key (one per process). They do not
/// coordinate: the last write wins, and each store picks up the others'
/// writes through [`Store::sync_from_storage`].
#[derive(Debug)]
pub struct Store<S: Storage> {
    storage: S,
    storage_key: String,
    session: Session,
    /// Raw record this store last loaded or wrote.
    last_seen: Option<String>,
    subscribers: Subscribers,
}

impl<S: Storage> Store<S> {
    /// Loads the session stored under `storage_key`.
    ///
    /// Never fails: an absent, unreadable or invalid record yields a fresh
    /// session for `players` with one empty game. Nothing is written until
    /// the first mutation.
    #[instrument(skip_all)]
    pub fn new(storage: S, storage_key: impl Into<String>, players: [Player; 2]) -> Self {
        let storage_key = storage_key.into();

        let (session, last_seen) = match storage.read(&storage_key) {
            Ok(Some(raw)) => {
                let session = parse_or_fresh(&raw, &players);
                (session, Some(raw))
            }
            Ok(None) => {
                info!("No stored session, starting fresh");
                (Session::new(players), None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored session, starting fresh");
                (Session::new(players), None)
            }
        };

        info!(
            storage_key = %storage_key,
            games = session.game_count(),
            moves = session.current().moves().len(),
            "Store ready"
        );

        Self {
            storage,
            storage_key,
            session,
            last_seen,
            subscribers: Subscribers::new(),
        }
    }

    /// The current game. Its status is computed on each call.
    pub fn game(&self) -> &Game {
        self.session.current()
    }

    /// Scoreboard over the completed history, recomputed on each call.
    pub fn stats(&self) -> Stats {
        Stats::from_session(&self.session)
    }

    /// The whole session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Both players.
    pub fn players(&self) -> &[Player; 2] {
        self.session.players()
    }

    /// Key under which the session is stored.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Claims `pos` for the current player and passes the turn.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidMove`] if the square is taken or the
    /// game is over, [`StoreError::Storage`] if the write fails. In both
    /// cases nothing changes and no subscriber is called.
    #[instrument(skip(self), fields(square = pos.square_id()))]
    pub fn player_move(&mut self, pos: Position) -> Result<(), StoreError> {
        validate_move(self.game(), pos)?;

        let mut next = self.session.clone();
        let following = next.opponent_of(next.current().current_player()).clone();
        next.current_mut().push_move(pos, following);

        self.commit(next)?;
        debug!(moves = self.game().moves().len(), "Move stored");
        Ok(())
    }

    /// Keeps the current game in history and starts an empty one with
    /// player 1 to move.
    #[instrument(skip(self))]
    pub fn new_round(&mut self) -> Result<(), StoreError> {
        let mut next = self.session.clone();
        next.start_new_game();
        self.commit(next)?;
        info!(games = self.session.game_count(), "New round started");
        Ok(())
    }

    /// Clears the current game's moves and gives player 1 the turn.
    /// History, and therefore the scoreboard, is untouched.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let mut next = self.session.clone();
        let first = next.first_player().clone();
        next.current_mut().clear(first);
        self.commit(next)?;
        info!("Current game reset");
        Ok(())
    }

    /// Registers a change callback, run synchronously after every successful
    /// mutation in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Removes a change callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Adopts a record written by another process.
    ///
    /// Returns `true` when the stored record differs from what this store
    /// last loaded or wrote; the in-memory session is replaced (a corrupt
    /// record becomes a fresh session, a deleted one too). Subscribers are
    /// not called: the caller re-renders, as a storage event would.
    #[instrument(skip(self), fields(storage_key = %self.storage_key))]
    pub fn sync_from_storage(&mut self) -> bool {
        let raw = match self.storage.read(&self.storage_key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to poll stored session");
                return false;
            }
        };
        if raw == self.last_seen {
            return false;
        }

        let players = self.session.players().clone();
        self.session = match &raw {
            Some(raw) => parse_or_fresh(raw, &players),
            None => Session::new(players),
        };
        self.last_seen = raw;
        info!(
            games = self.session.game_count(),
            moves = self.game().moves().len(),
            "Adopted session written elsewhere"
        );
        true
    }

    /// Writes `next` in full, then commits it and notifies.
    fn commit(&mut self, next: Session) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&next)?;
        self.storage.write(&self.storage_key, &raw)?;
        self.session = next;
        self.last_seen = Some(raw);
        self.subscribers.notify();
        Ok(())
    }
}

/// Parses a stored record, degrading to a fresh session.
fn parse_or_fresh(raw: &str, players: &[Player; 2]) -> Session {
    match serde_json::from_str::<Session>(raw) {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "Stored session is invalid, starting fresh");
            Session::new(players.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    /// Storage whose writes can be switched off.
    #[derive(Debug, Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_writes: bool,
    }

    impl Storage for FlakyStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.read(key)
        }

        fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::new("disk full"));
            }
            self.inner.write(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_failed_write_changes_nothing() {
        let mut store = Store::new(FlakyStorage::default(), "k", Player::defaults());
        store.player_move(Position::Center).unwrap();

        let fired = std::rc::Rc::new(std::cell::Cell::new(0));
        let f = std::rc::Rc::clone(&fired);
        store.subscribe(move || f.set(f.get() + 1));

        store.storage.fail_writes = true;
        let before = store.session().clone();
        assert!(matches!(
            store.player_move(Position::TopLeft),
            Err(StoreError::Storage(_))
        ));
        assert!(matches!(store.new_round(), Err(StoreError::Storage(_))));
        assert!(matches!(store.reset(), Err(StoreError::Storage(_))));
        assert_eq!(*store.session(), before);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_unreadable_storage_starts_fresh() {
        struct Broken;
        impl Storage for Broken {
            fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Err(StorageError::new("permission denied"))
            }
            fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Ok(())
            }
            fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
                Ok(())
            }
        }

        let mut store = Store::new(Broken, "k", Player::defaults());
        assert!(store.game().moves().is_empty());
        assert!(!store.sync_from_storage());
    }
}
