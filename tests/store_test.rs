//! Tests for the session store: moves, rounds, resets and notifications.

use std::cell::RefCell;
use std::rc::Rc;

use strictly_t3::{
    GameStatus, MemoryStorage, MoveError, Player, Position, Storage, Store, StoreError,
};

const KEY: &str = "live-t3-storage-key";

fn new_store() -> Store<MemoryStorage> {
    Store::new(MemoryStorage::new(), KEY, Player::defaults())
}

fn play(store: &mut Store<MemoryStorage>, squares: &[u8]) {
    for &id in squares {
        let pos = Position::from_square_id(id).expect("valid square");
        store.player_move(pos).expect("move accepted");
    }
}

#[test]
fn test_fresh_store_has_one_empty_game() {
    let store = new_store();
    assert!(store.game().moves().is_empty());
    assert_eq!(*store.game().current_player().id(), 1);
    assert_eq!(store.game().status(), GameStatus::InProgress);
    assert_eq!(store.session().game_count(), 1);
    assert_eq!(store.stats().completed_games(), 0);
    // Nothing is written until the first change
    assert_eq!(store.storage().read(KEY).unwrap(), None);
}

#[test]
fn test_moves_alternate_from_player_one() {
    let mut store = new_store();
    let order = [4u8, 0, 8, 2, 6];
    for (count, &id) in order.iter().enumerate() {
        let expected = if count % 2 == 0 { 1 } else { 2 };
        assert_eq!(*store.game().current_player().id(), expected);
        store
            .player_move(Position::from_square_id(id).unwrap())
            .unwrap();
        assert_eq!(store.game().moves().len(), count + 1);
        assert_eq!(*store.game().moves()[count].player().id(), expected);
    }
}

#[test]
fn test_top_row_wins_for_player_one() {
    let mut store = new_store();
    play(&mut store, &[0, 3, 1, 4, 2]);

    match store.game().status() {
        GameStatus::Won(winner) => assert_eq!(*winner.id(), 1),
        other => panic!("expected a win, got {:?}", other),
    }
}

#[test]
fn test_nine_moves_without_triplet_is_tie() {
    let mut store = new_store();
    play(&mut store, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert_eq!(store.game().moves().len(), 9);
    assert_eq!(store.game().status(), GameStatus::Tie);
    assert!(store.game().status().winner().is_none());
}

#[test]
fn test_occupied_square_rejected() {
    let mut store = new_store();
    play(&mut store, &[4]);
    let before = store.storage().read(KEY).unwrap();

    let result = store.player_move(Position::Center);
    assert!(matches!(
        result,
        Err(StoreError::InvalidMove(MoveError::SquareOccupied(Position::Center)))
    ));
    assert_eq!(store.game().moves().len(), 1);
    assert_eq!(store.storage().read(KEY).unwrap(), before);
}

#[test]
fn test_move_after_completion_rejected() {
    let mut store = new_store();
    play(&mut store, &[0, 3, 1, 4, 2]);

    let fired = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&fired);
    store.subscribe(move || *counter.borrow_mut() += 1);

    let result = store.player_move(Position::BottomRight);
    assert!(matches!(
        result,
        Err(StoreError::InvalidMove(MoveError::GameOver))
    ));
    assert_eq!(store.game().moves().len(), 5);
    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn test_new_round_adds_finished_result() {
    let mut store = new_store();
    play(&mut store, &[0, 3, 1, 4, 2]);
    let before = store.stats();
    assert_eq!(*before.player_with_stats()[0].wins(), 0);

    store.new_round().unwrap();
    let after = store.stats();
    assert_eq!(*after.player_with_stats()[0].wins(), 1);
    assert_eq!(*after.player_with_stats()[1].wins(), 0);
    assert_eq!(*after.ties(), 0);
    assert!(store.game().moves().is_empty());
    assert_eq!(*store.game().current_player().id(), 1);
    assert_eq!(store.session().game_count(), 2);

    play(&mut store, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    store.new_round().unwrap();
    assert_eq!(*store.stats().ties(), 1);
    assert_eq!(store.stats().completed_games(), 2);
}

#[test]
fn test_new_round_on_empty_game_keeps_stats() {
    let mut store = new_store();
    store.new_round().unwrap();
    store.new_round().unwrap();
    assert_eq!(store.session().game_count(), 3);
    assert_eq!(store.stats().completed_games(), 0);
}

#[test]
fn test_reset_clears_current_moves_only() {
    let mut store = new_store();
    play(&mut store, &[0, 3, 1, 4, 2]);
    store.new_round().unwrap();
    play(&mut store, &[4, 0]);
    let stats = store.stats();

    store.reset().unwrap();
    assert!(store.game().moves().is_empty());
    assert_eq!(*store.game().current_player().id(), 1);
    assert_eq!(store.stats(), stats);
    assert_eq!(store.session().history().len(), 1);
}

#[test]
fn test_reset_after_win_discards_it() {
    let mut store = new_store();
    play(&mut store, &[0, 3, 1, 4, 2]);
    store.reset().unwrap();
    store.new_round().unwrap();
    assert_eq!(*store.stats().player_with_stats()[0].wins(), 0);
}

#[test]
fn test_subscribers_run_in_order_after_each_change() {
    let mut store = new_store();
    let log = Rc::new(RefCell::new(Vec::new()));

    let first = Rc::clone(&log);
    store.subscribe(move || first.borrow_mut().push("first"));
    let second = Rc::clone(&log);
    store.subscribe(move || second.borrow_mut().push("second"));

    store.player_move(Position::Center).unwrap();
    assert_eq!(*log.borrow(), vec!["first", "second"]);

    store.reset().unwrap();
    store.new_round().unwrap();
    assert_eq!(log.borrow().len(), 6);
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let mut store = new_store();
    let fired = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&fired);
    let id = store.subscribe(move || *counter.borrow_mut() += 1);

    store.player_move(Position::Center).unwrap();
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.player_move(Position::TopLeft).unwrap();
    assert_eq!(*fired.borrow(), 1);
}

#[test]
fn test_session_persists_across_stores() {
    let storage = MemoryStorage::new();
    {
        let mut store = Store::new(storage.clone(), KEY, Player::defaults());
        store.player_move(Position::Center).unwrap();
        store.player_move(Position::TopLeft).unwrap();
    }

    let store = Store::new(storage, KEY, Player::defaults());
    assert_eq!(store.game().moves().len(), 2);
    assert_eq!(*store.game().current_player().id(), 1);
}

#[test]
fn test_corrupt_record_starts_fresh() {
    let mut storage = MemoryStorage::new();
    storage.write(KEY, "{not json").unwrap();

    let mut store = Store::new(storage.clone(), KEY, Player::defaults());
    assert!(store.game().moves().is_empty());

    store.player_move(Position::Center).unwrap();
    let raw = storage.read(KEY).unwrap().unwrap();
    assert!(raw.contains("\"squareId\":4"));
}

#[test]
fn test_stored_players_win_over_configured() {
    let storage = MemoryStorage::new();
    let named = [
        Player::new(1, "Ada", "fa-x", "red"),
        Player::new(2, "Grace", "fa-o", "blue"),
    ];
    let mut first = Store::new(storage.clone(), KEY, named);
    first.player_move(Position::Center).unwrap();

    let second = Store::new(storage, KEY, Player::defaults());
    assert_eq!(second.players()[0].name(), "Ada");
    assert_eq!(second.game().moves()[0].player().name(), "Ada");
}
