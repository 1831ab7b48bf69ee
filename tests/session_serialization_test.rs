//! Tests for the stored session record.

use strictly_t3::{MemoryStorage, Player, Position, Session, Storage, Store};

const KEY: &str = "t3";

/// Plays `rounds` through a store and returns the stored record.
fn stored_record(rounds: &[&[u8]]) -> (String, Session) {
    let storage = MemoryStorage::new();
    let mut store = Store::new(storage.clone(), KEY, Player::defaults());
    for (idx, round) in rounds.iter().enumerate() {
        if idx > 0 {
            store.new_round().unwrap();
        }
        for &id in *round {
            store
                .player_move(Position::from_square_id(id).unwrap())
                .unwrap();
        }
    }
    let raw = storage.read(KEY).unwrap().expect("record written");
    (raw, store.session().clone())
}

#[test]
fn test_reachable_sessions_round_trip() {
    let cases: &[&[&[u8]]] = &[
        &[&[4]],
        &[&[0, 3, 1, 4, 2]],
        &[&[0, 1, 2, 4, 3, 5, 7, 6, 8], &[]],
        &[&[0, 3, 1, 4, 2], &[8, 0, 7, 1, 6], &[4, 0]],
    ];
    for rounds in cases {
        let (raw, session) = stored_record(rounds);
        let parsed: Session = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, session, "rounds {:?}", rounds);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), raw);
    }
}

#[test]
fn test_record_shape() {
    let (raw, _) = stored_record(&[&[0, 3, 1, 4, 2], &[4]]);
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let players = value["players"].as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0]["id"], 1);
    assert_eq!(players[0]["name"], "Player 1");
    assert_eq!(players[0]["iconClass"], "fa-x");
    assert_eq!(players[0]["colorClass"], "turquoise");

    let games = value["games"].as_array().unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0]["moves"].as_array().unwrap().len(), 5);
    // Current game is last
    assert_eq!(games[1]["moves"][0]["squareId"], 4);
    assert_eq!(games[1]["currentPlayer"]["id"], 2);
}

#[test]
fn test_record_from_another_writer_loads() {
    let raw = r#"{
        "players": [
            {"id": 1, "name": "Player 1", "iconClass": "fa-x", "colorClass": "turquoise"},
            {"id": 2, "name": "Player 2", "iconClass": "fa-o", "colorClass": "yellow"}
        ],
        "games": [
            {
                "moves": [
                    {"squareId": 0, "player": {"id": 1, "name": "Player 1", "iconClass": "fa-x", "colorClass": "turquoise"}}
                ],
                "currentPlayer": {"id": 2, "name": "Player 2", "iconClass": "fa-o", "colorClass": "yellow"}
            }
        ]
    }"#;
    let mut storage = MemoryStorage::new();
    storage.write(KEY, raw).unwrap();

    let store = Store::new(storage, KEY, Player::defaults());
    assert_eq!(store.game().moves().len(), 1);
    assert_eq!(*store.game().moves()[0].square_id(), Position::TopLeft);
    assert_eq!(*store.game().current_player().id(), 2);
}

#[test]
fn test_out_of_range_square_rejected() {
    let raw = serde_json::json!({
        "players": Player::defaults(),
        "games": [{
            "moves": [{"squareId": 9, "player": Player::defaults()[0]}],
            "currentPlayer": Player::defaults()[1]
        }]
    });
    assert!(serde_json::from_value::<Session>(raw).is_err());
}
