use punkcards_core::db::{open_db, open_db_in_memory};
use punkcards_core::{
    Card, CardId, CollectionStore, KeyValueStore, LoadOutcome, SqliteSlotStore, StorageError,
};
use rusqlite::Connection;

fn card(id: &str) -> Card {
    Card {
        id: CardId::new(id),
        band_name: "Sleater-Kinney".to_string(),
        style: "Riot Grrrl".to_string(),
        influential_album: "Dig Me Out".to_string(),
        country_of_origin: "USA".to_string(),
        years_active: "1994-2006, 2014-present".to_string(),
        image_url: "https://example.com/sk.jpg".to_string(),
        song: None,
    }
}

#[test]
fn get_returns_none_until_first_set() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotStore::try_new(&conn).unwrap();

    assert_eq!(slots.get("paniniCards").unwrap(), None);
    slots.set("paniniCards", "[]").unwrap();
    assert_eq!(slots.get("paniniCards").unwrap().as_deref(), Some("[]"));
}

#[test]
fn set_upserts_one_row_per_key() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotStore::try_new(&conn).unwrap();

    slots.set("paniniCards", "first").unwrap();
    slots.set("paniniCards", "second").unwrap();
    slots.set("other", "x").unwrap();

    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM kv_slots WHERE key = 'paniniCards';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);
    assert_eq!(slots.get("paniniCards").unwrap().as_deref(), Some("second"));
    assert_eq!(slots.get("other").unwrap().as_deref(), Some("x"));
}

#[test]
fn blank_key_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotStore::try_new(&conn).unwrap();

    let err = slots.set("", "[]").unwrap_err();
    assert!(matches!(err, StorageError::InvalidKey(_)));
}

#[test]
fn try_new_requires_migrated_schema() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteSlotStore::try_new(&conn).err().unwrap();
    assert!(matches!(err, StorageError::MissingSchema("kv_slots")));
}

#[test]
fn collection_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.db");

    {
        let conn = open_db(&path).unwrap();
        let slots = SqliteSlotStore::try_new(&conn).unwrap();
        let mut store = CollectionStore::open(slots, "paniniCards").unwrap();
        store.add(card("1")).unwrap();
        store.add(card("2")).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let slots = SqliteSlotStore::try_new(&conn).unwrap();
    let mut store = CollectionStore::new(slots, "paniniCards");
    assert_eq!(store.load().unwrap(), LoadOutcome::Hydrated { count: 2 });
    assert_eq!(store.cards()[0].id.as_str(), "1");
    assert_eq!(store.cards()[1].id.as_str(), "2");
}
