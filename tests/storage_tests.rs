// tests/storage_tests.rs
//
// Хранилище и маппинг записи:
//  - save/load/list/delete для in-memory и файлового хранилища
//  - битые записи: ошибка, а не "почти валидный" драфт
//  - формат хранимого пика (pack_number / pick_number / pick)
//  - восстановление overall_pick / is_bot при загрузке

use std::time::{SystemTime, UNIX_EPOCH};

use draft_engine::bots::HeuristicStrategy;
use draft_engine::domain::{CardPool, DraftConfig, PackLayout, Personality};
use draft_engine::engine::{apply_delta, create, start, Delta, DraftState, DraftStatus};
use draft_engine::infra::{
    config_from_record, deltas_from_record, record_from_state, DraftStorage,
    InMemoryDraftStorage, JsonDirStorage, PersistedDelta, StorageError,
};

fn pool() -> CardPool {
    CardPool::synthetic("TST", 15, 53, 80, 101)
}

fn play(seed: &str, config: &DraftConfig, waves: usize) -> DraftState {
    let mut state = start(&create(seed, config).unwrap()).unwrap();
    for i in 0..waves {
        let card_id = state.players[0].current_pack.as_ref().unwrap().cards[0]
            .card
            .id
            .clone();
        let delta = state.next_delta(card_id, 1_000 * i as u64).unwrap();
        state = apply_delta(&state, delta, &HeuristicStrategy).unwrap();
    }
    state
}

fn temp_dir(tag: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("draft-engine-{tag}-{}-{nanos}", std::process::id()))
}

//
// Маппинг
//
#[test]
fn record_keeps_seed_config_and_log() {
    let config = DraftConfig::new(pool());
    let state = play("record", &config, 17);

    let record = record_from_state(&state, &config, 42);

    assert_eq!(record.seed, "record");
    assert_eq!(record.set_code, "TST");
    assert_eq!(record.created_at, 42);
    assert_eq!(record.player_count, 8);
    assert_eq!(record.round_count, 3);
    assert_eq!(record.picks_per_round, 15);
    assert_eq!(record.status, DraftStatus::Active);
    assert_eq!(record.current_pick, 18);
    assert_eq!(record.deltas.len(), 17);
    assert_eq!(record.deltas[16].pack_number, 2);
    assert_eq!(record.deltas[16].pick_number, 2);
    // Раскладка и линейка по умолчанию не пишутся.
    assert!(record.layout.is_none());
    assert!(record.bot_lineup.is_empty());
}

#[test]
fn persisted_delta_json_shape() {
    let delta = Delta::pick(2, 3, 15, "tst-r001", "player_0", 99);
    let json = serde_json::to_value(PersistedDelta::from(&delta)).unwrap();

    assert_eq!(json["event_type"], "pick");
    assert_eq!(json["pack_number"], 2);
    assert_eq!(json["pick_number"], 3);
    assert_eq!(json["pick"], "tst-r001");
    assert_eq!(json["player_id"], "player_0");
    assert!(json.get("overall_pick").is_none());
    assert!(json.get("pick_time_ms").is_none());

    let timed = PersistedDelta::from(&delta.clone().with_pick_time(4_500));
    let json = serde_json::to_value(timed).unwrap();
    assert_eq!(json["pick_time_ms"], 4_500);
}

#[test]
fn loaded_deltas_recompute_derived_fields() {
    let config = DraftConfig::new(pool());
    let state = play("derived", &config, 20);
    let record = record_from_state(&state, &config, 0);

    let deltas = deltas_from_record("derived", &record).unwrap();

    assert_eq!(deltas, state.deltas);
    assert_eq!(deltas[15].overall_pick, 16);
    assert!(deltas.iter().all(|d| !d.is_bot()));
    assert_eq!(deltas[0].event_id("derived"), "derived#1");
}

#[test]
fn custom_layout_and_lineup_survive_record() {
    let config = DraftConfig::new(pool())
        .with_players(6)
        .with_rounds(2)
        .with_pack_size(10)
        .with_mythic_rate(0.5)
        .with_bot_lineup(vec![Personality::gold()]);
    let state = play("custom", &config, 3);
    let record = record_from_state(&state, &config, 0);

    assert_eq!(
        record.layout,
        Some(PackLayout {
            pack_size: 10,
            uncommon_slots: 3,
            mythic_rate: 0.5
        })
    );
    let restored = config_from_record(&record, pool()).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn record_for_other_set_is_rejected() {
    let config = DraftConfig::new(pool());
    let record = record_from_state(&play("set", &config, 1), &config, 0);

    let err = config_from_record(&record, CardPool::synthetic("XYZ", 15, 53, 80, 101)).unwrap_err();
    assert_eq!(
        err,
        StorageError::SetMismatch {
            expected: "TST".into(),
            got: "XYZ".into()
        }
    );
}

#[test]
fn record_with_gap_in_log_is_malformed() {
    let config = DraftConfig::new(pool());
    let mut record = record_from_state(&play("gap", &config, 5), &config, 0);
    record.deltas.remove(2);

    let err = deltas_from_record("gap", &record).unwrap_err();
    assert!(matches!(err, StorageError::Malformed { .. }));
}

//
// In-memory
//
#[test]
fn in_memory_save_load_delete() {
    let config = DraftConfig::new(pool());
    let record = record_from_state(&play("mem", &config, 4), &config, 10);
    let mut storage = InMemoryDraftStorage::new();

    assert!(storage.is_empty());
    assert!(storage.save("draft-1", &record));
    assert_eq!(storage.len(), 1);
    assert_eq!(storage.load("draft-1").unwrap(), Some(record));
    assert_eq!(storage.load("missing").unwrap(), None);

    assert!(storage.delete("draft-1"));
    assert!(!storage.delete("draft-1"));
    assert_eq!(storage.load("draft-1").unwrap(), None);
}

#[test]
fn in_memory_rejects_garbage_json() {
    let mut storage = InMemoryDraftStorage::new();
    storage.insert_raw("junk", "{ not json");

    let err = storage.load("junk").unwrap_err();
    assert!(matches!(err, StorageError::Malformed { ref id, .. } if id == "junk"));
}

#[test]
fn in_memory_rejects_structurally_broken_record() {
    let config = DraftConfig::new(pool());
    let mut record = record_from_state(&play("broken", &config, 3), &config, 0);
    record.deltas[0].pick_number = 40;
    let mut storage = InMemoryDraftStorage::new();
    storage.insert_raw("broken", serde_json::to_string(&record).unwrap());

    assert!(matches!(
        storage.load("broken"),
        Err(StorageError::Malformed { .. })
    ));
}

#[test]
fn list_is_newest_first_and_skips_unreadable() {
    let config = DraftConfig::new(pool());
    let state = play("list", &config, 2);
    let mut storage = InMemoryDraftStorage::new();
    storage.save("old", &record_from_state(&state, &config, 100));
    storage.save("new", &record_from_state(&state, &config, 300));
    storage.save("mid", &record_from_state(&state, &config, 200));
    storage.insert_raw("junk", "[]");

    let list = storage.list();

    let ids: Vec<&str> = list.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["new", "mid", "old"]);
    assert_eq!(list[0].pick_count, 2);
    assert_eq!(list[0].current_pick, 3);
    assert_eq!(list[0].set_code, "TST");
}

//
// Файловое хранилище
//
#[test]
fn json_dir_round_trip() {
    let dir = temp_dir("roundtrip");
    let config = DraftConfig::new(pool());
    let record = record_from_state(&play("disk", &config, 6), &config, 7);

    let mut storage = JsonDirStorage::open(&dir).unwrap();
    assert!(storage.save("disk-draft", &record));
    assert!(dir.join("disk-draft.json").exists());

    let reopened = JsonDirStorage::open(&dir).unwrap();
    assert_eq!(reopened.load("disk-draft").unwrap(), Some(record));
    assert_eq!(reopened.list().len(), 1);
    assert_eq!(reopened.load("nope").unwrap(), None);

    assert!(storage.delete("disk-draft"));
    assert!(storage.list().is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn json_dir_reports_corrupted_file() {
    let dir = temp_dir("corrupt");
    let storage = JsonDirStorage::open(&dir).unwrap();
    std::fs::write(dir.join("bad.json"), "{\"seed\": 5}").unwrap();

    assert!(matches!(
        storage.load("bad"),
        Err(StorageError::Malformed { .. })
    ));
    assert!(storage.list().is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn json_dir_rejects_ids_that_escape_root() {
    let base = temp_dir("escape");
    let dir = base.join("drafts");
    let config = DraftConfig::new(pool());
    let record = record_from_state(&play("escape", &config, 2), &config, 0);
    let mut storage = JsonDirStorage::open(&dir).unwrap();
    assert_eq!(storage.root(), dir.as_path());

    for id in ["../outside", "a/b", "a\\b", "..", ""] {
        assert!(!storage.save(id, &record), "saved under {id:?}");
        assert_eq!(storage.load(id), Err(StorageError::InvalidId(id.to_string())));
        assert!(!storage.delete(id));
    }
    assert!(!base.join("outside.json").exists());
    assert!(storage.list().is_empty());

    // Обычный id с точкой и дефисом допустим.
    assert!(storage.save("draft-1.v2", &record));
    assert_eq!(storage.load("draft-1.v2").unwrap(), Some(record));

    let _ = std::fs::remove_dir_all(&base);
}
