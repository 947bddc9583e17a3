// tests/session_tests.rs
//
// DraftSession: единственный владелец живого состояния:
//  - Start / Pick / Navigate / ReturnToLive через dispatch
//  - пик во время просмотра истории запрещён
//  - неудачная навигация приходит как success=false, а не как Err
//  - save -> load восстанавливает то же состояние (через реплей)

use draft_engine::api::{
    ApiError, CommandResponse, DraftCommand, NavigateCommand, NavigationResponse, PickCommand,
};
use draft_engine::bots::HeuristicStrategy;
use draft_engine::domain::{CardPool, DraftConfig};
use draft_engine::engine::DraftStatus;
use draft_engine::infra::{DraftStorage, InMemoryDraftStorage};
use draft_engine::DraftSession;

fn pool() -> CardPool {
    CardPool::synthetic("TST", 15, 53, 80, 101)
}

fn new_session(seed: &str, config: DraftConfig) -> DraftSession {
    DraftSession::new("draft-1", seed, config, HeuristicStrategy, 1_000).unwrap()
}

fn pick_first(session: &mut DraftSession) -> Result<CommandResponse, ApiError> {
    let card_id = session.live_state().players[0]
        .current_pack
        .as_ref()
        .unwrap()
        .cards[0]
        .card
        .id
        .clone();
    session.dispatch(DraftCommand::Pick(PickCommand {
        card_id,
        timestamp: 2_000,
        pick_time_ms: Some(1_500),
    }))
}

fn navigate(session: &mut DraftSession, round: u8, pick: u8) -> NavigationResponse {
    match session.dispatch(DraftCommand::Navigate(NavigateCommand { round, pick })) {
        Ok(CommandResponse::Navigation(resp)) => resp,
        other => panic!("unexpected navigation result: {other:?}"),
    }
}

#[test]
fn start_then_pick_updates_view() {
    let mut session = new_session("session", DraftConfig::new(pool()));
    assert_eq!(session.live_state().status, DraftStatus::Setup);

    let started = session.dispatch(DraftCommand::Start).unwrap();
    let CommandResponse::Started(view) = started else {
        panic!("expected Started");
    };
    assert_eq!(view.human_pack.len(), 15);
    assert_eq!(view.players.len(), 8);
    assert!(view.is_live);

    let CommandResponse::Picked(view) = pick_first(&mut session).unwrap() else {
        panic!("expected Picked");
    };
    assert_eq!((view.round, view.pick), (1, 2));
    assert_eq!(view.position, 1);
    assert_eq!(view.human_picks.len(), 1);
    assert_eq!(view.human_pack.len(), 14);
    assert!(view.players.iter().all(|p| p.picked_count == 1));
    assert_eq!(session.deltas()[0].pick_time_ms, Some(1_500));
}

#[test]
fn second_start_is_engine_error() {
    let mut session = new_session("restart", DraftConfig::new(pool()));
    session.dispatch(DraftCommand::Start).unwrap();

    let err = session.dispatch(DraftCommand::Start).unwrap_err();
    assert!(matches!(err, ApiError::Engine(_)));
}

#[test]
fn history_view_blocks_picks_until_return() {
    let mut session = new_session("history", DraftConfig::new(pool()));
    session.dispatch(DraftCommand::Start).unwrap();
    for _ in 0..5 {
        pick_first(&mut session).unwrap();
    }
    let live_before = session.live_state().clone();

    let resp = navigate(&mut session, 1, 2);
    assert!(resp.success);
    let view = resp.state.unwrap();
    assert!(!view.is_live);
    assert_eq!(view.position, 1);
    assert!(session.is_viewing_history());
    assert_eq!(session.viewed_state().deltas.len(), 1);

    let err = pick_first(&mut session).unwrap_err();
    assert!(matches!(err, ApiError::InvalidCommand(_)));
    assert_eq!(session.live_state(), &live_before);

    let back = session.dispatch(DraftCommand::ReturnToLive).unwrap();
    assert!(matches!(
        back,
        CommandResponse::Navigation(NavigationResponse { success: true, .. })
    ));
    assert!(!session.is_viewing_history());
    assert_eq!(session.viewed_state(), &live_before);
    assert!(pick_first(&mut session).is_ok());
}

#[test]
fn navigating_to_live_position_clears_history_view() {
    let mut session = new_session("to-live", DraftConfig::new(pool()));
    session.dispatch(DraftCommand::Start).unwrap();
    for _ in 0..3 {
        pick_first(&mut session).unwrap();
    }

    navigate(&mut session, 1, 1);
    assert!(session.is_viewing_history());

    let resp = navigate(&mut session, 1, 4);
    assert!(resp.success);
    assert!(resp.state.unwrap().is_live);
    assert!(!session.is_viewing_history());
}

#[test]
fn failed_navigation_is_reported_in_band() {
    let mut session = new_session("bad-nav", DraftConfig::new(pool()));
    session.dispatch(DraftCommand::Start).unwrap();
    pick_first(&mut session).unwrap();

    let resp = navigate(&mut session, 2, 1);
    assert!(!resp.success);
    assert!(resp.state.is_none());
    assert!(resp.error.is_some());

    let resp = navigate(&mut session, 9, 1);
    assert!(!resp.success);
    assert!(!session.is_viewing_history());
}

#[test]
fn last_pick_reports_completion() {
    let config = DraftConfig::new(pool()).with_players(4).with_rounds(1).with_pack_size(5);
    let mut session = new_session("complete", config);
    session.dispatch(DraftCommand::Start).unwrap();

    for _ in 0..4 {
        assert!(matches!(
            pick_first(&mut session).unwrap(),
            CommandResponse::Picked(_)
        ));
    }
    let CommandResponse::Completed(view) = pick_first(&mut session).unwrap() else {
        panic!("expected Completed");
    };
    assert_eq!(view.status, DraftStatus::Complete);
    assert!(view.human_pack.is_empty());
    assert_eq!(view.human_picks.len(), 5);
}

#[test]
fn save_and_load_restore_same_state() {
    let mut storage = InMemoryDraftStorage::new();
    let mut session = new_session("persist", DraftConfig::new(pool()));
    session.dispatch(DraftCommand::Start).unwrap();
    for _ in 0..20 {
        pick_first(&mut session).unwrap();
    }
    assert!(session.save(&mut storage));

    let loaded = DraftSession::load(&storage, "draft-1", pool(), HeuristicStrategy)
        .unwrap()
        .expect("draft not found");

    assert_eq!(loaded.live_state(), session.live_state());
    assert_eq!(loaded.to_record(), session.to_record());
    assert_eq!(loaded.id(), "draft-1");

    let missing = DraftSession::load(&storage, "nope", pool(), HeuristicStrategy).unwrap();
    assert!(missing.is_none());
}

#[test]
fn load_with_wrong_pool_fails() {
    let mut storage = InMemoryDraftStorage::new();
    let mut session = new_session("wrong-pool", DraftConfig::new(pool()));
    session.dispatch(DraftCommand::Start).unwrap();
    pick_first(&mut session).unwrap();
    session.save(&mut storage);

    let other = CardPool::synthetic("ABC", 15, 53, 80, 101);
    let err = DraftSession::load(&storage, "draft-1", other, HeuristicStrategy)
        .err()
        .expect("load must fail");
    assert!(matches!(err, ApiError::Storage(_)));
}

#[test]
fn tampered_record_is_rejected_on_resume() {
    let mut session = new_session("tamper", DraftConfig::new(pool()));
    session.dispatch(DraftCommand::Start).unwrap();
    for _ in 0..3 {
        pick_first(&mut session).unwrap();
    }
    let mut record = session.to_record();
    record.deltas[1].pick = "tst-x000".into();

    let err = DraftSession::resume("draft-1", &record, pool(), HeuristicStrategy)
        .err()
        .expect("resume must fail");
    assert!(matches!(err, ApiError::Engine(_)));

    let mut storage = InMemoryDraftStorage::new();
    storage.insert_raw("draft-1", "{}");
    assert!(matches!(
        DraftSession::load(&storage, "draft-1", pool(), HeuristicStrategy).err(),
        Some(ApiError::Storage(_))
    ));
    assert_eq!(storage.list().len(), 0);
}
