//! End-to-end session flows: claims, votes, win priority, and curation.

use bingo_engine::core::{EngineError, PlayerId, SessionConfig, SessionId, WinConditions};
use bingo_engine::items::min_items_required;
use bingo_engine::session::{GameSession, MessagePayload};
use bingo_engine::win::WinningLine;
use proptest::prelude::*;
use time::OffsetDateTime;

fn t0() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

const ALEX: PlayerId = PlayerId(0);
const BEA: PlayerId = PlayerId(1);
const CLEO: PlayerId = PlayerId(2);

/// A started 3x3 session with three players and a plain 12-item pool.
fn started_session() -> GameSession {
    let config = SessionConfig::new(3, 3).with_seed(7);
    let mut session = GameSession::new(SessionId::new(1), config, "Alex");
    session.add_player("Bea", t0()).unwrap();
    session.add_player("Cleo", t0()).unwrap();
    for i in 0..12 {
        session
            .add_item(ALEX, &format!("item {i}"), &[], 0, t0())
            .unwrap();
    }
    session.start(t0()).unwrap();
    session
}

/// Claim a tile on Alex's board and have both peers approve it.
fn complete_tile(session: &mut GameSession, index: usize) {
    session.claim_tile(ALEX, index, None, None, t0()).unwrap();
    session.vote(BEA, ALEX, index, true, t0()).unwrap();
    if session.result().is_none() {
        session.vote(CLEO, ALEX, index, true, t0()).unwrap();
    }
}

#[test]
fn minimum_item_rule() {
    assert_eq!(min_items_required(4, 3), 16);

    let config = SessionConfig::new(4, 3);
    let mut session = GameSession::new(SessionId::new(1), config, "Alex");
    for i in 0..15 {
        session
            .add_item(ALEX, &format!("item {i}"), &[], 0, t0())
            .unwrap();
    }

    match session.start(t0()) {
        Err(EngineError::InsufficientItems { have, needed }) => {
            assert_eq!((have, needed), (15, 16));
        }
        other => panic!("expected InsufficientItems, got {other:?}"),
    }

    session.add_item(ALEX, "one more", &[], 0, t0()).unwrap();
    session.start(t0()).unwrap();
    assert!(session.is_started());
}

#[test]
fn every_player_gets_a_full_board() {
    let session = started_session();
    for profile in session.roster().iter() {
        assert_eq!(session.board(profile.id).unwrap().len(), 9);
        assert_eq!(session.tiles(profile.id).unwrap().len(), 9);
    }
}

#[test]
fn row_win_has_priority_over_full_board() {
    // All nine tiles get claimed and approved, row by row. Row 1 completes
    // on its third tile, well before the ninth claim would complete the
    // board, so the declared result is the row win.
    let mut session = started_session();

    for index in 0..9 {
        if session.result().is_some() {
            break;
        }
        complete_tile(&mut session, index);
    }

    // The session froze on the third tile, the moment row 1 was approved;
    // the remaining six tiles never got claimed.
    let claimed = session
        .tiles(ALEX)
        .unwrap()
        .iter()
        .filter(|t| t.claimed)
        .count();
    assert_eq!(claimed, 3);

    let result = session.result().unwrap();
    assert_eq!(result.line, WinningLine::Row(0));
    assert_eq!(result.line.to_string(), "Row 1 Complete!");
    assert_eq!(result.winner, ALEX);
}

#[test]
fn column_win_when_rows_disabled() {
    let config = SessionConfig::new(3, 3)
        .with_seed(7)
        .with_win_conditions(WinConditions { by_row: false, by_column: true, by_all: false });
    let mut session = GameSession::new(SessionId::new(2), config, "Alex");
    session.add_player("Bea", t0()).unwrap();
    session.add_player("Cleo", t0()).unwrap();
    for i in 0..12 {
        session
            .add_item(ALEX, &format!("item {i}"), &[], 0, t0())
            .unwrap();
    }
    session.start(t0()).unwrap();

    let col1: Vec<usize> = session.board(ALEX).unwrap().column_indices(1).collect();
    for &index in &col1 {
        complete_tile(&mut session, index);
    }

    assert_eq!(session.result().unwrap().line, WinningLine::Column(1));
}

#[test]
fn win_is_terminal() {
    let mut session = started_session();
    let row0: Vec<usize> = session.board(ALEX).unwrap().row_indices(0).collect();
    for &index in &row0 {
        complete_tile(&mut session, index);
    }
    let first = *session.result().unwrap();

    // Nothing that happens afterwards can change the result.
    assert!(session.claim_tile(BEA, 0, None, None, t0()).is_err());
    assert_eq!(*session.result().unwrap(), first);
}

#[test]
fn approval_threshold_tracks_roster_growth() {
    let mut session = started_session();
    session.claim_tile(ALEX, 0, None, None, t0()).unwrap();
    session.vote(BEA, ALEX, 0, true, t0()).unwrap();

    // With 3 players one approval suffices.
    assert!(session.tiles(ALEX).unwrap().get(0).unwrap().is_approved(
        session.roster().required_approvals()
    ));

    // A fourth player joins: the same tile is no longer at threshold.
    session.add_player("Dana", t0()).unwrap();
    assert!(!session.tiles(ALEX).unwrap().get(0).unwrap().is_approved(
        session.roster().required_approvals()
    ));
}

#[test]
fn suggestion_lifecycle_with_authorization() {
    let config = SessionConfig::new(3, 3);
    let mut session = GameSession::new(SessionId::new(3), config, "Alex");
    let bea = session.add_player("Bea", t0()).unwrap();

    let sid = session
        .propose_suggestion(bea, "Spot a double rainbow", &[], 0, t0())
        .unwrap();
    assert_eq!(session.registry().suggestion_count(), 1);

    // Only the creator approves, admin or not.
    assert!(matches!(
        session.approve_suggestion(bea, sid, t0()),
        Err(EngineError::Authorization(_))
    ));

    let item = session.approve_suggestion(ALEX, sid, t0()).unwrap();
    assert_eq!(session.registry().suggestion_count(), 0);
    assert_eq!(
        session.registry().get(item).unwrap().text,
        "Spot a double rainbow"
    );
}

#[test]
fn transitions_show_up_in_the_message_log() {
    let mut session = started_session();
    session.claim_tile(ALEX, 0, None, None, t0()).unwrap();
    session.vote(BEA, ALEX, 0, true, t0()).unwrap();

    let payloads: Vec<&MessagePayload> =
        session.messages().iter().map(|m| &m.payload).collect();

    assert!(payloads
        .iter()
        .any(|p| matches!(p, MessagePayload::SessionStarted)));
    assert!(payloads
        .iter()
        .any(|p| matches!(p, MessagePayload::TileClaimed { player, tile: 0 } if *player == ALEX)));
    assert!(payloads
        .iter()
        .any(|p| matches!(p, MessagePayload::VoteCast { voter, .. } if *voter == BEA)));

    // Incremental reads via cursor.
    let first = session.messages().iter().next().unwrap().id;
    let tail = session.messages().since(first).count();
    assert_eq!(tail, session.messages().len() - 1);
}

#[test]
fn sessions_are_isolated() {
    let mut a = started_session();
    let b = started_session();

    a.claim_tile(ALEX, 0, None, None, t0()).unwrap();

    assert!(a.tiles(ALEX).unwrap().get(0).unwrap().claimed);
    assert!(!b.tiles(ALEX).unwrap().get(0).unwrap().claimed);
}

proptest! {
    /// Any sequence of votes by one player leaves them in at most one of
    /// the two vote sets, with the last vote winning.
    #[test]
    fn votes_are_idempotent_and_mutually_exclusive(votes in proptest::collection::vec(any::<bool>(), 1..20)) {
        let mut session = started_session();
        session.claim_tile(ALEX, 0, None, None, t0()).unwrap();

        for &approve in &votes {
            session.vote(BEA, ALEX, 0, approve, t0()).unwrap();
        }

        let tile = session.tiles(ALEX).unwrap().get(0).unwrap();
        prop_assert_eq!(tile.approvals.len() + tile.denials.len(), 1);

        let last = *votes.last().unwrap();
        prop_assert_eq!(tile.approvals.contains(&BEA), last);
        prop_assert_eq!(tile.denials.contains(&BEA), !last);
    }
}
