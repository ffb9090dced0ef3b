use std::collections::HashSet;

use topochess::filters::{canonical_key, position_is_symmetric};
use topochess::oracle::position_is_safe;
use topochess::{Board, EdgeConfig, Preset, SearchSession, SeenPositions};

fn tower() -> Board {
    Board::from_rows(&["k.", "r.", "R.", "K."]).unwrap()
}

fn drain(session: &mut SearchSession) -> Vec<Board> {
    std::iter::from_fn(|| session.new_position()).collect()
}

#[test]
fn search_hands_out_each_safe_arrangement_once() {
    let bounded = EdgeConfig::preset(Preset::Bounded);
    let mut session = SearchSession::seeded(tower(), bounded, 1).with_report_every(0);
    let found = drain(&mut session);

    assert_eq!(found.len(), 12);
    let keys: HashSet<String> = found.iter().map(canonical_key).collect();
    assert_eq!(keys.len(), 12);
    for board in &found {
        assert!(position_is_symmetric(board));
        assert!(position_is_safe(board, &bounded));
    }
    assert_eq!(session.new_position(), None);
    assert_eq!(session.stats().accepted, 12);
}

#[test]
fn torus_leaves_no_safe_tower() {
    let torus = EdgeConfig::preset(Preset::Torus);
    let mut session = SearchSession::seeded(tower(), torus, 1);
    assert_eq!(session.new_position(), None);
    assert_eq!(session.stats().accepted, 0);
    assert!(session.stats().examined > 0);
}

#[test]
fn rooks_guard_themselves_around_the_torus() {
    let torus = EdgeConfig::preset(Preset::Torus);
    let rooks = Board::from_rows(&["rr", "..", "..", "RR"]).unwrap();
    let mut session = SearchSession::seeded(rooks, torus, 8).with_report_every(0);
    let found = drain(&mut session);
    assert_eq!(found.len(), 20);
    for board in &found {
        assert!(position_is_safe(board, &torus));
    }
}

#[test]
fn same_seed_same_sequence() {
    let bounded = EdgeConfig::preset(Preset::Bounded);
    let mut a = SearchSession::seeded(tower(), bounded, 99);
    let mut b = SearchSession::seeded(tower(), bounded, 99);
    for _ in 0..5 {
        let next = a.new_position();
        assert!(next.is_some());
        assert_eq!(next, b.new_position());
    }
    assert_eq!(a.stats(), b.stats());
}

#[test]
fn sessions_sharing_a_seen_set_split_the_positions() {
    let bounded = EdgeConfig::preset(Preset::Bounded);
    let seen = SeenPositions::new();
    let mut a = SearchSession::seeded(tower(), bounded, 3).with_seen(seen.clone());
    let mut b = SearchSession::seeded(tower(), bounded, 4).with_seen(seen.clone());

    let mut keys = HashSet::new();
    loop {
        let from_a = a.new_position();
        let from_b = b.new_position();
        if from_a.is_none() && from_b.is_none() {
            break;
        }
        for board in from_a.iter().chain(from_b.iter()) {
            assert!(keys.insert(canonical_key(board)));
        }
    }
    assert_eq!(keys.len(), 12);
    assert_eq!(a.stats().accepted + b.stats().accepted, 12);
}

#[test]
fn session_moves_follow_the_layout() {
    let bounded = EdgeConfig::preset(Preset::Bounded);
    let mut session = SearchSession::seeded(tower(), bounded, 0);
    session.set_layout(Board::from_rows(&["k...", "..r.", "....", "R..K"]).unwrap());
    assert!(!session.position_is_safe());

    let king = *session.layout().get(0, 3).unwrap();
    let escape = session
        .get_moves(&king)
        .find(|d| (d.x, d.y) == (1, 3))
        .unwrap();
    session.apply_move(king.id, &escape).unwrap();
    assert!(session.position_is_safe());
}
