use std::collections::HashSet;

use topochess::config::DEFAULT_LAYOUT;
use topochess::filters::{canonical_key, position_is_symmetric, SeenPositions};
use topochess::oracle::{king_endangered, position_is_safe};
use topochess::search::shuffle;
use topochess::walker::moves;
use topochess::{Board, Color, EdgeConfig, Preset};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn default_board() -> Board {
    Board::from_rows(DEFAULT_LAYOUT).unwrap()
}

#[test]
fn default_layout_is_safe_under_every_preset() {
    let board = default_board();
    for preset in [Preset::Bounded, Preset::Torus, Preset::Mirrored] {
        assert!(position_is_safe(&board, &EdgeConfig::preset(preset)), "{preset:?}");
    }
}

#[test]
fn removing_a_guard_leaves_a_piece_hanging() {
    // Each of these squares covers a piece the opponent attacks.
    for (x, y) in [(0, 1), (7, 1), (4, 3), (4, 4), (0, 6), (7, 6)] {
        let mut board = default_board();
        assert!(board.take(x, y).is_some());
        for preset in [Preset::Bounded, Preset::Torus] {
            assert!(
                !position_is_safe(&board, &EdgeConfig::preset(preset)),
                "({x}, {y}) under {preset:?}"
            );
        }
    }
}

#[test]
fn king_escapes_a_rook_check() {
    let bounded = EdgeConfig::preset(Preset::Bounded);
    let mut board = Board::from_rows(&["k...", "..r.", "....", "R..K"]).unwrap();
    assert!(!position_is_safe(&board, &bounded));
    assert!(king_endangered(&board, &bounded, Color::Black));
    assert!(!king_endangered(&board, &bounded, Color::White));

    let king = *board.king(Color::Black).unwrap();
    let escapes: Vec<_> = moves(&board, &bounded, &king).collect();
    let squares: HashSet<_> = escapes.iter().map(|d| (d.x, d.y)).collect();
    assert_eq!(squares, HashSet::from([(1, 3), (0, 2), (1, 2)]));

    let east = escapes.iter().find(|d| (d.x, d.y) == (1, 3)).unwrap();
    assert_eq!(board.apply_move(king.id, east), Ok(None));
    assert!(position_is_safe(&board, &bounded));
}

#[test]
fn kings_touch_across_the_torus_seam() {
    let torus = EdgeConfig::preset(Preset::Torus);
    let board = Board::from_rows(&["k...", "..r.", "....", "R..K"]).unwrap();
    assert!(!position_is_safe(&board, &torus));
    assert!(king_endangered(&board, &torus, Color::White));
}

fn mirror_and_swap_colors(board: &Board) -> Board {
    let rows: Vec<String> = board
        .rows()
        .map(|row| {
            row.chars()
                .map(|c| {
                    if c.is_ascii_uppercase() {
                        c.to_ascii_lowercase()
                    } else {
                        c.to_ascii_uppercase()
                    }
                })
                .collect()
        })
        .collect();
    // `rows()` is south first, so feeding it back as north-first mirrors it.
    Board::from_rows(&rows).unwrap()
}

#[test]
fn symmetry_survives_mirroring_with_swapped_colors() {
    let board = default_board();
    assert_eq!(canonical_key(&mirror_and_swap_colors(&board)), canonical_key(&board));

    let mut rng = StdRng::seed_from_u64(17);
    let small = Board::from_rows(&["kr..", "p...", "P...", "KR.."]).unwrap();
    for _ in 0..200 {
        let shuffled = shuffle(&small, &mut rng);
        assert_eq!(
            position_is_symmetric(&shuffled),
            position_is_symmetric(&mirror_and_swap_colors(&shuffled))
        );
    }
}

#[test]
fn novelty_is_reported_once_per_key() {
    let seen = SeenPositions::new();
    let board = default_board();
    assert!(seen.position_is_new(&board));
    assert!(!seen.position_is_new(&board));

    let shared = seen.clone();
    assert!(!shared.position_is_new(&default_board()));
    assert_eq!(seen.len(), 1);
}
