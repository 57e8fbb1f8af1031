//! Layout tests - the bundled square tangram solved through a session

use std::path::PathBuf;

use tangram::core::{load_layout, LayoutConfig};
use tangram::engine::Session;
use tangram::types::{PieceId, PieceKind, Vec2};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/square_tangram.json")
}

fn session() -> Session {
    Session::from_layout(load_layout(fixture()).unwrap())
}

/// Rotate `piece` to `steps` rotation steps, drag it onto `slot` and drop it
fn put(session: &mut Session, piece: PieceId, steps: usize, slot: &str) -> bool {
    for _ in 0..steps {
        session.rotate(piece).unwrap();
    }
    let slot = session.board().slot_by_name(slot).unwrap();
    let from = session.board().piece(piece).unwrap().position();
    let to = session.board().slot(slot).unwrap().position();

    session.begin_drag(piece, from).unwrap();
    session.drag_to(to).unwrap();
    let (_, outcome) = session.drop_piece().unwrap();
    outcome.slot() == Some(slot)
}

#[test]
fn test_fixture_loads() {
    let s = session();
    let board = s.board();

    assert_eq!(board.slots().len(), 8);
    assert_eq!(board.pieces().len(), 7);
    assert_eq!(s.settings().search_radius, 0.6);

    let kinds: Vec<PieceKind> = board.pieces().iter().map(|p| p.kind()).collect();
    assert_eq!(
        kinds.iter().filter(|&&k| k == PieceKind::LargeTriangle).count(),
        2
    );
    assert_eq!(
        kinds.iter().filter(|&&k| k == PieceKind::SmallTriangle).count(),
        2
    );
}

#[test]
fn test_solve_square_tangram() {
    let mut s = session();

    assert!(put(&mut s, PieceId(0), 4, "large_top"));
    assert!(put(&mut s, PieceId(1), 6, "large_left"));
    assert!(put(&mut s, PieceId(2), 0, "medium_corner"));
    assert!(put(&mut s, PieceId(3), 2, "small_center"));
    assert!(put(&mut s, PieceId(4), 0, "small_right"));
    assert!(put(&mut s, PieceId(5), 1, "square"));
    assert!(put(&mut s, PieceId(6), 0, "para"));

    let snap = s.snapshot();
    assert!(snap.all_pieces_placed());
    // para_mirror stays empty: it is blocked by para
    assert_eq!(snap.occupied_count(), 7);
    assert!(s.board().check_invariant().is_ok());

    // medium_corner snaps to its explicit target, not its position
    let corner = s.board().slot_by_name("medium_corner").unwrap();
    let corner = s.board().slot(corner).unwrap();
    let placed_at = s.board().piece(PieceId(2)).unwrap().position();
    assert_eq!(Some(placed_at), corner.snap_target());
    assert!(placed_at.distance(Vec2::new(4.1, 0.9)) < 1e-5);
    assert_ne!(placed_at, corner.position());
}

#[test]
fn test_interchangeable_large_triangles() {
    let mut s = session();

    // Second large triangle into the top slot, first one into the left slot
    assert!(put(&mut s, PieceId(1), 4, "large_top"));
    assert!(put(&mut s, PieceId(0), 6, "large_left"));
}

#[test]
fn test_wrong_rotation_goes_home() {
    let mut s = session();

    assert!(!put(&mut s, PieceId(0), 3, "large_top"));
    let p = s.board().piece(PieceId(0)).unwrap();
    assert_eq!(p.position(), p.spawn());
    assert!(!p.is_placed());
}

#[test]
fn test_mirror_slots_block_each_other() {
    let mut s = session();
    let para = s.board().slot_by_name("para").unwrap();
    let mirror = s.board().slot_by_name("para_mirror").unwrap();

    // 90° only fits the mirror slot; both slots sit at the same spot
    assert!(put(&mut s, PieceId(6), 2, "para_mirror"));
    assert!(s.board().is_occupied(mirror));
    assert!(!s.board().can_accept(para, PieceKind::Parallelogram, 0.0));

    s.undo().unwrap();
    assert!(s.board().can_accept(para, PieceKind::Parallelogram, 0.0));
    assert!(s.board().can_accept(mirror, PieceKind::Parallelogram, 90.0));
}

#[test]
fn test_reset_after_solving() {
    let mut s = session();
    assert!(put(&mut s, PieceId(5), 1, "square"));
    assert!(put(&mut s, PieceId(6), 0, "para"));

    let motions = s.reset();
    assert_eq!(motions.len(), 7);
    assert_eq!(s.snapshot().occupied_count(), 0);
    assert!(s.board().pieces().iter().all(|p| !p.is_placed()));
    assert!(s.undo().is_none());
}

#[test]
fn test_fixture_matches_config_parse() {
    let text = std::fs::read_to_string(fixture()).unwrap();
    let config = LayoutConfig::from_json(&text).unwrap();
    assert_eq!(config.slots[6].blocked_by, vec!["para_mirror".to_string()]);

    let built = config.build().unwrap();
    assert_eq!(built.board, load_layout(fixture()).unwrap().board);
}
