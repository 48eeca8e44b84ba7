//! Movement-range scenarios exercising the passage shortcuts.

use hexhall_board::{query, Board};
use hexhall_core::{
    BoardDefinition, DrawPos, HexCoord, SpaceDefinition, SpaceKind, TokenDefinition, TokenId,
    TokenState, TraversalRules,
};
use hexhall_system_pathing::{distances_from, movement_range};

fn coord(q: i32, r: i32) -> HexCoord {
    HexCoord::new(q, r)
}

/// A floor corridor ending in a passage, plus a second passage far away
/// next to its own pocket of floor:
///
/// (0,0)-(1,0)-(2,0)-(3,0 passage)   (9,0 passage)-(10,0)
fn split_board(door_closed: bool) -> Board {
    let spaces = [
        (0, 0, SpaceKind::Floor),
        (1, 0, SpaceKind::Floor),
        (2, 0, SpaceKind::Floor),
        (3, 0, SpaceKind::Passage),
        (9, 0, SpaceKind::Passage),
        (10, 0, SpaceKind::Floor),
    ];
    let links = [
        ((0, 0), (1, 0)),
        ((1, 0), (2, 0)),
        ((2, 0), (3, 0)),
        ((9, 0), (10, 0)),
    ];
    let definition = BoardDefinition {
        spaces: spaces
            .iter()
            .map(|&(q, r, kind)| SpaceDefinition {
                coord: coord(q, r),
                kind,
                position: DrawPos::new(q as f32, r as f32),
            })
            .collect(),
        links: links
            .iter()
            .map(|&((aq, ar), (bq, br))| (coord(aq, ar), coord(bq, br)))
            .collect(),
    };
    let tokens = vec![TokenDefinition {
        id: TokenId::new(1),
        state: TokenState::Door {
            closed: door_closed,
        },
        start_space: Some(coord(9, 0)),
    }];

    let mut board = Board::from_definitions(&definition, &tokens).expect("valid fixture");
    board.compute_exits().expect("no gates");
    board.compute_passages().expect("door on passage");
    board.update_reachable(TraversalRules {
        with_exits: true,
        with_passages: true,
        with_walls: false,
    });
    board
}

#[test]
fn range_crosses_the_passage_shortcut() {
    let board = split_board(false);
    let view = query::reachable_view(&board);

    // (0,0) → (3,0) is three board steps; the shortcut makes the far
    // passage a fourth and its floor pocket a fifth.
    let range = movement_range(view, coord(0, 0), 4);
    assert!(range.contains(&coord(3, 0)));
    assert!(range.contains(&coord(9, 0)));
    assert!(!range.contains(&coord(10, 0)));

    let range = movement_range(view, coord(0, 0), 5);
    assert!(range.contains(&coord(10, 0)));
}

#[test]
fn closed_door_cuts_the_shortcut() {
    let board = split_board(true);
    let view = query::reachable_view(&board);

    // The sealed passage stays traversable by board adjacency but offers
    // no shortcut, so the far pocket is unreachable from the corridor.
    let distances = distances_from(view, coord(0, 0));
    assert_eq!(distances.get(&coord(3, 0)), Some(&3));
    assert_eq!(distances.get(&coord(9, 0)), None);
    assert_eq!(distances.get(&coord(10, 0)), None);
}

#[test]
fn range_includes_the_origin_at_zero_steps() {
    let board = split_board(false);
    let view = query::reachable_view(&board);

    let range = movement_range(view, coord(1, 0), 0);
    assert_eq!(range.into_iter().collect::<Vec<_>>(), vec![coord(1, 0)]);
}

#[test]
fn origin_outside_the_subgraph_yields_nothing() {
    let board = split_board(false);
    let view = query::reachable_view(&board);

    assert!(movement_range(view, coord(7, 7), 3).is_empty());
    assert!(distances_from(view, coord(7, 7)).is_empty());
}

#[test]
fn distances_match_board_steps_along_the_corridor() {
    let board = split_board(false);
    let view = query::reachable_view(&board);

    let distances = distances_from(view, coord(0, 0));
    assert_eq!(distances.get(&coord(0, 0)), Some(&0));
    assert_eq!(distances.get(&coord(1, 0)), Some(&1));
    assert_eq!(distances.get(&coord(2, 0)), Some(&2));
    assert_eq!(distances.get(&coord(3, 0)), Some(&3));
    assert_eq!(distances.get(&coord(9, 0)), Some(&4));
    assert_eq!(distances.get(&coord(10, 0)), Some(&5));
}
