use mario_expert::ai::features::{Anchor, Observations};
use mario_expert::ai::policy::{self, Action, Command, Rule};
use mario_expert::ai::Expert;
use mario_expert::utils::TileGrid;

const SKY: &str = "....................";
const GROUND: &str = "####################";

// A 16x20 game area with Mario standing on the ground at rows 12-13, columns
// 3-4. `rows` replaces the bottom rows of the sky, ending just above ground.
fn level(rows: &[&str]) -> TileGrid {
    let mut area = vec![SKY; 14 - rows.len()];
    area.extend_from_slice(rows);
    area.push(GROUND);
    area.push(GROUND);
    TileGrid::from_ascii(&area).unwrap()
}

#[test]
fn test_anchor_is_mario_bottom_right() {
    let grid = level(&["...MM...............", "...MM..............."]);
    let observations = Observations::extract(&grid);
    assert_eq!(observations.anchor, Anchor { row: 13, col: 4 });
    assert!(!observations.airborne);
    assert!(!observations.off_screen);
}

#[test]
fn test_open_ground_walks_right() {
    let grid = level(&["...MM...............", "...MM..............."]);
    assert_eq!(Expert::new().choose_action(&grid), Command::new(Action::Right, 1));
}

#[test]
fn test_jumps_over_block_next_to_mario() {
    let grid = level(&["...MM...............", "...MM#.............."]);
    let observations = Observations::extract(&grid);
    assert_eq!(observations.obstacle.col_offset, 1);
    assert_eq!(observations.obstacle.height, 2);
    assert_eq!(Expert::new().choose_action(&grid), Command::new(Action::Jump, 4));
}

#[test]
fn test_steps_back_from_goomba_after_jumping() {
    let grid = level(&["...MM...............", "...MMg.............."]);
    let observations = Observations::extract(&grid);
    assert_eq!(Rule::select(&observations), Rule::GroundEnemy);
    assert_eq!(
        policy::choose(&observations, Some(Action::Jump)),
        Command::new(Action::Left, 1)
    );

    let mut expert = Expert::new();
    assert_eq!(expert.choose_action(&grid), Command::new(Action::Jump, 1));
    assert_eq!(expert.choose_action(&grid), Command::new(Action::Left, 1));
}

#[test]
fn test_jumps_pit_towards_far_edge() {
    let grid = TileGrid::from_ascii(&[
        SKY,
        SKY,
        SKY,
        SKY,
        SKY,
        SKY,
        SKY,
        SKY,
        "........P...........",
        "........P...........",
        "........P...........",
        "........P...........",
        "...MM...P...........",
        "...MM...P...........",
        "#####...P###########",
        "#####...P###########",
    ])
    .unwrap();
    let observations = Observations::extract(&grid);
    assert_eq!(observations.pit.col_offset, 1);
    assert_eq!(observations.pit.edge_height, 5);
    assert_eq!(observations.pit.edge_span, 4);
    assert_eq!(Rule::select(&observations), Rule::Pit);
    assert_eq!(Expert::new().choose_action(&grid), Command::new(Action::Jump, 7));
}

#[test]
fn test_jumps_onto_brick_platform() {
    let grid = level(&[
        "......BBBB..........",
        "....................",
        "....................",
        "...MM...............",
        "...MM...............",
    ]);
    let observations = Observations::extract(&grid);
    assert_eq!(Rule::select(&observations), Rule::Platform);
    assert_eq!(Expert::new().choose_action(&grid), Command::new(Action::Jump, 12));
}

#[test]
fn test_long_jump_under_bee() {
    let grid = level(&[
        "......b.............",
        "....................",
        "...MM...............",
        "...MM...............",
    ]);
    assert_eq!(Expert::new().choose_action(&grid), Command::new(Action::Jump, 13));
}

#[test]
fn test_off_screen_mario_walks_right() {
    let mut area = vec![SKY; 14];
    area.push("...MM#..............");
    area.push("...MM#..............");
    let falling = TileGrid::from_ascii(&area).unwrap();
    let mut expert = Expert::new();
    assert_eq!(expert.choose_action(&falling), Command::WALK);

    let at_right_edge = level(&["..................MM", "..................MM"]);
    assert!(Observations::extract(&at_right_edge).off_screen);
    assert_eq!(
        policy::choose(&Observations::extract(&at_right_edge), Some(Action::Jump)),
        Command::WALK
    );
}

#[test]
fn test_repeated_jump_is_broken_up() {
    let grid = level(&["...MM...............", "...MM#.............."]);
    let mut expert = Expert::new();
    let emitted: Vec<Command> = (0..4).map(|_| expert.choose_action(&grid)).collect();
    assert_eq!(
        emitted,
        vec![
            Command::new(Action::Jump, 4),
            Command::WALK,
            Command::new(Action::Jump, 4),
            Command::WALK,
        ]
    );
}

#[test]
fn test_past_column_fifteen_walks_right_over_blocks() {
    let grid = level(&["...............MM...", "...............MM#.."]);
    let observations = Observations::extract(&grid);
    assert_eq!(observations.anchor, Anchor { row: 13, col: 16 });
    assert!(observations.off_screen);
    assert_eq!(Expert::new().choose_action(&grid), Command::WALK);

    let before_the_edge = level(&["............MM......", "............MM#....."]);
    assert!(!Observations::extract(&before_the_edge).off_screen);
    assert_eq!(
        Expert::new().choose_action(&before_the_edge),
        Command::new(Action::Jump, 4)
    );
}
