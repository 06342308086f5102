use crate::utils::{Tile, TileGrid, NOT_FOUND};

// How many columns ahead of Mario obstacles and platforms are looked for
const OBSTACLE_WINDOW: i32 = 6;
const PLATFORM_WINDOW: i32 = 6;
// Last row or column Mario can reach on the 16x20 game area. Smaller grids
// use their own last row and column.
const SCREEN_EDGE: i32 = 15;

/// The tile just past the top-left corner of the Mario sprite. All other scans
/// are relative to it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Anchor {
    pub row: i32,
    pub col: i32,
}

impl Anchor {
    // Mario has left the visible area, either dead or past the flag
    pub fn is_off_screen(self, grid: &TileGrid) -> bool {
        let last_row = SCREEN_EDGE.min(grid.rows() as i32 - 1);
        let last_col = SCREEN_EDGE.min(grid.cols() as i32 - 1);
        self.row >= last_row || self.col >= last_col
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EnemyObservation {
    pub row_offset: i32,
    pub col_offset: i32,
    pub tile: Tile,
}

impl EnemyObservation {
    pub const NOT_FOUND: Self = Self {
        row_offset: NOT_FOUND,
        col_offset: NOT_FOUND,
        tile: Tile::Other(NOT_FOUND as u8),
    };
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ObstacleObservation {
    pub col_offset: i32,
    pub height: i32,
}

impl ObstacleObservation {
    pub const NOT_FOUND: Self = Self {
        col_offset: NOT_FOUND,
        height: NOT_FOUND,
    };
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PlatformObservation {
    pub vertical_distance: i32,
    pub col_offset: i32,
}

impl PlatformObservation {
    pub const NOT_FOUND: Self = Self {
        vertical_distance: NOT_FOUND,
        col_offset: NOT_FOUND,
    };
}

/// A gap in the floor ahead and the first solid tile past it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PitObservation {
    pub col_offset: i32,
    // Rows above the anchor; negative when the far side is lower than Mario
    pub edge_height: i32,
    pub edge_span: i32,
}

impl PitObservation {
    pub const NOT_FOUND: Self = Self {
        col_offset: NOT_FOUND,
        edge_height: NOT_FOUND,
        edge_span: NOT_FOUND,
    };
}

/// Everything the policy gets to see about a single grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Observations {
    pub anchor: Anchor,
    pub off_screen: bool,
    pub airborne: bool,
    pub enemy: EnemyObservation,
    pub obstacle: ObstacleObservation,
    pub platform: PlatformObservation,
    pub pit: PitObservation,
}

impl Observations {
    pub fn extract(grid: &TileGrid) -> Self {
        let anchor = player_anchor(grid);
        Self {
            anchor,
            off_screen: anchor.is_off_screen(grid),
            airborne: is_airborne(grid, anchor),
            enemy: nearest_enemy(grid, anchor),
            obstacle: nearest_obstacle(grid, anchor),
            platform: platform_above(grid, anchor),
            pit: upcoming_pit(grid, anchor),
        }
    }
}

// First Mario tile in row-major order, shifted one tile down and right.
// Without a Mario tile the anchor stays at the origin.
pub fn player_anchor(grid: &TileGrid) -> Anchor {
    grid.iter_rows()
        .enumerate()
        .find_map(|(row, tiles)| {
            tiles
                .iter()
                .position(|&tile| tile == Tile::Mario)
                .map(|col| Anchor {
                    row: row as i32 + 1,
                    col: col as i32 + 1,
                })
        })
        .unwrap_or_default()
}

pub fn is_airborne(grid: &TileGrid, anchor: Anchor) -> bool {
    grid.is_air(anchor.row + 1, anchor.col)
}

// Rows are searched from Mario's row upwards so that enemies on the ground win
// over enemies in the air. Row 0 is never searched.
pub fn nearest_enemy(grid: &TileGrid, anchor: Anchor) -> EnemyObservation {
    let cols = grid.cols() as i32;
    for row in (1..=anchor.row).rev() {
        for col_offset in 0..(cols - anchor.col) {
            let tile = match grid.get(row, anchor.col + col_offset) {
                Some(tile) => tile,
                None => continue,
            };
            if tile.is_enemy_class() {
                return EnemyObservation {
                    row_offset: anchor.row - row,
                    col_offset,
                    tile,
                };
            }
        }
    }
    EnemyObservation::NOT_FOUND
}

// Height counts the ground tile under the obstacle, so a single block sitting
// on the floor is two high.
pub fn nearest_obstacle(grid: &TileGrid, anchor: Anchor) -> ObstacleObservation {
    for col_offset in 0..OBSTACLE_WINDOW {
        let col = anchor.col + col_offset;
        let tile = match grid.get(anchor.row, col) {
            Some(tile) => tile,
            None => break,
        };
        if tile.is_blocking() {
            let mut row = anchor.row;
            while grid.get(row, col).map_or(false, |tile| !tile.is_air()) {
                row -= 1;
            }
            return ObstacleObservation {
                col_offset,
                height: anchor.row - row + 1,
            };
        }
    }
    ObstacleObservation::NOT_FOUND
}

// A landing edge is a block or brick with air on top and air to its left.
pub fn platform_above(grid: &TileGrid, anchor: Anchor) -> PlatformObservation {
    for col_offset in 1..=PLATFORM_WINDOW {
        let col = anchor.col + col_offset;
        for row in 0..(anchor.row - 1) {
            let is_edge = grid.get(row, col).map_or(false, Tile::is_landing)
                && grid.is_air(row - 1, col)
                && grid.is_air(row, col - 1);
            if is_edge {
                return PlatformObservation {
                    vertical_distance: anchor.row - row,
                    col_offset,
                };
            }
        }
    }
    PlatformObservation::NOT_FOUND
}

// A pit column has air right under Mario's feet and on the bottom row, so a
// one-tile notch in the floor does not count.
pub fn upcoming_pit(grid: &TileGrid, anchor: Anchor) -> PitObservation {
    let cols = grid.cols() as i32;
    let bottom = grid.rows() as i32 - 1;
    for col_offset in 0..(cols - anchor.col) {
        let col = anchor.col + col_offset;
        if !(grid.is_air(anchor.row + 1, col) && grid.is_air(bottom, col)) {
            continue;
        }
        if let Some((edge_row, edge_col)) = far_edge(grid, col) {
            return PitObservation {
                col_offset,
                edge_height: anchor.row - edge_row,
                edge_span: edge_col - anchor.col,
            };
        }
    }
    PitObservation::NOT_FOUND
}

// Topmost row first, then leftmost column from the start of the gap
fn far_edge(grid: &TileGrid, from_col: i32) -> Option<(i32, i32)> {
    let (rows, cols) = (grid.rows() as i32, grid.cols() as i32);
    (0..rows).find_map(|row| {
        (from_col..cols)
            .find(|&col| grid.get(row, col).map_or(false, Tile::is_obstacle_class))
            .map(|col| (row, col))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> TileGrid {
        TileGrid::from_ascii(rows).unwrap()
    }

    #[test]
    fn anchor_is_offset_from_first_mario_tile() {
        let grid = grid(&["....", ".MM.", ".MM.", "####"]);
        assert_eq!(player_anchor(&grid), Anchor { row: 2, col: 2 });
    }

    #[test]
    fn missing_mario_anchors_at_origin() {
        let grid = grid(&["...", "###"]);
        assert_eq!(player_anchor(&grid), Anchor::default());
        let observations = Observations::extract(&grid);
        assert_eq!(observations.enemy, EnemyObservation::NOT_FOUND);
    }

    #[test]
    fn off_screen_past_column_fifteen_of_the_game_area() {
        let mut grid = TileGrid::new(16, 20);
        grid.set(12, 13, Tile::Mario);
        assert!(!player_anchor(&grid).is_off_screen(&grid));
        let mut grid = TileGrid::new(16, 20);
        grid.set(12, 14, Tile::Mario);
        assert_eq!(player_anchor(&grid), Anchor { row: 13, col: 15 });
        assert!(player_anchor(&grid).is_off_screen(&grid));
    }

    #[test]
    fn airborne_when_floor_is_missing() {
        let standing = grid(&["MM..", "MM..", "####"]);
        let falling = grid(&["MM..", "MM..", "....", "####"]);
        assert!(!is_airborne(&standing, player_anchor(&standing)));
        assert!(is_airborne(&falling, player_anchor(&falling)));
    }

    #[test]
    fn ground_enemy_wins_over_closer_flying_enemy() {
        let grid = grid(&[
            "........",
            "..b.....",
            "MM......",
            "MM....g.",
            "########",
        ]);
        let enemy = nearest_enemy(&grid, player_anchor(&grid));
        assert_eq!(
            enemy,
            EnemyObservation {
                row_offset: 0,
                col_offset: 5,
                tile: Tile::Goomba,
            }
        );
    }

    #[test]
    fn enemies_behind_mario_are_ignored() {
        let grid = grid(&["....", "gMM.", ".MM.", "####"]);
        assert_eq!(
            nearest_enemy(&grid, player_anchor(&grid)),
            EnemyObservation::NOT_FOUND
        );
    }

    #[test]
    fn obstacle_height_includes_the_ground_tile() {
        let grid = grid(&[
            "........",
            "........",
            "MM...P..",
            "MM...P..",
            "########",
        ]);
        assert_eq!(
            nearest_obstacle(&grid, player_anchor(&grid)),
            ObstacleObservation {
                col_offset: 4,
                height: 3,
            }
        );
    }

    #[test]
    fn obstacles_outside_the_window_are_not_seen() {
        let grid = grid(&["MM.......", "MM......#", "#########"]);
        assert_eq!(
            nearest_obstacle(&grid, player_anchor(&grid)),
            ObstacleObservation::NOT_FOUND
        );
    }

    #[test]
    fn obstacle_column_reaching_the_top_stops_at_the_edge() {
        let grid = grid(&["MM#", "MM#", "###"]);
        assert_eq!(
            nearest_obstacle(&grid, player_anchor(&grid)),
            ObstacleObservation {
                col_offset: 1,
                height: 3,
            }
        );
    }

    #[test]
    fn platform_needs_an_exposed_edge() {
        let grid = grid(&[
            "........",
            "....BBB.",
            "........",
            "MM......",
            "MM......",
            "########",
        ]);
        assert_eq!(
            platform_above(&grid, player_anchor(&grid)),
            PlatformObservation {
                vertical_distance: 3,
                col_offset: 3,
            }
        );
    }

    #[test]
    fn covered_blocks_are_not_platforms() {
        let grid = grid(&[
            "...BBB..",
            "...BBB..",
            "........",
            "MM......",
            "MM......",
            "########",
        ]);
        let platform = platform_above(&grid, player_anchor(&grid));
        assert_eq!(platform, PlatformObservation::NOT_FOUND);
    }

    #[test]
    fn pit_reports_start_and_far_edge() {
        let grid = grid(&[
            "..........",
            "..........",
            "MM........",
            "MM........",
            "###...####",
            "###...####",
        ]);
        assert_eq!(
            upcoming_pit(&grid, player_anchor(&grid)),
            PitObservation {
                col_offset: 2,
                edge_height: -1,
                edge_span: 5,
            }
        );
    }

    #[test]
    fn shallow_notch_is_not_a_pit() {
        let grid = grid(&["MM......", "MM......", "###..###", "########"]);
        assert_eq!(
            upcoming_pit(&grid, player_anchor(&grid)),
            PitObservation::NOT_FOUND
        );
    }

    #[test]
    fn extraction_is_repeatable() {
        let grid = grid(&[
            "....BB....",
            "..........",
            "MM.....k..",
            "MM...#....",
            "####..####",
        ]);
        assert_eq!(Observations::extract(&grid), Observations::extract(&grid));
    }
}
