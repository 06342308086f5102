use crate::error::{Error, Result};

use serde::{Deserialize, Serialize};

use std::fmt;

// Returned by every extractor when nothing is found inside its scan window
pub const NOT_FOUND: i32 = 100;

// Sprite codes as reported by the game area. The ordering matters: every code
// from Goomba upwards is an enemy, and Block..=Pipe is the solid range.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Tile {
    Air,
    Mario,
    Block,
    MovingPlatform,
    Brick,
    PowerupBlock,
    Pipe,
    Goomba,
    Koopa,
    Fly,
    Bee,
    Shell,
    // Codes the game reports that have no name of their own
    Other(u8),
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Air
    }
}

impl From<u8> for Tile {
    fn from(code: u8) -> Self {
        use self::Tile::*;

        match code {
            0 => Air,
            1 => Mario,
            10 => Block,
            11 => MovingPlatform,
            12 => Brick,
            13 => PowerupBlock,
            14 => Pipe,
            15 => Goomba,
            16 => Koopa,
            18 => Fly,
            19 => Bee,
            25 => Shell,
            other => Other(other),
        }
    }
}

impl Tile {
    pub fn code(self) -> u8 {
        use self::Tile::*;

        match self {
            Air => 0,
            Mario => 1,
            Block => 10,
            MovingPlatform => 11,
            Brick => 12,
            PowerupBlock => 13,
            Pipe => 14,
            Goomba => 15,
            Koopa => 16,
            Fly => 18,
            Bee => 19,
            Shell => 25,
            Other(code) => code,
        }
    }

    pub fn is_air(self) -> bool {
        self == Tile::Air
    }

    // Goombas, koopas, flies, bees, shells and anything coded above them
    pub fn is_enemy_class(self) -> bool {
        self.code() >= Tile::Goomba.code()
    }

    // Enemies that walk along the ground (coded below the fly)
    pub fn is_ground_enemy(self) -> bool {
        self.is_enemy_class() && self.code() < Tile::Fly.code()
    }

    // The airborne hazard that needs a long jump to clear
    pub fn is_flying_enemy(self) -> bool {
        self == Tile::Bee
    }

    // Anything from a block to a pipe, inclusive
    pub fn is_obstacle_class(self) -> bool {
        self.code() >= Tile::Block.code() && self.code() <= Tile::Pipe.code()
    }

    // Tiles that stop Mario walking forward
    pub fn is_blocking(self) -> bool {
        match self {
            Tile::Block | Tile::Brick | Tile::Pipe => true,
            _ => false,
        }
    }

    // Tiles with a top Mario can land on
    pub fn is_landing(self) -> bool {
        match self {
            Tile::Block | Tile::Brick => true,
            _ => false,
        }
    }

    pub fn glyph(self) -> char {
        use self::Tile::*;

        match self {
            Air => '.',
            Mario => 'M',
            Block => '#',
            MovingPlatform => '=',
            Brick => 'B',
            PowerupBlock => '?',
            Pipe => 'P',
            Goomba => 'g',
            Koopa => 'k',
            Fly => 'f',
            Bee => 'b',
            Shell => 's',
            Other(_) => '*',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Tile> {
        use self::Tile::*;

        let tile = match glyph {
            '.' => Air,
            'M' => Mario,
            '#' => Block,
            '=' => MovingPlatform,
            'B' => Brick,
            '?' => PowerupBlock,
            'P' => Pipe,
            'g' => Goomba,
            'k' => Koopa,
            'f' => Fly,
            'b' => Bee,
            's' => Shell,
            _ => return None,
        };
        Some(tile)
    }
}

/// A single snapshot of the game area, stored row-major.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            tiles: vec![Tile::Air; rows * cols],
        }
    }

    /// Builds a grid from raw sprite codes. Every row must have the same
    /// non-zero length.
    pub fn from_codes<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        if cols == 0 {
            return Err(Error::EmptyGrid);
        }
        let mut tiles = Vec::with_capacity(rows.len() * cols);
        for (row, codes) in rows.iter().enumerate() {
            let codes = codes.as_ref();
            if codes.len() != cols {
                return Err(Error::RaggedGrid {
                    row,
                    expected: cols,
                    found: codes.len(),
                });
            }
            tiles.extend(codes.iter().map(|&code| Tile::from(code)));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            tiles,
        })
    }

    /// Builds a grid from one string per row using the glyphs of
    /// `Tile::glyph`. Unknown glyphs are read as air.
    pub fn from_ascii<R: AsRef<str>>(rows: &[R]) -> Result<Self> {
        let codes: Vec<Vec<u8>> = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .map(|glyph| Tile::from_glyph(glyph).unwrap_or_default().code())
                    .collect()
            })
            .collect();
        Self::from_codes(&codes)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Signed lookup so scans can step past any edge; outside cells are `None`.
    pub fn get(&self, row: i32, col: i32) -> Option<Tile> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(self.tiles[row as usize * self.cols + col as usize])
    }

    pub fn set(&mut self, row: usize, col: usize, tile: Tile) {
        assert!(row < self.rows && col < self.cols, "tile out of bounds");
        self.tiles[row * self.cols + col] = tile;
    }

    pub fn is_air(&self, row: i32, col: i32) -> bool {
        self.get(row, col).map_or(false, Tile::is_air)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.cols.max(1))
    }

    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.iter_rows()
            .map(|row| row.iter().map(|tile| tile.code()).collect())
            .collect()
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            let line: String = row.iter().map(|tile| tile.glyph()).collect();
            writeln!(formatter, "{}", line)?;
        }
        Ok(())
    }
}

impl Serialize for TileGrid {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_codes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TileGrid {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let codes = Vec::<Vec<u8>>::deserialize(deserializer)?;
        TileGrid::from_codes(&codes).map_err(serde::de::Error::custom)
    }
}

// Rounded up so an action is never held for less than the estimated clearance
pub fn pythagorean_distance(a: i32, b: i32) -> i32 {
    let (a, b) = (f64::from(a), f64::from(b));
    (a * a + b * b).sqrt().ceil() as i32
}
