use crate::core::{Direction, Grid, Tile, Vec2};

impl Tile {
    pub fn is_box(self) -> bool {
        matches!(self, Tile::Box | Tile::BoxOnTarget)
    }

    pub fn is_player(self) -> bool {
        matches!(self, Tile::Player | Tile::PlayerOnTarget)
    }

    pub fn has_target(self) -> bool {
        matches!(self, Tile::Target | Tile::PlayerOnTarget | Tile::BoxOnTarget)
    }

    /// What remains once the player or box standing here leaves.
    pub fn vacated(self) -> Tile {
        if self.has_target() { Tile::Target } else { Tile::Empty }
    }

    /// The tile after the player steps onto this (already cleared) cell.
    pub fn with_player(self) -> Tile {
        if self.has_target() { Tile::PlayerOnTarget } else { Tile::Player }
    }

    pub fn with_box(self) -> Tile {
        if self.has_target() { Tile::BoxOnTarget } else { Tile::Box }
    }

    pub fn glyph(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => '#',
            Tile::Box => '$',
            Tile::Target => '.',
            Tile::Player => '@',
            Tile::PlayerOnTarget => '+',
            Tile::BoxOnTarget => '*',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Tile> {
        Some(match glyph {
            ' ' => Tile::Empty,
            '#' => Tile::Wall,
            '$' => Tile::Box,
            '.' => Tile::Target,
            '@' => Tile::Player,
            '+' => Tile::PlayerOnTarget,
            '*' => Tile::BoxOnTarget,
            _ => return None,
        })
    }
}

impl Direction {
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

pub fn vec_from_dir(dir: Direction) -> Vec2 {
    match dir {
        Direction::Up => Vec2 { i: -1, j: 0 },
        Direction::Down => Vec2 { i: 1, j: 0 },
        Direction::Left => Vec2 { i: 0, j: -1 },
        Direction::Right => Vec2 { i: 0, j: 1 },
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { i: self.i + rhs.i, j: self.j + rhs.j }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 { i: self.i - rhs.i, j: self.j - rhs.j }
    }
}

/// True once no bare target and no player-on-target remains.
pub fn is_won(grid: &Grid) -> bool {
    for row in grid.rows() {
        for &c in row {
            if c == Tile::Target || c == Tile::PlayerOnTarget {
                return false;
            }
        }
    }
    true
}

pub fn find_players(grid: &Grid) -> Vec<Vec2> {
    grid.positions_where(|t| t.is_player()).collect()
}
