use std::str::FromStr;
use thiserror::Error;

/// A rectangular map stored row-major, indexed by `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    g: Vec<T>,
}
pub type GridPos = (usize, usize);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid has no rows")]
    Empty,
    #[error("Row {row} has {found} tiles, expected {expected}")]
    InconsistentRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
}

pub struct GridPosIter<'a, T> {
    grid: &'a Grid<T>,
    next_index: usize,
}

impl<T> std::ops::Index<GridPos> for Grid<T> {
    type Output = T;
    fn index(&self, index: GridPos) -> &Self::Output {
        let i = self.cols * index.0 + index.1;
        &self.g[i]
    }
}

impl<T> std::ops::IndexMut<GridPos> for Grid<T> {
    fn index_mut(&mut self, index: GridPos) -> &mut Self::Output {
        let i = self.cols * index.0 + index.1;
        &mut self.g[i]
    }
}

impl<T> FromStr for Grid<T>
where
    T: FromStr,
    anyhow::Error: From<T::Err>,
{
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let cols = s
            .lines()
            .next()
            .map(|l| l.trim().chars().count())
            .filter(|&c| c > 0)
            .ok_or(GridError::Empty)?;
        let mut rows = 0;
        let mut g = Vec::with_capacity(s.len());
        for (row, l) in s.lines().map(str::trim).enumerate() {
            let found = l.chars().count();
            if found != cols {
                return Err(GridError::InconsistentRow {
                    row,
                    expected: cols,
                    found,
                }
                .into());
            }
            let tiles = l
                .chars()
                .map(|c| c.to_string().parse::<T>())
                .collect::<Result<Vec<T>, _>>()?;
            g.extend(tiles);
            rows += 1;
        }
        Ok(Grid { rows, cols, g })
    }
}

impl<T> std::fmt::Display for Grid<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                write!(f, "{}", self[(r, c)])?;
            }
            if r != self.rows - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::UpLeft,
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
    ];

    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::UpLeft => (-1, -1),
            Direction::Up => (-1, 0),
            Direction::UpRight => (-1, 1),
            Direction::Right => (0, 1),
            Direction::DownRight => (1, 1),
            Direction::Down => (1, 0),
            Direction::DownLeft => (1, -1),
            Direction::Left => (0, -1),
        }
    }

    fn rotate(self, eighths: usize) -> Direction {
        let i = Direction::ALL
            .iter()
            .position(|&d| d == self)
            .unwrap_or_default();
        Direction::ALL[(i + eighths) % 8]
    }

    pub fn turn_right(self) -> Direction {
        self.rotate(2)
    }

    pub fn turn_left(self) -> Direction {
        self.rotate(6)
    }

    pub fn opposite(self) -> Direction {
        self.rotate(4)
    }
}

impl<'a, T> std::iter::Iterator for GridPosIter<'a, T> {
    type Item = GridPos;
    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.grid.g.len() {
            return None;
        }
        let current_index = self.next_index;
        self.next_index += 1;
        Some((
            current_index / self.grid.cols,
            current_index % self.grid.cols,
        ))
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, r: usize) -> &[T] {
        &self.g[r * self.cols..(r + 1) * self.cols]
    }

    pub fn pos_iter(&self) -> GridPosIter<T> {
        GridPosIter {
            grid: self,
            next_index: 0,
        }
    }

    pub fn find<P>(&self, mut predicate: P) -> Option<GridPos>
    where
        P: FnMut(&T) -> bool,
    {
        self.pos_iter().find(|&pos| predicate(&self[pos]))
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.0 < self.rows && pos.1 < self.cols
    }

    /// Moves one tile in `direction`, or returns `None` when that leaves the grid.
    pub fn step(&self, pos: GridPos, direction: Direction) -> Option<GridPos> {
        let (r_delta, c_delta) = direction.delta();
        let new_pos = (
            pos.0.wrapping_add(r_delta as usize),
            pos.1.wrapping_add(c_delta as usize),
        );
        self.contains(new_pos).then(|| new_pos)
    }

    pub fn neighbours<'a>(
        &'a self,
        pos: GridPos,
        directions: &'a [Direction],
    ) -> impl Iterator<Item = GridPos> + 'a {
        directions.iter().filter_map(move |&d| self.step(pos, d))
    }

    pub fn transposed(&self) -> Grid<T>
    where
        T: Clone,
    {
        let g = (0..self.cols)
            .flat_map(|c| (0..self.rows).map(move |r| (r, c)))
            .map(|pos| self[pos].clone())
            .collect();
        Grid {
            rows: self.cols,
            cols: self.rows,
            g,
        }
    }

    /// The west edge becomes the north edge.
    pub fn rotated_clockwise(&self) -> Grid<T>
    where
        T: Clone,
    {
        let g = (0..self.cols)
            .flat_map(|c| (0..self.rows).rev().map(move |r| (r, c)))
            .map(|pos| self[pos].clone())
            .collect();
        Grid {
            rows: self.cols,
            cols: self.rows,
            g,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Cell(char);

    impl FromStr for Cell {
        type Err = anyhow::Error;
        fn from_str(s: &str) -> Result<Self, Self::Err> {
            s.chars()
                .next()
                .map(Cell)
                .ok_or_else(|| anyhow::anyhow!("No tile character"))
        }
    }

    impl std::fmt::Display for Cell {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[test]
    fn test_parse_and_display() {
        let input = "
abc
def";
        let grid = input.parse::<Grid<Cell>>().unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid[(1, 2)], Cell('f'));
        assert_eq!(grid.to_string(), "abc\ndef");
    }

    #[test]
    fn test_parse_errors() {
        let err = "abc\nde".parse::<Grid<Cell>>().unwrap_err();
        assert_eq!(
            err.downcast_ref::<GridError>(),
            Some(&GridError::InconsistentRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        let err = "  ".parse::<Grid<Cell>>().unwrap_err();
        assert_eq!(err.downcast_ref::<GridError>(), Some(&GridError::Empty));
    }

    #[test]
    fn test_steps_and_neighbours() {
        let grid = "abc\ndef\nghi".parse::<Grid<Cell>>().unwrap();
        assert_eq!(grid.step((0, 0), Direction::Up), None);
        assert_eq!(grid.step((0, 0), Direction::DownRight), Some((1, 1)));
        assert_eq!(grid.neighbours((0, 0), &Direction::ALL).count(), 3);
        assert_eq!(grid.neighbours((1, 1), &Direction::ALL).count(), 8);
        assert_eq!(grid.neighbours((1, 1), &Direction::CARDINALS).count(), 4);
        assert_eq!(grid.find(|c| c.0 == 'h'), Some((2, 1)));
        assert_eq!(grid.pos_iter().count(), 9);
    }

    #[test]
    fn test_directions() {
        assert_eq!(Direction::Up.turn_right(), Direction::Right);
        assert_eq!(Direction::Up.turn_left(), Direction::Left);
        assert_eq!(Direction::Left.turn_right(), Direction::Up);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::UpLeft.opposite(), Direction::DownRight);
    }

    #[test]
    fn test_transforms() {
        let grid = "ab\ncd\nef".parse::<Grid<Cell>>().unwrap();
        assert_eq!(grid.transposed().to_string(), "ace\nbdf");
        assert_eq!(grid.rotated_clockwise().to_string(), "eca\nfdb");
        assert_eq!(grid.row(1), &[Cell('c'), Cell('d')]);
    }
}
