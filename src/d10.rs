use advent::helpers;
use anyhow::{Context, Result};
use derive_more::Display;
use helpers::grid::{Direction, Grid, GridPos};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
enum Tile {
    #[display(fmt = "|")]
    Vertical,
    #[display(fmt = "-")]
    Horizontal,
    #[display(fmt = "L")]
    NorthEast,
    #[display(fmt = "J")]
    NorthWest,
    #[display(fmt = "7")]
    SouthWest,
    #[display(fmt = "F")]
    SouthEast,
    #[display(fmt = ".")]
    Ground,
    #[display(fmt = "S")]
    Start,
}

impl FromStr for Tile {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next() {
            None => anyhow::bail!("No tile character"),
            Some('|') => Ok(Tile::Vertical),
            Some('-') => Ok(Tile::Horizontal),
            Some('L') => Ok(Tile::NorthEast),
            Some('J') => Ok(Tile::NorthWest),
            Some('7') => Ok(Tile::SouthWest),
            Some('F') => Ok(Tile::SouthEast),
            Some('.') => Ok(Tile::Ground),
            Some('S') => Ok(Tile::Start),
            Some(c) => anyhow::bail!("Invalid tile char: {}", c),
        }
    }
}

impl Tile {
    fn connections(&self) -> &'static [Direction] {
        use Direction::*;
        match self {
            Tile::Vertical => &[Up, Down],
            Tile::Horizontal => &[Left, Right],
            Tile::NorthEast => &[Up, Right],
            Tile::NorthWest => &[Up, Left],
            Tile::SouthWest => &[Down, Left],
            Tile::SouthEast => &[Down, Right],
            Tile::Ground => &[],
            Tile::Start => &Direction::CARDINALS,
        }
    }

    fn connects(&self, direction: Direction) -> bool {
        self.connections().contains(&direction)
    }
}

type MyGrid = Grid<Tile>;

fn walk_loop(grid: &MyGrid, start: GridPos, first_direction: Direction) -> Option<Vec<GridPos>> {
    let mut direction = first_direction;
    let mut pos = start;
    let mut path = vec![];
    loop {
        path.push(pos);
        pos = grid
            .step(pos, direction)
            .filter(|&p| grid[p].connects(direction.opposite()))?;
        if pos == start {
            return Some(path);
        }
        let came_from = direction.opposite();
        direction = *grid[pos].connections().iter().find(|&&d| d != came_from)?;
    }
}

/// Positions of the main loop, in walking order, starting at S.
fn find_loop(grid: &MyGrid) -> Result<Vec<GridPos>> {
    let start = grid
        .find(|t| *t == Tile::Start)
        .context("No start tile")?;
    Direction::CARDINALS
        .iter()
        .find_map(|&d| walk_loop(grid, start, d))
        .context("No loop goes through the start tile")
}

fn farthest_loop_distance(s: &str) -> Result<usize> {
    let grid = s.parse::<MyGrid>()?;
    Ok(find_loop(&grid)?.len() / 2)
}

/// Shoelace formula gives the area of the loop polygon, Pick's theorem
/// turns it into the count of interior lattice points.
fn enclosed_tile_count(s: &str) -> Result<usize> {
    let grid = s.parse::<MyGrid>()?;
    let path = find_loop(&grid)?;
    let twice_area: i64 = path
        .iter()
        .zip(path.iter().cycle().skip(1))
        .map(|(&(r1, c1), &(r2, c2))| c1 as i64 * r2 as i64 - c2 as i64 * r1 as i64)
        .sum();
    let area = twice_area.abs() / 2;
    Ok((area - path.len() as i64 / 2 + 1) as usize)
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d10")?;
    let steps = farthest_loop_distance(&input)?;
    println!("Steps to the farthest point of the loop: {}", steps);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d10")?;
    let count = enclosed_tile_count(&input)?;
    println!("Tiles enclosed by the loop: {}", count);
    Ok(())
}

fn main() -> Result<()> {
    solve_p1()?;
    solve_p2()
}
