use advent::helpers;
use anyhow::Result;
use derive_more::Display;
use helpers::grid::{Direction, Grid, GridPos};
use std::collections::{HashSet, VecDeque};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
enum Tile {
    #[display(fmt = ".")]
    Empty,
    #[display(fmt = "/")]
    ForwardMirror,
    #[display(fmt = "\\")]
    BackwardMirror,
    #[display(fmt = "|")]
    VerticalSplitter,
    #[display(fmt = "-")]
    HorizontalSplitter,
}

impl FromStr for Tile {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next() {
            Some('.') => Ok(Tile::Empty),
            Some('/') => Ok(Tile::ForwardMirror),
            Some('\\') => Ok(Tile::BackwardMirror),
            Some('|') => Ok(Tile::VerticalSplitter),
            Some('-') => Ok(Tile::HorizontalSplitter),
            _ => anyhow::bail!("Invalid contraption tile"),
        }
    }
}

impl Tile {
    fn outgoing(&self, heading: Direction) -> Vec<Direction> {
        use Direction::*;
        match (self, heading) {
            (Tile::ForwardMirror, Right) | (Tile::ForwardMirror, Left) => {
                vec![heading.turn_left()]
            }
            (Tile::ForwardMirror, _) => vec![heading.turn_right()],
            (Tile::BackwardMirror, Right) | (Tile::BackwardMirror, Left) => {
                vec![heading.turn_right()]
            }
            (Tile::BackwardMirror, _) => vec![heading.turn_left()],
            (Tile::VerticalSplitter, Left) | (Tile::VerticalSplitter, Right) => vec![Up, Down],
            (Tile::HorizontalSplitter, Up) | (Tile::HorizontalSplitter, Down) => vec![Left, Right],
            _ => vec![heading],
        }
    }
}

type Contraption = Grid<Tile>;
type Beam = (GridPos, Direction);

fn energized_count(contraption: &Contraption, start: Beam) -> usize {
    let mut seen: HashSet<Beam> = HashSet::new();
    let mut queue = VecDeque::from(vec![start]);
    while let Some(beam @ (pos, heading)) = queue.pop_front() {
        if !seen.insert(beam) {
            continue;
        }
        for next_heading in contraption[pos].outgoing(heading) {
            if let Some(next_pos) = contraption.step(pos, next_heading) {
                queue.push_back((next_pos, next_heading));
            }
        }
    }
    seen.iter().map(|(pos, _)| pos).collect::<HashSet<_>>().len()
}

fn edge_beams(contraption: &Contraption) -> Vec<Beam> {
    let (rows, cols) = (contraption.rows(), contraption.cols());
    let from_sides = (0..rows).flat_map(|r| {
        [
            ((r, 0), Direction::Right),
            ((r, cols - 1), Direction::Left),
        ]
    });
    let from_top_bottom = (0..cols).flat_map(|c| {
        [
            ((0, c), Direction::Down),
            ((rows - 1, c), Direction::Up),
        ]
    });
    from_sides.chain(from_top_bottom).collect()
}

fn energized_from_top_left(s: &str) -> Result<usize> {
    let contraption = s.parse::<Contraption>()?;
    Ok(energized_count(&contraption, ((0, 0), Direction::Right)))
}

fn max_energized(s: &str) -> Result<usize> {
    let contraption = s.parse::<Contraption>()?;
    Ok(edge_beams(&contraption)
        .into_iter()
        .map(|beam| energized_count(&contraption, beam))
        .max()
        .unwrap_or_default())
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d16")?;
    let count = energized_from_top_left(&input)?;
    println!("Tiles energized by the beam: {}", count);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d16")?;
    let count = max_energized(&input)?;
    println!("Most tiles energized by any edge beam: {}", count);
    Ok(())
}

fn main() -> Result<()> {
    solve_p1()?;
    solve_p2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use more_asserts::assert_ge;

    const INPUT: &str = r"
.|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....";

    #[test]
    fn test_p1() {
        assert_eq!(energized_from_top_left(INPUT).unwrap(), 46);
    }

    #[test]
    fn test_p2() {
        assert_eq!(max_energized(INPUT).unwrap(), 51);
    }

    #[test]
    fn test_edge_beams() {
        let contraption = INPUT.parse::<Contraption>().unwrap();
        let beams = edge_beams(&contraption);
        assert_eq!(beams.len(), 40);
        assert!(beams.contains(&((0, 0), Direction::Right)));
        assert!(beams.contains(&((9, 3), Direction::Up)));
        let from_corner = energized_count(&contraption, ((0, 0), Direction::Right));
        for beam in beams {
            assert_ge!(51, energized_count(&contraption, beam));
            assert_ge!(energized_count(&contraption, beam), 1);
        }
        assert_ge!(51, from_corner);
    }

    #[test]
    fn test_mirror_reflections() {
        use Direction::*;
        assert_eq!(Tile::ForwardMirror.outgoing(Right), vec![Up]);
        assert_eq!(Tile::ForwardMirror.outgoing(Down), vec![Left]);
        assert_eq!(Tile::BackwardMirror.outgoing(Right), vec![Down]);
        assert_eq!(Tile::BackwardMirror.outgoing(Up), vec![Left]);
        assert_eq!(Tile::VerticalSplitter.outgoing(Up), vec![Up]);
        assert_eq!(Tile::HorizontalSplitter.outgoing(Down), vec![Left, Right]);
    }
}
