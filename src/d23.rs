use advent::helpers;
use anyhow::{Context, Result};
use derive_more::Display;
use helpers::grid::{Direction, Grid, GridPos};
use petgraph::graphmap::DiGraphMap;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
enum Tile {
    #[display(fmt = ".")]
    Path,
    #[display(fmt = "#")]
    Forest,
    #[display(fmt = "{}", "slope_char(*_0)")]
    Slope(Direction),
}

fn slope_char(d: Direction) -> char {
    match d {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        _ => '>',
    }
}

impl FromStr for Tile {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next() {
            Some('.') => Ok(Tile::Path),
            Some('#') => Ok(Tile::Forest),
            Some('^') => Ok(Tile::Slope(Direction::Up)),
            Some('v') => Ok(Tile::Slope(Direction::Down)),
            Some('<') => Ok(Tile::Slope(Direction::Left)),
            Some('>') => Ok(Tile::Slope(Direction::Right)),
            _ => anyhow::bail!("Invalid trail tile"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slopes {
    Slippery,
    Climbable,
}

type TrailMap = Grid<Tile>;
/// Junctions connected by the length of the corridor between them.
type TrailGraph = DiGraphMap<usize, usize>;

fn moves(map: &TrailMap, pos: GridPos, slopes: Slopes) -> Vec<GridPos> {
    let directions: &[Direction] = match (map[pos], slopes) {
        (Tile::Slope(d), Slopes::Slippery) => match d {
            Direction::Up => &[Direction::Up],
            Direction::Down => &[Direction::Down],
            Direction::Left => &[Direction::Left],
            _ => &[Direction::Right],
        },
        _ => &Direction::CARDINALS,
    };
    map.neighbours(pos, directions)
        .filter(|&p| map[p] != Tile::Forest)
        .collect()
}

fn entry_in_row(map: &TrailMap, r: usize) -> Result<GridPos> {
    map.row(r)
        .iter()
        .position(|&t| t == Tile::Path)
        .map(|c| (r, c))
        .with_context(|| format!("No path tile in row {}", r))
}

struct Trails {
    graph: TrailGraph,
    start: usize,
    end: usize,
}

fn build_trails(map: &TrailMap, slopes: Slopes) -> Result<Trails> {
    let start = entry_in_row(map, 0)?;
    let end = entry_in_row(map, map.rows() - 1)?;
    let mut junctions: HashMap<GridPos, usize> = HashMap::new();
    junctions.insert(start, 0);
    junctions.insert(end, 1);
    for pos in map.pos_iter() {
        let open = moves(map, pos, Slopes::Climbable).len();
        if map[pos] != Tile::Forest && open >= 3 {
            let id = junctions.len();
            junctions.insert(pos, id);
        }
    }

    let mut graph = TrailGraph::new();
    for (&junction, &from) in &junctions {
        graph.add_node(from);
        for first in moves(map, junction, slopes) {
            let (mut previous, mut current, mut length) = (junction, first, 1);
            let reached = loop {
                if let Some(&to) = junctions.get(&current) {
                    break Some(to);
                }
                let next = moves(map, current, slopes)
                    .into_iter()
                    .find(|&p| p != previous);
                match next {
                    Some(next) => {
                        previous = current;
                        current = next;
                        length += 1;
                    }
                    None => break None,
                }
            };
            if let Some(to) = reached.filter(|&to| to != from) {
                graph.add_edge(from, to, length);
            }
        }
    }
    Ok(Trails {
        graph,
        start: junctions[&start],
        end: junctions[&end],
    })
}

fn longest_from(trails: &Trails, node: usize, visited: u64) -> Option<usize> {
    if node == trails.end {
        return Some(0);
    }
    trails
        .graph
        .edges(node)
        .filter(|&(_, to, _)| visited & (1 << to) == 0)
        .filter_map(|(_, to, &length)| {
            longest_from(trails, to, visited | (1 << to)).map(|rest| rest + length)
        })
        .max()
}

fn longest_hike(s: &str, slopes: Slopes) -> Result<usize> {
    let map = s.parse::<TrailMap>()?;
    let trails = build_trails(&map, slopes)?;
    if trails.graph.node_count() > 64 {
        anyhow::bail!("Too many junctions: {}", trails.graph.node_count());
    }
    longest_from(&trails, trails.start, 1 << trails.start).context("No hike reaches the end")
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d23")?;
    let steps = longest_hike(&input, Slopes::Slippery)?;
    println!("The longest hike on slippery slopes takes {} steps", steps);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d23")?;
    let steps = longest_hike(&input, Slopes::Climbable)?;
    println!("The longest hike on dry slopes takes {} steps", steps);
    Ok(())
}

fn main() -> Result<()> {
    solve_p1()?;
    solve_p2()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "
#.#####################
#.......#########...###
#######.#########.#.#.#
###.....#.>.>.###.#.#.#
###v#####.#v#.###.#.#.#
###.>...#.#.#.....#...#
###v###.#.#.#########.#
###...#.#.#.......#...#
#####.#.#.#######.#.###
#.....#.#.#.......#...#
#.#####.#.#.#########v#
#.#...#...#...###...>.#
#.#.#v#######v###.###v#
#...#.>.#...>.>.#.###.#
#####v#.#.###v#.#.###.#
#.....#...#...#.#.#...#
#.#########.###.#.#.###
#...###...#...#...#.###
###.###.#.###v#####v#.#
#...#...#.#.>.>.#.>.###
#.###.###.#.###.#.#v###
#.....###...###...#...#
#####################.#";

    #[test]
    fn test_p1() {
        assert_eq!(longest_hike(INPUT, Slopes::Slippery).unwrap(), 94);
    }

    #[test]
    fn test_p2() {
        assert_eq!(longest_hike(INPUT, Slopes::Climbable).unwrap(), 154);
    }

    #[test]
    fn test_tile_display() {
        let map = "#>#\n#v#".parse::<TrailMap>().unwrap();
        assert_eq!(map.to_string(), "#>#\n#v#");
        assert_eq!(map[(0, 1)], Tile::Slope(Direction::Right));
    }
}
