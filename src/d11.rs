use advent::helpers;
use anyhow::Result;
use itertools::Itertools;
use std::collections::BTreeSet;

type Galaxy = (u64, u64);

fn parse_galaxies(s: &str) -> Vec<Galaxy> {
    s.trim()
        .lines()
        .enumerate()
        .flat_map(|(r, l)| {
            l.trim()
                .char_indices()
                .filter(|&(_, c)| c == '#')
                .map(move |(c, _)| (r as u64, c as u64))
        })
        .collect()
}

/// Maps every coordinate to its expanded value, given the coordinates that
/// are occupied along this axis.
fn expand_axis(coords: impl Iterator<Item = u64>, expansion: u64) -> Vec<u64> {
    let coords = coords.collect_vec();
    let occupied = coords.iter().copied().collect::<BTreeSet<_>>();
    let max = occupied.iter().next_back().copied().unwrap_or_default();
    let mut expanded = Vec::with_capacity(max as usize + 1);
    let mut offset = 0;
    for v in 0..=max {
        if !occupied.contains(&v) {
            offset += expansion - 1;
        }
        expanded.push(v + offset);
    }
    coords.iter().map(|&v| expanded[v as usize]).collect()
}

fn sum_of_shortest_paths(s: &str, expansion: u64) -> u64 {
    let galaxies = parse_galaxies(s);
    let rows = expand_axis(galaxies.iter().map(|g| g.0), expansion);
    let cols = expand_axis(galaxies.iter().map(|g| g.1), expansion);
    rows.into_iter()
        .zip(cols)
        .tuple_combinations()
        .map(|((r1, c1), (r2, c2))| r1.max(r2) - r1.min(r2) + c1.max(c2) - c1.min(c2))
        .sum()
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d11")?;
    let sum = sum_of_shortest_paths(&input, 2);
    println!("The sum of the shortest paths between galaxies is: {}", sum);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d11")?;
    let sum = sum_of_shortest_paths(&input, 1_000_000);
    println!(
        "The sum of the shortest paths in the older universe is: {}",
        sum
    );
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
...#......
.......#..
#.........
..........
......#...
.#........
.........#
..........
.......#..
#...#.....";

    #[test]
    fn test_p1() {
        assert_eq!(sum_of_shortest_paths(INPUT, 2), 374);
    }

    #[test]
    fn test_p2() {
        assert_eq!(sum_of_shortest_paths(INPUT, 10), 1030);
        assert_eq!(sum_of_shortest_paths(INPUT, 100), 8410);
    }

    #[test]
    fn test_expand_axis() {
        assert_eq!(expand_axis([0, 2, 5].into_iter(), 2), vec![0, 3, 8]);
    }
}
