use advent::helpers;
use anyhow::{Context, Result};
use derive_more::Display;
use helpers::grid::{Direction, Grid};
use std::collections::{HashMap, VecDeque};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
enum Plot {
    #[display(fmt = ".")]
    Garden,
    #[display(fmt = "#")]
    Rock,
    #[display(fmt = "S")]
    Start,
}

impl FromStr for Plot {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next() {
            Some('.') => Ok(Plot::Garden),
            Some('#') => Ok(Plot::Rock),
            Some('S') => Ok(Plot::Start),
            _ => anyhow::bail!("Invalid garden plot"),
        }
    }
}

type Garden = Grid<Plot>;
type InfinitePos = (i64, i64);

const STEPS_P1: usize = 64;
const STEPS_P2: usize = 26501365;

/// Counts plots reachable in exactly `steps` steps on the garden map
/// repeated infinitely in every direction.
fn reachable_plots(garden: &Garden, steps: usize) -> Result<usize> {
    let start = garden
        .find(|&p| p == Plot::Start)
        .context("No starting position")?;
    let (rows, cols) = (garden.rows() as i64, garden.cols() as i64);
    let is_rock = |(r, c): InfinitePos| {
        garden[(r.rem_euclid(rows) as usize, c.rem_euclid(cols) as usize)] == Plot::Rock
    };

    let start = (start.0 as i64, start.1 as i64);
    let mut distances: HashMap<InfinitePos, usize> = HashMap::new();
    let mut queue = VecDeque::from(vec![(start, 0)]);
    distances.insert(start, 0);
    while let Some(((r, c), distance)) = queue.pop_front() {
        if distance == steps {
            continue;
        }
        for direction in &Direction::CARDINALS {
            let (dr, dc) = direction.delta();
            let next = (r + dr as i64, c + dc as i64);
            if is_rock(next) || distances.contains_key(&next) {
                continue;
            }
            distances.insert(next, distance + 1);
            queue.push_back((next, distance + 1));
        }
    }
    // A plot reached early can be revisited by stepping back and forth.
    Ok(distances
        .values()
        .filter(|&&d| d % 2 == steps % 2)
        .count())
}

/// Given the values of a quadratic at 0, 1 and 2, evaluates it at `n`.
fn extrapolate_quadratic(samples: [i64; 3], n: i64) -> i64 {
    let [y0, y1, y2] = samples;
    let first_difference = y1 - y0;
    let second_difference = y2 - 2 * y1 + y0;
    y0 + n * first_difference + n * (n - 1) / 2 * second_difference
}

/// For a square garden with a clear row and column through the centred
/// start, the reachable count grows quadratically every time the step count
/// grows by one map width.
fn reachable_plots_far(garden: &Garden, steps: usize) -> Result<usize> {
    let size = garden.rows();
    if garden.cols() != size {
        anyhow::bail!("Garden is not square");
    }
    let offset = steps % size;
    if offset != size / 2 {
        anyhow::bail!("Step count doesn't end at a map edge");
    }
    let n = (steps / size) as i64;
    if n < 3 {
        return reachable_plots(garden, steps);
    }
    let mut samples = [0; 3];
    for (i, sample) in samples.iter_mut().enumerate() {
        *sample = reachable_plots(garden, offset + i * size)? as i64;
    }
    Ok(extrapolate_quadratic(samples, n) as usize)
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d21")?;
    let garden = input.parse::<Garden>()?;
    let count = reachable_plots(&garden, STEPS_P1)?;
    println!(
        "Garden plots reachable in exactly {} steps: {}",
        STEPS_P1, count
    );
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d21")?;
    let garden = input.parse::<Garden>()?;
    let count = reachable_plots_far(&garden, STEPS_P2)?;
    println!(
        "Garden plots reachable in exactly {} steps on the infinite map: {}",
        STEPS_P2, count
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
...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........";

    #[test]
    fn test_p1() {
        let garden = INPUT.parse::<Garden>().unwrap();
        assert_eq!(reachable_plots(&garden, 6).unwrap(), 16);
    }

    #[test]
    fn test_p2() {
        let garden = INPUT.parse::<Garden>().unwrap();
        assert_eq!(reachable_plots(&garden, 10).unwrap(), 50);
        assert_eq!(reachable_plots(&garden, 50).unwrap(), 1594);
        assert_eq!(reachable_plots(&garden, 100).unwrap(), 6536);
    }

    #[test]
    fn test_far_extrapolation() {
        let open = "
.....
.....
..S..
.....
.....";
        let garden = open.parse::<Garden>().unwrap();
        // An open field reaches a full diamond of matching parity.
        let steps = 2 + 5 * 9;
        assert_eq!(reachable_plots_far(&garden, steps).unwrap(), 48 * 48);
        assert_eq!(
            reachable_plots_far(&garden, steps).unwrap(),
            reachable_plots(&garden, steps).unwrap()
        );
        assert!(reachable_plots_far(&garden, 5 * 9).is_err());
    }

    #[test]
    fn test_extrapolate_quadratic() {
        // n^2 + 2n + 3
        assert_eq!(extrapolate_quadratic([3, 6, 11], 10), 123);
    }
}
