use advent::helpers;
use anyhow::Result;
use derive_more::Display;
use helpers::grid::Grid;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq, Hash)]
enum Rock {
    #[display(fmt = "O")]
    Rounded,
    #[display(fmt = "#")]
    Cube,
    #[display(fmt = ".")]
    Empty,
}

impl FromStr for Rock {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next() {
            Some('O') => Ok(Rock::Rounded),
            Some('#') => Ok(Rock::Cube),
            Some('.') => Ok(Rock::Empty),
            _ => anyhow::bail!("Invalid rock char"),
        }
    }
}

type Platform = Grid<Rock>;

const SPIN_CYCLES: usize = 1_000_000_000;

fn tilt_north(platform: &mut Platform) {
    for c in 0..platform.cols() {
        let mut free_row = 0;
        for r in 0..platform.rows() {
            match platform[(r, c)] {
                Rock::Cube => free_row = r + 1,
                Rock::Rounded => {
                    platform[(r, c)] = Rock::Empty;
                    platform[(free_row, c)] = Rock::Rounded;
                    free_row += 1;
                }
                Rock::Empty => (),
            }
        }
    }
}

/// Tilts north, west, south and east in turn.
fn spin_cycle(platform: &Platform) -> Platform {
    let mut platform = platform.clone();
    for _ in 0..4 {
        tilt_north(&mut platform);
        platform = platform.rotated_clockwise();
    }
    platform
}

fn north_load(platform: &Platform) -> usize {
    platform
        .pos_iter()
        .filter(|&pos| platform[pos] == Rock::Rounded)
        .map(|(r, _)| platform.rows() - r)
        .sum()
}

fn load_after_tilt(s: &str) -> Result<usize> {
    let mut platform = s.parse::<Platform>()?;
    tilt_north(&mut platform);
    Ok(north_load(&platform))
}

fn load_after_spin_cycles(s: &str, cycles: usize) -> Result<usize> {
    let mut platform = s.parse::<Platform>()?;
    let mut seen = HashMap::new();
    let mut cycle = 0;
    while cycle < cycles {
        if let Some(previous) = seen.insert(platform.clone(), cycle) {
            let period = cycle - previous;
            let remaining = (cycles - cycle) % period;
            for _ in 0..remaining {
                platform = spin_cycle(&platform);
            }
            return Ok(north_load(&platform));
        }
        platform = spin_cycle(&platform);
        cycle += 1;
    }
    Ok(north_load(&platform))
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d14")?;
    let load = load_after_tilt(&input)?;
    println!("Total load on the north support beams: {}", load);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d14")?;
    let load = load_after_spin_cycles(&input, SPIN_CYCLES)?;
    println!(
        "Total load on the north support beams after {} spin cycles: {}",
        SPIN_CYCLES, load
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
O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....";

    #[test]
    fn test_p1() {
        assert_eq!(load_after_tilt(INPUT).unwrap(), 136);
    }

    #[test]
    fn test_p2() {
        assert_eq!(load_after_spin_cycles(INPUT, SPIN_CYCLES).unwrap(), 64);
    }

    #[test]
    fn test_spin_cycle() {
        let platform = INPUT.parse::<Platform>().unwrap();
        let expected = "
.....#....
....#...O#
...OO##...
.OO#......
.....OOO#.
.O#...O#.#
....O#....
......OOOO
#...O###..
#..OO#....";
        assert_eq!(spin_cycle(&platform).to_string(), expected.trim());
    }
}
