use advent::helpers;
use anyhow::Result;
use derive_more::Display;
use helpers::grid::Grid;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
enum Ground {
    #[display(fmt = "#")]
    Rock,
    #[display(fmt = ".")]
    Ash,
}

impl FromStr for Ground {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next() {
            Some('#') => Ok(Ground::Rock),
            Some('.') => Ok(Ground::Ash),
            _ => anyhow::bail!("Invalid ground char"),
        }
    }
}

type Pattern = Grid<Ground>;

fn parse_patterns(s: &str) -> Result<Vec<Pattern>> {
    s.trim()
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(str::parse)
        .collect()
}

/// Rows above a horizontal mirror line whose reflection differs in exactly
/// `smudges` tiles.
fn find_horizontal_mirror(pattern: &Pattern, smudges: usize) -> Option<usize> {
    (1..pattern.rows()).find(|&above| {
        let differences: usize = (0..above.min(pattern.rows() - above))
            .map(|d| {
                pattern
                    .row(above - 1 - d)
                    .iter()
                    .zip(pattern.row(above + d))
                    .filter(|(a, b)| a != b)
                    .count()
            })
            .sum();
        differences == smudges
    })
}

fn summarize(pattern: &Pattern, smudges: usize) -> Option<usize> {
    find_horizontal_mirror(pattern, smudges)
        .map(|rows| 100 * rows)
        .or_else(|| find_horizontal_mirror(&pattern.transposed(), smudges))
}

fn summarize_notes(s: &str, smudges: usize) -> Result<usize> {
    parse_patterns(s)?
        .iter()
        .enumerate()
        .map(|(i, p)| {
            summarize(p, smudges).ok_or_else(|| anyhow::anyhow!("No mirror in pattern {}", i))
        })
        .sum()
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d13")?;
    let summary = summarize_notes(&input, 0)?;
    println!("The summary of the pattern notes is: {}", summary);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d13")?;
    let summary = summarize_notes(&input, 1)?;
    println!(
        "The summary of the pattern notes with smudges fixed is: {}",
        summary
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
#.##..##.
..#.##.#.
##......#
##......#
..#.##.#.
..##..###
#.##..##.

#...##..#
#....#..#
..##..###
#####.##.
#####.##.
..##..###
#....#..#";

    #[test]
    fn test_p1() {
        assert_eq!(summarize_notes(INPUT, 0).unwrap(), 405);
    }

    #[test]
    fn test_p2() {
        assert_eq!(summarize_notes(INPUT, 1).unwrap(), 400);
    }

    #[test]
    fn test_individual_patterns() {
        let patterns = parse_patterns(INPUT).unwrap();
        assert_eq!(summarize(&patterns[0], 0), Some(5));
        assert_eq!(summarize(&patterns[1], 0), Some(400));
        assert_eq!(summarize(&patterns[0], 1), Some(300));
        assert_eq!(summarize(&patterns[1], 1), Some(100));
    }

    #[test]
    fn test_no_mirror() {
        assert!(summarize_notes("#.\n##", 0).is_err());
    }
}
