use advent::helpers;
use anyhow::{Context, Result};
use num_integer::Roots;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Race {
    time: u64,
    record: u64,
}

fn distance(hold: u64, time: u64) -> u64 {
    hold * (time - hold)
}

impl Race {
    /// The distance `h * (t - h)` is a parabola peaking at `t / 2`, so the
    /// winning hold times form one contiguous range around it.
    fn ways_to_win(&self) -> u64 {
        let t = self.time;
        let discriminant = match (t * t).checked_sub(4 * self.record) {
            Some(d) => d,
            None => return 0,
        };
        let root = discriminant.sqrt();
        let mut lowest = (t - root.min(t)) / 2;
        while lowest <= t / 2 && distance(lowest, t) <= self.record {
            lowest += 1;
        }
        while lowest > 0 && distance(lowest - 1, t) > self.record {
            lowest -= 1;
        }
        if lowest > t / 2 {
            return 0;
        }
        t - 2 * lowest + 1
    }
}

fn parse_line<'a>(line: Option<&'a str>, prefix: &str) -> Result<&'a str> {
    line.and_then(|l| l.trim().strip_prefix(prefix))
        .with_context(|| format!("Missing {} line", prefix))
}

fn parse_races(s: &str) -> Result<Vec<Race>> {
    let mut lines = s.trim().lines();
    let parse_numbers = |l: &str| -> Result<Vec<u64>> {
        l.split_whitespace()
            .map(|n| n.parse::<u64>().context("Invalid number"))
            .collect()
    };
    let times = parse_numbers(parse_line(lines.next(), "Time:")?)?;
    let records = parse_numbers(parse_line(lines.next(), "Distance:")?)?;
    anyhow::ensure!(times.len() == records.len(), "Mismatched race count");
    Ok(times
        .into_iter()
        .zip(records)
        .map(|(time, record)| Race { time, record })
        .collect())
}

fn parse_single_race(s: &str) -> Result<Race> {
    let mut lines = s.trim().lines();
    let parse_number = |l: &str| -> Result<u64> {
        l.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .parse::<u64>()
            .context("Invalid number")
    };
    let time = parse_number(parse_line(lines.next(), "Time:")?)?;
    let record = parse_number(parse_line(lines.next(), "Distance:")?)?;
    Ok(Race { time, record })
}

fn ways_to_win_product(s: &str) -> Result<u64> {
    Ok(parse_races(s)?.iter().map(Race::ways_to_win).product())
}

fn ways_to_win_single_race(s: &str) -> Result<u64> {
    Ok(parse_single_race(s)?.ways_to_win())
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d6")?;
    let product = ways_to_win_product(&input)?;
    println!(
        "The product of the number of ways to beat each record is: {}",
        product
    );
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d6")?;
    let ways = ways_to_win_single_race(&input)?;
    println!("The number of ways to beat the long race record is: {}", ways);
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
Time:      7  15   30
Distance:  9  40  200";

    #[test]
    fn test_p1() {
        assert_eq!(ways_to_win_product(INPUT).unwrap(), 288);
    }

    #[test]
    fn test_p2() {
        assert_eq!(ways_to_win_single_race(INPUT).unwrap(), 71503);
    }

    #[test]
    fn test_ways_to_win() {
        let brute_force = |race: &Race| {
            (0..=race.time)
                .filter(|&h| distance(h, race.time) > race.record)
                .count() as u64
        };
        for (time, record) in [(7, 9), (15, 40), (30, 200), (10, 25), (10, 24), (3, 100)] {
            let race = Race { time, record };
            assert_eq!(race.ways_to_win(), brute_force(&race), "{:?}", race);
        }
    }
}
