use advent::helpers;
use anyhow::Result;
use itertools::Itertools;

type History = Vec<i64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extrapolation {
    Forwards,
    Backwards,
}

fn parse_histories(s: &str) -> Result<Vec<History>> {
    s.trim()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(helpers::lines_to_longs)
        .collect()
}

fn differences(values: &[i64]) -> History {
    values.iter().tuple_windows().map(|(a, b)| b - a).collect()
}

fn extrapolate(values: &[i64], direction: Extrapolation) -> i64 {
    if values.iter().all(|&v| v == 0) {
        return 0;
    }
    let below = extrapolate(&differences(values), direction);
    match direction {
        Extrapolation::Forwards => values.last().copied().unwrap_or_default() + below,
        Extrapolation::Backwards => values.first().copied().unwrap_or_default() - below,
    }
}

fn sum_extrapolated_values(s: &str, direction: Extrapolation) -> Result<i64> {
    Ok(parse_histories(s)?
        .iter()
        .map(|h| extrapolate(h, direction))
        .sum())
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d9")?;
    let sum = sum_extrapolated_values(&input, Extrapolation::Forwards)?;
    println!("The sum of the extrapolated next values is: {}", sum);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d9")?;
    let sum = sum_extrapolated_values(&input, Extrapolation::Backwards)?;
    println!("The sum of the extrapolated previous values is: {}", sum);
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
0 3 6 9 12 15
1 3 6 10 15 21
10 13 16 21 30 45";

    #[test]
    fn test_p1() {
        assert_eq!(
            sum_extrapolated_values(INPUT, Extrapolation::Forwards).unwrap(),
            114
        );
    }

    #[test]
    fn test_p2() {
        assert_eq!(
            sum_extrapolated_values(INPUT, Extrapolation::Backwards).unwrap(),
            2
        );
    }

    #[test]
    fn test_extrapolate() {
        assert_eq!(extrapolate(&[10, 13, 16, 21, 30, 45], Extrapolation::Forwards), 68);
        assert_eq!(extrapolate(&[10, 13, 16, 21, 30, 45], Extrapolation::Backwards), 5);
        assert_eq!(extrapolate(&[-2, -4, -6], Extrapolation::Forwards), -8);
        assert_eq!(extrapolate(&[], Extrapolation::Forwards), 0);
    }
}
