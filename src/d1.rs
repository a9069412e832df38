use advent::helpers;
use anyhow::Result;

const SPELLED_DIGITS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DigitKind {
    NumericOnly,
    NumericAndSpelled,
}

/// Returns the digit starting at the beginning of `s`, if any.
/// Spelled digits may share letters with their neighbours ("eightwo"),
/// so only the start of the word is consumed by the caller.
fn digit_at_start(s: &str, kind: DigitKind) -> Option<u32> {
    let first = s.chars().next()?;
    if let Some(d) = first.to_digit(10) {
        return Some(d);
    }
    if kind == DigitKind::NumericOnly {
        return None;
    }
    SPELLED_DIGITS
        .iter()
        .position(|word| s.starts_with(word))
        .map(|i| i as u32 + 1)
}

fn calibration_value(line: &str, kind: DigitKind) -> Option<u32> {
    let mut digits = line
        .char_indices()
        .filter_map(|(i, _)| digit_at_start(&line[i..], kind));
    let first = digits.next()?;
    let last = digits.last().unwrap_or(first);
    Some(first * 10 + last)
}

fn sum_calibration_values(s: &str, kind: DigitKind) -> Result<u32> {
    s.trim()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| {
            calibration_value(l, kind)
                .ok_or_else(|| anyhow::anyhow!("No digit found in line: {}", l))
        })
        .sum()
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d1")?;
    let sum = sum_calibration_values(&input, DigitKind::NumericOnly)?;
    println!("The sum of all calibration values is: {}", sum);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d1")?;
    let sum = sum_calibration_values(&input, DigitKind::NumericAndSpelled)?;
    println!(
        "The sum of all calibration values with spelled digits is: {}",
        sum
    );
    Ok(())
}

fn main() -> Result<()> {
    solve_p1()?;
    solve_p2()
}
