use advent::helpers;
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

type Pos = (usize, usize);

#[derive(Debug)]
struct PartNumber {
    value: u32,
    row: usize,
    start_col: usize,
    end_col: usize,
}

#[derive(Debug)]
struct Schematic {
    lines: Vec<Vec<u8>>,
    numbers: Vec<PartNumber>,
}

fn is_symbol(c: u8) -> bool {
    !c.is_ascii_digit() && c != b'.'
}

impl Schematic {
    fn new(s: &str) -> Result<Self> {
        let text_lines = s.trim().lines().map(str::trim).collect::<Vec<_>>();
        let mut numbers = vec![];
        for (row, l) in text_lines.iter().enumerate() {
            for m in NUMBER_RE.find_iter(l) {
                numbers.push(PartNumber {
                    value: m.as_str().parse()?,
                    row,
                    start_col: m.start(),
                    end_col: m.end(),
                });
            }
        }
        let lines = text_lines.iter().map(|l| l.as_bytes().to_vec()).collect();
        Ok(Schematic { lines, numbers })
    }

    /// Symbols in the box surrounding the number.
    fn adjacent_symbols<'a>(
        &'a self,
        number: &'a PartNumber,
    ) -> impl Iterator<Item = (Pos, u8)> + 'a {
        let row_range = number.row.saturating_sub(1)..=number.row + 1;
        row_range
            .filter_map(move |r| self.lines.get(r).map(|l| (r, l)))
            .flat_map(move |(r, l)| {
                let col_start = number.start_col.saturating_sub(1);
                let col_range = col_start..(number.end_col + 1).min(l.len());
                col_range.map(move |c| ((r, c), l[c]))
            })
            .filter(|&(_, c)| is_symbol(c))
    }

    fn part_number_sum(&self) -> u32 {
        self.numbers
            .iter()
            .filter(|n| self.adjacent_symbols(n).next().is_some())
            .map(|n| n.value)
            .sum()
    }

    fn gear_ratio_sum(&self) -> u32 {
        let mut gears: HashMap<Pos, Vec<u32>> = HashMap::new();
        for n in &self.numbers {
            for (pos, _) in self.adjacent_symbols(n).filter(|&(_, c)| c == b'*') {
                gears.entry(pos).or_default().push(n.value);
            }
        }
        gears
            .values()
            .filter(|values| values.len() == 2)
            .map(|values| values.iter().product::<u32>())
            .sum()
    }
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d3")?;
    let schematic = Schematic::new(&input)?;
    println!(
        "The sum of all part numbers is: {}",
        schematic.part_number_sum()
    );
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d3")?;
    let schematic = Schematic::new(&input)?;
    println!(
        "The sum of all gear ratios is: {}",
        schematic.gear_ratio_sum()
    );
    Ok(())
}

fn main() -> Result<()> {
    solve_p1()?;
    solve_p2()
}
