use advent::helpers;
use anyhow::{Context, Result};

const BOX_COUNT: usize = 256;

fn hash(s: &str) -> usize {
    s.bytes()
        .fold(0, |acc, b| (acc + b as usize) * 17 % BOX_COUNT)
}

#[derive(Debug, PartialEq, Eq)]
enum Operation<'a> {
    Remove(&'a str),
    Insert(&'a str, u8),
}

impl<'a> Operation<'a> {
    fn parse(step: &'a str) -> Result<Self> {
        if let Some(label) = step.strip_suffix('-') {
            return Ok(Operation::Remove(label));
        }
        let (label, focal_length) = step
            .split_once('=')
            .with_context(|| format!("Invalid step: {}", step))?;
        let focal_length = focal_length
            .parse()
            .with_context(|| format!("Invalid focal length in step: {}", step))?;
        Ok(Operation::Insert(label, focal_length))
    }

    fn label(&self) -> &'a str {
        match self {
            Operation::Remove(label) | Operation::Insert(label, _) => *label,
        }
    }
}

type Lens<'a> = (&'a str, u8);

struct Boxes<'a> {
    boxes: Vec<Vec<Lens<'a>>>,
}

impl<'a> Boxes<'a> {
    fn new() -> Self {
        Boxes {
            boxes: vec![Vec::new(); BOX_COUNT],
        }
    }

    fn apply(&mut self, op: &Operation<'a>) {
        let lenses = &mut self.boxes[hash(op.label())];
        let existing = lenses.iter().position(|(l, _)| *l == op.label());
        match (op, existing) {
            (Operation::Remove(_), Some(i)) => {
                lenses.remove(i);
            }
            (Operation::Remove(_), None) => (),
            (Operation::Insert(_, focal_length), Some(i)) => lenses[i].1 = *focal_length,
            (Operation::Insert(label, focal_length), None) => lenses.push((*label, *focal_length)),
        }
    }

    fn focusing_power(&self) -> usize {
        self.boxes
            .iter()
            .enumerate()
            .flat_map(|(box_i, lenses)| {
                lenses
                    .iter()
                    .enumerate()
                    .map(move |(slot, &(_, f))| (box_i + 1) * (slot + 1) * f as usize)
            })
            .sum()
    }
}

fn steps(s: &str) -> impl Iterator<Item = &str> {
    s.trim()
        .split(',')
        .map(|step| step.trim_matches(|c| c == '\n' || c == '\r'))
}

fn sum_of_hashes(s: &str) -> usize {
    steps(s).map(hash).sum()
}

fn focusing_power(s: &str) -> Result<usize> {
    let mut boxes = Boxes::new();
    for step in steps(s) {
        boxes.apply(&Operation::parse(step)?);
    }
    Ok(boxes.focusing_power())
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d15")?;
    let sum = sum_of_hashes(&input);
    println!("The sum of the HASH results is: {}", sum);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d15")?;
    let power = focusing_power(&input)?;
    println!("The focusing power of the lens configuration is: {}", power);
    Ok(())
}

fn main() -> Result<()> {
    solve_p1()?;
    solve_p2()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "rn=1,cm-,qp=3,cm=2,qp-,pc=4,ot=9,ab=5,pc-,pc=6,ot=7";

    #[test]
    fn test_p1() {
        assert_eq!(hash("HASH"), 52);
        assert_eq!(sum_of_hashes(INPUT), 1320);
    }

    #[test]
    fn test_p2() {
        assert_eq!(focusing_power(INPUT).unwrap(), 145);
    }

    #[test]
    fn test_parse_operation() {
        assert_eq!(Operation::parse("cm-").unwrap(), Operation::Remove("cm"));
        assert_eq!(Operation::parse("ot=7").unwrap(), Operation::Insert("ot", 7));
        assert!(Operation::parse("ot").is_err());
        assert!(Operation::parse("ot=x").is_err());
    }
}
