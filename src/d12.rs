use advent::helpers;
use anyhow::{Context, Result};
use itertools::Itertools;
use std::iter::repeat;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ConditionRecord {
    springs: Vec<u8>,
    groups: Vec<usize>,
}

impl ConditionRecord {
    fn parse(line: &str) -> Result<Self> {
        let (springs, groups) = line
            .split_whitespace()
            .collect_tuple()
            .with_context(|| format!("Invalid record: {}", line))?;
        if let Some(c) = springs.bytes().find(|c| !b".#?".contains(c)) {
            anyhow::bail!("Invalid spring: {}", c as char);
        }
        let groups = groups
            .split(',')
            .map(|g| g.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ConditionRecord {
            springs: springs.as_bytes().to_vec(),
            groups,
        })
    }

    fn unfolded(&self, copies: usize) -> Self {
        let springs = repeat(self.springs.clone())
            .take(copies)
            .intersperse(vec![b'?'])
            .flatten()
            .collect();
        let groups = self.groups.repeat(copies);
        ConditionRecord { springs, groups }
    }

    /// `ways[i][j]`: arrangements of `springs[i..]` matching `groups[j..]`.
    fn arrangement_count(&self) -> u64 {
        let n = self.springs.len();
        let m = self.groups.len();
        let mut ways = vec![vec![0u64; m + 1]; n + 2];
        ways[n][m] = 1;
        ways[n + 1][m] = 1;
        for i in (0..n).rev() {
            for j in 0..=m {
                let c = self.springs[i];
                let mut count = 0;
                if c != b'#' {
                    count += ways[i + 1][j];
                }
                if c != b'.' && j < m {
                    let end = i + self.groups[j];
                    let fits = end <= n
                        && !self.springs[i..end].contains(&b'.')
                        && self.springs.get(end) != Some(&b'#');
                    if fits {
                        // Skip the operational spring separating groups.
                        count += ways[end + 1][j + 1];
                    }
                }
                ways[i][j] = count;
            }
        }
        ways[0][0]
    }
}

fn sum_arrangements(s: &str, copies: usize) -> Result<u64> {
    s.trim()
        .lines()
        .map(|l| ConditionRecord::parse(l.trim()).map(|r| r.unfolded(copies).arrangement_count()))
        .sum()
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d12")?;
    let sum = sum_arrangements(&input, 1)?;
    println!("The sum of possible arrangements is: {}", sum);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d12")?;
    let sum = sum_arrangements(&input, 5)?;
    println!("The sum of possible unfolded arrangements is: {}", sum);
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
???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1";

    fn counts(copies: usize) -> Vec<u64> {
        INPUT
            .trim()
            .lines()
            .map(|l| {
                ConditionRecord::parse(l)
                    .unwrap()
                    .unfolded(copies)
                    .arrangement_count()
            })
            .collect()
    }

    #[test]
    fn test_p1() {
        assert_eq!(counts(1), vec![1, 4, 1, 1, 4, 10]);
        assert_eq!(sum_arrangements(INPUT, 1).unwrap(), 21);
    }

    #[test]
    fn test_p2() {
        assert_eq!(counts(5), vec![1, 16384, 1, 16, 2500, 506250]);
        assert_eq!(sum_arrangements(INPUT, 5).unwrap(), 525152);
    }

    #[test]
    fn test_unfold() {
        let record = ConditionRecord::parse(".# 1").unwrap().unfolded(5);
        assert_eq!(record.springs, b".#?.#?.#?.#?.#".to_vec());
        assert_eq!(record.groups, vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_invalid_record() {
        assert!(ConditionRecord::parse("?x? 1").is_err());
        assert!(ConditionRecord::parse("??? a").is_err());
    }
}
