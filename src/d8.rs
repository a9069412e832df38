use advent::helpers;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static NODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+) = \((\w+), (\w+)\)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Left,
    Right,
}

#[derive(Debug)]
struct Network<'a> {
    instructions: Vec<Turn>,
    nodes: HashMap<&'a str, (&'a str, &'a str)>,
}

fn parse_network(s: &str) -> Result<Network> {
    let mut lines = s.trim().lines().map(str::trim);
    let instructions = lines
        .next()
        .context("Missing instructions")?
        .chars()
        .map(|c| match c {
            'L' => Ok(Turn::Left),
            'R' => Ok(Turn::Right),
            _ => anyhow::bail!("Invalid instruction: {}", c),
        })
        .collect::<Result<Vec<_>>>()?;
    let nodes = lines
        .filter(|l| !l.is_empty())
        .map(|l| {
            let caps = NODE_RE
                .captures(l)
                .with_context(|| format!("Invalid node line: {}", l))?;
            let get = |i| caps.get(i).map(|m| m.as_str()).unwrap_or_default();
            Ok((get(1), (get(2), get(3))))
        })
        .collect::<Result<HashMap<_, _>>>()?;
    Ok(Network {
        instructions,
        nodes,
    })
}

impl<'a> Network<'a> {
    fn next_node(&self, node: &str, turn: Turn) -> Result<&'a str> {
        let &(left, right) = self
            .nodes
            .get(node)
            .with_context(|| format!("Unknown node: {}", node))?;
        Ok(match turn {
            Turn::Left => left,
            Turn::Right => right,
        })
    }

    /// Walks from `start` until `is_end` holds. Once every pair of node and
    /// instruction position has been visited, the walk is going in circles.
    fn steps_until<F>(&self, start: &'a str, is_end: F) -> Result<u64>
    where
        F: Fn(&str) -> bool,
    {
        anyhow::ensure!(!self.instructions.is_empty(), "No instructions");
        let states = self.instructions.len() * self.nodes.len();
        let mut node = start;
        for (steps, turn) in self.instructions.iter().cycle().enumerate().take(states + 1) {
            if is_end(node) {
                return Ok(steps as u64);
            }
            node = self.next_node(node, *turn)?;
        }
        anyhow::bail!("No end node is reachable from {}", start)
    }
}

fn count_steps_to_zzz(s: &str) -> Result<u64> {
    let network = parse_network(s)?;
    network.steps_until("AAA", |n| n == "ZZZ")
}

/// Every ghost runs into a loop whose length equals the distance to its
/// first end node, so they all meet at the least common multiple.
fn count_ghost_steps(s: &str) -> Result<u64> {
    let network = parse_network(s)?;
    network
        .nodes
        .keys()
        .filter(|n| n.ends_with('A'))
        .map(|&start| network.steps_until(start, |n| n.ends_with('Z')))
        .try_fold(1, |acc, steps| Ok(num_integer::lcm(acc, steps?)))
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d8")?;
    let steps = count_steps_to_zzz(&input)?;
    println!("Steps required to reach ZZZ: {}", steps);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d8")?;
    let steps = count_ghost_steps(&input)?;
    println!(
        "Steps required until all ghosts are on nodes ending with Z: {}",
        steps
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

    #[test]
    fn test_p1() {
        let input = "
RL

AAA = (BBB, CCC)
BBB = (DDD, EEE)
CCC = (ZZZ, GGG)
DDD = (DDD, DDD)
EEE = (EEE, EEE)
GGG = (GGG, GGG)
ZZZ = (ZZZ, ZZZ)";
        assert_eq!(count_steps_to_zzz(input).unwrap(), 2);

        let input = "
LLR

AAA = (BBB, BBB)
BBB = (AAA, ZZZ)
ZZZ = (ZZZ, ZZZ)";
        assert_eq!(count_steps_to_zzz(input).unwrap(), 6);
    }

    #[test]
    fn test_p2() {
        let input = "
LR

11A = (11B, XXX)
11B = (XXX, 11Z)
11Z = (11B, XXX)
22A = (22B, XXX)
22B = (22C, 22C)
22C = (22Z, 22Z)
22Z = (22B, 22B)
XXX = (XXX, XXX)";
        assert_eq!(count_ghost_steps(input).unwrap(), 6);
    }

    #[test]
    fn test_unknown_node() {
        let input = "
L

AAA = (BBB, BBB)";
        assert!(count_steps_to_zzz(input).is_err());
    }

    #[test]
    fn test_unreachable_end() {
        let input = "
L

AAA = (AAA, AAA)
ZZZ = (ZZZ, ZZZ)";
        let err = count_steps_to_zzz(input).unwrap_err();
        assert_eq!(err.to_string(), "No end node is reachable from AAA");

        let input = "
LR

AAA = (BBB, ZZZ)
BBB = (AAA, AAA)
ZZZ = (ZZZ, ZZZ)";
        assert!(count_steps_to_zzz(input).is_err());
    }
}
