use advent::helpers;
use advent::helpers::nom::{parse_all, IResult};
use anyhow::Result;
use itertools::Itertools;
use nom::{
    character::complete::{char, line_ending, u32},
    combinator::map,
    multi::separated_list1,
    sequence::{separated_pair, tuple},
};
use std::collections::{BTreeSet, HashMap};

type Coord = (u32, u32, u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Brick {
    start: Coord,
    end: Coord,
}

impl Brick {
    fn bottom(&self) -> u32 {
        self.start.2.min(self.end.2)
    }

    fn height(&self) -> u32 {
        self.start.2.max(self.end.2) - self.bottom() + 1
    }

    fn footprint(&self) -> impl Iterator<Item = (u32, u32)> {
        let xs = self.start.0.min(self.end.0)..=self.start.0.max(self.end.0);
        let ys = self.start.1.min(self.end.1)..=self.start.1.max(self.end.1);
        xs.cartesian_product(ys)
    }
}

fn parse_coord(i: &str) -> IResult<Coord> {
    map(
        tuple((u32, char(','), u32, char(','), u32)),
        |(x, _, y, _, z)| (x, y, z),
    )(i)
}

fn parse_bricks(s: &str) -> Result<Vec<Brick>> {
    parse_all(
        separated_list1(
            line_ending,
            map(separated_pair(parse_coord, char('~'), parse_coord), |(start, end)| {
                Brick { start, end }
            }),
        ),
        s.trim(),
    )
}

/// Bricks after falling, in settling order, and for each of them the
/// bricks directly underneath holding it up.
struct Stack {
    supported_by: Vec<BTreeSet<usize>>,
}

fn settle(mut bricks: Vec<Brick>) -> Stack {
    bricks.sort_by_key(Brick::bottom);
    let mut tops: HashMap<(u32, u32), (u32, usize)> = HashMap::new();
    let mut supported_by = Vec::with_capacity(bricks.len());
    for (id, brick) in bricks.iter().enumerate() {
        let resting_on = brick
            .footprint()
            .map(|xy| tops.get(&xy).map_or(0, |&(z, _)| z))
            .max()
            .unwrap_or_default();
        let supporters = brick
            .footprint()
            .filter_map(|xy| tops.get(&xy))
            .filter(|&&(z, _)| z == resting_on && z > 0)
            .map(|&(_, below)| below)
            .collect::<BTreeSet<_>>();
        for xy in brick.footprint() {
            tops.insert(xy, (resting_on + brick.height(), id));
        }
        supported_by.push(supporters);
    }
    Stack { supported_by }
}

impl Stack {
    fn is_sole_support(&self, id: usize) -> bool {
        self.supported_by
            .iter()
            .any(|s| s.len() == 1 && s.contains(&id))
    }

    fn chain_reaction(&self, removed: usize) -> usize {
        let mut fallen = vec![false; self.supported_by.len()];
        fallen[removed] = true;
        let mut count = 0;
        for id in removed + 1..self.supported_by.len() {
            let supports = &self.supported_by[id];
            if !supports.is_empty() && supports.iter().all(|&s| fallen[s]) {
                fallen[id] = true;
                count += 1;
            }
        }
        count
    }
}

fn safely_disintegrable_count(s: &str) -> Result<usize> {
    let stack = settle(parse_bricks(s)?);
    Ok((0..stack.supported_by.len())
        .filter(|&id| !stack.is_sole_support(id))
        .count())
}

fn sum_of_falling_bricks(s: &str) -> Result<usize> {
    let stack = settle(parse_bricks(s)?);
    Ok((0..stack.supported_by.len())
        .map(|id| stack.chain_reaction(id))
        .sum())
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d22")?;
    let count = safely_disintegrable_count(&input)?;
    println!("Bricks that can be safely disintegrated: {}", count);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d22")?;
    let sum = sum_of_falling_bricks(&input)?;
    println!("Sum of bricks that would fall in chain reactions: {}", sum);
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
1,0,1~1,2,1
0,0,2~2,0,2
0,2,3~2,2,3
0,0,4~0,2,4
2,0,5~2,2,5
0,1,6~2,1,6
1,1,8~1,1,9";

    #[test]
    fn test_p1() {
        assert_eq!(safely_disintegrable_count(INPUT).unwrap(), 5);
    }

    #[test]
    fn test_p2() {
        assert_eq!(sum_of_falling_bricks(INPUT).unwrap(), 7);
    }

    #[test]
    fn test_settle() {
        let stack = settle(parse_bricks(INPUT).unwrap());
        let supported_by = stack
            .supported_by
            .iter()
            .map(|s| s.iter().copied().collect_vec())
            .collect_vec();
        assert_eq!(
            supported_by,
            vec![
                vec![],
                vec![0],
                vec![0],
                vec![1, 2],
                vec![1, 2],
                vec![3, 4],
                vec![5],
            ]
        );
        assert_eq!(stack.chain_reaction(0), 6);
        assert_eq!(stack.chain_reaction(5), 1);
    }
}
