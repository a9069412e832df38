use crate::helpers::grid::{Direction, Grid, GridPos};
use anyhow::Result;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

pub type City = Grid<u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crucible {
    pub min_straight: usize,
    pub max_straight: usize,
}

pub const REGULAR_CRUCIBLE: Crucible = Crucible {
    min_straight: 1,
    max_straight: 3,
};

pub const ULTRA_CRUCIBLE: Crucible = Crucible {
    min_straight: 4,
    max_straight: 10,
};

pub fn parse_city(s: &str) -> Result<City> {
    s.parse()
}

// A node is a block together with the axis the crucible arrived on. Every
// edge turns onto the other axis and moves a whole straight run.
type Node = (GridPos, bool);

pub fn minimal_heat_loss(city: &City, crucible: &Crucible) -> Option<u32> {
    let target = (city.rows().checked_sub(1)?, city.cols().checked_sub(1)?);
    let mut best: HashMap<Node, u32> = HashMap::new();
    let mut queue = BinaryHeap::new();
    for &vertical in &[true, false] {
        best.insert(((0, 0), vertical), 0);
        queue.push(Reverse((0, (0, 0), vertical)));
    }

    while let Some(Reverse((heat_loss, pos, vertical))) = queue.pop() {
        if pos == target {
            return Some(heat_loss);
        }
        if best.get(&(pos, vertical)).map_or(false, |&b| heat_loss > b) {
            continue;
        }
        let turns = if vertical {
            [Direction::Left, Direction::Right]
        } else {
            [Direction::Up, Direction::Down]
        };
        for &direction in &turns {
            let mut next = pos;
            let mut next_heat_loss = heat_loss;
            for run in 1..=crucible.max_straight {
                next = match city.step(next, direction) {
                    Some(p) => p,
                    None => break,
                };
                next_heat_loss += city[next];
                if run < crucible.min_straight {
                    continue;
                }
                let node = (next, !vertical);
                if best.get(&node).map_or(true, |&b| next_heat_loss < b) {
                    best.insert(node, next_heat_loss);
                    queue.push(Reverse((next_heat_loss, next, !vertical)));
                }
            }
        }
    }
    None
}
