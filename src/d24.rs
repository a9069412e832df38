use advent::helpers;
use advent::helpers::nom::{parse_all, IResult};
use anyhow::{Context, Result};
use itertools::Itertools;
use nom::{
    character::complete::{char, i64, line_ending, space0, space1},
    combinator::map,
    multi::separated_list1,
    sequence::{delimited, separated_pair, tuple},
};
use std::ops::RangeInclusive;

type Vec3 = [i128; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hailstone {
    position: Vec3,
    velocity: Vec3,
}

const TEST_AREA: RangeInclusive<i128> = 200_000_000_000_000..=400_000_000_000_000;

fn parse_vec3(i: &str) -> IResult<Vec3> {
    let comma = || tuple((char(','), space0));
    map(
        tuple((i64, comma(), i64, comma(), i64)),
        |(x, _, y, _, z)| [x as i128, y as i128, z as i128],
    )(i)
}

fn parse_hailstones(s: &str) -> Result<Vec<Hailstone>> {
    // 19, 13, 30 @ -2,  1, -2
    let hailstone = map(
        separated_pair(parse_vec3, delimited(space1, char('@'), space1), parse_vec3),
        |(position, velocity)| Hailstone { position, velocity },
    );
    parse_all(separated_list1(line_ending, hailstone), s.trim())
}

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: Vec3, b: Vec3) -> i128 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn exact_div(n: i128, d: i128) -> Option<i128> {
    (d != 0 && n % d == 0).then(|| n / d)
}

/// Whether the future paths of two hailstones cross inside `area`, ignoring
/// the Z axis. Intersections are kept as fractions over the determinant so
/// the comparison stays exact.
fn paths_cross_within(a: &Hailstone, b: &Hailstone, area: &RangeInclusive<i128>) -> bool {
    let (p1, v1, p2, v2) = (a.position, a.velocity, b.position, b.velocity);
    let mut det = v1[0] * v2[1] - v1[1] * v2[0];
    if det == 0 {
        return false;
    }
    let (dx, dy) = (p2[0] - p1[0], p2[1] - p1[1]);
    let mut t = dx * v2[1] - dy * v2[0];
    let mut s = dx * v1[1] - dy * v1[0];
    if det < 0 {
        det = -det;
        t = -t;
        s = -s;
    }
    if t < 0 || s < 0 {
        return false;
    }
    let within = |p: i128, v: i128| {
        let scaled = p * det + t * v;
        area.start() * det <= scaled && scaled <= area.end() * det
    };
    within(p1[0], v1[0]) && within(p1[1], v1[1])
}

fn count_crossings(s: &str, area: &RangeInclusive<i128>) -> Result<usize> {
    let hailstones = parse_hailstones(s)?;
    Ok(hailstones
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| paths_cross_within(a, b, area))
        .count())
}

/// Seen from hailstone `a`, the rock is a line through the origin that meets
/// both `b` and `c`. The plane spanned by the origin and the path of `b`
/// must then contain the collision with `c`, and the other way round.
fn throw_hitting(a: &Hailstone, b: &Hailstone, c: &Hailstone) -> Option<Hailstone> {
    let (pb, vb) = (sub(b.position, a.position), sub(b.velocity, a.velocity));
    let (pc, vc) = (sub(c.position, a.position), sub(c.velocity, a.velocity));
    let plane_b = cross(pb, vb);
    let plane_c = cross(pc, vc);
    let tc = exact_div(-dot(pc, plane_b), dot(vc, plane_b))?;
    let tb = exact_div(-dot(pb, plane_c), dot(vb, plane_c))?;

    let hit = |h: &Hailstone, t: i128| -> Vec3 {
        [
            h.position[0] + t * h.velocity[0],
            h.position[1] + t * h.velocity[1],
            h.position[2] + t * h.velocity[2],
        ]
    };
    let (hit_b, hit_c) = (hit(b, tb), hit(c, tc));
    let dt = tc - tb;
    let travelled = sub(hit_c, hit_b);
    let velocity = [
        exact_div(travelled[0], dt)?,
        exact_div(travelled[1], dt)?,
        exact_div(travelled[2], dt)?,
    ];
    let position = [
        hit_b[0] - tb * velocity[0],
        hit_b[1] - tb * velocity[1],
        hit_b[2] - tb * velocity[2],
    ];
    Some(Hailstone { position, velocity })
}

fn rock_position_sum(s: &str) -> Result<i128> {
    let hailstones = parse_hailstones(s)?;
    let rock = hailstones
        .iter()
        .tuple_combinations()
        .find_map(|(a, b, c)| throw_hitting(a, b, c))
        .context("No throw hits every hailstone")?;
    Ok(rock.position.iter().sum())
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d24")?;
    let count = count_crossings(&input, &TEST_AREA)?;
    println!("Hailstone paths crossing inside the test area: {}", count);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d24")?;
    let sum = rock_position_sum(&input)?;
    println!("Sum of the rock's initial coordinates: {}", sum);
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
19, 13, 30 @ -2,  1, -2
18, 19, 22 @ -1, -1, -2
20, 25, 34 @ -2, -2, -4
12, 31, 28 @ -1, -2, -1
20, 19, 15 @  1, -5, -3";

    #[test]
    fn test_p1() {
        assert_eq!(count_crossings(INPUT, &(7..=27)).unwrap(), 2);
    }

    #[test]
    fn test_p2() {
        assert_eq!(rock_position_sum(INPUT).unwrap(), 47);
    }

    #[test]
    fn test_throw_hitting() {
        let hailstones = parse_hailstones(INPUT).unwrap();
        let rock = throw_hitting(&hailstones[0], &hailstones[1], &hailstones[2]).unwrap();
        assert_eq!(
            rock,
            Hailstone {
                position: [24, 13, 10],
                velocity: [-3, 1, 2]
            }
        );
    }

    #[test]
    fn test_crossing_in_the_past() {
        let hailstones = parse_hailstones(INPUT).unwrap();
        // Crossed in the past.
        assert!(!paths_cross_within(&hailstones[0], &hailstones[4], &(7..=27)));
        // Parallel.
        assert!(!paths_cross_within(&hailstones[1], &hailstones[2], &(7..=27)));
        assert!(paths_cross_within(&hailstones[0], &hailstones[1], &(7..=27)));
    }
}
