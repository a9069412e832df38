use advent::helpers;
use advent::helpers::grid::Direction;
use advent::helpers::nom::{parse_all, IResult};
use anyhow::Result;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, line_ending, space1, u32},
    combinator::{map_res, value},
    multi::separated_list1,
    sequence::delimited,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DigStep {
    direction: Direction,
    meters: i64,
}

/// The plain instruction and the one hidden in the colour code.
type PlanLine = (DigStep, DigStep);

fn parse_direction(i: &str) -> IResult<Direction> {
    alt((
        value(Direction::Right, char('R')),
        value(Direction::Down, char('D')),
        value(Direction::Left, char('L')),
        value(Direction::Up, char('U')),
    ))(i)
}

fn decode_color(hex: &str) -> Result<DigStep> {
    let meters = i64::from_str_radix(&hex[..5], 16)?;
    let direction = match &hex[5..] {
        "0" => Direction::Right,
        "1" => Direction::Down,
        "2" => Direction::Left,
        "3" => Direction::Up,
        d => anyhow::bail!("Invalid direction digit: {}", d),
    };
    Ok(DigStep { direction, meters })
}

fn parse_plan_line(i: &str) -> IResult<PlanLine> {
    // R 6 (#70c710)
    let (i, direction) = parse_direction(i)?;
    let (i, _) = space1(i)?;
    let (i, meters) = u32(i)?;
    let (i, _) = space1(i)?;
    let (i, hidden) = delimited(
        tag("(#"),
        map_res(
            take_while_m_n(6, 6, |c: char| c.is_ascii_hexdigit()),
            decode_color,
        ),
        char(')'),
    )(i)?;
    let step = DigStep {
        direction,
        meters: meters as i64,
    };
    Ok((i, (step, hidden)))
}

fn parse_plan(s: &str) -> Result<Vec<PlanLine>> {
    parse_all(separated_list1(line_ending, parse_plan_line), s.trim())
}

/// Shoelace gives the area enclosed by the trench centre line, the outer
/// half of every trench block is added on top.
fn lagoon_volume(steps: impl Iterator<Item = DigStep>) -> i64 {
    let (mut r, mut c) = (0i64, 0i64);
    let mut twice_area = 0;
    let mut perimeter = 0;
    for step in steps {
        let (dr, dc) = step.direction.delta();
        let (nr, nc) = (r + dr as i64 * step.meters, c + dc as i64 * step.meters);
        twice_area += c * nr - nc * r;
        perimeter += step.meters;
        r = nr;
        c = nc;
    }
    twice_area.abs() / 2 + perimeter / 2 + 1
}

fn volume_from_plain_plan(s: &str) -> Result<i64> {
    let plan = parse_plan(s)?;
    Ok(lagoon_volume(plan.iter().map(|(step, _)| *step)))
}

fn volume_from_color_codes(s: &str) -> Result<i64> {
    let plan = parse_plan(s)?;
    Ok(lagoon_volume(plan.iter().map(|(_, step)| *step)))
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d18")?;
    let volume = volume_from_plain_plan(&input)?;
    println!("The lagoon can hold {} cubic meters of lava", volume);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d18")?;
    let volume = volume_from_color_codes(&input)?;
    println!(
        "Following the colour codes, the lagoon can hold {} cubic meters of lava",
        volume
    );
    Ok(())
}

fn main() -> Result<()> {
    solve_p1()?;
    solve_p2()
}
