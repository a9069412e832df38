use advent::helpers;
use advent::helpers::nom::{parse_all, IResult};
use anyhow::Result;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, line_ending, space1, u32},
    combinator::value,
    multi::separated_list1,
    sequence::{delimited, separated_pair},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Green,
    Blue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CubeSet {
    red: u32,
    green: u32,
    blue: u32,
}

#[derive(Debug)]
struct Game {
    id: u32,
    draws: Vec<CubeSet>,
}

const BAG_CONTENT: CubeSet = CubeSet {
    red: 12,
    green: 13,
    blue: 14,
};

impl CubeSet {
    fn from_counts(counts: &[(u32, Color)]) -> Self {
        counts
            .iter()
            .fold(CubeSet::default(), |mut set, &(count, color)| {
                match color {
                    Color::Red => set.red += count,
                    Color::Green => set.green += count,
                    Color::Blue => set.blue += count,
                }
                set
            })
    }

    fn max(self, other: CubeSet) -> CubeSet {
        CubeSet {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn fits_in(&self, bag: &CubeSet) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    fn power(&self) -> u32 {
        self.red * self.green * self.blue
    }
}

impl Game {
    fn minimal_set(&self) -> CubeSet {
        self.draws
            .iter()
            .fold(CubeSet::default(), |acc, draw| acc.max(*draw))
    }
}

fn parse_color(i: &str) -> IResult<Color> {
    alt((
        value(Color::Red, tag("red")),
        value(Color::Green, tag("green")),
        value(Color::Blue, tag("blue")),
    ))(i)
}

fn parse_draw(i: &str) -> IResult<CubeSet> {
    // 3 blue, 4 red
    let (i, counts) = separated_list1(tag(", "), separated_pair(u32, space1, parse_color))(i)?;
    Ok((i, CubeSet::from_counts(&counts)))
}

fn parse_game(i: &str) -> IResult<Game> {
    // Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
    let (i, id) = delimited(tag("Game "), u32, char(':'))(i)?;
    let (i, _) = space1(i)?;
    let (i, draws) = separated_list1(tag("; "), parse_draw)(i)?;
    Ok((i, Game { id, draws }))
}

fn parse_games(s: &str) -> Result<Vec<Game>> {
    parse_all(separated_list1(line_ending, parse_game), s.trim())
}

fn sum_possible_game_ids(s: &str) -> Result<u32> {
    let games = parse_games(s)?;
    Ok(games
        .iter()
        .filter(|g| g.minimal_set().fits_in(&BAG_CONTENT))
        .map(|g| g.id)
        .sum())
}

fn sum_minimal_set_powers(s: &str) -> Result<u32> {
    let games = parse_games(s)?;
    Ok(games.iter().map(|g| g.minimal_set().power()).sum())
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d2")?;
    let sum = sum_possible_game_ids(&input)?;
    println!("The sum of the IDs of possible games is: {}", sum);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d2")?;
    let sum = sum_minimal_set_powers(&input)?;
    println!("The sum of the powers of the minimal sets is: {}", sum);
    Ok(())
}

fn main() -> Result<()> {
    solve_p1()?;
    solve_p2()
}
