use advent::helpers;
use advent::helpers::nom::{parse_all, IResult};
use anyhow::Result;
use nom::{
    bytes::complete::tag,
    character::complete::{char, line_ending, space0, space1, u32},
    multi::separated_list1,
    sequence::{delimited, preceded, tuple},
};
use std::collections::HashSet;

#[derive(Debug)]
struct Card {
    winning: HashSet<u32>,
    numbers: Vec<u32>,
}

impl Card {
    fn match_count(&self) -> usize {
        self.numbers
            .iter()
            .filter(|n| self.winning.contains(n))
            .count()
    }

    fn points(&self) -> u32 {
        match self.match_count() {
            0 => 0,
            n => 1 << (n - 1),
        }
    }
}

fn parse_numbers(i: &str) -> IResult<Vec<u32>> {
    preceded(space0, separated_list1(space1, u32))(i)
}

fn parse_card(i: &str) -> IResult<Card> {
    // Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
    let (i, _) = tuple((tag("Card"), space1, u32, char(':')))(i)?;
    let (i, winning) = parse_numbers(i)?;
    let (i, numbers) = preceded(delimited(space1, char('|'), space0), parse_numbers)(i)?;
    Ok((
        i,
        Card {
            winning: winning.into_iter().collect(),
            numbers,
        },
    ))
}

fn parse_cards(s: &str) -> Result<Vec<Card>> {
    parse_all(
        separated_list1(line_ending, preceded(space0, parse_card)),
        s.trim(),
    )
}

fn compute_total_points(s: &str) -> Result<u32> {
    Ok(parse_cards(s)?.iter().map(Card::points).sum())
}

fn compute_total_card_count(s: &str) -> Result<usize> {
    let cards = parse_cards(s)?;
    let mut copies = vec![1usize; cards.len()];
    for (i, card) in cards.iter().enumerate() {
        let won = card.match_count();
        let end = (i + 1 + won).min(cards.len());
        let current_copies = copies[i];
        copies[i + 1..end]
            .iter_mut()
            .for_each(|c| *c += current_copies);
    }
    Ok(copies.iter().sum())
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d4")?;
    let points = compute_total_points(&input)?;
    println!("The scratchcards are worth this many points: {}", points);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d4")?;
    let count = compute_total_card_count(&input)?;
    println!("The total number of scratchcards is: {}", count);
    Ok(())
}

fn main() -> Result<()> {
    solve_p1()?;
    solve_p2()
}
