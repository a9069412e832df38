use advent::helpers;
use anyhow::{Context, Result};
use itertools::Itertools;

const CARD_ORDER: &str = "23456789TJQKA";
const CARD_ORDER_WITH_JOKERS: &str = "J23456789TQKA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JRule {
    Jack,
    Joker,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Hand {
    // Field order matters: hands compare by type first, then card by card.
    hand_type: HandType,
    strengths: [u8; 5],
    bid: u64,
}

impl JRule {
    fn card_order(&self) -> &'static str {
        match self {
            JRule::Jack => CARD_ORDER,
            JRule::Joker => CARD_ORDER_WITH_JOKERS,
        }
    }
}

fn classify(cards: &[char; 5], rule: JRule) -> HandType {
    let counts = cards.iter().counts();
    let jokers = match rule {
        JRule::Joker => counts.get(&'J').copied().unwrap_or(0),
        JRule::Jack => 0,
    };
    let mut groups = counts
        .iter()
        .filter(|(&&c, _)| !(rule == JRule::Joker && c == 'J'))
        .map(|(_, &n)| n)
        .sorted()
        .rev()
        .collect_vec();
    // Jokers always join the largest group.
    match groups.first_mut() {
        Some(largest) => *largest += jokers,
        None => groups.push(jokers),
    }
    match groups.as_slice() {
        [5] => HandType::FiveOfAKind,
        [4, ..] => HandType::FourOfAKind,
        [3, 2] => HandType::FullHouse,
        [3, ..] => HandType::ThreeOfAKind,
        [2, 2, ..] => HandType::TwoPair,
        [2, ..] => HandType::OnePair,
        _ => HandType::HighCard,
    }
}

fn parse_hand(line: &str, rule: JRule) -> Result<Hand> {
    let (cards, bid) = line
        .split_whitespace()
        .collect_tuple()
        .with_context(|| format!("Invalid hand line: {}", line))?;
    let cards: [char; 5] = cards
        .chars()
        .collect_vec()
        .try_into()
        .map_err(|_| anyhow::anyhow!("A hand has exactly 5 cards: {}", cards))?;
    let order = rule.card_order();
    let mut strengths = [0u8; 5];
    for (strength, card) in strengths.iter_mut().zip(cards.iter()) {
        *strength = order
            .find(*card)
            .with_context(|| format!("Invalid card: {}", card))? as u8;
    }
    Ok(Hand {
        hand_type: classify(&cards, rule),
        strengths,
        bid: bid.parse()?,
    })
}

fn compute_total_winnings(s: &str, rule: JRule) -> Result<u64> {
    let hands: Vec<Hand> = s
        .trim()
        .lines()
        .map(|l| parse_hand(l.trim(), rule))
        .try_collect()?;
    Ok(hands
        .iter()
        .sorted()
        .enumerate()
        .map(|(rank, hand)| (rank as u64 + 1) * hand.bid)
        .sum())
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d7")?;
    let winnings = compute_total_winnings(&input, JRule::Jack)?;
    println!("The total winnings are: {}", winnings);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d7")?;
    let winnings = compute_total_winnings(&input, JRule::Joker)?;
    println!("The total winnings with jokers are: {}", winnings);
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
32T3K 765
T55J5 684
KK677 28
KTJJT 220
QQQJA 483";

    #[test]
    fn test_p1() {
        assert_eq!(compute_total_winnings(INPUT, JRule::Jack).unwrap(), 6440);
    }

    #[test]
    fn test_p2() {
        assert_eq!(compute_total_winnings(INPUT, JRule::Joker).unwrap(), 5905);
    }

    #[test]
    fn test_classify() {
        let cards = |s: &str| -> [char; 5] { s.chars().collect_vec().try_into().unwrap() };
        assert_eq!(classify(&cards("AAAAA"), JRule::Jack), HandType::FiveOfAKind);
        assert_eq!(classify(&cards("23332"), JRule::Jack), HandType::FullHouse);
        assert_eq!(classify(&cards("23456"), JRule::Jack), HandType::HighCard);
        assert_eq!(classify(&cards("JJJJJ"), JRule::Joker), HandType::FiveOfAKind);
        assert_eq!(classify(&cards("KTJJT"), JRule::Joker), HandType::FourOfAKind);
        assert_eq!(classify(&cards("2345J"), JRule::Joker), HandType::OnePair);
        assert_eq!(classify(&cards("2233J"), JRule::Joker), HandType::FullHouse);
    }

    #[test]
    fn test_invalid_hands() {
        assert!(parse_hand("2345 1", JRule::Jack).is_err());
        assert!(parse_hand("2345X 1", JRule::Jack).is_err());
    }
}
