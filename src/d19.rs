use advent::helpers;
use anyhow::{Context, Result};
use boolinator::Boolinator;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::collections::{HashMap, HashSet};

#[derive(Parser)]
#[grammar = "d19.pest"]
struct SortingDocumentParser;

type Part = [u64; 4];
/// Half-open rating ranges, one per category.
type PartRange = [(u64, u64); 4];

const ENTRY_WORKFLOW: &str = "in";
const MIN_RATING: u64 = 1;
const MAX_RATING: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target<'a> {
    Accept,
    Reject,
    Workflow(&'a str),
}

impl<'a> Target<'a> {
    fn new(s: &'a str) -> Self {
        match s {
            "A" => Target::Accept,
            "R" => Target::Reject,
            name => Target::Workflow(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Condition {
    category: usize,
    less_than: bool,
    value: u64,
}

impl Condition {
    fn holds(&self, part: &Part) -> bool {
        let rating = part[self.category];
        if self.less_than {
            rating < self.value
        } else {
            rating > self.value
        }
    }

    /// Splits a range into the portion that satisfies the condition and the
    /// portion that doesn't. Either may be empty.
    fn split(&self, range: (u64, u64)) -> ((u64, u64), (u64, u64)) {
        let (lo, hi) = range;
        if self.less_than {
            ((lo, hi.min(self.value)), (lo.max(self.value), hi))
        } else {
            ((lo.max(self.value + 1), hi), (lo, hi.min(self.value + 1)))
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Instruction<'a> {
    condition: Option<Condition>,
    target: Target<'a>,
}

impl<'a> Instruction<'a> {
    fn applies_to(&self, part: &Part) -> Option<Target<'a>> {
        self.condition
            .map_or(true, |c| c.holds(part))
            .as_some(self.target)
    }
}

type Workflows<'a> = HashMap<&'a str, Vec<Instruction<'a>>>;

fn category_index(s: &str) -> Result<usize> {
    "xmas".find(s).context("Invalid category")
}

fn next_inner<'a>(pairs: &mut pest::iterators::Pairs<'a, Rule>) -> Result<Pair<'a, Rule>> {
    pairs.next().context("Unexpected end of parse tree")
}

fn parse_condition(pair: Pair<Rule>) -> Result<Condition> {
    let mut inner = pair.into_inner();
    let category = category_index(next_inner(&mut inner)?.as_str())?;
    let less_than = next_inner(&mut inner)?.as_rule() == Rule::less;
    let value = next_inner(&mut inner)?.as_str().parse()?;
    Ok(Condition {
        category,
        less_than,
        value,
    })
}

fn parse_workflow(pair: Pair<Rule>) -> Result<(&str, Vec<Instruction>)> {
    let mut inner = pair.into_inner();
    let name = next_inner(&mut inner)?.as_str();
    let instructions = inner
        .map(|p| -> Result<Instruction> {
            if p.as_rule() != Rule::step {
                return Ok(Instruction {
                    condition: None,
                    target: Target::new(p.as_str()),
                });
            }
            let mut step = p.into_inner();
            let condition = parse_condition(next_inner(&mut step)?)?;
            let target = Target::new(next_inner(&mut step)?.as_str());
            Ok(Instruction {
                condition: Some(condition),
                target,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((name, instructions))
}

fn parse_part(pair: Pair<Rule>) -> Result<Part> {
    let mut part = [0; 4];
    for rating in pair.into_inner() {
        let mut inner = rating.into_inner();
        let category = category_index(next_inner(&mut inner)?.as_str())?;
        part[category] = next_inner(&mut inner)?.as_str().parse()?;
    }
    Ok(part)
}

fn parse_document(s: &str) -> Result<(Workflows, Vec<Part>)> {
    let document = SortingDocumentParser::parse(Rule::document, s.trim())?
        .next()
        .context("No document")?;
    let mut workflows = Workflows::new();
    let mut parts = Vec::new();
    for section in document.into_inner() {
        match section.as_rule() {
            Rule::workflows => {
                for w in section.into_inner() {
                    let (name, instructions) = parse_workflow(w)?;
                    workflows.insert(name, instructions);
                }
            }
            Rule::parts => {
                parts = section
                    .into_inner()
                    .map(parse_part)
                    .collect::<Result<Vec<_>>>()?;
            }
            _ => (),
        }
    }
    Ok((workflows, parts))
}

fn is_accepted(workflows: &Workflows, part: &Part) -> Result<bool> {
    let mut current = ENTRY_WORKFLOW;
    let mut visited = HashSet::new();
    loop {
        if !visited.insert(current) {
            anyhow::bail!("Workflow {} is visited twice", current);
        }
        let instructions = workflows
            .get(current)
            .with_context(|| format!("Unknown workflow: {}", current))?;
        let target = instructions
            .iter()
            .find_map(|i| i.applies_to(part))
            .with_context(|| format!("No rule of workflow {} applies", current))?;
        match target {
            Target::Accept => return Ok(true),
            Target::Reject => return Ok(false),
            Target::Workflow(next) => current = next,
        }
    }
}

fn sum_accepted_ratings(s: &str) -> Result<u64> {
    let (workflows, parts) = parse_document(s)?;
    let mut sum = 0;
    for part in parts {
        if is_accepted(&workflows, &part)? {
            sum += part.iter().sum::<u64>();
        }
    }
    Ok(sum)
}

fn range_size(range: &PartRange) -> u64 {
    range.iter().map(|&(lo, hi)| hi.saturating_sub(lo)).product()
}

/// `path` holds the workflows that led to `target`, so that cycles are
/// reported instead of followed.
fn accepted_combinations<'a>(
    workflows: &Workflows<'a>,
    target: Target<'a>,
    range: PartRange,
    path: &mut Vec<&'a str>,
) -> Result<u64> {
    if range_size(&range) == 0 {
        return Ok(0);
    }
    let name = match target {
        Target::Accept => return Ok(range_size(&range)),
        Target::Reject => return Ok(0),
        Target::Workflow(name) => name,
    };
    if path.contains(&name) {
        anyhow::bail!("Workflow {} is visited twice", name);
    }
    let instructions = workflows
        .get(name)
        .with_context(|| format!("Unknown workflow: {}", name))?;
    path.push(name);
    let mut remaining = range;
    let mut count = 0;
    for instruction in instructions {
        match instruction.condition {
            Some(condition) => {
                let (matching, rest) = condition.split(remaining[condition.category]);
                let mut matched = remaining;
                matched[condition.category] = matching;
                count += accepted_combinations(workflows, instruction.target, matched, path)?;
                remaining[condition.category] = rest;
            }
            None => {
                count += accepted_combinations(workflows, instruction.target, remaining, path)?;
                break;
            }
        }
    }
    path.pop();
    Ok(count)
}

fn count_accepted_combinations(s: &str) -> Result<u64> {
    let (workflows, _) = parse_document(s)?;
    let full_range = [(MIN_RATING, MAX_RATING + 1); 4];
    let entry = Target::Workflow(ENTRY_WORKFLOW);
    accepted_combinations(&workflows, entry, full_range, &mut vec![])
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d19")?;
    let sum = sum_accepted_ratings(&input)?;
    println!("The sum of ratings of accepted parts is: {}", sum);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d19")?;
    let count = count_accepted_combinations(&input)?;
    println!("Distinct accepted rating combinations: {}", count);
    Ok(())
}

fn main() -> Result<()> {
    solve_p1()?;
    solve_p2()
}
