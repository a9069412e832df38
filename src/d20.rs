use advent::helpers;
use advent::helpers::nom::{parse_all, IResult};
use anyhow::Result;
use itertools::Itertools;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, char, line_ending},
    combinator::{map, opt},
    multi::separated_list1,
    sequence::{pair, separated_pair},
};
use std::collections::{HashMap, HashSet, VecDeque};

const BROADCASTER: &str = "broadcaster";
const BUTTON: &str = "button";
const FINAL_MACHINE: &str = "rx";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Broadcaster,
    FlipFlop,
    Conjunction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State<'a> {
    Broadcaster,
    FlipFlop { on: bool },
    Conjunction { memory: HashMap<&'a str, bool> },
}

#[derive(Debug, Clone)]
struct Module<'a> {
    state: State<'a>,
    outputs: Vec<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pulse<'a> {
    from: &'a str,
    to: &'a str,
    high: bool,
}

#[derive(Debug, Clone)]
struct Network<'a> {
    modules: HashMap<&'a str, Module<'a>>,
}

fn parse_module(i: &str) -> IResult<(Kind, &str, Vec<&str>)> {
    // %a -> inv, con
    let kind = map(opt(alt((char('%'), char('&')))), |c| match c {
        Some('%') => Kind::FlipFlop,
        Some(_) => Kind::Conjunction,
        None => Kind::Broadcaster,
    });
    map(
        separated_pair(pair(kind, alpha1), tag(" -> "), separated_list1(tag(", "), alpha1)),
        |((kind, name), outputs)| (kind, name, outputs),
    )(i)
}

impl<'a> Network<'a> {
    fn parse(s: &'a str) -> Result<Self> {
        let specs = parse_all(separated_list1(line_ending, parse_module), s.trim())?;
        let mut modules = HashMap::new();
        for (kind, name, outputs) in &specs {
            let state = match kind {
                Kind::Broadcaster if *name == BROADCASTER => State::Broadcaster,
                Kind::Broadcaster => anyhow::bail!("Module {} has no type", name),
                Kind::FlipFlop => State::FlipFlop { on: false },
                Kind::Conjunction => State::Conjunction {
                    memory: HashMap::new(),
                },
            };
            let module = Module {
                state,
                outputs: outputs.clone(),
            };
            if modules.insert(*name, module).is_some() {
                anyhow::bail!("Module {} is defined twice", name);
            }
        }
        for (_, name, outputs) in &specs {
            for output in outputs {
                if let Some(Module {
                    state: State::Conjunction { memory },
                    ..
                }) = modules.get_mut(output)
                {
                    memory.insert(*name, false);
                }
            }
        }
        Ok(Network { modules })
    }

    fn inputs_of(&self, target: &str) -> Vec<&'a str> {
        self.modules
            .iter()
            .filter(|(_, m)| m.outputs.iter().any(|&o| o == target))
            .map(|(&name, _)| name)
            .collect()
    }

    /// Flip-flop states and conjunction memories, in module name order.
    fn snapshot(&self) -> Vec<bool> {
        self.modules
            .iter()
            .sorted_by_key(|&(&name, _)| name)
            .flat_map(|(_, module)| match &module.state {
                State::Broadcaster => vec![],
                State::FlipFlop { on } => vec![*on],
                State::Conjunction { memory } => memory
                    .iter()
                    .sorted_by_key(|&(&input, _)| input)
                    .map(|(_, &high)| high)
                    .collect(),
            })
            .collect()
    }

    /// Sends one low pulse to the broadcaster and processes pulses in the
    /// order they are sent until the network settles.
    fn push_button<F>(&mut self, mut on_pulse: F)
    where
        F: FnMut(&Pulse<'a>),
    {
        let mut queue = VecDeque::from(vec![Pulse {
            from: BUTTON,
            to: BROADCASTER,
            high: false,
        }]);
        while let Some(pulse) = queue.pop_front() {
            on_pulse(&pulse);
            let module = match self.modules.get_mut(pulse.to) {
                Some(m) => m,
                None => continue,
            };
            let sent = match &mut module.state {
                State::Broadcaster => Some(pulse.high),
                State::FlipFlop { .. } if pulse.high => None,
                State::FlipFlop { on } => {
                    *on = !*on;
                    Some(*on)
                }
                State::Conjunction { memory } => {
                    memory.insert(pulse.from, pulse.high);
                    Some(!memory.values().all(|&h| h))
                }
            };
            if let Some(high) = sent {
                queue.extend(module.outputs.iter().map(|&to| Pulse {
                    from: pulse.to,
                    to,
                    high,
                }));
            }
        }
    }
}

fn pulse_product(s: &str, presses: usize) -> Result<u64> {
    let mut network = Network::parse(s)?;
    let (mut low, mut high) = (0, 0);
    for _ in 0..presses {
        network.push_button(|p| {
            if p.high {
                high += 1
            } else {
                low += 1
            }
        });
    }
    Ok(low * high)
}

/// The final machine is fed by a single conjunction, which sends it a low
/// pulse once all of its inputs last sent a high pulse. Each input is
/// assumed to do so periodically, first on the press that equals its period.
/// If the whole network returns to an earlier state first, some input never
/// will.
fn presses_until_machine_starts(s: &str) -> Result<u64> {
    let mut network = Network::parse(s)?;
    let feeders = network.inputs_of(FINAL_MACHINE);
    let feeder = match feeders.as_slice() {
        [feeder] => *feeder,
        _ => anyhow::bail!("Expected a single module feeding {}", FINAL_MACHINE),
    };
    let mut first_high: HashMap<&str, Option<u64>> = network
        .inputs_of(feeder)
        .into_iter()
        .map(|input| (input, None))
        .collect();
    if first_high.is_empty() {
        anyhow::bail!("Module {} has no inputs", feeder);
    }
    let mut seen = HashSet::new();
    let mut presses = 0;
    while first_high.values().any(Option::is_none) {
        if !seen.insert(network.snapshot()) {
            anyhow::bail!("Some input of {} never sends it a high pulse", feeder);
        }
        presses += 1;
        network.push_button(|p| {
            if p.high && p.to == feeder {
                if let Some(first) = first_high.get_mut(p.from) {
                    first.get_or_insert(presses);
                }
            }
        });
    }
    Ok(first_high
        .values()
        .flatten()
        .fold(1, |acc, &first| num_integer::lcm(acc, first)))
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d20")?;
    let product = pulse_product(&input, 1000)?;
    println!(
        "Product of low and high pulses sent after 1000 presses: {}",
        product
    );
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d20")?;
    let presses = presses_until_machine_starts(&input)?;
    println!(
        "Fewest button presses to deliver a low pulse to {}: {}",
        FINAL_MACHINE, presses
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
broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a";
        assert_eq!(pulse_product(input, 1000).unwrap(), 32000000);

        let input = "
broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output";
        assert_eq!(pulse_product(input, 1000).unwrap(), 11687500);
    }

    #[test]
    fn test_p2() {
        let input = "
broadcaster -> aa, ba
%aa -> ab
%ab -> ca
&ca -> gate
%ba -> bb
%bb -> bc
%bc -> cb
&cb -> gate
&gate -> rx";
        assert_eq!(presses_until_machine_starts(input).unwrap(), 8);
    }

    #[test]
    fn test_single_press() {
        let input = "
broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output";
        let mut network = Network::parse(input).unwrap();
        let mut pulses = vec![];
        network.push_button(|p| pulses.push((p.from, p.to, p.high)));
        assert_eq!(
            pulses,
            vec![
                ("button", "broadcaster", false),
                ("broadcaster", "a", false),
                ("a", "inv", true),
                ("a", "con", true),
                ("inv", "b", false),
                ("con", "output", true),
                ("b", "con", true),
                ("con", "output", false),
            ]
        );
    }

    #[test]
    fn test_invalid_network() {
        assert!(Network::parse("foo -> a").is_err());
        assert!(presses_until_machine_starts("broadcaster -> a\n%a -> b").is_err());
        let input = "
broadcaster -> c
&c -> f
%f -> gate
&gate -> rx";
        let err = presses_until_machine_starts(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Some input of gate never sends it a high pulse"
        );
    }

    #[test]
    fn test_snapshot() {
        let mut network = Network::parse("broadcaster -> a\n%a -> con\n&con -> out").unwrap();
        assert_eq!(network.snapshot(), vec![false, false]);
        network.push_button(|_| ());
        assert_eq!(network.snapshot(), vec![true, true]);
    }
}
