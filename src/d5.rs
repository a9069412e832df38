use advent::helpers;
use anyhow::{Context, Result};
use itertools::Itertools;
use std::str::FromStr;

type Value = i64;

/// Half-open range of values `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SeedRange {
    start: Value,
    end: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MappingRule {
    source: SeedRange,
    offset: Value,
}

#[derive(Debug)]
struct Mapping {
    name: String,
    rules: Vec<MappingRule>,
}

#[derive(Debug)]
struct Almanac {
    seeds: Vec<Value>,
    mappings: Vec<Mapping>,
}

impl SeedRange {
    fn from_length(start: Value, length: Value) -> Self {
        SeedRange {
            start,
            end: start + length,
        }
    }

    fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    fn intersection(&self, other: &SeedRange) -> SeedRange {
        SeedRange {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        }
    }
}

impl FromStr for MappingRule {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (destination, source, length) = s
            .split_whitespace()
            .map(|n| n.parse::<Value>())
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .collect_tuple()
            .ok_or_else(|| anyhow::anyhow!("Expected 3 values in mapping rule: {}", s))?;
        Ok(MappingRule {
            source: SeedRange::from_length(source, length),
            offset: destination - source,
        })
    }
}

impl Mapping {
    /// Source and destination category, from a header like `seed-to-soil`.
    fn categories(&self) -> Result<(&str, &str)> {
        self.name
            .split_once("-to-")
            .with_context(|| format!("Invalid map name: {}", self.name))
    }

    fn map_value(&self, v: Value) -> Value {
        self.rules
            .iter()
            .find(|r| (r.source.start..r.source.end).contains(&v))
            .map(|r| v + r.offset)
            .unwrap_or(v)
    }

    /// Splits `range` into pieces covered by the rules, which get shifted,
    /// and uncovered pieces, which map to themselves.
    fn map_range(&self, range: SeedRange) -> Vec<SeedRange> {
        let mut unmapped = vec![range];
        let mut mapped = vec![];
        for rule in &self.rules {
            let mut still_unmapped = vec![];
            for r in unmapped {
                let inside = r.intersection(&rule.source);
                if inside.is_empty() {
                    still_unmapped.push(r);
                    continue;
                }
                mapped.push(SeedRange {
                    start: inside.start + rule.offset,
                    end: inside.end + rule.offset,
                });
                let before = SeedRange {
                    start: r.start,
                    end: inside.start,
                };
                let after = SeedRange {
                    start: inside.end,
                    end: r.end,
                };
                still_unmapped.extend([before, after].iter().filter(|p| !p.is_empty()));
            }
            unmapped = still_unmapped;
        }
        mapped.extend(unmapped);
        mapped
    }
}

impl FromStr for Almanac {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().replace("\r\n", "\n");
        let mut sections = s.split("\n\n");
        let seeds = sections
            .next()
            .and_then(|l| l.trim().strip_prefix("seeds:"))
            .context("Missing seeds line")?
            .split_whitespace()
            .map(|n| n.parse::<Value>())
            .collect::<Result<Vec<_>, _>>()?;
        let mappings = sections
            .map(|section| {
                let mut lines = section.trim().lines().map(str::trim);
                let name = lines
                    .next()
                    .and_then(|l| l.strip_suffix(" map:"))
                    .context("Missing map header")?
                    .to_owned();
                let rules = lines.map(str::parse).collect::<Result<Vec<_>>>()?;
                Ok(Mapping { name, rules })
            })
            .collect::<Result<Vec<Mapping>>>()?;
        for (previous, next) in mappings.iter().tuple_windows() {
            if previous.categories()?.1 != next.categories()?.0 {
                anyhow::bail!("Map {} doesn't follow {}", next.name, previous.name);
            }
        }
        Ok(Almanac { seeds, mappings })
    }
}

impl Almanac {
    fn location_of(&self, seed: Value) -> Value {
        self.mappings
            .iter()
            .fold(seed, |value, mapping| mapping.map_value(value))
    }

    fn seed_ranges(&self) -> Result<Vec<SeedRange>> {
        anyhow::ensure!(
            self.seeds.len() % 2 == 0,
            "Seed ranges need pairs of values, got {}",
            self.seeds.len()
        );
        Ok(self
            .seeds
            .iter()
            .tuples()
            .map(|(&start, &length)| SeedRange::from_length(start, length))
            .filter(|r| !r.is_empty())
            .collect())
    }

    fn location_ranges(&self) -> Result<Vec<SeedRange>> {
        let ranges = self
            .mappings
            .iter()
            .fold(self.seed_ranges()?, |ranges, mapping| {
                ranges
                    .into_iter()
                    .flat_map(|r| mapping.map_range(r))
                    .collect()
            });
        Ok(ranges)
    }
}

fn lowest_location(s: &str) -> Result<Value> {
    let almanac = s.parse::<Almanac>()?;
    almanac
        .seeds
        .iter()
        .map(|&seed| almanac.location_of(seed))
        .min()
        .context("No seeds")
}

fn lowest_location_of_seed_ranges(s: &str) -> Result<Value> {
    let almanac = s.parse::<Almanac>()?;
    almanac
        .location_ranges()?
        .iter()
        .filter(|r| !r.is_empty())
        .map(|r| r.start)
        .min()
        .context("No seed ranges")
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d5")?;
    let location = lowest_location(&input)?;
    println!("The lowest location number is: {}", location);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d5")?;
    let location = lowest_location_of_seed_ranges(&input)?;
    println!(
        "The lowest location number for the seed ranges is: {}",
        location
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

    const INPUT: &str = "
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4";

    fn test_mapping() -> Mapping {
        Mapping {
            name: "test".to_owned(),
            rules: vec!["200 100 50".parse().unwrap()],
        }
    }

    #[test]
    fn test_p1() {
        assert_eq!(lowest_location(INPUT).unwrap(), 35);
    }

    #[test]
    fn test_p2() {
        assert_eq!(lowest_location_of_seed_ranges(INPUT).unwrap(), 46);
    }

    #[test]
    fn test_parse() {
        let almanac = INPUT.parse::<Almanac>().unwrap();
        assert_eq!(almanac.seeds, vec![79, 14, 55, 13]);
        assert_eq!(almanac.mappings.len(), 7);
        assert_eq!(almanac.mappings[0].name, "seed-to-soil");
        assert_eq!(almanac.mappings[0].map_value(79), 81);
        assert_eq!(almanac.mappings[6].categories().unwrap(), ("humidity", "location"));
        let shuffled = INPUT.replace("water-to-light", "light-to-water");
        assert!(shuffled.parse::<Almanac>().is_err());
    }

    #[test]
    fn test_seed_range_pairs() {
        let odd = INPUT.replace("seeds: 79 14 55 13", "seeds: 79 14 3");
        assert!(lowest_location_of_seed_ranges(&odd).is_err());
        let empty_first = INPUT.replace("seeds: 79 14 55 13", "seeds: 5 0 79 14");
        assert_eq!(lowest_location_of_seed_ranges(&empty_first).unwrap(), 46);
        let almanac = empty_first.parse::<Almanac>().unwrap();
        assert_eq!(almanac.seed_ranges().unwrap(), vec![SeedRange::from_length(79, 14)]);
    }

    #[test]
    fn test_map_range_included() {
        let mapped = test_mapping().map_range(SeedRange::from_length(110, 10));
        assert_eq!(mapped, vec![SeedRange::from_length(210, 10)]);
    }

    #[test]
    fn test_map_range_including() {
        let mapped = test_mapping().map_range(SeedRange::from_length(90, 70));
        assert_eq!(
            mapped,
            vec![
                SeedRange::from_length(200, 50),
                SeedRange::from_length(90, 10),
                SeedRange::from_length(150, 10),
            ]
        );
    }

    #[test]
    fn test_map_range_left() {
        let mapped = test_mapping().map_range(SeedRange::from_length(80, 40));
        assert_eq!(
            mapped,
            vec![
                SeedRange::from_length(200, 20),
                SeedRange::from_length(80, 20),
            ]
        );
    }

    #[test]
    fn test_map_range_outside() {
        let mapped = test_mapping().map_range(SeedRange::from_length(500, 100));
        assert_eq!(mapped, vec![SeedRange::from_length(500, 100)]);
    }
}
