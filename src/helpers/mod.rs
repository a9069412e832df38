pub mod grid;
pub mod nom;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Command line arguments shared by every day.
#[derive(Debug, Parser)]
pub struct DayArgs {
    /// Read the puzzle input from this file instead of data/<day>.txt.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

pub fn data_file_path(name: &str) -> PathBuf {
    PathBuf::from(format!("data/{}.txt", name))
}

pub fn read_day_input(name: &str) -> Result<String> {
    let args = DayArgs::parse();
    let path = args.input.unwrap_or_else(|| data_file_path(name));
    fs::read_to_string(&path)
        .with_context(|| format!("Couldn't read file contents of {}.", path.display()))
}

pub fn lines_to_longs(contents: &str) -> Result<Vec<i64>> {
    contents
        .split_ascii_whitespace()
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("Invalid number: {}", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_file_path() {
        assert_eq!(data_file_path("d7"), PathBuf::from("data/d7.txt"));
    }

    #[test]
    fn test_lines_to_longs() {
        assert_eq!(lines_to_longs("0 3 -6\n9").unwrap(), vec![0, 3, -6, 9]);
        assert!(lines_to_longs("1 x").is_err());
    }

    #[test]
    fn test_day_args() {
        let args = DayArgs::parse_from(["d1", "--input", "example.txt"]);
        assert_eq!(args.input, Some(PathBuf::from("example.txt")));
        let args = DayArgs::parse_from(["d1"]);
        assert_eq!(args.input, None);
    }
}
