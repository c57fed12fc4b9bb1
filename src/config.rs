//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

/// Number of levels shipped with the game.
pub(crate) const LEVEL_COUNT: u8 = 5;

/// Runtime configuration, parsed from the command line.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct Config {
    /// Level to play, from 1 to 5. When omitted the level is chosen in the game.
    #[arg(short, long)]
    pub level: Option<u8>,
    /// Directory holding the `level<N>_maze.txt` files.
    #[arg(short = 'd', long, default_value = "levels")]
    pub levels_dir: PathBuf,
    /// File to write diagnostic logs to. Nothing is logged when omitted.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Validates the level requested on the command line, if any.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLevel`] if the requested level is not between 1 and 5.
    pub fn level(&self) -> Result<Option<Level>, InvalidLevel> {
        self.level.map(Level::try_from).transpose()
    }
}

/// Level number outside of the shipped range.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error(
    "invalid level selection {0}, choose a level between 1 and {last}",
    last = LEVEL_COUNT
)]
pub struct InvalidLevel(pub u8);

/// Validated level number, from 1 to 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Level(u8);

impl Level {
    /// The level number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Iterates over every shipped level, in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=LEVEL_COUNT).map(Self)
    }
}

impl TryFrom<u8> for Level {
    type Error = InvalidLevel;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        if (1..=LEVEL_COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(InvalidLevel(number))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1)]
    #[case(5)]
    fn test_level_in_range(#[case] number: u8) {
        assert_eq!(Level::try_from(number).map(Level::number), Ok(number));
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(u8::MAX)]
    fn test_level_out_of_range(#[case] number: u8) {
        assert_eq!(Level::try_from(number), Err(InvalidLevel(number)));
    }

    #[test]
    fn test_all_levels() {
        let numbers: Vec<u8> = Level::all().map(Level::number).collect();

        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::try_parse_from(["maze-out"]).expect("no arguments should parse");

        assert_eq!(config.level, None);
        assert_eq!(config.levels_dir, Path::new("levels"));
        assert_eq!(config.log_file, None);
        assert_eq!(config.level(), Ok(None));
    }

    #[test]
    fn test_config_arguments() {
        let config = Config::try_parse_from([
            "maze-out",
            "--level",
            "3",
            "-d",
            "mazes",
            "--log-file",
            "maze.log",
        ])
        .expect("arguments should parse");

        assert_eq!(config.level().map(|level| level.map(Level::number)), Ok(Some(3)));
        assert_eq!(config.levels_dir, Path::new("mazes"));
        assert_eq!(config.log_file.as_deref(), Some(Path::new("maze.log")));
    }

    #[test]
    fn test_config_rejects_out_of_range_level() {
        let config =
            Config::try_parse_from(["maze-out", "-l", "9"]).expect("any u8 should parse");

        assert_eq!(config.level(), Err(InvalidLevel(9)));
    }

    #[test]
    fn test_invalid_level_message() {
        assert_eq!(
            InvalidLevel(7).to_string(),
            "invalid level selection 7, choose a level between 1 and 5"
        );
    }
}
