//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "jukugo",
    version,
    about = "Two-character compound word relay against the computer"
)]
pub struct JukugoCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a match against the computer over stdin/stdout
    Play {
        /// Computer difficulty: master, hard, normal or easy
        #[arg(long)]
        difficulty: Option<String>,
        /// Who moves after the opening word
        #[arg(long, value_enum)]
        first: Option<FirstMover>,
        #[arg(long)]
        seed: Option<u64>,
        /// Dictionary file (.txt, .json, .yaml)
        #[arg(long)]
        dict: Option<String>,
        /// Opening word instead of a random draw
        #[arg(long)]
        opening: Option<String>,
        /// Name shown for the human seat
        #[arg(long, default_value = "You")]
        name: String,
    },
    /// Run computer-versus-computer matches
    Sim {
        #[arg(long, default_value_t = 1)]
        games: u32,
        /// Difficulty of the computer moving first
        #[arg(long, default_value = "master")]
        a: String,
        /// Difficulty of the computer moving second
        #[arg(long, default_value = "master")]
        b: String,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        dict: Option<String>,
        /// Append match records to this JSONL file
        #[arg(long)]
        output: Option<String>,
        /// Play every difficulty against --b instead of --a only
        #[arg(long)]
        ladder: bool,
    },
    /// Validate one relay step and print each checker's verdict
    Check {
        #[arg(long)]
        previous: String,
        #[arg(long)]
        word: String,
        /// Player id of the submitter
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
        player: u8,
        #[arg(long)]
        dict: Option<String>,
        /// Words already spent in this match
        #[arg(long = "used", value_delimiter = ',')]
        used: Vec<String>,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}

/// Who answers the opening word.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FirstMover {
    Human,
    Computer,
}

impl FirstMover {
    /// Returns the string representation of the first mover.
    ///
    /// # Examples
    ///
    /// ```
    /// # use jukugo_cli::cli::FirstMover;
    /// assert_eq!(FirstMover::Computer.as_str(), "computer");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            FirstMover::Human => "human",
            FirstMover::Computer => "computer",
        }
    }
}
