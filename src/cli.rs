//! Command-line interface for spellplay.

use clap::{Parser, Subcommand};
use spellplay::Difficulty;

/// Spellplay - word puzzles in the terminal
#[derive(Parser, Debug)]
#[command(name = "spellplay")]
#[command(about = "Tile placement, dictation spelling, and a peer duel demo", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the tile-placement definition puzzle
    Placement {
        /// Word difficulty tier
        #[arg(short, long, value_enum, default_value_t = Difficulty::Easy)]
        difficulty: Difficulty,

        /// Seed for the random source (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play the dictation spelling puzzle
    Dictation {
        /// Word difficulty tier
        #[arg(short, long, value_enum, default_value_t = Difficulty::Easy)]
        difficulty: Difficulty,

        /// Seed for the random source (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run a scripted two-player duel over an in-memory peer channel
    Duel {
        /// Word difficulty tier
        #[arg(short, long, value_enum, default_value_t = Difficulty::Easy)]
        difficulty: Difficulty,

        /// Seed for the random source (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}
