//! Command-line definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::number::parse_number;

#[derive(Debug, Parser)]
#[command(name = "lbafix", version)]
#[command(about = "Patch boot binaries for discs authored at a custom start LBA")]
pub struct Cli {
    /// Increase log verbosity
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply relocation and unprotect patches to binaries (dry run without -w)
    Patch(PatchArgs),
    /// Convert a platform-specific binary to the generic layout and clear
    /// the boot sector flag
    Convert(ConvertArgs),
    /// Clear the boot sector mode flag only
    Flag {
        /// Boot sector file (IP.BIN)
        boot_sector: PathBuf,
    },
    /// Insert a logo image into the boot sector
    Logo {
        /// Logo image file
        image: PathBuf,
        /// Boot sector file (IP.BIN)
        boot_sector: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct PatchArgs {
    /// Old position [default: 45000]
    #[arg(short = 'o', long = "old-pos", env = "LBAFIX_OLD", value_parser = parse_number)]
    pub old_pos: Option<u32>,

    /// New position [default: 11702]
    #[arg(short = 'n', long = "new-pos", env = "LBAFIX_NEW", value_parser = parse_number)]
    pub new_pos: Option<u32>,

    /// HACK0: oldpos -> newpos
    #[arg(short = '0', long)]
    pub hack0: bool,

    /// HACK1: (oldpos+166) -> (newpos+166)
    #[arg(short = '1', long)]
    pub hack1: bool,

    /// HACK2: (oldpos+150) -> (newpos+150)
    #[arg(short = '2', long)]
    pub hack2: bool,

    /// HACK3: HACK1 + HACK2
    #[arg(short = '3', long)]
    pub hack3: bool,

    /// Unprotect mode (CD E4 43 6A -> 09 00 09 00)
    #[arg(short = 'p', long)]
    pub unprotect: bool,

    /// Write mode, actually modify the files (BE CAREFUL!)
    #[arg(short = 'w', long)]
    pub write: bool,

    /// TOML profile with default settings. Modes enabled in the profile
    /// are combined with the mode flags unless --reset-modes is given
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Ignore the profile's modes and unprotect setting, use only the flags
    #[arg(long)]
    pub reset_modes: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Target file(s), wildcards supported
    #[arg(required = true)]
    pub files: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Platform-specific binary (0WINCEOS.BIN)
    pub binary: PathBuf,

    /// Boot sector file (IP.BIN)
    pub boot_sector: PathBuf,

    /// Output file [default: 1ST_READ.BIN next to the input]
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Replace the original binary with the converted one
    #[arg(long)]
    pub replace: bool,
}
