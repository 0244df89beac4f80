//! Command line options

use clap::{Parser, Subcommand};
use optics::common::Float;
use std::path::PathBuf;

/// Largest diagram edge accepted on the command line.
const MAX_IMAGE_SIZE: i64 = 4096;

/// Largest supersampling factor accepted on the command line.
const MAX_SUPERSAMPLE: i64 = 8;

/// Build lens previews and shader source from lens prescriptions.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    #[command(subcommand)]
    pub command: Command,
}

/// Commands.
#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Render a preview diagram for every lens.
    Diagrams {
        /// Directory of lens files.
        #[arg(long, short = 'l', value_name = "DIR")]
        lenses: PathBuf,

        /// Directory the images are written to.
        #[arg(long, short = 'o', value_name = "DIR")]
        out: PathBuf,

        /// Width and height of each image.
        #[arg(
            long,
            value_name = "NUM",
            default_value_t = 256,
            value_parser = clap::value_parser!(u32).range(1..=MAX_IMAGE_SIZE)
        )]
        size: u32,

        /// Supersampling factor per axis.
        #[arg(
            long,
            value_name = "NUM",
            default_value_t = 2,
            value_parser = clap::value_parser!(u32).range(1..=MAX_SUPERSAMPLE)
        )]
        supersample: u32,
    },

    /// Generate the lens camera shader.
    Shader {
        /// Directory of lens files.
        #[arg(long, short = 'l', value_name = "DIR")]
        lenses: PathBuf,

        /// Shader template.
        #[arg(long, short = 't', value_name = "FILE")]
        template: PathBuf,

        /// Output file. Writes to stdout when omitted.
        #[arg(long, short = 'o', value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Trace one ray parallel to the axis through a lens.
    Trace {
        /// Directory of lens files.
        #[arg(long, short = 'l', value_name = "DIR")]
        lenses: PathBuf,

        /// Lens identifier.
        #[arg(long, value_name = "ID")]
        lens: String,

        /// Entry height above the axis in millimetres.
        #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
        height: Float,
    },

    /// Validate and list lenses.
    Check {
        /// Directory of lens files.
        #[arg(long, short = 'l', value_name = "DIR")]
        lenses: PathBuf,
    },
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
