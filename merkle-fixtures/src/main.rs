//! merkle-fixtures: generate and check Merkle tree test fixtures.
//!
//! Artifacts go to stdout with no trailing newline so they can be consumed
//! byte-for-byte; logs go to stderr.

mod commands;
mod config;
mod output;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use merkle_standard::{EncodingKind, HashValue, TreeLayout};
use tracing_subscriber::EnvFilter;

use crate::config::{split_list, FixtureConfig};
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "merkle-fixtures")]
#[command(about = "Merkle tree fixture generator", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Comma-separated leaf values (overrides config)
    #[arg(short, long, global = true)]
    elements: Option<String>,

    /// Leaf encoding: raw | standard
    #[arg(long, global = true)]
    encoding: Option<EncodingKind>,

    /// Sort leaf hashes before building
    #[arg(long, global = true)]
    sort_leaves: bool,

    /// Tree shape for `tree` and single proofs: layered | heap (multiproofs always use heap)
    #[arg(long, global = true)]
    layout: Option<TreeLayout>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Abi)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Root and leaf hashes
    Tree {
        #[command(subcommand)]
        action: TreeAction,
    },

    /// Single and multi-leaf proofs
    Proof {
        #[command(subcommand)]
        action: ProofAction,
    },

    /// Check proofs against a root
    Verify {
        #[command(subcommand)]
        action: VerifyAction,
    },
}

#[derive(Subcommand)]
pub enum TreeAction {
    /// Print the root
    Root,

    /// Print the hash of one leaf
    Leaf {
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },

    /// Print an internal node that verifies as a raw leaf
    NoSuchLeaf,
}

#[derive(Subcommand)]
pub enum ProofAction {
    /// Proof for one leaf, as bytes32[N]
    Single {
        #[arg(short, long, default_value_t = 0)]
        index: usize,

        /// Required element count
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Proof for leaf 0; without its first sibling it proves `tree no-such-leaf`
    NoSuchLeaf {
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Multiproof for several leaves
    Multi {
        /// Comma-separated leaf indices
        #[arg(short, long, value_delimiter = ',', required = true)]
        indices: Vec<usize>,

        /// Which part of the multiproof to print
        #[arg(short, long, value_enum, default_value_t = MultiPart::All)]
        part: MultiPart,

        #[arg(short, long)]
        width: Option<usize>,
    },
}

#[derive(Subcommand)]
pub enum VerifyAction {
    /// Verify a single-leaf proof
    Single {
        /// Expected root (defaults to the configured tree's root)
        #[arg(short, long)]
        root: Option<HashValue>,

        /// Leaf hash
        #[arg(short, long)]
        leaf: HashValue,

        /// Comma-separated sibling hashes
        #[arg(short, long, value_delimiter = ',')]
        proof: Vec<HashValue>,
    },

    /// Verify a JSON multiproof (`proof multi --part all` output)
    Multi {
        #[arg(short, long)]
        root: Option<HashValue>,

        /// JSON file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MultiPart {
    Proof,
    Leaves,
    Flags,
    /// JSON object with all three
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = FixtureConfig::load(cli.config.as_deref())?;
    if let Some(elements) = &cli.elements {
        config.elements = split_list(elements);
    }
    if let Some(encoding) = cli.encoding {
        config.encoding = encoding;
    }
    if cli.sort_leaves {
        config.sort_leaves = true;
    }
    if let Some(layout) = cli.layout {
        config.layout = layout;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        elements = config.elements.len(),
        encoding = %config.encoding,
        sort_leaves = config.sort_leaves,
        layout = %config.layout,
        "Loaded fixture config"
    );

    let out = match cli.command {
        Commands::Tree { action } => commands::tree::handle(action, &config, cli.format)?,
        Commands::Proof { action } => commands::proof::handle(action, &config, cli.format)?,
        Commands::Verify { action } => commands::verify::handle(action, &config)?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
