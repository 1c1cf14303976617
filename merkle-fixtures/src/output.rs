//! Artifact encodings written to stdout.
//!
//! `abi` emits what `abi.encode` produces for a fixed-size static array:
//! `0x` followed by one 32-byte word per element, no length prefix.
//! `json` emits serde_json.

use clap::ValueEnum;
use merkle_standard::encoding::abi_word;
use merkle_standard::HashValue;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Abi,
    Json,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutputError {
    #[error("Expected exactly {expected} elements, got {got}")]
    WidthMismatch { expected: usize, got: usize },

    #[error("Failed to serialize output: {0}")]
    Json(String),
}

fn check_width(len: usize, width: Option<usize>) -> Result<(), OutputError> {
    match width {
        Some(expected) if expected != len => Err(OutputError::WidthMismatch { expected, got: len }),
        _ => Ok(()),
    }
}

/// `bytes32[N]`, where N must equal `width` when one is given.
pub fn encode_bytes32(words: &[HashValue], width: Option<usize>) -> Result<String, OutputError> {
    check_width(words.len(), width)?;
    let mut out = String::with_capacity(2 + words.len() * 64);
    out.push_str("0x");
    for word in words {
        out.push_str(&hex::encode(word.as_bytes()));
    }
    Ok(out)
}

/// `bool[N]`, each flag left-padded to a full word.
pub fn encode_bools(flags: &[bool], width: Option<usize>) -> Result<String, OutputError> {
    check_width(flags.len(), width)?;
    let mut out = String::with_capacity(2 + flags.len() * 64);
    out.push_str("0x");
    for &flag in flags {
        out.push_str(&hex::encode(abi_word(flag as u64)));
    }
    Ok(out)
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, OutputError> {
    serde_json::to_string_pretty(value).map_err(|e| OutputError::Json(e.to_string()))
}

/// Render a list of hashes in the requested format.
pub fn render_hashes(
    words: &[HashValue],
    format: OutputFormat,
    width: Option<usize>,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Abi => encode_bytes32(words, width),
        OutputFormat::Json => {
            check_width(words.len(), width)?;
            to_json(&words)
        }
    }
}
