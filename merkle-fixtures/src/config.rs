//! Fixture configuration.
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. TOML file (`--config`, else `<config_dir>/merkle-fixtures/config.toml` if present)
//! 3. `MERKLE_FIXTURES_*` environment variables
//! 4. command-line flags
//!
//! `layout` shapes the tree behind the root and single-proof commands.
//! Multiproof commands always use the heap shape.

use anyhow::{Context, Result};
use merkle_standard::{EncodingKind, MerkleTree, ProofTree, TreeLayout, TreeOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "MERKLE_FIXTURES_";

/// Sample elements used when nothing else is configured.
const DEFAULT_ELEMENTS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Leaf values, in tree order unless `sort_leaves` is set
    pub elements: Vec<String>,

    /// How each element becomes a leaf hash
    pub encoding: EncodingKind,

    /// Sort leaf hashes before building
    pub sort_leaves: bool,

    /// Tree shape for root and single-proof output
    pub layout: TreeLayout,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            elements: DEFAULT_ELEMENTS.chars().map(|c| c.to_string()).collect(),
            encoding: EncodingKind::Raw,
            sort_leaves: false,
            layout: TreeLayout::Layered,
            log_level: "warn".to_string(),
        }
    }
}

impl FixtureConfig {
    /// Load from file (if any) and apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply `ELEMENTS`, `ENCODING`, `SORT_LEAVES`, `LAYOUT` and `LOG` overrides.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(elements) = lookup("ELEMENTS") {
            self.elements = split_list(&elements);
        }
        if let Some(encoding) = lookup("ENCODING") {
            self.encoding = encoding
                .parse()
                .with_context(|| format!("Invalid {}ENCODING", ENV_PREFIX))?;
        }
        if let Some(sort) = lookup("SORT_LEAVES") {
            self.sort_leaves = sort
                .parse()
                .with_context(|| format!("Invalid {}SORT_LEAVES: {}", ENV_PREFIX, sort))?;
        }
        if let Some(layout) = lookup("LAYOUT") {
            self.layout = layout
                .parse()
                .with_context(|| format!("Invalid {}LAYOUT", ENV_PREFIX))?;
        }
        if let Some(level) = lookup("LOG") {
            self.log_level = level;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.elements.is_empty() {
            anyhow::bail!("At least one element is required to build a tree");
        }
        Ok(())
    }

    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            sort_leaves: self.sort_leaves,
        }
    }

    /// Build the tree these settings describe, in the configured layout.
    pub fn build_tree(&self) -> Result<Box<dyn ProofTree>> {
        self.validate()?;
        self.layout
            .build(&self.elements, self.encoding.encoder(), self.tree_options())
            .with_context(|| format!("Failed to build {} merkle tree", self.layout))
    }

    /// Build the heap-shaped tree multiproofs are taken from.
    pub fn build_heap_tree(&self) -> Result<MerkleTree> {
        self.validate()?;
        MerkleTree::from_values(&self.elements, self.encoding.encoder(), self.tree_options())
            .context("Failed to build heap merkle tree")
    }
}

/// Split a comma-separated list, trimming whitespace and dropping empties.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("merkle-fixtures").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FixtureConfig::default();
        assert_eq!(config.elements.len(), 65);
        assert_eq!(config.encoding, EncodingKind::Raw);
        assert_eq!(config.layout, TreeLayout::Layered);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "elements = [\"a\", \"b\", \"c\"]").unwrap();
        writeln!(file, "encoding = \"standard\"").unwrap();

        let config = FixtureConfig::from_file(file.path()).unwrap();
        assert_eq!(config.elements, vec!["a", "b", "c"]);
        assert_eq!(config.encoding, EncodingKind::Standard);
        assert!(!config.sort_leaves);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_bad_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "encoding = \"blake3\"").unwrap();

        let err = FixtureConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ELEMENTS", "x, y ,z"),
            ("ENCODING", "standard"),
            ("SORT_LEAVES", "true"),
            ("LAYOUT", "heap"),
            ("LOG", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = FixtureConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.elements, vec!["x", "y", "z"]);
        assert_eq!(config.encoding, EncodingKind::Standard);
        assert!(config.sort_leaves);
        assert_eq!(config.layout, TreeLayout::Heap);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_override() {
        let mut config = FixtureConfig::default();
        let result = config.apply_overrides(|key| (key == "SORT_LEAVES").then(|| "maybe".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_elements_rejected() {
        let config = FixtureConfig {
            elements: vec![],
            ..FixtureConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config.build_tree().is_err());
        assert!(config.build_heap_tree().is_err());
    }

    #[test]
    fn test_default_layouts_differ_on_default_elements() {
        let config = FixtureConfig::default();
        let layered = config.build_tree().unwrap();
        let heap = config.build_heap_tree().unwrap();
        assert_eq!(layered.layout(), TreeLayout::Layered);
        assert_eq!(
            layered.root().to_hex(),
            "0xec0dffcb601ee38fa372bbf1d89ed16761db0a0b215480032b783f8c33230783"
        );
        assert_ne!(layered.root(), heap.root());
    }
}
