//! Tree command handlers

use anyhow::Result;
use tracing::debug;

use crate::config::FixtureConfig;
use crate::output::{to_json, OutputFormat};
use merkle_standard::HashValue;

pub fn handle(action: crate::TreeAction, config: &FixtureConfig, format: OutputFormat) -> Result<String> {
    let tree = config.build_tree()?;
    debug!(
        leaves = tree.len(),
        encoding = %config.encoding,
        layout = %tree.layout(),
        "Built fixture tree"
    );

    let hash = match action {
        crate::TreeAction::Root => tree.root(),
        crate::TreeAction::Leaf { index } => tree.leaf(index)?,
        crate::TreeAction::NoSuchLeaf => super::no_such_leaf(tree.as_ref())?,
    };

    render(&hash, format)
}

fn render(hash: &HashValue, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Abi => hash.to_hex(),
        OutputFormat::Json => to_json(hash)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::config;
    use crate::TreeAction;
    use merkle_standard::{keccak256, EncodingKind, TreeLayout};

    #[test]
    fn test_root_standard_vector() {
        let mut cfg = config("abc", EncodingKind::Standard);
        cfg.sort_leaves = true;
        cfg.layout = TreeLayout::Heap;
        let out = handle(TreeAction::Root, &cfg, OutputFormat::Abi).unwrap();
        assert_eq!(out, "0xf2129b5a697531ef818f644564a6552b35c549722385bc52aa7fe46c0b5f46b1");
    }

    #[test]
    fn test_root_of_default_elements_per_layout() {
        let mut cfg = FixtureConfig::default();
        let out = handle(TreeAction::Root, &cfg, OutputFormat::Abi).unwrap();
        assert_eq!(out, "0xec0dffcb601ee38fa372bbf1d89ed16761db0a0b215480032b783f8c33230783");

        cfg.layout = TreeLayout::Heap;
        let out = handle(TreeAction::Root, &cfg, OutputFormat::Abi).unwrap();
        assert_eq!(out, "0xc9440f757569a93c049b5f64bc5b7eaf0308400b50824e706be3cb17bde90adf");
    }

    #[test]
    fn test_leaf_is_raw_keccak_of_element() {
        let cfg = config("abcd", EncodingKind::Raw);
        let out = handle(TreeAction::Leaf { index: 0 }, &cfg, OutputFormat::Abi).unwrap();
        assert_eq!(out, keccak256(b"a").to_hex());

        let out = handle(TreeAction::Leaf { index: 3 }, &cfg, OutputFormat::Json).unwrap();
        assert_eq!(out, format!("\"{}\"", keccak256(b"d")));
    }

    #[test]
    fn test_leaf_out_of_range() {
        let cfg = config("abcd", EncodingKind::Raw);
        let err = handle(TreeAction::Leaf { index: 4 }, &cfg, OutputFormat::Abi).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_no_such_leaf() {
        let cfg = config("abcd", EncodingKind::Raw);
        let out = handle(TreeAction::NoSuchLeaf, &cfg, OutputFormat::Abi).unwrap();
        let expected = merkle_standard::hash_pair(&keccak256(b"a"), &keccak256(b"b"));
        assert_eq!(out, expected.to_hex());

        let single = config("a", EncodingKind::Raw);
        assert!(handle(TreeAction::NoSuchLeaf, &single, OutputFormat::Abi).is_err());
    }
}
