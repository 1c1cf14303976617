//! Verify command handlers
//!
//! A root given on the command line wins; otherwise single proofs are checked
//! against the configured tree and multiproofs against the heap tree.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::config::FixtureConfig;
use merkle_standard::{verify_multi_proof, verify_proof, MultiProof};

pub fn handle(action: crate::VerifyAction, config: &FixtureConfig) -> Result<String> {
    match action {
        crate::VerifyAction::Single { root, leaf, proof } => {
            let root = match root {
                Some(root) => root,
                None => config.build_tree()?.root(),
            };
            if !verify_proof(&root, &leaf, &proof) {
                bail!("Proof does not reproduce root {}", root);
            }
            Ok(format!("{} Proof valid for leaf {} under root {}", "✓".green().bold(), leaf, root))
        }

        crate::VerifyAction::Multi { root, input } => {
            let root = match root {
                Some(root) => root,
                None => config.build_heap_tree()?.root(),
            };
            let multi = read_multiproof(&input)?;

            let valid = match verify_multi_proof(&root, &multi.leaves, &multi.proof, &multi.proof_flags) {
                Ok(valid) => valid,
                Err(e) if e.is_malformed_proof() => {
                    return Err(anyhow::Error::new(e).context("Malformed multiproof"))
                }
                Err(e) => return Err(e.into()),
            };
            if !valid {
                bail!("Multiproof does not reproduce root {}", root);
            }
            Ok(format!(
                "{} Multiproof valid for {} leaves under root {}",
                "✓".green().bold(),
                multi.leaves.len(),
                root
            ))
        }
    }
}

/// Read a JSON multiproof from a file, or stdin for `-`.
fn read_multiproof(input: &Path) -> Result<MultiProof> {
    let raw = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read multiproof from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read multiproof from {}", input.display()))?
    };
    serde_json::from_str(&raw).context("Failed to parse multiproof JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::config;
    use crate::VerifyAction;
    use merkle_standard::{keccak256, EncodingKind};
    use std::io::Write;

    #[test]
    fn test_single_against_configured_tree() {
        let cfg = config("abcde", EncodingKind::Raw);
        let tree = cfg.build_tree().unwrap();
        let proof = tree.prove(4).unwrap().into_siblings();

        let action = VerifyAction::Single { root: None, leaf: tree.leaf(4).unwrap(), proof: proof.clone() };
        assert!(handle(action, &cfg).unwrap().contains("Proof valid"));

        let action = VerifyAction::Single { root: None, leaf: keccak256(b"z"), proof };
        assert!(handle(action, &cfg).is_err());
    }

    #[test]
    fn test_multi_from_file() {
        let cfg = config("abcdefgh", EncodingKind::Standard);
        let tree = cfg.build_heap_tree().unwrap();
        let multi = tree.prove_many(&[1, 6, 7]).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&multi).unwrap()).unwrap();

        let action = VerifyAction::Multi { root: Some(tree.root()), input: file.path().to_path_buf() };
        assert!(handle(action, &cfg).unwrap().contains("3 leaves"));

        let action = VerifyAction::Multi { root: Some(keccak256(b"other")), input: file.path().to_path_buf() };
        assert!(handle(action, &cfg).unwrap_err().to_string().contains("does not reproduce"));
    }

    #[test]
    fn test_multi_malformed_reports_cause() {
        let cfg = config("abcd", EncodingKind::Raw);
        let tree = cfg.build_heap_tree().unwrap();
        let mut multi = tree.prove_many(&[0, 2]).unwrap();
        multi.proof_flags.push(true);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&multi).unwrap()).unwrap();

        let action = VerifyAction::Multi { root: None, input: file.path().to_path_buf() };
        let err = handle(action, &cfg).unwrap_err();
        assert_eq!(err.to_string(), "Malformed multiproof");
        assert!(format!("{:#}", err).contains("flag count mismatch"));
    }

    #[test]
    fn test_multi_default_root_is_heap_tree() {
        // Layered and heap roots differ for five leaves.
        let cfg = config("abcde", EncodingKind::Raw);
        let tree = cfg.build_heap_tree().unwrap();
        let multi = tree.prove_many(&[0, 3, 4]).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&multi).unwrap()).unwrap();

        let action = VerifyAction::Multi { root: None, input: file.path().to_path_buf() };
        assert!(handle(action, &cfg).is_ok());
    }

    #[test]
    fn test_wrong_root_is_not_reported_as_malformed() {
        let cfg = config("abcd", EncodingKind::Raw);
        let multi = cfg.build_heap_tree().unwrap().prove_many(&[1, 2]).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&multi).unwrap()).unwrap();

        let action = VerifyAction::Multi { root: Some(keccak256(b"other")), input: file.path().to_path_buf() };
        let err = handle(action, &cfg).unwrap_err();
        assert!(!format!("{:#}", err).contains("Malformed"));
    }
}
