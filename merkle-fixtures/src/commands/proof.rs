//! Proof command handlers

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::FixtureConfig;
use crate::output::{encode_bools, render_hashes, to_json, OutputFormat};
use crate::MultiPart;

pub fn handle(action: crate::ProofAction, config: &FixtureConfig, format: OutputFormat) -> Result<String> {
    match action {
        crate::ProofAction::Single { index, width } => {
            let tree = config.build_tree()?;
            let proof = tree.prove(index)?;
            debug!(index, layout = %tree.layout(), siblings = proof.len(), "Generated proof");
            Ok(render_hashes(proof.siblings(), format, width)?)
        }

        crate::ProofAction::NoSuchLeaf { width } => {
            let tree = config.build_tree()?;
            let leaf = super::no_such_leaf(tree.as_ref())?;
            // Printed whole; the node's own proof is this minus the first sibling.
            let proof = tree.prove(0)?;
            debug!(leaf = %leaf, siblings = proof.len(), "Generated proof for internal node");
            Ok(render_hashes(proof.siblings(), format, width)?)
        }

        crate::ProofAction::Multi { indices, part, width } => {
            let tree = config.build_heap_tree()?;
            let multi = tree
                .prove_many(&indices)
                .with_context(|| format!("Failed to build multiproof for indices {:?}", indices))?;

            let out = match (part, format) {
                (MultiPart::All, _) => to_json(&multi)?,
                (MultiPart::Proof, _) => render_hashes(&multi.proof, format, width)?,
                (MultiPart::Leaves, _) => render_hashes(&multi.leaves, format, width)?,
                (MultiPart::Flags, OutputFormat::Abi) => encode_bools(&multi.proof_flags, width)?,
                (MultiPart::Flags, OutputFormat::Json) => to_json(&multi.proof_flags)?,
            };
            Ok(out)
        }
    }
}
