use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak::hashv;

use crate::error::DistributorError;

/// One (index, recipient, amount) allocation committed by a merkle root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationEntry {
    pub index: u64,
    pub recipient: Pubkey,
    pub amount: u64,
}

/// Leaf digest: keccak256(index_be || recipient || amount_be)
pub fn leaf_hash(index: u64, recipient: &Pubkey, amount: u64) -> [u8; 32] {
    hashv(&[
        &index.to_be_bytes(),
        recipient.as_ref(),
        &amount.to_be_bytes(),
    ])
    .to_bytes()
}

/// Parent digest of two nodes, hashed in lexicographic order so that a proof
/// does not need to carry left/right positions.
pub fn combined_hash(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    if a <= b {
        hashv(&[a, b]).to_bytes()
    } else {
        hashv(&[b, a]).to_bytes()
    }
}

/// Checks that (index, recipient, amount) is committed by `root`.
///
/// Returns false on any mismatch; callers decide which error to raise.
pub fn verify_proof(
    index: u64,
    recipient: &Pubkey,
    amount: u64,
    proof: &[[u8; 32]],
    root: &[u8; 32],
) -> bool {
    let computed = proof
        .iter()
        .fold(leaf_hash(index, recipient, amount), |node, sibling| {
            combined_hash(&node, sibling)
        });

    computed == *root
}

/**
 * Merkle tree over allocation entries
 *
 * Built off-chain by whoever publishes a distribution; the program itself only
 * runs `verify_proof`. Layer 0 holds the sorted, deduplicated leaf digests.
 * Adjacent nodes are paired into `combined_hash(a, b)`; an unpaired trailing
 * node moves up to the next layer unchanged. The single node of the last
 * layer is the root.
 */
#[derive(Debug, Clone)]
pub struct MerkleTree {
    layers: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    pub fn new(entries: &[AllocationEntry]) -> Self {
        Self::from_leaves(
            entries
                .iter()
                .map(|entry| leaf_hash(entry.index, &entry.recipient, entry.amount))
                .collect(),
        )
    }

    pub fn from_leaves(mut leaves: Vec<[u8; 32]>) -> Self {
        leaves.sort_unstable();
        leaves.dedup();

        let mut layers = vec![leaves];
        loop {
            let current = &layers[layers.len() - 1];
            if current.len() <= 1 {
                break;
            }

            let next: Vec<[u8; 32]> = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => combined_hash(left, right),
                    [single] => *single,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            layers.push(next);
        }

        Self { layers }
    }

    /// Root digest, `None` for a tree without leaves
    pub fn root(&self) -> Option<[u8; 32]> {
        self.layers.last().and_then(|layer| layer.first().copied())
    }

    /// Number of distinct leaves
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Sibling path from `leaf` up to the root
    pub fn get_proof(&self, leaf: &[u8; 32]) -> Result<Vec<[u8; 32]>> {
        let mut position = self.layers[0]
            .binary_search(leaf)
            .map_err(|_| error!(DistributorError::LeafNotFound))?;

        let mut proof = Vec::with_capacity(self.layers.len());
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = position ^ 1;
            // unpaired nodes have no sibling at this level
            if sibling < layer.len() {
                proof.push(layer[sibling]);
            }
            position /= 2;
        }

        Ok(proof)
    }

    pub fn get_entry_proof(&self, entry: &AllocationEntry) -> Result<Vec<[u8; 32]>> {
        self.get_proof(&leaf_hash(entry.index, &entry.recipient, entry.amount))
    }
}
