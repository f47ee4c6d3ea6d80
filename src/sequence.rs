use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ScanConfig;
use crate::number_theory::digital_root;

/// The recurrence `a[1] = seed`, `a[n] = (a[n-1]^2 + digital_root(n)) mod modulus`.
///
/// Terms are addressed from 1. The sequence is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    terms: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub index: usize,
    pub value: u64,
}

impl Sequence {
    /// Build every term in increasing index order.
    ///
    /// `config` is expected to have passed [`ScanConfig::validate`]; a zero
    /// modulus panics.
    pub fn build(config: &ScanConfig) -> Self {
        let mut terms = Vec::with_capacity(config.length);
        if config.length == 0 {
            return Sequence { terms };
        }

        let mut current = config.seed % config.modulus;
        terms.push(current);
        for n in 2..=config.length {
            current = (current * current + digital_root(n as u64)) % config.modulus;
            terms.push(current);
        }

        debug!(
            length = terms.len(),
            last = ?terms.last(),
            "sequence built"
        );
        Sequence { terms }
    }

    /// Term at 1-based index `n`, or `None` outside 1..=len.
    pub fn get(&self, n: usize) -> Option<u64> {
        n.checked_sub(1).and_then(|i| self.terms.get(i)).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.terms
            .iter()
            .enumerate()
            .map(|(i, &value)| Term { index: i + 1, value })
    }
}
