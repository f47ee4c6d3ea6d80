use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ScanConfig;
use crate::number_theory::{count_divisors, is_palindrome, is_prime};
use crate::sequence::Sequence;

/// One link of the filter chain, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Filter {
    /// The index itself must be composite.
    Composite,
    /// `a[n]` must be a three-digit palindrome.
    Palindrome,
    /// `a[n]` and `a[n - lag]` must agree modulo the congruence modulus.
    Congruence,
    /// The divisor count of `a[n]` must be prime.
    PrimeDivisorCount,
}

impl Filter {
    pub const CHAIN: [Filter; 4] = [
        Filter::Composite,
        Filter::Palindrome,
        Filter::Congruence,
        Filter::PrimeDivisorCount,
    ];

    fn passes(self, seq: &Sequence, config: &ScanConfig, n: usize, value: u64) -> bool {
        match self {
            Filter::Composite => !is_prime(n as u64),
            Filter::Palindrome => is_palindrome(value),
            Filter::Congruence => n
                .checked_sub(config.lag)
                .and_then(|i| seq.get(i))
                .is_some_and(|lagged| {
                    value % config.congruence_modulus == lagged % config.congruence_modulus
                }),
            Filter::PrimeDivisorCount => is_prime(count_divisors(value)),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Filter::Composite => "index is prime",
            Filter::Palindrome => "value is not a 3-digit palindrome",
            Filter::Congruence => "value and lagged value are not congruent",
            Filter::PrimeDivisorCount => "divisor count is not prime",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    Rejected(Filter),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Run the chain for index `n`, stopping at the first filter that fails.
///
/// Returns `None` when `n` is outside `config.scan_start..=config.length`.
pub fn check_index(seq: &Sequence, config: &ScanConfig, n: usize) -> Option<Verdict> {
    if !(config.scan_start..=config.length).contains(&n) {
        return None;
    }
    let value = seq.get(n)?;

    let verdict = Filter::CHAIN
        .into_iter()
        .find(|filter| !filter.passes(seq, config, n, value))
        .map_or(Verdict::Accepted, Verdict::Rejected);
    Some(verdict)
}
