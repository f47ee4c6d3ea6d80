use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::ScanConfig;
use crate::filters::{check_index, Filter, Verdict};
use crate::sequence::Sequence;

/// Terminal state of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanOutcome {
    Found { index: usize, value: u64 },
    Exhausted { scanned: usize },
}

impl ScanOutcome {
    pub fn index(&self) -> Option<usize> {
        match self {
            ScanOutcome::Found { index, .. } => Some(*index),
            ScanOutcome::Exhausted { .. } => None,
        }
    }

    /// The line the binary prints for this outcome; nothing when exhausted.
    pub fn result_line(&self) -> Option<String> {
        self.index().map(|n| format!("Valid n: {}", n))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResults {
    pub scanned: usize,
    pub rejected: BTreeMap<Filter, usize>,
    pub accepted: Vec<usize>,
}

impl SurveyResults {
    pub fn new() -> Self {
        SurveyResults {
            scanned: 0,
            rejected: Filter::CHAIN.iter().map(|&f| (f, 0)).collect(),
            accepted: Vec::new(),
        }
    }

    fn record(&mut self, n: usize, verdict: Verdict) {
        self.scanned += 1;
        match verdict {
            Verdict::Accepted => self.accepted.push(n),
            Verdict::Rejected(filter) => *self.rejected.entry(filter).or_insert(0) += 1,
        }
    }

    pub fn rejected_by(&self, filter: Filter) -> usize {
        self.rejected.get(&filter).copied().unwrap_or(0)
    }
}

impl Default for SurveyResults {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan the scan range in increasing order and stop at the first index that
/// passes every filter.
pub fn find_first(seq: &Sequence, config: &ScanConfig) -> ScanOutcome {
    let mut scanned = 0;

    for n in config.scan_start..=config.length {
        scanned += 1;
        if let Some(Verdict::Accepted) = check_index(seq, config, n) {
            let value = seq.get(n).unwrap_or_default();
            info!(index = n, value, scanned, "qualifying index found");
            return ScanOutcome::Found { index: n, value };
        }
    }

    info!(scanned, "scan exhausted without a qualifying index");
    ScanOutcome::Exhausted { scanned }
}

/// Validate `config`, build the sequence and run the scan.
///
/// # Examples
///
/// ```
/// use recurrence_finder::{run, ScanConfig, ScanOutcome};
///
/// let outcome = run(&ScanConfig::default()).unwrap();
/// assert_eq!(outcome, ScanOutcome::Exhausted { scanned: 949 });
/// ```
pub fn run(config: &ScanConfig) -> anyhow::Result<ScanOutcome> {
    config.validate()?;
    let seq = Sequence::build(config);
    Ok(find_first(&seq, config))
}

/// Check every index of the scan range without stopping early.
///
/// With `parallel` set the per-index checks are spread over the rayon pool;
/// the sequence itself is always built serially and the accepted indices are
/// reported in increasing order either way.
pub fn survey(config: &ScanConfig, parallel: bool) -> anyhow::Result<SurveyResults> {
    config.validate()?;
    let seq = Sequence::build(config);
    Ok(survey_sequence(&seq, config, parallel))
}

pub(crate) fn survey_sequence(seq: &Sequence, config: &ScanConfig, parallel: bool) -> SurveyResults {
    let results = if parallel {
        survey_parallel(seq, config)
    } else {
        survey_sequential(seq, config)
    };

    debug!(
        scanned = results.scanned,
        accepted = results.accepted.len(),
        parallel,
        "survey complete"
    );
    results
}

fn survey_sequential(seq: &Sequence, config: &ScanConfig) -> SurveyResults {
    let mut results = SurveyResults::new();
    for n in config.scan_start..=config.length {
        if let Some(verdict) = check_index(seq, config, n) {
            results.record(n, verdict);
        }
    }
    results
}

fn survey_parallel(seq: &Sequence, config: &ScanConfig) -> SurveyResults {
    let verdicts: Vec<(usize, Verdict)> = (config.scan_start..=config.length)
        .into_par_iter()
        .filter_map(|n| check_index(seq, config, n).map(|v| (n, v)))
        .collect();

    let mut results = SurveyResults::new();
    for (n, verdict) in verdicts {
        results.record(n, verdict);
    }
    results
}
