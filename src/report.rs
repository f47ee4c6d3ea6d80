use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::config::ScanConfig;
use crate::scan::{find_first, survey_sequence, ScanOutcome, SurveyResults};
use crate::sequence::Sequence;

/// Everything a run produced, with the parameters that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub config: ScanConfig,
    pub outcome: ScanOutcome,
    pub survey: SurveyResults,
    pub elapsed_secs: f64,
    pub timestamp: String,
}

impl ScanReport {
    /// Run the driver and a full survey for `config`.
    pub fn generate(config: &ScanConfig, parallel: bool) -> anyhow::Result<Self> {
        let start_time = Instant::now();
        config.validate()?;

        let seq = Sequence::build(config);
        let outcome = find_first(&seq, config);
        let survey = survey_sequence(&seq, config, parallel);

        Ok(ScanReport {
            config: config.clone(),
            outcome,
            survey,
            elapsed_secs: start_time.elapsed().as_secs_f64(),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        crate::io_utils::save_to_file(self, path)
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        crate::io_utils::load_from_file(path)
    }
}

/// Recompute a saved report from its recorded config and compare the results.
///
/// Timing fields are ignored.
pub fn verify_report(report: &ScanReport) -> anyhow::Result<()> {
    let fresh = ScanReport::generate(&report.config, false)
        .context("recorded config is not valid")?;

    if fresh.outcome != report.outcome {
        bail!(
            "outcome mismatch: recorded {:?}, recomputed {:?}",
            report.outcome,
            fresh.outcome
        );
    }
    if fresh.survey != report.survey {
        bail!(
            "survey mismatch: recorded {} accepted out of {}, recomputed {} out of {}",
            report.survey.accepted.len(),
            report.survey.scanned,
            fresh.survey.accepted.len(),
            fresh.survey.scanned
        );
    }

    info!(timestamp = %report.timestamp, "report verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Filter;

    #[test]
    fn test_generate_default() {
        let report = ScanReport::generate(&ScanConfig::default(), false).unwrap();
        assert_eq!(report.outcome, ScanOutcome::Exhausted { scanned: 949 });
        assert_eq!(report.survey.scanned, 949);
        assert_eq!(report.timestamp.len(), "2026-01-01 00:00:00".len());
    }

    #[test]
    fn test_first_accepted_matches_outcome() {
        let config = ScanConfig {
            congruence_modulus: 3,
            ..ScanConfig::default()
        };
        let report = ScanReport::generate(&config, true).unwrap();
        assert_eq!(report.outcome.index(), report.survey.accepted.first().copied());
    }

    #[test]
    fn test_verify_accepts_fresh_report() {
        let report = ScanReport::generate(&ScanConfig::default(), true).unwrap();
        assert!(verify_report(&report).is_ok());
    }

    #[test]
    fn test_verify_detects_tampered_outcome() {
        let mut report = ScanReport::generate(&ScanConfig::default(), false).unwrap();
        report.outcome = ScanOutcome::Found { index: 55, value: 101 };
        let err = verify_report(&report).unwrap_err();
        assert!(err.to_string().contains("outcome mismatch"));
    }

    #[test]
    fn test_verify_detects_tampered_survey() {
        let mut report = ScanReport::generate(&ScanConfig::default(), false).unwrap();
        report.survey.rejected.insert(Filter::Congruence, 80);
        let err = verify_report(&report).unwrap_err();
        assert!(err.to_string().contains("survey mismatch"));
    }
}
