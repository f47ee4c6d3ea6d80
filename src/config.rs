use anyhow::ensure;
use serde::{Deserialize, Serialize};

/// Parameters of the recurrence and of the filter chain.
///
/// `ScanConfig::default()` is the puzzle as it is solved by the binary. Other
/// bundles are only built in code (tests, benches); nothing reads them from
/// files, flags or the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Value at index 1.
    pub seed: u64,
    /// Every term is reduced modulo this value.
    pub modulus: u64,
    /// Last index of the sequence (indices run 1..=length).
    pub length: usize,
    /// First index examined by the scan.
    pub scan_start: usize,
    /// Distance back to the term compared by the congruence filter.
    pub lag: usize,
    pub congruence_modulus: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            seed: 3,
            modulus: 1000,
            length: 999,
            scan_start: 51,
            lag: 17,
            congruence_modulus: 19,
        }
    }
}

impl ScanConfig {
    /// Reject bundles that would index outside the sequence or overflow the
    /// recurrence.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.modulus > 0, "modulus must be positive");
        ensure!(
            self.modulus <= u64::from(u32::MAX),
            "modulus {} is too large: squared terms would overflow",
            self.modulus
        );
        ensure!(self.congruence_modulus > 0, "congruence modulus must be positive");
        ensure!(self.length >= 1, "sequence needs at least one term");
        ensure!(
            self.scan_start > self.lag,
            "scan start {} must exceed lag {} so a[n - lag] exists",
            self.scan_start,
            self.lag
        );
        ensure!(
            self.scan_start <= self.length,
            "scan start {} is past the end of the sequence ({})",
            self.scan_start,
            self.length
        );
        Ok(())
    }

    /// Number of indices the scan visits.
    pub fn scan_len(&self) -> usize {
        (self.scan_start..=self.length).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scan_len(), 949);
    }

    #[test]
    fn test_lag_must_precede_scan_start() {
        let config = ScanConfig {
            scan_start: 17,
            ..ScanConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("lag"));
    }

    #[test]
    fn test_rejects_zero_moduli() {
        let config = ScanConfig {
            modulus: 0,
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ScanConfig {
            congruence_modulus: 0,
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_overflowing_modulus() {
        let config = ScanConfig {
            modulus: u64::from(u32::MAX) + 1,
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_scan_past_end() {
        let config = ScanConfig {
            length: 40,
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
