pub mod config;
pub mod filters;
pub mod io_utils;
pub mod number_theory;
pub mod report;
pub mod scan;
pub mod sequence;

pub use config::ScanConfig;
pub use filters::{check_index, Filter, Verdict};
pub use number_theory::{count_divisors, digital_root, is_palindrome, is_prime};
pub use report::{verify_report, ScanReport};
pub use scan::{find_first, run, survey, ScanOutcome, SurveyResults};
pub use sequence::{Sequence, Term};
