use recurrence_finder::{verify_report, ScanConfig, ScanOutcome, ScanReport};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("recurrence_finder_{}_{}.json", name, std::process::id()))
}

#[test]
fn test_saved_report_verifies() {
    let path = temp_path("golden");
    let report = ScanReport::generate(&ScanConfig::default(), false).unwrap();
    report.save(&path).unwrap();

    let loaded = ScanReport::load(&path).unwrap();
    assert_eq!(loaded.config, ScanConfig::default());
    assert_eq!(loaded.outcome, ScanOutcome::Exhausted { scanned: 949 });
    assert!(verify_report(&loaded).is_ok());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_edited_report_fails_verification() {
    let path = temp_path("edited");
    let config = ScanConfig {
        congruence_modulus: 3,
        ..ScanConfig::default()
    };
    let report = ScanReport::generate(&config, true).unwrap();
    report.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let edited = text.replacen("\"congruence_modulus\": 3", "\"congruence_modulus\": 19", 1);
    assert_ne!(text, edited);
    std::fs::write(&path, edited).unwrap();

    let loaded = ScanReport::load(&path).unwrap();
    assert!(verify_report(&loaded).is_err());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_load_missing_report() {
    let err = ScanReport::load(&temp_path("absent")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
