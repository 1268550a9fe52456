//! End-to-end integration tests
//!
//! These tests validate the complete report pipeline using predefined
//! fixtures. Each test:
//! 1. Reads the ledger CSV (and contact export, when present) from a fixture
//!    directory
//! 2. Runs the pipeline entry point with the fixture's filter criteria
//! 3. Compares the rendered report with expected.csv byte for byte
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Merged contact and ledger data
//! - Ledger-only runs without a contact export
//! - Region and country criteria resolved through the reference tables
//! - The since cutoff
//! - The returning-supporters report

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use chrono::NaiveDate;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    use supporter_report::pipeline::{run_report, run_returning, LedgerSource};
    use supporter_report::types::ReportError;

    /// Returns the path of one file inside a fixture directory.
    fn fixture_path(fixture_name: &str, file: &str) -> PathBuf {
        Path::new("tests/fixtures").join(fixture_name).join(file)
    }

    /// Run a report fixture and compare the output with expected.csv
    ///
    /// This helper function:
    /// 1. Builds the ledger source from tests/fixtures/{fixture_name}/ledger.csv
    /// 2. Passes contacts.txt from the same directory when it exists, exactly
    ///    as when `--contacts` is given on the command line
    /// 3. Runs the report with the given criteria
    /// 4. Compares the rendered CSV with expected.csv
    ///
    /// # Arguments
    ///
    /// * `fixture_name` - Name of the fixture directory (e.g., "happy_path")
    /// * `criteria` - Filter criteria in `key=value` form
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - The ledger or expected files are missing
    /// - The pipeline returns an error
    /// - Output doesn't match expected.csv
    fn run_report_fixture(fixture_name: &str, criteria: &[&str]) {
        let ledger_path = fixture_path(fixture_name, "ledger.csv");
        let contacts_path = fixture_path(fixture_name, "contacts.txt");
        let expected_path = fixture_path(fixture_name, "expected.csv");

        // Verify fixture files exist
        assert!(
            ledger_path.exists(),
            "Ledger file not found: {}",
            ledger_path.display()
        );
        assert!(
            expected_path.exists(),
            "Expected file not found: {}",
            expected_path.display()
        );

        let ledger = LedgerSource::File(ledger_path);
        let contacts = contacts_path.exists().then_some(contacts_path.as_path());
        let criteria: Vec<String> = criteria.iter().map(|c| c.to_string()).collect();

        let mut output = Vec::new();
        run_report(contacts, &ledger, &criteria, &mut output)
            .unwrap_or_else(|e| panic!("Failed to build report: {}", e));

        let actual_output =
            String::from_utf8(output).expect("Report output should be valid UTF-8");
        let expected_output = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
            panic!("Failed to read expected file {}: {}", expected_path.display(), e)
        });

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (criteria: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, criteria, actual_output, expected_output
        );
    }

    /// End-to-end test for all supporter report fixtures
    #[rstest]
    #[case::contacts_and_ledger("happy_path", &[])]
    #[case::ledger_without_contacts("ledger_only", &[])]
    #[case::region_alias("region_filter", &["state=ky"])]
    #[case::country_code_and_name("country_filter", &["country=US"])]
    #[case::since_cutoff("since_filter", &["since=2024-03-01"])]
    fn test_report_fixtures(#[case] fixture: &str, #[case] criteria: &[&str]) {
        run_report_fixture(fixture, criteria);
    }

    #[test]
    fn test_since_cutoff_drops_supporters_with_only_older_payments() {
        // Same inputs as the plain happy_path run, but a cutoff after the
        // second supporter's single payment must drop their row.
        let ledger = LedgerSource::File(fixture_path("happy_path", "ledger.csv"));
        let contacts = fixture_path("happy_path", "contacts.txt");
        let criteria = vec!["since=2024-03-01".to_string()];

        let mut full = Vec::new();
        run_report(Some(contacts.as_path()), &ledger, &[], &mut full).unwrap();
        let mut filtered = Vec::new();
        run_report(Some(contacts.as_path()), &ledger, &criteria, &mut filtered).unwrap();

        let full = String::from_utf8(full).unwrap();
        let filtered = String::from_utf8(filtered).unwrap();
        assert!(full.contains("benner-otis"));
        assert!(filtered.contains("aldaine-marge"));
        assert!(!filtered.contains("benner-otis"));
    }

    #[test]
    fn test_ledger_command_output_matches_reading_the_same_file() {
        let from_file = LedgerSource::File(fixture_path("ledger_only", "ledger.csv"));
        let from_command =
            LedgerSource::Command("cat tests/fixtures/ledger_only/ledger.csv".to_string());

        let mut file_report = Vec::new();
        run_report(None, &from_file, &[], &mut file_report).unwrap();
        let mut command_report = Vec::new();
        run_report(None, &from_command, &[], &mut command_report).unwrap();

        assert_eq!(file_report, command_report);
    }

    #[test]
    fn test_unknown_criterion_fails_before_the_ledger_is_read() {
        // The ledger path does not exist, so a file error here would mean the
        // pipeline touched the ledger before validating the criteria.
        let ledger = LedgerSource::File(PathBuf::from("does/not/exist.csv"));
        let criteria = vec!["favorite_color=blue".to_string()];

        let mut output = Vec::new();
        let result = run_report(None, &ledger, &criteria, &mut output);

        match result {
            Err(ReportError::UnknownCriterion { key, .. }) => {
                assert_eq!(key, "favorite_color");
            }
            other => panic!("Expected UnknownCriterion, got {:?}", other),
        }
        assert!(output.is_empty());
    }

    #[test]
    fn test_missing_ledger_file_is_reported() {
        let ledger = LedgerSource::File(PathBuf::from("does/not/exist.csv"));

        let mut output = Vec::new();
        let result = run_report(None, &ledger, &[], &mut output);

        assert!(matches!(result, Err(ReportError::FileNotFound { .. })));
    }

    #[test]
    fn test_returning_fixture_matches_expected_output() {
        let ledger = LedgerSource::File(fixture_path("returning_basic", "ledger.csv"));
        let expected_path = fixture_path("returning_basic", "expected.csv");
        let start = NaiveDate::from_ymd_opt(2020, 1, 1);
        let end = NaiveDate::from_ymd_opt(2020, 4, 1);

        let mut output = Vec::new();
        run_returning(&ledger, start, end, &mut output).unwrap();

        let actual_output = String::from_utf8(output).unwrap();
        let expected_output = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
            panic!("Failed to read expected file {}: {}", expected_path.display(), e)
        });
        assert_eq!(actual_output, expected_output);
    }

    #[test]
    fn test_returning_rejects_an_end_month_before_the_start_month() {
        let ledger = LedgerSource::File(fixture_path("returning_basic", "ledger.csv"));
        let start = NaiveDate::from_ymd_opt(2020, 5, 1);
        let end = NaiveDate::from_ymd_opt(2020, 1, 1);

        let mut output = Vec::new();
        let result = run_returning(&ledger, start, end, &mut output);

        match result {
            Err(e @ ReportError::MonthRange { .. }) => {
                assert_eq!(
                    e.to_string(),
                    "End month 2020-01 is before start month 2020-05"
                );
            }
            other => panic!("Expected MonthRange, got {:?}", other),
        }
    }

    #[test]
    fn test_returning_needs_an_explicit_start_when_the_ledger_is_empty() {
        let empty = NamedTempFile::new().expect("Failed to create temp file");
        let ledger = LedgerSource::File(empty.path().to_path_buf());

        let mut output = Vec::new();
        let result = run_returning(&ledger, None, None, &mut output);

        assert!(matches!(result, Err(ReportError::EmptyLedger)));
    }
}
