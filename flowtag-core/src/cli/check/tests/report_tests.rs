use crate::cli::check::{Origin, ValidationReport};
use pretty_assertions::assert_eq;
use std::path::Path;

fn origin(line: u64) -> Origin {
    Origin::new(Path::new("flow.log"), line)
}

#[test]
fn plain_output_lists_file_line_and_severity() {
    // Arrange
    let mut report = ValidationReport::new(10);
    report.error("expected 14 fields, found 3".to_string(), origin(4), None);
    report.warning(
        "protocol number 200 does not resolve to a name".to_string(),
        origin(2),
        Some("hint".to_string()),
    );

    // Act
    let out = report.render_plain();

    // Assert
    assert_eq!(
        out,
        "flow.log:4: error: expected 14 fields, found 3\n\
         flow.log:2: warning: protocol number 200 does not resolve to a name\n  help: hint\n"
    );
}

#[test]
fn issues_beyond_the_cap_are_only_counted() {
    let mut report = ValidationReport::new(2);

    for line in 1..=5 {
        report.error("bad".to_string(), origin(line), None);
    }

    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.suppressed, 3);
    assert!(report.render_plain().ends_with("... 3 more issues not shown\n"));
}

#[test]
fn suppressed_issues_still_fail_the_check() {
    let mut report = ValidationReport::new(0);

    report.error("bad".to_string(), origin(1), None);

    assert!(report.errors.is_empty());
    assert!(report.has_errors());
}

#[test]
fn warnings_alone_are_not_errors() {
    let mut report = ValidationReport::new(10);

    report.warning("odd".to_string(), origin(1), None);

    assert!(report.has_violations());
    assert!(!report.has_errors());
}

#[test]
fn pretty_output_groups_by_file_in_line_order() {
    let mut report = ValidationReport::new(10);
    report.error("second".to_string(), origin(9), None);
    report.error("first".to_string(), origin(3), None);

    let out = report.render_pretty();

    assert!(out.starts_with("input validation found 2 errors, 0 warnings\n"));
    let first = out.find("line 3").unwrap();
    let second = out.find("line 9").unwrap();
    assert!(first < second);
}

#[test]
fn serialized_report_uses_lowercase_severity() {
    let mut report = ValidationReport::new(10);
    report.error("bad".to_string(), origin(1), None);

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["errors"][0]["severity"], "error");
    assert_eq!(json["errors"][0]["origin"]["line"], 1);
    assert_eq!(json["suppressed"], 0);
}
