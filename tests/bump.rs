//! End-to-end tests for the version bump run.

use std::fs;

use pretty_assertions::assert_eq;
use tokio_test::assert_ok;

use item_api::bump::{self, BumpLevel, BumpRequest};
use item_api::error::BumpError;

fn request(dir: &tempfile::TempDir, message: &str) -> BumpRequest {
    BumpRequest {
        manifest: dir.path().join("package.json"),
        message: message.to_string(),
        repo: dir.path().to_path_buf(),
        dry_run: false,
    }
}

#[test]
fn feat_message_bumps_minor_and_rewrites_manifest() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name":"svc","version":"1.2.3","private":true}"#,
    )
    .unwrap();

    let report = assert_ok!(bump::run(&request(&dir, "feat(api): add items")));

    assert_eq!(report.level, BumpLevel::Minor);
    assert_eq!(report.previous, "1.2.3");
    assert_eq!(report.next, "1.3.0");
    assert!(report.written);
    assert_eq!(
        report.output_lines(),
        ["NEW_VERSION=1.3.0".to_string(), "1.3.0".to_string()]
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("package.json")).unwrap(),
        "{\n  \"name\": \"svc\",\n  \"version\": \"1.3.0\",\n  \"private\": true\n}\n"
    );
}

#[test]
fn breaking_change_bumps_major() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("package.json"), r#"{"version":"0.9.4"}"#).unwrap();

    let report = assert_ok!(bump::run(&request(&dir, "BREAKING CHANGE: drop support")));
    assert_eq!(report.next, "1.0.0");
}

#[test]
fn missing_version_starts_from_zero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("package.json"), r#"{"name":"svc"}"#).unwrap();

    let report = assert_ok!(bump::run(&request(&dir, "fix: bug")));
    assert_eq!(report.previous, "0.0.0");
    assert_eq!(report.next, "0.0.1");

    let rewritten = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(rewritten.contains("\"version\": \"0.0.1\""));
}

#[test]
fn empty_message_outside_repository_is_a_patch() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("package.json"), r#"{"version":"2.0"}"#).unwrap();

    let report = assert_ok!(bump::run(&request(&dir, "")));
    assert_eq!(report.message, "");
    assert_eq!(report.level, BumpLevel::Patch);
    assert_eq!(report.next, "2.0.1");
}

#[test]
fn dry_run_leaves_manifest_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let original = r#"{"version":"1.0.0"}"#;
    fs::write(dir.path().join("package.json"), original).unwrap();

    let mut req = request(&dir, "feat: x");
    req.dry_run = true;
    let report = assert_ok!(bump::run(&req));

    assert_eq!(report.next, "1.1.0");
    assert!(!report.written);
    assert_eq!(
        fs::read_to_string(dir.path().join("package.json")).unwrap(),
        original
    );
}

#[test]
fn unreadable_manifest_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = bump::run(&request(&dir, "fix: x")).unwrap_err();
    assert!(matches!(err, BumpError::ManifestIo { .. }));

    fs::write(dir.path().join("package.json"), "not json").unwrap();
    let err = bump::run(&request(&dir, "fix: x")).unwrap_err();
    assert!(matches!(err, BumpError::ManifestParse { .. }));
}

#[test]
fn overflowing_bump_leaves_manifest_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let original = r#"{"version":"18446744073709551615.0.0"}"#;
    fs::write(dir.path().join("package.json"), original).unwrap();

    let err = bump::run(&request(&dir, "BREAKING CHANGE: again")).unwrap_err();
    assert!(matches!(err, BumpError::VersionOverflow { .. }));
    assert_eq!(
        fs::read_to_string(dir.path().join("package.json")).unwrap(),
        original
    );
}

#[test]
fn numeric_version_field_is_bumped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("package.json"), r#"{"version":2}"#).unwrap();

    let report = assert_ok!(bump::run(&request(&dir, "fix: y")));
    assert_eq!(report.previous, "2");
    assert_eq!(report.next, "2.0.1");
}
