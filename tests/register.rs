mod common;

use common::TestContext;
use predicates::prelude::*;
use std::fs;

#[test]
fn register_adds_vcs_repository_and_require_entry() {
    let ctx = TestContext::new();
    fs::write(ctx.project_dir().join("composer.json"), "{\n  \"name\": \"acme/project\"\n}\n")
        .unwrap();

    ctx.cli()
        .args([
            "register",
            "--vendor",
            "acme",
            "--repository",
            "demo-bundle",
            "--kind",
            "vcs",
            "--require",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered acme/demo-bundle"));

    let root: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ctx.project_dir().join("composer.json")).unwrap())
            .unwrap();
    assert_eq!(root["repositories"][0]["type"], "vcs");
    assert_eq!(root["repositories"][0]["url"], "https://github.com/acme/demo-bundle");
    assert_eq!(root["require"]["acme/demo-bundle"], "dev-main");

    let backups = ctx.find_matching(ctx.project_dir(), "composer.json.", ".bak");
    assert_eq!(backups.len(), 1);
}

#[test]
fn register_defaults_to_a_path_repository() {
    let ctx = TestContext::new();
    fs::write(ctx.project_dir().join("composer.json"), "{}\n").unwrap();

    ctx.cli()
        .args(["register", "--vendor", "acme", "--repository", "demo-bundle"])
        .assert()
        .success();

    let root: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ctx.project_dir().join("composer.json")).unwrap())
            .unwrap();
    assert_eq!(root["repositories"][0]["type"], "path");
    assert_eq!(root["repositories"][0]["url"], "acme/demo-bundle");
}

#[test]
fn register_without_root_manifest_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["register", "--vendor", "acme", "--repository", "demo-bundle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No composer.json found"));
}

#[test]
fn register_rejects_invalid_package_names() {
    let ctx = TestContext::new();
    fs::write(ctx.project_dir().join("composer.json"), "{}\n").unwrap();

    ctx.cli()
        .args(["register", "--vendor", "ac me", "--repository", "demo-bundle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid vendor name"));
}
