//! Tests for `modprops properties`.

use modprops::test_utils::{ConfigFixture, PropertiesFixture};
use predicates::prelude::*;
use tempfile::TempDir;

use super::modprops;

fn neoforge_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    ConfigFixture::neoforge().write_to(temp.path()).unwrap();
    PropertiesFixture::basic().write_to(temp.path()).unwrap();
    temp
}

#[test]
fn test_json_tree_uses_gradle_defaults() {
    let temp = neoforge_project();
    let output = modprops().current_dir(temp.path()).arg("properties").assert().success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["minecraft"]["version"], "1.21");
    assert_eq!(json["minecraft"]["range"]["neoforge"], "[1.21],[1.21.1]");
    assert_eq!(json["loader"]["version"], "21.0.167");
    assert_eq!(json["java"]["range"]["neoforge"], "[21,)");
    assert_eq!(json["project"]["package"], "com.example.neoforge");
    assert_eq!(json["project"]["root"]["mod"]["id"], "demo");
    assert_eq!(json["project"]["root"]["mod_author"], "Example Team");
    assert_eq!(json["dependencies"]["mezz"]["jei"]["jei"]["maven"], "[19.0,20.0)");
}

#[test]
fn test_get_single_value() {
    let temp = neoforge_project();
    modprops()
        .current_dir(temp.path())
        .args(["properties", "--get", "minecraft.range.fabric"])
        .assert()
        .success()
        .stdout("\"=1.21\", \"=1.21.1\"\n");
}

#[test]
fn test_flat_format_with_explicit_config() {
    let temp = TempDir::new().unwrap();
    let config = ConfigFixture::fabric().write_to(temp.path()).unwrap();

    modprops()
        .args(["properties", "--format", "flat", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("dependencies.fabric.loader.npm=>=0.16.0").not())
        .stdout(predicate::str::contains("dependencies.fabric.loader.npm==0.16.0"))
        .stdout(predicate::str::contains("java.range.fabric==21"))
        .stdout(predicate::str::contains("loader.version=0.16.0"));
}

#[test]
fn test_unknown_path_suggests_close_match() {
    let temp = neoforge_project();
    modprops()
        .current_dir(temp.path())
        .args(["properties", "--get", "minecraft.versoin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did you mean 'minecraft.version'"));
}

#[test]
fn test_missing_config() {
    let temp = TempDir::new().unwrap();
    modprops()
        .current_dir(temp.path())
        .arg("properties")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"))
        .stderr(predicate::str::contains("modprops.toml"));
}

#[test]
fn test_invalid_config_syntax() {
    let temp = TempDir::new().unwrap();
    ConfigFixture::invalid_syntax().write_to(temp.path()).unwrap();
    modprops()
        .current_dir(temp.path())
        .arg("properties")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Check the TOML syntax"));
}

#[test]
fn test_dependency_without_version() {
    let temp = TempDir::new().unwrap();
    ConfigFixture::missing_version().write_to(temp.path()).unwrap();
    modprops()
        .current_dir(temp.path())
        .arg("properties")
        .assert()
        .failure()
        .stderr(predicate::str::contains("mezz.jei:jei"));
}
