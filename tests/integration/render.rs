//! Tests for `modprops render`.

use modprops::test_utils::{ConfigFixture, PropertiesFixture, TemplateFixture};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use super::modprops;

#[test]
fn test_render_neoforge_resources() {
    let temp = TempDir::new().unwrap();
    ConfigFixture::neoforge().write_to(temp.path()).unwrap();
    PropertiesFixture::basic().write_to(temp.path()).unwrap();
    let input = temp.path().join("templates");
    TemplateFixture::neoforge_mods_toml().write_to(&input).unwrap();
    TemplateFixture::simple("assets/demo/lang/en_us.json", "{\"k\": \"{{ raw }}\"}")
        .write_to(&input)
        .unwrap();

    modprops()
        .current_dir(temp.path())
        .args(["render", "--input", "templates", "--output", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 rendered, 1 copied"));

    let mods_toml = fs::read_to_string(temp.path().join("out/META-INF/neoforge.mods.toml")).unwrap();
    assert!(mods_toml.contains("modId = \"demo\""), "{mods_toml}");
    assert!(mods_toml.contains("displayName = \"Demo Mod\""), "{mods_toml}");
    assert!(mods_toml.contains("versionRange = \"[1.21],[1.21.1]\""), "{mods_toml}");
    assert!(mods_toml.contains("versionRange = \"[19.0,20.0)\""), "{mods_toml}");
    assert_eq!(
        fs::read_to_string(temp.path().join("out/assets/demo/lang/en_us.json")).unwrap(),
        "{\"k\": \"{{ raw }}\"}"
    );
}

#[test]
fn test_render_fabric_mod_json() {
    let temp = TempDir::new().unwrap();
    ConfigFixture::fabric().write_to(temp.path()).unwrap();
    let input = temp.path().join("templates");
    TemplateFixture::fabric_mod_json().write_to(&input).unwrap();

    modprops()
        .current_dir(temp.path())
        .args(["render", "-i", "templates", "-o", "out"])
        .assert()
        .success();

    let rendered = fs::read_to_string(temp.path().join("out/fabric.mod.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(json["depends"]["fabricloader"], "=0.16.0");
    assert_eq!(json["depends"]["minecraft"], serde_json::json!(["=1.21", "=1.21.1"]));
    assert_eq!(json["depends"]["java"], "=21");
}

#[test]
fn test_extra_exclude_copies_file() {
    let temp = TempDir::new().unwrap();
    ConfigFixture::common().write_to(temp.path()).unwrap();
    let input = temp.path().join("templates");
    TemplateFixture::simple("data/house.nbt", "{{ not a template").write_to(&input).unwrap();

    modprops()
        .current_dir(temp.path())
        .args(["render", "-i", "templates", "-o", "out", "--exclude", "**/*.nbt"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/data/house.nbt")).unwrap(),
        "{{ not a template"
    );
}

#[test]
fn test_unknown_variable_fails() {
    let temp = TempDir::new().unwrap();
    ConfigFixture::common().write_to(temp.path()).unwrap();
    let input = temp.path().join("templates");
    TemplateFixture::simple("pack.mcmeta", "{{ minecraft.versoin }}").write_to(&input).unwrap();

    modprops()
        .current_dir(temp.path())
        .args(["render", "-i", "templates", "-o", "out"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("pack.mcmeta"))
        .stderr(predicate::str::contains("did you mean 'minecraft.version'"));
}
