//! Tests for `modprops range`.

use predicates::prelude::*;

use super::modprops;

#[test]
fn test_interval_is_default_dialect() {
    modprops().args(["range", "1.20.+"]).assert().success().stdout("[1.20,1.21)\n");
}

#[test]
fn test_comparator_dialect() {
    modprops()
        .args(["range", "[1.20,1.21]", "--dialect", "comparator"])
        .assert()
        .success()
        .stdout(">=1.20 <=1.21\n");

    modprops().args(["range", "+", "-d", "comparator"]).assert().success().stdout("*\n");
}

#[test]
fn test_exact_set_with_list_styles() {
    modprops()
        .args(["range", "1.21", "-a", "1.21.1", "-d", "comparator"])
        .assert()
        .success()
        .stdout("\"=1.21\", \"=1.21.1\"\n");

    modprops()
        .args(["range", "1.21", "-a", "1.21.1", "-d", "comparator", "--list-style", "space"])
        .assert()
        .success()
        .stdout("=1.21 =1.21.1\n");

    modprops().args(["range", "1.21", "-a", "1.21.1"]).assert().success().stdout("[1.21],[1.21.1]\n");
}

#[test]
fn test_disjoint_ranges_fail_with_suggestion() {
    modprops()
        .args(["range", "[1.0,2.0)[3.0,4.0)"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Multiple non-continuous version ranges"))
        .stderr(predicate::str::contains("one continuous interval"));
}

#[test]
fn test_inclusive_open_range_fails() {
    modprops()
        .args(["range", "[1.20,]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid version range '[1.20,]'"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    modprops().args(["-v", "-q", "range", "1.20"]).assert().failure();
}

#[test]
fn test_range_cannot_join_exact_set() {
    modprops()
        .args(["range", "[1,2)", "--additional", "1.3"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("only accepts plain versions"));
}
