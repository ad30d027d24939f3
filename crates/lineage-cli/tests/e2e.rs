//! E2E tests for the `lineage` binary against small GEDCOM fixtures.
//!
//! Covers: every subcommand in text and JSON modes, config-file defaults,
//! and structured error output for unreadable input and failed lookups.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

// A ─┬─ B ─┐
//    │     ├─ D ── E
//    └─ C ─┘
// B and C are half-siblings who married; S is D's brother, M is E's wife,
// X and Y are an unrelated likely-duplicate pair.
const TREE: &str = "\
0 HEAD
0 @A@ INDI
1 NAME Anders /Holm/
1 SEX M
1 BIRT
2 DATE 1800
0 @W1@ INDI
1 NAME Wilma /Dahl/
1 SEX F
0 @W2@ INDI
1 NAME Wenche /Lund/
1 SEX F
0 @B@ INDI
1 NAME Bent /Holm/
1 SEX M
1 BIRT
2 DATE 1825
0 @C@ INDI
1 NAME Cille /Holm/
1 SEX F
1 BIRT
2 DATE 1830
0 @D@ INDI
1 NAME Dorte /Holm/
1 SEX F
1 BIRT
2 DATE 1850
0 @S@ INDI
1 NAME Svend /Holm/
1 SEX M
1 BIRT
2 DATE 1852
0 @E@ INDI
1 NAME Erik /Holm/
1 SEX M
1 BIRT
2 DATE 1875
1 OCCU Smith
0 @M@ INDI
1 NAME Maren /Kjaer/
1 SEX F
1 BIRT
2 DATE 1877
0 @X@ INDI
1 NAME Lars /Jensen/
1 SEX M
1 BIRT
2 DATE 1900
0 @Y@ INDI
1 NAME Lars J /Jensen/
1 SEX M
1 BIRT
2 DATE 1902
0 @F1@ FAM
1 HUSB @A@
1 WIFE @W1@
1 CHIL @B@
0 @F2@ FAM
1 HUSB @A@
1 WIFE @W2@
1 CHIL @C@
0 @F3@ FAM
1 HUSB @B@
1 WIFE @C@
1 CHIL @D@
1 CHIL @S@
0 @F4@ FAM
1 HUSB @E@
1 WIFE @M@
0 @F5@ FAM
1 WIFE @D@
1 CHIL @E@
0 TRLR
";

fn lineage_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lineage"));
    cmd.current_dir(dir);
    cmd.env("LINEAGE_LOG", "error");
    cmd.env("XDG_CONFIG_HOME", dir.join("xdg"));
    cmd.env("HOME", dir);
    cmd.env_remove("FORMAT");
    cmd.env_remove("LINEAGE_FILE");
    cmd
}

fn write_tree(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("tree.ged");
    std::fs::write(&path, contents).expect("write fixture");
    path
}

fn json_stdout(dir: &Path, args: &[&str]) -> Value {
    let output = lineage_cmd(dir)
        .args(args)
        .args(["--format", "json"])
        .output()
        .expect("lineage should not crash");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

fn json_stderr_error(dir: &Path, args: &[&str]) -> Value {
    let output = lineage_cmd(dir)
        .args(args)
        .args(["--format", "json"])
        .output()
        .expect("lineage should not crash");
    assert!(!output.status.success(), "command unexpectedly succeeded");
    let json: Value = serde_json::from_slice(&output.stderr).expect("valid JSON on stderr");
    json["error"].clone()
}

// ---------------------------------------------------------------------------
// lineage path
// ---------------------------------------------------------------------------

#[test]
fn path_text_lists_each_branch_descendant_first() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);

    lineage_cmd(dir.path())
        .args(["-f", "tree.ged", "path", "-a", "Anders Holm", "-d", "@E@"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Erik Holm (1875) -> Dorte Holm (1850) -> Bent Holm (1825) -> Anders Holm (1800)",
        ))
        .stdout(predicate::str::contains(
            "Erik Holm (1875) -> Dorte Holm (1850) -> Cille Holm (1830) -> Anders Holm (1800)",
        ));
}

#[test]
fn path_json_has_ids_and_labels() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);

    let json = json_stdout(dir.path(), &["-f", "tree.ged", "path", "-a", "@A@", "-d", "@E@"]);
    assert_eq!(json["ancestor"], "@A@");
    assert_eq!(json["descendant"], "@E@");
    let branches = json["branches"].as_array().expect("branches array");
    assert_eq!(branches.len(), 2);
    assert_eq!(branches[0][0]["id"], "@E@");
    assert_eq!(branches[0][3]["label"], "Anders Holm (1800)");
}

#[test]
fn path_via_filters_by_name() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);

    let json = json_stdout(
        dir.path(),
        &["-f", "tree.ged", "path", "-a", "@A@", "-d", "@E@", "--via", "cille holm"],
    );
    assert_eq!(json["via"], serde_json::json!(["@C@"]));
    let branches = json["branches"].as_array().expect("branches array");
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0][2]["id"], "@C@");
}

#[test]
fn path_without_descent_prints_no_path() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);

    lineage_cmd(dir.path())
        .args(["-f", "tree.ged", "path", "-a", "@E@", "-d", "@A@"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no path"));
}

#[test]
fn path_dot_emits_digraph() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);

    lineage_cmd(dir.path())
        .args(["-f", "tree.ged", "path", "-a", "@A@", "-d", "@E@", "--dot"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph {"))
        .stdout(predicate::str::contains("Cille Holm (1830)"));
}

#[test]
fn descent_cycle_is_reported_with_code() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(
        dir.path(),
        "0 @A@ INDI\n0 @B@ INDI\n0 @C@ INDI\n0 @T@ INDI\n\
         0 @F1@ FAM\n1 HUSB @A@\n1 CHIL @B@\n\
         0 @F2@ FAM\n1 HUSB @B@\n1 CHIL @C@\n\
         0 @F3@ FAM\n1 HUSB @C@\n1 CHIL @B@\n",
    );

    let err = json_stderr_error(dir.path(), &["-f", "tree.ged", "path", "-a", "@A@", "-d", "@T@"]);
    assert_eq!(err["error_code"], "E4001");
}

// ---------------------------------------------------------------------------
// lineage unconnected
// ---------------------------------------------------------------------------

#[test]
fn unconnected_direct_excludes_only_the_direct_line() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);

    let json = json_stdout(
        dir.path(),
        &["-f", "tree.ged", "unconnected", "--root", "@D@", "--direct"],
    );
    let ids: Vec<&str> = json["unconnected"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|e| e["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["@S@", "@M@", "@X@", "@Y@"]);
    assert_eq!(json["total"], 11);
}

#[test]
fn unconnected_text_is_tab_separated() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);

    lineage_cmd(dir.path())
        .args(["-f", "tree.ged", "unconnected", "--root", "Dorte Holm"])
        .assert()
        .success()
        .stdout("@X@\tLars Jensen (1900)\n@Y@\tLars J Jensen (1902)\n");
}

// ---------------------------------------------------------------------------
// lineage dups
// ---------------------------------------------------------------------------

#[test]
fn dups_finds_the_near_identical_pair() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);

    let json = json_stdout(dir.path(), &["-f", "tree.ged", "dups"]);
    let candidates = json["candidates"].as_array().expect("array");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["id_a"], "@X@");
    assert_eq!(candidates[0]["id_b"], "@Y@");
    assert_eq!(candidates[0]["year_gap"], 2);
    assert_eq!(json["top"], 10);
}

#[test]
fn dups_year_gap_flag_tightens_the_gate() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);

    let json = json_stdout(dir.path(), &["-f", "tree.ged", "dups", "--max-year-gap", "2"]);
    assert!(json["candidates"].as_array().expect("array").is_empty());
}

// ---------------------------------------------------------------------------
// lineage show / stats
// ---------------------------------------------------------------------------

#[test]
fn show_resolves_closest_name() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);

    let json = json_stdout(dir.path(), &["-f", "tree.ged", "show", "Erik Holme"]);
    assert_eq!(json["id"], "@E@");
    assert_eq!(json["mother"]["id"], "@D@");
    assert!(json.get("father").is_none());
    assert_eq!(json["spouses"][0]["name"], "Maren Kjaer");
    assert_eq!(json["occupations"], serde_json::json!(["Smith"]));
}

#[test]
fn show_unknown_name_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);

    let err = json_stderr_error(dir.path(), &["-f", "tree.ged", "show", "Qzzzqq"]);
    assert_eq!(err["error_code"], "E2003");
    assert!(err["suggestion"].is_string());
}

#[test]
fn stats_counts_tree_and_reports_bad_lines() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), &format!("{TREE}1\n"));

    let json = json_stdout(dir.path(), &["-f", "tree.ged", "stats"]);
    assert_eq!(json["individuals"], 11);
    assert_eq!(json["families"], 5);
    assert_eq!(json["diagnostics"], 1);

    lineage_cmd(dir.path())
        .args(["-f", "tree.ged", "stats"])
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: line"));

    lineage_cmd(dir.path())
        .args(["-q", "-f", "tree.ged", "stats"])
        .assert()
        .success()
        .stderr(predicate::str::contains("warning").not());
}

#[test]
fn malformed_lines_are_reported_once_under_default_logging() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), &format!("{TREE}1\n"));

    let output = lineage_cmd(dir.path())
        .env_remove("LINEAGE_LOG")
        .env_remove("DEBUG")
        .args(["-f", "tree.ged", "stats"])
        .output()
        .expect("lineage should not crash");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("warning: line").count(), 1, "{stderr}");
    assert!(!stderr.contains("skipping line without a tag"), "{stderr}");

    lineage_cmd(dir.path())
        .env_remove("LINEAGE_LOG")
        .env_remove("DEBUG")
        .args(["-q", "-f", "tree.ged", "stats"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn file_can_come_from_env() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_tree(dir.path(), TREE);

    lineage_cmd(dir.path())
        .env("LINEAGE_FILE", &path)
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("individuals\t11"));
}

// ---------------------------------------------------------------------------
// Errors and configuration
// ---------------------------------------------------------------------------

#[test]
fn missing_file_flag_is_an_error() {
    let dir = TempDir::new().expect("tempdir");

    lineage_cmd(dir.path())
        .args(["stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--file"));
}

#[test]
fn unreadable_file_reports_input_code() {
    let dir = TempDir::new().expect("tempdir");

    let err = json_stderr_error(dir.path(), &["-f", "nope.ged", "stats"]);
    assert_eq!(err["error_code"], "E1001");
    assert!(err["message"].as_str().is_some_and(|m| m.contains("nope.ged")));
}

#[test]
fn integrity_error_reports_line() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), "0 @I1@ INDI\n1 BIRT\n1 BIRT\n");

    let err = json_stderr_error(dir.path(), &["-f", "tree.ged", "stats"]);
    assert_eq!(err["error_code"], "E3004");
    assert!(err["message"].as_str().is_some_and(|m| m.contains("line 3")));
}

#[test]
fn config_file_sets_template_and_output() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);
    std::fs::write(
        dir.path().join("lineage.toml"),
        "output = \"text\"\n\n[format]\ntemplate = \"%n\"\n",
    )
    .expect("write config");

    lineage_cmd(dir.path())
        .args(["-f", "tree.ged", "path", "-a", "@B@", "-d", "@E@"])
        .assert()
        .success()
        .stdout("Erik Holm -> Dorte Holm -> Bent Holm\n");
}

#[test]
fn broken_config_reports_config_code() {
    let dir = TempDir::new().expect("tempdir");
    write_tree(dir.path(), TREE);
    std::fs::write(dir.path().join("lineage.toml"), "[format\n").expect("write config");

    let err = json_stderr_error(dir.path(), &["-f", "tree.ged", "stats"]);
    assert_eq!(err["error_code"], "E1002");
}

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().expect("tempdir");

    lineage_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lineage"));
}
