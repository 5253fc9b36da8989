//! Integration tests for the glossa binaries

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

#[test]
fn test_write_domainlabels_appends_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let yaml_path = temp_dir.path().join("stats.yaml");
    fs::write(&yaml_path, "sentences: 22\n").unwrap();

    let mut cmd = Command::cargo_bin("write_domainlabels").unwrap();
    cmd.arg(fixture_path("dlcounts.txt")).arg(&yaml_path);
    cmd.assert().success();

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(&yaml_path).unwrap()).unwrap();
    assert_eq!(yaml["sentences"].as_i64(), Some(22));
    let counts = yaml["domain_labels"].as_str().unwrap();
    assert_eq!(counts, r#"{"politics": 12, "economics": 7, "law": 3}"#);
    let decoded: serde_json::Value = serde_json::from_str(counts).unwrap();
    assert_eq!(decoded["economics"], 7);
}

#[test]
fn test_write_domainlabels_bad_counts_fail() {
    let temp_dir = TempDir::new().unwrap();
    let counts_path = temp_dir.path().join("dlcounts.txt");
    fs::write(&counts_path, "12 politics\nmany law\n").unwrap();

    let mut cmd = Command::cargo_bin("write_domainlabels").unwrap();
    cmd.arg(&counts_path).arg(temp_dir.path().join("stats.yaml"));
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_write_domainlabels_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("write_domainlabels").unwrap();
    cmd.arg("/nonexistent/dlcounts.txt")
        .arg(temp_dir.path().join("stats.yaml"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_tokenize_unknown_language() {
    let mut cmd = Command::cargo_bin("glossa-tokenize").unwrap();
    cmd.arg("tlh").arg(fixture_path("english-sample.txt"));
    cmd.assert().success().stdout(
        "Hello , world !\nGood muffins cost $ 3 . 88 in New York .\n\n",
    );
}

#[test]
fn test_tokenize_from_stdin() {
    let mut cmd = Command::cargo_bin("glossa-tokenize").unwrap();
    cmd.arg("vi").write_stdin("Xin chào!\n");
    cmd.assert().success().stdout("Xin chào !\n");
}

#[test]
fn test_tokenize_with_custom_routing() {
    let mut cmd = Command::cargo_bin("glossa-tokenize").unwrap();
    cmd.arg("af")
        .arg("--routing")
        .arg(fixture_path("cat-routing.toml"))
        .arg("--info")
        .write_stdin("Dit is 'n toets .\n");
    cmd.assert()
        .success()
        .stdout("Dit is 'n toets .\n")
        .stderr(predicate::str::contains("warning_tok_moses_nl"));
}

#[test]
fn test_tokenize_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("tokens.txt");

    let mut cmd = Command::cargo_bin("glossa-tokenize").unwrap();
    cmd.arg("tlh")
        .arg(fixture_path("english-sample.txt"))
        .arg(&out_path);
    cmd.assert().success().stdout("");

    let output = fs::read_to_string(&out_path).unwrap();
    assert_eq!(output.lines().count(), 3);
}

#[test]
fn test_list_languages() {
    let mut cmd = Command::cargo_bin("glossa-tokenize").unwrap();
    cmd.arg("--list")
        .arg("--routing")
        .arg(fixture_path("cat-routing.toml"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("en\tmoses\t\n"))
        .stdout(predicate::str::contains("af\tmoses\twarning_tok_moses_nl\n"))
        .stdout(predicate::str::contains(
            "zz\tnltk_wordpunct\twarning_tok_missing_glossa-tok-absent,warning_tok_nltk_wordpunct\n",
        ));
}

#[test]
fn test_invalid_routing_table() {
    let temp_dir = TempDir::new().unwrap();
    let routing = temp_dir.path().join("routing.toml");
    fs::write(&routing, "[[family]]\nname = \"x\"\nbackend = \"pipe\"\nlanguages = [\"en\"]\n").unwrap();

    let mut cmd = Command::cargo_bin("glossa-tokenize").unwrap();
    cmd.arg("en").arg("--routing").arg(&routing);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("has no command"));
}

#[test]
fn test_logfile_receives_log() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("run.log");

    let mut cmd = Command::cargo_bin("glossa-tokenize").unwrap();
    cmd.arg("tlh")
        .arg("--info")
        .arg("--logfile")
        .arg(&log_path)
        .write_stdin("a b\n");
    cmd.assert().success().stdout("a b\n");

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("warning_tok_nltk_wordpunct"));
}

#[cfg(feature = "candle")]
#[test]
fn test_domainlabels_help() {
    let mut cmd = Command::cargo_bin("domainlabels").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--batchsize"))
        .stdout(predicate::str::contains("--field"))
        .stdout(predicate::str::contains("--on-malformed"));
}

#[cfg(feature = "candle")]
#[test]
fn test_domainlabels_missing_model_dir_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("domainlabels").unwrap();
    cmd.arg("--model-dir")
        .arg(temp_dir.path())
        .write_stdin("{\"text\": \"Hello world.\"}\n");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("config.json"));
}
