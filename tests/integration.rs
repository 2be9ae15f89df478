use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn geoindice_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("geoindice");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[db]
path = "{}/data/geoindice.sqlite"

[server]
bind = "127.0.0.1:7341"
"#,
        root.display()
    );

    let config_path = config_dir.join("geoindice.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_geoindice(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = geoindice_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run geoindice binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_init_creates_database() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_geoindice(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
    assert!(tmp.path().join("data").join("geoindice.sqlite").exists());
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_geoindice(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_geoindice(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_count_on_empty_store() {
    let (_tmp, config_path) = setup_test_env();

    run_geoindice(&config_path, &["init"]);
    let (stdout, _, success) = run_geoindice(&config_path, &["count"]);
    assert!(success);
    assert!(stdout.contains("0 indices"));
}

#[test]
fn test_seed_populates_empty_store() {
    let (_tmp, config_path) = setup_test_env();

    run_geoindice(&config_path, &["init"]);
    let (stdout, stderr, success) = run_geoindice(&config_path, &["seed"]);
    assert!(success, "seed failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Seeded 7 indices"));

    let (stdout, _, _) = run_geoindice(&config_path, &["count"]);
    assert!(stdout.contains("7 indices"));
}

#[test]
fn test_seed_second_run_is_noop() {
    let (_tmp, config_path) = setup_test_env();

    run_geoindice(&config_path, &["init"]);
    run_geoindice(&config_path, &["seed"]);

    let (stdout, _, success) = run_geoindice(&config_path, &["seed"]);
    assert!(success, "Second seed failed");
    assert!(stdout.contains("already populated"));

    let (stdout, _, _) = run_geoindice(&config_path, &["count"]);
    assert!(stdout.contains("7 indices"));
}

#[test]
fn test_list_filter_by_category() {
    let (_tmp, config_path) = setup_test_env();

    run_geoindice(&config_path, &["init"]);
    run_geoindice(&config_path, &["seed"]);

    let (stdout, _, success) = run_geoindice(&config_path, &["list", "--category", "Langue"]);
    assert!(success);
    assert!(stdout.contains("Bulgarie"));
    assert!(stdout.contains("Brésil"));
    assert!(stdout.contains("Grèce"));
    assert!(!stdout.contains("Japon"));
}

#[test]
fn test_list_filter_is_case_insensitive() {
    let (_tmp, config_path) = setup_test_env();

    run_geoindice(&config_path, &["init"]);
    run_geoindice(&config_path, &["seed"]);

    let (stdout, _, success) = run_geoindice(&config_path, &["list", "--category", "langue"]);
    assert!(success);
    assert!(stdout.contains("Bulgarie"));
    assert!(stdout.contains("Grèce"));
}

#[test]
fn test_list_query_matches_content_and_keywords() {
    let (_tmp, config_path) = setup_test_env();

    run_geoindice(&config_path, &["init"]);
    run_geoindice(&config_path, &["seed"]);

    let (stdout, _, success) = run_geoindice(&config_path, &["list", "--query", "gauche"]);
    assert!(success);
    assert!(stdout.contains("Japon"));
    assert!(stdout.contains("Australie"));
    assert!(!stdout.contains("Bulgarie"));
}

#[test]
fn test_list_filters_combine_with_and() {
    let (_tmp, config_path) = setup_test_env();

    run_geoindice(&config_path, &["init"]);
    run_geoindice(&config_path, &["seed"]);

    let (stdout, _, success) = run_geoindice(
        &config_path,
        &["list", "--category", "Langue", "--country", "bulg"],
    );
    assert!(success);
    assert!(stdout.contains("Bulgarie"));
    assert!(!stdout.contains("Brésil"));
    assert!(!stdout.contains("Grèce"));
}

#[test]
fn test_list_no_results() {
    let (_tmp, config_path) = setup_test_env();

    run_geoindice(&config_path, &["init"]);
    run_geoindice(&config_path, &["seed"]);

    let (stdout, _, success) = run_geoindice(&config_path, &["list", "--country", "xyznowhere"]);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_random_on_empty_store() {
    let (_tmp, config_path) = setup_test_env();

    run_geoindice(&config_path, &["init"]);
    let (stdout, _, success) = run_geoindice(&config_path, &["random"]);
    assert!(success, "random on an empty store should not fail");
    assert!(stdout.contains("No indices."));
}

#[test]
fn test_random_returns_a_seeded_record() {
    let (_tmp, config_path) = setup_test_env();

    run_geoindice(&config_path, &["init"]);
    run_geoindice(&config_path, &["seed"]);

    let countries = [
        "Bulgarie",
        "Brésil",
        "Grèce",
        "Japon",
        "Australie",
        "Kenya",
        "Norvège",
    ];
    let (stdout, _, success) = run_geoindice(&config_path, &["random"]);
    assert!(success);
    assert!(
        countries.iter().any(|c| stdout.contains(c)),
        "Expected a seeded country in output, got: {}",
        stdout
    );
}

#[test]
fn test_add_then_list_and_count() {
    let (_tmp, config_path) = setup_test_env();

    run_geoindice(&config_path, &["init"]);
    let (stdout, stderr, success) = run_geoindice(
        &config_path,
        &[
            "add",
            "--country",
            "Islande",
            "--region",
            "Europe",
            "--category",
            "Paysage",
            "--content",
            "Volcans et geysers.",
            "--keyword",
            "volcan",
            "--keyword",
            "geyser",
        ],
    );
    assert!(success, "add failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Inserted indice #"));

    let (stdout, _, _) = run_geoindice(&config_path, &["count"]);
    assert!(stdout.contains("1 indices"));

    let (stdout, _, _) = run_geoindice(&config_path, &["list", "--query", "volcan"]);
    assert!(stdout.contains("Islande"));
    assert!(stdout.contains("volcan"));
}

#[test]
fn test_add_missing_field_fails() {
    let (_tmp, config_path) = setup_test_env();

    run_geoindice(&config_path, &["init"]);
    let (_, stderr, success) = run_geoindice(
        &config_path,
        &[
            "add",
            "--country",
            "",
            "--region",
            "Europe",
            "--category",
            "Paysage",
            "--content",
            "x",
        ],
    );
    assert!(!success, "add with an empty country should fail");
    assert!(
        stderr.contains("must not be empty"),
        "Should report the missing field, got: {}",
        stderr
    );

    let (stdout, _, _) = run_geoindice(&config_path, &["count"]);
    assert!(stdout.contains("0 indices"), "Nothing should be written");
}

#[test]
fn test_missing_config_fails() {
    let (tmp, _) = setup_test_env();

    let bogus = tmp.path().join("nope.toml");
    let (_, stderr, success) = run_geoindice(&bogus, &["count"]);
    assert!(!success);
    assert!(stderr.contains("config"));
}
