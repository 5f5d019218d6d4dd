//! Runs the repotree binary on the sample listing

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const LISTING: &str = "tests/resources/listings/repository.json";

/// Binary isolated from the user's global config, environment and terminal colors.
fn repotree(project: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("repotree").unwrap();
    cmd.env("XDG_CONFIG_HOME", project.path().join("xdg"))
        .env("NO_COLOR", "1")
        .env_remove("REPOTREE_EXCLUSIONS__NAMES")
        .env_remove("REPOTREE_OUTPUT__DIR_SUFFIX")
        .arg("-C")
        .arg(project.path());
    cmd
}

#[test]
fn given_listing_when_running_tree_then_prints_sorted_forest() {
    let project = TempDir::new().unwrap();

    repotree(&project)
        .args(["tree", LISTING])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("assets/\ndocs/\nsrc/\n"))
        .stdout(predicate::str::contains(
            "src/\n├── components/\n│   ├── button.css\n│   └── Button.tsx\n├── App.tsx\n└── index.ts\n",
        ))
        .stdout(predicate::str::ends_with("package.json\nvendor\n"))
        .stdout(predicate::str::contains("README.md").not());
}

#[test]
fn given_dir_suffix_setting_when_running_tree_then_marks_directories_with_it() {
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join(".repotree.toml"),
        "[output]\ndir_suffix = \" (dir)\"\n",
    )
    .unwrap();

    repotree(&project)
        .args(["tree", LISTING])
        .assert()
        .success()
        .stdout(predicate::str::contains("src (dir)\n├── components (dir)\n"))
        .stdout(predicate::str::contains("assets/").not());
}

#[test]
fn given_listing_when_running_stats_then_reports_counts_and_dropped() {
    let project = TempDir::new().unwrap();

    repotree(&project)
        .args(["stats", LISTING])
        .assert()
        .success()
        .stdout(predicate::str::contains("entries:     16"))
        .stdout(predicate::str::contains("dropped:     6"))
        .stdout(predicate::str::contains("roots:       5"))
        .stdout(predicate::str::contains("directories: 4"))
        .stdout(predicate::str::contains("files:       6"))
        .stdout(predicate::str::contains("depth:       3"));
}

#[test]
fn given_extra_exclusion_when_running_stats_then_dropped_grows() {
    let project = TempDir::new().unwrap();

    repotree(&project)
        .args(["stats", LISTING, "-x", "css"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dropped:     7"))
        .stdout(predicate::str::contains("files:       5"));
}

#[test]
fn given_missing_listing_when_running_tree_then_fails_with_noinput() {
    let project = TempDir::new().unwrap();

    repotree(&project)
        .args(["tree", "does-not-exist.json"])
        .assert()
        .code(repotree::exitcode::NOINPUT)
        .stderr(predicate::str::contains("input not found"));
}
