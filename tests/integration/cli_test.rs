//! CLI binary tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Run bpost with an empty configuration file so user config never leaks in.
fn bpost(temp: &TempDir) -> Command {
    let config = temp.path().join("empty.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("bpost").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config);
    cmd
}

fn case_dir(temp: &TempDir) -> PathBuf {
    let case = temp.path().join("case");
    fs::create_dir_all(&case).unwrap();
    case
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("bpost")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("video"))
        .stdout(predicate::str::contains("footprint"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn config_show_prints_effective_toml() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("custom.toml");
    fs::write(&file, "[run]\ncpus = 12\n").unwrap();

    Command::cargo_bin("bpost")
        .unwrap()
        .args(["config", "show", "--config"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("cpus = 12"))
        .stdout(predicate::str::contains("[footprint]"));
}

#[test]
fn config_path_ends_with_config_toml() {
    let temp = TempDir::new().unwrap();
    Command::cargo_bin("bpost")
        .unwrap()
        .args(["config", "path"])
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .assert()
        .success()
        .stdout(predicate::str::contains("bpost"))
        .stdout(predicate::str::ends_with("config.toml").trim());
}

#[test]
fn completions_for_bash() {
    Command::cargo_bin("bpost")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bpost"));
}

#[test]
fn missing_case_dir_fails() {
    let temp = TempDir::new().unwrap();
    bpost(&temp)
        .args(["footprint", "--case"])
        .arg(temp.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Case directory not found"));
}

#[test]
fn missing_footprint_helper_fails() {
    let temp = TempDir::new().unwrap();
    let case = case_dir(&temp);
    bpost(&temp)
        .args(["footprint", "--case"])
        .arg(&case)
        .arg("--binary")
        .arg(temp.path().join("getFootPrint"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Footprint helper not found"));
}

#[test]
fn invalid_worker_count_is_rejected() {
    let temp = TempDir::new().unwrap();
    let case = case_dir(&temp);
    bpost(&temp)
        .args(["video", "--cpus", "0", "--case"])
        .arg(&case)
        .assert()
        .failure()
        .stderr(predicate::str::contains("run.cpus"));
}

#[cfg(unix)]
mod with_helper_scripts {
    use super::*;
    use crate::helpers::{create_snapshots, write_script};

    fn script_dir(temp: &TempDir) -> PathBuf {
        let dir = temp.path().join("bin");
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn read_rows(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn footprint_end_to_end() {
        let temp = TempDir::new().unwrap();
        let case = case_dir(&temp);
        create_snapshots(&case, 0.01, 3, &[]);
        let helper = write_script(
            &script_dir(&temp),
            "getFootPrint",
            r#"t=$(basename "$1" | sed 's/^snapshot-//')
echo "diagnostics on stderr" >&2
echo "stdout is discarded"
echo "$t,$2" >&2"#,
        );

        bpost(&temp)
            .args(["footprint", "--snapshots", "3", "--cpus", "2", "--cutoffs", "0.01", "--case"])
            .arg(&case)
            .arg("--binary")
            .arg(&helper)
            .assert()
            .success()
            .stdout(predicate::str::contains("Wrote 3 rows"));

        assert_eq!(
            read_rows(&case.join("rFootvsTime_0.0100.csv")),
            vec!["time,rf", "0.0,0.01", "0.01,0.01", "0.02,0.01"]
        );
    }

    #[test]
    fn failing_footprint_helper_leaves_gap() {
        let temp = TempDir::new().unwrap();
        let case = case_dir(&temp);
        create_snapshots(&case, 0.01, 2, &[]);
        let helper = write_script(
            &script_dir(&temp),
            "getFootPrint",
            r#"case "$1" in
  *snapshot-0.0100) echo "restore failed" >&2; exit 2 ;;
esac
echo "0.0,0.5" >&2"#,
        );

        bpost(&temp)
            .args(["footprint", "--snapshots", "2", "--cpus", "1", "--cutoffs", "0.05", "--case"])
            .arg(&case)
            .arg("--binary")
            .arg(&helper)
            .assert()
            .success()
            .stdout(predicate::str::contains("1 failed"));

        assert_eq!(
            read_rows(&case.join("rFootvsTime_0.0500.csv")),
            vec!["time,rf", "0.0,0.5"]
        );
    }

    #[test]
    fn video_end_to_end_and_rerun() {
        let temp = TempDir::new().unwrap();
        let case = case_dir(&temp);
        create_snapshots(&case, 0.01, 2, &[]);
        let bin = script_dir(&temp);
        let facets = write_script(&bin, "getFacet", "exit 0");
        let field = write_script(
            &bin,
            "getData-generic",
            r#"for z in 0 1; do
  for r in 0 0.25 0.5 1; do
    echo "$z $r -1 0.5" >&2
  done
done"#,
        );

        let run = |temp: &TempDir| {
            let mut cmd = bpost(temp);
            cmd.args([
                "video", "--snapshots", "2", "--cpus", "1", "--rmax", "1", "--zmax", "1",
                "--grids-per-r", "4", "--case",
            ])
            .arg(&case)
            .arg("--facets-helper")
            .arg(&facets)
            .arg("--field-helper")
            .arg(&field);
            cmd
        };

        run(&temp)
            .assert()
            .success()
            .stdout(predicate::str::contains("2 rendered"));
        assert!(case.join("Video").join("00000000.png").is_file());
        assert!(case.join("Video").join("00000010.png").is_file());

        run(&temp)
            .assert()
            .success()
            .stdout(predicate::str::contains("0 rendered, 2 already present"));
    }

    #[test]
    fn malformed_field_output_fails_video() {
        let temp = TempDir::new().unwrap();
        let case = case_dir(&temp);
        create_snapshots(&case, 0.01, 1, &[]);
        let bin = script_dir(&temp);
        let facets = write_script(&bin, "getFacet", "exit 0");
        let field = write_script(&bin, "getData-generic", r#"echo "0 0 -1 0.5" >&2"#);

        bpost(&temp)
            .args([
                "video", "--snapshots", "1", "--cpus", "1", "--rmax", "1", "--grids-per-r", "4",
                "--case",
            ])
            .arg(&case)
            .arg("--facets-helper")
            .arg(&facets)
            .arg("--field-helper")
            .arg(&field)
            .assert()
            .failure()
            .stderr(predicate::str::contains("not a whole number of rows"));
    }
}
