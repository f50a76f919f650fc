//! End-to-end tests for the two release binaries.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const HEADER: &str = "\
//{{NO_DEPENDENCIES}}
//----------------------------------------------------------------------------
// Scenery Editor X - edX File Format Version
//----------------------------------------------------------------------------
#define EDX_MAJOR              \t\t\t0
#define EDX_MINOR              \t\t\t0
#define EDX_PATCH              \t\t\t03
#define EDX_BUILD              \t\t\t42
//----------------------------------------------------------------------------
#define EDX_VERSION_STRING              \"0.0.3.42\"
#define EDX_VERSION                     0x000003002A
#define EDX_FILE_VERSION                EDX_MAJOR,EDX_MINOR,EDX_PATCH,EDX_BUILD
//----------------------------------------------------------------------------
#define SEDX_SPLASH                     101
#define IDI_ICON                        106
#ifdef APSTUDIO_INVOKED
#define _APS_NEXT_RESOURCE_VALUE        111
#endif
";

/// Test context with a throwaway repository containing edX/config/resource.h
struct TestContext {
    temp_dir: TempDir,
    header: PathBuf,
}

impl TestContext {
    fn new(contents: &str) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let header = temp_dir.path().join("edX").join("config").join("resource.h");
        std::fs::create_dir_all(header.parent().unwrap()).expect("failed to create config dir");
        std::fs::write(&header, contents).expect("failed to write header");
        Self { temp_dir, header }
    }

    fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    fn read(&self) -> String {
        std::fs::read_to_string(&self.header).expect("failed to read header")
    }

    fn cmd(&self, bin: &str) -> Command {
        let mut cmd = Command::new(bin);
        cmd.current_dir(self.root());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn increment(&self) -> Command {
        self.cmd(env!("CARGO_BIN_EXE_increment-edx-build"))
    }

    fn set(&self) -> Command {
        self.cmd(env!("CARGO_BIN_EXE_set-edx-version"))
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new(HEADER);
    for mut cmd in [ctx.increment(), ctx.set()] {
        let output = cmd.arg("--help").output().expect("failed to run");
        assert!(output.status.success());
        assert!(stdout(&output).contains("Usage:"));
    }
}

#[test]
fn test_version_flag() {
    let ctx = TestContext::new(HEADER);
    for mut cmd in [ctx.increment(), ctx.set()] {
        let output = cmd.arg("--version").output().expect("failed to run");
        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
    }
    assert_eq!(ctx.read(), HEADER);
}

#[test]
fn test_increment_updates_build() {
    let ctx = TestContext::new(HEADER);
    let output = ctx.increment().output().expect("failed to run increment");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Updated version to 0.0.3.43\n");

    let text = ctx.read();
    assert!(text.contains("#define EDX_BUILD              \t\t\t43\n"));
    assert!(text.contains("#define EDX_VERSION_STRING              \"0.0.3.43\"\n"));
    assert!(text.contains("#define EDX_VERSION                     0x000003002B\n"));
    assert_eq!(
        text.replace("43", "42").replace("2B", "2A"),
        HEADER,
        "only the three version lines may change"
    );
}

#[test]
fn test_increment_wraps_build() {
    let ctx = TestContext::new(&HEADER.replace("\t\t\t42\n", "\t\t\t65535\n"));
    let output = ctx.increment().output().expect("failed to run increment");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Updated version to 0.0.4.0\n");
    let text = ctx.read();
    assert!(text.contains("#define EDX_BUILD              \t\t\t0\n"));
    assert!(text.contains("0x0000040000"));
}

#[test]
fn test_increment_refuses_patch_overflow() {
    let original = HEADER
        .replace("\t\t\t42\n", "\t\t\t65535\n")
        .replace("\t\t\t03\n", "\t\t\t4294967295\n");
    let ctx = TestContext::new(&original);
    let output = ctx.increment().output().expect("failed to run increment");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("EDX_PATCH 4294967295 is at its maximum"));
    assert!(stdout(&output).is_empty());
    assert_eq!(ctx.read(), original);
}

#[test]
fn test_increment_missing_patch_is_fatal() {
    let original = HEADER.replace("#define EDX_PATCH              \t\t\t03\n", "");
    let ctx = TestContext::new(&original);
    let output = ctx.increment().output().expect("failed to run increment");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Could not find all version components"));
    assert_eq!(ctx.read(), original);
}

#[test]
fn test_increment_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_increment-edx-build"))
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run increment");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("resource.h not found"));
    assert!(!dir.path().join("edX").exists());
}

#[test]
fn test_increment_discovers_root_from_subdirectory() {
    let ctx = TestContext::new(HEADER);
    let scripts = ctx.root().join("scripts");
    std::fs::create_dir_all(&scripts).unwrap();

    let output = ctx
        .increment()
        .current_dir(&scripts)
        .output()
        .expect("failed to run increment");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(ctx.read().contains("\"0.0.3.43\""));
}

#[test]
fn test_increment_dry_run_leaves_file() {
    let ctx = TestContext::new(HEADER);
    let output = ctx
        .increment()
        .arg("--dry-run")
        .output()
        .expect("failed to run increment");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Would update version to 0.0.3.43\n");
    assert_eq!(ctx.read(), HEADER);
}

#[test]
fn test_set_three_field_version() {
    let ctx = TestContext::new(HEADER);
    let output = ctx.set().arg("2.5.1").output().expect("failed to run set");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Updated resource.h version to 2.5.1 (0x02050100)\n"
    );

    let text = ctx.read();
    assert!(text.contains("#define EDX_MAJOR              \t\t\t2\n"));
    assert!(text.contains("#define EDX_MINOR              \t\t\t5\n"));
    assert!(text.contains("#define EDX_PATCH              \t\t\t1\n"));
    assert!(text.contains("#define EDX_BUILD              \t\t\t0\n"));
    assert!(text.contains("#define EDX_VERSION_STRING              \"2.5.1\"\n"));
    assert!(text.contains("#define EDX_VERSION                     0x02050100\n"));
    assert!(text.contains("#define EDX_FILE_VERSION                EDX_MAJOR,EDX_MINOR,EDX_PATCH,EDX_BUILD\n"));
}

#[test]
fn test_set_truncates_packed_build() {
    let ctx = TestContext::new(HEADER);
    let output = ctx.set().arg("v1.0.0.300").output().expect("failed to run set");

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Updated resource.h version to 1.0.0.300 (0x0100002C)\n"
    );
}

#[test]
fn test_set_appends_missing_major() {
    let original = HEADER.replace("#define EDX_MAJOR              \t\t\t0\n", "");
    let ctx = TestContext::new(&original);
    let output = ctx.set().arg("4.1.0").output().expect("failed to run set");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = ctx.read();
    assert!(text.ends_with("\n#define EDX_MAJOR\t\t\t4\n"));

    let before: Vec<&str> = original.lines().collect();
    let after: Vec<&str> = text.lines().collect();
    assert_eq!(after.len(), before.len() + 2);
    for (old, new) in before.iter().zip(&after) {
        if !old.starts_with("#define EDX_") {
            assert_eq!(old, new);
        }
    }
}

#[test]
fn test_set_usage_errors() {
    let ctx = TestContext::new(HEADER);

    let missing = ctx.set().output().expect("failed to run set");
    assert_eq!(missing.status.code(), Some(2));
    assert!(stderr(&missing).contains("Usage:"));

    for bad in ["1.2", "1.2.3.4.5", "1.x.3"] {
        let output = ctx.set().arg(bad).output().expect("failed to run set");
        assert_eq!(output.status.code(), Some(2), "{bad}");
        assert!(stdout(&output).is_empty());
    }

    assert_eq!(ctx.read(), HEADER);
}

#[test]
fn test_set_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("resource.h");
    let output = Command::new(env!("CARGO_BIN_EXE_set-edx-version"))
        .arg("1.2.3")
        .arg("--file")
        .arg(&target)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run set");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("resource.h not found"));
    assert!(!target.exists());
}

#[test]
fn test_set_with_explicit_root_and_dry_run() {
    let ctx = TestContext::new(HEADER);
    let elsewhere = TempDir::new().unwrap();

    let output = ctx
        .set()
        .current_dir(elsewhere.path())
        .args(["1.2.3", "--dry-run", "--root"])
        .arg(ctx.root())
        .output()
        .expect("failed to run set");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Would update resource.h version to 1.2.3 (0x01020300)\n"
    );
    assert_eq!(ctx.read(), HEADER);
}
