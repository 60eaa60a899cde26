//! Integration tests for the `dzi-tiles` and `dzi-save` binaries.
//!
//! Each test runs the compiled binary against a temporary directory. The
//! per-user config directory is pointed at an empty temp dir so a developer's
//! own config file cannot influence results.
//!
//! Run with: `cargo test -p deepzoom-cli --test cli_integration`

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

const TILES_BIN: &str = env!("CARGO_BIN_EXE_dzi-tiles");
const SAVE_BIN: &str = env!("CARGO_BIN_EXE_dzi-save");

// ============================================================================
// Helper Functions
// ============================================================================

struct Workspace {
    dir: TempDir,
    config_home: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            config_home: TempDir::new().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// 600×400 RGBA source with a transparent corner.
    fn source(&self) -> PathBuf {
        let path = self.path("workflow.png");
        RgbaImage::from_fn(600, 400, |x, y| {
            if x < 40 && y < 40 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([(x / 3) as u8, (y / 2) as u8, 200, 255])
            }
        })
        .save(&path)
        .unwrap();
        path
    }

    fn run(&self, bin: &str, args: &[&str]) -> Output {
        Command::new(bin)
            .args(args)
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_no_output(base: &Path) {
    let dzi = base.with_extension("dzi");
    let mut files = base.as_os_str().to_owned();
    files.push("_files");
    assert!(!dzi.exists(), "{} should not exist", dzi.display());
    assert!(
        !Path::new(&files).exists(),
        "{:?} should not exist",
        files
    );
}

// ============================================================================
// Success paths
// ============================================================================

#[test]
fn test_tiles_generates_pyramid() {
    let ws = Workspace::new();
    let input = ws.source();
    let base = ws.path("site");

    let output = ws.run(TILES_BIN, &[arg(&input), arg(&base)]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Loading image:"));
    assert!(out.contains("Image size: 600x400 pixels"));
    assert!(out.contains("Generating 11 zoom levels"));
    assert!(out.contains("Level 10: 600x400 px, 6 tiles (3x2)"));
    assert!(out.contains("SUCCESS: Generated site.dzi"));
    assert!(out.contains("Tiles folder: site_files/"));
    assert!(out.contains("Total zoom levels: 11"));

    let dzi = fs::read_to_string(ws.path("site.dzi")).unwrap();
    assert!(dzi.contains(r#"TileSize="254""#));
    assert!(dzi.contains(r#"<Size Width="600" Height="400" />"#));
    assert!(ws.path("site_files/10/2_1.jpg").is_file());
    assert!(ws.path("site_files/0/0_0.jpg").is_file());
}

#[test]
fn test_save_generates_pyramid() {
    let ws = Workspace::new();
    let input = ws.source();
    let base = ws.path("site");

    let output = ws.run(SAVE_BIN, &[arg(&input), arg(&base), "--quality", "75"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Saving Deep Zoom to:"));
    assert!(out.contains("Total zoom levels: 11"));
    assert!(ws.path("site.dzi").is_file());
    assert!(ws.path("site_files/10/2_1.jpg").is_file());
}

#[test]
fn test_tiles_and_save_write_same_tiles() {
    let ws = Workspace::new();
    let input = ws.source();
    let a = ws.path("a");
    let b = ws.path("b");

    assert!(ws.run(TILES_BIN, &[arg(&input), arg(&a)]).status.success());
    assert!(ws.run(SAVE_BIN, &[arg(&input), arg(&b)]).status.success());

    for level in 0..=10 {
        let names = |base: &str| {
            let mut names: Vec<_> = fs::read_dir(ws.path(&format!("{}_files/{}", base, level)))
                .unwrap()
                .map(|e| e.unwrap().file_name())
                .collect();
            names.sort();
            names
        };
        assert_eq!(names("a"), names("b"), "level {}", level);
    }
    assert_eq!(
        fs::read_to_string(ws.path("a.dzi")).unwrap(),
        fs::read_to_string(ws.path("b.dzi")).unwrap()
    );
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_explicit_config_file_is_used() {
    let ws = Workspace::new();
    let input = ws.source();
    let base = ws.path("configured");
    let config = ws.path("tiles.ini");
    fs::write(&config, "[deepzoom]\ntile_size = 100\noverlap = 0\n").unwrap();

    let output = ws.run(
        TILES_BIN,
        &[arg(&input), arg(&base), "--config", arg(&config)],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let dzi = fs::read_to_string(ws.path("configured.dzi")).unwrap();
    assert!(dzi.contains(r#"TileSize="100""#));
    assert!(dzi.contains(r#"Overlap="0""#));
    assert!(ws.path("configured_files/10/5_3.jpg").is_file());
}

#[test]
fn test_flags_override_config_file() {
    let ws = Workspace::new();
    let input = ws.source();
    let base = ws.path("override");
    let config = ws.path("tiles.ini");
    fs::write(&config, "[deepzoom]\ntile_size = 100\n").unwrap();

    let output = ws.run(
        SAVE_BIN,
        &[
            arg(&input),
            arg(&base),
            "--config",
            arg(&config),
            "--tile-size",
            "300",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let dzi = fs::read_to_string(ws.path("override.dzi")).unwrap();
    assert!(dzi.contains(r#"TileSize="300""#));
}

#[cfg(target_os = "linux")]
#[test]
fn test_user_config_file_is_used() {
    let ws = Workspace::new();
    let config_dir = ws.config_home.path().join("deepzoom");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.ini"), "[deepzoom]\ntile_size = 512\n").unwrap();
    let input = ws.source();
    let base = ws.path("user");

    let output = ws.run(TILES_BIN, &[arg(&input), arg(&base)]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let dzi = fs::read_to_string(ws.path("user.dzi")).unwrap();
    assert!(dzi.contains(r#"TileSize="512""#));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_input_fails_without_output() {
    let ws = Workspace::new();
    let base = ws.path("missing");

    for bin in [TILES_BIN, SAVE_BIN] {
        let output = ws.run(bin, &[arg(&ws.path("nope.png")), arg(&base)]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("ERROR:"));
        assert_no_output(&base);
    }
}

#[test]
fn test_invalid_overlap_fails_without_output() {
    let ws = Workspace::new();
    let input = ws.source();
    let base = ws.path("bad");

    for bin in [TILES_BIN, SAVE_BIN] {
        let output = ws.run(
            bin,
            &[arg(&input), arg(&base), "--tile-size", "8", "--overlap", "8"],
        );

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("overlap"));
        assert_no_output(&base);
    }
}

#[test]
fn test_quality_out_of_range_fails() {
    let ws = Workspace::new();
    let input = ws.source();
    let base = ws.path("q");

    let output = ws.run(TILES_BIN, &[arg(&input), arg(&base), "--quality", "0"]);

    assert_eq!(output.status.code(), Some(1));
    assert_no_output(&base);
}

#[test]
fn test_usage_error_exits_with_one() {
    let ws = Workspace::new();

    let output = ws.run(TILES_BIN, &["only-one-argument"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_succeeds() {
    let ws = Workspace::new();

    let output = ws.run(SAVE_BIN, &["--help"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("--tile-size"));
}
