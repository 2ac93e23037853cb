use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use chordal_cli::{Args, run};

/// Demo relation lists live at the workspace root.
fn demos_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("crate sits two levels below the workspace root")
        .join("demos")
}

/// Collects all .chord files from a directory, sorted
fn collect_chord_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("chord")
                })
                .collect()
        })
        .unwrap_or_default();

    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        open: false,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_chord_files(&demos_dir());
    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed = Vec::new();
    for demo in &demos {
        let output = temp_dir
            .path()
            .join(format!("{}.svg", demo.file_stem().unwrap().to_string_lossy()));

        match run(&args_for(demo, &output)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output).expect("output should exist");
                assert!(svg.contains("</svg>"), "{} rendered an incomplete SVG", demo.display());
            }
            Err(err) => failed.push((demo.clone(), err)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_chord_files(&demos_dir().join("errors"));
    assert!(!demos.is_empty(), "No error demos found in demos/errors/");

    let unexpectedly_succeeded: Vec<&PathBuf> = demos
        .iter()
        .filter(|demo| {
            let output = temp_dir.path().join(format!(
                "error_{}.svg",
                demo.file_stem().unwrap().to_string_lossy()
            ));
            run(&args_for(demo, &output)).is_ok()
        })
        .collect();

    assert!(
        unexpectedly_succeeded.is_empty(),
        "error demos succeeded unexpectedly: {unexpectedly_succeeded:?}"
    );
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[style]\nbackground_color = \"white\"\n\n[label]\nhidden = true\n",
    )
    .unwrap();

    let output = temp_dir.path().join("basic.svg");
    let mut args = args_for(&demos_dir().join("basic.chord"), &output);
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).expect("basic demo should render");

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<rect"));
    assert!(!svg.contains("<text"));
}
