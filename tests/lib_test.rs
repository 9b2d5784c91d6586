//! Library integration tests.

use std::fs;

use tempfile::TempDir;
use venvoy::config::LaunchConfig;
use venvoy::launcher::{Launcher, LaunchStep};
use venvoy::shell::MockRunner;
use venvoy::ui::MockUI;
use venvoy::VenvoyError;

#[test]
fn error_types_are_public() {
    let err = VenvoyError::ManifestNotFound {
        path: "requirements.txt".into(),
    };
    assert!(err.to_string().contains("requirements.txt"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> venvoy::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use venvoy::cli::{Cli, Commands};

    let cli = Cli::parse_from(["venvoy", "config", "--json"]);
    if let Some(Commands::Config(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Config command");
    }
}

#[test]
fn custom_profile_drives_the_launch() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.py"), "").unwrap();
    fs::create_dir_all(temp.path().join(".venv/bin")).unwrap();

    let config = LaunchConfig {
        marker: "main.py".into(),
        env_dir: ".venv".into(),
        dependencies: vec!["yaml".to_string()],
        ..Default::default()
    };
    let runner = MockRunner::new();
    let report = Launcher::new(temp.path(), config, &runner)
        .with_base_path(Vec::new())
        .launch(&mut MockUI::new(), false)
        .unwrap();

    assert_eq!(report.exit_code, Some(0));
    assert!(runner.lines()[0].contains("import yaml"));
    assert!(matches!(
        report.plan.steps().last(),
        Some(LaunchStep::Delegate { .. })
    ));
}
