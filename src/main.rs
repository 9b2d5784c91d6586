//! Venvoy CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use venvoy::cli::{Cli, CommandDispatcher};
use venvoy::ui::{OutputMode, TerminalUI, UserInterface};

/// Lines of captured tool output shown after a failure.
const OUTPUT_TAIL_LINES: usize = 20;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr; stdout belongs to the launched program.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("venvoy=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("venvoy=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Venvoy starting with args: {:?}", cli);

    // Determine output mode
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Determine project root
    let project_root = cli
        .project
        .as_ref()
        .cloned()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let mut ui = TerminalUI::new(output_mode);
    let dispatcher = CommandDispatcher::new(project_root, cli.config.clone());

    match dispatcher.dispatch(&cli, &mut ui) {
        Ok(result) => exit_code(result.exit_code),
        Err(e) => {
            ui.error(&e.to_string());
            if let Some(output) = e.captured_output() {
                let lines: Vec<&str> = output.lines().collect();
                let start = lines.len().saturating_sub(OUTPUT_TAIL_LINES);
                for line in &lines[start..] {
                    ui.hint(line);
                }
            }
            exit_code(e.exit_code())
        }
    }
}
