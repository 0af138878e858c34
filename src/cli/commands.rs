//! Command dispatch: settings, wiring and the conversion pipeline

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, error, info, instrument};

use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::KeyPolicy;
use crate::infrastructure::ServiceContainer;
use crate::util::path::expand_path;

/// What a conversion run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Records absorbed into the tree
    pub records: usize,
    /// Rows skipped as undecodable
    pub skipped: usize,
    /// Nodes in the tree, root included
    pub nodes: usize,
    /// Whether the output file was written
    pub written: bool,
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(shell) = cli.generate {
        print_completions(shell);
        return Ok(());
    }

    let (input_path, output_path) = match (&cli.input, &cli.output) {
        (Some(input), Some(output)) => (expand_path(input), expand_path(output)),
        _ => {
            return Err(CliError::InvalidArgs(
                "--input and --output are required".to_string(),
            ))
        }
    };

    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.strict {
        settings.key_policy = KeyPolicy::Strict;
    }
    debug!("settings: {:?}", settings);

    let container = ServiceContainer::new(settings);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    convert(&container, &input_path, &output_path, cli.quiet, &mut out)?;
    Ok(())
}

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Ingest, build, print and export, strictly in that order.
///
/// A failed export is reported but does not fail the run: the outline has
/// already been printed by then.
#[instrument(skip(container, out))]
pub fn convert<W: Write>(
    container: &ServiceContainer,
    input_path: &Path,
    output_path: &Path,
    quiet: bool,
    out: &mut W,
) -> CliResult<ConversionReport> {
    let service = &container.timetable;

    let ingest = service.ingest(input_path)?;
    if !ingest.issues.is_empty() {
        output::warning(&format!(
            "{} row(s) could not be decoded and were skipped",
            ingest.issues.len()
        ));
        for issue in &ingest.issues {
            output::detail(&format!("line {}: {}", issue.line, issue.message));
        }
    }

    let tree = service.build(&ingest.records)?;

    if !quiet {
        service.print(&tree, out)?;
    }

    let written = match service.export(&tree, output_path) {
        Ok(()) => {
            info!("tree saved to {}", output_path.display());
            if !quiet {
                output::success(&format!(
                    "{} ({} nodes)",
                    output_path.display(),
                    tree.node_count()
                ));
            }
            true
        }
        Err(e) => {
            error!("could not save tree: {}", e);
            output::error(&format!("Could not save tree: {}", e));
            false
        }
    };

    Ok(ConversionReport {
        records: ingest.records.len(),
        skipped: ingest.issues.len(),
        nodes: tree.node_count(),
        written,
    })
}
