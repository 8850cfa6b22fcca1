//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::PlanSource;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, OutputFormat, Settings};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Commands::Completion { shell } = &cli.command {
        return cmd_completion(*shell);
    }

    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    let settings = Settings::load(Some(&project_dir))?;
    if !settings.color {
        output::disable_colors();
    }
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Commands::Count { files, format } => cmd_count(&container, files, *format),
        Commands::Leaves {
            file,
            pending,
            format,
        } => cmd_leaves(&container, file.as_deref(), *pending, *format),
        Commands::Tree { file } => cmd_tree(&container, file.as_deref()),
        Commands::History { file, format } => cmd_history(&container, file.as_deref(), *format),
        Commands::Config { command } => cmd_config(&container, &project_dir, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn resolve_project_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) if !dir.is_dir() => Err(CliError::InvalidArgs(format!(
            "not a directory: {}",
            dir.display()
        ))),
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir().map_err(|e| CliError::io("resolve current directory", e)),
    }
}

/// Turn command line paths into plan sources.
///
/// Without paths, the configured plan file is used, falling back to stdin.
pub fn resolve_sources(files: &[PathBuf], settings: &Settings) -> CliResult<Vec<PlanSource>> {
    let sources: Vec<PlanSource> = if files.is_empty() {
        match &settings.plan_file {
            Some(plan) => vec![PlanSource::File(plan.clone())],
            None => vec![PlanSource::Stdin],
        }
    } else {
        files.iter().map(|f| PlanSource::from_arg(f)).collect()
    };

    let stdin_count = sources.iter().filter(|s| **s == PlanSource::Stdin).count();
    if stdin_count > 1 {
        return Err(CliError::InvalidArgs(
            "stdin ('-') can only be read once".to_string(),
        ));
    }
    debug!("resolved {} plan source(s)", sources.len());
    Ok(sources)
}

fn resolve_single(file: Option<&Path>, settings: &Settings) -> CliResult<PlanSource> {
    let files: Vec<PathBuf> = file.map(Path::to_path_buf).into_iter().collect();
    resolve_sources(&files, settings)?
        .into_iter()
        .next()
        .ok_or_else(|| CliError::InvalidArgs("no plan given".to_string()))
}

#[instrument(skip(container))]
fn cmd_count(
    container: &ServiceContainer,
    files: &[PathBuf],
    format: Option<OutputFormat>,
) -> CliResult<()> {
    let settings = &container.settings;
    let sources = resolve_sources(files, settings)?;
    let service = container.plan_service();

    let results = if sources.len() == 1 {
        vec![service.summarize(&sources[0])]
    } else {
        service.summarize_all(&sources)
    };

    let total = results.len();
    let mut reports = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => failures.push(e),
        }
    }

    // single input: surface the precise error and its exit code
    if total == 1 {
        if let Some(e) = failures.pop() {
            return Err(e.into());
        }
    }

    match format.unwrap_or(settings.format) {
        OutputFormat::Json if reports.len() == 1 && total == 1 => {
            output::info(&output::to_json(&reports[0])?)
        }
        OutputFormat::Json => output::info(&output::to_json(&reports)?),
        OutputFormat::Text => {
            for report in &reports {
                output::info(&output::report_line(report));
            }
        }
    }

    for e in &failures {
        output::error(e);
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::PartialFailure {
            failed: failures.len(),
            total,
        })
    }
}

#[instrument(skip(container))]
fn cmd_leaves(
    container: &ServiceContainer,
    file: Option<&Path>,
    pending: bool,
    format: Option<OutputFormat>,
) -> CliResult<()> {
    let source = resolve_single(file, &container.settings)?;
    let mut leaves = container.plan_service().leaves(&source)?;
    if pending {
        leaves.retain(|leaf| !leaf.completed);
    }

    match format.unwrap_or(container.settings.format) {
        OutputFormat::Json => output::info(&output::to_json(&leaves)?),
        OutputFormat::Text => {
            output::header(&source);
            if leaves.is_empty() {
                output::warning("no leaf tasks found");
            }
            for leaf in &leaves {
                output::info(&output::leaf_line(leaf));
            }
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let source = resolve_single(file, &container.settings)?;
    let rendered = container.plan_service().render_tree(&source)?;
    output::info(rendered.trim_end());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_history(
    container: &ServiceContainer,
    file: Option<&Path>,
    format: Option<OutputFormat>,
) -> CliResult<()> {
    let path = match resolve_single(file, &container.settings)? {
        PlanSource::File(path) => path,
        PlanSource::Stdin => {
            return Err(CliError::InvalidArgs(
                "history needs a plan file tracked in git".to_string(),
            ))
        }
    };
    let history = container.plan_service().history(&path)?;

    match format.unwrap_or(container.settings.format) {
        OutputFormat::Json => output::info(&output::to_json(&history)?),
        OutputFormat::Text => {
            output::header(&path.display());
            if history.versions.is_empty() {
                output::warning("no committed versions found");
            }
            for version in &history.versions {
                output::info(&output::version_line(version));
            }
        }
    }
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    project_dir: &Path,
    command: &ConfigCommands,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(container.settings.to_toml()?.trim_end());
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::warning("no home directory, global config disabled"),
            }
            output::info(&format!(
                "local:  {}",
                local_config_path(project_dir).display()
            ));
        }
        ConfigCommands::Template => output::info(Settings::template().trim_end()),
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
