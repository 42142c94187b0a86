//! Command dispatch: resolves settings, wires services, prints results

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::SnailfishNumber;
use crate::infrastructure::di::ServiceContainer;
use crate::tree_traits::TreeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see --help".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = resolve_settings(cli, input_file(command))?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);
    run(command, cli, &container)
}

/// The input file of commands that read one.
fn input_file(command: &Commands) -> Option<&Path> {
    match command {
        Commands::Solve { file } | Commands::Sum { file, .. } | Commands::Largest { file } => {
            Some(file.as_path())
        }
        _ => None,
    }
}

fn local_dir(cli: &Cli, file: Option<&Path>) -> Option<PathBuf> {
    cli.config_dir.clone().or_else(|| {
        file.and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
    })
}

/// Layered settings with the `--step-limit` flag on top.
fn resolve_settings(cli: &Cli, file: Option<&Path>) -> CliResult<Settings> {
    let mut settings = Settings::load(local_dir(cli, file).as_deref())?;
    if let Some(limit) = cli.step_limit {
        settings.step_limit = Some(limit);
    }
    Ok(settings)
}

pub fn run(command: &Commands, cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match command {
        Commands::Solve { file } => solve(container, file),
        Commands::Sum { file, show } => sum(container, file, *show),
        Commands::Largest { file } => largest(container, file),
        Commands::Add { numbers } => add(container, numbers),
        Commands::Reduce { number } => reduce(container, number),
        Commands::Magnitude { number } => magnitude(number),
        Commands::Tree { number, reduce } => tree(container, number, *reduce),
        Commands::Config { command } => config(cli, container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(skip(container))]
fn solve(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let report = container.homework.solve(file)?;
    output::info(&format!("Task 1 result {}", report.magnitude));
    if container.settings.show_sum {
        output::detail(&report.sum);
    }
    match report.largest {
        Some(best) => output::info(&format!("Task 2 result {}", best.magnitude)),
        None => output::warning("Task 2 needs at least two numbers"),
    }
    Ok(())
}

#[instrument(skip(container))]
fn sum(container: &ServiceContainer, file: &Path, show: bool) -> CliResult<()> {
    let total = container.homework.final_sum(file)?;
    if show || container.settings.show_sum {
        output::action("sum", &total);
    }
    output::info(&total.magnitude()?);
    Ok(())
}

#[instrument(skip(container))]
fn largest(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let best = container.homework.largest_pair(file)?;
    output::info(&best.magnitude);
    output::detail(&format!("number #{} + number #{}", best.lhs + 1, best.rhs + 1));
    Ok(())
}

#[instrument(skip(container))]
fn add(container: &ServiceContainer, numbers: &[String]) -> CliResult<()> {
    let reducer = container.homework.reducer();
    let mut parsed = numbers
        .iter()
        .map(|n| n.parse::<SnailfishNumber>())
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();

    let first = parsed
        .next()
        .ok_or_else(|| CliError::InvalidArgs("nothing to add".to_string()))?;
    let total = parsed.try_fold(first, |acc, n| reducer.add(acc, n))?;

    output::action("sum", &total);
    output::action("magnitude", &total.magnitude()?);
    Ok(())
}

#[instrument(skip(container))]
fn reduce(container: &ServiceContainer, number: &str) -> CliResult<()> {
    let mut n: SnailfishNumber = number.parse()?;
    let steps = container.homework.reducer().reduce(&mut n)?;
    output::info(&n);
    output::detail(&format!("{steps} step(s)"));
    Ok(())
}

#[instrument]
fn magnitude(number: &str) -> CliResult<()> {
    let n: SnailfishNumber = number.parse()?;
    output::info(&n.magnitude()?);
    Ok(())
}

#[instrument(skip(container))]
fn tree(container: &ServiceContainer, number: &str, reduce: bool) -> CliResult<()> {
    let mut n: SnailfishNumber = number.parse()?;
    if reduce {
        container.homework.reducer().reduce(&mut n)?;
    }
    output::header(&n);
    output::info(&n.to_tree_string());
    Ok(())
}

#[instrument(skip(cli, container))]
fn config(cli: &Cli, container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    let local = local_config_path(cli.config_dir.as_deref().unwrap_or(Path::new(".")));
    match command {
        ConfigCommands::Show => {
            output::header("Effective configuration");
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".to_string());
            output::action("global", &global);
            output::action("local", &local.display());
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("no config directory on this platform".to_string())
                })?
            } else {
                local
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .map_err(|e| CliError::io(format!("create {}", path.display()), e))?;
            container
                .fs
                .write(&path, &Settings::template())
                .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}
