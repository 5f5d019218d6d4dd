//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{BuildOptions, TreeOutput};
use crate::application::IoResultExt;
use crate::cli::args::{Cli, Commands, ConfigCommands, ListingArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::render_forest;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;

    match &cli.command {
        Some(Commands::Build {
            listing,
            output,
            compact,
        }) => {
            let container = container(&project_dir)?;
            cmd_build(&container, listing, output.as_deref(), *compact)
        }
        Some(Commands::Tree { listing }) => cmd_tree(&container(&project_dir)?, listing),
        Some(Commands::Stats { listing }) => cmd_stats(&container(&project_dir)?, listing),
        Some(Commands::Config { command }) => cmd_config(command, &project_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "repotree", &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `repotree --help`".to_string(),
        )),
    }
}

fn resolve_project_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) if !dir.is_dir() => Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            dir.display()
        ))),
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e).into()),
    }
}

fn container(project_dir: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(Some(project_dir))?;
    Ok(ServiceContainer::new(settings))
}

fn options(args: &ListingArgs) -> BuildOptions {
    BuildOptions {
        extra_exclusions: args.exclude.clone(),
        no_default_exclusions: args.no_default_excludes,
        strict: args.strict,
    }
}

fn build(container: &ServiceContainer, args: &ListingArgs) -> CliResult<TreeOutput> {
    let result = container.tree_service.build(&args.input, &options(args))?;
    if result.truncated {
        output::warning("listing was truncated by its source, tree is incomplete");
    }
    Ok(result)
}

#[instrument(skip(container))]
fn cmd_build(
    container: &ServiceContainer,
    args: &ListingArgs,
    output_path: Option<&Path>,
    compact: bool,
) -> CliResult<()> {
    let result = build(container, args)?;
    let pretty = container.settings.output.pretty && !compact;

    match output_path {
        Some(path) => {
            container
                .tree_service
                .write_forest(&result.forest, path, pretty)?;
            output::success(&format!(
                "{} roots written to {}",
                result.summary.roots,
                path.display()
            ));
        }
        None => {
            let json = container.tree_service.to_json(&result.forest, pretty)?;
            output::info(&json);
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, args: &ListingArgs) -> CliResult<()> {
    let result = build(container, args)?;
    let rendered = render_forest(&result.forest, &container.settings.output.dir_suffix);
    debug!("rendered {} roots", result.summary.roots);
    // Trees already end in a newline
    print!("{rendered}");
    Ok(())
}

#[instrument(skip(container))]
fn cmd_stats(container: &ServiceContainer, args: &ListingArgs) -> CliResult<()> {
    let result = build(container, args)?;
    let summary = result.summary;
    output::header(&args.input.display());
    output::detail(&format!("entries:     {}", result.entries));
    output::detail(&format!("dropped:     {}", result.dropped()));
    output::detail(&format!("roots:       {}", summary.roots));
    output::detail(&format!("directories: {}", summary.directories));
    output::detail(&format!("files:       {}", summary.files));
    output::detail(&format!("depth:       {}", summary.depth));
    Ok(())
}

fn cmd_config(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(project_dir)
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_path_context("create config directory", parent)?;
            }
            std::fs::write(&path, Settings::template())
                .with_path_context("write config", &path)?;
            output::action("Created", &path.display());
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::warning("cannot determine global config directory"),
            }
            output::info(&format!(
                "local:  {}",
                local_config_path(project_dir).display()
            ));
        }
    }
    Ok(())
}
