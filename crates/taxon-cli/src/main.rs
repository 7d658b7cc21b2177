use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use taxon_core::config::Config;
use taxon_core::{BuildOptions, CategoryHierarchy, DefinitionSet, Result, TaxonError};

mod args;
mod tree;
use args::{Cli, Commands, ConfigAction, Inputs, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);
    let quiet = cli.quiet;

    let result = match cli.command {
        Some(Commands::Build {
            inputs,
            output,
            compact,
        }) => handle_build(&base_dir, &inputs, output.as_deref(), compact, quiet).map(success),
        Some(Commands::Check { inputs }) => handle_check(&base_dir, &inputs, quiet).map(success),
        Some(Commands::Query {
            inputs,
            category,
            of,
        }) => handle_query(&base_dir, &inputs, &category, &of),
        Some(Commands::Show { inputs, id }) => handle_show(&base_dir, &inputs, &id).map(success),
        Some(Commands::Roots { inputs }) => handle_roots(&base_dir, &inputs).map(success),
        Some(Commands::Leaves { inputs }) => handle_leaves(&base_dir, &inputs).map(success),
        Some(Commands::Tree { inputs }) => handle_tree(&base_dir, &inputs).map(success),
        Some(Commands::List { inputs, pattern }) => {
            handle_list(&base_dir, &inputs, pattern.as_deref()).map(success)
        }
        Some(Commands::Normalize { input, output }) => {
            handle_normalize(&input, output.as_deref(), quiet).map(success)
        }
        Some(Commands::Config { action }) => handle_config(action, &base_dir).map(success),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            Cli::command().print_help().ok();
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn success(_: ()) -> ExitCode {
    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "taxon", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("TAXON_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".taxon"))
        .unwrap_or_else(|| PathBuf::from(".taxon"))
}

/// Everything a hierarchy command needs
struct Loaded {
    config: Config,
    definitions: DefinitionSet,
    hierarchy: CategoryHierarchy,
}

fn resolve_inputs(config: &Config, inputs: &Inputs) -> Result<Vec<PathBuf>> {
    let paths = if inputs.inputs.is_empty() {
        config.definitions.paths.clone()
    } else {
        inputs.inputs.clone()
    };
    if paths.is_empty() {
        return Err(TaxonError::NoDefinitions);
    }
    Ok(paths)
}

fn build_options(config: &Config, inputs: &Inputs) -> BuildOptions {
    let mut options = config.build_options();
    options.strict_references |= inputs.strict;
    options
}

fn load(base_dir: &Path, inputs: &Inputs, options: Option<BuildOptions>) -> Result<Loaded> {
    let config = Config::load(base_dir)?;
    let paths = resolve_inputs(&config, inputs)?;
    let definitions = DefinitionSet::load_paths(&paths)?;
    debug!(
        files = paths.len(),
        definitions = definitions.len(),
        "loaded category definitions"
    );

    let options = options.unwrap_or_else(|| build_options(&config, inputs));
    let hierarchy = CategoryHierarchy::build_with(definitions.definitions(), options)?;

    Ok(Loaded {
        config,
        definitions,
        hierarchy,
    })
}

fn handle_build(
    base_dir: &Path,
    inputs: &Inputs,
    output: Option<&Path>,
    compact: bool,
    quiet: bool,
) -> Result<()> {
    let loaded = load(base_dir, inputs, None)?;

    let mut catalog = loaded.hierarchy.catalog()?.stamped();
    if loaded.config.export.fingerprint {
        catalog = catalog.with_fingerprint(loaded.definitions.fingerprint());
    }
    let pretty = loaded.config.export.pretty && !compact;

    match output {
        Some(path) => {
            catalog.save(path, pretty)?;
            if !quiet {
                eprintln!(
                    "{} {} categories -> {}",
                    "Built:".green(),
                    catalog.len(),
                    path.display()
                );
            }
        }
        None => println!("{}", catalog.to_json(pretty)?),
    }

    Ok(())
}

fn handle_check(base_dir: &Path, inputs: &Inputs, quiet: bool) -> Result<()> {
    let config = Config::load(base_dir)?;
    let mut options = build_options(&config, inputs);
    // Warnings are printed below.
    options.warn_unresolved = false;

    let loaded = load(base_dir, inputs, Some(options))?;
    let hierarchy = &loaded.hierarchy;

    if !quiet {
        println!();
        println!("{} {}", "Categories:".cyan(), hierarchy.len());
        println!("{} {}", "Roots:".cyan(), hierarchy.root_ids().join(", "));
        println!("{} {}", "Leaves:".cyan(), hierarchy.leaf_ids().len());
        println!();
    }

    if hierarchy.warnings().is_empty() {
        if !quiet {
            println!("{} no issues found", "OK:".green());
        }
    } else {
        for warning in hierarchy.warnings() {
            println!("{} {}", "[WARN]".yellow().bold(), warning);
        }
        if !quiet {
            println!();
            println!(
                "{} {} warning(s)",
                "Done:".yellow(),
                hierarchy.warnings().len()
            );
        }
    }

    Ok(())
}

fn handle_query(base_dir: &Path, inputs: &Inputs, category: &str, of: &str) -> Result<ExitCode> {
    let loaded = load(base_dir, inputs, None)?;
    let hierarchy = &loaded.hierarchy;

    if hierarchy.get(category).is_none() {
        return Err(TaxonError::CategoryNotFound {
            id: category.to_string(),
        });
    }

    if hierarchy.is_category_of(category, of) {
        println!("{}", "true".green());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}", "false".red());
        Ok(ExitCode::FAILURE)
    }
}

fn handle_show(base_dir: &Path, inputs: &Inputs, id: &str) -> Result<()> {
    let loaded = load(base_dir, inputs, None)?;
    let node = loaded
        .hierarchy
        .get(id)
        .ok_or_else(|| TaxonError::CategoryNotFound { id: id.to_string() })?;

    println!("{}", serde_json::to_string_pretty(node.descriptor())?);
    Ok(())
}

fn handle_roots(base_dir: &Path, inputs: &Inputs) -> Result<()> {
    let loaded = load(base_dir, inputs, None)?;
    for id in loaded.hierarchy.root_ids() {
        println!("{}", id);
    }
    Ok(())
}

fn handle_leaves(base_dir: &Path, inputs: &Inputs) -> Result<()> {
    let loaded = load(base_dir, inputs, None)?;
    for id in loaded.hierarchy.leaf_ids() {
        println!("{}", id);
    }
    Ok(())
}

fn handle_tree(base_dir: &Path, inputs: &Inputs) -> Result<()> {
    let loaded = load(base_dir, inputs, None)?;
    print!("{}", tree::render(&loaded.hierarchy));
    Ok(())
}

fn handle_list(base_dir: &Path, inputs: &Inputs, pattern: Option<&str>) -> Result<()> {
    let loaded = load(base_dir, inputs, None)?;
    let ids = match pattern {
        Some(pattern) => loaded.hierarchy.matching(pattern)?,
        None => loaded.hierarchy.nodes().iter().map(|n| n.id()).collect(),
    };
    for id in ids {
        println!("{}", id);
    }
    Ok(())
}

fn handle_normalize(input: &Path, output: Option<&Path>, quiet: bool) -> Result<()> {
    let mut definitions = if input.is_dir() {
        DefinitionSet::load_dir(input)?
    } else {
        DefinitionSet::load(input)?
    };
    let removed = definitions.optimize();

    let target = match output {
        Some(path) => Some(path.to_path_buf()),
        None if input.is_file() => Some(input.to_path_buf()),
        None => None,
    };

    match target {
        Some(path) => {
            definitions.save(&path)?;
            if !quiet {
                eprintln!(
                    "{} {} definitions -> {} ({} removed)",
                    "Normalized:".green(),
                    definitions.len(),
                    path.display(),
                    removed
                );
            }
        }
        None => print!("{}", definitions.to_toml()?),
    }

    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(TaxonError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
