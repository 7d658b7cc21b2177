use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "taxon")]
#[command(about = "Build and query multi-parent category hierarchies")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.taxon)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Definition sources shared by every hierarchy command
#[derive(Args, Debug, Clone)]
pub struct Inputs {
    /// Definition files or directories (.toml / .json).
    /// Falls back to definitions.paths from the config file.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Fail on unknown base categories
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the hierarchy and export the descriptor catalog as JSON
    Build {
        #[command(flatten)]
        inputs: Inputs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Validate definitions and report warnings
    Check {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Test whether a category belongs to another (directly or transitively)
    Query {
        #[command(flatten)]
        inputs: Inputs,

        /// Category being classified
        #[arg(short, long)]
        category: String,

        /// Candidate ancestor category
        #[arg(long = "of", value_name = "CATEGORY")]
        of: String,
    },

    /// Show the descriptor of one category
    Show {
        #[command(flatten)]
        inputs: Inputs,

        /// Category id
        #[arg(short, long)]
        id: String,
    },

    /// List root categories (no base categories)
    Roots {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// List leaf categories (no subcategories)
    Leaves {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Print the hierarchy as a tree starting from the roots
    Tree {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// List category ids, optionally filtered by a glob pattern
    List {
        #[command(flatten)]
        inputs: Inputs,

        /// Glob pattern (e.g., "weapon.*")
        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// Normalize definitions (drop empty ids, self references, duplicate bases)
    Normalize {
        /// Definition file or directory
        input: PathBuf,

        /// Output file (default: overwrite input file, stdout for directories)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., build.strict)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., build.strict)
        key: String,

        /// Value to set (e.g., "true" or "data/a.toml,data/b")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_query() {
        let cli = Cli::try_parse_from([
            "taxon", "query", "defs.toml", "--category", "Dog", "--of", "Animal",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Query {
                inputs,
                category,
                of,
            }) => {
                assert_eq!(inputs.inputs, vec![PathBuf::from("defs.toml")]);
                assert_eq!(category, "Dog");
                assert_eq!(of, "Animal");
                assert!(!inputs.strict);
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn test_parse_show_takes_id_flag() {
        let cli = Cli::try_parse_from(["taxon", "show", "a.toml", "b", "--id", "Dog"]).unwrap();
        match cli.command {
            Some(Commands::Show { inputs, id }) => {
                assert_eq!(
                    inputs.inputs,
                    vec![PathBuf::from("a.toml"), PathBuf::from("b")]
                );
                assert_eq!(id, "Dog");
            }
            _ => panic!("expected show command"),
        }
    }
}
