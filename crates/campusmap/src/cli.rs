use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "campusmap")]
#[command(author, version, about)]
#[command(long_about = "An interactive campus map.\n\n\
    Pick up to six courses and see the classrooms connected in the order you chose.\n\n\
    Examples:\n  \
    campusmap campus.yaml                         Open the map\n  \
    campusmap check campus.yaml                   Validate a campus file\n  \
    campusmap route campus.yaml -c CS101 -c MA201 Print the path between two courses")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Campus YAML file to open (falls back to `defaults.campus` from config)
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Open fullscreen instead of in a window
    #[arg(long, global = false)]
    pub fullscreen: bool,

    /// Color theme for the map
    #[arg(long, value_enum, global = false)]
    pub theme: Option<ThemeName>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a campus file and print a summary
    Check {
        /// Campus YAML file
        file: PathBuf,
    },

    /// List every course offering in a campus file
    Courses {
        /// Campus YAML file
        file: PathBuf,
    },

    /// Print the path through the classrooms of the given courses
    Route {
        /// Campus YAML file
        file: PathBuf,

        /// Course to visit, in order (repeatable, at most six)
        #[arg(short, long = "course", value_name = "ID", required = true)]
        courses: Vec<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.windowed, defaults.campus)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeName {
    Light,
    Dark,
}

impl ThemeName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Cli {
    /// Tracing filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Check { file }) => crate::commands::check::run(&file),
            Some(Commands::Courses { file }) => crate::commands::courses::run(&file),
            Some(Commands::Route {
                file,
                courses,
                json,
            }) => crate::commands::route::run(&file, &courses, json),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("campusmap {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                let config = crate::config::Config::load_or_default();
                let file = self
                    .file
                    .or_else(|| config.campus().map(|p| p.to_path_buf()));
                if let Some(file) = file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    let theme = self
                        .theme
                        .map(ThemeName::as_str)
                        .unwrap_or_else(|| config.theme());
                    let windowed = !self.fullscreen && config.windowed();
                    crate::app::run(file, windowed, theme)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        let cli = Cli::parse_from(["campusmap", "-vv", "campus.yaml"]);
        assert_eq!(cli.log_level(), "trace");
        let cli = Cli::parse_from(["campusmap", "-q", "-v", "campus.yaml"]);
        assert_eq!(cli.log_level(), "error");
        let cli = Cli::parse_from(["campusmap", "campus.yaml"]);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn route_collects_courses_in_order() {
        let cli = Cli::parse_from([
            "campusmap", "route", "c.yaml", "-c", "CS101", "--course", "MA201",
        ]);
        match cli.command {
            Some(Commands::Route { courses, json, .. }) => {
                assert_eq!(courses, vec!["CS101", "MA201"]);
                assert!(!json);
            }
            _ => panic!("expected route command"),
        }
    }

    #[test]
    fn route_requires_a_course() {
        assert!(Cli::try_parse_from(["campusmap", "route", "c.yaml"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
