use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

mod terminal;
mod validate;

use clap::ArgAction;
use lessonlint::{CONFIG_FILE_NAME, Check, ModuleTree, Property};
use terminal::Colorize;
use tracing::instrument;
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the curriculum module
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Configuration file (defaults to `.lesson-lint.toml` in the module root)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table", global = true)]
    output: OutputFormat,

    /// Print only the final outcome
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<ExitCode> {
        Self::setup_logging(self.verbose);

        let checks = match self.command.clone().unwrap_or(Command::All) {
            Command::Structure => vec![Check::Structure],
            Command::Content => vec![Check::Content],
            Command::Exercises => vec![Check::Exercises],
            Command::Navigation => vec![Check::Navigation],
            Command::All => Check::ALL.to_vec(),
            Command::Properties => {
                Self::list_properties(self.output)?;
                return Ok(ExitCode::SUCCESS);
            }
            Command::Config(command) => {
                command.run(&self.config_path(), self.config.is_some())?;
                return Ok(ExitCode::SUCCESS);
            }
        };

        let config = self.load_config()?;
        let tree = ModuleTree::open(&self.root, config)?;
        Validate::new(checks, self.output, self.quiet).run(&tree)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }

    fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.root.join(CONFIG_FILE_NAME))
    }

    /// An explicit `--config` must load; the implicit file is optional.
    fn load_config(&self) -> anyhow::Result<lessonlint::Config> {
        match &self.config {
            Some(path) => Ok(lessonlint::Config::load(path)?),
            None => Ok(lessonlint::Config::load_or_default(&self.root)),
        }
    }

    fn list_properties(output: OutputFormat) -> anyhow::Result<()> {
        if let OutputFormat::Json = output {
            use serde_json::json;

            let properties: Vec<_> = Property::ALL
                .iter()
                .map(|property| {
                    json!({
                        "property": property,
                        "title": property.title(),
                        "check": property.check(),
                        "requirements": property.requirements(),
                        "advisory": property.is_advisory(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&properties)?);
            return Ok(());
        }

        for check in Check::ALL {
            println!("{}", check.to_string().info());
            for property in check.properties() {
                let advisory = if property.is_advisory() {
                    " (advisory)".dim()
                } else {
                    String::new()
                };
                println!(
                    "  {:<12} {}{advisory}",
                    property.requirements().join(", "),
                    property.title()
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, clap::Parser)]
pub enum Command {
    /// Check lesson naming and bilingual file pairing
    Structure,

    /// Check heading parity, cross-language links and required sections
    Content,

    /// Check exercise instructions, lesson references and criteria
    Exercises,

    /// Check previous/next/home links between lessons
    Navigation,

    /// Run every check (default)
    All,

    /// List every property with the requirements it validates
    Properties,

    /// Show or create the configuration file
    Config(Config),
}

#[derive(Debug, Clone, clap::Parser)]
pub struct Config {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, Clone, clap::Parser)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Config {
    #[instrument]
    fn run(self, path: &Path, explicit: bool) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => {
                let (config, source) = if path.exists() {
                    (lessonlint::Config::load(path)?, path.display().to_string())
                } else if explicit {
                    anyhow::bail!("Config file not found: {}", path.display());
                } else {
                    (lessonlint::Config::default(), "defaults".to_string())
                };

                println!("Configuration {}:", format!("({source})").dim());
                println!("  english_document: {}", config.english_document());
                println!("  translated_document: {}", config.translated_document());
                println!("  exercises_dir: {}", config.exercises_dir());
                println!("  non_lesson_dirs: {:?}", config.non_lesson_dirs);
                println!("  ignored_dirs: {:?}", config.ignored_dirs);
                println!(
                    "  max_depth: {}",
                    config
                        .max_depth
                        .map_or_else(|| "unlimited".dim(), |depth| depth.to_string())
                );
                println!("  ignore_fenced_code: {}", config.ignore_fenced_code);
                println!("  require_module_home: {}", config.require_module_home);
            }
            ConfigCommand::Init { force } => {
                if path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                lessonlint::Config::default().save(path)?;
                println!("{}", format!("Wrote {}", path.display()).success());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn no_subcommand_runs_everything() {
        let cli = Cli::try_parse_from(["lesson-lint"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli =
            Cli::try_parse_from(["lesson-lint", "navigation", "-r", "module", "--output", "json"])
                .unwrap();
        assert!(matches!(cli.command, Some(Command::Navigation)));
        assert_eq!(cli.root, PathBuf::from("module"));
        assert!(matches!(cli.output, OutputFormat::Json));
    }

    #[test]
    fn explicit_config_must_exist() {
        let tmp = TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "lesson-lint",
            "--config",
            tmp.path().join("missing.toml").to_str().unwrap(),
        ])
        .unwrap();

        assert!(cli.load_config().is_err());
    }

    #[test]
    fn implicit_config_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["lesson-lint", "-r", tmp.path().to_str().unwrap()]).unwrap();

        assert_eq!(cli.load_config().unwrap(), lessonlint::Config::default());
    }

    #[test]
    fn config_init_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        let init = |force| Config {
            command: ConfigCommand::Init { force },
        };

        init(false).run(&path, false).unwrap();
        assert_eq!(
            lessonlint::Config::load(&path).unwrap(),
            lessonlint::Config::default()
        );
        assert!(init(false).run(&path, false).is_err());
        init(true).run(&path, false).unwrap();
    }
}
