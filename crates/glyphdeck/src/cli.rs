use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::app::LaunchOptions;

#[derive(Parser)]
#[command(name = "glyphdeck")]
#[command(author, version, about)]
#[command(long_about = "A markdown slide deck viewer.\n\n\
    Each slide scrolls on its own, with a glyph-drawn indicator beside it.\n\n\
    Examples:\n  \
    glyphdeck talk.md              Present (fullscreen)\n  \
    glyphdeck talk.md --windowed   Present in a window\n  \
    glyphdeck talk.md --slide 4    Open on slide 4\n  \
    glyphdeck talk.md --live       Reload on every save")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Markdown file to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long)]
    pub slide: Option<usize>,

    /// Color theme (light or dark), overrides frontmatter and config
    #[arg(long)]
    pub theme: Option<String>,

    /// Delimiter that splits slide titles into navigation categories
    #[arg(long)]
    pub title_delim: Option<String>,

    /// Syntax highlighting theme for code blocks (e.g. "Solarized (dark)")
    #[arg(short = 's', long, visible_alias = "style")]
    pub code_style: Option<String>,

    /// Reload the deck when the file changes
    #[arg(long, visible_alias = "live-reload")]
    pub live: bool,

    /// Present the whole file as one slide
    #[arg(long)]
    pub single: bool,

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
        /// Configuration key (e.g. defaults.theme, scrollbar.gutter.fill)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::print_version();
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::app::run(
                        file,
                        LaunchOptions {
                            windowed: self.windowed,
                            start_slide: self.slide,
                            theme: self.theme,
                            title_delim: self.title_delim,
                            code_style: self.code_style,
                            live: self.live,
                            single: self.single,
                        },
                    )
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
