use clap::{Parser, Subcommand};
use relm4::prelude::*;
use showcase::config;
use showcase::gui::Section;
use showcase::gui::app::AppModel;
use showcase::sys::remote::{self, RemoteCommand};
use showcase::sys::runtime;

#[derive(Parser, Debug)]
#[command(name = "showcase", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Rotate the project carousel forward
    Next,
    /// Rotate the project carousel backward
    Prev,
    /// Rotate to a project; negative indices count from the end
    Goto {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
    /// Close the open about card
    Close,
    /// Toggle between the light and dark theme
    Theme,
    /// Switch to a page (home, about, skills, projects)
    Show { section: Section },
    /// Write the default config file and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let command = match cli.command {
        None => return run_app(),
        Some(Commands::InitConfig) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            return Ok(());
        }
        Some(Commands::Next) => RemoteCommand::Next,
        Some(Commands::Prev) => RemoteCommand::Prev,
        Some(Commands::Goto { index }) => RemoteCommand::GoTo(index),
        Some(Commands::Close) => RemoteCommand::Close,
        Some(Commands::Theme) => RemoteCommand::Theme,
        Some(Commands::Show { section }) => RemoteCommand::Show(section),
    };
    remote::send_command(command)
}

fn run_app() -> anyhow::Result<()> {
    let config = config::load_or_setup();
    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx)?;

    let app = RelmApp::new("org.showcase.app");
    app.run::<AppModel>((config, rx));
    Ok(())
}
