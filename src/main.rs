//! Entry point for the **aerolaunch** command.
//!
//! One subcommand per launcher entry point.  Every subcommand takes an
//! optional argument; when it is missing or empty the argument is read from
//! stdin instead.  List subcommands print a JSON result document; actions
//! print their error (if any) and exit with status 1.

use aerolaunch::aerospace::app_path::SpotlightLocator;
use aerolaunch::aerospace::wm::AerospaceWm;
use aerolaunch::cache::SnapshotCache;
use aerolaunch::launcher::{Launcher, LauncherError};
use aerolaunch::settings::Settings;
use aerolaunch::shortcut::script::Osascript;
use aerolaunch::snapshot::SnapshotFetcher;
use clap::{Parser, Subcommand};
use log::error;
use std::io::Read;

#[derive(Debug, Parser)]
#[command(name = "aerolaunch", version, about = "Launcher backend for AeroSpace")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List windows ranked by QUERY
    Windows {
        query: Option<String>,
        /// `focused` or `all`; overrides the environment
        #[arg(long)]
        scope: Option<String>,
    },
    /// Browse workspaces, or the windows of one workspace
    Workspaces { query: Option<String> },
    /// Layout actions for the focused window
    FocusedWindow { query: Option<String> },
    /// Search keybindings from the AeroSpace config
    Shortcuts { query: Option<String> },
    /// Entry that opens the AeroSpace config file
    Config,
    /// Focus the window with the given id
    Focus { window_id: Option<String> },
    /// Apply a layout to the focused window
    SetLayout { layout: Option<String> },
    /// Synthesize a shortcut token such as `alt-shift-j`
    Execute { token: Option<String> },
    /// Open a URL or path
    Open { target: Option<String> },
}

/// The argument if given and non-empty, otherwise trimmed stdin.
fn arg_or_stdin(arg: Option<String>) -> String {
    match arg {
        Some(a) if !a.is_empty() => a,
        _ => {
            let mut input = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut input) {
                error!("failed to read stdin: {}", e);
            }
            input.trim().to_string()
        }
    }
}

//  Main

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let settings = Settings::from_env();
    let cache = settings.cache_dir.clone().map(SnapshotCache::new);
    let fetcher = SnapshotFetcher::new(AerospaceWm::new(), SpotlightLocator::new(), cache);
    let mut launcher = Launcher::new(fetcher, Osascript, settings);

    let result: Result<(), LauncherError> = match cli.command {
        Command::Windows { query, scope } => {
            let query = arg_or_stdin(query);
            println!("{}", launcher.windows(&query, scope.as_deref()).to_json());
            Ok(())
        }
        Command::Workspaces { query } => {
            println!("{}", launcher.workspaces(&arg_or_stdin(query)).to_json());
            Ok(())
        }
        Command::FocusedWindow { query } => {
            println!("{}", launcher.focused_window(&arg_or_stdin(query)).to_json());
            Ok(())
        }
        Command::Shortcuts { query } => {
            println!("{}", launcher.shortcuts(&arg_or_stdin(query)).to_json());
            Ok(())
        }
        Command::Config => {
            println!("{}", launcher.config_entry().to_json());
            Ok(())
        }
        Command::Focus { window_id } => launcher.focus(&arg_or_stdin(window_id)),
        Command::SetLayout { layout } => launcher.set_layout(&arg_or_stdin(layout)),
        Command::Execute { token } => launcher.execute(&arg_or_stdin(token)).map(|output| {
            if let Some(output) = output {
                println!("{}", output);
            }
        }),
        Command::Open { target } => {
            aerolaunch::launcher::open(&arg_or_stdin(target));
            Ok(())
        }
    };

    if let Err(e) = result {
        println!("{}", e);
        std::process::exit(1);
    }
}
