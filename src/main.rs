//! Zellij plugin entry point.
//!
//! Built for `wasm32-wasip1` this registers the plugin from [`shim`]. A native
//! build is a small helper for checking theme configuration before loading
//! the plugin:
//!
//! ```text
//! zacman --list-themes
//! zacman --theme "Catppuccin Mocha"
//! zacman --theme-file ~/.config/zacman/theme.toml --preview
//! ```

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
mod shim;

#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(shim::State);

#[cfg(not(target_family = "wasm"))]
mod cli {
    use clap::Parser;
    use std::process::ExitCode;
    use zacman::{Config, PackageRecord, Theme};

    #[derive(Parser, Debug)]
    #[command(name = "zacman")]
    #[command(about = "Check zacman plugin themes from the command line")]
    pub struct Cli {
        /// List the built-in themes
        #[arg(long)]
        pub list_themes: bool,

        /// Built-in theme to check
        #[arg(long, value_name = "NAME")]
        pub theme: Option<String>,

        /// Custom TOML theme file to check
        #[arg(long, value_name = "PATH")]
        pub theme_file: Option<String>,

        /// Print a sample frame in the chosen theme
        #[arg(long)]
        pub preview: bool,
    }

    pub fn run(cli: &Cli) -> ExitCode {
        if cli.list_themes {
            for name in Theme::names() {
                println!("{name}");
            }
            return ExitCode::SUCCESS;
        }

        let config = Config {
            theme: cli.theme.clone(),
            theme_file: cli.theme_file.clone(),
            ..Config::default()
        };

        let theme = match config.load_theme() {
            Ok(theme) => theme,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        };

        if cli.preview {
            preview(&config, &theme);
        } else {
            println!("{}: ok", theme.name);
        }
        ExitCode::SUCCESS
    }

    fn preview(config: &Config, theme: &Theme) {
        let (mut state, _) = zacman::initialize(config);
        state.index = vec![
            PackageRecord::new("extra", "ripgrep", "14.1.0-1"),
            PackageRecord::new("extra", "ripgrep-all", "0.10.6-1"),
            PackageRecord::new("aur", "ripgrep-git", "14.1.0.r12-1"),
        ];
        state.query.set_raw("rip");
        state.remerge();

        print!("\u{1b}[2J");
        zacman::ui::render(&state, theme, 16, 100);
        println!("\u{1b}[17;1H");
    }
}

#[cfg(not(target_family = "wasm"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    let cli = cli::Cli::parse();
    cli::run(&cli)
}
