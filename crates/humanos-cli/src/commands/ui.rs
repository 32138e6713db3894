use clap::{Subcommand, ValueEnum};

use humanos_core::{Layout, Theme};

use super::{open_session, print_outcome, CliResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Standard,
    Focus,
}

#[derive(Subcommand)]
pub enum UiAction {
    /// Set the dashboard layout
    Layout {
        #[arg(value_enum)]
        layout: LayoutArg,
    },
    /// Set the color theme
    Theme {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

pub fn run(action: UiAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        UiAction::Layout { layout } => {
            let layout = match layout {
                LayoutArg::Vertical => Layout::Vertical,
                LayoutArg::Horizontal => Layout::Horizontal,
            };
            let event = session.apply(|engine, _| engine.set_layout(layout))?;
            print_outcome(event)?;
        }
        UiAction::Theme { theme } => {
            let theme = match theme {
                ThemeArg::Standard => Theme::Standard,
                ThemeArg::Focus => Theme::Focus,
            };
            let event = session.apply(|engine, _| engine.set_theme(theme))?;
            print_outcome(event)?;
        }
    }
    session.flush()?;
    Ok(())
}
