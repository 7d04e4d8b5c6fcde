use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::variables::VariableScope;

pub const HISTORY_FILE: &str = ".rpncalc_history";

/// Converts infix arithmetic to postfix and evaluates it.
#[derive(Parser, Clone, PartialEq, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// How long variable definitions last.
    #[arg(long, value_enum, default_value_t = VariableScope::Session)]
    pub scope: VariableScope,

    /// Don't load or save the line history.
    #[arg(long)]
    pub no_history: bool,

    /// One of off, error, warn, info, debug, trace.
    #[arg(long = "log", env = "RPNCALC_LOG", default_value_t = LevelFilter::Warn,
          value_parser = parse_level)]
    pub log_level: LevelFilter,

    /// Evaluate this expression once instead of prompting.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

impl Config {
    pub fn history(&self) -> Option<PathBuf> {
        if self.no_history {
            return None;
        }
        dirs::home_dir().map(|home| home.join(HISTORY_FILE))
    }

    pub fn expression(&self) -> Option<String> {
        if self.words.is_empty() {
            None
        } else {
            Some(self.words.join(" "))
        }
    }
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
    value.parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level {:?}", value))
}
