use std::env;

use serde::{Deserialize, Serialize};

/// History size setting. `None` keeps no history and clears any stored
/// entries on the next save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HistoryLimit {
    #[default]
    None,
    Keep(usize),
}

impl HistoryLimit {
    pub fn from_env() -> Self {
        match env::var("YAKU_HISTORY_LIMIT") {
            Ok(v) => Self::parse(&v),
            Err(_) => HistoryLimit::None,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().parse::<usize>() {
            Ok(n) if n > 0 => HistoryLimit::Keep(n),
            _ => HistoryLimit::None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, HistoryLimit::None)
    }
}
