//! Tab resolution by title substring.

use tabrelay_config::MappingConfig;
use tabrelay_protocols::{TabInfo, TabRole};

use crate::error::SessionError;

const TITLE_DISPLAY_LEN: usize = 40;

/// How many open tabs matched one filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabMatch {
    Unique(TabInfo),
    NotFound { filter: String },
    Multiple { filter: String, count: usize },
}

impl TabMatch {
    pub fn is_unique(&self) -> bool {
        matches!(self, TabMatch::Unique(_))
    }

    pub fn tab(&self) -> Option<&TabInfo> {
        match self {
            TabMatch::Unique(tab) => Some(tab),
            _ => None,
        }
    }

    /// The matched tab, or the distinguishable error for this role.
    pub fn into_tab(self, role: TabRole) -> Result<TabInfo, SessionError> {
        match self {
            TabMatch::Unique(tab) => Ok(tab),
            TabMatch::NotFound { filter } => Err(SessionError::TabNotFound { role, filter }),
            TabMatch::Multiple { filter, count } => Err(SessionError::MultipleTabsFound {
                role,
                filter,
                count,
            }),
        }
    }

    /// One-line status for display.
    pub fn status_message(&self) -> String {
        match self {
            TabMatch::Unique(tab) => format!("Found: {}", truncate_title(&tab.title)),
            TabMatch::NotFound { filter } => format!("No tabs found matching \"{}\"", filter),
            TabMatch::Multiple { count, .. } => {
                format!("{} tabs found - please close duplicates", count)
            }
        }
    }
}

/// Source and destination matches for one mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabResolution {
    pub source: TabMatch,
    pub dest: TabMatch,
}

impl TabResolution {
    pub fn get(&self, role: TabRole) -> &TabMatch {
        match role {
            TabRole::Source => &self.source,
            TabRole::Destination => &self.dest,
        }
    }

    /// Copy is only allowed with exactly one tab on each side.
    pub fn can_copy(&self) -> bool {
        self.source.is_unique() && self.dest.is_unique()
    }
}

pub struct TabResolver;

impl TabResolver {
    pub fn resolve(config: &MappingConfig, tabs: &[TabInfo]) -> TabResolution {
        TabResolution {
            source: Self::match_filter(config.source_tab_filter(), tabs),
            dest: Self::match_filter(config.dest_tab_filter(), tabs),
        }
    }

    /// Case-insensitive substring match of `filter` against tab titles.
    pub fn match_filter(filter: &str, tabs: &[TabInfo]) -> TabMatch {
        let needle = filter.to_lowercase();
        let mut matches: Vec<&TabInfo> = tabs
            .iter()
            .filter(|t| !t.title.is_empty() && t.title.to_lowercase().contains(&needle))
            .collect();

        match matches.len() {
            0 => TabMatch::NotFound {
                filter: filter.to_string(),
            },
            1 => TabMatch::Unique(matches.remove(0).clone()),
            count => TabMatch::Multiple {
                filter: filter.to_string(),
                count,
            },
        }
    }
}

/// Shorten a tab title to 40 characters, appending `...` when cut.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_DISPLAY_LEN {
        return title.to_string();
    }
    let head: String = title.chars().take(TITLE_DISPLAY_LEN).collect();
    format!("{}...", head)
}
