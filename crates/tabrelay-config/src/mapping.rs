//! Field mapping text format.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use tabrelay_protocols::{FieldNumber, TabRole};

use crate::error::ConfigError;

const SOURCE_TAB_TOKEN: &str = "SOURCE_TAB_NAME:";
const DEST_TAB_TOKEN: &str = "DESTINATION_TAB_NAME:";
const MAPPING_HEADER: &str = "SOURCE -> DESTINATION";
const ARROW: &str = "->";

/// One `source -> dest` line of a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Correspondence {
    pub source: FieldNumber,
    pub dest: FieldNumber,
}

impl Correspondence {
    pub fn new(source: FieldNumber, dest: FieldNumber) -> Self {
        Self { source, dest }
    }
}

impl fmt::Display for Correspondence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.source, ARROW, self.dest)
    }
}

/// A fully resolved field mapping.
///
/// Only [`MappingParser`] builds these, so both filters are non-empty and
/// there is at least one correspondence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    source_tab_filter: String,
    dest_tab_filter: String,
    correspondences: Vec<Correspondence>,
}

impl MappingConfig {
    pub fn source_tab_filter(&self) -> &str {
        &self.source_tab_filter
    }

    pub fn dest_tab_filter(&self) -> &str {
        &self.dest_tab_filter
    }

    /// Filter for the given role.
    pub fn tab_filter(&self, role: TabRole) -> &str {
        match role {
            TabRole::Source => &self.source_tab_filter,
            TabRole::Destination => &self.dest_tab_filter,
        }
    }

    /// Correspondences in declared order.
    pub fn correspondences(&self) -> &[Correspondence] {
        &self.correspondences
    }

    /// Source field numbers to request, duplicates collapsed, first-seen order.
    pub fn requested_source_fields(&self) -> Vec<FieldNumber> {
        let mut seen = HashSet::new();
        self.correspondences
            .iter()
            .map(|c| c.source)
            .filter(|n| seen.insert(*n))
            .collect()
    }

    /// Destination numbers targeted by more than one correspondence.
    pub fn duplicate_destinations(&self) -> Vec<FieldNumber> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for c in &self.correspondences {
            if !seen.insert(c.dest) && !duplicates.contains(&c.dest) {
                duplicates.push(c.dest);
            }
        }
        duplicates
    }

    /// Render the canonical text form.
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "{} {}\n{} {}\n\n{}\n",
            SOURCE_TAB_TOKEN, self.source_tab_filter, DEST_TAB_TOKEN, self.dest_tab_filter, MAPPING_HEADER
        );
        for c in &self.correspondences {
            out.push_str(&c.to_string());
            out.push('\n');
        }
        out
    }
}

impl FromStr for MappingConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MappingParser::parse(s)
    }
}

/// Parser for the mapping text format.
pub struct MappingParser;

impl MappingParser {
    /// Parse mapping text into a [`MappingConfig`].
    ///
    /// Malformed `a -> b` lines are skipped. The only failures are a missing
    /// tab name and an empty mapping section.
    pub fn parse(text: &str) -> Result<MappingConfig, ConfigError> {
        let mut source_tab_filter = String::new();
        let mut dest_tab_filter = String::new();
        let mut correspondences = Vec::new();
        let mut in_mapping_section = false;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if line.contains(SOURCE_TAB_TOKEN) {
                source_tab_filter = Self::value_after_colon(line);
            } else if line.contains(DEST_TAB_TOKEN) {
                dest_tab_filter = Self::value_after_colon(line);
            } else if line.contains(MAPPING_HEADER) {
                in_mapping_section = true;
            } else if in_mapping_section && line.contains(ARROW) {
                match Self::parse_correspondence(line) {
                    Some(c) => correspondences.push(c),
                    None => debug!(line = index + 1, text = line, "Skipping malformed mapping line"),
                }
            }
        }

        if source_tab_filter.is_empty() {
            return Err(ConfigError::MissingTabName {
                role: TabRole::Source,
            });
        }
        if dest_tab_filter.is_empty() {
            return Err(ConfigError::MissingTabName {
                role: TabRole::Destination,
            });
        }
        if correspondences.is_empty() {
            return Err(ConfigError::NoCorrespondences);
        }

        Ok(MappingConfig {
            source_tab_filter,
            dest_tab_filter,
            correspondences,
        })
    }

    fn value_after_colon(line: &str) -> String {
        line.split_once(':')
            .map(|(_, value)| value.trim().to_string())
            .unwrap_or_default()
    }

    fn parse_correspondence(line: &str) -> Option<Correspondence> {
        let (source, dest) = line.split_once(ARROW)?;
        Some(Correspondence {
            source: Self::parse_field_number(source)?,
            dest: Self::parse_field_number(dest)?,
        })
    }

    fn parse_field_number(s: &str) -> Option<FieldNumber> {
        s.trim().parse::<FieldNumber>().ok().filter(|n| *n > 0)
    }
}

#[cfg(test)]
#[path = "mapping_tests.rs"]
mod tests;
