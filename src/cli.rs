//! Command-line interface for the random test filter
//!
//! The binary plays the part of a minimal test host: it reads a discovered
//! universe (one identifier per line), resolves the filter once, and asks the
//! predicate about every candidate in discovery order.

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::filter::{ResolvedFilter, TestFilter};
use crate::grouping::{GroupingStrategy, default_separator};
use crate::model::{GroupKey, TestIdentifier};
use crate::seed::Seed;
use crate::selection::{Limit, SelectionSummary};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Deterministic, seed-driven selection of a random subset of tests
#[derive(Parser)]
#[command(name = "random-test-filter")]
#[command(version)]
#[command(about = "Deterministic, seed-driven selection of a random subset of tests")]
#[command(
    long_about = "Reads discovered test identifiers (one per line) and prints the ones to run. \
    At most --limit tests are kept per group; the same --seed and the same input always \
    produce the same selection."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the selection; generated and logged when absent or malformed
    #[arg(long, env = "RANDOM_TEST_FILTER_SEED")]
    pub seed: Option<String>,

    /// Maximum number of tests kept per group; all tests run when absent
    #[arg(long, env = "RANDOM_TEST_FILTER_LIMIT", allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// How tests are grouped before the limit is applied
    #[arg(long, value_enum)]
    pub grouping: Option<GroupingArg>,

    /// Separator between container and test name (container grouping)
    #[arg(long)]
    pub separator: Option<String>,

    /// File with discovered test identifiers (reads stdin if not specified)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupingArg {
    Container,
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Included identifiers, one per line
    Text,
    /// Seed, limit, summary and per-group selections
    Json,
}

impl Cli {
    /// Apply flag and environment overrides to a loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        config
            .filter
            .apply_overrides(self.seed.as_deref(), self.limit);
        if let Some(grouping) = self.grouping_override(&config.grouping) {
            config.grouping = grouping;
        }
    }

    fn grouping_override(&self, current: &GroupingStrategy) -> Option<GroupingStrategy> {
        let current_separator = match current {
            GroupingStrategy::Container { separator } => separator.clone(),
            GroupingStrategy::Global => default_separator(),
        };
        match (self.grouping, &self.separator) {
            (Some(GroupingArg::Global), _) => Some(GroupingStrategy::Global),
            (Some(GroupingArg::Container), separator) => Some(GroupingStrategy::Container {
                separator: separator.clone().unwrap_or(current_separator),
            }),
            (None, Some(separator)) => Some(GroupingStrategy::Container {
                separator: separator.clone(),
            }),
            (None, None) => None,
        }
    }
}

/// Parse a discovered universe: one identifier per line
///
/// Surrounding whitespace is trimmed; blank lines and `#` comments are skipped.
pub fn parse_universe<R: BufRead>(reader: R, source: &str) -> AppResult<Vec<TestIdentifier>> {
    let mut universe = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|source_err| AppError::InputRead {
            path: source.to_string(),
            source: source_err,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        universe.push(TestIdentifier::from(trimmed));
    }
    Ok(universe)
}

/// Read the universe from `input`, or stdin when `None`
pub fn load_universe(input: Option<&Path>) -> AppResult<Vec<TestIdentifier>> {
    match input {
        Some(path) => {
            let display = path.display().to_string();
            let file = std::fs::File::open(path).map_err(|source| AppError::InputRead {
                path: display.clone(),
                source,
            })?;
            parse_universe(std::io::BufReader::new(file), &display)
        }
        None => parse_universe(std::io::stdin().lock(), "<stdin>"),
    }
}

#[derive(Debug, Serialize)]
struct GroupReport<'a> {
    group: &'a GroupKey,
    discovered: usize,
    selected: &'a [TestIdentifier],
}

#[derive(Debug, Serialize)]
struct SelectionReport<'a> {
    seed: Seed,
    limit: Limit,
    summary: SelectionSummary,
    included: Vec<&'a TestIdentifier>,
    groups: Vec<GroupReport<'a>>,
}

/// Ask the filter about every candidate and render the answer
///
/// Candidates are queried in discovery order, the way a host iterates them.
pub fn render(
    filter: &ResolvedFilter,
    universe: &[TestIdentifier],
    format: OutputFormat,
) -> AppResult<String> {
    let included: Vec<&TestIdentifier> = universe.iter().filter(|id| filter.include(id)).collect();

    match format {
        OutputFormat::Text => Ok(included
            .iter()
            .map(|id| format!("{}\n", id))
            .collect::<String>()),
        OutputFormat::Json => {
            let report = SelectionReport {
                seed: filter.seed(),
                limit: filter.limit(),
                summary: filter.summary(),
                included,
                groups: filter
                    .selection()
                    .iter()
                    .map(|(key, group)| GroupReport {
                        group: key,
                        discovered: group.discovered(),
                        selected: group.retained(),
                    })
                    .collect(),
            };
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# Random Test Filter Configuration
# ================================
#
# Every section is optional. Command-line flags and the environment variables
# RANDOM_TEST_FILTER_SEED / RANDOM_TEST_FILTER_LIMIT take precedence.

# ─────────────────────────────────────────────────────────────────────────────
# FILTER
# ─────────────────────────────────────────────────────────────────────────────

[filter]
# Maximum number of tests to run per group. Remove to run every test.
# 0 excludes every test; negative values are rejected.
limit = 2

# Seed for the random selection. When absent (or not a number) a seed is
# generated and logged at startup; pass it back to reproduce a run exactly.
# Values above 9223372036854775807 must be quoted.
# seed = 42

# ─────────────────────────────────────────────────────────────────────────────
# GROUPING
# ─────────────────────────────────────────────────────────────────────────────
#
# strategy:
#   - "container": group by the text before the last separator
#                  (crate::module::test_name -> crate::module)
#   - "global":    one group for the whole suite

[grouping]
strategy = "container"
separator = "::"

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
# RUST_LOG overrides this when set.
log_level = "info"
"#
}
