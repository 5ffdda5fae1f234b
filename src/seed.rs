//! Seed resolution
//!
//! The seed is the only source of randomness for a run. It is resolved once,
//! logged before any selection happens, and never changes afterwards. Re-running
//! with the logged value reproduces the exact same selection.

use serde::Serialize;
use std::fmt;

/// 64-bit run seed
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Seed(u64);

impl Seed {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Parse a seed from user-supplied text
    ///
    /// Accepts unsigned decimal, and signed decimal reinterpreted bit-for-bit
    /// (so `-1` becomes `u64::MAX`). Anything else is treated as "no seed":
    /// a warning is logged and `None` is returned so the caller falls back to
    /// a generated seed.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Ok(value) = trimmed.parse::<u64>() {
            return Some(Self(value));
        }

        if let Ok(value) = trimmed.parse::<i64>() {
            return Some(Self::from(value));
        }

        tracing::warn!(
            raw_seed = %raw,
            "Ignoring malformed seed, a fresh seed will be generated"
        );
        None
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Self(value as u64)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the resolved seed came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    Explicit,
    Generated,
}

impl SeedSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Generated => "generated",
        }
    }
}

/// Resolve the run seed, generating one from OS-seeded entropy when absent
pub fn resolve_seed(explicit: Option<Seed>) -> Seed {
    resolve_seed_with(explicit, rand::random::<u64>)
}

/// Resolve the run seed using `generate` as the entropy source
///
/// `generate` is called at most once, and only when no explicit seed is given.
pub fn resolve_seed_with<F>(explicit: Option<Seed>, generate: F) -> Seed
where
    F: FnOnce() -> u64,
{
    let (seed, source) = match explicit {
        Some(seed) => (seed, SeedSource::Explicit),
        None => (Seed(generate()), SeedSource::Generated),
    };

    // A generated seed cannot be recovered later, so it is logged at warn to
    // survive quieter log levels.
    match source {
        SeedSource::Explicit => tracing::info!(
            seed = seed.value(),
            source = source.as_str(),
            "Random test filter seed is {} (re-run with this seed to reproduce the selection)",
            seed
        ),
        SeedSource::Generated => tracing::warn!(
            seed = seed.value(),
            source = source.as_str(),
            "Random test filter seed is {} (re-run with this seed to reproduce the selection)",
            seed
        ),
    }

    seed
}
