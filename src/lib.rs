//! Random test filter - deterministic, seed-driven test selection
//!
//! Given the tests a host discovered, this library keeps a bounded random
//! subset of each group (e.g. each module or class) and answers "should this
//! test run?" for every candidate. The same seed and the same discovered
//! tests always produce the same selection.
//!
//! ```
//! use random_test_filter::filter::{RandomTestFilter, TestFilter};
//! use random_test_filter::model::TestIdentifier;
//! use random_test_filter::seed::Seed;
//!
//! let discovered: Vec<TestIdentifier> = ["suite::a", "suite::b", "suite::c"]
//!     .into_iter()
//!     .map(TestIdentifier::from)
//!     .collect();
//!
//! let filter = RandomTestFilter::default()
//!     .with_seed(Some(Seed::new(42)))
//!     .with_limit(Some(2))
//!     .resolve(discovered.iter().cloned())
//!     .expect("valid settings");
//!
//! let selected = discovered.iter().filter(|id| filter.include(id)).count();
//! assert_eq!(selected, 2);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod model;
pub mod seed;
pub mod selection;
pub mod telemetry;
