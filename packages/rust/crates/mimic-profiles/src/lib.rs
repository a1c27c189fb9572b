//! Weighted random browser profiles for disguising outbound requests.
//!
//! A fixed pool of synthetic client profiles is sampled in proportion to each
//! profile's `weight`, optionally narrowed by a structural [`FilterSpec`].
//!
//! # Architecture
//!
//! ```text
//! mimic-profiles/src/
//! ├── lib.rs       # Re-exports (this file)
//! ├── error.rs     # ProfileError enum
//! ├── record.rs    # ProfileRecord and its field enums
//! ├── dataset.rs   # ProfileDataset (bundled, file, in-memory)
//! ├── filter.rs    # FilterSpec → compiled predicate
//! ├── pool.rs      # WeightedPool cumulative table
//! └── selector.rs  # ProfileSelector (current profile + resample)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use mimic_profiles::{FilterSpec, ProfileSelector};
//!
//! let windows = FilterSpec::field("platform", FilterSpec::literal("Win32"));
//! let mut selector = ProfileSelector::new(Some(&windows))?;
//! println!("{selector}");
//! selector.randomize()?;
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod dataset;
mod error;
mod filter;
mod pool;
mod record;
mod selector;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use dataset::ProfileDataset;
pub use error::ProfileError;
pub use filter::{CompiledFilter, FilterSpec, PredicateFn};
pub use pool::{CumulativeEntry, WeightedPool};
pub use record::{Connection, ConnectionType, EffectiveType, Platform, ProfileRecord, Vendor};
pub use selector::ProfileSelector;
