//! Stateful handle over one filtered cumulative table.

use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::dataset::ProfileDataset;
use crate::error::ProfileError;
use crate::filter::FilterSpec;
use crate::pool::WeightedPool;
use crate::record::ProfileRecord;

/// Weighted random profile picker.
///
/// Holds its own copy of the current profile, so callers may mutate
/// [`ProfileSelector::profile_mut`] freely without touching the dataset.
#[derive(Debug, Clone)]
pub struct ProfileSelector {
    dataset: Arc<ProfileDataset>,
    pool: Arc<WeightedPool>,
    current: ProfileRecord,
}

impl ProfileSelector {
    /// Selector over the bundled dataset.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::NoMatch`] if `filter` matches no profile.
    pub fn new(filter: Option<&FilterSpec>) -> Result<Self, ProfileError> {
        Self::with_dataset(ProfileDataset::bundled(), filter)
    }

    /// Selector over `dataset`, narrowed by `filter`; samples an initial profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::NoMatch`] if `filter` matches no profile.
    pub fn with_dataset(
        dataset: Arc<ProfileDataset>,
        filter: Option<&FilterSpec>,
    ) -> Result<Self, ProfileError> {
        Self::with_dataset_and_rng(dataset, filter, &mut rand::thread_rng())
    }

    /// Like [`ProfileSelector::with_dataset`], drawing the initial profile from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::NoMatch`] if `filter` matches no profile.
    pub fn with_dataset_and_rng<R: Rng>(
        dataset: Arc<ProfileDataset>,
        filter: Option<&FilterSpec>,
        rng: &mut R,
    ) -> Result<Self, ProfileError> {
        let pool = dataset.pool_for(filter);
        if pool.is_empty() {
            return Err(ProfileError::NoMatch);
        }
        let current = draw_from(&dataset, &pool, rng)?;
        Ok(Self {
            dataset,
            pool,
            current,
        })
    }

    /// Soft variant of [`ProfileSelector::new`]: `None` instead of an error.
    #[must_use]
    pub fn random(filter: Option<&FilterSpec>) -> Option<Self> {
        match Self::new(filter) {
            Ok(selector) => Some(selector),
            Err(error) => {
                tracing::debug!(
                    event = "mimic.profiles.selector.unavailable",
                    error = %error,
                    "no profile selector for filter"
                );
                None
            }
        }
    }

    /// Replace the current profile with a fresh weighted draw.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Sampling`] only if the table fails to resolve a
    /// draw, which a non-empty table never does.
    pub fn randomize(&mut self) -> Result<(), ProfileError> {
        self.randomize_with(&mut rand::thread_rng())
    }

    /// [`ProfileSelector::randomize`] with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Sampling`] if the draw cannot be resolved.
    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R) -> Result<(), ProfileError> {
        self.current = draw_from(&self.dataset, &self.pool, rng)?;
        Ok(())
    }

    /// Identity string of the current profile.
    #[inline]
    #[must_use]
    pub fn identity(&self) -> &str {
        self.current.identity()
    }

    /// Current profile.
    #[inline]
    #[must_use]
    pub fn profile(&self) -> &ProfileRecord {
        &self.current
    }

    /// Mutable access to this selector's own copy of the current profile.
    #[inline]
    pub fn profile_mut(&mut self) -> &mut ProfileRecord {
        &mut self.current
    }

    /// Number of profiles this selector draws from.
    #[inline]
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.pool.len()
    }
}

impl fmt::Display for ProfileSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identity())
    }
}

fn draw_from<R: Rng>(
    dataset: &ProfileDataset,
    pool: &WeightedPool,
    rng: &mut R,
) -> Result<ProfileRecord, ProfileError> {
    let draw: f64 = rng.gen_range(0.0..1.0);
    pool.sample(draw)
        .and_then(|index| dataset.get(index))
        .cloned()
        .ok_or(ProfileError::Sampling {
            draw,
            entries: pool.len(),
        })
}
