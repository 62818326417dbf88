//! Tier constraint engine
//!
//! Keeps the per-tier size selections consistent with the shape and the tier
//! count. For every shape except the rectangle, each tier must be strictly
//! smaller than the one below it (index 0 is the bottom tier).
//!
//! All operations are pure: they take the current [`TierSet`] and return a new
//! one, leaving storage of the result to the caller.

use serde::{Deserialize, Serialize};

use crate::core::error::ValidationError;
use crate::core::shape::{Shape, SizeToken, auto_sizes_for, sizes_for};

/// Number of stacked tiers, 1 to 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TierCount(u8);

impl TierCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    pub const ONE: TierCount = TierCount(1);
    pub const TWO: TierCount = TierCount(2);
    pub const THREE: TierCount = TierCount(3);

    pub fn new(count: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(ValidationError::InvalidTierCount { count })
        }
    }

    pub fn get(&self) -> usize {
        usize::from(self.0)
    }
}

impl Default for TierCount {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for TierCount {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TierCount> for u8 {
    fn from(value: TierCount) -> Self {
        value.0
    }
}

/// Ordered size selections, index 0 = bottom (largest) tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierSet(Vec<SizeToken>);

impl TierSet {
    pub fn from_sizes(sizes: Vec<SizeToken>) -> Self {
        Self(sizes)
    }

    pub fn sizes(&self) -> &[SizeToken] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<SizeToken> {
        self.0.get(index).copied()
    }

    pub fn contains_custom(&self) -> bool {
        self.0.iter().any(SizeToken::is_custom)
    }

    /// Whether every tier is strictly smaller than the one below it
    ///
    /// Always true for rectangles.
    pub fn is_monotonic_for(&self, shape: Shape) -> bool {
        if !shape.is_monotonic() {
            return true;
        }
        self.0
            .windows(2)
            .all(|pair| match (pair[0].numeric(), pair[1].numeric()) {
                (Some(below), Some(above)) => above < below,
                _ => false,
            })
    }

    /// Sizes joined for display, e.g. `26 / 24 / 22`
    pub fn joined(&self, separator: &str) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Default tiers for `shape`: descending defaults, one per index
///
/// When the count exceeds the vocabulary the smallest size is repeated.
pub fn on_shape_changed(shape: Shape, count: TierCount) -> TierSet {
    let defaults = auto_sizes_for(shape);
    let sizes = (0..count.get())
        .filter_map(|i| defaults.get(i).or_else(|| defaults.last()).copied())
        .collect();
    TierSet(sizes)
}

/// Grow or shrink the tier set to `count`
///
/// Growing walks forward in the vocabulary from the last tier's size; when
/// the vocabulary is exhausted the smallest size is repeated and left for the
/// customer to fix. Shrinking keeps the remaining tiers untouched.
pub fn on_tier_count_changed(count: TierCount, current: &TierSet, shape: Shape) -> TierSet {
    let mut sizes = current.0.clone();
    let target = count.get();

    if sizes.len() >= target {
        sizes.truncate(target);
        return TierSet(sizes);
    }

    let candidates = auto_sizes_for(shape);
    while sizes.len() < target {
        let next = sizes
            .last()
            .and_then(|last| candidates.iter().position(|s| s == last))
            .and_then(|pos| candidates.get(pos + 1))
            .or_else(|| candidates.last())
            .copied();

        match next {
            Some(size) => sizes.push(size),
            None => break,
        }
    }

    TierSet(sizes)
}

/// Set tier `index` to `size`, then repair the tiers above it
///
/// For monotonic shapes each later tier that is not strictly smaller than
/// the tier below is replaced by the vocabulary entry following the lower
/// tier's size. If no smaller entry exists the tier is left as it is.
///
/// An upper tier of a monotonic shape only accepts the sizes listed by
/// [`available_options`].
pub fn on_tier_size_changed(
    index: usize,
    size: SizeToken,
    current: &TierSet,
    shape: Shape,
) -> Result<TierSet, ValidationError> {
    if index >= current.len() {
        return Err(ValidationError::TierIndexOutOfRange {
            index,
            tiers: current.len(),
        });
    }

    let vocabulary = sizes_for(shape);
    if !vocabulary.contains(&size) {
        return Err(ValidationError::SizeNotOffered { shape, size });
    }

    // Upper tiers must stay below the tier they sit on
    if shape.is_monotonic()
        && index > 0
        && !available_options(index, current, shape).contains(&size)
    {
        return Err(ValidationError::SizeNotOffered { shape, size });
    }

    let mut sizes = current.0.clone();
    sizes[index] = size;

    if shape.is_monotonic() {
        repair_from(&mut sizes, index, vocabulary);
    }

    Ok(TierSet(sizes))
}

/// Re-apply the ordering repair to a whole tier set
///
/// A no-op on tier sets that already satisfy the ordering rule.
pub fn repair(current: &TierSet, shape: Shape) -> TierSet {
    let mut sizes = current.0.clone();
    if shape.is_monotonic() {
        repair_from(&mut sizes, 0, sizes_for(shape));
    }
    TierSet(sizes)
}

fn repair_from(sizes: &mut [SizeToken], index: usize, vocabulary: &[SizeToken]) {
    for i in (index + 1)..sizes.len() {
        let (Some(below), Some(current)) = (sizes[i - 1].numeric(), sizes[i].numeric()) else {
            continue;
        };
        if current < below {
            continue;
        }

        let next_smaller = vocabulary
            .iter()
            .position(|s| *s == sizes[i - 1])
            .and_then(|pos| vocabulary.get(pos + 1));
        if let Some(next) = next_smaller {
            sizes[i] = *next;
        }
    }
}

/// Sizes that may be offered for tier `index`
///
/// The bottom tier and every rectangle tier get the full vocabulary. Upper
/// tiers of other shapes only get sizes strictly smaller than the tier below,
/// which may be an empty list.
pub fn available_options(index: usize, current: &TierSet, shape: Shape) -> Vec<SizeToken> {
    let vocabulary = sizes_for(shape);
    if index == 0 || !shape.is_monotonic() {
        return vocabulary.to_vec();
    }

    let Some(below) = current.get(index - 1).and_then(|s| s.numeric()) else {
        return vocabulary.to_vec();
    };

    vocabulary
        .iter()
        .filter(|s| s.numeric().is_some_and(|cm| cm < below))
        .copied()
        .collect()
}
