#![forbid(unsafe_code)]

//! Fit a sequence of items into a fixed budget.
//!
//! A strategy is created once per pass with the total budget and the item
//! count, then asked for one size per item, in order. Each call consumes part
//! of the budget, and the final call absorbs all floating-point drift so the
//! emitted sizes sum to the budget exactly.
//!
//! # Over-size mode
//!
//! When `item_min_size * length > max_size` no fit exists. Every item is then
//! given `item_min_size` and the content is allowed to overflow the viewport;
//! the host is expected to scroll horizontally.
//!
//! # Invariants
//!
//! 1. Outside over-size mode, the emitted sizes sum to `max_size`.
//! 2. Outside over-size mode, no emitted size is below `item_min_size`.
//! 3. In over-size mode, every emitted size equals `item_min_size`.

use serde::{Deserialize, Serialize};

use crate::error::GridSizingError;
use crate::sizable::SizeAccess;

/// Policy used to fit items into the available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoSizeMode {
    /// Auto-fit disabled.
    #[default]
    None,
    /// Every item receives the same share.
    Equal,
    /// Items keep their proportions, scaled by a factor.
    Scale,
}

impl AutoSizeMode {
    /// Whether a sizing strategy exists for this mode.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }
}

#[inline]
fn is_oversize(max_size: f64, length: usize, item_min_size: f64) -> bool {
    item_min_size * length as f64 > max_size
}

/// Splits the budget into equal shares.
#[derive(Debug, Clone)]
pub struct AutoSizeEqual {
    max_size: f64,
    length: usize,
    item_min_size: f64,
    oversize: bool,
    index: usize,
    accumulated: f64,
}

impl AutoSizeEqual {
    #[must_use]
    pub fn new(max_size: f64, length: usize, item_min_size: f64) -> Self {
        Self {
            max_size,
            length,
            item_min_size,
            oversize: is_oversize(max_size, length, item_min_size),
            index: 0,
            accumulated: 0.0,
        }
    }

    /// Whether the budget is too small for every item's floor.
    #[must_use]
    pub const fn is_oversize(&self) -> bool {
        self.oversize
    }

    /// Size for the next item in sequence.
    pub fn next_size(&mut self) -> f64 {
        if self.oversize {
            return self.item_min_size;
        }

        self.index += 1;
        let size = if self.index >= self.length {
            self.max_size - self.accumulated
        } else {
            self.max_size / self.length as f64
        };
        self.accumulated += size;
        size
    }
}

/// Scales each item's original size, borrowing from the current item when
/// the items still to come would otherwise drop below their floor.
#[derive(Debug, Clone)]
pub struct AutoSizeScale {
    max_size: f64,
    length: usize,
    item_min_size: f64,
    scale: f64,
    oversize: bool,
    index: usize,
    accumulated: f64,
}

impl AutoSizeScale {
    #[must_use]
    pub fn new(max_size: f64, length: usize, item_min_size: f64, scale: f64) -> Self {
        Self {
            max_size,
            length,
            item_min_size,
            scale,
            oversize: is_oversize(max_size, length, item_min_size),
            index: 0,
            accumulated: 0.0,
        }
    }

    #[must_use]
    pub const fn is_oversize(&self) -> bool {
        self.oversize
    }

    /// Size for the next item, given its size before the pass.
    pub fn next_size(&mut self, original_size: f64) -> f64 {
        if self.oversize {
            return self.item_min_size;
        }

        let remaining_items = self.length.saturating_sub(self.index + 1);
        self.index += 1;

        let size = if remaining_items == 0 {
            self.max_size - self.accumulated
        } else {
            let scaled = (original_size * self.scale).round();
            let mut size = scaled.max(self.item_min_size);

            // Look-ahead uses the unfloored scaled size.
            let remainder = self.max_size - self.accumulated - scaled;
            let reserved = self.item_min_size * remaining_items as f64;
            if remainder < reserved {
                size -= reserved - remainder;
            }
            size.max(self.item_min_size)
        };

        self.accumulated += size;
        size
    }
}

/// A sizing strategy selected by [`AutoSizeMode`].
#[derive(Debug, Clone)]
pub enum AutoSize {
    Equal(AutoSizeEqual),
    Scale(AutoSizeScale),
}

impl AutoSize {
    /// Build the strategy for `mode`.
    ///
    /// `scale` is required (finite, positive) for [`AutoSizeMode::Scale`]
    /// and ignored otherwise. [`AutoSizeMode::None`] is rejected.
    pub fn new(
        mode: AutoSizeMode,
        max_size: f64,
        length: usize,
        item_min_size: f64,
        scale: Option<f64>,
    ) -> Result<Self, GridSizingError> {
        match mode {
            AutoSizeMode::None => Err(GridSizingError::InactiveAutoSizeMode { mode }),
            AutoSizeMode::Equal => Ok(Self::Equal(AutoSizeEqual::new(
                max_size,
                length,
                item_min_size,
            ))),
            AutoSizeMode::Scale => {
                let scale = scale.ok_or(GridSizingError::MissingScale)?;
                if !scale.is_finite() || scale <= 0.0 {
                    return Err(GridSizingError::InvalidScale { scale });
                }
                Ok(Self::Scale(AutoSizeScale::new(
                    max_size,
                    length,
                    item_min_size,
                    scale,
                )))
            }
        }
    }

    #[must_use]
    pub fn mode(&self) -> AutoSizeMode {
        match self {
            Self::Equal(_) => AutoSizeMode::Equal,
            Self::Scale(_) => AutoSizeMode::Scale,
        }
    }

    #[must_use]
    pub fn is_oversize(&self) -> bool {
        match self {
            Self::Equal(equal) => equal.is_oversize(),
            Self::Scale(scale) => scale.is_oversize(),
        }
    }

    /// Size for the next item. Equal mode ignores `original_size`.
    pub fn item_size(&mut self, original_size: f64) -> f64 {
        match self {
            Self::Equal(equal) => equal.next_size(),
            Self::Scale(scale) => scale.next_size(original_size),
        }
    }
}

/// Compute one size per item without touching the items.
///
/// Sizes are returned in item order. An empty sequence yields an empty
/// vector once the mode has been validated.
pub fn compute_auto_sizes<T, A>(
    max_size: f64,
    items: &[T],
    access: &A,
    mode: AutoSizeMode,
    item_min_size: f64,
    scale: Option<f64>,
) -> Result<Vec<f64>, GridSizingError>
where
    A: SizeAccess<T>,
{
    let mut strategy = AutoSize::new(mode, max_size, items.len(), item_min_size, scale)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        message = "grid.auto_size",
        mode = ?mode,
        length = items.len(),
        max_size,
        oversize = strategy.is_oversize()
    );

    Ok(items
        .iter()
        .map(|item| strategy.item_size(access.size(item)))
        .collect())
}

/// Compute sizes and commit them through `access`.
pub fn apply_auto_sizes<T, A>(
    max_size: f64,
    items: &mut [T],
    access: &A,
    mode: AutoSizeMode,
    item_min_size: f64,
    scale: Option<f64>,
) -> Result<(), GridSizingError>
where
    A: SizeAccess<T>,
{
    let sizes = compute_auto_sizes(max_size, items, access, mode, item_min_size, scale)?;
    for (item, size) in items.iter_mut().zip(sizes) {
        access.set_size(item, size);
    }
    Ok(())
}
