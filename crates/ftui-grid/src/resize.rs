#![forbid(unsafe_code)]

//! Push-and-pull resizing.
//!
//! Dragging one item's edge by a signed offset redistributes width among its
//! siblings so the total stays constant. Items before the dragged ("main")
//! item are its negative siblings, items after it its positive siblings.
//!
//! # Growing
//!
//! Width is taken from positive siblings in order, then from negative
//! siblings nearest-first. Each sibling gives at most its slack above its
//! floor. The main item grows only by what was reclaimed.
//!
//! # Shrinking
//!
//! The main item is clamped at its own floor. At either end of the sequence
//! the freed width goes to the single neighbour on the open side. In the
//! interior it goes to the next positive sibling; once the main item is
//! already pinned at its floor, the requested width is instead pulled from
//! negative siblings nearest-first and handed to that same neighbour.
//!
//! # Invariants
//!
//! 1. Total size is conserved whenever `update` reports a change.
//! 2. No item is pushed below its floor; an item already below it is never
//!    shrunk further.
//! 3. A zero offset never calls the setter.

use serde::{Deserialize, Serialize};

use crate::error::GridSizingError;
use crate::sizable::SizeAccess;

/// How a column drag affects its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Resizing disabled.
    None,
    /// Only the dragged item changes.
    #[default]
    Normal,
    /// Siblings shrink and grow inversely to keep the total constant.
    PushAndPull,
}

/// Single-use resizer for one gesture resolution.
pub struct PushAndPull<'a, T, A> {
    offset: f64,
    items: &'a mut [T],
    main: Option<usize>,
    access: A,
}

impl<'a, T, A: SizeAccess<T>> PushAndPull<'a, T, A> {
    /// Locate the main item and partition its siblings.
    ///
    /// If no item satisfies `is_main`, [`update`](Self::update) is a no-op.
    pub fn new(offset: f64, items: &'a mut [T], is_main: impl Fn(&T) -> bool, access: A) -> Self {
        let main = items.iter().position(is_main);
        Self {
            offset,
            items,
            main,
            access,
        }
    }

    #[must_use]
    pub fn main_index(&self) -> Option<usize> {
        self.main
    }

    /// Items before the main item, in original order.
    #[must_use]
    pub fn negative_siblings(&self) -> &[T] {
        match self.main {
            Some(main) => &self.items[..main],
            None => &[],
        }
    }

    /// Items after the main item, in original order.
    #[must_use]
    pub fn positive_siblings(&self) -> &[T] {
        match self.main {
            Some(main) => &self.items[main + 1..],
            None => &[],
        }
    }

    /// Apply the resize. Returns whether any size changed.
    pub fn update(self) -> bool {
        let Self {
            offset,
            items,
            main,
            access,
        } = self;

        let Some(main) = main else {
            return false;
        };
        if offset == 0.0 || !offset.is_finite() {
            return false;
        }

        let (negative, rest) = items.split_at_mut(main);
        let Some((main_item, positive)) = rest.split_first_mut() else {
            return false;
        };

        let changed = if offset > 0.0 {
            grow(offset, main_item, negative, positive, &access)
        } else {
            shrink(offset, main_item, negative, positive, &access)
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "grid.resize",
            mode = "push_and_pull",
            offset,
            main,
            changed
        );

        changed
    }
}

fn grow<T, A: SizeAccess<T>>(
    offset: f64,
    main_item: &mut T,
    negative: &mut [T],
    positive: &mut [T],
    access: &A,
) -> bool {
    let mut reclaimed = reclaim(positive.iter_mut(), access, offset);
    if reclaimed < offset {
        reclaimed += reclaim(negative.iter_mut().rev(), access, offset - reclaimed);
    }
    if reclaimed <= 0.0 {
        return false;
    }

    let grown = access.size(main_item) + reclaimed;
    access.set_size(main_item, grown);
    true
}

/// Shrink the main item toward its floor and hand the width to a neighbour.
///
/// An interior main item draws from its negative siblings only when it enters
/// the pass already at its floor; while it can still shrink, the part of the
/// offset below its floor is dropped.
fn shrink<T, A: SizeAccess<T>>(
    offset: f64,
    main_item: &mut T,
    negative: &mut [T],
    positive: &mut [T],
    access: &A,
) -> bool {
    let current = access.size(main_item);
    let floor = access.min_size(main_item).min(current);
    let target = (current + offset).max(floor);
    let given_up = current - target;

    if negative.is_empty() || positive.is_empty() {
        if given_up <= 0.0 {
            return false;
        }
        let receiver = if let Some(next) = positive.first_mut() {
            next
        } else if let Some(prev) = negative.last_mut() {
            prev
        } else {
            return false;
        };
        let received = access.size(receiver) + given_up;
        access.set_size(main_item, target);
        access.set_size(receiver, received);
        return true;
    }

    let drawn = if given_up <= 0.0 {
        reclaim(negative.iter_mut().rev(), access, offset.abs())
    } else {
        0.0
    };
    let windfall = given_up + drawn;
    if windfall <= 0.0 {
        return false;
    }

    if given_up > 0.0 {
        access.set_size(main_item, target);
    }
    let next = &mut positive[0];
    let received = access.size(next) + windfall;
    access.set_size(next, received);
    true
}

/// Take up to `needed` from siblings with slack, in iteration order.
///
/// Siblings at their floor are filtered out before they are visited and
/// iteration stops once `needed` is met.
fn reclaim<'s, T: 's, A: SizeAccess<T>>(
    siblings: impl Iterator<Item = &'s mut T>,
    access: &A,
    needed: f64,
) -> f64 {
    let mut reclaimed = 0.0;
    for sibling in siblings.filter(|sibling| access.slack(sibling) > 0.0) {
        let slack = access.slack(sibling);
        let wanted = needed - reclaimed;
        if slack <= wanted {
            let floor = access.min_size(sibling);
            access.set_size(sibling, floor);
            reclaimed += slack;
        } else {
            let shrunk = access.size(sibling) - wanted;
            access.set_size(sibling, shrunk);
            reclaimed = needed;
        }
        if reclaimed >= needed {
            break;
        }
    }
    reclaimed
}

/// A sizing engine selected by [`ResizeMode`].
///
/// Only [`ResizeMode::PushAndPull`] has an engine; the other modes are
/// resolved by the caller (see [`apply_resize`]).
pub enum Resize<'a, T, A> {
    PushAndPull(PushAndPull<'a, T, A>),
}

impl<'a, T, A: SizeAccess<T>> Resize<'a, T, A> {
    pub fn new(
        mode: ResizeMode,
        offset: f64,
        items: &'a mut [T],
        is_main: impl Fn(&T) -> bool,
        access: A,
    ) -> Result<Self, GridSizingError> {
        match mode {
            ResizeMode::None | ResizeMode::Normal => {
                Err(GridSizingError::InactiveResizeMode { mode })
            }
            ResizeMode::PushAndPull => Ok(Self::PushAndPull(PushAndPull::new(
                offset, items, is_main, access,
            ))),
        }
    }

    /// Apply the resize. Returns whether any size changed.
    pub fn update(self) -> bool {
        match self {
            Self::PushAndPull(resize) => resize.update(),
        }
    }
}

/// Resize through the engine for `mode`.
///
/// Errors for modes without an engine. The setter is invoked zero or more
/// times before this returns.
pub fn compute_resize<T, A: SizeAccess<T>>(
    offset: f64,
    items: &mut [T],
    is_main: impl Fn(&T) -> bool,
    access: A,
    mode: ResizeMode,
) -> Result<bool, GridSizingError> {
    Ok(Resize::new(mode, offset, items, is_main, access)?.update())
}

/// Resize under any mode, including the caller-side ones.
///
/// [`ResizeMode::None`] changes nothing. [`ResizeMode::Normal`] changes only
/// the main item, clamped at its floor when shrinking.
pub fn apply_resize<T, A: SizeAccess<T>>(
    offset: f64,
    items: &mut [T],
    is_main: impl Fn(&T) -> bool,
    access: A,
    mode: ResizeMode,
) -> bool {
    match mode {
        ResizeMode::None => false,
        ResizeMode::Normal => resize_independent(offset, items, is_main, &access),
        ResizeMode::PushAndPull => PushAndPull::new(offset, items, is_main, access).update(),
    }
}

fn resize_independent<T, A: SizeAccess<T>>(
    offset: f64,
    items: &mut [T],
    is_main: impl Fn(&T) -> bool,
    access: &A,
) -> bool {
    if offset == 0.0 || !offset.is_finite() {
        return false;
    }
    let Some(item) = items.iter_mut().find(|item| is_main(&**item)) else {
        return false;
    };

    let current = access.size(item);
    let target = if offset > 0.0 {
        current + offset
    } else {
        (current + offset).max(access.min_size(item).min(current))
    };
    if target == current {
        return false;
    }
    access.set_size(item, target);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        message = "grid.resize",
        mode = "normal",
        offset,
        size = target
    );

    true
}
