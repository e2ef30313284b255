#![forbid(unsafe_code)]

//! Capability seam for anything with a resizable extent.
//!
//! The sizing engines never see a concrete item type. They read and write
//! sizes through a [`SizeAccess`], so the same algorithms serve columns,
//! rows, or any other ordered sequence of sizable things.

/// Read/write access to an item's current size and its floor.
pub trait SizeAccess<T: ?Sized> {
    /// Current size of the item.
    fn size(&self, item: &T) -> f64;

    /// Minimum size the engines may shrink the item to.
    fn min_size(&self, item: &T) -> f64;

    /// Commit a new size.
    fn set_size(&self, item: &mut T, size: f64);

    /// Spare room above the floor. Never negative.
    fn slack(&self, item: &T) -> f64 {
        (self.size(item) - self.min_size(item)).max(0.0)
    }
}

impl<T: ?Sized, A: SizeAccess<T> + ?Sized> SizeAccess<T> for &A {
    fn size(&self, item: &T) -> f64 {
        (**self).size(item)
    }

    fn min_size(&self, item: &T) -> f64 {
        (**self).min_size(item)
    }

    fn set_size(&self, item: &mut T, size: f64) {
        (**self).set_size(item, size);
    }
}

/// [`SizeAccess`] assembled from a getter, a minimum getter and a setter.
///
/// ```
/// use ftui_grid::{FnAccess, SizeAccess};
///
/// let access = FnAccess::new(|w: &f64| *w, |_| 20.0, |w: &mut f64, v| *w = v);
/// let mut width = 50.0;
/// access.set_size(&mut width, 35.0);
/// assert_eq!(access.slack(&width), 15.0);
/// ```
#[derive(Clone, Copy)]
pub struct FnAccess<G, M, S> {
    get: G,
    min: M,
    set: S,
}

impl<G, M, S> FnAccess<G, M, S> {
    /// Bundle the three accessors. The bounds pin the closure signatures so
    /// unannotated closures still infer reference-generic parameters.
    pub fn new<T: ?Sized>(get: G, min: M, set: S) -> Self
    where
        G: Fn(&T) -> f64,
        M: Fn(&T) -> f64,
        S: Fn(&mut T, f64),
    {
        Self { get, min, set }
    }
}

impl<T: ?Sized, G, M, S> SizeAccess<T> for FnAccess<G, M, S>
where
    G: Fn(&T) -> f64,
    M: Fn(&T) -> f64,
    S: Fn(&mut T, f64),
{
    fn size(&self, item: &T) -> f64 {
        (self.get)(item)
    }

    fn min_size(&self, item: &T) -> f64 {
        (self.min)(item)
    }

    fn set_size(&self, item: &mut T, size: f64) {
        (self.set)(item, size);
    }
}

impl<G, M, S> std::fmt::Debug for FnAccess<G, M, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnAccess").finish_non_exhaustive()
    }
}

/// Lifts a [`SizeAccess`] over `T` to one over `&mut T`.
///
/// Lets the engines run on a filtered view such as
/// `Vec<&mut Column>` without copying items out and back.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefAccess<A>(pub A);

impl<'r, T: ?Sized, A: SizeAccess<T>> SizeAccess<&'r mut T> for RefAccess<A> {
    fn size(&self, item: &&'r mut T) -> f64 {
        self.0.size(&**item)
    }

    fn min_size(&self, item: &&'r mut T) -> f64 {
        self.0.min_size(&**item)
    }

    fn set_size(&self, item: &mut &'r mut T, size: f64) {
        self.0.set_size(&mut **item, size);
    }
}
