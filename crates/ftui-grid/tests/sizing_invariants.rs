//! Property-style invariants for the auto-size and push-and-pull engines.
//!
//! Random item sequences are resized and fitted through the public API, and
//! each pass is checked for width conservation, floor preservation and the
//! exact-budget guarantees of auto-size.

use std::cell::Cell;

use ftui_grid::{
    AutoSizeMode, FnAccess, PushAndPull, ResizeMode, SizeAccess, compute_auto_sizes,
    compute_resize,
};
use proptest::prelude::*;
use proptest::sample::Index;

const EPS: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: usize,
    size: f64,
    min: f64,
}

fn items(sizes: &[f64], mins: &[f64]) -> Vec<Item> {
    sizes
        .iter()
        .zip(mins.iter().cycle())
        .enumerate()
        .map(|(id, (&size, &min))| Item { id, size, min })
        .collect()
}

fn access() -> FnAccess<impl Fn(&Item) -> f64, impl Fn(&Item) -> f64, impl Fn(&mut Item, f64)> {
    FnAccess::new(|i: &Item| i.size, |i: &Item| i.min, |i: &mut Item, v: f64| i.size = v)
}

fn plain() -> FnAccess<impl Fn(&f64) -> f64, impl Fn(&f64) -> f64, impl Fn(&mut f64, f64)> {
    FnAccess::new(|w: &f64| *w, |_: &f64| 0.0, |w: &mut f64, v: f64| *w = v)
}

fn total(items: &[Item]) -> f64 {
    items.iter().map(|i| i.size).sum()
}

proptest! {
    #[test]
    fn push_and_pull_conserves_total(
        sizes in prop::collection::vec(10.0f64..400.0, 1..9),
        mins in prop::collection::vec(0.0f64..120.0, 1..9),
        main in any::<Index>(),
        offset in -600.0f64..600.0,
    ) {
        let mut seq = items(&sizes, &mins);
        let main = main.index(seq.len());
        let before = total(&seq);
        let changed = compute_resize(
            offset,
            &mut seq,
            |i| i.id == main,
            access(),
            ResizeMode::PushAndPull,
        )
        .expect("push-and-pull has an engine");
        let after = total(&seq);
        if changed {
            prop_assert!((before - after).abs() < EPS, "before={before} after={after}");
        } else {
            prop_assert_eq!(seq, items(&sizes, &mins));
        }
    }

    #[test]
    fn push_and_pull_never_worsens_floor(
        sizes in prop::collection::vec(10.0f64..400.0, 1..9),
        mins in prop::collection::vec(0.0f64..120.0, 1..9),
        main in any::<Index>(),
        offset in -600.0f64..600.0,
    ) {
        let original = items(&sizes, &mins);
        let mut seq = original.clone();
        let main = main.index(seq.len());
        let _ = PushAndPull::new(offset, &mut seq, |i| i.id == main, access()).update();
        for (after, before) in seq.iter().zip(&original) {
            let floor = before.min.min(before.size);
            prop_assert!(after.size >= floor - EPS, "{after:?} dropped below {floor}");
        }
    }

    #[test]
    fn zero_offset_is_inert(
        sizes in prop::collection::vec(10.0f64..400.0, 1..9),
        main in any::<Index>(),
    ) {
        let calls = Cell::new(0usize);
        let mut seq = items(&sizes, &[20.0]);
        let main = main.index(seq.len());
        let counting = FnAccess::new(
            |i: &Item| i.size,
            |i: &Item| i.min,
            |i: &mut Item, v: f64| {
                calls.set(calls.get() + 1);
                i.size = v;
            },
        );
        let changed = compute_resize(
            0.0,
            &mut seq,
            |i| i.id == main,
            counting,
            ResizeMode::PushAndPull,
        )
        .expect("push-and-pull has an engine");
        prop_assert!(!changed);
        prop_assert_eq!(calls.get(), 0);
    }

    #[test]
    fn growing_is_capped_by_sibling_slack(
        sizes in prop::collection::vec(60.0f64..200.0, 2..9),
        main in any::<Index>(),
        extra in 0.0f64..500.0,
    ) {
        let mut seq = items(&sizes, &[50.0]);
        let main = main.index(seq.len());
        let access = access();
        let slack: f64 = seq
            .iter()
            .filter(|i| i.id != main)
            .map(|i| access.slack(i))
            .sum();
        let start = seq[main].size;
        prop_assert!(PushAndPull::new(slack + extra, &mut seq, |i| i.id == main, &access).update());
        prop_assert!((seq[main].size - (start + slack)).abs() < EPS);
        for item in seq.iter().filter(|i| i.id != main) {
            prop_assert!((item.size - 50.0).abs() < EPS);
        }
    }

    #[test]
    fn equal_fit_is_exact(
        n in 1usize..24,
        min in 0.0f64..60.0,
        extra in 0.0f64..2000.0,
    ) {
        let max = min * n as f64 + extra;
        let seq = vec![1.0; n];
        let sizes = compute_auto_sizes(max, &seq, &plain(), AutoSizeMode::Equal, min, None)
            .expect("equal mode is active");
        prop_assert_eq!(sizes.len(), n);
        prop_assert_eq!(sizes.iter().sum::<f64>(), max);
        for size in &sizes {
            prop_assert!(*size >= min - EPS);
        }
    }

    #[test]
    fn scale_fit_respects_budget_and_floor(
        seq in prop::collection::vec(1.0f64..500.0, 1..16),
        min in 0.0f64..60.0,
        extra in 0.0f64..2000.0,
        scale in 0.1f64..4.0,
    ) {
        let max = min * seq.len() as f64 + extra;
        let sizes = compute_auto_sizes(max, &seq, &plain(), AutoSizeMode::Scale, min, Some(scale))
            .expect("scale mode is active");
        prop_assert!((sizes.iter().sum::<f64>() - max).abs() < EPS * max.max(1.0));
        for size in &sizes {
            prop_assert!(*size >= min - EPS, "{size} below {min}");
        }
    }

    #[test]
    fn oversize_forces_minimum(
        seq in prop::collection::vec(1.0f64..500.0, 1..16),
        min in 10.0f64..80.0,
        shortfall in 0.001f64..1.0,
        scale in 0.1f64..4.0,
    ) {
        let max = min * seq.len() as f64 * (1.0 - shortfall);
        for (mode, scale) in [(AutoSizeMode::Equal, None), (AutoSizeMode::Scale, Some(scale))] {
            let sizes = compute_auto_sizes(max, &seq, &plain(), mode, min, scale)
                .expect("active mode");
            prop_assert!(sizes.iter().all(|&size| size == min));
        }
    }
}
