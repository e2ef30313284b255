#![forbid(unsafe_code)]

//! Column sizing and frozen-pane layout for data grids.
//!
//! # Role in FrankenTUI
//! `ftui-grid` holds the deterministic math behind a resizable, auto-fitting
//! data grid with columns frozen to either edge. It owns no widgets and no
//! event handling: hosts hand it column widths, floors and the viewport, and
//! read back sizes and rectangles.
//!
//! # Primary responsibilities
//! - **Auto-size**: fit N items into a budget by equal division or by
//!   proportional scaling ([`AutoSize`], [`compute_auto_sizes`]).
//! - **Push-and-pull resize**: drag one item's edge while siblings absorb
//!   the change so the total width stays constant ([`PushAndPull`],
//!   [`compute_resize`]).
//! - **Pane layout**: partition the viewport into header, footer, frozen and
//!   body regions in either text direction ([`PaneLayoutEngine`]).
//!
//! The engines are generic over [`SizeAccess`], so any ordered sequence of
//! sizable things can be fitted or resized; [`GridColumn`] is the concrete
//! column model used by the grid widgets.
//!
//! # Example
//!
//! ```
//! use ftui_grid::{
//!     ColumnWidth, GridColumn, GridSize, LayoutRegion, PaneLayoutEngine, PaneLayoutInput,
//!     ResizeMode, compute_resize,
//! };
//!
//! let mut columns = vec![
//!     GridColumn::new("a").width(100.0).min_width(50.0),
//!     GridColumn::new("b").width(100.0).min_width(50.0),
//!     GridColumn::new("c").width(100.0).min_width(50.0),
//! ];
//! let changed = compute_resize(
//!     -80.0,
//!     &mut columns,
//!     |column| column.key == "b",
//!     ColumnWidth,
//!     ResizeMode::PushAndPull,
//! )
//! .unwrap();
//! assert!(changed);
//! assert_eq!(columns[1].width, 50.0);
//! assert_eq!(columns[2].width, 150.0);
//!
//! let input = PaneLayoutInput::for_columns(GridSize::new(800.0, 600.0), &columns);
//! let layout = PaneLayoutEngine::default().compute(&input);
//! assert_eq!(layout.rect(LayoutRegion::BodyRows).unwrap().width, 800.0);
//! ```

pub mod auto_size;
pub mod columns;
pub mod error;
pub mod geometry;
pub mod pane_layout;
pub mod resize;
pub mod sizable;

pub use auto_size::{
    AutoSize, AutoSizeEqual, AutoSizeMode, AutoSizeScale, apply_auto_sizes, compute_auto_sizes,
};
pub use columns::{
    ColumnWidth, DEFAULT_COLUMN_WIDTH, DEFAULT_MIN_COLUMN_WIDTH, FrozenSide, FrozenWidths,
    GridColumn, fit_columns, frozen_widths, resize_column,
};
pub use error::GridSizingError;
pub use geometry::{GridRect, GridSize};
pub use pane_layout::{
    BorderWidths, LayoutRegion, PaneLayout, PaneLayoutConfig, PaneLayoutEngine, PaneLayoutInput,
    PanePresence, TextDirection, compute_pane_layout,
};
pub use resize::{PushAndPull, Resize, ResizeMode, apply_resize, compute_resize};
pub use sizable::{FnAccess, RefAccess, SizeAccess};
