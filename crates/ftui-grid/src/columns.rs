#![forbid(unsafe_code)]

//! Grid columns as sizable items.
//!
//! Ties the generic engines to a concrete column model: auto-fit and drag
//! resizing run over the visible columns, and the summed frozen widths feed
//! [`PaneLayoutInput`].

use serde::{Deserialize, Serialize};

use crate::auto_size::{AutoSizeMode, apply_auto_sizes};
use crate::error::GridSizingError;
use crate::geometry::GridSize;
use crate::pane_layout::PaneLayoutInput;
use crate::resize::{ResizeMode, apply_resize};
use crate::sizable::{RefAccess, SizeAccess};

/// Width given to columns created without one.
pub const DEFAULT_COLUMN_WIDTH: f64 = 200.0;

/// Floor given to columns created without one.
pub const DEFAULT_MIN_COLUMN_WIDTH: f64 = 80.0;

/// Edge a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrozenSide {
    /// Scrolls with the body.
    #[default]
    None,
    /// Pinned to the leading edge.
    Start,
    /// Pinned to the trailing edge.
    End,
}

/// A grid column's geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridColumn {
    /// Stable identity used to pick the dragged column.
    pub key: String,
    pub width: f64,
    #[serde(default = "default_min_width")]
    pub min_width: f64,
    #[serde(default)]
    pub frozen: FrozenSide,
    #[serde(default)]
    pub hidden: bool,
}

fn default_min_width() -> f64 {
    DEFAULT_MIN_COLUMN_WIDTH
}

impl GridColumn {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            width: DEFAULT_COLUMN_WIDTH,
            min_width: DEFAULT_MIN_COLUMN_WIDTH,
            frozen: FrozenSide::None,
            hidden: false,
        }
    }

    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn min_width(mut self, min_width: f64) -> Self {
        self.min_width = min_width;
        self
    }

    #[must_use]
    pub fn frozen(mut self, side: FrozenSide) -> Self {
        self.frozen = side;
        self
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

/// [`SizeAccess`] over a column's width.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnWidth;

impl SizeAccess<GridColumn> for ColumnWidth {
    fn size(&self, column: &GridColumn) -> f64 {
        column.width
    }

    fn min_size(&self, column: &GridColumn) -> f64 {
        column.min_width
    }

    fn set_size(&self, column: &mut GridColumn, size: f64) {
        column.width = size;
    }
}

/// Summed widths of the visible frozen columns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrozenWidths {
    pub start: f64,
    pub end: f64,
}

impl FrozenWidths {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.start + self.end
    }
}

#[must_use]
pub fn frozen_widths(columns: &[GridColumn]) -> FrozenWidths {
    columns
        .iter()
        .filter(|column| column.is_visible())
        .fold(FrozenWidths::default(), |mut acc, column| {
            match column.frozen {
                FrozenSide::Start => acc.start += column.width,
                FrozenSide::End => acc.end += column.width,
                FrozenSide::None => {}
            }
            acc
        })
}

/// Fit the visible body columns into `max_width`, the body width.
///
/// Frozen and hidden columns keep their widths. The floor is the larger of
/// `min_width` and the fitted columns' own `min_width`. `scale` is required
/// for [`AutoSizeMode::Scale`].
pub fn fit_columns(
    columns: &mut [GridColumn],
    max_width: f64,
    mode: AutoSizeMode,
    min_width: f64,
    scale: Option<f64>,
) -> Result<(), GridSizingError> {
    let mut body: Vec<&mut GridColumn> = columns
        .iter_mut()
        .filter(|column| column.is_visible() && column.frozen == FrozenSide::None)
        .collect();
    let floor = body
        .iter()
        .map(|column| column.min_width)
        .fold(min_width, f64::max);
    apply_auto_sizes(
        max_width,
        &mut body,
        &RefAccess(ColumnWidth),
        mode,
        floor,
        scale,
    )
}

/// Drag column `key` by `offset` under `mode`.
///
/// Only visible columns pinned to the same edge take part, so resizing a
/// body column never moves a frozen group. Returns whether any width changed.
pub fn resize_column(
    columns: &mut [GridColumn],
    key: &str,
    offset: f64,
    mode: ResizeMode,
) -> Result<bool, GridSizingError> {
    let Some(side) = columns
        .iter()
        .find(|column| column.key == key)
        .map(|column| column.frozen)
    else {
        return Err(GridSizingError::UnknownColumn { key: key.into() });
    };

    let mut group: Vec<&mut GridColumn> = columns
        .iter_mut()
        .filter(|column| column.is_visible() && column.frozen == side)
        .collect();
    Ok(apply_resize(
        offset,
        &mut group,
        |column| column.key == key,
        RefAccess(ColumnWidth),
        mode,
    ))
}

impl PaneLayoutInput {
    /// Input for `viewport` with frozen groups taken from `columns`.
    #[must_use]
    pub fn for_columns(viewport: GridSize, columns: &[GridColumn]) -> Self {
        let frozen = frozen_widths(columns);
        Self::new(viewport)
            .left_frozen(frozen.start)
            .right_frozen(frozen.end)
    }
}
