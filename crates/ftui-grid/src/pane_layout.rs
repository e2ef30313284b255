#![forbid(unsafe_code)]

//! Frozen-pane layout for a data grid.
//!
//! [`PaneLayoutEngine`] partitions the viewport into header, footer, frozen
//! and body regions plus the hairline dividers between them. Regions are
//! placed in a fixed order because each consumes space the later ones see:
//!
//! 1. Header and its divider, from the top.
//! 2. Footer and its divider, from the bottom.
//! 3. Leading ("left") frozen columns and divider.
//! 4. Trailing ("right") frozen columns and divider.
//! 5. Body columns between the two frozen groups.
//! 6. Column/row divider, or a border-width gap when absent.
//! 7. Frozen rows and body rows below the column headers.
//! 8. Loading overlay over everything.
//!
//! "Left" frozen always means the leading group. Under right-to-left text it
//! is placed at the right screen edge and the trailing group at the left.
//!
//! # Frozen visibility
//!
//! Frozen panes are only worth showing while the body keeps at least
//! `min_body_width`. The engine compares that decision with what the input
//! currently shows and sets [`PaneLayout::relayout_next_frame`] on mismatch.
//! It never re-runs layout itself; the host applies
//! [`PaneLayoutEngine::resolve_frozen`] and lays out again next frame.

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::geometry::{GridRect, GridSize};

/// Every region the engine can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutRegion {
    Header,
    HeaderDivider,
    LeftFrozenColumns,
    LeftFrozenRows,
    LeftFrozenDivider,
    BodyColumns,
    BodyRows,
    RightFrozenColumns,
    RightFrozenRows,
    RightFrozenDivider,
    ColumnRowDivider,
    Footer,
    FooterDivider,
    LoadingOverlay,
}

impl LayoutRegion {
    pub const ALL: [Self; 14] = [
        Self::Header,
        Self::HeaderDivider,
        Self::LeftFrozenColumns,
        Self::LeftFrozenRows,
        Self::LeftFrozenDivider,
        Self::BodyColumns,
        Self::BodyRows,
        Self::RightFrozenColumns,
        Self::RightFrozenRows,
        Self::RightFrozenDivider,
        Self::ColumnRowDivider,
        Self::Footer,
        Self::FooterDivider,
        Self::LoadingOverlay,
    ];

    /// Whether the region is a hairline divider.
    #[must_use]
    pub const fn is_divider(self) -> bool {
        matches!(
            self,
            Self::HeaderDivider
                | Self::LeftFrozenDivider
                | Self::RightFrozenDivider
                | Self::ColumnRowDivider
                | Self::FooterDivider
        )
    }
}

/// Horizontal text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

bitflags! {
    /// Optional regions present in the current pass.
    ///
    /// Body columns and body rows are always laid out.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PanePresence: u16 {
        const HEADER               = 1 << 0;
        const HEADER_DIVIDER       = 1 << 1;
        const FOOTER               = 1 << 2;
        const FOOTER_DIVIDER       = 1 << 3;
        const LEFT_FROZEN          = 1 << 4;
        const LEFT_FROZEN_DIVIDER  = 1 << 5;
        const RIGHT_FROZEN         = 1 << 6;
        const RIGHT_FROZEN_DIVIDER = 1 << 7;
        const COLUMN_ROW_DIVIDER   = 1 << 8;
        const LOADING              = 1 << 9;

        /// Both frozen groups with their dividers.
        const FROZEN = Self::LEFT_FROZEN.bits()
            | Self::LEFT_FROZEN_DIVIDER.bits()
            | Self::RIGHT_FROZEN.bits()
            | Self::RIGHT_FROZEN_DIVIDER.bits();
    }
}

/// Thickness of dividers and of the fallback gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderWidths {
    /// Thickness of every divider region.
    pub divider: f64,
    /// Gap reserved between column headers and rows when the column/row
    /// divider is absent.
    pub border: f64,
}

impl Default for BorderWidths {
    fn default() -> Self {
        Self {
            divider: 1.0,
            border: 1.0,
        }
    }
}

/// Layout constants for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneLayoutConfig {
    /// Header height cap as a fraction of the viewport height.
    pub header_max_fraction: f64,
    /// Footer height cap as a fraction of the viewport height.
    pub footer_max_fraction: f64,
    /// Body width below which frozen panes are dropped.
    pub min_body_width: f64,
    /// Height of the column header row.
    pub column_height: f64,
    pub borders: BorderWidths,
}

impl Default for PaneLayoutConfig {
    fn default() -> Self {
        Self {
            header_max_fraction: 0.4,
            footer_max_fraction: 0.4,
            min_body_width: 200.0,
            column_height: 45.0,
            borders: BorderWidths::default(),
        }
    }
}

/// Per-pass input to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneLayoutInput {
    pub viewport: GridSize,
    pub presence: PanePresence,
    pub direction: TextDirection,
    /// Intrinsic header height, before capping.
    pub header_height: f64,
    /// Intrinsic footer height, before capping.
    pub footer_height: f64,
    /// Sum of the leading frozen column widths.
    pub left_frozen_width: f64,
    /// Sum of the trailing frozen column widths.
    pub right_frozen_width: f64,
}

impl PaneLayoutInput {
    /// Input with only body regions and the column/row divider.
    #[must_use]
    pub fn new(viewport: GridSize) -> Self {
        Self {
            viewport,
            presence: PanePresence::COLUMN_ROW_DIVIDER,
            direction: TextDirection::Ltr,
            header_height: 0.0,
            footer_height: 0.0,
            left_frozen_width: 0.0,
            right_frozen_width: 0.0,
        }
    }

    /// Add a header with its divider.
    #[must_use]
    pub fn header(mut self, height: f64) -> Self {
        self.header_height = height;
        self.presence |= PanePresence::HEADER | PanePresence::HEADER_DIVIDER;
        self
    }

    /// Add a footer with its divider.
    #[must_use]
    pub fn footer(mut self, height: f64) -> Self {
        self.footer_height = height;
        self.presence |= PanePresence::FOOTER | PanePresence::FOOTER_DIVIDER;
        self
    }

    /// Set the leading frozen width, showing the group when non-zero.
    #[must_use]
    pub fn left_frozen(mut self, width: f64) -> Self {
        self.left_frozen_width = width;
        let flags = PanePresence::LEFT_FROZEN | PanePresence::LEFT_FROZEN_DIVIDER;
        self.presence.set(flags, width > 0.0);
        self
    }

    /// Set the trailing frozen width, showing the group when non-zero.
    #[must_use]
    pub fn right_frozen(mut self, width: f64) -> Self {
        self.right_frozen_width = width;
        let flags = PanePresence::RIGHT_FROZEN | PanePresence::RIGHT_FROZEN_DIVIDER;
        self.presence.set(flags, width > 0.0);
        self
    }

    /// Hide both frozen groups while keeping their widths.
    #[must_use]
    pub fn hide_frozen(mut self) -> Self {
        self.presence.remove(PanePresence::FROZEN);
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.presence.set(PanePresence::LOADING, loading);
        self
    }

    /// Replace the presence flags wholesale.
    #[must_use]
    pub fn presence(mut self, presence: PanePresence) -> Self {
        self.presence = presence;
        self
    }

    /// Whether any frozen group is currently laid out.
    #[must_use]
    pub fn frozen_shown(&self) -> bool {
        self.presence.intersects(PanePresence::LEFT_FROZEN | PanePresence::RIGHT_FROZEN)
    }

    #[must_use]
    pub fn has_frozen_columns(&self) -> bool {
        self.left_frozen_width > 0.0 || self.right_frozen_width > 0.0
    }
}

/// Rectangles produced by one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneLayout {
    pub area: GridRect,
    rects: BTreeMap<LayoutRegion, GridRect>,
    /// Whether frozen panes fit at this viewport width.
    pub show_frozen: bool,
    /// The frozen decision disagrees with this pass; lay out again next frame.
    pub relayout_next_frame: bool,
}

impl PaneLayout {
    /// Rectangle for a region, if it was present.
    #[must_use]
    pub fn rect(&self, region: LayoutRegion) -> Option<GridRect> {
        self.rects.get(&region).copied()
    }

    #[must_use]
    pub fn contains(&self, region: LayoutRegion) -> bool {
        self.rects.contains_key(&region)
    }

    /// Placed regions in declaration order.
    pub fn regions(&self) -> impl Iterator<Item = (LayoutRegion, GridRect)> + '_ {
        self.rects.iter().map(|(&region, &rect)| (region, rect))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Computes [`PaneLayout`]s from a fixed configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaneLayoutEngine {
    config: PaneLayoutConfig,
}

impl PaneLayoutEngine {
    #[must_use]
    pub const fn new(config: PaneLayoutConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &PaneLayoutConfig {
        &self.config
    }

    /// Whether frozen panes leave the body more than `min_body_width`.
    ///
    /// Always false when there are no frozen columns.
    #[must_use]
    pub fn should_show_frozen(&self, viewport_width: f64, left: f64, right: f64) -> bool {
        let frozen = left + right;
        frozen > 0.0 && viewport_width - frozen > self.config.min_body_width
    }

    /// Apply the frozen decision for `input`'s viewport to its presence flags.
    #[must_use]
    pub fn resolve_frozen(&self, input: &PaneLayoutInput) -> PaneLayoutInput {
        let show = self.should_show_frozen(
            input.viewport.width,
            input.left_frozen_width,
            input.right_frozen_width,
        );
        let mut next = *input;
        let left = PanePresence::LEFT_FROZEN | PanePresence::LEFT_FROZEN_DIVIDER;
        let right = PanePresence::RIGHT_FROZEN | PanePresence::RIGHT_FROZEN_DIVIDER;
        next.presence.set(left, show && input.left_frozen_width > 0.0);
        next.presence.set(right, show && input.right_frozen_width > 0.0);
        next
    }

    /// Lay out every present region.
    #[must_use]
    pub fn compute(&self, input: &PaneLayoutInput) -> PaneLayout {
        let config = &self.config;
        let GridSize { width, height } = input.viewport;
        let presence = input.presence;
        let rtl = input.direction.is_rtl();
        let divider = config.borders.divider;

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "grid.pane_layout",
            width,
            height,
            rtl,
            presence = presence.bits()
        )
        .entered();

        let mut rects = BTreeMap::new();
        let mut columns_top = 0.0;
        let mut body_rows_bottom = 0.0;
        let mut body_left = 0.0;
        let mut body_right = 0.0;

        if presence.contains(PanePresence::HEADER) {
            let h = capped(input.header_height, height * config.header_max_fraction);
            rects.insert(LayoutRegion::Header, GridRect::new(0.0, 0.0, width, h));
            columns_top += h;
        }
        if presence.contains(PanePresence::HEADER_DIVIDER) {
            rects.insert(
                LayoutRegion::HeaderDivider,
                GridRect::new(0.0, columns_top, width, divider),
            );
            columns_top += divider;
        }
        if presence.contains(PanePresence::FOOTER) {
            let h = capped(input.footer_height, height * config.footer_max_fraction);
            rects.insert(LayoutRegion::Footer, GridRect::new(0.0, height - h, width, h));
            body_rows_bottom += h;
        }
        if presence.contains(PanePresence::FOOTER_DIVIDER) {
            rects.insert(
                LayoutRegion::FooterDivider,
                GridRect::new(0.0, height - body_rows_bottom - divider, width, divider),
            );
            body_rows_bottom += divider;
        }

        let body_span = (height - columns_top - body_rows_bottom).max(0.0);
        let columns_height = config.column_height.min(body_span);

        let left_frozen = if presence.contains(PanePresence::LEFT_FROZEN) {
            let w = input.left_frozen_width.max(0.0);
            let x = if rtl { width - w } else { 0.0 };
            rects.insert(
                LayoutRegion::LeftFrozenColumns,
                GridRect::new(x, columns_top, w, columns_height),
            );
            if rtl {
                body_right += w;
            } else {
                body_left += w;
            }
            if presence.contains(PanePresence::LEFT_FROZEN_DIVIDER) {
                let x = if rtl {
                    width - body_right - divider
                } else {
                    body_left
                };
                rects.insert(
                    LayoutRegion::LeftFrozenDivider,
                    GridRect::new(x, columns_top, divider, body_span),
                );
                if rtl {
                    body_right += divider;
                } else {
                    body_left += divider;
                }
            }
            Some((x, w))
        } else {
            None
        };

        let right_frozen = if presence.contains(PanePresence::RIGHT_FROZEN) {
            let w = input.right_frozen_width.max(0.0);
            let x = if rtl { 0.0 } else { width - w };
            rects.insert(
                LayoutRegion::RightFrozenColumns,
                GridRect::new(x, columns_top, w, columns_height),
            );
            if rtl {
                body_left += w;
            } else {
                body_right += w;
            }
            if presence.contains(PanePresence::RIGHT_FROZEN_DIVIDER) {
                let x = if rtl {
                    body_left
                } else {
                    width - body_right - divider
                };
                rects.insert(
                    LayoutRegion::RightFrozenDivider,
                    GridRect::new(x, columns_top, divider, body_span),
                );
                if rtl {
                    body_left += divider;
                } else {
                    body_right += divider;
                }
            }
            Some((x, w))
        } else {
            None
        };

        let body_width = width - body_left - body_right;
        rects.insert(
            LayoutRegion::BodyColumns,
            GridRect::new(body_left, columns_top, body_width, columns_height),
        );

        let mut body_rows_top = columns_top + columns_height;
        if presence.contains(PanePresence::COLUMN_ROW_DIVIDER) {
            rects.insert(
                LayoutRegion::ColumnRowDivider,
                GridRect::new(0.0, body_rows_top, width, divider),
            );
            body_rows_top += divider;
        } else {
            body_rows_top += config.borders.border;
        }
        let rows_height = height - body_rows_top - body_rows_bottom;

        if let Some((x, w)) = left_frozen {
            rects.insert(
                LayoutRegion::LeftFrozenRows,
                GridRect::new(x, body_rows_top, w, rows_height),
            );
        }
        if let Some((x, w)) = right_frozen {
            rects.insert(
                LayoutRegion::RightFrozenRows,
                GridRect::new(x, body_rows_top, w, rows_height),
            );
        }
        rects.insert(
            LayoutRegion::BodyRows,
            GridRect::new(body_left, body_rows_top, body_width, rows_height),
        );

        if presence.contains(PanePresence::LOADING) {
            rects.insert(
                LayoutRegion::LoadingOverlay,
                GridRect::from_size(input.viewport),
            );
        }

        let show_frozen =
            self.should_show_frozen(width, input.left_frozen_width, input.right_frozen_width);
        let relayout_next_frame =
            input.has_frozen_columns() && show_frozen != input.frozen_shown();

        #[cfg(feature = "tracing")]
        if relayout_next_frame {
            tracing::debug!(
                message = "grid.frozen_flip",
                show_frozen,
                width,
                min_body_width = config.min_body_width
            );
        }

        PaneLayout {
            area: GridRect::from_size(input.viewport),
            rects,
            show_frozen,
            relayout_next_frame,
        }
    }
}

#[inline]
fn capped(intrinsic: f64, cap: f64) -> f64 {
    intrinsic.min(cap).max(0.0)
}

/// Lay out `input` with `config` in one call.
#[must_use]
pub fn compute_pane_layout(input: &PaneLayoutInput, config: &PaneLayoutConfig) -> PaneLayout {
    PaneLayoutEngine::new(*config).compute(input)
}
