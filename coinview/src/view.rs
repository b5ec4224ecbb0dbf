//! Path-driven sub-view selection for the asset detail page.
//!
//! Everything here is a pure function of the current path: no state is
//! stored, so navigating (changing the path) is the only way to change the
//! active view.

use serde::{Deserialize, Serialize};

/// Path segment selecting the chart sub-view.
pub const CHART_SEGMENT: &str = "chart";
/// Path segment selecting the price sub-view.
pub const PRICE_SEGMENT: &str = "price";

/// The nested sub-view selected by the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActiveView {
    /// No sub-view; the trailing segment is missing or unrecognized.
    #[default]
    None,
    /// Time-series chart.
    Chart,
    /// Price breakdown.
    Price,
}

impl ActiveView {
    /// Match one path segment exactly (case-sensitive).
    #[must_use]
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            CHART_SEGMENT => Self::Chart,
            PRICE_SEGMENT => Self::Price,
            _ => Self::None,
        }
    }

    /// Relative link target that activates this view.
    #[must_use]
    pub const fn segment(self) -> Option<&'static str> {
        match self {
            Self::Chart => Some(CHART_SEGMENT),
            Self::Price => Some(PRICE_SEGMENT),
            Self::None => None,
        }
    }
}

/// Color scheme handed to the chart sub-view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Appearance {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

fn trim_slashes(path: &str) -> &str {
    path.trim_end_matches('/')
}

/// Resolve the active sub-view of `path` mounted under `base`.
///
/// The remainder of `path` after `base` must be exactly one segment equal to
/// `chart` or `price`. Anything else, including a `path` outside `base`,
/// yields [`ActiveView::None`]. Trailing slashes are ignored on both.
#[must_use]
pub fn resolve_view(path: &str, base: &str) -> ActiveView {
    let path = trim_slashes(path);
    let base = trim_slashes(base);
    path.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.contains('/'))
        .map_or(ActiveView::None, ActiveView::from_segment)
}

/// Identifier and active view parsed from a full detail path `/:id[/chart|/price]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoinRoute {
    /// Asset identifier (first path segment).
    pub id: String,
    /// Selected sub-view.
    pub view: ActiveView,
}

impl CoinRoute {
    /// Parse a full path. Returns `None` when the path names no identifier.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = trim_slashes(path);
        let rest = path.strip_prefix('/').unwrap_or(path);
        let id = rest.split('/').next().filter(|s| !s.is_empty())?;
        let view = resolve_view(&format!("/{rest}"), &format!("/{id}"));
        Some(Self {
            id: id.to_string(),
            view,
        })
    }

    /// Base path the sub-view segments hang off.
    #[must_use]
    pub fn base_path(&self) -> String {
        format!("/{}", self.id)
    }

    /// Full path of `view` for this asset.
    #[must_use]
    pub fn path_for(&self, view: ActiveView) -> String {
        match view.segment() {
            Some(seg) => format!("/{}/{seg}", self.id),
            None => self.base_path(),
        }
    }
}

/// One entry of the sub-view tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tab {
    /// View this tab selects.
    pub view: ActiveView,
    /// Visible label.
    pub label: &'static str,
    /// Relative link target.
    pub target: &'static str,
    /// Whether this tab is highlighted.
    pub is_active: bool,
}

/// The chart and price tabs, highlighted according to `active`.
#[must_use]
pub fn tabs(active: ActiveView) -> [Tab; 2] {
    [
        Tab {
            view: ActiveView::Chart,
            label: "Chart",
            target: CHART_SEGMENT,
            is_active: active == ActiveView::Chart,
        },
        Tab {
            view: ActiveView::Price,
            label: "Price",
            target: PRICE_SEGMENT,
            is_active: active == ActiveView::Price,
        },
    ]
}

/// Link target of the parent asset listing.
#[must_use]
pub const fn back_link() -> &'static str {
    "/"
}

/// Properties handed to a mounted sub-view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubViewProps {
    /// Asset identifier.
    pub identifier: String,
    /// Color scheme; only the chart receives one.
    pub appearance: Option<Appearance>,
}

/// The sub-view to mount, if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MountedView {
    /// Mount the chart with these props.
    Chart(SubViewProps),
    /// Mount the price breakdown with these props.
    Price(SubViewProps),
}

impl MountedView {
    /// Props regardless of which view is mounted.
    #[must_use]
    pub const fn props(&self) -> &SubViewProps {
        match self {
            Self::Chart(p) | Self::Price(p) => p,
        }
    }
}

/// Decide which sub-view to mount for `active`.
#[must_use]
pub fn mount_view(active: ActiveView, identifier: &str, appearance: Appearance) -> Option<MountedView> {
    match active {
        ActiveView::Chart => Some(MountedView::Chart(SubViewProps {
            identifier: identifier.to_string(),
            appearance: Some(appearance),
        })),
        ActiveView::Price => Some(MountedView::Price(SubViewProps {
            identifier: identifier.to_string(),
            appearance: None,
        })),
        ActiveView::None => None,
    }
}
