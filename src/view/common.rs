//! UI-agnostic view model types.
//!
//! These types represent presentation data without any dependency on a specific
//! rendering framework. The TUI maps them to ratatui styles and widgets.

/// Rendering switches that apply to every node of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Show cumulative ↑/↓ totals instead of the quota bar.
    pub force_traffic_text: bool,
}

/// Four-tier usage classification shared by every metric.
///
/// Thresholds are strict: exactly 90 is still a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum UsageTier {
    #[default]
    Nominal,
    Info,
    Warning,
    Critical,
}

impl UsageTier {
    pub fn from_percent(pct: f64) -> Self {
        if pct > 90.0 {
            UsageTier::Critical
        } else if pct > 70.0 {
            UsageTier::Warning
        } else if pct > 50.0 {
            UsageTier::Info
        } else {
            UsageTier::Nominal
        }
    }
}

/// Cell/row-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Green. Nominal usage, online status.
    Nominal,
    /// Blue.
    Info,
    /// Yellow.
    Warning,
    /// Red.
    Critical,
    /// Dark gray. Offline nodes, secondary text.
    Dimmed,
    /// Cyan. Node names.
    Accent,
}

impl From<UsageTier> for RowStyleClass {
    fn from(tier: UsageTier) -> Self {
        match tier {
            UsageTier::Nominal => RowStyleClass::Nominal,
            UsageTier::Info => RowStyleClass::Info,
            UsageTier::Warning => RowStyleClass::Warning,
            UsageTier::Critical => RowStyleClass::Critical,
        }
    }
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self { text, style: None }
    }

    pub fn styled(text: String, style: RowStyleClass) -> Self {
        Self {
            text,
            style: Some(style),
        }
    }
}

/// One table row, parameterized by entity ID type.
#[derive(Debug, Clone)]
pub struct ViewRow<Id> {
    pub id: Id,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableViewModel<Id> {
    pub title: String,
    pub headers: Vec<String>,
    /// Minimum column widths; the last column takes the remaining space.
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow<Id>>,
}

/// A labelled progress indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewGauge {
    pub label: String,
    /// Fill ratio in percent, always within `[0, 100]`.
    pub percent: f64,
    /// Headline value ("45.0%").
    pub value: String,
    /// Secondary text under the bar ("1.0G / 2.0G"), may be empty.
    pub note: String,
    pub tier: UsageTier,
}

impl ViewGauge {
    pub fn new(label: &str, percent: f64, value: String, note: String) -> Self {
        Self {
            label: label.to_string(),
            percent: percent.clamp(0.0, 100.0),
            value,
            note,
            tier: UsageTier::from_percent(percent),
        }
    }
}

/// A text line inside a card: label plus value, optionally styled.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewLine {
    pub label: String,
    pub value: ViewCell,
}

impl ViewLine {
    pub fn new(label: &str, value: ViewCell) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// One node rendered as a card.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeCard {
    pub uuid: String,
    pub title: String,
    /// Region and OS summary shown next to the title.
    pub subtitle: String,
    pub online: bool,
    /// Border / status strip style.
    pub status: RowStyleClass,
    /// Agent-reported error, if any.
    pub message: Option<String>,
    pub gauges: Vec<ViewGauge>,
    pub lines: Vec<ViewLine>,
    /// Bottom line: uptime or "Offline", load, activity.
    pub footer: Vec<ViewCell>,
}

/// Grid of cards.
#[derive(Debug, Clone)]
pub struct CardGridViewModel {
    pub title: String,
    /// Minimum card width; the frontend fits as many columns as it can.
    pub min_card_width: u16,
    pub card_height: u16,
    pub cards: Vec<NodeCard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds_are_strict() {
        assert_eq!(UsageTier::from_percent(0.0), UsageTier::Nominal);
        assert_eq!(UsageTier::from_percent(50.0), UsageTier::Nominal);
        assert_eq!(UsageTier::from_percent(50.1), UsageTier::Info);
        assert_eq!(UsageTier::from_percent(70.0), UsageTier::Info);
        assert_eq!(UsageTier::from_percent(70.5), UsageTier::Warning);
        assert_eq!(UsageTier::from_percent(90.0), UsageTier::Warning);
        assert_eq!(UsageTier::from_percent(90.1), UsageTier::Critical);
        assert_eq!(UsageTier::from_percent(250.0), UsageTier::Critical);
    }

    #[test]
    fn gauge_clamps_fill_but_tiers_raw_value() {
        let g = ViewGauge::new("Traffic", 140.0, "140.0%".into(), String::new());
        assert_eq!(g.percent, 100.0);
        assert_eq!(g.tier, UsageTier::Critical);

        let g = ViewGauge::new("CPU", -3.0, "0.0%".into(), String::new());
        assert_eq!(g.percent, 0.0);
        assert_eq!(g.tier, UsageTier::Nominal);
    }
}
