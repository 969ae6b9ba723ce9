//! View modes and the cycling rule.

use std::fmt;

/// Layout used to render the node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Modern,
    Compact,
    Classic,
    Detailed,
    Earth,
}

/// Entry of the mode table: the mode plus whether narrow devices may use it.
#[derive(Debug, Clone, Copy)]
pub struct ModeOption {
    pub mode: ViewMode,
    pub mobile_supported: bool,
}

/// Selector order. `next` walks this table.
pub const MODE_OPTIONS: &[ModeOption] = &[
    ModeOption { mode: ViewMode::Modern, mobile_supported: true },
    ModeOption { mode: ViewMode::Compact, mobile_supported: true },
    ModeOption { mode: ViewMode::Classic, mobile_supported: true },
    ModeOption { mode: ViewMode::Detailed, mobile_supported: true },
    ModeOption { mode: ViewMode::Earth, mobile_supported: true },
];

impl ViewMode {
    pub const ALL: [ViewMode; 5] = [
        ViewMode::Modern,
        ViewMode::Compact,
        ViewMode::Classic,
        ViewMode::Detailed,
        ViewMode::Earth,
    ];

    /// Persisted identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Modern => "modern",
            ViewMode::Compact => "compact",
            ViewMode::Classic => "classic",
            ViewMode::Detailed => "detailed",
            ViewMode::Earth => "earth",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Modern => "Modern",
            ViewMode::Compact => "Compact",
            ViewMode::Classic => "Classic",
            ViewMode::Detailed => "Detailed",
            ViewMode::Earth => "Earth",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// Mode from a persisted value; anything unrecognized becomes `Modern`.
    pub fn from_stored(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    pub fn mobile_supported(&self) -> bool {
        MODE_OPTIONS
            .iter()
            .find(|o| o.mode == *self)
            .is_some_and(|o| o.mobile_supported)
    }

    fn eligible(is_mobile: bool) -> impl Iterator<Item = ViewMode> {
        MODE_OPTIONS
            .iter()
            .filter(move |o| !is_mobile || o.mobile_supported)
            .map(|o| o.mode)
    }

    pub fn is_eligible(&self, is_mobile: bool) -> bool {
        Self::eligible(is_mobile).any(|m| m == *self)
    }

    /// The mode after `current` among the modes usable on this device,
    /// wrapping around. An ineligible `current` (for example after the
    /// terminal shrank to mobile width) yields the first eligible mode.
    pub fn next(current: ViewMode, is_mobile: bool) -> ViewMode {
        next_in(MODE_OPTIONS, current, is_mobile)
    }

    /// The mode actually displayed for `current` on this device.
    pub fn current_or_first(current: ViewMode, is_mobile: bool) -> ViewMode {
        if current.is_eligible(is_mobile) {
            current
        } else {
            Self::eligible(is_mobile).next().unwrap_or(current)
        }
    }

    /// Mode bound to digit key `n` (1-based), in selector order.
    pub fn from_index(n: usize) -> Option<ViewMode> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn next_in(options: &[ModeOption], current: ViewMode, is_mobile: bool) -> ViewMode {
    let modes: Vec<ViewMode> = options
        .iter()
        .filter(|o| !is_mobile || o.mobile_supported)
        .map(|o| o.mode)
        .collect();
    let Some(&first) = modes.first() else {
        return current;
    };
    match modes.iter().position(|m| *m == current) {
        Some(pos) => modes.get(pos + 1).copied().unwrap_or(first),
        None => first,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_from_modern_wraps_back_to_modern() {
        let mut mode = ViewMode::Modern;
        let mut seen = Vec::new();
        for _ in 0..5 {
            mode = ViewMode::next(mode, false);
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![
                ViewMode::Compact,
                ViewMode::Classic,
                ViewMode::Detailed,
                ViewMode::Earth,
                ViewMode::Modern,
            ]
        );
        assert_eq!(ViewMode::next(mode, false), ViewMode::Compact);
    }

    #[test]
    fn mobile_cycle_matches_desktop_when_all_supported() {
        let mut mode = ViewMode::Modern;
        for _ in 0..5 {
            mode = ViewMode::next(mode, true);
        }
        assert_eq!(mode, ViewMode::Modern);
    }

    #[test]
    fn desktop_only_mode_is_skipped_on_mobile() {
        let table = [
            ModeOption { mode: ViewMode::Modern, mobile_supported: true },
            ModeOption { mode: ViewMode::Detailed, mobile_supported: false },
            ModeOption { mode: ViewMode::Earth, mobile_supported: true },
        ];
        assert_eq!(next_in(&table, ViewMode::Modern, true), ViewMode::Earth);
        assert_eq!(next_in(&table, ViewMode::Modern, false), ViewMode::Detailed);
        assert_eq!(next_in(&table, ViewMode::Detailed, true), ViewMode::Modern);
        assert_eq!(next_in(&table, ViewMode::Compact, false), ViewMode::Modern);
        assert_eq!(next_in(&[], ViewMode::Earth, false), ViewMode::Earth);
    }

    #[test]
    fn stored_values_are_validated() {
        assert_eq!(ViewMode::from_stored("compact"), ViewMode::Compact);
        assert_eq!(ViewMode::from_stored("xyz"), ViewMode::Modern);
        assert_eq!(ViewMode::from_stored(""), ViewMode::Modern);
        assert_eq!(ViewMode::parse("Earth"), None);
        for mode in ViewMode::ALL {
            assert_eq!(ViewMode::parse(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn digit_keys_map_in_selector_order() {
        assert_eq!(ViewMode::from_index(1), Some(ViewMode::Modern));
        assert_eq!(ViewMode::from_index(5), Some(ViewMode::Earth));
        assert_eq!(ViewMode::from_index(0), None);
        assert_eq!(ViewMode::from_index(6), None);
    }
}
