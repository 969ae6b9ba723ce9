//! Shared formatting helpers for view models.
//!
//! All pure formatting functions (no ratatui styles, no layout) live here.
//! Functions that differ between tight card/table cells and verbose detail
//! popups are parameterized via [`FmtStyle`].

/// Controls compact (cells, narrow terminals) vs verbose (detail popups) output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FmtStyle {
    /// Compact: no spaces, short suffixes ("1.5G", "3d4h")
    Compact,
    /// Detail: spaces, full suffixes ("1.5 GiB", "3d 4h")
    Detail,
}

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const TIB: f64 = 1024.0 * 1024.0 * 1024.0 * 1024.0;

/// Format byte count as human-readable size.
///
/// Compact: `"1.5G"`, `"100.3M"`, `"50.0K"`, `"512B"`
/// Detail:  `"1.5 GiB"`, `"100.3 MiB"`, `"50.0 KiB"`, `"512 B"`
pub fn format_bytes(bytes: u64, style: FmtStyle) -> String {
    let (t, g, m, k, b) = match style {
        FmtStyle::Compact => ("T", "G", "M", "K", "B"),
        FmtStyle::Detail => (" TiB", " GiB", " MiB", " KiB", " B"),
    };
    let f = bytes as f64;
    if f >= TIB {
        format!("{:.1}{}", f / TIB, t)
    } else if f >= GIB {
        format!("{:.1}{}", f / GIB, g)
    } else if f >= MIB {
        format!("{:.1}{}", f / MIB, m)
    } else if f >= KIB {
        format!("{:.1}{}", f / KIB, k)
    } else {
        format!("{}{}", bytes, b)
    }
}

/// Format bytes-per-second speed: `"1.5M/s"` / `"1.5 MiB/s"`.
pub fn format_speed(bytes_per_sec: u64, style: FmtStyle) -> String {
    format!("{}/s", format_bytes(bytes_per_sec, style))
}

/// Format uptime in seconds.
///
/// Compact: `"3d4h"`, `"5h12m"`, `"7m"`
/// Detail:  `"3d 4h"`, `"5h 12m"`, `"7m 3s"`
pub fn format_uptime(secs: u64, style: FmtStyle) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let mins = (secs % 3600) / 60;
    match style {
        FmtStyle::Compact => {
            if days > 0 {
                format!("{}d{}h", days, hours)
            } else if hours > 0 {
                format!("{}h{}m", hours, mins)
            } else {
                format!("{}m", mins)
            }
        }
        FmtStyle::Detail => {
            if days > 0 {
                format!("{}d {}h", days, hours)
            } else if hours > 0 {
                format!("{}h {}m", hours, mins)
            } else {
                format!("{}m {}s", mins, secs % 60)
            }
        }
    }
}

/// Percentage with one decimal: `"45.0%"`.
pub fn format_percent(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Load average with two decimals.
pub fn format_load(load: f64) -> String {
    format!("{:.2}", load)
}

/// Truncate string to `max_chars` characters with unicode ellipsis (`…`).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Text-mode progress bar of `width` cells for a percentage in 0..=100.
pub fn bar(pct: f64, width: usize) -> String {
    let pct = pct.clamp(0.0, 100.0);
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    let mut s = String::with_capacity(width * 3);
    s.extend(std::iter::repeat_n('█', filled));
    s.extend(std::iter::repeat_n('░', width - filled));
    s
}
