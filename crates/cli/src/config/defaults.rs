// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! Individual config structs delegate to these constants via their
//! `default_*` methods.

/// Config file name looked up by discovery.
pub const CONFIG_FILE: &str = "xword.toml";

/// Default highlight colors.
pub mod highlight {
    /// Background of a highlighted match (pale yellow).
    pub const BACKGROUND: &str = "#FCF2C8";

    /// Foreground of a highlighted match.
    pub const TEXT: &str = "#000000";

    /// Opacity of overlay rectangles.
    pub const OVERLAY_ALPHA: f64 = 0.5;
}

/// Default continuous-mode throttle values, in milliseconds.
pub mod continuous {
    /// Minimum gap between re-scans under normal load.
    pub const SHORT_INTERVAL_MS: u64 = 600;

    /// Minimum gap between re-scans while backing off.
    pub const ESCALATED_INTERVAL_MS: u64 = 4_000;

    /// Sliding window over which triggers are counted.
    pub const WINDOW_MS: u64 = 6_000;

    /// Triggers tolerated per window before escalating.
    pub const THRESHOLD: usize = 8;

    /// How long an escalation lasts.
    pub const BACKOFF_MS: u64 = 20_000;
}

/// Template written by `xword init`.
pub const INIT_TEMPLATE: &str = r##"# xword configuration

[scope]
match_case = false
use_regex = false
scan_input_fields = true
scan_webpage_text = true
scan_markup = false
auto_highlight = false

[highlight]
background = "#FCF2C8"
text = "#000000"
overlay_alpha = 0.5

[continuous]
short_interval_ms = 600
escalated_interval_ms = 4000
window_ms = 6000
threshold = 8
backoff_ms = 20000

# [[rules]]
# search = "colour"
# replace = "color"
"##;
