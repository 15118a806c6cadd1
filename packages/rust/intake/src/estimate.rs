//! Deterministic crawl-duration estimation.
//!
//! The estimate is a display heuristic, not a scheduling contract: it
//! scales linearly with pages (capped at 10 per URL), by the square root
//! of depth, and adds a flat cost per custom selector.

use scrapeflow_shared::CrawlRequest;

/// Estimated crawl duration in whole seconds.
///
/// Total and deterministic for any input combination.
pub fn estimate_seconds(
    depth: u8,
    max_pages: u8,
    selector_count: usize,
    custom_selectors: bool,
    url_count: usize,
) -> u64 {
    let mut per_url = 5.0 * f64::from(max_pages.min(10));
    per_url *= f64::from(depth.max(1)).sqrt();
    if custom_selectors {
        per_url += 2.0 * selector_count as f64;
    }
    (per_url * url_count.max(1) as f64).round() as u64
}

/// Render a second count as a compact human-readable duration.
pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        let m = seconds / 60;
        let s = seconds % 60;
        if s == 0 {
            format!("{m}m")
        } else {
            format!("{m}m {s}s")
        }
    } else {
        let h = seconds / 3600;
        let m = (seconds % 3600) / 60;
        if m == 0 {
            format!("{h}h")
        } else {
            format!("{h}h {m}m")
        }
    }
}

/// Formatted duration estimate for a whole batch request.
pub fn estimate(request: &CrawlRequest) -> String {
    let opts = &request.options;
    format_duration(estimate_seconds(
        opts.depth,
        opts.max_pages,
        opts.selectors.len(),
        opts.use_custom_selectors,
        request.urls.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_is_five_seconds() {
        assert_eq!(estimate_seconds(1, 1, 0, false, 1), 5);
    }

    #[test]
    fn depth_scales_by_square_root() {
        // 5 * 10 * sqrt(4) = 100
        assert_eq!(estimate_seconds(4, 10, 0, false, 1), 100);
    }

    #[test]
    fn max_pages_is_capped_at_ten() {
        assert_eq!(
            estimate_seconds(1, 50, 0, false, 1),
            estimate_seconds(1, 10, 0, false, 1)
        );
    }

    #[test]
    fn selectors_add_cost_only_when_enabled() {
        assert_eq!(estimate_seconds(1, 1, 3, false, 1), 5);
        assert_eq!(estimate_seconds(1, 1, 3, true, 1), 11);
    }

    #[test]
    fn scales_with_url_count() {
        assert_eq!(estimate_seconds(1, 1, 0, false, 4), 20);
        // Zero URLs is treated as one for display purposes.
        assert_eq!(estimate_seconds(1, 1, 0, false, 0), 5);
    }

    #[test]
    fn format_seconds_only() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(59), "59s");
    }

    #[test]
    fn format_minutes() {
        assert_eq!(format_duration(60), "1m");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3599), "59m 59s");
    }

    #[test]
    fn format_hours() {
        assert_eq!(format_duration(3600), "1h");
        assert_eq!(format_duration(3660), "1h 1m");
        assert_eq!(format_duration(7200), "2h");
    }
}
