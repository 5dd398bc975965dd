//! System overview figures shown on the dashboard.

use serde::{Deserialize, Serialize};

/// One line of the "biggest packages" table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSize {
    pub name: String,
    /// Size as printed by the helper, e.g. `512.30 MiB`.
    pub size: String,
}

/// Aggregated package statistics for the dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_packages: usize,
    pub explicit_packages: usize,
    pub foreign_packages: usize,
    pub orphan_packages: usize,
    pub missing_from_aur: usize,
    /// Installed size as printed by the helper; empty when unknown.
    pub total_size: String,
    pub total_size_bytes: u64,
    pub top_packages: Vec<PackageSize>,
    pub pacman_cache_bytes: u64,
    pub helper_cache_bytes: u64,
}

impl DashboardStats {
    #[must_use]
    pub const fn cache_bytes(&self) -> u64 {
        self.pacman_cache_bytes + self.helper_cache_bytes
    }
}

/// Formats a byte count with binary units, e.g. `1.5 MiB`.
///
/// ```
/// use zacman::domain::dashboard::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1536), "1.5 KiB");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if bytes < UNIT {
        return format!("{bytes} B");
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT && exp < PREFIXES.len() - 1 {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!("{:.1} {}iB", bytes as f64 / div as f64, PREFIXES[exp])
}

/// Parses a human readable size such as `10.5 GiB` back into bytes.
///
/// Unknown or missing units are read as plain bytes; unparsable input yields 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_size_to_bytes(size: &str) -> u64 {
    let mut parts = size.split_whitespace();
    let Some(value) = parts.next().and_then(|v| v.parse::<f64>().ok()) else {
        return 0;
    };
    let unit = parts.next().unwrap_or_default().to_lowercase();

    let multiplier: f64 = if unit.starts_with("kib") || unit.starts_with("kb") {
        1024.0
    } else if unit.starts_with("mib") || unit.starts_with("mb") {
        1024.0 * 1024.0
    } else if unit.starts_with("gib") || unit.starts_with("gb") {
        1024.0 * 1024.0 * 1024.0
    } else if unit.starts_with("tib") || unit.starts_with("tb") {
        1024.0 * 1024.0 * 1024.0 * 1024.0
    } else {
        1.0
    };

    (value.max(0.0) * multiplier) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_unit_boundary() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024 / 2), "1.5 GiB");
    }

    #[test]
    fn parses_sizes_with_units() {
        assert_eq!(parse_size_to_bytes("2 KiB"), 2048);
        assert_eq!(parse_size_to_bytes("1.5 MiB"), 1_572_864);
        assert_eq!(parse_size_to_bytes("42"), 42);
        assert_eq!(parse_size_to_bytes("n/a"), 0);
    }

    #[test]
    fn cache_total_sums_both_caches() {
        let stats = DashboardStats {
            pacman_cache_bytes: 10,
            helper_cache_bytes: 5,
            ..Default::default()
        };
        assert_eq!(stats.cache_bytes(), 15);
    }
}
