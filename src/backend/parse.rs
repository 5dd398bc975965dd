//! Parsers for package manager output.
//!
//! Every parser is lenient: lines that do not fit the expected shape are
//! skipped rather than failing the whole listing.

use crate::domain::{parse_size_to_bytes, DashboardStats, PackageRecord, PackageSize, PendingUpdate, Source};
use std::collections::{HashMap, HashSet};

/// Section marker printed by the shell scripts, e.g. `::installed`.
const SECTION_PREFIX: &str = "::";

/// Parses `pacman -Sl` output (`repo name version [installed]`).
#[must_use]
pub fn parse_sync_list(output: &str) -> Vec<PackageRecord> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let (source, name, version) = (fields.next()?, fields.next()?, fields.next()?);
            let mut record = PackageRecord::new(source, name, version);
            record.installed = fields.next().is_some_and(|f| f.starts_with("[installed"));
            Some(record)
        })
        .collect()
}

/// Parses helper search output.
///
/// Result lines look like `aur/name 1.0-1 [+12 ~0.5] [Installed]`; the
/// description follows on the next indented line.
#[must_use]
pub fn parse_remote_search(output: &str) -> Vec<PackageRecord> {
    let mut records: Vec<PackageRecord> = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with([' ', '\t']) {
            if let Some(last) = records.last_mut() {
                if last.description.is_empty() {
                    last.description = line.trim().to_string();
                }
            }
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(qualified), Some(version)) = (fields.next(), fields.next()) else {
            continue;
        };
        let Some((source, name)) = qualified.split_once('/') else {
            continue;
        };

        let mut record = PackageRecord::new(source, name, version);
        record.installed = line.contains("[Installed");
        records.push(record);
    }

    records
}

/// Splits script output into `::name` sections.
fn sections(output: &str) -> HashMap<&str, Vec<&str>> {
    let mut sections: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut current: Option<&str> = None;

    for line in output.lines() {
        if let Some(name) = line.strip_prefix(SECTION_PREFIX) {
            current = Some(name.trim());
            sections.entry(name.trim()).or_default();
        } else if let Some(name) = current {
            sections.entry(name).or_default().push(line);
        }
    }

    sections
}

fn name_set<'a>(lines: Option<&Vec<&'a str>>) -> HashSet<&'a str> {
    lines
        .into_iter()
        .flatten()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Parses the installed-packages script.
///
/// Sections: `installed` (`pacman -Qi` blocks), `foreign`, `explicit` and
/// `orphan` (one name per line), `sync` (`pacman -Sl`, used to find the
/// repository each package came from).
#[must_use]
pub fn parse_installed(output: &str) -> Vec<PackageRecord> {
    let sections = sections(output);

    let foreign = name_set(sections.get("foreign"));
    let explicit = name_set(sections.get("explicit"));
    let orphan = name_set(sections.get("orphan"));
    let repos: HashMap<&str, &str> = sections
        .get("sync")
        .into_iter()
        .flatten()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let repo = fields.next()?;
            Some((fields.next()?, repo))
        })
        .collect();

    let info = sections.get("installed").map(|l| l.join("\n")).unwrap_or_default();

    info.split("\n\n")
        .filter_map(parse_info_block)
        .map(|(name, version, description)| {
            let source = if foreign.contains(name.as_str()) {
                Source::Aur
            } else {
                repos.get(name.as_str()).map_or(Source::Local, |repo| Source::from(*repo))
            };

            let mut record = PackageRecord::new(source, name, version);
            record.description = description;
            record.installed = true;
            record.explicit = explicit.contains(record.name.as_str());
            record.orphan = orphan.contains(record.name.as_str());
            record
        })
        .collect()
}

/// Reads `Name`, `Version` and `Description` out of one `-Qi`/`-Si` block.
fn parse_info_block(block: &str) -> Option<(String, String, String)> {
    let mut name = None;
    let mut version = String::new();
    let mut description = String::new();

    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "Name" => name = Some(value.trim().to_string()),
            "Version" => version = value.trim().to_string(),
            "Description" => description = value.trim().to_string(),
            _ => {}
        }
    }

    name.filter(|n| !n.is_empty()).map(|n| (n, version, description))
}

/// Parses `helper -Qu` output (`name old -> new`).
#[must_use]
pub fn parse_updates(output: &str) -> Vec<PendingUpdate> {
    output
        .lines()
        .filter_map(|line| {
            let (name, versions) = line.trim().split_once(char::is_whitespace)?;
            Some(PendingUpdate {
                name: name.to_string(),
                versions: versions.split_whitespace().collect::<Vec<_>>().join(" "),
            })
        })
        .collect()
}

/// Parses one name per line, e.g. `pacman -Qdtq`.
#[must_use]
pub fn parse_name_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses the dashboard script.
///
/// Sections `total`, `explicit`, `foreign` and `orphan` hold a line count,
/// `stats` holds `helper -Ps` output, and the two cache sections hold byte
/// counts from `du -sb`.
#[must_use]
pub fn parse_dashboard(output: &str) -> DashboardStats {
    let sections = sections(output);
    let number = |section: &str| -> u64 {
        sections
            .get(section)
            .and_then(|lines| lines.iter().find_map(|l| l.split_whitespace().next()?.parse().ok()))
            .unwrap_or(0)
    };
    let count = |section: &str| usize::try_from(number(section)).unwrap_or(usize::MAX);

    let mut stats = DashboardStats {
        total_packages: count("total"),
        explicit_packages: count("explicit"),
        foreign_packages: count("foreign"),
        orphan_packages: count("orphan"),
        pacman_cache_bytes: number("pacman_cache"),
        helper_cache_bytes: number("helper_cache"),
        ..DashboardStats::default()
    };

    if let Some(lines) = sections.get("stats") {
        apply_helper_stats(&mut stats, lines);
    }
    stats
}

/// Picks total size, missing-from-AUR count and the biggest packages out of
/// `helper -Ps` output.
fn apply_helper_stats(stats: &mut DashboardStats, lines: &[&str]) {
    let mut in_top = false;

    for line in lines.iter().map(|l| l.trim()) {
        if line.contains("biggest packages") {
            in_top = true;
            continue;
        }

        if in_top {
            if line.is_empty() || line.starts_with("===") {
                in_top = false;
            } else if let Some((name, size)) = line.split_once(':') {
                stats.top_packages.push(PackageSize {
                    name: name.trim().to_string(),
                    size: size.trim().to_string(),
                });
            }
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key.contains("Total Size occupied") || key.contains("Total Installed Size") {
            stats.total_size = value.trim().to_string();
            stats.total_size_bytes = parse_size_to_bytes(value);
        } else if key.contains("Missing") && key.contains("AUR") {
            stats.missing_from_aur = value.split_whitespace().next().and_then(|n| n.parse().ok()).unwrap_or(0);
        }
    }
}
