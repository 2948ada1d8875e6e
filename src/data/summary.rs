use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::classify::{split_indices, Allowlist, Split};
use super::model::{GroupField, UsageDataset};

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// One row of the merged summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    /// Value of the active grouping field.
    pub group: String,
    pub unauthorized_users: usize,
    pub unauthorized_devices: usize,
    /// Sorted, deduplicated unauthorized usernames, joined with `", "`.
    pub usernames: String,
    /// Distinct authorized device ids in the group; 0 when it has none.
    pub authorized_devices: usize,
    /// `unauthorized_devices / authorized_devices * 100`, rounded to two
    /// decimals; exactly 0 when the denominator is 0.
    pub percentage: f64,
    /// Display string for the chart bars.
    pub label: String,
}

/// Overall distinct counts across the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTotals {
    pub unauthorized_users: usize,
    pub unauthorized_devices: usize,
    pub authorized_devices: usize,
}

/// The fully derived result of one pipeline pass for one grouping field.
#[derive(Debug, Clone)]
pub struct Report {
    pub group_field: GroupField,
    pub totals: ReportTotals,
    /// Sorted ascending by percentage; ties keep group-key order.
    pub rows: Vec<GroupSummary>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Per-group accumulator for the unauthorized split.
#[derive(Debug, Default)]
struct UnauthorizedGroup {
    users: BTreeSet<String>,
    devices: HashSet<String>,
}

/// Run the aggregation pipeline: split, group both sides, left-join on the
/// unauthorized groups with zero fill, derive percentage and label, sort.
///
/// Pure function of its inputs; callers re-run it in full on every upload
/// or grouping change.
pub fn build_report(
    dataset: &UsageDataset,
    allowlist: &Allowlist,
    group_field: GroupField,
) -> Report {
    let split = split_indices(dataset, allowlist);

    // Unauthorized side: distinct users and devices per group.
    let mut unauthorized: BTreeMap<String, UnauthorizedGroup> = BTreeMap::new();
    for &i in &split.unauthorized {
        let record = &dataset.records[i];
        let group = unauthorized
            .entry(group_field.value(record).to_string())
            .or_default();
        group.users.insert(record.username.clone());
        group.devices.insert(record.device_id.clone());
    }

    // Authorized side: distinct devices per group.
    let mut authorized: BTreeMap<String, HashSet<String>> = BTreeMap::new();
    for &i in &split.authorized {
        let record = &dataset.records[i];
        authorized
            .entry(group_field.value(record).to_string())
            .or_default()
            .insert(record.device_id.clone());
    }

    // Left join: one row per unauthorized group, authorized-only groups
    // never appear. Join order is group-key order (BTreeMap iteration).
    let mut rows: Vec<GroupSummary> = unauthorized
        .into_iter()
        .map(|(group, agg)| {
            let authorized_devices = authorized.get(&group).map_or(0, HashSet::len);
            let percentage = unauthorized_percentage(agg.devices.len(), authorized_devices);
            let usernames = agg
                .users
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let label = format!(
                "{} Users / UD: {} / AD: {} / UD %: {percentage}%",
                agg.users.len(),
                agg.devices.len(),
                authorized_devices,
            );
            GroupSummary {
                group,
                unauthorized_users: agg.users.len(),
                unauthorized_devices: agg.devices.len(),
                usernames,
                authorized_devices,
                percentage,
                label,
            }
        })
        .collect();

    // sort_by is stable: equal percentages keep join order.
    rows.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));

    Report {
        group_field,
        totals: totals(dataset, &split),
        rows,
    }
}

/// `unauthorized / authorized * 100`, rounded to two decimals; exactly 0
/// when there is nothing authorized to compare against.
pub fn unauthorized_percentage(unauthorized: usize, authorized: usize) -> f64 {
    if authorized == 0 {
        return 0.0;
    }
    let pct = unauthorized as f64 / authorized as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

fn totals(dataset: &UsageDataset, split: &Split) -> ReportTotals {
    let mut users: HashSet<&str> = HashSet::new();
    let mut devices: HashSet<&str> = HashSet::new();
    let mut authorized_devices: HashSet<&str> = HashSet::new();

    for &i in &split.unauthorized {
        let record = &dataset.records[i];
        users.insert(&record.username);
        devices.insert(&record.device_id);
    }
    for &i in &split.authorized {
        authorized_devices.insert(&dataset.records[i].device_id);
    }

    ReportTotals {
        unauthorized_users: users.len(),
        unauthorized_devices: devices.len(),
        authorized_devices: authorized_devices.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::UsageRecord;

    const AUTHORIZED: &str = "SM-T295";
    const ROGUE: &str = "iPhone 15";

    fn record(user: &str, device: &str, model: &str, area: &str, region: &str) -> UsageRecord {
        UsageRecord {
            username: user.to_string(),
            device_id: device.to_string(),
            device_model: model.to_string(),
            area: area.to_string(),
            region: region.to_string(),
        }
    }

    fn report(records: Vec<UsageRecord>, field: GroupField) -> Report {
        build_report(&UsageDataset { records }, &Allowlist::builtin(), field)
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(unauthorized_percentage(1, 3), 33.33);
        assert_eq!(unauthorized_percentage(2, 3), 66.67);
        assert_eq!(unauthorized_percentage(2, 2), 100.0);
        assert_eq!(unauthorized_percentage(5, 2), 250.0);
    }

    #[test]
    fn percentage_is_zero_when_nothing_is_authorized() {
        assert_eq!(unauthorized_percentage(5, 0), 0.0);
        assert_eq!(unauthorized_percentage(0, 0), 0.0);
    }

    // ── build_report ─────────────────────────────────────────────────────────

    #[test]
    fn two_group_scenario() {
        // North: 3 unauthorized records (bob, alice, bob on 2 devices) and
        // 2 authorized devices. South: authorized only.
        let rows = vec![
            record("bob", "U-1", ROGUE, "North", "EMEA"),
            record("alice", "U-1", ROGUE, "North", "EMEA"),
            record("bob", "U-2", ROGUE, "North", "EMEA"),
            record("carol", "A-1", AUTHORIZED, "North", "EMEA"),
            record("carol", "A-2", AUTHORIZED, "North", "EMEA"),
            record("dan", "A-3", AUTHORIZED, "South", "EMEA"),
            record("dan", "A-4", AUTHORIZED, "South", "EMEA"),
            record("erin", "A-5", AUTHORIZED, "South", "EMEA"),
            record("erin", "A-6", AUTHORIZED, "South", "EMEA"),
        ];
        let report = report(rows, GroupField::Area);

        assert_eq!(report.rows.len(), 1);
        let north = &report.rows[0];
        assert_eq!(north.group, "North");
        assert_eq!(north.unauthorized_users, 2);
        assert_eq!(north.unauthorized_devices, 2);
        assert_eq!(north.usernames, "alice, bob");
        assert_eq!(north.authorized_devices, 2);
        assert_eq!(north.percentage, 100.0);
        assert_eq!(north.label, "2 Users / UD: 2 / AD: 2 / UD %: 100%");
    }

    #[test]
    fn group_without_authorized_devices_gets_zero_percentage() {
        let rows = (0..5)
            .map(|i| record("mallory", &format!("U-{i}"), ROGUE, "West", "APAC"))
            .collect();
        let report = report(rows, GroupField::Area);

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].unauthorized_devices, 5);
        assert_eq!(report.rows[0].authorized_devices, 0);
        assert_eq!(report.rows[0].percentage, 0.0);
        assert_eq!(report.rows[0].label, "1 Users / UD: 5 / AD: 0 / UD %: 0%");
    }

    #[test]
    fn rows_cover_exactly_the_unauthorized_groups() {
        let rows = vec![
            record("a", "U-1", ROGUE, "North", "EMEA"),
            record("b", "U-2", ROGUE, "South", "EMEA"),
            record("c", "A-1", AUTHORIZED, "East", "APAC"),
        ];
        let report = report(rows, GroupField::Area);

        let groups: Vec<&str> = report.rows.iter().map(|r| r.group.as_str()).collect();
        // East has no unauthorized rows, so the left join drops it.
        assert_eq!(groups, vec!["North", "South"]);
    }

    #[test]
    fn rows_sort_ascending_by_percentage() {
        // North: 2/1 → 200%; South: 1/2 → 50%; West: 3/0 → 0%.
        let rows = vec![
            record("a", "U-1", ROGUE, "North", "EMEA"),
            record("a", "U-2", ROGUE, "North", "EMEA"),
            record("x", "A-1", AUTHORIZED, "North", "EMEA"),
            record("b", "U-3", ROGUE, "South", "EMEA"),
            record("y", "A-2", AUTHORIZED, "South", "EMEA"),
            record("y", "A-3", AUTHORIZED, "South", "EMEA"),
            record("c", "U-4", ROGUE, "West", "APAC"),
            record("c", "U-5", ROGUE, "West", "APAC"),
            record("c", "U-6", ROGUE, "West", "APAC"),
        ];
        let report = report(rows, GroupField::Area);

        let pcts: Vec<f64> = report.rows.iter().map(|r| r.percentage).collect();
        assert_eq!(pcts, vec![0.0, 50.0, 200.0]);
        for pair in report.rows.windows(2) {
            assert!(pair[0].percentage <= pair[1].percentage);
        }
    }

    #[test]
    fn equal_percentages_keep_group_key_order() {
        // Both groups end up at 100%; the stable sort must keep the
        // lexicographic join order.
        let rows = vec![
            record("a", "U-1", ROGUE, "Zeta", "EMEA"),
            record("x", "A-1", AUTHORIZED, "Zeta", "EMEA"),
            record("b", "U-2", ROGUE, "Alpha", "EMEA"),
            record("y", "A-2", AUTHORIZED, "Alpha", "EMEA"),
        ];
        let report = report(rows, GroupField::Area);

        let groups: Vec<&str> = report.rows.iter().map(|r| r.group.as_str()).collect();
        assert_eq!(groups, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn usernames_are_sorted_deduplicated_and_case_sensitive() {
        let rows = vec![
            record("bob", "U-1", ROGUE, "North", "EMEA"),
            record("Alice", "U-2", ROGUE, "North", "EMEA"),
            record("bob", "U-3", ROGUE, "North", "EMEA"),
            record("alice", "U-4", ROGUE, "North", "EMEA"),
        ];
        let report = report(rows, GroupField::Area);

        // Lexicographic byte order: uppercase sorts before lowercase.
        assert_eq!(report.rows[0].usernames, "Alice, alice, bob");
        assert_eq!(report.rows[0].unauthorized_users, 3);
    }

    #[test]
    fn label_percentage_prints_minimal_decimals() {
        // 1/3 → 33.33, 1/1 → 100, 0 authorized → 0.
        let rows = vec![
            record("a", "U-1", ROGUE, "North", "EMEA"),
            record("x", "A-1", AUTHORIZED, "North", "EMEA"),
            record("x", "A-2", AUTHORIZED, "North", "EMEA"),
            record("x", "A-3", AUTHORIZED, "North", "EMEA"),
        ];
        let report = report(rows, GroupField::Area);
        assert_eq!(report.rows[0].label, "1 Users / UD: 1 / AD: 3 / UD %: 33.33%");
    }

    #[test]
    fn grouping_by_region_uses_the_region_field() {
        let rows = vec![
            record("a", "U-1", ROGUE, "North", "EMEA"),
            record("b", "U-2", ROGUE, "South", "APAC"),
        ];
        let report = report(rows, GroupField::Region);

        let groups: Vec<&str> = report.rows.iter().map(|r| r.group.as_str()).collect();
        assert_eq!(groups, vec!["APAC", "EMEA"]);
        assert_eq!(report.group_field, GroupField::Region);
    }

    #[test]
    fn totals_count_distinct_across_all_groups() {
        let rows = vec![
            record("a", "U-1", ROGUE, "North", "EMEA"),
            record("a", "U-1", ROGUE, "South", "APAC"),
            record("b", "U-2", ROGUE, "South", "APAC"),
            record("x", "A-1", AUTHORIZED, "North", "EMEA"),
            record("y", "A-1", AUTHORIZED, "South", "APAC"),
        ];
        let report = report(rows, GroupField::Area);

        assert_eq!(
            report.totals,
            ReportTotals {
                unauthorized_users: 2,
                unauthorized_devices: 2,
                authorized_devices: 1,
            }
        );
    }

    #[test]
    fn empty_dataset_yields_empty_report() {
        let report = report(Vec::new(), GroupField::Area);
        assert!(report.rows.is_empty());
        assert_eq!(report.totals, ReportTotals::default());
    }
}
