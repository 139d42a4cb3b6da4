//! Lead analytics bucketing.
//!
//! All shaping (period labels, zero-filling, cross-tabulation, rates) is
//! pure code over `(status, createdAt)` rows so it can be tested without a
//! database. Timestamps are RFC 3339; rows that fail to parse are skipped.

use chrono::{DateTime, Datelike};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::model::lead::LeadStatus;

/// Pie-chart status breakdown. Every canonical status is present even at
/// zero, plus an explicit bucket for unrecognized status values.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusDistribution {
    pub total_leads: u64,
    pub new: u64,
    pub contacted: u64,
    pub qualified: u64,
    pub unqualified: u64,
    pub converted: u64,
    pub other: u64,
}

pub fn status_distribution(statuses: &[LeadStatus]) -> StatusDistribution {
    let mut dist = StatusDistribution {
        total_leads: statuses.len() as u64,
        new: 0,
        contacted: 0,
        qualified: 0,
        unqualified: 0,
        converted: 0,
        other: 0,
    };
    for status in statuses {
        match status {
            LeadStatus::New => dist.new += 1,
            LeadStatus::Contacted => dist.contacted += 1,
            LeadStatus::Qualified => dist.qualified += 1,
            LeadStatus::Unqualified => dist.unqualified += 1,
            LeadStatus::Converted => dist.converted += 1,
            LeadStatus::Other(_) => dist.other += 1,
        }
    }
    dist
}

/// Grouping granularity for the bar-chart trends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendGranularity {
    /// Labels are `YYYY`
    Year,
    /// Labels are `YYYY-MM` (zero-padded, so lexicographic = chronological)
    Month,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub labels: Vec<String>,
    pub datasets: BTreeMap<String, Vec<u64>>,
    pub total_per_status: BTreeMap<String, u64>,
}

fn period_label(ts: &str, granularity: TrendGranularity) -> Option<String> {
    let dt = DateTime::parse_from_rfc3339(ts).ok()?;
    Some(match granularity {
        TrendGranularity::Year => format!("{}", dt.year()),
        TrendGranularity::Month => format!("{}-{:02}", dt.year(), dt.month()),
    })
}

/// Cross-tabulates rows by period and status. Each dataset row is aligned
/// to the sorted label list and zero-filled for empty combinations.
pub fn build_trends(rows: &[(LeadStatus, String)], granularity: TrendGranularity) -> Trends {
    let mut labels_set = BTreeSet::new();
    let mut counts: BTreeMap<(String, String), u64> = BTreeMap::new();

    for (status, ts) in rows {
        let Some(label) = period_label(ts, granularity) else {
            continue;
        };
        labels_set.insert(label.clone());
        *counts
            .entry((status.as_str().to_string(), label))
            .or_insert(0) += 1;
    }

    let labels: Vec<String> = labels_set.into_iter().collect();
    let statuses: BTreeSet<String> = counts.keys().map(|(s, _)| s.clone()).collect();

    let mut datasets = BTreeMap::new();
    let mut total_per_status = BTreeMap::new();
    for status in statuses {
        let series: Vec<u64> = labels
            .iter()
            .map(|label| {
                counts
                    .get(&(status.clone(), label.clone()))
                    .copied()
                    .unwrap_or(0)
            })
            .collect();
        total_per_status.insert(status.clone(), series.iter().sum());
        datasets.insert(status, series);
    }

    Trends {
        labels,
        datasets,
        total_per_status,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadMetrics {
    pub total_leads: u64,
    pub converted_leads: u64,
    pub customer_retention_rate: f64,
    pub lead_win_rate: f64,
}

/// Retention rate and win rate are the same ratio by definition here;
/// both are kept so the response shape stays stable for the dashboard.
pub fn lead_metrics(total_leads: u64, converted_leads: u64) -> LeadMetrics {
    let rate = if total_leads > 0 {
        round2(converted_leads as f64 / total_leads as f64 * 100.0)
    } else {
        0.0
    };
    LeadMetrics {
        total_leads,
        converted_leads,
        customer_retention_rate: rate,
        lead_win_rate: rate,
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyMetrics {
    pub total_leads_per_month: Vec<u64>,
    /// Converted leads per month (index 0 = January)
    pub retention_data: Vec<u64>,
    pub win_rate_data: Vec<f64>,
}

/// Per-calendar-month totals, conversions and win rate for one year.
/// Always 12 entries; months without leads are zero, never a division
/// error.
pub fn monthly_metrics(rows: &[(LeadStatus, String)], year: i32) -> MonthlyMetrics {
    let mut totals = vec![0u64; 12];
    let mut converted = vec![0u64; 12];

    for (status, ts) in rows {
        let Ok(dt) = DateTime::parse_from_rfc3339(ts) else {
            continue;
        };
        if dt.year() != year {
            continue;
        }
        let index = (dt.month() - 1) as usize;
        totals[index] += 1;
        if *status == LeadStatus::Converted {
            converted[index] += 1;
        }
    }

    let win_rate = totals
        .iter()
        .zip(converted.iter())
        .map(|(&total, &conv)| {
            if total > 0 {
                round2(conv as f64 / total as f64 * 100.0)
            } else {
                0.0
            }
        })
        .collect();

    MonthlyMetrics {
        total_leads_per_month: totals,
        retention_data: converted,
        win_rate_data: win_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lead::CANONICAL_LEAD_STATUSES;

    fn row(status: &str, ts: &str) -> (LeadStatus, String) {
        (LeadStatus::parse(status), ts.to_string())
    }

    #[test]
    fn test_status_distribution_empty() {
        let dist = status_distribution(&[]);
        assert_eq!(dist.total_leads, 0);
        assert_eq!(dist.new, 0);
        assert_eq!(dist.contacted, 0);
        assert_eq!(dist.qualified, 0);
        assert_eq!(dist.unqualified, 0);
        assert_eq!(dist.converted, 0);
        assert_eq!(dist.other, 0);
    }

    #[test]
    fn test_status_distribution_counts_other_bucket() {
        let statuses = vec![
            LeadStatus::New,
            LeadStatus::New,
            LeadStatus::Converted,
            LeadStatus::Other("warm".to_string()),
        ];
        let dist = status_distribution(&statuses);
        assert_eq!(dist.total_leads, 4);
        assert_eq!(dist.new, 2);
        assert_eq!(dist.converted, 1);
        assert_eq!(dist.other, 1);
        assert_eq!(dist.qualified, 0);
    }

    #[test]
    fn test_status_distribution_zero_fill_survives_serialization() {
        let json = serde_json::to_value(status_distribution(&[])).unwrap();
        for key in ["new", "contacted", "qualified", "unqualified", "converted"] {
            assert_eq!(json[key], 0, "{} must be present at zero", key);
        }
        assert_eq!(json["totalLeads"], 0);
        // every canonical status is a key in the canonical list too
        assert_eq!(CANONICAL_LEAD_STATUSES.len(), 5);
    }

    #[test]
    fn test_trends_two_months_sorted_and_zero_filled() {
        let rows = vec![
            row("new", "2026-03-10T08:00:00+00:00"),
            row("new", "2026-01-05T10:00:00+00:00"),
            row("converted", "2026-03-15T09:30:00+00:00"),
        ];
        let trends = build_trends(&rows, TrendGranularity::Month);

        assert_eq!(trends.labels, vec!["2026-01", "2026-03"]);
        assert_eq!(trends.datasets["new"], vec![1, 1]);
        assert_eq!(trends.datasets["converted"], vec![0, 1]);
        assert_eq!(trends.total_per_status["new"], 2);
        assert_eq!(trends.total_per_status["converted"], 1);

        // per-status series sum to that status's total
        for (status, series) in &trends.datasets {
            assert_eq!(series.iter().sum::<u64>(), trends.total_per_status[status]);
        }
    }

    #[test]
    fn test_trends_yearly_labels() {
        let rows = vec![
            row("contacted", "2025-12-31T23:59:59+00:00"),
            row("contacted", "2026-01-01T00:00:00+00:00"),
        ];
        let trends = build_trends(&rows, TrendGranularity::Year);
        assert_eq!(trends.labels, vec!["2025", "2026"]);
        assert_eq!(trends.datasets["contacted"], vec![1, 1]);
    }

    #[test]
    fn test_trends_skips_unparseable_timestamps() {
        let rows = vec![row("new", "not-a-date"), row("new", "2026-05-01T00:00:00+00:00")];
        let trends = build_trends(&rows, TrendGranularity::Month);
        assert_eq!(trends.labels, vec!["2026-05"]);
        assert_eq!(trends.total_per_status["new"], 1);
    }

    #[test]
    fn test_lead_metrics_rounding() {
        let metrics = lead_metrics(3, 1);
        assert_eq!(metrics.customer_retention_rate, 33.33);
        assert_eq!(metrics.lead_win_rate, metrics.customer_retention_rate);
    }

    #[test]
    fn test_lead_metrics_zero_total() {
        let metrics = lead_metrics(0, 0);
        assert_eq!(metrics.customer_retention_rate, 0.0);
        assert_eq!(metrics.lead_win_rate, 0.0);
    }

    #[test]
    fn test_monthly_metrics_march_only() {
        let rows = vec![
            row("new", "2026-03-02T12:00:00+00:00"),
            row("converted", "2026-03-20T12:00:00+00:00"),
            // different year, must be excluded
            row("converted", "2025-03-20T12:00:00+00:00"),
        ];
        let metrics = monthly_metrics(&rows, 2026);

        assert_eq!(metrics.total_leads_per_month.len(), 12);
        assert_eq!(metrics.retention_data.len(), 12);
        assert_eq!(metrics.win_rate_data.len(), 12);

        for month in 0..12 {
            if month == 2 {
                assert_eq!(metrics.total_leads_per_month[month], 2);
                assert_eq!(metrics.retention_data[month], 1);
                assert_eq!(metrics.win_rate_data[month], 50.0);
            } else {
                assert_eq!(metrics.total_leads_per_month[month], 0);
                assert_eq!(metrics.retention_data[month], 0);
                assert_eq!(metrics.win_rate_data[month], 0.0);
            }
        }
    }
}
