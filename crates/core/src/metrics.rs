//! Batch metrics over parsed analysis reports.
//!
//! Rolls a batch of reports up into the contact-center KPIs shown on dashboards: average CSAT,
//! first call resolution rate, CSAT distribution and the most frequent issues.

use crate::analysis::AnalysisReport;
use crate::constants::TOP_ISSUES_LIMIT;
use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchMetrics {
    pub total_reports: usize,
    /// Reports that carried a CSAT score
    pub scored_reports: usize,
    /// Mean CSAT over scored reports
    pub avg_csat: Option<f64>,
    /// Reports that carried an FCR flag
    pub fcr_reports: usize,
    /// Share of FCR-flagged reports resolved on first contact
    pub fcr_rate: Option<f64>,
    /// Count of reports per CSAT score on the 1-5 scale
    pub csat_distribution: BTreeMap<u8, usize>,
    /// Most frequent issues, lowercased, with their counts
    pub top_issues: Vec<(String, usize)>,
    pub generated_at: DateTime<Utc>,
}

/// Aggregates `reports` into batch metrics stamped with the current time.
pub fn aggregate_reports(reports: &[AnalysisReport]) -> BatchMetrics {
    aggregate_reports_at(reports, Utc::now())
}

/// Aggregates `reports` into batch metrics stamped with `generated_at`.
pub fn aggregate_reports_at(reports: &[AnalysisReport], generated_at: DateTime<Utc>) -> BatchMetrics {
    if reports.is_empty() {
        tracing::warn!("aggregating metrics over an empty batch");
    }

    let mut csat_distribution: BTreeMap<u8, usize> = (1..=5).map(|score| (score, 0)).collect();
    let mut csat_total = 0u32;
    let mut scored_reports = 0usize;
    let mut fcr_reports = 0usize;
    let mut fcr_resolved = 0usize;
    let mut issue_counts: HashMap<String, usize> = HashMap::new();

    for report in reports {
        if let Some(score) = report.csat {
            scored_reports += 1;
            csat_total += u32::from(score.value());
            if let Some(count) = csat_distribution.get_mut(&score.value()) {
                *count += 1;
            }
        }

        if let Some(resolved) = report.fcr {
            fcr_reports += 1;
            if resolved {
                fcr_resolved += 1;
            }
        }

        for issue in &report.issues {
            let key = issue.trim().to_lowercase();
            if !key.is_empty() {
                *issue_counts.entry(key).or_insert(0) += 1;
            }
        }
    }

    let mut top_issues: Vec<(String, usize)> = issue_counts.into_iter().collect();
    top_issues.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_issues.truncate(TOP_ISSUES_LIMIT);

    BatchMetrics {
        total_reports: reports.len(),
        scored_reports,
        avg_csat: ratio(f64::from(csat_total), scored_reports),
        fcr_reports,
        fcr_rate: ratio(fcr_resolved as f64, fcr_reports),
        csat_distribution,
        top_issues,
        generated_at,
    }
}

fn ratio(numerator: f64, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator / denominator as f64)
    }
}

impl BatchMetrics {
    /// CSV with one `metric,value,timestamp` row per headline metric.
    ///
    /// Rates and averages have two decimals; missing values leave the cell empty.
    pub fn to_csv(&self) -> String {
        let timestamp = self
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let fmt = |value: Option<f64>| value.map(|v| format!("{:.2}", v)).unwrap_or_default();

        [
            "metric,value,timestamp".to_string(),
            format!("total_reports,{},{}", self.total_reports, timestamp),
            format!("avg_csat,{},{}", fmt(self.avg_csat), timestamp),
            format!("fcr_rate,{},{}", fmt(self.fcr_rate), timestamp),
        ]
        .join("\n")
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if serialization fails.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(CoreError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::parse_report;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 22, 10, 30, 0).unwrap()
    }

    fn reports() -> Vec<AnalysisReport> {
        vec![
            parse_report("ISSUES IDENTIFIED\n- Billing error\n- long wait\nPREDICTED CSAT\n4\nFCR\ntrue"),
            parse_report("ISSUES IDENTIFIED\n- billing error \nPREDICTED CSAT\n2\nFCR\nfalse"),
            parse_report("PREDICTED CSAT\nScore: 10\nFCR\ntrue"),
            parse_report("No structure at all"),
        ]
    }

    #[test]
    fn test_aggregate_headline_metrics() {
        let metrics = aggregate_reports_at(&reports(), at());
        assert_eq!(metrics.total_reports, 4);
        assert_eq!(metrics.scored_reports, 3);
        assert_eq!(metrics.avg_csat, Some(7.0 / 3.0));
        assert_eq!(metrics.fcr_reports, 3);
        assert_eq!(metrics.fcr_rate, Some(2.0 / 3.0));
    }

    #[test]
    fn test_csat_distribution_has_all_buckets() {
        let metrics = aggregate_reports_at(&reports(), at());
        let expected: BTreeMap<u8, usize> = [(1, 1), (2, 1), (3, 0), (4, 1), (5, 0)].into();
        assert_eq!(metrics.csat_distribution, expected);
    }

    #[test]
    fn test_top_issues_are_case_folded_and_ranked() {
        let metrics = aggregate_reports_at(&reports(), at());
        assert_eq!(
            metrics.top_issues,
            vec![("billing error".to_string(), 2), ("long wait".to_string(), 1)]
        );
    }

    #[test]
    fn test_out_of_scale_csat_counts_in_average_only() {
        let metrics = aggregate_reports_at(&[parse_report("PREDICTED CSAT\n9")], at());
        assert_eq!(metrics.avg_csat, Some(9.0));
        assert!(metrics.csat_distribution.values().all(|count| *count == 0));
    }

    #[test]
    fn test_empty_batch() {
        let metrics = aggregate_reports_at(&[], at());
        assert_eq!(metrics.total_reports, 0);
        assert_eq!(metrics.avg_csat, None);
        assert_eq!(metrics.fcr_rate, None);
        assert!(metrics.top_issues.is_empty());
        assert_eq!(metrics.csat_distribution.len(), 5);
    }

    #[test]
    fn test_to_csv() {
        let metrics = aggregate_reports_at(&reports(), at());
        assert_eq!(
            metrics.to_csv(),
            "metric,value,timestamp\n\
             total_reports,4,2026-01-22T10:30:00Z\n\
             avg_csat,2.33,2026-01-22T10:30:00Z\n\
             fcr_rate,0.67,2026-01-22T10:30:00Z"
        );

        let empty = aggregate_reports_at(&[], at());
        assert!(empty.to_csv().contains("\navg_csat,,2026-01-22T10:30:00Z\n"));
    }

    #[test]
    fn test_to_json() {
        let json = aggregate_reports_at(&reports(), at()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_reports"], 4);
        assert_eq!(value["csat_distribution"]["4"], 1);
        assert_eq!(value["top_issues"][0][0], "billing error");
        assert_eq!(value["generated_at"], "2026-01-22T10:30:00Z");
    }
}
