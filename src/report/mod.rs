//! Report generation module
//!
//! Each report type is an independent query + reduce operation over the DAO
//! layer: filter by date or property, group, sum, then format rows as
//! strings. Reports are read-only and materialize fully before formatting.

use std::{fmt, io, str::FromStr};

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{configuration::State, error::Error};

mod analytics;
mod financial;
mod occupancy;

pub use analytics::{
    calculate_kpis, financial_overview, generate_insights, FinancialOverview,
    Kpis, PaymentBreakdown,
};

/// Tabular report output: headers plus stringly-formatted rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub title: String,
    pub subtitle: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub generated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    PaymentHistory,
    Occupancy,
    ExpenseReport,
    FinancialSummary,
    FinancialStatement,
    RentRoll,
    LeaseExpirations,
    TenantDirectory,
    PerformanceDashboard,
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportType::PaymentHistory => write!(f, "payment_history"),
            ReportType::Occupancy => write!(f, "occupancy"),
            ReportType::ExpenseReport => write!(f, "expense_report"),
            ReportType::FinancialSummary => write!(f, "financial_summary"),
            ReportType::FinancialStatement => write!(f, "financial_statement"),
            ReportType::RentRoll => write!(f, "rent_roll"),
            ReportType::LeaseExpirations => write!(f, "lease_expirations"),
            ReportType::TenantDirectory => write!(f, "tenant_directory"),
            ReportType::PerformanceDashboard => {
                write!(f, "performance_dashboard")
            },
        }
    }
}

impl FromStr for ReportType {
    type Err = io::Error;

    fn from_str(value: &str) -> Result<ReportType, Self::Err> {
        match value {
            "payment_history" => Ok(ReportType::PaymentHistory),
            "occupancy" => Ok(ReportType::Occupancy),
            "expense_report" => Ok(ReportType::ExpenseReport),
            "financial_summary" => Ok(ReportType::FinancialSummary),
            "financial_statement" => Ok(ReportType::FinancialStatement),
            "rent_roll" => Ok(ReportType::RentRoll),
            "lease_expirations" => Ok(ReportType::LeaseExpirations),
            "tenant_directory" => Ok(ReportType::TenantDirectory),
            "performance_dashboard" => Ok(ReportType::PerformanceDashboard),
            _ => Err(io::Error::new(
                io::ErrorKind::Other,
                "Report type not supported",
            )),
        }
    }
}

/// Parsed report request parameters. Dates default to the epoch..now window.
#[derive(Debug, Clone)]
pub struct ReportParams {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub property_id: Option<i64>,
    pub within_days: i64,
}

pub async fn generate(
    state: &State,
    report_type: ReportType,
    params: &ReportParams,
) -> Result<ReportData, Error> {
    match report_type {
        ReportType::PaymentHistory => {
            financial::payment_history(state, params).await
        },
        ReportType::Occupancy => occupancy::occupancy_report(state).await,
        ReportType::ExpenseReport => {
            financial::expense_report(state, params).await
        },
        ReportType::FinancialSummary => {
            financial::financial_summary(state, params).await
        },
        ReportType::FinancialStatement => {
            financial::financial_statement(state, params).await
        },
        ReportType::RentRoll => {
            let property_id = params.property_id.ok_or_else(|| {
                Error::MissingParams(String::from(
                    "property_id is required for the rent roll report",
                ))
            })?;
            occupancy::rent_roll_report(state, property_id).await
        },
        ReportType::LeaseExpirations => {
            occupancy::lease_expirations_report(state, params.within_days)
                .await
        },
        ReportType::TenantDirectory => {
            occupancy::tenant_directory_report(state, params.property_id).await
        },
        ReportType::PerformanceDashboard => {
            occupancy::performance_dashboard(state, params.property_id).await
        },
    }
}

pub(crate) fn cutoff_after_days(
    now: DateTime<Utc>,
    days: i64,
) -> DateTime<Utc> {
    now + Duration::days(days)
}

/// `$1234.50` style currency formatting with two fixed decimals.
pub(crate) fn fmt_usd(value: &BigDecimal) -> String {
    format!("${}", value.with_scale_round(2, RoundingMode::HalfUp))
}

/// `87.50%` style percentage with two fixed decimals.
pub(crate) fn fmt_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

pub(crate) fn fmt_date(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub(crate) fn date_window_subtitle(
    from: &DateTime<Utc>,
    to: &DateTime<Utc>,
) -> String {
    format!("From {} to {}", fmt_date(from), fmt_date(to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    #[test]
    fn test_report_type_round_trip() {
        for report_type in [
            ReportType::PaymentHistory,
            ReportType::Occupancy,
            ReportType::ExpenseReport,
            ReportType::FinancialSummary,
            ReportType::FinancialStatement,
            ReportType::RentRoll,
            ReportType::LeaseExpirations,
            ReportType::TenantDirectory,
            ReportType::PerformanceDashboard,
        ] {
            let parsed =
                ReportType::from_str(&report_type.to_string()).unwrap();
            assert_eq!(parsed, report_type);
        }

        assert!(ReportType::from_str("vacancy").is_err());
    }

    #[test]
    fn test_fmt_usd_rounds_to_cents() {
        let value = BigDecimal::from_str("1234.5").unwrap();
        assert_eq!(fmt_usd(&value), "$1234.50");

        let value = BigDecimal::from_str("0.005").unwrap();
        assert_eq!(fmt_usd(&value), "$0.01");

        let value = BigDecimal::from_str("99").unwrap();
        assert_eq!(fmt_usd(&value), "$99.00");
    }

    #[test]
    fn test_fmt_percent() {
        assert_eq!(fmt_percent(0.0), "0.00%");
        assert_eq!(fmt_percent(66.666_666), "66.67%");
        assert_eq!(fmt_percent(100.0), "100.00%");
    }

    #[test]
    fn test_cutoff_after_days() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let cutoff = cutoff_after_days(now, 30);
        assert_eq!((cutoff - now).num_days(), 30);
    }
}
