//! Occupancy-side reports
//!
//! Occupancy, rent roll, lease expirations, tenant directory and the
//! performance dashboard.

use bigdecimal::BigDecimal;
use chrono::Utc;

use crate::{
    configuration::State,
    dao::postgre::{
        lease::{LeaseExpirationRow, RentRollRow},
        payment::StatusCount,
        tenant::TenantDirectoryRow,
        unit::OccupancyRow,
    },
    error::Error,
    types::PaymentStatus,
};

use super::{cutoff_after_days, fmt_date, fmt_percent, fmt_usd, ReportData};

pub async fn occupancy_report(state: &State) -> Result<ReportData, Error> {
    let rows = state
        .database
        .unit
        .get_occupancy_by_property(Utc::now())
        .await?;

    Ok(build_occupancy_report(&rows))
}

fn build_occupancy_report(rows: &[OccupancyRow]) -> ReportData {
    let generated = Utc::now();
    let headers = vec![
        String::from("Property"),
        String::from("Total Units"),
        String::from("Occupied Units"),
        String::from("Vacant Units"),
        String::from("Occupancy Rate"),
    ];

    let rows = rows
        .iter()
        .map(|row| {
            let vacant = row.total_units - row.occupied_units;
            let rate = occupancy_rate(row.occupied_units, row.total_units);
            vec![
                row.property.to_owned(),
                row.total_units.to_string(),
                row.occupied_units.to_string(),
                vacant.to_string(),
                fmt_percent(rate),
            ]
        })
        .collect();

    ReportData {
        title: String::from("Occupancy Report"),
        subtitle: Some(format!("Generated on {}", fmt_date(&generated))),
        headers,
        rows,
        generated,
    }
}

pub async fn rent_roll_report(
    state: &State,
    property_id: i64,
) -> Result<ReportData, Error> {
    let rows = state
        .database
        .lease
        .get_rent_roll(property_id, Utc::now())
        .await?;

    Ok(build_rent_roll_report(&rows))
}

fn build_rent_roll_report(rows: &[RentRollRow]) -> ReportData {
    let generated = Utc::now();
    let headers = vec![
        String::from("Property"),
        String::from("Unit"),
        String::from("Tenant"),
        String::from("Lease Start Date"),
        String::from("Lease End Date"),
        String::from("Rent Amount"),
        String::from("Deposit"),
    ];

    let rows = rows
        .iter()
        .map(|row| {
            vec![
                row.property.to_owned(),
                row.unit.to_owned(),
                row.tenant.to_owned(),
                fmt_date(&row.start_date),
                fmt_date(&row.end_date),
                fmt_usd(&row.rent_amount),
                row.deposit
                    .as_ref()
                    .map(fmt_usd)
                    .unwrap_or_else(|| String::from("N/A")),
            ]
        })
        .collect();

    ReportData {
        title: String::from("Rent Roll Report"),
        subtitle: Some(format!("As of {}", fmt_date(&generated))),
        headers,
        rows,
        generated,
    }
}

pub async fn lease_expirations_report(
    state: &State,
    within_days: i64,
) -> Result<ReportData, Error> {
    let cutoff = cutoff_after_days(Utc::now(), within_days);
    let rows = state.database.lease.get_expiring_before(cutoff).await?;

    let generated = Utc::now();
    let headers = vec![
        String::from("Property"),
        String::from("Unit"),
        String::from("Tenant"),
        String::from("Lease Start Date"),
        String::from("Lease End Date"),
        String::from("Contact"),
    ];

    let rows = rows
        .iter()
        .map(|row| {
            vec![
                row.property.to_owned(),
                row.unit.to_owned(),
                row.tenant.to_owned(),
                fmt_date(&row.start_date),
                fmt_date(&row.end_date),
                contact_of(row),
            ]
        })
        .collect();

    Ok(ReportData {
        title: String::from("Lease Expirations Report"),
        subtitle: Some(format!("By {}", fmt_date(&cutoff))),
        headers,
        rows,
        generated,
    })
}

fn contact_of(row: &LeaseExpirationRow) -> String {
    row.phone.to_owned().unwrap_or_else(|| row.email.to_owned())
}

pub async fn tenant_directory_report(
    state: &State,
    property_id: Option<i64>,
) -> Result<ReportData, Error> {
    let rows = state
        .database
        .tenant
        .get_directory(property_id, Utc::now())
        .await?;

    Ok(build_tenant_directory_report(&rows))
}

fn build_tenant_directory_report(rows: &[TenantDirectoryRow]) -> ReportData {
    let generated = Utc::now();

    let rows = rows
        .iter()
        .map(|row| {
            vec![
                row.name.to_owned(),
                row.email.to_owned(),
                row.phone.to_owned().unwrap_or_default(),
            ]
        })
        .collect();

    ReportData {
        title: String::from("Tenant Directory Report"),
        subtitle: Some(format!("Generated on {}", fmt_date(&generated))),
        headers: vec![
            String::from("Name"),
            String::from("Email"),
            String::from("Phone"),
        ],
        rows,
        generated,
    }
}

pub async fn performance_dashboard(
    state: &State,
    property_id: Option<i64>,
) -> Result<ReportData, Error> {
    let now = Utc::now();

    let (total_revenue, occupied_units, total_units, status_counts, inspections) =
        tokio::try_join!(
            state.database.payment.get_total_amount_all(property_id),
            state.database.unit.count_occupied(property_id, now),
            state.database.unit.count(property_id),
            state.database.payment.get_status_counts_all(property_id),
            state.database.inspection.count(property_id),
        )?;

    Ok(build_performance_dashboard(
        &total_revenue,
        occupied_units,
        total_units,
        &status_counts,
        inspections,
    ))
}

fn build_performance_dashboard(
    total_revenue: &BigDecimal,
    occupied_units: i64,
    total_units: i64,
    status_counts: &[StatusCount],
    inspections: i64,
) -> ReportData {
    let generated = Utc::now();
    let total_payments: i64 =
        status_counts.iter().map(|entry| entry.count).sum();
    let on_time = count_for(status_counts, PaymentStatus::Paid);

    let on_time_rate = if total_payments > 0 {
        (on_time as f64 / total_payments as f64) * 100.0
    } else {
        0.0
    };

    ReportData {
        title: String::from("Performance Dashboard"),
        subtitle: Some(format!("As of {}", fmt_date(&generated))),
        headers: vec![String::from("Metric"), String::from("Value")],
        rows: vec![
            vec![String::from("Total Revenue"), fmt_usd(total_revenue)],
            vec![String::from("Occupied Units"), occupied_units.to_string()],
            vec![String::from("Total Units"), total_units.to_string()],
            vec![
                String::from("Occupancy Rate"),
                fmt_percent(occupancy_rate(occupied_units, total_units)),
            ],
            vec![
                String::from("On-time Payment Rate"),
                fmt_percent(on_time_rate),
            ],
            vec![String::from("Inspections"), inspections.to_string()],
        ],
        generated,
    }
}

pub(crate) fn occupancy_rate(occupied: i64, total: i64) -> f64 {
    if total > 0 {
        (occupied as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

pub(crate) fn count_for(
    status_counts: &[StatusCount],
    status: PaymentStatus,
) -> i64 {
    let wanted = status.to_string();
    status_counts
        .iter()
        .find(|entry| entry.status == wanted)
        .map(|entry| entry.count)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    #[test]
    fn test_occupied_plus_vacant_equals_total() {
        let rows = vec![
            OccupancyRow {
                property: String::from("Elm Street"),
                total_units: 10,
                occupied_units: 7,
            },
            OccupancyRow {
                property: String::from("Oak Court"),
                total_units: 4,
                occupied_units: 0,
            },
        ];

        let report = build_occupancy_report(&rows);

        for (row, input) in report.rows.iter().zip(&rows) {
            let total: i64 = row[1].parse().unwrap();
            let occupied: i64 = row[2].parse().unwrap();
            let vacant: i64 = row[3].parse().unwrap();
            assert_eq!(occupied + vacant, total);
            assert_eq!(total, input.total_units);
        }

        assert_eq!(report.rows[0][4], "70.00%");
        assert_eq!(report.rows[1][4], "0.00%");
    }

    #[test]
    fn test_occupancy_rate_handles_empty_property() {
        assert_eq!(occupancy_rate(0, 0), 0.0);
        assert_eq!(occupancy_rate(3, 4), 75.0);
    }

    #[test]
    fn test_rent_roll_deposit_fallback() {
        let now = Utc::now();
        let rows = vec![RentRollRow {
            property: String::from("Elm Street"),
            unit: String::from("1A"),
            tenant: String::from("Ada"),
            start_date: now,
            end_date: now,
            rent_amount: BigDecimal::from_str("1250").unwrap(),
            deposit: None,
        }];

        let report = build_rent_roll_report(&rows);

        assert_eq!(report.rows[0][5], "$1250.00");
        assert_eq!(report.rows[0][6], "N/A");
    }

    #[test]
    fn test_contact_prefers_phone() {
        let now = Utc::now();
        let mut row = LeaseExpirationRow {
            property: String::from("Elm Street"),
            unit: String::from("1A"),
            tenant: String::from("Ada"),
            start_date: now,
            end_date: now,
            phone: Some(String::from("+15550100")),
            email: String::from("ada@example.com"),
        };

        assert_eq!(contact_of(&row), "+15550100");

        row.phone = None;
        assert_eq!(contact_of(&row), "ada@example.com");
    }

    #[test]
    fn test_dashboard_on_time_rate() {
        let status_counts = vec![
            StatusCount {
                status: String::from("PAID"),
                count: 3,
            },
            StatusCount {
                status: String::from("NOT_PAID"),
                count: 1,
            },
        ];

        let report = build_performance_dashboard(
            &BigDecimal::from_str("5000").unwrap(),
            8,
            10,
            &status_counts,
            2,
        );

        assert_eq!(report.rows[0][1], "$5000.00");
        assert_eq!(report.rows[3][1], "80.00%");
        assert_eq!(report.rows[4][1], "75.00%");
    }
}
