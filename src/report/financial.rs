//! Financial reports
//!
//! Payment history, expense report and the income/expense roll-ups.

use bigdecimal::BigDecimal;
use chrono::Utc;

use crate::{
    configuration::State,
    dao::postgre::{
        expense::{CategoryTotal, ExpenseReportRow},
        payment::PaymentHistoryRow,
    },
    error::Error,
};

use super::{date_window_subtitle, fmt_date, fmt_usd, ReportData, ReportParams};

pub async fn payment_history(
    state: &State,
    params: &ReportParams,
) -> Result<ReportData, Error> {
    let rows = state
        .database
        .payment
        .get_history(params.from, params.to, params.property_id)
        .await?;

    Ok(build_payment_history_report(&rows, params))
}

fn build_payment_history_report(
    rows: &[PaymentHistoryRow],
    params: &ReportParams,
) -> ReportData {
    let headers = vec![
        String::from("Payment Date"),
        String::from("Property"),
        String::from("Unit"),
        String::from("Tenant"),
        String::from("Amount"),
        String::from("Status"),
        String::from("Notes"),
    ];

    let rows = rows
        .iter()
        .map(|row| {
            vec![
                fmt_date(&row.payment_date),
                row.property.to_owned(),
                row.unit.to_owned(),
                row.tenant.to_owned(),
                fmt_usd(&row.amount),
                row.status.to_owned(),
                row.collector_notes.to_owned().unwrap_or_default(),
            ]
        })
        .collect();

    ReportData {
        title: String::from("Payment History Report"),
        subtitle: Some(date_window_subtitle(&params.from, &params.to)),
        headers,
        rows,
        generated: Utc::now(),
    }
}

pub async fn expense_report(
    state: &State,
    params: &ReportParams,
) -> Result<ReportData, Error> {
    let rows = state
        .database
        .expense
        .get_report(params.from, params.to, params.property_id)
        .await?;

    Ok(build_expense_report(&rows, params))
}

fn build_expense_report(
    rows: &[ExpenseReportRow],
    params: &ReportParams,
) -> ReportData {
    let headers = vec![
        String::from("Date"),
        String::from("Property"),
        String::from("Category"),
        String::from("Description"),
        String::from("Amount"),
    ];

    let rows = rows
        .iter()
        .map(|row| {
            vec![
                fmt_date(&row.date),
                row.property.to_owned(),
                row.category.to_owned(),
                row.description.to_owned().unwrap_or_default(),
                fmt_usd(&row.amount),
            ]
        })
        .collect();

    ReportData {
        title: String::from("Expense Report"),
        subtitle: Some(date_window_subtitle(&params.from, &params.to)),
        headers,
        rows,
        generated: Utc::now(),
    }
}

pub async fn financial_summary(
    state: &State,
    params: &ReportParams,
) -> Result<ReportData, Error> {
    let (total_income, total_expenses, categories) = tokio::try_join!(
        state.database.payment.get_total_amount(
            params.from,
            params.to,
            params.property_id,
        ),
        state.database.expense.get_total_amount(
            params.from,
            params.to,
            params.property_id,
        ),
        state.database.expense.get_totals_by_category(
            params.from,
            params.to,
            params.property_id,
        ),
    )?;

    Ok(build_financial_summary(
        &total_income,
        &total_expenses,
        &categories,
        params,
    ))
}

fn build_financial_summary(
    total_income: &BigDecimal,
    total_expenses: &BigDecimal,
    categories: &[CategoryTotal],
    params: &ReportParams,
) -> ReportData {
    let net_income = total_income - total_expenses;

    let mut rows = vec![
        vec![String::from("Total Income"), fmt_usd(total_income)],
        vec![String::from("Total Expenses"), fmt_usd(total_expenses)],
        vec![String::from("Net Income"), fmt_usd(&net_income)],
        vec![String::new(), String::new()],
        vec![String::from("Expense Breakdown:"), String::new()],
    ];

    for category in categories {
        rows.push(vec![
            category.category.to_owned(),
            fmt_usd(&category.total),
        ]);
    }

    ReportData {
        title: String::from("Financial Summary"),
        subtitle: Some(date_window_subtitle(&params.from, &params.to)),
        headers: vec![String::from("Category"), String::from("Amount")],
        rows,
        generated: Utc::now(),
    }
}

pub async fn financial_statement(
    state: &State,
    params: &ReportParams,
) -> Result<ReportData, Error> {
    let (total_income, total_expenses) = tokio::try_join!(
        state.database.payment.get_total_amount(
            params.from,
            params.to,
            params.property_id,
        ),
        state.database.expense.get_total_amount(
            params.from,
            params.to,
            params.property_id,
        ),
    )?;

    let net_income = &total_income - &total_expenses;

    Ok(ReportData {
        title: String::from("Financial Statement"),
        subtitle: Some(date_window_subtitle(&params.from, &params.to)),
        headers: vec![String::from("Category"), String::from("Amount")],
        rows: vec![
            vec![String::from("Total Income"), fmt_usd(&total_income)],
            vec![String::from("Total Expenses"), fmt_usd(&total_expenses)],
            vec![String::from("Net Income"), fmt_usd(&net_income)],
        ],
        generated: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use std::str::FromStr as _;

    fn params() -> ReportParams {
        ReportParams {
            from: DateTime::from_timestamp(0, 0).unwrap(),
            to: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            property_id: None,
            within_days: 30,
        }
    }

    fn usd(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_summary_net_income_is_income_minus_expenses() {
        let categories = vec![
            CategoryTotal {
                category: String::from("Maintenance"),
                total: usd("300.25"),
            },
            CategoryTotal {
                category: String::from("Taxes"),
                total: usd("99.75"),
            },
        ];

        let report = build_financial_summary(
            &usd("1500.00"),
            &usd("400.00"),
            &categories,
            &params(),
        );

        assert_eq!(report.rows[0][1], "$1500.00");
        assert_eq!(report.rows[1][1], "$400.00");
        assert_eq!(report.rows[2], vec!["Net Income", "$1100.00"]);

        // Spacer row, then one row per category
        assert_eq!(report.rows[3], vec!["", ""]);
        assert_eq!(report.rows[5], vec!["Maintenance", "$300.25"]);
        assert_eq!(report.rows[6], vec!["Taxes", "$99.75"]);
    }

    #[test]
    fn test_summary_net_income_can_be_negative() {
        let report = build_financial_summary(
            &usd("100"),
            &usd("250.50"),
            &[],
            &params(),
        );

        assert_eq!(report.rows[2][1], "$-150.50");
    }

    #[test]
    fn test_payment_history_rows_match_input() {
        let rows = vec![PaymentHistoryRow {
            payment_date: DateTime::from_timestamp(86_400, 0).unwrap(),
            property: String::from("Elm Street"),
            unit: String::from("2B"),
            tenant: String::from("Ada"),
            amount: usd("950"),
            status: String::from("PAID"),
            collector_notes: None,
        }];

        let report = build_payment_history_report(&rows, &params());

        assert_eq!(report.headers.len(), 7);
        assert_eq!(
            report.rows[0],
            vec!["1970-01-02", "Elm Street", "2B", "Ada", "$950.00", "PAID", ""]
        );
    }

    #[test]
    fn test_expense_report_formats_amounts() {
        let rows = vec![ExpenseReportRow {
            date: DateTime::from_timestamp(0, 0).unwrap(),
            property: String::from("Elm Street"),
            category: String::from("Plumbing"),
            description: Some(String::from("burst pipe")),
            amount: usd("123.456"),
        }];

        let report = build_expense_report(&rows, &params());

        assert_eq!(report.rows[0][4], "$123.46");
    }
}
