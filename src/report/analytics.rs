//! Analytics engine
//!
//! Typed KPI roll-ups and the financial overview used by the
//! advanced-reports endpoint, plus rule-based insight strings.

use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, Zero as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{configuration::State, error::Error, types::PaymentStatus};

use super::{
    fmt_usd,
    occupancy::{count_for, occupancy_rate},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialOverview {
    pub total_income: BigDecimal,
    pub total_expenses: BigDecimal,
    pub net_income: BigDecimal,
    pub expense_breakdown: BTreeMap<String, BigDecimal>,
    pub income_by_property: BTreeMap<String, BigDecimal>,
    pub expenses_by_property: BTreeMap<String, BigDecimal>,
}

pub async fn financial_overview(
    state: &State,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    property_id: Option<i64>,
) -> Result<FinancialOverview, Error> {
    let (
        total_income,
        total_expenses,
        categories,
        income_by_property,
        expenses_by_property,
    ) = tokio::try_join!(
        state.database.payment.get_total_amount(from, to, property_id),
        state.database.expense.get_total_amount(from, to, property_id),
        state
            .database
            .expense
            .get_totals_by_category(from, to, property_id),
        state
            .database
            .payment
            .get_income_by_property(from, to, property_id),
        state
            .database
            .expense
            .get_totals_by_property(from, to, property_id),
    )?;

    let net_income = &total_income - &total_expenses;

    Ok(FinancialOverview {
        total_income,
        total_expenses,
        net_income,
        expense_breakdown: categories
            .into_iter()
            .map(|entry| (entry.category, entry.total))
            .collect(),
        income_by_property: income_by_property
            .into_iter()
            .map(|entry| (entry.property, entry.total))
            .collect(),
        expenses_by_property: expenses_by_property
            .into_iter()
            .map(|entry| (entry.property, entry.total))
            .collect(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub on_time: i64,
    pub partial: i64,
    pub late: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpis {
    pub total_properties: i64,
    pub total_units: i64,
    pub total_tenants: i64,
    pub occupancy_rate: f64,
    pub total_revenue: BigDecimal,
    pub avg_payment_amount: BigDecimal,
    pub payment_success_rate: f64,
    pub payment_breakdown: PaymentBreakdown,
}

pub async fn calculate_kpis(
    state: &State,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Kpis, Error> {
    let now = Utc::now();

    let (
        total_properties,
        total_units,
        total_tenants,
        occupied_units,
        total_revenue,
        payment_count,
        status_counts,
    ) = tokio::try_join!(
        state.database.property.count(),
        state.database.unit.count(None),
        state.database.tenant.count(),
        state.database.unit.count_occupied(None, now),
        state.database.payment.get_total_amount(from, to, None),
        state.database.payment.count_in_range(from, to),
        state.database.payment.get_status_counts(from, to, None),
    )?;

    let avg_payment_amount = if payment_count > 0 {
        &total_revenue / BigDecimal::from(payment_count)
    } else {
        BigDecimal::zero()
    };

    let on_time = count_for(&status_counts, PaymentStatus::Paid);
    let partial = count_for(&status_counts, PaymentStatus::PartiallyPaid);
    let late = count_for(&status_counts, PaymentStatus::NotPaid);

    let payment_success_rate = if payment_count > 0 {
        (on_time as f64 / payment_count as f64) * 100.0
    } else {
        0.0
    };

    Ok(Kpis {
        total_properties,
        total_units,
        total_tenants,
        occupancy_rate: occupancy_rate(occupied_units, total_units),
        total_revenue,
        avg_payment_amount,
        payment_success_rate,
        payment_breakdown: PaymentBreakdown {
            on_time,
            partial,
            late,
        },
    })
}

/// Rule-based commentary on the computed KPIs.
pub fn generate_insights(kpis: &Kpis) -> Vec<String> {
    let mut insights = Vec::new();

    if kpis.occupancy_rate < 80.0 {
        insights.push(format!(
            "Occupancy rate is {:.1}% - consider marketing efforts to fill vacant units",
            kpis.occupancy_rate
        ));
    } else if kpis.occupancy_rate >= 95.0 {
        insights.push(format!(
            "Excellent occupancy rate of {:.1}% - consider expanding your portfolio",
            kpis.occupancy_rate
        ));
    }

    if kpis.payment_success_rate < 70.0 {
        insights.push(format!(
            "Payment success rate is {:.1}% - consider reviewing payment policies",
            kpis.payment_success_rate
        ));
    }

    if kpis.payment_breakdown.partial > kpis.payment_breakdown.on_time {
        insights.push(String::from(
            "High number of partial payments - consider offering payment plans \
             or investigating tenant financial difficulties",
        ));
    }

    if kpis.total_revenue > BigDecimal::zero() {
        insights.push(format!(
            "Average payment amount is {}",
            fmt_usd(&kpis.avg_payment_amount)
        ));
    }

    if insights.is_empty() {
        insights.push(String::from(
            "Your property management metrics are looking good!",
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    fn kpis() -> Kpis {
        Kpis {
            total_properties: 2,
            total_units: 10,
            total_tenants: 8,
            occupancy_rate: 90.0,
            total_revenue: BigDecimal::from_str("4500").unwrap(),
            avg_payment_amount: BigDecimal::from_str("562.5").unwrap(),
            payment_success_rate: 87.5,
            payment_breakdown: PaymentBreakdown {
                on_time: 7,
                partial: 1,
                late: 0,
            },
        }
    }

    #[test]
    fn test_low_occupancy_insight() {
        let mut kpis = kpis();
        kpis.occupancy_rate = 60.0;

        let insights = generate_insights(&kpis);
        assert!(insights[0].contains("60.0%"));
        assert!(insights[0].contains("marketing"));
    }

    #[test]
    fn test_high_occupancy_insight() {
        let mut kpis = kpis();
        kpis.occupancy_rate = 97.5;

        let insights = generate_insights(&kpis);
        assert!(insights[0].contains("Excellent occupancy rate of 97.5%"));
    }

    #[test]
    fn test_partial_payment_insight() {
        let mut kpis = kpis();
        kpis.payment_breakdown.partial = 5;
        kpis.payment_breakdown.on_time = 2;

        let insights = generate_insights(&kpis);
        assert!(insights
            .iter()
            .any(|insight| insight.contains("partial payments")));
    }

    #[test]
    fn test_revenue_insight_reports_average() {
        let insights = generate_insights(&kpis());
        assert!(insights
            .iter()
            .any(|insight| insight.contains("Average payment amount is $562.50")));
    }

    #[test]
    fn test_quiet_metrics_fall_back_to_default_line() {
        let mut kpis = kpis();
        kpis.total_revenue = BigDecimal::zero();

        let insights = generate_insights(&kpis);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("looking good"));
    }
}
