//! Reporting endpoints
//!
//! JSON reports, CSV export and the typed financial overview. Responses are
//! cached per parameter set with a short TTL.

use actix_web::{get, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr as _;

use crate::{
    cache::{build_report_cache_key, cached_fetch},
    configuration::{AppState, State},
    csv_response::to_csv_response,
    error::{ApiError, Error},
    report::{
        self, calculate_kpis, financial_overview, generate_insights, Kpis,
        ReportParams, ReportType,
    },
};

const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    r#type: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    property_id: Option<i64>,
    within_days: Option<i64>,
}

fn parse_report_request(
    query: &ReportQuery,
) -> Result<(ReportType, ReportParams), Error> {
    let type_name = query
        .r#type
        .as_deref()
        .ok_or_else(|| Error::MissingParams(String::from("type")))?;

    let report_type = ReportType::from_str(type_name).map_err(|_| {
        Error::InvalidOption {
            option: format!("report type '{}'", type_name),
        }
    })?;

    let params = ReportParams {
        from: query.start_date.unwrap_or(DateTime::UNIX_EPOCH),
        to: query.end_date.unwrap_or_else(Utc::now),
        property_id: query.property_id,
        within_days: query
            .within_days
            .unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS),
    };

    Ok((report_type, params))
}

async fn cached_report(
    state: &web::Data<AppState<State>>,
    report_type: ReportType,
    params: &ReportParams,
) -> Result<report::ReportData, Error> {
    let key = format!(
        "{}_{}",
        build_report_cache_key(
            &report_type.to_string(),
            params.from,
            params.to,
            params.property_id,
        ),
        params.within_days
    );

    let cache = state.api_cache.reports.clone();
    let state = state.clone();
    let params = params.clone();

    cached_fetch(&cache, &key, || async move {
        report::generate(&state, report_type, &params).await
    })
    .await
}

#[get("/reports")]
pub async fn get_report(
    state: web::Data<AppState<State>>,
    query: web::Query<ReportQuery>,
) -> Result<impl Responder, ApiError> {
    let (report_type, params) = parse_report_request(&query)?;
    let data = cached_report(&state, report_type, &params).await?;
    Ok(web::Json(data))
}

#[get("/export")]
pub async fn export_report(
    state: web::Data<AppState<State>>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, ApiError> {
    let (report_type, params) = parse_report_request(&query)?;
    let data = cached_report(&state, report_type, &params).await?;

    to_csv_response(&data, &format!("{}_report.csv", report_type))
}

#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    property_id: Option<i64>,
}

#[get("/advanced-reports")]
pub async fn get_overview(
    state: web::Data<AppState<State>>,
    query: web::Query<OverviewQuery>,
) -> Result<impl Responder, ApiError> {
    let from = query.start_date.unwrap_or(DateTime::UNIX_EPOCH);
    let to = query.end_date.unwrap_or_else(Utc::now);
    let property_id = query.property_id;

    let key = build_report_cache_key("overview", from, to, property_id);

    let st = state.clone();
    let data =
        cached_fetch(&state.api_cache.overview, &key, || async move {
            financial_overview(&st, from, to, property_id).await
        })
        .await?;

    Ok(web::Json(data))
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub kpis: Kpis,
    pub insights: Vec<String>,
}

#[get("/advanced-reports/insights")]
pub async fn get_insights(
    state: web::Data<AppState<State>>,
    query: web::Query<OverviewQuery>,
) -> Result<impl Responder, ApiError> {
    let from = query.start_date.unwrap_or(DateTime::UNIX_EPOCH);
    let to = query.end_date.unwrap_or_else(Utc::now);

    let kpis = calculate_kpis(&state, from, to).await?;
    let insights = generate_insights(&kpis);

    Ok(web::Json(InsightsResponse { kpis, insights }))
}
