//! Consolidated database models
//!
//! All database entity structs organized by domain sections.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

// =============================================================================
// PORTFOLIO DOMAIN
// =============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub property_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

// =============================================================================
// LEASE DOMAIN
// =============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lease {
    pub id: i64,
    pub unit_id: i64,
    pub tenant_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub rent_amount: BigDecimal,
    pub deposit: Option<BigDecimal>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub lease_id: i64,
    pub amount: BigDecimal,
    pub payment_date: DateTime<Utc>,
    pub status: String,
    pub collector_notes: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub lease_id: i64,
    pub name: String,
    pub file_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

// =============================================================================
// OPERATIONS DOMAIN
// =============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub property_id: i64,
    pub category: String,
    pub amount: BigDecimal,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UtilityProvider {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UtilityReading {
    pub id: i64,
    pub provider_id: i64,
    pub reading: BigDecimal,
    pub reading_date: DateTime<Utc>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct InspectionChecklist {
    pub id: i64,
    pub name: String,
    pub items: Value,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Inspection {
    pub id: i64,
    pub property_id: i64,
    pub checklist_id: i64,
    pub inspection_date: DateTime<Utc>,
    pub results: Value,
    pub notes: Option<String>,
}

// =============================================================================
// ACCOUNTS & AUDIT
// =============================================================================

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppUser {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: i64,
    pub action: String,
    pub actor: String,
    pub details: Value,
    pub created_at: DateTime<Utc>,
}
