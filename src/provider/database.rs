use crate::{
    configuration::Config,
    dao::{PoolOption, PoolType},
    error::Error,
    model::{
        AppUser, AuditLog, Document, Expense, Inspection, InspectionChecklist,
        Lease, Payment, Property, Table, Tenant, Unit, UtilityProvider,
        UtilityReading,
    },
};

#[derive(Debug)]
pub struct DatabasePool {
    pub property: Table<Property>,
    pub unit: Table<Unit>,
    pub tenant: Table<Tenant>,
    pub lease: Table<Lease>,
    pub payment: Table<Payment>,
    pub expense: Table<Expense>,
    pub utility_provider: Table<UtilityProvider>,
    pub utility_reading: Table<UtilityReading>,
    pub inspection_checklist: Table<InspectionChecklist>,
    pub inspection: Table<Inspection>,
    pub document: Table<Document>,
    pub app_user: Table<AppUser>,
    pub audit_log: Table<AuditLog>,
    pub pool: PoolType,
}

impl DatabasePool {
    pub async fn new(config: &Config) -> Result<DatabasePool, Error> {
        let pool = PoolOption::new()
            .max_connections(20)
            .connect(config.database_url.as_str())
            .await?;

        Ok(DatabasePool {
            pool: pool.clone(),
            property: Table::new(pool.clone()),
            unit: Table::new(pool.clone()),
            tenant: Table::new(pool.clone()),
            lease: Table::new(pool.clone()),
            payment: Table::new(pool.clone()),
            expense: Table::new(pool.clone()),
            utility_provider: Table::new(pool.clone()),
            utility_reading: Table::new(pool.clone()),
            inspection_checklist: Table::new(pool.clone()),
            inspection: Table::new(pool.clone()),
            document: Table::new(pool.clone()),
            app_user: Table::new(pool.clone()),
            audit_log: Table::new(pool),
        })
    }
}
