use std::{env, fs, ops::Deref, sync::Arc};

use crate::{
    cache::ApiCache, error::Error, handler::NotificationCenter,
    provider::DatabasePool,
};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub database: DatabasePool,
    pub api_cache: ApiCache,
    pub notifications: NotificationCenter,
}

impl State {
    pub fn new(config: Config, database: DatabasePool) -> State {
        let api_cache = ApiCache::new(config.cache_ttl_minutes);
        Self {
            config,
            database,
            api_cache,
            notifications: NotificationCenter::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub upload_dir: String,
    pub auth: String,
    pub notification_interval_minutes: u64,
    pub lease_notice_days: i64,
    pub document_notice_days: i64,
    pub reminder_days_before: i64,
    pub grace_period_days: i64,
    pub cache_ttl_minutes: u64,
    pub max_upload_bytes: usize,
    pub allowed_file_types: Vec<String>,
}

pub fn get_configuration() -> Result<Config, Error> {
    let database_url = env::var("DATABASE_URL")?;
    let server_host = env::var("SERVER_HOST")?;
    let port: u16 = env::var("PORT")?.parse()?;

    let allowed_origins = env::var("ALLOWED_ORIGINS")?
        .split(',')
        .map(|item| item.to_owned())
        .collect::<Vec<String>>();

    let upload_dir = format!(
        "{}/{}",
        env!("CARGO_MANIFEST_DIR"),
        env::var("UPLOAD_DIRECTORY")?
    );

    let auth = env::var("AUTH")?;

    let notification_interval_minutes =
        env::var("NOTIFICATION_INTERVAL_IN_MINUTES")?.parse()?;
    let lease_notice_days = env::var("LEASE_NOTICE_DAYS")?.parse()?;
    let document_notice_days = env::var("DOCUMENT_NOTICE_DAYS")?.parse()?;
    let reminder_days_before = env::var("REMINDER_DAYS_BEFORE")?.parse()?;
    let grace_period_days = env::var("GRACE_PERIOD_DAYS")?.parse()?;
    let cache_ttl_minutes = env::var("CACHE_TTL_IN_MINUTES")?.parse()?;

    let max_upload_mb: usize = env::var("MAX_UPLOAD_SIZE_MB")?.parse()?;
    let max_upload_bytes = max_upload_mb * 1024 * 1024;

    let allowed_file_types = env::var("ALLOWED_FILE_TYPES")?
        .split(',')
        .map(|item| item.trim().to_lowercase())
        .collect::<Vec<String>>();

    let config = Config {
        database_url,
        server_host,
        port,
        allowed_origins,
        upload_dir,
        auth,
        notification_interval_minutes,
        lease_notice_days,
        document_notice_days,
        reminder_days_before,
        grace_period_days,
        cache_ttl_minutes,
        max_upload_bytes,
        allowed_file_types,
    };

    Ok(config)
}

pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);

    let config_string = fs::read_to_string(path)?;
    parse_config_string(config_string);

    Ok(())
}

fn parse_config_string(config: String) {
    let params: Vec<Option<(&str, &str)>> = config
        .split('\n')
        .map(|s| {
            let element = s.find('=');
            if let Some(e) = element {
                return Some(s.split_at(e));
            }
            None
        })
        .map(|value| {
            if let Some((k, v)) = value {
                return Some((k, &v[1..]));
            }
            None
        })
        .collect();

    for (key, value) in params.into_iter().flatten() {
        std::env::set_var(key, value);
    }
}
