use clap::Parser as _;
use tracing::{error, Level};

use rentfolio::{
    cli::{Cli, Commands},
    configuration::{
        get_configuration, set_configuration, AppState, Config, State,
    },
    error::Error,
    handler::notification_task,
    migration,
    provider::DatabasePool,
    server,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(Level::INFO)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Serve) => run_server().await,
        Some(Commands::Migrate { fake }) => {
            set_configuration()?;
            let config = get_configuration()?;

            match fake {
                Some(up_to_version) => {
                    migration::run_migrations_fake(
                        &config.database_url,
                        up_to_version,
                    )
                    .await
                },
                None => {
                    migration::run_migrations(&config.database_url).await
                },
            }
        },
    }
}

async fn run_server() -> Result<(), Error> {
    let (config, database) = match init().await {
        Ok((config, database)) => (config, database),
        Err(e) => return Err(Error::ConfigurationError(e.to_string())),
    };

    let state = State::new(config, database);
    let app_state = AppState::new(state);

    let (_, _) = tokio::try_join!(
        server::server_task(&app_state),
        notification_task(app_state.clone()),
    )?;

    Ok(())
}

async fn init() -> Result<(Config, DatabasePool), Error> {
    set_configuration()?;
    let config = get_configuration()?;

    migration::run_migrations(&config.database_url).await?;

    let database = DatabasePool::new(&config).await?;
    Ok((config, database))
}
