use actix_cors::Cors;
use actix_files::Files;
use actix_web::{dev::Server, http::header, middleware, web, App, HttpServer};

use crate::{
    configuration::{AppState, State},
    controller::{
        expenses, inspections, leases, notifications, payments, properties,
        register, reports, tenants, utilities,
    },
    error::Error,
};

pub async fn server_task(app_state: &AppState<State>) -> Result<(), Error> {
    let app = app_state.clone();
    tokio::spawn(async move {
        let server = init_server(app)?;
        server.await?;
        Ok(())
    })
    .await?
}

fn init_server(app_state: AppState<State>) -> Result<Server, Error> {
    let host = app_state.config.server_host.to_owned();
    let port = app_state.config.port;

    let server = HttpServer::new(move || {
        let app = app_state.clone();
        let upload_dir = app_state.config.upload_dir.to_owned();
        let allowed_cors = String::from("*");
        let cors_access_all =
            app.config.allowed_origins.contains(&allowed_cors);
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                if cors_access_all {
                    return true;
                }
                let allowed = &app.config.allowed_origins;
                if let Ok(origin) = origin.to_str() {
                    return allowed.contains(&origin.to_owned());
                }
                false
            })
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
            .allowed_header(header::CONTENT_TYPE);

        App::new()
            .wrap(cors)
            .wrap(middleware::Compress::default())
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().limit(16_384))
            .service(
                web::scope("/api")
                    .service(properties::get_properties)
                    .service(properties::post_property)
                    .service(properties::get_units)
                    .service(properties::post_unit)
                    .service(tenants::get_tenants)
                    .service(tenants::post_tenant)
                    .service(leases::get_leases)
                    .service(leases::post_lease)
                    .service(payments::get_payments)
                    .service(payments::post_payment)
                    .service(expenses::get_expenses)
                    .service(expenses::post_expense)
                    .service(utilities::get_providers)
                    .service(utilities::post_provider)
                    .service(utilities::get_readings)
                    .service(utilities::post_reading)
                    .service(inspections::get_checklists)
                    .service(inspections::post_checklist)
                    .service(inspections::get_inspections)
                    .service(inspections::post_inspection)
                    .service(reports::get_report)
                    .service(reports::export_report)
                    .service(reports::get_overview)
                    .service(reports::get_insights)
                    .service(register::post_register)
                    .service(notifications::get_pending)
                    .service(notifications::get_history)
                    .service(notifications::run_cycle),
            )
            .service(Files::new("/uploads", upload_dir))
    })
    .bind((host, port))?
    .disable_signals()
    .run();
    Ok(server)
}
