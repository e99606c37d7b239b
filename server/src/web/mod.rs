use crate::cli_error::CliError;
use crate::data_store::{connect_store, FyyurStore};
use crate::setup::{DatabaseSettings, ServerSettings};
use actix_web::{middleware, web, App, HttpServer};
use log::info;
use std::sync::Arc;

mod http_error_logging;
mod ui;

pub fn serve(database: &DatabaseSettings, server: ServerSettings) -> Result<(), CliError> {
    let state = AppState::new(database, server.timezone)?;
    info!(
        "Starting web server on {}:{} (time zone: {}) ...",
        server.listen_address,
        server.listen_port,
        state.timezone.name()
    );
    actix_web::rt::System::new()
        .block_on(
            HttpServer::new(move || {
                App::new()
                    .configure(ui::configure_app)
                    .app_data(web::Data::new(state.clone()))
                    .wrap(middleware::Logger::default())
                    .wrap(middleware::Compress::default())
            })
            .bind((server.listen_address, server.listen_port))
            .map_err(CliError::Bind)?
            .run(),
        )
        .map_err(CliError::Server)
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn FyyurStore>,
    /// Time zone for displaying show start times and interpreting entered start times
    timezone: chrono_tz::Tz,
}

impl AppState {
    pub fn new(database: &DatabaseSettings, timezone: chrono_tz::Tz) -> Result<Self, CliError> {
        Ok(Self {
            store: Arc::new(connect_store(database)?),
            timezone,
        })
    }

    #[cfg(test)]
    pub fn with_store(store: Arc<dyn FyyurStore>, timezone: chrono_tz::Tz) -> Self {
        Self { store, timezone }
    }
}
