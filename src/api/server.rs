// API server implementation
// Author: Gabriel Demetrios Lafis

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;

use crate::utils::{EngineConfig, ServerConfig};
use super::routes;

/// Largest accepted request body; datasets arrive as one JSON document
const MAX_PAYLOAD_BYTES: usize = 256 * 1024 * 1024;

/// API server hosting the summary engine
pub struct Server {
    config: ServerConfig,
    engine: EngineConfig,
}

impl Server {
    /// Create a new API server
    pub fn new(config: ServerConfig, engine: EngineConfig) -> Self {
        Server { config, engine }
    }

    /// Run the API server
    pub async fn run(&self) -> std::io::Result<()> {
        let addr = (self.config.host.clone(), self.config.port);
        let engine = web::Data::new(self.engine.clone());
        let enable_cors = self.config.enable_cors;
        let workers = self.config.workers.unwrap_or_else(num_cpus::get);

        info!("Starting server at http://{}:{}", addr.0, addr.1);

        HttpServer::new(move || {
            let cors = if enable_cors {
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600)
            } else {
                Cors::default()
            };

            App::new()
                .wrap(cors)
                .app_data(engine.clone())
                .app_data(web::JsonConfig::default().limit(MAX_PAYLOAD_BYTES))
                .configure(routes::configure)
        })
        .workers(workers)
        .bind(addr)?
        .run()
        .await
    }
}
