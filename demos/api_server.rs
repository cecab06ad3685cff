// API server example
// Author: Gabriel Demetrios Lafis

use rust_summary_engine::{
    api::Server,
    utils::{init_logging, Config},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let mut config = Config::default();
    config.server.enable_cors = true;

    if let Err(err) = init_logging(config.log_level_filter()) {
        eprintln!("Error initializing logger: {}", err);
    }

    let server = Server::new(config.server, config.engine);
    server.run().await
}
