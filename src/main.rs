// Rust Summary Engine - Main executable
// Author: Gabriel Demetrios Lafis

use std::io::{self, BufWriter};

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::info;

use rust_summary_engine::{
    api::Server,
    data::{CsvSource, DataSet, DataSink, DataSource, JsonSink, JsonSource},
    utils::{init_logging, validate_sample_size, Config},
    worker::run_with_fallback,
};

#[actix_web::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("Rust Summary Engine")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Samples and summarizes tabular datasets")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .subcommand(
            Command::new("summarize")
                .about("Summarize a JSON or CSV dataset")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("FILE")
                        .help("Dataset to summarize")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .help("Input format: json or csv (default: from extension)")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write the result here instead of stdout")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("sample-size")
                        .short('n')
                        .long("sample-size")
                        .value_name("ROWS")
                        .help("Maximum sample size")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .value_name("SEED")
                        .help("Seed for reproducible sampling")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("sync")
                        .long("sync")
                        .help("Run in-line instead of on a worker thread"),
                ),
        )
        .subcommand(
            Command::new("server")
                .about("Run the API server")
                .arg(
                    Arg::new("host")
                        .short('H')
                        .long("host")
                        .value_name("HOST")
                        .help("Sets the server host")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("Sets the server port")
                        .takes_value(true),
                ),
        )
        .get_matches();

    // Load configuration
    let mut config = match matches.value_of("config") {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config file {}", path))?,
        None => Config::default(),
    };

    // Initialize logging
    if let Err(err) = init_logging(config.log_level_filter()) {
        eprintln!("Error initializing logger: {}", err);
    }

    // Handle subcommands
    match matches.subcommand() {
        Some(("summarize", sub)) => summarize(&mut config, sub),
        Some(("server", sub)) => {
            // Override config with command line arguments
            if let Some(host) = sub.value_of("host") {
                config.server.host = host.to_string();
            }
            if let Some(port) = sub.value_of("port") {
                config.server.port = port.parse().context("invalid port")?;
            }

            let server = Server::new(config.server, config.engine);
            server.run().await?;
            Ok(())
        }
        _ => {
            println!("No subcommand specified. Use --help for usage information.");
            Ok(())
        }
    }
}

fn summarize(config: &mut Config, matches: &ArgMatches) -> Result<()> {
    let input = matches.value_of("input").context("missing input")?;

    if let Some(sample_size) = matches.value_of("sample-size") {
        let sample_size: usize = sample_size.parse().context("invalid sample size")?;
        validate_sample_size(sample_size).map_err(anyhow::Error::msg)?;
        config.engine.sample_size = sample_size;
    }
    if let Some(seed) = matches.value_of("seed") {
        config.engine.seed = Some(seed.parse().context("invalid seed")?);
    }
    if matches.is_present("sync") {
        config.engine.use_worker = false;
    }

    let format = matches
        .value_of("format")
        .map(str::to_lowercase)
        .unwrap_or_else(|| {
            if input.to_lowercase().ends_with(".csv") {
                "csv".to_string()
            } else {
                "json".to_string()
            }
        });

    let dataset: DataSet = match format.as_str() {
        "json" => JsonSource::new(input).read(),
        "csv" => CsvSource::new(input, ',').read(),
        other => bail!("unsupported input format: {}", other),
    }
    .with_context(|| format!("reading {}", input))?;

    info!("Loaded {} rows from {}", dataset.len(), input);

    let analysis = run_with_fallback(dataset, &config.engine, &mut |percent: u8| {
        info!("Progress: {}%", percent);
    });

    match matches.value_of("output") {
        Some(path) => {
            JsonSink::new(path, true)
                .write(&analysis)
                .with_context(|| format!("writing {}", path))?;
            info!("Wrote summary to {}", path);
        }
        None => {
            serde_json::to_writer_pretty(BufWriter::new(io::stdout()), &analysis)?;
            println!();
        }
    }

    Ok(())
}
