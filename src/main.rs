use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hris_gateway::{api, config, mcp, AppState};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let result = match args.command {
        Some(cli::Commands::Serve { port }) => {
            let port = port.unwrap_or(cfg.port);
            run_server(cfg, port).await
        }
        Some(cli::Commands::Tools { openai }) => print_tools(&cfg, openai),
        Some(cli::Commands::Call { name, args }) => call_tool(cfg, &name, &args).await,
        None => {
            let port = cfg.port;
            run_server(cfg, port).await
        }
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

/// fmt layer on stderr, filtered by RUST_LOG, plus an OTLP exporter when
/// OTEL_EXPORTER_OTLP_ENDPOINT is set.
fn init_tracing() -> anyhow::Result<()> {
    use opentelemetry::KeyValue;
    use opentelemetry_sdk::{trace as sdktrace, Resource};

    let telemetry_layer = if std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(opentelemetry_otlp::new_exporter().tonic())
            .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
                KeyValue::new("service.name", "hris-gateway"),
            ])))
            .install_batch(opentelemetry_sdk::runtime::Tokio)
            .context("failed to install OpenTelemetry tracer")?;
        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "hris_gateway=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(telemetry_layer)
        .init();

    Ok(())
}

async fn run_server(cfg: config::Config, port: u16) -> anyhow::Result<()> {
    tracing::info!("Initializing HRIS upstream clients...");
    let state = Arc::new(AppState::new(cfg)?);

    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HRIS gateway listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_tools(cfg: &config::Config, openai: bool) -> anyhow::Result<()> {
    let tools = mcp::catalog::list_tools(&cfg.default_domain);
    let out = if openai {
        serde_json::Value::Array(tools.iter().map(mcp::types::to_openai_function).collect())
    } else {
        serde_json::to_value(&tools)?
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

async fn call_tool(cfg: config::Config, name: &str, raw_args: &str) -> anyhow::Result<()> {
    let arguments: serde_json::Value =
        serde_json::from_str(raw_args).context("--args must be a JSON object")?;
    if !arguments.is_object() {
        anyhow::bail!("--args must be a JSON object, got: {}", raw_args);
    }

    let state = AppState::new(cfg)?;
    let result = mcp::catalog::call_tool(&state, name, Some(arguments)).await;
    println!("{}", mcp::types::mcp_result_to_text(&result));

    if result.is_error {
        std::process::exit(1);
    }
    Ok(())
}
