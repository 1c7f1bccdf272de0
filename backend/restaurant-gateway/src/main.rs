use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::prelude::*;

use restaurant_gateway::clients::HttpRestClient;
use restaurant_gateway::config::Config;
use restaurant_gateway::schema::build_schema;
use restaurant_gateway::server;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // JSON logs with span context, thread ids and source locations
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,restaurant_gateway=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true),
        )
        .init();

    info!("Starting Restaurant Gateway...");

    let config = Config::from_env();

    let client = HttpRestClient::new(&config.backend)
        .context("Failed to build REST backend client")?;

    info!(
        base_url = %client.base_url(),
        timeout_secs = ?config.backend.timeout.map(|t| t.as_secs()),
        "REST backend client initialized"
    );

    let schema = build_schema(client.into_shared(), &config.graphql);
    let playground = config.graphql.playground;

    let bind_addr = config.bind_addr();
    info!(
        playground,
        introspection = config.graphql.introspection,
        "Server ready at http://{}",
        bind_addr
    );

    HttpServer::new(move || {
        let schema = schema.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(move |cfg| server::configure(cfg, schema, playground))
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await
    .context("HTTP server terminated with an error")
}
