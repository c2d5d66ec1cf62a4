use api_rest::{router, AppState};
use bridge_core::CoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the HL7 bridge REST server
///
/// Resolves the message header identity once at startup, then serves the conversion and
/// generation endpoints.
///
/// # Environment Variables
/// - `BRIDGE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `HL7_SENDING_APPLICATION`, `HL7_SENDING_FACILITY`, `HL7_RECEIVING_APPLICATION`,
///   `HL7_RECEIVING_FACILITY`, `HL7_PROCESSING_ID`, `HL7_VERSION_ID`: header fields of
///   generated messages
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - a header environment value is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("bridge_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CoreConfig::from_env_values(|key| std::env::var(key).ok())?;
    let addr = std::env::var("BRIDGE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting HL7 bridge REST on {}", addr);
    tracing::info!(
        sending_application = config.sending_application(),
        sending_facility = config.sending_facility(),
        "generated messages use this sender"
    );

    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
