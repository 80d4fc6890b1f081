use actix_web::HttpServer;
use climate_api::{
    AppMetrics, ClimateDataset, DatabaseConfig, ServerConfig, TelemetryConfig, create_base_app,
    init_tracing,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = init_tracing(&TelemetryConfig::from_env()) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();

    let dataset = match ClimateDataset::connect(&database_config).await {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!(url = %database_config.url, error = %e, "Unable to open climate dataset");
            return Err(std::io::Error::other(e));
        }
    };

    if let Err(e) = dataset.verify_schema().await {
        tracing::error!(error = %e, "Climate dataset schema check failed");
        return Err(std::io::Error::other(e));
    }

    let metrics = AppMetrics::new().map_err(std::io::Error::other)?;

    tracing::info!(bind_address = %server_config.bind_address, "Starting climate API");

    let app_dataset = dataset.clone();
    let result = HttpServer::new(move || create_base_app(app_dataset.clone(), metrics.clone()))
        .bind(&server_config.bind_address)?
        .run()
        .await;

    dataset.close().await;
    result
}
