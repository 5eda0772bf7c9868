use portfolio_contact::configuration::get_configuration;
use portfolio_contact::create_app;
use portfolio_contact::errors::Error;
use portfolio_contact::store::Store;
use portfolio_contact::telemetry::init_subscriber;
use std::net::IpAddr;
use std::net::SocketAddr;
use std::str::FromStr;
use tokio::net::TcpListener;
use tracing::{error, info};

fn bind_address(host: &str, port: u16) -> Result<SocketAddr, Error> {
    let host = IpAddr::from_str(host)?;
    Ok(SocketAddr::from((host, port)))
}

async fn run() -> Result<(), Error> {
    let configuration = get_configuration()?;
    init_subscriber(&configuration.log_level);

    let store = Store::try_from(&configuration.store)?;
    info!(store_type = %configuration.store.store_type, "store ready");

    let addr = bind_address(
        &configuration.application.host,
        configuration.application.port,
    )?;
    let (app, _) = create_app(store);
    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    match run().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            // the subscriber may not be installed yet when configuration fails
            eprintln!("failed to start server: {e}");
            error!(error = %e, "failed to start server");
            std::process::ExitCode::FAILURE
        }
    }
}
