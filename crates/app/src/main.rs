//! Ascend API Client - Main Entry Point
//!
//! Small CLI smoke path for the client stack: signs in with the
//! credentials from the environment and prints the user profile.
//!
//! Environment variables:
//! - `ASCEND_API_URL` - backend base URL
//! - `ASCEND_EMAIL` / `ASCEND_PASSWORD` - account credentials

use ascend_application::{ApiClient, ClientConfig};
use ascend_domain::LoginRequest;
use ascend_infrastructure::{FileTokenStorage, ReqwestTransport, default_data_dir};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn env_var(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    std::env::var(name).map_err(|_| format!("environment variable {name} is not set").into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base_url = env_var("ASCEND_API_URL")?;
    let email = env_var("ASCEND_EMAIL")?;
    let password = env_var("ASCEND_PASSWORD")?;

    let config = ClientConfig::new(&base_url)?;
    let transport = ReqwestTransport::new(config.user_agent())?;
    let storage = FileTokenStorage::new(default_data_dir());
    let client = ApiClient::new(config, transport, storage);

    let session = client.login(&LoginRequest { email, password }).await?;
    info!(user_id = %session.user.id, "signed in");

    let profile: serde_json::Value = client.get("/api/v1/user/profile").await?;
    println!("{}", serde_json::to_string_pretty(&profile)?);

    Ok(())
}
