use std::process::ExitCode;

use log::error;
use mockapi_rs::{api, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server = api::build_server(ServerConfig::default()).await;
    match server.start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
