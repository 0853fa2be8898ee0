use std::sync::Arc;

use identity_directory::{
    directory::{DirectoryProvider, EmptyDirectoryProvider},
    server,
    types::Environment,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON log output for deployed environments, human-readable for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    let provider: Arc<dyn DirectoryProvider> = Arc::new(EmptyDirectoryProvider);

    server::start(provider).await
}
