use ledger::{JsonStore, Ledger, MemoryStore};

use crate::config::Storage;

mod app;
mod config;
mod error;
mod ui;

#[tokio::main]
async fn main() -> error::Result<()> {
    let settings = config::load()?;

    // The terminal owns stdout while the UI runs; logs go to stderr so a
    // `2> notaspese.log` redirect keeps them readable.
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "notaspese={level},ledger={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    match settings.storage {
        Storage::Memory => {
            tracing::info!("using in-memory storage, nothing will survive exit");
            run(Ledger::open(MemoryStore::new()).await).await
        }
        Storage::Json { ref data_dir } => {
            let store = JsonStore::new(data_dir);
            tracing::info!("expenses blob at {}", store.path().display());
            run(Ledger::open(store).await).await
        }
    }
}

async fn run<S: ledger::Store>(ledger: Ledger<S>) -> error::Result<()> {
    let mut app = app::App::new(ledger);
    app.run().await
}
