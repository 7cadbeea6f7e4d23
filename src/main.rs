use rolodex_sync::prelude::run_app;
use std::process::exit;

#[tokio::main]
async fn main() {
    if let Err(e) = run_app().await {
        eprintln!("Error: {}", e);
        exit(1);
    }
}
