//! Headless shell runner
//!
//! Mounts the application, follows each argument as a navigation and prints
//! the final screen as JSON.

use std::sync::Arc;

use cs_shell::{App, BundledSource, Config};

#[tokio::main]
async fn main() -> cs_shell::Result<()> {
    let config = Config::from_env()?;
    cs_shell::init_logging(config.runtime);

    let app = App::new(config, Arc::new(BundledSource))?;
    app.mount().await?;

    for href in std::env::args().skip(1) {
        let navigation = app.navigate(&href).await?;
        tracing::info!(requested = %href, page = %navigation.page, "Navigated");
    }

    println!("{}", serde_json::to_string_pretty(&app.render())?);
    Ok(())
}
