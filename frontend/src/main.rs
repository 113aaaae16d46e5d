//! # Concall Front-end
//!
//! Headless dashboard: prints the first page of concall summaries (or the
//! results of `concall-frontend <name>`), then keeps printing live analytics
//! until Ctrl+C.

use frontend::app::App;
use frontend::core::FrontendConfig;
use frontend::debug::{self, DebugConfig};
use frontend::ui::{self, AnalyticsView, SearchBar};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let _log_guard = debug::init_logger(&DebugConfig::from_env())?;
    let config = FrontendConfig::from_env()?;
    let app = App::new(config)?;

    let controller = app.query_controller();
    let mut search = SearchBar::new();
    if let Some(term) = std::env::args().nth(1) {
        search.set_input(term);
    }
    let action = search.submit().unwrap_or(ui::SearchAction::Clear);
    action.dispatch(&controller).await;

    let mut analytics = AnalyticsView::mount(app.analytics());
    println!("{}", ui::render_page(&search, &controller.state(), &analytics));

    loop {
        tokio::select! {
            updated = analytics.next_update() => {
                if !updated {
                    break;
                }
                print!("{}", analytics.render());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C, shutting down");
                break;
            }
        }
    }

    analytics.unmount();
    app.shutdown();
    Ok(())
}
