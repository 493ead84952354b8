//! The `listen` subcommand: run the TUI client.

use crate::config::AppConfig;
use crate::feed::{spawn_source, DemoSource, FeedService};
use crate::ui::{ListenApp, ScannerController};
use std::time::Duration;

/// Options for the `listen` subcommand.
#[derive(Debug, Clone)]
pub struct ListenOptions {
    /// Local client configuration.
    pub config: AppConfig,
    /// Run the synthetic demo source (on unless `--no-demo`).
    pub demo: bool,
}

/// Run the listen screen until the user quits.
pub fn run_listen(options: ListenOptions) -> anyhow::Result<()> {
    let service = FeedService::new();

    // The demo source stands in for a network transport; without it the
    // screen simply stays offline and unconfigured.
    let source = if options.demo {
        Some(spawn_source(
            Box::new(DemoSource {
                call_interval: Duration::from_secs(options.config.demo.call_interval_secs.max(1)),
                keyboard_shortcuts: options.config.demo.keyboard_shortcuts,
            }),
            service.clone(),
        ))
    } else {
        None
    };

    let controller = ScannerController::new(service);
    let app = ListenApp::new(controller, options.config.ui.history_limit.max(1));
    let result = app.run(Duration::from_millis(options.config.ui.tick_rate_ms.max(10)));

    if let Some(source) = source {
        source.shutdown();
    }

    result
}
