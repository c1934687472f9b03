//! Times a simulated page load on the process clocks.
//!
//! Run with `RUST_LOG=marktime=trace` to see every lifecycle event.

use std::sync::Arc;
use std::time::Duration;

use marktime::{
    init_logging, AnalyticsConfig, ChannelAnalytics, LoggingConfig, MetricTracker, SystemHost,
    TracingReporter, TrackerConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging(LoggingConfig {
        env_filter: None,
        ansi: true,
    });

    let config = TrackerConfig::default()
        .with_analytics(AnalyticsConfig::enabled("page"))
        .with_colored_output(true);
    let reporter = TracingReporter::new(&config.log_prefix).with_color(config.colored_output);
    let (sink, mut hits) = ChannelAnalytics::new();

    let tracker = MetricTracker::with_parts(
        config,
        Arc::new(SystemHost::new()),
        Arc::new(reporter),
        Some(Arc::new(sink)),
    );

    tracker.first_paint();

    tracker.start("fetch");
    tokio::time::sleep(Duration::from_millis(25)).await;
    tracker.end("fetch", true);

    tracker.start("render");
    tokio::time::sleep(Duration::from_millis(8)).await;
    tracker.end_after_paint("render", true).await;

    drop(tracker);
    while let Ok(hit) = hits.try_recv() {
        match hit.to_json() {
            Ok(json) => tracing::info!(target: "page_load", "analytics hit {}", json),
            Err(err) => tracing::warn!(target: "page_load", "unserializable hit: {}", err),
        }
    }
}
