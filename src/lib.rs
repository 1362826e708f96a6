//! # LayerKit
//!
//! Layer history for canvas editors:
//! - Snapshot-based undo/redo with a bounded depth
//! - Structural edits vs selection-only changes
//! - Selection bounding boxes over heterogeneous elements
//! - Scripted session replay for debugging
//!
//! ## Architecture
//!
//! LayerKit is organized as a workspace with multiple crates:
//!
//! 1. **layerkit-core** - Snapshot data model, errors, subscriber bus
//! 2. **layerkit-history** - Equality, history store, observable layer store
//! 3. **layerkit-designer** - Elements, bounds, live layer collection
//! 4. **layerkit-settings** - Configuration files and validation
//! 5. **layerkit-replay** - Scripted session replay
//! 6. **layerkit** - Logging setup and the `layerkit` binary

pub use layerkit_replay as replay;

pub use layerkit_core::{
    Error, LayerBounds, LayerDescriptor, LayersSnapshot, Result, SnapshotError, SubscriberBus,
    SubscriptionId, Vec2,
};

pub use layerkit_history::{
    layers_equal, snapshots_equal, HistoryAction, HistoryStore, LayerStore, Outcome, StoreEvent,
    StoreOptions,
};

pub use layerkit_designer::{
    compute_bounds, element_bounds, selection_bounds, BoundingBox, Element, ElementKind,
    LayerCollection,
};

pub use layerkit_settings::{Config, HistorySettings, LogLevel, LoggingSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Store options matching the history section of a config file
pub fn store_options(settings: &HistorySettings) -> StoreOptions {
    StoreOptions {
        max_history: settings.max_history,
        notify_on_noop: settings.notify_on_noop,
    }
}

/// Initialize logging from the logging settings
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support, falling back to the configured level
/// - Pretty or JSON formatting on stderr
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level: tracing::Level = settings.level.into();
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(env_filter);

    if settings.json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .json();
        registry.with(fmt_layer).try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();
        registry.with(fmt_layer).try_init()?;
    }

    Ok(())
}
