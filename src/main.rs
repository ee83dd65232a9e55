//! Dockerfile Rebuilder worker
//!
//! Reads newline-delimited JSON change events from stdin and dispatches each
//! one to the registered handlers.
//!
//! ```text
//! echo '{"kind":"git_dockerfile_changed","event_id":"msg-1","container":"my-image","branch":"rhel-8","rev":"abc123"}' \
//!     | REBUILDER__SERVICE__DRY_RUN=true dockerfile-rebuilder
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use dockerfile_rebuilder::adapters::{
    DryRunBuildTrigger, HttpBuildTrigger, InMemoryBuildRecordStore, InMemoryEventDispatcher,
    PostgresBuildRecordStore, RulesPolicyChecker,
};
use dockerfile_rebuilder::application::DockerfileChangeHandler;
use dockerfile_rebuilder::config::AppConfig;
use dockerfile_rebuilder::domain::rebuild::RebuildEvent;
use dockerfile_rebuilder::ports::{BuildRecordStore, BuildTrigger, EventSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_tracing(&config)?;

    info!(
        environment = ?config.service.environment,
        dry_run = config.service.dry_run,
        "Starting dockerfile rebuilder"
    );

    let dispatcher = build_dispatcher(&config).await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let event: RebuildEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping unparsable event");
                continue;
            }
        };

        debug!(event_id = %event.event_id(), kind = %event.kind(), "Dispatching event");
        let handled = dispatcher.dispatch_all(vec![event]).await;
        debug!(line = line_no, handled, "Event dispatched");
        dispatcher.clear();
    }

    info!(events = line_no, "Input exhausted, shutting down");
    Ok(())
}

fn init_tracing(config: &AppConfig) -> Result<()> {
    let filter = config
        .service
        .env_filter()
        .context("invalid log filter")?;

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

async fn build_dispatcher(config: &AppConfig) -> Result<InMemoryEventDispatcher> {
    let policy = Arc::new(
        RulesPolicyChecker::from_config(&config.policy).context("invalid policy rules")?,
    );

    let builds: Arc<dyn BuildTrigger> = if config.service.dry_run {
        info!("Dry run enabled, builds will not be submitted");
        Arc::new(DryRunBuildTrigger::new())
    } else {
        Arc::new(
            HttpBuildTrigger::new(&config.build_service)
                .context("failed to create build service client")?,
        )
    };

    let records: Arc<dyn BuildRecordStore> = match &config.database {
        Some(database) => {
            let pool = database
                .pool_options()
                .connect(&database.url)
                .await
                .context("failed to connect to database")?;
            if database.run_migrations {
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("failed to run migrations")?;
                info!("Database migrations applied");
            }
            Arc::new(PostgresBuildRecordStore::new(pool))
        }
        None => {
            warn!("No database configured, build records are kept in memory");
            Arc::new(InMemoryBuildRecordStore::new())
        }
    };

    let dispatcher =
        InMemoryEventDispatcher::with_max_cascade_depth(config.service.max_cascade_depth);
    dispatcher.subscribe(Arc::new(DockerfileChangeHandler::new(policy, builds, records)));
    info!(handlers = dispatcher.handler_count(), "Handlers registered");

    Ok(dispatcher)
}
