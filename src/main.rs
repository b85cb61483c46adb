//! Chirec UI headless harness
//!
//! Drives the page controller against a live server with an in-memory
//! document and prints what the page would show.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;

use chirec_ui::{
    UiController,
    api::{Backend, HttpBackend},
    config::{AppConfig, ConfigArgs, UiSettings},
    controller::selectors,
    dom::{Dom, MemoryDom},
    domain::Timestamp,
    page::{MemoryPage, Page},
    telemetry,
    ui::format_time,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a page of the job feed and print the rendered cards
    Feed {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Toggle the user's mode
    ToggleMode,
    /// Save a job
    SaveJob { id: i64 },
    /// Enroll in an event
    Enroll { id: i64 },
    /// Bookmark an event
    Bookmark { id: i64 },
    /// Print the relative label of a timestamp (RFC 3339, ISO-8601 or epoch ms)
    FormatTime { timestamp: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    // Load .env (if present)
    let _ = dotenv();

    let cli = Cli::parse();
    let config = AppConfig::load_with(&cli.config).context("Configuration error")?;

    info!(
        name: "ui.config.loaded",
        base_url = %config.client.base_url,
        "Configuration loaded"
    );

    match cli.command {
        Command::FormatTime { timestamp } => {
            let ts = timestamp
                .parse::<f64>()
                .map_or_else(|_| Timestamp::Text(timestamp.clone()), Timestamp::Millis);
            println!("{}", format_time(&ts));
        }
        Command::Feed { page } => {
            let harness = Harness::new(&config)?;
            let container = harness
                .dom
                .element_by_id(selectors::JOB_SCROLLER)
                .context("page skeleton has no feed container")?;
            let feed = harness.backend.job_feed(page).await?;
            harness.controller.append_jobs(container, &feed.jobs);
            println!("{}", harness.dom.render(container));
        }
        Command::ToggleMode => {
            let harness = Harness::new(&config)?;
            harness.controller.toggle_user_mode().await;
            harness.print();
        }
        Command::SaveJob { id } => {
            let harness = Harness::new(&config)?;
            harness.controller.save_job(id).await;
            harness.print();
        }
        Command::Enroll { id } => {
            let harness = Harness::new(&config)?;
            harness.controller.enroll_event(id).await;
            harness.print();
        }
        Command::Bookmark { id } => {
            let harness = Harness::new(&config)?;
            harness.controller.bookmark_event(id).await;
            harness.print();
        }
    }

    Ok(())
}

/// Headless page: in-memory document and window around a live backend.
struct Harness {
    dom: Arc<MemoryDom>,
    page: Arc<MemoryPage>,
    backend: Arc<HttpBackend>,
    controller: Arc<UiController>,
}

impl Harness {
    fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let backend = Arc::new(HttpBackend::new(&config.client.base_url)?);
        let dom = Arc::new(MemoryDom::page_skeleton());
        let page = Arc::new(MemoryPage::default());
        let controller = UiController::builder(
            Arc::clone(&dom) as Arc<dyn Dom>,
            Arc::clone(&page) as Arc<dyn Page>,
            Arc::clone(&backend) as Arc<dyn Backend>,
        )
        .settings(UiSettings::from(&config.ui))
        .build();

        Ok(Self {
            dom,
            page,
            backend,
            controller,
        })
    }

    fn print(&self) {
        println!("{}", self.dom.render(self.dom.body()));
        println!("location: {}", self.page.location());
        println!("reloads: {}", self.page.reload_count());
    }
}
