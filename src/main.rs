use chrono::Local;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clubhouse::{config::Settings, service::ServiceContext};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let (settings, config_error) = match Settings::new() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(e) = config_error {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let context = ServiceContext::open(&settings)?;
    let summary = context.summary(Local::now().date_naive());

    println!("Data directory: {}", settings.storage.data_dir.display());
    println!("  Members:       {}", summary.members);
    println!("  Students:      {}", summary.students);
    println!("  Teachers:      {}", summary.teachers);
    println!("  Events:        {}", summary.events);
    println!("  Subscriptions: {}", summary.subscriptions);
    println!("  Revenue (paid): {:.2}", summary.total_revenue);

    if summary.upcoming_events.is_empty() {
        println!("\nNo upcoming events.");
    } else {
        println!("\nUpcoming events:");
        for event in &summary.upcoming_events {
            println!("  {}", event.display());
        }
    }

    Ok(())
}
