mod commands;
mod config;
mod context;
mod error;
mod handlers;
mod period;
mod product;
mod report;
mod salary;
mod storages;
mod watchdog;

use std::sync::Arc;

use clap::Parser;
use config::Args;
use context::{AppContext, LocalClock};
use handlers::handle_text_message;
use storages::{Storage, StorageTrait};
use teloxide::{prelude::*, update_listeners::Polling};
use watchdog::Watchdog;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    pretty_env_logger::init();
    log::info!("Starting secretary bot...");

    if let Err(err) = run(args).await {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = args.load_settings()?;
    let token = args.get_token()?;
    let bot = Bot::new(token);

    // Initialize main storage based on CLI arguments
    let storage = if let Some(path) = &args.database {
        log::info!("Using SQLite storage in {:?}", path);
        Storage::sqlite(path)?
    } else {
        log::info!("Using in-memory storage");
        Storage::new()
    };
    let storage: Arc<dyn StorageTrait> = Arc::new(storage);

    let salary_storage = storage.clone().as_salary_storage();
    salary::seed_salaries(salary_storage.as_ref(), &settings.salaries).await?;
    let salaries = salary_storage.list_salaries().await?;
    if salaries.is_empty() {
        log::warn!("No salaries configured, /report will fail until one is added");
    }
    for salary in &salaries {
        log::info!("Salary: {}", salary);
    }

    let context = Arc::new(AppContext::new(storage.clone(), Arc::new(LocalClock)));

    let watchdog = Watchdog::new(settings.retry_attempts)
        .spawn(settings.ping_interval(), storage.clone().as_health_check());

    let handler = dptree::entry().branch(
        Update::filter_message()
            .branch(dptree::filter(|msg: Message| msg.text().is_some()).endpoint(handle_text_message)),
    );

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![context])
        .enable_ctrlc_handler()
        .build();

    let listener = Polling::builder(bot)
        .timeout(settings.poll_timeout())
        .delete_webhook()
        .await
        .build();

    tokio::select! {
        _ = dispatcher.dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        ) => {
            log::info!("Dispatcher stopped");
            Ok(())
        }
        result = watchdog => {
            match result {
                Ok(failure) => log::error!("Connectivity watchdog gave up: {}", failure),
                Err(err) => log::error!("Connectivity watchdog crashed: {}", err),
            }
            std::process::exit(1);
        }
    }
}
