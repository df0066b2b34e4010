mod app;
mod config;
mod credentials;
mod entry_store;
mod error;
mod journal_entry;
mod logging;
mod query;
mod reminder;
mod ui;

use app::App;
use color_eyre::eyre::{eyre, Result};
use config::Config;
use credentials::CredentialStore;
use entry_store::EntryStore;
use reminder::{ReminderSignal, ReminderTimer};
use std::{fs, time::Duration};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;
use ui::UI;

const INPUT_POLL: Duration = Duration::from_millis(200);

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    fs::create_dir_all(&config.data_dir)
        .map_err(|e| eyre!("Failed to create {}: {}", config.data_dir.display(), e))?;
    let _log_guard = logging::init(&config)?;
    info!(data_dir = %config.data_dir.display(), "starting mood journal");

    let entries = EntryStore::new(config.entries_path());
    entries.ensure_initialized()?;
    let credentials = CredentialStore::new(config.credentials_path());
    credentials.ensure_initialized()?;
    info!(
        entries = %entries.path().display(),
        credentials = %credentials.path().display(),
        "stores ready"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()?;

    let mut app = App::new();
    let mut ui = UI::new()?;
    let mut reminder: Option<(ReminderTimer, UnboundedReceiver<ReminderSignal>)> = None;

    while !app.should_quit() {
        if let Some((_, signals)) = reminder.as_mut() {
            while signals.try_recv().is_ok() {
                app.remind();
            }
        }

        ui.draw(&app)?;

        if let Some(key) = ui.next_key(INPUT_POLL)? {
            if let Some(action) = app.handle_key(key) {
                app.perform(action, &entries, &credentials);
            }
        }

        if app.should_start_reminder(reminder.is_some()) {
            reminder = Some(ReminderTimer::spawn(
                runtime.handle(),
                config.reminder_interval,
            ));
        }
    }

    drop(ui);
    if let Some((timer, _)) = reminder {
        runtime.block_on(timer.shutdown());
    }
    info!("mood journal closed");

    Ok(())
}
