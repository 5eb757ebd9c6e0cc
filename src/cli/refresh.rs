use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::Settings, error, snapshot::SnapshotStore, success, upstream, warning,
};

/// Fetches every collection once and writes the snapshot, without starting
/// the server. Useful to seed the snapshot directory before going offline.
pub async fn refresh(settings: Settings) {
    let client = match upstream::build_client(settings.fetch_timeout) {
        Ok(client) => client,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching artists, relations and locations...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let raw = match upstream::fetch_all(&client, &settings.endpoints).await {
        Ok(raw) => raw,
        Err(e) => {
            pb.finish_and_clear();
            error!("Refresh failed. Err: {}", e)
        }
    };

    pb.set_message("Writing snapshot...");
    let store = SnapshotStore::new(&settings.snapshot_dir);
    let report = store.save_all(&raw).await;
    pb.finish_and_clear();

    for (collection, e) in &report.failed {
        warning!("Failed to save {}. Err: {}", collection, e);
    }
    if !report.is_complete() {
        error!("Snapshot incomplete in {}", store.dir().display());
    }

    success!(
        "Saved {} artists, {} relations, {} locations to {}",
        raw.artists.len(),
        raw.relations.index.len(),
        raw.locations.index.len(),
        store.dir().display()
    );
}
