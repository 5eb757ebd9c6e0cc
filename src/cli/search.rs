use tabled::Table;

use crate::{
    config::Settings,
    query::{self, SearchError},
    snapshot::SnapshotStore,
    types::{ArtistTableRow, Catalog, CatalogOrigin},
    warning,
};

/// Searches the on-disk snapshot and prints the hits as a table.
pub async fn search(settings: Settings, search: String) {
    let store = SnapshotStore::new(&settings.snapshot_dir);
    let raw = store.load_all().await;
    if raw.is_empty() {
        warning!(
            "No snapshot in {}. Run groupie-tracker refresh first.",
            store.dir().display()
        );
        return;
    }

    let catalog = Catalog::build(raw, CatalogOrigin::Snapshot);
    match query::search(&catalog.view, &search) {
        Ok(artists) => {
            let rows: Vec<ArtistTableRow> = artists.iter().map(ArtistTableRow::from).collect();
            println!("{}", Table::new(rows));
        }
        Err(SearchError::EmptyQuery) => warning!("Search query is empty."),
        Err(e) => warning!("{}", e),
    }
}
