//! Library snapshot persistence
//!
//! A [`LibraryModel`] is saved as one opaque JSON document. The catalog
//! handle is not part of the snapshot; callers reattach it after loading.

use crate::model::LibraryModel;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write a snapshot of the library to `path`.
pub fn save_library(library: &LibraryModel, path: &Path) -> Result<()> {
    let contents =
        serde_json::to_string_pretty(library).context("Failed to serialize library")?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write library snapshot: {:?}", path))?;
    log::debug!("Saved library snapshot to {:?}", path);
    Ok(())
}

/// Read a snapshot back. The returned model has no catalog attached.
pub fn load_library(path: &Path) -> Result<LibraryModel> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read library snapshot: {:?}", path))?;
    let library = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse library snapshot: {:?}", path))?;
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Album, LibraryModel, RECENT_PLAYS_PLAYLIST};
    use tempfile::TempDir;

    #[test]
    fn test_snapshot_round_trip() {
        let mut album = Album::new("Test Album", "Test Artist", "Rock", 2020);
        album.add_song("Song 1");
        album.add_song("Song 2");
        let first = album.songs()[0].clone();
        let second = album.songs()[1].clone();

        let mut library = LibraryModel::default();
        library.enable_test_mode();
        library.add_album_to_library(&album);
        library.rate_song(&first, 4).unwrap();
        library.mark_song_as_favorite(second.clone());
        library.create_playlist("Workout");
        library.add_song_to_playlist("Workout", first.clone());
        library.play_song(second.clone());
        library.play_song(first.clone());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alice.library.json");
        save_library(&library, &path).unwrap();

        let restored = load_library(&path).unwrap();
        assert_eq!(restored.songs(), library.songs());
        assert_eq!(restored.rating(&first), 4);
        assert!(restored.is_favorite(&second));
        assert_eq!(restored.play_count(&first), 1);

        let workout = restored.find_playlist_by_name("Workout").unwrap();
        assert_eq!(workout.songs(), &[first.clone()]);

        let recent = restored.find_playlist_by_name(RECENT_PLAYS_PLAYLIST).unwrap();
        assert_eq!(recent.songs(), &[first, second]);
    }

    #[test]
    fn test_load_missing_snapshot_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_library(&dir.path().join("nope.json")).is_err());
    }
}
