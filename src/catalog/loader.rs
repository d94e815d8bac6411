//! Text-format catalog loader
//!
//! A catalog directory holds an `albums.txt` index with one
//! `Album Title,Artist` line per album, plus one `<Title>_<Artist>.txt`
//! file per album: a `Title,Artist,Genre,Year` header followed by one
//! song title per line.

use super::Catalog;
use crate::model::Album;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Name of the index file listing every album in the catalog directory.
pub const INDEX_FILE: &str = "albums.txt";

/// Load a complete catalog from a directory.
///
/// Malformed index lines and album headers are skipped with a warning;
/// unreadable files are errors.
pub fn load_catalog(dir: &Path) -> Result<Catalog> {
    let index_path = dir.join(INDEX_FILE);
    let index = fs::read_to_string(&index_path)
        .with_context(|| format!("Failed to read catalog index: {:?}", index_path))?;

    let mut albums = Vec::new();
    for line in index.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((title, artist)) = line.split_once(',') else {
            log::warn!("Skipping malformed catalog index line: {line}");
            continue;
        };

        let album_path = dir.join(format!("{}_{}.txt", title.trim(), artist.trim()));
        match load_album(&album_path)? {
            Some(album) => albums.push(album),
            None => log::warn!("Skipping malformed album file: {:?}", album_path),
        }
    }

    let catalog = Catalog::from_albums(albums);
    log::info!(
        "Loaded catalog: {} albums, {} songs",
        catalog.album_count(),
        catalog.song_count()
    );
    Ok(catalog)
}

/// Parse a single album file. Returns None when the header is malformed.
fn load_album(path: &Path) -> Result<Option<Album>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read album file: {:?}", path))?;
    let mut lines = contents.lines();

    let Some(header) = lines.next() else {
        return Ok(None);
    };
    let fields: Vec<&str> = header.splitn(4, ',').map(str::trim).collect();
    let [title, artist, genre, year] = fields[..] else {
        return Ok(None);
    };
    let Ok(year) = year.parse::<u32>() else {
        return Ok(None);
    };

    let mut album = Album::new(title, artist, genre, year);
    for song_title in lines {
        let song_title = song_title.trim();
        if !song_title.is_empty() {
            album.add_song(song_title);
        }
    }
    Ok(Some(album))
}
