//! Read-only catalog of albums and songs
//!
//! The catalog is the canonical source of song and album records. It is
//! loaded once, never mutated afterwards, and safe to share by reference
//! across libraries. Libraries validate membership against it.

mod loader;

pub use loader::load_catalog;

use crate::model::{Album, Song};
use std::collections::HashSet;

/// Immutable-after-load collection of albums and their songs.
#[derive(Debug, Default)]
pub struct Catalog {
    albums: Vec<Album>,
    songs: HashSet<Song>,
}

impl Catalog {
    /// Build a catalog from fully populated albums.
    pub fn from_albums(albums: Vec<Album>) -> Self {
        let songs = albums
            .iter()
            .flat_map(|a| a.songs().iter().cloned())
            .collect();
        Self { albums, songs }
    }

    /// Exact, case-insensitive title lookup over all songs.
    pub fn find_songs_by_title(&self, title: &str) -> Vec<&Song> {
        self.all_songs()
            .filter(|s| s.title.eq_ignore_ascii_case(title))
            .collect()
    }

    /// Exact, case-insensitive title lookup over all albums.
    pub fn find_albums_by_title(&self, title: &str) -> Vec<&Album> {
        self.albums
            .iter()
            .filter(|a| a.title.eq_ignore_ascii_case(title))
            .collect()
    }

    /// Exact, case-insensitive artist lookup over all songs.
    pub fn find_songs_by_artist(&self, artist: &str) -> Vec<&Song> {
        self.all_songs()
            .filter(|s| s.artist().eq_ignore_ascii_case(artist))
            .collect()
    }

    /// Exact, case-insensitive artist lookup over all albums.
    pub fn find_albums_by_artist(&self, artist: &str) -> Vec<&Album> {
        self.albums
            .iter()
            .filter(|a| a.artist.eq_ignore_ascii_case(artist))
            .collect()
    }

    /// Membership test over the full song set.
    pub fn contains_song(&self, song: &Song) -> bool {
        self.songs.contains(song)
    }

    /// All albums, in load order.
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// All songs, grouped by album in load order.
    pub fn all_songs(&self) -> impl Iterator<Item = &Song> {
        self.albums.iter().flat_map(|a| a.songs().iter())
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    /// Number of distinct songs.
    pub fn song_count(&self) -> usize {
        self.songs.len()
    }
}
