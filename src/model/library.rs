//! The library engine: one user's song collection, playlists, favorites,
//! ratings, and play history.
//!
//! All derived playlists are rebuilt from scratch after the mutations that
//! affect them, never patched incrementally. That trades a little
//! recomputation for the guarantee that they are never stale.

use super::{Album, AlbumRef, Playlist, Song};
use crate::catalog::Catalog;
use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use thiserror::Error;

/// Maximum number of entries kept in the recent-play history.
pub const RECENT_PLAYS_CAPACITY: usize = 10;

/// Maximum number of songs in the "Top Plays" playlist.
pub const TOP_PLAYS_LIMIT: usize = 10;

/// Minimum bucket size for a genre to earn its own automatic playlist.
pub const GENRE_PLAYLIST_THRESHOLD: usize = 10;

/// Names of the fixed automatic playlists. Genre playlists additionally
/// occupy "<genre> Playlist" once their bucket qualifies.
pub const FAVORITE_SONGS_PLAYLIST: &str = "Favorite Songs";
pub const TOP_RATED_PLAYLIST: &str = "Top Rated";
pub const RECENT_PLAYS_PLAYLIST: &str = "Recent Plays";
pub const TOP_PLAYS_PLAYLIST: &str = "Top Plays";

const RESERVED_NAMES: [&str; 4] = [
    FAVORITE_SONGS_PLAYLIST,
    TOP_RATED_PLAYLIST,
    RECENT_PLAYS_PLAYLIST,
    TOP_PLAYS_PLAYLIST,
];

/// Errors surfaced by library operations.
///
/// Everything else follows an ignore-invalid-input policy: operations on
/// unknown songs or playlists are silent no-ops or boolean returns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
}

/// One user's music library.
///
/// Owns the user's songs, playlists (user-created and automatic),
/// favorites, ratings, play counts, and a bounded recent-play history.
/// Adds are validated against the attached [`Catalog`]; songs the catalog
/// does not know are ignored.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LibraryModel {
    /// Songs the user added, in insertion order. Duplicates are allowed.
    songs: Vec<Song>,

    /// Playlists by name. User and automatic playlists share this
    /// namespace.
    playlists: HashMap<String, Playlist>,

    /// Songs explicitly marked favorite, in marking order.
    favorites: Vec<Song>,

    /// Ratings (1-5) keyed by song identity. Absent means unrated.
    #[serde(with = "song_keyed")]
    ratings: HashMap<Song, u8>,

    /// Most-recent-first play history, bounded, no duplicates.
    recent_plays: VecDeque<Song>,

    /// Cumulative play counts keyed by song identity.
    #[serde(with = "song_keyed")]
    play_counts: HashMap<Song, u32>,

    /// First-play order; breaks play-count ties deterministically
    /// (first-played-first among equal counts).
    play_order: Vec<Song>,

    /// Read-only source of canonical songs. Not part of the snapshot;
    /// reattached after loading.
    #[serde(skip)]
    catalog: Arc<Catalog>,

    /// Skips the catalog membership gate on adds.
    #[serde(skip)]
    test_mode: bool,
}

impl LibraryModel {
    /// Create an empty library validated against the given catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Reattach the catalog after deserialization; snapshots do not carry
    /// it.
    pub fn attach_catalog(&mut self, catalog: Arc<Catalog>) {
        self.catalog = catalog;
    }

    /// Disable the catalog membership gate, for tests that build songs
    /// without a backing catalog.
    pub fn enable_test_mode(&mut self) {
        self.test_mode = true;
    }

    fn song_in_catalog(&self, song: &Song) -> bool {
        self.test_mode || self.catalog.contains_song(song)
    }

    // ---- Library membership -------------------------------------------

    /// Add a song to the library. Songs unknown to the catalog are
    /// ignored.
    pub fn add_song_to_library(&mut self, song: Song) {
        if !self.song_in_catalog(&song) {
            log::debug!("Ignoring song not present in catalog: {song}");
            return;
        }
        self.songs.push(song);
        self.update_automatic_playlists();
    }

    /// Add every catalog-known song of the album. Unknown songs are
    /// skipped individually rather than aborting the whole album.
    pub fn add_album_to_library(&mut self, album: &Album) {
        for song in album.songs() {
            if self.song_in_catalog(song) {
                self.songs.push(song.clone());
            } else {
                log::debug!("Skipping song not present in catalog: {song}");
            }
        }
        self.update_automatic_playlists();
    }

    /// Remove one occurrence of the song if present.
    pub fn remove_song_from_library(&mut self, song: &Song) {
        if let Some(pos) = self.songs.iter().position(|s| s == song) {
            self.songs.remove(pos);
        }
        self.update_automatic_playlists();
    }

    /// Remove every library song whose album matches the given album by
    /// title and artist, case-insensitively.
    pub fn remove_album_from_library(&mut self, album: &AlbumRef) {
        self.songs
            .retain(|s| !s.album.matches_title_artist(&album.title, &album.artist));
        self.update_automatic_playlists();
    }

    /// Every song in the library, in insertion order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    // ---- Playlists ----------------------------------------------------

    /// Create an empty user playlist. Returns false when the name is
    /// taken, including by an automatic playlist.
    pub fn create_playlist(&mut self, name: &str) -> bool {
        if RESERVED_NAMES.contains(&name) || self.playlists.contains_key(name) {
            return false;
        }
        self.playlists.insert(name.to_string(), Playlist::new(name));
        true
    }

    /// Append a song to a named playlist. Missing playlists and duplicate
    /// songs are no-ops.
    pub fn add_song_to_playlist(&mut self, name: &str, song: Song) {
        if let Some(playlist) = self.playlists.get_mut(name) {
            playlist.add_song(song);
        }
    }

    /// Remove every occurrence of the song from a named playlist; no-op
    /// when the playlist is missing.
    pub fn remove_song_from_playlist(&mut self, name: &str, song: &Song) {
        if let Some(playlist) = self.playlists.get_mut(name) {
            playlist.remove_song(song);
        }
    }

    pub fn find_playlist_by_name(&self, name: &str) -> Option<&Playlist> {
        self.playlists.get(name)
    }

    /// All playlists, user and automatic, in no particular order.
    pub fn playlists(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.values()
    }

    // ---- Favorites and ratings ----------------------------------------

    /// Mark a song as favorite. Idempotent.
    pub fn mark_song_as_favorite(&mut self, song: Song) {
        if !self.favorites.contains(&song) {
            self.favorites.push(song);
        }
        self.update_automatic_playlists();
    }

    /// Rate a song 1-5 stars. A five-star rating also marks the song
    /// favorite; unfavoriting later does not reset the rating.
    pub fn rate_song(&mut self, song: &Song, rating: u8) -> Result<(), LibraryError> {
        if !(1..=5).contains(&rating) {
            return Err(LibraryError::RatingOutOfRange(rating));
        }
        self.ratings.insert(song.clone(), rating);
        if rating == 5 && !self.favorites.contains(song) {
            self.favorites.push(song.clone());
        }
        self.update_automatic_playlists();
        Ok(())
    }

    /// A song's rating, 0 if unrated.
    pub fn rating(&self, song: &Song) -> u8 {
        self.ratings.get(song).copied().unwrap_or(0)
    }

    pub fn is_favorite(&self, song: &Song) -> bool {
        self.favorites.contains(song)
    }

    /// Songs explicitly marked favorite, in marking order.
    pub fn favorite_songs(&self) -> &[Song] {
        &self.favorites
    }

    // ---- Play tracking ------------------------------------------------

    /// Record a play: move the song to the front of the bounded history,
    /// bump its play count, and rebuild the play-derived playlists.
    ///
    /// The other automatic playlists do not depend on play state and are
    /// left alone.
    pub fn play_song(&mut self, song: Song) {
        if let Some(pos) = self.recent_plays.iter().position(|s| *s == song) {
            self.recent_plays.remove(pos);
        }
        self.recent_plays.push_front(song.clone());
        self.recent_plays.truncate(RECENT_PLAYS_CAPACITY);

        let count = self.play_counts.entry(song.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            self.play_order.push(song);
        }

        self.rebuild_recent_plays_playlist();
        self.rebuild_top_plays_playlist();
    }

    /// Cumulative play count for a song.
    pub fn play_count(&self, song: &Song) -> u32 {
        self.play_counts.get(song).copied().unwrap_or(0)
    }

    /// The play history, most recent first.
    pub fn recent_plays(&self) -> impl Iterator<Item = &Song> {
        self.recent_plays.iter()
    }

    // ---- Search and sort (no mutation) --------------------------------

    /// Exact, case-insensitive title match over the library.
    pub fn search_songs_by_title(&self, title: &str) -> Vec<&Song> {
        self.songs
            .iter()
            .filter(|s| s.title.eq_ignore_ascii_case(title))
            .collect()
    }

    /// Exact, case-insensitive artist match over the library.
    pub fn search_songs_by_artist(&self, artist: &str) -> Vec<&Song> {
        self.songs
            .iter()
            .filter(|s| s.artist().eq_ignore_ascii_case(artist))
            .collect()
    }

    /// Albums referenced by the library whose title matches,
    /// deduplicated by album identity.
    pub fn search_albums_by_title(&self, title: &str) -> Vec<AlbumRef> {
        let mut results: Vec<AlbumRef> = Vec::new();
        for song in &self.songs {
            if song.album.title.eq_ignore_ascii_case(title) && !results.contains(&song.album) {
                results.push(song.album.clone());
            }
        }
        results
    }

    /// Albums referenced by the library whose artist matches,
    /// deduplicated by album identity.
    pub fn search_albums_by_artist(&self, artist: &str) -> Vec<AlbumRef> {
        let mut results: Vec<AlbumRef> = Vec::new();
        for song in &self.songs {
            if song.artist().eq_ignore_ascii_case(artist) && !results.contains(&song.album) {
                results.push(song.album.clone());
            }
        }
        results
    }

    /// Library songs sorted by title, case-insensitive ascending. Stable
    /// with respect to insertion order.
    pub fn songs_sorted_by_title(&self) -> Vec<&Song> {
        let mut sorted: Vec<&Song> = self.songs.iter().collect();
        sorted.sort_by_key(|s| s.title.to_lowercase());
        sorted
    }

    /// Library songs sorted by artist, case-insensitive ascending.
    pub fn songs_sorted_by_artist(&self) -> Vec<&Song> {
        let mut sorted: Vec<&Song> = self.songs.iter().collect();
        sorted.sort_by_key(|s| s.artist().to_lowercase());
        sorted
    }

    /// Library songs sorted by rating ascending; unrated songs sort
    /// first.
    pub fn songs_sorted_by_rating(&self) -> Vec<&Song> {
        let mut sorted: Vec<&Song> = self.songs.iter().collect();
        sorted.sort_by_key(|s| self.rating(s));
        sorted
    }

    /// A freshly shuffled copy of the library's songs. Unseeded; order
    /// differs from call to call.
    pub fn shuffled_songs(&self) -> Vec<Song> {
        let mut copy = self.songs.clone();
        copy.shuffle(&mut thread_rng());
        copy
    }

    /// Distinct albums referenced by the library.
    pub fn albums_in_library(&self) -> Vec<AlbumRef> {
        let mut albums: Vec<AlbumRef> = Vec::new();
        for song in &self.songs {
            if !albums.contains(&song.album) {
                albums.push(song.album.clone());
            }
        }
        albums
    }

    /// Distinct artist names referenced by the library.
    pub fn artists_in_library(&self) -> Vec<String> {
        let mut artists: Vec<String> = Vec::new();
        for song in &self.songs {
            if !artists.iter().any(|a| a == song.artist()) {
                artists.push(song.artist().to_string());
            }
        }
        artists
    }

    // ---- Automatic playlist recomputation -----------------------------

    /// Rebuild the derived playlists that depend on library membership,
    /// favorites, and ratings. The play-derived playlists have their own
    /// narrower rebuild in [`Self::play_song`].
    fn update_automatic_playlists(&mut self) {
        self.rebuild_favorites_playlist();
        self.rebuild_top_rated_playlist();
        self.rebuild_genre_playlists();
    }

    /// "Favorite Songs": every library song that is marked favorite or
    /// rated five stars, in library order.
    fn rebuild_favorites_playlist(&mut self) {
        let mut playlist = Playlist::new(FAVORITE_SONGS_PLAYLIST);
        for song in &self.songs {
            if self.favorites.contains(song) || self.rating(song) == 5 {
                playlist.add_song(song.clone());
            }
        }
        self.playlists
            .insert(FAVORITE_SONGS_PLAYLIST.to_string(), playlist);
    }

    /// "Top Rated": every library song rated four stars or better, in
    /// library order.
    fn rebuild_top_rated_playlist(&mut self) {
        let mut playlist = Playlist::new(TOP_RATED_PLAYLIST);
        for song in &self.songs {
            if self.rating(song) >= 4 {
                playlist.add_song(song.clone());
            }
        }
        self.playlists
            .insert(TOP_RATED_PLAYLIST.to_string(), playlist);
    }

    /// Genre buckets of at least [`GENRE_PLAYLIST_THRESHOLD`] songs each
    /// get a "<genre> Playlist" in library order.
    ///
    /// A bucket that later shrinks below the threshold keeps whatever
    /// playlist it last earned: this pass only overwrites, it never
    /// prunes.
    fn rebuild_genre_playlists(&mut self) {
        let mut buckets: HashMap<&str, Vec<&Song>> = HashMap::new();
        for song in &self.songs {
            buckets.entry(song.genre()).or_default().push(song);
        }

        let qualifying: Vec<(String, Vec<Song>)> = buckets
            .into_iter()
            .filter(|(_, songs)| songs.len() >= GENRE_PLAYLIST_THRESHOLD)
            .map(|(genre, songs)| {
                (genre.to_string(), songs.into_iter().cloned().collect())
            })
            .collect();

        for (genre, songs) in qualifying {
            let name = format!("{genre} Playlist");
            let mut playlist = Playlist::new(&name);
            for song in songs {
                playlist.add_song(song);
            }
            self.playlists.insert(name, playlist);
        }
    }

    /// "Recent Plays": the bounded history in most-recent-first order.
    fn rebuild_recent_plays_playlist(&mut self) {
        let mut playlist = Playlist::new(RECENT_PLAYS_PLAYLIST);
        for song in &self.recent_plays {
            playlist.add_song(song.clone());
        }
        self.playlists
            .insert(RECENT_PLAYS_PLAYLIST.to_string(), playlist);
    }

    /// "Top Plays": songs ranked by descending play count, capped at
    /// [`TOP_PLAYS_LIMIT`]. Ties stay in first-played order because the
    /// candidates go in first-played order through a stable sort.
    fn rebuild_top_plays_playlist(&mut self) {
        let mut ranked: Vec<(&Song, u32)> = self
            .play_order
            .iter()
            .map(|s| (s, self.play_counts.get(s).copied().unwrap_or(0)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let mut playlist = Playlist::new(TOP_PLAYS_PLAYLIST);
        for (song, _) in ranked.into_iter().take(TOP_PLAYS_LIMIT) {
            playlist.add_song(song.clone());
        }
        self.playlists
            .insert(TOP_PLAYS_PLAYLIST.to_string(), playlist);
    }
}

/// JSON objects need string keys, so song-keyed maps are stored as entry
/// sequences instead.
mod song_keyed {
    use super::Song;
    use serde::de::Deserializer;
    use serde::ser::Serializer;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;

    pub fn serialize<S, V>(map: &HashMap<Song, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        let entries: Vec<(&Song, &V)> = map.iter().collect();
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<HashMap<Song, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        let entries = Vec::<(Song, V)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
