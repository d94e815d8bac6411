use super::Song;
use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, ordered sequence of songs with no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    name: String,
    songs: Vec<Song>,
}

impl Playlist {
    /// Create a new empty playlist.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            songs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a song unless it is already present. Returns whether the
    /// playlist changed.
    pub fn add_song(&mut self, song: Song) -> bool {
        if self.songs.contains(&song) {
            return false;
        }
        self.songs.push(song);
        true
    }

    /// Remove every occurrence of the song.
    pub fn remove_song(&mut self, song: &Song) {
        self.songs.retain(|s| s != song);
    }

    pub fn contains(&self, song: &Song) -> bool {
        self.songs.contains(song)
    }

    /// The songs in playlist order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// A freshly shuffled copy of the playlist's songs. The playlist
    /// itself is left untouched; order differs from call to call.
    pub fn shuffled_songs(&self) -> Vec<Song> {
        let mut copy = self.songs.clone();
        copy.shuffle(&mut thread_rng());
        copy
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Playlist: {} ({} songs)", self.name, self.songs.len())
    }
}
