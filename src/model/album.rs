use super::{AlbumRef, Song};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An album from the catalog: identifying metadata plus the ordered list
/// of songs it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year: u32,
    songs: Vec<Song>,
}

impl Album {
    /// Create an album with no songs yet.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
        year: u32,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            genre: genre.into(),
            year,
            songs: Vec::new(),
        }
    }

    /// The identity other entities use to refer to this album.
    pub fn album_ref(&self) -> AlbumRef {
        AlbumRef {
            title: self.title.clone(),
            artist: self.artist.clone(),
            genre: self.genre.clone(),
            year: self.year,
        }
    }

    /// Append a song by title; its back-reference is filled in from this
    /// album's metadata.
    pub fn add_song(&mut self, title: impl Into<String>) {
        let song = Song::new(title, self.album_ref());
        self.songs.push(song);
    }

    /// The songs this album owns, in track order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}, {}, {} songs)",
            self.title,
            self.artist,
            self.genre,
            self.year,
            self.songs.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_songs_reference_their_album() {
        let mut album = Album::new("Kind of Blue", "Miles Davis", "Jazz", 1959);
        album.add_song("So What");
        album.add_song("Blue in Green");

        assert_eq!(album.song_count(), 2);
        assert_eq!(album.songs()[0].title, "So What");
        assert_eq!(album.songs()[1].album, album.album_ref());
    }
}
