use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifying metadata of the album a song belongs to.
///
/// Songs carry this back-reference by value. It is never used to mutate
/// the album itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlbumRef {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year: u32,
}

impl AlbumRef {
    /// Case-insensitive match on (title, artist) — the identity used when
    /// removing an album's songs from a library.
    pub fn matches_title_artist(&self, title: &str, artist: &str) -> bool {
        self.title.eq_ignore_ascii_case(title) && self.artist.eq_ignore_ascii_case(artist)
    }
}

impl fmt::Display for AlbumRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}, {})",
            self.title, self.artist, self.genre, self.year
        )
    }
}

/// A single song, identified by its title and owning album.
///
/// Equality and hashing cover exactly that identity, so membership checks
/// agree between the catalog and any library holding copies of the same
/// song. Rating and favorite state live in the owning `LibraryModel`,
/// keyed by this identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub album: AlbumRef,
}

impl Song {
    pub fn new(title: impl Into<String>, album: AlbumRef) -> Self {
        Self {
            title: title.into(),
            album,
        }
    }

    pub fn artist(&self) -> &str {
        &self.album.artist
    }

    pub fn genre(&self) -> &str {
        &self.album.genre
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} [{}]", self.title, self.album.artist, self.album.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album() -> AlbumRef {
        AlbumRef {
            title: "Blue Train".to_string(),
            artist: "John Coltrane".to_string(),
            genre: "Jazz".to_string(),
            year: 1958,
        }
    }

    #[test]
    fn test_song_identity_ignores_nothing_but_title_and_album() {
        let a = Song::new("Moment's Notice", album());
        let b = Song::new("Moment's Notice", album());
        let c = Song::new("Locomotion", album());

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_album_ref_title_artist_match_is_case_insensitive() {
        let r = album();
        assert!(r.matches_title_artist("blue train", "JOHN COLTRANE"));
        assert!(!r.matches_title_artist("blue train", "Miles Davis"));
    }
}
