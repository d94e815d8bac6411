//! Entity layer and library engine
//!
//! Songs and albums are value-like records; a [`LibraryModel`] owns one
//! user's library state and every operation over it.

mod album;
mod library;
mod playlist;
mod song;

pub use album::Album;
pub use library::{
    LibraryError, LibraryModel, FAVORITE_SONGS_PLAYLIST, GENRE_PLAYLIST_THRESHOLD,
    RECENT_PLAYS_CAPACITY, RECENT_PLAYS_PLAYLIST, TOP_PLAYS_LIMIT, TOP_PLAYS_PLAYLIST,
    TOP_RATED_PLAYLIST,
};
pub use playlist::Playlist;
pub use song::{AlbumRef, Song};
