//! Tunecellar - personal music library manager
//!
//! Manages a user's music library drawn from a read-only catalog:
//! user-created playlists, favorites, ratings, play history, and
//! automatically maintained playlists derived from all of those.

pub mod auth;
pub mod catalog;
pub mod model;
pub mod storage;

pub use catalog::Catalog;
pub use model::{Album, AlbumRef, LibraryError, LibraryModel, Playlist, Song};
