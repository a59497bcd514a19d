use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub id: u64,
    pub name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: u64,
    pub name: String,
    pub artist_id: u64,
    pub category_ids: Vec<u64>,
    pub cover_url: Option<String>,
    pub release_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: u64,
    pub name: String,
    pub artist_id: u64,
    /// Detached (kept `None`) when the album is deleted.
    pub album_id: Option<u64>,
    pub category_ids: Vec<u64>,
    pub cover_url: Option<String>,
    pub audio_url: Option<String>,
    pub duration_secs: Option<u32>,
    pub popularity: u32,
    pub release_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub id: u64,
    pub name: String,
    pub user_id: u64,
    pub song_ids: Vec<u64>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user's liked items, one row per user, keyed by user id in the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorite {
    pub song_ids: Vec<u64>,
    pub album_ids: Vec<u64>,
    pub artist_ids: Vec<u64>,
    pub playlist_ids: Vec<u64>,
}
