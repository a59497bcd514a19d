//! Catalog API Protocol
//!
//! Data Transfer Objects (DTOs) for the catalog endpoints. Light shapes are
//! the list/embedded forms; `*Out` shapes nest their relations one level
//! deep so representations never recurse.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Action-success payload: `{"success": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessBody {
    pub success: String,
}

// --- representations ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryOut {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistLight {
    pub id: u64,
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistOut {
    pub id: u64,
    pub name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub songs: Vec<SongLight>,
    pub albums: Vec<AlbumLight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumLight {
    pub id: u64,
    pub name: String,
    pub artist_id: u64,
    pub artist_name: String,
    pub cover_url: Option<String>,
    pub release_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumOut {
    pub id: u64,
    pub name: String,
    pub artist: Option<ArtistLight>,
    pub categories: Vec<CategoryOut>,
    pub songs: Vec<SongLight>,
    pub cover_url: Option<String>,
    pub release_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongLight {
    pub id: u64,
    pub name: String,
    pub artist_id: u64,
    pub artist_name: String,
    pub album_id: Option<u64>,
    pub duration_secs: Option<u32>,
    pub popularity: u32,
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongOut {
    pub id: u64,
    pub name: String,
    pub artist: Option<ArtistLight>,
    pub album: Option<AlbumLight>,
    pub duration_secs: Option<u32>,
    pub popularity: u32,
    pub cover_url: Option<String>,
    pub audio_url: Option<String>,
    pub release_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistLight {
    pub id: u64,
    pub name: String,
    pub cover_url: Option<String>,
    pub song_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOut {
    pub id: u64,
    pub name: String,
    pub owner: Option<PlaylistOwner>,
    pub songs: Vec<SongLight>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteOut {
    pub user_id: u64,
    pub songs: Vec<SongOut>,
    pub albums: Vec<AlbumLight>,
    pub artists: Vec<ArtistLight>,
    pub playlists: Vec<PlaylistLight>,
}

// --- create/update requests ---

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateArtistRequest {
    pub name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateArtistRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAlbumRequest {
    pub name: String,
    pub artist_id: u64,
    #[serde(default)]
    pub category_ids: Vec<u64>,
    pub cover_url: Option<String>,
    pub release_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAlbumRequest {
    pub name: Option<String>,
    pub artist_id: Option<u64>,
    pub category_ids: Option<Vec<u64>>,
    pub cover_url: Option<String>,
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    pub name: String,
    pub artist_id: u64,
    pub album_id: Option<u64>,
    #[serde(default)]
    pub category_ids: Vec<u64>,
    pub cover_url: Option<String>,
    pub audio_url: Option<String>,
    pub duration_secs: Option<u32>,
    #[serde(default)]
    pub popularity: u32,
    pub release_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSongRequest {
    pub name: Option<String>,
    pub artist_id: Option<u64>,
    pub album_id: Option<u64>,
    pub category_ids: Option<Vec<u64>>,
    pub cover_url: Option<String>,
    pub audio_url: Option<String>,
    pub duration_secs: Option<u32>,
    pub popularity: Option<u32>,
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub song_ids: Vec<u64>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePlaylistRequest {
    pub name: Option<String>,
    pub song_ids: Option<Vec<u64>>,
    pub cover_url: Option<String>,
}

/// Body of the playlist song actions. The id is optional so the handler can
/// answer the documented "song_id is required!" message itself.
#[derive(Debug, Default, Deserialize)]
pub struct SongIdBody {
    pub song_id: Option<u64>,
}

/// Body of the favorite add/remove actions.
#[derive(Debug, Default, Deserialize)]
pub struct ItemIdBody {
    pub id: Option<u64>,
}
