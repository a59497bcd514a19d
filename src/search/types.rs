use crate::catalog::protocol::{AlbumLight, ArtistLight, CategoryOut, PlaylistLight, SongLight};
use serde::{Deserialize, Serialize};

/// The single best answer for a query, tagged with its entity kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TopResult {
    Song(SongLight),
    Artist(ArtistLight),
    Album(AlbumLight),
    Playlist(PlaylistLight),
    Category(CategoryOut),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub top_result: Option<TopResult>,
    pub songs: Vec<SongLight>,
    pub playlists: Vec<PlaylistLight>,
    pub artists: Vec<ArtistLight>,
    pub albums: Vec<AlbumLight>,
    pub categories: Vec<CategoryOut>,
}
