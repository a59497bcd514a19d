use crate::catalog::protocol::{
    AlbumLight, ArtistLight, CategoryOut, PlaylistOut, SongLight, SongOut,
};
use serde::{Deserialize, Serialize};

/// The full recommendation feed.
///
/// `popular_songs` is the fallback list: it is filled regardless of whether
/// the caller has favorites, so clients always have something to show.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommended_songs: Vec<SongOut>,
    pub recommended_albums: Vec<AlbumLight>,
    pub recommended_artists: Vec<ArtistLight>,
    pub recommended_playlists: Vec<PlaylistOut>,
    pub recommended_categories: Vec<CategoryOut>,
    pub category_songs: Vec<SongLight>,
    pub popular_songs: Vec<SongOut>,
}
