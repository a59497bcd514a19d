use axum::{Json, extract::Extension, http::HeaderMap};
use std::sync::Arc;

use super::engine::recommend;
use super::types::RecommendationResponse;
use crate::accounts::auth::current_user;
use crate::accounts::store::AccountStore;
use crate::catalog::store::CatalogStore;
use crate::catalog::view;

/// Public endpoint; a valid bearer token personalizes the feed.
pub async fn handle_recommendation(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
) -> Json<RecommendationResponse> {
    let user_id = current_user(&headers, &accounts).map(|user| user.id);
    let ids = recommend(&catalog, user_id);

    tracing::debug!(
        "Recommendation for {:?}: {} songs, {} albums, {} artists",
        user_id,
        ids.songs.len(),
        ids.albums.len(),
        ids.artists.len()
    );

    Json(RecommendationResponse {
        recommended_songs: ids
            .songs
            .iter()
            .filter_map(|id| catalog.songs.get(*id))
            .map(|song| view::song_out(&catalog, &song))
            .collect(),
        recommended_albums: ids
            .albums
            .iter()
            .filter_map(|id| catalog.albums.get(*id))
            .map(|album| view::album_light(&catalog, &album))
            .collect(),
        recommended_artists: ids
            .artists
            .iter()
            .filter_map(|id| catalog.artists.get(*id))
            .map(|artist| view::artist_light(&artist))
            .collect(),
        recommended_playlists: ids
            .playlists
            .iter()
            .filter_map(|id| catalog.playlists.get(*id))
            .map(|playlist| view::playlist_out(&catalog, &accounts, &playlist))
            .collect(),
        recommended_categories: ids
            .categories
            .iter()
            .filter_map(|id| catalog.categories.get(*id))
            .map(|category| view::category_out(&category))
            .collect(),
        category_songs: ids
            .category_songs
            .iter()
            .filter_map(|id| catalog.songs.get(*id))
            .map(|song| view::song_light(&catalog, &song))
            .collect(),
        popular_songs: ids
            .popular_songs
            .iter()
            .filter_map(|id| catalog.songs.get(*id))
            .map(|song| view::song_out(&catalog, &song))
            .collect(),
    })
}
