use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::engine::{TopHit, search_catalog};
use super::types::{SearchResponse, TopResult};
use crate::accounts::protocol::api_error;
use crate::catalog::store::CatalogStore;
use crate::catalog::view;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn handle_search(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(q) = params.q else {
        return api_error(StatusCode::BAD_REQUEST, "q is required!").into_response();
    };

    let ids = search_catalog(&catalog, &q);

    let top_result = ids.top.and_then(|hit| match hit {
        TopHit::Song(id) => catalog
            .songs
            .get(id)
            .map(|song| TopResult::Song(view::song_light(&catalog, &song))),
        TopHit::Artist(id) => catalog
            .artists
            .get(id)
            .map(|artist| TopResult::Artist(view::artist_light(&artist))),
        TopHit::Album(id) => catalog
            .albums
            .get(id)
            .map(|album| TopResult::Album(view::album_light(&catalog, &album))),
        TopHit::Playlist(id) => catalog
            .playlists
            .get(id)
            .map(|playlist| TopResult::Playlist(view::playlist_light(&playlist))),
        TopHit::Category(id) => catalog
            .categories
            .get(id)
            .map(|category| TopResult::Category(view::category_out(&category))),
    });

    Json(SearchResponse {
        top_result,
        songs: ids
            .songs
            .iter()
            .filter_map(|id| catalog.songs.get(*id))
            .map(|song| view::song_light(&catalog, &song))
            .collect(),
        playlists: ids
            .playlists
            .iter()
            .filter_map(|id| catalog.playlists.get(*id))
            .map(|playlist| view::playlist_light(&playlist))
            .collect(),
        artists: ids
            .artists
            .iter()
            .filter_map(|id| catalog.artists.get(*id))
            .map(|artist| view::artist_light(&artist))
            .collect(),
        albums: ids
            .albums
            .iter()
            .filter_map(|id| catalog.albums.get(*id))
            .map(|album| view::album_light(&catalog, &album))
            .collect(),
        categories: ids
            .categories
            .iter()
            .filter_map(|id| catalog.categories.get(*id))
            .map(|category| view::category_out(&category))
            .collect(),
    })
    .into_response()
}
