use axum::{
    Json,
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use super::protocol::{
    CreateAlbumRequest, CreateArtistRequest, CreateCategoryRequest, CreatePlaylistRequest,
    CreateSongRequest, ItemIdBody, SongIdBody, SuccessBody, UpdateAlbumRequest,
    UpdateArtistRequest, UpdateCategoryRequest, UpdatePlaylistRequest, UpdateSongRequest,
};
use super::store::CatalogStore;
use super::types::{Album, Artist, Category, Favorite, Playlist, Song};
use super::view;
use crate::accounts::auth::{require_admin, require_owner_or_admin, require_user};
use crate::accounts::protocol::api_error;
use crate::accounts::store::AccountStore;

fn error(status: StatusCode, text: &str) -> Response {
    api_error(status, text).into_response()
}

fn success(text: &str) -> Response {
    Json(SuccessBody {
        success: text.to_string(),
    })
    .into_response()
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Not found")
}

// ---- categories ----

pub async fn handle_list_categories(Extension(catalog): Extension<Arc<CatalogStore>>) -> Response {
    let out: Vec<_> = catalog
        .categories
        .snapshot()
        .iter()
        .map(|(_, category)| view::category_out(category))
        .collect();
    Json(out).into_response()
}

pub async fn handle_create_category(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<CreateCategoryRequest>,
) -> Response {
    if let Err(e) = require_admin(&headers, &accounts) {
        return e.into_response();
    }
    if req.name.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "name is required!");
    }

    let id = catalog.categories.insert_with(|id| Category {
        id,
        name: req.name.trim().to_string(),
        description: req.description,
        cover_url: req.cover_url,
    });
    let category = catalog.categories.get(id).expect("category just inserted");
    (StatusCode::CREATED, Json(view::category_out(&category))).into_response()
}

pub async fn handle_get_category(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Path(id): Path<u64>,
) -> Response {
    match catalog.categories.get(id) {
        Some(category) => Json(view::category_out(&category)).into_response(),
        None => not_found(),
    }
}

pub async fn handle_update_category(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Response {
    if let Err(e) = require_admin(&headers, &accounts) {
        return e.into_response();
    }
    if !catalog.categories.contains(id) {
        return not_found();
    }
    if let Some(name) = &req.name {
        if name.trim().is_empty() {
            return error(StatusCode::BAD_REQUEST, "name is required!");
        }
    }

    catalog.categories.update(id, |category| {
        if let Some(name) = req.name {
            category.name = name.trim().to_string();
        }
        if let Some(description) = req.description {
            category.description = Some(description);
        }
        if let Some(cover_url) = req.cover_url {
            category.cover_url = Some(cover_url);
        }
    });
    let category = catalog.categories.get(id).expect("category exists");
    Json(view::category_out(&category)).into_response()
}

pub async fn handle_delete_category(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(e) = require_admin(&headers, &accounts) {
        return e.into_response();
    }
    match catalog.remove_category(id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

// ---- artists ----

pub async fn handle_list_artists(Extension(catalog): Extension<Arc<CatalogStore>>) -> Response {
    let out: Vec<_> = catalog
        .artists
        .snapshot()
        .iter()
        .map(|(_, artist)| view::artist_out(&catalog, artist))
        .collect();
    Json(out).into_response()
}

pub async fn handle_create_artist(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<CreateArtistRequest>,
) -> Response {
    if let Err(e) = require_admin(&headers, &accounts) {
        return e.into_response();
    }
    if req.name.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "name is required!");
    }

    let id = catalog.artists.insert_with(|id| Artist {
        id,
        name: req.name.trim().to_string(),
        bio: req.bio,
        image_url: req.image_url,
    });
    let artist = catalog.artists.get(id).expect("artist just inserted");
    (
        StatusCode::CREATED,
        Json(view::artist_out(&catalog, &artist)),
    )
        .into_response()
}

pub async fn handle_get_artist(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Path(id): Path<u64>,
) -> Response {
    match catalog.artists.get(id) {
        Some(artist) => Json(view::artist_out(&catalog, &artist)).into_response(),
        None => not_found(),
    }
}

pub async fn handle_update_artist(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(req): Json<UpdateArtistRequest>,
) -> Response {
    if let Err(e) = require_admin(&headers, &accounts) {
        return e.into_response();
    }
    if !catalog.artists.contains(id) {
        return not_found();
    }

    catalog.artists.update(id, |artist| {
        if let Some(name) = req.name {
            if !name.trim().is_empty() {
                artist.name = name.trim().to_string();
            }
        }
        if let Some(bio) = req.bio {
            artist.bio = Some(bio);
        }
        if let Some(image_url) = req.image_url {
            artist.image_url = Some(image_url);
        }
    });
    let artist = catalog.artists.get(id).expect("artist exists");
    Json(view::artist_out(&catalog, &artist)).into_response()
}

pub async fn handle_delete_artist(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(e) = require_admin(&headers, &accounts) {
        return e.into_response();
    }
    match catalog.remove_artist(id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

/// The artist's songs, most popular first.
pub async fn handle_artist_top_songs(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Path(id): Path<u64>,
) -> Response {
    if !catalog.artists.contains(id) {
        return not_found();
    }

    let mut songs = catalog.songs_of_artist(id);
    songs.sort_by(|a, b| b.popularity.cmp(&a.popularity).then(a.id.cmp(&b.id)));
    let out: Vec<_> = songs
        .iter()
        .map(|song| view::song_light(&catalog, song))
        .collect();
    Json(out).into_response()
}

// ---- albums ----

fn check_album_refs(
    catalog: &CatalogStore,
    artist_id: Option<u64>,
    category_ids: Option<&[u64]>,
) -> Option<Response> {
    if let Some(artist_id) = artist_id {
        if !catalog.artists.contains(artist_id) {
            return Some(error(StatusCode::BAD_REQUEST, "Artist does not exist"));
        }
    }
    if let Some(ids) = category_ids {
        if ids.iter().any(|id| !catalog.categories.contains(*id)) {
            return Some(error(StatusCode::BAD_REQUEST, "Category does not exist"));
        }
    }
    None
}

pub async fn handle_list_albums(Extension(catalog): Extension<Arc<CatalogStore>>) -> Response {
    let out: Vec<_> = catalog
        .albums
        .snapshot()
        .iter()
        .map(|(_, album)| view::album_out(&catalog, album))
        .collect();
    Json(out).into_response()
}

pub async fn handle_create_album(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<CreateAlbumRequest>,
) -> Response {
    if let Err(e) = require_admin(&headers, &accounts) {
        return e.into_response();
    }
    if req.name.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "name is required!");
    }
    if let Some(resp) = check_album_refs(&catalog, Some(req.artist_id), Some(&req.category_ids)) {
        return resp;
    }

    let id = catalog.albums.insert_with(|id| Album {
        id,
        name: req.name.trim().to_string(),
        artist_id: req.artist_id,
        category_ids: req.category_ids,
        cover_url: req.cover_url,
        release_date: req.release_date,
    });
    let album = catalog.albums.get(id).expect("album just inserted");
    (StatusCode::CREATED, Json(view::album_out(&catalog, &album))).into_response()
}

pub async fn handle_get_album(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Path(id): Path<u64>,
) -> Response {
    match catalog.albums.get(id) {
        Some(album) => Json(view::album_out(&catalog, &album)).into_response(),
        None => not_found(),
    }
}

pub async fn handle_update_album(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(req): Json<UpdateAlbumRequest>,
) -> Response {
    if let Err(e) = require_admin(&headers, &accounts) {
        return e.into_response();
    }
    if !catalog.albums.contains(id) {
        return not_found();
    }
    if let Some(resp) = check_album_refs(&catalog, req.artist_id, req.category_ids.as_deref()) {
        return resp;
    }

    catalog.albums.update(id, |album| {
        if let Some(name) = req.name {
            if !name.trim().is_empty() {
                album.name = name.trim().to_string();
            }
        }
        if let Some(artist_id) = req.artist_id {
            album.artist_id = artist_id;
        }
        if let Some(category_ids) = req.category_ids {
            album.category_ids = category_ids;
        }
        if let Some(cover_url) = req.cover_url {
            album.cover_url = Some(cover_url);
        }
        if let Some(release_date) = req.release_date {
            album.release_date = release_date;
        }
    });
    let album = catalog.albums.get(id).expect("album exists");
    Json(view::album_out(&catalog, &album)).into_response()
}

pub async fn handle_delete_album(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(e) = require_admin(&headers, &accounts) {
        return e.into_response();
    }
    match catalog.remove_album(id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

// ---- songs ----

fn check_song_refs(
    catalog: &CatalogStore,
    artist_id: Option<u64>,
    album_id: Option<u64>,
    category_ids: Option<&[u64]>,
) -> Option<Response> {
    if let Some(artist_id) = artist_id {
        if !catalog.artists.contains(artist_id) {
            return Some(error(StatusCode::BAD_REQUEST, "Artist does not exist"));
        }
    }
    if let Some(album_id) = album_id {
        if !catalog.albums.contains(album_id) {
            return Some(error(StatusCode::BAD_REQUEST, "Album does not exist"));
        }
    }
    if let Some(ids) = category_ids {
        if ids.iter().any(|id| !catalog.categories.contains(*id)) {
            return Some(error(StatusCode::BAD_REQUEST, "Category does not exist"));
        }
    }
    None
}

pub async fn handle_list_songs(Extension(catalog): Extension<Arc<CatalogStore>>) -> Response {
    let out: Vec<_> = catalog
        .songs
        .snapshot()
        .iter()
        .map(|(_, song)| view::song_out(&catalog, song))
        .collect();
    Json(out).into_response()
}

pub async fn handle_create_song(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<CreateSongRequest>,
) -> Response {
    if let Err(e) = require_admin(&headers, &accounts) {
        return e.into_response();
    }
    if req.name.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "name is required!");
    }
    if let Some(resp) = check_song_refs(
        &catalog,
        Some(req.artist_id),
        req.album_id,
        Some(&req.category_ids),
    ) {
        return resp;
    }

    let id = catalog.songs.insert_with(|id| Song {
        id,
        name: req.name.trim().to_string(),
        artist_id: req.artist_id,
        album_id: req.album_id,
        category_ids: req.category_ids,
        cover_url: req.cover_url,
        audio_url: req.audio_url,
        duration_secs: req.duration_secs,
        popularity: req.popularity,
        release_date: req.release_date,
    });
    let song = catalog.songs.get(id).expect("song just inserted");
    (StatusCode::CREATED, Json(view::song_out(&catalog, &song))).into_response()
}

pub async fn handle_get_song(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Path(id): Path<u64>,
) -> Response {
    match catalog.songs.get(id) {
        Some(song) => Json(view::song_out(&catalog, &song)).into_response(),
        None => not_found(),
    }
}

pub async fn handle_update_song(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(req): Json<UpdateSongRequest>,
) -> Response {
    if let Err(e) = require_admin(&headers, &accounts) {
        return e.into_response();
    }
    if !catalog.songs.contains(id) {
        return not_found();
    }
    if let Some(resp) = check_song_refs(
        &catalog,
        req.artist_id,
        req.album_id,
        req.category_ids.as_deref(),
    ) {
        return resp;
    }

    catalog.songs.update(id, |song| {
        if let Some(name) = req.name {
            if !name.trim().is_empty() {
                song.name = name.trim().to_string();
            }
        }
        if let Some(artist_id) = req.artist_id {
            song.artist_id = artist_id;
        }
        if let Some(album_id) = req.album_id {
            song.album_id = Some(album_id);
        }
        if let Some(category_ids) = req.category_ids {
            song.category_ids = category_ids;
        }
        if let Some(cover_url) = req.cover_url {
            song.cover_url = Some(cover_url);
        }
        if let Some(audio_url) = req.audio_url {
            song.audio_url = Some(audio_url);
        }
        if let Some(duration_secs) = req.duration_secs {
            song.duration_secs = Some(duration_secs);
        }
        if let Some(popularity) = req.popularity {
            song.popularity = popularity;
        }
        if let Some(release_date) = req.release_date {
            song.release_date = release_date;
        }
    });
    let song = catalog.songs.get(id).expect("song exists");
    Json(view::song_out(&catalog, &song)).into_response()
}

pub async fn handle_delete_song(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(e) = require_admin(&headers, &accounts) {
        return e.into_response();
    }
    match catalog.remove_song(id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

// ---- playlists ----

pub async fn handle_list_playlists(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
) -> Response {
    let out: Vec<_> = catalog
        .playlists
        .snapshot()
        .iter()
        .map(|(_, playlist)| view::playlist_out(&catalog, &accounts, playlist))
        .collect();
    Json(out).into_response()
}

pub async fn handle_create_playlist(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<CreatePlaylistRequest>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    if req.name.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "name is required!");
    }
    if req.song_ids.iter().any(|id| !catalog.songs.contains(*id)) {
        return error(StatusCode::BAD_REQUEST, "Song does not exist");
    }

    let id = catalog.playlists.insert_with(|id| Playlist {
        id,
        name: req.name.trim().to_string(),
        user_id: user.id,
        song_ids: req.song_ids,
        cover_url: req.cover_url,
        created_at: Utc::now(),
    });
    let playlist = catalog.playlists.get(id).expect("playlist just inserted");
    (
        StatusCode::CREATED,
        Json(view::playlist_out(&catalog, &accounts, &playlist)),
    )
        .into_response()
}

pub async fn handle_get_playlist(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    Path(id): Path<u64>,
) -> Response {
    match catalog.playlists.get(id) {
        Some(playlist) => Json(view::playlist_out(&catalog, &accounts, &playlist)).into_response(),
        None => not_found(),
    }
}

pub async fn handle_update_playlist(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(req): Json<UpdatePlaylistRequest>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    let Some(playlist) = catalog.playlists.get(id) else {
        return not_found();
    };
    if let Err(e) = require_owner_or_admin(&user, playlist.user_id) {
        return e.into_response();
    }
    if let Some(song_ids) = &req.song_ids {
        if song_ids.iter().any(|id| !catalog.songs.contains(*id)) {
            return error(StatusCode::BAD_REQUEST, "Song does not exist");
        }
    }

    catalog.playlists.update(id, |playlist| {
        if let Some(name) = req.name {
            if !name.trim().is_empty() {
                playlist.name = name.trim().to_string();
            }
        }
        if let Some(song_ids) = req.song_ids {
            playlist.song_ids = song_ids;
        }
        if let Some(cover_url) = req.cover_url {
            playlist.cover_url = Some(cover_url);
        }
    });
    let playlist = catalog.playlists.get(id).expect("playlist exists");
    Json(view::playlist_out(&catalog, &accounts, &playlist)).into_response()
}

pub async fn handle_delete_playlist(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    let Some(playlist) = catalog.playlists.get(id) else {
        return not_found();
    };
    if let Err(e) = require_owner_or_admin(&user, playlist.user_id) {
        return e.into_response();
    }

    match catalog.remove_playlist(id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

pub async fn handle_playlist_add_song(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(req): Json<SongIdBody>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    let Some(playlist) = catalog.playlists.get(id) else {
        return not_found();
    };
    if let Err(e) = require_owner_or_admin(&user, playlist.user_id) {
        return e.into_response();
    }
    let Some(song_id) = req.song_id else {
        return error(StatusCode::BAD_REQUEST, "song_id is required!");
    };
    if !catalog.songs.contains(song_id) {
        return error(StatusCode::BAD_REQUEST, "Song does not exist");
    }
    if playlist.song_ids.contains(&song_id) {
        return error(StatusCode::BAD_REQUEST, "Song already exists");
    }

    catalog
        .playlists
        .update(id, |playlist| playlist.song_ids.push(song_id));
    success("Song added")
}

pub async fn handle_playlist_remove_song(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(req): Json<SongIdBody>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    let Some(playlist) = catalog.playlists.get(id) else {
        return not_found();
    };
    if let Err(e) = require_owner_or_admin(&user, playlist.user_id) {
        return e.into_response();
    }
    let Some(song_id) = req.song_id else {
        return error(StatusCode::BAD_REQUEST, "song_id is required!");
    };
    if !catalog.songs.contains(song_id) {
        return error(StatusCode::BAD_REQUEST, "Song does not exist");
    }
    if !playlist.song_ids.contains(&song_id) {
        return error(StatusCode::BAD_REQUEST, "No such song");
    }

    catalog.playlists.update(id, |playlist| {
        playlist.song_ids.retain(|id| *id != song_id);
    });
    success("Song removed")
}

// ---- favorites ----

pub async fn handle_list_favorites(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    // The favorites collection is always scoped to the caller.
    let out: Vec<_> = catalog
        .favorite_of(user.id)
        .iter()
        .map(|favorite| view::favorite_out(&catalog, user.id, favorite))
        .collect();
    Json(out).into_response()
}

pub async fn handle_create_favorite(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    if !catalog.create_favorite(user.id) {
        return error(StatusCode::BAD_REQUEST, "Favorite already exists");
    }
    let favorite = catalog.favorite_of(user.id).unwrap_or_default();
    (
        StatusCode::CREATED,
        Json(view::favorite_out(&catalog, user.id, &favorite)),
    )
        .into_response()
}

pub async fn handle_get_favorite(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    if id != user.id {
        return not_found();
    }
    match catalog.favorite_of(user.id) {
        Some(favorite) => Json(view::favorite_out(&catalog, user.id, &favorite)).into_response(),
        None => not_found(),
    }
}

pub async fn handle_delete_favorite(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    if id != user.id {
        return not_found();
    }
    match catalog.remove_favorite(user.id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

/// Shared add path for the four favorite target kinds, mirroring the per-kind
/// actions on the API.
fn favorite_add(
    catalog: &CatalogStore,
    user_id: u64,
    noun: &str,
    item_id: Option<u64>,
    exists: impl Fn(u64) -> bool,
    list: impl Fn(&mut Favorite) -> &mut Vec<u64>,
) -> Response {
    let Some(item_id) = item_id else {
        return error(StatusCode::BAD_REQUEST, "id is required!");
    };
    if !exists(item_id) {
        return error(StatusCode::BAD_REQUEST, &format!("{} does not exist", noun));
    }

    let added = catalog.with_favorite(user_id, |favorite| {
        let ids = list(favorite);
        if ids.contains(&item_id) {
            false
        } else {
            ids.push(item_id);
            true
        }
    });

    if added {
        success(&format!("{} added to favorites", noun))
    } else {
        error(
            StatusCode::BAD_REQUEST,
            &format!("{} already in favorites", noun),
        )
    }
}

fn favorite_remove(
    catalog: &CatalogStore,
    user_id: u64,
    noun: &str,
    item_id: Option<u64>,
    exists: impl Fn(u64) -> bool,
    list: impl Fn(&mut Favorite) -> &mut Vec<u64>,
) -> Response {
    let Some(item_id) = item_id else {
        return error(StatusCode::BAD_REQUEST, "id is required!");
    };
    if !exists(item_id) {
        return error(StatusCode::BAD_REQUEST, &format!("{} does not exist", noun));
    }

    let removed = catalog.with_favorite(user_id, |favorite| {
        let ids = list(favorite);
        if ids.contains(&item_id) {
            ids.retain(|id| *id != item_id);
            true
        } else {
            false
        }
    });

    if removed {
        success(&format!("{} removed from favorites", noun))
    } else {
        error(
            StatusCode::BAD_REQUEST,
            &format!("{} not in favorites", noun),
        )
    }
}

// Concrete wrappers around the shared add/remove paths, one pair per target
// kind.

pub async fn handle_favorite_add_song(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<ItemIdBody>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    favorite_add(
        &catalog,
        user.id,
        "Song",
        req.id,
        |id| catalog.songs.contains(id),
        |favorite| &mut favorite.song_ids,
    )
}

pub async fn handle_favorite_remove_song(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<ItemIdBody>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    favorite_remove(
        &catalog,
        user.id,
        "Song",
        req.id,
        |id| catalog.songs.contains(id),
        |favorite| &mut favorite.song_ids,
    )
}

pub async fn handle_favorite_add_album(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<ItemIdBody>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    favorite_add(
        &catalog,
        user.id,
        "Album",
        req.id,
        |id| catalog.albums.contains(id),
        |favorite| &mut favorite.album_ids,
    )
}

pub async fn handle_favorite_remove_album(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<ItemIdBody>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    favorite_remove(
        &catalog,
        user.id,
        "Album",
        req.id,
        |id| catalog.albums.contains(id),
        |favorite| &mut favorite.album_ids,
    )
}

pub async fn handle_favorite_add_artist(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<ItemIdBody>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    favorite_add(
        &catalog,
        user.id,
        "Artist",
        req.id,
        |id| catalog.artists.contains(id),
        |favorite| &mut favorite.artist_ids,
    )
}

pub async fn handle_favorite_remove_artist(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<ItemIdBody>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    favorite_remove(
        &catalog,
        user.id,
        "Artist",
        req.id,
        |id| catalog.artists.contains(id),
        |favorite| &mut favorite.artist_ids,
    )
}

pub async fn handle_favorite_add_playlist(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<ItemIdBody>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    favorite_add(
        &catalog,
        user.id,
        "Playlist",
        req.id,
        |id| catalog.playlists.contains(id),
        |favorite| &mut favorite.playlist_ids,
    )
}

pub async fn handle_favorite_remove_playlist(
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(accounts): Extension<Arc<AccountStore>>,
    headers: HeaderMap,
    Json(req): Json<ItemIdBody>,
) -> Response {
    let user = match require_user(&headers, &accounts) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };
    favorite_remove(
        &catalog,
        user.id,
        "Playlist",
        req.id,
        |id| catalog.playlists.contains(id),
        |favorite| &mut favorite.playlist_ids,
    )
}
