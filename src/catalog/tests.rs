//! Catalog Module Tests
//!
//! Validates joins, favorite bookkeeping, and the relational cleanup rules
//! that deletes must uphold.
//!
//! ## Test Scopes
//! - **Joins**: artist/album/song lookups and counts.
//! - **Favorites**: get-or-create rows, membership, per-entity counts.
//! - **Cascades**: artist deletes cascade, album deletes detach, every
//!   delete prunes playlist and favorite references.

#[cfg(test)]
mod tests {
    use crate::catalog::store::CatalogStore;
    use crate::catalog::types::{Album, Artist, Category, Playlist, Song};
    use chrono::{NaiveDate, Utc};

    fn release_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, 9).unwrap()
    }

    fn seed_category(store: &CatalogStore, name: &str) -> u64 {
        store.categories.insert_with(|id| Category {
            id,
            name: name.to_string(),
            description: None,
            cover_url: None,
        })
    }

    fn seed_artist(store: &CatalogStore, name: &str) -> u64 {
        store.artists.insert_with(|id| Artist {
            id,
            name: name.to_string(),
            bio: None,
            image_url: None,
        })
    }

    fn seed_album(store: &CatalogStore, name: &str, artist_id: u64) -> u64 {
        store.albums.insert_with(|id| Album {
            id,
            name: name.to_string(),
            artist_id,
            category_ids: vec![],
            cover_url: None,
            release_date: release_date(),
        })
    }

    fn seed_song(
        store: &CatalogStore,
        name: &str,
        artist_id: u64,
        album_id: Option<u64>,
        popularity: u32,
    ) -> u64 {
        store.songs.insert_with(|id| Song {
            id,
            name: name.to_string(),
            artist_id,
            album_id,
            category_ids: vec![],
            cover_url: None,
            audio_url: None,
            duration_secs: Some(180),
            popularity,
            release_date: release_date(),
        })
    }

    fn seed_playlist(store: &CatalogStore, name: &str, user_id: u64, song_ids: Vec<u64>) -> u64 {
        store.playlists.insert_with(|id| Playlist {
            id,
            name: name.to_string(),
            user_id,
            song_ids,
            cover_url: None,
            created_at: Utc::now(),
        })
    }

    // ============================================================
    // JOIN TESTS
    // ============================================================

    #[test]
    fn test_songs_of_artist() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        let other = seed_artist(&store, "Neu!");
        seed_song(&store, "Autobahn", artist, None, 10);
        seed_song(&store, "Hallogallo", other, None, 5);

        let songs = store.songs_of_artist(artist);

        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].name, "Autobahn");
    }

    #[test]
    fn test_albums_of_artist_and_songs_of_album() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        let album = seed_album(&store, "Autobahn", artist);
        seed_song(&store, "Autobahn", artist, Some(album), 10);
        seed_song(&store, "Kometenmelodie", artist, Some(album), 4);
        seed_song(&store, "Loose", artist, None, 2);

        assert_eq!(store.albums_of_artist(artist).len(), 1);
        assert_eq!(store.songs_of_album(album).len(), 2);
    }

    #[test]
    fn test_category_song_count() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        let krautrock = seed_category(&store, "Krautrock");
        let song = seed_song(&store, "Autobahn", artist, None, 10);
        store.songs.update(song, |song| song.category_ids.push(krautrock));
        seed_song(&store, "Uncategorized", artist, None, 1);

        assert_eq!(store.category_song_count(krautrock), 1);
    }

    // ============================================================
    // FAVORITE TESTS
    // ============================================================

    #[test]
    fn test_with_favorite_creates_row_on_first_use() {
        let store = CatalogStore::new();

        assert!(store.favorite_of(7).is_none());
        store.with_favorite(7, |favorite| favorite.song_ids.push(1));
        assert_eq!(store.favorite_of(7).unwrap().song_ids, vec![1]);
    }

    #[test]
    fn test_create_favorite_rejects_duplicate_row() {
        let store = CatalogStore::new();

        assert!(store.create_favorite(7));
        assert!(!store.create_favorite(7));
    }

    #[test]
    fn test_favorite_counts_span_users() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        let song = seed_song(&store, "Autobahn", artist, None, 10);

        store.with_favorite(1, |favorite| favorite.song_ids.push(song));
        store.with_favorite(2, |favorite| favorite.song_ids.push(song));
        store.with_favorite(3, |favorite| favorite.artist_ids.push(artist));

        assert_eq!(store.song_favorite_count(song), 2);
        assert_eq!(store.artist_favorite_count(artist), 1);
        assert_eq!(store.album_favorite_count(99), 0);
    }

    #[test]
    fn test_favorites_snapshot_sorted_by_user() {
        let store = CatalogStore::new();
        store.with_favorite(9, |favorite| favorite.song_ids.push(1));
        store.with_favorite(3, |favorite| favorite.song_ids.push(1));

        let users: Vec<u64> = store
            .favorites_snapshot()
            .iter()
            .map(|(user_id, _)| *user_id)
            .collect();

        assert_eq!(users, vec![3, 9]);
    }

    // ============================================================
    // CASCADE TESTS
    // ============================================================

    #[test]
    fn test_remove_artist_cascades_to_albums_and_songs() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        let album = seed_album(&store, "Autobahn", artist);
        let song = seed_song(&store, "Autobahn", artist, Some(album), 10);

        store.remove_artist(artist);

        assert!(store.artists.get(artist).is_none());
        assert!(store.albums.get(album).is_none());
        assert!(store.songs.get(song).is_none());
    }

    #[test]
    fn test_remove_artist_prunes_favorites() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        store.with_favorite(1, |favorite| favorite.artist_ids.push(artist));

        store.remove_artist(artist);

        assert!(store.favorite_of(1).unwrap().artist_ids.is_empty());
    }

    #[test]
    fn test_remove_album_detaches_songs() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        let album = seed_album(&store, "Autobahn", artist);
        let song = seed_song(&store, "Autobahn", artist, Some(album), 10);
        store.with_favorite(1, |favorite| favorite.album_ids.push(album));

        store.remove_album(album);

        let survivor = store.songs.get(song).unwrap();
        assert_eq!(survivor.album_id, None, "Song must survive detached");
        assert!(store.favorite_of(1).unwrap().album_ids.is_empty());
    }

    #[test]
    fn test_remove_song_prunes_playlists_and_favorites() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        let song = seed_song(&store, "Autobahn", artist, None, 10);
        let kept = seed_song(&store, "Ruckzuck", artist, None, 3);
        let playlist = seed_playlist(&store, "Roadtrip", 1, vec![song, kept]);
        store.with_favorite(2, |favorite| favorite.song_ids.push(song));

        store.remove_song(song);

        assert_eq!(store.playlists.get(playlist).unwrap().song_ids, vec![kept]);
        assert!(store.favorite_of(2).unwrap().song_ids.is_empty());
    }

    #[test]
    fn test_remove_playlist_prunes_favorites() {
        let store = CatalogStore::new();
        let playlist = seed_playlist(&store, "Roadtrip", 1, vec![]);
        store.with_favorite(2, |favorite| favorite.playlist_ids.push(playlist));

        store.remove_playlist(playlist);

        assert!(store.favorite_of(2).unwrap().playlist_ids.is_empty());
    }

    #[test]
    fn test_remove_category_prunes_album_and_song_links() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        let category = seed_category(&store, "Krautrock");
        let album = seed_album(&store, "Autobahn", artist);
        let song = seed_song(&store, "Autobahn", artist, Some(album), 10);
        store
            .albums
            .update(album, |album| album.category_ids.push(category));
        store
            .songs
            .update(song, |song| song.category_ids.push(category));

        store.remove_category(category);

        assert!(store.albums.get(album).unwrap().category_ids.is_empty());
        assert!(store.songs.get(song).unwrap().category_ids.is_empty());
    }

    #[test]
    fn test_remove_missing_rows_is_a_noop() {
        let store = CatalogStore::new();

        assert!(store.remove_artist(1).is_none());
        assert!(store.remove_album(1).is_none());
        assert!(store.remove_song(1).is_none());
        assert!(store.remove_playlist(1).is_none());
        assert!(store.remove_category(1).is_none());
    }

    // ============================================================
    // HANDLER TESTS (status codes of the membership actions)
    // ============================================================

    use crate::accounts::store::{AccountStore, NewUser};
    use crate::catalog::handlers::{
        handle_create_category, handle_favorite_add_song, handle_playlist_add_song,
        handle_playlist_remove_song,
    };
    use crate::catalog::protocol::{CreateCategoryRequest, ItemIdBody, SongIdBody};
    use axum::Json;
    use axum::extract::{Extension, Path};
    use axum::http::{HeaderMap, StatusCode, header};
    use std::sync::Arc;

    fn login(accounts: &AccountStore, email: &str, is_admin: bool) -> HeaderMap {
        let user = accounts
            .create_user(NewUser {
                email: email.to_string(),
                username: email.split('@').next().unwrap().to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                password: "pw".to_string(),
                bio: None,
                avatar_url: None,
                is_admin,
            })
            .unwrap();
        let token = accounts.create_session(user.id);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_add_song_twice_to_playlist_is_rejected() {
        let catalog = Arc::new(CatalogStore::new());
        let accounts = Arc::new(AccountStore::new());
        let headers = login(&accounts, "owner@example.com", false);
        let owner = accounts.user_by_email("owner@example.com").unwrap();

        let artist = seed_artist(&catalog, "Kraftwerk");
        let song = seed_song(&catalog, "Autobahn", artist, None, 10);
        let playlist = seed_playlist(&catalog, "Roadtrip", owner.id, vec![]);

        let first = handle_playlist_add_song(
            Extension(catalog.clone()),
            Extension(accounts.clone()),
            headers.clone(),
            Path(playlist),
            Json(SongIdBody {
                song_id: Some(song),
            }),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = handle_playlist_add_song(
            Extension(catalog.clone()),
            Extension(accounts.clone()),
            headers,
            Path(playlist),
            Json(SongIdBody {
                song_id: Some(song),
            }),
        )
        .await;
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_playlist_actions_require_the_song_id_field() {
        let catalog = Arc::new(CatalogStore::new());
        let accounts = Arc::new(AccountStore::new());
        let headers = login(&accounts, "owner@example.com", false);
        let owner = accounts.user_by_email("owner@example.com").unwrap();
        let playlist = seed_playlist(&catalog, "Roadtrip", owner.id, vec![]);

        let response = handle_playlist_add_song(
            Extension(catalog.clone()),
            Extension(accounts.clone()),
            headers,
            Path(playlist),
            Json(SongIdBody { song_id: None }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_removing_absent_song_from_playlist_is_rejected() {
        let catalog = Arc::new(CatalogStore::new());
        let accounts = Arc::new(AccountStore::new());
        let headers = login(&accounts, "owner@example.com", false);
        let owner = accounts.user_by_email("owner@example.com").unwrap();

        let artist = seed_artist(&catalog, "Kraftwerk");
        let song = seed_song(&catalog, "Autobahn", artist, None, 10);
        let playlist = seed_playlist(&catalog, "Roadtrip", owner.id, vec![]);

        let response = handle_playlist_remove_song(
            Extension(catalog.clone()),
            Extension(accounts.clone()),
            headers,
            Path(playlist),
            Json(SongIdBody {
                song_id: Some(song),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_playlist_writes_need_ownership() {
        let catalog = Arc::new(CatalogStore::new());
        let accounts = Arc::new(AccountStore::new());
        let _owner_headers = login(&accounts, "owner@example.com", false);
        let stranger_headers = login(&accounts, "stranger@example.com", false);
        let owner = accounts.user_by_email("owner@example.com").unwrap();

        let artist = seed_artist(&catalog, "Kraftwerk");
        let song = seed_song(&catalog, "Autobahn", artist, None, 10);
        let playlist = seed_playlist(&catalog, "Roadtrip", owner.id, vec![]);

        let response = handle_playlist_add_song(
            Extension(catalog.clone()),
            Extension(accounts.clone()),
            stranger_headers,
            Path(playlist),
            Json(SongIdBody {
                song_id: Some(song),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_favorite_add_song_roundtrip_statuses() {
        let catalog = Arc::new(CatalogStore::new());
        let accounts = Arc::new(AccountStore::new());
        let headers = login(&accounts, "fan@example.com", false);

        let artist = seed_artist(&catalog, "Kraftwerk");
        let song = seed_song(&catalog, "Autobahn", artist, None, 10);

        let first = handle_favorite_add_song(
            Extension(catalog.clone()),
            Extension(accounts.clone()),
            headers.clone(),
            Json(ItemIdBody { id: Some(song) }),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        let duplicate = handle_favorite_add_song(
            Extension(catalog.clone()),
            Extension(accounts.clone()),
            headers.clone(),
            Json(ItemIdBody { id: Some(song) }),
        )
        .await;
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

        let missing = handle_favorite_add_song(
            Extension(catalog.clone()),
            Extension(accounts.clone()),
            headers,
            Json(ItemIdBody { id: Some(999) }),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_favorites_require_authentication() {
        let catalog = Arc::new(CatalogStore::new());
        let accounts = Arc::new(AccountStore::new());

        let response = handle_favorite_add_song(
            Extension(catalog.clone()),
            Extension(accounts.clone()),
            HeaderMap::new(),
            Json(ItemIdBody { id: Some(1) }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_catalog_writes_are_admin_only() {
        let catalog = Arc::new(CatalogStore::new());
        let accounts = Arc::new(AccountStore::new());
        let member_headers = login(&accounts, "member@example.com", false);
        let admin_headers = login(&accounts, "admin@example.com", true);

        let request = || CreateCategoryRequest {
            name: "Krautrock".to_string(),
            description: None,
            cover_url: None,
        };

        let denied = handle_create_category(
            Extension(catalog.clone()),
            Extension(accounts.clone()),
            member_headers,
            Json(request()),
        )
        .await;
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);

        let anonymous = handle_create_category(
            Extension(catalog.clone()),
            Extension(accounts.clone()),
            HeaderMap::new(),
            Json(request()),
        )
        .await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let created = handle_create_category(
            Extension(catalog.clone()),
            Extension(accounts.clone()),
            admin_headers,
            Json(request()),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
    }
}
