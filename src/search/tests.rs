//! Search Module Tests
//!
//! Validates matching, per-entity ranking, result caps, and top-result
//! selection.
//!
//! ## Test Scopes
//! - **Matching**: case-insensitive substring containment, artist-name
//!   matches for songs and albums.
//! - **Ranking**: popularity for songs, favorite counts elsewhere, caps.
//! - **Top result**: exact-match priority order and the first-non-empty
//!   fallback.
//! - **Serialization**: the tagged top-result JSON shape.

#[cfg(test)]
mod tests {
    use crate::catalog::protocol::{ArtistLight, CategoryOut};
    use crate::catalog::store::CatalogStore;
    use crate::catalog::types::{Album, Artist, Category, Playlist, Song};
    use crate::search::engine::{SONG_RESULT_LIMIT, TopHit, search_catalog};
    use crate::search::types::TopResult;
    use chrono::{NaiveDate, Utc};

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
            release_date: NaiveDate::from_ymd_opt(1974, 11, 1).unwrap(),
        })
    }

    fn seed_song(store: &CatalogStore, name: &str, artist_id: u64, popularity: u32) -> u64 {
        store.songs.insert_with(|id| Song {
            id,
            name: name.to_string(),
            artist_id,
            album_id: None,
            category_ids: vec![],
            cover_url: None,
            audio_url: None,
            duration_secs: None,
            popularity,
            release_date: NaiveDate::from_ymd_opt(1974, 11, 1).unwrap(),
        })
    }

    fn seed_playlist(store: &CatalogStore, name: &str) -> u64 {
        store.playlists.insert_with(|id| Playlist {
            id,
            name: name.to_string(),
            user_id: 1,
            song_ids: vec![],
            cover_url: None,
            created_at: Utc::now(),
        })
    }

    fn seed_category(store: &CatalogStore, name: &str) -> u64 {
        store.categories.insert_with(|id| Category {
            id,
            name: name.to_string(),
            description: None,
            cover_url: None,
        })
    }

    // ============================================================
    // MATCHING TESTS
    // ============================================================

    #[test]
    fn test_song_matches_by_name_case_insensitively() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        let song = seed_song(&store, "Autobahn", artist, 10);
        seed_song(&store, "Hallogallo", artist, 5);

        let ids = search_catalog(&store, "AUTO");

        assert_eq!(ids.songs, vec![song]);
    }

    #[test]
    fn test_song_matches_by_artist_name() {
        let store = CatalogStore::new();
        let kraftwerk = seed_artist(&store, "Kraftwerk");
        let neu = seed_artist(&store, "Neu!");
        let by_kraftwerk = seed_song(&store, "Autobahn", kraftwerk, 10);
        seed_song(&store, "Hallogallo", neu, 5);

        let ids = search_catalog(&store, "kraftwerk");

        assert_eq!(ids.songs, vec![by_kraftwerk]);
    }

    #[test]
    fn test_album_matches_by_artist_name() {
        let store = CatalogStore::new();
        let kraftwerk = seed_artist(&store, "Kraftwerk");
        let album = seed_album(&store, "Autobahn", kraftwerk);

        let ids = search_catalog(&store, "kraftw");

        assert_eq!(ids.albums, vec![album]);
    }

    #[test]
    fn test_no_match_yields_empty_lists_and_no_top() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        seed_song(&store, "Autobahn", artist, 10);

        let ids = search_catalog(&store, "zzz");

        assert!(ids.songs.is_empty());
        assert!(ids.artists.is_empty());
        assert!(ids.top.is_none());
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        seed_song(&store, "Autobahn", artist, 10);
        seed_category(&store, "Krautrock");

        let ids = search_catalog(&store, "");

        assert_eq!(ids.songs.len(), 1);
        assert_eq!(ids.artists.len(), 1);
        assert_eq!(ids.categories.len(), 1);
    }

    // ============================================================
    // RANKING TESTS
    // ============================================================

    #[test]
    fn test_songs_ranked_by_popularity() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        let quiet = seed_song(&store, "Autobahn Quiet", artist, 1);
        let loud = seed_song(&store, "Autobahn Loud", artist, 90);

        let ids = search_catalog(&store, "autobahn");

        assert_eq!(ids.songs, vec![loud, quiet]);
    }

    #[test]
    fn test_song_list_capped() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        for i in 0..(SONG_RESULT_LIMIT + 5) {
            seed_song(&store, &format!("Autobahn {}", i), artist, i as u32);
        }

        let ids = search_catalog(&store, "autobahn");

        assert_eq!(ids.songs.len(), SONG_RESULT_LIMIT);
    }

    #[test]
    fn test_artists_ranked_by_favorite_count() {
        let store = CatalogStore::new();
        let obscure = seed_artist(&store, "Kraftwerk Tribute");
        let beloved = seed_artist(&store, "Kraftwerk");
        store.with_favorite(1, |favorite| favorite.artist_ids.push(beloved));
        store.with_favorite(2, |favorite| favorite.artist_ids.push(beloved));

        let ids = search_catalog(&store, "kraftwerk");

        assert_eq!(ids.artists, vec![beloved, obscure]);
    }

    #[test]
    fn test_playlists_ranked_by_favorite_count() {
        let store = CatalogStore::new();
        let stale = seed_playlist(&store, "Drive Mix");
        let hot = seed_playlist(&store, "Drive Classics");
        store.with_favorite(1, |favorite| favorite.playlist_ids.push(hot));

        let ids = search_catalog(&store, "drive");

        assert_eq!(ids.playlists, vec![hot, stale]);
    }

    // ============================================================
    // TOP RESULT TESTS
    // ============================================================

    #[test]
    fn test_exact_song_match_wins() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Autobahn");
        let song = seed_song(&store, "Autobahn", artist, 1);

        let ids = search_catalog(&store, "Autobahn");

        // Song beats the artist despite both matching exactly.
        assert_eq!(ids.top, Some(TopHit::Song(song)));
    }

    #[test]
    fn test_exact_artist_match_beats_partial_song_match() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        seed_song(&store, "Kraftwerk Megamix", artist, 99);

        let ids = search_catalog(&store, "kraftwerk");

        assert_eq!(
            ids.top,
            Some(TopHit::Artist(artist)),
            "Exact name match outranks a more popular partial match"
        );
    }

    #[test]
    fn test_fallback_to_head_of_first_nonempty_list() {
        let store = CatalogStore::new();
        let artist = seed_artist(&store, "Kraftwerk");
        let _quiet = seed_song(&store, "Autobahn Quiet", artist, 1);
        let loud = seed_song(&store, "Autobahn Loud", artist, 90);

        let ids = search_catalog(&store, "autobahn");

        assert_eq!(ids.top, Some(TopHit::Song(loud)));
    }

    #[test]
    fn test_fallback_reaches_categories() {
        let store = CatalogStore::new();
        let category = seed_category(&store, "Krautrock");

        let ids = search_catalog(&store, "kraut");

        assert_eq!(ids.top, Some(TopHit::Category(category)));
    }

    // ============================================================
    // SERIALIZATION TESTS
    // ============================================================

    #[test]
    fn test_top_result_tagged_with_entity_type() {
        let top = TopResult::Artist(ArtistLight {
            id: 3,
            name: "Kraftwerk".to_string(),
            image_url: None,
        });

        let json = serde_json::to_value(&top).unwrap();

        assert_eq!(json["type"], "artist");
        assert_eq!(json["name"], "Kraftwerk");
    }

    #[test]
    fn test_top_result_category_roundtrip() {
        let top = TopResult::Category(CategoryOut {
            id: 9,
            name: "Krautrock".to_string(),
            description: None,
            cover_url: None,
        });

        let json = serde_json::to_string(&top).unwrap();
        let restored: TopResult = serde_json::from_str(&json).unwrap();

        match restored {
            TopResult::Category(category) => assert_eq!(category.id, 9),
            other => panic!("Wrong variant: {:?}", other),
        }
    }
}
