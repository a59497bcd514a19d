use crate::catalog::store::CatalogStore;
use crate::catalog::types::Favorite;
use std::collections::{HashMap, HashSet};

/// Ranked entity ids produced by [`recommend`], ready for hydration.
#[derive(Debug, Default, PartialEq)]
pub struct RecommendationIds {
    pub songs: Vec<u64>,
    pub albums: Vec<u64>,
    pub artists: Vec<u64>,
    pub playlists: Vec<u64>,
    pub categories: Vec<u64>,
    pub category_songs: Vec<u64>,
    pub popular_songs: Vec<u64>,
}

fn id_set(ids: &[u64]) -> HashSet<u64> {
    ids.iter().copied().collect()
}

fn intersects(ids: &[u64], set: &HashSet<u64>) -> bool {
    ids.iter().any(|id| set.contains(id))
}

/// Runs the recommendation pipeline for `user_id` (or an anonymous caller).
pub fn recommend(catalog: &CatalogStore, user_id: Option<u64>) -> RecommendationIds {
    // Step 1: the caller's favorites, all empty when anonymous or unset.
    let own = user_id
        .and_then(|id| catalog.favorite_of(id))
        .unwrap_or_default();
    let fav_songs = id_set(&own.song_ids);
    let fav_albums = id_set(&own.album_ids);
    let fav_artists = id_set(&own.artist_ids);
    let fav_playlists = id_set(&own.playlist_ids);

    let all_favorites = catalog.favorites_snapshot();

    // Global favorite counts drive every ranking below.
    let mut song_favs: HashMap<u64, usize> = HashMap::new();
    let mut album_favs: HashMap<u64, usize> = HashMap::new();
    let mut artist_favs: HashMap<u64, usize> = HashMap::new();
    let mut playlist_favs: HashMap<u64, usize> = HashMap::new();
    for (_, favorite) in &all_favorites {
        for id in &favorite.song_ids {
            *song_favs.entry(*id).or_insert(0) += 1;
        }
        for id in &favorite.album_ids {
            *album_favs.entry(*id).or_insert(0) += 1;
        }
        for id in &favorite.artist_ids {
            *artist_favs.entry(*id).or_insert(0) += 1;
        }
        for id in &favorite.playlist_ids {
            *playlist_favs.entry(*id).or_insert(0) += 1;
        }
    }

    // Step 2: favorites of similar users. The gate is favorite songs: a
    // caller who has none gets no collaborative candidates, only the
    // category and popularity stages.
    let similar: Vec<&Favorite> = if !fav_songs.is_empty() {
        all_favorites
            .iter()
            .filter(|(other_id, _)| Some(*other_id) != user_id)
            .filter(|(_, favorite)| {
                intersects(&favorite.song_ids, &fav_songs)
                    || intersects(&favorite.artist_ids, &fav_artists)
                    || intersects(&favorite.album_ids, &fav_albums)
                    || intersects(&favorite.playlist_ids, &fav_playlists)
            })
            .map(|(_, favorite)| favorite)
            .collect()
    } else {
        Vec::new()
    };

    // Step 3: union the similar users' favorites into distinct candidates.
    let mut candidate_songs: HashSet<u64> = HashSet::new();
    let mut candidate_albums: HashSet<u64> = HashSet::new();
    let mut candidate_artists: HashSet<u64> = HashSet::new();
    let mut candidate_playlists: HashSet<u64> = HashSet::new();
    for favorite in &similar {
        candidate_songs.extend(favorite.song_ids.iter().copied());
        candidate_albums.extend(favorite.album_ids.iter().copied());
        candidate_artists.extend(favorite.artist_ids.iter().copied());
        candidate_playlists.extend(favorite.playlist_ids.iter().copied());
    }

    let song_rows = catalog.songs.snapshot();
    let popularity: HashMap<u64, u32> = song_rows
        .iter()
        .map(|(id, song)| (*id, song.popularity))
        .collect();

    // Step 6 for songs: favorite count, then popularity, already-favorited
    // excluded.
    let mut songs: Vec<u64> = candidate_songs
        .iter()
        .copied()
        .filter(|id| !fav_songs.contains(id))
        .collect();
    songs.sort_by(|a, b| {
        let count_a = song_favs.get(a).copied().unwrap_or(0);
        let count_b = song_favs.get(b).copied().unwrap_or(0);
        let pop_a = popularity.get(a).copied().unwrap_or(0);
        let pop_b = popularity.get(b).copied().unwrap_or(0);
        count_b
            .cmp(&count_a)
            .then(pop_b.cmp(&pop_a))
            .then(a.cmp(b))
    });

    let rank_by_count = |candidates: &HashSet<u64>,
                         excluded: &HashSet<u64>,
                         counts: &HashMap<u64, usize>|
     -> Vec<u64> {
        let mut ids: Vec<u64> = candidates
            .iter()
            .copied()
            .filter(|id| !excluded.contains(id))
            .collect();
        ids.sort_by(|a, b| {
            let count_a = counts.get(a).copied().unwrap_or(0);
            let count_b = counts.get(b).copied().unwrap_or(0);
            count_b.cmp(&count_a).then(a.cmp(b))
        });
        ids
    };

    let albums = rank_by_count(&candidate_albums, &fav_albums, &album_favs);
    let artists = rank_by_count(&candidate_artists, &fav_artists, &artist_favs);
    let playlists = rank_by_count(&candidate_playlists, &fav_playlists, &playlist_favs);

    // Step 4: the category stage. With favorite songs, only their
    // categories are related; without, every category is.
    let related_categories: HashSet<u64> = if fav_songs.is_empty() {
        catalog
            .categories
            .snapshot()
            .iter()
            .map(|(id, _)| *id)
            .collect()
    } else {
        song_rows
            .iter()
            .filter(|(id, _)| fav_songs.contains(id))
            .flat_map(|(_, song)| song.category_ids.iter().copied())
            .collect()
    };

    let mut category_songs: Vec<u64> = song_rows
        .iter()
        .filter(|(id, song)| {
            !fav_songs.contains(id) && intersects(&song.category_ids, &related_categories)
        })
        .map(|(id, _)| *id)
        .collect();
    category_songs.sort_by(|a, b| {
        let pop_a = popularity.get(a).copied().unwrap_or(0);
        let pop_b = popularity.get(b).copied().unwrap_or(0);
        pop_b.cmp(&pop_a).then(a.cmp(b))
    });

    // Related categories ranked by how many songs they hold.
    let song_count: HashMap<u64, usize> = related_categories
        .iter()
        .map(|category_id| {
            let count = song_rows
                .iter()
                .filter(|(_, song)| song.category_ids.contains(category_id))
                .count();
            (*category_id, count)
        })
        .collect();
    let mut categories: Vec<u64> = related_categories.iter().copied().collect();
    categories.sort_by(|a, b| {
        let count_a = song_count.get(a).copied().unwrap_or(0);
        let count_b = song_count.get(b).copied().unwrap_or(0);
        count_b.cmp(&count_a).then(a.cmp(b))
    });

    // Step 5: the popularity fallback is always present.
    let mut popular_songs: Vec<u64> = song_rows.iter().map(|(id, _)| *id).collect();
    popular_songs.sort_by(|a, b| {
        let pop_a = popularity.get(a).copied().unwrap_or(0);
        let pop_b = popularity.get(b).copied().unwrap_or(0);
        pop_b.cmp(&pop_a).then(a.cmp(b))
    });

    RecommendationIds {
        songs,
        albums,
        artists,
        playlists,
        categories,
        category_songs,
        popular_songs,
    }
}
