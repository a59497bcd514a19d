use crate::catalog::store::CatalogStore;

/// Songs keep a deeper result list than the other entities.
pub const SONG_RESULT_LIMIT: usize = 20;
pub const RESULT_LIMIT: usize = 10;

/// The entity picked as the single best answer for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopHit {
    Song(u64),
    Artist(u64),
    Album(u64),
    Playlist(u64),
    Category(u64),
}

/// Ranked, capped id lists per entity kind plus the chosen top hit.
#[derive(Debug, Default)]
pub struct SearchIds {
    pub songs: Vec<u64>,
    pub albums: Vec<u64>,
    pub artists: Vec<u64>,
    pub playlists: Vec<u64>,
    pub categories: Vec<u64>,
    pub top: Option<TopHit>,
}

/// Runs the catalog search for `query`.
///
/// An empty query matches everything, mirroring substring containment; the
/// handler is responsible for rejecting an absent parameter.
pub fn search_catalog(catalog: &CatalogStore, query: &str) -> SearchIds {
    let q = query.trim().to_lowercase();

    let artist_name = |artist_id: u64| -> String {
        catalog
            .artists
            .get(artist_id)
            .map(|artist| artist.name.to_lowercase())
            .unwrap_or_default()
    };

    // Songs: name or artist-name match, ranked by popularity.
    let mut songs: Vec<(u64, String, u32)> = catalog
        .songs
        .snapshot()
        .into_iter()
        .filter_map(|(id, song)| {
            let name = song.name.to_lowercase();
            if name.contains(&q) || artist_name(song.artist_id).contains(&q) {
                Some((id, name, song.popularity))
            } else {
                None
            }
        })
        .collect();
    songs.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    songs.truncate(SONG_RESULT_LIMIT);

    // Albums: name or artist-name match, ranked by favorite count.
    let mut albums: Vec<(u64, String, usize)> = catalog
        .albums
        .snapshot()
        .into_iter()
        .filter_map(|(id, album)| {
            let name = album.name.to_lowercase();
            if name.contains(&q) || artist_name(album.artist_id).contains(&q) {
                Some((id, name, catalog.album_favorite_count(id)))
            } else {
                None
            }
        })
        .collect();
    albums.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    albums.truncate(RESULT_LIMIT);

    // Artists: name match, ranked by favorite count.
    let mut artists: Vec<(u64, String, usize)> = catalog
        .artists
        .snapshot()
        .into_iter()
        .filter_map(|(id, artist)| {
            let name = artist.name.to_lowercase();
            if name.contains(&q) {
                Some((id, name, catalog.artist_favorite_count(id)))
            } else {
                None
            }
        })
        .collect();
    artists.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    artists.truncate(RESULT_LIMIT);

    // Playlists: name match, ranked by favorite count.
    let mut playlists: Vec<(u64, String, usize)> = catalog
        .playlists
        .snapshot()
        .into_iter()
        .filter_map(|(id, playlist)| {
            let name = playlist.name.to_lowercase();
            if name.contains(&q) {
                Some((id, name, catalog.playlist_favorite_count(id)))
            } else {
                None
            }
        })
        .collect();
    playlists.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    playlists.truncate(RESULT_LIMIT);

    // Categories: name match, ranked by song count.
    let mut categories: Vec<(u64, String, usize)> = catalog
        .categories
        .snapshot()
        .into_iter()
        .filter_map(|(id, category)| {
            let name = category.name.to_lowercase();
            if name.contains(&q) {
                Some((id, name, catalog.category_song_count(id)))
            } else {
                None
            }
        })
        .collect();
    categories.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    categories.truncate(RESULT_LIMIT);

    let named = |list: &[(u64, String, usize)]| -> Vec<(u64, String)> {
        list.iter().map(|(id, name, _)| (*id, name.clone())).collect()
    };
    let named_songs: Vec<(u64, String)> = songs
        .iter()
        .map(|(id, name, _)| (*id, name.clone()))
        .collect();
    let top = pick_top(
        &q,
        &named_songs,
        &named(&artists),
        &named(&albums),
        &named(&playlists),
        &named(&categories),
    );

    SearchIds {
        songs: songs.into_iter().map(|(id, _, _)| id).collect(),
        albums: albums.into_iter().map(|(id, _, _)| id).collect(),
        artists: artists.into_iter().map(|(id, _, _)| id).collect(),
        playlists: playlists.into_iter().map(|(id, _, _)| id).collect(),
        categories: categories.into_iter().map(|(id, _, _)| id).collect(),
        top,
    }
}

/// Exact name matches win in the fixed priority order songs, artists,
/// albums, playlists, categories; otherwise the head of the first non-empty
/// list does.
fn pick_top(
    q: &str,
    songs: &[(u64, String)],
    artists: &[(u64, String)],
    albums: &[(u64, String)],
    playlists: &[(u64, String)],
    categories: &[(u64, String)],
) -> Option<TopHit> {
    let ordered: [(&[(u64, String)], fn(u64) -> TopHit); 5] = [
        (songs, TopHit::Song),
        (artists, TopHit::Artist),
        (albums, TopHit::Album),
        (playlists, TopHit::Playlist),
        (categories, TopHit::Category),
    ];

    for (list, wrap) in ordered {
        if let Some((id, _)) = list.iter().find(|(_, name)| name == q) {
            return Some(wrap(*id));
        }
    }
    for (list, wrap) in ordered {
        if let Some((id, _)) = list.first() {
            return Some(wrap(*id));
        }
    }

    None
}
