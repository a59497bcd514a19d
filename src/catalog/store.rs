use super::types::{Album, Artist, Category, Favorite, Playlist, Song};
use crate::storage::memory::EntityMap;

use dashmap::DashMap;

/// All catalog tables plus the per-user favorite rows.
///
/// Tables are public; relational consistency flows through the removal
/// methods below, which every delete handler must use instead of touching
/// the tables directly.
pub struct CatalogStore {
    pub categories: EntityMap<Category>,
    pub artists: EntityMap<Artist>,
    pub albums: EntityMap<Album>,
    pub songs: EntityMap<Song>,
    pub playlists: EntityMap<Playlist>,
    favorites: DashMap<u64, Favorite>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            categories: EntityMap::new(),
            artists: EntityMap::new(),
            albums: EntityMap::new(),
            songs: EntityMap::new(),
            playlists: EntityMap::new(),
            favorites: DashMap::new(),
        }
    }

    // ---- joins ----

    pub fn songs_of_artist(&self, artist_id: u64) -> Vec<Song> {
        self.songs
            .snapshot()
            .into_iter()
            .filter(|(_, song)| song.artist_id == artist_id)
            .map(|(_, song)| song)
            .collect()
    }

    pub fn albums_of_artist(&self, artist_id: u64) -> Vec<Album> {
        self.albums
            .snapshot()
            .into_iter()
            .filter(|(_, album)| album.artist_id == artist_id)
            .map(|(_, album)| album)
            .collect()
    }

    pub fn songs_of_album(&self, album_id: u64) -> Vec<Song> {
        self.songs
            .snapshot()
            .into_iter()
            .filter(|(_, song)| song.album_id == Some(album_id))
            .map(|(_, song)| song)
            .collect()
    }

    pub fn category_song_count(&self, category_id: u64) -> usize {
        self.songs
            .snapshot()
            .iter()
            .filter(|(_, song)| song.category_ids.contains(&category_id))
            .count()
    }

    // ---- favorites ----

    pub fn favorite_of(&self, user_id: u64) -> Option<Favorite> {
        self.favorites.get(&user_id).map(|row| row.value().clone())
    }

    /// Creates the user's favorite row; `false` when one already exists.
    pub fn create_favorite(&self, user_id: u64) -> bool {
        match self.favorites.entry(user_id) {
            dashmap::mapref::entry::Entry::Occupied(_) => false,
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(Favorite::default());
                true
            }
        }
    }

    pub fn remove_favorite(&self, user_id: u64) -> Option<Favorite> {
        self.favorites.remove(&user_id).map(|(_, row)| row)
    }

    /// Runs `apply` on the user's favorite row, creating it on first use.
    pub fn with_favorite<R>(&self, user_id: u64, apply: impl FnOnce(&mut Favorite) -> R) -> R {
        let mut row = self.favorites.entry(user_id).or_default();
        apply(row.value_mut())
    }

    /// Every favorite row, sorted by user id.
    pub fn favorites_snapshot(&self) -> Vec<(u64, Favorite)> {
        let mut rows: Vec<(u64, Favorite)> = self
            .favorites
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        rows.sort_by_key(|(user_id, _)| *user_id);
        rows
    }

    pub fn song_favorite_count(&self, song_id: u64) -> usize {
        self.favorites
            .iter()
            .filter(|entry| entry.value().song_ids.contains(&song_id))
            .count()
    }

    pub fn album_favorite_count(&self, album_id: u64) -> usize {
        self.favorites
            .iter()
            .filter(|entry| entry.value().album_ids.contains(&album_id))
            .count()
    }

    pub fn artist_favorite_count(&self, artist_id: u64) -> usize {
        self.favorites
            .iter()
            .filter(|entry| entry.value().artist_ids.contains(&artist_id))
            .count()
    }

    pub fn playlist_favorite_count(&self, playlist_id: u64) -> usize {
        self.favorites
            .iter()
            .filter(|entry| entry.value().playlist_ids.contains(&playlist_id))
            .count()
    }

    // ---- removals with relational cleanup ----

    pub fn remove_category(&self, category_id: u64) -> Option<Category> {
        let removed = self.categories.remove(category_id)?;
        for (album_id, album) in self.albums.snapshot() {
            if album.category_ids.contains(&category_id) {
                self.albums.update(album_id, |album| {
                    album.category_ids.retain(|id| *id != category_id);
                });
            }
        }
        for (song_id, song) in self.songs.snapshot() {
            if song.category_ids.contains(&category_id) {
                self.songs.update(song_id, |song| {
                    song.category_ids.retain(|id| *id != category_id);
                });
            }
        }
        Some(removed)
    }

    /// Cascades: the artist's albums and songs go with them.
    pub fn remove_artist(&self, artist_id: u64) -> Option<Artist> {
        let removed = self.artists.remove(artist_id)?;
        for (album_id, _) in self
            .albums
            .snapshot()
            .into_iter()
            .filter(|(_, album)| album.artist_id == artist_id)
        {
            let _ = self.remove_album(album_id);
        }
        for (song_id, _) in self
            .songs
            .snapshot()
            .into_iter()
            .filter(|(_, song)| song.artist_id == artist_id)
        {
            let _ = self.remove_song(song_id);
        }
        self.prune_favorites(|favorite| {
            favorite.artist_ids.retain(|id| *id != artist_id);
        });
        Some(removed)
    }

    /// Songs on the album survive with `album_id` cleared.
    pub fn remove_album(&self, album_id: u64) -> Option<Album> {
        let removed = self.albums.remove(album_id)?;
        for (song_id, song) in self.songs.snapshot() {
            if song.album_id == Some(album_id) {
                self.songs.update(song_id, |song| song.album_id = None);
            }
        }
        self.prune_favorites(|favorite| {
            favorite.album_ids.retain(|id| *id != album_id);
        });
        Some(removed)
    }

    pub fn remove_song(&self, song_id: u64) -> Option<Song> {
        let removed = self.songs.remove(song_id)?;
        for (playlist_id, playlist) in self.playlists.snapshot() {
            if playlist.song_ids.contains(&song_id) {
                self.playlists.update(playlist_id, |playlist| {
                    playlist.song_ids.retain(|id| *id != song_id);
                });
            }
        }
        self.prune_favorites(|favorite| {
            favorite.song_ids.retain(|id| *id != song_id);
        });
        Some(removed)
    }

    pub fn remove_playlist(&self, playlist_id: u64) -> Option<Playlist> {
        let removed = self.playlists.remove(playlist_id)?;
        self.prune_favorites(|favorite| {
            favorite.playlist_ids.retain(|id| *id != playlist_id);
        });
        Some(removed)
    }

    fn prune_favorites(&self, prune: impl Fn(&mut Favorite)) {
        for mut entry in self.favorites.iter_mut() {
            prune(entry.value_mut());
        }
    }
}
