//! Hydration of catalog entities into wire representations.
//!
//! Relations are resolved against the store at render time, one level deep.
//! The cascade rules keep references valid, so missing relations only show
//! up as `None` on shapes that allow it.

use super::protocol::{
    AlbumLight, AlbumOut, ArtistLight, ArtistOut, CategoryOut, FavoriteOut, PlaylistLight,
    PlaylistOut, PlaylistOwner, SongLight, SongOut,
};
use super::store::CatalogStore;
use super::types::{Album, Artist, Category, Favorite, Playlist, Song};
use crate::accounts::store::AccountStore;

pub fn category_out(category: &Category) -> CategoryOut {
    CategoryOut {
        id: category.id,
        name: category.name.clone(),
        description: category.description.clone(),
        cover_url: category.cover_url.clone(),
    }
}

pub fn artist_light(artist: &Artist) -> ArtistLight {
    ArtistLight {
        id: artist.id,
        name: artist.name.clone(),
        image_url: artist.image_url.clone(),
    }
}

pub fn artist_out(store: &CatalogStore, artist: &Artist) -> ArtistOut {
    ArtistOut {
        id: artist.id,
        name: artist.name.clone(),
        bio: artist.bio.clone(),
        image_url: artist.image_url.clone(),
        songs: store
            .songs_of_artist(artist.id)
            .iter()
            .map(|song| song_light(store, song))
            .collect(),
        albums: store
            .albums_of_artist(artist.id)
            .iter()
            .map(|album| album_light(store, album))
            .collect(),
    }
}

pub fn album_light(store: &CatalogStore, album: &Album) -> AlbumLight {
    AlbumLight {
        id: album.id,
        name: album.name.clone(),
        artist_id: album.artist_id,
        artist_name: store
            .artists
            .get(album.artist_id)
            .map(|artist| artist.name)
            .unwrap_or_default(),
        cover_url: album.cover_url.clone(),
        release_date: album.release_date,
    }
}

pub fn album_out(store: &CatalogStore, album: &Album) -> AlbumOut {
    AlbumOut {
        id: album.id,
        name: album.name.clone(),
        artist: store
            .artists
            .get(album.artist_id)
            .map(|artist| artist_light(&artist)),
        categories: album
            .category_ids
            .iter()
            .filter_map(|id| store.categories.get(*id))
            .map(|category| category_out(&category))
            .collect(),
        songs: store
            .songs_of_album(album.id)
            .iter()
            .map(|song| song_light(store, song))
            .collect(),
        cover_url: album.cover_url.clone(),
        release_date: album.release_date,
    }
}

pub fn song_light(store: &CatalogStore, song: &Song) -> SongLight {
    SongLight {
        id: song.id,
        name: song.name.clone(),
        artist_id: song.artist_id,
        artist_name: store
            .artists
            .get(song.artist_id)
            .map(|artist| artist.name)
            .unwrap_or_default(),
        album_id: song.album_id,
        duration_secs: song.duration_secs,
        popularity: song.popularity,
        cover_url: song.cover_url.clone(),
    }
}

pub fn song_out(store: &CatalogStore, song: &Song) -> SongOut {
    SongOut {
        id: song.id,
        name: song.name.clone(),
        artist: store
            .artists
            .get(song.artist_id)
            .map(|artist| artist_light(&artist)),
        album: song
            .album_id
            .and_then(|id| store.albums.get(id))
            .map(|album| album_light(store, &album)),
        duration_secs: song.duration_secs,
        popularity: song.popularity,
        cover_url: song.cover_url.clone(),
        audio_url: song.audio_url.clone(),
        release_date: song.release_date,
    }
}

pub fn playlist_light(playlist: &Playlist) -> PlaylistLight {
    PlaylistLight {
        id: playlist.id,
        name: playlist.name.clone(),
        cover_url: playlist.cover_url.clone(),
        song_count: playlist.song_ids.len(),
    }
}

pub fn playlist_out(
    store: &CatalogStore,
    accounts: &AccountStore,
    playlist: &Playlist,
) -> PlaylistOut {
    PlaylistOut {
        id: playlist.id,
        name: playlist.name.clone(),
        owner: accounts.get(playlist.user_id).map(|user| PlaylistOwner {
            id: user.id,
            username: user.username,
        }),
        songs: playlist
            .song_ids
            .iter()
            .filter_map(|id| store.songs.get(*id))
            .map(|song| song_light(store, &song))
            .collect(),
        cover_url: playlist.cover_url.clone(),
        created_at: playlist.created_at,
    }
}

pub fn favorite_out(store: &CatalogStore, user_id: u64, favorite: &Favorite) -> FavoriteOut {
    FavoriteOut {
        user_id,
        songs: favorite
            .song_ids
            .iter()
            .filter_map(|id| store.songs.get(*id))
            .map(|song| song_out(store, &song))
            .collect(),
        albums: favorite
            .album_ids
            .iter()
            .filter_map(|id| store.albums.get(*id))
            .map(|album| album_light(store, &album))
            .collect(),
        artists: favorite
            .artist_ids
            .iter()
            .filter_map(|id| store.artists.get(*id))
            .map(|artist| artist_light(&artist))
            .collect(),
        playlists: favorite
            .playlist_ids
            .iter()
            .filter_map(|id| store.playlists.get(*id))
            .map(|playlist| playlist_light(&playlist))
            .collect(),
    }
}
