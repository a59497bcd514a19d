use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use soundvault::accounts::handlers::{
    handle_login, handle_me, handle_register, handle_request_otp, handle_update_me,
    handle_verify_otp,
};
use soundvault::accounts::store::{AccountStore, NewUser};
use soundvault::catalog::handlers::*;
use soundvault::catalog::store::CatalogStore;
use soundvault::recommend::handlers::handle_recommendation;
use soundvault::search::handlers::handle_search;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: SocketAddr = "127.0.0.1:8000".parse()?;
    let mut admin_email: Option<String> = None;
    let mut admin_password: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = args[i + 1].parse()?;
                i += 2;
            }
            "--admin-email" => {
                admin_email = Some(args[i + 1].clone());
                i += 2;
            }
            "--admin-password" => {
                admin_password = Some(args[i + 1].clone());
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    tracing::info!("Starting soundvault on {}", bind_addr);

    // 1. Shared state:
    let accounts = Arc::new(AccountStore::new());
    let catalog = Arc::new(CatalogStore::new());

    // 2. Optional admin seed (catalog writes need an administrator):
    if let (Some(email), Some(password)) = (admin_email, admin_password) {
        let admin = accounts.create_user(NewUser {
            email: email.clone(),
            username: "admin".to_string(),
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1970, 1, 1)
                .expect("valid epoch date"),
            password,
            bio: None,
            avatar_url: None,
            is_admin: true,
        })?;
        tracing::info!("Seeded admin account {} ({})", email, admin.id);
    }

    // 3. HTTP Router:
    let app = Router::new()
        // accounts
        .route("/accounts/register", post(handle_register))
        .route("/accounts/login", post(handle_login))
        .route("/accounts/me", get(handle_me).patch(handle_update_me))
        .route("/accounts/password/request-otp", post(handle_request_otp))
        .route("/accounts/password/verify-otp", post(handle_verify_otp))
        // catalog CRUD
        .route(
            "/categories",
            get(handle_list_categories).post(handle_create_category),
        )
        .route(
            "/categories/:id",
            get(handle_get_category)
                .put(handle_update_category)
                .patch(handle_update_category)
                .delete(handle_delete_category),
        )
        .route(
            "/artists",
            get(handle_list_artists).post(handle_create_artist),
        )
        .route(
            "/artists/:id",
            get(handle_get_artist)
                .put(handle_update_artist)
                .patch(handle_update_artist)
                .delete(handle_delete_artist),
        )
        .route("/artists/:id/top_songs", get(handle_artist_top_songs))
        .route("/albums", get(handle_list_albums).post(handle_create_album))
        .route(
            "/albums/:id",
            get(handle_get_album)
                .put(handle_update_album)
                .patch(handle_update_album)
                .delete(handle_delete_album),
        )
        .route("/songs", get(handle_list_songs).post(handle_create_song))
        .route(
            "/songs/:id",
            get(handle_get_song)
                .put(handle_update_song)
                .patch(handle_update_song)
                .delete(handle_delete_song),
        )
        .route(
            "/playlists",
            get(handle_list_playlists).post(handle_create_playlist),
        )
        .route(
            "/playlists/:id",
            get(handle_get_playlist)
                .put(handle_update_playlist)
                .patch(handle_update_playlist)
                .delete(handle_delete_playlist),
        )
        .route("/playlists/:id/add_song", post(handle_playlist_add_song))
        .route(
            "/playlists/:id/remove_song",
            post(handle_playlist_remove_song),
        )
        // favorites
        .route(
            "/favorites",
            get(handle_list_favorites).post(handle_create_favorite),
        )
        .route(
            "/favorites/:id",
            get(handle_get_favorite).delete(handle_delete_favorite),
        )
        .route("/favorites/add_song", post(handle_favorite_add_song))
        .route("/favorites/remove_song", post(handle_favorite_remove_song))
        .route("/favorites/add_album", post(handle_favorite_add_album))
        .route(
            "/favorites/remove_album",
            post(handle_favorite_remove_album),
        )
        .route("/favorites/add_artist", post(handle_favorite_add_artist))
        .route(
            "/favorites/remove_artist",
            post(handle_favorite_remove_artist),
        )
        .route(
            "/favorites/add_playlist",
            post(handle_favorite_add_playlist),
        )
        .route(
            "/favorites/remove_playlist",
            post(handle_favorite_remove_playlist),
        )
        // recommendation + search
        .route("/recommendation", get(handle_recommendation))
        .route("/search", get(handle_search))
        .layer(Extension(accounts))
        .layer(Extension(catalog));

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
