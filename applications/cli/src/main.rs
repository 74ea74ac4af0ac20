/// HolyBeats - browse, favorite and organize tracks from the command line
mod config;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use config::CliConfig;
use holybeats_client::{ClientConfig, FileTokenStore, HolyBeatsClient};
use holybeats_core::{MusicService, PlaylistId, Track, TrackId, TrackQuery};
use holybeats_playback::{NullBackend, PlaybackConfig, PlaybackTracker};
use holybeats_screens::{App, Notice, NoticeKind, Outcome, Page, PromptMode, SharedPlayer};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "holybeats=info,holybeats_client=info,holybeats_screens=info";
const TITLE_WIDTH: usize = 60;
const SIGN_IN_ATTEMPTS: usize = 3;

#[derive(Parser)]
#[command(name = "holybeats")]
#[command(about = "Browse, favorite and organize HolyBeats tracks", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "HOLYBEATS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the credential
    Login {
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Forget the stored credential
    Logout,
    /// List tracks
    Tracks {
        /// Show only this page
        #[arg(long, conflicts_with = "pages")]
        page: Option<u32>,
        /// Genre filter
        #[arg(short, long)]
        genre: Option<String>,
        /// Language filter
        #[arg(short, long)]
        language: Option<String>,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// List available genres and languages
    Filters,
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },
    /// Manage playlists
    Playlists {
        #[command(subcommand)]
        action: Option<PlaylistsAction>,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites
    List,
    /// Add a track to favorites
    Add { track_id: String },
    /// Remove a track from favorites
    Remove { track_id: String },
}

#[derive(Subcommand)]
enum PlaylistsAction {
    /// List playlists
    List,
    /// Create a playlist
    Create { name: String },
    /// Delete a playlist
    Delete {
        playlist_id: String,
        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the tracks of a playlist
    Show { playlist_id: String },
    /// Add a track to a playlist
    Add {
        playlist_id: String,
        track_id: String,
    },
    /// Remove a track from a playlist
    Remove {
        playlist_id: String,
        track_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;
    tracing::debug!(url = %config.api.url, token_path = ?config.storage.token_path, "Configuration loaded");

    let store = Arc::new(FileTokenStore::new(config.storage.token_path.clone()));
    let client = HolyBeatsClient::new(ClientConfig::new(config.api.url.clone()), store)
        .context("Failed to create API client")?;
    let service: Arc<dyn MusicService> = Arc::new(client);

    let player = SharedPlayer::new(PlaybackTracker::new(
        Box::new(NullBackend),
        PlaybackConfig::default(),
    ));
    let mut app = App::new(Arc::clone(&service), player, config.api.page_size).await;

    match cli.command {
        Commands::Login { email } => login(&mut app, PromptMode::Login, email).await,
        Commands::Register { email } => login(&mut app, PromptMode::Register, email).await,
        Commands::Logout => {
            finish(app.logout().await, None)?;
            println!("Signed out");
            Ok(())
        }
        Commands::Tracks {
            page,
            genre,
            language,
            pages,
        } => match page {
            Some(page) => {
                let query = TrackQuery {
                    page: page.max(1),
                    ..filtered_query(config.api.page_size, genre, language)
                };
                let result = service.list_tracks(&query).await?;
                print_tracks(&result.items);
                print_more(result.has_more, result.total_count);
                Ok(())
            }
            None => list_tracks(&app, genre, language, pages).await,
        },
        Commands::Filters => {
            let filters = service.list_track_filters().await?;
            println!("Genres:    {}", filters.genres.join(", "));
            println!("Languages: {}", filters.languages.join(", "));
            Ok(())
        }
        Commands::Favorites { action } => {
            favorites(&mut app, action.unwrap_or(FavoritesAction::List)).await
        }
        Commands::Playlists { action } => {
            playlists(&mut app, action.unwrap_or(PlaylistsAction::List)).await
        }
    }
}

async fn login(app: &mut App, mode: PromptMode, email: Option<String>) -> anyhow::Result<()> {
    app.open_prompt();
    if let Some(prompt) = app.prompt_mut() {
        prompt.set_mode(mode);
        if let Some(email) = email {
            prompt.email = email;
        }
    }
    finish(sign_in(app).await?, None)?;
    println!("Signed in");
    Ok(())
}

async fn list_tracks(
    app: &App,
    genre: Option<String>,
    language: Option<String>,
    pages: u32,
) -> anyhow::Result<()> {
    let library = app.library();
    let mut outcome = library.load().await;
    if let Some(genre) = genre.filter(|_| outcome.is_completed()) {
        outcome = library.set_genre(&genre).await;
    }
    if let Some(language) = language.filter(|_| outcome.is_completed()) {
        outcome = library.set_language(&language).await;
    }
    finish(outcome, library.notice())?;

    for _ in 1..pages {
        if !library.has_more() {
            break;
        }
        finish(library.load_more().await, library.notice())?;
    }

    print_tracks(&library.tracks());
    print_more(library.has_more(), library.total_count());
    Ok(())
}

async fn favorites(app: &mut App, action: FavoritesAction) -> anyhow::Result<()> {
    match action {
        FavoritesAction::List => {
            let outcome = app.navigate(Page::Favorites).await;
            let outcome = settle(app, outcome).await?;
            finish(outcome, app.favorites().notice())?;
            print_tracks(&app.favorites().tracks());
        }
        FavoritesAction::Add { track_id } => {
            let outcome = app.add_favorite(&TrackId::new(track_id)).await;
            let outcome = settle(app, outcome).await?;
            finish(outcome, app.library().notice())?;
            println!("Added to favorites");
        }
        FavoritesAction::Remove { track_id } => {
            ensure_signed_in(app).await?;
            let outcome = app.favorites().remove(&TrackId::new(track_id)).await;
            finish(outcome, app.favorites().notice())?;
            println!("Removed from favorites");
        }
    }
    Ok(())
}

async fn playlists(app: &mut App, action: PlaylistsAction) -> anyhow::Result<()> {
    let outcome = app.navigate(Page::Playlists).await;
    let outcome = settle(app, outcome).await?;
    finish(outcome, app.playlists().notice())?;
    let screen = app.playlists();

    match action {
        PlaylistsAction::List => {
            for playlist in screen.playlists() {
                println!("{:>6}  {}", playlist.id.as_str(), playlist.name);
            }
        }
        PlaylistsAction::Create { name } => {
            finish(screen.create(&name).await, screen.notice())?;
            println!("Playlist created");
        }
        PlaylistsAction::Delete { playlist_id, yes } => {
            let confirmed = yes || confirm("Delete playlist?")?;
            let outcome = screen.delete(&PlaylistId::new(playlist_id), confirmed).await;
            if outcome == Outcome::Cancelled {
                println!("Cancelled");
                return Ok(());
            }
            finish(outcome, screen.notice())?;
            println!("Playlist deleted");
        }
        PlaylistsAction::Show { playlist_id } => {
            finish(screen.select(&PlaylistId::new(playlist_id)).await, screen.notice())?;
            if let Some(selected) = screen.selected() {
                println!("{}", selected.name);
                print_tracks(&screen.tracks());
            }
        }
        PlaylistsAction::Add {
            playlist_id,
            track_id,
        } => {
            let outcome = app
                .add_to_playlist(&TrackId::new(track_id), &PlaylistId::new(playlist_id))
                .await;
            let outcome = settle(app, outcome).await?;
            finish(outcome, app.library().notice())?;
            println!("Added to playlist");
        }
        PlaylistsAction::Remove {
            playlist_id,
            track_id,
        } => {
            finish(screen.select(&PlaylistId::new(playlist_id)).await, screen.notice())?;
            finish(screen.remove_track(&TrackId::new(track_id)).await, screen.notice())?;
            println!("Removed from playlist");
        }
    }
    Ok(())
}

// ===== Sign-in =====

/// Answer a login request by prompting, which replays the pending action
async fn settle(app: &mut App, outcome: Outcome) -> anyhow::Result<Outcome> {
    if outcome != Outcome::LoginRequired {
        return Ok(outcome);
    }
    sign_in(app).await
}

/// Sign in first for actions that have nothing to replay
async fn ensure_signed_in(app: &mut App) -> anyhow::Result<()> {
    if app.session().is_authenticated() {
        return Ok(());
    }
    app.open_prompt();
    finish(sign_in(app).await?, None)
}

async fn sign_in(app: &mut App) -> anyhow::Result<Outcome> {
    for _ in 0..SIGN_IN_ATTEMPTS {
        let Some(prompt) = app.prompt_mut() else {
            return Ok(Outcome::Cancelled);
        };

        if prompt.email.is_empty() {
            prompt.email = read_line("Email: ")?;
        }
        prompt.password = read_line("Password: ")?;
        if prompt.mode() == PromptMode::Register {
            prompt.confirm_password = read_line("Confirm password: ")?;
        }

        match app.submit_login().await {
            Outcome::Rejected(message) => {
                eprintln!("{}", message);
                if let Some(prompt) = app.prompt_mut() {
                    prompt.email.clear();
                }
            }
            outcome => return Ok(outcome),
        }
    }

    app.dismiss_prompt();
    bail!("Sign-in failed")
}

fn read_line(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    std::io::stderr().flush()?;

    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        bail!("No input available for sign-in");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    let answer = read_line(&format!("{} [y/N] ", question))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

// ===== Output =====

/// Turn a screen outcome into the process result
fn finish(outcome: Outcome, notice: Option<Notice>) -> anyhow::Result<()> {
    match outcome {
        Outcome::Completed => {
            if let Some(notice) = notice.filter(|n| n.kind == NoticeKind::Info) {
                tracing::info!("{}", notice.message);
            }
            Ok(())
        }
        Outcome::LoginRequired => bail!("Sign-in required"),
        Outcome::Rejected(message) | Outcome::Failed(message) => bail!(message),
        Outcome::Superseded => bail!("Request was superseded"),
        Outcome::Cancelled => bail!("Cancelled"),
    }
}

fn filtered_query(page_size: u32, genre: Option<String>, language: Option<String>) -> TrackQuery {
    let query = TrackQuery::first_page(page_size);
    let query = match genre {
        Some(genre) => query.with_genre(genre),
        None => query,
    };
    match language {
        Some(language) => query.with_language(language),
        None => query,
    }
}

fn print_tracks(tracks: &[Track]) {
    if tracks.is_empty() {
        println!("No tracks");
        return;
    }
    for track in tracks {
        let tags: Vec<&str> = [track.genre.as_deref(), track.language.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if tags.is_empty() {
            println!("{:>6}  {}", track.id.as_str(), track.display_title(TITLE_WIDTH));
        } else {
            println!(
                "{:>6}  {}  [{}]",
                track.id.as_str(),
                track.display_title(TITLE_WIDTH),
                tags.join(", ")
            );
        }
    }
}

fn print_more(has_more: bool, total_count: Option<u64>) {
    if let Some(total) = total_count {
        println!("{} tracks in total", total);
    }
    if has_more {
        println!("More tracks available (use --pages)");
    }
}
