use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{collections::VecDeque, fs, io, sync::Mutex, time::Duration};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use foldertui::api::FolderClient;
use foldertui::cache::CacheDb;
use foldertui::config::{get_config_path, Config};
use foldertui::handlers::key_to_msg;
use foldertui::messages::{Command, Msg};
use foldertui::model::Model;
use foldertui::services::api::{spawn_api_service, ApiRequest, ApiResponse};
use foldertui::{ui, update, utils};

/// Folder manager TUI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to <tmp>/foldertui-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the server URL from the config file
    #[arg(long)]
    base_url: Option<String>,
}

/// Route tracing output to the debug log file; the terminal belongs to the UI
fn init_logging(debug: bool) -> Result<()> {
    if !debug {
        return Ok(());
    }

    let log_path = utils::get_debug_log_path();
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open debug log {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("foldertui=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

struct App {
    model: Model,
    api_tx: mpsc::UnboundedSender<ApiRequest>,
    api_rx: mpsc::UnboundedReceiver<ApiResponse>,
    /// Missing when the cache dir can't be opened; the app runs without it
    cache: Option<CacheDb>,
}

impl App {
    async fn new(config: Config) -> Result<Self> {
        let api_token = config.resolve_api_token()?;
        let client = FolderClient::new(config.base_url.clone(), api_token)?;
        tracing::info!(base_url = client.base_url(), token = client.has_token(), "client ready");

        if let (Some(username), Some(password)) = (config.username.as_deref(), config.resolve_password()) {
            // An unreachable server must not stop startup; the cached listing covers it
            match client.login(username, &password).await {
                Ok(()) => tracing::info!(username, "logged in"),
                Err(e) => tracing::warn!(username, "login failed: {:#}", e),
            }
        }

        let cache = match CacheDb::new() {
            Ok(cache) => Some(cache),
            Err(e) => {
                tracing::warn!("cache unavailable: {:#}", e);
                None
            }
        };

        let (api_tx, api_rx) = spawn_api_service(client);

        Ok(Self {
            model: Model::new(config.vim_mode),
            api_tx,
            api_rx,
            cache,
        })
    }

    /// Run a message through `update` and execute the commands it returns,
    /// including any messages those commands produce
    fn dispatch(&mut self, msg: Msg) {
        let mut pending = VecDeque::from([msg]);

        while let Some(msg) = pending.pop_front() {
            for command in update::update(&mut self.model, msg) {
                if let Some(follow_up) = self.execute(command) {
                    pending.push_back(follow_up);
                }
            }
        }
    }

    fn execute(&mut self, command: Command) -> Option<Msg> {
        match command {
            Command::Api(request) => {
                if self.api_tx.send(request).is_err() {
                    tracing::error!("API service is gone, request dropped");
                }
                None
            }
            Command::CacheFolders(folders) => {
                if let Some(cache) = self.cache.as_mut() {
                    if let Err(e) = cache.save_folders(&folders) {
                        tracing::warn!("failed to cache folders: {:#}", e);
                    }
                }
                None
            }
            Command::RestoreCachedFolders => {
                let cache = self.cache.as_ref()?;
                match cache.get_all_folders() {
                    Ok(folders) => Some(Msg::CachedFolders(folders)),
                    Err(e) => {
                        tracing::warn!("failed to read cached folders: {:#}", e);
                        None
                    }
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    init_logging(args.debug)?;

    let config_path = get_config_path(args.config)?;
    tracing::debug!("Loading config from: {:?}", config_path);

    // Load configuration
    let config_str = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let mut config = Config::from_yaml(&config_str)?;

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    // Initialize app
    let mut app = App::new(config).await?;

    // Page load
    app.dispatch(Msg::Reload);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Return result after cleanup
    result
}

async fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Always render (Elm Architecture approach)
        terminal.draw(|f| {
            ui::render(f, &app.model);
        })?;

        // Auto-dismiss toast after 1.5 seconds
        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = app.api_rx.try_recv() {
            app.dispatch(Msg::Api(response));
        }

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    if let Some(msg) = key_to_msg(&app.model, key) {
                        app.dispatch(msg);
                    }
                }
            }
        }
    }

    Ok(())
}
