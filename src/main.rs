mod app_service;
mod app_state;
mod commands;
mod config;
mod fetch;
mod filter;
mod model;
mod routes;
mod session;
mod ui;

use anyhow::Context;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::app_service::{restore_auth, run_command_loop};
use crate::app_state::{App, AppEvent};
use crate::commands::FetchCommand;
use crate::config::AppConfig;
use crate::routes::Route;
use crate::session::{AnalyticsApi, LegiSession, TokenStore};
use crate::ui::draw;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let ts = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let log_dir = std::path::PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir).context("无法创建 logs 目录")?;
    let log_path = log_dir.join(format!("app-{}.log", ts));
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("无法创建日志文件 {}", log_path.display()))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file))) // 终端留给 TUI
        .filter_level(log::LevelFilter::Warn)
        .filter_module("legisight", log::LevelFilter::Info)
        .init();

    let config = AppConfig::from_env()?;
    let mut session_info = config.describe();

    let api: Arc<dyn AnalyticsApi> = Arc::new(
        LegiSession::new(config.api_url.clone(), config.timeout)
            .context("无法创建 HTTP 客户端")?,
    );
    let tokens = TokenStore::new(config.token_file.clone());
    let auth = restore_auth(api.as_ref(), &tokens, &config, &mut session_info).await;

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<FetchCommand>();
    let (evt_tx, evt_rx) = mpsc::unbounded_channel::<AppEvent>();

    tokio::spawn(run_command_loop(api, cmd_rx, evt_tx));

    // TUI 初始化
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session_info, auth, tokens, cmd_tx, evt_rx);
    app.navigate(Route::Home);

    let res = match app.evt_rx.take() {
        Some(rx) => run_app_loop(&mut terminal, &mut app, rx).await,
        None => Ok(()),
    };

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res.context("界面循环异常退出")
}

async fn run_app_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut evt_rx: mpsc::UnboundedReceiver<AppEvent>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        while let Ok(event) = evt_rx.try_recv() {
            app.handle_event(event);
        }

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key_event(key.code) {
                    return Ok(());
                }
            }
        }
    }
}
