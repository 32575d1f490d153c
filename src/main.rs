use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tokio::time::Instant;

use singboard::app::cli::Args;
use singboard::app::config::{AppConfig, UserConfig};
use singboard::app::events::AppEvent;
use singboard::app::logging;
use singboard::board::detector::Notification;
use singboard::store::open_store;
use singboard::surface::{HeadlessSurface, Size, TerminalSurface};
use singboard::ui::{self, theme};
use singboard::BoardController;

/// How long to sleep when no board timer is pending.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}

fn load_config(args: &Args) -> Result<UserConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::load(),
    };
    if let Some(store) = &args.store {
        config.store.path = store.clone();
    }
    Ok(config)
}

/// Lay out the store once on a headless surface and print the result.
fn headless_dump(config: &UserConfig, (width, height): (f64, f64)) -> Result<()> {
    let surface = HeadlessSurface::with_size(Size::new(width, height));
    let store = open_store(&config.store.path);
    let mut board = BoardController::new(surface, store, config.display.clone());

    board.start();
    board.advance_by(config.display.settle_delay() + config.display.decoration_refresh());

    let dump = serde_json::json!({
        "decision": board.last_decision(),
        "stats": board.stats(),
        "surface": board.surface().snapshot(),
    });
    println!("{}", serde_json::to_string_pretty(&dump)?);
    board.shutdown();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    // Put the terminal back before any panic report is printed
    let report = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        report(info);
    }));

    let args = Args::parse();

    if args.generate_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config = load_config(&args)?;

    if let Some(size) = args.headless_dump {
        return headless_dump(&config, size);
    }

    let _log_guard = logging::init(&args.log_level)?;
    tracing::info!(store = %config.store.path.display(), "singboard starting");

    // 1. Board
    let (cols, rows) = terminal::size()?;
    let surface = TerminalSurface::for_terminal(cols, rows, &config.terminal);
    let store = open_store(&config.store.path);
    let mut board = BoardController::new(surface, store, config.display.clone());

    let theme_path = AppConfig::get_theme_path();
    let mut current_theme = theme::load_theme(&theme_path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::channel(100);

    // 2. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 3. "List updated" from the producer: SIGUSR1 📣
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let tx_signal = tx.clone();
        let mut updates = signal(SignalKind::user_defined1())?;
        tokio::spawn(async move {
            while updates.recv().await.is_some() {
                if tx_signal
                    .send(AppEvent::Notify(Notification::ListUpdated))
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });
    }

    // 4. Theme Watcher Task 🎨
    let tx_theme = tx.clone();
    let watched_theme = current_theme.clone();
    tokio::spawn(async move {
        let mut last = watched_theme;
        loop {
            tokio::time::sleep(Duration::from_millis(250)).await;
            let path = theme_path.clone();
            let Ok(theme) = tokio::task::spawn_blocking(move || theme::load_theme(&path)).await
            else {
                break;
            };
            if theme != last {
                last = theme.clone();
                if tx_theme.send(AppEvent::ThemeUpdate(theme)).await.is_err() {
                    break;
                }
            }
        }
    });
    drop(tx);

    let epoch = Instant::now();
    board.start();
    let mut running = true;

    while running {
        terminal.draw(|f| ui::ui(f, board.surface(), &current_theme, &config.terminal))?;

        let deadline = board
            .next_deadline()
            .map(|due| epoch + due)
            .unwrap_or_else(|| Instant::now() + IDLE_WAIT);

        tokio::select! {
            Some(event) = rx.recv() => match event {
                AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c');
                    if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        running = false;
                    }
                }
                AppEvent::Input(Event::Resize(cols, rows)) => {
                    board.surface_mut().resize_cells(cols, rows);
                    board.resized_at(epoch.elapsed());
                }
                AppEvent::Input(_) => {}
                AppEvent::Notify(notification) => {
                    board.notify_at(epoch.elapsed(), notification);
                }
                AppEvent::ThemeUpdate(theme) => current_theme = theme,
            },
            _ = tokio::time::sleep_until(deadline) => {}
        }

        board.advance_to(epoch.elapsed());
    }

    board.shutdown();
    restore_terminal();
    terminal.show_cursor()?;
    tracing::info!("singboard stopped");

    Ok(())
}
