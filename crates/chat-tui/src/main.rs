//! Terminal chat client: event loop and wiring.

use anyhow::Result;
use chat_tui::app::{App, AppEvent};
use chat_tui::client::{ApiClient, SendError};
use chat_tui::transcript::TurnOutcome;
use chat_tui::ui;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let base_url =
        std::env::var("MEMCHAT_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8003".to_string());
    let client = Arc::new(ApiClient::new(base_url)?);

    // The session id comes from the chat route's loader; fall back to a
    // local id when the server is unreachable so the view still opens.
    let user_id = match client.bootstrap().await {
        Ok(id) => id,
        Err(e) => {
            log::warn!("session bootstrap failed, using a local id: {}", e);
            Uuid::new_v4().to_string()
        }
    };
    let mut app = App::new(user_id);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);
    spawn_input_thread(tx.clone());

    let result = run(&mut terminal, &mut app, &client, &tx, &mut rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

/// Forward terminal input into the event channel from a blocking thread.
fn spawn_input_thread(tx: mpsc::Sender<AppEvent>) {
    std::thread::spawn(move || loop {
        let ready = crossterm::event::poll(Duration::from_millis(100)).unwrap_or(false);
        let event = if ready {
            match crossterm::event::read() {
                Ok(Event::Key(key)) => AppEvent::Input(key),
                _ => AppEvent::Tick,
            }
        } else {
            AppEvent::Tick
        };
        if tx.blocking_send(event).is_err() {
            break;
        }
    });
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: &Arc<ApiClient>,
    tx: &mpsc::Sender<AppEvent>,
    rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;
        let Some(event) = rx.recv().await else {
            break;
        };
        match event {
            AppEvent::Input(key) => handle_key(app, key, client, tx),
            AppEvent::Tick => {}
            AppEvent::Turn(outcome) => app.transcript.resolve_turn(outcome),
        }
        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent, client: &Arc<ApiClient>, tx: &mpsc::Sender<AppEvent>) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Enter => submit(app, client, tx),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => app.input.push(c),
        _ => {}
    }
}

/// Begin a turn if the transcript allows it and send it in the background.
/// The in-flight call is never cancelled; the busy flag only blocks a second
/// concurrent submit.
fn submit(app: &mut App, client: &Arc<ApiClient>, tx: &mpsc::Sender<AppEvent>) {
    let Some(user_msg) = app.transcript.begin_turn(&app.input) else {
        return;
    };
    app.input.clear();

    let client = Arc::clone(client);
    let tx = tx.clone();
    let user_id = app.user_id.clone();
    tokio::spawn(async move {
        let outcome = match client.send(&user_id, &user_msg.content).await {
            Ok(reply) => TurnOutcome::Reply(reply),
            Err(SendError::Handler(error)) => TurnOutcome::Failed(format!("❌ Error: {}", error)),
            Err(SendError::Transport(error)) => {
                log::debug!("send failed: {}", error);
                TurnOutcome::Failed("❌ Failed to send message".to_string())
            }
        };
        let _ = tx.send(AppEvent::Turn(outcome)).await;
    });
}
