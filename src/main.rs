//! Terminal shim: login prompt, raw-mode guard, key mapping and the event
//! loop wiring the handler to the API worker and the renderer.

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use sds_console::api::{ApiClient, RequestSpec};
use sds_console::app::{handle_event, Action, AppState, Event, FilterFocus, InputMode};
use sds_console::domain::error::{ConsoleError, Result};
use sds_console::infrastructure::paths;
use sds_console::net::ApiWorker;
use sds_console::observability::init_tracing;
use sds_console::storage::{FileTokenStore, TokenStore};
use sds_console::{ui, Config};
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;
use url::Url;

const LOGIN_PATH: &str = "/api/v1/auth/login";

/// Why the console loop ended.
enum Outcome {
    Quit,
    Logout,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sds-console: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::load()?;
    // Logging is best-effort; an unwritable data dir must not block startup.
    if let Err(e) = init_tracing(&config.trace_level) {
        eprintln!("sds-console: logging disabled: {e}");
    }
    let base = config.base()?;
    let mut store = FileTokenStore::new(paths::token_file());

    loop {
        let token = match store.load()? {
            Some(token) => token,
            None => match login_prompt(&base)? {
                Some(token) => {
                    store.save(&token)?;
                    token
                }
                None => return Ok(()),
            },
        };

        match run_console(&config, base.clone(), token)? {
            Outcome::Quit => return Ok(()),
            Outcome::Logout => store.clear()?,
        }
    }
}

/// Prompts for credentials on the plain terminal and exchanges them for a
/// token. Returns `None` when the operator aborts the prompt.
fn login_prompt(base: &Url) -> Result<Option<String>> {
    let client = ApiClient::new(base.clone(), None)?;
    let stdin = io::stdin();

    loop {
        print!("Логин: ");
        io::stdout().flush()?;
        let mut login = String::new();
        if stdin.lock().read_line(&mut login)? == 0 {
            return Ok(None);
        }
        let login = login.trim();
        if login.is_empty() {
            continue;
        }

        print!("Пароль: ");
        io::stdout().flush()?;
        let Some(password) = read_password()? else {
            println!();
            return Ok(None);
        };
        println!();

        let spec = RequestSpec {
            body: Some(json!({ "login": login, "password": password })),
            method: reqwest::Method::POST,
            ..RequestSpec::get(LOGIN_PATH)
        };

        match block_on(client.call(&spec))? {
            Ok(value) => {
                let token = value
                    .get("access_token")
                    .or_else(|| value.get("token"))
                    .and_then(|t| t.as_str());
                match token {
                    Some(token) => return Ok(Some(token.to_string())),
                    None => println!("Сервер не вернул токен."),
                }
            }
            Err(failure) => println!("{}", failure.detail_message()),
        }
    }
}

/// Reads a line without echo. `None` on Esc or Ctrl-C.
fn read_password() -> Result<Option<String>> {
    terminal::enable_raw_mode()?;
    let result = read_password_raw();
    terminal::disable_raw_mode()?;
    result
}

fn read_password_raw() -> Result<Option<String>> {
    let mut password = String::new();
    loop {
        if let event::Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => return Ok(Some(password)),
                KeyCode::Esc => return Ok(None),
                KeyCode::Backspace => {
                    password.pop();
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None)
                }
                KeyCode::Char(c) => password.push(c),
                _ => {}
            }
        }
    }
}

fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ConsoleError::Worker(format!("failed to build runtime: {e}")))?;
    Ok(runtime.block_on(future))
}

/// Restores the terminal on drop, including on panics and `?` exits.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// The console session proper: runs until quit or logout.
fn run_console(config: &Config, base: Url, token: String) -> Result<Outcome> {
    let client = ApiClient::new(base, Some(token))?;
    let worker = ApiWorker::spawn(client)?;
    let mut state = AppState::new(config.resolve_theme());

    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();
    let mut pending = vec![Event::Start];
    let mut dirty = false;

    loop {
        while let Some(outcome) = worker.try_recv() {
            pending.push(Event::Api(outcome));
        }

        for event in pending.drain(..) {
            let (needs_render, actions) = handle_event(&mut state, &event)?;
            dirty |= needs_render;
            for action in actions {
                match action {
                    Action::CallApi(request) => worker.submit(request)?,
                    Action::Quit => return Ok(Outcome::Quit),
                    Action::Logout | Action::ReturnToLogin => return Ok(Outcome::Logout),
                }
            }
        }

        if dirty {
            let (cols, rows) = terminal::size()?;
            let frame = ui::render(&state, rows as usize, cols as usize);
            stdout.write_all(frame.as_bytes())?;
            stdout.flush()?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(mapped) = map_key(&state, &key) {
                        pending.push(mapped);
                    }
                }
                // Repaint at the new size on the next pass.
                event::Event::Resize(..) => dirty = true,
                _ => {}
            }
        }
    }
}

/// Translates a key press into a semantic event, depending on what currently
/// has focus: the modal, the filter or the section.
fn map_key(state: &AppState, key: &KeyEvent) -> Option<Event> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Event::Quit);
    }

    if state.modal.is_some() {
        return match key.code {
            KeyCode::Esc => Some(Event::Escape),
            KeyCode::Enter => Some(Event::Submit),
            KeyCode::Tab | KeyCode::Down => Some(Event::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Event::PrevField),
            KeyCode::Left => Some(Event::PrevOption),
            KeyCode::Right => Some(Event::NextOption),
            KeyCode::Backspace => Some(Event::Backspace),
            KeyCode::Char(c) => Some(Event::Char(c)),
            _ => None,
        };
    }

    match state.input_mode {
        InputMode::Filter(FilterFocus::Typing) => match key.code {
            KeyCode::Esc => Some(Event::Escape),
            KeyCode::Enter => Some(Event::Submit),
            KeyCode::Backspace => Some(Event::Backspace),
            KeyCode::Char(c) => Some(Event::Char(c)),
            _ => None,
        },
        InputMode::Filter(FilterFocus::Navigating) => match key.code {
            KeyCode::Esc => Some(Event::Escape),
            KeyCode::Char('/') => Some(Event::EnterFilter),
            KeyCode::Char('j') | KeyCode::Down => Some(Event::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Event::MoveUp),
            KeyCode::Enter => Some(Event::Submit),
            KeyCode::Char('q') => Some(Event::Quit),
            _ => None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(Event::Quit),
            KeyCode::Char('L') => Some(Event::Logout),
            KeyCode::Char('j') | KeyCode::Down => Some(Event::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Event::MoveUp),
            KeyCode::Char('h') | KeyCode::Left => Some(Event::PrevSection),
            KeyCode::Char('l') | KeyCode::Right => Some(Event::NextSection),
            KeyCode::Char(c @ '1'..='7') => {
                Some(Event::JumpSection(c.to_digit(10)? as usize))
            }
            KeyCode::Char('a') => Some(Event::Add),
            KeyCode::Char('e') => Some(Event::Edit),
            KeyCode::Char('p') => Some(Event::SetPassword),
            KeyCode::Char('d') => Some(Event::Deactivate),
            KeyCode::Char('r') => Some(Event::Refresh),
            KeyCode::Char('/') => Some(Event::EnterFilter),
            KeyCode::Enter => Some(Event::Submit),
            _ => None,
        },
    }
}
