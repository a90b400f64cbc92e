mod backend;
mod build_info;
mod clock;
mod constants;
mod game;
mod reporter;
mod ui;

use backend::{BackendError, Credentials, HttpClaimBackend, DEFAULT_BACKEND_URL};
use clock::SimulationClock;
use constants::INPUT_POLL_MS;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use game::logic::{process_input, GameInput, SessionEvent};
use game::types::{ClaimStatus, GameSession};
use ratatui::{backend::CrosstermBackend, Terminal};
use reporter::{ReportOutcome, ScoreReporter};
use std::io;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

struct CliConfig {
    user_id: Option<String>,
    access_token: Option<String>,
    backend_url: String,
}

/// Parse command-line arguments. Missing credentials are fine: the session
/// runs unauthenticated and backend calls are skipped.
fn parse_args(args: &[String]) -> Result<CliConfig, String> {
    let mut config = CliConfig {
        user_id: None,
        access_token: None,
        backend_url: DEFAULT_BACKEND_URL.to_string(),
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--user-id" => {
                config.user_id = Some(
                    iter.next()
                        .ok_or("--user-id requires a value")?
                        .to_string(),
                );
            }
            "--access-token" => {
                config.access_token = Some(
                    iter.next()
                        .ok_or("--access-token requires a value")?
                        .to_string(),
                );
            }
            "--backend-url" => {
                config.backend_url = iter
                    .next()
                    .ok_or("--backend-url requires a value")?
                    .to_string();
            }
            "--version" | "-v" => {
                println!(
                    "flappy-rewards {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Flappy Rewards - Terminal Flappy Bird with a rewards backend\n");
                println!("Usage: flappy-rewards [options]\n");
                println!("Options:");
                println!("  --user-id <id>        User for claim/score calls");
                println!("  --access-token <tok>  Access token for claim/score calls");
                println!("  --backend-url <url>   Rewards backend base URL");
                println!("  --version             Show version information");
                println!("  --help                Show this help message");
                std::process::exit(0);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }
    Ok(config)
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'flappy-rewards --help' for usage.");
            std::process::exit(1);
        }
    };

    let creds = match (config.user_id, config.access_token) {
        (Some(user_id), Some(access_token)) => Some(Credentials {
            user_id,
            access_token,
        }),
        _ => None,
    };
    let reporter = Arc::new(ScoreReporter::new(
        HttpClaimBackend::new(config.backend_url),
        creds,
    ));

    let mut session = GameSession::new();
    let mut clock = SimulationClock::new();
    let mut rng = rand::thread_rng();

    // Claim status is fetched once per session, in the background; gameplay
    // never waits on it.
    type ClaimCheckResult = Option<(ClaimStatus, Option<BackendError>)>;
    let mut claim_check: Option<JoinHandle<ClaimCheckResult>> = if reporter.authenticated() {
        let reporter = Arc::clone(&reporter);
        Some(std::thread::spawn(move || reporter.fetch_claim()))
    } else {
        session
            .log
            .add_entry("Playing unauthenticated; score will not be submitted.".to_string());
        None
    };
    let mut score_submit: Option<JoinHandle<ReportOutcome>> = None;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let crossterm_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(crossterm_backend)?;

    loop {
        // Harvest finished background calls. Completion only ever writes
        // claim bookkeeping; it can never restart or end a session.
        if let Some(handle) = claim_check.take() {
            if handle.is_finished() {
                if let Ok(Some((status, error))) = handle.join() {
                    session.claim = Some(status);
                    let line = match error {
                        Some(err) => format!("Claim check unavailable ({})", err),
                        None if status.has_claimed => {
                            "Reward already claimed for this session.".to_string()
                        }
                        None => "Reward available for this session.".to_string(),
                    };
                    session.log.add_entry(line);
                }
            } else {
                claim_check = Some(handle);
            }
        }
        if let Some(handle) = score_submit.take() {
            if handle.is_finished() {
                if let Ok(outcome) = handle.join() {
                    if let ReportOutcome::Submitted { tokens } = outcome {
                        let claim = session.claim.get_or_insert(ClaimStatus {
                            has_claimed: false,
                            tokens_earned: 0,
                        });
                        claim.tokens_earned = tokens;
                    }
                    session.log.add_entry(outcome.log_line());
                }
            } else {
                score_submit = Some(handle);
            }
        }

        terminal.draw(|frame| ui::game_scene::render(frame, &session))?;

        let mut events: Vec<SessionEvent> = Vec::new();

        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            match event::read()? {
                Event::Key(key_event) => match key_event.code {
                    KeyCode::Char(' ') => {
                        events.extend(process_input(&mut session, GameInput::Impulse));
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                        process_input(&mut session, GameInput::Replay);
                    }
                    KeyCode::Char('e') | KeyCode::Char('E') => {
                        if session.state.exit_allowed {
                            break;
                        }
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        break;
                    }
                    _ => {
                        process_input(&mut session, GameInput::Other);
                    }
                },
                Event::Mouse(mouse_event) => {
                    if matches!(mouse_event.kind, MouseEventKind::Down(_)) {
                        events.extend(process_input(&mut session, GameInput::Impulse));
                    }
                }
                _ => {}
            }
        }

        events.extend(clock.advance(&mut session, Instant::now(), &mut rng));

        for event in events {
            match event {
                SessionEvent::Ended { final_score } => {
                    session
                        .log
                        .add_entry(format!("Game over! Final score: {}", final_score));
                    // Exactly once per entry to game over.
                    if let Some(score) = session.begin_score_report() {
                        let reporter = Arc::clone(&reporter);
                        let claim = session.claim;
                        score_submit = Some(std::thread::spawn(move || {
                            reporter.report_score(claim.as_ref(), score)
                        }));
                    }
                }
                SessionEvent::ExitUnlocked => {
                    session.log.add_entry("Exit unlocked.".to_string());
                }
                SessionEvent::Scored { .. } => {}
            }
        }
    }

    // Cleanup: release every timer before tearing down the terminal.
    clock.halt();
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    println!("Final score: {}", session.state.score);

    Ok(())
}
