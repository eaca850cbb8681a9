mod app;
mod config;
mod predictor;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use predictor::{DEFAULT_COUNTRY, DEFAULT_YEAR};

#[derive(Parser, Debug)]
#[command(name = "inflacast")]
#[command(version = "0.1.0")]
#[command(about = "A terminal demo page for the Worldwide Inflation Predictor")]
struct Args {
    /// Print one prediction and exit (no TUI)
    #[arg(short, long)]
    predict: bool,

    /// Country to predict for
    #[arg(short, long)]
    country: Option<String>,

    /// Year to predict for
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(2000..=2050))]
    year: Option<u16>,

    /// Output the prediction as JSON (for scripts)
    #[arg(short, long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Handle CLI-only mode
    if args.predict {
        return print_prediction(&args);
    }

    // Run TUI
    run_tui()
}

fn print_prediction(args: &Args) -> Result<()> {
    let country = args.country.as_deref().unwrap_or(DEFAULT_COUNTRY);
    let year = args.year.unwrap_or(DEFAULT_YEAR);

    let prediction = predictor::predict(country, year);

    if args.json {
        let output = serde_json::json!({
            "country": prediction.country,
            "year": prediction.year,
            "prediction": prediction.rate,
            "text": prediction.display_line(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", prediction.display_line());
    }
    Ok(())
}

fn run_tui() -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new()?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Persist last inputs (if enabled), then restore terminal
    app.save_session();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.quit_on_q() => return Ok(()),
                        KeyCode::Esc if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c')
                            if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                        {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key) {
                                app.status_message = Some(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        // Periodic housekeeping (status message timeout)
        let _ = app.tick();
    }
}
