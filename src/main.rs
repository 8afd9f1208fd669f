mod app;
mod booking;
mod config;
mod error;
mod registry;
mod seed;
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

use app::{App, InputMode, Popup};
use config::{AppConfig, FileStore, KeyValueStore, MemoryStore};
use registry::airline::{AirlineCriteria, AirlineStatus, ComplianceClass};
use registry::airport::{AirportCriteria, AirportStatus, CityCriteria};
use registry::{Choice, Criteria};
use theme::{ThemeName, ThemeStore};

#[derive(Parser, Debug)]
#[command(name = "skydesk")]
#[command(version = "0.1.0")]
#[command(about = "Terminal console for airline administration and flight booking")]
struct Args {
    /// Save a theme (light, dark, green, yellow, maroon) and exit
    #[arg(short, long)]
    theme: Option<String>,

    /// Print a listing as JSON and exit (airlines, airports, cities, flights)
    #[arg(short, long)]
    list: Option<String>,

    /// Free-text search applied to --list
    #[arg(short, long, default_value = "")]
    query: String,

    /// Status filter for --list airlines/airports
    #[arg(short, long)]
    status: Option<String>,

    /// Compliance filter for --list airlines
    #[arg(short, long)]
    compliance: Option<String>,

    /// Country filter for --list airports
    #[arg(long)]
    country: Option<String>,

    /// Passenger count for the traveler form
    #[arg(short, long)]
    passengers: Option<usize>,
}

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the TUI or JSON output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load()?;
    if let Some(n) = args.passengers {
        config.passenger_count = n.max(1);
    }

    if let Some(ref name) = args.theme {
        return save_theme(&config, name);
    }

    if let Some(ref kind) = args.list {
        let listing = listing_json(kind, &args)?;
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    run_tui(&config)
}

/// Preference store for the theme, in memory if the config dir is unusable
fn open_store() -> Box<dyn KeyValueStore> {
    match FileStore::open_default() {
        Ok(store) => {
            tracing::debug!("Preferences at {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("Preferences will not persist: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn save_theme(config: &AppConfig, name: &str) -> Result<()> {
    let theme: ThemeName = name.parse()?;
    // The CLI only exists to persist, so no in-memory fallback here
    let file = FileStore::open_default()?;
    let mut store = ThemeStore::load(Box::new(file), config.theme_storage_key.clone(), config.default_theme);
    store.set_theme(theme)?;
    println!("Theme set to {}", theme.label());
    Ok(())
}

fn choice<T: std::str::FromStr<Err = error::Error>>(value: Option<&str>) -> Result<Choice<T>> {
    Ok(match value {
        Some(v) => Choice::Only(v.parse()?),
        None => Choice::All,
    })
}

fn listing_json(kind: &str, args: &Args) -> Result<serde_json::Value> {
    let value = match kind.trim().to_lowercase().as_str() {
        "airlines" => {
            let criteria = AirlineCriteria {
                query: args.query.clone(),
                status: choice::<AirlineStatus>(args.status.as_deref())?,
                compliance: choice::<ComplianceClass>(args.compliance.as_deref())?,
            };
            let airlines = seed::airlines();
            serde_json::to_value(registry::filter(&airlines, &criteria))?
        }
        "airports" => {
            let criteria = AirportCriteria {
                query: args.query.clone(),
                country: args.country.clone().map(Choice::Only).unwrap_or_default(),
                status: choice::<AirportStatus>(args.status.as_deref())?,
            };
            let airports = seed::airports();
            serde_json::to_value(registry::filter(&airports, &criteria))?
        }
        "cities" => {
            let criteria = CityCriteria {
                query: args.query.clone(),
            };
            let cities = seed::cities();
            serde_json::to_value(registry::filter(&cities, &criteria))?
        }
        "flights" => {
            let flights = seed::flights();
            let filters = booking::search::FlightFilters::default();
            let hits: Vec<_> = flights
                .iter()
                .filter(|f| {
                    filters.admits(f)
                        && registry::matches_query(&args.query, &[f.airline_name.as_str(), f.flight_number.as_str()])
                })
                .collect();
            serde_json::to_value(hits)?
        }
        _ => return Err(error::Error::UnknownListing(kind.to_string()).into()),
    };
    Ok(value)
}

fn run_tui(config: &AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let today = chrono::Local::now().date_naive();
    let mut app = App::new(config, open_store(), today);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
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
                        KeyCode::Char('q') if app.popup == Popup::None && app.input_mode == InputMode::Normal => {
                            return Ok(())
                        }
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Surface errors in the info line instead of tearing down the terminal
                            if let Err(e) = app.handle_key(key) {
                                app.status_message = Some(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        app.tick();
    }
}
