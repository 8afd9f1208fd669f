use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

use crate::booking::search::{self, Flight, FlightFilters, SortKey, SortOrder};
use crate::booking::traveler::{
    ContactField, FieldKey, TravelerField, TravelerForm, TravelerKind, ValidationErrors,
};
use crate::config::{AppConfig, KeyValueStore};
use crate::registry::airline::{Airline, AirlineCriteria, AirlineRegistry, AirlineStatus, ComplianceClass};
use crate::registry::airport::{self, Airport, AirportCriteria, AirportStatus, City, CityCriteria};
use crate::registry::{self, cycle_choice, Choice};
use crate::seed;
use crate::theme::{ThemeName, ThemeStore};

/// Status messages clear after this long
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirlineView {
    List,
    Pending,
    Suspended,
    Compliance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirportView {
    Airports,
    Cities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Airlines(AirlineView),
    Airports(AirportView),
    Flights,
    Travelers,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Overview,
        Section::Airlines(AirlineView::List),
        Section::Airlines(AirlineView::Pending),
        Section::Airlines(AirlineView::Suspended),
        Section::Airlines(AirlineView::Compliance),
        Section::Airports(AirportView::Airports),
        Section::Airports(AirportView::Cities),
        Section::Flights,
        Section::Travelers,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Overview => "Platform Overview",
            Section::Airlines(_) => "Airline Management",
            Section::Airports(_) => "Airport & City Management",
            Section::Flights => "Flight Search Results",
            Section::Travelers => "Traveler Details",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Section::Overview => "Complete platform oversight and management",
            Section::Airlines(_) => "Manage airline registrations, compliance, and operations",
            Section::Airports(_) => "Maintain airport data, codes, and infrastructure",
            Section::Flights => "Filter and sort available flights",
            Section::Travelers => "Who is flying and how to reach them",
        }
    }

    /// Sidebar label
    pub fn label(self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Airlines(AirlineView::List) => "All Airlines",
            Section::Airlines(AirlineView::Pending) => "Pending Approval",
            Section::Airlines(AirlineView::Suspended) => "Suspended",
            Section::Airlines(AirlineView::Compliance) => "Compliance",
            Section::Airports(AirportView::Airports) => "Airports",
            Section::Airports(AirportView::Cities) => "Cities",
            Section::Flights => "Flight Search",
            Section::Travelers => "Travelers",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.position();
        Self::ALL[idx.checked_sub(1).unwrap_or(Self::ALL.len() - 1)]
    }

    /// Sections with a free-text search box
    pub fn searchable(self) -> bool {
        matches!(self, Section::Airlines(_) | Section::Airports(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
    Confirm,
    ThemePicker,
    Details,
}

/// Destructive action waiting on the confirm popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Reject(String),
    Suspend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    EditField,
}

pub struct App {
    pub section: Section,
    pub popup: Popup,
    pub input_mode: InputMode,

    pub theme: ThemeStore,
    pub theme_selected: usize,

    // Admin registries
    pub airlines: AirlineRegistry,
    pub airline_criteria: AirlineCriteria,
    pub airports: Vec<Airport>,
    pub airport_criteria: AirportCriteria,
    pub cities: Vec<City>,
    pub city_criteria: CityCriteria,

    // Booking screens
    pub flights: Vec<Flight>,
    pub flight_filters: FlightFilters,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub form: TravelerForm,
    pub form_cursor: usize,
    pub validation: ValidationErrors,

    // Row selection within the current list
    pub selected: usize,

    pub input_buffer: String,
    pub pending_action: Option<PendingAction>,

    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    /// Date ages are computed against
    pub today: NaiveDate,
}

impl App {
    pub fn new(config: &AppConfig, store: Box<dyn KeyValueStore>, today: NaiveDate) -> Self {
        let theme = ThemeStore::load(store, config.theme_storage_key.clone(), config.default_theme);

        Self {
            section: Section::Overview,
            popup: Popup::None,
            input_mode: InputMode::Normal,

            theme_selected: ThemeName::ALL.iter().position(|t| *t == theme.theme()).unwrap_or(0),
            theme,

            airlines: AirlineRegistry::new(seed::airlines()),
            airline_criteria: AirlineCriteria::default(),
            airports: seed::airports(),
            airport_criteria: AirportCriteria::default(),
            cities: seed::cities(),
            city_criteria: CityCriteria::default(),

            flights: seed::flights(),
            flight_filters: FlightFilters::default(),
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
            form: TravelerForm::new(config.passenger_count),
            form_cursor: 0,
            validation: ValidationErrors::new(),

            selected: 0,

            input_buffer: String::new(),
            pending_action: None,

            status_message: None,
            status_message_time: None,

            today,
        }
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    // ===== Derived views =====

    /// Criteria actually applied in the current airline view. The status
    /// picker only exists in the list view; every other view fixes it.
    pub fn effective_airline_criteria(&self) -> AirlineCriteria {
        let mut criteria = self.airline_criteria.clone();
        criteria.status = match self.section {
            Section::Airlines(AirlineView::List) => criteria.status,
            Section::Airlines(AirlineView::Pending) => Choice::Only(AirlineStatus::Pending),
            Section::Airlines(AirlineView::Suspended) => Choice::Only(AirlineStatus::Suspended),
            _ => Choice::All,
        };
        criteria
    }

    pub fn visible_airlines(&self) -> Vec<&Airline> {
        self.airlines.filtered(&self.effective_airline_criteria())
    }

    pub fn visible_airports(&self) -> Vec<&Airport> {
        registry::filter(&self.airports, &self.airport_criteria)
    }

    pub fn visible_cities(&self) -> Vec<&City> {
        registry::filter(&self.cities, &self.city_criteria)
    }

    pub fn visible_flights(&self) -> Vec<&Flight> {
        search::search(&self.flights, &self.flight_filters, self.sort_key, self.sort_order)
    }

    /// Editable rows of the traveler form, in display order
    pub fn form_rows(&self) -> Vec<FieldKey> {
        let travelers = (0..self.form.travelers().len())
            .flat_map(|index| TravelerField::ALL.into_iter().map(move |field| FieldKey::Traveler { index, field }));
        let contact = ContactField::ALL.into_iter().map(FieldKey::Contact);
        travelers.chain(contact).collect()
    }

    pub fn form_value(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Traveler { index, field } => self
                .form
                .travelers()
                .get(index)
                .map(|t| t.field(field))
                .unwrap_or(""),
            FieldKey::Contact(field) => self.form.contact().field(field),
        }
    }

    fn visible_len(&self) -> usize {
        match self.section {
            Section::Overview => 0,
            Section::Airlines(_) => self.visible_airlines().len(),
            Section::Airports(AirportView::Airports) => self.visible_airports().len(),
            Section::Airports(AirportView::Cities) => self.visible_cities().len(),
            Section::Flights => self.visible_flights().len(),
            Section::Travelers => self.form_rows().len(),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if self.section == Section::Travelers {
            self.form_cursor = self.form_cursor.min(len.saturating_sub(1));
        } else {
            self.selected = self.selected.min(len.saturating_sub(1));
        }
    }

    pub fn selected_airline(&self) -> Option<&Airline> {
        self.visible_airlines().get(self.selected).copied()
    }

    pub fn selected_airport(&self) -> Option<&Airport> {
        self.visible_airports().get(self.selected).copied()
    }

    // ===== Key handling =====

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.input_mode {
            InputMode::Search => return self.handle_search_key(key),
            InputMode::EditField => return self.handle_edit_key(key),
            InputMode::Normal => {}
        }

        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }

        self.handle_normal_key(key)
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab => self.switch_section(self.section.next()),
            KeyCode::BackTab => self.switch_section(self.section.prev()),

            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),

            KeyCode::Char('/') if self.section.searchable() => {
                self.input_buffer = self.current_query().to_string();
                self.input_mode = InputMode::Search;
            }

            KeyCode::Char('t') => {
                self.theme_selected = ThemeName::ALL
                    .iter()
                    .position(|t| *t == self.theme.theme())
                    .unwrap_or(0);
                self.popup = Popup::ThemePicker;
            }

            KeyCode::Char('T') => self.apply_theme(self.theme.theme().next()),

            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,

            KeyCode::Esc => {
                self.status_message = None;
                self.status_message_time = None;
            }

            _ => match self.section {
                Section::Airlines(_) => self.handle_airline_key(key)?,
                Section::Airports(_) => self.handle_airport_key(key),
                Section::Flights => self.handle_flight_key(key),
                Section::Travelers => self.handle_traveler_key(key),
                Section::Overview => {}
            },
        }
        Ok(())
    }

    fn handle_airline_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('s') if self.section == Section::Airlines(AirlineView::List) => {
                self.airline_criteria.status = cycle_choice(&self.airline_criteria.status, &AirlineStatus::ALL);
                self.clamp_selection();
            }
            KeyCode::Char('c') => {
                self.airline_criteria.compliance =
                    cycle_choice(&self.airline_criteria.compliance, &ComplianceClass::ALL);
                self.clamp_selection();
            }
            KeyCode::Char('a') => self.approve_selected(),
            KeyCode::Char('x') => self.request_action(PendingAction::Reject, "Reject"),
            KeyCode::Char('u') => self.request_action(PendingAction::Suspend, "Suspend"),
            KeyCode::Enter => {
                if self.selected_airline().is_some() {
                    self.popup = Popup::Details;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_airport_key(&mut self, key: KeyEvent) {
        if self.section != Section::Airports(AirportView::Airports) {
            return;
        }

        match key.code {
            KeyCode::Char('s') => {
                self.airport_criteria.status = cycle_choice(&self.airport_criteria.status, &AirportStatus::ALL);
                self.clamp_selection();
            }
            KeyCode::Char('c') => {
                let countries = airport::countries(&self.airports);
                self.airport_criteria.country = cycle_choice(&self.airport_criteria.country, &countries);
                self.clamp_selection();
            }
            KeyCode::Enter => {
                if self.selected_airport().is_some() {
                    self.popup = Popup::Details;
                }
            }
            _ => {}
        }
    }

    fn handle_flight_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('o') => self.sort_key = self.sort_key.next(),
            KeyCode::Char('O') => self.sort_order = self.sort_order.flip(),
            KeyCode::Char('p') => self.flight_filters.stops = self.flight_filters.stops.next(),
            KeyCode::Char('d') => self.flight_filters.departure = self.flight_filters.departure.next(),
            KeyCode::Char('a') => self.flight_filters.arrival = self.flight_filters.arrival.next(),
            KeyCode::Char('r') => self.flight_filters.refundable_only = !self.flight_filters.refundable_only,
            KeyCode::Char('f') => {
                let code = self.visible_flights().get(self.selected).map(|f| f.airline_code.clone());
                if let Some(code) = code {
                    self.flight_filters.toggle_airline(&code);
                }
            }
            KeyCode::Char('C') => {
                self.flight_filters.clear();
                self.set_status("Filters cleared");
            }
            _ => return,
        }
        self.clamp_selection();
    }

    fn handle_traveler_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if let Some(row) = self.form_rows().get(self.form_cursor).copied() {
                    self.input_buffer = self.form_value(row).to_string();
                    self.input_mode = InputMode::EditField;
                }
            }
            KeyCode::Char('+') => self.add_traveler(TravelerKind::Adult),
            KeyCode::Char('c') => self.add_traveler(TravelerKind::Child),
            KeyCode::Char('i') => self.add_traveler(TravelerKind::Infant),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_current_traveler(),
            KeyCode::Char('v') => {
                self.validation = self.form.validate();
                if self.validation.is_empty() {
                    self.set_status("Traveler details complete");
                } else {
                    self.set_status(format!("{} field(s) need attention", self.validation.len()));
                }
            }
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::Help | Popup::Details => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')
                ) {
                    self.popup = Popup::None;
                }
            }
            Popup::Confirm => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.confirm_action();
                    self.popup = Popup::None;
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.pending_action = None;
                    self.status_message = None;
                    self.popup = Popup::None;
                }
                _ => {}
            },
            Popup::ThemePicker => match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    self.theme_selected = (self.theme_selected + 1) % ThemeName::ALL.len();
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.theme_selected = self
                        .theme_selected
                        .checked_sub(1)
                        .unwrap_or(ThemeName::ALL.len() - 1);
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let chosen = ThemeName::ALL[self.theme_selected % ThemeName::ALL.len()];
                    self.apply_theme(chosen);
                    self.popup = Popup::None;
                }
                KeyCode::Esc | KeyCode::Char('q') => self.popup = Popup::None,
                _ => {}
            },
            Popup::None => {}
        }
        Ok(())
    }

    /// Live search: the query is written through on every keystroke
    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.set_query(String::new());
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.set_query(self.input_buffer.clone());
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
                self.set_query(self.input_buffer.clone());
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                let value = std::mem::take(&mut self.input_buffer);
                if let Some(row) = self.form_rows().get(self.form_cursor).copied() {
                    self.write_form_value(row, value);
                }
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => self.input_buffer.push(c),
            _ => {}
        }
        Ok(())
    }

    // ===== Actions =====

    fn switch_section(&mut self, section: Section) {
        self.section = section;
        self.selected = 0;
        self.clamp_selection();
    }

    fn move_down(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        if self.section == Section::Travelers {
            self.form_cursor = (self.form_cursor + 1) % len;
        } else {
            self.selected = (self.selected + 1) % len;
        }
    }

    fn move_up(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        if self.section == Section::Travelers {
            self.form_cursor = self.form_cursor.checked_sub(1).unwrap_or(len - 1);
        } else {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    pub fn current_query(&self) -> &str {
        match self.section {
            Section::Airlines(_) => &self.airline_criteria.query,
            Section::Airports(AirportView::Airports) => &self.airport_criteria.query,
            Section::Airports(AirportView::Cities) => &self.city_criteria.query,
            _ => "",
        }
    }

    fn set_query(&mut self, query: String) {
        match self.section {
            Section::Airlines(_) => self.airline_criteria.query = query,
            Section::Airports(AirportView::Airports) => self.airport_criteria.query = query,
            Section::Airports(AirportView::Cities) => self.city_criteria.query = query,
            _ => return,
        }
        self.clamp_selection();
    }

    pub fn apply_theme(&mut self, theme: ThemeName) {
        match self.theme.set_theme(theme) {
            Ok(()) => self.set_status(format!("Theme: {}", theme.label())),
            Err(e) => self.set_status(format!("Theme applied but not saved: {}", e)),
        }
    }

    fn approve_selected(&mut self) {
        let Some(airline) = self.selected_airline() else {
            return;
        };
        if airline.status == AirlineStatus::Active {
            return;
        }

        let (id, name) = (airline.id.clone(), airline.name.clone());
        if self.airlines.approve(&id) {
            self.set_status(format!("Approved '{}'", name));
            self.clamp_selection();
        }
    }

    fn request_action(&mut self, make: impl FnOnce(String) -> PendingAction, verb: &str) {
        let Some(airline) = self.selected_airline() else {
            return;
        };

        let prompt = format!("{} '{}'? (y/n)", verb, airline.name);
        let id = airline.id.clone();
        self.pending_action = Some(make(id));
        self.set_status(prompt);
        self.popup = Popup::Confirm;
    }

    /// Run the action the user just confirmed
    pub fn confirm_action(&mut self) {
        let Some(action) = self.pending_action.take() else {
            return;
        };

        let id = match &action {
            PendingAction::Reject(id) | PendingAction::Suspend(id) => id.clone(),
        };
        let Some(name) = self.airlines.get(&id).map(|a| a.name.clone()) else {
            self.set_status("Airline no longer exists");
            return;
        };

        match action {
            PendingAction::Reject(_) => {
                self.airlines.reject(&id);
                self.set_status(format!("Rejected '{}'", name));
            }
            PendingAction::Suspend(_) => {
                self.airlines.suspend(&id);
                self.set_status(format!("Suspended '{}'", name));
            }
        }
        self.clamp_selection();
    }

    fn add_traveler(&mut self, kind: TravelerKind) {
        if self.form.add(kind) {
            self.set_status(format!("Added {} traveler", kind.label().to_lowercase()));
        } else {
            self.set_status(format!(
                "All {} passenger seat(s) already have travelers",
                self.form.passenger_count()
            ));
        }
    }

    fn remove_current_traveler(&mut self) {
        let Some(FieldKey::Traveler { index, .. }) = self.form_rows().get(self.form_cursor).copied() else {
            return;
        };

        if self.form.remove(index) {
            self.validation.clear();
            self.set_status(format!("Removed traveler {}", index + 1));
            self.clamp_selection();
        } else {
            self.set_status("At least one traveler is required");
        }
    }

    fn write_form_value(&mut self, key: FieldKey, value: String) {
        match key {
            FieldKey::Traveler { index, field } => {
                self.form.update(index, field, value);
            }
            FieldKey::Contact(field) => self.form.update_contact(field, value),
        }
        // Clear the inline message for this field once it has been touched
        self.validation.remove(&key);
    }

    /// Periodic housekeeping from the event loop
    pub fn tick(&mut self) {
        if let Some(t) = self.status_message_time {
            if t.elapsed() >= STATUS_TIMEOUT && self.popup != Popup::Confirm {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryStore;
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        let config = AppConfig {
            passenger_count: 2,
            ..AppConfig::default()
        };
        App::new(&config, Box::new(MemoryStore::new()), NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn goto(app: &mut App, section: Section) {
        while app.section != section {
            press(app, KeyCode::Tab);
        }
    }

    #[test]
    fn test_sections_cycle_through_all() {
        let mut app = app();
        let mut seen = vec![app.section];
        for _ in 0..Section::ALL.len() - 1 {
            press(&mut app, KeyCode::Tab);
            seen.push(app.section);
        }
        assert_eq!(seen, Section::ALL.to_vec());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.section, Section::Overview);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.section, Section::Travelers);
    }

    #[test]
    fn test_titles_follow_section_family() {
        assert_eq!(Section::Airlines(AirlineView::Compliance).title(), "Airline Management");
        assert_eq!(Section::Airports(AirportView::Cities).title(), "Airport & City Management");
    }

    #[test]
    fn test_live_search_filters_each_keystroke() {
        let mut app = app();
        goto(&mut app, Section::Airlines(AirlineView::List));

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Search);
        // every headquarters is in India
        type_str(&mut app, "indi");
        assert_eq!(app.visible_airlines().len(), 4);
        type_str(&mut app, "go");
        assert_eq!(app.visible_airlines().len(), 1);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.airline_criteria.query, "indig");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.visible_airlines().len(), 4);
    }

    #[test]
    fn test_pending_view_forces_status() {
        let mut app = app();
        goto(&mut app, Section::Airlines(AirlineView::Pending));
        let visible = app.visible_airlines();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].status, AirlineStatus::Pending);
    }

    #[test]
    fn test_approve_is_immediate() {
        let mut app = app();
        goto(&mut app, Section::Airlines(AirlineView::Pending));
        press(&mut app, KeyCode::Char('a'));

        assert_eq!(app.airlines.get("AL002").unwrap().status, AirlineStatus::Active);
        assert!(app.visible_airlines().is_empty());
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_reject_needs_confirmation() {
        let mut app = app();
        goto(&mut app, Section::Airlines(AirlineView::Pending));

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.popup, Popup::Confirm);
        assert_eq!(app.airlines.all().len(), 4);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.popup, Popup::None);
        assert_eq!(app.airlines.all().len(), 4);
        assert!(app.pending_action.is_none());

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.airlines.all().len(), 3);
        assert!(app.airlines.get("AL002").is_none());
        assert_eq!(app.status_message.as_deref(), Some("Rejected 'SkyWings Express'"));
    }

    #[test]
    fn test_confirm_for_vanished_airline() {
        let mut app = app();
        app.pending_action = Some(PendingAction::Suspend("AL999".to_string()));
        app.confirm_action();
        assert_eq!(app.status_message.as_deref(), Some("Airline no longer exists"));
        assert_eq!(app.airlines.all().len(), 4);
    }

    #[test]
    fn test_suspend_after_confirmation() {
        let mut app = app();
        goto(&mut app, Section::Airlines(AirlineView::List));

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.pending_action, Some(PendingAction::Suspend("AL001".to_string())));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.airlines.get("AL001").unwrap().status, AirlineStatus::Suspended);
    }

    #[test]
    fn test_status_filter_cycles_back_to_all() {
        let mut app = app();
        goto(&mut app, Section::Airlines(AirlineView::List));

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.airline_criteria.status, Choice::Only(AirlineStatus::Active));
        assert_eq!(app.visible_airlines().len(), 2);

        for _ in 0..AirlineStatus::ALL.len() {
            press(&mut app, KeyCode::Char('s'));
        }
        assert!(app.airline_criteria.status.is_all());
        assert_eq!(app.visible_airlines().len(), 4);
    }

    #[test]
    fn test_list_status_does_not_leak_into_compliance_view() {
        let mut app = app();
        goto(&mut app, Section::Airlines(AirlineView::List));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.visible_airlines().len(), 2);

        goto(&mut app, Section::Airlines(AirlineView::Compliance));
        assert!(app.airline_criteria.compliance.is_all());
        assert_eq!(app.visible_airlines().len(), 4);

        // Back in the list the picker value still applies
        goto(&mut app, Section::Airlines(AirlineView::List));
        assert_eq!(app.visible_airlines().len(), 2);
    }

    #[test]
    fn test_compliance_filter() {
        let mut app = app();
        goto(&mut app, Section::Airlines(AirlineView::Compliance));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.airline_criteria.compliance, Choice::Only(ComplianceClass::Compliant));
        assert!(app
            .visible_airlines()
            .iter()
            .all(|a| a.compliance_class() == ComplianceClass::Compliant));
    }

    #[test]
    fn test_airport_country_filter() {
        let mut app = app();
        goto(&mut app, Section::Airports(AirportView::Airports));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.airport_criteria.country, Choice::Only("India".to_string()));
        assert_eq!(app.visible_airports().len(), 4);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.visible_airports().len(), 1);
    }

    #[test]
    fn test_theme_picker_persists_choice() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.popup, Popup::ThemePicker);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.theme.theme(), ThemeName::Dark);
        assert_eq!(app.theme.stored_value().as_deref(), Some("dark"));
        assert_eq!(app.theme.markers().active_themes(), vec![ThemeName::Dark]);
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_quick_theme_cycle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('T'));
        assert_eq!(app.theme.theme(), ThemeName::Dark);
        press(&mut app, KeyCode::Char('T'));
        assert_eq!(app.theme.theme(), ThemeName::Green);
        assert_eq!(app.theme.markers().active_themes(), vec![ThemeName::Green]);
    }

    #[test]
    fn test_flight_sort_and_clear() {
        let mut app = app();
        goto(&mut app, Section::Flights);

        press(&mut app, KeyCode::Char('O'));
        let prices: Vec<u32> = app.visible_flights().iter().map(|f| f.price).collect();
        assert!(prices.windows(2).all(|w| w[0] >= w[1]));

        press(&mut app, KeyCode::Char('p'));
        assert!(app.visible_flights().iter().all(|f| f.stops == 0));

        press(&mut app, KeyCode::Char('C'));
        assert_eq!(app.flight_filters, FlightFilters::default());
    }

    #[test]
    fn test_traveler_form_editing() {
        let mut app = app();
        goto(&mut app, Section::Travelers);

        // cursor 1 is the first traveler's first name
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::EditField);
        type_str(&mut app, "Asha");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.form.travelers()[0].first_name, "Asha");
    }

    #[test]
    fn test_traveler_add_and_remove_keys() {
        let mut app = app();
        goto(&mut app, Section::Travelers);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.form.travelers().len(), 1);

        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.form.travelers().len(), 2);
        assert_eq!(app.form.travelers()[1].kind, TravelerKind::Infant);

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.form.travelers().len(), 2);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.form.travelers().len(), 1);
    }

    #[test]
    fn test_validation_clears_per_field() {
        let mut app = app();
        goto(&mut app, Section::Travelers);
        press(&mut app, KeyCode::Char('v'));
        let first_name = FieldKey::Traveler { index: 0, field: TravelerField::FirstName };
        assert!(app.validation.contains_key(&first_name));

        app.form_cursor = 1;
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "Asha");
        press(&mut app, KeyCode::Enter);
        assert!(!app.validation.contains_key(&first_name));
    }
}
