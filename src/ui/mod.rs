mod components;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{AirlineView, AirportView, App, InputMode, Popup, Section};
use crate::booking::search::{self, SortOrder};
use crate::booking::traveler::FieldKey;
use crate::registry::Choice;
use crate::theme::{Palette, ThemeContext, ThemeGroup, ThemeName};

pub fn draw(f: &mut Frame, app: &App) {
    // Every view below reads colors from the provided theme
    let ctx = ThemeContext::provide(&app.theme);
    let palette = ctx.use_theme().palette();
    let p = &palette;

    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(p.bg)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Length(3), // Section header
            Constraint::Min(6),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    // Sidebar collapses on narrow terminals
    let sidebar_width = if area.width < 80 { 0 } else { 24 };
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(chunks[2]);

    draw_info_line(f, app, chunks[0], p);
    draw_section_header(f, app, chunks[1], p);
    if sidebar_width > 0 {
        draw_sidebar(f, app, body[0], p);
    }

    match app.section {
        Section::Overview => draw_overview(f, app, body[1], p),
        Section::Airlines(view) => draw_airlines(f, app, view, body[1], p),
        Section::Airports(AirportView::Airports) => draw_airports(f, app, body[1], p),
        Section::Airports(AirportView::Cities) => draw_cities(f, app, body[1], p),
        Section::Flights => draw_flights(f, app, body[1], p),
        Section::Travelers => draw_travelers(f, app, body[1], p),
    }

    draw_footer(f, app, chunks[3], p);

    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f, p),
        Popup::Confirm => draw_confirm_popup(f, app, p),
        Popup::ThemePicker => draw_theme_picker(f, app, p),
        Popup::Details => draw_details_popup(f, app, p),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect, p: &Palette) {
    let line = if app.input_mode == InputMode::Search {
        Line::from(vec![
            Span::styled("󰍉 ", Style::default().fg(p.accent)),
            Span::styled(format!("{}_", app.input_buffer), Style::default().fg(p.text)),
            Span::styled(" │ Enter keeps, Esc clears", Style::default().fg(p.text_dim)),
        ])
    } else if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status, Style::default().fg(p.warning)))
    } else {
        Line::from(vec![
            Span::styled("Ready", Style::default().fg(p.text_dim)),
            Span::styled(" │ ", Style::default().fg(p.inactive)),
            Span::styled(
                format!("Theme: {}", app.theme.markers().data_theme().unwrap_or("default")),
                Style::default().fg(p.text_dim),
            ),
        ])
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_section_header(f: &mut Frame, app: &App, area: Rect, p: &Palette) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            app.section.title(),
            Style::default().fg(p.header).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(app.section.description(), Style::default().fg(p.text_dim))),
    ])
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(p.inactive)));

    f.render_widget(header, area);
}

fn draw_sidebar(f: &mut Frame, app: &App, area: Rect, p: &Palette) {
    let lines: Vec<Line> = Section::ALL
        .iter()
        .map(|section| {
            let indent = match section {
                Section::Airlines(AirlineView::List) | Section::Airports(AirportView::Airports) => "",
                Section::Airlines(_) | Section::Airports(_) => "  ",
                _ => "",
            };
            let style = if *section == app.section {
                Style::default().fg(p.accent).bg(p.bg_selected).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(p.text)
            };
            Line::from(Span::styled(format!(" {}{}", indent, section.label()), style))
        })
        .collect();

    let sidebar = Paragraph::new(lines).block(components::boxed("Sections", false, p));
    f.render_widget(sidebar, area);
}

fn draw_overview(f: &mut Frame, app: &App, area: Rect, p: &Palette) {
    let summary = app.airlines.summary();
    let active_airports = app
        .airports
        .iter()
        .filter(|a| a.status == crate::registry::airport::AirportStatus::Active)
        .count();

    let stat = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<22}", label), Style::default().fg(p.text_dim)),
            Span::styled(value, Style::default().fg(p.text).add_modifier(Modifier::BOLD)),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("═══ Airlines ═══", Style::default().fg(p.header).add_modifier(Modifier::BOLD))),
        stat("Registered", summary.total.to_string()),
        stat("Active", summary.active.to_string()),
        stat("Pending approval", summary.pending.to_string()),
        stat("Suspended", summary.suspended.to_string()),
        Line::from(""),
        Line::from(Span::styled("═══ Network ═══", Style::default().fg(p.header).add_modifier(Modifier::BOLD))),
        stat("Airports", format!("{} ({} active)", app.airports.len(), active_airports)),
        stat("Cities", app.cities.len().to_string()),
        stat("Flights on sale", app.flights.len().to_string()),
        Line::from(""),
        Line::from(Span::styled("═══ Booking ═══", Style::default().fg(p.header).add_modifier(Modifier::BOLD))),
        stat(
            "Travelers",
            format!("{} of {}", app.form.travelers().len(), app.form.passenger_count()),
        ),
    ];

    let overview = Paragraph::new(lines).block(components::boxed("Overview", true, p));
    f.render_widget(overview, area);
}

fn choice_label<T>(choice: &Choice<T>, label: impl Fn(&T) -> String) -> String {
    match choice {
        Choice::All => "All".to_string(),
        Choice::Only(v) => label(v),
    }
}

/// Search text plus the active dropdown values
fn draw_filter_bar(f: &mut Frame, app: &App, chips: Vec<Span>, area: Rect, p: &Palette) {
    let query = app.current_query();
    let query_display = if app.input_mode == InputMode::Search {
        format!("{}_", app.input_buffer)
    } else if query.is_empty() {
        "(/ to search)".to_string()
    } else {
        query.to_string()
    };

    let mut spans = components::filter_chip("Search: ", query_display, p);
    spans.extend(chips);
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn split_filter_and_table(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);
    (chunks[0], chunks[1])
}

fn header_row<'a>(cells: &[&'a str], p: &Palette) -> Row<'a> {
    Row::new(
        cells
            .iter()
            .map(|c| Span::styled(*c, Style::default().fg(p.header)))
            .collect::<Vec<_>>(),
    )
}

fn empty_row<'a>(message: &'a str, p: &Palette) -> Vec<Row<'a>> {
    vec![Row::new(vec![Span::styled(message, Style::default().fg(p.text_dim))])]
}

fn draw_airlines(f: &mut Frame, app: &App, view: AirlineView, area: Rect, p: &Palette) {
    let (bar, table_area) = split_filter_and_table(area);

    let mut chips = Vec::new();
    if view == AirlineView::List {
        chips.extend(components::filter_chip(
            "(s)tatus: ",
            choice_label(&app.airline_criteria.status, |s| s.label().to_string()),
            p,
        ));
    }
    chips.extend(components::filter_chip(
        "(c)ompliance: ",
        choice_label(&app.airline_criteria.compliance, |c| c.label().to_string()),
        p,
    ));
    draw_filter_bar(f, app, chips, bar, p);

    let airlines = app.visible_airlines();
    let criteria = app.effective_airline_criteria();
    let narrowed = !criteria.query.trim().is_empty() || !criteria.status.is_all() || !criteria.compliance.is_all();
    let title = if narrowed {
        format!("{} ({} of {})", app.section.label(), airlines.len(), app.airlines.all().len())
    } else {
        format!("{} ({})", app.section.label(), airlines.len())
    };

    let (header, widths) = if view == AirlineView::Compliance {
        (
            header_row(&["Airline", "KYC", "Insurance", "License", "Safety", "Overall"], p),
            vec![
                Constraint::Percentage(24),
                Constraint::Percentage(14),
                Constraint::Percentage(14),
                Constraint::Percentage(14),
                Constraint::Percentage(14),
                Constraint::Percentage(20),
            ],
        )
    } else {
        (
            header_row(&["Airline", "Code", "Status", "Compliance", "Fleet", "Headquarters"], p),
            vec![
                Constraint::Percentage(24),
                Constraint::Length(6),
                Constraint::Length(14),
                Constraint::Length(16),
                Constraint::Length(7),
                Constraint::Min(10),
            ],
        )
    };

    let rows: Vec<Row> = if airlines.is_empty() {
        empty_row("  No airlines match", p)
    } else {
        airlines
            .iter()
            .enumerate()
            .map(|(i, airline)| {
                let style = components::row_style(i == app.selected, p);
                let name = Span::styled(airline.name.as_str(), Style::default().fg(p.text));
                if view == AirlineView::Compliance {
                    let c = &airline.compliance;
                    Row::new(vec![
                        name,
                        components::compliance_field(&c.kyc, p),
                        components::compliance_field(&c.insurance, p),
                        components::compliance_field(&c.license, p),
                        components::compliance_field(&c.safety, p),
                        components::compliance(airline.compliance_class(), p),
                    ])
                    .style(style)
                } else {
                    Row::new(vec![
                        name,
                        Span::styled(airline.code.as_str(), Style::default().fg(p.text_dim)),
                        components::airline_status(airline.status, p),
                        components::compliance(airline.compliance_class(), p),
                        Span::styled(airline.business.fleet.to_string(), Style::default().fg(p.text)),
                        Span::styled(airline.headquarters.as_str(), Style::default().fg(p.text_dim)),
                    ])
                    .style(style)
                }
            })
            .collect()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(components::boxed(&title, true, p));
    f.render_widget(table, table_area);
}

fn draw_airports(f: &mut Frame, app: &App, area: Rect, p: &Palette) {
    let (bar, table_area) = split_filter_and_table(area);

    let mut chips = components::filter_chip(
        "(c)ountry: ",
        choice_label(&app.airport_criteria.country, |c| c.clone()),
        p,
    );
    chips.extend(components::filter_chip(
        "(s)tatus: ",
        choice_label(&app.airport_criteria.status, |s| s.label().to_string()),
        p,
    ));
    draw_filter_bar(f, app, chips, bar, p);

    let airports = app.visible_airports();
    let title = format!("Airports ({})", airports.len());

    let rows: Vec<Row> = if airports.is_empty() {
        empty_row("  No airports match", p)
    } else {
        airports
            .iter()
            .enumerate()
            .map(|(i, airport)| {
                Row::new(vec![
                    Span::styled(
                        format!("{}/{}", airport.iata_code, airport.icao_code),
                        Style::default().fg(p.accent),
                    ),
                    Span::styled(airport.name.as_str(), Style::default().fg(p.text)),
                    Span::styled(airport.city.as_str(), Style::default().fg(p.text)),
                    Span::styled(airport.country.as_str(), Style::default().fg(p.text_dim)),
                    components::airport_status(airport.status, p),
                    Span::styled(airport.daily_flights.to_string(), Style::default().fg(p.text)),
                ])
                .style(components::row_style(i == app.selected, p))
            })
            .collect()
    };

    let widths = [
        Constraint::Length(10),
        Constraint::Percentage(35),
        Constraint::Percentage(15),
        Constraint::Percentage(18),
        Constraint::Length(9),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .header(header_row(&["Code", "Name", "City", "Country", "Status", "Daily"], p))
        .block(components::boxed(&title, true, p));
    f.render_widget(table, table_area);
}

fn draw_cities(f: &mut Frame, app: &App, area: Rect, p: &Palette) {
    let (bar, table_area) = split_filter_and_table(area);
    draw_filter_bar(f, app, Vec::new(), bar, p);

    let cities = app.visible_cities();
    let title = format!("Cities ({})", cities.len());

    let rows: Vec<Row> = if cities.is_empty() {
        empty_row("  No cities match", p)
    } else {
        cities
            .iter()
            .enumerate()
            .map(|(i, city)| {
                Row::new(vec![
                    Span::styled(city.name.as_str(), Style::default().fg(p.text)),
                    Span::styled(city.state.as_str(), Style::default().fg(p.text_dim)),
                    Span::styled(city.country.as_str(), Style::default().fg(p.text_dim)),
                    Span::styled(city.airports.join(", "), Style::default().fg(p.accent)),
                    Span::styled(city.population.to_string(), Style::default().fg(p.text)),
                ])
                .style(components::row_style(i == app.selected, p))
            })
            .collect()
    };

    let widths = [
        Constraint::Percentage(22),
        Constraint::Percentage(20),
        Constraint::Percentage(24),
        Constraint::Percentage(14),
        Constraint::Percentage(20),
    ];
    let table = Table::new(rows, widths)
        .header(header_row(&["City", "State", "Country", "Airports", "Population"], p))
        .block(components::boxed(&title, true, p));
    f.render_widget(table, table_area);
}

fn draw_flights(f: &mut Frame, app: &App, area: Rect, p: &Palette) {
    let (bar, table_area) = split_filter_and_table(area);
    let filters = &app.flight_filters;

    let order = match app.sort_order {
        SortOrder::Asc => "↑",
        SortOrder::Desc => "↓",
    };
    // Checklist of every airline on sale; an empty selection keeps them all
    let airlines = search::airlines_in(&app.flights)
        .iter()
        .map(|(code, _)| {
            let mark = if filters.airlines.contains(code) { "x" } else { " " };
            format!("[{}]{}", mark, code)
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut spans = components::filter_chip("s(o)rt: ", format!("{} {}", app.sort_key.label(), order), p);
    spans.extend(components::filter_chip("(p) ", filters.stops.label().to_string(), p));
    spans.extend(components::filter_chip("(d)ep: ", filters.departure.label().to_string(), p));
    spans.extend(components::filter_chip("(a)rr: ", filters.arrival.label().to_string(), p));
    spans.extend(components::filter_chip("(f) airlines: ", airlines, p));
    if filters.refundable_only {
        spans.push(Span::styled("Refundable only", Style::default().fg(p.success)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), bar);

    let flights = app.visible_flights();
    let title = format!("{} of {} flights", flights.len(), app.flights.len());

    let rows: Vec<Row> = if flights.is_empty() {
        empty_row("  No flights match these filters (C clears)", p)
    } else {
        flights
            .iter()
            .enumerate()
            .map(|(i, flight)| {
                let stops = match flight.stops {
                    0 => "Non-stop".to_string(),
                    1 => "1 stop".to_string(),
                    n => format!("{} stops", n),
                };
                let refund = if flight.refundable {
                    Span::styled("Refundable", Style::default().fg(p.success))
                } else {
                    Span::styled("Non-refundable", Style::default().fg(p.text_dim))
                };
                Row::new(vec![
                    Span::styled(flight.airline_name.as_str(), Style::default().fg(p.text)),
                    Span::styled(flight.flight_number.as_str(), Style::default().fg(p.text_dim)),
                    Span::styled(
                        format!(
                            "{} {} → {} {}",
                            flight.from,
                            flight.departure.format("%H:%M"),
                            flight.arrival.format("%H:%M"),
                            flight.to
                        ),
                        Style::default().fg(p.text),
                    ),
                    Span::styled(components::minutes(flight.duration_minutes), Style::default().fg(p.text)),
                    Span::styled(stops, Style::default().fg(p.text_dim)),
                    Span::styled(
                        format!("${}", flight.price),
                        Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
                    ),
                    refund,
                ])
                .style(components::row_style(i == app.selected, p))
            })
            .collect()
    };

    let widths = [
        Constraint::Percentage(18),
        Constraint::Length(9),
        Constraint::Length(23),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(6),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header_row(&["Airline", "Flight", "Route", "Time", "Stops", "Price", "Fare"], p))
        .block(components::boxed(&title, true, p));
    f.render_widget(table, table_area);
}

fn draw_travelers(f: &mut Frame, app: &App, area: Rect, p: &Palette) {
    let rows = app.form_rows();
    let editing = app.input_mode == InputMode::EditField;

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0;
    let mut current_traveler = None;
    let mut contact_started = false;

    for (i, key) in rows.iter().enumerate() {
        // Group headers
        match key {
            FieldKey::Traveler { index, .. } if current_traveler != Some(*index) => {
                current_traveler = Some(*index);
                if let Some(traveler) = app.form.travelers().get(*index) {
                    let mut header = vec![Span::styled(
                        format!("═══ Traveler {} ({}) ═══", index + 1, traveler.kind.label()),
                        Style::default().fg(p.header).add_modifier(Modifier::BOLD),
                    )];
                    if let Some(age) = traveler.age_on(app.today) {
                        let derived = traveler.derived_kind(app.today);
                        header.push(Span::styled(
                            format!("  age {}, {}", age, derived.label()),
                            Style::default().fg(p.text_dim),
                        ));
                        if traveler.kind_mismatch(app.today) {
                            header.push(Span::styled(
                                format!("  ⚠ born as {}", derived.label().to_lowercase()),
                                Style::default().fg(p.warning),
                            ));
                        }
                    }
                    if !lines.is_empty() {
                        lines.push(Line::from(""));
                    }
                    lines.push(Line::from(header));
                }
            }
            FieldKey::Contact(_) if !contact_started => {
                contact_started = true;
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "═══ Contact Details ═══",
                    Style::default().fg(p.header).add_modifier(Modifier::BOLD),
                )));
            }
            _ => {}
        }

        let label = match key {
            FieldKey::Traveler { field, .. } => field.label(),
            FieldKey::Contact(field) => field.label(),
        };
        let selected = i == app.form_cursor;
        let value = if selected && editing {
            format!("{}_", app.input_buffer)
        } else {
            app.form_value(*key).to_string()
        };

        let mut spans = vec![
            Span::styled(format!("  {:<16}", label), Style::default().fg(p.text_dim)),
            Span::styled(value, Style::default().fg(p.text)),
        ];
        if let Some(message) = app.validation.get(key) {
            spans.push(Span::styled(format!("  {}", message), Style::default().fg(p.danger)));
        }

        if selected {
            cursor_line = lines.len();
        }
        lines.push(Line::from(spans).style(components::row_style(selected, p)));
    }

    // Keep the cursor row on screen
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = cursor_line.saturating_sub(visible.saturating_sub(2));

    let title = format!(
        "Travelers {}/{}",
        app.form.travelers().len(),
        app.form.passenger_count()
    );
    let form = Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .block(components::boxed(&title, true, p));
    f.render_widget(form, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect, p: &Palette) {
    let hints: Vec<(&str, &str)> = match (app.input_mode, app.section) {
        (InputMode::Search, _) | (InputMode::EditField, _) => vec![
            ("Enter", "Done"),
            ("Esc", "Cancel"),
            ("Bksp", "Delete"),
        ],
        (_, Section::Overview) => vec![("Tab", "Next"), ("t", "Theme"), ("h", "Help"), ("q", "Quit")],
        (_, Section::Airlines(_)) => vec![
            ("↑↓", "Nav"),
            ("/", "Search"),
            ("a", "Approve"),
            ("u", "Suspend"),
            ("x", "Reject"),
            ("Enter", "Details"),
            ("Tab", "Next"),
        ],
        (_, Section::Airports(AirportView::Airports)) => vec![
            ("↑↓", "Nav"),
            ("/", "Search"),
            ("c", "Country"),
            ("s", "Status"),
            ("Enter", "Details"),
            ("Tab", "Next"),
        ],
        (_, Section::Airports(AirportView::Cities)) => vec![("↑↓", "Nav"), ("/", "Search"), ("Tab", "Next")],
        (_, Section::Flights) => vec![
            ("o/O", "Sort"),
            ("p", "Stops"),
            ("f", "Airline"),
            ("r", "Refundable"),
            ("C", "Clear"),
            ("Tab", "Next"),
        ],
        (_, Section::Travelers) => vec![
            ("Enter", "Edit"),
            ("+/c/i", "Add"),
            ("d", "Remove"),
            ("v", "Validate"),
            ("Tab", "Next"),
        ],
    };

    // Responsive: fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else if area.width < 80 { 5 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(p.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(p.text_dim)),
            ]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center), area);
}

fn draw_help_popup(f: &mut Frame, p: &Palette) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 40 { 95 } else { 85 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let heading = |s: &'static str| {
        Line::from(Span::styled(s, Style::default().fg(p.header).add_modifier(Modifier::BOLD)))
    };
    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), Style::default().fg(p.accent)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        heading("═══ Navigation ═══"),
        key("Tab", "Next section (Shift-Tab goes back)"),
        key("↑/↓ j/k", "Move up/down"),
        key("t", "Pick a theme"),
        key("q", "Quit"),
        Line::from(""),
        heading("═══ Airlines ═══"),
        key("/", "Search name, code, headquarters"),
        key("s", "Cycle status filter"),
        key("c", "Cycle compliance filter"),
        key("a", "Approve selected airline"),
        key("u", "Suspend selected airline (asks first)"),
        key("x", "Reject and remove (asks first)"),
        key("Enter", "Show full record"),
        Line::from(""),
        heading("═══ Airports & Cities ═══"),
        key("/", "Search name, IATA, ICAO, city"),
        key("c", "Cycle country"),
        key("s", "Cycle status"),
        Line::from(""),
        heading("═══ Flights ═══"),
        key("o / O", "Sort key / flip order"),
        key("p", "Stops"),
        key("d / a", "Departure / arrival window"),
        key("f", "Toggle selected flight's airline"),
        key("r", "Refundable only"),
        key("C", "Clear all filters"),
        Line::from(""),
        heading("═══ Travelers ═══"),
        key("Enter", "Edit field"),
        key("+ c i", "Add adult / child / infant"),
        key("d", "Remove traveler"),
        key("v", "Check required fields"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(p.text_dim)),
            Span::styled("h", Style::default().fg(p.accent)),
            Span::styled("/", Style::default().fg(p.text_dim)),
            Span::styled("?", Style::default().fg(p.accent)),
            Span::styled("/", Style::default().fg(p.text_dim)),
            Span::styled("Esc", Style::default().fg(p.accent)),
            Span::styled(" to close", Style::default().fg(p.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(p.text).bg(p.bg))
        .block(
            Block::default()
                .title(Span::styled(" 󰋖 skydesk Help ", Style::default().fg(p.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn draw_confirm_popup(f: &mut Frame, app: &App, p: &Palette) {
    let popup_area = centered_rect(40, 20, f.area());

    f.render_widget(Clear, popup_area);

    let message = app.status_message.as_deref().unwrap_or("Confirm?");

    let confirm = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(p.warning))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y", Style::default().fg(p.success).add_modifier(Modifier::BOLD)),
            Span::raw(" Yes   "),
            Span::styled("n", Style::default().fg(p.danger).add_modifier(Modifier::BOLD)),
            Span::raw(" No"),
        ]),
    ])
    .style(Style::default().fg(p.text).bg(p.bg))
    .block(
        Block::default()
            .title(Span::styled(" Confirm ", Style::default().fg(p.warning)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.warning)),
    )
    .alignment(Alignment::Center);

    f.render_widget(confirm, popup_area);
}

fn draw_theme_picker(f: &mut Frame, app: &App, p: &Palette) {
    let popup_area = centered_rect(50, 60, f.area());
    f.render_widget(Clear, popup_area);

    let active = app.theme.markers().active_themes();
    let mut lines = Vec::new();

    for (group, title) in [
        (ThemeGroup::Background, "Background"),
        (ThemeGroup::PrimaryColor, "Primary Color"),
    ] {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!("═══ {} ═══", title),
            Style::default().fg(p.header).add_modifier(Modifier::BOLD),
        )));

        for (i, theme) in ThemeName::ALL.iter().enumerate().filter(|(_, t)| t.group() == group) {
            let mut spans = vec![
                Span::styled(format!("  {:<8}", theme.label()), Style::default().fg(p.text)),
                Span::styled(theme.description(), Style::default().fg(p.text_dim)),
            ];
            if active.contains(theme) {
                spans.push(Span::styled("  Current", Style::default().fg(p.success)));
            }
            lines.push(Line::from(spans).style(components::row_style(i == app.theme_selected, p)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "  Saved under '{}': {}",
            app.theme.storage_key(),
            app.theme.stored_value().as_deref().unwrap_or("nothing yet")
        ),
        Style::default().fg(p.text_dim),
    )));

    let picker = Paragraph::new(lines)
        .style(Style::default().bg(p.bg))
        .block(
            Block::default()
                .title(Span::styled(" Select Theme ", Style::default().fg(p.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.accent)),
        );
    f.render_widget(picker, popup_area);
}

fn draw_details_popup(f: &mut Frame, app: &App, p: &Palette) {
    let area = f.area();
    let popup_area = centered_rect(if area.width < 100 { 90 } else { 70 }, 80, area);
    f.render_widget(Clear, popup_area);

    let heading = |s: String| Line::from(Span::styled(s, Style::default().fg(p.header).add_modifier(Modifier::BOLD)));
    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<20}", label), Style::default().fg(p.text_dim)),
            Span::styled(value, Style::default().fg(p.text)),
        ])
    };

    let (title, lines) = match app.section {
        Section::Airlines(_) => match app.selected_airline() {
            Some(a) => (
                a.name.clone(),
                vec![
                    heading("═══ Registration ═══".to_string()),
                    field("Code (IATA/ICAO)", format!("{} / {} / {}", a.code, a.iata_code, a.icao_code)),
                    Line::from(vec![
                        Span::styled(format!("  {:<20}", "Status"), Style::default().fg(p.text_dim)),
                        components::airline_status(a.status, p),
                    ]),
                    field("Registered", a.registration_date.clone()),
                    field("Headquarters", a.headquarters.clone()),
                    Line::from(""),
                    heading("═══ Contact ═══".to_string()),
                    field("Email", a.contact.email.clone()),
                    field("Phone", a.contact.phone.clone()),
                    field("Website", a.contact.website.clone()),
                    Line::from(""),
                    heading(format!("═══ Compliance: {} ═══", a.compliance_class().label())),
                    field("KYC", a.compliance.kyc.clone()),
                    field("Insurance", a.compliance.insurance.clone()),
                    field("License", a.compliance.license.clone()),
                    field("Safety", a.compliance.safety.clone()),
                    Line::from(""),
                    heading("═══ Business ═══".to_string()),
                    field("Fleet", a.business.fleet.to_string()),
                    field("Routes", a.business.routes.to_string()),
                    field("Employees", a.business.employees.to_string()),
                    field("Monthly revenue", a.business.monthly_revenue.to_string()),
                    field("Commission", format!("{:.1}%", a.business.commission)),
                    Line::from(""),
                    heading("═══ Documents ═══".to_string()),
                    field("License", a.documents.license.clone()),
                    field("Insurance", a.documents.insurance.clone()),
                    field("Registration", a.documents.registration.clone()),
                ],
            ),
            None => return,
        },
        Section::Airports(AirportView::Airports) => match app.selected_airport() {
            Some(a) => {
                let mut lines = vec![
                    heading("═══ Location ═══".to_string()),
                    field("Codes", format!("{} / {}", a.iata_code, a.icao_code)),
                    field("City", format!("{}, {}, {}", a.city, a.state, a.country)),
                    field("Timezone", a.timezone.clone()),
                    field("Coordinates", format!("{:.4}, {:.4}", a.coordinates.lat, a.coordinates.lng)),
                    field("Elevation", format!("{} m", a.elevation_m)),
                    Line::from(""),
                    heading("═══ Operations ═══".to_string()),
                    field("Gates", a.gates.to_string()),
                    field("Airlines", a.airlines.to_string()),
                    field("Daily flights", a.daily_flights.to_string()),
                    field("Capacity", format!("{} pax/yr", a.passenger_capacity)),
                    field("Last updated", a.last_updated.clone()),
                    Line::from(""),
                    heading(format!("═══ Terminals ({}) ═══", a.terminals.len())),
                ];
                lines.extend(
                    a.terminals
                        .iter()
                        .map(|t| field("", format!("{}  {}  {} pax", t.name, t.status, t.capacity))),
                );
                lines.push(Line::from(""));
                lines.push(heading(format!("═══ Runways ({}) ═══", a.runways.len())));
                lines.extend(
                    a.runways
                        .iter()
                        .map(|r| field("", format!("{}  {} m  {}", r.name, r.length_m, r.surface))),
                );
                (a.name.clone(), lines)
            }
            None => return,
        },
        _ => return,
    };

    let details = Paragraph::new(lines)
        .style(Style::default().bg(p.bg))
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", title), Style::default().fg(p.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.accent)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(details, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
