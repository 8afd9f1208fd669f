//! Small rendering helpers shared by the section views.

use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

use crate::registry::airline::{AirlineStatus, ComplianceClass, ComplianceMark};
use crate::registry::airport::AirportStatus;
use crate::theme::Palette;

/// Bordered box; the focused one gets the accent border
pub fn boxed(title: &str, is_active: bool, p: &Palette) -> Block<'static> {
    let border_color = if is_active { p.accent } else { p.inactive };
    let title_style = if is_active {
        Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.inactive)
    };

    Block::default()
        .title(Span::styled(format!(" {} ", title), title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

pub fn row_style(selected: bool, p: &Palette) -> Style {
    if selected {
        Style::default().bg(p.bg_selected).fg(p.text)
    } else {
        Style::default()
    }
}

pub fn airline_status(status: AirlineStatus, p: &Palette) -> Span<'static> {
    let (icon, color) = match status {
        AirlineStatus::Active => ("●", p.success),
        AirlineStatus::Pending => ("◐", p.warning),
        AirlineStatus::Suspended => ("✕", p.danger),
        AirlineStatus::UnderReview => ("◌", p.accent),
    };
    Span::styled(format!("{} {}", icon, status.label()), Style::default().fg(color))
}

pub fn compliance(class: ComplianceClass, p: &Palette) -> Span<'static> {
    let color = match class {
        ComplianceClass::Compliant => p.success,
        ComplianceClass::Pending => p.warning,
        ComplianceClass::NonCompliant => p.danger,
        ComplianceClass::Unknown => p.text_dim,
    };
    Span::styled(class.label(), Style::default().fg(color))
}

/// One raw compliance field, colored by how it reads
pub fn compliance_field<'a>(value: &'a str, p: &Palette) -> Span<'a> {
    let color = match ComplianceMark::of(value) {
        ComplianceMark::Good => p.success,
        ComplianceMark::Pending => p.warning,
        ComplianceMark::Issue => p.danger,
        ComplianceMark::Unknown => p.text_dim,
    };
    Span::styled(value, Style::default().fg(color))
}

pub fn airport_status(status: AirportStatus, p: &Palette) -> Span<'static> {
    let color = match status {
        AirportStatus::Active => p.success,
        AirportStatus::Inactive => p.text_dim,
    };
    Span::styled(status.label(), Style::default().fg(color))
}

/// "Label: value" pair for filter bars
pub fn filter_chip<'a>(label: &'a str, value: String, p: &Palette) -> Vec<Span<'a>> {
    vec![
        Span::styled(label, Style::default().fg(p.text_dim)),
        Span::styled(value, Style::default().fg(p.accent)),
        Span::styled(" │ ", Style::default().fg(p.inactive)),
    ]
}

pub fn minutes(total: u32) -> String {
    format!("{}h {:02}m", total / 60, total % 60)
}
