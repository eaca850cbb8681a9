use std::sync::OnceLock;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup, Section};
use crate::predictor::{YEAR_MAX, YEAR_MIN};
use crate::theme::Theme;

// Load theme colors from system (Omarchy/Hyprland) once at startup
static THEME: OnceLock<Theme> = OnceLock::new();

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

fn accent() -> Color { theme().accent }
fn highlight() -> Color { theme().highlight }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn inactive() -> Color { theme().inactive }
fn header() -> Color { theme().header }
fn track() -> Color { theme().track }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Title/info line
            Constraint::Length(3), // Country box
            Constraint::Length(3), // Year slider box
            Constraint::Min(3),    // Prediction box
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_country_box(f, app, chunks[1]);
    draw_year_box(f, app, chunks[2]);
    draw_prediction_box(f, app, chunks[3]);
    draw_footer(f, app, chunks[4]);

    if app.popup == Popup::Help {
        draw_help_popup(f);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status, Style::default().fg(accent())))
    } else {
        Line::from(Span::styled(
            "Worldwide Inflation Predictor",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        ))
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_country_box(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.section == Section::Country;
    let border_color = if is_active { accent() } else { inactive() };
    let title_style = if is_active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    let block = Block::default()
        .title(Span::styled(" Enter country ", title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let cursor = if is_active { "_" } else { "" };
    let input = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(&app.country, Style::default().fg(text())),
        Span::styled(cursor, Style::default().fg(accent())),
    ]))
    .block(block);

    f.render_widget(input, area);
}

fn draw_year_box(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.section == Section::Year;
    let border_color = if is_active { accent() } else { inactive() };
    let title_style = if is_active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" Select year: {} ", app.year),
            title_style,
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_width = area.width.saturating_sub(4) as usize;
    let line = slider_line(app.year, inner_width, is_active);
    let slider = Paragraph::new(line).block(block);

    f.render_widget(slider, area);
}

/// Build the slider line: "2000 ───●─── 2050" scaled to the available width
fn slider_line(year: u16, width: usize, is_active: bool) -> Line<'static> {
    let min_label = YEAR_MIN.to_string();
    let max_label = YEAR_MAX.to_string();

    // Track is whatever is left after labels and padding
    let track_width = width
        .saturating_sub(min_label.len() + max_label.len() + 4)
        .max(1);
    let knob_pos = knob_position(year, track_width);

    let knob_color = if is_active { accent() } else { text_dim() };

    Line::from(vec![
        Span::styled(format!(" {} ", min_label), Style::default().fg(text_dim())),
        Span::styled("─".repeat(knob_pos), Style::default().fg(track())),
        Span::styled("●", Style::default().fg(knob_color).add_modifier(Modifier::BOLD)),
        Span::styled(
            "─".repeat(track_width.saturating_sub(knob_pos + 1)),
            Style::default().fg(track()),
        ),
        Span::styled(format!(" {} ", max_label), Style::default().fg(text_dim())),
    ])
}

/// Map a year onto a track cell, clamped so the knob never leaves the track
fn knob_position(year: u16, track_width: usize) -> usize {
    let span = (YEAR_MAX - YEAR_MIN) as usize;
    let offset = (year.clamp(YEAR_MIN, YEAR_MAX) - YEAR_MIN) as usize;
    (offset * track_width.saturating_sub(1)) / span.max(1)
}

fn draw_prediction_box(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Prediction ", Style::default().fg(header())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));

    // The ** segments of the display line are rendered bold instead
    let p = &app.prediction;
    let line = Line::from(vec![
        Span::styled(" Predicted inflation for ", Style::default().fg(text())),
        Span::styled(
            p.country.clone(),
            Style::default().fg(highlight()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" in ", Style::default().fg(text())),
        Span::styled(
            p.year.to_string(),
            Style::default().fg(highlight()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(": ", Style::default().fg(text())),
        Span::styled(
            format!("{}%", p.rate_text()),
            Style::default().fg(highlight()).add_modifier(Modifier::BOLD),
        ),
    ]);

    let note = Line::from(Span::styled(
        " Placeholder value - no model is loaded",
        Style::default().fg(text_dim()),
    ));

    let content = Paragraph::new(vec![Line::from(""), line, Line::from(""), note])
        .wrap(Wrap { trim: false })
        .block(block);

    f.render_widget(content, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.section {
        Section::Country => vec![
            ("Type", "Edit"),
            ("Tab", "Year"),
            ("Enter", "Re-roll"),
            ("F1", "Help"),
        ],
        Section::Year => vec![
            ("←→", "Adjust"),
            ("PgUp/PgDn", "±10"),
            ("Tab", "Country"),
            ("Enter", "Re-roll"),
            ("q", "Quit"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 3 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 90 } else { 60 },
        if area.height < 30 { 85 } else { 65 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "═══ Inputs ═══",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  Tab       ", Style::default().fg(accent())),
            Span::raw("Switch between country and year"),
        ]),
        Line::from(vec![
            Span::styled("  Type      ", Style::default().fg(accent())),
            Span::raw("Edit the country (any text, empty is fine)"),
        ]),
        Line::from(vec![
            Span::styled("  ←/→ ↑/↓   ", Style::default().fg(accent())),
            Span::raw("Slide the year between 2000 and 2050"),
        ]),
        Line::from(vec![
            Span::styled("  PgUp/PgDn ", Style::default().fg(accent())),
            Span::raw("Slide the year by 10"),
        ]),
        Line::from(vec![
            Span::styled("  Home/End  ", Style::default().fg(accent())),
            Span::raw("Jump to 2000 / 2050"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Prediction ═══",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  Enter     ", Style::default().fg(accent())),
            Span::raw("Draw a new prediction"),
        ]),
        Line::from(vec![Span::raw(
            "            Every edit draws a fresh one too",
        )]),
        Line::from(vec![Span::raw(
            "            Values are uniform in [2.00%, 12.00%) - no model",
        )]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Quick Start ═══",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  inflacast                          ", Style::default().fg(accent())),
            Span::raw("Launch this TUI"),
        ]),
        Line::from(vec![
            Span::styled("  inflacast --predict                ", Style::default().fg(accent())),
            Span::raw("One-shot prediction"),
        ]),
        Line::from(vec![
            Span::styled("  inflacast --predict --json         ", Style::default().fg(accent())),
            Span::raw("JSON for scripts"),
        ]),
        Line::from(vec![
            Span::styled("  inflacast --country Ghana --year 2030 --predict", Style::default().fg(text_dim())),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("q", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(
                    " inflacast Help ",
                    Style::default().fg(accent()),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
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
