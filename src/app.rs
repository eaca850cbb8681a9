use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

use crate::config::AppConfig;
use crate::predictor::{self, Prediction, YEAR_MAX, YEAR_MIN};

/// Year step for PageUp/PageDown on the slider
const YEAR_PAGE_STEP: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Country,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub section: Section,
    pub popup: Popup,

    // Inputs (top two boxes)
    pub country: String,
    pub year: u16,

    // Current prediction (bottom box), refreshed on every render pass
    pub prediction: Prediction,

    // Config
    pub config: AppConfig,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = AppConfig::load().unwrap_or_default();
        let country = config.startup_country();
        let year = config.startup_year();
        let prediction = predictor::predict(&country, year);

        Ok(Self {
            section: Section::Country,
            popup: Popup::None,
            country,
            year,
            prediction,
            config,
            status_message: None,
            status_message_time: None,
        })
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// One render pass: draw a fresh rate for the current inputs
    fn refresh_prediction(&mut self) {
        self.prediction = predictor::predict(&self.country, self.year);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }
        self.handle_normal_key(key)
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            // Navigation between the input boxes (Country ↔ Year)
            KeyCode::Tab | KeyCode::BackTab => {
                self.section = match self.section {
                    Section::Country => Section::Year,
                    Section::Year => Section::Country,
                };
            }

            // Enter re-rolls without touching the inputs
            KeyCode::Enter => {
                self.refresh_prediction();
                self.set_status("New prediction drawn");
            }

            // Help always opens on F1; '?' only outside the country field,
            // where it is ordinary input text
            KeyCode::F(1) => self.popup = Popup::Help,

            _ => match self.section {
                Section::Country => self.handle_country_key(key),
                Section::Year => self.handle_year_key(key),
            },
        }
        Ok(())
    }

    fn handle_country_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.country.push(c);
                self.refresh_prediction();
            }
            KeyCode::Backspace => {
                // Empty country is allowed; the prediction renders regardless
                self.country.pop();
                self.refresh_prediction();
            }
            _ => {}
        }
    }

    fn handle_year_key(&mut self, key: KeyEvent) {
        let old_year = self.year;
        match key.code {
            KeyCode::Left | KeyCode::Down | KeyCode::Char('j') => {
                self.year = self.year.saturating_sub(1).max(YEAR_MIN);
            }
            KeyCode::Right | KeyCode::Up | KeyCode::Char('k') => {
                self.year = (self.year + 1).min(YEAR_MAX);
            }
            KeyCode::PageDown => {
                self.year = self.year.saturating_sub(YEAR_PAGE_STEP).max(YEAR_MIN);
            }
            KeyCode::PageUp => {
                self.year = (self.year + YEAR_PAGE_STEP).min(YEAR_MAX);
            }
            KeyCode::Home => self.year = YEAR_MIN,
            KeyCode::End => self.year = YEAR_MAX,
            KeyCode::Char('?') | KeyCode::Char('h') => {
                self.popup = Popup::Help;
            }
            _ => {}
        }
        if self.year != old_year {
            self.refresh_prediction();
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc
                        | KeyCode::Char('?')
                        | KeyCode::Char('h')
                        | KeyCode::Enter
                        | KeyCode::Char('q')
                ) {
                    self.popup = Popup::None;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub fn tick(&mut self) -> Result<()> {
        // Clear status message after 3 seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
        Ok(())
    }

    /// Persist the session's inputs for the next launch (if enabled)
    pub fn save_session(&mut self) {
        if !self.config.remember_last {
            return;
        }
        self.config.last_country = Some(self.country.clone());
        self.config.last_year = Some(self.year);
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save session: {}", e);
        }
    }

    /// Whether 'q' should quit (inside the country field it is input text)
    pub fn quit_on_q(&self) -> bool {
        self.section != Section::Country && self.popup == Popup::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        App {
            section: Section::Country,
            popup: Popup::None,
            country: "Kenya".to_string(),
            year: 2025,
            prediction: predictor::predict("Kenya", 2025),
            config: AppConfig::default(),
            status_message: None,
            status_message_time: None,
        }
    }

    #[test]
    fn test_typing_edits_country_and_rerolls() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('!'))).unwrap();
        assert_eq!(app.country, "Kenya!");
        assert_eq!(app.prediction.country, "Kenya!");

        for _ in 0..10 {
            app.handle_key(key(KeyCode::Backspace)).unwrap();
        }
        assert_eq!(app.country, "");
        assert_eq!(app.prediction.country, "");
        assert!(app.prediction.rate >= predictor::RATE_MIN);
        assert!(app.prediction.rate < predictor::RATE_MAX);
    }

    #[test]
    fn test_year_clamps_to_bounds() {
        let mut app = test_app();
        app.section = Section::Year;

        app.handle_key(key(KeyCode::End)).unwrap();
        assert_eq!(app.year, YEAR_MAX);
        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(app.year, YEAR_MAX);
        app.handle_key(key(KeyCode::PageUp)).unwrap();
        assert_eq!(app.year, YEAR_MAX);

        app.handle_key(key(KeyCode::Home)).unwrap();
        assert_eq!(app.year, YEAR_MIN);
        app.handle_key(key(KeyCode::Left)).unwrap();
        assert_eq!(app.year, YEAR_MIN);
        app.handle_key(key(KeyCode::PageDown)).unwrap();
        assert_eq!(app.year, YEAR_MIN);
    }

    #[test]
    fn test_year_change_is_a_render_pass() {
        let mut app = test_app();
        app.section = Section::Year;
        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(app.year, 2026);
        assert_eq!(app.prediction.year, 2026);
    }

    #[test]
    fn test_tab_switches_section() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.section, Section::Year);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.section, Section::Country);
    }

    #[test]
    fn test_question_mark_is_input_in_country_field() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('?'))).unwrap();
        assert_eq!(app.popup, Popup::None);
        assert_eq!(app.country, "Kenya?");

        app.section = Section::Year;
        app.handle_key(key(KeyCode::Char('?'))).unwrap();
        assert_eq!(app.popup, Popup::Help);
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_quit_on_q_only_outside_country_field() {
        let mut app = test_app();
        assert!(!app.quit_on_q());
        app.section = Section::Year;
        assert!(app.quit_on_q());
        app.popup = Popup::Help;
        assert!(!app.quit_on_q());
    }
}
