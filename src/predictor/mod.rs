//! The placeholder predictor.
//!
//! No model is trained, loaded, or evaluated here. The "prediction" is a
//! uniform draw standing in for a real forecast, so the demo has something
//! to display while the rest of the app behaves like the real thing.

use rand::Rng;
use serde::Serialize;

/// Inclusive year bounds the UI exposes.
pub const YEAR_MIN: u16 = 2000;
pub const YEAR_MAX: u16 = 2050;

pub const DEFAULT_YEAR: u16 = 2025;
pub const DEFAULT_COUNTRY: &str = "Kenya";

/// Half-open range the placeholder rate is drawn from.
pub const RATE_MIN: f64 = 2.0;
pub const RATE_MAX: f64 = 12.0;

/// One prediction for one render pass. Not reproducible: the same
/// country/year pair draws a fresh rate every time.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub country: String,
    pub year: u16,
    pub rate: f64,
}

/// Produce a placeholder prediction for the given inputs.
///
/// Accepts any country string (empty included) and any year; the inputs are
/// carried through to the display but have no influence on the rate.
pub fn predict(country: &str, year: u16) -> Prediction {
    Prediction {
        country: country.to_string(),
        year,
        rate: draw_rate(),
    }
}

/// Draw a rate uniformly from [RATE_MIN, RATE_MAX).
pub fn draw_rate() -> f64 {
    rand::thread_rng().gen_range(RATE_MIN..RATE_MAX)
}

/// Clamp a year to the slider bounds.
pub fn clamp_year(year: u16) -> u16 {
    year.clamp(YEAR_MIN, YEAR_MAX)
}

impl Prediction {
    /// The display line, with the ** markers the original page used for
    /// emphasis. The TUI renders the marked segments bold instead.
    pub fn display_line(&self) -> String {
        format!(
            "Predicted inflation for **{}** in **{}**: **{:.2}%**",
            self.country, self.year, self.rate
        )
    }

    /// The rate formatted to two decimals, e.g. "7.31".
    pub fn rate_text(&self) -> String {
        format!("{:.2}", self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_always_in_range() {
        for _ in 0..10_000 {
            let rate = draw_rate();
            assert!(rate >= RATE_MIN, "rate {} below minimum", rate);
            assert!(rate < RATE_MAX, "rate {} at or above maximum", rate);
        }
    }

    #[test]
    fn test_predict_carries_inputs_literally() {
        let p = predict("Kenya", 2025);
        assert_eq!(p.country, "Kenya");
        assert_eq!(p.year, 2025);

        let line = p.display_line();
        assert!(line.starts_with("Predicted inflation for **Kenya** in **2025**: **"));
        assert!(line.ends_with("%**"));
    }

    #[test]
    fn test_predict_accepts_empty_country() {
        let p = predict("", YEAR_MIN);
        assert_eq!(p.country, "");
        assert_eq!(
            p.display_line(),
            format!("Predicted inflation for **** in **2000**: **{:.2}%**", p.rate)
        );
    }

    #[test]
    fn test_predict_accepts_special_characters() {
        let p = predict("Côte d'Ivoire & São Tomé **", 2037);
        assert!(p.display_line().contains("Côte d'Ivoire & São Tomé **"));
        assert!(p.display_line().contains("**2037**"));
    }

    #[test]
    fn test_display_line_two_decimal_rate() {
        let p = Prediction {
            country: "Kenya".to_string(),
            year: 2025,
            rate: 7.5,
        };
        assert_eq!(
            p.display_line(),
            "Predicted inflation for **Kenya** in **2025**: **7.50%**"
        );
        assert_eq!(p.rate_text(), "7.50");
    }

    #[test]
    fn test_all_years_in_bounds_render() {
        for year in YEAR_MIN..=YEAR_MAX {
            let p = predict("Kenya", year);
            assert!(p.display_line().contains(&format!("**{}**", year)));
        }
    }

    #[test]
    fn test_clamp_year() {
        assert_eq!(clamp_year(1995), YEAR_MIN);
        assert_eq!(clamp_year(2025), 2025);
        assert_eq!(clamp_year(3000), YEAR_MAX);
    }
}
