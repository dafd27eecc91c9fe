//! Field rules for ships and path identifiers.
//!
//! Validators take `Option` so that "absent" and "invalid" collapse into the
//! same `false`, which is what create-time validation needs. Update-time
//! validation calls them with `Some(value)` for present fields only.

use chrono::{DateTime, Datelike, Utc};

use crate::ship::ShipPayload;

pub const MAX_STRING_LEN: usize = 50;
pub const MIN_SPEED: f64 = 0.01;
pub const MAX_SPEED: f64 = 0.99;
pub const MIN_CREW_SIZE: i32 = 1;
pub const MAX_CREW_SIZE: i32 = 9999;
/// Production year bounds, both exclusive.
pub const MIN_PROD_YEAR: i32 = 2800;
pub const MAX_PROD_YEAR: i32 = 3019;

/// Non-empty and at most 50 characters.
pub fn validate_string(s: Option<&str>) -> bool {
    matches!(s, Some(s) if !s.is_empty() && s.chars().count() <= MAX_STRING_LEN)
}

pub fn validate_speed(speed: Option<f64>) -> bool {
    matches!(speed, Some(v) if (MIN_SPEED..=MAX_SPEED).contains(&v))
}

pub fn validate_crew_size(size: Option<i32>) -> bool {
    matches!(size, Some(n) if (MIN_CREW_SIZE..=MAX_CREW_SIZE).contains(&n))
}

/// Year 2800 and year 3019 are both out of range.
pub fn validate_date(date: Option<DateTime<Utc>>) -> bool {
    matches!(date, Some(d) if MIN_PROD_YEAR < d.year() && d.year() < MAX_PROD_YEAR)
}

/// Everything except `is_used` must be present and valid.
pub fn validate_ship_for_create(ship: Option<&ShipPayload>) -> bool {
    let Some(ship) = ship else { return false };
    ship.ship_type.is_some()
        && validate_string(ship.name.as_deref())
        && validate_string(ship.planet.as_deref())
        && validate_speed(ship.speed)
        && validate_crew_size(ship.crew_size)
        && validate_date(ship.prod_date)
}

/// Parse an identifier taken from a request path. Never fails loudly.
pub fn convert_identifier(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}

pub fn is_id_valid(id: Option<i64>) -> bool {
    matches!(id, Some(id) if id > 0)
}

impl ShipPayload {
    /// Names of fields that are present but fail their rule.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut bad = Vec::new();
        if self.name.is_some() && !validate_string(self.name.as_deref()) {
            bad.push("name");
        }
        if self.planet.is_some() && !validate_string(self.planet.as_deref()) {
            bad.push("planet");
        }
        if self.prod_date.is_some() && !validate_date(self.prod_date) {
            bad.push("prodDate");
        }
        if self.speed.is_some() && !validate_speed(self.speed) {
            bad.push("speed");
        }
        if self.crew_size.is_some() && !validate_crew_size(self.crew_size) {
            bad.push("crewSize");
        }
        bad
    }

    /// Names of fields required on create that are absent.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_none()),
            ("planet", self.planet.is_none()),
            ("shipType", self.ship_type.is_none()),
            ("prodDate", self.prod_date.is_none()),
            ("speed", self.speed.is_none()),
            ("crewSize", self.crew_size.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, missing)| missing.then_some(field))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::ShipType;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn valid_payload() -> ShipPayload {
        ShipPayload {
            name: Some("Orion".into()),
            planet: Some("Mars".into()),
            ship_type: Some(ShipType::Transport),
            prod_date: Some(at(2995, 3, 14)),
            is_used: None,
            speed: Some(0.42),
            crew_size: Some(17),
        }
    }

    #[test]
    fn string_bounds() {
        assert!(!validate_string(None));
        assert!(!validate_string(Some("")));
        assert!(validate_string(Some("a")));
        assert!(validate_string(Some(&"x".repeat(50))));
        assert!(!validate_string(Some(&"x".repeat(51))));
    }

    #[test]
    fn string_length_counts_characters() {
        assert!(validate_string(Some(&"ж".repeat(50))));
    }

    #[test]
    fn speed_bounds_are_inclusive() {
        assert!(!validate_speed(Some(0.00)));
        assert!(validate_speed(Some(0.01)));
        assert!(validate_speed(Some(0.99)));
        assert!(!validate_speed(Some(1.00)));
        assert!(!validate_speed(None));
        assert!(!validate_speed(Some(f64::NAN)));
    }

    #[test]
    fn crew_size_bounds_are_inclusive() {
        assert!(!validate_crew_size(Some(0)));
        assert!(validate_crew_size(Some(1)));
        assert!(validate_crew_size(Some(9999)));
        assert!(!validate_crew_size(Some(10000)));
        assert!(!validate_crew_size(None));
    }

    #[test]
    fn date_bounds_are_exclusive_years() {
        assert!(!validate_date(None));
        assert!(!validate_date(Some(at(2800, 1, 1))));
        assert!(!validate_date(Some(at(2800, 12, 31))));
        assert!(validate_date(Some(at(2801, 1, 1))));
        assert!(validate_date(Some(at(3018, 12, 31))));
        assert!(!validate_date(Some(at(3019, 1, 1))));
        assert!(!validate_date(Some(at(3019, 7, 1))));
    }

    #[test]
    fn every_inner_year_is_accepted() {
        for year in 2801..=3018 {
            assert!(validate_date(Some(at(year, 6, 15))), "year {year}");
        }
    }

    #[test]
    fn create_requires_all_fields_but_used() {
        assert!(validate_ship_for_create(Some(&valid_payload())));
        assert!(!validate_ship_for_create(None));

        let no_type = ShipPayload { ship_type: None, ..valid_payload() };
        assert!(!validate_ship_for_create(Some(&no_type)));

        let bad_speed = ShipPayload { speed: Some(1.5), ..valid_payload() };
        assert!(!validate_ship_for_create(Some(&bad_speed)));

        let no_date = ShipPayload { prod_date: None, ..valid_payload() };
        assert!(!validate_ship_for_create(Some(&no_date)));

        let used = ShipPayload { is_used: Some(true), ..valid_payload() };
        assert!(validate_ship_for_create(Some(&used)));
    }

    #[test]
    fn identifiers() {
        assert_eq!(convert_identifier("abc"), None);
        assert_eq!(convert_identifier(""), None);
        assert_eq!(convert_identifier("4.2"), None);
        assert_eq!(convert_identifier("42"), Some(42));
        assert_eq!(convert_identifier("-5"), Some(-5));
        assert_eq!(convert_identifier("99999999999999999999"), None);

        assert!(is_id_valid(Some(42)));
        assert!(!is_id_valid(Some(-5)));
        assert!(!is_id_valid(Some(0)));
        assert!(!is_id_valid(convert_identifier("abc")));
    }

    #[test]
    fn field_diagnostics() {
        let p = ShipPayload {
            name: Some(String::new()),
            crew_size: Some(0),
            ..ShipPayload::default()
        };
        assert_eq!(p.invalid_fields(), vec!["name", "crewSize"]);
        assert_eq!(p.missing_fields(), vec!["planet", "shipType", "prodDate", "speed"]);
        assert!(valid_payload().invalid_fields().is_empty());
        assert!(valid_payload().missing_fields().is_empty());
    }
}
