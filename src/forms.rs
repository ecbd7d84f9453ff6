//! Booking and career form payloads with their validation rules.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("valid time regex"));

const NAME_MESSAGE: &str = "Имя должно содержать от 2 до 100 символов";
const PHONE_MESSAGE: &str = "Введите корректный номер телефона";
const EMAIL_MESSAGE: &str = "Введите корректный email";
const POSITION_MESSAGE: &str = "Выберите вакансию";
const DATE_MESSAGE: &str = "Выберите корректную дату в будущем";
const TIME_MESSAGE: &str = "Выберите корректное время";
const GUESTS_MESSAGE: &str = "Количество гостей должно быть от 1 до 50";

pub const MIN_GUESTS: i64 = 1;
pub const MAX_GUESTS: i64 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingForm {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl BookingForm {
    pub fn validate(&self) -> Vec<FieldError> {
        self.validate_on(Local::now().date_naive())
    }

    /// Validates against a given "today" so the future-date rule is testable.
    pub fn validate_on(&self, today: NaiveDate) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !is_valid_name(&self.name) {
            errors.push(FieldError::new("name", NAME_MESSAGE));
        }
        if !is_valid_phone(&self.phone) {
            errors.push(FieldError::new("phone", PHONE_MESSAGE));
        }
        if !self
            .date
            .as_deref()
            .is_some_and(|d| is_valid_future_date(d, today))
        {
            errors.push(FieldError::new("date", DATE_MESSAGE));
        }
        if !self.time.as_deref().is_some_and(|t| TIME_RE.is_match(t)) {
            errors.push(FieldError::new("time", TIME_MESSAGE));
        }
        if !self
            .guests
            .is_some_and(|g| (MIN_GUESTS..=MAX_GUESTS).contains(&g))
        {
            errors.push(FieldError::new("guests", GUESTS_MESSAGE));
        }
        errors
    }

    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize_input(&self.name),
            phone: sanitize_input(&self.phone),
            date: self.date.as_deref().map(sanitize_input),
            time: self.time.as_deref().map(sanitize_input),
            guests: self.guests,
            comment: self.comment.as_deref().map(sanitize_input),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerForm {
    pub name: String,
    pub phone: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CareerForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !is_valid_name(&self.name) {
            errors.push(FieldError::new("name", NAME_MESSAGE));
        }
        if !is_valid_phone(&self.phone) {
            errors.push(FieldError::new("phone", PHONE_MESSAGE));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if !is_valid_email(email) {
                errors.push(FieldError::new("email", EMAIL_MESSAGE));
            }
        }
        if self.position.trim().is_empty() {
            errors.push(FieldError::new("position", POSITION_MESSAGE));
        }
        errors
    }

    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize_input(&self.name),
            phone: sanitize_input(&self.phone),
            position: sanitize_input(&self.position),
            email: self.email.as_deref().map(sanitize_input),
            message: self.message.as_deref().map(sanitize_input),
        }
    }
}

pub fn is_valid_name(name: &str) -> bool {
    let len = name.trim().chars().count();
    (2..=100).contains(&len)
}

/// Belarus numbers: 375XXXXXXXXX or a bare 9-digit local number
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    digits == 12 || digits == 9
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// `YYYY-MM-DD`, strictly after `today`
pub fn is_valid_future_date(date: &str, today: NaiveDate) -> bool {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d > today)
        .unwrap_or(false)
}

/// Trims and HTML-escapes user input.
pub fn sanitize_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    fn booking() -> BookingForm {
        BookingForm {
            name: "Иван Иванов".into(),
            phone: "+375 (29) 123-45-67".into(),
            date: Some("2025-10-15".into()),
            time: Some("19:30".into()),
            guests: Some(4),
            comment: None,
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn accepts_complete_booking() {
        assert!(booking().validate_on(today()).is_empty());
    }

    #[test]
    fn rejects_past_and_same_day_dates() {
        let mut form = booking();
        form.date = Some("2025-09-30".into());
        assert_eq!(fields(&form.validate_on(today())), vec!["date"]);

        form.date = Some("2025-10-01".into());
        assert_eq!(fields(&form.validate_on(today())), vec!["date"]);

        form.date = Some("15.10.2025".into());
        assert_eq!(fields(&form.validate_on(today())), vec!["date"]);
    }

    #[test]
    fn reports_every_invalid_field() {
        let form = BookingForm {
            name: " a ".into(),
            phone: "12345".into(),
            date: None,
            time: Some("24:00".into()),
            guests: Some(51),
            comment: None,
        };
        assert_eq!(
            fields(&form.validate_on(today())),
            vec!["name", "phone", "date", "time", "guests"]
        );
    }

    #[test]
    fn guest_bounds_are_inclusive() {
        let mut form = booking();
        form.guests = Some(1);
        assert!(form.validate_on(today()).is_empty());
        form.guests = Some(50);
        assert!(form.validate_on(today()).is_empty());
        form.guests = Some(0);
        assert_eq!(fields(&form.validate_on(today())), vec!["guests"]);
    }

    #[test]
    fn phone_accepts_nine_or_twelve_digits() {
        assert!(is_valid_phone("291234567"));
        assert!(is_valid_phone("+375 29 123 45 67"));
        assert!(!is_valid_phone("+375 29 123 45 6"));
    }

    #[test]
    fn career_email_is_optional_but_checked() {
        let mut form = CareerForm {
            name: "Мария".into(),
            phone: "375291234567".into(),
            position: "Официант".into(),
            email: None,
            message: None,
        };
        assert!(form.validate().is_empty());

        form.email = Some("maria@example".into());
        assert_eq!(fields(&form.validate()), vec!["email"]);

        form.email = Some("maria@example.by".into());
        form.position = "  ".into();
        assert_eq!(fields(&form.validate()), vec!["position"]);
    }

    #[test]
    fn sanitizes_markup() {
        assert_eq!(
            sanitize_input("  <b>\"Hi\" it's a/b</b> "),
            "&lt;b&gt;&quot;Hi&quot; it&#x27;s a&#x2F;b&lt;&#x2F;b&gt;"
        );
        let form = CareerForm {
            name: "<Петр>".into(),
            ..Default::default()
        };
        assert_eq!(form.sanitized().name, "&lt;Петр&gt;");
    }
}
