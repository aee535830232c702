use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};

use crate::errors::BookingError;
use crate::models::catalog;
use crate::models::NewBooking;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_SPECIAL_REQUESTS_LEN: usize = 500;

/// Minimum time between successive submissions from one form session.
pub const SUBMISSION_COOLDOWN: Duration = Duration::from_secs(60);

/// Two or more hits against this list flags the submission as spam.
const SPAM_KEYWORDS: [&str; 25] = [
    "free money",
    "click here",
    "buy now",
    "limited time",
    "act now",
    "winner",
    "congratulations",
    "lottery",
    "inheritance",
    "viagra",
    "casino",
    "jackpot",
    "bitcoin",
    "crypto",
    "forex",
    "investment opportunity",
    "work from home",
    "make money fast",
    "cheap pills",
    "seo services",
    "backlinks",
    "guaranteed income",
    "no credit check",
    "wire transfer",
    "nigerian prince",
];

/// Raw form fields exactly as submitted, before any trimming.
#[derive(Debug, Clone, Default)]
pub struct BookingRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub date: String,
    pub time: String,
    pub hair_length: String,
    pub hair_texture: String,
    pub special_requests: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    pub fields: BTreeMap<&'static str, String>,
    pub general: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_none()
    }

    fn add(&mut self, field: &'static str, message: &str) {
        self.fields.entry(field).or_insert_with(|| message.to_string());
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect();
        if let Some(general) = &self.general {
            parts.push(general.clone());
        }
        f.write_str(&parts.join("; "))
    }
}

/// Field-level validation plus spam heuristics. Everything here is advisory:
/// it runs on the submitting side and is not a trust boundary.
pub fn validate(request: &BookingRequest) -> ValidationErrors {
    validate_on(request, Local::now().date_naive())
}

/// Same as [`validate`] with `today` injected, so tests are not tied to the
/// wall clock.
pub fn validate_on(request: &BookingRequest, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    let first_name = request.first_name.trim();
    let last_name = request.last_name.trim();
    let email = request.email.trim();
    let phone = request.phone.trim();
    let service = request.service.trim();
    let date = request.date.trim();
    let time = request.time.trim();
    let hair_length = request.hair_length.trim();
    let hair_texture = request.hair_texture.trim();
    let special_requests = request.special_requests.trim();

    if first_name.is_empty() {
        errors.add("firstName", "First name is required");
    }
    if last_name.is_empty() {
        errors.add("lastName", "Last name is required");
    }
    if email.is_empty() {
        errors.add("email", "Email is required");
    }
    if phone.is_empty() {
        errors.add("phone", "Phone number is required");
    }
    if service.is_empty() {
        errors.add("service", "Please select a service");
    }
    if date.is_empty() {
        errors.add("date", "Please select a date");
    }
    if time.is_empty() {
        errors.add("time", "Please select a time");
    }
    if hair_length.is_empty() {
        errors.add("hairLength", "Please select hair length");
    }
    if hair_texture.is_empty() {
        errors.add("hairTexture", "Please select hair texture");
    }

    if first_name.chars().count() > MAX_NAME_LEN {
        errors.add("firstName", "First name must be 50 characters or fewer");
    }
    if last_name.chars().count() > MAX_NAME_LEN {
        errors.add("lastName", "Last name must be 50 characters or fewer");
    }
    if special_requests.chars().count() > MAX_SPECIAL_REQUESTS_LEN {
        errors.add("specialRequests", "Special requests must be 500 characters or fewer");
    }

    if !email.is_empty() && !is_valid_email(email) {
        errors.add("email", "Please enter a valid email address");
    }
    if !phone.is_empty() && !is_valid_phone(phone) {
        errors.add("phone", "Please enter a valid phone number");
    }

    if !date.is_empty() {
        match date.parse::<NaiveDate>() {
            Ok(d) if d < today => errors.add("date", "Please select a future date"),
            Ok(_) => {}
            Err(_) => errors.add("date", "Please enter a valid date"),
        }
    }

    if !service.is_empty() && !catalog::is_known_service(service) {
        errors.add("service", "Please select a service from the list");
    }
    if !time.is_empty() && !catalog::is_known_slot(time) {
        errors.add("time", "Please select a time from the list");
    }
    if !hair_length.is_empty() && !catalog::is_known_hair_length(hair_length) {
        errors.add("hairLength", "Please select hair length from the list");
    }
    if !hair_texture.is_empty() && !catalog::is_known_hair_texture(hair_texture) {
        errors.add("hairTexture", "Please select hair texture from the list");
    }

    let free_text = format!("{first_name} {last_name} {special_requests}");
    if looks_like_spam(&free_text) {
        errors.general = Some("Your submission was flagged as spam. Please contact us directly.".to_string());
    } else if has_suspicious_patterns(&free_text, email) {
        errors.general = Some("Your submission contains content we cannot accept. Please contact us directly.".to_string());
    }

    errors
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(l), Some(d)) => (l, d),
        _ => return false,
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Domain needs an interior dot: "example.com", not ".com" or "example."
    match domain.rfind('.') {
        Some(idx) => idx > 0 && idx < domain.len() - 1,
        None => false,
    }
}

/// Loose international pattern: optional `+`, leading digit 1-9, at most 16
/// digits total, after stripping spaces, dashes and parentheses.
fn is_valid_phone(phone: &str) -> bool {
    let stripped: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = stripped.strip_prefix('+').unwrap_or(&stripped);

    !digits.is_empty()
        && digits.len() <= 16
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0')
}

fn looks_like_spam(text: &str) -> bool {
    let lower = text.to_lowercase();

    let keyword_hits = SPAM_KEYWORDS.iter().filter(|kw| lower.contains(*kw)).count();
    if keyword_hits >= 2 {
        return true;
    }

    if lower.matches("http").count() >= 2 {
        return true;
    }

    // Mostly-uppercase text reads as shouting bait; short inputs (all-caps
    // names) are exempt.
    let total = text.chars().filter(|c| !c.is_whitespace()).count();
    if total > 10 {
        let upper = text.chars().filter(|c| c.is_uppercase()).count();
        if upper as f64 / total as f64 > 0.5 {
            return true;
        }
    }

    false
}

fn has_suspicious_patterns(free_text: &str, email: &str) -> bool {
    let lower = free_text.to_lowercase();
    lower.contains("http://") || lower.contains("https://") || email.contains("..")
}

/// Trims and defensively truncates, maps empty optionals to `None`, and
/// joins the name fields. Assumes [`validate`] has already passed; an
/// unparsable date still comes back as a validation error rather than a panic.
pub fn sanitize(request: &BookingRequest) -> Result<NewBooking, BookingError> {
    let date: NaiveDate = request.date.trim().parse().map_err(|_| {
        let mut errors = ValidationErrors::default();
        errors.add("date", "Please enter a valid date");
        BookingError::Validation(errors)
    })?;

    let first_name = truncate(request.first_name.trim(), MAX_NAME_LEN);
    let last_name = truncate(request.last_name.trim(), MAX_NAME_LEN);

    Ok(NewBooking {
        customer_name: format!("{first_name} {last_name}"),
        email: request.email.trim().to_string(),
        phone: request.phone.trim().to_string(),
        service: request.service.trim().to_string(),
        date,
        time: request.time.trim().to_string(),
        hair_length: request.hair_length.trim().to_string(),
        hair_texture: request.hair_texture.trim().to_string(),
        special_requests: optional(truncate(
            request.special_requests.trim(),
            MAX_SPECIAL_REQUESTS_LEN,
        )),
        address: optional(request.address.trim().to_string()),
        city: optional(request.city.trim().to_string()),
        zip_code: optional(request.zip_code.trim().to_string()),
    })
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

fn optional(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Soft, session-local throttle between submissions. Not a distributed rate
/// limiter: each form session tracks only its own last successful submission.
pub struct RateLimiter {
    min_interval: Duration,
    last_submission: Option<Instant>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_interval(SUBMISSION_COOLDOWN)
    }

    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_submission: None,
        }
    }

    pub fn check(&self) -> Result<(), BookingError> {
        self.check_at(Instant::now())
    }

    fn check_at(&self, now: Instant) -> Result<(), BookingError> {
        if let Some(last) = self.last_submission {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.min_interval {
                let remaining = self.min_interval - elapsed;
                return Err(BookingError::RateLimited {
                    retry_after_secs: remaining.as_secs().max(1),
                });
            }
        }
        Ok(())
    }

    /// Call after a successful submission; failed attempts do not count.
    pub fn record(&mut self) {
        self.last_submission = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> BookingRequest {
        BookingRequest {
            first_name: "Ama".to_string(),
            last_name: "Mensah".to_string(),
            email: "ama@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            service: "box-braids".to_string(),
            date: "2099-01-01".to_string(),
            time: "9:00 AM".to_string(),
            hair_length: "Long".to_string(),
            hair_texture: "Thick".to_string(),
            special_requests: "Please use ombre extensions".to_string(),
            address: String::new(),
            city: String::new(),
            zip_code: String::new(),
        }
    }

    fn today() -> NaiveDate {
        "2026-08-29".parse().unwrap()
    }

    #[test]
    fn test_valid_request_passes() {
        let errors = validate_on(&valid_request(), today());
        assert!(errors.is_empty(), "unexpected errors: {errors}");
    }

    #[test]
    fn test_required_fields() {
        let errors = validate_on(&BookingRequest::default(), today());
        for field in [
            "firstName",
            "lastName",
            "email",
            "phone",
            "service",
            "date",
            "time",
            "hairLength",
            "hairTexture",
        ] {
            assert!(errors.fields.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut request = valid_request();
        request.first_name = "   ".to_string();
        let errors = validate_on(&request, today());
        assert!(errors.fields.contains_key("firstName"));
    }

    #[test]
    fn test_name_length_bound() {
        let mut request = valid_request();
        request.first_name = "a".repeat(51);
        let errors = validate_on(&request, today());
        assert!(errors.fields.contains_key("firstName"));

        request.first_name = "a".repeat(50);
        assert!(validate_on(&request, today()).is_empty());
    }

    #[test]
    fn test_special_requests_length_bound() {
        let mut request = valid_request();
        request.special_requests = "x".repeat(501);
        let errors = validate_on(&request, today());
        assert!(errors.fields.contains_key("specialRequests"));
    }

    #[test]
    fn test_email_format() {
        let mut request = valid_request();
        for bad in ["plainaddress", "no@tld", "two@@example.com", "a b@example.com", "@example.com"] {
            request.email = bad.to_string();
            let errors = validate_on(&request, today());
            assert!(errors.fields.contains_key("email"), "accepted {bad:?}");
        }

        request.email = "good.name+tag@sub.example.co".to_string();
        assert!(validate_on(&request, today()).is_empty());
    }

    #[test]
    fn test_phone_format() {
        let mut request = valid_request();
        for bad in ["not-a-phone", "0555123", "12345678901234567"] {
            request.phone = bad.to_string();
            let errors = validate_on(&request, today());
            assert!(errors.fields.contains_key("phone"), "accepted {bad:?}");
        }

        for good in ["+1 (555) 123-4567", "5551234567", "+447911123456"] {
            request.phone = good.to_string();
            assert!(validate_on(&request, today()).is_empty(), "rejected {good:?}");
        }
    }

    #[test]
    fn test_past_date_rejected() {
        let mut request = valid_request();
        request.date = "2026-08-28".to_string();
        let errors = validate_on(&request, today());
        assert_eq!(errors.fields.get("date").unwrap(), "Please select a future date");

        // Same-day bookings are allowed; only strictly-past dates fail.
        request.date = "2026-08-29".to_string();
        assert!(validate_on(&request, today()).is_empty());
    }

    #[test]
    fn test_garbage_date_rejected() {
        let mut request = valid_request();
        request.date = "tomorrow".to_string();
        let errors = validate_on(&request, today());
        assert!(errors.fields.contains_key("date"));
    }

    #[test]
    fn test_unknown_catalog_values_rejected() {
        let mut request = valid_request();
        request.service = "perm".to_string();
        request.time = "6:00 PM".to_string();
        request.hair_length = "Gigantic".to_string();
        let errors = validate_on(&request, today());
        assert!(errors.fields.contains_key("service"));
        assert!(errors.fields.contains_key("time"));
        assert!(errors.fields.contains_key("hairLength"));
    }

    #[test]
    fn test_spam_keywords_need_two_hits() {
        let mut request = valid_request();
        request.special_requests = "I am a lottery winner".to_string();
        let errors = validate_on(&request, today());
        assert!(errors.general.is_some());

        request.special_requests = "lottery tickets as a theme".to_string();
        let errors = validate_on(&request, today());
        assert!(errors.general.is_none(), "single keyword should pass");
    }

    #[test]
    fn test_spam_two_urls() {
        let mut request = valid_request();
        request.special_requests =
            "see http://a.example and http://b.example for inspiration".to_string();
        assert!(validate_on(&request, today()).general.is_some());
    }

    #[test]
    fn test_spam_shouting() {
        let mut request = valid_request();
        request.special_requests = "AMAZING DEAL JUST FOR YOU TODAY".to_string();
        assert!(validate_on(&request, today()).general.is_some());
    }

    #[test]
    fn test_all_caps_short_name_is_fine() {
        let mut request = valid_request();
        request.first_name = "LI".to_string();
        request.last_name = "NA".to_string();
        request.special_requests = String::new();
        assert!(validate_on(&request, today()).is_empty());
    }

    #[test]
    fn test_suspicious_single_url() {
        let mut request = valid_request();
        request.special_requests = "style like https://example.com/look".to_string();
        assert!(validate_on(&request, today()).general.is_some());
    }

    #[test]
    fn test_suspicious_double_dot_email() {
        let mut request = valid_request();
        request.email = "a..b@example.com".to_string();
        assert!(validate_on(&request, today()).general.is_some());
    }

    #[test]
    fn test_sanitize_trims_and_joins_name() {
        let mut request = valid_request();
        request.first_name = "  Ama ".to_string();
        request.last_name = " Mensah  ".to_string();
        request.city = "  ".to_string();

        let data = sanitize(&request).unwrap();
        assert_eq!(data.customer_name, "Ama Mensah");
        assert_eq!(data.city, None);
        assert_eq!(data.special_requests.as_deref(), Some("Please use ombre extensions"));
    }

    #[test]
    fn test_sanitize_truncates_defensively() {
        let mut request = valid_request();
        request.special_requests = "y".repeat(600);
        let data = sanitize(&request).unwrap();
        assert_eq!(data.special_requests.unwrap().chars().count(), 500);
    }

    #[test]
    fn test_rate_limiter_first_submission_allowed() {
        let limiter = RateLimiter::new();
        assert!(limiter.check().is_ok());
    }

    #[test]
    fn test_rate_limiter_blocks_within_cooldown() {
        let mut limiter = RateLimiter::new();
        limiter.record();

        let err = limiter.check().unwrap_err();
        match err {
            BookingError::RateLimited { retry_after_secs } => {
                assert!(retry_after_secs >= 1 && retry_after_secs <= 60);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rate_limiter_allows_after_cooldown() {
        let mut limiter = RateLimiter::new();
        let past = Instant::now() - Duration::from_secs(60);
        limiter.last_submission = Some(past);

        assert!(limiter.check_at(Instant::now()).is_ok());
    }

    #[test]
    fn test_rate_limiter_boundary_just_under() {
        let mut limiter = RateLimiter::new();
        let now = Instant::now();
        limiter.last_submission = Some(now - Duration::from_secs(59));

        assert!(limiter.check_at(now).is_err());
    }

    #[test]
    fn test_failed_attempts_do_not_arm_the_limiter() {
        let limiter = RateLimiter::new();
        // check() alone never arms the cooldown; only record() does.
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
    }
}
