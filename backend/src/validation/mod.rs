//! Request input validation rules.
//!
//! Pure functions that collect every field failure into an ordered map keyed
//! by wire field name (camelCase where the API uses it). An empty map means
//! the input passed. Nothing here touches the store or the request; handlers
//! decide the HTTP rendering.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Field name → message, ordered by field name so rendered bodies are stable.
pub type FieldErrors = BTreeMap<String, String>;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern compiles")
});

/// Fields accepted by the credential login operation.
#[derive(Debug, Default)]
pub struct CredentialFields<'a> {
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
}

/// Fields accepted by the credential registration operation.
#[derive(Debug, Default)]
pub struct RegistrationFields<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
}

/// Fields accepted by the full-profile registration operation.
#[derive(Debug, Default)]
pub struct FullRegistrationFields<'a> {
    pub full_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub password: Option<&'a str>,
    pub confirm_password: Option<&'a str>,
}

/// Fields accepted by product create. Price arrives as raw JSON because the
/// API accepts both numbers and numeric strings.
#[derive(Debug, Default)]
pub struct ProductFields<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: Option<&'a Value>,
}

pub fn validate_registration(fields: &RegistrationFields<'_>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, "name", "Name", fields.name);
    check_email(&mut errors, fields.email);
    check_password(&mut errors, fields.password);
    errors
}

pub fn validate_credentials(fields: &CredentialFields<'_>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, fields.email);
    check_password(&mut errors, fields.password);
    errors
}

pub fn validate_full_registration(fields: &FullRegistrationFields<'_>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, "fullName", "Full Name", fields.full_name);
    check_email(&mut errors, fields.email);
    check_phone(&mut errors, fields.phone);
    check_password(&mut errors, fields.password);
    check_confirm_password(&mut errors, fields.password, fields.confirm_password);
    errors
}

pub fn validate_product(fields: &ProductFields<'_>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required_text(&mut errors, "title", "Title is required", fields.title);
    check_required_text(
        &mut errors,
        "description",
        "Description is required",
        fields.description,
    );
    check_price(&mut errors, fields.price, true);
    errors
}

/// Update variant: each field is validated only when the caller supplied it.
pub fn validate_product_changes(fields: &ProductFields<'_>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if fields.title.is_some() {
        check_required_text(&mut errors, "title", "Title is required", fields.title);
    }
    if fields.description.is_some() {
        check_required_text(
            &mut errors,
            "description",
            "Description is required",
            fields.description,
        );
    }
    check_price(&mut errors, fields.price, false);
    errors
}

/// Lowercased, trimmed form used for storage and uniqueness comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Digit-only form of a phone number, the shape stored and returned.
pub fn extract_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Accepts a JSON number or a numeric string; rejects everything else and
/// non-finite values.
pub fn parse_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|p| p.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()),
        _ => None,
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|s| s.trim().is_empty())
}

fn check_name(errors: &mut FieldErrors, field: &str, label: &str, value: Option<&str>) {
    if is_blank(value) {
        errors.insert(field.to_string(), format!("{label} is required"));
    } else if value.unwrap_or_default().trim().chars().count() < 2 {
        errors.insert(
            field.to_string(),
            format!("{label} must be at least 2 characters long"),
        );
    }
}

fn check_email(errors: &mut FieldErrors, value: Option<&str>) {
    if is_blank(value) {
        errors.insert("email".to_string(), "Email is required".to_string());
    } else if !EMAIL_PATTERN.is_match(value.unwrap_or_default().trim()) {
        errors.insert(
            "email".to_string(),
            "Must be a valid email format".to_string(),
        );
    }
}

fn check_password(errors: &mut FieldErrors, value: Option<&str>) {
    if is_blank(value) {
        errors.insert("password".to_string(), "Password is required".to_string());
    } else if value.unwrap_or_default().trim().chars().count() < 6 {
        errors.insert(
            "password".to_string(),
            "Password must be at least 6 characters long".to_string(),
        );
    }
}

fn check_phone(errors: &mut FieldErrors, value: Option<&str>) {
    if is_blank(value) {
        errors.insert(
            "phone".to_string(),
            "Phone number is required".to_string(),
        );
    } else {
        let digits = extract_digits(value.unwrap_or_default());
        if digits.len() < 10 || digits.len() > 15 {
            errors.insert(
                "phone".to_string(),
                "Phone must contain 10 to 15 digits only".to_string(),
            );
        }
    }
}

fn check_confirm_password(
    errors: &mut FieldErrors,
    password: Option<&str>,
    confirm: Option<&str>,
) {
    if is_blank(confirm) {
        errors.insert(
            "confirmPassword".to_string(),
            "Confirm Password is required".to_string(),
        );
    } else if password.unwrap_or_default().trim() != confirm.unwrap_or_default().trim() {
        errors.insert(
            "confirmPassword".to_string(),
            "Passwords do not match".to_string(),
        );
    }
}

fn check_required_text(errors: &mut FieldErrors, field: &str, message: &str, value: Option<&str>) {
    if is_blank(value) {
        errors.insert(field.to_string(), message.to_string());
    }
}

fn check_price(errors: &mut FieldErrors, value: Option<&Value>, required: bool) {
    let blank = match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    };
    if blank {
        if required {
            errors.insert("price".to_string(), "Price is required".to_string());
        }
        return;
    }
    match value.and_then(parse_price) {
        Some(price) if price > 0.0 => {}
        Some(_) => {
            errors.insert(
                "price".to_string(),
                "Price must be a positive number".to_string(),
            );
        }
        None => {
            errors.insert(
                "price".to_string(),
                "Price must be a valid number".to_string(),
            );
        }
    }
}
