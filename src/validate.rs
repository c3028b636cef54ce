//! Form input checks. Each validator answers pass/fail for one raw value;
//! `validate_form` runs rule lists over a whole form and keeps the first
//! failing message per field.

use crate::models::{RegisterRequest, Role};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Field name to the message of its first failing rule
pub type FormErrors = BTreeMap<&'static str, String>;

// A pattern that fails to build rejects every input.
fn email_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

fn phone_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\+90|0)?5[0-9]{9}$").ok())
        .as_ref()
}

pub fn validate_email(email: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(email))
}

/// At least 8 characters from `[A-Za-z0-9@$!%*?&]`, with a lowercase
/// letter, an uppercase letter and a digit
pub fn validate_password(password: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || "@$!%*?&".contains(c);

    password.chars().count() >= 8
        && password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Turkish mobile numbers, optionally prefixed with `+90` or `0`
pub fn validate_phone_number(phone_number: &str) -> bool {
    let compact: String = phone_number.chars().filter(|c| !c.is_whitespace()).collect();
    phone_regex().is_some_and(|re| re.is_match(&compact))
}

pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn validate_min_length(value: &str, min_length: usize) -> bool {
    !value.is_empty() && value.chars().count() >= min_length
}

pub fn validate_max_length(value: &str, max_length: usize) -> bool {
    !value.is_empty() && value.chars().count() <= max_length
}

pub fn validate_number(value: &str) -> bool {
    parse_number(value).is_some()
}

pub fn validate_price(price: &str) -> bool {
    parse_number(price).is_some_and(|p| p > 0.0)
}

pub fn validate_area(area: &str) -> bool {
    parse_number(area).is_some_and(|a| a > 0.0)
}

/// Finite decimal after trimming; empty or `NaN`/`inf` spellings are rejected
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    Password,
    Phone,
    MinLength(usize),
    MaxLength(usize),
    Number,
    Price,
    Area,
}

impl Rule {
    pub fn check(self, value: &str) -> bool {
        match self {
            Rule::Required => validate_required(value),
            Rule::Email => validate_email(value),
            Rule::Password => validate_password(value),
            Rule::Phone => validate_phone_number(value),
            Rule::MinLength(n) => validate_min_length(value, n),
            Rule::MaxLength(n) => validate_max_length(value, n),
            Rule::Number => validate_number(value),
            Rule::Price => validate_price(value),
            Rule::Area => validate_area(value),
        }
    }
}

/// Ordered rules for one field, each with the message shown when it fails
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: Vec<(Rule, &'static str)>,
}

impl FieldRules {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule, message: &'static str) -> Self {
        self.rules.push((rule, message));
        self
    }
}

/// Runs every field's rules; a field missing from `data` is checked as empty.
pub fn validate_form(data: &BTreeMap<&str, &str>, rules: &[FieldRules]) -> FormErrors {
    let mut errors = FormErrors::new();

    for field in rules {
        let value = data.get(field.field).copied().unwrap_or("");
        if let Some((_, message)) = field.rules.iter().find(|(rule, _)| !rule.check(value)) {
            errors.insert(field.field, message.to_string());
        }
    }

    errors
}

pub fn login_rules() -> Vec<FieldRules> {
    vec![
        FieldRules::new("email")
            .rule(Rule::Required, "E-posta adresi gereklidir")
            .rule(Rule::Email, "Geçerli bir e-posta adresi giriniz"),
        FieldRules::new("password")
            .rule(Rule::Required, "Şifre gereklidir")
            .rule(Rule::MinLength(6), "Şifre en az 6 karakter olmalıdır"),
    ]
}

pub fn validate_login(email: &str, password: &str) -> FormErrors {
    let data = BTreeMap::from([("email", email), ("password", password)]);
    validate_form(&data, &login_rules())
}

/// Registration checks: matching passwords, a chosen role, and the
/// name/contact fields that role requires.
pub fn validate_registration(request: &RegisterRequest) -> FormErrors {
    let mut rules = vec![FieldRules::new("email")
        .rule(Rule::Required, "E-posta adresi gereklidir")
        .rule(Rule::Email, "Geçerli bir e-posta adresi giriniz")];

    let person = [
        FieldRules::new("firstName").rule(Rule::Required, "Ad gereklidir"),
        FieldRules::new("lastName").rule(Rule::Required, "Soyad gereklidir"),
        FieldRules::new("phoneNumber").rule(Rule::Required, "Telefon numarası gereklidir"),
        FieldRules::new("address").rule(Rule::Required, "Adres gereklidir"),
    ];
    match request.role {
        Some(Role::Customer) => rules.extend(person),
        Some(Role::Business) => {
            rules.push(
                FieldRules::new("businessName").rule(Rule::Required, "İşletme adı gereklidir"),
            );
            rules.extend(person);
        }
        None => {}
    }

    let data = BTreeMap::from([
        ("email", request.email.as_str()),
        ("firstName", request.first_name.as_str()),
        ("lastName", request.last_name.as_str()),
        ("businessName", request.business_name.as_str()),
        ("phoneNumber", request.phone_number.as_str()),
        ("address", request.address.as_str()),
    ]);
    let mut errors = validate_form(&data, &rules);

    if request.password != request.confirm_password {
        errors.insert("confirmPassword", "Şifreler uyuşmuyor!".to_string());
    }
    if request.role.is_none() {
        errors.insert("role", "Lütfen bir kullanıcı rolü seçiniz.".to_string());
    }

    errors
}
