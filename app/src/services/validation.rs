// app/src/services/validation.rs

//! Request field rules for registration, login and product creation.
//! Each check returns the first failing rule's message.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use storefront_core::models::NewProduct;
use storefront_core::ShopError;

static EMAIL_RE: Lazy<Option<Regex>> =
  Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());
static NAME_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").ok());

const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 32;
const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;

fn matches(re: &Lazy<Option<Regex>>, value: &str) -> bool {
  re.as_ref().map(|r| r.is_match(value)).unwrap_or(false)
}

pub fn validate_email(email: &str) -> Result<(), ShopError> {
  if email.is_empty() {
    return Err(ShopError::validation("email is required"));
  }
  if !matches(&EMAIL_RE, email) {
    return Err(ShopError::validation("invalid email format"));
  }
  Ok(())
}

fn validate_new_password(password: &str) -> Result<(), ShopError> {
  let len = password.chars().count();
  if len == 0 {
    return Err(ShopError::validation("password is required"));
  }
  if len < PASSWORD_MIN {
    return Err(ShopError::validation("password must be at least 8 characters long"));
  }
  if len > PASSWORD_MAX {
    return Err(ShopError::validation("password must not exceed 32 characters"));
  }
  let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
  let has_digit = password.chars().any(|c| c.is_ascii_digit());
  if !(has_letter && has_digit) {
    return Err(ShopError::validation("password must contain at least one number and one letter"));
  }
  Ok(())
}

fn validate_name(value: &str, label: &str) -> Result<(), ShopError> {
  let len = value.chars().count();
  if len == 0 {
    return Err(ShopError::validation(format!("{} is required", label)));
  }
  if len < NAME_MIN {
    return Err(ShopError::validation(format!("{} must be at least 2 characters long", label)));
  }
  if len > NAME_MAX {
    return Err(ShopError::validation(format!("{} must not exceed 50 characters", label)));
  }
  if !matches(&NAME_RE, value) {
    return Err(ShopError::validation(format!("{} contains invalid characters", label)));
  }
  Ok(())
}

pub fn validate_registration(first_name: &str, last_name: &str, email: &str, password: &str) -> Result<(), ShopError> {
  validate_email(email)?;
  validate_new_password(password)?;
  validate_name(first_name, "first name")?;
  validate_name(last_name, "last name")
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ShopError> {
  validate_email(email)?;
  if password.is_empty() {
    return Err(ShopError::validation("password is required"));
  }
  if password.chars().count() < PASSWORD_MIN {
    return Err(ShopError::validation("password must be at least 8 characters long"));
  }
  Ok(())
}

pub fn validate_new_product(product: &NewProduct) -> Result<(), ShopError> {
  if product.name.trim().is_empty() {
    return Err(ShopError::validation("name is required"));
  }
  if product.description.trim().is_empty() {
    return Err(ShopError::validation("description is required"));
  }
  if product.image.trim().is_empty() {
    return Err(ShopError::validation("image is required"));
  }
  if product.price <= Decimal::ZERO {
    return Err(ShopError::validation("price must be greater than 0"));
  }
  if product.quantity < 0 {
    return Err(ShopError::validation("quantity cannot be negative"));
  }
  Ok(())
}
