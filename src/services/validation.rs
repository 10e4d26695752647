//! Form validation. Each form collects every failing field before
//! returning, so a client can mark all of them at once.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::event::CreateEventPayload;
use crate::models::payment::{PaymentContact, PaymentProofUpload};
use crate::models::user::{LoginPayload, RegisterPayload, UserRole};
use crate::utils::error::{AppError, FieldError};

pub const MAX_PROOF_BYTES: u64 = 5 * 1024 * 1024;

const EMAIL_MESSAGE: &str = "Please enter a valid email address";

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn min_len(&mut self, value: &str, min: usize, field: &str, message: &str) -> &mut Self {
        self.check(value.trim().chars().count() >= min, field, message)
    }

    pub fn email(&mut self, value: &str, field: &str) -> &mut Self {
        self.check(is_valid_email(value), field, EMAIL_MESSAGE)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(self.errors))
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

pub fn validate_login(form: &LoginPayload) -> Result<(), AppError> {
    let mut v = Validator::new();
    v.email(&form.email, "email").min_len(
        &form.password,
        8,
        "password",
        "Password must be at least 8 characters",
    );
    v.finish()
}

pub fn validate_register(form: &RegisterPayload) -> Result<UserRole, AppError> {
    let mut v = Validator::new();
    v.min_len(&form.name, 3, "name", "Name must be at least 3 characters")
        .email(&form.email, "email")
        .min_len(
            &form.password,
            8,
            "password",
            "Password must be at least 8 characters",
        )
        .min_len(
            &form.confirm_password,
            8,
            "confirm_password",
            "Confirm password must be at least 8 characters",
        );
    if !v.has_error("confirm_password") {
        v.check(
            form.password == form.confirm_password,
            "confirm_password",
            "Passwords don't match",
        );
    }
    let role = UserRole::parse(&form.role);
    v.check(role.is_some(), "role", "You need to select a user type");
    v.finish()?;

    role.ok_or_else(|| AppError::invalid_field("role", "You need to select a user type"))
}

/// Returns the seat count as the stored integer type once the form passes.
pub fn validate_create_event(form: &CreateEventPayload) -> Result<u32, AppError> {
    let mut v = Validator::new();
    v.min_len(&form.name, 5, "name", "Event name must be at least 5 characters")
        .min_len(
            &form.description,
            20,
            "description",
            "Description must be at least 20 characters",
        )
        .min_len(&form.category, 1, "category", "Please select a category")
        .min_len(&form.location, 1, "location", "Please select a location")
        .check(
            form.start_date.is_some(),
            "start_date",
            "Please select a start date",
        )
        .check(
            form.end_date.is_some(),
            "end_date",
            "Please select an end date",
        );

    if let (Some(start), Some(end)) = (form.start_date, form.end_date) {
        v.check(end >= start, "end_date", "End date must be after start date");
    }

    v.check(
        form.price >= Decimal::ZERO,
        "price",
        "Price must be at least 0",
    );
    if !v.has_error("price") {
        v.check(
            form.is_free || form.price > Decimal::ZERO,
            "price",
            "Price must be greater than 0 for paid events",
        );
    }
    if !v.has_error("price") {
        v.check(
            form.price.fract().is_zero(),
            "price",
            "Price must be a whole amount",
        );
    }
    // Points are whole u64 amounts and must be able to cover the price.
    if !v.has_error("price") {
        v.check(form.price.to_u64().is_some(), "price", "Price is too large");
    }

    let seats = u32::try_from(form.available_seats).ok().filter(|s| *s >= 1);
    v.check(
        seats.is_some(),
        "available_seats",
        "Available seats must be at least 1",
    );
    v.finish()?;

    seats.ok_or_else(|| {
        AppError::invalid_field("available_seats", "Available seats must be at least 1")
    })
}

pub fn validate_contact(form: &PaymentContact) -> Result<(), AppError> {
    let mut v = Validator::new();
    v.min_len(&form.name, 3, "name", "Name must be at least 3 characters")
        .email(&form.email, "email")
        .min_len(
            &form.phone,
            10,
            "phone",
            "Phone number must be at least 10 characters",
        );
    v.finish()
}

pub fn validate_payment_proof(upload: &PaymentProofUpload) -> Result<(), AppError> {
    let mut v = Validator::new();
    v.min_len(&upload.file_name, 1, "payment_proof", "Please choose a file")
        .check(
            upload.content_type.trim().starts_with("image/"),
            "payment_proof",
            "Payment proof must be an image",
        )
        .check(
            upload.size_bytes > 0 && upload.size_bytes <= MAX_PROOF_BYTES,
            "payment_proof",
            "Payment proof must be at most 5MB",
        );
    v.finish()
}
