//! Field-level validation of school submissions.
//!
//! This is the authoritative check for every create request, independent of
//! whatever a form layer verified before submitting. All problems are
//! collected so the caller can report them in one response.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::{is_known_state, OTHER_CITY};
use crate::paths::{image_extensions, is_image_file};
use crate::types::{ImageUpload, SchoolSubmission};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Check that a contact number is exactly 10 ASCII digits.
pub fn is_valid_contact(contact: &str) -> bool {
    contact.len() == 10 && contact.bytes().all(|b| b.is_ascii_digit())
}

/// Check that an address has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// A single rejected field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name as submitted by the client (e.g. `emailId`).
    pub field: String,
    pub message: String,
}

/// All problems found in one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether a given field was rejected.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Tunable limits applied on top of the required-field checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Reject images larger than this many bytes. `None` disables the ceiling.
    pub max_image_bytes: Option<usize>,
    /// Require `state` to be one of the known states.
    pub restrict_states: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_image_bytes: Some(5 * 1024 * 1024),
            restrict_states: true,
        }
    }
}

/// A submission whose every field passed validation. Text is trimmed and
/// `city` already holds the custom value when `Other` was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    pub image: ImageUpload,
}

/// Validates submissions against a [`ValidationPolicy`].
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: ValidationPolicy,
}

impl Validator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    /// Validate a raw submission.
    ///
    /// # Returns
    ///
    /// * `Ok(ValidSubmission)` - Every field is present and well-formed
    /// * `Err(ValidationErrors)` - One entry per rejected field
    pub fn validate(
        &self,
        submission: SchoolSubmission,
    ) -> std::result::Result<ValidSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = required(&mut errors, "name", submission.name);
        let address = required(&mut errors, "address", submission.address);
        let city = required(&mut errors, "city", submission.city);
        let state = required(&mut errors, "state", submission.state);
        let contact = required(&mut errors, "contact", submission.contact);
        let email_id = required(&mut errors, "emailId", submission.email_id);

        let city = city.and_then(|city| {
            if city != OTHER_CITY {
                return Some(city);
            }
            let custom = submission
                .custom_city
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty());
            if custom.is_none() {
                errors.push("customCity", "customCity is required when city is Other");
            }
            custom
        });

        if let Some(ref state) = state {
            if self.policy.restrict_states && !is_known_state(state) {
                errors.push("state", format!("state '{}' is not a known state", state));
            }
        }

        if let Some(ref contact) = contact {
            if !is_valid_contact(contact) {
                errors.push("contact", "contact must be exactly 10 digits");
            }
        }

        if let Some(ref email) = email_id {
            if !is_valid_email(email) {
                errors.push("emailId", "emailId must be a valid email address");
            }
        }

        let image = self.check_image(&mut errors, submission.image);

        match (name, address, city, state, contact, email_id, image) {
            (
                Some(name),
                Some(address),
                Some(city),
                Some(state),
                Some(contact),
                Some(email_id),
                Some(image),
            ) if errors.is_empty() => Ok(ValidSubmission {
                name,
                address,
                city,
                state,
                contact,
                email_id,
                image,
            }),
            _ => Err(errors),
        }
    }

    fn check_image(
        &self,
        errors: &mut ValidationErrors,
        image: Option<ImageUpload>,
    ) -> Option<ImageUpload> {
        let Some(image) = image else {
            errors.push("image", "image is required");
            return None;
        };

        if image.data.is_empty() {
            errors.push("image", "image is empty");
            return None;
        }

        if !is_image_file(Path::new(&image.file_name)) {
            errors.push(
                "image",
                format!("image must be one of: {}", image_extensions().join(", ")),
            );
            return None;
        }

        if let Some(ref content_type) = image.content_type {
            if !content_type.starts_with("image/") {
                errors.push(
                    "image",
                    format!("image content type '{}' is not an image type", content_type),
                );
                return None;
            }
        }

        if let Some(max) = self.policy.max_image_bytes {
            if image.data.len() > max {
                errors.push(
                    "image",
                    format!("image is {} bytes, the limit is {} bytes", image.data.len(), max),
                );
                return None;
            }
        }

        Some(image)
    }
}

fn required(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> Option<String> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    if value.is_none() {
        errors.push(field, format!("{} is required", field));
    }
    value
}
