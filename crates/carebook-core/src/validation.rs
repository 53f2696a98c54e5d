//! # Validation Module
//!
//! Field checks applied by the store in [`ValidationMode::Strict`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Strict-Mode Create                                 │
//! │                                                                         │
//! │  Step 1: Field checks (THIS MODULE)                                    │
//! │  ├── required fields present and non-blank                             │
//! │  ├── dates parse as YYYY-MM-DD                                         │
//! │  ├── amount is a non-negative number                                   │
//! │  └── payment status is Paid / Pending / Overdue                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Step 2: Reference checks (store.rs, needs the collections)            │
//! │  └── patientID / staffID / pharmacyID exist                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Step 3: Allocate ID and append                                        │
//! │                                                                         │
//! │  Faithful mode skips steps 1 and 2 entirely.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`ValidationMode::Strict`]: crate::store::ValidationMode::Strict

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewAdmission, NewBilling, NewPatient, NewPrescription, NewStaff, PaymentStatus};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Date format accepted for caller-supplied dates (HTML date input value).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Field Validators
// =============================================================================

/// Rejects an empty or whitespace-only value.
///
/// ## Example
/// ```rust
/// use carebook_core::validation::validate_required;
///
/// assert!(validate_required("name", "Jane Doe").is_ok());
/// assert!(validate_required("name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Parses a required `YYYY-MM-DD` date.
pub fn validate_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    validate_required(field, value)?;
    parse_date(field, value)
}

/// Parses an optional date. Absent or empty is fine; whitespace is not,
/// since the store would keep it as a discharge date.
pub fn validate_optional_date(field: &str, value: Option<&str>) -> ValidationResult<Option<NaiveDate>> {
    match value {
        Some(v) if !v.is_empty() => parse_date(field, v).map(Some),
        _ => Ok(None),
    }
}

fn parse_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected a date as YYYY-MM-DD".to_string(),
        }
    })
}

/// Parses a billing amount.
///
/// ## Rules
/// - Must be present
/// - Must be a number (see [`Money::parse`])
/// - Must not be negative; zero is allowed (waived charges)
///
/// ## Example
/// ```rust
/// use carebook_core::validation::validate_amount;
///
/// assert_eq!(validate_amount("totalAmount", "150.5").unwrap().amount(), 150.5);
/// assert!(validate_amount("totalAmount", "abc").is_err());
/// assert!(validate_amount("totalAmount", "-1").is_err());
/// ```
pub fn validate_amount(field: &str, raw: &str) -> ValidationResult<Money> {
    validate_required(field, raw)?;

    let amount = Money::parse(raw).ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a number", raw.trim()),
    })?;

    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(amount)
}

/// Parses a payment status against the known set.
pub fn validate_payment_status(field: &str, raw: &str) -> ValidationResult<PaymentStatus> {
    validate_required(field, raw)?;

    raw.parse::<PaymentStatus>().map_err(|_| ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: PaymentStatus::ALL
            .iter()
            .map(|status| status.as_str().to_string())
            .collect(),
    })
}

// =============================================================================
// Input Validators
// =============================================================================
// One per create operation. Field names in errors use the serialized
// (front-end) spelling so the UI can highlight the right input.

pub fn validate_new_patient(input: &NewPatient) -> ValidationResult<()> {
    validate_required("name", &input.name)?;
    validate_date("dateOfBirth", &input.date_of_birth)?;
    validate_optional_date("admissionDate", input.admission_date.as_deref())?;
    Ok(())
}

pub fn validate_new_staff(input: &NewStaff) -> ValidationResult<()> {
    validate_required("name", &input.name)?;
    validate_required("role", &input.role)?;
    validate_required("specialization", &input.specialization)?;
    Ok(())
}

pub fn validate_new_admission(input: &NewAdmission) -> ValidationResult<()> {
    validate_required("patientID", &input.patient_id)?;
    validate_required("staffID", &input.staff_id)?;
    validate_required("roomNumber", &input.room_number)?;
    validate_optional_date("dischargeDate", input.discharge_date.as_deref())?;
    Ok(())
}

pub fn validate_new_prescription(input: &NewPrescription) -> ValidationResult<()> {
    validate_required("patientID", &input.patient_id)?;
    validate_required("staffID", &input.staff_id)?;
    validate_required("medication", &input.medication)?;
    validate_required("dosage", &input.dosage)?;
    validate_required("pharmacyID", &input.pharmacy_id)?;
    Ok(())
}

/// Returns the parsed amount and status so the store doesn't parse twice.
pub fn validate_new_billing(input: &NewBilling) -> ValidationResult<(Money, PaymentStatus)> {
    validate_required("patientID", &input.patient_id)?;
    let amount = validate_amount("totalAmount", &input.total_amount)?;
    let status = validate_payment_status("paymentStatus", &input.payment_status)?;
    Ok((amount, status))
}

// =============================================================================
// Unit Tests
// =============================================================================
