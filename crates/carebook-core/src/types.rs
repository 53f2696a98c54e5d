//! # Domain Types
//!
//! Records held by the entity store, and the input structs callers fill in
//! to create them.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Record Types                                    │
//! │                                                                         │
//! │  ┌──────────────┐        ┌──────────────┐        ┌──────────────┐      │
//! │  │   Patient    │◄───────│  Admission   │───────►│    Staff     │      │
//! │  │  patientID   │        │  admissionID │        │   staffID    │      │
//! │  └──────────────┘        └──────────────┘        └──────────────┘      │
//! │     ▲      ▲                                            ▲               │
//! │     │      │             ┌──────────────┐               │               │
//! │     │      └─────────────│ Prescription │───────────────┘               │
//! │     │                    │prescriptionID│───────►┌──────────────┐      │
//! │     │                    └──────────────┘        │   Pharmacy   │      │
//! │  ┌──────────────┐                                │  (seeded)    │      │
//! │  │   Billing    │                                └──────────────┘      │
//! │  │    billID    │                                                       │
//! │  └──────────────┘        ──► = soft reference by ID string              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialized Shape
//! Field names follow the browser front end: `patientID`, `dateOfBirth`,
//! `roomNumber`, and so on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;

/// Label returned when a prescription names a pharmacy that doesn't exist.
pub const UNKNOWN_PHARMACY: &str = "Unknown Pharmacy";

/// Label returned when a record names a patient that doesn't exist.
pub const UNKNOWN_PATIENT: &str = "Unknown Patient";

/// Label returned when a record names a staff member that doesn't exist.
pub const UNKNOWN_STAFF: &str = "Unknown Staff";

// =============================================================================
// Patient
// =============================================================================

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "patientID")]
    pub patient_id: String,
    pub name: String,
    /// As entered; strict mode requires `YYYY-MM-DD`.
    pub date_of_birth: String,
    /// Informational only. Admissions carry their own date.
    pub admission_date: Option<String>,
}

/// Fields supplied when registering a patient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub date_of_birth: String,
    #[serde(default)]
    pub admission_date: Option<String>,
}

// =============================================================================
// Staff
// =============================================================================

/// A member of hospital staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    #[serde(rename = "staffID")]
    pub staff_id: String,
    pub name: String,
    pub role: String,
    pub specialization: String,
}

/// Fields supplied when adding a staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewStaff {
    pub name: String,
    pub role: String,
    pub specialization: String,
}

// =============================================================================
// Admission
// =============================================================================

/// Whether an admission is still open. Never stored; see [`Admission::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AdmissionStatus {
    Active,
    Discharged,
}

impl fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AdmissionStatus::Active => "Active",
            AdmissionStatus::Discharged => "Discharged",
        })
    }
}

/// A patient's stay in a room under a staff member's care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    #[serde(rename = "admissionID")]
    pub admission_id: String,
    #[serde(rename = "patientID")]
    pub patient_id: String,
    /// Staff member handling the admission.
    #[serde(rename = "staffID")]
    pub staff_id: String,
    pub room_number: String,
    /// Stamped by the store's clock at creation.
    #[ts(as = "String")]
    pub admission_date: NaiveDate,
    pub discharge_date: Option<String>,
}

impl Admission {
    /// `Discharged` once a non-empty discharge date is present. Whitespace
    /// counts as present.
    pub fn status(&self) -> AdmissionStatus {
        match self.discharge_date.as_deref() {
            Some(date) if !date.is_empty() => AdmissionStatus::Discharged,
            _ => AdmissionStatus::Active,
        }
    }
}

/// Fields supplied when admitting a patient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewAdmission {
    #[serde(rename = "patientID")]
    pub patient_id: String,
    #[serde(rename = "staffID")]
    pub staff_id: String,
    pub room_number: String,
    #[serde(default)]
    pub discharge_date: Option<String>,
}

// =============================================================================
// Prescription
// =============================================================================

/// A medication order written by staff and dispensed by a pharmacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(rename = "prescriptionID")]
    pub prescription_id: String,
    #[serde(rename = "patientID")]
    pub patient_id: String,
    /// Prescribing staff member.
    #[serde(rename = "staffID")]
    pub staff_id: String,
    pub medication: String,
    pub dosage: String,
    /// Dispensing pharmacy.
    #[serde(rename = "pharmacyID")]
    pub pharmacy_id: String,
    #[ts(as = "String")]
    pub date_prescribed: NaiveDate,
}

/// Fields supplied when writing a prescription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewPrescription {
    #[serde(rename = "patientID")]
    pub patient_id: String,
    #[serde(rename = "staffID")]
    pub staff_id: String,
    pub medication: String,
    pub dosage: String,
    #[serde(rename = "pharmacyID")]
    pub pharmacy_id: String,
}

// =============================================================================
// Billing
// =============================================================================

/// Payment state of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Paid,
        PaymentStatus::Pending,
        PaymentStatus::Overdue,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a payment status outside [`PaymentStatus::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPaymentStatus(pub String);

impl FromStr for PaymentStatus {
    type Err = UnknownPaymentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPaymentStatus(s.to_string()))
    }
}

/// A bill raised against a patient.
///
/// `payment_status` keeps the caller's text so faithful mode can hold values
/// outside the known set; [`Billing::status`] parses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    #[serde(rename = "billID")]
    pub bill_id: String,
    #[serde(rename = "patientID")]
    pub patient_id: String,
    /// Dollars, as typed. `None` when the submitted amount was not a number.
    pub total_amount: Option<f64>,
    pub payment_status: String,
    #[ts(as = "String")]
    pub billing_date: NaiveDate,
}

impl Billing {
    #[inline]
    pub fn total_amount(&self) -> Option<Money> {
        self.total_amount.map(Money::new)
    }

    /// The payment status, if it is one of the known values.
    pub fn status(&self) -> Option<PaymentStatus> {
        self.payment_status.parse().ok()
    }
}

/// Fields supplied when raising a bill.
///
/// `total_amount` is the raw text from the form; the store parses it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewBilling {
    #[serde(rename = "patientID")]
    pub patient_id: String,
    pub total_amount: String,
    pub payment_status: String,
}

// =============================================================================
// Pharmacy
// =============================================================================

/// A dispensing location. The set is fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacy {
    #[serde(rename = "pharmacyID")]
    pub pharmacy_id: String,
    pub location: String,
}

impl Pharmacy {
    /// The two pharmacies every store starts with.
    pub fn seed() -> Vec<Pharmacy> {
        vec![
            Pharmacy {
                pharmacy_id: "PH1".to_string(),
                location: "Main Hospital".to_string(),
            },
            Pharmacy {
                pharmacy_id: "PH2".to_string(),
                location: "Satellite Clinic".to_string(),
            },
        ]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
