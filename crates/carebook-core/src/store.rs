//! # Entity Store
//!
//! Owns every record collection and ID counter.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_prescription(input)                           │
//! │                                                                         │
//! │  mode == Strict? ──yes──► validate fields ──► check patientID,          │
//! │       │                         │              staffID, pharmacyID      │
//! │       │                         └──► Err(CoreError) (nothing changes)   │
//! │       no                                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  prescription_ids.allocate()  ──► "R4001" (counter becomes 4002)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  datePrescribed = clock.today()                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  prescriptions.push(record) ──► Ok(record)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Collections are append-only. Nothing here updates or removes a record.
//! - IDs within a kind are unique and strictly increasing.
//! - The pharmacy list is fixed at construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, CoreResult, ReferenceError};
use crate::ids::{parse_counter, EntityKind, IdSequence};
use crate::money::Money;
use crate::types::{
    Admission, Billing, NewAdmission, NewBilling, NewPatient, NewPrescription, NewStaff, Patient,
    Pharmacy, Prescription, Staff, UNKNOWN_PATIENT, UNKNOWN_PHARMACY, UNKNOWN_STAFF,
};
use crate::validation;

// =============================================================================
// Validation Mode
// =============================================================================

/// How much the store checks before accepting a create.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Accept every input as given, dangling references and unparseable
    /// amounts included.
    #[default]
    Faithful,

    /// Reject missing fields, malformed dates and amounts, unknown payment
    /// statuses, and references to records that don't exist.
    Strict,
}

impl ValidationMode {
    #[inline]
    pub const fn is_strict(&self) -> bool {
        matches!(self, ValidationMode::Strict)
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidationMode::Faithful => "faithful",
            ValidationMode::Strict => "strict",
        })
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faithful" => Ok(ValidationMode::Faithful),
            "strict" => Ok(ValidationMode::Strict),
            other => Err(format!("unknown validation mode '{other}'")),
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// A copy of every collection, for a front end to re-render in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub patients: Vec<Patient>,
    pub staff: Vec<Staff>,
    pub admissions: Vec<Admission>,
    pub prescriptions: Vec<Prescription>,
    pub billings: Vec<Billing>,
    pub pharmacies: Vec<Pharmacy>,
}

// =============================================================================
// Entity Store
// =============================================================================

/// In-memory home of every record.
///
/// Construct one per process (or per test). `C` supplies the date used for
/// creation-date fields.
#[derive(Debug, Clone)]
pub struct EntityStore<C = SystemClock> {
    clock: C,
    mode: ValidationMode,

    patients: Vec<Patient>,
    staff: Vec<Staff>,
    admissions: Vec<Admission>,
    prescriptions: Vec<Prescription>,
    billings: Vec<Billing>,
    pharmacies: Vec<Pharmacy>,

    patient_ids: IdSequence,
    staff_ids: IdSequence,
    admission_ids: IdSequence,
    prescription_ids: IdSequence,
    billing_ids: IdSequence,
}

impl EntityStore<SystemClock> {
    /// Creates an empty faithful-mode store on the system clock.
    pub fn new() -> Self {
        EntityStore::with_clock(SystemClock)
    }
}

impl Default for EntityStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> EntityStore<C> {
    /// Creates an empty faithful-mode store with the pharmacy seed loaded.
    pub fn with_clock(clock: C) -> Self {
        EntityStore {
            clock,
            mode: ValidationMode::default(),
            patients: Vec::new(),
            staff: Vec::new(),
            admissions: Vec::new(),
            prescriptions: Vec::new(),
            billings: Vec::new(),
            pharmacies: Pharmacy::seed(),
            patient_ids: IdSequence::new(EntityKind::Patient),
            staff_ids: IdSequence::new(EntityKind::Staff),
            admission_ids: IdSequence::new(EntityKind::Admission),
            prescription_ids: IdSequence::new(EntityKind::Prescription),
            billing_ids: IdSequence::new(EntityKind::Billing),
        }
    }

    /// Switches validation mode. Usually called right after construction.
    pub fn with_validation(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // =========================================================================
    // Create Operations
    // =========================================================================

    /// Registers a patient.
    ///
    /// ## Example
    /// ```rust
    /// use carebook_core::{EntityStore, NewPatient};
    ///
    /// let mut store = EntityStore::new();
    /// let jane = store
    ///     .create_patient(NewPatient {
    ///         name: "Jane Doe".to_string(),
    ///         date_of_birth: "1990-01-01".to_string(),
    ///         admission_date: None,
    ///     })
    ///     .unwrap();
    /// assert_eq!(jane.patient_id, "P1001");
    /// ```
    pub fn create_patient(&mut self, input: NewPatient) -> CoreResult<Patient> {
        if self.mode.is_strict() {
            validation::validate_new_patient(&input)
                .map_err(|e| rejected(EntityKind::Patient, e))?;
        }

        let patient = Patient {
            patient_id: self.patient_ids.allocate(),
            name: input.name,
            date_of_birth: input.date_of_birth,
            admission_date: non_blank(input.admission_date),
        };

        debug!(patient_id = %patient.patient_id, "Patient created");
        self.patients.push(patient.clone());
        Ok(patient)
    }

    /// Adds a staff member.
    pub fn create_staff(&mut self, input: NewStaff) -> CoreResult<Staff> {
        if self.mode.is_strict() {
            validation::validate_new_staff(&input).map_err(|e| rejected(EntityKind::Staff, e))?;
        }

        let staff = Staff {
            staff_id: self.staff_ids.allocate(),
            name: input.name,
            role: input.role,
            specialization: input.specialization,
        };

        debug!(staff_id = %staff.staff_id, "Staff created");
        self.staff.push(staff.clone());
        Ok(staff)
    }

    /// Admits a patient. `admissionDate` is today; a blank discharge date is
    /// stored as `None`.
    pub fn create_admission(&mut self, input: NewAdmission) -> CoreResult<Admission> {
        if self.mode.is_strict() {
            validation::validate_new_admission(&input)
                .map_err(|e| rejected(EntityKind::Admission, e))?;
            self.require(EntityKind::Admission, "patientID", EntityKind::Patient, &input.patient_id)?;
            self.require(EntityKind::Admission, "staffID", EntityKind::Staff, &input.staff_id)?;
        }

        let admission = Admission {
            admission_id: self.admission_ids.allocate(),
            patient_id: input.patient_id,
            staff_id: input.staff_id,
            room_number: input.room_number,
            admission_date: self.clock.today(),
            discharge_date: non_blank(input.discharge_date),
        };

        debug!(
            admission_id = %admission.admission_id,
            patient_id = %admission.patient_id,
            status = %admission.status(),
            "Admission created"
        );
        self.admissions.push(admission.clone());
        Ok(admission)
    }

    /// Writes a prescription dated today.
    pub fn create_prescription(&mut self, input: NewPrescription) -> CoreResult<Prescription> {
        if self.mode.is_strict() {
            validation::validate_new_prescription(&input)
                .map_err(|e| rejected(EntityKind::Prescription, e))?;
            self.require(EntityKind::Prescription, "patientID", EntityKind::Patient, &input.patient_id)?;
            self.require(EntityKind::Prescription, "staffID", EntityKind::Staff, &input.staff_id)?;
            self.require(EntityKind::Prescription, "pharmacyID", EntityKind::Pharmacy, &input.pharmacy_id)?;
        }

        let prescription = Prescription {
            prescription_id: self.prescription_ids.allocate(),
            patient_id: input.patient_id,
            staff_id: input.staff_id,
            medication: input.medication,
            dosage: input.dosage,
            pharmacy_id: input.pharmacy_id,
            date_prescribed: self.clock.today(),
        };

        debug!(
            prescription_id = %prescription.prescription_id,
            pharmacy_id = %prescription.pharmacy_id,
            "Prescription created"
        );
        self.prescriptions.push(prescription.clone());
        Ok(prescription)
    }

    /// Raises a bill dated today.
    ///
    /// ## Amount Handling
    /// - Faithful: `total_amount` is parsed if it can be; otherwise the bill
    ///   is stored with `total_amount: None`.
    /// - Strict: the amount must be a non-negative number and the status one
    ///   of Paid / Pending / Overdue (stored in canonical spelling).
    pub fn create_billing(&mut self, input: NewBilling) -> CoreResult<Billing> {
        let (amount, payment_status) = if self.mode.is_strict() {
            let (amount, status) = validation::validate_new_billing(&input)
                .map_err(|e| rejected(EntityKind::Billing, e))?;
            self.require(EntityKind::Billing, "patientID", EntityKind::Patient, &input.patient_id)?;
            (Some(amount), status.as_str().to_string())
        } else {
            (Money::parse(&input.total_amount), input.payment_status)
        };

        let bill = Billing {
            bill_id: self.billing_ids.allocate(),
            patient_id: input.patient_id,
            total_amount: amount.map(|m| m.amount()),
            payment_status,
            billing_date: self.clock.today(),
        };

        if bill.total_amount.is_none() {
            debug!(bill_id = %bill.bill_id, raw = %input.total_amount, "Bill amount is not a number");
        }
        debug!(bill_id = %bill.bill_id, patient_id = %bill.patient_id, "Bill created");
        self.billings.push(bill.clone());
        Ok(bill)
    }

    // =========================================================================
    // List Operations
    // =========================================================================
    // Insertion order, read-only.

    pub fn list_patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn list_staff(&self) -> &[Staff] {
        &self.staff
    }

    pub fn list_admissions(&self) -> &[Admission] {
        &self.admissions
    }

    pub fn list_prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    pub fn list_billings(&self) -> &[Billing] {
        &self.billings
    }

    pub fn list_pharmacies(&self) -> &[Pharmacy] {
        &self.pharmacies
    }

    /// Number of records of `kind`.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Patient => self.patients.len(),
            EntityKind::Staff => self.staff.len(),
            EntityKind::Admission => self.admissions.len(),
            EntityKind::Prescription => self.prescriptions.len(),
            EntityKind::Billing => self.billings.len(),
            EntityKind::Pharmacy => self.pharmacies.len(),
        }
    }

    /// Copies every collection.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            patients: self.patients.clone(),
            staff: self.staff.clone(),
            admissions: self.admissions.clone(),
            prescriptions: self.prescriptions.clone(),
            billings: self.billings.clone(),
            pharmacies: self.pharmacies.clone(),
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn find_patient(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.patient_id == patient_id)
    }

    pub fn find_staff(&self, staff_id: &str) -> Option<&Staff> {
        self.staff.iter().find(|s| s.staff_id == staff_id)
    }

    pub fn find_pharmacy(&self, pharmacy_id: &str) -> Option<&Pharmacy> {
        self.pharmacies.iter().find(|p| p.pharmacy_id == pharmacy_id)
    }

    /// Location of the pharmacy with this ID, or `"Unknown Pharmacy"`.
    ///
    /// ## Example
    /// ```rust
    /// use carebook_core::EntityStore;
    ///
    /// let store = EntityStore::new();
    /// assert_eq!(store.pharmacy_location("PH1"), "Main Hospital");
    /// assert_eq!(store.pharmacy_location("PH9"), "Unknown Pharmacy");
    /// ```
    pub fn pharmacy_location(&self, pharmacy_id: &str) -> &str {
        self.find_pharmacy(pharmacy_id)
            .map_or(UNKNOWN_PHARMACY, |p| p.location.as_str())
    }

    /// Name of the patient with this ID, or `"Unknown Patient"`.
    pub fn patient_name(&self, patient_id: &str) -> &str {
        self.find_patient(patient_id)
            .map_or(UNKNOWN_PATIENT, |p| p.name.as_str())
    }

    /// Name of the staff member with this ID, or `"Unknown Staff"`.
    pub fn staff_name(&self, staff_id: &str) -> &str {
        self.find_staff(staff_id)
            .map_or(UNKNOWN_STAFF, |s| s.name.as_str())
    }

    /// Whether a record of `kind` with this ID exists.
    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        match kind {
            EntityKind::Patient => self.find_patient(id).is_some(),
            EntityKind::Staff => self.find_staff(id).is_some(),
            EntityKind::Admission => self.admissions.iter().any(|a| a.admission_id == id),
            EntityKind::Prescription => self.prescriptions.iter().any(|r| r.prescription_id == id),
            EntityKind::Billing => self.billings.iter().any(|b| b.bill_id == id),
            EntityKind::Pharmacy => self.find_pharmacy(id).is_some(),
        }
    }

    // =========================================================================
    // Invariant Checks
    // =========================================================================

    /// Verifies ID format and ordering for every collection and that the
    /// pharmacy seed is untouched.
    ///
    /// ## Checks
    /// ```text
    /// for each counted kind:
    ///   every ID = <prefix><digits>
    ///   counters strictly increase in insertion order
    ///   last counter < next counter to allocate
    /// pharmacies == seed
    /// ```
    pub fn check_invariants(&self) -> CoreResult<()> {
        check_sequence(&self.patient_ids, self.patients.iter().map(|p| p.patient_id.as_str()))?;
        check_sequence(&self.staff_ids, self.staff.iter().map(|s| s.staff_id.as_str()))?;
        check_sequence(&self.admission_ids, self.admissions.iter().map(|a| a.admission_id.as_str()))?;
        check_sequence(
            &self.prescription_ids,
            self.prescriptions.iter().map(|r| r.prescription_id.as_str()),
        )?;
        check_sequence(&self.billing_ids, self.billings.iter().map(|b| b.bill_id.as_str()))?;

        if self.pharmacies != Pharmacy::seed() {
            return Err(CoreError::InvariantViolated {
                entity: EntityKind::Pharmacy,
                reason: "pharmacy list differs from the startup seed".to_string(),
            });
        }

        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Strict-mode reference check.
    fn require(
        &self,
        creating: EntityKind,
        field: &str,
        target: EntityKind,
        id: &str,
    ) -> CoreResult<()> {
        if self.contains(target, id) {
            return Ok(());
        }

        Err(rejected(
            creating,
            ReferenceError {
                field: field.to_string(),
                target,
                id: id.to_string(),
            },
        ))
    }
}

/// Logs a rejected create and converts the cause.
fn rejected(kind: EntityKind, cause: impl Into<CoreError>) -> CoreError {
    let err = cause.into();
    warn!(entity = %kind, error = %err, "Create rejected");
    err
}

/// Treats an empty optional field as absent. Whitespace is kept.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn check_sequence<'a>(seq: &IdSequence, ids: impl Iterator<Item = &'a str>) -> CoreResult<()> {
    let kind = seq.kind();
    let violated = |reason: String| CoreError::InvariantViolated { entity: kind, reason };

    let mut previous: Option<u64> = None;
    for id in ids {
        let counter = parse_counter(kind, id)
            .ok_or_else(|| violated(format!("'{id}' is not a {} ID", kind.prefix())))?;

        if counter < kind.first_counter() {
            return Err(violated(format!("'{id}' is below the first counter")));
        }
        if previous.map_or(false, |prev| counter <= prev) {
            return Err(violated(format!("'{id}' is out of order")));
        }
        if counter >= seq.peek() {
            return Err(violated(format!("'{id}' was never allocated")));
        }
        previous = Some(counter);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::ValidationError;
    use crate::types::AdmissionStatus;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn store() -> EntityStore<FixedClock> {
        EntityStore::with_clock(FixedClock(today()))
    }

    fn strict_store() -> EntityStore<FixedClock> {
        store().with_validation(ValidationMode::Strict)
    }

    fn patient(name: &str) -> NewPatient {
        NewPatient {
            name: name.to_string(),
            date_of_birth: "1990-01-01".to_string(),
            admission_date: None,
        }
    }

    fn staff(name: &str) -> NewStaff {
        NewStaff {
            name: name.to_string(),
            role: "Doctor".to_string(),
            specialization: "Cardiology".to_string(),
        }
    }

    fn admission(patient_id: &str, staff_id: &str, discharge: Option<&str>) -> NewAdmission {
        NewAdmission {
            patient_id: patient_id.to_string(),
            staff_id: staff_id.to_string(),
            room_number: "12".to_string(),
            discharge_date: discharge.map(str::to_string),
        }
    }

    fn prescription(patient_id: &str, staff_id: &str, pharmacy_id: &str) -> NewPrescription {
        NewPrescription {
            patient_id: patient_id.to_string(),
            staff_id: staff_id.to_string(),
            medication: "Amoxicillin".to_string(),
            dosage: "500mg".to_string(),
            pharmacy_id: pharmacy_id.to_string(),
        }
    }

    fn bill(patient_id: &str, amount: &str, status: &str) -> NewBilling {
        NewBilling {
            patient_id: patient_id.to_string(),
            total_amount: amount.to_string(),
            payment_status: status.to_string(),
        }
    }

    #[test]
    fn test_patient_ids_are_sequential() {
        let mut store = store();

        let first = store.create_patient(patient("Jane Doe")).unwrap();
        assert_eq!(first.patient_id, "P1001");
        assert_eq!(first.name, "Jane Doe");
        assert_eq!(first.date_of_birth, "1990-01-01");

        let second = store.create_patient(patient("John Roe")).unwrap();
        assert_eq!(second.patient_id, "P1002");
    }

    #[test]
    fn test_every_kind_counts_from_its_offset_without_gaps() {
        let mut store = store();
        let n = 25;

        for _ in 0..n {
            store.create_patient(patient("x")).unwrap();
            store.create_staff(staff("x")).unwrap();
            store.create_admission(admission("P1", "S1", None)).unwrap();
            store.create_prescription(prescription("P1", "S1", "PH1")).unwrap();
            store.create_billing(bill("P1", "1", "Paid")).unwrap();
        }

        let expected = |prefix: &str, base: u64| -> Vec<String> {
            (1..=n).map(|i| format!("{prefix}{}", base + i)).collect()
        };

        let ids: Vec<_> = store.list_patients().iter().map(|p| p.patient_id.clone()).collect();
        assert_eq!(ids, expected("P", 1000));
        let ids: Vec<_> = store.list_staff().iter().map(|s| s.staff_id.clone()).collect();
        assert_eq!(ids, expected("S", 2000));
        let ids: Vec<_> = store.list_admissions().iter().map(|a| a.admission_id.clone()).collect();
        assert_eq!(ids, expected("A", 3000));
        let ids: Vec<_> = store
            .list_prescriptions()
            .iter()
            .map(|r| r.prescription_id.clone())
            .collect();
        assert_eq!(ids, expected("R", 4000));
        let ids: Vec<_> = store.list_billings().iter().map(|b| b.bill_id.clone()).collect();
        assert_eq!(ids, expected("B", 5000));

        store.check_invariants().unwrap();
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut store = store();
        for name in ["Ann", "Bob", "Cid"] {
            store.create_staff(staff(name)).unwrap();
        }

        let names: Vec<&str> = store.list_staff().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Ann", "Bob", "Cid"]);
    }

    #[test]
    fn test_list_is_idempotent() {
        let mut store = store();
        store.create_patient(patient("Jane Doe")).unwrap();

        let first = store.list_patients().to_vec();
        let second = store.list_patients().to_vec();
        assert_eq!(first, second);
        assert_eq!(store.snapshot(), store.snapshot());
    }

    #[test]
    fn test_create_returns_the_stored_record() {
        let mut store = store();
        let created = store.create_staff(staff("Dr. Grey")).unwrap();
        assert_eq!(store.list_staff(), &[created]);
    }

    #[test]
    fn test_admission_status_derived_from_discharge_date() {
        let mut store = store();

        let open = store.create_admission(admission("P1001", "S2001", None)).unwrap();
        assert_eq!(open.status(), AdmissionStatus::Active);
        assert_eq!(open.admission_date, today());

        let blank = store.create_admission(admission("P1001", "S2001", Some(""))).unwrap();
        assert_eq!(blank.discharge_date, None);
        assert_eq!(blank.status(), AdmissionStatus::Active);

        let closed = store
            .create_admission(admission("P1001", "S2001", Some("2024-03-20")))
            .unwrap();
        assert_eq!(closed.status(), AdmissionStatus::Discharged);
    }

    #[test]
    fn test_whitespace_discharge_date_counts_as_discharged() {
        let mut store = store();
        let created = store.create_admission(admission("P1001", "S2001", Some(" "))).unwrap();

        assert_eq!(created.discharge_date.as_deref(), Some(" "));
        assert_eq!(created.status(), AdmissionStatus::Discharged);
        assert_eq!(store.list_admissions()[0].status(), AdmissionStatus::Discharged);
    }

    #[test]
    fn test_strict_mode_rejects_whitespace_discharge_date() {
        let mut store = strict_store();
        let jane = store.create_patient(patient("Jane Doe")).unwrap();
        let grey = store.create_staff(staff("Dr. Grey")).unwrap();

        let err = store
            .create_admission(admission(&jane.patient_id, &grey.staff_id, Some(" ")))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidFormat { ref field, .. }) if field == "dischargeDate"
        ));
        assert!(store.list_admissions().is_empty());
    }

    #[test]
    fn test_patient_blank_admission_date_is_none() {
        let mut store = store();
        let mut input = patient("Jane Doe");
        input.admission_date = Some(String::new());

        let created = store.create_patient(input).unwrap();
        assert_eq!(created.admission_date, None);
    }

    #[test]
    fn test_billing_scenario() {
        let mut store = store();
        let created = store.create_billing(bill("P1001", "150.5", "Pending")).unwrap();

        assert_eq!(created.bill_id, "B5001");
        assert_eq!(created.total_amount, Some(150.5));
        assert_eq!(created.total_amount(), Some(Money::new(150.5)));
        assert_eq!(created.payment_status, "Pending");
        assert_eq!(created.billing_date, today());
    }

    #[test]
    fn test_faithful_mode_accepts_non_numeric_amount() {
        let mut store = store();
        let created = store.create_billing(bill("P1001", "lots", "Whenever")).unwrap();

        assert_eq!(created.total_amount, None);
        assert_eq!(created.payment_status, "Whenever");
        assert_eq!(created.status(), None);
    }

    #[test]
    fn test_faithful_mode_keeps_numeric_amounts_exactly() {
        let mut store = store();
        for raw in ["1e3", "1.5e2", "0.125", "100000000000000000", "-5"] {
            store.create_billing(bill("P1001", raw, "Pending")).unwrap();
        }

        let amounts: Vec<_> = store.list_billings().iter().map(|b| b.total_amount).collect();
        assert_eq!(
            amounts,
            [Some(1000.0), Some(150.0), Some(0.125), Some(1e17), Some(-5.0)]
        );
    }

    #[test]
    fn test_faithful_mode_accepts_dangling_references() {
        let mut store = store();
        let rx = store
            .create_prescription(prescription("P404", "S404", "PH9"))
            .unwrap();

        assert_eq!(rx.prescription_id, "R4001");
        assert_eq!(rx.date_prescribed, today());
        assert_eq!(store.pharmacy_location(&rx.pharmacy_id), UNKNOWN_PHARMACY);
        assert_eq!(store.patient_name(&rx.patient_id), UNKNOWN_PATIENT);
        assert_eq!(store.staff_name(&rx.staff_id), UNKNOWN_STAFF);
    }

    #[test]
    fn test_faithful_mode_accepts_empty_fields() {
        let mut store = store();
        let created = store.create_patient(NewPatient::default()).unwrap();
        assert_eq!(created.patient_id, "P1001");
        assert_eq!(created.name, "");
    }

    #[test]
    fn test_pharmacy_resolution() {
        let store = store();
        assert_eq!(store.pharmacy_location("PH1"), "Main Hospital");
        assert_eq!(store.pharmacy_location("PH2"), "Satellite Clinic");
        assert_eq!(store.pharmacy_location("PH9"), "Unknown Pharmacy");
        assert_eq!(store.list_pharmacies().len(), 2);
    }

    #[test]
    fn test_lookups_resolve_names() {
        let mut store = store();
        let jane = store.create_patient(patient("Jane Doe")).unwrap();
        let grey = store.create_staff(staff("Dr. Grey")).unwrap();

        assert_eq!(store.patient_name(&jane.patient_id), "Jane Doe");
        assert_eq!(store.staff_name(&grey.staff_id), "Dr. Grey");
        assert!(store.contains(EntityKind::Patient, "P1001"));
        assert!(!store.contains(EntityKind::Patient, "P1002"));
        assert!(store.contains(EntityKind::Pharmacy, "PH2"));
    }

    #[test]
    fn test_count_and_snapshot() {
        let mut store = store();
        store.create_patient(patient("Jane Doe")).unwrap();
        store.create_billing(bill("P1001", "10", "Paid")).unwrap();

        assert_eq!(store.count(EntityKind::Patient), 1);
        assert_eq!(store.count(EntityKind::Billing), 1);
        assert_eq!(store.count(EntityKind::Admission), 0);
        assert_eq!(store.count(EntityKind::Pharmacy), 2);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.patients.len(), 1);
        assert_eq!(snapshot.pharmacies, Pharmacy::seed());

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["billings"][0]["billID"], "B5001");
        assert_eq!(json["billings"][0]["totalAmount"], 10.0);
        assert_eq!(json["billings"][0]["billingDate"], "2024-03-15");
    }

    #[test]
    fn test_strict_mode_accepts_valid_input() {
        let mut store = strict_store();
        let jane = store.create_patient(patient("Jane Doe")).unwrap();
        let grey = store.create_staff(staff("Dr. Grey")).unwrap();

        store
            .create_admission(admission(&jane.patient_id, &grey.staff_id, None))
            .unwrap();
        store
            .create_prescription(prescription(&jane.patient_id, &grey.staff_id, "PH2"))
            .unwrap();
        let created = store
            .create_billing(bill(&jane.patient_id, "99.99", "overdue"))
            .unwrap();

        assert_eq!(created.payment_status, "Overdue");
        assert_eq!(created.total_amount, Some(99.99));
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_strict_mode_rejects_missing_field_without_burning_an_id() {
        let mut store = strict_store();

        let err = store.create_patient(patient("  ")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "name"
        ));
        assert!(store.list_patients().is_empty());

        let created = store.create_patient(patient("Jane Doe")).unwrap();
        assert_eq!(created.patient_id, "P1001");
    }

    #[test]
    fn test_strict_mode_rejects_bad_dates() {
        let mut store = strict_store();
        let mut input = patient("Jane Doe");
        input.date_of_birth = "next tuesday".to_string();

        let err = store.create_patient(input).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_strict_mode_rejects_bad_amounts_and_statuses() {
        let mut store = strict_store();
        store.create_patient(patient("Jane Doe")).unwrap();

        let err = store.create_billing(bill("P1001", "abc", "Paid")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidFormat { .. })
        ));

        let err = store.create_billing(bill("P1001", "-5", "Paid")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBeNonNegative { .. })
        ));

        let err = store.create_billing(bill("P1001", "5", "Refunded")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NotAllowed { .. })
        ));

        assert!(store.list_billings().is_empty());
    }

    #[test]
    fn test_strict_mode_rejects_dangling_references() {
        let mut store = strict_store();
        store.create_patient(patient("Jane Doe")).unwrap();
        store.create_staff(staff("Dr. Grey")).unwrap();

        let err = store
            .create_prescription(prescription("P1001", "S2001", "PH9"))
            .unwrap_err();
        match err {
            CoreError::Reference(reference) => {
                assert_eq!(reference.field, "pharmacyID");
                assert_eq!(reference.target, EntityKind::Pharmacy);
                assert_eq!(reference.id, "PH9");
            }
            other => panic!("expected reference error, got {other:?}"),
        }

        let err = store
            .create_admission(admission("P1001", "S9999", None))
            .unwrap_err();
        assert!(matches!(err, CoreError::Reference(_)));

        let err = store.create_billing(bill("P7777", "10", "Paid")).unwrap_err();
        assert!(matches!(err, CoreError::Reference(_)));

        assert!(store.list_prescriptions().is_empty());
        assert!(store.list_admissions().is_empty());
        assert!(store.list_billings().is_empty());
    }

    #[test]
    fn test_check_invariants_detects_tampering() {
        let mut store = store();
        store.create_patient(patient("Jane Doe")).unwrap();
        store.create_patient(patient("John Roe")).unwrap();
        store.check_invariants().unwrap();

        store.patients.swap(0, 1);
        assert!(matches!(
            store.check_invariants(),
            Err(CoreError::InvariantViolated {
                entity: EntityKind::Patient,
                ..
            })
        ));
        store.patients.swap(0, 1);

        store.pharmacies.pop();
        assert!(matches!(
            store.check_invariants(),
            Err(CoreError::InvariantViolated {
                entity: EntityKind::Pharmacy,
                ..
            })
        ));
    }

    #[test]
    fn test_check_invariants_detects_unallocated_id() {
        let mut store = store();
        store.create_staff(staff("Ann")).unwrap();
        store.staff[0].staff_id = "S2002".to_string();

        let err = store.check_invariants().unwrap_err();
        assert_eq!(err.to_string(), "Staff invariant violated: 'S2002' was never allocated");
    }

    #[test]
    fn test_validation_mode_parse() {
        assert_eq!("Strict".parse::<ValidationMode>(), Ok(ValidationMode::Strict));
        assert_eq!(" faithful ".parse::<ValidationMode>(), Ok(ValidationMode::Faithful));
        assert!("lenient".parse::<ValidationMode>().is_err());
        assert_eq!(ValidationMode::default(), ValidationMode::Faithful);
    }
}
