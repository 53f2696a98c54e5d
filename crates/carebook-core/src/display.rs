//! # List Display
//!
//! One-line summaries of records, as shown in the front end's list views.
//!
//! Each entity kind has its own variant and formatter; references are
//! resolved against the store before formatting.
//!
//! ```text
//! ID: P1001 | Name: Jane Doe | DOB: 1990-01-01
//! RxID: R4001 | Pt: P1001 | Med: Amoxicillin (500mg) | Dispensed by: Main Hospital
//! BillID: B5001 | Pt: P1001 | Amount: $150.50 | Status: Pending
//! ```

use std::fmt;

use crate::clock::Clock;
use crate::ids::EntityKind;
use crate::store::EntityStore;
use crate::types::{Admission, Billing, Patient, Pharmacy, Prescription, Staff};

/// Shown in place of an empty list.
pub const EMPTY_LIST: &str = "No records found.";

/// A record ready to be rendered as one list line.
#[derive(Debug, Clone, Copy)]
pub enum RecordView<'a> {
    Patient(&'a Patient),
    Staff(&'a Staff),
    Admission(&'a Admission),
    /// `pharmacy` is the resolved location label.
    Prescription {
        record: &'a Prescription,
        pharmacy: &'a str,
    },
    Billing(&'a Billing),
    Pharmacy(&'a Pharmacy),
}

impl RecordView<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            RecordView::Patient(_) => EntityKind::Patient,
            RecordView::Staff(_) => EntityKind::Staff,
            RecordView::Admission(_) => EntityKind::Admission,
            RecordView::Prescription { .. } => EntityKind::Prescription,
            RecordView::Billing(_) => EntityKind::Billing,
            RecordView::Pharmacy(_) => EntityKind::Pharmacy,
        }
    }
}

impl fmt::Display for RecordView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordView::Patient(p) => write!(
                f,
                "ID: {} | Name: {} | DOB: {}",
                p.patient_id, p.name, p.date_of_birth
            ),
            RecordView::Staff(s) => write!(
                f,
                "ID: {} | Name: {} | Role: {} | Spec: {}",
                s.staff_id, s.name, s.role, s.specialization
            ),
            RecordView::Admission(a) => write!(
                f,
                "AdmID: {} | Patient: {} | Room: {} | Status: {}",
                a.admission_id,
                a.patient_id,
                a.room_number,
                a.status()
            ),
            RecordView::Prescription { record, pharmacy } => write!(
                f,
                "RxID: {} | Pt: {} | Med: {} ({}) | Dispensed by: {}",
                record.prescription_id, record.patient_id, record.medication, record.dosage, pharmacy
            ),
            RecordView::Billing(b) => {
                write!(f, "BillID: {} | Pt: {} | Amount: ", b.bill_id, b.patient_id)?;
                match b.total_amount() {
                    Some(amount) => write!(f, "{amount}")?,
                    // Unparseable amount.
                    None => f.write_str("$NaN")?,
                }
                write!(f, " | Status: {}", b.payment_status)
            }
            RecordView::Pharmacy(p) => {
                write!(f, "ID: {} | Location: {}", p.pharmacy_id, p.location)
            }
        }
    }
}

impl<C: Clock> EntityStore<C> {
    /// Views over one collection, in insertion order.
    pub fn views(&self, kind: EntityKind) -> Vec<RecordView<'_>> {
        match kind {
            EntityKind::Patient => self.list_patients().iter().map(RecordView::Patient).collect(),
            EntityKind::Staff => self.list_staff().iter().map(RecordView::Staff).collect(),
            EntityKind::Admission => self
                .list_admissions()
                .iter()
                .map(RecordView::Admission)
                .collect(),
            EntityKind::Prescription => self
                .list_prescriptions()
                .iter()
                .map(|record| RecordView::Prescription {
                    record,
                    pharmacy: self.pharmacy_location(&record.pharmacy_id),
                })
                .collect(),
            EntityKind::Billing => self.list_billings().iter().map(RecordView::Billing).collect(),
            EntityKind::Pharmacy => self
                .list_pharmacies()
                .iter()
                .map(RecordView::Pharmacy)
                .collect(),
        }
    }

    /// List lines for one collection, or a single [`EMPTY_LIST`] line.
    pub fn render_list(&self, kind: EntityKind) -> Vec<String> {
        let lines: Vec<String> = self.views(kind).iter().map(ToString::to_string).collect();
        if lines.is_empty() {
            return vec![EMPTY_LIST.to_string()];
        }
        lines
    }
}
