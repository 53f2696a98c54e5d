//! # carebook-core: In-Memory Hospital Records
//!
//! This crate holds the record model behind the Carebook front end:
//! patients, staff, admissions, prescriptions, bills, and the fixed set of
//! pharmacies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Carebook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front End (forms + list views)                     │   │
//! │  │    Patient form ──► create_patient ──► render_list(Patient)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ carebook-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │   types   │  │    ids    │  │ validation│  │   │
//! │  │   │EntityStore│  │ Patient.. │  │ P1001...  │  │  strict   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO PERSISTENCE • NO NETWORK • STATE LIVES FOR THE PROCESS     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - The entity store: create, list, lookup, invariant checks
//! - [`types`] - Record types and their create inputs
//! - [`ids`] - Entity kinds and sequential ID counters
//! - [`money`] - Billing amount parsing and display
//! - [`clock`] - Injectable source of today's date
//! - [`validation`] - Strict-mode field checks
//! - [`display`] - One-line list summaries
//! - [`shared`] - Mutex-wrapped store for multi-threaded callers
//! - [`config`] - Startup settings from the environment
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use carebook_core::{EntityKind, EntityStore, NewBilling, NewPatient};
//!
//! let mut store = EntityStore::new();
//!
//! let jane = store.create_patient(NewPatient {
//!     name: "Jane Doe".to_string(),
//!     date_of_birth: "1990-01-01".to_string(),
//!     admission_date: None,
//! })?;
//! assert_eq!(jane.patient_id, "P1001");
//!
//! let bill = store.create_billing(NewBilling {
//!     patient_id: jane.patient_id.clone(),
//!     total_amount: "150.5".to_string(),
//!     payment_status: "Pending".to_string(),
//! })?;
//! assert_eq!(bill.bill_id, "B5001");
//!
//! assert_eq!(
//!     store.render_list(EntityKind::Billing),
//!     vec!["BillID: B5001 | Pt: P1001 | Amount: $150.50 | Status: Pending"]
//! );
//! # Ok::<(), carebook_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod ids;
pub mod money;
pub mod shared;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use display::RecordView;
pub use error::{CoreError, CoreResult, ReferenceError, ValidationError};
pub use ids::EntityKind;
pub use money::Money;
pub use shared::SharedStore;
pub use store::{EntityStore, StoreSnapshot, ValidationMode};
pub use types::*;
