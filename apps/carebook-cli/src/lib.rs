//! # Carebook CLI
//!
//! Thin demo over `carebook-core`: builds a store from the environment,
//! seeds a small ward, and prints every list view (or a JSON snapshot).
//!
//! ## Startup Sequence
//! ```text
//! 1. Initialize logging (stderr, RUST_LOG)
//! 2. Parse flags (--json, --strict, --help)
//! 3. StoreConfig::from_env()  (CAREBOOK_VALIDATION, CAREBOOK_TODAY)
//! 4. Seed demo records through the normal create operations
//! 5. Print list views or the snapshot
//! ```

use std::error::Error;
use std::fmt::Write as _;

use carebook_core::{
    Clock, CoreResult, EntityKind, EntityStore, NewAdmission, NewBilling, NewPatient,
    NewPrescription, NewStaff, StoreConfig, ValidationMode,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Options
// =============================================================================

/// Command line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Print the snapshot as JSON instead of list lines.
    pub json: bool,
    /// Force strict validation regardless of `CAREBOOK_VALIDATION`.
    pub strict: bool,
    pub help: bool,
}

impl Options {
    /// Parses arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Options::default();

        for arg in args {
            match arg.as_ref() {
                "--json" | "-j" => options.json = true,
                "--strict" | "-s" => options.strict = true,
                "--help" | "-h" => options.help = true,
                other => return Err(format!("unknown argument '{other}' (try --help)")),
            }
        }

        Ok(options)
    }
}

pub const USAGE: &str = "\
Carebook demo ward

Usage: carebook [OPTIONS]

Options:
  -j, --json      Print all collections as JSON
  -s, --strict    Validate input and references (overrides CAREBOOK_VALIDATION)
  -h, --help      Show this help message

Environment:
  CAREBOOK_VALIDATION   faithful | strict (default: faithful)
  CAREBOOK_TODAY        YYYY-MM-DD date used for creation dates
  RUST_LOG              log filter (default: info,carebook_core=debug,carebook_cli=debug)";

// =============================================================================
// Run
// =============================================================================

/// Builds, seeds and renders a store. Returns the text to print.
pub fn run(options: &Options, mut config: StoreConfig) -> Result<String, Box<dyn Error>> {
    if options.help {
        return Ok(USAGE.to_string());
    }

    if options.strict {
        config.validation = ValidationMode::Strict;
    }

    info!(validation = %config.validation, fixed_today = ?config.fixed_today, "Building store");
    let mut store = config.build_store();
    seed_demo_ward(&mut store)?;
    store.check_invariants()?;

    if options.json {
        return Ok(serde_json::to_string_pretty(&store.snapshot())?);
    }

    let mut out = String::new();
    for kind in EntityKind::ALL {
        writeln!(out, "== {kind} ==")?;
        for line in store.render_list(kind) {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

/// Creates a handful of linked records through the store's create
/// operations. Every reference resolves, so this also succeeds in strict
/// mode.
pub fn seed_demo_ward<C: Clock>(store: &mut EntityStore<C>) -> CoreResult<()> {
    let jane = store.create_patient(NewPatient {
        name: "Jane Doe".to_string(),
        date_of_birth: "1990-01-01".to_string(),
        admission_date: None,
    })?;
    let omar = store.create_patient(NewPatient {
        name: "Omar Haddad".to_string(),
        date_of_birth: "1978-11-23".to_string(),
        admission_date: Some("2024-02-02".to_string()),
    })?;

    let grey = store.create_staff(NewStaff {
        name: "Dr. Meredith Grey".to_string(),
        role: "Doctor".to_string(),
        specialization: "General Surgery".to_string(),
    })?;
    let okafor = store.create_staff(NewStaff {
        name: "Chidi Okafor".to_string(),
        role: "Nurse".to_string(),
        specialization: "Cardiology".to_string(),
    })?;

    store.create_admission(NewAdmission {
        patient_id: jane.patient_id.clone(),
        staff_id: grey.staff_id.clone(),
        room_number: "204".to_string(),
        discharge_date: None,
    })?;
    store.create_admission(NewAdmission {
        patient_id: omar.patient_id.clone(),
        staff_id: okafor.staff_id.clone(),
        room_number: "117B".to_string(),
        discharge_date: Some("2024-02-09".to_string()),
    })?;

    store.create_prescription(NewPrescription {
        patient_id: jane.patient_id.clone(),
        staff_id: grey.staff_id.clone(),
        medication: "Amoxicillin".to_string(),
        dosage: "500mg".to_string(),
        pharmacy_id: "PH1".to_string(),
    })?;
    store.create_prescription(NewPrescription {
        patient_id: omar.patient_id.clone(),
        staff_id: okafor.staff_id.clone(),
        medication: "Atorvastatin".to_string(),
        dosage: "20mg".to_string(),
        pharmacy_id: "PH2".to_string(),
    })?;

    store.create_billing(NewBilling {
        patient_id: jane.patient_id,
        total_amount: "150.5".to_string(),
        payment_status: "Pending".to_string(),
    })?;
    store.create_billing(NewBilling {
        patient_id: omar.patient_id,
        total_amount: "1289.00".to_string(),
        payment_status: "Paid".to_string(),
    })?;

    Ok(())
}

/// Installs the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Every create
/// - `RUST_LOG=carebook_core=trace` - Core crate only
/// - Default: INFO, DEBUG for carebook crates
///
/// Logs go to stderr so `--json` output stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,carebook_core=debug,carebook_cli=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
