//! # Clock
//!
//! Source of "today" for creation-date fields (`admissionDate`,
//! `datePrescribed`, `billingDate`).
//!
//! The store never calls `Utc::now()` directly; it asks its clock. Tests pin
//! the date with [`FixedClock`].

use chrono::{NaiveDate, Utc};

/// Provides the current calendar date.
pub trait Clock {
    /// Today's date, with no time component.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in UTC.
///
/// Takes the date part of the current UTC timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
