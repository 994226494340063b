//! Profile and address book
//!
//! The signed-in user's editable settings, the ordered address book, and the
//! read-only order history shown on the profile page. Saves are gated by the
//! shared field rules with this page's own messages; a failed save changes
//! nothing. Address-book operations are total: editing or deleting an id
//! that is not in the book is a no-op, reported through the return value.

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    checkout::form::{FieldErrors, has_min_chars, is_email_like, is_phone_like},
    clock::Clock,
};

/// The signed-in user's editable settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub full_name: String,

    /// Contact email.
    pub email: String,

    /// Contact number in E.164-like form.
    pub phone: String,
}

impl UserProfile {
    /// Validate the settings, collecting each failure.
    ///
    /// # Errors
    ///
    /// Returns the failing fields with their user-facing messages.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if !has_min_chars(&self.full_name, 2) {
            errors.push("full_name", "Full name is required");
        }

        if !is_email_like(&self.email) {
            errors.push("email", "Invalid email address");
        }

        if !is_phone_like(&self.phone) {
            errors.push("phone", "Invalid phone number");
        }

        errors.into_result()
    }

    /// Validate `candidate` and replace these settings with it.
    ///
    /// A failed save leaves the stored settings untouched.
    ///
    /// # Errors
    ///
    /// Returns the failing fields with their user-facing messages.
    pub fn save(&mut self, candidate: UserProfile) -> Result<(), FieldErrors> {
        candidate.validate()?;

        *self = candidate;

        Ok(())
    }
}

/// A saved delivery address in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SavedAddress {
    /// Book-unique identifier.
    pub id: String,

    /// User-facing label; not unique-enforced.
    pub label: String,

    /// Street address.
    pub address_line1: String,

    /// City.
    pub city: String,

    /// Postal or ZIP code.
    pub postal_code: String,
}

/// The fields of an address before it has an identity in the book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressDraft {
    /// User-facing label.
    pub label: String,

    /// Street address.
    pub address_line1: String,

    /// City.
    pub city: String,

    /// Postal or ZIP code.
    pub postal_code: String,
}

impl AddressDraft {
    /// Validate the draft, collecting each failure.
    ///
    /// # Errors
    ///
    /// Returns the failing fields with their user-facing messages.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if !has_min_chars(&self.label, 2) {
            errors.push("label", "Label is required (e.g., Home, Work)");
        }

        if !has_min_chars(&self.address_line1, 5) {
            errors.push("address_line1", "Address is required");
        }

        if !has_min_chars(&self.city, 2) {
            errors.push("city", "City is required");
        }

        if !has_min_chars(&self.postal_code, 5) {
            errors.push("postal_code", "Postal code is required");
        }

        errors.into_result()
    }

    fn into_saved(self, id: String) -> SavedAddress {
        SavedAddress {
            id,
            label: self.label,
            address_line1: self.address_line1,
            city: self.city,
            postal_code: self.postal_code,
        }
    }
}

/// In-memory ordered collection of saved addresses.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    addresses: Vec<SavedAddress>,
}

impl AddressBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book from existing addresses, preserving their order.
    #[must_use]
    pub fn with_addresses(addresses: Vec<SavedAddress>) -> Self {
        AddressBook { addresses }
    }

    /// Validate `draft` and append it, minting an identifier from the clock
    /// (`addr` plus the epoch-millisecond timestamp).
    ///
    /// Returns the minted identifier.
    ///
    /// # Errors
    ///
    /// Returns the failing fields; the book is unchanged on failure.
    pub fn add(&mut self, draft: AddressDraft, clock: &impl Clock) -> Result<String, FieldErrors> {
        draft.validate()?;

        let id = format!("addr{}", clock.now_millis());
        self.addresses.push(draft.into_saved(id.clone()));

        Ok(id)
    }

    /// Validate `draft` and fully replace the fields of the address with
    /// `id`, keeping the id.
    ///
    /// Returns whether an address was replaced; an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the failing fields; the book is unchanged on failure.
    pub fn edit(&mut self, id: &str, draft: AddressDraft) -> Result<bool, FieldErrors> {
        draft.validate()?;

        match self.addresses.iter_mut().find(|address| address.id == id) {
            Some(address) => {
                *address = draft.into_saved(id.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the address with `id`.
    ///
    /// Returns whether an address was removed; an unknown id is a no-op.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.addresses.len();
        self.addresses.retain(|address| address.id != id);

        self.addresses.len() < before
    }

    /// Find an address by id.
    pub fn get(&self, id: &str) -> Option<&SavedAddress> {
        self.addresses.iter().find(|address| address.id == id)
    }

    /// Iterate over the addresses in book order.
    pub fn iter(&self) -> impl Iterator<Item = &SavedAddress> {
        self.addresses.iter()
    }

    /// Number of saved addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Whether the book has no addresses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// One item summary within a past order.
#[derive(Debug, Clone, Deserialize)]
pub struct PastOrderItem {
    /// Item name as ordered.
    pub name: String,

    /// Units ordered.
    pub quantity: u32,
}

/// One row in the profile's order history.
#[derive(Debug, Clone)]
pub struct PastOrder {
    /// Order identifier.
    pub id: String,

    /// Order date, free text.
    pub date: String,

    /// Total as charged.
    pub total: Money<'static, Currency>,

    /// Final status label, e.g. `Delivered` or `Cancelled`.
    pub status: String,

    /// Restaurant ordered from.
    pub restaurant: String,

    /// Item summaries.
    pub items: Vec<PastOrderItem>,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;
    use crate::clock::ManualClock;

    fn stored_profile() -> UserProfile {
        UserProfile {
            full_name: "Alex Johnson".to_string(),
            email: "alex.johnson@example.com".to_string(),
            phone: "+15551234567".to_string(),
        }
    }

    fn home_draft() -> AddressDraft {
        AddressDraft {
            label: "Home".to_string(),
            address_line1: "123 Willow Creek Rd".to_string(),
            city: "Springfield".to_string(),
            postal_code: "62704".to_string(),
        }
    }

    #[test]
    fn valid_profile_save_replaces_settings() -> TestResult {
        let mut profile = stored_profile();
        let mut candidate = stored_profile();
        candidate.full_name = "Sam Carter".to_string();

        profile.save(candidate.clone())?;

        assert_eq!(profile, candidate);

        Ok(())
    }

    #[test]
    fn failed_profile_save_changes_nothing() {
        let mut profile = stored_profile();
        let candidate = UserProfile {
            full_name: "A".to_string(),
            email: "not-an-email".to_string(),
            phone: "abc".to_string(),
        };

        let errors = profile
            .save(candidate)
            .expect_err("invalid settings must fail");

        assert_eq!(errors.message_for("full_name"), Some("Full name is required"));
        assert_eq!(errors.message_for("email"), Some("Invalid email address"));
        assert_eq!(errors.message_for("phone"), Some("Invalid phone number"));
        assert_eq!(profile, stored_profile());
    }

    #[test]
    fn add_mints_the_id_from_the_clock() -> TestResult {
        let mut book = AddressBook::new();
        let clock = ManualClock::new(Duration::from_millis(1_723_456_789_123));

        let id = book.add(home_draft(), &clock)?;

        assert_eq!(id, "addr1723456789123");
        assert_eq!(book.len(), 1);
        assert_eq!(book.get(&id).map(|a| a.label.as_str()), Some("Home"));

        Ok(())
    }

    #[test]
    fn add_rejects_an_invalid_draft() {
        let mut book = AddressBook::new();
        let clock = ManualClock::default();
        let draft = AddressDraft {
            label: "H".to_string(),
            ..AddressDraft::default()
        };

        let errors = book.add(draft, &clock).expect_err("invalid draft must fail");

        assert_eq!(
            errors.message_for("label"),
            Some("Label is required (e.g., Home, Work)")
        );
        assert_eq!(errors.message_for("address_line1"), Some("Address is required"));
        assert!(book.is_empty());
    }

    #[test]
    fn edit_fully_replaces_fields_but_keeps_the_id() -> TestResult {
        let mut book = AddressBook::new();
        let clock = ManualClock::new(Duration::from_millis(1000));
        let id = book.add(home_draft(), &clock)?;

        let mut replacement = home_draft();
        replacement.label = "Weekend House".to_string();
        replacement.address_line1 = "9 Lakeshore Drive".to_string();

        assert!(book.edit(&id, replacement)?);

        let edited = book.get(&id).cloned();
        assert_eq!(edited.as_ref().map(|a| a.label.as_str()), Some("Weekend House"));
        assert_eq!(
            edited.as_ref().map(|a| a.address_line1.as_str()),
            Some("9 Lakeshore Drive")
        );

        Ok(())
    }

    #[test]
    fn edit_of_an_unknown_id_is_a_no_op() -> TestResult {
        let mut book = AddressBook::new();
        let clock = ManualClock::new(Duration::from_millis(1000));
        book.add(home_draft(), &clock)?;

        assert!(!book.edit("addr-missing", home_draft())?);
        assert_eq!(book.len(), 1);

        Ok(())
    }

    #[test]
    fn delete_is_idempotent() -> TestResult {
        let mut book = AddressBook::new();
        let clock = ManualClock::new(Duration::from_millis(1000));
        let id = book.add(home_draft(), &clock)?;

        assert!(book.delete(&id));
        assert!(!book.delete(&id));
        assert!(book.is_empty());

        Ok(())
    }

    #[test]
    fn book_preserves_insertion_order() -> TestResult {
        let clock = ManualClock::new(Duration::from_millis(1000));
        let mut book = AddressBook::with_addresses(vec![SavedAddress {
            id: "addr1".to_string(),
            label: "Home".to_string(),
            address_line1: "123 Willow Creek Rd".to_string(),
            city: "Springfield".to_string(),
            postal_code: "62704".to_string(),
        }]);

        let mut work = home_draft();
        work.label = "Work".to_string();
        work.address_line1 = "456 Business Park Ave".to_string();
        book.add(work, &clock)?;

        let labels: Vec<&str> = book.iter().map(|a| a.label.as_str()).collect();

        assert_eq!(labels, ["Home", "Work"]);

        Ok(())
    }
}
