//! Checkout form
//!
//! The delivery address, payment selection and promo code captured across the
//! wizard, plus the reusable field rules. Validation collects every failing
//! field with its user-facing message rather than stopping at the first, so
//! the caller can render errors inline per field.

use std::{fmt, str::FromStr};

use smallvec::SmallVec;
use thiserror::Error;

/// At least `min` characters, counted as Unicode scalar values.
#[must_use]
pub fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().take(min).count() == min
}

/// E.164-like phone shape: optional `+`, first digit 1-9, 2 to 15 digits.
#[must_use]
pub fn is_phone_like(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);

    if !(2..=15).contains(&digits.len()) {
        return false;
    }

    let mut chars = digits.chars();

    match chars.next() {
        Some('1'..='9') => chars.all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Pragmatic email shape test: one `@`, a non-empty local part, and a dotted
/// host. Deliberately not an RFC parser.
#[must_use]
pub fn is_email_like(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }

    let Some((local, host)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || host.contains('@') {
        return false;
    }

    match host.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// A failed validation: which field and the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Identifier of the failing field.
    pub field: &'static str,

    /// User-facing message.
    pub message: &'static str,
}

/// Every failing field from one validation pass, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: SmallVec<[FieldError; 6]>,
}

impl FieldErrors {
    /// Record a failure for `field`.
    pub fn push(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    /// The message recorded for `field`, if it failed.
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    /// Iterate over the failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the pass found no failures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert the pass into a result: `Ok` when nothing failed.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for error in &self.errors {
            if !first {
                write!(f, "; ")?;
            }

            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }

        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Delivery address fields captured at the address step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryAddressForm {
    /// Recipient name.
    pub full_name: String,

    /// Street address.
    pub address_line1: String,

    /// City.
    pub city: String,

    /// Postal or ZIP code.
    pub postal_code: String,

    /// Contact number in E.164-like form.
    pub phone: String,
}

impl DeliveryAddressForm {
    /// Validate every address field, collecting each failure.
    ///
    /// # Errors
    ///
    /// Returns the failing fields with their user-facing messages.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if !has_min_chars(&self.full_name, 2) {
            errors.push("full_name", "Full name must be at least 2 characters.");
        }

        if !has_min_chars(&self.address_line1, 5) {
            errors.push("address_line1", "Address is required.");
        }

        if !has_min_chars(&self.city, 2) {
            errors.push("city", "City is required.");
        }

        if !has_min_chars(&self.postal_code, 5) {
            errors.push("postal_code", "Valid postal code is required.");
        }

        if !is_phone_like(&self.phone) {
            errors.push("phone", "Valid phone number is required.");
        }

        errors.into_result()
    }
}

/// Error for an unrecognised payment method identifier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method {0:?}")]
pub struct UnknownPaymentMethod(pub String);

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Pay by card. Card fields are collected but not validated.
    #[default]
    CreditCard,

    /// Pay through PayPal.
    Paypal,

    /// Pay the courier in cash.
    CashOnDelivery,
}

impl PaymentMethod {
    /// Stable identifier, as stored in fixtures and typed at the CLI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "creditCard",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::CashOnDelivery => "cod",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creditCard" => Ok(PaymentMethod::CreditCard),
            "paypal" => Ok(PaymentMethod::Paypal),
            "cod" => Ok(PaymentMethod::CashOnDelivery),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the checkout wizard captures.
///
/// The payment method defaults to credit card, matching the wizard's
/// pre-selected option. Card fields and the promo code are held as typed and
/// never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Delivery address; must validate to pass the address step.
    pub address: DeliveryAddressForm,

    /// Selected payment method.
    pub payment_method: PaymentMethod,

    /// Card number as typed.
    pub card_number: Option<String>,

    /// Card expiry as typed.
    pub expiry_date: Option<String>,

    /// Card security code as typed.
    pub cvv: Option<String>,

    /// Optional promotion code; unconstrained.
    pub promo_code: Option<String>,
}

impl CheckoutForm {
    /// Whole-form validation, as run at submission.
    ///
    /// The payment method is an enum and therefore always a member of the
    /// accepted set, and card fields carry no rules, so the failures here are
    /// exactly the address failures.
    ///
    /// # Errors
    ///
    /// Returns the failing fields with their user-facing messages.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.address.validate()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn valid_address() -> DeliveryAddressForm {
        DeliveryAddressForm {
            full_name: "Alex Johnson".to_string(),
            address_line1: "123 Main Street".to_string(),
            city: "Anytown".to_string(),
            postal_code: "12345".to_string(),
            phone: "+15551234567".to_string(),
        }
    }

    #[test]
    fn valid_address_passes() -> TestResult {
        valid_address().validate()?;

        Ok(())
    }

    #[test]
    fn empty_address_collects_every_failure() {
        let errors = DeliveryAddressForm::default()
            .validate()
            .expect_err("empty form must fail");

        assert_eq!(errors.len(), 5);
        assert_eq!(
            errors.message_for("full_name"),
            Some("Full name must be at least 2 characters.")
        );
        assert_eq!(errors.message_for("address_line1"), Some("Address is required."));
        assert_eq!(errors.message_for("city"), Some("City is required."));
        assert_eq!(
            errors.message_for("postal_code"),
            Some("Valid postal code is required.")
        );
        assert_eq!(
            errors.message_for("phone"),
            Some("Valid phone number is required.")
        );
    }

    #[test]
    fn single_bad_field_is_the_only_failure() {
        let mut address = valid_address();
        address.phone = "abc".to_string();

        let errors = address.validate().expect_err("bad phone must fail");

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.message_for("phone"),
            Some("Valid phone number is required.")
        );
        assert_eq!(errors.message_for("city"), None);
    }

    #[test]
    fn phone_shape_accepts_e164_like_numbers() {
        assert!(is_phone_like("+15551234567"));
        assert!(is_phone_like("15551234567"));
        assert!(is_phone_like("99"));
        assert!(is_phone_like("441234567890123"));
    }

    #[test]
    fn phone_shape_rejects_malformed_numbers() {
        assert!(!is_phone_like("abc"));
        assert!(!is_phone_like(""));
        assert!(!is_phone_like("+"));
        assert!(!is_phone_like("1"));
        assert!(!is_phone_like("0123456789"));
        assert!(!is_phone_like("+15551234567890123"));
        assert!(!is_phone_like("555 1234"));
    }

    #[test]
    fn min_chars_counts_scalar_values() {
        assert!(has_min_chars("ab", 2));
        assert!(has_min_chars("héllo", 5));
        assert!(!has_min_chars("a", 2));
        assert!(!has_min_chars("", 1));
    }

    #[test]
    fn email_shape_accepts_plausible_addresses() {
        assert!(is_email_like("alex.johnson@example.com"));
        assert!(is_email_like("a@b.co"));
    }

    #[test]
    fn email_shape_rejects_malformed_addresses() {
        assert!(!is_email_like("not-an-email"));
        assert!(!is_email_like("@example.com"));
        assert!(!is_email_like("user@"));
        assert!(!is_email_like("user@hostname"));
        assert!(!is_email_like("user@.com"));
        assert!(!is_email_like("user@host."));
        assert!(!is_email_like("two words@example.com"));
        assert!(!is_email_like("user@@example.com"));
    }

    #[test]
    fn payment_method_identifiers_round_trip() -> TestResult {
        for method in [
            PaymentMethod::CreditCard,
            PaymentMethod::Paypal,
            PaymentMethod::CashOnDelivery,
        ] {
            assert_eq!(method.as_str().parse::<PaymentMethod>()?, method);
        }

        Ok(())
    }

    #[test]
    fn payment_method_defaults_to_credit_card() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::CreditCard);
        assert_eq!(CheckoutForm::default().payment_method, PaymentMethod::CreditCard);
    }

    #[test]
    fn unknown_payment_method_errors() {
        let result = "bitcoin".parse::<PaymentMethod>();

        assert_eq!(result, Err(UnknownPaymentMethod("bitcoin".to_string())));
    }

    #[test]
    fn whole_form_validation_is_address_validation() {
        let mut form = CheckoutForm {
            address: valid_address(),
            ..CheckoutForm::default()
        };

        assert!(form.validate().is_ok());

        form.address.city = String::new();
        let errors = form.validate().expect_err("bad city must fail");

        assert_eq!(errors.message_for("city"), Some("City is required."));
    }

    #[test]
    fn field_errors_display_names_fields() {
        let mut errors = FieldErrors::default();
        errors.push("city", "City is required.");
        errors.push("phone", "Valid phone number is required.");

        assert_eq!(
            errors.to_string(),
            "city: City is required.; phone: Valid phone number is required."
        );
    }
}
