//! Checkout
//!
//! The four-step wizard that turns a cart into a placed order: cart review,
//! delivery address, payment, confirmation. Forward movement is gated per
//! step; backward movement never is and never loses entered values.
//! Submission is the one-way exit from the confirmation step and produces a
//! [`PlacedOrder`]; the hand-off to tracking is the caller's concern.

pub mod form;

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    clock::Clock,
    pricing::{OrderTotals, TotalsError},
};

use self::form::{CheckoutForm, DeliveryAddressForm, FieldErrors, PaymentMethod};

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckoutStep {
    /// Review cart lines and totals.
    CartReview,

    /// Capture the delivery address.
    DeliveryAddress,

    /// Choose the payment method and optionally a promo code.
    Payment,

    /// Final review before placing the order.
    Confirmation,
}

impl CheckoutStep {
    /// 1-based position shown in the step indicator.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            CheckoutStep::CartReview => 1,
            CheckoutStep::DeliveryAddress => 2,
            CheckoutStep::Payment => 3,
            CheckoutStep::Confirmation => 4,
        }
    }

    /// Step title shown in the indicator.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            CheckoutStep::CartReview => "Cart Review",
            CheckoutStep::DeliveryAddress => "Delivery Address",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Confirmation => "Confirmation",
        }
    }

    fn next(self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::CartReview => Some(CheckoutStep::DeliveryAddress),
            CheckoutStep::DeliveryAddress => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::Confirmation),
            CheckoutStep::Confirmation => None,
        }
    }

    fn prev(self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::CartReview => None,
            CheckoutStep::DeliveryAddress => Some(CheckoutStep::CartReview),
            CheckoutStep::Payment => Some(CheckoutStep::DeliveryAddress),
            CheckoutStep::Confirmation => Some(CheckoutStep::Payment),
        }
    }
}

/// Errors related to wizard movement or submission.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// Forward movement from cart review needs a non-empty cart.
    #[error("Please add items to your cart before proceeding.")]
    EmptyCart,

    /// Forward movement past the address step needs a valid address.
    #[error("Please fill in all required address fields.")]
    InvalidAddress(FieldErrors),

    /// Submission is only available from the confirmation step.
    #[error("order can only be placed from the confirmation step, not {}", .0.title())]
    NotAtConfirmation(CheckoutStep),

    /// Whole-form validation failed at submission.
    #[error("checkout form is not valid: {0}")]
    InvalidForm(FieldErrors),

    /// Wrapped totals computation error.
    #[error(transparent)]
    Totals(#[from] TotalsError),
}

/// The facts of a successfully placed order: the wizard's one-way exit.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    /// Generated order identifier (`FF` plus six timestamp digits).
    pub id: String,

    /// Snapshot of the cart lines at submission.
    pub lines: Vec<CartLine>,

    /// Totals captured at submission.
    pub totals: OrderTotals,

    /// Where the order is going.
    pub address: DeliveryAddressForm,

    /// How it will be paid.
    pub payment_method: PaymentMethod,

    /// Promo code as entered, if any.
    pub promo_code: Option<String>,
}

/// Checkout
///
/// Owns the cart under checkout, the form, and the current step.
#[derive(Debug)]
pub struct Checkout {
    step: CheckoutStep,
    cart: Cart,
    form: CheckoutForm,
}

impl Checkout {
    /// Start the wizard at cart review over an existing cart.
    #[must_use]
    pub fn new(cart: Cart) -> Self {
        Checkout {
            step: CheckoutStep::CartReview,
            cart,
            form: CheckoutForm::default(),
        }
    }

    /// Current wizard step.
    #[must_use]
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// The cart under checkout.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access to the cart for review-step edits.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// The form as filled in so far.
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Mutable access to the form; values persist across step movement.
    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// The currency the order will be placed in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.cart.currency()
    }

    /// Totals for the cart's current contents, computed fresh.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if the amounts cannot be derived.
    pub fn totals(&self) -> Result<OrderTotals, TotalsError> {
        OrderTotals::from_cart(&self.cart)
    }

    /// Move forward one step, enforcing the current step's gate.
    ///
    /// Cart review requires a non-empty cart; the address step requires every
    /// address field to pass its validator. The payment step has no gate, and
    /// at confirmation there is nowhere further to go, so the call is a
    /// no-op. On a gate failure the step does not change.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: no lines to check out.
    /// - [`CheckoutError::InvalidAddress`]: failing address fields.
    pub fn advance(&mut self) -> Result<CheckoutStep, CheckoutError> {
        match self.step {
            CheckoutStep::CartReview if self.cart.is_empty() => Err(CheckoutError::EmptyCart),
            CheckoutStep::DeliveryAddress => {
                self.form
                    .address
                    .validate()
                    .map_err(CheckoutError::InvalidAddress)?;

                self.step = CheckoutStep::Payment;

                Ok(self.step)
            }
            step => {
                self.step = step.next().unwrap_or(step);

                Ok(self.step)
            }
        }
    }

    /// Move back one step; never gated, never loses form values.
    ///
    /// Saturates at cart review.
    pub fn back(&mut self) -> CheckoutStep {
        self.step = self.step.prev().unwrap_or(self.step);
        self.step
    }

    /// Place the order from the confirmation step.
    ///
    /// Runs whole-form validation, snapshots lines and totals, and mints the
    /// order identifier from the clock: `FF` followed by the last six digits
    /// of the epoch-millisecond timestamp. Once validation passes there is no
    /// failure branch; the simulated placement always succeeds.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::NotAtConfirmation`]: called from an earlier step.
    /// - [`CheckoutError::InvalidForm`]: whole-form validation failed.
    /// - [`CheckoutError::Totals`]: the totals could not be derived.
    pub fn submit(&self, clock: &impl Clock) -> Result<PlacedOrder, CheckoutError> {
        if self.step != CheckoutStep::Confirmation {
            return Err(CheckoutError::NotAtConfirmation(self.step));
        }

        self.form.validate().map_err(CheckoutError::InvalidForm)?;

        let totals = self.totals()?;
        let id = mint_order_id(clock);

        Ok(PlacedOrder {
            id,
            lines: self.cart.iter().cloned().collect(),
            totals,
            address: self.form.address.clone(),
            payment_method: self.form.payment_method,
            promo_code: self.form.promo_code.clone(),
        })
    }
}

/// `FF` plus the last six digits of the epoch-millisecond timestamp.
fn mint_order_id(clock: &impl Clock) -> String {
    format!("FF{:06}", clock.now_millis() % 1_000_000)
}
