use crate::domain::cart::{Cart, CartEntry};
use crate::domain::ports::{PaymentGatewayRef, PaymentReceipt, PaymentRequest, TransactionHistory};
use crate::domain::pricing::Totals;
use crate::domain::transaction::{PayerType, PaymentMethod, Transaction, TransactionStatus};
use crate::error::{Result, StorefrontError};
use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub transaction: Transaction,
    pub receipt: PaymentReceipt,
    pub totals: Totals,
}

impl CheckoutOutcome {
    pub fn tax_invoice_offered(&self) -> bool {
        self.transaction.offers_tax_invoice()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutState {
    #[default]
    Ready,
    Processing,
    Complete(Box<CheckoutOutcome>),
}

/// A charge submitted to the gateway and not yet applied to the session.
pub struct PendingPayment {
    handle: JoinHandle<Result<PaymentReceipt>>,
    items: Vec<CartEntry>,
    totals: Totals,
    method: PaymentMethod,
    payer: PayerType,
}

impl PendingPayment {
    pub fn totals(&self) -> Totals {
        self.totals
    }
}

/// Checkout page state: payment method, payer type and payment progress.
///
/// Payment runs in two halves. `submit` snapshots the cart and spawns the
/// gateway call; while it is outstanding further submissions are refused.
/// `complete` awaits the gateway, records the transaction and clears the
/// cart. Dropping a `PendingPayment` without completing it leaves the
/// checkout in `Processing` until `reset` is called.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    method: PaymentMethod,
    payer: PayerType,
    state: CheckoutState,
}

impl Checkout {
    pub fn new(payer: PayerType) -> Self {
        Self {
            payer,
            ..Self::default()
        }
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn payer(&self) -> PayerType {
        self.payer
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn is_processing(&self) -> bool {
        self.state == CheckoutState::Processing
    }

    pub fn select_method(&mut self, method: PaymentMethod) {
        self.method = method;
    }

    pub fn set_payer(&mut self, payer: PayerType) {
        self.payer = payer;
    }

    /// Returns to `Ready` from a completed or abandoned payment so a new
    /// order can be paid.
    pub fn reset(&mut self) {
        if self.state != CheckoutState::Ready {
            debug!(processing = self.is_processing(), "checkout reset");
            self.state = CheckoutState::Ready;
        }
    }

    pub fn totals(cart: &Cart) -> Totals {
        Totals::for_cart(cart)
    }

    pub fn submit(&mut self, cart: &Cart, gateway: PaymentGatewayRef) -> Result<PendingPayment> {
        if self.is_processing() {
            return Err(StorefrontError::PaymentInProgress);
        }
        if cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        let totals = Totals::for_cart(cart);
        let request = PaymentRequest {
            totals,
            method: self.method,
            payer: self.payer,
        };
        info!(items = cart.len(), total = %totals.total, method = %self.method, "payment submitted");

        self.state = CheckoutState::Processing;
        let handle = tokio::spawn(async move { gateway.charge(request).await });
        Ok(PendingPayment {
            handle,
            items: cart.entries().to_vec(),
            totals,
            method: self.method,
            payer: self.payer,
        })
    }

    pub async fn complete(
        &mut self,
        pending: PendingPayment,
        cart: &mut Cart,
        history: &dyn TransactionHistory,
    ) -> Result<CheckoutOutcome> {
        let receipt = match pending.handle.await {
            Ok(Ok(receipt)) => receipt,
            Ok(Err(e)) => {
                self.state = CheckoutState::Ready;
                warn!(error = %e, "payment declined; cart kept");
                return Err(match e {
                    StorefrontError::PaymentDeclined(reason) => {
                        StorefrontError::PaymentDeclined(reason)
                    }
                    other => StorefrontError::PaymentDeclined(other.to_string()),
                });
            }
            Err(e) => {
                self.state = CheckoutState::Ready;
                return Err(StorefrontError::PaymentDeclined(e.to_string()));
            }
        };

        let transaction = Transaction {
            id: new_transaction_id(),
            date: Utc::now().date_naive(),
            items: pending.items,
            total: pending.totals.total,
            status: TransactionStatus::Success,
            payer: pending.payer,
            method: Some(pending.method),
        };
        // The charge went through; a history failure must not reopen the cart.
        if let Err(e) = history.record(transaction.clone()).await {
            warn!(error = %e, transaction = %transaction.id, "failed to record transaction");
        }

        cart.clear();
        let outcome = CheckoutOutcome {
            transaction,
            receipt,
            totals: pending.totals,
        };
        info!(
            transaction = %outcome.transaction.id,
            reference = %outcome.receipt.reference,
            tax_invoice = outcome.tax_invoice_offered(),
            "payment complete"
        );
        self.state = CheckoutState::Complete(Box::new(outcome.clone()));
        Ok(outcome)
    }

    /// Submits and waits for the result in one step.
    pub async fn pay(
        &mut self,
        cart: &mut Cart,
        gateway: PaymentGatewayRef,
        history: &dyn TransactionHistory,
    ) -> Result<CheckoutOutcome> {
        let pending = self.submit(cart, gateway)?;
        self.complete(pending, cart, history).await
    }
}

fn new_transaction_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("TXN-{}", id[..8].to_ascii_uppercase())
}
