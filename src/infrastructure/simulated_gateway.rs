use crate::domain::ports::{PaymentGateway, PaymentReceipt, PaymentRequest};
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(2000);

/// Stand-in for a real payment gateway.
///
/// Waits for a fixed delay and then approves every charge. There is no
/// authorization and no failure path.
#[derive(Debug, Clone)]
pub struct SimulatedPaymentGateway {
    delay: Duration,
}

impl SimulatedPaymentGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedPaymentGateway {
    fn default() -> Self {
        Self::new(DEFAULT_PAYMENT_DELAY)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn charge(&self, request: PaymentRequest) -> Result<PaymentReceipt> {
        debug!(
            total = %request.totals.total,
            method = %request.method,
            delay_ms = self.delay.as_millis() as u64,
            "simulating payment"
        );
        tokio::time::sleep(self.delay).await;
        Ok(PaymentReceipt {
            reference: format!("SIM-{}", Uuid::new_v4().simple()),
        })
    }
}
