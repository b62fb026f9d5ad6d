use super::checkout::{Checkout, CheckoutOutcome};
use super::dashboard::DashboardReport;
use super::support::{AssistantReply, SupportAssistant, Transcript};
use crate::domain::cart::Cart;
use crate::domain::catalog::{Catalog, ServiceCategory};
use crate::domain::ports::{PaymentGatewayRef, TransactionHistory, TransactionHistoryBox};
use crate::domain::selection::SelectionFlow;
use crate::domain::transaction::{PayerType, PaymentMethod, Transaction};
use crate::error::{Result, StorefrontError};
use tracing::{debug, info};

/// One user action in a storefront session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    StartFlow(ServiceCategory),
    ChooseProvider(String),
    EnterIdentifier(String),
    Advance,
    Back,
    ChoosePlan(String),
    AddToCart,
    /// 1-based position in the cart listing.
    RemoveItem(usize),
    ClearCart,
    SelectPaymentMethod(PaymentMethod),
    SetPayer(PayerType),
    Pay,
    Ask(String),
}

/// Everything that belongs to a single shopper's session.
///
/// Owned by the caller and passed into every handler; nothing here is shared
/// with other sessions.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub cart: Cart,
    pub flow: Option<SelectionFlow>,
    pub checkout: Checkout,
    pub transcript: Transcript,
    /// Transactions paid during this session, oldest first.
    pub completed: Vec<Transaction>,
}

impl Session {
    pub fn new(payer: PayerType) -> Self {
        Self {
            checkout: Checkout::new(payer),
            ..Self::default()
        }
    }

    fn flow_mut(&mut self) -> Result<&mut SelectionFlow> {
        self.flow.as_mut().ok_or_else(|| {
            StorefrontError::SelectionError("no recharge flow in progress".to_string())
        })
    }
}

/// The storefront's shared collaborators. Handlers borrow it immutably and
/// mutate only the session they are given.
pub struct Storefront {
    catalog: Catalog,
    gateway: PaymentGatewayRef,
    history: TransactionHistoryBox,
    assistant: SupportAssistant,
}

impl Storefront {
    pub fn new(
        catalog: Catalog,
        gateway: PaymentGatewayRef,
        history: TransactionHistoryBox,
        assistant: SupportAssistant,
    ) -> Self {
        Self {
            catalog,
            gateway,
            history,
            assistant,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn history(&self) -> &dyn TransactionHistory {
        self.history.as_ref()
    }

    pub fn assistant(&self) -> &SupportAssistant {
        &self.assistant
    }

    /// Applies one event to `session`. Events that do not fit the current
    /// state return an error and leave the session as it was.
    pub async fn handle(&self, session: &mut Session, event: SessionEvent) -> Result<()> {
        match event {
            SessionEvent::StartFlow(category) => {
                debug!(%category, "starting recharge flow");
                session.flow = Some(SelectionFlow::start(category));
            }
            SessionEvent::ChooseProvider(id) => {
                session.flow_mut()?.choose_provider(&self.catalog, &id)?;
            }
            SessionEvent::EnterIdentifier(text) => {
                session.flow_mut()?.enter_identifier(text)?;
            }
            SessionEvent::Advance => {
                let flow = session.flow_mut()?;
                if !flow.advance() {
                    debug!(step = flow.step(), "advance ignored; step incomplete");
                }
            }
            SessionEvent::Back => {
                session.flow_mut()?.back();
            }
            SessionEvent::ChoosePlan(id) => {
                session.flow_mut()?.choose_plan(&self.catalog, &id)?;
            }
            SessionEvent::AddToCart => self.add_to_cart(session)?,
            SessionEvent::RemoveItem(position) => {
                match session.cart.at_position(position).map(|e| e.id) {
                    Some(id) => {
                        session.cart.remove(id);
                    }
                    None => debug!(position, "no cart entry at position"),
                }
            }
            SessionEvent::ClearCart => session.cart.clear(),
            SessionEvent::SelectPaymentMethod(method) => session.checkout.select_method(method),
            SessionEvent::SetPayer(payer) => session.checkout.set_payer(payer),
            SessionEvent::Pay => {
                self.pay(session).await?;
            }
            SessionEvent::Ask(message) => {
                if let Some(reply) = self.ask(session, &message).await {
                    info!(fallback = reply.is_fallback(), reply = reply.text(), "SeaBot replied");
                }
            }
        }
        Ok(())
    }

    /// Finishes the wizard: appends the entry and hands the user to checkout.
    /// Without a chosen plan the flow stays where it is.
    fn add_to_cart(&self, session: &mut Session) -> Result<()> {
        let flow = session.flow.take().ok_or_else(|| {
            StorefrontError::SelectionError("no recharge flow in progress".to_string())
        })?;
        match flow.finalize() {
            Ok(entry) => {
                info!(
                    plan = %entry.plan.name,
                    provider = %entry.provider.name,
                    account = %entry.account,
                    "added to cart"
                );
                session.cart.add(entry);
                session.checkout.reset();
            }
            Err(flow) => {
                debug!(step = flow.step(), "add to cart ignored; no plan chosen");
                session.flow = Some(flow);
            }
        }
        Ok(())
    }

    pub async fn pay(&self, session: &mut Session) -> Result<CheckoutOutcome> {
        let outcome = session
            .checkout
            .pay(&mut session.cart, self.gateway.clone(), self.history.as_ref())
            .await?;
        session.completed.push(outcome.transaction.clone());
        Ok(outcome)
    }

    pub async fn ask(&self, session: &mut Session, message: &str) -> Option<AssistantReply> {
        self.assistant.ask(&mut session.transcript, message).await
    }

    pub async fn dashboard(&self, admin: bool) -> Result<DashboardReport> {
        DashboardReport::load(self.history.as_ref(), admin).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::checkout::CheckoutState;
    use crate::application::support::OFFLINE_FALLBACK;
    use crate::domain::money::Money;
    use crate::infrastructure::in_memory::InMemoryTransactionHistory;
    use crate::infrastructure::simulated_gateway::SimulatedPaymentGateway;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::time::Duration;

    fn storefront() -> Storefront {
        let catalog = Catalog::seeded();
        let assistant = SupportAssistant::new(None, &catalog).unwrap();
        Storefront::new(
            catalog,
            Arc::new(SimulatedPaymentGateway::new(Duration::ZERO)),
            Box::new(InMemoryTransactionHistory::new()),
            assistant,
        )
    }

    async fn run(store: &Storefront, session: &mut Session, events: Vec<SessionEvent>) {
        for event in events {
            store.handle(session, event).await.unwrap();
        }
    }

    fn mobile_topup() -> Vec<SessionEvent> {
        vec![
            SessionEvent::StartFlow(ServiceCategory::Mobile),
            SessionEvent::ChooseProvider("ais".to_string()),
            SessionEvent::EnterIdentifier("0812345678".to_string()),
            SessionEvent::Advance,
            SessionEvent::ChoosePlan("m1".to_string()),
            SessionEvent::AddToCart,
        ]
    }

    #[tokio::test]
    async fn test_mobile_topup_scenario() {
        let store = storefront();
        let mut session = Session::default();
        run(&store, &mut session, mobile_topup()).await;

        assert!(session.flow.is_none());
        assert_eq!(session.cart.len(), 1);
        let entry = &session.cart.entries()[0];
        assert_eq!(entry.provider.name, "AIS Mobile");
        assert_eq!(entry.account.as_str(), "0812345678");
        assert_eq!(entry.plan.name, "Topup 100");

        let totals = Checkout::totals(&session.cart);
        assert_eq!(totals.subtotal.to_string(), "฿100.00");
        assert_eq!(totals.tax.to_string(), "฿7.00");
        assert_eq!(totals.total.to_string(), "฿107.00");

        store.handle(&mut session, SessionEvent::Pay).await.unwrap();
        assert!(session.cart.is_empty());
        assert_eq!(session.completed.len(), 1);
        assert_eq!(session.completed[0].total, Money::new(dec!(107)));
        assert_eq!(store.history().all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_advance_without_identifier_is_noop() {
        let store = storefront();
        let mut session = Session::default();
        run(
            &store,
            &mut session,
            vec![
                SessionEvent::StartFlow(ServiceCategory::Utility),
                SessionEvent::ChooseProvider("mea".to_string()),
                SessionEvent::Advance,
            ],
        )
        .await;
        assert_eq!(session.flow.as_ref().unwrap().step(), 2);
    }

    #[tokio::test]
    async fn test_add_without_plan_keeps_flow() {
        let store = storefront();
        let mut session = Session::default();
        let mut events = mobile_topup();
        events.remove(4);
        run(&store, &mut session, events).await;

        assert!(session.cart.is_empty());
        assert_eq!(session.flow.as_ref().unwrap().step(), 3);
    }

    #[tokio::test]
    async fn test_events_without_flow_rejected() {
        let store = storefront();
        let mut session = Session::default();
        let result = store
            .handle(&mut session, SessionEvent::ChooseProvider("ais".to_string()))
            .await;
        assert!(matches!(result, Err(StorefrontError::SelectionError(_))));
        assert!(matches!(
            store.handle(&mut session, SessionEvent::AddToCart).await,
            Err(StorefrontError::SelectionError(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_by_position_and_clear() {
        let store = storefront();
        let mut session = Session::default();
        run(&store, &mut session, mobile_topup()).await;
        run(&store, &mut session, mobile_topup()).await;
        assert_eq!(session.cart.len(), 2);

        let second = session.cart.entries()[1].id;
        store.handle(&mut session, SessionEvent::RemoveItem(1)).await.unwrap();
        assert_eq!(session.cart.len(), 1);
        assert_eq!(session.cart.entries()[0].id, second);

        store.handle(&mut session, SessionEvent::RemoveItem(9)).await.unwrap();
        assert_eq!(session.cart.len(), 1);

        store.handle(&mut session, SessionEvent::ClearCart).await.unwrap();
        assert!(session.cart.is_empty());
    }

    #[tokio::test]
    async fn test_pay_empty_cart_rejected() {
        let store = storefront();
        let mut session = Session::default();
        assert!(matches!(
            store.handle(&mut session, SessionEvent::Pay).await,
            Err(StorefrontError::EmptyCart)
        ));
    }

    #[tokio::test]
    async fn test_new_purchase_resets_completed_checkout() {
        let store = storefront();
        let mut session = Session::new(PayerType::Business);
        run(&store, &mut session, mobile_topup()).await;
        store.handle(&mut session, SessionEvent::Pay).await.unwrap();
        assert!(matches!(session.checkout.state(), CheckoutState::Complete(_)));
        assert!(session.completed[0].offers_tax_invoice());

        run(&store, &mut session, mobile_topup()).await;
        assert_eq!(session.checkout.state(), &CheckoutState::Ready);
    }

    #[tokio::test]
    async fn test_ask_records_fallback_in_transcript() {
        let store = storefront();
        let mut session = Session::default();
        store
            .handle(&mut session, SessionEvent::Ask("which plan?".to_string()))
            .await
            .unwrap();
        let messages = session.transcript.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].text, OFFLINE_FALLBACK);
    }
}
