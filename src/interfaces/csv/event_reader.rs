use crate::application::storefront::SessionEvent;
use crate::error::{Result, StorefrontError};
use serde::Deserialize;
use std::io::Read;

/// One row of a session script: `action,value`.
#[derive(Debug, Deserialize)]
struct EventRecord {
    action: String,
    #[serde(default)]
    value: Option<String>,
}

impl EventRecord {
    fn value(self) -> Result<String> {
        match self.value {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(StorefrontError::ValidationError(format!(
                "action '{}' requires a value",
                self.action
            ))),
        }
    }
}

impl TryFrom<EventRecord> for SessionEvent {
    type Error = StorefrontError;

    fn try_from(record: EventRecord) -> Result<Self> {
        let event = match record.action.to_ascii_lowercase().as_str() {
            "category" | "start" => SessionEvent::StartFlow(record.value()?.parse()?),
            "provider" => SessionEvent::ChooseProvider(record.value()?),
            "account" => SessionEvent::EnterIdentifier(record.value()?),
            "next" => SessionEvent::Advance,
            "back" => SessionEvent::Back,
            "plan" => SessionEvent::ChoosePlan(record.value()?),
            "add" | "checkout" => SessionEvent::AddToCart,
            "remove" => {
                let value = record.value()?;
                let position = value.parse().map_err(|_| {
                    StorefrontError::ValidationError(format!("invalid cart position '{value}'"))
                })?;
                SessionEvent::RemoveItem(position)
            }
            "clear" => SessionEvent::ClearCart,
            "method" => SessionEvent::SelectPaymentMethod(record.value()?.parse()?),
            "payer" => SessionEvent::SetPayer(record.value()?.parse()?),
            "pay" => SessionEvent::Pay,
            "ask" => SessionEvent::Ask(record.value()?),
            other => {
                return Err(StorefrontError::ValidationError(format!(
                    "unknown action '{other}'"
                )));
            }
        };
        Ok(event)
    }
}

/// Reads session events from a CSV script.
///
/// Fields are trimmed and rows may omit the value column.
pub struct SessionEventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> SessionEventReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily parses rows; a bad row yields an error without ending the stream.
    pub fn events(self) -> impl Iterator<Item = Result<SessionEvent>> {
        self.reader
            .into_deserialize::<EventRecord>()
            .map(|result| result.map_err(StorefrontError::from).and_then(SessionEvent::try_from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ServiceCategory;
    use crate::domain::transaction::{PayerType, PaymentMethod};

    fn parse(data: &str) -> Vec<Result<SessionEvent>> {
        SessionEventReader::new(data.as_bytes()).events().collect()
    }

    #[test]
    fn test_reader_valid_script() {
        let data = "action, value\n\
                    category, mobile\n\
                    provider, ais\n\
                    account, 0812345678\n\
                    next\n\
                    plan, m1\n\
                    add,\n\
                    method, bank-transfer\n\
                    payer, business\n\
                    pay\n";
        let events: Vec<SessionEvent> = parse(data).into_iter().map(|e| e.unwrap()).collect();

        assert_eq!(
            events,
            vec![
                SessionEvent::StartFlow(ServiceCategory::Mobile),
                SessionEvent::ChooseProvider("ais".to_string()),
                SessionEvent::EnterIdentifier("0812345678".to_string()),
                SessionEvent::Advance,
                SessionEvent::ChoosePlan("m1".to_string()),
                SessionEvent::AddToCart,
                SessionEvent::SelectPaymentMethod(PaymentMethod::BankTransfer),
                SessionEvent::SetPayer(PayerType::Business),
                SessionEvent::Pay,
            ]
        );
    }

    #[test]
    fn test_reader_bad_rows_do_not_stop_stream() {
        let data = "action,value\nteleport,home\ncategory,groceries\nremove,first\nprovider,\nclear\n";
        let results = parse(data);

        assert_eq!(results.len(), 5);
        assert!(results[..4].iter().all(|r| r.is_err()));
        assert_eq!(results[4].as_ref().unwrap(), &SessionEvent::ClearCart);
    }

    #[test]
    fn test_reader_quoted_values() {
        let data = "action,value\nask,\"Which plan is best, for 10GB?\"\nremove,2\n";
        let results = parse(data);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &SessionEvent::Ask("Which plan is best, for 10GB?".to_string())
        );
        assert_eq!(results[1].as_ref().unwrap(), &SessionEvent::RemoveItem(2));
    }
}
