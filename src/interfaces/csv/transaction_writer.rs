use crate::domain::transaction::Transaction;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TransactionRow<'a> {
    id: &'a str,
    date: String,
    items: usize,
    total: String,
    status: String,
    payer: String,
    method: &'static str,
    tax_invoice: bool,
}

impl<'a> From<&'a Transaction> for TransactionRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            id: &tx.id,
            date: tx.date.format("%Y-%m-%d").to_string(),
            items: tx.items.len(),
            total: tx.total.to_plain_string(),
            status: tx.status.to_string(),
            payer: tx.payer.to_string(),
            method: tx.method.map(|m| m.label()).unwrap_or(""),
            tax_invoice: tx.offers_tax_invoice(),
        }
    }
}

/// Writes transactions as CSV with the header
/// `id,date,items,total,status,payer,method,tax_invoice`.
pub struct TransactionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TransactionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_transactions<'a>(
        &mut self,
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> Result<()> {
        let mut written = false;
        for tx in transactions {
            self.writer.serialize(TransactionRow::from(tx))?;
            written = true;
        }
        if !written {
            self.writer.write_record([
                "id",
                "date",
                "items",
                "total",
                "status",
                "payer",
                "method",
                "tax_invoice",
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
