//! CSV serializer for transaction lists.

use crate::error::Result;
use crate::types::TransactionRecord;
use csv::Writer;
use serde::Serialize;
use std::io::Write;

/// A list of transactions to export.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionCsv {
    pub transactions: Vec<TransactionRecord>,
}

/// CSV row structure.
#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    id: u32,
    title: &'a str,
    amount: &'a str,
    date: String,
    direction: &'static str,
}

impl TransactionCsv {
    /// Write the transactions to any destination implementing `Write`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ypbank_wallet::csv_format::TransactionCsv;
    /// use ypbank_wallet::provider::FixtureProvider;
    ///
    /// let csv = TransactionCsv { transactions: FixtureProvider::transaction_data() };
    /// let mut out = Vec::new();
    /// csv.write_to(&mut out)?;
    /// assert!(String::from_utf8(out).unwrap().starts_with("id,title,amount,date,direction"));
    /// # Ok::<(), ypbank_wallet::Error>(())
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut csv_writer = Writer::from_writer(writer);

        for transaction in &self.transactions {
            csv_writer.serialize(CsvRecord {
                id: transaction.id,
                title: &transaction.title,
                amount: &transaction.amount,
                date: transaction.date.format("%Y-%m-%d").to_string(),
                direction: transaction.debit_credit.code(),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FixtureProvider;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_transactions() {
        let csv = TransactionCsv {
            transactions: FixtureProvider::transaction_data().into_iter().take(2).collect(),
        };
        let mut out = Vec::new();
        csv.write_to(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,title,amount,date,direction\n\
             1,Transfer from CAD Wallet to an External CAD Account,- $100,2024-10-08,D\n\
             2,CAD Funding from direct deposit,+ $100,2024-10-04,C\n"
        );
    }

    #[test]
    fn test_empty_list_writes_nothing() {
        let csv = TransactionCsv {
            transactions: Vec::new(),
        };
        let mut out = Vec::new();
        csv.write_to(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
