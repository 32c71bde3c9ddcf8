//! Running file totals and the type `7` trailer layout.
//!
//! Totals grow monotonically: once a detail record has been accepted its
//! amount is never retracted, and nothing else writes to these fields.

use crate::format::{blanks, pad, Side};
use crate::money::Money;
use crate::record::{TransactionCode, LINE_BREAK, RECORD_LENGTH};

/// Record type marker for the file total line.
const FILE_TOTAL_RECORD: &str = "7";

/// BSB filler mandated for the trailer.
const TOTAL_BSB_FILLER: &str = "999-999";

/// Running totals for one in-progress file.
///
/// The trailer is computed from these on demand, so reading it between
/// transactions always reflects exactly the records accepted so far.
#[derive(Debug, Clone, Default)]
pub struct FileTotals {
    /// Number of accepted detail records.
    pub transaction_count: u32,
    /// Sum of all credit-classified amounts.
    pub credit_total: Money,
    /// Sum of all debit-classified amounts.
    pub debit_total: Money,
}

impl FileTotals {
    /// Folds one accepted transaction into the running totals.
    pub(crate) fn accumulate(&mut self, code: TransactionCode, amount: Money) {
        if code.is_debit() {
            self.debit_total += amount;
        } else {
            self.credit_total += amount;
        }
        self.transaction_count += 1;
    }

    /// The accounting net of the file, `|credit_total - debit_total|`.
    pub fn net(&self) -> Money {
        self.credit_total.abs_diff(self.debit_total)
    }

    /// Builds the type `7` total line, 120 characters plus CRLF.
    pub(crate) fn record_line(&self) -> String {
        let mut line = String::with_capacity(RECORD_LENGTH + LINE_BREAK.len());
        // 1: record type
        line.push_str(FILE_TOTAL_RECORD);
        // 2-8: BSB format filler
        line.push_str(TOTAL_BSB_FILLER);
        // 9-20: blank
        line.push_str(&blanks(12));
        // 21-30: net total in cents
        line.push_str(&pad(&self.net().cents().to_string(), 10, '0', Side::Left));
        // 31-40: credit total in cents
        line.push_str(&pad(&self.credit_total.cents().to_string(), 10, '0', Side::Left));
        // 41-50: debit total in cents
        line.push_str(&pad(&self.debit_total.cents().to_string(), 10, '0', Side::Left));
        // 51-74: blank
        line.push_str(&blanks(24));
        // 75-80: record count
        line.push_str(&pad(&self.transaction_count.to_string(), 6, '0', Side::Left));
        // 81-120: blank
        line.push_str(&blanks(40));
        line.push_str(LINE_BREAK);
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(value: &str) -> Money {
        Money::parse(value).expect("test amounts parse")
    }

    #[test]
    fn test_accumulate_classifies_by_code() {
        let mut totals = FileTotals::default();
        totals.accumulate(TransactionCode::Pay, money("100.00"));
        totals.accumulate(TransactionCode::ExternallyInitiatedDebit, money("40.25"));
        totals.accumulate(TransactionCode::Dividend, money("9.75"));

        assert_eq!(totals.transaction_count, 3);
        assert_eq!(totals.credit_total.cents(), 10975);
        assert_eq!(totals.debit_total.cents(), 4025);
        assert_eq!(totals.net().cents(), 6950);
    }

    #[test]
    fn test_net_is_absolute() {
        let mut totals = FileTotals::default();
        totals.accumulate(TransactionCode::ExternallyInitiatedDebit, money("500.00"));
        totals.accumulate(TransactionCode::Pay, money("120.00"));

        assert_eq!(totals.net().cents(), 38000);
    }

    #[test]
    fn test_total_layout() {
        let mut totals = FileTotals::default();
        totals.accumulate(TransactionCode::Pay, money("250.87"));
        totals.accumulate(TransactionCode::Pay, money("250.87"));

        let line = totals.record_line();
        let expected = format!(
            "7999-999{}000005017400000501740000000000{}000002{}\r\n",
            " ".repeat(12),
            " ".repeat(24),
            " ".repeat(40),
        );
        assert_eq!(line, expected);
        assert_eq!(line.len(), RECORD_LENGTH + 2);
    }

    #[test]
    fn test_empty_totals_layout() {
        let line = FileTotals::default().record_line();

        assert_eq!(&line[20..30], "0000000000");
        assert_eq!(&line[30..40], "0000000000");
        assert_eq!(&line[40..50], "0000000000");
        assert_eq!(&line[74..80], "000000");
        assert_eq!(line.len(), RECORD_LENGTH + 2);
    }
}
