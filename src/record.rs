//! Input records and the type `0` and type `1` record layouts.
//!
//! Callers hand over raw records whose fields are all optional; validation
//! turns them into fully-formatted internal values, and the layout builders
//! assemble the fixed 120-character lines column by column.

use crate::error::Result;
use crate::format::{blanks, pad, Side, TruncationPolicy};
use crate::money::Money;
use crate::validate::{Field, FieldValidator};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

/// Every record line is exactly this many characters before its terminator.
pub const RECORD_LENGTH: usize = 120;

/// Direct-entry lines are CRLF-terminated.
pub(crate) const LINE_BREAK: &str = "\r\n";

/// Record type marker for the file header line.
const DESCRIPTIVE_RECORD: &str = "0";

/// Record type marker for transaction lines.
const DETAIL_RECORD: &str = "1";

/// Raw file-header fields, as supplied by the caller.
///
/// Everything is optional at this level so that required-field validation
/// can report all absent names at once; validation and formatting happen in
/// [`set_descriptive_record`](crate::AbaFileGenerator::set_descriptive_record).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DescriptiveRecord {
    /// Originating BSB, `XXX-XXX`
    pub bsb: Option<String>,
    /// Originating account number, up to 9 digits
    pub account_number: Option<String>,
    /// Three-letter bank mnemonic, e.g. `CBA`
    pub bank_name: Option<String>,
    /// Name of the user supplying the file, up to 26 characters
    pub user_name: Option<String>,
    /// APCA-assigned user identification number, up to 6 digits
    pub user_number: Option<String>,
    /// Description of the entries, e.g. `PAYROLL`
    pub description: Option<String>,
    /// Date the transactions are to be processed, `DDMMYY`
    pub process_date: Option<String>,
    /// Remitter name echoed into every detail record's trace columns
    pub remitter: Option<String>,
}

/// Raw transaction fields, as supplied by the caller.
///
/// `indicator` defaults to a blank space and `withholding_tax` to zero when
/// absent; every other required field must be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetailRecord {
    /// Destination BSB, `XXX-XXX`
    pub bsb: Option<String>,
    /// Destination account number, up to 9 digits
    pub account_number: Option<String>,
    /// Single-character indicator: `N`, `T`, `W`, `X`, `Y`, or blank
    pub indicator: Option<String>,
    /// Two-digit transaction code from the direct-entry whitelist
    pub transaction_code: Option<String>,
    /// Amount in dollars, converted to cents in the record
    pub amount: Option<String>,
    /// Account name of the recipient, up to 32 characters
    pub account_name: Option<String>,
    /// Lodgement reference shown on the recipient's statement
    pub reference: Option<String>,
    /// Withholding tax amount in dollars, zero when absent
    pub withholding_tax: Option<String>,
}

/// The whitelisted direct-entry transaction codes.
///
/// Code `13` is the only debit; every other code credits the destination
/// account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionCode {
    /// 13, externally initiated debit
    ExternallyInitiatedDebit,
    /// 50, externally initiated credit
    ExternallyInitiatedCredit,
    /// 51, Australian Government Security interest
    GovernmentSecurityInterest,
    /// 52, family allowance
    FamilyAllowance,
    /// 53, pay
    Pay,
    /// 54, pension
    Pension,
    /// 55, allotment
    Allotment,
    /// 56, dividend
    Dividend,
    /// 57, debenture or note interest
    DebentureOrNoteInterest,
}

impl TransactionCode {
    /// Every allowed code, in wire order.
    pub const ALL: [TransactionCode; 9] = [
        TransactionCode::ExternallyInitiatedDebit,
        TransactionCode::ExternallyInitiatedCredit,
        TransactionCode::GovernmentSecurityInterest,
        TransactionCode::FamilyAllowance,
        TransactionCode::Pay,
        TransactionCode::Pension,
        TransactionCode::Allotment,
        TransactionCode::Dividend,
        TransactionCode::DebentureOrNoteInterest,
    ];

    /// The two-digit wire form.
    pub fn code(self) -> &'static str {
        match self {
            TransactionCode::ExternallyInitiatedDebit => "13",
            TransactionCode::ExternallyInitiatedCredit => "50",
            TransactionCode::GovernmentSecurityInterest => "51",
            TransactionCode::FamilyAllowance => "52",
            TransactionCode::Pay => "53",
            TransactionCode::Pension => "54",
            TransactionCode::Allotment => "55",
            TransactionCode::Dividend => "56",
            TransactionCode::DebentureOrNoteInterest => "57",
        }
    }

    /// Looks a wire code up in the whitelist.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "13" => Some(TransactionCode::ExternallyInitiatedDebit),
            "50" => Some(TransactionCode::ExternallyInitiatedCredit),
            "51" => Some(TransactionCode::GovernmentSecurityInterest),
            "52" => Some(TransactionCode::FamilyAllowance),
            "53" => Some(TransactionCode::Pay),
            "54" => Some(TransactionCode::Pension),
            "55" => Some(TransactionCode::Allotment),
            "56" => Some(TransactionCode::Dividend),
            "57" => Some(TransactionCode::DebentureOrNoteInterest),
            _ => None,
        }
    }

    /// Debits reduce the destination account; only code `13` qualifies.
    pub fn is_debit(self) -> bool {
        matches!(self, TransactionCode::ExternallyInitiatedDebit)
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Renders a calendar date in the `DDMMYY` wire form expected by
/// [`DescriptiveRecord::process_date`].
pub fn format_process_date(date: NaiveDate) -> String {
    date.format("%d%m%y").to_string()
}

/// A validated descriptive record, cached for the life of the file.
///
/// `bsb`, `account_number`, and `remitter` are echoed into the trace
/// columns of every detail record.
#[derive(Debug, Clone)]
pub(crate) struct Header {
    bsb: String,
    account_number: String,
    bank_name: String,
    user_name: String,
    user_number: String,
    description: String,
    process_date: String,
    remitter: String,
}

impl DescriptiveRecord {
    /// Validates the raw record into the cached header.
    pub(crate) fn validate(
        &self,
        validator: &FieldValidator,
        policy: TruncationPolicy,
    ) -> Result<Header> {
        validator.require_fields(
            "descriptive",
            &[
                (Field::Bsb, self.bsb.as_deref()),
                (Field::AccountNumber, self.account_number.as_deref()),
                (Field::BankName, self.bank_name.as_deref()),
                (Field::UserName, self.user_name.as_deref()),
                (Field::UserNumber, self.user_number.as_deref()),
                (Field::Remitter, self.remitter.as_deref()),
                (Field::Description, self.description.as_deref()),
            ],
        )?;

        let resolve = |field: Field, value: &Option<String>| {
            policy.apply(field.name(), field.width(), value.as_deref().unwrap_or_default())
        };

        let header = Header {
            bsb: resolve(Field::Bsb, &self.bsb),
            account_number: resolve(Field::AccountNumber, &self.account_number),
            bank_name: resolve(Field::BankName, &self.bank_name),
            user_name: resolve(Field::UserName, &self.user_name),
            user_number: resolve(Field::UserNumber, &self.user_number),
            description: resolve(Field::Description, &self.description),
            // The date is never truncated; it is validated as a calendar
            // date and emitted verbatim.
            process_date: self.process_date.clone().unwrap_or_default(),
            remitter: resolve(Field::Remitter, &self.remitter),
        };

        validator.match_format(&[
            (Field::Bsb, &header.bsb),
            (Field::AccountNumber, &header.account_number),
            (Field::BankName, &header.bank_name),
            (Field::UserName, &header.user_name),
            (Field::UserNumber, &header.user_number),
            (Field::Remitter, &header.remitter),
            (Field::Description, &header.description),
        ])?;

        validator.validate_process_date(self.process_date.as_deref())?;

        Ok(header)
    }
}

impl Header {
    /// Builds the type `0` descriptive line, 120 characters plus CRLF.
    pub(crate) fn record_line(&self) -> String {
        let mut line = String::with_capacity(RECORD_LENGTH + LINE_BREAK.len());
        // 1: record type
        line.push_str(DESCRIPTIVE_RECORD);
        // 2-18: blank
        line.push_str(&blanks(17));
        // 19-20: reel sequence number
        line.push_str("01");
        // 21-23: bank name
        line.push_str(&self.bank_name);
        // 24-30: blank
        line.push_str(&blanks(7));
        // 31-56: user name
        line.push_str(&pad(&self.user_name, 26, ' ', Side::Right));
        // 57-62: APCA user number, zero-filled on the right
        line.push_str(&pad(&self.user_number, 6, '0', Side::Right));
        // 63-74: description of entries
        line.push_str(&pad(&self.description, 12, ' ', Side::Right));
        // 75-80: processing date, DDMMYY
        line.push_str(&self.process_date);
        // 81-120: blank
        line.push_str(&blanks(40));
        line.push_str(LINE_BREAK);
        line
    }

    pub(crate) fn bsb(&self) -> &str {
        &self.bsb
    }

    pub(crate) fn account_number(&self) -> &str {
        &self.account_number
    }

    pub(crate) fn remitter(&self) -> &str {
        &self.remitter
    }
}

/// A validated transaction, ready to accumulate into the totals and to lay
/// out as a detail line.
#[derive(Debug, Clone)]
pub(crate) struct DetailEntry {
    pub(crate) bsb: String,
    pub(crate) account_number: String,
    pub(crate) indicator: String,
    pub(crate) code: TransactionCode,
    pub(crate) amount: Money,
    pub(crate) account_name: String,
    pub(crate) reference: String,
    pub(crate) withholding_tax: Money,
}

impl DetailRecord {
    /// Validates the raw record into a detail entry.
    ///
    /// Runs in a fixed order: defaults, required fields, format rules,
    /// transaction code, then the currency amounts. The first failure wins
    /// and nothing is produced.
    pub(crate) fn validate(
        &self,
        validator: &FieldValidator,
        policy: TruncationPolicy,
    ) -> Result<DetailEntry> {
        // Absent indicator and withholding tax take their defaults before
        // any validation runs.
        let indicator = self.indicator.clone().unwrap_or_else(|| " ".to_string());
        let withholding_tax = self.withholding_tax.clone().unwrap_or_else(|| "0".to_string());

        validator.require_fields(
            "detail",
            &[
                (Field::Bsb, self.bsb.as_deref()),
                (Field::AccountNumber, self.account_number.as_deref()),
                (Field::Indicator, Some(indicator.as_str())),
                (Field::AccountName, self.account_name.as_deref()),
                (Field::Reference, self.reference.as_deref()),
            ],
        )?;

        let resolve = |field: Field, value: &Option<String>| {
            policy.apply(field.name(), field.width(), value.as_deref().unwrap_or_default())
        };

        let bsb = resolve(Field::Bsb, &self.bsb);
        let account_number = resolve(Field::AccountNumber, &self.account_number);
        let indicator = policy.apply(Field::Indicator.name(), Field::Indicator.width(), &indicator);
        let account_name = resolve(Field::AccountName, &self.account_name);
        let reference = resolve(Field::Reference, &self.reference);

        validator.match_format(&[
            (Field::Bsb, &bsb),
            (Field::AccountNumber, &account_number),
            (Field::Indicator, &indicator),
            (Field::AccountName, &account_name),
            (Field::Reference, &reference),
        ])?;

        let code = validator.validate_transaction_code(self.transaction_code.as_deref())?;
        let amount = validator.validate_numeric("amount", self.amount.as_deref())?;
        let withholding_tax =
            validator.validate_numeric("withholding_tax", Some(withholding_tax.as_str()))?;

        Ok(DetailEntry {
            bsb,
            account_number,
            indicator,
            code,
            amount,
            account_name,
            reference,
            withholding_tax,
        })
    }
}

impl DetailEntry {
    /// Builds the type `1` detail line, 120 characters plus CRLF, echoing
    /// the header's trace fields.
    pub(crate) fn record_line(&self, header: &Header) -> String {
        let mut line = String::with_capacity(RECORD_LENGTH + LINE_BREAK.len());
        // 1: record type
        line.push_str(DETAIL_RECORD);
        // 2-8: destination BSB
        line.push_str(&self.bsb);
        // 9-17: destination account number, right-aligned
        line.push_str(&pad(&self.account_number, 9, ' ', Side::Left));
        // 18: indicator
        line.push_str(&self.indicator);
        // 19-20: transaction code
        line.push_str(self.code.code());
        // 21-30: amount in cents
        line.push_str(&pad(&self.amount.cents().to_string(), 10, '0', Side::Left));
        // 31-62: account name
        line.push_str(&pad(&self.account_name, 32, ' ', Side::Right));
        // 63-80: lodgement reference, right-aligned
        line.push_str(&pad(&self.reference, 18, ' ', Side::Left));
        // 81-87: trace BSB
        line.push_str(header.bsb());
        // 88-96: trace account number, right-aligned
        line.push_str(&pad(header.account_number(), 9, ' ', Side::Left));
        // 97-112: remitter name
        line.push_str(&pad(header.remitter(), 16, ' ', Side::Right));
        // 113-120: withholding tax in cents
        line.push_str(&pad(&self.withholding_tax.cents().to_string(), 8, '0', Side::Left));
        line.push_str(LINE_BREAK);
        line
    }
}
