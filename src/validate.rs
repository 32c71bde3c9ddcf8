//! Per-field format rules and the record validator.
//!
//! Each validated field carries an anchored pattern (allowed characters plus
//! a length bound) and a human-readable rule quoted by error messages. The
//! table is fixed configuration of the generator; the validator compiles it
//! once at construction and holds no mutable state.

use crate::error::{AbaError, Result};
use crate::money::Money;
use crate::record::TransactionCode;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;

/// The format-validated fields of the two input record types.
///
/// `process_date`, `transaction_code`, and the currency amounts are checked
/// by dedicated validators rather than by pattern, so they do not appear
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Field {
    Bsb,
    AccountNumber,
    BankName,
    UserName,
    AccountName,
    UserNumber,
    Description,
    Indicator,
    Reference,
    Remitter,
}

impl Field {
    /// Every rule-table field.
    const ALL: [Field; 10] = [
        Field::Bsb,
        Field::AccountNumber,
        Field::BankName,
        Field::UserName,
        Field::AccountName,
        Field::UserNumber,
        Field::Description,
        Field::Indicator,
        Field::Reference,
        Field::Remitter,
    ];

    /// Wire name, as used in input records and error messages.
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Field::Bsb => "bsb",
            Field::AccountNumber => "account_number",
            Field::BankName => "bank_name",
            Field::UserName => "user_name",
            Field::AccountName => "account_name",
            Field::UserNumber => "user_number",
            Field::Description => "description",
            Field::Indicator => "indicator",
            Field::Reference => "reference",
            Field::Remitter => "remitter",
        }
    }

    /// Column span the field occupies in its record layout.
    pub(crate) const fn width(self) -> usize {
        match self {
            Field::Bsb => 7,
            Field::AccountNumber => 9,
            Field::BankName => 3,
            Field::UserName => 26,
            Field::AccountName => 32,
            Field::UserNumber => 6,
            Field::Description => 12,
            Field::Indicator => 1,
            Field::Reference => 18,
            Field::Remitter => 16,
        }
    }

    /// Anchored pattern: exact character set plus length bound.
    const fn pattern(self) -> &'static str {
        match self {
            Field::Bsb => r"^\d{3}-\d{3}$",
            Field::AccountNumber => r"^\d{0,9}$",
            Field::BankName => r"^[A-Z]{3}$",
            Field::UserName => r"^[A-Za-z\s]{0,26}$",
            Field::AccountName => r"^[A-Za-z0-9^_\[\]',?;:=#/.*()&%!$ @+-]{0,32}$",
            Field::UserNumber => r"^\d{0,6}$",
            Field::Description => r"^[A-Za-z\s]{0,12}$",
            Field::Indicator => r"^[NTWXY ]$",
            Field::Reference => r"^[A-Za-z0-9^_\[\]',?;:=#/.*()&%!$ @+-]{0,18}$",
            Field::Remitter => r"^[A-Za-z\s]{0,16}$",
        }
    }

    /// Human-readable rule, quoted by `InvalidFormat` errors.
    const fn rule(self) -> &'static str {
        match self {
            Field::Bsb => "must be formatted as XXX-XXX, where X is a digit",
            Field::AccountNumber => "must be up to 9 digits",
            Field::BankName => "must be 3 capital letters",
            Field::UserName => "must be letters and spaces only, up to 26 characters",
            Field::AccountName => "must be BECS characters, up to 32 characters",
            Field::UserNumber => "must be up to 6 digits",
            Field::Description => "must be letters and spaces only, up to 12 characters",
            Field::Indicator => "must be one of N, T, W, X, Y or a blank space",
            Field::Reference => "must be BECS characters, up to 18 characters",
            Field::Remitter => "must be letters and spaces only, up to 16 characters",
        }
    }
}

/// Validates record fields against the fixed rule table.
#[derive(Debug)]
pub(crate) struct FieldValidator {
    rules: HashMap<Field, Regex>,
}

impl FieldValidator {
    /// Compiles the rule table.
    pub(crate) fn new() -> Self {
        let rules = Field::ALL
            .iter()
            .map(|&field| {
                // The patterns are fixed literals, so a compile failure is a
                // bug rather than bad input.
                let regex = Regex::new(field.pattern()).expect("field pattern compiles");
                (field, regex)
            })
            .collect();
        FieldValidator { rules }
    }

    /// Checks that every listed field is present, collecting all absent
    /// names into a single error.
    pub(crate) fn require_fields(
        &self,
        record_type: &'static str,
        fields: &[(Field, Option<&str>)],
    ) -> Result<()> {
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| field.name())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AbaError::MissingFields {
                record_type,
                fields: missing,
            })
        }
    }

    /// Checks each value against its field rule, in the given order,
    /// stopping at the first mismatch.
    pub(crate) fn match_format(&self, fields: &[(Field, &str)]) -> Result<()> {
        for &(field, value) in fields {
            // Every Field::ALL member is in the map by construction.
            if !self.rules[&field].is_match(value) {
                return Err(AbaError::InvalidFormat {
                    field: field.name(),
                    rule: field.rule(),
                });
            }
        }
        Ok(())
    }

    /// Resolves a code against the transaction-code whitelist.
    pub(crate) fn validate_transaction_code(&self, code: Option<&str>) -> Result<TransactionCode> {
        let code = code.unwrap_or_default();
        TransactionCode::from_code(code)
            .ok_or_else(|| AbaError::InvalidTransactionCode(code.to_string()))
    }

    /// Checks the `DDMMYY` shape and that the date exists on the calendar.
    pub(crate) fn validate_process_date(&self, value: Option<&str>) -> Result<()> {
        let value = value.unwrap_or_default();
        let well_formed = value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit());
        if !well_formed || NaiveDate::parse_from_str(value, "%d%m%y").is_err() {
            return Err(AbaError::InvalidDate(value.to_string()));
        }
        Ok(())
    }

    /// Parses a currency amount, rejecting anything non-numeric or negative.
    pub(crate) fn validate_numeric(
        &self,
        field: &'static str,
        value: Option<&str>,
    ) -> Result<Money> {
        let value = value.unwrap_or_default();
        Money::parse(value).ok_or_else(|| AbaError::NotNumeric {
            field,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> FieldValidator {
        FieldValidator::new()
    }

    fn assert_matches(field: Field, value: &str) {
        assert!(
            validator().match_format(&[(field, value)]).is_ok(),
            "{} should accept {value:?}",
            field.name()
        );
    }

    fn assert_rejects(field: Field, value: &str) {
        let err = validator()
            .match_format(&[(field, value)])
            .expect_err("format should be rejected");
        match err {
            AbaError::InvalidFormat { field: name, .. } => assert_eq!(name, field.name()),
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_bsb_requires_dashed_form() {
        assert_matches(Field::Bsb, "062-111");
        assert_rejects(Field::Bsb, "062111");
        assert_rejects(Field::Bsb, "06-2111");
        assert_rejects(Field::Bsb, "062-11a");
    }

    #[test]
    fn test_account_number_is_bounded_digits() {
        assert_matches(Field::AccountNumber, "999999999");
        assert_matches(Field::AccountNumber, "1");
        assert_rejects(Field::AccountNumber, "12345678901");
        assert_rejects(Field::AccountNumber, "12a4");
    }

    #[test]
    fn test_bank_name_is_three_capitals() {
        assert_matches(Field::BankName, "CBA");
        assert_rejects(Field::BankName, "cba");
        assert_rejects(Field::BankName, "CBAA");
        assert_rejects(Field::BankName, "CB");
    }

    #[test]
    fn test_name_fields_allow_letters_and_spaces() {
        assert_matches(Field::UserName, "FOO BAR CORPORATION");
        assert_rejects(Field::UserName, "FOO BAR CORPORATION PTY LTD");
        assert_rejects(Field::UserName, "ACME4");

        assert_matches(Field::Remitter, "FOO BAR");
        assert_rejects(Field::Remitter, "FOO+BAR");

        assert_matches(Field::Description, "PAYROLL");
        assert_rejects(Field::Description, "PAYROLL 2016!");
    }

    #[test]
    fn test_indicator_is_single_whitelisted_character() {
        for ok in ["N", "T", "W", "X", "Y", " "] {
            assert_matches(Field::Indicator, ok);
        }
        assert_rejects(Field::Indicator, "Z");
        assert_rejects(Field::Indicator, "NT");
        assert_rejects(Field::Indicator, "");
    }

    #[test]
    fn test_becs_fields_accept_punctuation() {
        assert_matches(Field::AccountName, "O'Brien & Sons (No. 2) [settled]");
        assert_matches(Field::Reference, "INV #42/2016");
        assert_rejects(Field::AccountName, "caf\u{e9}");
        assert_rejects(Field::Reference, "pipe|char");
    }

    #[test]
    fn test_require_fields_collects_every_missing_name() {
        let err = validator()
            .require_fields(
                "descriptive",
                &[
                    (Field::Bsb, Some("062-111")),
                    (Field::AccountNumber, None),
                    (Field::BankName, None),
                    (Field::UserName, Some("FOO")),
                ],
            )
            .expect_err("missing fields should be rejected");

        match err {
            AbaError::MissingFields {
                record_type,
                fields,
            } => {
                assert_eq!(record_type, "descriptive");
                assert_eq!(fields, vec!["account_number", "bank_name"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn test_match_format_reports_first_mismatch() {
        let err = validator()
            .match_format(&[
                (Field::Bsb, "062-111"),
                (Field::BankName, "commonwealth"),
                (Field::UserNumber, "not a number"),
            ])
            .expect_err("format should be rejected");

        match err {
            AbaError::InvalidFormat { field, .. } => assert_eq!(field, "bank_name"),
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_transaction_code_whitelist() {
        let v = validator();
        assert_eq!(
            v.validate_transaction_code(Some("13")).unwrap(),
            TransactionCode::ExternallyInitiatedDebit
        );
        assert_eq!(
            v.validate_transaction_code(Some("53")).unwrap(),
            TransactionCode::Pay
        );
        assert!(matches!(
            v.validate_transaction_code(Some("99")),
            Err(AbaError::InvalidTransactionCode(code)) if code == "99"
        ));
        assert!(matches!(
            v.validate_transaction_code(None),
            Err(AbaError::InvalidTransactionCode(code)) if code.is_empty()
        ));
    }

    #[test]
    fn test_process_date_must_exist_on_calendar() {
        let v = validator();
        assert!(v.validate_process_date(Some("290616")).is_ok());
        assert!(v.validate_process_date(Some("290216")).is_ok());

        for bad in ["290215", "310416", "320116", "291316", "29062016", "2906", "2906b6"] {
            assert!(
                matches!(
                    v.validate_process_date(Some(bad)),
                    Err(AbaError::InvalidDate(_))
                ),
                "{bad:?} should be rejected"
            );
        }
        assert!(matches!(
            v.validate_process_date(None),
            Err(AbaError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_numeric_amounts() {
        let v = validator();
        assert_eq!(v.validate_numeric("amount", Some("250.87")).unwrap().cents(), 25087);
        assert_eq!(v.validate_numeric("amount", Some("0")).unwrap().cents(), 0);

        assert!(matches!(
            v.validate_numeric("amount", Some("two dollars")),
            Err(AbaError::NotNumeric { field: "amount", .. })
        ));
        assert!(matches!(
            v.validate_numeric("amount", Some("-5")),
            Err(AbaError::NotNumeric { .. })
        ));
        assert!(matches!(
            v.validate_numeric("withholding_tax", None),
            Err(AbaError::NotNumeric { field: "withholding_tax", .. })
        ));
    }
}
