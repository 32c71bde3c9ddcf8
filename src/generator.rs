//! Core ABA file generator.
//!
//! Drives the fixed record sequence of a direct-entry file: one descriptive
//! record, then any number of detail records, then a computed file total.
//! The generator validates each input before anything is accumulated, so a
//! rejected record leaves the document exactly as it was.

use crate::error::{AbaError, Result};
use crate::format::TruncationPolicy;
use crate::money::Money;
use crate::record::{DescriptiveRecord, DetailRecord, Header};
use crate::totals::FileTotals;
use crate::validate::FieldValidator;
use csv::{ReaderBuilder, Trim};
use log::debug;
use std::io::{Read, Write};

/// Builds one ABA direct-entry file.
///
/// A generator models a single in-progress file. Set the descriptive record
/// first, add transactions one by one or from CSV, then take the assembled
/// document with [`generate`](Self::generate). Each file gets its own
/// generator; for concurrent generation, give every thread its own instance.
///
/// # Record Ordering
///
/// The descriptive record must exist before any detail or total record is
/// built. The generator enforces this itself, returning
/// [`AbaError::MissingDescriptiveRecord`] rather than relying on caller
/// discipline, and the descriptive record cannot be replaced once set.
pub struct AbaFileGenerator {
    /// Compiled field rules, shared by every record this file validates.
    validator: FieldValidator,

    /// How oversized field values are handled.
    policy: TruncationPolicy,

    /// The validated descriptive record, source of the trace fields.
    header: Option<Header>,

    /// The formatted type `0` line, kept verbatim for final assembly.
    header_line: String,

    /// Every accepted type `1` line, in insertion order.
    detail_lines: String,

    /// Running credit/debit totals and record count.
    totals: FileTotals,
}

impl AbaFileGenerator {
    /// Creates a generator with the default truncation policy.
    pub fn new() -> Self {
        Self::with_policy(TruncationPolicy::default())
    }

    /// Creates a generator with an explicit policy for oversized values.
    pub fn with_policy(policy: TruncationPolicy) -> Self {
        AbaFileGenerator {
            validator: FieldValidator::new(),
            policy,
            header: None,
            header_line: String::new(),
            detail_lines: String::new(),
            totals: FileTotals::default(),
        }
    }

    /// Validates and caches the descriptive record, returning its formatted
    /// line.
    ///
    /// Must be called before any transaction is added. The record is set
    /// once per file; a second call fails with
    /// [`AbaError::DescriptiveRecordAlreadySet`].
    pub fn set_descriptive_record(&mut self, record: &DescriptiveRecord) -> Result<String> {
        if self.header.is_some() {
            return Err(AbaError::DescriptiveRecordAlreadySet);
        }

        let header = record.validate(&self.validator, self.policy)?;
        let line = header.record_line();

        debug!("descriptive record set, trace bsb {}", header.bsb());
        self.header = Some(header);
        self.header_line = line.clone();
        Ok(line)
    }

    /// Validates one transaction, folds it into the running totals, and
    /// appends its formatted line to the document.
    ///
    /// Validation happens in full before any state changes, so a failed add
    /// leaves the totals and the detail block untouched. Each accepted
    /// transaction is counted exactly once, at this point.
    pub fn add_transaction(&mut self, record: &DetailRecord) -> Result<String> {
        let header = self
            .header
            .as_ref()
            .ok_or(AbaError::MissingDescriptiveRecord)?;

        let entry = record.validate(&self.validator, self.policy)?;

        self.totals.accumulate(entry.code, entry.amount);
        debug!(
            "accepted {} transaction of {} (credits {}, debits {}, {} records)",
            entry.code,
            entry.amount,
            self.totals.credit_total,
            self.totals.debit_total,
            self.totals.transaction_count
        );

        let line = entry.record_line(header);
        self.detail_lines.push_str(&line);
        Ok(line)
    }

    /// Adds transactions from CSV, one row per detail record.
    ///
    /// Column headers are the [`DetailRecord`] field names; empty cells
    /// count as absent, so `indicator` and `withholding_tax` may simply be
    /// left blank. Stops at the first invalid row and returns its error;
    /// rows accepted before it stay in the document. Returns the number of
    /// transactions added.
    pub fn add_transactions_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut added = 0;
        for result in csv_reader.deserialize::<DetailRecord>() {
            let record = result?;
            self.add_transaction(&record)?;
            added += 1;
        }

        debug!("added {added} transactions from csv");
        Ok(added)
    }

    /// Builds the type `7` file total line from the totals accumulated so
    /// far.
    ///
    /// Reading the totals does not change them, so calling this between
    /// transactions is allowed and always reflects exactly the records
    /// accepted so far.
    pub fn build_total_record(&self) -> Result<String> {
        if self.header.is_none() {
            return Err(AbaError::MissingDescriptiveRecord);
        }
        Ok(self.totals.record_line())
    }

    /// Assembles the complete document: the descriptive record, every
    /// detail record in insertion order, and the file total.
    ///
    /// A file with zero transactions is well-formed; its total line carries
    /// zero amounts and a zero record count.
    pub fn generate(&self) -> Result<String> {
        let total_line = self.build_total_record()?;

        let mut content = String::with_capacity(
            self.header_line.len() + self.detail_lines.len() + total_line.len(),
        );
        content.push_str(&self.header_line);
        content.push_str(&self.detail_lines);
        content.push_str(&total_line);
        Ok(content)
    }

    /// Generates the document and writes its exact bytes to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let content = self.generate()?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// The running totals of the file so far.
    pub fn totals(&self) -> &FileTotals {
        &self.totals
    }

    /// Running total of credit-classified amounts.
    pub fn credit_total(&self) -> Money {
        self.totals.credit_total
    }

    /// Running total of debit-classified amounts.
    pub fn debit_total(&self) -> Money {
        self.totals.debit_total
    }

    /// Number of transactions accepted so far.
    pub fn transaction_count(&self) -> u32 {
        self.totals.transaction_count
    }
}

impl Default for AbaFileGenerator {
    fn default() -> Self {
        Self::new()
    }
}
