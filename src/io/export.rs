//! CSV export for invoice line items.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::billing::types::Invoice;

/// Column header for CSV invoice export.
const HEADER: &str = "item,quantity,amount";

/// Exports an invoice breakdown to a CSV file at the given path.
///
/// Writes a header row followed by one row per line item. Quantity is
/// empty for rows without one (fixed fee and the totals).
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(invoice: &Invoice, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(invoice, buf)
}

/// Writes an invoice breakdown as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(invoice: &Invoice, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for row in invoice.line_items() {
        wtr.write_record(&[
            row.item.to_string(),
            row.quantity.map(|q| format!("{q:.2}")).unwrap_or_default(),
            format!("{:.2}", row.amount),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
