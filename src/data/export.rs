use anyhow::{bail, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::data::record::StudentRecord;

/// Fixed export schema; the header line is emitted verbatim.
pub const CSV_HEADER: &str = "ID,Name,Age,Course,Email,Phone,City,Area,ZIP,Status";

/// Default export filename.
pub const CSV_FILENAME: &str = "students.csv";

/// Serialize the full record list to CSV text. Textual fields are always
/// quoted with embedded quotes doubled; `id` and `age` stay bare. An empty
/// list is an error so no file gets produced for it.
pub fn to_csv(records: &[StudentRecord]) -> Result<String> {
    if records.is_empty() {
        bail!("No data to export");
    }

    let mut out = String::with_capacity(records.len() * 96);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for s in records {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            s.id,
            quote(&s.name),
            s.age,
            quote(&s.course),
            quote(&s.email),
            quote(&s.phone),
            quote(&s.address.city),
            quote(&s.address.area),
            quote(&s.address.zip),
            quote(&s.status),
        ));
    }

    Ok(out)
}

/// Write the CSV export to `path`, returning a user-facing summary line.
pub fn export_to_file(records: &[StudentRecord], path: &Path) -> Result<String> {
    let csv = to_csv(records)?;
    fs::write(path, csv)?;
    info!(target: "export", "Exported {} records to {}", records.len(), path.display());
    Ok(format!(
        "Exported {} rows to {}",
        records.len(),
        path.display()
    ))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
