use std::fmt;

use crate::data::model::{Dataset, ReadReport};

/// Width of the rule under the report title.
const RULE_WIDTH: usize = 79;

// ---------------------------------------------------------------------------
// Error report
// ---------------------------------------------------------------------------

/// Summary of the errors logged while reading a file.
///
/// ```text
/// Summary of reading file 'data.csv':
/// ===============================================================================
///
/// Errors encountered: 1.
/// Last encountered error: Row width too small (1 of 2 fields).
/// Row 3: Row width too small (1 of 2 fields).
/// ```
pub struct ErrorReport<'a>(pub &'a ReadReport);

impl fmt::Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "Summary of reading file '{}':", report.source)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f)?;

        let log = &report.log;
        match log.last() {
            None => writeln!(f, "No errors encountered."),
            Some(last) => {
                writeln!(f, "Errors encountered: {}.", log.count())?;
                writeln!(f, "Last encountered error: {last}.")?;
                for entry in log.entries() {
                    writeln!(f, "{entry}")?;
                }
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Data table
// ---------------------------------------------------------------------------

/// Tab-separated dump of a dataset, one line per row.
pub struct DataTable<'a>(pub &'a Dataset);

impl fmt::Display for DataTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ds = self.0;
        write!(f, "Row")?;
        for name in ds.column_names() {
            write!(f, "\t{name}")?;
        }
        writeln!(f)?;

        for (i, row) in ds.rows().enumerate() {
            write!(f, "{}", i + 1)?;
            for cell in row {
                match cell {
                    Some(v) => write!(f, "\t{v}")?,
                    None => write!(f, "\t-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
