//! Handler for the `export` command.

use crate::commands::{resolve_person, Out};
use crate::export::{all_purchases, person_purchases, Sheet, SheetSink};
use crate::{Result, Store};
use std::path::Path;

/// Builds the export rows and hands them to the sink. With a person
/// selector, only that person's purchases are exported; otherwise everyone
/// goes into one sheet.
pub fn export(
    store: &Store,
    person_selector: Option<&str>,
    out_dir: &Path,
    sink: &mut dyn SheetSink,
) -> Result<Out<Sheet>> {
    let tracker = store.load()?;
    let sheet = match person_selector {
        Some(selector) => person_purchases(resolve_person(&tracker, selector)?),
        None => all_purchases(&tracker),
    };
    let path = out_dir.join(sheet.filename());
    sink.write(&sheet, &path)?;
    Ok(Out::new(format!("Wrote {}", path.display()), sheet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Column;
    use crate::test::{CaptureSink, TestEnv};
    use std::path::PathBuf;

    #[test]
    fn test_export_all() {
        let env = TestEnv::new();
        let mut sink = CaptureSink::default();

        let out = export(env.store(), None, &PathBuf::from("downloads"), &mut sink).unwrap();

        assert_eq!(sink.written().len(), 1);
        let (sheet, path) = &sink.written()[0];
        assert_eq!(path, &PathBuf::from("downloads/purchase-tracker-all.xlsx"));
        assert_eq!(sheet.name(), "All Purchases");
        // Seed person Sarah: header, two products, subtotal, blank, grand total.
        assert_eq!(sheet.rows().len(), 6);
        assert_eq!(sheet.rows()[5].get(Column::WithTax), "81.40");
        assert!(out.message().contains("purchase-tracker-all.xlsx"));
    }

    #[test]
    fn test_export_one() {
        let env = TestEnv::new();
        let mut sink = CaptureSink::default();

        export(env.store(), Some("sarah"), &PathBuf::from("."), &mut sink).unwrap();

        let (sheet, path) = &sink.written()[0];
        assert_eq!(sheet.name(), "Sarah");
        assert_eq!(path, &PathBuf::from("./purchase-tracker-sarah.xlsx"));
    }

    #[test]
    fn test_export_unknown_person_fails() {
        let env = TestEnv::new();
        let mut sink = CaptureSink::default();
        assert!(export(env.store(), Some("Zed"), &PathBuf::from("."), &mut sink).is_err());
        assert!(sink.written().is_empty());
    }
}
