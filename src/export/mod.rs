//! Flattens the data model into ordered spreadsheet rows.
//!
//! Both entry points are pure: they read a snapshot (or one person) and
//! produce a [`Sheet`] — an ordered sequence of rows plus the column list,
//! sheet name and target filename. Writing the file is the [`SheetSink`]'s
//! job.

mod sink;

pub use sink::{SheetSink, XlsxSink};

use crate::model::{format_money, Person, Product, Tracker};
use serde::Serialize;

/// Sheet name and filename used by the export-all entry point.
pub(crate) const ALL_SHEET_NAME: &str = "All Purchases";
pub(crate) const ALL_FILENAME: &str = "purchase-tracker-all.xlsx";

/// Represents the columns of the exported sheets.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Product,
    Price,
    WithTax,
    Links,
}

impl Column {
    /// The literal header label written to the sheet.
    pub fn header(self) -> &'static str {
        match self {
            Column::Name => NAME_STR,
            Column::Product => PRODUCT_STR,
            Column::Price => PRICE_STR,
            Column::WithTax => WITH_TAX_STR,
            Column::Links => LINKS_STR,
        }
    }

    /// Column width hint, in characters.
    pub fn width(self) -> f64 {
        match self {
            Column::Name => 15.0,
            Column::Product => 25.0,
            Column::Price => 10.0,
            Column::WithTax => 15.0,
            Column::Links => 40.0,
        }
    }
}

const NAME_STR: &str = "Name";
const PRODUCT_STR: &str = "Product";
const PRICE_STR: &str = "Price";
const WITH_TAX_STR: &str = "With Tax (10%)";
const LINKS_STR: &str = "Links";

/// Column order for the export-all sheet.
const ALL_COLUMNS: &[Column] = &[
    Column::Name,
    Column::Product,
    Column::Price,
    Column::WithTax,
    Column::Links,
];

/// Column order for a single person's sheet. There is no Name column; every
/// row belongs to the same person.
const PERSON_COLUMNS: &[Column] = &[
    Column::Product,
    Column::Price,
    Column::WithTax,
    Column::Links,
];

/// One exported row: a mapping of column to display string. Cells not set
/// by the builder stay empty.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Row {
    name: String,
    product: String,
    price: String,
    with_tax: String,
    links: String,
}

impl Row {
    /// The cell value for `column`.
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Name => &self.name,
            Column::Product => &self.product,
            Column::Price => &self.price,
            Column::WithTax => &self.with_tax,
            Column::Links => &self.links,
        }
    }

    fn blank() -> Self {
        Self::default()
    }

    fn product_cells(product: &Product) -> Self {
        Self {
            product: product.name().to_string(),
            price: product.price().to_string(),
            with_tax: format_money(product.price().with_tax()),
            links: product.links().join(" | "),
            ..Self::default()
        }
    }
}

/// A fully prepared sheet, ready to hand to a [`SheetSink`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Sheet {
    name: String,
    filename: String,
    columns: &'static [Column],
    /// Whether the sink should write the column headers as the first row.
    /// The single-person sheet writes its own labels as a data row instead.
    header: bool,
    rows: Vec<Row>,
}

impl Sheet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn columns(&self) -> &[Column] {
        self.columns
    }

    pub fn header(&self) -> bool {
        self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// Builds the export-all sheet: for each person a name header, their
/// products, a subtotal and a blank separator; then a grand-total row.
pub fn all_purchases(tracker: &Tracker) -> Sheet {
    let mut rows = Vec::new();

    for person in tracker.people() {
        rows.push(Row {
            name: person.name().to_string(),
            ..Row::default()
        });

        for product in person.products() {
            rows.push(Row::product_cells(product));
        }

        rows.push(Row {
            product: "Subtotal".to_string(),
            with_tax: format_money(person.total()),
            ..Row::default()
        });

        rows.push(Row::blank());
    }

    rows.push(Row {
        name: "GRAND TOTAL".to_string(),
        with_tax: format_money(tracker.grand_total()),
        ..Row::default()
    });

    Sheet {
        name: ALL_SHEET_NAME.to_string(),
        filename: ALL_FILENAME.to_string(),
        columns: ALL_COLUMNS,
        header: true,
        rows,
    }
}

/// Builds a single person's sheet: a title, the column labels written as a
/// data row, the products, and a total.
pub fn person_purchases(person: &Person) -> Sheet {
    let mut rows = vec![
        Row {
            product: format!("{}'s Purchases", person.name()),
            ..Row::default()
        },
        Row::blank(),
        Row {
            product: PRODUCT_STR.to_string(),
            price: PRICE_STR.to_string(),
            with_tax: WITH_TAX_STR.to_string(),
            links: LINKS_STR.to_string(),
            ..Row::default()
        },
    ];

    for product in person.products() {
        rows.push(Row::product_cells(product));
    }

    rows.push(Row::blank());
    rows.push(Row {
        product: "TOTAL".to_string(),
        with_tax: format_money(person.total()),
        ..Row::default()
    });

    Sheet {
        name: person.name().to_string(),
        // The name goes in verbatim; characters that are unsafe in
        // filenames are an accepted limitation.
        filename: format!("purchase-tracker-{}.xlsx", person.name().to_lowercase()),
        columns: PERSON_COLUMNS,
        header: false,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Price, ProductEdit};

    /// Alice with one $10 product, Bob with no products.
    fn alice_and_bob() -> Tracker {
        let tracker = Tracker::default().add_person("Alice").add_person("Bob");
        let alice = tracker.people()[0].id();
        let tracker = tracker.add_product(alice, "Desk Lamp");
        let lamp = tracker.people()[0].products()[0].id();
        tracker.update_product(alice, lamp, ProductEdit::Reprice(Price::parse_lenient("10")))
    }

    fn cells(row: &Row, columns: &[Column]) -> Vec<String> {
        columns.iter().map(|c| row.get(*c).to_string()).collect()
    }

    #[test]
    fn test_all_purchases_row_shape() {
        let sheet = all_purchases(&alice_and_bob());

        assert!(sheet.header());
        assert_eq!(sheet.name(), "All Purchases");
        assert_eq!(sheet.filename(), "purchase-tracker-all.xlsx");
        assert_eq!(sheet.rows().len(), 8);

        let rows: Vec<Vec<String>> = sheet
            .rows()
            .iter()
            .map(|r| cells(r, sheet.columns()))
            .collect();
        assert_eq!(rows[0], vec!["Alice", "", "", "", ""]);
        assert_eq!(rows[1], vec!["", "Desk Lamp", "10.00", "11.00", ""]);
        assert_eq!(rows[2], vec!["", "Subtotal", "", "11.00", ""]);
        assert_eq!(rows[3], vec!["", "", "", "", ""]);
        assert_eq!(rows[4], vec!["Bob", "", "", "", ""]);
        assert_eq!(rows[5], vec!["", "Subtotal", "", "0.00", ""]);
        assert_eq!(rows[6], vec!["", "", "", "", ""]);
        assert_eq!(rows[7], vec!["GRAND TOTAL", "", "", "11.00", ""]);
    }

    #[test]
    fn test_all_purchases_column_order() {
        let headers: Vec<&str> = all_purchases(&alice_and_bob())
            .columns()
            .iter()
            .map(|c| c.header())
            .collect();
        assert_eq!(
            headers,
            vec!["Name", "Product", "Price", "With Tax (10%)", "Links"]
        );
    }

    #[test]
    fn test_person_purchases_row_shape() {
        let tracker = alice_and_bob();
        let sheet = person_purchases(&tracker.people()[0]);

        assert!(!sheet.header());
        assert_eq!(sheet.name(), "Alice");
        assert_eq!(sheet.filename(), "purchase-tracker-alice.xlsx");

        let rows: Vec<Vec<String>> = sheet
            .rows()
            .iter()
            .map(|r| cells(r, sheet.columns()))
            .collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], vec!["Alice's Purchases", "", "", ""]);
        assert_eq!(rows[1], vec!["", "", "", ""]);
        assert_eq!(rows[2], vec!["Product", "Price", "With Tax (10%)", "Links"]);
        assert_eq!(rows[3], vec!["Desk Lamp", "10.00", "11.00", ""]);
        assert_eq!(rows[4], vec!["", "", "", ""]);
        assert_eq!(rows[5], vec!["TOTAL", "", "11.00", ""]);
    }

    #[test]
    fn test_person_purchases_empty_person() {
        let tracker = alice_and_bob();
        let sheet = person_purchases(&tracker.people()[1]);
        // Title, blank, labels, blank, total.
        assert_eq!(sheet.rows().len(), 5);
        assert_eq!(sheet.rows()[4].get(Column::WithTax), "0.00");
    }

    #[test]
    fn test_links_joined_with_pipes() {
        let tracker = alice_and_bob();
        let alice = tracker.people()[0].id();
        let lamp = tracker.people()[0].products()[0].id();
        let tracker = tracker
            .add_link(alice, lamp, "https://a.example")
            .add_link(alice, lamp, "https://b.example");

        let sheet = all_purchases(&tracker);
        assert_eq!(
            sheet.rows()[1].get(Column::Links),
            "https://a.example | https://b.example"
        );
    }

    #[test]
    fn test_filename_lower_cases_the_name_verbatim() {
        let tracker = Tracker::default().add_person("Mary Anne");
        let sheet = person_purchases(&tracker.people()[0]);
        assert_eq!(sheet.filename(), "purchase-tracker-mary anne.xlsx");
    }

    #[test]
    fn test_export_is_pure() {
        let tracker = alice_and_bob();
        let before = tracker.clone();
        let _ = all_purchases(&tracker);
        let _ = person_purchases(&tracker.people()[0]);
        assert_eq!(tracker, before);
    }
}
