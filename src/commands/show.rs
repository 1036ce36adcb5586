//! Handler for the `show` command.

use crate::args::ShowFormat;
use crate::commands::Out;
use crate::model::{format_money, Tracker};
use crate::{Result, Store};
use anyhow::Context;
use std::fmt::Write;

/// Prints the tracked people with their products, links and totals to
/// stdout. Collapsed people render as a single header line.
pub fn show(store: &Store, format: ShowFormat) -> Result<Out<Tracker>> {
    let tracker = store.load()?;
    match format {
        ShowFormat::Text => println!("{}", render(&tracker)),
        ShowFormat::Json => {
            let json = serde_json::to_string_pretty(&tracker)
                .context("Unable to serialize the snapshot")?;
            println!("{json}");
        }
    }
    let message = format!(
        "{} people, total ${}",
        tracker.people().len(),
        format_money(tracker.grand_total())
    );
    Ok(Out::new(message, tracker))
}

fn render(tracker: &Tracker) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total Spending: ${}",
        format_money(tracker.grand_total())
    );
    for person in tracker.people() {
        let marker = if person.expanded() { "-" } else { "+" };
        let _ = writeln!(
            out,
            "{marker} {} ({} items) ${}  [{}]",
            person.name(),
            person.products().len(),
            format_money(person.total()),
            person.id()
        );
        if !person.expanded() {
            continue;
        }
        for product in person.products() {
            let _ = writeln!(
                out,
                "    {}  ${} (${} with tax)  [{}]",
                product.name(),
                product.price(),
                format_money(product.price().with_tax()),
                product.id()
            );
            for (ix, link) in product.links().iter().enumerate() {
                let _ = writeln!(out, "        [{ix}] {link}");
            }
        }
    }
    out
}
