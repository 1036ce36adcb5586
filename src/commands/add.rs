//! Handlers for the `add` subcommands.

use crate::commands::{resolve_person, resolve_product, Out};
use crate::model::{Person, Product};
use crate::{Result, Store};
use anyhow::Context;

/// Adds a person. A blank name is a no-op, not an error.
pub fn add_person(store: &Store, name: &str) -> Result<Out<Person>> {
    let tracker = store.load()?;
    let next = tracker.add_person(name);
    if next == tracker {
        return Ok(Out::new_message("Nothing added; the name was blank"));
    }
    store.save(&next)?;
    let person = next
        .people()
        .last()
        .cloned()
        .context("The new person was not appended")?;
    Ok(Out::new(
        format!("Added {} ({})", person.name(), person.id()),
        person,
    ))
}

/// Adds a product with a zero price to a person's list. A blank product
/// name is a no-op.
pub fn add_product(store: &Store, person_selector: &str, name: &str) -> Result<Out<Product>> {
    let tracker = store.load()?;
    let person = resolve_person(&tracker, person_selector)?;
    let person_id = person.id();
    let person_name = person.name().to_string();

    let next = tracker.add_product(person_id, name);
    if next == tracker {
        return Ok(Out::new_message(
            "Nothing added; the product name was blank",
        ));
    }
    store.save(&next)?;
    let product = next
        .person(person_id)
        .and_then(|p| p.products().last())
        .cloned()
        .context("The new product was not appended")?;
    Ok(Out::new(
        format!(
            "Added {} ({}) to {person_name}",
            product.name(),
            product.id()
        ),
        product,
    ))
}

/// Appends a link to a product. A blank url is a no-op. Duplicate links are
/// allowed.
pub fn add_link(
    store: &Store,
    person_selector: &str,
    product_selector: &str,
    url: &str,
) -> Result<Out<Product>> {
    let tracker = store.load()?;
    let person = resolve_person(&tracker, person_selector)?;
    let person_id = person.id();
    let product_id = resolve_product(person, product_selector)?.id();

    let next = tracker.add_link(person_id, product_id, url);
    if next == tracker {
        return Ok(Out::new_message("Nothing added; the link was blank"));
    }
    store.save(&next)?;
    let product = next
        .person(person_id)
        .and_then(|p| p.product(product_id))
        .cloned()
        .context("The product disappeared while adding a link")?;
    Ok(Out::new(
        format!("Added a link to {} ({} total)", product.name(), product.links().len()),
        product,
    ))
}
