//! Handlers for the `update` and `toggle` subcommands.

use crate::commands::{resolve_person, resolve_product, Out};
use crate::model::{Person, Price, Product, ProductEdit};
use crate::{Result, Store};
use anyhow::{bail, Context};

/// Renames a person. The new name is trimmed before it is committed; if
/// nothing is left after trimming, the person keeps their current name.
pub fn rename_person(store: &Store, person_selector: &str, new_name: &str) -> Result<Out<Person>> {
    let tracker = store.load()?;
    let person = resolve_person(&tracker, person_selector)?;
    let person_id = person.id();

    let trimmed = new_name.trim();
    if trimmed.is_empty() {
        return Ok(Out::new_message(format!(
            "The name was blank; {} keeps their name",
            person.name()
        )));
    }

    let next = tracker.rename_person(person_id, trimmed);
    store.save(&next)?;
    let person = next
        .person(person_id)
        .cloned()
        .context("The renamed person disappeared")?;
    Ok(Out::new(format!("Renamed to {}", person.name()), person))
}

/// Changes a product's name and/or price. The price string is parsed
/// leniently: anything that is not a non-negative number becomes zero.
pub fn update_product(
    store: &Store,
    person_selector: &str,
    product_selector: &str,
    name: Option<&str>,
    price: Option<&str>,
) -> Result<Out<Product>> {
    if name.is_none() && price.is_none() {
        bail!("Nothing to update; provide --name and/or --price");
    }
    let tracker = store.load()?;
    let person = resolve_person(&tracker, person_selector)?;
    let person_id = person.id();
    let product_id = resolve_product(person, product_selector)?.id();

    let mut next = tracker;
    if let Some(name) = name {
        next = next.update_product(person_id, product_id, ProductEdit::Rename(name.to_string()));
    }
    if let Some(raw) = price {
        next = next.update_product(
            person_id,
            product_id,
            ProductEdit::Reprice(Price::parse_lenient(raw)),
        );
    }
    store.save(&next)?;

    let product = next
        .person(person_id)
        .and_then(|p| p.product(product_id))
        .cloned()
        .context("The updated product disappeared")?;
    Ok(Out::new(
        format!("Updated {}: price {}", product.name(), product.price()),
        product,
    ))
}

/// Replaces the link at the given position, verbatim.
pub fn update_link(
    store: &Store,
    person_selector: &str,
    product_selector: &str,
    index: usize,
    url: &str,
) -> Result<Out<Product>> {
    let tracker = store.load()?;
    let person = resolve_person(&tracker, person_selector)?;
    let person_id = person.id();
    let product = resolve_product(person, product_selector)?;
    let product_id = product.id();
    let count = product.links().len();
    if index >= count {
        bail!(
            "{} has {count} link(s); index {index} is out of range",
            product.name()
        );
    }

    let next = tracker.update_link(person_id, product_id, index, url);
    store.save(&next)?;
    let product = next
        .person(person_id)
        .and_then(|p| p.product(product_id))
        .cloned()
        .context("The updated product disappeared")?;
    Ok(Out::new(format!("Replaced link {index}"), product))
}

/// Flips whether a person's product list is unfolded in `show` output.
pub fn toggle_expanded(store: &Store, person_selector: &str) -> Result<Out<Person>> {
    let tracker = store.load()?;
    let person_id = resolve_person(&tracker, person_selector)?.id();

    let next = tracker.toggle_expanded(person_id);
    store.save(&next)?;
    let person = next
        .person(person_id)
        .cloned()
        .context("The toggled person disappeared")?;
    let state = if person.expanded() {
        "Expanded"
    } else {
        "Collapsed"
    };
    Ok(Out::new(format!("{state} {}", person.name()), person))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add_link;
    use crate::test::TestEnv;

    #[test]
    fn test_rename_person_trims() {
        let env = TestEnv::new();
        rename_person(env.store(), "Sarah", "  Sara  ").unwrap();
        let tracker = env.store().load().unwrap();
        assert_eq!(tracker.people()[0].name(), "Sara");
    }

    #[test]
    fn test_rename_person_blank_keeps_prior_name() {
        let env = TestEnv::new();
        let out = rename_person(env.store(), "Sarah", "   ").unwrap();
        assert!(out.structure().is_none());
        let tracker = env.store().load().unwrap();
        assert_eq!(tracker.people()[0].name(), "Sarah");
    }

    #[test]
    fn test_update_product_name_is_verbatim() {
        let env = TestEnv::new();
        update_product(env.store(), "Sarah", "USB Hub", Some("  Hub  "), None).unwrap();
        let tracker = env.store().load().unwrap();
        let names: Vec<&str> = tracker.people()[0]
            .products()
            .iter()
            .map(|p| p.name())
            .collect();
        assert!(names.contains(&"  Hub  "));
    }

    #[test]
    fn test_update_product_price_garbage_becomes_zero() {
        let env = TestEnv::new();
        update_product(env.store(), "Sarah", "USB Hub", None, Some("abc")).unwrap();
        let tracker = env.store().load().unwrap();
        let product = crate::commands::resolve_product(&tracker.people()[0], "USB Hub").unwrap();
        assert!(product.price().is_zero());
    }

    #[test]
    fn test_update_product_requires_a_field() {
        let env = TestEnv::new();
        assert!(update_product(env.store(), "Sarah", "USB Hub", None, None).is_err());
    }

    #[test]
    fn test_update_link_verbatim() {
        let env = TestEnv::new();
        add_link(env.store(), "Sarah", "USB Hub", "https://old.example").unwrap();
        update_link(env.store(), "Sarah", "USB Hub", 0, "https://new.example").unwrap();
        let tracker = env.store().load().unwrap();
        let product = crate::commands::resolve_product(&tracker.people()[0], "USB Hub").unwrap();
        assert_eq!(product.links(), &["https://new.example"]);
    }

    #[test]
    fn test_update_link_out_of_range_fails() {
        let env = TestEnv::new();
        assert!(update_link(env.store(), "Sarah", "USB Hub", 5, "https://x").is_err());
    }

    #[test]
    fn test_toggle() {
        let env = TestEnv::new();
        let out = toggle_expanded(env.store(), "Sarah").unwrap();
        assert!(!out.structure().unwrap().expanded());
        let out = toggle_expanded(env.store(), "Sarah").unwrap();
        assert!(out.structure().unwrap().expanded());
    }
}
