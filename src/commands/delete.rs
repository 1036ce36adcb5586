//! Handlers for the `delete` subcommands.

use crate::commands::{resolve_person, resolve_product, Out};
use crate::{Result, Store};
use anyhow::bail;

/// Deletes a person and everything they own.
pub fn delete_person(store: &Store, person_selector: &str) -> Result<Out<()>> {
    let tracker = store.load()?;
    let person = resolve_person(&tracker, person_selector)?;
    let name = person.name().to_string();
    let person_id = person.id();

    let next = tracker.delete_person(person_id);
    store.save(&next)?;
    Ok(Out::new_message(format!(
        "Deleted {name} and their products"
    )))
}

/// Deletes one product from a person's list.
pub fn delete_product(
    store: &Store,
    person_selector: &str,
    product_selector: &str,
) -> Result<Out<()>> {
    let tracker = store.load()?;
    let person = resolve_person(&tracker, person_selector)?;
    let person_id = person.id();
    let person_name = person.name().to_string();
    let product = resolve_product(person, product_selector)?;
    let product_name = product.name().to_string();
    let product_id = product.id();

    let next = tracker.delete_product(person_id, product_id);
    store.save(&next)?;
    Ok(Out::new_message(format!(
        "Deleted {product_name} from {person_name}"
    )))
}

/// Deletes the link at the given position from a product.
pub fn delete_link(
    store: &Store,
    person_selector: &str,
    product_selector: &str,
    index: usize,
) -> Result<Out<()>> {
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
    let product_name = product.name().to_string();

    let next = tracker.delete_link(person_id, product_id, index);
    store.save(&next)?;
    Ok(Out::new_message(format!(
        "Deleted link {index} from {product_name}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add_link;
    use crate::test::TestEnv;

    #[test]
    fn test_delete_person() {
        let env = TestEnv::new();
        delete_person(env.store(), "Sarah").unwrap();
        let tracker = env.store().load().unwrap();
        assert!(tracker.people().is_empty());
    }

    #[test]
    fn test_delete_person_unknown_fails() {
        let env = TestEnv::new();
        assert!(delete_person(env.store(), "Zed").is_err());
    }

    #[test]
    fn test_delete_product() {
        let env = TestEnv::new();
        delete_product(env.store(), "Sarah", "USB Hub").unwrap();
        let tracker = env.store().load().unwrap();
        let names: Vec<&str> = tracker.people()[0]
            .products()
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, vec!["Laptop Stand"]);
    }

    #[test]
    fn test_delete_link() {
        let env = TestEnv::new();
        add_link(env.store(), "Sarah", "USB Hub", "https://a.example").unwrap();
        add_link(env.store(), "Sarah", "USB Hub", "https://b.example").unwrap();

        delete_link(env.store(), "Sarah", "USB Hub", 0).unwrap();

        let tracker = env.store().load().unwrap();
        let product = crate::commands::resolve_product(&tracker.people()[0], "USB Hub").unwrap();
        assert_eq!(product.links(), &["https://b.example"]);
    }

    #[test]
    fn test_delete_link_out_of_range_fails() {
        let env = TestEnv::new();
        assert!(delete_link(env.store(), "Sarah", "USB Hub", 0).is_err());
    }
}
