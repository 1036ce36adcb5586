//! Command handlers for the purchases CLI.
//!
//! This module contains implementations for all CLI subcommands. Each
//! handler loads the current snapshot from the [`Store`](crate::Store),
//! applies mutations, saves the result, and reports through [`Out`].
//! Selectors (a name or an id) are resolved against the loaded snapshot
//! here, so the model layer is only ever called with ids that exist.

mod add;
mod delete;
mod export;
mod show;
mod update;

pub use add::{add_link, add_person, add_product};
pub use delete::{delete_link, delete_person, delete_product};
pub use export::export;
pub use show::show;
pub use update::{rename_person, toggle_expanded, update_link, update_product};

use crate::model::{Person, PersonId, Product, ProductId, Tracker};
use crate::Result;
use anyhow::bail;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

/// The output type for a command. This allows the command to return a
/// consistent message and, optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Finds a person in the snapshot by id, or by case-insensitive name.
pub(crate) fn resolve_person<'a>(tracker: &'a Tracker, selector: &str) -> Result<&'a Person> {
    if let Ok(id) = selector.parse::<PersonId>() {
        if let Some(person) = tracker.person(id) {
            return Ok(person);
        }
    }
    let lowered = selector.to_lowercase();
    match tracker
        .people()
        .iter()
        .find(|p| p.name().to_lowercase() == lowered)
    {
        Some(person) => Ok(person),
        None => bail!("No person matches '{selector}'"),
    }
}

/// Finds a product in a person's list by id, or by case-insensitive name.
pub(crate) fn resolve_product<'a>(person: &'a Person, selector: &str) -> Result<&'a Product> {
    if let Ok(id) = selector.parse::<ProductId>() {
        if let Some(product) = person.product(id) {
            return Ok(product);
        }
    }
    let lowered = selector.to_lowercase();
    match person
        .products()
        .iter()
        .find(|p| p.name().to_lowercase() == lowered)
    {
        Some(product) => Ok(product),
        None => bail!("{} has no product matching '{selector}'", person.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> Tracker {
        let tracker = Tracker::default().add_person("Alice");
        let alice = tracker.people()[0].id();
        tracker.add_product(alice, "Desk Lamp")
    }

    #[test]
    fn test_resolve_person_by_name_ignores_case() {
        let tracker = tracker();
        let person = resolve_person(&tracker, "alice").unwrap();
        assert_eq!(person.name(), "Alice");
    }

    #[test]
    fn test_resolve_person_by_id() {
        let tracker = tracker();
        let id = tracker.people()[0].id().to_string();
        let person = resolve_person(&tracker, &id).unwrap();
        assert_eq!(person.name(), "Alice");
    }

    #[test]
    fn test_resolve_person_unknown() {
        let tracker = tracker();
        assert!(resolve_person(&tracker, "Zed").is_err());
    }

    #[test]
    fn test_resolve_product_by_name_and_id() {
        let tracker = tracker();
        let person = &tracker.people()[0];
        let by_name = resolve_product(person, "desk lamp").unwrap();
        let by_id = resolve_product(person, &by_name.id().to_string()).unwrap();
        assert_eq!(by_name, by_id);
    }

    #[test]
    fn test_resolve_product_unknown() {
        let tracker = tracker();
        assert!(resolve_product(&tracker.people()[0], "Chair").is_err());
    }

    #[test]
    fn test_out_message_only() {
        let out: Out<()> = Out::new_message("hello");
        assert_eq!(out.message(), "hello");
        assert!(out.structure().is_none());
    }
}
