//! Types that represent the core data model: the `Tracker` snapshot and the
//! `Person` and `Product` entities it contains.
//!
//! The model is immutable from the outside. Every mutation operation takes
//! the current snapshot by reference and returns a new snapshot; the caller
//! decides what to do with the previous one. Lookup misses are silent
//! no-ops — there is no error channel at this layer, because callers only
//! pass ids they read out of the snapshot they are holding.

mod person;
mod price;
mod product;

pub use person::{Person, PersonId};
pub use price::{format_money, Price, TAX_RATE};
pub use product::{Product, ProductEdit, ProductId};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One immutable snapshot of the whole people/products/links tree.
///
/// Serializes transparently as the array of people, which is the on-disk
/// shape of the snapshot file.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tracker {
    people: Vec<Person>,
}

impl Tracker {
    /// The people in insertion order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Finds a person by id.
    pub fn person(&self, person_id: PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id() == person_id)
    }

    /// The sum of every person's total. Recomputed on every call.
    pub fn grand_total(&self) -> Decimal {
        self.people.iter().map(Person::total).sum()
    }

    /// Appends a new person with the trimmed name. No-op if the name is
    /// empty after trimming.
    pub fn add_person(&self, name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return self.clone();
        }
        let mut next = self.clone();
        next.people.push(Person::new(trimmed));
        next
    }

    /// Removes the person with the matching id.
    pub fn delete_person(&self, person_id: PersonId) -> Self {
        let mut next = self.clone();
        next.people.retain(|p| p.id() != person_id);
        next
    }

    /// Sets the person's name verbatim. The command layer trims and rejects
    /// empty names before calling this.
    pub fn rename_person(&self, person_id: PersonId, new_name: impl Into<String>) -> Self {
        let mut next = self.clone();
        if let Some(person) = next.person_mut(person_id) {
            person.set_name(new_name);
        }
        next
    }

    /// Flips the person's `expanded` flag.
    pub fn toggle_expanded(&self, person_id: PersonId) -> Self {
        let mut next = self.clone();
        if let Some(person) = next.person_mut(person_id) {
            person.toggle_expanded();
        }
        next
    }

    /// Appends a product with the trimmed name to the person's list. No-op
    /// if the name is empty after trimming.
    pub fn add_product(&self, person_id: PersonId, name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return self.clone();
        }
        let mut next = self.clone();
        if let Some(person) = next.person_mut(person_id) {
            person.products_mut().push(Product::new(trimmed));
        }
        next
    }

    /// Removes the product with the matching id from the person's list.
    pub fn delete_product(&self, person_id: PersonId, product_id: ProductId) -> Self {
        let mut next = self.clone();
        if let Some(person) = next.person_mut(person_id) {
            person.products_mut().retain(|p| p.id() != product_id);
        }
        next
    }

    /// Applies a [`ProductEdit`] to the matching product.
    pub fn update_product(
        &self,
        person_id: PersonId,
        product_id: ProductId,
        edit: ProductEdit,
    ) -> Self {
        let mut next = self.clone();
        if let Some(product) = next.product_mut(person_id, product_id) {
            product.apply(edit);
        }
        next
    }

    /// Appends the trimmed url to the product's link list. No-op if the url
    /// is empty after trimming. Duplicates are permitted.
    pub fn add_link(&self, person_id: PersonId, product_id: ProductId, url: &str) -> Self {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return self.clone();
        }
        let mut next = self.clone();
        if let Some(product) = next.product_mut(person_id, product_id) {
            product.links_mut().push(trimmed.to_string());
        }
        next
    }

    /// Removes the link at `index`. No-op if the index is out of range.
    pub fn delete_link(&self, person_id: PersonId, product_id: ProductId, index: usize) -> Self {
        let mut next = self.clone();
        if let Some(product) = next.product_mut(person_id, product_id) {
            if index < product.links().len() {
                let _ = product.links_mut().remove(index);
            }
        }
        next
    }

    /// Replaces the link at `index` verbatim. No-op if the index is out of
    /// range.
    pub fn update_link(
        &self,
        person_id: PersonId,
        product_id: ProductId,
        index: usize,
        new_url: impl Into<String>,
    ) -> Self {
        let mut next = self.clone();
        if let Some(product) = next.product_mut(person_id, product_id) {
            if let Some(link) = product.links_mut().get_mut(index) {
                *link = new_url.into();
            }
        }
        next
    }

    fn person_mut(&mut self, person_id: PersonId) -> Option<&mut Person> {
        self.people.iter_mut().find(|p| p.id() == person_id)
    }

    fn product_mut(&mut self, person_id: PersonId, product_id: ProductId) -> Option<&mut Product> {
        self.person_mut(person_id)?
            .products_mut()
            .iter_mut()
            .find(|p| p.id() == product_id)
    }
}
