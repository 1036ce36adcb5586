use crate::model::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The opaque identifier of a person, assigned at creation and never reused.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PersonId(Uuid);

impl PersonId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PersonId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

impl Serialize for PersonId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PersonId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self(Uuid::deserialize(deserializer)?))
    }
}

/// One person being tracked, with their ordered list of products.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Person {
    id: PersonId,
    name: String,
    /// Whether the person's product list is unfolded in displays. This is
    /// the only piece of view state that persists with the data.
    expanded: bool,
    products: Vec<Product>,
}

impl Person {
    /// Creates a person with a fresh id, no products, and `expanded` on.
    /// The caller is responsible for trimming and rejecting empty names.
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            id: PersonId::generate(),
            name: name.into(),
            expanded: true,
            products: Vec::new(),
        }
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Finds a product by id within this person's list.
    pub fn product(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == product_id)
    }

    /// The sum of this person's product prices with tax applied. Recomputed
    /// on every call, never stored.
    pub fn total(&self) -> Decimal {
        self.products
            .iter()
            .map(|product| product.price().with_tax())
            .sum()
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    pub(crate) fn products_mut(&mut self) -> &mut Vec<Product> {
        &mut self.products
    }
}
