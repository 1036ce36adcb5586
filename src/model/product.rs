use crate::model::Price;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The opaque identifier of a product, unique within its owning person.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ProductId(Uuid);

impl ProductId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

impl Serialize for ProductId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self(Uuid::deserialize(deserializer)?))
    }
}

/// A single edit to an existing product.
///
/// A closed set of operations rather than a field-name string, so a new
/// editable field cannot be added without the compiler pointing at every
/// place that must handle it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ProductEdit {
    /// Replace the product name. Stored verbatim, no trimming.
    Rename(String),
    /// Replace the price. The caller produces the `Price` with
    /// [`Price::parse_lenient`], so malformed input has already collapsed
    /// to zero by the time it arrives here.
    Reprice(Price),
}

/// One purchased (or planned) product with its link list.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
    links: Vec<String>,
}

impl Product {
    /// Creates a product with a fresh id, zero price and no links. The
    /// caller is responsible for trimming and rejecting empty names.
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProductId::generate(),
            name: name.into(),
            price: Price::default(),
            links: Vec::new(),
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub(crate) fn apply(&mut self, edit: ProductEdit) {
        match edit {
            ProductEdit::Rename(name) => self.name = name,
            ProductEdit::Reprice(price) => self.price = price,
        }
    }

    pub(crate) fn links_mut(&mut self) -> &mut Vec<String> {
        &mut self.links
    }
}
