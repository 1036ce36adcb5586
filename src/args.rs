//! These structs provide the CLI interface for the purchases CLI.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// purchases: a command-line tool for tracking purchases made by multiple
/// people.
///
/// The tracker keeps an ordered list of people, each with an ordered list of
/// products, each with a price and any number of links. Every change is
/// saved to a snapshot file in the tracker home directory. Totals include a
/// flat 10% tax, and the whole tracker, or a single person, can be exported
/// to an Excel file.
///
/// People and products can be referred to by name (case-insensitive) or by
/// the id shown in `purchases show`.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a person, a product to a person, or a link to a product.
    Add(AddArgs),
    /// Delete a person, a product, or a link.
    Delete(DeleteArgs),
    /// Edit a person's name, a product's name or price, or a link.
    Update(UpdateArgs),
    /// Collapse or expand a person's product list in `show` output.
    Toggle(ToggleArgs),
    /// Print the tracked people, their products and totals.
    Show(ShowArgs),
    /// Write an Excel file with everyone's purchases, or one person's.
    Export(ExportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where tracker data is held. Defaults to
    /// ~/purchase-tracker
    #[arg(long, env = "PURCHASE_TRACKER_HOME", default_value_t = default_tracker_home())]
    tracker_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn tracker_home(&self) -> &DisplayPath {
        &self.tracker_home
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AddSubcommand {
    /// Add a person. Does nothing if the name is blank.
    Person(AddPersonArgs),
    /// Add a product to a person's list, with a zero price.
    Product(AddProductArgs),
    /// Add a link to a product.
    Link(AddLinkArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    #[command(subcommand)]
    entity: AddSubcommand,
}

impl AddArgs {
    pub fn entity(&self) -> &AddSubcommand {
        &self.entity
    }
}

#[derive(Debug, Parser, Clone)]
pub struct AddPersonArgs {
    /// The person's display name.
    name: String,
}

impl AddPersonArgs {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Parser, Clone)]
pub struct AddProductArgs {
    /// The person to add the product to, by name or id.
    #[arg(long)]
    person: String,

    /// The product name.
    name: String,
}

impl AddProductArgs {
    pub fn person(&self) -> &str {
        &self.person
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Parser, Clone)]
pub struct AddLinkArgs {
    /// The person that owns the product, by name or id.
    #[arg(long)]
    person: String,

    /// The product to add the link to, by name or id.
    #[arg(long)]
    product: String,

    /// The link URL. Stored as given; URLs are not validated.
    url: String,
}

impl AddLinkArgs {
    pub fn person(&self) -> &str {
        &self.person
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum DeleteSubcommand {
    /// Delete a person and all of their products.
    Person(DeletePersonArgs),
    /// Delete a product from a person's list.
    Product(DeleteProductArgs),
    /// Delete a link from a product by its position (zero-based).
    Link(DeleteLinkArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    #[command(subcommand)]
    entity: DeleteSubcommand,
}

impl DeleteArgs {
    pub fn entity(&self) -> &DeleteSubcommand {
        &self.entity
    }
}

#[derive(Debug, Parser, Clone)]
pub struct DeletePersonArgs {
    /// The person to delete, by name or id.
    person: String,
}

impl DeletePersonArgs {
    pub fn person(&self) -> &str {
        &self.person
    }
}

#[derive(Debug, Parser, Clone)]
pub struct DeleteProductArgs {
    /// The person that owns the product, by name or id.
    #[arg(long)]
    person: String,

    /// The product to delete, by name or id.
    product: String,
}

impl DeleteProductArgs {
    pub fn person(&self) -> &str {
        &self.person
    }

    pub fn product(&self) -> &str {
        &self.product
    }
}

#[derive(Debug, Parser, Clone)]
pub struct DeleteLinkArgs {
    /// The person that owns the product, by name or id.
    #[arg(long)]
    person: String,

    /// The product that owns the link, by name or id.
    #[arg(long)]
    product: String,

    /// The zero-based position of the link to delete.
    index: usize,
}

impl DeleteLinkArgs {
    pub fn person(&self) -> &str {
        &self.person
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum UpdateSubcommand {
    /// Rename a person. A blank name leaves the current name in place.
    Person(UpdatePersonArgs),
    /// Change a product's name and/or price.
    Product(UpdateProductArgs),
    /// Replace a link by its position (zero-based).
    Link(UpdateLinkArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    #[command(subcommand)]
    entity: UpdateSubcommand,
}

impl UpdateArgs {
    pub fn entity(&self) -> &UpdateSubcommand {
        &self.entity
    }
}

#[derive(Debug, Parser, Clone)]
pub struct UpdatePersonArgs {
    /// The person to rename, by name or id.
    person: String,

    /// The new name.
    #[arg(long)]
    name: String,
}

impl UpdatePersonArgs {
    pub fn person(&self) -> &str {
        &self.person
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateProductArgs {
    /// The person that owns the product, by name or id.
    #[arg(long)]
    person: String,

    /// The product to update, by name or id.
    product: String,

    /// The new product name, stored as given.
    #[arg(long)]
    name: Option<String>,

    /// The new price. Input that does not parse as a non-negative number
    /// becomes 0.
    #[arg(long)]
    price: Option<String>,
}

impl UpdateProductArgs {
    pub fn person(&self) -> &str {
        &self.person
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn price(&self) -> Option<&str> {
        self.price.as_deref()
    }
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateLinkArgs {
    /// The person that owns the product, by name or id.
    #[arg(long)]
    person: String,

    /// The product that owns the link, by name or id.
    #[arg(long)]
    product: String,

    /// The zero-based position of the link to replace.
    index: usize,

    /// The replacement URL, stored as given.
    url: String,
}

impl UpdateLinkArgs {
    pub fn person(&self) -> &str {
        &self.person
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Parser, Clone)]
pub struct ToggleArgs {
    /// The person whose product list to collapse or expand, by name or id.
    person: String,
}

impl ToggleArgs {
    pub fn person(&self) -> &str {
        &self.person
    }
}

#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowFormat {
    #[default]
    Text,
    Json,
}

serde_plain::derive_display_from_serialize!(ShowFormat);
serde_plain::derive_fromstr_from_deserialize!(ShowFormat);

#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// The output format: "text" or "json".
    #[arg(long, default_value_t = ShowFormat::Text)]
    format: ShowFormat,
}

impl ShowArgs {
    pub fn format(&self) -> ShowFormat {
        self.format
    }
}

#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// Export only this person, by name or id. Without this, everyone is
    /// exported into one sheet.
    #[arg(long)]
    person: Option<String>,

    /// The directory to write the .xlsx file into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

impl ExportArgs {
    pub fn person(&self) -> Option<&str> {
        self.person.as_deref()
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

fn default_tracker_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("purchase-tracker"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --tracker-home or PURCHASE_TRACKER_HOME instead of relying on \
                the default tracker home directory. If you continue using the program right now, \
                you may have problems!",
            );
            PathBuf::from("purchase-tracker")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
