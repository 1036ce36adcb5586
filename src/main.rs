use clap::Parser;
use purchase_tracker::args::{AddSubcommand, Args, Command, DeleteSubcommand, UpdateSubcommand};
use purchase_tracker::export::XlsxSink;
use purchase_tracker::{commands, Home, Result, Store};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = Home::new(args.common().tracker_home().path())?;
    let store = Store::new(&home);

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Add(add_args) => match add_args.entity() {
            AddSubcommand::Person(a) => commands::add_person(&store, a.name())?.print(),
            AddSubcommand::Product(a) => {
                commands::add_product(&store, a.person(), a.name())?.print()
            }
            AddSubcommand::Link(a) => {
                commands::add_link(&store, a.person(), a.product(), a.url())?.print()
            }
        },

        Command::Delete(delete_args) => match delete_args.entity() {
            DeleteSubcommand::Person(a) => commands::delete_person(&store, a.person())?.print(),
            DeleteSubcommand::Product(a) => {
                commands::delete_product(&store, a.person(), a.product())?.print()
            }
            DeleteSubcommand::Link(a) => {
                commands::delete_link(&store, a.person(), a.product(), a.index())?.print()
            }
        },

        Command::Update(update_args) => match update_args.entity() {
            UpdateSubcommand::Person(a) => {
                commands::rename_person(&store, a.person(), a.name())?.print()
            }
            UpdateSubcommand::Product(a) => {
                commands::update_product(&store, a.person(), a.product(), a.name(), a.price())?
                    .print()
            }
            UpdateSubcommand::Link(a) => {
                commands::update_link(&store, a.person(), a.product(), a.index(), a.url())?.print()
            }
        },

        Command::Toggle(toggle_args) => {
            commands::toggle_expanded(&store, toggle_args.person())?.print()
        }

        Command::Show(show_args) => commands::show(&store, show_args.format())?.print(),

        Command::Export(export_args) => commands::export(
            &store,
            export_args.person(),
            export_args.out_dir(),
            &mut XlsxSink,
        )?
        .print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "purchase_tracker={},{}={}",
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
