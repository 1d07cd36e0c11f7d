//! Walks the article catalog through seeding, lookup, in-place edit and
//! delete.

use std::env;
use std::process::ExitCode;

use repokit_demo::{Catalog, logging};
use repokit_storage::{Entity, Repository, RepositoryConfig};
use tracing::info;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    show_help: bool,
    show_version: bool,
    strict: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--strict" => config.strict = true,
            other => return Err(format!("unknown option: {other}").into()),
        }
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("catalog_trace {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init();

    let repo_config = if config.strict {
        RepositoryConfig::strict()
    } else {
        RepositoryConfig::default()
    };
    let catalog = Catalog::with_config(&repo_config);
    let (pizza_id, lomo_id) = catalog.seed()?;
    info!(
        categories = catalog.categories.len(),
        supplies = catalog.supplies.len(),
        manufactured = catalog.manufactured.len(),
        "catalog seeded"
    );

    println!("\n[a] Categories:");
    print_all(&catalog.categories);

    println!("\n[b] Supply articles:");
    print_all(&catalog.supplies);

    println!("\n[c] Manufactured articles:");
    print_all(&catalog.manufactured);

    println!("\n[d] Find manufactured article by id = {pizza_id}:");
    match catalog.manufactured.find_by_id(pizza_id) {
        Some(article) => println!("Found: {}", article.read()),
        None => println!("Found: (none)"),
    }

    println!("\n[e] Update description of article {pizza_id} through its handle:");
    if let Some(article) = catalog.manufactured.find_by_id(pizza_id) {
        article.write().description = "Pizza with pineapple and extra cheese".to_string();
    }
    if let Some(article) = catalog.manufactured.find_by_id(pizza_id) {
        println!("{}", article.read());
    }

    println!("\n[f] Delete manufactured article with id = {lomo_id}:");
    println!("Deleted: {}", catalog.manufactured.delete(lomo_id));

    println!("\n== Final manufactured articles ==");
    print_all(&catalog.manufactured);
    Ok(())
}

fn print_all<E>(repo: &Repository<E>)
where
    E: Entity + std::fmt::Display,
{
    let mut entries: Vec<_> = repo
        .find_all()
        .into_iter()
        .map(|handle| {
            let id = repokit_storage::identity::read_identity(repo.schema(), &*handle.read());
            (id, handle)
        })
        .collect();
    entries.sort_by_key(|(id, _)| *id);
    for (_, handle) in entries {
        println!("{}", handle.read());
    }
}

fn print_help() {
    println!(
        r"catalog_trace - article catalog walkthrough

USAGE:
    catalog_trace [OPTIONS]

OPTIONS:
    -h, --help       Print help information
    -V, --version    Print version information
    --strict         Reject saves that reuse an identity held by another entity

ENVIRONMENT:
    RUST_LOG         Log filter for stderr output (default: info)"
    );
}
