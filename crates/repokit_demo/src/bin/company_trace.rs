//! Walks a company repository through save, lookup, update and delete.

use std::env;
use std::process::ExitCode;

use repokit_demo::{Company, logging, sample_companies};
use repokit_storage::{Repository, RepositoryConfig};
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
        println!("company_trace {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init();

    let repo_config = if config.strict {
        RepositoryConfig::strict()
    } else {
        RepositoryConfig::default()
    }
    .with_name("companies");
    let repo = Repository::<Company>::with_config(repo_config);

    let [first, second] = sample_companies();
    let first = repo.save(first)?;
    let second = repo.save(second)?;
    info!(count = repo.len(), "companies saved");

    println!("\n[a] All companies:");
    print_all(&repo);

    let first_id = i64::from(first.read().id.unwrap_or_default());
    println!("\n[b] Find company by id = {first_id}:");
    match repo.find_by_id(first_id) {
        Some(company) => println!("{}", company.read()),
        None => println!("(none)"),
    }

    println!("\n[c] Find by name = 'Company 1':");
    for company in repo.find_by_field("name", "Company 1")? {
        println!("{}", company.read());
    }

    println!("\n[d] Update cuit of company {first_id} to 20999999:");
    repo.update_field(first_id, "cuit", 20_999_999)?;
    if let Some(company) = repo.find_by_id(first_id) {
        println!("{}", company.read());
    }

    let second_id = i64::from(second.read().id.unwrap_or_default());
    println!("\n[e] Delete company with id = {second_id}:");
    println!("Deleted: {}", repo.delete(second_id));

    println!("\n== Final state ==");
    print_all(&repo);
    Ok(())
}

fn print_all(repo: &Repository<Company>) {
    let mut companies = repo.find_all();
    companies.sort_by_key(|c| c.read().id);
    for company in companies {
        println!("{}", company.read());
    }
}

fn print_help() {
    println!(
        r"company_trace - company repository walkthrough

USAGE:
    company_trace [OPTIONS]

OPTIONS:
    -h, --help       Print help information
    -V, --version    Print version information
    --strict         Reject saves that reuse an identity held by another entity

ENVIRONMENT:
    RUST_LOG         Log filter for stderr output (default: info)"
    );
}
