// SPDX-License-Identifier: MPL-2.0
use pacific_quote::catalog::Catalog;
use pacific_quote::config;
use pacific_quote::error::{Error, Result};
use pacific_quote::quote::{FileStorage, QuoteCart, MAX_QUANTITY_PER_PRODUCT};
use pacific_quote::submission::{self, ContactInfo};
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
pacific_quote - quote-request cart for the product catalog

USAGE:
  pacific_quote [--data-dir <DIR>] <COMMAND>

COMMANDS:
  list                      show cart contents and totals
  add <slug>                add one unit of a product
  remove <slug>             remove a product from the cart
  set <slug> <qty>          set a product's quantity (0 removes it)
  clear                     empty the cart
  submit --name <NAME> --email <EMAIL> --phone <PHONE> --agree
                            send the quote request; clears the cart on success

The quote endpoint is read from PACIFIC_QUOTE_API_URL or settings.toml.
";

enum Command {
    List,
    Add(String),
    Remove(String),
    Set(String, i64),
    Clear,
    Submit { contact: ContactInfo, agree: bool },
}

fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return ExitCode::SUCCESS;
    }

    let parsed = parse(&mut args);
    let (data_dir, command) = match parsed {
        Ok(parsed) => parsed,
        Err(error) => {
            eprintln!("Error: {}", error);
            eprintln!();
            eprint!("{}", HELP);
            return ExitCode::FAILURE;
        }
    };

    match run(data_dir, command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn parse(
    args: &mut pico_args::Arguments,
) -> std::result::Result<(Option<PathBuf>, Command), pico_args::Error> {
    let data_dir: Option<PathBuf> = args.opt_value_from_str("--data-dir")?;

    let command = match args.subcommand()?.as_deref() {
        None | Some("list") => Command::List,
        Some("add") => Command::Add(args.free_from_str()?),
        Some("remove") => Command::Remove(args.free_from_str()?),
        Some("set") => Command::Set(args.free_from_str()?, args.free_from_str()?),
        Some("clear") => Command::Clear,
        Some("submit") => Command::Submit {
            contact: ContactInfo {
                name: args.value_from_str("--name")?,
                email: args.value_from_str("--email")?,
                phone: args.value_from_str("--phone")?,
            },
            agree: args.contains("--agree"),
        },
        Some(other) => {
            return Err(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unknown command: {}", other),
            })
        }
    };

    Ok((data_dir, command))
}

fn run(data_dir: Option<PathBuf>, command: Command) -> Result<()> {
    let storage = match data_dir {
        Some(dir) => FileStorage::with_dir(dir),
        None => FileStorage::new()?,
    };
    let mut cart = QuoteCart::new(storage);
    let catalog = Catalog::load()?;

    match command {
        Command::List => {
            if cart.is_empty() {
                println!("Quote cart is empty.");
                return Ok(());
            }
            for item in cart.items() {
                println!(
                    "{:>4} x {} ({})",
                    item.quantity, item.product.slug, item.product.overall_size
                );
            }
            println!(
                "Total: {} items across {} products",
                cart.total_items(),
                cart.len()
            );
        }
        Command::Add(slug) => {
            let product = catalog
                .product_by_slug(&slug)
                .ok_or_else(|| Error::Catalog(format!("unknown product: {}", slug)))?;
            cart.add_item(product);
            let quantity = cart
                .items()
                .iter()
                .find(|item| item.product.slug == slug)
                .map(|item| item.quantity)
                .unwrap_or(0);
            println!("{} x{}", slug, quantity);
        }
        Command::Remove(slug) => {
            cart.remove_item(&slug);
            println!("Removed {}.", slug);
        }
        Command::Set(slug, quantity) => {
            if !cart.is_in_cart(&slug) {
                return Err(Error::Catalog(format!("{} is not in the cart", slug)));
            }
            cart.update_quantity(&slug, quantity);
            if cart.is_in_cart(&slug) {
                println!(
                    "{} set to {}.",
                    slug,
                    quantity.min(i64::from(MAX_QUANTITY_PER_PRODUCT))
                );
            } else {
                println!("Removed {}.", slug);
            }
        }
        Command::Clear => {
            cart.clear();
            println!("Quote cart cleared.");
        }
        Command::Submit { contact, agree } => {
            if !agree {
                return Err(Error::Submission(
                    "pass --agree to consent to being contacted".to_string(),
                ));
            }
            if cart.is_empty() {
                return Err(Error::Submission("quote cart is empty".to_string()));
            }

            let settings = config::load().unwrap_or_default();
            let url = config::resolve_api_url(&settings)
                .ok_or_else(|| Error::Config("quote API URL is not configured".to_string()))?;

            let payload =
                submission::build_payload(cart.items(), contact, true, catalog.english_names());
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(submission::submit(&url, &payload))?;

            // Clear only after the endpoint confirmed success, so a failed
            // attempt can be retried without re-entering items.
            cart.clear();
            println!(
                "Quote request sent ({} items across {} products).",
                payload.metadata.total_items, payload.metadata.total_unique_products
            );
        }
    }

    Ok(())
}
