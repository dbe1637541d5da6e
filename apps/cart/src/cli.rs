//! # Command Line
//!
//! Argument parsing and dispatch for the `marketplace-cart` binary.
//!
//! ## Usage
//! ```bash
//! marketplace-cart list
//! marketplace-cart add a "Camiseta" https://img/a.png 10.99
//! marketplace-cart increment a
//! marketplace-cart --config ./cart.toml decrement a
//! ```

use marketplace_core::{CoreError, Money, NewProduct};
use std::path::PathBuf;

use crate::commands::cart::{self as cart_commands, CartResponse};
use crate::error::{CartError, CartResult};

/// Help text printed for `--help`.
pub const USAGE: &str = "\
GoMarketplace cart

Usage: marketplace-cart [OPTIONS] <COMMAND>

Commands:
  list                                  Show the cart
  add <ID> <TITLE> <IMAGE_URL> <PRICE>  Add a product (price like 10.99)
  increment <ID>                        Increase an item's quantity
  decrement <ID>                        Decrease an item's quantity

Options:
  -c, --config <PATH>  Config file (default: cart.toml in the config dir)
  -h, --help           Show this help message";

/// A parsed cart command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add(NewProduct),
    Increment(String),
    Decrement(String),
}

/// Options plus command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

/// Parses the arguments that follow the program name.
///
/// Returns `Ok(None)` when help was requested; nothing should run then.
pub fn parse_args<I>(args: I) -> CartResult<Option<Invocation>>
where
    I: IntoIterator<Item = String>,
{
    let mut config_path = None;
    let mut positional = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| CartError::Usage("--config needs a path".to_string()))?;
                config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Ok(None),
            _ => positional.push(arg),
        }
    }

    let command = match positional.as_slice() {
        [] => Command::List,
        [cmd] if cmd == "list" => Command::List,
        [cmd, id, title, image_url, price] if cmd == "add" => {
            let price: Money = price.parse().map_err(CoreError::from)?;
            Command::Add(NewProduct::new(id, title, image_url, price))
        }
        [cmd, id] if cmd == "increment" => Command::Increment(id.clone()),
        [cmd, id] if cmd == "decrement" => Command::Decrement(id.clone()),
        [cmd, ..] => {
            return Err(CartError::Usage(format!(
                "unknown command or wrong arguments: {}",
                cmd
            )))
        }
    };

    Ok(Some(Invocation {
        config_path,
        command,
    }))
}

/// Runs a command against the cart of the enclosing provider scope.
pub async fn execute(command: Command) -> CartResult<CartResponse> {
    match command {
        Command::List => cart_commands::get_cart().await,
        Command::Add(item) => cart_commands::add_to_cart(item).await,
        Command::Increment(id) => cart_commands::increment(&id).await,
        Command::Decrement(id) => cart_commands::decrement(&id).await,
    }
}
