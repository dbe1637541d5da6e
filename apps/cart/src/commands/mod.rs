//! # Commands Module
//!
//! The operations the UI calls, resolved through the enclosing
//! provider scope.
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! └── cart.rs     ◄─── get_cart, add_to_cart, increment, decrement
//! ```
//!
//! Every command looks the cart up with `use_cart()`, so calling one
//! outside `CartProvider::provide` fails with `CONTEXT_MISUSE`.

pub mod cart;
