//! # State Module
//!
//! Application state for the cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐    │
//! │  │   CartConfig     │   │   CartProvider   │   │  use_cart()      │    │
//! │  │                  │──►│                  │◄──│                  │    │
//! │  │  backend, key,   │   │  Mutex<CartList> │   │  task-local      │    │
//! │  │  corrupt policy  │   │  watch<Vec<..>>  │   │  provider scope  │    │
//! │  └──────────────────┘   │  dyn KeyValue-   │   └──────────────────┘    │
//! │                         │      Store       │                            │
//! │                         └──────────────────┘                            │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartProvider: mutations serialized by an async Mutex                │
//! │  • CartConfig: read-only after initialization                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod context;
pub mod record;

pub use cart::{CartOptions, CartProvider};
pub use config::{CartConfig, CartSettings, StorageBackend, StorageSettings};
pub use context::use_cart;
