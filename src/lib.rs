//! In-memory product catalog with a single-step undo log and a FIFO order queue.
//!
//! # Examples
//!
//! Catalog mutations and undo with [`core::catalog::Catalog`]:
//! ```
//! use stockroom::core::catalog::{Catalog, UndoOutcome};
//!
//! let mut catalog = Catalog::new();
//! catalog.insert(1, "Pen", 1.50, 10).expect("insert");
//! assert!(catalog.decrement_stock(1));
//! assert_eq!(catalog.get(1).map(|p| p.quantity_on_hand), Some(9));
//!
//! // Stock decrements are not logged, so undo reverses the insert.
//! let outcome = catalog.undo_last().expect("undo");
//! assert!(matches!(outcome, UndoOutcome::Removed(_)));
//! assert_eq!(catalog.list_in_stock().count(), 0);
//! ```
//!
//! Order flow with [`session::Session`]:
//! ```
//! use stockroom::{config::CatalogConfig, session::{Session, SessionError}};
//!
//! let mut session = Session::new(CatalogConfig::default());
//! session.catalog_mut().insert(5, "Notebook", 3.25, 1).expect("insert");
//! session.place_order(5).expect("in stock");
//! assert_eq!(session.place_order(5), Err(SessionError::OutOfStock(5)));
//! assert_eq!(session.process_next_order().map(|o| o.product_id), Ok(5));
//! ```
#![deny(missing_docs)]

/// Catalog tunables.
pub mod config;
/// Catalog, undo log, work queue and snapshots.
pub mod core;
/// Undo log entries and change journal types.
pub mod op;
/// Product records and patches.
pub mod product;
/// Order-placement orchestration.
pub mod session;
/// Shared primitive types.
pub mod types;
