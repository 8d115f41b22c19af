//! Shared primitive IDs and scalar aliases.

/// Caller-assigned product identifier.
pub type ProductId = u64;
/// Units on hand for a product.
pub type Quantity = u32;
/// Unit price in the catalog's currency.
pub type Price = f64;
/// Monotonic change sequence number.
pub type ChangeSeq = u64;
