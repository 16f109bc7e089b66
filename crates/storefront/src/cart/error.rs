//! Cart error taxonomy and the notification strings shown to shoppers.

use rocket_shoes_core::ProductId;
use thiserror::Error;

use super::storage::StorageError;
use crate::catalog::CatalogError;

/// User-visible notification strings, kept verbatim from the original
/// RocketShoes client (pt-BR).
pub mod messages {
    /// Requested or incremented quantity exceeds remote stock.
    pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
    /// Requested quantity is zero or negative.
    pub const INVALID_AMOUNT: &str = "A quantidade deve ser maior que 0";
    /// Generic add failure.
    pub const ADD_FAILED: &str = "Erro na adição do produto";
    /// Generic remove failure (including removing an absent product).
    pub const REMOVE_FAILED: &str = "Erro na remoção do produto";
    /// Generic quantity-update failure.
    pub const UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";
}

/// The cart operation being attempted.
///
/// Transport and storage failures collapse into one generic notification per
/// operation, so the mapping needs to know which operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOp {
    Add,
    Remove,
    Update,
}

/// Errors produced by cart store operations.
///
/// Every failure leaves the cart exactly as it was: no entry is mutated and
/// nothing is persisted.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds the remote stock amount.
    #[error("requested quantity exceeds available stock")]
    OutOfStock,

    /// Requested quantity is zero or negative.
    #[error("quantity must be greater than zero (got {0})")]
    InvalidAmount(i32),

    /// The operation targeted a product that is not in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Catalog API call failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// The notification shown to the shopper for this failure.
    ///
    /// Domain failures map 1:1 to their own string; anything else collapses
    /// into the per-operation generic. Updating a product that is not in the
    /// cart reports the stock message, matching the original client.
    #[must_use]
    pub fn notification(&self, op: CartOp) -> &'static str {
        match (self, op) {
            (Self::OutOfStock, _) => messages::OUT_OF_STOCK,
            (Self::InvalidAmount(_), _) => messages::INVALID_AMOUNT,
            (Self::NotInCart(_), CartOp::Update) => messages::OUT_OF_STOCK,
            (_, CartOp::Add) => messages::ADD_FAILED,
            (_, CartOp::Remove) => messages::REMOVE_FAILED,
            (_, CartOp::Update) => messages::UPDATE_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_keep_their_message_across_operations() {
        for op in [CartOp::Add, CartOp::Remove, CartOp::Update] {
            assert_eq!(CartError::OutOfStock.notification(op), messages::OUT_OF_STOCK);
            assert_eq!(
                CartError::InvalidAmount(0).notification(op),
                messages::INVALID_AMOUNT
            );
        }
    }

    #[test]
    fn test_update_on_absent_product_reports_stock_message() {
        let err = CartError::NotInCart(ProductId::new(9));
        assert_eq!(err.notification(CartOp::Update), messages::OUT_OF_STOCK);
    }

    #[test]
    fn test_remove_on_absent_product_reports_remove_message() {
        let err = CartError::NotInCart(ProductId::new(9));
        assert_eq!(err.notification(CartOp::Remove), messages::REMOVE_FAILED);
    }

    #[test]
    fn test_transport_failures_collapse_per_operation() {
        let err = CartError::Catalog(CatalogError::NotFound("stock/1".to_string()));
        assert_eq!(err.notification(CartOp::Add), messages::ADD_FAILED);
        assert_eq!(err.notification(CartOp::Remove), messages::REMOVE_FAILED);
        assert_eq!(err.notification(CartOp::Update), messages::UPDATE_FAILED);
    }
}
