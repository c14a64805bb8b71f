//! Read access to backend entities needed while composing a recovery.

use std::collections::HashMap;

use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::pagination::PageState;
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod errors;

pub trait ProductReader {
    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
}

/// Products loaded into the salesman's product picker, keyed by id.
///
/// Stock figures are whatever the backend reported when the snapshot was
/// taken.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    products: HashMap<ProductId, Product>,
}

impl CatalogSnapshot {
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products
                .into_iter()
                .map(|product| (product.id.clone(), product))
                .collect(),
        }
    }

    /// Builds the snapshot from a loaded page of the `products` list,
    /// surfacing the page's fetch error if it has one.
    pub fn from_page(page: &PageState<Product>) -> RepositoryResult<Self> {
        match &page.error {
            Some(err) => Err(RepositoryError::from(err.clone())),
            None => Ok(Self::new(page.items.iter().cloned())),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductReader for CatalogSnapshot {
    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        Ok(self.products.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::pagination::Filters;
    use crate::source::FetchError;

    #[test]
    fn snapshot_looks_products_up_by_id() {
        let snapshot = CatalogSnapshot::new([Product {
            id: ProductId::new("p-1").unwrap(),
            name: "Khatta Meetha".to_string(),
            price: dec!(45),
            stock: 12,
            category: None,
        }]);

        let found = snapshot
            .get_product_by_id(&ProductId::new("p-1").unwrap())
            .unwrap();
        let missing = snapshot
            .get_product_by_id(&ProductId::new("p-2").unwrap())
            .unwrap();

        assert_eq!(found.map(|p| p.stock), Some(12));
        assert!(missing.is_none());
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn fetch_errors_map_onto_repository_errors() {
        let not_found = RepositoryError::from(FetchError::Status {
            status: 404,
            message: "gone".into(),
        });
        let down = RepositoryError::from(FetchError::Transport("refused".into()));

        assert!(matches!(not_found, RepositoryError::NotFound));
        assert!(matches!(down, RepositoryError::ConnectionError(_)));
    }

    #[test]
    fn failed_page_does_not_become_an_empty_catalog() {
        let mut page: PageState<Product> = PageState::new(Filters::new(), 10);
        page.error = Some(FetchError::Transport("timeout".into()));

        assert!(matches!(
            CatalogSnapshot::from_page(&page),
            Err(RepositoryError::ConnectionError(_))
        ));
    }
}
