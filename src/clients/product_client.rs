use tracing::{debug, instrument};
use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductCreate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product, products);

impl ProductClient {
    #[instrument(skip(self, payload), fields(product_name = %payload.name, supplier_id = %payload.supplier_id))]
    pub async fn create_product(&self, payload: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(ProductError::from)
    }

    /// Catalog entries published by one supplier.
    #[instrument(skip(self))]
    pub async fn list_products_by_supplier(&self, supplier_id: String) -> Result<Vec<Product>, ProductError> {
        let products = self.list_products().await?;
        Ok(products.into_iter().filter(|p| p.supplier_id == supplier_id).collect())
    }

    /// Returns the previous stock flag.
    #[instrument(skip(self))]
    pub async fn set_in_stock(&self, id: String, in_stock: bool) -> Result<bool, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::SetStock(in_stock)).await? {
            ProductActionResult::SetStock(previous) => Ok(previous),
            other => Err(ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }

    /// Returns the previous price.
    #[instrument(skip(self))]
    pub async fn reprice(&self, id: String, price: f64) -> Result<f64, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::Reprice(price)).await? {
            ProductActionResult::Reprice(previous) => Ok(previous),
            other => Err(ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }
}
