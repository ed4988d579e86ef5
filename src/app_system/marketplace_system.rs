use tracing::{error, info};

use crate::clients::{CostAnalysisClient, DishClient, ProductClient, UserClient};
use crate::config::Config;
use crate::{dish_actor, product_actor, user_actor};

use super::AppError;

/// The running marketplace: one actor per store plus the clients wired over them.
pub struct MarketplaceSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub dish_client: DishClient,
    pub analysis_client: CostAnalysisClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketplaceSystem {
    /// Spawns the store actors. Must be called inside a tokio runtime.
    pub fn new(config: &Config) -> Self {
        let (user_actor, user_client) = user_actor::new(config.actor_buffer);
        let user_handle = tokio::spawn(user_actor.run());

        let (product_actor, product_client) = product_actor::new(config.actor_buffer);
        let product_handle = tokio::spawn(product_actor.run());

        let (dish_actor, dish_client) = dish_actor::new(config.actor_buffer);
        let dish_handle = tokio::spawn(dish_actor.run());

        let analysis_client = CostAnalysisClient::new(dish_client.clone(), product_client.clone());

        info!(buffer = config.actor_buffer, "Marketplace stores started");

        Self {
            user_client,
            product_client,
            dish_client,
            analysis_client,
            handles: vec![user_handle, product_handle, dish_handle],
        }
    }

    /// Closes every store channel and waits for the actors to drain.
    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down system...");

        // The analysis client holds clones of the dish and product senders.
        drop(self.analysis_client);
        drop(self.user_client);
        drop(self.product_client);
        drop(self.dish_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(AppError::Shutdown(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
