//! Remote persistence through the cart API.

use async_trait::async_trait;

use vitrine_core::{CartLine, ProductId};

use super::CartPersistence;
use crate::api::CartApiClient;
use crate::error::PersistenceError;

/// Persists each line change as one cart API request.
#[derive(Debug, Clone)]
pub struct RemotePersistence {
    client: CartApiClient,
}

impl RemotePersistence {
    #[must_use]
    pub const fn new(client: CartApiClient) -> Self {
        Self { client }
    }

    /// The underlying API client.
    #[must_use]
    pub const fn client(&self) -> &CartApiClient {
        &self.client
    }
}

#[async_trait]
impl CartPersistence for RemotePersistence {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn writes_snapshot(&self) -> bool {
        false
    }

    async fn load(&self) -> Result<Vec<CartLine>, PersistenceError> {
        Ok(self.client.get_cart().await?)
    }

    /// Full resynchronization: clear the server cart, then upload every line.
    async fn save(&self, lines: &[CartLine]) -> Result<(), PersistenceError> {
        self.client.clear_cart().await?;
        for line in lines {
            self.client.upsert_line(line).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        Ok(self.client.clear_cart().await?)
    }

    async fn upsert_line(
        &self,
        line: &CartLine,
        _lines: &[CartLine],
    ) -> Result<(), PersistenceError> {
        self.client.upsert_line(line).await?;
        Ok(())
    }

    async fn remove_line(
        &self,
        id: &ProductId,
        _lines: &[CartLine],
    ) -> Result<(), PersistenceError> {
        self.client.remove_line(id).await?;
        Ok(())
    }
}
