//! [`StoreEntity`] implementation for the order wire record.
//!
//! Records are validated on every write so the store only ever holds decodable
//! orders. Replacement is wholesale: the previous record is not merged.

use crate::framework::StoreEntity;
use crate::model::{OrderError, OrderMsg};
use async_trait::async_trait;

#[async_trait]
impl StoreEntity for OrderMsg {
    type Id = String;
    type Context = ();
    type Error = OrderError;

    fn id(&self) -> String {
        self.id.clone()
    }

    async fn on_insert(&self, _ctx: &()) -> Result<(), OrderError> {
        self.validate()
    }

    async fn on_replace(&self, _previous: &Self, _ctx: &()) -> Result<(), OrderError> {
        self.validate()
    }
}
