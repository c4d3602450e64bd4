use crate::render::Action;
use async_trait::async_trait;

/// Receiver for the action triggers attached to rendered cards
#[async_trait]
pub trait ActionHandler: Send {
    async fn handle(&mut self, action: Action);
}
