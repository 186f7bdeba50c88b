use async_trait::async_trait;

use crate::types::{Product, ReleaseInfo};

/// Destination for near end-of-life alerts. Delivery is best effort: implementations
/// report their own failures and never return them to the caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, product: &Product, info: &ReleaseInfo);
}

/// Used when no destination is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NilNotifier;

impl NilNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for NilNotifier {
    async fn notify(&self, _product: &Product, _info: &ReleaseInfo) {}
}
