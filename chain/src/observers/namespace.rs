use ledger_common::{
    namespace::Namespace,
    notification::{Notification, NotificationContext},
};

use crate::{cache::LedgerCache, error::ChainError};

use super::BlockObserver;

/// Adds a provisioned namespace to the cache on execute and removes it again
/// on undo.
#[derive(Default)]
pub struct ProvisionNamespaceObserver;

impl ProvisionNamespaceObserver {
    pub fn new() -> Self {
        Self
    }
}

impl BlockObserver for ProvisionNamespaceObserver {
    fn name(&self) -> &'static str {
        "ProvisionNamespaceObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let Notification::ProvisionNamespace {
            owner,
            namespace_id,
        } = notification
        else {
            return Ok(());
        };

        if context.is_execute() {
            cache.namespaces.add(Namespace::new(
                namespace_id.clone(),
                owner.clone(),
                context.height,
            ))
        } else {
            cache.namespaces.remove(namespace_id)
        }
    }
}
