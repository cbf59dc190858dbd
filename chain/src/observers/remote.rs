use ledger_common::{
    account::{RemoteLink, RemoteRole},
    notification::{Notification, NotificationContext},
};

use crate::{cache::LedgerCache, error::ChainError};

use super::BlockObserver;

/// Maintains the symmetric harvesting-delegation links between a lessor and
/// its remote (lessee) account.
#[derive(Default)]
pub struct RemoteObserver;

impl RemoteObserver {
    pub fn new() -> Self {
        Self
    }
}

impl BlockObserver for RemoteObserver {
    fn name(&self) -> &'static str {
        "RemoteObserver"
    }

    fn notify(
        &mut self,
        cache: &mut LedgerCache,
        notification: &Notification,
        context: &NotificationContext,
    ) -> Result<(), ChainError> {
        let Notification::ImportanceTransfer {
            lessor,
            lessee,
            mode,
        } = notification
        else {
            return Ok(());
        };

        let lessor_link = RemoteLink::new(
            lessee.clone(),
            context.height,
            *mode,
            RemoteRole::HarvestingRemotely,
        );
        let lessee_link = RemoteLink::new(
            lessor.clone(),
            context.height,
            *mode,
            RemoteRole::RemoteHarvester,
        );

        if context.is_execute() {
            cache
                .accounts
                .find_state_by_address(lessor)
                .remotes_mut()
                .add_link(lessor_link);
            cache
                .accounts
                .find_state_by_address(lessee)
                .remotes_mut()
                .add_link(lessee_link);
        } else {
            cache
                .accounts
                .find_state_by_address(lessor)
                .remotes_mut()
                .remove_link(&lessor_link)?;
            cache
                .accounts
                .find_state_by_address(lessee)
                .remotes_mut()
                .remove_link(&lessee_link)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_common::{
        account::ImportanceTransferMode,
        crypto::Address,
        error::StateError,
        notification::NotificationTrigger,
    };

    fn address(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    fn transfer(mode: ImportanceTransferMode) -> Notification {
        Notification::ImportanceTransfer {
            lessor: address(1),
            lessee: address(2),
            mode,
        }
    }

    fn context(height: u64, trigger: NotificationTrigger) -> NotificationContext {
        NotificationContext::new(height, 0, trigger)
    }

    #[test]
    fn test_execute_adds_symmetric_link_pair() {
        let mut cache = LedgerCache::new();
        let mut observer = RemoteObserver::new();

        observer
            .notify(
                &mut cache,
                &transfer(ImportanceTransferMode::Activate),
                &context(7, NotificationTrigger::Execute),
            )
            .unwrap();

        let lessor = cache.accounts.state(&address(1)).unwrap().remotes();
        assert_eq!(
            lessor.current(),
            Some(&RemoteLink::new(
                address(2),
                7,
                ImportanceTransferMode::Activate,
                RemoteRole::HarvestingRemotely
            ))
        );

        let lessee = cache.accounts.state(&address(2)).unwrap().remotes();
        assert_eq!(
            lessee.current(),
            Some(&RemoteLink::new(
                address(1),
                7,
                ImportanceTransferMode::Activate,
                RemoteRole::RemoteHarvester
            ))
        );
    }

    #[test]
    fn test_undo_removes_both_links() {
        let mut cache = LedgerCache::new();
        let mut observer = RemoteObserver::new();
        let notification = transfer(ImportanceTransferMode::Activate);

        observer
            .notify(&mut cache, &notification, &context(7, NotificationTrigger::Execute))
            .unwrap();
        observer
            .notify(&mut cache, &notification, &context(7, NotificationTrigger::Undo))
            .unwrap();

        assert!(cache.accounts.state(&address(1)).unwrap().remotes().is_empty());
        assert!(cache.accounts.state(&address(2)).unwrap().remotes().is_empty());
    }

    #[test]
    fn test_undo_at_different_height_fails() {
        let mut cache = LedgerCache::new();
        let mut observer = RemoteObserver::new();
        let notification = transfer(ImportanceTransferMode::Activate);

        observer
            .notify(&mut cache, &notification, &context(7, NotificationTrigger::Execute))
            .unwrap();
        assert_eq!(
            observer.notify(&mut cache, &notification, &context(8, NotificationTrigger::Undo)),
            Err(ChainError::State(StateError::RemoteLinkMismatch))
        );
    }

    #[test]
    fn test_deactivate_links_are_stacked_on_activate() {
        let mut cache = LedgerCache::new();
        let mut observer = RemoteObserver::new();

        observer
            .notify(
                &mut cache,
                &transfer(ImportanceTransferMode::Activate),
                &context(7, NotificationTrigger::Execute),
            )
            .unwrap();
        observer
            .notify(
                &mut cache,
                &transfer(ImportanceTransferMode::Deactivate),
                &context(9, NotificationTrigger::Execute),
            )
            .unwrap();

        let lessor = cache.accounts.state(&address(1)).unwrap().remotes();
        assert_eq!(lessor.current().map(|l| l.mode), Some(ImportanceTransferMode::Deactivate));
    }
}
