use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use crate::chat::{DisplayError, MessageId, Messenger};
use crate::pager::{NavAction, Pager, Transition};
use crate::ranking::RankedList;

/// This controller keeps track of every ranking message with
/// live controls, and updates them when they are navigated
/// or expire.
#[derive(Clone)]
pub struct PagerController {
    messenger: Arc<dyn Messenger>,
    timeout: Duration,

    /// Maps the message of a ranking to its pager. Pagers are
    /// removed once they are locked.
    pagers: Arc<RwLock<HashMap<MessageId, Arc<Mutex<Pager>>>>>,
}

impl PagerController {
    pub fn init(messenger: &Arc<dyn Messenger>, timeout: Duration) -> Self {
        PagerController {
            messenger: messenger.clone(),
            timeout,
            pagers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Send the first page of a ranking, and keep its controls
    /// alive until the timeout.
    pub async fn create(&self, list: RankedList, title: String) -> Result<MessageId, DisplayError> {
        let pager = Pager::new(list, title, Instant::now(), self.timeout);
        let id = self.messenger.send_card(&pager.card()).await?;
        log::debug!("ranking {} has {} page(s)", id, pager.max_page() + 1);

        let deadline = pager.deadline();
        self.pagers
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(pager)));

        let controller = self.clone();
        let _ = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            controller.expire(id).await;
        });

        Ok(id)
    }

    /// Apply a button press to the ranking in the specified message.
    ///
    /// Presses on messages without live controls are ignored,
    /// and reported as `Transition::Locked`.
    pub async fn navigate(&self, id: MessageId, action: NavAction) -> Transition {
        let slot = match self.pagers.read().await.get(&id) {
            Some(slot) => slot.clone(),
            None => {
                log::debug!("ignore {:?} on ranking {} without live controls", action, id);
                return Transition::Locked;
            }
        };

        // Hold the lock while updating the message, so that presses
        // on the same ranking are applied in order.
        let mut pager = slot.lock().await;
        let was_locked = pager.is_locked();

        let transition = pager.navigate(action, Instant::now());
        match transition {
            Transition::Moved => {
                if let Err(err) = self.messenger.edit_card(id, &pager.card()).await {
                    log::warn!("failed to update ranking {}, locking it: {}", id, err);
                    pager.lock();
                    drop(pager);
                    self.retire(id).await;
                }
            }
            Transition::Locked if !was_locked => {
                // The deadline passed before the timer got to it.
                log::debug!("controls of ranking {} expired", id);
                self.freeze(id, &pager).await;
                drop(pager);
                self.retire(id).await;
            }
            Transition::Locked | Transition::Unchanged => {}
        }

        transition
    }

    /// Lock the pager of the specified message, and disable its controls.
    pub async fn expire(&self, id: MessageId) {
        let slot = match self.retire(id).await {
            Some(slot) => slot,
            None => return, // locked already
        };

        let mut pager = slot.lock().await;
        if pager.lock() {
            log::debug!("controls of ranking {} expired", id);
            self.freeze(id, &pager).await;
        }
    }

    /// Lock every pager that is still live.
    pub async fn expire_all(&self) {
        let ids: Vec<MessageId> = self.pagers.read().await.keys().copied().collect();
        for id in ids {
            self.expire(id).await;
        }
    }

    /// The number of rankings with live controls.
    pub async fn nb_live(&self) -> usize {
        self.pagers.read().await.len()
    }

    async fn freeze(&self, id: MessageId, pager: &Pager) {
        if let Err(err) = self.messenger.edit_card(id, &pager.card()).await {
            log::warn!("failed to disable controls of ranking {}: {}", id, err);
        }
    }

    async fn retire(&self, id: MessageId) -> Option<Arc<Mutex<Pager>>> {
        self.pagers.write().await.remove(&id)
    }
}
