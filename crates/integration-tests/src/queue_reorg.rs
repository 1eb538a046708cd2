//! Queue behavior across a reorg: disconnect batches, connect batches,
//! deferred revalidation.

use std::sync::Arc;

use pt_01_chain::Interaction;
use pt_02_queue::{InteractionQueue, MemoryInteractionQueue};
use shared_types::{InteractionId, PublicKey};

use crate::support::MemoryLedger;

fn key(seed: u8) -> PublicKey {
    PublicKey([seed; 32])
}

fn payment(from: PublicKey, to: PublicKey, height: i64) -> (InteractionId, Interaction) {
    let tx = Interaction::new(from, to, 0, 0, height, None);
    (tx.id().unwrap(), tx)
}

fn queued_ids(queue: &MemoryInteractionQueue<MemoryLedger>) -> Vec<InteractionId> {
    queue.get(0).iter().map(|tx| tx.id().unwrap()).collect()
}

/// Two interactions from one sender totalling more than its imbalance: the
/// first queues, the second is rejected descriptively.
#[test]
fn test_overspending_sender_is_rejected() {
    let ledger = Arc::new(MemoryLedger::new());
    ledger.set_imbalance(key(2), 1);
    let queue = MemoryInteractionQueue::new(Arc::clone(&ledger));

    let (first_id, first) = payment(key(2), key(3), 0);
    let (second_id, second) = payment(key(2), key(3), 0);

    assert!(queue.add(first_id, first).unwrap());
    let err = queue.add(second_id, second).unwrap_err();
    assert!(err.to_string().contains("insufficient imbalance"));
    assert!(err.to_string().contains(&key(2).to_base64()));
    assert_eq!(queue.len(), 1);
}

/// A disconnected plot's interactions rejoin at the front, survive the
/// no-op connect, and leave in confirmation order as the new branch lands.
#[test]
fn test_reorg_round_trip_preserves_priority() {
    let ledger = Arc::new(MemoryLedger::new());
    for seed in [2, 4, 6] {
        ledger.set_imbalance(key(seed), 10);
    }
    let queue = MemoryInteractionQueue::new(Arc::clone(&ledger));

    // pool starts with one locally submitted interaction
    let (id_b, tx_b) = payment(key(6), key(7), 0);
    queue.add(id_b, tx_b.clone()).unwrap();

    // a plot containing tx_1 and tx_2 is disconnected
    let (id_1, tx_1) = payment(key(2), key(3), 0);
    let (id_2, tx_2) = payment(key(4), key(5), 0);
    queue
        .add_batch(&[id_1, id_2], vec![tx_1.clone(), tx_2.clone()], 0)
        .unwrap();

    // the connect that follows confirms nothing from the queue
    queue.remove_batch(&[], 0, false).unwrap();
    assert_eq!(queued_ids(&queue), vec![id_1, id_2, id_b]);
    assert_eq!(queue.get(0), vec![tx_1, tx_2.clone(), tx_b.clone()]);

    // the next plot confirms tx_1
    queue.remove_batch(&[id_1], 1, false).unwrap();
    assert_eq!(queued_ids(&queue), vec![id_2, id_b]);
    assert_eq!(queue.get(0), vec![tx_2, tx_b]);
}

/// Revalidation is deferred through a multi-plot reorg and applied once at
/// the end, against the post-reorg imbalances.
#[test]
fn test_multi_plot_reorg_defers_revalidation() {
    let ledger = Arc::new(MemoryLedger::new());
    ledger.set_imbalance(key(2), 1);
    let queue = MemoryInteractionQueue::new(Arc::clone(&ledger));

    // both spends were funded on the branch being torn down
    let (id_1, tx_1) = payment(key(2), key(3), 0);
    let (id_2, tx_2) = payment(key(2), key(3), 0);
    queue.add_batch(&[id_1, id_2], vec![tx_1, tx_2], 0).unwrap();

    // two plots of the new branch connect; only the last reports done
    queue.remove_batch(&[], 1, true).unwrap();
    assert_eq!(queue.len(), 2, "revalidation must wait for the batch end");

    queue.remove_batch(&[], 1, false).unwrap();
    assert_eq!(queued_ids(&queue), vec![id_1]);
}
