//! Pool to frozen plot: the full scribing flow on the differential hot path.

use std::sync::Arc;

use ed25519_dalek::SigningKey;
use pt_01_chain::{genesis_plot, Interaction, Plot, PlotHeaderHasher};
use pt_02_queue::{InteractionQueue, MemoryInteractionQueue};
use shared_types::{PlotId, PublicKey, U256};

use crate::support::MemoryLedger;

/// Low enough to be found in a handful of attempts, high enough to reject
/// the occasional unlucky id.
const TEST_TARGET: &str = "0fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

fn signed_payment(from_key: &SigningKey, to: PublicKey, height: i64) -> Interaction {
    let from = PublicKey(from_key.verifying_key().to_bytes());
    let mut tx = Interaction::new(from, to, 0, 0, height, None);
    tx.sign(from_key).unwrap();
    tx
}

#[test]
fn test_scribe_a_plot_from_the_queue() {
    let mut rng = rand::thread_rng();
    let alice = SigningKey::generate(&mut rng);
    let bob = SigningKey::generate(&mut rng);
    let alice_pk = PublicKey(alice.verifying_key().to_bytes());
    let bob_pk = PublicKey(bob.verifying_key().to_bytes());
    let scriber_pk = PublicKey([0x42; 32]);

    let ledger = Arc::new(MemoryLedger::new());
    ledger.set_imbalance(alice_pk, 5);
    ledger.set_imbalance(bob_pk, 5);
    let queue = MemoryInteractionQueue::new(Arc::clone(&ledger));

    // wallets broadcast; the queue admits and orders
    let first = signed_payment(&alice, bob_pk, 1);
    let second = signed_payment(&bob, alice_pk, 1);
    for tx in [&first, &second] {
        assert!(tx.verify().unwrap());
        assert!(queue.add(tx.id().unwrap(), tx.clone()).unwrap());
    }

    // the scriber pulls a batch and builds a candidate on top of genesis
    let previous = genesis_plot().unwrap();
    let mut interactions = vec![Interaction::new(PublicKey::ZERO, scriber_pk, 0, 0, 1, None)];
    interactions.extend(queue.get(0));

    let target: PlotId = TEST_TARGET.parse().unwrap();
    let mut plot = Plot::new(
        previous.id().unwrap(),
        1,
        target,
        previous.header.thread_work,
        interactions,
    )
    .unwrap();
    assert_eq!(plot.header.interaction_count, 3);

    // scan nonces on the differential path until the target is met
    let target_int = U256::from_big_endian(target.as_bytes());
    let mut hasher = PlotHeaderHasher::new();
    let solution = loop {
        let (id, _attempts) = plot.header.id_fast(&mut hasher);
        if id <= target_int {
            break id;
        }
        plot.header.nonce += 1;
    };

    // the frozen header re-serializes to the exact id the scan found
    let frozen_id = plot.id().unwrap();
    assert_eq!(frozen_id.to_u256(), solution);
    assert!(plot.check_pow(&frozen_id));
}

#[test]
fn test_mid_scribe_append_updates_the_scan() {
    let mut rng = rand::thread_rng();
    let alice = SigningKey::generate(&mut rng);
    let alice_pk = PublicKey(alice.verifying_key().to_bytes());

    let previous = genesis_plot().unwrap();
    let target: PlotId = TEST_TARGET.parse().unwrap();
    let mut plot = Plot::new(
        previous.id().unwrap(),
        1,
        target,
        previous.header.thread_work,
        vec![Interaction::new(PublicKey::ZERO, PublicKey([0x42; 32]), 0, 0, 1, None)],
    )
    .unwrap();

    let mut hasher = PlotHeaderHasher::new();
    let target_int = U256::from_big_endian(target.as_bytes());

    // a few unsuccessful-looking attempts before the new interaction arrives
    for _ in 0..3 {
        plot.header.id_fast(&mut hasher);
        plot.header.nonce += 1;
    }

    // a late arrival joins mid-scribe: root and count shift under the hasher
    let late = signed_payment(&alice, PublicKey([0x55; 32]), 1);
    plot.add_interaction(late.id().unwrap(), late).unwrap();
    assert_eq!(plot.header.interaction_count, 2);

    let solution = loop {
        let (id, _attempts) = plot.header.id_fast(&mut hasher);
        if id <= target_int {
            break id;
        }
        plot.header.nonce += 1;
    };

    assert_eq!(plot.id().unwrap().to_u256(), solution);

    // the incremental root equals a from-scratch construction of the same list
    let rebuilt = Plot::new(
        previous.id().unwrap(),
        1,
        target,
        previous.header.thread_work,
        plot.interactions.clone(),
    )
    .unwrap();
    assert_eq!(rebuilt.header.hash_list_root, plot.header.hash_list_root);
}
