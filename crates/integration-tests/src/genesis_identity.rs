//! The genesis literal reproduces its network-accepted identities.

use pt_01_chain::{genesis_plot, Interaction, PlotHeaderHasher};
use sha3::{Digest, Sha3_256};
use shared_types::{InteractionId, PublicKey, U256};

const GENESIS_PLOT_ID: &str = "0000000d0c970037968a24c1e3a5cc88efd39055c22879952a52e5eb19e98720";
const GENESIS_PLOTROOT_ID: &str =
    "8c9c96af3cac62774baa640ffc9065b3924eedb1a8a7af9071ac93181cc0dee1";
const GENESIS_MEMO: &str = "...unless a grain of wheat falls into the earth and dies, \
     it remains alone. But if it dies, it produces much grain and yields a harvest.";

/// A wallet-side reconstruction of the genesis plotroot hashes to the same
/// id as the literal.
#[test]
fn test_genesis_plotroot_id_from_reconstruction() {
    let reconstructed = Interaction {
        time: 1711304122,
        nonce: 587592816,
        from: PublicKey::ZERO,
        to: "ZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZY=".parse().unwrap(),
        memo: Some(GENESIS_MEMO.to_string()),
        matures: 0,
        expires: 0,
        series: 1,
        signature: None,
    };
    assert_eq!(reconstructed.id().unwrap().to_string(), GENESIS_PLOTROOT_ID);

    let parsed = genesis_plot().unwrap();
    assert_eq!(parsed.interactions[0], reconstructed);
}

/// The hash-list root of a single-interaction plot is the plotroot id mixed
/// over the digest of the empty sequence.
#[test]
fn test_genesis_hash_list_root_construction() {
    let plot = genesis_plot().unwrap();
    let plotroot_id = plot.interactions[0].id().unwrap();

    let mut mix = Sha3_256::new();
    mix.update(plotroot_id.as_bytes());
    mix.update(Sha3_256::new().finalize());
    let expected = InteractionId(mix.finalize().into());

    assert_eq!(plot.header.hash_list_root, expected);
}

/// The genesis header hashes to the id the surrounding network accepts,
/// through both the plain and the differential paths.
#[test]
fn test_genesis_plot_id_both_hash_paths() {
    let plot = genesis_plot().unwrap();

    let id = plot.id().unwrap();
    assert_eq!(id.to_string(), GENESIS_PLOT_ID);
    assert!(plot.check_pow(&id));

    let mut hasher = PlotHeaderHasher::new();
    let (fast, attempts) = plot.header.id_fast(&mut hasher);
    assert_eq!(fast, id.to_u256());
    assert_eq!(attempts, 1);
    assert!(fast <= U256::from_big_endian(plot.header.target.as_bytes()));
}
