//! Differential plot header hashing for the scribing hot path.
//!
//! A scriber recomputes the header id millions of times per second while
//! scanning nonces. Re-serializing the whole header per attempt would
//! dominate the cost, so this hasher keeps the header's canonical JSON in a
//! single mutable buffer and patches only the runs that can change between
//! attempts: `hash_list_root` (fixed-width hex, overwritten in place) and the
//! decimal runs for `time`, `nonce` and `interaction_count`. When a decimal
//! run changes length, the suffix from the next field onward is re-emitted at
//! its shifted position.
//!
//! After every [`update`](PlotHeaderHasher::update) the live buffer prefix is
//! byte-identical to a full re-serialization of the header.
//!
//! Offsets are tied to the header's exact field order and punctuation;
//! re-derive them if the header shape ever changes across protocol versions.

use sha3::{Digest, Sha3_256};
use shared_types::{InteractionId, U256};

use crate::plot::PlotHeader;

const PREVIOUS_LABEL: &[u8] = b"{\"previous\":\"";
const HASH_LIST_ROOT_LABEL: &[u8] = b"\",\"hash_list_root\":\"";
const TIME_LABEL: &[u8] = b"\",\"time\":";
const TARGET_LABEL: &[u8] = b",\"target\":\"";
const THREAD_WORK_LABEL: &[u8] = b"\",\"thread_work\":\"";
const NONCE_LABEL: &[u8] = b"\",\"nonce\":";
const HEIGHT_LABEL: &[u8] = b",\"height\":";
const INTERACTION_COUNT_LABEL: &[u8] = b",\"interaction_count\":";
const END_LABEL: &[u8] = b"}";

/// Incrementally re-hashes JSON-serialized plot headers while scribing.
///
/// Not shareable between workers; each scribing worker owns one instance.
pub struct PlotHeaderHasher {
    // last-seen values of the fields that change per attempt
    previous_hash_list_root: InteractionId,
    previous_time: i64,
    previous_nonce: i64,
    previous_interaction_count: i32,

    // offsets of the mutable runs within the buffer
    hash_list_root_offset: usize,
    time_offset: usize,
    nonce_offset: usize,
    interaction_count_offset: usize,

    // current decimal lengths of the variable-width runs
    time_len: usize,
    nonce_len: usize,
    count_len: usize,

    initialized: bool,
    buf_len: usize,
    buffer: Vec<u8>,
    hasher: Sha3_256,
    hashes_per_attempt: u64,
}

impl PlotHeaderHasher {
    pub fn new() -> Self {
        // worst case: every label, four 64-char hex runs, three signed
        // 64-bit decimals and one signed 32-bit decimal
        let capacity = PREVIOUS_LABEL.len()
            + HASH_LIST_ROOT_LABEL.len()
            + TIME_LABEL.len()
            + TARGET_LABEL.len()
            + THREAD_WORK_LABEL.len()
            + NONCE_LABEL.len()
            + HEIGHT_LABEL.len()
            + INTERACTION_COUNT_LABEL.len()
            + END_LABEL.len()
            + 4 * 64
            + 3 * 20
            + 11;

        Self {
            previous_hash_list_root: InteractionId::default(),
            previous_time: 0,
            previous_nonce: 0,
            previous_interaction_count: 0,
            hash_list_root_offset: 0,
            time_offset: 0,
            nonce_offset: 0,
            interaction_count_offset: 0,
            time_len: 0,
            nonce_len: 0,
            count_len: 0,
            initialized: false,
            buf_len: 0,
            buffer: vec![0u8; capacity],
            hasher: Sha3_256::new(),
            hashes_per_attempt: 1,
        }
    }

    /// Lays the full canonical serialization down once and records where the
    /// mutable runs live.
    fn init_buffer(&mut self, header: &PlotHeader) {
        let mut pos = put_bytes(&mut self.buffer, 0, PREVIOUS_LABEL);
        pos = put_hex(&mut self.buffer, pos, &header.previous.0);

        self.previous_hash_list_root = header.hash_list_root;
        pos = put_bytes(&mut self.buffer, pos, HASH_LIST_ROOT_LABEL);
        self.hash_list_root_offset = pos;
        pos = put_hex(&mut self.buffer, pos, &header.hash_list_root.0);

        self.previous_time = header.time;
        pos = put_bytes(&mut self.buffer, pos, TIME_LABEL);
        self.time_offset = pos;
        self.time_len = put_decimal(&mut self.buffer, pos, header.time);
        pos += self.time_len;

        pos = put_bytes(&mut self.buffer, pos, TARGET_LABEL);
        pos = put_hex(&mut self.buffer, pos, &header.target.0);

        pos = put_bytes(&mut self.buffer, pos, THREAD_WORK_LABEL);
        pos = put_hex(&mut self.buffer, pos, &header.thread_work.0);

        self.previous_nonce = header.nonce;
        pos = put_bytes(&mut self.buffer, pos, NONCE_LABEL);
        self.nonce_offset = pos;
        self.nonce_len = put_decimal(&mut self.buffer, pos, header.nonce);
        pos += self.nonce_len;

        pos = put_bytes(&mut self.buffer, pos, HEIGHT_LABEL);
        pos += put_decimal(&mut self.buffer, pos, header.height);

        self.previous_interaction_count = header.interaction_count;
        pos = put_bytes(&mut self.buffer, pos, INTERACTION_COUNT_LABEL);
        self.interaction_count_offset = pos;
        self.count_len = put_decimal(&mut self.buffer, pos, i64::from(header.interaction_count));
        pos += self.count_len;

        pos = put_bytes(&mut self.buffer, pos, END_LABEL);
        self.buf_len = pos;
        self.initialized = true;
    }

    /// Patches the buffer to match `header` and returns the SHA3-256 of the
    /// live prefix as a 256-bit integer, plus the number of hash attempts
    /// this call accounts for.
    ///
    /// Tracks a single candidate header: `previous` and `height` are assumed
    /// fixed once laid down. Start a fresh hasher for a new candidate.
    pub fn update(&mut self, header: &PlotHeader) -> (U256, u64) {
        if !self.initialized {
            self.init_buffer(header);
        } else {
            if self.previous_hash_list_root != header.hash_list_root {
                self.previous_hash_list_root = header.hash_list_root;
                // fixed width, no shift
                put_hex(
                    &mut self.buffer,
                    self.hash_list_root_offset,
                    &header.hash_list_root.0,
                );
            }

            // net length change of everything patched so far
            let mut delta = 0isize;

            if self.previous_time != header.time {
                self.previous_time = header.time;

                let time_len = put_decimal(&mut self.buffer, self.time_offset, header.time);
                delta = time_len as isize - self.time_len as isize;
                self.time_len = time_len;

                if delta != 0 {
                    // time grew or shrank: re-emit through the nonce label
                    let mut pos = self.time_offset + time_len;
                    pos = put_bytes(&mut self.buffer, pos, TARGET_LABEL);
                    pos = put_hex(&mut self.buffer, pos, &header.target.0);
                    pos = put_bytes(&mut self.buffer, pos, THREAD_WORK_LABEL);
                    pos = put_hex(&mut self.buffer, pos, &header.thread_work.0);
                    put_bytes(&mut self.buffer, pos, NONCE_LABEL);
                }
            }

            if delta != 0 || self.previous_nonce != header.nonce {
                self.previous_nonce = header.nonce;

                // write the new value (or the old value at its new position)
                self.nonce_offset = (self.nonce_offset as isize + delta) as usize;
                let nonce_len = put_decimal(&mut self.buffer, self.nonce_offset, header.nonce);
                delta += nonce_len as isize - self.nonce_len as isize;
                self.nonce_len = nonce_len;

                if delta != 0 {
                    let mut pos = self.nonce_offset + nonce_len;
                    pos = put_bytes(&mut self.buffer, pos, HEIGHT_LABEL);
                    pos += put_decimal(&mut self.buffer, pos, header.height);
                    put_bytes(&mut self.buffer, pos, INTERACTION_COUNT_LABEL);
                }
            }

            if delta != 0 || self.previous_interaction_count != header.interaction_count {
                self.previous_interaction_count = header.interaction_count;

                self.interaction_count_offset =
                    (self.interaction_count_offset as isize + delta) as usize;
                let count_len = put_decimal(
                    &mut self.buffer,
                    self.interaction_count_offset,
                    i64::from(header.interaction_count),
                );
                delta += count_len as isize - self.count_len as isize;
                self.count_len = count_len;

                if delta != 0 {
                    put_bytes(
                        &mut self.buffer,
                        self.interaction_count_offset + count_len,
                        END_LABEL,
                    );
                }
            }

            // often a lot of patching with no net impact on the length
            self.buf_len = (self.buf_len as isize + delta) as usize;
        }

        self.hasher.update(&self.buffer[..self.buf_len]);
        let digest = self.hasher.finalize_reset();
        (U256::from_big_endian(&digest), self.hashes_per_attempt)
    }
}

impl Default for PlotHeaderHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn put_bytes(buffer: &mut [u8], offset: usize, bytes: &[u8]) -> usize {
    buffer[offset..offset + bytes.len()].copy_from_slice(bytes);
    offset + bytes.len()
}

fn put_hex(buffer: &mut [u8], offset: usize, bytes: &[u8; 32]) -> usize {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    for (i, byte) in bytes.iter().enumerate() {
        buffer[offset + i * 2] = DIGITS[(byte >> 4) as usize];
        buffer[offset + i * 2 + 1] = DIGITS[(byte & 0x0f) as usize];
    }
    offset + 64
}

/// Writes `value` in minimal decimal at `offset`, returning the written length.
fn put_decimal(buffer: &mut [u8], offset: usize, value: i64) -> usize {
    let mut scratch = [0u8; 20];
    let mut magnitude = value.unsigned_abs();
    let mut start = scratch.len();
    loop {
        start -= 1;
        scratch[start] = b'0' + (magnitude % 10) as u8;
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }

    let mut len = 0;
    if value < 0 {
        buffer[offset] = b'-';
        len = 1;
    }
    let digits = &scratch[start..];
    buffer[offset + len..offset + len + digits.len()].copy_from_slice(digits);
    len + digits.len()
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use shared_types::constants::MAX_NUMBER;
    use shared_types::PlotId;

    use super::*;

    fn sample_header() -> PlotHeader {
        PlotHeader {
            previous: PlotId([0x11; 32]),
            hash_list_root: InteractionId([0x22; 32]),
            time: 1711304392,
            target: "0000000ffff00000000000000000000000000000000000000000000000000000"
                .parse()
                .unwrap(),
            thread_work: "0000000000000000000000000000000000000000000000000000000010001000"
                .parse()
                .unwrap(),
            nonce: 99,
            height: 7,
            interaction_count: 1,
        }
    }

    fn full_id(header: &PlotHeader) -> U256 {
        let bytes = serde_json::to_vec(header).unwrap();
        U256::from_big_endian(&Sha3_256::digest(&bytes))
    }

    fn assert_matches_full(hasher: &mut PlotHeaderHasher, header: &PlotHeader) {
        let (fast, attempts) = hasher.update(header);
        assert_eq!(attempts, 1);
        assert_eq!(fast, full_id(header), "differential hash diverged");
        assert_eq!(
            &hasher.buffer[..hasher.buf_len],
            serde_json::to_vec(header).unwrap().as_slice(),
            "buffer prefix diverged from canonical serialization"
        );
    }

    #[test]
    fn test_initial_update_matches_full_serialization() {
        let header = sample_header();
        let mut hasher = PlotHeaderHasher::new();
        assert_matches_full(&mut hasher, &header);
    }

    #[test]
    fn test_nonce_scan_across_length_boundary() {
        let mut header = sample_header();
        let mut hasher = PlotHeaderHasher::new();
        // 97..=103 crosses the 2-digit/3-digit boundary
        for nonce in 97..=103 {
            header.nonce = nonce;
            assert_matches_full(&mut hasher, &header);
        }
        // and far out to the widest the protocol allows
        header.nonce = MAX_NUMBER - 1;
        assert_matches_full(&mut hasher, &header);
        header.nonce = 0;
        assert_matches_full(&mut hasher, &header);
    }

    #[test]
    fn test_time_shift_re_emits_suffix() {
        let mut header = sample_header();
        let mut hasher = PlotHeaderHasher::new();
        assert_matches_full(&mut hasher, &header);

        // same length
        header.time += 1;
        assert_matches_full(&mut hasher, &header);

        // shrink to one digit, grow back
        header.time = 5;
        assert_matches_full(&mut hasher, &header);
        header.time = 9_999_999_999;
        assert_matches_full(&mut hasher, &header);
    }

    #[test]
    fn test_offsetting_time_and_nonce_length_changes() {
        let mut header = sample_header();
        header.time = 100; // 3 digits
        header.nonce = 1000; // 4 digits
        let mut hasher = PlotHeaderHasher::new();
        assert_matches_full(&mut hasher, &header);

        // time grows a digit while nonce shrinks one: net zero shift
        header.time = 1000;
        header.nonce = 100;
        assert_matches_full(&mut hasher, &header);
    }

    #[test]
    fn test_hash_list_root_overwrite() {
        let mut header = sample_header();
        let mut hasher = PlotHeaderHasher::new();
        assert_matches_full(&mut hasher, &header);

        header.hash_list_root = InteractionId([0xab; 32]);
        assert_matches_full(&mut hasher, &header);
    }

    #[test]
    fn test_interaction_count_growth_moves_footer() {
        let mut header = sample_header();
        let mut hasher = PlotHeaderHasher::new();
        assert_matches_full(&mut hasher, &header);

        for count in [9, 10, 100, 99, 7] {
            header.interaction_count = count;
            assert_matches_full(&mut hasher, &header);
        }
    }

    #[test]
    fn test_randomized_mutation_sequences() {
        let mut rng = rand::thread_rng();
        let mut header = sample_header();
        let mut hasher = PlotHeaderHasher::new();

        for _ in 0..500 {
            match rng.gen_range(0..10) {
                0 => header.time = rng.gen_range(0..=i64::from(u32::MAX)),
                1 => header.hash_list_root = InteractionId(rng.gen()),
                2 => header.interaction_count = rng.gen_range(0..10_000),
                _ => header.nonce = rng.gen_range(0..MAX_NUMBER),
            }
            assert_matches_full(&mut hasher, &header);
        }
    }
}
