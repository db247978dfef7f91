//! Character hashing for WtP inputs.
//!
//! WtP models embed characters through several hash buckets instead of a
//! vocabulary: each code point is mapped to `NUM_HASHES` bucket ids.

pub(crate) const NUM_HASHES: usize = 8;
pub(crate) const NUM_BUCKETS: i64 = 8192;

const PRIMES: [i64; NUM_HASHES] = [31, 43, 59, 61, 73, 97, 103, 113];

/// Hash code points into a flat `[len, NUM_HASHES]` row-major id buffer.
pub(crate) fn hash_encode(codes: &[u32]) -> Vec<i64> {
    let mut ids = Vec::with_capacity(codes.len() * NUM_HASHES);
    for &code in codes {
        let shifted = code as i64 + 1;
        ids.extend(PRIMES.iter().map(|prime| (shifted * prime) % NUM_BUCKETS));
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_shape() {
        let ids = hash_encode(&['a' as u32, 'b' as u32, '\n' as u32]);
        assert_eq!(ids.len(), 3 * NUM_HASHES);
        assert!(ids.iter().all(|&id| (0..NUM_BUCKETS).contains(&id)));
    }

    #[test]
    fn test_hash_values() {
        // 'a' is 97, so every bucket is 98 * prime mod 8192
        let ids = hash_encode(&['a' as u32]);
        assert_eq!(ids[0], 98 * 31);
        assert_eq!(ids[1], 98 * 43);
        assert_eq!(ids[7], (98 * 113) % NUM_BUCKETS);
    }

    #[test]
    fn test_wide_code_points_stay_in_range() {
        let ids = hash_encode(&['😀' as u32]);
        assert!(ids.iter().all(|&id| (0..NUM_BUCKETS).contains(&id)));
    }
}
