//! Derivation of a post's content directory name from its database id.

/// Decimal representation of `id`, left-padded with zeros to a minimum width
/// of four characters. Ids beyond 9999 keep their natural width.
///
/// The result names the post's directory on disk and its public content path
/// segment, and is never recomputed once stored.
pub fn directory_name(id: i64) -> String {
    format!("{id:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_below_ten_thousand() {
        assert_eq!(directory_name(1), "0001");
        assert_eq!(directory_name(42), "0042");
        assert_eq!(directory_name(999), "0999");
        assert_eq!(directory_name(9999), "9999");
    }

    #[test]
    fn wide_ids_are_not_truncated() {
        assert_eq!(directory_name(10000), "10000");
        assert_eq!(directory_name(123456789), "123456789");
    }

    #[test]
    fn round_trips_back_to_the_id() {
        for id in [1i64, 7, 100, 9999, 10000, 31337] {
            let name = directory_name(id);
            assert_eq!(name.parse::<i64>().unwrap(), id);
            assert!(name.len() >= 4);
        }
    }
}
