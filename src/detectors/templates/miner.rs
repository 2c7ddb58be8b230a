//! Common-substring mining across the members of a cluster.
//!
//! The search base is the shortest sequence. Every substring of a common
//! substring is itself common, so for each start position of the base the
//! common candidates form one contiguous range of lengths. The miner finds the
//! end of that range by extending from the previous start's reach, which yields
//! exactly the brute-force candidate set with O(B) membership checks instead of
//! O(B^2). Each check is still a scan of every sequence, and emitting all
//! candidates is O(B^2) strings; `max_base_length` caps B for large inputs.

use ahash::AHashSet;
use tracing::trace;

/// Finds substrings shared by every sequence of a cluster.
#[derive(Debug, Clone)]
pub struct SubstringMiner {
    min_length: usize,
    max_base_length: Option<usize>,
}

impl SubstringMiner {
    /// Create a miner reporting substrings of at least `min_length` characters
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length: min_length.max(1),
            max_base_length: None,
        }
    }

    /// Only search the first `max_base_length` characters of the base
    pub fn with_max_base_length(mut self, max_base_length: Option<usize>) -> Self {
        self.max_base_length = max_base_length;
        self
    }

    /// Minimum reported length
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// All common substrings, longest first, ties in base order
    pub fn common_substrings<S: AsRef<str>>(&self, sequences: &[S]) -> Vec<String> {
        self.mine(sequences, None)
    }

    /// The first `limit` entries of [`Self::common_substrings`]
    pub fn top_common_substrings<S: AsRef<str>>(&self, sequences: &[S], limit: usize) -> Vec<String> {
        self.mine(sequences, Some(limit))
    }

    fn mine<S: AsRef<str>>(&self, sequences: &[S], limit: Option<usize>) -> Vec<String> {
        if limit == Some(0) {
            return Vec::new();
        }
        let Some((base_index, base)) = sequences
            .iter()
            .map(AsRef::as_ref)
            .enumerate()
            .min_by_key(|(_, sequence)| sequence.chars().count())
        else {
            return Vec::new();
        };

        // Byte offset of every character boundary in the base, end included.
        let mut bounds: Vec<usize> = base.char_indices().map(|(offset, _)| offset).collect();
        bounds.push(base.len());
        if let Some(cap) = self.max_base_length {
            bounds.truncate(cap + 1);
        }
        let base_chars = bounds.len() - 1;
        if base_chars < self.min_length {
            return Vec::new();
        }

        let others: Vec<&str> = sequences
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != base_index)
            .map(|(_, sequence)| sequence.as_ref())
            .collect();
        let is_common = |start: usize, length: usize| {
            let candidate = &base[bounds[start]..bounds[start + length]];
            others.iter().all(|other| other.contains(candidate))
        };

        // reach[s]: longest common substring starting at character s.
        let mut reach = vec![0usize; base_chars];
        let mut carried = 0usize;
        for (start, slot) in reach.iter_mut().enumerate() {
            let mut length = carried.saturating_sub(1);
            while start + length < base_chars && is_common(start, length + 1) {
                length += 1;
            }
            *slot = length;
            carried = length;
        }

        let longest = reach.iter().copied().max().unwrap_or(0);
        trace!(base_chars, longest, sequences = sequences.len(), "Mined common reach");

        let mut seen = AHashSet::new();
        let mut found = Vec::new();
        for length in (self.min_length..=longest).rev() {
            for (start, &max_length) in reach.iter().enumerate() {
                if max_length < length {
                    continue;
                }
                let candidate = &base[bounds[start]..bounds[start + length]];
                if seen.insert(candidate) {
                    found.push(candidate.to_string());
                    if limit.is_some_and(|limit| found.len() >= limit) {
                        return found;
                    }
                }
            }
        }

        found
    }
}

/// Substrings of length >= `min_length` present in every sequence, longest first.
pub fn common_substrings<S: AsRef<str>>(sequences: &[S], min_length: usize) -> Vec<String> {
    SubstringMiner::new(min_length).common_substrings(sequences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Reference enumeration straight from the definition.
    fn brute_force(sequences: &[&str], min_length: usize) -> Vec<String> {
        let Some(base) = sequences.iter().min_by_key(|s| s.chars().count()) else {
            return Vec::new();
        };
        let chars: Vec<char> = base.chars().collect();
        let mut found: Vec<(usize, usize, String)> = Vec::new();
        for length in min_length..=chars.len() {
            for start in 0..=(chars.len() - length) {
                let candidate: String = chars[start..start + length].iter().collect();
                if sequences.iter().all(|s| s.contains(&candidate))
                    && !found.iter().any(|(_, _, existing)| *existing == candidate)
                {
                    found.push((length, start, candidate));
                }
            }
        }
        found.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        found.into_iter().map(|(_, _, s)| s).collect()
    }

    #[test]
    fn test_shared_substring_found_in_pair() {
        let sequences = ["xxifreturnyy", "zzzifreturnq"];
        let found = common_substrings(&sequences, 5);
        assert_eq!(found[0], "ifreturn");
        assert!(found.iter().all(|s| s.chars().count() >= 5));
    }

    #[test]
    fn test_no_shared_substring_across_three() {
        let sequences = ["xxifreturnyy", "zzzifreturnq", "whilepassbreak"];
        assert!(common_substrings(&sequences, 5).is_empty());
    }

    #[test]
    fn test_ordering_longest_first_then_base_order() {
        let found = common_substrings(&["abcXdef", "defabcXX"], 3);
        assert_eq!(found, vec!["abcX", "abc", "bcX", "def"]);
    }

    #[test]
    fn test_duplicates_reported_once() {
        let found = common_substrings(&["abcabc", "zabcz"], 3);
        assert_eq!(found, vec!["abc"]);
    }

    #[test]
    fn test_empty_and_single_member_clusters() {
        let empty: [&str; 0] = [];
        assert!(common_substrings(&empty, 3).is_empty());

        let single = common_substrings(&["abcd"], 3);
        assert_eq!(single, vec!["abcd", "abc", "bcd"]);
    }

    #[test]
    fn test_top_limits_output() {
        let miner = SubstringMiner::new(2);
        let top = miner.top_common_substrings(&["abcdef", "abcdef"], 2);
        assert_eq!(top, vec!["abcdef", "abcde"]);
        assert!(miner.top_common_substrings(&["abcdef"], 0).is_empty());
    }

    #[test]
    fn test_base_length_cap() {
        let miner = SubstringMiner::new(3).with_max_base_length(Some(4));
        let found = miner.common_substrings(&["abcdefgh", "abcdefgh"]);
        assert_eq!(found, vec!["abcd", "abc", "bcd"]);
    }

    #[test]
    fn test_unicode_boundaries() {
        let found = common_substrings(&["αβγδ", "xαβγy"], 2);
        assert_eq!(found, vec!["αβγ", "αβ", "βγ"]);
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(
            sequences in prop::collection::vec("[abc]{0,12}", 1..4),
            min_length in 1usize..4,
        ) {
            let refs: Vec<&str> = sequences.iter().map(String::as_str).collect();
            prop_assert_eq!(common_substrings(&refs, min_length), brute_force(&refs, min_length));
        }

        #[test]
        fn prop_results_are_long_enough_and_common(
            sequences in prop::collection::vec("[ab()=:]{0,16}", 1..5),
            min_length in 1usize..5,
        ) {
            for found in common_substrings(&sequences, min_length) {
                prop_assert!(found.chars().count() >= min_length);
                for sequence in &sequences {
                    prop_assert!(sequence.contains(&found));
                }
            }
        }
    }
}
