use std::collections::{HashMap, HashSet};

use crate::models::{Member, PairingRound};

/// Per-member set of previously matched partners, derived from historical
/// rounds.
///
/// Built once per invocation so the pairing loop never recomputes exclusions
/// mid-run; discarded afterwards, never persisted.
#[derive(Debug, Clone, Default)]
pub struct ExclusionIndex {
    partners: HashMap<Member, HashSet<Member>>,
}

impl ExclusionIndex {
    /// Build the index from historical rounds.
    ///
    /// Membership is unordered: when a member appears as either element of a
    /// historical pair, the other element lands in its exclusion set. A
    /// recorded self-pair puts the member in its own set.
    pub fn from_rounds(rounds: &[PairingRound]) -> Self {
        let mut partners: HashMap<Member, HashSet<Member>> = HashMap::new();

        for round in rounds {
            for pair in &round.pairs {
                partners
                    .entry(pair.first.clone())
                    .or_default()
                    .insert(pair.second.clone());
                partners
                    .entry(pair.second.clone())
                    .or_default()
                    .insert(pair.first.clone());
            }
        }

        Self { partners }
    }

    /// Previous partners of a member, if any are recorded
    pub fn partners_of(&self, member: &str) -> Option<&HashSet<Member>> {
        self.partners.get(member)
    }

    /// Whether two members were matched in any historical round
    #[inline]
    pub fn were_paired(&self, a: &str, b: &str) -> bool {
        self.partners.get(a).map_or(false, |set| set.contains(b))
    }

    /// Number of members with at least one recorded partner
    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pair;

    fn round(pairs: &[(&str, &str)]) -> PairingRound {
        PairingRound::new(
            pairs
                .iter()
                .map(|(a, b)| Pair::new(a.to_string(), b.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_membership_is_unordered() {
        let index = ExclusionIndex::from_rounds(&[round(&[("alice", "bob")])]);

        assert!(index.were_paired("alice", "bob"));
        assert!(index.were_paired("bob", "alice"));
        assert!(!index.were_paired("alice", "carol"));
    }

    #[test]
    fn test_partners_accumulate_across_rounds() {
        let history = vec![
            round(&[("alice", "bob"), ("carol", "dave")]),
            round(&[("alice", "carol"), ("bob", "dave")]),
        ];
        let index = ExclusionIndex::from_rounds(&history);

        let partners = index.partners_of("alice").unwrap();
        assert_eq!(partners.len(), 2);
        assert!(partners.contains("bob"));
        assert!(partners.contains("carol"));
    }

    #[test]
    fn test_repeated_pairings_deduplicate() {
        let history = vec![round(&[("alice", "bob")]), round(&[("bob", "alice")])];
        let index = ExclusionIndex::from_rounds(&history);

        assert_eq!(index.partners_of("alice").unwrap().len(), 1);
        assert_eq!(index.partners_of("bob").unwrap().len(), 1);
    }

    #[test]
    fn test_empty_history_excludes_nothing() {
        let index = ExclusionIndex::from_rounds(&[]);

        assert!(index.is_empty());
        assert!(!index.were_paired("alice", "bob"));
        assert!(index.partners_of("alice").is_none());
    }

    #[test]
    fn test_recorded_self_pair_lands_in_own_set() {
        let index = ExclusionIndex::from_rounds(&[round(&[("alice", "alice")])]);

        assert!(index.were_paired("alice", "alice"));
        assert_eq!(index.partners_of("alice").unwrap().len(), 1);
    }

    #[test]
    fn test_len_counts_indexed_members() {
        let index = ExclusionIndex::from_rounds(&[round(&[("alice", "bob"), ("carol", "dave")])]);

        assert_eq!(index.len(), 4);
    }
}
