use serde::{Deserialize, Serialize};

/// Opaque participant identifier. Equality is exact string match; the pairing
/// engine attaches no ordering semantics to it.
pub type Member = String;

/// An unordered pairing of two members for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub first: Member,
    pub second: Member,
}

impl Pair {
    pub fn new(first: Member, second: Member) -> Self {
        Self { first, second }
    }

    /// Helper to check whether a member occupies either slot
    pub fn contains(&self, member: &str) -> bool {
        self.first == member || self.second == member
    }

    /// The other member of the pair, if the given member occupies a slot
    pub fn partner_of(&self, member: &str) -> Option<&Member> {
        if self.first == member {
            Some(&self.second)
        } else if self.second == member {
            Some(&self.first)
        } else {
            None
        }
    }

    /// True when both slots hold the same member
    pub fn is_self_pair(&self) -> bool {
        self.first == self.second
    }

    /// Order-insensitive equality on the two member slots
    pub fn same_members(&self, other: &Pair) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

/// The pairs produced by one invocation, in the order they were formed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRound {
    pub pairs: Vec<Pair>,
}

impl PairingRound {
    pub fn new(pairs: Vec<Pair>) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Helper to check whether two members were paired in this round,
    /// regardless of slot order
    pub fn contains_pairing(&self, a: &str, b: &str) -> bool {
        self.pairs
            .iter()
            .any(|p| (p.first == a && p.second == b) || (p.first == b && p.second == a))
    }

    /// Number of pair slots a member occupies across the round. The member
    /// absorbed as the odd-one-out occupies one slot in each of two pairs.
    pub fn occurrences(&self, member: &str) -> usize {
        self.pairs
            .iter()
            .map(|p| (p.first == member) as usize + (p.second == member) as usize)
            .sum()
    }

    /// All pair slots in formation order
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.pairs.iter().flat_map(|p| [&p.first, &p.second])
    }
}
