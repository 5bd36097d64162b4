use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::exclusions::ExclusionIndex;
use crate::models::{Member, Pair, PairingRound};

/// Errors raised at the pairing engine's input-validation boundary
#[derive(Debug, Error)]
pub enum PairingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Behavior for a roster containing exactly one member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SingletonPolicy {
    /// Pair the sole member with themself
    #[default]
    SelfPair,
    /// Produce an empty round
    Skip,
}

/// The pairing engine - produces a constrained-random matching
///
/// # Pipeline Stages
/// 1. Build the exclusion index from historical rounds
/// 2. Uniformly shuffle a working copy of the roster
/// 3. Record the odd-one-out candidate (the first member the loop draws)
/// 4. Repeatedly pair a lead with a partner drawn from the
///    exclusion-filtered remainder, falling back to the full remainder
///
/// Pure computation: no I/O, no state shared between invocations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pairer {
    singleton_policy: SingletonPolicy,
}

impl Pairer {
    pub fn new(singleton_policy: SingletonPolicy) -> Self {
        Self { singleton_policy }
    }

    pub fn with_default_policy() -> Self {
        Self {
            singleton_policy: SingletonPolicy::default(),
        }
    }

    pub fn singleton_policy(&self) -> SingletonPolicy {
        self.singleton_policy
    }

    /// Generate pairs using the thread-local RNG
    pub fn generate_pairs(
        &self,
        members: &[Member],
        history: Option<&[PairingRound]>,
    ) -> Result<Vec<Pair>, PairingError> {
        self.generate_pairs_with(members, history, &mut rand::thread_rng())
    }

    /// Generate a new round of pairs from the roster and prior rounds.
    ///
    /// Exclusion is a hard filter with graceful degradation: when every
    /// remaining candidate is a historical match, the draw falls back to the
    /// full remaining list rather than failing, so a complete matching is
    /// always produced. On an odd roster the first-drawn member absorbs a
    /// second pairing.
    ///
    /// # Arguments
    /// * `members` - The current roster; duplicates are treated as distinct
    ///   slots
    /// * `history` - Prior rounds used to discourage repeat matches; `None`
    ///   applies no constraints
    /// * `rng` - Randomness source; seed it for deterministic output
    ///
    /// # Returns
    /// The pairs in the order they were formed
    pub fn generate_pairs_with<R: Rng + ?Sized>(
        &self,
        members: &[Member],
        history: Option<&[PairingRound]>,
        rng: &mut R,
    ) -> Result<Vec<Pair>, PairingError> {
        validate_members(members)?;

        // Stage 1: exclusion index, built once per invocation
        let exclusions = history.map(ExclusionIndex::from_rounds).unwrap_or_default();

        // Stage 2: randomized working copy, consumed from the back
        let mut pool: Vec<Member> = members.to_vec();
        pool.shuffle(rng);

        // Stage 3: the member the loop draws first doubles as the
        // odd-one-out absorber
        let odd_one_out = match pool.last() {
            Some(member) => member.clone(),
            None => return Ok(Vec::new()),
        };

        if pool.len() == 1 {
            return Ok(match self.singleton_policy {
                SingletonPolicy::SelfPair => {
                    vec![Pair::new(odd_one_out.clone(), odd_one_out)]
                }
                SingletonPolicy::Skip => Vec::new(),
            });
        }

        // Stage 4: consume the pool
        let mut pairs = Vec::with_capacity(pool.len() / 2 + 1);

        while pool.len() >= 2 {
            if let Some(lead) = pool.pop() {
                let partner = draw_partner(&lead, &mut pool, &exclusions, rng);
                pairs.push(Pair::new(lead, partner));
            }
        }

        // Odd roster: the leftover pairs with the odd-one-out candidate
        // through the same draw path (singleton candidate set, forced).
        if !pool.is_empty() {
            let partner = draw_partner(&odd_one_out, &mut pool, &exclusions, rng);
            pairs.push(Pair::new(odd_one_out, partner));
        }

        Ok(pairs)
    }
}

/// Draw a partner for `lead` uniformly from the exclusion-filtered pool,
/// falling back to the full pool when every remaining member is a historical
/// match. A repeat pairing is preferable to failing the round.
///
/// The pool is non-empty at both call sites.
fn draw_partner<R: Rng + ?Sized>(
    lead: &str,
    pool: &mut Vec<Member>,
    exclusions: &ExclusionIndex,
    rng: &mut R,
) -> Member {
    let fresh: Vec<usize> = pool
        .iter()
        .enumerate()
        .filter(|(_, candidate)| !exclusions.were_paired(lead, candidate))
        .map(|(i, _)| i)
        .collect();

    let chosen = if fresh.is_empty() {
        rng.gen_range(0..pool.len())
    } else {
        fresh[rng.gen_range(0..fresh.len())]
    };

    pool.swap_remove(chosen)
}

fn validate_members(members: &[Member]) -> Result<(), PairingError> {
    if members.iter().any(|m| m.trim().is_empty()) {
        return Err(PairingError::InvalidInput(
            "member identifiers must be non-blank".to_string(),
        ));
    }
    Ok(())
}
