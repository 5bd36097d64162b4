use rand::Rng;
use thiserror::Error;

use crate::core::{Pairer, PairingError};
use crate::models::PairingRound;
use crate::services::{Announcer, HistoryError, HistoryProvider, RosterProvider};

/// Errors that can abort a scheduled round
#[derive(Debug, Error)]
pub enum RoundError {
    #[error("Pairing error: {0}")]
    Pairing(#[from] PairingError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),
}

/// One scheduled invocation: collaborators plus the pairing engine.
///
/// The roster and history supply sides never fail into the run; the store's
/// record side and the engine's input validation do. Invocations are
/// independent of each other apart from the store append.
pub struct RoundRunner<R, H, A>
where
    R: RosterProvider,
    H: HistoryProvider,
    A: Announcer,
{
    roster: R,
    history: H,
    announcer: A,
    pairer: Pairer,
}

impl<R, H, A> RoundRunner<R, H, A>
where
    R: RosterProvider,
    H: HistoryProvider,
    A: Announcer,
{
    pub fn new(roster: R, history: H, announcer: A, pairer: Pairer) -> Self {
        Self {
            roster,
            history,
            announcer,
            pairer,
        }
    }

    /// Run one complete round: fetch the roster and recent history, generate
    /// the matching, record it, announce it.
    ///
    /// An empty roster short-circuits to an empty round. A non-empty round is
    /// recorded before it is announced, so the next invocation's exclusions
    /// can never miss an announced round.
    pub fn run_round<G: Rng + ?Sized>(&mut self, rng: &mut G) -> Result<PairingRound, RoundError> {
        let members = self.roster.get_members();
        if members.is_empty() {
            tracing::info!("Roster is empty, nothing to pair");
            return Ok(PairingRound::default());
        }

        tracing::info!("Pairing {} members", members.len());

        let history = self.history.get_recent_rounds();
        match &history {
            Some(rounds) => tracing::debug!("Considering {} recent rounds", rounds.len()),
            None => tracing::debug!("No recent history, pairing unconstrained"),
        }

        let pairs = self
            .pairer
            .generate_pairs_with(&members, history.as_deref(), rng)?;
        let round = PairingRound::new(pairs);

        if !round.is_empty() {
            self.history.record_round(&round)?;
        }
        self.announcer.announce(&round);

        tracing::info!("Generated {} pairs", round.len());
        Ok(round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SingletonPolicy;
    use crate::services::StaticRoster;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Announcer fake that remembers every delivered round
    #[derive(Default, Clone)]
    struct RecordingAnnouncer {
        announced: Rc<RefCell<Vec<PairingRound>>>,
    }

    impl Announcer for RecordingAnnouncer {
        fn announce(&self, round: &PairingRound) {
            self.announced.borrow_mut().push(round.clone());
        }
    }

    /// History fake with a shared handle so tests can inspect the store
    /// after the runner takes ownership
    #[derive(Default, Clone)]
    struct MemoryHistory {
        rounds: Rc<RefCell<Vec<PairingRound>>>,
    }

    impl HistoryProvider for MemoryHistory {
        fn get_recent_rounds(&self) -> Option<Vec<PairingRound>> {
            let rounds = self.rounds.borrow();
            if rounds.is_empty() {
                None
            } else {
                Some(rounds.clone())
            }
        }

        fn record_round(&mut self, round: &PairingRound) -> Result<(), HistoryError> {
            self.rounds.borrow_mut().push(round.clone());
            Ok(())
        }
    }

    fn roster(ids: &[&str]) -> StaticRoster {
        StaticRoster::new(ids.iter().map(|id| id.to_string()).collect())
    }

    #[test]
    fn test_run_round_records_and_announces() {
        let history = MemoryHistory::default();
        let announcer = RecordingAnnouncer::default();
        let mut runner = RoundRunner::new(
            roster(&["alice", "bob", "carol", "dave"]),
            history.clone(),
            announcer.clone(),
            Pairer::with_default_policy(),
        );

        let round = runner
            .run_round(&mut ChaCha8Rng::seed_from_u64(11))
            .unwrap();

        assert_eq!(round.len(), 2);
        assert_eq!(history.rounds.borrow().as_slice(), &[round.clone()]);
        assert_eq!(announcer.announced.borrow().as_slice(), &[round]);
    }

    #[test]
    fn test_empty_roster_short_circuits() {
        let history = MemoryHistory::default();
        let announcer = RecordingAnnouncer::default();
        let mut runner = RoundRunner::new(
            roster(&[]),
            history.clone(),
            announcer.clone(),
            Pairer::with_default_policy(),
        );

        let round = runner.run_round(&mut ChaCha8Rng::seed_from_u64(0)).unwrap();

        assert!(round.is_empty());
        assert!(history.rounds.borrow().is_empty());
        assert!(announcer.announced.borrow().is_empty());
    }

    #[test]
    fn test_consecutive_rounds_avoid_repeats_when_feasible() {
        let history = MemoryHistory::default();
        let mut runner = RoundRunner::new(
            roster(&["alice", "bob", "carol", "dave"]),
            history.clone(),
            RecordingAnnouncer::default(),
            Pairer::with_default_policy(),
        );

        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let first = runner.run_round(&mut rng).unwrap();
        let second = runner.run_round(&mut rng).unwrap();

        for pair in &second.pairs {
            assert!(
                !first.contains_pairing(&pair.first, &pair.second),
                "repeat pairing {:?}",
                pair
            );
        }
        assert_eq!(history.rounds.borrow().len(), 2);
    }

    #[test]
    fn test_singleton_skip_policy_announces_empty_round() {
        let history = MemoryHistory::default();
        let announcer = RecordingAnnouncer::default();
        let mut runner = RoundRunner::new(
            roster(&["alice"]),
            history.clone(),
            announcer.clone(),
            Pairer::new(SingletonPolicy::Skip),
        );

        let round = runner.run_round(&mut ChaCha8Rng::seed_from_u64(0)).unwrap();

        assert!(round.is_empty());
        // Nothing worth remembering, but the announcer still sees the run.
        assert!(history.rounds.borrow().is_empty());
        assert_eq!(announcer.announced.borrow().len(), 1);
    }

    #[test]
    fn test_blank_member_id_aborts_before_any_side_effect() {
        let history = MemoryHistory::default();
        let announcer = RecordingAnnouncer::default();
        let mut runner = RoundRunner::new(
            roster(&["alice", "  "]),
            history.clone(),
            announcer.clone(),
            Pairer::with_default_policy(),
        );

        let err = runner
            .run_round(&mut ChaCha8Rng::seed_from_u64(0))
            .unwrap_err();

        assert!(matches!(err, RoundError::Pairing(PairingError::InvalidInput(_))));
        assert!(history.rounds.borrow().is_empty());
        assert!(announcer.announced.borrow().is_empty());
    }
}
