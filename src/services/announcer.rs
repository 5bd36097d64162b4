use crate::models::PairingRound;

/// Accepts a finished round for delivery.
///
/// The announcer owns formatting and fan-out. Failures must not roll back
/// the already-computed matching: implementations log partial delivery
/// problems instead of raising them.
pub trait Announcer {
    fn announce(&self, round: &PairingRound);
}

/// Writes the round to standard output as a numbered pair list
#[derive(Debug, Clone)]
pub struct ConsoleAnnouncer {
    lookback_days: u32,
}

impl ConsoleAnnouncer {
    pub fn new(lookback_days: u32) -> Self {
        Self { lookback_days }
    }

    /// Render the round as a numbered list with a closing note about the
    /// odd-member rule and the lookback window. `None` for an empty round.
    pub fn format_round(&self, round: &PairingRound) -> Option<String> {
        if round.is_empty() {
            return None;
        }

        let mut message = String::from("Coffee pairs for this round:\n");
        for (i, pair) in round.pairs.iter().enumerate() {
            message.push_str(&format!(" {}. {} and {}\n", i + 1, pair.first, pair.second));
        }
        message.push_str(&format!(
            "An odd number of members gives one person two coffee matches. \
             Pairings from the last {} days were avoided where possible.",
            self.lookback_days
        ));

        Some(message)
    }
}

impl Announcer for ConsoleAnnouncer {
    fn announce(&self, round: &PairingRound) {
        match self.format_round(round) {
            Some(message) => {
                println!("{}", message);
                tracing::info!("Announced {} pairs", round.len());
            }
            None => {
                tracing::info!("Empty round, nothing to announce");
            }
        }
    }
}
