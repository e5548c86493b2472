//! Badge awarding rules.

use shadow_ranch_core::{
    badges, challenge_badge, BadgeId, ProgressState, Track, TrackConfig, WalletSession,
};

/// Decides which badges a learner has earned from their progress on one
/// track and their wallet state.
#[derive(Debug, Clone, Copy)]
pub struct BadgeAwarder {
    track: Track,
    config: TrackConfig,
}

impl BadgeAwarder {
    /// Create an awarder for a track and the configuration its store uses.
    pub fn new(track: Track, config: TrackConfig) -> Self {
        Self { track, config }
    }

    /// Awarder using the track's default configuration.
    pub fn for_track(track: Track) -> Self {
        Self::new(track, track.default_config())
    }

    /// Every badge the current state qualifies for.
    ///
    /// Already-unlocked badges are included; unlocking is idempotent on
    /// the profile side.
    pub fn earned(&self, state: &ProgressState, wallet: &WalletSession) -> Vec<BadgeId> {
        let mut earned = Vec::new();
        let completed = state.completed_count();
        let track_complete = completed >= self.config.denominator() as usize;

        if completed >= 1 {
            earned.push(BadgeId::new(badges::FIRST_LESSON));
        }

        match self.track {
            Track::CypherpunkLegacy => {
                if track_complete {
                    earned.push(BadgeId::new(badges::CYPHERPUNK_INITIATE));
                }
            }
            Track::SolanaChallenges => {
                earned.extend(
                    state
                        .modules
                        .iter()
                        .filter(|m| m.is_completed)
                        .filter_map(|m| challenge_badge(m.id))
                        .map(|badge| badge.id),
                );
                if track_complete {
                    earned.push(BadgeId::new(badges::CODE_SLINGER));
                }
            }
        }

        if wallet.profile_key().is_some() {
            earned.push(BadgeId::new(badges::WALLET_CONNECTED));
        }

        earned
    }
}

impl Default for BadgeAwarder {
    fn default() -> Self {
        Self::for_track(Track::CypherpunkLegacy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(track: Track, completed: usize) -> ProgressState {
        let mut state = ProgressState::fresh(&track.catalog());
        for module in state.modules.iter_mut().take(completed) {
            module.is_unlocked = true;
            module.is_completed = true;
        }
        state
    }

    #[test]
    fn test_nothing_earned_on_fresh_state() {
        let awarder = BadgeAwarder::default();
        let state = state_with(Track::CypherpunkLegacy, 0);
        assert!(awarder.earned(&state, &WalletSession::default()).is_empty());
    }

    #[test]
    fn test_first_lesson_and_initiate() {
        let awarder = BadgeAwarder::default();
        let wallet = WalletSession::default();

        assert_eq!(
            awarder.earned(&state_with(Track::CypherpunkLegacy, 1), &wallet),
            vec![BadgeId::new(badges::FIRST_LESSON)]
        );
        assert_eq!(
            awarder.earned(&state_with(Track::CypherpunkLegacy, 4), &wallet),
            vec![
                BadgeId::new(badges::FIRST_LESSON),
                BadgeId::new(badges::CYPHERPUNK_INITIATE),
            ]
        );
    }

    #[test]
    fn test_wallet_badge_needs_connection() {
        let awarder = BadgeAwarder::default();
        let state = state_with(Track::CypherpunkLegacy, 0);
        let earned = awarder.earned(&state, &WalletSession::connected("AliceWallet111"));
        assert_eq!(earned, vec![BadgeId::new(badges::WALLET_CONNECTED)]);
    }

    #[test]
    fn test_each_passed_challenge_earns_its_badge() {
        let awarder = BadgeAwarder::for_track(Track::SolanaChallenges);
        let earned = awarder.earned(&state_with(Track::SolanaChallenges, 2), &WalletSession::default());
        assert_eq!(
            earned,
            vec![
                BadgeId::new(badges::FIRST_LESSON),
                BadgeId::new("the-architect"),
                BadgeId::new("first-contact"),
            ]
        );
    }

    #[test]
    fn test_all_challenges_earn_code_slinger() {
        let awarder = BadgeAwarder::for_track(Track::SolanaChallenges);
        let earned = awarder.earned(&state_with(Track::SolanaChallenges, 10), &WalletSession::default());
        assert_eq!(earned.len(), 12);
        assert!(earned.contains(&BadgeId::new("the-debugger")));
        assert!(earned.contains(&BadgeId::new(badges::CODE_SLINGER)));
        assert!(!earned.contains(&BadgeId::new(badges::CYPHERPUNK_INITIATE)));
    }
}
