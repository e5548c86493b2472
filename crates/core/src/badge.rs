//! Achievement badges awarded to learner profiles.

use serde::{Deserialize, Serialize};
use crate::id::{BadgeId, ModuleId};
use crate::Time;

/// An achievement badge, minted as an NFT once unlocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftBadge {
    /// Unique identifier
    pub id: BadgeId,

    /// Display name
    pub name: String,

    /// What earns the badge
    pub description: String,

    /// Artwork location
    pub image_url: String,

    /// Whether the learner earned it
    pub unlocked: bool,

    /// When it was earned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<Time>,

    /// Rarity tier
    pub rarity: Rarity,
}

impl NftBadge {
    fn locked(id: &str, name: &str, description: &str, rarity: Rarity) -> Self {
        Self {
            id: BadgeId::new(id),
            name: name.to_string(),
            description: description.to_string(),
            image_url: format!("/badges/{}.svg", id),
            unlocked: false,
            unlocked_at: None,
            rarity,
        }
    }

    /// Mark as earned. Returns false if it was already unlocked; the
    /// original timestamp is kept.
    pub fn unlock(&mut self, at: Time) -> bool {
        if self.unlocked {
            return false;
        }
        self.unlocked = true;
        self.unlocked_at = Some(at);
        true
    }
}

/// Badge rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Most learners earn it
    Common,
    /// Takes some dedication
    Uncommon,
    /// Reached by a minority
    Rare,
    /// Late-track milestones
    Epic,
    /// Final achievements
    Legendary,
}

/// Well-known badge ids.
pub mod badges {
    /// Complete the first lesson
    pub const FIRST_LESSON: &str = "first-lesson";
    /// Finish the cypherpunk track
    pub const CYPHERPUNK_INITIATE: &str = "cypherpunk-initiate";
    /// Connect a wallet
    pub const WALLET_CONNECTED: &str = "wallet-connected";
    /// Build a first ranch structure
    pub const RANCH_BUILDER: &str = "ranch-builder";
    /// Finish every coding challenge
    pub const CODE_SLINGER: &str = "code-slinger";
    /// Explore the internet history mindmap
    pub const MINDMAP_EXPLORER: &str = "mindmap-explorer";
}

/// Badges minted for each Solana coding challenge, indexed by challenge
/// id starting at 1: `(badge id, name, rarity)`.
const CHALLENGE_BADGES: [(&str, &str, Rarity); 10] = [
    ("the-architect", "The Architect", Rarity::Common),
    ("first-contact", "First Contact", Rarity::Common),
    ("state-keeper", "State Keeper", Rarity::Uncommon),
    ("chain-writer", "Chain Writer", Rarity::Uncommon),
    ("state-modifier", "State Modifier", Rarity::Rare),
    ("gatekeeper", "Gatekeeper", Rarity::Rare),
    ("master-of-puppets", "Master of Puppets", Rarity::Epic),
    ("the-composer", "The Composer", Rarity::Epic),
    ("toll-collector", "Toll Collector", Rarity::Legendary),
    ("the-debugger", "The Debugger", Rarity::Legendary),
];

/// Badge awarded for passing the Solana coding challenge `challenge`.
pub fn challenge_badge(challenge: ModuleId) -> Option<NftBadge> {
    let index = (challenge.get() as usize).checked_sub(1)?;
    let (id, name, rarity) = CHALLENGE_BADGES.get(index)?;
    Some(NftBadge::locked(
        id,
        name,
        &format!("Pass Solana coding challenge {}", challenge),
        *rarity,
    ))
}

/// Look up any badge the app can award, locked.
pub fn known_badge(id: &BadgeId) -> Option<NftBadge> {
    default_badges()
        .into_iter()
        .chain((1..=CHALLENGE_BADGES.len() as u32).filter_map(|n| challenge_badge(ModuleId::new(n))))
        .find(|badge| &badge.id == id)
}

/// The badge set every new profile starts with, all locked.
pub fn default_badges() -> Vec<NftBadge> {
    vec![
        NftBadge::locked(
            badges::FIRST_LESSON,
            "First Steps",
            "Complete your first Solana lesson",
            Rarity::Common,
        ),
        NftBadge::locked(
            badges::CYPHERPUNK_INITIATE,
            "Cypherpunk Initiate",
            "Learn the fundamentals of cypherpunk philosophy",
            Rarity::Uncommon,
        ),
        NftBadge::locked(
            badges::WALLET_CONNECTED,
            "Wallet Master",
            "Successfully connect your Solana wallet",
            Rarity::Common,
        ),
        NftBadge::locked(
            badges::RANCH_BUILDER,
            "Ranch Builder",
            "Build your first structure in Shadow Ranch",
            Rarity::Rare,
        ),
        NftBadge::locked(
            badges::CODE_SLINGER,
            "Code Slinger",
            "Write and deploy your first Solana program",
            Rarity::Epic,
        ),
        NftBadge::locked(
            badges::MINDMAP_EXPLORER,
            "Mindmap Explorer",
            "Explore the full history of internet mindmap",
            Rarity::Uncommon,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_badges_locked() {
        let all = default_badges();
        assert_eq!(all.len(), 6);
        assert!(all.iter().all(|b| !b.unlocked && b.unlocked_at.is_none()));
        assert_eq!(all[0].image_url, "/badges/first-lesson.svg");
    }

    #[test]
    fn test_unlock_keeps_first_timestamp() {
        let mut badge = default_badges().remove(0);
        let first = chrono::Utc::now();
        assert!(badge.unlock(first));
        assert!(!badge.unlock(first + chrono::Duration::hours(1)));
        assert_eq!(badge.unlocked_at, Some(first));
    }

    #[test]
    fn test_challenge_badges() {
        let first = challenge_badge(ModuleId::new(1)).unwrap();
        assert_eq!(first.id, BadgeId::new("the-architect"));
        assert_eq!(first.name, "The Architect");
        assert!(!first.unlocked);

        assert_eq!(challenge_badge(ModuleId::new(10)).unwrap().rarity, Rarity::Legendary);
        assert!(challenge_badge(ModuleId::new(0)).is_none());
        assert!(challenge_badge(ModuleId::new(11)).is_none());
    }

    #[test]
    fn test_known_badge_covers_both_sets() {
        assert!(known_badge(&BadgeId::new(badges::FIRST_LESSON)).is_some());
        assert!(known_badge(&BadgeId::new("gatekeeper")).is_some());
        assert!(known_badge(&BadgeId::new("no-such-badge")).is_none());
    }

    #[test]
    fn test_rarity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Rarity::Legendary).unwrap(), "\"legendary\"");
    }
}
