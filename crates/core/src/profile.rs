//! Learner profile keyed by wallet public key.

use serde::{Deserialize, Serialize};
use crate::badge::{default_badges, known_badge, NftBadge};
use crate::id::BadgeId;
use crate::Time;

/// A learner's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Wallet address owning the profile
    pub public_key: String,

    /// Display name
    pub username: String,

    /// Free-form bio
    pub bio: String,

    /// Avatar location
    pub profile_image_url: String,

    /// Earned and unearned badges
    pub nft_badges: Vec<NftBadge>,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

impl UserProfile {
    /// Create a default profile for a wallet address.
    ///
    /// The username is `User_` followed by the first six characters of the
    /// key.
    pub fn new(public_key: impl Into<String>) -> Self {
        let public_key = public_key.into();
        let prefix: String = public_key.chars().take(6).collect();
        let now = chrono::Utc::now();
        Self {
            username: format!("User_{}", prefix),
            public_key,
            bio: String::new(),
            profile_image_url: String::new(),
            nft_badges: default_badges(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and bump `updated_at`.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        if let Some(url) = update.profile_image_url {
            self.profile_image_url = url;
        }
        self.updated_at = chrono::Utc::now();
    }

    /// Find a badge.
    pub fn badge(&self, id: &BadgeId) -> Option<&NftBadge> {
        self.nft_badges.iter().find(|b| &b.id == id)
    }

    /// Unlock a badge. Returns true only if the badge was newly unlocked.
    ///
    /// Badges the app knows about but the profile predates (such as
    /// challenge badges) are added on first unlock; unknown ids are ignored.
    pub fn unlock_badge(&mut self, id: &BadgeId) -> bool {
        if self.badge(id).is_none() {
            match known_badge(id) {
                Some(badge) => self.nft_badges.push(badge),
                None => return false,
            }
        }
        let now = chrono::Utc::now();
        let changed = self
            .nft_badges
            .iter_mut()
            .find(|b| &b.id == id)
            .map(|b| b.unlock(now))
            .unwrap_or(false);
        if changed {
            self.updated_at = now;
        }
        changed
    }

    /// Badges earned so far.
    pub fn unlocked_badges(&self) -> impl Iterator<Item = &NftBadge> {
        self.nft_badges.iter().filter(|b| b.unlocked)
    }
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name
    pub username: Option<String>,
    /// New bio
    pub bio: Option<String>,
    /// New avatar location
    pub profile_image_url: Option<String>,
}
