//! Learner profile service.

use shadow_ranch_core::{BadgeId, ProfileUpdate, UserProfile};
use shadow_ranch_storage::{ProfileStorage, StorageError};
use tracing::{debug, info};

/// Errors from profile operations.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// No profile for the given key
    #[error("profile not found: {0}")]
    NotFound(String),

    /// Storage error
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Profile operations over a [`ProfileStorage`] backend.
pub struct ProfileService<P: ProfileStorage> {
    storage: P,
}

impl<P: ProfileStorage> ProfileService<P> {
    /// Create a service.
    pub fn new(storage: P) -> Self {
        Self { storage }
    }

    /// Load a profile.
    pub async fn get(&self, public_key: &str) -> Result<Option<UserProfile>, ProfileError> {
        Ok(self.storage.load_profile(public_key).await?)
    }

    /// Whether a profile exists for `public_key`.
    pub async fn has_profile(&self, public_key: &str) -> Result<bool, ProfileError> {
        Ok(self.get(public_key).await?.is_some())
    }

    /// Load a profile, creating the default one on first connection.
    pub async fn get_or_create(&mut self, public_key: &str) -> Result<UserProfile, ProfileError> {
        if let Some(profile) = self.storage.load_profile(public_key).await? {
            return Ok(profile);
        }

        let profile = UserProfile::new(public_key);
        self.storage.save_profile(&profile).await?;
        info!(public_key, username = %profile.username, "created profile");
        Ok(profile)
    }

    /// Apply a partial update to an existing profile.
    pub async fn update(
        &mut self,
        public_key: &str,
        update: ProfileUpdate,
    ) -> Result<UserProfile, ProfileError> {
        let mut profile = self
            .storage
            .load_profile(public_key)
            .await?
            .ok_or_else(|| ProfileError::NotFound(public_key.to_string()))?;

        profile.apply(update);
        self.storage.save_profile(&profile).await?;
        debug!(public_key, "updated profile");
        Ok(profile)
    }

    /// Unlock a single badge.
    ///
    /// Returns true if the badge was newly unlocked. A missing profile or
    /// unknown badge is not an error.
    pub async fn unlock_badge(&mut self, public_key: &str, badge: &BadgeId) -> Result<bool, ProfileError> {
        let unlocked = self.award(public_key, std::slice::from_ref(badge)).await?;
        Ok(!unlocked.is_empty())
    }

    /// Unlock several badges with a single write; returns the newly
    /// unlocked ones.
    pub async fn award(&mut self, public_key: &str, badges: &[BadgeId]) -> Result<Vec<BadgeId>, ProfileError> {
        let Some(mut profile) = self.storage.load_profile(public_key).await? else {
            debug!(public_key, "no profile to award badges to");
            return Ok(Vec::new());
        };

        let newly: Vec<BadgeId> = badges
            .iter()
            .filter(|id| profile.unlock_badge(id))
            .cloned()
            .collect();

        if !newly.is_empty() {
            self.storage.save_profile(&profile).await?;
            for id in &newly {
                info!(public_key, badge = %id, "badge unlocked");
            }
        }
        Ok(newly)
    }
}
