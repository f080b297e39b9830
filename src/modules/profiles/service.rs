use std::sync::Arc;

use chrono::Utc;
use rosterly_auth::Identity;
use rosterly_models::users::{ProfilePatch, UserProfile};
use rosterly_store::DocumentStore;
use serde_json::json;
use tracing::{debug, instrument};

use crate::utils::errors::AppError;

/// Profile access over the `users` collection, keyed by identity uid.
///
/// A profile is created lazily on first view, mirroring the gateway
/// identity, and afterwards only mutated by its owning user. Unlike roster
/// reads, profile loads propagate failure: the profile view renders its own
/// error state.
pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
    users_collection: String,
    students_collection: String,
}

impl ProfileService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        users_collection: impl Into<String>,
        students_collection: impl Into<String>,
    ) -> Self {
        Self {
            store,
            users_collection: users_collection.into(),
            students_collection: students_collection.into(),
        }
    }

    /// Fetch the profile for an identity, creating it on first view.
    #[instrument(skip(self, identity), fields(uid = %identity.uid))]
    pub async fn get_or_create(&self, identity: &Identity) -> Result<UserProfile, AppError> {
        let existing = self
            .store
            .get(&self.users_collection, &identity.uid)
            .await
            .map_err(AppError::store)?;

        if let Some(doc) = existing {
            return doc.deserialize().map_err(AppError::store);
        }

        debug!("no stored profile, creating one from the gateway identity");
        let profile = UserProfile {
            display_name: identity.display_name.clone().unwrap_or_default(),
            email: identity.email.clone(),
            photo_url: identity.photo_url.clone().unwrap_or_default(),
            role: Default::default(),
            bio: None,
            phone: None,
            department: None,
            created_at: Some(Utc::now()),
            last_login: Some(Utc::now()),
            updated_at: None,
        };
        let data = serde_json::to_value(&profile)?;
        self.store
            .set(&self.users_collection, &identity.uid, data)
            .await
            .map_err(AppError::store)?;
        Ok(profile)
    }

    /// Merge user-editable fields onto the profile; the store stamps
    /// `updatedAt`. Propagates failure.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, uid: &str, patch: ProfilePatch) -> Result<(), AppError> {
        let data = serde_json::to_value(&patch)?;
        self.store
            .update(&self.users_collection, uid, data)
            .await
            .map_err(AppError::store)
    }

    /// How many roster records this identity has added.
    #[instrument(skip(self))]
    pub async fn students_added(&self, uid: &str) -> Result<usize, AppError> {
        let docs = self
            .store
            .query_eq(&self.students_collection, "addedBy", &json!(uid))
            .await
            .map_err(AppError::store)?;
        Ok(docs.len())
    }
}
