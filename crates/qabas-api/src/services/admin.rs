// Admin membership checks

use qabas_core::{collections, Principal, Result};
use qabas_storage::StorageBackend;

pub struct AdminService {
    store: StorageBackend,
    /// Lowercased emails granted admin access by configuration
    admin_emails: Vec<String>,
}

impl AdminService {
    pub fn new(store: StorageBackend, admin_emails: Vec<String>) -> Self {
        let admin_emails = admin_emails.into_iter().map(|e| e.to_lowercase()).collect();
        Self {
            store,
            admin_emails,
        }
    }

    /// Admin if the email is configured or the uid has a document in `admins`
    pub async fn is_admin(&self, principal: &Principal) -> Result<bool> {
        let email = principal.email.to_lowercase();
        if self.admin_emails.iter().any(|e| *e == email) {
            return Ok(true);
        }

        Ok(self
            .store
            .get(collections::ADMINS, &principal.uid)
            .await?
            .is_some())
    }

    /// Record a uid as admin
    pub async fn grant(&self, uid: &str, email: &str) -> Result<()> {
        let mut fields = qabas_core::document::Fields::new();
        fields.insert("email".to_string(), email.into());
        fields.insert(
            "grantedAt".to_string(),
            serde_json::to_value(chrono::Utc::now())?,
        );
        self.store.set(collections::ADMINS, uid, fields).await?;
        tracing::info!(uid = %uid, "Granted admin access");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(uid: &str, email: &str) -> Principal {
        Principal {
            uid: uid.to_string(),
            email: email.to_string(),
            name: None,
            picture: None,
        }
    }

    #[tokio::test]
    async fn test_configured_email_is_admin() {
        let service = AdminService::new(
            StorageBackend::in_memory(),
            vec!["Owner@Example.com".to_string()],
        );
        assert!(service
            .is_admin(&principal("u1", "owner@example.com"))
            .await
            .unwrap());
        assert!(!service
            .is_admin(&principal("u2", "guest@example.com"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_admins_collection_membership() {
        let service = AdminService::new(StorageBackend::in_memory(), vec![]);
        let editor = principal("editor-uid", "editor@example.com");
        assert!(!service.is_admin(&editor).await.unwrap());

        service.grant("editor-uid", "editor@example.com").await.unwrap();
        assert!(service.is_admin(&editor).await.unwrap());
    }
}
