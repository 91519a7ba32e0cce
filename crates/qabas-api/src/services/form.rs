// Contact form and join request intake and moderation

use chrono::Utc;
use qabas_core::{
    ContactForm, ContactStatus, Direction, JoinRequest, JoinStatus, Query, Record, Result,
};
use qabas_storage::StorageBackend;
use serde::Serialize;

use super::update_stamped;
use crate::api::forms::{ContactRequest, JoinRequestBody};

#[derive(Serialize)]
struct StatusChange<S: Serialize> {
    status: S,
}

pub struct FormService {
    store: StorageBackend,
}

impl FormService {
    pub fn new(store: StorageBackend) -> Self {
        Self { store }
    }

    pub async fn submit_contact(&self, req: ContactRequest, ip: Option<String>) -> Result<ContactForm> {
        let form = ContactForm {
            id: String::new(),
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            subject: req.subject,
            message: req.message,
            status: ContactStatus::New,
            ip,
            created_at: Utc::now(),
            updated_at: None,
        };

        let form = self.store.insert_record(&form).await?;
        tracing::info!(id = %form.id, "Received contact form");
        Ok(form)
    }

    pub async fn submit_join(&self, req: JoinRequestBody, ip: Option<String>) -> Result<JoinRequest> {
        let request = JoinRequest {
            id: String::new(),
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            phone: req.phone,
            specialty: req.specialty,
            message: req.message,
            status: JoinStatus::Pending,
            ip,
            created_at: Utc::now(),
            updated_at: None,
        };

        let request = self.store.insert_record(&request).await?;
        tracing::info!(id = %request.id, "Received join request");
        Ok(request)
    }

    /// Contact forms, newest first, optionally by status
    pub async fn list_contact(&self, status: Option<ContactStatus>) -> Result<Vec<ContactForm>> {
        self.list(status.map(|s| s.to_string())).await
    }

    /// Join requests, newest first, optionally by status
    pub async fn list_join(&self, status: Option<JoinStatus>) -> Result<Vec<JoinRequest>> {
        self.list(status.map(|s| s.to_string())).await
    }

    async fn list<T: Record>(&self, status: Option<String>) -> Result<Vec<T>> {
        let mut query = Query::new().order_by("createdAt", Direction::Descending);
        if let Some(status) = status {
            query = query.where_eq("status", status);
        }
        self.store.list_records(&query).await
    }

    pub async fn set_contact_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> Result<Option<ContactForm>> {
        update_stamped(&self.store, id, &StatusChange { status }).await
    }

    pub async fn set_join_status(&self, id: &str, status: JoinStatus) -> Result<Option<JoinRequest>> {
        update_stamped(&self.store, id, &StatusChange { status }).await
    }

    pub async fn delete_contact(&self, id: &str) -> Result<bool> {
        self.store.delete_record::<ContactForm>(id).await
    }

    pub async fn delete_join(&self, id: &str) -> Result<bool> {
        self.store.delete_record::<JoinRequest>(id).await
    }
}
