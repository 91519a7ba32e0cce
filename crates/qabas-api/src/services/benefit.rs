// Benefits (scholarly excerpts) service

use chrono::Utc;
use qabas_core::{Benefit, Direction, Query, Result};
use qabas_storage::StorageBackend;

use super::{clamp_limit, update_stamped};
use crate::api::benefits::{BenefitChanges, BenefitListQuery, CreateBenefitRequest};

pub struct BenefitService {
    store: StorageBackend,
}

impl BenefitService {
    pub fn new(store: StorageBackend) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: &BenefitListQuery) -> Result<Vec<Benefit>> {
        let mut query = Query::new().order_by("createdAt", Direction::Descending);
        if let Some(category) = &filter.category {
            query = query.where_eq("category", category.as_str());
        }
        if let Some(book_name) = &filter.book_name {
            query = query.where_eq("bookName", book_name.as_str());
        }
        query = query.limit(clamp_limit(filter.limit));

        self.store.list_records(&query).await
    }

    pub async fn list_all(&self) -> Result<Vec<Benefit>> {
        self.store
            .list_records(&Query::new().order_by("createdAt", Direction::Descending))
            .await
    }

    pub async fn create(&self, req: CreateBenefitRequest, uploaded_by: &str) -> Result<Benefit> {
        let benefit = Benefit {
            id: String::new(),
            book_name: req.book_name,
            volume: req.volume,
            page: req.page,
            text: req.text,
            comment: req.comment.filter(|c| !c.trim().is_empty()),
            category: req.category,
            created_at: Utc::now(),
            updated_at: None,
            uploaded_by: Some(uploaded_by.to_string()),
        };

        let benefit = self.store.insert_record(&benefit).await?;
        tracing::info!(id = %benefit.id, uploaded_by = %uploaded_by, "Created benefit");
        Ok(benefit)
    }

    pub async fn update(&self, id: &str, changes: &BenefitChanges) -> Result<Option<Benefit>> {
        update_stamped(&self.store, id, changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let deleted = self.store.delete_record::<Benefit>(id).await?;
        if deleted {
            tracing::info!(id = %id, "Deleted benefit");
        }
        Ok(deleted)
    }
}
