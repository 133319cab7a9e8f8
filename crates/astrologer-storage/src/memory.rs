use astrologer_core::repository::{ReadRepository, Repository, Result};
use astrologer_core::Picture;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::civil::Date;

/// In-memory implementation of the repository traits using DashMap.
///
/// Pictures are keyed by their date, so an insert for a date that is
/// already present leaves the stored picture untouched.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<Date, Picture>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, date: Date) -> Result<Option<Picture>> {
        Ok(self.storage.get(&date).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Picture>> {
        let mut pictures: Vec<Picture> = self
            .storage
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        pictures.sort_by_key(|picture| picture.date);
        Ok(pictures)
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, picture: &Picture) -> Result<bool> {
        match self.storage.entry(picture.date) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(picture.clone());
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn picture(title: &str, date: Date) -> Picture {
        Picture::new(title, date, vec![8, 45, 99])
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();
        let day = date(2022, 9, 15);

        assert!(repo.insert(&picture("title", day)).await.unwrap());

        let result = repo.get(day).await.unwrap().unwrap();
        assert_eq!(result, picture("title", day));
    }

    #[tokio::test]
    async fn get_missing_date() {
        let repo = InMemoryRepository::new();

        let result = repo.get(date(2021, 9, 15)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn duplicate_insert_keeps_first_picture() {
        let repo = InMemoryRepository::new();
        let day = date(2022, 9, 15);

        assert!(repo.insert(&picture("first", day)).await.unwrap());
        assert!(!repo.insert(&picture("second", day)).await.unwrap());

        let result = repo.get(day).await.unwrap().unwrap();
        assert_eq!(result.title, "first");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn list_is_sorted_by_date() {
        let repo = InMemoryRepository::new();

        repo.insert(&picture("title", date(2022, 9, 15))).await.unwrap();
        repo.insert(&picture("title2", date(2021, 9, 15))).await.unwrap();
        repo.insert(&picture("title3", date(2020, 9, 15))).await.unwrap();

        let titles: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["title3", "title2", "title"]);
    }

    #[tokio::test]
    async fn list_empty() {
        let repo = InMemoryRepository::new();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_inserts_for_same_date_store_one_picture() {
        use std::sync::Arc;

        let repo = Arc::new(InMemoryRepository::new());
        let day = date(2022, 9, 15);
        let mut handles = vec![];

        for i in 0..10 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(&picture(&format!("title-{i}"), day))
                    .await
                    .unwrap()
            }));
        }

        let mut written = 0;
        for handle in handles {
            if handle.await.unwrap() {
                written += 1;
            }
        }

        assert_eq!(written, 1);
        assert_eq!(repo.len(), 1);
    }
}
