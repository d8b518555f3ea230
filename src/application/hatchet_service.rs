// Hatchet service - Use case for listing datasets
use crate::application::hatchet_repository::HatchetRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct HatchetService {
    repository: Arc<dyn HatchetRepository>,
}

impl HatchetService {
    pub fn new(repository: Arc<dyn HatchetRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_hatchets(&self) -> anyhow::Result<Vec<String>> {
        self.repository.list_hatchets().await
    }
}
