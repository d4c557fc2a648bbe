use crate::domain::repository::CategoryRepository;
use crate::domain::types::{Category, MAX_CATEGORY_NAME_LEN, validate_label};
use crate::error::ApiError;

pub struct ListCategoriesUseCase<C: CategoryRepository> {
    pub repo: C,
}

impl<C: CategoryRepository> ListCategoriesUseCase<C> {
    pub async fn execute(&self) -> Result<Vec<Category>, ApiError> {
        self.repo.list().await
    }
}

pub struct CreateCategoryUseCase<C: CategoryRepository> {
    pub repo: C,
}

impl<C: CategoryRepository> CreateCategoryUseCase<C> {
    pub async fn execute(&self, name: &str) -> Result<Category, ApiError> {
        if !validate_label(name, MAX_CATEGORY_NAME_LEN) {
            return Err(ApiError::InvalidPayload(format!(
                "name must be 1-{MAX_CATEGORY_NAME_LEN} characters"
            )));
        }
        self.repo.create(name.trim()).await
    }
}
