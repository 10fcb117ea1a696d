use crate::db::ProductRepository;
use crate::error::Result;
use crate::grpc::proto::product::*;
use crate::models::{Pagination, Product};
use crate::services::{image_url, parse_id, require_role, response};
use chrono::Utc;
use crypto_core::jwt::Role;
use grpc_jwt_propagation::CallIdentity;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// How many products the highlight shelf shows
pub const HIGHLIGHT_COUNT: u32 = 3;

/// Catalogue reads are public, writes are admin only
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    storage_url: String,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>, storage_url: &str) -> Self {
        Self {
            products,
            storage_url: storage_url.to_string(),
        }
    }

    fn summary(&self, product: Product) -> ProductSummary {
        ProductSummary {
            image_url: image_url(&self.storage_url, &product.image_file_name),
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }

    pub async fn create(
        &self,
        identity: Option<&CallIdentity>,
        request: CreateProductRequest,
    ) -> Result<CreateProductResponse> {
        let identity = require_role(identity, Role::Admin)?;

        let product = Product {
            id: Uuid::new_v4(),
            name: request.name,
            description: request.description,
            price: request.price,
            image_file_name: request.image_file_name,
            created_at: Utc::now(),
            created_by: identity.full_name.clone(),
            updated_at: None,
            updated_by: None,
            deleted_at: None,
            deleted_by: None,
            is_deleted: false,
        };
        self.products.insert(&product).await?;

        info!(product_id = %product.id, admin_id = %identity.user_id, "Product created");

        Ok(CreateProductResponse {
            base: response::success("Product created"),
            id: product.id.to_string(),
        })
    }

    pub async fn detail(&self, request: DetailProductRequest) -> Result<DetailProductResponse> {
        let product = match parse_id(&request.id) {
            Some(id) => self.products.get_by_id(id).await?,
            None => None,
        };

        let Some(product) = product else {
            return Ok(DetailProductResponse {
                base: response::not_found("Product not found"),
                ..Default::default()
            });
        };

        let summary = self.summary(product);
        Ok(DetailProductResponse {
            base: response::success("Get detail product success"),
            id: summary.id,
            name: summary.name,
            description: summary.description,
            price: summary.price,
            image_url: summary.image_url,
        })
    }

    pub async fn edit(
        &self,
        identity: Option<&CallIdentity>,
        request: EditProductRequest,
    ) -> Result<EditProductResponse> {
        let identity = require_role(identity, Role::Admin)?;

        let existing = match parse_id(&request.id) {
            Some(id) => self.products.get_by_id(id).await?,
            None => None,
        };
        let Some(mut product) = existing else {
            return Ok(EditProductResponse {
                base: response::not_found("Product not found"),
                id: request.id,
            });
        };

        product.name = request.name;
        product.description = request.description;
        product.price = request.price;
        product.image_file_name = request.image_file_name;
        product.updated_at = Some(Utc::now());
        product.updated_by = Some(identity.full_name.clone());
        self.products.update(&product).await?;

        info!(product_id = %product.id, admin_id = %identity.user_id, "Product edited");

        Ok(EditProductResponse {
            base: response::success("Edit product success"),
            id: product.id.to_string(),
        })
    }

    pub async fn delete(
        &self,
        identity: Option<&CallIdentity>,
        request: DeleteProductRequest,
    ) -> Result<DeleteProductResponse> {
        let identity = require_role(identity, Role::Admin)?;

        let existing = match parse_id(&request.id) {
            Some(id) => self.products.get_by_id(id).await?,
            None => None,
        };
        let Some(product) = existing else {
            return Ok(DeleteProductResponse {
                base: response::not_found("Product not found"),
            });
        };

        self.products
            .soft_delete(product.id, Utc::now(), &identity.full_name)
            .await?;

        info!(product_id = %product.id, admin_id = %identity.user_id, "Product deleted");

        Ok(DeleteProductResponse {
            base: response::success("Delete product success"),
        })
    }

    pub async fn list(&self, request: ListProductRequest) -> Result<ListProductResponse> {
        let pagination = request
            .pagination
            .map(|p| Pagination::new(p.current_page, p.item_per_page))
            .unwrap_or_default();

        let page = self.products.list(pagination).await?;

        Ok(ListProductResponse {
            base: response::success("Get list product success"),
            pagination: response::pagination(pagination, page.total_items),
            data: page.items.into_iter().map(|p| self.summary(p)).collect(),
        })
    }

    pub async fn highlight(&self) -> Result<HighlightProductsResponse> {
        let products = self.products.list_latest(HIGHLIGHT_COUNT).await?;

        Ok(HighlightProductsResponse {
            base: response::success("Get highlight products success"),
            data: products.into_iter().map(|p| self.summary(p)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::InMemoryProductRepository;
    use crate::db::MockProductRepository;
    use crate::error::StorefrontError;
    use crate::grpc::proto::common::PaginationRequest;
    use crate::services::test_support::identity;

    const STORAGE: &str = "http://cdn.local/storage";

    fn create_request(name: &str) -> CreateProductRequest {
        CreateProductRequest {
            name: name.into(),
            description: format!("{name} description"),
            price: 25.5,
            image_file_name: format!("{name}.png"),
        }
    }

    fn service() -> (ProductService, Arc<InMemoryProductRepository>) {
        let repo = Arc::new(InMemoryProductRepository::default());
        (ProductService::new(repo.clone(), STORAGE), repo)
    }

    #[tokio::test]
    async fn test_customer_cannot_create_product() {
        let mut products = MockProductRepository::new();
        products.expect_insert().times(0);
        let service = ProductService::new(Arc::new(products), STORAGE);
        let customer = identity(Role::Customer);

        let result = service.create(Some(&customer), create_request("lamp")).await;

        assert!(matches!(result, Err(StorefrontError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_anonymous_cannot_delete_product() {
        let mut products = MockProductRepository::new();
        products.expect_get_by_id().times(0);
        products.expect_soft_delete().times(0);
        let service = ProductService::new(Arc::new(products), STORAGE);

        let result = service
            .delete(None, DeleteProductRequest { id: Uuid::new_v4().to_string() })
            .await;

        assert!(matches!(result, Err(StorefrontError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_admin_create_stamps_audit_fields() {
        let (service, repo) = service();
        let admin = identity(Role::Admin);

        let response = service.create(Some(&admin), create_request("lamp")).await.unwrap();

        let id = Uuid::parse_str(&response.id).unwrap();
        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.created_by, admin.full_name);
        assert!(!stored.is_deleted);
    }

    #[tokio::test]
    async fn test_detail_builds_image_url() {
        let (service, _) = service();
        let admin = identity(Role::Admin);
        let created = service.create(Some(&admin), create_request("lamp")).await.unwrap();

        let detail = service
            .detail(DetailProductRequest { id: created.id })
            .await
            .unwrap();

        assert_eq!(detail.image_url, "http://cdn.local/storage/product/lamp.png");
        assert_eq!(detail.price, 25.5);
    }

    #[tokio::test]
    async fn test_detail_unknown_or_malformed_id() {
        let (service, _) = service();

        for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
            let base = service
                .detail(DetailProductRequest { id })
                .await
                .unwrap()
                .base
                .unwrap();
            assert_eq!(base.status_code, 404);
        }
    }

    #[tokio::test]
    async fn test_edit_updates_fields() {
        let (service, repo) = service();
        let admin = identity(Role::Admin);
        let created = service.create(Some(&admin), create_request("lamp")).await.unwrap();

        service
            .edit(
                Some(&admin),
                EditProductRequest {
                    id: created.id.clone(),
                    name: "desk lamp".into(),
                    description: "brighter".into(),
                    price: 30.0,
                    image_file_name: "desk.png".into(),
                },
            )
            .await
            .unwrap();

        let stored = repo
            .get_by_id(Uuid::parse_str(&created.id).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "desk lamp");
        assert_eq!(stored.price, 30.0);
        assert_eq!(stored.updated_by.as_deref(), Some(admin.full_name.as_str()));
    }

    #[tokio::test]
    async fn test_delete_hides_product() {
        let (service, _) = service();
        let admin = identity(Role::Admin);
        let created = service.create(Some(&admin), create_request("lamp")).await.unwrap();

        service
            .delete(Some(&admin), DeleteProductRequest { id: created.id.clone() })
            .await
            .unwrap();

        let detail = service.detail(DetailProductRequest { id: created.id }).await.unwrap();
        assert_eq!(detail.base.unwrap().status_code, 404);
    }

    #[tokio::test]
    async fn test_list_and_highlight() {
        let (service, _) = service();
        let admin = identity(Role::Admin);
        for name in ["a", "b", "c", "d", "e"] {
            service.create(Some(&admin), create_request(name)).await.unwrap();
        }

        let list = service
            .list(ListProductRequest {
                pagination: Some(PaginationRequest {
                    current_page: 1,
                    item_per_page: 2,
                }),
            })
            .await
            .unwrap();
        let pagination = list.pagination.unwrap();
        assert_eq!(list.data.len(), 2);
        assert_eq!(pagination.total_item_count, 5);
        assert_eq!(pagination.total_page_count, 3);

        let highlight = service.highlight().await.unwrap();
        assert_eq!(highlight.data.len(), HIGHLIGHT_COUNT as usize);
    }
}
