//! Shopping cart lines, one per (user, product)
use crate::db::{CartRepository, ProductRepository};
use crate::error::{Result, StorefrontError};
use crate::grpc::proto::cart::*;
use crate::models::CartItem;
use crate::services::{caller, image_url, parse_id, response};
use chrono::Utc;
use grpc_jwt_propagation::CallIdentity;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

pub struct CartService {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
    storage_url: String,
}

impl CartService {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        products: Arc<dyn ProductRepository>,
        storage_url: &str,
    ) -> Self {
        Self {
            carts,
            products,
            storage_url: storage_url.to_string(),
        }
    }

    /// Look up a line the caller owns; someone else's line is an auth failure
    async fn owned_line(&self, identity: &CallIdentity, raw_id: &str) -> Result<Option<CartItem>> {
        let Some(id) = parse_id(raw_id) else {
            return Ok(None);
        };
        let Some(item) = self.carts.get_by_id(id).await? else {
            return Ok(None);
        };

        if !identity.is_owner(&item.user_id) {
            warn!(
                user_id = %identity.user_id,
                cart_id = %item.id,
                "Cart line belongs to another user"
            );
            return Err(StorefrontError::Unauthenticated);
        }

        Ok(Some(item))
    }

    pub async fn add_product(
        &self,
        identity: Option<&CallIdentity>,
        request: AddProductToCartRequest,
    ) -> Result<AddProductToCartResponse> {
        let identity = caller(identity)?;

        let product = match parse_id(&request.product_id) {
            Some(id) => self.products.get_by_id(id).await?,
            None => None,
        };
        let Some(product) = product else {
            return Ok(AddProductToCartResponse {
                base: response::not_found("Product not found"),
                id: String::new(),
            });
        };

        let existing = self
            .carts
            .get_by_product_and_user(product.id, identity.user_id)
            .await?;

        let id = match existing {
            Some(mut item) => {
                item.quantity += 1;
                item.updated_at = Some(Utc::now());
                item.updated_by = Some(identity.user_id.to_string());
                self.carts.update(&item).await?;
                item.id
            }
            None => {
                let item = CartItem {
                    id: Uuid::new_v4(),
                    user_id: identity.user_id,
                    product_id: product.id,
                    quantity: 1,
                    created_at: Utc::now(),
                    created_by: identity.full_name.clone(),
                    updated_at: None,
                    updated_by: None,
                };
                self.carts.insert(&item).await?;
                item.id
            }
        };

        debug!(user_id = %identity.user_id, cart_id = %id, "Product added to cart");

        Ok(AddProductToCartResponse {
            base: response::success("Add product to cart success"),
            id: id.to_string(),
        })
    }

    pub async fn list(&self, identity: Option<&CallIdentity>) -> Result<ListCartResponse> {
        let identity = caller(identity)?;

        let mut lines = Vec::new();
        for item in self.carts.list_by_user(identity.user_id).await? {
            // Deleted products drop out of the cart view
            let Some(product) = self.products.get_by_id(item.product_id).await? else {
                continue;
            };
            lines.push(CartLine {
                cart_id: item.id.to_string(),
                product_id: product.id.to_string(),
                product_image_url: image_url(&self.storage_url, &product.image_file_name),
                product_name: product.name,
                product_price: product.price,
                quantity: item.quantity,
            });
        }

        Ok(ListCartResponse {
            base: response::success("Get list cart success"),
            items: lines,
        })
    }

    pub async fn update_quantity(
        &self,
        identity: Option<&CallIdentity>,
        request: UpdateCartQuantityRequest,
    ) -> Result<UpdateCartQuantityResponse> {
        let identity = caller(identity)?;

        let Some(mut item) = self.owned_line(identity, &request.cart_id).await? else {
            return Ok(UpdateCartQuantityResponse {
                base: response::not_found("Cart not found"),
            });
        };

        if request.new_quantity < 0 {
            return Ok(UpdateCartQuantityResponse {
                base: response::bad_request("Quantity cannot be negative"),
            });
        }

        if request.new_quantity == 0 {
            self.carts.delete(item.id).await?;
            return Ok(UpdateCartQuantityResponse {
                base: response::success("Update cart quantity success"),
            });
        }

        item.quantity = request.new_quantity;
        item.updated_at = Some(Utc::now());
        item.updated_by = Some(identity.user_id.to_string());
        self.carts.update(&item).await?;

        Ok(UpdateCartQuantityResponse {
            base: response::success("Update cart quantity success"),
        })
    }

    pub async fn delete(
        &self,
        identity: Option<&CallIdentity>,
        request: DeleteCartRequest,
    ) -> Result<DeleteCartResponse> {
        let identity = caller(identity)?;

        let Some(item) = self.owned_line(identity, &request.cart_id).await? else {
            return Ok(DeleteCartResponse {
                base: response::not_found("Cart not found"),
            });
        };

        self.carts.delete(item.id).await?;

        Ok(DeleteCartResponse {
            base: response::success("Delete cart success"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{InMemoryCartRepository, InMemoryProductRepository};
    use crate::models::Product;
    use crate::services::test_support::identity;
    use crypto_core::jwt::Role;

    struct Fixture {
        service: CartService,
        carts: Arc<InMemoryCartRepository>,
        product_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let carts = Arc::new(InMemoryCartRepository::default());
        let products = Arc::new(InMemoryProductRepository::default());
        let product = Product {
            id: Uuid::new_v4(),
            name: "Mug".into(),
            description: String::new(),
            price: 12.0,
            image_file_name: "mug.png".into(),
            created_at: Utc::now(),
            created_by: "Admin".into(),
            updated_at: None,
            updated_by: None,
            deleted_at: None,
            deleted_by: None,
            is_deleted: false,
        };
        products.insert(&product).await.unwrap();

        Fixture {
            service: CartService::new(carts.clone(), products, "http://cdn.local/storage"),
            carts,
            product_id: product.id,
        }
    }

    async fn add(fixture: &Fixture, identity: &CallIdentity) -> String {
        fixture
            .service
            .add_product(
                Some(identity),
                AddProductToCartRequest {
                    product_id: fixture.product_id.to_string(),
                },
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_adding_twice_increments_line() {
        let fixture = fixture().await;
        let customer = identity(Role::Customer);

        let first = add(&fixture, &customer).await;
        let second = add(&fixture, &customer).await;

        assert_eq!(first, second);
        let item = fixture
            .carts
            .get_by_id(Uuid::parse_str(&first).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.created_by, customer.full_name);
        assert_eq!(item.updated_by, Some(customer.user_id.to_string()));
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let fixture = fixture().await;
        let customer = identity(Role::Customer);

        let response = fixture
            .service
            .add_product(
                Some(&customer),
                AddProductToCartRequest {
                    product_id: Uuid::new_v4().to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.base.unwrap().status_code, 404);
    }

    #[tokio::test]
    async fn test_list_joins_product() {
        let fixture = fixture().await;
        let customer = identity(Role::Customer);
        add(&fixture, &customer).await;

        let list = fixture.service.list(Some(&customer)).await.unwrap();

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].product_name, "Mug");
        assert_eq!(
            list.items[0].product_image_url,
            "http://cdn.local/storage/product/mug.png"
        );
        assert!(fixture
            .service
            .list(Some(&identity(Role::Customer)))
            .await
            .unwrap()
            .items
            .is_empty());
    }

    #[tokio::test]
    async fn test_zero_quantity_removes_line() {
        let fixture = fixture().await;
        let customer = identity(Role::Customer);
        let cart_id = add(&fixture, &customer).await;

        fixture
            .service
            .update_quantity(
                Some(&customer),
                UpdateCartQuantityRequest {
                    cart_id: cart_id.clone(),
                    new_quantity: 0,
                },
            )
            .await
            .unwrap();

        assert!(fixture
            .carts
            .get_by_id(Uuid::parse_str(&cart_id).unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_negative_quantity_rejected() {
        let fixture = fixture().await;
        let customer = identity(Role::Customer);
        let cart_id = add(&fixture, &customer).await;

        let base = fixture
            .service
            .update_quantity(
                Some(&customer),
                UpdateCartQuantityRequest {
                    cart_id,
                    new_quantity: -1,
                },
            )
            .await
            .unwrap()
            .base
            .unwrap();

        assert_eq!(base.status_code, 400);
    }

    #[tokio::test]
    async fn test_foreign_line_is_unauthenticated() {
        let fixture = fixture().await;
        let owner = identity(Role::Customer);
        let intruder = identity(Role::Customer);
        let cart_id = add(&fixture, &owner).await;

        let result = fixture
            .service
            .delete(Some(&intruder), DeleteCartRequest { cart_id: cart_id.clone() })
            .await;

        assert!(matches!(result, Err(StorefrontError::Unauthenticated)));
        assert!(fixture
            .carts
            .get_by_id(Uuid::parse_str(&cart_id).unwrap())
            .await
            .unwrap()
            .is_some());
    }
}
