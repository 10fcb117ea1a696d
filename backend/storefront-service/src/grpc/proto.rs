//! Wire messages for the storefront gRPC API
//!
//! Kept by hand in sync with `backend/proto/*.proto`; field tags must match.

pub mod common {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ValidationError {
        #[prost(string, tag = "1")]
        pub field: String,
        #[prost(string, tag = "2")]
        pub message: String,
    }

    /// Outcome carried by every response
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct BaseResponse {
        #[prost(int64, tag = "1")]
        pub status_code: i64,
        #[prost(string, tag = "2")]
        pub message: String,
        #[prost(bool, tag = "3")]
        pub is_error: bool,
        #[prost(message, repeated, tag = "4")]
        pub validation_errors: Vec<ValidationError>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct PaginationRequest {
        #[prost(int64, tag = "1")]
        pub current_page: i64,
        #[prost(int64, tag = "2")]
        pub item_per_page: i64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct PaginationResponse {
        #[prost(int64, tag = "1")]
        pub current_page: i64,
        #[prost(int64, tag = "2")]
        pub item_per_page: i64,
        #[prost(int64, tag = "3")]
        pub total_page_count: i64,
        #[prost(int64, tag = "4")]
        pub total_item_count: i64,
    }
}

pub mod auth {
    use super::common::BaseResponse;

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct RegisterRequest {
        #[prost(string, tag = "1")]
        pub email: String,
        #[prost(string, tag = "2")]
        pub password: String,
        #[prost(string, tag = "3")]
        pub password_confirmation: String,
        #[prost(string, tag = "4")]
        pub full_name: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct RegisterResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct LoginRequest {
        #[prost(string, tag = "1")]
        pub email: String,
        #[prost(string, tag = "2")]
        pub password: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct LoginResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
        #[prost(string, tag = "2")]
        pub access_token: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct LogoutRequest {}

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct LogoutResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChangePasswordRequest {
        #[prost(string, tag = "1")]
        pub old_password: String,
        #[prost(string, tag = "2")]
        pub new_password: String,
        #[prost(string, tag = "3")]
        pub new_password_confirmation: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChangePasswordResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GetProfileRequest {}

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GetProfileResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
        #[prost(string, tag = "2")]
        pub user_id: String,
        #[prost(string, tag = "3")]
        pub full_name: String,
        #[prost(string, tag = "4")]
        pub email: String,
        #[prost(string, tag = "5")]
        pub role_code: String,
        #[prost(message, optional, tag = "6")]
        pub member_since: Option<::prost_types::Timestamp>,
    }
}

pub mod product {
    use super::common::{BaseResponse, PaginationRequest, PaginationResponse};

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CreateProductRequest {
        #[prost(string, tag = "1")]
        pub name: String,
        #[prost(string, tag = "2")]
        pub description: String,
        #[prost(double, tag = "3")]
        pub price: f64,
        #[prost(string, tag = "4")]
        pub image_file_name: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CreateProductResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
        #[prost(string, tag = "2")]
        pub id: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DetailProductRequest {
        #[prost(string, tag = "1")]
        pub id: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DetailProductResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
        #[prost(string, tag = "2")]
        pub id: String,
        #[prost(string, tag = "3")]
        pub name: String,
        #[prost(string, tag = "4")]
        pub description: String,
        #[prost(double, tag = "5")]
        pub price: f64,
        #[prost(string, tag = "6")]
        pub image_url: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct EditProductRequest {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(string, tag = "2")]
        pub name: String,
        #[prost(string, tag = "3")]
        pub description: String,
        #[prost(double, tag = "4")]
        pub price: f64,
        #[prost(string, tag = "5")]
        pub image_file_name: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct EditProductResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
        #[prost(string, tag = "2")]
        pub id: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DeleteProductRequest {
        #[prost(string, tag = "1")]
        pub id: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DeleteProductResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ProductSummary {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(string, tag = "2")]
        pub name: String,
        #[prost(string, tag = "3")]
        pub description: String,
        #[prost(double, tag = "4")]
        pub price: f64,
        #[prost(string, tag = "5")]
        pub image_url: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ListProductRequest {
        #[prost(message, optional, tag = "1")]
        pub pagination: Option<PaginationRequest>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ListProductResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
        #[prost(message, optional, tag = "2")]
        pub pagination: Option<PaginationResponse>,
        #[prost(message, repeated, tag = "3")]
        pub data: Vec<ProductSummary>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct HighlightProductsRequest {}

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct HighlightProductsResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
        #[prost(message, repeated, tag = "2")]
        pub data: Vec<ProductSummary>,
    }
}

pub mod cart {
    use super::common::BaseResponse;

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AddProductToCartRequest {
        #[prost(string, tag = "1")]
        pub product_id: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AddProductToCartResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
        #[prost(string, tag = "2")]
        pub id: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ListCartRequest {}

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CartLine {
        #[prost(string, tag = "1")]
        pub cart_id: String,
        #[prost(string, tag = "2")]
        pub product_id: String,
        #[prost(string, tag = "3")]
        pub product_name: String,
        #[prost(string, tag = "4")]
        pub product_image_url: String,
        #[prost(double, tag = "5")]
        pub product_price: f64,
        #[prost(int64, tag = "6")]
        pub quantity: i64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ListCartResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
        #[prost(message, repeated, tag = "2")]
        pub items: Vec<CartLine>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct UpdateCartQuantityRequest {
        #[prost(string, tag = "1")]
        pub cart_id: String,
        #[prost(int64, tag = "2")]
        pub new_quantity: i64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct UpdateCartQuantityResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DeleteCartRequest {
        #[prost(string, tag = "1")]
        pub cart_id: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DeleteCartResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
    }
}

pub mod order {
    use super::common::{BaseResponse, PaginationRequest, PaginationResponse};

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct OrderProductRequest {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(int64, tag = "2")]
        pub quantity: i64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CreateOrderRequest {
        #[prost(string, tag = "1")]
        pub full_name: String,
        #[prost(string, tag = "2")]
        pub address: String,
        #[prost(string, tag = "3")]
        pub phone_number: String,
        #[prost(string, tag = "4")]
        pub notes: String,
        #[prost(message, repeated, tag = "5")]
        pub products: Vec<OrderProductRequest>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CreateOrderResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
        #[prost(string, tag = "2")]
        pub id: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct OrderProduct {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(string, tag = "2")]
        pub name: String,
        #[prost(double, tag = "3")]
        pub price: f64,
        #[prost(int64, tag = "4")]
        pub quantity: i64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct OrderSummary {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(string, tag = "2")]
        pub number: String,
        #[prost(string, tag = "3")]
        pub customer_name: String,
        #[prost(string, tag = "4")]
        pub status_code: String,
        #[prost(double, tag = "5")]
        pub total: f64,
        #[prost(message, optional, tag = "6")]
        pub created_at: Option<::prost_types::Timestamp>,
        #[prost(message, repeated, tag = "7")]
        pub products: Vec<OrderProduct>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ListOrderRequest {
        #[prost(message, optional, tag = "1")]
        pub pagination: Option<PaginationRequest>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ListOrderAdminRequest {
        #[prost(message, optional, tag = "1")]
        pub pagination: Option<PaginationRequest>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ListOrderResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
        #[prost(message, optional, tag = "2")]
        pub pagination: Option<PaginationResponse>,
        #[prost(message, repeated, tag = "3")]
        pub items: Vec<OrderSummary>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DetailOrderRequest {
        #[prost(string, tag = "1")]
        pub id: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DetailOrderResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
        #[prost(string, tag = "2")]
        pub id: String,
        #[prost(string, tag = "3")]
        pub number: String,
        #[prost(string, tag = "4")]
        pub user_full_name: String,
        #[prost(string, tag = "5")]
        pub address: String,
        #[prost(string, tag = "6")]
        pub phone_number: String,
        #[prost(string, tag = "7")]
        pub notes: String,
        #[prost(string, tag = "8")]
        pub order_status_code: String,
        #[prost(message, optional, tag = "9")]
        pub created_at: Option<::prost_types::Timestamp>,
        #[prost(double, tag = "10")]
        pub total: f64,
        #[prost(message, repeated, tag = "11")]
        pub items: Vec<OrderProduct>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct UpdateOrderStatusRequest {
        #[prost(string, tag = "1")]
        pub order_id: String,
        #[prost(string, tag = "2")]
        pub new_status_code: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct UpdateOrderStatusResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
    }
}

pub mod newsletter {
    use super::common::BaseResponse;

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SubscribeNewsletterRequest {
        #[prost(string, tag = "1")]
        pub full_name: String,
        #[prost(string, tag = "2")]
        pub email: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SubscribeNewsletterResponse {
        #[prost(message, optional, tag = "1")]
        pub base: Option<BaseResponse>,
    }
}
