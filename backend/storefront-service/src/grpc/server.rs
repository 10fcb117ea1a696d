//! Route-aware gRPC dispatcher
//!
//! One dispatcher serves every storefront service. Each call is decoded with
//! the prost codec, handed to [`AuthInterceptor::intercept`] together with its
//! full method name, and only then reaches the matching service method. The
//! named wrappers at the bottom register the dispatcher under each service
//! prefix with `tonic::transport::Server`.

use crate::error::StorefrontError;
use crate::services::Services;
use grpc_jwt_propagation::{AuthInterceptor, CallIdentity, IdentityExt};
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};
use tonic::body::{empty_body, BoxBody};
use tonic::codec::ProstCodec;
use tonic::codegen::{http, Body, BoxFuture, Service, StdError};
use tonic::server::NamedService;
use tonic::transport::server::Router;
use tonic::transport::Server;
use tonic::{Code, Request, Response, Status};
use tracing::debug;

/// Fully qualified method names
pub mod methods {
    use grpc_jwt_propagation::PublicRoutes;

    pub const REGISTER: &str = "/auth.AuthService/Register";
    pub const LOGIN: &str = "/auth.AuthService/Login";
    pub const LOGOUT: &str = "/auth.AuthService/Logout";
    pub const CHANGE_PASSWORD: &str = "/auth.AuthService/ChangePassword";
    pub const GET_PROFILE: &str = "/auth.AuthService/GetProfile";

    pub const CREATE_PRODUCT: &str = "/product.ProductService/CreateProduct";
    pub const DETAIL_PRODUCT: &str = "/product.ProductService/DetailProduct";
    pub const EDIT_PRODUCT: &str = "/product.ProductService/EditProduct";
    pub const DELETE_PRODUCT: &str = "/product.ProductService/DeleteProduct";
    pub const LIST_PRODUCT: &str = "/product.ProductService/ListProduct";
    pub const HIGHLIGHT_PRODUCTS: &str = "/product.ProductService/HighlightProducts";

    pub const ADD_PRODUCT_TO_CART: &str = "/cart.CartService/AddProductToCart";
    pub const LIST_CART: &str = "/cart.CartService/ListCart";
    pub const UPDATE_CART_QUANTITY: &str = "/cart.CartService/UpdateCartQuantity";
    pub const DELETE_CART: &str = "/cart.CartService/DeleteCart";

    pub const CREATE_ORDER: &str = "/order.OrderService/CreateOrder";
    pub const LIST_ORDER: &str = "/order.OrderService/ListOrder";
    pub const LIST_ORDER_ADMIN: &str = "/order.OrderService/ListOrderAdmin";
    pub const DETAIL_ORDER: &str = "/order.OrderService/DetailOrder";
    pub const UPDATE_ORDER_STATUS: &str = "/order.OrderService/UpdateOrderStatus";

    pub const SUBSCRIBE_NEWSLETTER: &str = "/newsletter.NewsletterService/SubscribeNewsletter";

    /// Methods callable without a bearer token
    pub fn public_routes() -> PublicRoutes {
        PublicRoutes::new([
            REGISTER,
            LOGIN,
            DETAIL_PRODUCT,
            LIST_PRODUCT,
            HIGHLIGHT_PRODUCTS,
            SUBSCRIBE_NEWSLETTER,
        ])
    }
}

/// Dispatcher shared by all named services
#[derive(Clone)]
pub struct StorefrontGrpc {
    services: Arc<Services>,
    interceptor: AuthInterceptor,
}

impl StorefrontGrpc {
    pub fn new(services: Arc<Services>, interceptor: AuthInterceptor) -> Self {
        Self {
            services,
            interceptor,
        }
    }

    /// Register every storefront service on `server`
    pub fn into_router(self, server: &mut Server) -> Router {
        server
            .add_service(AuthServer(self.clone()))
            .add_service(ProductServer(self.clone()))
            .add_service(CartServer(self.clone()))
            .add_service(OrderServer(self.clone()))
            .add_service(NewsletterServer(self))
    }

    /// Decode, authenticate, run `handler`, encode
    fn route<B, M, R, H, Fut>(
        &self,
        method: &'static str,
        req: http::Request<B>,
        handler: H,
    ) -> BoxFuture<http::Response<BoxBody>, Infallible>
    where
        B: Body + Send + 'static,
        B::Error: Into<StdError> + Send + 'static,
        M: prost::Message + Default + Send + 'static,
        R: prost::Message + Send + 'static,
        H: Fn(Arc<Services>, Option<CallIdentity>, M) -> Fut + Clone + Send + 'static,
        Fut: Future<Output = Result<R, StorefrontError>> + Send + 'static,
    {
        let services = self.services.clone();
        let interceptor = self.interceptor.clone();

        let unary = tower::service_fn(move |request: Request<M>| {
            let services = services.clone();
            let interceptor = interceptor.clone();
            let handler = handler.clone();

            async move {
                interceptor
                    .intercept(method, request, move |request: Request<M>| async move {
                        let identity = request.identity().ok().cloned();
                        handler(services, identity, request.into_inner())
                            .await
                            .map(Response::new)
                            .map_err(Status::from)
                    })
                    .await
            }
        });

        Box::pin(async move {
            debug!(method, "Dispatching gRPC call");
            let mut grpc = tonic::server::Grpc::new(ProstCodec::<R, M>::default());
            Ok(grpc.unary(unary, req).await)
        })
    }
}

fn unimplemented() -> BoxFuture<http::Response<BoxBody>, Infallible> {
    Box::pin(async move {
        let mut response = http::Response::new(empty_body());
        let headers = response.headers_mut();
        headers.insert(Status::GRPC_STATUS, (Code::Unimplemented as i32).into());
        headers.insert(
            http::header::CONTENT_TYPE,
            tonic::metadata::GRPC_CONTENT_TYPE,
        );
        Ok(response)
    })
}

impl<B> Service<http::Request<B>> for StorefrontGrpc
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<BoxBody>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        use crate::grpc::proto::{auth, cart, newsletter, order, product};
        use methods::*;

        match req.uri().path() {
            REGISTER => self.route(REGISTER, req, |s, _, r: auth::RegisterRequest| async move {
                s.auth.register(r).await
            }),
            LOGIN => self.route(LOGIN, req, |s, _, r: auth::LoginRequest| async move {
                s.auth.login(r).await
            }),
            LOGOUT => self.route(LOGOUT, req, |s, id, _: auth::LogoutRequest| async move {
                s.auth.logout(id.as_ref()).await
            }),
            CHANGE_PASSWORD => self.route(
                CHANGE_PASSWORD,
                req,
                |s, id, r: auth::ChangePasswordRequest| async move {
                    s.auth.change_password(id.as_ref(), r).await
                },
            ),
            GET_PROFILE => self.route(
                GET_PROFILE,
                req,
                |s, id, _: auth::GetProfileRequest| async move {
                    s.auth.get_profile(id.as_ref()).await
                },
            ),

            CREATE_PRODUCT => self.route(
                CREATE_PRODUCT,
                req,
                |s, id, r: product::CreateProductRequest| async move {
                    s.products.create(id.as_ref(), r).await
                },
            ),
            DETAIL_PRODUCT => self.route(
                DETAIL_PRODUCT,
                req,
                |s, _, r: product::DetailProductRequest| async move { s.products.detail(r).await },
            ),
            EDIT_PRODUCT => self.route(
                EDIT_PRODUCT,
                req,
                |s, id, r: product::EditProductRequest| async move {
                    s.products.edit(id.as_ref(), r).await
                },
            ),
            DELETE_PRODUCT => self.route(
                DELETE_PRODUCT,
                req,
                |s, id, r: product::DeleteProductRequest| async move {
                    s.products.delete(id.as_ref(), r).await
                },
            ),
            LIST_PRODUCT => self.route(
                LIST_PRODUCT,
                req,
                |s, _, r: product::ListProductRequest| async move { s.products.list(r).await },
            ),
            HIGHLIGHT_PRODUCTS => self.route(
                HIGHLIGHT_PRODUCTS,
                req,
                |s, _, _: product::HighlightProductsRequest| async move {
                    s.products.highlight().await
                },
            ),

            ADD_PRODUCT_TO_CART => self.route(
                ADD_PRODUCT_TO_CART,
                req,
                |s, id, r: cart::AddProductToCartRequest| async move {
                    s.carts.add_product(id.as_ref(), r).await
                },
            ),
            LIST_CART => self.route(LIST_CART, req, |s, id, _: cart::ListCartRequest| async move {
                s.carts.list(id.as_ref()).await
            }),
            UPDATE_CART_QUANTITY => self.route(
                UPDATE_CART_QUANTITY,
                req,
                |s, id, r: cart::UpdateCartQuantityRequest| async move {
                    s.carts.update_quantity(id.as_ref(), r).await
                },
            ),
            DELETE_CART => self.route(
                DELETE_CART,
                req,
                |s, id, r: cart::DeleteCartRequest| async move {
                    s.carts.delete(id.as_ref(), r).await
                },
            ),

            CREATE_ORDER => self.route(
                CREATE_ORDER,
                req,
                |s, id, r: order::CreateOrderRequest| async move {
                    s.orders.create(id.as_ref(), r).await
                },
            ),
            LIST_ORDER => self.route(
                LIST_ORDER,
                req,
                |s, id, r: order::ListOrderRequest| async move {
                    s.orders.list(id.as_ref(), r).await
                },
            ),
            LIST_ORDER_ADMIN => self.route(
                LIST_ORDER_ADMIN,
                req,
                |s, id, r: order::ListOrderAdminRequest| async move {
                    s.orders.list_admin(id.as_ref(), r).await
                },
            ),
            DETAIL_ORDER => self.route(
                DETAIL_ORDER,
                req,
                |s, id, r: order::DetailOrderRequest| async move {
                    s.orders.detail(id.as_ref(), r).await
                },
            ),
            UPDATE_ORDER_STATUS => self.route(
                UPDATE_ORDER_STATUS,
                req,
                |s, id, r: order::UpdateOrderStatusRequest| async move {
                    s.orders.update_status(id.as_ref(), r).await
                },
            ),

            SUBSCRIBE_NEWSLETTER => self.route(
                SUBSCRIBE_NEWSLETTER,
                req,
                |s, _, r: newsletter::SubscribeNewsletterRequest| async move {
                    s.newsletters.subscribe(r).await
                },
            ),

            _ => unimplemented(),
        }
    }
}

macro_rules! named_server {
    ($(#[$meta:meta])* $server:ident => $name:literal) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $server(StorefrontGrpc);

        impl NamedService for $server {
            const NAME: &'static str = $name;
        }

        impl<B> Service<http::Request<B>> for $server
        where
            B: Body + Send + 'static,
            B::Error: Into<StdError> + Send + 'static,
        {
            type Response = http::Response<BoxBody>;
            type Error = Infallible;
            type Future = BoxFuture<Self::Response, Self::Error>;

            fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
                Service::<http::Request<B>>::poll_ready(&mut self.0, cx)
            }

            fn call(&mut self, req: http::Request<B>) -> Self::Future {
                self.0.call(req)
            }
        }
    };
}

named_server!(
    /// `auth.AuthService`
    AuthServer => "auth.AuthService"
);
named_server!(ProductServer => "product.ProductService");
named_server!(CartServer => "cart.CartService");
named_server!(OrderServer => "order.OrderService");
named_server!(NewsletterServer => "newsletter.NewsletterService");

#[cfg(test)]
mod tests {
    use super::methods::*;

    #[test]
    fn test_public_routes() {
        let routes = public_routes();

        for method in [REGISTER, LOGIN, DETAIL_PRODUCT, LIST_PRODUCT, HIGHLIGHT_PRODUCTS, SUBSCRIBE_NEWSLETTER] {
            assert!(routes.contains(method), "{method} should be public");
        }
        for method in [LOGOUT, CHANGE_PASSWORD, CREATE_PRODUCT, LIST_CART, CREATE_ORDER, LIST_ORDER_ADMIN] {
            assert!(!routes.contains(method), "{method} should be protected");
        }
    }

    #[test]
    fn test_method_names_match_service_prefix() {
        assert!(LOGIN.starts_with("/auth.AuthService/"));
        assert!(LIST_CART.starts_with("/cart.CartService/"));
        assert!(UPDATE_ORDER_STATUS.starts_with("/order.OrderService/"));
    }
}
