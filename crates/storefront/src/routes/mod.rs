//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness check
//! GET    /health/ready           - Readiness check (pings the database)
//!
//! # Products
//! GET    /products               - Product listing
//! GET    /products/{id}          - Product detail
//!
//! # Cart (works signed-out via the session, signed-in via the account)
//! GET    /cart                   - Cart contents with subtotal
//! POST   /cart/add               - Add a line, merging on identity key
//! POST   /cart/update            - Set a line's quantity (rejects < 1)
//! POST   /cart/adjust            - Adjust a line's quantity (clamps at 1)
//! POST   /cart/remove            - Remove a line
//! GET    /cart/count             - Total unit count for the badge
//!
//! # Auth
//! POST   /auth/register          - Create an account
//! POST   /auth/login             - Sign in (merges the session cart)
//! POST   /auth/logout            - Sign out
//! GET    /auth/me                - Current user
//!
//! # Admin (requires the product-management capability)
//! GET    /admin/products         - Product listing
//! POST   /admin/products         - Create a product
//! PUT    /admin/products/{id}    - Update a product
//! DELETE /admin/products/{id}    - Delete a product
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .layer(auth_rate_limiter())
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/adjust", post(cart::adjust))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/products/{id}",
            axum::routing::put(admin::update_product).delete(admin::delete_product),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
}
