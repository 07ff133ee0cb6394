//! HTTP inbound adapter exposing REST endpoints.
//!
//! ```text
//! POST   /auth/register
//! POST   /auth/login
//! GET    /auth/me
//! DELETE /user
//! GET    /posts
//! GET    /posts/tags
//! GET    /posts/{id}
//! POST   /posts
//! PATCH  /posts/{id}
//! DELETE /posts/{id}
//! ```

use actix_web::web;

pub mod error;
pub mod health;
pub mod posts;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;

/// Register the account and post endpoints along with the JSON and query
/// extractor configuration they rely on.
///
/// `GET /posts/tags` is registered ahead of `GET /posts/{id}` so the literal
/// segment wins.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use blog_backend::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .service(users::register)
        .service(users::login)
        .service(users::current_user)
        .service(users::delete_current_user)
        .service(posts::list_posts)
        .service(posts::list_tags)
        .service(posts::get_post)
        .service(posts::create_post)
        .service(posts::update_post)
        .service(posts::delete_post);
}
