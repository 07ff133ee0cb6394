//! Builders wiring adapters and domain services into HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use blog_backend::domain::ports::{PostRepository, UserRepository};
use blog_backend::domain::{AccountService, PostService};
use blog_backend::inbound::http::state::{HttpState, HttpStatePorts};
use blog_backend::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};
use blog_backend::outbound::persistence::{DieselPostRepository, DieselUserRepository};
use blog_backend::outbound::security::{Argon2PasswordHasher, JwtSessionTokens};

use super::ServerConfig;

/// Build HTTP state backed by PostgreSQL when a pool is configured, otherwise
/// by in-memory stores.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let tokens = Arc::new(JwtSessionTokens::new(
        config.session.key.as_bytes(),
        config.session.ttl,
    ));
    match &config.db_pool {
        Some(pool) => build_with_stores(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselPostRepository::new(pool.clone())),
            tokens,
        ),
        None => build_with_stores(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            tokens,
        ),
    }
}

fn build_with_stores<U, P>(users: Arc<U>, posts: Arc<P>, tokens: Arc<JwtSessionTokens>) -> HttpState
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let accounts = AccountService::new(
        users.clone(),
        Arc::new(Argon2PasswordHasher::default()),
        tokens,
        clock.clone(),
    );
    let post_service = Arc::new(PostService::new(posts, users, clock));

    HttpState::new(HttpStatePorts {
        accounts: Arc::new(accounts),
        posts_query: post_service.clone(),
        posts: post_service,
    })
}
