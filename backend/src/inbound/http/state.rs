//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PostsCommand, PostsQuery, UserAccounts};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn UserAccounts>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub posts: Arc<dyn PostsCommand>,
}

/// Dependency bundle for HTTP handlers.
///
/// Built once at startup and shared across workers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn UserAccounts>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub posts: Arc<dyn PostsCommand>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use blog_backend::domain::{AccountService, PostService};
    /// use blog_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use blog_backend::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};
    /// use blog_backend::outbound::security::{Argon2PasswordHasher, JwtSessionTokens};
    /// use mockable::DefaultClock;
    ///
    /// let users = Arc::new(InMemoryUserRepository::default());
    /// let tokens = Arc::new(JwtSessionTokens::new(b"signing-key", chrono::Duration::hours(1)));
    /// let accounts = AccountService::new(
    ///     users.clone(),
    ///     Arc::new(Argon2PasswordHasher::default()),
    ///     tokens,
    ///     Arc::new(DefaultClock),
    /// );
    /// let posts = Arc::new(PostService::new(
    ///     Arc::new(InMemoryPostRepository::default()),
    ///     users,
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     accounts: Arc::new(accounts),
    ///     posts_query: posts.clone(),
    ///     posts,
    /// });
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            posts_query,
            posts,
        } = ports;
        Self {
            accounts,
            posts_query,
            posts,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
