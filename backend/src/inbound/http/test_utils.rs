//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::UserId;
use crate::domain::ports::{MockPostsCommand, MockPostsQuery, MockUserAccounts};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

const TOKEN_PREFIX: &str = "token-for-";

/// Build HTTP state from mocked driving ports.
pub fn state_with(
    accounts: MockUserAccounts,
    posts_query: MockPostsQuery,
    posts: MockPostsCommand,
) -> HttpState {
    HttpState::new(HttpStatePorts {
        accounts: Arc::new(accounts),
        posts_query: Arc::new(posts_query),
        posts: Arc::new(posts),
    })
}

/// Build HTTP state where only the account port carries expectations.
pub fn state_with_accounts(accounts: MockUserAccounts) -> HttpState {
    state_with(accounts, MockPostsQuery::new(), MockPostsCommand::new())
}

/// Account mock whose `session_user` accepts tokens minted by [`bearer_for`].
pub fn accounts_with_sessions() -> MockUserAccounts {
    let mut accounts = MockUserAccounts::new();
    accounts.expect_session_user().returning(|token| {
        token
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|raw| UserId::new(raw).ok())
    });
    accounts
}

/// `Authorization` header value understood by [`accounts_with_sessions`].
pub fn bearer_for(user_id: &UserId) -> String {
    format!("Bearer {TOKEN_PREFIX}{user_id}")
}
