//! Request actors for the moderation surfaces.
//!
//! Admin identity is a role claim on the request rather than a credential
//! check; authentication itself belongs to a fronting proxy.

use axum::http::HeaderMap;

/// Who is performing an operation, as claimed by the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Guest,
    User(String),
    Admin,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin)
    }

    /// The authenticated user id, when the actor is a signed-in user.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Actor::User(id) => Some(id),
            _ => None,
        }
    }

    /// Derive the actor from the `x-actor-role` / `x-actor-id` headers.
    /// Anything unrecognized degrades to `Guest`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let role = headers
            .get("x-actor-role")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        match role.trim().to_ascii_lowercase().as_str() {
            "admin" => Actor::Admin,
            "user" | "owner" => headers
                .get("x-actor-id")
                .and_then(|value| value.to_str().ok())
                .filter(|id| !id.trim().is_empty())
                .map(|id| Actor::User(id.trim().to_string()))
                .unwrap_or(Actor::Guest),
            _ => Actor::Guest,
        }
    }
}
