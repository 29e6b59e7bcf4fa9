// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Capability, Role, UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rebuild the calling user from the facts of a verified token.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let ctx = ClaimsContext::from_facts(facts);

    let user_id = ctx
        .user_id
        .ok_or_else(|| ApplicationError::unauthorized("missing user id"))?;
    let user_id = UserId::parse(&user_id)
        .map_err(|_| ApplicationError::unauthorized("malformed user id"))?;
    let name = ctx
        .name
        .ok_or_else(|| ApplicationError::unauthorized("missing user name"))?;
    let role = ctx
        .role
        .ok_or_else(|| ApplicationError::unauthorized("missing role"))?;
    let issued_at = ctx
        .issued_at
        .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
    let expires_at = ctx
        .expires_at
        .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

    let mut capabilities = role.default_capabilities();
    capabilities.extend(ctx.capabilities);

    Ok(AuthenticatedUser {
        id: user_id,
        name,
        role,
        capabilities,
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
    })
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<String>,
    name: Option<String>,
    role: Option<Role>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
    capabilities: HashSet<Capability>,
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = ClaimsContext::default();
        for fact in facts {
            ctx.apply(fact.predicate);
        }
        ctx
    }

    fn apply(&mut self, predicate: Predicate) {
        let name = predicate.name.clone();
        let mut terms = predicate.terms.into_iter();
        match (name.as_str(), terms.next(), terms.next()) {
            ("user", Some(Term::Str(id)), Some(Term::Str(display))) => {
                self.user_id = Some(id);
                self.name = Some(display);
            }
            ("role", Some(Term::Str(role)), None) => {
                self.role = role.parse().ok();
            }
            ("issued_at", Some(Term::Date(secs)), None) => {
                self.issued_at = Some(UNIX_EPOCH + Duration::from_secs(secs));
            }
            ("expires_at", Some(Term::Date(secs)), None) => {
                self.expires_at = Some(UNIX_EPOCH + Duration::from_secs(secs));
            }
            ("right", Some(Term::Str(resource)), Some(Term::Str(action))) => {
                self.capabilities.insert(Capability::new(resource, action));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(name: &str, terms: Vec<Term>) -> Fact {
        Fact::new(name.to_string(), terms)
    }

    #[test]
    fn missing_role_is_unauthorized() {
        let facts = vec![fact(
            "user",
            vec![
                Term::Str(UserId::generate().to_string()),
                Term::Str("Alice".into()),
            ],
        )];
        let err = parse_claims(facts).unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    #[test]
    fn extra_rights_extend_role_defaults() {
        let id = UserId::generate();
        let facts = vec![
            fact(
                "user",
                vec![Term::Str(id.to_string()), Term::Str("Bob".into())],
            ),
            fact("role", vec![Term::Str("user".into())]),
            fact("issued_at", vec![Term::Date(1_700_000_000)]),
            fact("expires_at", vec![Term::Date(1_700_003_600)]),
            fact(
                "right",
                vec![Term::Str("movements".into()), Term::Str("read".into())],
            ),
        ];
        let user = parse_claims(facts).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.name, "Bob");
        assert!(user.has_capability("requests", "create"));
        assert!(user.has_capability("movements", "read"));
        assert!(!user.is_admin());
    }
}
