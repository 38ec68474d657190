//! Session token table built from the settings file.
//!
//! Authentication is delegated to whoever provisions the settings file: each
//! `[[sessions]]` entry binds a bearer token to a condominium, a role and a
//! plan tier. The provider validates the table once at startup and answers
//! token lookups for the lifetime of the process.

use crate::access::{PlanTier, Role, Session};
use crate::config::settings::Settings;
use crate::errors::{Error, Result};
use std::collections::HashMap;

/// Resolves bearer tokens to authenticated sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionProvider {
    sessions: HashMap<String, Session>,
}

impl SessionProvider {
    /// Builds the provider from the `[[sessions]]` entries of the settings.
    ///
    /// Every entry is validated eagerly so a bad table stops the service at
    /// startup instead of surfacing as a 401 later.
    ///
    /// # Errors
    /// Returns `Error::Config` for duplicate tokens, unknown role or plan
    /// spellings, or a session bound to a condominium the settings do not
    /// declare.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let known_condominiums: Vec<&str> = settings
            .condominiums
            .iter()
            .map(|c| c.id.as_str())
            .collect();

        let mut sessions = HashMap::new();
        for entry in &settings.sessions {
            if !known_condominiums.contains(&entry.condominium.as_str()) {
                return Err(Error::Config {
                    message: format!(
                        "session token references unknown condominium {:?}",
                        entry.condominium
                    ),
                });
            }

            let session = Session {
                condominium_id: entry.condominium.clone(),
                role: Role::parse(&entry.role)?,
                plan: PlanTier::parse(&entry.plan)?,
            };

            if sessions.insert(entry.token.clone(), session).is_some() {
                return Err(Error::Config {
                    message: format!("duplicate session token {:?}", entry.token),
                });
            }
        }

        Ok(Self { sessions })
    }

    /// Looks up the session for a bearer token.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).cloned()
    }

    /// Number of configured sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn settings_from(toml_str: &str) -> Settings {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_resolve_configured_token() {
        let settings = settings_from(
            r#"
            [[condominiums]]
            id = "torre-alba"
            name = "Torre Alba"
            plan = "PRO"

            [[sessions]]
            token = "dev-admin-token"
            condominium = "torre-alba"
            role = "STAFF"
            plan = "PRO"
        "#,
        );

        let provider = SessionProvider::from_settings(&settings).unwrap();
        assert_eq!(provider.len(), 1);

        let session = provider.resolve("dev-admin-token").unwrap();
        assert_eq!(session.condominium_id, "torre-alba");
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.plan, PlanTier::Pro);

        assert!(provider.resolve("unknown-token").is_none());
    }

    #[test]
    fn test_unknown_condominium_is_rejected() {
        let settings = settings_from(
            r#"
            [[sessions]]
            token = "t"
            condominium = "nowhere"
            role = "ADMIN"
            plan = "FREE"
        "#,
        );

        let err = SessionProvider::from_settings(&settings).unwrap_err();
        assert!(matches!(err, Error::Config { message: _ }));
    }

    #[test]
    fn test_duplicate_token_is_rejected() {
        let settings = settings_from(
            r#"
            [[condominiums]]
            id = "torre-alba"
            name = "Torre Alba"
            plan = "PRO"

            [[sessions]]
            token = "same"
            condominium = "torre-alba"
            role = "ADMIN"
            plan = "PRO"

            [[sessions]]
            token = "same"
            condominium = "torre-alba"
            role = "RESIDENT"
            plan = "PRO"
        "#,
        );

        let err = SessionProvider::from_settings(&settings).unwrap_err();
        assert!(matches!(err, Error::Config { message: _ }));
    }

    #[test]
    fn test_bad_role_spelling_is_rejected() {
        let settings = settings_from(
            r#"
            [[condominiums]]
            id = "torre-alba"
            name = "Torre Alba"
            plan = "PRO"

            [[sessions]]
            token = "t"
            condominium = "torre-alba"
            role = "OWNER"
            plan = "PRO"
        "#,
        );

        assert!(SessionProvider::from_settings(&settings).is_err());
    }

    #[test]
    fn test_empty_settings_give_empty_provider() {
        let provider = SessionProvider::from_settings(&Settings::default()).unwrap();
        assert!(provider.is_empty());
    }
}
