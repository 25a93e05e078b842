//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (resolution and typing happen in the loader)
//! - Reject settings the process cannot start with
//!
//! # Design Decisions
//! - Validation is a pure function: settings in, `Result` out
//! - Runs before an `AppConfig` is handed to anyone

use crate::config::loader::ConfigError;
use crate::config::schema::DatabaseSettings;

/// Check the resolved database settings for values that make startup
/// impossible. The defaults fill every field, so this only triggers when the
/// default table itself is changed to leave a required credential blank.
pub fn validate_database_settings(db: &DatabaseSettings) -> Result<(), ConfigError> {
    if db.user.is_empty() {
        return Err(ConfigError::EmptyDbUser);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(user: &str) -> DatabaseSettings {
        DatabaseSettings {
            host: "localhost".into(),
            port: "5432".into(),
            user: user.into(),
            password: "1234".into(),
            name: "mydatabase".into(),
            ssl_mode: "disable".into(),
            timezone: "Asia/Bangkok".into(),
        }
    }

    #[test]
    fn empty_db_user_is_rejected() {
        assert_eq!(
            validate_database_settings(&settings("")),
            Err(ConfigError::EmptyDbUser)
        );
    }

    #[test]
    fn non_empty_db_user_passes() {
        assert_eq!(validate_database_settings(&settings("postgres")), Ok(()));
    }
}
