//! Composed view of a store principal.
//!
//! The `users` row mixes who the person is with how they authenticate.
//! [`Principal`] keeps the two apart: [`UserProfile`] carries the catalog
//! fields, [`AuthCredential`] the authentication metadata. Normalized lookup
//! columns are always derived from the profile when converting back to a row.

use crate::entities::user;
use chrono::NaiveDate;
use common::normalize;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::Set;

/// Who the user is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub user_name: String,
    pub display_name: String,
    pub birth_date: NaiveDate,
}

impl UserProfile {
    pub fn normalized_email(&self) -> String {
        normalize(&self.email)
    }

    pub fn normalized_user_name(&self) -> String {
        normalize(&self.user_name)
    }
}

/// How the user authenticates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthCredential {
    pub password_hash: Option<String>,
    pub lockout_enabled: bool,
    pub lockout_end: Option<DateTimeWithTimeZone>,
    pub access_failed_count: i32,
    pub email_confirmed: bool,
    pub phone_number: Option<String>,
    pub phone_number_confirmed: bool,
    pub two_factor_enabled: bool,
    pub security_stamp: Option<String>,
    pub concurrency_stamp: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub profile: UserProfile,
    pub credential: AuthCredential,
}

impl Principal {
    pub fn new(profile: UserProfile, credential: AuthCredential) -> Self {
        Self { profile, credential }
    }

    /// Whether `row` describes the same account: profile fields, normalized
    /// columns and the lockout/confirmation flags. Mutable credential state
    /// (hash, stamps, failure counter, lockout window) is not compared.
    pub fn matches_row(&self, row: &user::Model) -> bool {
        let profile = &self.profile;
        row.id == profile.id
            && row.email == profile.email
            && row.normalized_email == profile.normalized_email()
            && row.user_name == profile.user_name
            && row.normalized_user_name == profile.normalized_user_name()
            && row.display_name == profile.display_name
            && row.birth_date == profile.birth_date
            && row.lockout_enabled == self.credential.lockout_enabled
            && row.email_confirmed == self.credential.email_confirmed
    }

    pub fn into_active_model(self) -> user::ActiveModel {
        let normalized_email = self.profile.normalized_email();
        let normalized_user_name = self.profile.normalized_user_name();
        let Principal { profile, credential } = self;

        user::ActiveModel {
            id: Set(profile.id),
            email: Set(profile.email),
            normalized_email: Set(normalized_email),
            user_name: Set(profile.user_name),
            normalized_user_name: Set(normalized_user_name),
            password_hash: Set(credential.password_hash),
            lockout_enabled: Set(credential.lockout_enabled),
            email_confirmed: Set(credential.email_confirmed),
            display_name: Set(profile.display_name),
            birth_date: Set(profile.birth_date),
            security_stamp: Set(credential.security_stamp),
            concurrency_stamp: Set(credential.concurrency_stamp),
            phone_number: Set(credential.phone_number),
            phone_number_confirmed: Set(credential.phone_number_confirmed),
            two_factor_enabled: Set(credential.two_factor_enabled),
            lockout_end: Set(credential.lockout_end),
            access_failed_count: Set(credential.access_failed_count),
        }
    }
}

impl From<user::Model> for Principal {
    fn from(row: user::Model) -> Self {
        Self {
            profile: UserProfile {
                id: row.id,
                email: row.email,
                user_name: row.user_name,
                display_name: row.display_name,
                birth_date: row.birth_date,
            },
            credential: AuthCredential {
                password_hash: row.password_hash,
                lockout_enabled: row.lockout_enabled,
                lockout_end: row.lockout_end,
                access_failed_count: row.access_failed_count,
                email_confirmed: row.email_confirmed,
                phone_number: row.phone_number,
                phone_number_confirmed: row.phone_number_confirmed,
                two_factor_enabled: row.two_factor_enabled,
                security_stamp: row.security_stamp,
                concurrency_stamp: row.concurrency_stamp,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    fn principal() -> Principal {
        Principal::new(
            UserProfile {
                id: "ddf093a6-6cb5-4ff7-9a64-83da34aee005".to_string(),
                email: "gallojunior@gmail.com".to_string(),
                user_name: "GalloJunior".to_string(),
                display_name: "José Antonio Gallo Junior".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1981, 8, 5).unwrap(),
            },
            AuthCredential {
                password_hash: Some("$argon2id$dummy".to_string()),
                lockout_enabled: true,
                email_confirmed: true,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_active_model_derives_normalized_columns() {
        let active = principal().into_active_model();

        assert_eq!(
            active.normalized_email,
            ActiveValue::Set("GALLOJUNIOR@GMAIL.COM".to_string())
        );
        assert_eq!(
            active.normalized_user_name,
            ActiveValue::Set("GALLOJUNIOR".to_string())
        );
        assert_eq!(active.access_failed_count, ActiveValue::Set(0));
        assert_eq!(active.two_factor_enabled, ActiveValue::Set(false));
    }

    #[test]
    fn test_row_round_trip_and_match() {
        let original = principal();
        let row = user::Model {
            id: original.profile.id.clone(),
            email: original.profile.email.clone(),
            normalized_email: original.profile.normalized_email(),
            user_name: original.profile.user_name.clone(),
            normalized_user_name: original.profile.normalized_user_name(),
            password_hash: Some("$argon2id$other".to_string()),
            lockout_enabled: true,
            email_confirmed: true,
            display_name: original.profile.display_name.clone(),
            birth_date: original.profile.birth_date,
            security_stamp: None,
            concurrency_stamp: None,
            phone_number: None,
            phone_number_confirmed: false,
            two_factor_enabled: false,
            lockout_end: None,
            access_failed_count: 3,
        };

        // A different hash or failure counter is still the same account
        assert!(original.matches_row(&row));

        let loaded = Principal::from(row.clone());
        assert_eq!(loaded.profile, original.profile);
        assert_eq!(loaded.credential.access_failed_count, 3);

        let renamed = user::Model {
            display_name: "Someone Else".to_string(),
            ..row
        };
        assert!(!original.matches_row(&renamed));
    }
}
