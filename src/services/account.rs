//! Registration and login. There are no credentials: login checks the form
//! and that the account exists.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::user::{LoginPayload, RegisterPayload, User};
use crate::services::validation::{validate_login, validate_register};
use crate::store::Repository;
use crate::utils::error::AppError;

/// Four letters from the name followed by six random hex digits.
pub fn referral_code_for(name: &str) -> String {
    let prefix: String = name
        .chars()
        .filter(char::is_ascii_alphabetic)
        .take(4)
        .collect::<String>()
        .to_ascii_uppercase();
    let suffix = Uuid::new_v4().simple().to_string()[..6].to_ascii_uppercase();
    format!("{}{}", prefix, suffix)
}

pub fn register<R>(repo: &R, form: &RegisterPayload, now: DateTime<Utc>) -> Result<User, AppError>
where
    R: Repository + ?Sized,
{
    let role = validate_register(form)?;

    if let Some(code) = form.referral_code.as_deref().map(str::trim) {
        if !code.is_empty() && repo.find_user_by_referral_code(code)?.is_none() {
            return Err(AppError::invalid_field(
                "referral_code",
                "Referral code not found",
            ));
        }
    }

    let user = User {
        id: Uuid::new_v4(),
        name: form.name.trim().to_string(),
        email: form.email.trim().to_ascii_lowercase(),
        role,
        points: 0,
        points_expiry: None,
        referral_code: Some(referral_code_for(&form.name)),
        profile_image: None,
        created_at: now,
    };
    repo.insert_user(user.clone())?;

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");
    Ok(user)
}

pub fn login<R>(repo: &R, form: &LoginPayload) -> Result<User, AppError>
where
    R: Repository + ?Sized,
{
    validate_login(form)?;
    let user = repo
        .find_user_by_email(&form.email)?
        .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;
    use crate::store::InMemoryStore;

    fn form(email: &str, referral: Option<&str>) -> RegisterPayload {
        RegisterPayload {
            name: "Rina Wijaya".to_string(),
            email: email.to_string(),
            password: "supersecret".to_string(),
            confirm_password: "supersecret".to_string(),
            role: "organizer".to_string(),
            referral_code: referral.map(str::to_string),
        }
    }

    #[test]
    fn test_referral_code_shape() {
        let code = referral_code_for("Rina Wijaya");
        assert!(code.starts_with("RINA"));
        assert_eq!(code.len(), 10);
    }

    #[test]
    fn test_register_then_login() {
        let store = InMemoryStore::new();
        let user = register(&store, &form("Rina@Example.com", None), Utc::now()).unwrap();
        assert_eq!(user.role, UserRole::Organizer);
        assert_eq!(user.points, 0);
        assert_eq!(user.email, "rina@example.com");

        let logged_in = login(
            &store,
            &LoginPayload {
                email: "rina@example.com".to_string(),
                password: "whatever1".to_string(),
            },
        )
        .unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[test]
    fn test_register_with_referral_code() {
        let store = InMemoryStore::new();
        let referrer = register(&store, &form("a@example.com", None), Utc::now()).unwrap();
        let code = referrer.referral_code.unwrap();

        assert!(register(&store, &form("b@example.com", Some(&code)), Utc::now()).is_ok());
        let err = register(&store, &form("c@example.com", Some("XXXX000000")), Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_unknown_login_is_auth_error() {
        let store = InMemoryStore::new();
        let err = login(
            &store,
            &LoginPayload {
                email: "ghost@example.com".to_string(),
                password: "password1".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
    }
}
