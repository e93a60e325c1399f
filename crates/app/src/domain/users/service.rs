//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{hash_password, verify_password},
    database::Db,
    domain::{
        access::{Action, Principal, authorize},
        users::{
            data::{NewUser, PreferencesUpdate, Registration},
            errors::UsersServiceError,
            records::{UserProfile, UserRecord},
            repository::PgUsersRepository,
        },
        validation::ValidationErrors,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }

    async fn profile(&self, principal: &Principal) -> Result<UserProfile, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, principal.user).await?;
        let orders = self.repository.list_order_uuids(&mut tx, principal.user).await?;

        tx.commit().await?;

        Ok(UserProfile { user, orders })
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, registration: Registration) -> Result<UserRecord, UsersServiceError> {
        let user = registration.validate()?;

        self.create_user(user).await
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let (username_taken, email_taken) = self
            .repository
            .find_taken_identities(&mut tx, &user.username, &user.email)
            .await?;

        let mut errors = ValidationErrors::new();

        if email_taken {
            errors.add("email", "Email already taken");
        }

        if username_taken {
            errors.add("username", "Username already taken");
        }

        errors.into_result()?;

        let password_hash = hash_password(&user.password)?;

        let created = self
            .repository
            .create_user(&mut tx, &user, &password_hash)
            .await?;

        tx.commit().await?;

        info!(user = %created.uuid, is_staff = created.is_staff, "user created");

        Ok(created)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self.repository.find_credentials(&mut tx, username).await?;

        tx.commit().await?;

        let credentials = credentials.ok_or(UsersServiceError::InvalidCredentials)?;

        if verify_password(password, &credentials.password_hash)? {
            Ok(credentials.user)
        } else {
            Err(UsersServiceError::InvalidCredentials)
        }
    }

    async fn verify_password(
        &self,
        principal: &Principal,
        password: &str,
    ) -> Result<bool, UsersServiceError> {
        authorize(Some(principal), Action::ManageAccount, None)?;

        let mut tx = self.db.begin().await?;

        let credentials = self.repository.get_credentials(&mut tx, principal.user).await?;

        tx.commit().await?;

        Ok(verify_password(password, &credentials.password_hash)?)
    }

    async fn get_profile(&self, principal: &Principal) -> Result<UserProfile, UsersServiceError> {
        authorize(Some(principal), Action::ManageAccount, None)?;

        self.profile(principal).await
    }

    async fn get_admin_profile(
        &self,
        principal: &Principal,
    ) -> Result<UserProfile, UsersServiceError> {
        authorize(Some(principal), Action::AdminView, None)?;

        self.profile(principal).await
    }

    async fn update_preferences(
        &self,
        principal: &Principal,
        update: PreferencesUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        authorize(Some(principal), Action::ManageAccount, None)?;

        if update.is_empty() {
            return Err(ValidationErrors::single(
                "error",
                "Could not update email preferences",
            )
            .into());
        }

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_preferences(&mut tx, principal.user, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Validate a sign-up form and create a regular user.
    async fn register(&self, registration: Registration) -> Result<UserRecord, UsersServiceError>;

    /// Create a user from already-shaped data, still rejecting taken usernames and emails.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Check a username and password pair.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Re-check the caller's own password.
    async fn verify_password(
        &self,
        principal: &Principal,
        password: &str,
    ) -> Result<bool, UsersServiceError>;

    async fn get_profile(&self, principal: &Principal) -> Result<UserProfile, UsersServiceError>;

    /// Same as [`UsersService::get_profile`], for staff only.
    async fn get_admin_profile(
        &self,
        principal: &Principal,
    ) -> Result<UserProfile, UsersServiceError>;

    async fn update_preferences(
        &self,
        principal: &Principal,
        update: PreferencesUpdate,
    ) -> Result<UserRecord, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::access::AccessError,
        test::{
            TestContext,
            helpers::{create_user, place_order_with_item},
        },
    };

    use super::*;

    fn registration(username: &str, email: &str) -> Registration {
        Registration {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some("hunter22".to_string()),
            confirmation: Some("hunter22".to_string()),
            receive_emails_order_updates: None,
            receive_emails_new_items: Some(true),
        }
    }

    #[tokio::test]
    async fn register_then_authenticate() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register(registration("weaver", "weaver@example.com"))
            .await?;

        assert!(user.receive_emails_new_items);
        assert!(user.receive_emails_order_updates);

        let authenticated = ctx.users.authenticate("weaver", "hunter22").await?;

        assert_eq!(authenticated.uuid, user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_or_unknown_user_cannot_log_in() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .register(registration("weaver", "weaver@example.com"))
            .await?;

        assert!(matches!(
            ctx.users.authenticate("weaver", "wrong").await,
            Err(UsersServiceError::InvalidCredentials)
        ));
        assert!(matches!(
            ctx.users.authenticate("nobody", "hunter22").await,
            Err(UsersServiceError::InvalidCredentials)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn taken_username_and_email_are_validation_errors() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .register(registration("weaver", "weaver@example.com"))
            .await?;

        let Err(UsersServiceError::Validation(errors)) = ctx
            .users
            .register(registration("weaver", "weaver@example.com"))
            .await
        else {
            panic!("expected validation error");
        };

        assert_eq!(errors.get("username"), Some("Username already taken"));
        assert_eq!(errors.get("email"), Some("Email already taken"));

        Ok(())
    }

    #[tokio::test]
    async fn verify_password_checks_the_callers_own_password() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx
            .users
            .register(registration("weaver", "weaver@example.com"))
            .await?;
        let principal = Principal::user(user.uuid);

        assert!(ctx.users.verify_password(&principal, "hunter22").await?);
        assert!(!ctx.users.verify_password(&principal, "hunter23").await?);

        Ok(())
    }

    #[tokio::test]
    async fn profile_lists_owned_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "weaver", false).await?;
        let principal = Principal::user(user.uuid);

        let order = place_order_with_item(&ctx, &principal, "4.99").await?;

        let profile = ctx.users.get_profile(&principal).await?;

        assert_eq!(profile.user.uuid, user.uuid);
        assert_eq!(profile.orders, vec![order.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn admin_profile_is_staff_only() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "weaver", false).await?;
        let admin = create_user(&ctx, "curator", true).await?;

        let result = ctx
            .users
            .get_admin_profile(&Principal::user(user.uuid))
            .await;

        assert!(matches!(
            result,
            Err(UsersServiceError::Access(AccessError::Forbidden))
        ));

        let profile = ctx
            .users
            .get_admin_profile(&Principal::staff(admin.uuid))
            .await?;

        assert!(profile.user.is_staff);

        Ok(())
    }

    #[tokio::test]
    async fn preferences_update_is_partial() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "weaver", false).await?;
        let principal = Principal::user(user.uuid);

        let updated = ctx
            .users
            .update_preferences(
                &principal,
                PreferencesUpdate {
                    receive_emails_new_items: Some(true),
                    receive_emails_order_updates: None,
                },
            )
            .await?;

        assert!(updated.receive_emails_new_items);
        assert_eq!(
            updated.receive_emails_order_updates,
            user.receive_emails_order_updates
        );

        let result = ctx
            .users
            .update_preferences(&principal, PreferencesUpdate::default())
            .await;

        assert!(matches!(result, Err(UsersServiceError::Validation(_))));

        Ok(())
    }
}
