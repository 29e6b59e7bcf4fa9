use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{DisplayName, Email, NewUser, PasswordHash, Role},
};

pub struct RegisterUserCommand {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

impl UserCommandService {
    /// The very first account becomes the administrator. Afterwards only an
    /// admin may hand out the admin role.
    pub async fn register(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: RegisterUserCommand,
    ) -> ApplicationResult<UserDto> {
        let name = DisplayName::new(command.name)?;
        let email = Email::new(command.email)?;
        validate_password(&command.password)?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(ApplicationError::conflict("email already registered"));
        }

        let bootstrap = self.user_repo.count().await? == 0;
        let role = if bootstrap {
            Role::Admin
        } else {
            self.determine_role(actor, command.role)?
        };
        let password_hash = self.hash_password(&command.password).await?;
        let new_user = NewUser::new(name, email, password_hash, role, self.clock.now());

        let user = if bootstrap {
            match self.user_repo.insert_first_admin(new_user.clone()).await? {
                Some(user) => user,
                // A concurrent registration took the first account.
                None => {
                    let role = self.determine_role(actor, command.role)?;
                    self.user_repo.insert(NewUser { role, ..new_user }).await?
                }
            }
        } else {
            self.user_repo.insert(new_user).await?
        };
        tracing::info!(user_id = %user.id, role = %user.role, "user registered");

        Ok(user.into())
    }

    fn determine_role(
        &self,
        actor: Option<&AuthenticatedUser>,
        requested: Option<Role>,
    ) -> ApplicationResult<Role> {
        match requested.unwrap_or_default() {
            Role::User => Ok(Role::User),
            Role::Admin => {
                let requester = actor.ok_or_else(|| {
                    ApplicationError::forbidden("administrative privileges are required")
                })?;
                ensure_capability(requester, "users", "create")?;
                Ok(Role::Admin)
            }
        }
    }

    async fn hash_password(&self, password: &str) -> ApplicationResult<PasswordHash> {
        let hashed = self.password_hasher.hash(password).await?;
        Ok(PasswordHash::new(hashed)?)
    }
}
