use tracing::{debug, instrument};
use crate::actor_framework::ResourceClient;
use crate::domain::{Role, User, UserCreate};
use crate::user_actor::UserError;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user, users);

impl UserClient {
    // Accepts a bare User (id ignored) so callers can build accounts with User::new.
    #[instrument(skip(self, user), fields(user_name = %user.name, role = %user.role))]
    pub async fn create_user(&self, user: User) -> Result<String, UserError> {
        debug!("Sending request");
        let payload = UserCreate {
            name: user.name,
            email: user.email,
            business_name: user.business_name,
            role: user.role,
        };
        self.inner.create(payload).await.map_err(UserError::from)
    }

    /// First registered account with `role`, if any.
    #[instrument(skip(self))]
    pub async fn first_with_role(&self, role: Role) -> Result<Option<User>, UserError> {
        let users = self.list_users().await?;
        Ok(users.into_iter().find(|u| u.role == role))
    }
}
