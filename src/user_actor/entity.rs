use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch};

impl Entity for User {
    const KIND: &'static str = "user";
    type Id = String;
    type CreatePayload = UserCreate;
    type Patch = UserPatch;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, payload: UserCreate) -> Result<Self, String> {
        let user = Self {
            id,
            name: payload.name,
            email: payload.email,
            business_name: payload.business_name,
            role: payload.role,
        };
        validate(&user)?;
        Ok(user)
    }

    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(business_name) = patch.business_name {
            self.business_name = business_name;
        }
        validate(self)
    }

    /// No custom actions are defined for users.
    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

fn validate(user: &User) -> Result<(), String> {
    if user.name.trim().is_empty() {
        return Err("Name required".to_string());
    }
    if !user.email.contains('@') {
        return Err(format!("Invalid email: {}", user.email));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn create_requires_an_email_address() {
        let payload = UserCreate {
            name: "Rosa".to_string(),
            email: "rosa".to_string(),
            business_name: "Fonda Rosa".to_string(),
            role: Role::Restaurant,
        };
        assert!(User::from_create("user_1".into(), payload).is_err());
    }
}
