use crate::domain::{
    Email, NewUserRecord, User, UserId, UserStore, UserStoreError,
};
use std::collections::HashMap;

#[derive(Default)]
pub struct HashmapUserStore {
    users: HashMap<UserId, User>,
    last_id: i64,
}

impl HashmapUserStore {
    fn email_taken_by_other(&self, email: &Email, id: Option<&UserId>) -> bool {
        self.users
            .values()
            .any(|user| &user.email == email && Some(&user.id) != id)
    }
}

#[async_trait::async_trait]
impl UserStore for HashmapUserStore {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.values().find(|user| &user.email == email).cloned())
    }

    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.get(id).cloned())
    }

    async fn exists_by_id(&self, id: &UserId) -> Result<bool, UserStoreError> {
        Ok(self.users.contains_key(id))
    }

    async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn add_user(
        &mut self,
        record: NewUserRecord,
    ) -> Result<User, UserStoreError> {
        if self.email_taken_by_other(&record.email, None) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        self.last_id += 1;
        let user = User::from_record(UserId::new(self.last_id), record);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(
        &mut self,
        user: &User,
    ) -> Result<User, UserStoreError> {
        if !self.users.contains_key(&user.id) {
            return Err(UserStoreError::UserNotFound);
        }
        if self.email_taken_by_other(&user.email, Some(&user.id)) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        self.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete_by_id(
        &mut self,
        id: &UserId,
    ) -> Result<(), UserStoreError> {
        match self.users.remove(id) {
            Some(_) => Ok(()),
            None => Err(UserStoreError::UserNotFound),
        }
    }
}
