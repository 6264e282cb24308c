use serde::{Deserialize, Serialize};

use crate::persistence::Writable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDocument {
    pub username: String,
}

impl Writable for User {
    type Document = UserDocument;

    fn to_document(&self) -> UserDocument {
        UserDocument {
            username: self.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_document() {
        let user = User::new("alice");
        assert_eq!(user.username(), "alice");
        assert_eq!(
            user.to_document(),
            UserDocument {
                username: "alice".to_string()
            }
        );
    }
}
