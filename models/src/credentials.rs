use crate::{Site, User};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sign-in credentials (request) and the issued session (response).
///
/// On the way out `name`/`password` are set and `user` names the user to
/// impersonate; on the way back `token` holds the session token and `site`/`user`
/// identify where and as whom the session was opened.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@password", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "@token", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Credentials {
    pub fn sign_in(
        name: impl Into<String>,
        password: impl Into<String>,
        content_url: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            password: Some(password.into()),
            site: Some(Site::with_content_url(content_url)),
            ..Self::default()
        }
    }

    pub fn impersonate(mut self, user_id: impl Into<String>) -> Self {
        self.user = Some(User::with_id(user_id));
        self
    }
}

// Password and token stay out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("site", &self.site)
            .field("user", &self.user)
            .finish()
    }
}
