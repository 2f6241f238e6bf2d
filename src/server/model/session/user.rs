use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_USER_ID_KEY: &str = "helpdesk:user:id";

/// Helpdesk user ID of the signed in user, stored as a string in the session.
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserId(pub String);

impl SessionUserId {
    /// Store the signed in user's ID, replacing any user already in the session
    pub async fn insert(session: &Session, user_id: i32) -> Result<(), Error> {
        session
            .insert(SESSION_USER_ID_KEY, SessionUserId(user_id.to_string()))
            .await?;

        Ok(())
    }

    /// Signed in user's ID, `None` when nobody is signed in
    pub async fn get(session: &Session) -> Result<Option<i32>, Error> {
        let Some(SessionUserId(raw_id)) = session.get::<SessionUserId>(SESSION_USER_ID_KEY).await?
        else {
            return Ok(None);
        };

        let user_id = raw_id
            .parse::<i32>()
            .map_err(|e| Error::ParseError(format!("Failed to parse session user id: {}", e)))?;

        Ok(Some(user_id))
    }
}
