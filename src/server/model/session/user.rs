use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::{access::AccessError, Error};

/// Session key holding the acting user's ID, shared with the host application's login flow.
pub const SESSION_ACTOR_KEY: &str = "chronicle:user:id";

/// Acting user ID as stored in the session.
///
/// Chronicle writes the ID as a JSON number. The host login flow may also store it as a numeric
/// string, which is accepted on read.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
enum StoredActorId {
    Number(i32),
    Text(String),
}

impl StoredActorId {
    fn into_actor_id(self) -> Result<i32, AccessError> {
        match self {
            Self::Number(id) => Ok(id),
            Self::Text(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| AccessError::MalformedSessionActor(raw)),
        }
    }
}

/// Typed access to the acting user's ID in the session.
pub struct SessionActor;

impl SessionActor {
    /// Stores the acting user's ID
    pub async fn insert(session: &Session, actor_id: i32) -> Result<(), Error> {
        session
            .insert(SESSION_ACTOR_KEY, StoredActorId::Number(actor_id))
            .await?;

        Ok(())
    }

    /// Reads the acting user's ID
    ///
    /// # Returns
    /// - `Ok(Some(i32))`: Actor ID present
    /// - `Ok(None)`: Nobody is logged in
    /// - `Err(Error::AccessError(AccessError::MalformedSessionActor))`: Stored value is not an ID
    /// - `Err(Error::SessionError)`: Session store read failed
    pub async fn get(session: &Session) -> Result<Option<i32>, Error> {
        let Some(stored) = session.get::<StoredActorId>(SESSION_ACTOR_KEY).await? else {
            return Ok(None);
        };

        Ok(Some(stored.into_actor_id()?))
    }
}
