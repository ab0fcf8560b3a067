use tower_sessions::Session;

use crate::server::{
    error::{access::AccessError, Error},
    model::session::user::SessionActor,
};

/// Retrieves the acting user's ID from the session
///
/// The ID is placed in the session by the host application's login flow; role levels are
/// resolved later by the service, so an ID unknown to the role store is not an error here.
///
/// # Returns
/// - `Ok(i32)`: User ID of the acting user
/// - `Err(Error::AccessError(AccessError::NotLoggedIn))`: No user ID in session
/// - `Err(Error::AccessError(AccessError::MalformedSessionActor))`: Stored ID is not a user ID
/// - `Err(Error::SessionError)`: Session read failed
pub async fn get_actor_from_session(session: &Session) -> Result<i32, Error> {
    let Some(user_id) = SessionActor::get(session).await? else {
        return Err(Error::AccessError(AccessError::NotLoggedIn));
    };

    Ok(user_id)
}
