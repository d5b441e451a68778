use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde::Serialize;
use votetally::Error;

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Message {
            message: message.into(),
        }
    }
}

/// A `votetally` error on its way to the client
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

/// Wire status for each error. Clients depend on these codes.
pub fn status_for(err: &Error) -> Status {
    match err {
        Error::VoterNotFound(_) | Error::CandidateNotFound(_) => Status::ExpectationFailed,
        Error::AlreadyVoted(_) => Status::new(423),
        Error::VoterExists(_) | Error::CandidateExists(_) => Status::Conflict,
        Error::InvalidAge(_) | Error::InvalidWeight(_) => Status::UnprocessableEntity,
        Error::InvalidInterval(_) => Status::new(424),
        Error::MalformedProof(_) => Status::new(425),
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = status_for(&self.0);
        (status, Json(Message::new(self.0.to_string()))).respond_to(req)
    }
}

#[catch(default)]
pub fn default_catcher(status: Status, _req: &Request<'_>) -> (Status, Json<Message>) {
    let reason = status.reason().unwrap_or("error").to_lowercase();
    (status, Json(Message::new(reason)))
}
