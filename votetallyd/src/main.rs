use error::{ApiError, Message};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};
use serde::Deserialize;
use serde_json::{json, Value};
use votetally::*;

#[macro_use]
extern crate rocket;

mod config;
mod cors;
mod error;
mod state;

pub type ApiResult<T> = std::result::Result<(Status, Json<T>), ApiError>;

// Success codes of the public contract
const VOTER_CREATED: Status = Status::new(218);
const VOTER_FOUND: Status = Status::new(222);
const VOTERS_LISTED: Status = Status::new(223);
const VOTER_UPDATED: Status = Status::new(224);
const VOTER_DELETED: Status = Status::new(225);
const CANDIDATE_CREATED: Status = Status::new(226);
const CANDIDATES_LISTED: Status = Status::new(227);
const VOTE_CAST: Status = Status::new(228);
const VOTE_COUNT: Status = Status::new(229);
const CANDIDATES_BY_PARTY: Status = Status::new(230);
const RESULTS: Status = Status::new(231);
const WINNERS: Status = Status::new(232);
const TIMELINE: Status = Status::new(233);
const WEIGHTED_VOTE_CAST: Status = Status::new(234);
const RANGE_TALLY: Status = Status::new(235);
const BALLOT_ADMITTED: Status = Status::new(236);
const HOMOMORPHIC_TALLY: Status = Status::new(237);
const DP_ANALYTICS: Status = Status::new(238);
const RANKED_BALLOT: Status = Status::new(239);
const AUDIT_STARTED: Status = Status::new(240);

#[derive(Debug, Deserialize)]
struct NewVoter {
    voter_id: VoterId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct VoterUpdate {
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct NewCandidate {
    candidate_id: CandidateId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    party: String,
}

#[derive(Debug, Deserialize)]
struct VoteRequest {
    voter_id: VoterId,
    candidate_id: CandidateId,
}

#[post("/api/voters", data = "<voter>")]
fn create_voter(election: &State<SharedElection>, voter: Json<NewVoter>) -> ApiResult<Voter> {
    let voter = voter.into_inner();
    let created = election
        .write()
        .register_voter(voter.voter_id, voter.name, voter.age.as_ref())?;
    Ok((VOTER_CREATED, Json(created)))
}

#[get("/api/voters/<voter_id>")]
fn read_voter(election: &State<SharedElection>, voter_id: VoterId) -> ApiResult<Voter> {
    let voter = election.read().get_voter(voter_id)?;
    Ok((VOTER_FOUND, Json(voter)))
}

#[get("/api/voters")]
fn list_voters(election: &State<SharedElection>) -> (Status, Json<Value>) {
    let voters = election.read().registry().list_voters();
    (VOTERS_LISTED, Json(json!({ "voters": voters })))
}

#[put("/api/voters/<voter_id>", data = "<update>")]
fn update_voter(
    election: &State<SharedElection>,
    voter_id: VoterId,
    update: Json<VoterUpdate>,
) -> ApiResult<Voter> {
    let update = update.into_inner();
    let updated = election
        .write()
        .update_voter(voter_id, update.name, update.age.as_ref())?;
    Ok((VOTER_UPDATED, Json(updated)))
}

#[delete("/api/voters/<voter_id>")]
fn delete_voter(election: &State<SharedElection>, voter_id: VoterId) -> (Status, Json<Message>) {
    election.write().delete_voter(voter_id);
    let message = format!("voter with id: {} deleted successfully", voter_id);
    (VOTER_DELETED, Json(Message::new(message)))
}

#[post("/api/candidates", data = "<candidate>")]
fn create_candidate(
    election: &State<SharedElection>,
    candidate: Json<NewCandidate>,
) -> ApiResult<Candidate> {
    let candidate = candidate.into_inner();
    let created = election.write().register_candidate(
        candidate.candidate_id,
        candidate.name,
        candidate.party,
    )?;
    Ok((CANDIDATE_CREATED, Json(created)))
}

#[get("/api/candidates?<party>")]
fn list_candidates(election: &State<SharedElection>, party: Option<String>) -> (Status, Json<Value>) {
    let party = party.filter(|p| !p.is_empty());
    let candidates = election.read().registry().list_candidates(party.as_deref());
    let status = if party.is_some() {
        CANDIDATES_BY_PARTY
    } else {
        CANDIDATES_LISTED
    };
    (status, Json(json!({ "candidates": candidates })))
}

#[post("/api/votes", data = "<vote>")]
fn cast_vote(election: &State<SharedElection>, vote: Json<VoteRequest>) -> ApiResult<Value> {
    let vote = election.write().cast_vote(vote.voter_id, vote.candidate_id)?;
    Ok((
        VOTE_CAST,
        Json(json!({
            "vote_id": vote.vote_id,
            "voter_id": vote.voter_id,
            "candidate_id": vote.candidate_id,
            "timestamp": format_instant(&vote.timestamp),
        })),
    ))
}

#[post("/api/votes/weighted", data = "<vote>")]
fn cast_weighted_vote(
    election: &State<SharedElection>,
    vote: Json<VoteRequest>,
) -> ApiResult<Value> {
    let vote = election
        .write()
        .cast_weighted_vote(vote.voter_id, vote.candidate_id)?;
    Ok((
        WEIGHTED_VOTE_CAST,
        Json(json!({
            "vote_id": vote.vote_id,
            "voter_id": vote.voter_id,
            "candidate_id": vote.candidate_id,
            "weight": vote.weight,
        })),
    ))
}

#[get("/api/candidates/<candidate_id>/votes")]
fn candidate_votes(election: &State<SharedElection>, candidate_id: CandidateId) -> (Status, Json<Value>) {
    let votes = election.read().report().count_for(candidate_id);
    (
        VOTE_COUNT,
        Json(json!({ "candidate_id": candidate_id, "votes": votes })),
    )
}

#[get("/api/results")]
fn results(election: &State<SharedElection>) -> (Status, Json<Value>) {
    let results = election.read().report().ranked_results();
    (RESULTS, Json(json!({ "results": results })))
}

#[get("/api/results/winner")]
fn winners(election: &State<SharedElection>) -> (Status, Json<Value>) {
    let winners = election.read().report().winners();
    (WINNERS, Json(json!({ "winners": winners })))
}

#[get("/api/votes/timeline?<candidate_id>")]
fn timeline(
    election: &State<SharedElection>,
    candidate_id: Option<CandidateId>,
) -> (Status, Json<Value>) {
    // An absent or unreadable id matches no votes
    let timeline = match candidate_id {
        Some(candidate_id) => election.read().report().timeline_for(candidate_id),
        None => vec![],
    };
    (
        TIMELINE,
        Json(json!({ "candidate_id": candidate_id, "timeline": timeline })),
    )
}

#[get("/api/votes/range?<candidate_id>&<from>&<to>")]
fn range_tally(
    election: &State<SharedElection>,
    candidate_id: CandidateId,
    from: Option<String>,
    to: Option<String>,
) -> ApiResult<RangeTally> {
    let missing = |bound: &str| Error::InvalidInterval(format!("missing '{}'", bound));
    let from = from.ok_or_else(|| missing("from"))?;
    let to = to.ok_or_else(|| missing("to"))?;
    let range = election.read().range_tally_str(candidate_id, &from, &to)?;
    Ok((RANGE_TALLY, Json(range)))
}

#[post("/api/ballots/encrypted", data = "<ballot>")]
fn admit_encrypted_ballot(
    election: &State<SharedElection>,
    ballot: Option<Json<EncryptedBallot>>,
) -> ApiResult<BallotReceipt> {
    let ballot = ballot.map(Json::into_inner).unwrap_or_default();
    let receipt = election.read().admit_encrypted_ballot(&ballot)?;
    Ok((BALLOT_ADMITTED, Json(receipt)))
}

#[post("/api/results/homomorphic", data = "<request>")]
fn homomorphic_tally(
    election: &State<SharedElection>,
    request: Option<Json<HomomorphicTallyRequest>>,
) -> ApiResult<HomomorphicTally> {
    let request = request.map(Json::into_inner).unwrap_or_default();
    let tally = election.read().homomorphic_tally(&request)?;
    Ok((HOMOMORPHIC_TALLY, Json(tally)))
}

#[post("/api/analytics/dp")]
fn dp_analytics() -> (Status, Json<DpAnalytics>) {
    (DP_ANALYTICS, Json(DpAnalytics::default()))
}

#[post("/api/ballots/ranked")]
fn admit_ranked_ballot() -> (Status, Json<RankedBallotAck>) {
    (RANKED_BALLOT, Json(RankedBallotAck::default()))
}

#[post("/api/audits/rla")]
fn start_audit() -> (Status, Json<AuditBootstrap>) {
    (AUDIT_STARTED, Json(AuditBootstrap::default()))
}

#[get("/health")]
fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Mount routes, catchers and fairings on a rocket that already manages a [`SharedElection`]
pub fn app(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .attach(cors::fairing())
        .mount(
            "/",
            routes![
                create_voter,
                read_voter,
                list_voters,
                update_voter,
                delete_voter,
                create_candidate,
                list_candidates,
                cast_vote,
                cast_weighted_vote,
                candidate_votes,
                results,
                winners,
                timeline,
                range_tally,
                admit_encrypted_ballot,
                homomorphic_tally,
                dp_analytics,
                admit_ranked_ballot,
                start_audit,
                health,
                cors::preflight
            ],
        )
        .register("/", catchers![error::default_catcher])
}

#[launch]
fn rocket() -> _ {
    app(rocket::build().attach(state::stage()))
}

#[cfg(test)]
mod tests;
