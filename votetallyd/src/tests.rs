use super::*;
use chrono::{Duration, TimeZone, Utc};
use rocket::local::blocking::{Client, LocalResponse};
use std::sync::Arc;

fn client() -> (Client, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc.ymd(2025, 6, 1).and_hms(12, 0, 0)));
    let election = Election::new(ElectionConfig::default(), clock.clone());
    let rocket = app(rocket::build().manage(SharedElection::new(election)));
    (Client::tracked(rocket).expect("valid rocket"), clock)
}

fn body(response: LocalResponse<'_>) -> Value {
    response.into_json::<Value>().expect("json body")
}

fn post(client: &Client, uri: &str, payload: Value) -> (u16, Value) {
    let response = client.post(uri.to_owned()).json(&payload).dispatch();
    (response.status().code, body(response))
}

fn get(client: &Client, uri: &str) -> (u16, Value) {
    let response = client.get(uri.to_owned()).dispatch();
    (response.status().code, body(response))
}

fn seed(client: &Client) {
    assert_eq!(
        post(client, "/api/voters", json!({"voter_id": 1, "name": "Ada", "age": 30})).0,
        218
    );
    assert_eq!(
        post(client, "/api/voters", json!({"voter_id": 2, "name": "Bob", "age": 61})).0,
        218
    );
    assert_eq!(
        post(client, "/api/candidates", json!({"candidate_id": 5, "name": "Eve", "party": "Green"})).0,
        226
    );
    assert_eq!(
        post(client, "/api/candidates", json!({"candidate_id": 6, "name": "Finn", "party": "Blue"})).0,
        226
    );
}

#[test]
fn voter_crud() {
    let (client, _) = client();

    let (status, voter) = post(
        &client,
        "/api/voters",
        json!({"voter_id": 1, "name": "Ada", "age": 30}),
    );
    assert_eq!(status, 218);
    assert_eq!(
        voter,
        json!({"voter_id": 1, "name": "Ada", "age": 30, "has_voted": false})
    );

    let (status, err) = post(
        &client,
        "/api/voters",
        json!({"voter_id": 1, "name": "Ada", "age": 30}),
    );
    assert_eq!(status, 409);
    assert_eq!(err["message"], "voter with id: 1 already exists");

    let (status, err) = post(
        &client,
        "/api/voters",
        json!({"voter_id": 2, "name": "Kid", "age": 12}),
    );
    assert_eq!(status, 422);
    assert_eq!(err["message"], "invalid age: 12, must be 18 or older");

    assert_eq!(get(&client, "/api/voters/1").0, 222);
    let (status, err) = get(&client, "/api/voters/9");
    assert_eq!(status, 417);
    assert_eq!(err["message"], "voter with id: 9 was not found");

    let (status, list) = get(&client, "/api/voters");
    assert_eq!(status, 223);
    assert_eq!(
        list,
        json!({"voters": [{"voter_id": 1, "name": "Ada", "age": 30}]})
    );

    let response = client
        .put("/api/voters/1")
        .json(&json!({"name": "Ada L", "age": 31}))
        .dispatch();
    assert_eq!(response.status().code, 224);
    assert_eq!(body(response)["name"], "Ada L");

    let response = client
        .put("/api/voters/1")
        .json(&json!({"name": "Ada L", "age": "old"}))
        .dispatch();
    assert_eq!(response.status().code, 422);

    let response = client.delete("/api/voters/1").dispatch();
    assert_eq!(response.status().code, 225);
    assert_eq!(
        body(response)["message"],
        "voter with id: 1 deleted successfully"
    );
    assert_eq!(get(&client, "/api/voters/1").0, 417);
}

#[test]
fn candidate_listing() {
    let (client, _) = client();
    seed(&client);

    let (status, err) = post(
        &client,
        "/api/candidates",
        json!({"candidate_id": 5, "name": "Eve again", "party": "Red"}),
    );
    assert_eq!(status, 409);
    assert_eq!(err["message"], "candidate with id: 5 already exists");

    let (status, list) = get(&client, "/api/candidates");
    assert_eq!(status, 227);
    assert_eq!(list["candidates"].as_array().unwrap().len(), 2);
    assert!(list["candidates"][0].get("votes").is_none());

    let (status, list) = get(&client, "/api/candidates?party=Blue");
    assert_eq!(status, 230);
    assert_eq!(
        list,
        json!({"candidates": [{"candidate_id": 6, "name": "Finn", "party": "Blue"}]})
    );
}

#[test]
fn cast_and_tally() {
    let (client, _) = client();
    seed(&client);

    let (status, vote) = post(&client, "/api/votes", json!({"voter_id": 1, "candidate_id": 5}));
    assert_eq!(status, 228);
    assert_eq!(
        vote,
        json!({
            "vote_id": 101,
            "voter_id": 1,
            "candidate_id": 5,
            "timestamp": "2025-06-01T12:00:00.000Z"
        })
    );
    assert_eq!(
        get(&client, "/api/candidates/5/votes"),
        (229, json!({"candidate_id": 5, "votes": 1}))
    );

    let (status, err) = post(&client, "/api/votes", json!({"voter_id": 1, "candidate_id": 5}));
    assert_eq!(status, 423);
    assert_eq!(err["message"], "voter with id: 1 has already voted");

    let (status, err) = post(&client, "/api/votes", json!({"voter_id": 7, "candidate_id": 5}));
    assert_eq!(status, 417);
    assert_eq!(err["message"], "voter with id: 7 was not found");

    let (status, err) = post(&client, "/api/votes", json!({"voter_id": 2, "candidate_id": 8}));
    assert_eq!(status, 417);
    assert_eq!(err["message"], "candidate with id: 8 was not found");

    let (status, vote) = post(
        &client,
        "/api/votes/weighted",
        json!({"voter_id": 2, "candidate_id": 6}),
    );
    assert_eq!(status, 234);
    assert_eq!(
        vote,
        json!({"vote_id": 102, "voter_id": 2, "candidate_id": 6, "weight": 2})
    );

    let (status, results) = get(&client, "/api/results");
    assert_eq!(status, 231);
    assert_eq!(
        results,
        json!({"results": [
            {"candidate_id": 6, "name": "Finn", "votes": 2},
            {"candidate_id": 5, "name": "Eve", "votes": 1}
        ]})
    );

    let (status, winners) = get(&client, "/api/results/winner");
    assert_eq!(status, 232);
    assert_eq!(
        winners,
        json!({"winners": [{"candidate_id": 6, "name": "Finn", "votes": 2}]})
    );

    assert_eq!(
        get(&client, "/api/candidates/99/votes"),
        (229, json!({"candidate_id": 99, "votes": 0}))
    );
}

#[test]
fn timeline_and_range() {
    let (client, clock) = client();
    seed(&client);

    post(&client, "/api/votes", json!({"voter_id": 1, "candidate_id": 5}));
    clock.advance(Duration::minutes(5));
    post(
        &client,
        "/api/votes/weighted",
        json!({"voter_id": 2, "candidate_id": 5}),
    );

    let (status, timeline) = get(&client, "/api/votes/timeline?candidate_id=5");
    assert_eq!(status, 233);
    assert_eq!(
        timeline,
        json!({"candidate_id": 5, "timeline": [
            {"vote_id": 101, "timestamp": "2025-06-01T12:00:00.000Z"},
            {"vote_id": 102, "timestamp": "2025-06-01T12:05:00.000Z"}
        ]})
    );

    let (status, range) = get(
        &client,
        "/api/votes/range?candidate_id=5&from=2025-06-01T11:00:00Z&to=2025-06-01T13:00:00Z",
    );
    assert_eq!(status, 235);
    assert_eq!(
        range,
        json!({
            "candidate_id": 5,
            "from": "2025-06-01T11:00:00.000Z",
            "to": "2025-06-01T13:00:00.000Z",
            "votes_gained": 3
        })
    );

    let (_, range) = get(
        &client,
        "/api/votes/range?candidate_id=5&from=2025-06-01T12:05:00.000Z&to=2025-06-01T12:05:00.000Z",
    );
    assert_eq!(range["votes_gained"], 2);

    let (status, err) = get(
        &client,
        "/api/votes/range?candidate_id=5&from=2025-06-02&to=2025-06-01",
    );
    assert_eq!(status, 424);
    assert_eq!(err["message"], "invalid interval: from > to");

    let (status, _) = get(
        &client,
        "/api/votes/range?candidate_id=5&from=later&to=2025-06-01",
    );
    assert_eq!(status, 424);

    let (status, err) = get(&client, "/api/votes/range?candidate_id=5&to=2025-06-01");
    assert_eq!(status, 424);
    assert_eq!(err["message"], "invalid interval: missing 'from'");
    let (status, err) = get(&client, "/api/votes/range?candidate_id=5&from=2025-06-01");
    assert_eq!(status, 424);
    assert_eq!(err["message"], "invalid interval: missing 'to'");

    let (status, timeline) = get(&client, "/api/votes/timeline");
    assert_eq!(status, 233);
    assert_eq!(timeline, json!({"candidate_id": null, "timeline": []}));
}

#[test]
fn encrypted_ballots() {
    let (client, _) = client();
    let ballot = json!({
        "election_id": "nat-2025",
        "ciphertext": "khoor",
        "zk_proof": "proof",
        "voter_pubkey": "lamp",
        "nullifier": "0x4a1e",
        "signature": "sig"
    });

    let (status, receipt) = post(&client, "/api/ballots/encrypted", ballot.clone());
    assert_eq!(status, 236);
    assert_eq!(receipt["status"], "accepted");
    assert_eq!(receipt["nullifier"], "0x4a1e");
    assert_eq!(receipt["anchored_at"], "2025-06-01T12:00:00.000Z");
    assert!(receipt["ballot_id"].as_str().unwrap().starts_with("b_"));

    let mut unreadable = ballot.clone();
    unreadable["ciphertext"] = json!("123");
    let (status, err) = post(&client, "/api/ballots/encrypted", unreadable);
    assert_eq!(status, 425);
    assert_eq!(err["message"], "invalid zk proof");

    let mut missing = ballot;
    missing["nullifier"] = json!("");
    assert_eq!(post(&client, "/api/ballots/encrypted", missing).0, 425);

    let response = client.post("/api/ballots/encrypted").dispatch();
    assert_eq!(response.status().code, 425);
}

#[test]
fn boundary_stubs() {
    let (client, _) = client();
    seed(&client);
    post(&client, "/api/votes", json!({"voter_id": 1, "candidate_id": 6}));

    let (status, err) = post(&client, "/api/results/homomorphic", json!({"tally_key": "k"}));
    assert_eq!(status, 425);
    assert_eq!(err["message"], "invalid homomorphic proof");

    let (status, tally) = post(
        &client,
        "/api/results/homomorphic",
        json!({"cipher_aggregate": "c", "tally_key": "k"}),
    );
    assert_eq!(status, 237);
    assert_eq!(
        tally["candidate_tallies"],
        json!([{"candidate_id": 5, "votes": 0}, {"candidate_id": 6, "votes": 1}])
    );
    assert_eq!(tally["transparency"]["tally_method"], "threshold_paillier");

    let (status, dp) = post(&client, "/api/analytics/dp", json!({}));
    assert_eq!(status, 238);
    assert_eq!(dp["answer"]["25-34"], 20110);

    assert_eq!(
        post(&client, "/api/ballots/ranked", json!({"ranking": [5, 6]})),
        (239, json!({"ballot_id": "rb_2219", "status": "accepted"}))
    );

    let (status, audit) = post(&client, "/api/audits/rla", json!({}));
    assert_eq!(status, 240);
    assert_eq!(audit["stopping_rule"], "Kaplan-Markov");

    assert_eq!(get(&client, "/health"), (200, json!({"status": "ok"})));
}

#[test]
fn cors_and_catchers() {
    let (client, _) = client();

    let response = client.get("/health").dispatch();
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );

    let response = client.options("/api/votes").dispatch();
    assert_eq!(response.status(), Status::NoContent);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Methods"),
        Some("GET,POST,PUT,DELETE,OPTIONS")
    );

    let (status, err) = get(&client, "/api/nowhere");
    assert_eq!(status, 404);
    assert_eq!(err["message"], "not found");
}
