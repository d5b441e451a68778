use crate::config::Config;
use rocket::fairing::{self, AdHoc};
use rocket::{Build, Rocket};
use std::sync::Arc;
use votetally::{Election, SharedElection, SystemClock};

async fn init_election(rocket: Rocket<Build>) -> fairing::Result {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(rocket);
        }
    };

    info!(
        "Election ledger starts at vote id {}, weighted votes count {}",
        config.election.first_vote_id, config.election.weighted_vote_weight
    );
    let election = Election::new(config.election, Arc::new(SystemClock));

    Ok(rocket.manage(SharedElection::new(election)))
}

pub fn stage() -> AdHoc {
    AdHoc::try_on_ignite("Election State", init_election)
}
