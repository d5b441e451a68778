use crate::{exit_with, parse_id, print_reply, rest, Verbosity};
use serde_json::json;

pub fn command_candidate(matches: &clap::ArgMatches, uri: &str, verbosity: Verbosity) {
    match matches.subcommand() {
        ("add", Some(matches)) => {
            let body = json!({
                "candidate_id": parse_id(matches.value_of("CANDIDATE-ID")),
                "name": matches.value_of("NAME").unwrap_or_default(),
                "party": matches.value_of("PARTY").unwrap_or_default(),
            });
            print_reply(verbosity, rest::post(uri, "/api/candidates", &body));
        }
        ("list", Some(matches)) => match matches.value_of("party") {
            Some(party) => print_reply(verbosity, rest::get_query(
                uri,
                "/api/candidates",
                &[("party", party.to_owned())],
            )),
            None => print_reply(verbosity, rest::get(uri, "/api/candidates")),
        },
        _ => exit_with("votetally candidate: expected one of add, list"),
    }
}
