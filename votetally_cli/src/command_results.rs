use crate::{parse_id, print_reply, rest, Verbosity};
use serde_json::json;

pub fn command_results(matches: &clap::ArgMatches, uri: &str, verbosity: Verbosity) {
    if matches.is_present("winner") {
        print_reply(verbosity, rest::get(uri, "/api/results/winner"));
    } else {
        print_reply(verbosity, rest::get(uri, "/api/results"));
    }
}

pub fn command_count(matches: &clap::ArgMatches, uri: &str, verbosity: Verbosity) {
    let candidate_id = parse_id(matches.value_of("CANDIDATE-ID"));
    print_reply(verbosity, rest::get(
        uri,
        &format!("/api/candidates/{}/votes", candidate_id),
    ));
}

pub fn command_homomorphic(matches: &clap::ArgMatches, uri: &str, verbosity: Verbosity) {
    let body = json!({
        "cipher_aggregate": matches.value_of("CIPHER-AGGREGATE"),
        "tally_key": matches.value_of("TALLY-KEY"),
    });
    print_reply(verbosity, rest::post(uri, "/api/results/homomorphic", &body));
}
