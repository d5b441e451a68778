use crate::{age_value, exit_with, parse_id, print_reply, rest, Verbosity};
use serde_json::json;

pub fn command_voter(matches: &clap::ArgMatches, uri: &str, verbosity: Verbosity) {
    match matches.subcommand() {
        ("add", Some(matches)) => {
            let body = json!({
                "voter_id": parse_id(matches.value_of("VOTER-ID")),
                "name": matches.value_of("NAME").unwrap_or_default(),
                "age": age_value(matches.value_of("AGE")),
            });
            print_reply(verbosity, rest::post(uri, "/api/voters", &body));
        }
        ("get", Some(matches)) => {
            let id = parse_id(matches.value_of("VOTER-ID"));
            print_reply(verbosity, rest::get(uri, &format!("/api/voters/{}", id)));
        }
        ("list", Some(_)) => print_reply(verbosity, rest::get(uri, "/api/voters")),
        ("update", Some(matches)) => {
            let id = parse_id(matches.value_of("VOTER-ID"));
            let body = json!({
                "name": matches.value_of("NAME").unwrap_or_default(),
                "age": age_value(matches.value_of("AGE")),
            });
            print_reply(verbosity, rest::put(uri, &format!("/api/voters/{}", id), &body));
        }
        ("delete", Some(matches)) => {
            let id = parse_id(matches.value_of("VOTER-ID"));
            print_reply(verbosity, rest::delete(uri, &format!("/api/voters/{}", id)));
        }
        _ => exit_with("votetally voter: expected one of add, get, list, update, delete"),
    }
}
