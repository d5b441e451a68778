use crate::{exit_with, parse_id, print_reply, rest, Verbosity};
use serde_json::json;

pub fn command_vote(matches: &clap::ArgMatches, uri: &str, verbosity: Verbosity) {
    match matches.subcommand() {
        ("cast", Some(matches)) => {
            let body = json!({
                "voter_id": parse_id(matches.value_of("VOTER-ID")),
                "candidate_id": parse_id(matches.value_of("CANDIDATE-ID")),
            });
            let path = if matches.is_present("weighted") {
                "/api/votes/weighted"
            } else {
                "/api/votes"
            };
            print_reply(verbosity, rest::post(uri, path, &body));
        }
        ("timeline", Some(matches)) => {
            let candidate_id = parse_id(matches.value_of("CANDIDATE-ID"));
            print_reply(verbosity, rest::get_query(
                uri,
                "/api/votes/timeline",
                &[("candidate_id", candidate_id.to_string())],
            ));
        }
        ("range", Some(matches)) => {
            let candidate_id = parse_id(matches.value_of("CANDIDATE-ID"));
            let from = matches.value_of("FROM").unwrap_or_default();
            let to = matches.value_of("TO").unwrap_or_default();

            // Same check the server makes, without the round trip
            if let (Some(from_at), Some(to_at)) =
                (votetally::parse_instant(from), votetally::parse_instant(to))
            {
                if from_at > to_at {
                    exit_with("votetally vote range: invalid interval: from > to");
                }
            }

            print_reply(verbosity, rest::get_query(
                uri,
                "/api/votes/range",
                &[
                    ("candidate_id", candidate_id.to_string()),
                    ("from", from.to_owned()),
                    ("to", to.to_owned()),
                ],
            ));
        }
        _ => exit_with("votetally vote: expected one of cast, timeline, range"),
    }
}
