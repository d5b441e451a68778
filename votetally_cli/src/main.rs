use clap::{App, AppSettings, Arg, SubCommand};
use serde_json::Value;

mod command_ballot;
mod command_candidate;
mod command_results;
mod command_vote;
mod command_voter;
mod rest;

use command_ballot::*;
use command_candidate::*;
use command_results::*;
use command_vote::*;
use command_voter::*;

#[derive(PartialEq, PartialOrd, Copy, Clone)]
pub enum Verbosity {
    Quiet = 0,
    Normal = 1,
    Verbose = 2,
}

fn main() {
    let matches = App::new("votetally")
        .version("0.1")
        .about("Interacts with a votetally server")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("uri")
                .long("uri")
                .takes_value(true)
                .global(true)
                .help("Set the votetally server uri - can also be set with VOTETALLY_URI"),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .global(true)
                .help("Sets the level of verbosity"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .global(true)
                .help("Only report errors"),
        )
        .subcommand(
            SubCommand::with_name("voter")
                .about("Manage registered voters")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(
                    SubCommand::with_name("add")
                        .about("Register a voter")
                        .arg(Arg::with_name("VOTER-ID").index(1).required(true))
                        .arg(Arg::with_name("NAME").index(2).required(true))
                        .arg(Arg::with_name("AGE").index(3).required(true)),
                )
                .subcommand(
                    SubCommand::with_name("get")
                        .about("Show a voter")
                        .arg(Arg::with_name("VOTER-ID").index(1).required(true)),
                )
                .subcommand(SubCommand::with_name("list").about("List all voters"))
                .subcommand(
                    SubCommand::with_name("update")
                        .about("Change a voter's name and age")
                        .arg(Arg::with_name("VOTER-ID").index(1).required(true))
                        .arg(Arg::with_name("NAME").index(2).required(true))
                        .arg(Arg::with_name("AGE").index(3).required(true)),
                )
                .subcommand(
                    SubCommand::with_name("delete")
                        .about("Remove a voter")
                        .arg(Arg::with_name("VOTER-ID").index(1).required(true)),
                ),
        )
        .subcommand(
            SubCommand::with_name("candidate")
                .about("Manage candidates")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(
                    SubCommand::with_name("add")
                        .about("Register a candidate")
                        .arg(Arg::with_name("CANDIDATE-ID").index(1).required(true))
                        .arg(Arg::with_name("NAME").index(2).required(true))
                        .arg(Arg::with_name("PARTY").index(3).required(true)),
                )
                .subcommand(
                    SubCommand::with_name("list")
                        .about("List candidates")
                        .arg(
                            Arg::with_name("party")
                                .long("party")
                                .takes_value(true)
                                .help("Only list candidates of this party"),
                        ),
                ),
        )
        .subcommand(
            SubCommand::with_name("vote")
                .about("Cast votes and inspect the ledger")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(
                    SubCommand::with_name("cast")
                        .about("Cast a vote")
                        .arg(Arg::with_name("VOTER-ID").index(1).required(true))
                        .arg(Arg::with_name("CANDIDATE-ID").index(2).required(true))
                        .arg(
                            Arg::with_name("weighted")
                                .long("weighted")
                                .help("Cast a weighted vote"),
                        ),
                )
                .subcommand(
                    SubCommand::with_name("timeline")
                        .about("List a candidate's votes in order")
                        .arg(Arg::with_name("CANDIDATE-ID").index(1).required(true)),
                )
                .subcommand(
                    SubCommand::with_name("range")
                        .about("Votes gained by a candidate between two instants (inclusive)")
                        .arg(Arg::with_name("CANDIDATE-ID").index(1).required(true))
                        .arg(Arg::with_name("FROM").index(2).required(true))
                        .arg(Arg::with_name("TO").index(3).required(true)),
                ),
        )
        .subcommand(
            SubCommand::with_name("count")
                .about("Show a candidate's vote count")
                .arg(Arg::with_name("CANDIDATE-ID").index(1).required(true)),
        )
        .subcommand(
            SubCommand::with_name("results")
                .about("Show ranked results")
                .arg(
                    Arg::with_name("winner")
                        .long("winner")
                        .help("Only show the winner(s)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("homomorphic")
                .about("Request the homomorphic tally")
                .arg(Arg::with_name("CIPHER-AGGREGATE").index(1).required(true))
                .arg(Arg::with_name("TALLY-KEY").index(2).required(true)),
        )
        .subcommand(
            SubCommand::with_name("ballot")
                .about("Submit ballots")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(
                    SubCommand::with_name("encrypted")
                        .about("Submit an encrypted ballot")
                        .arg(
                            Arg::with_name("INPUT")
                                .index(1)
                                .required(true)
                                .help("Ballot file in JSON format"),
                        )
                        .arg(
                            Arg::with_name("check")
                                .long("check")
                                .help("Check the ciphertext locally before submitting"),
                        ),
                )
                .subcommand(SubCommand::with_name("ranked").about("Submit a ranked ballot")),
        )
        .subcommand(SubCommand::with_name("analytics").about("Request differential-privacy analytics"))
        .subcommand(SubCommand::with_name("audit").about("Bootstrap a risk-limiting audit"))
        .subcommand(SubCommand::with_name("health").about("Check that the server is up"))
        .subcommand(
            SubCommand::with_name("decrypt")
                .about("Decrypt an autokey ciphertext locally")
                .arg(Arg::with_name("CIPHERTEXT").index(1).required(true))
                .arg(Arg::with_name("KEY").index(2).required(true)),
        )
        .subcommand(
            SubCommand::with_name("encrypt")
                .about("Encrypt a plaintext with the autokey cipher locally")
                .arg(Arg::with_name("PLAINTEXT").index(1).required(true))
                .arg(Arg::with_name("KEY").index(2).required(true)),
        )
        .get_matches();

    let verbosity = if matches.is_present("quiet") {
        Verbosity::Quiet
    } else {
        match matches.occurrences_of("v") {
            0 => Verbosity::Normal,
            _ => Verbosity::Verbose,
        }
    };

    let env_var = std::env::var("VOTETALLY_URI");
    let uri = match matches.value_of("uri") {
        Some(uri) => uri,
        None => env_var.as_deref().unwrap_or("http://localhost:3000"),
    };
    if verbosity >= Verbosity::Verbose {
        eprintln!("URI: {}", uri);
    }

    // Subcommands
    match matches.subcommand() {
        ("voter", Some(matches)) => command_voter(matches, uri, verbosity),
        ("candidate", Some(matches)) => command_candidate(matches, uri, verbosity),
        ("vote", Some(matches)) => command_vote(matches, uri, verbosity),
        ("count", Some(matches)) => command_count(matches, uri, verbosity),
        ("results", Some(matches)) => command_results(matches, uri, verbosity),
        ("homomorphic", Some(matches)) => command_homomorphic(matches, uri, verbosity),
        ("ballot", Some(matches)) => command_ballot(matches, uri, verbosity),
        ("analytics", Some(_)) => {
            print_reply(verbosity, rest::post(uri, "/api/analytics/dp", &serde_json::json!({})))
        }
        ("audit", Some(_)) => {
            print_reply(verbosity, rest::post(uri, "/api/audits/rla", &serde_json::json!({})))
        }
        ("health", Some(_)) => print_reply(verbosity, rest::get(uri, "/health")),
        ("decrypt", Some(matches)) => command_decrypt(matches),
        ("encrypt", Some(matches)) => command_encrypt(matches),
        _ => exit_with("votetally: unknown command"),
    }
}

/// Print an error and exit with status 1
pub fn exit_with(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

/// Expand `~` and environment variables in a user-supplied path
pub fn expand(input: &str) -> String {
    match shellexpand::full(input) {
        Ok(expanded) => expanded.into_owned(),
        Err(_) => input.to_owned(),
    }
}

pub fn parse_id(input: Option<&str>) -> i64 {
    let input = input.unwrap_or_default();
    input
        .trim()
        .parse()
        .unwrap_or_else(|_| exit_with(&format!("votetally: invalid id '{}'", input)))
}

/// Ages go to the server as numbers when they look like one, so it can do the validation
pub fn age_value(input: Option<&str>) -> Value {
    let input = input.unwrap_or_default();
    match input.trim().parse::<u64>() {
        Ok(age) => Value::from(age),
        Err(_) => Value::from(input),
    }
}

/// Print a server reply: pretty JSON on success, the server's message on failure
pub fn print_reply(verbosity: Verbosity, reply: Result<rest::Reply, reqwest::Error>) {
    let reply = match reply {
        Ok(reply) => reply,
        Err(e) => exit_with(&format!("votetally: request failed: {}", e)),
    };

    if verbosity >= Verbosity::Verbose {
        eprintln!("status: {}", reply.status);
    }

    if !reply.is_success() {
        exit_with(&format!("votetally: {} ({})", reply.message(), reply.status));
    }

    if verbosity >= Verbosity::Normal {
        let pretty = serde_json::to_string_pretty(&reply.body).unwrap_or_else(|_| reply.body.to_string());
        println!("{}", pretty);
    }
}
