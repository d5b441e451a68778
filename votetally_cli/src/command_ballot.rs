use crate::{exit_with, expand, print_reply, rest, Verbosity};
use serde_json::{json, Value};

pub fn command_ballot(matches: &clap::ArgMatches, uri: &str, verbosity: Verbosity) {
    match matches.subcommand() {
        ("encrypted", Some(matches)) => command_ballot_encrypted(matches, uri, verbosity),
        ("ranked", Some(_)) => {
            print_reply(verbosity, rest::post(uri, "/api/ballots/ranked", &json!({})))
        }
        _ => exit_with("votetally ballot: expected one of encrypted, ranked"),
    }
}

pub fn command_ballot_encrypted(matches: &clap::ArgMatches, uri: &str, verbosity: Verbosity) {
    let filename = expand(matches.value_of("INPUT").unwrap_or_default());

    let file_bytes = match std::fs::read(&filename) {
        Ok(bytes) => bytes,
        Err(e) => exit_with(&format!(
            "votetally ballot encrypted: unable to read {}: {}",
            &filename, e
        )),
    };

    let ballot: Value = serde_json::from_slice(&file_bytes).unwrap_or_else(|e| {
        exit_with(&format!(
            "votetally ballot encrypted: {} is not valid JSON: {}",
            &filename, e
        ))
    });

    // Warn early if the server is going to reject the ciphertext anyway
    if matches.is_present("check") {
        let ciphertext = ballot["ciphertext"].as_str().unwrap_or_default();
        let key = ballot["voter_pubkey"].as_str().unwrap_or_default();
        if !votetally::is_well_formed(&votetally::decrypt(ciphertext, key)) {
            exit_with("votetally ballot encrypted: ciphertext does not decrypt under voter_pubkey");
        }
    }

    print_reply(verbosity, rest::post(uri, "/api/ballots/encrypted", &ballot));
}

pub fn command_decrypt(matches: &clap::ArgMatches) {
    let ciphertext = matches.value_of("CIPHERTEXT").unwrap_or_default();
    let key = matches.value_of("KEY").unwrap_or_default();

    let plaintext = votetally::decrypt(ciphertext, key);
    if !votetally::is_well_formed(&plaintext) {
        exit_with("votetally decrypt: nothing to decrypt (no letters in ciphertext or key)");
    }
    println!("{}", plaintext);
}

pub fn command_encrypt(matches: &clap::ArgMatches) {
    let plaintext = matches.value_of("PLAINTEXT").unwrap_or_default();
    let key = matches.value_of("KEY").unwrap_or_default();

    let ciphertext = votetally::encrypt(plaintext, key);
    if ciphertext.is_empty() {
        exit_with("votetally encrypt: nothing to encrypt (no letters in plaintext or key)");
    }
    println!("{}", ciphertext);
}
