use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

/// Status and JSON body of a server reply
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The server's `message` field, or the raw body
    pub fn message(&self) -> String {
        match self.body.get("message").and_then(Value::as_str) {
            Some(message) => message.to_owned(),
            None => self.body.to_string(),
        }
    }
}

fn send(request: RequestBuilder) -> Result<Reply, reqwest::Error> {
    let res = request.send()?;
    let status = res.status().as_u16();
    let text = res.text()?;
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    Ok(Reply { status, body })
}

fn url(base_uri: &str, path: &str) -> String {
    format!("{}{}", base_uri.trim_end_matches('/'), path)
}

pub fn get(base_uri: &str, path: &str) -> Result<Reply, reqwest::Error> {
    send(Client::new().get(&url(base_uri, path)))
}

pub fn get_query(
    base_uri: &str,
    path: &str,
    query: &[(&str, String)],
) -> Result<Reply, reqwest::Error> {
    send(Client::new().get(&url(base_uri, path)).query(query))
}

pub fn post(base_uri: &str, path: &str, body: &Value) -> Result<Reply, reqwest::Error> {
    send(Client::new().post(&url(base_uri, path)).json(body))
}

pub fn put(base_uri: &str, path: &str, body: &Value) -> Result<Reply, reqwest::Error> {
    send(Client::new().put(&url(base_uri, path)).json(body))
}

pub fn delete(base_uri: &str, path: &str) -> Result<Reply, reqwest::Error> {
    send(Client::new().delete(&url(base_uri, path)))
}
