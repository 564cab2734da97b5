use std::thread;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use gmail_threads::mail::gmail_client::GmailClient;
use serde_json::json;
use tiny_http::{Response, Server};

type Route = fn(&str, Option<String>) -> (u16, String);

/// Serve `n` requests from a local listener, answering each via `route`.
fn serve(n: usize, route: Route) -> (String, thread::JoinHandle<Vec<String>>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let base = format!("http://{}/gmail/v1/users/me", server.server_addr());

    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for _ in 0..n {
            let request = server.recv().unwrap();
            let auth = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .map(|h| h.value.as_str().to_string());
            let url = request.url().to_string();
            let (status, body) = route(&url, auth);
            seen.push(url);
            request
                .respond(Response::from_string(body).with_status_code(status))
                .unwrap();
        }
        seen
    });

    (base, handle)
}

fn message(id: &str, thread: &str, millis: i64, subject: &str, text: &str) -> String {
    json!({
        "id": id,
        "threadId": thread,
        "internalDate": millis.to_string(),
        "payload": {
            "mimeType": "text/plain",
            "headers": [
                { "name": "Subject", "value": subject },
                { "name": "From", "value": "sender@example.com" }
            ],
            "body": { "size": text.len(), "data": URL_SAFE.encode(text) }
        }
    })
    .to_string()
}

fn inbox_route(url: &str, auth: Option<String>) -> (u16, String) {
    if auth.as_deref() != Some("Bearer test-token") {
        return (401, "{}".into());
    }
    let path = url.split('?').next().unwrap_or_default();
    match path {
        "/gmail/v1/users/me/messages" => (
            200,
            json!({ "messages": [
                { "id": "b", "threadId": "T1" },
                { "id": "gone", "threadId": "T2" },
                { "id": "a", "threadId": "T1" }
            ]})
            .to_string(),
        ),
        "/gmail/v1/users/me/messages/b" => (200, message("b", "T1", 2_000, "Re: hi", "Reply.")),
        "/gmail/v1/users/me/messages/a" => (200, message("a", "T1", 1_000, "hi", "Hello.")),
        _ => (404, json!({ "error": { "code": 404 } }).to_string()),
    }
}

#[test]
fn fetch_threads_lists_gets_and_assembles() {
    let (base, server) = serve(4, inbox_route);
    let client = GmailClient::new(base).unwrap();

    let threads = client.fetch_threads("test-token", "INBOX", 3).unwrap();
    let seen = server.join().unwrap();

    assert!(seen[0].contains("labelIds=INBOX"));
    assert!(seen[0].contains("maxResults=3"));
    assert!(seen[1].starts_with("/gmail/v1/users/me/messages/b?format=full"));

    // "gone" 404s and is skipped
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].thread_id, "T1");
    assert_eq!(threads[0].subject, "hi");
    let bodies: Vec<_> = threads[0].messages.iter().map(|m| m.full_body.as_str()).collect();
    assert_eq!(bodies, vec!["Hello.", "Reply."]);
}

#[test]
fn list_failure_is_an_error() {
    let (base, server) = serve(1, inbox_route);
    let client = GmailClient::new(base).unwrap();

    let err = client.list_messages("wrong-token", "INBOX", 10).unwrap_err();
    server.join().unwrap();
    assert!(err.to_string().contains("401"));
}

#[test]
fn empty_mailbox_lists_nothing() {
    fn empty(_: &str, _: Option<String>) -> (u16, String) {
        (200, json!({ "resultSizeEstimate": 0 }).to_string())
    }
    let (base, server) = serve(1, empty);
    let client = GmailClient::new(base).unwrap();

    assert!(client.list_messages("t", "INBOX", 10).unwrap().is_empty());
    server.join().unwrap();
}

#[test]
fn suspicious_ids_are_rejected_without_a_request() {
    let client = GmailClient::new("http://127.0.0.1:9").unwrap();
    assert!(client.get_message("t", "../etc").is_err());
    assert!(client.get_message("t", "").is_err());
}
