#![allow(dead_code)]

use serde_json::Value;
use stage_explorer_lib::domain::entities::Session;
use stage_explorer_lib::domain::value_objects::AccessToken;
use stage_explorer_lib::infrastructure::ApiClient;
use stage_explorer_lib::shared::config::ApiConfig;
use std::io::{Cursor, Read};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration as StdDuration;
use tiny_http::{Header, Request, Response, Server};

pub const TEST_TOKEN: &str = "test-access-token";

const REQUEST_WAIT: StdDuration = StdDuration::from_secs(2);
const FINISH_WAIT: StdDuration = StdDuration::from_secs(5);

/// 台本どおりに返す応答。`body` が無ければ空の本文。
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub body: Option<Value>,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let Some(body) = self.body else {
            return Response::from_data(Vec::new()).with_status_code(self.status);
        };
        let header: Header = "Content-Type: application/json"
            .parse()
            .expect("content-type header");
        Response::from_data(body.to_string().into_bytes())
            .with_status_code(self.status)
            .with_header(header)
    }
}

/// サーバーが受け取ったリクエストの記録。
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl SeenRequest {
    fn record(request: &mut Request) -> Self {
        let header = |name: &str| {
            request
                .headers()
                .iter()
                .find(|header| header.field.as_str().as_str().eq_ignore_ascii_case(name))
                .map(|header| header.value.as_str().to_owned())
        };
        let authorization = header("Authorization");
        let content_type = header("Content-Type");
        let method = request.method().to_string();
        let path = request.url().to_owned();
        let mut body = String::new();
        request
            .as_reader()
            .read_to_string(&mut body)
            .expect("request body");
        Self {
            method,
            path,
            authorization,
            content_type,
            body,
        }
    }

    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).expect("json request body")
    }
}

/// 用意した応答を 1 件ずつ返すローカル HTTP サーバー。
pub struct ScriptedServer {
    base_url: String,
    seen: Receiver<SeenRequest>,
    done: Receiver<()>,
    worker: JoinHandle<()>,
}

impl ScriptedServer {
    pub fn start(replies: Vec<Reply>) -> Self {
        let server = Server::http("127.0.0.1:0").expect("bind scripted server");
        let base_url = format!("http://{}", server.server_addr());
        let (seen_tx, seen) = mpsc::channel();
        let (done_tx, done) = mpsc::channel();

        let worker = thread::spawn(move || {
            for reply in replies {
                let Ok(Some(mut request)) = server.recv_timeout(FINISH_WAIT) else {
                    break;
                };
                let _ = seen_tx.send(SeenRequest::record(&mut request));
                let _ = request.respond(reply.into_response());
            }
            let _ = done_tx.send(());
        });

        Self {
            base_url,
            seen,
            done,
            worker,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_client(&self) -> ApiClient {
        api_client(&self.base_url)
    }

    pub fn next_request(&self) -> SeenRequest {
        self.seen
            .recv_timeout(REQUEST_WAIT)
            .expect("server did not receive the expected request")
    }

    /// すべての応答を返し終えるまで待つ。
    pub fn finish(self) {
        match self.done.recv_timeout(FINISH_WAIT) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
            Err(RecvTimeoutError::Timeout) => {
                panic!("scripted server still had replies after {FINISH_WAIT:?}")
            }
        }
        self.worker.join().expect("scripted server thread panicked");
    }
}

pub fn api_client(base_url: &str) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        user_agent: "stage-explorer-tests".to_string(),
    })
    .expect("api client")
}

pub fn authenticated_session() -> Arc<Session> {
    Arc::new(Session::authenticated(
        AccessToken::new(TEST_TOKEN.to_string()).expect("token"),
        None,
        None,
    ))
}

pub fn listing_json(id: i64, title: &str, score: f64) -> Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "company": "Acme",
        "location": "Rabat",
        "country": "Morocco",
        "platform": "LinkedIn",
        "description": "Stage de fin d'études",
        "skills": "Rust, SQL",
        "domain": "Informatique",
        "link": format!("https://example.com/offres/{id}"),
        "similarity_score": score,
        "recommended_at": "2024-03-01T10:00:00",
        "is_viewed": false,
        "is_saved": false
    })
}
