//! In-process stand-in for a debugging browser.

use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::discovery::CdpEndpoint;

/// How the fake browser answers one command.
pub(crate) enum Reply {
    Result(Value),
    Error(i64, String),
    Silent,
    /// Close the websocket instead of answering.
    Close,
}

type Handler = dyn Fn(&str, &Value) -> Reply + Send + Sync;

/// Serves `/json/version` and `/json/list` over HTTP and answers CDP
/// commands on a websocket with `handler`.
pub(crate) struct FakeBrowser {
    pub server: MockServer,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl FakeBrowser {
    pub async fn start<H>(handler: H) -> Self
    where
        H: Fn(&str, &Value) -> Reply + Send + Sync + 'static,
    {
        let handler: Arc<Handler> = Arc::new(handler);
        let calls = Arc::new(Mutex::new(Vec::new()));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let ws_url = format!("ws://{}/devtools/browser/fake", listener.local_addr().unwrap());

        {
            let calls = calls.clone();
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let handler = handler.clone();
                    let calls = calls.clone();
                    tokio::spawn(async move {
                        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
                        while let Some(Ok(Message::Text(text))) = ws.next().await {
                            let msg: Value = serde_json::from_str(text.as_str()).unwrap();
                            let method = msg["method"].as_str().unwrap_or_default().to_string();
                            let params = msg.get("params").cloned().unwrap_or(Value::Null);
                            calls.lock().push((method.clone(), params.clone()));

                            let reply = match handler(&method, &params) {
                                Reply::Result(result) => json!({"id": msg["id"], "result": result}),
                                Reply::Error(code, message) => json!({
                                    "id": msg["id"],
                                    "error": {"code": code, "message": message}
                                }),
                                Reply::Silent => continue,
                                Reply::Close => {
                                    let _ = ws.send(Message::Close(None)).await;
                                    break;
                                }
                            };
                            if ws.send(Message::Text(reply.to_string().into())).await.is_err() {
                                break;
                            }
                        }
                    });
                }
            });
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Browser": "FakeChrome/1.0",
                "webSocketDebuggerUrl": ws_url
            })))
            .mount(&server)
            .await;

        Self { server, calls }
    }

    /// Serve `pages` from `/json/list`.
    pub async fn with_pages(self, pages: Value) -> Self {
        Mock::given(method("GET"))
            .and(path("/json/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pages))
            .mount(&self.server)
            .await;
        self
    }

    pub fn endpoint(&self) -> CdpEndpoint {
        CdpEndpoint::new(&self.server.uri(), Duration::from_secs(5)).unwrap()
    }

    /// Methods received so far, in order.
    pub fn methods(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(m, _)| m.clone()).collect()
    }

    /// Params of every `Runtime.evaluate` received so far.
    pub fn evaluated(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|(m, _)| m == "Runtime.evaluate")
            .filter_map(|(_, p)| p["expression"].as_str().map(str::to_string))
            .collect()
    }
}

/// Answers `Target.attachToTarget` and delegates `Runtime.evaluate`.
pub(crate) fn page_handler<F>(evaluate: F) -> impl Fn(&str, &Value) -> Reply + Send + Sync + 'static
where
    F: Fn(&str) -> Reply + Send + Sync + 'static,
{
    move |method: &str, params: &Value| -> Reply {
        match method {
            "Target.attachToTarget" => Reply::Result(json!({
                "sessionId": format!("session-{}", params["targetId"].as_str().unwrap_or_default())
            })),
            "Runtime.evaluate" => evaluate(params["expression"].as_str().unwrap_or_default()),
            _ => Reply::Result(json!({})),
        }
    }
}

/// `Runtime.evaluate` result carrying `value`.
pub(crate) fn value(value: Value) -> Reply {
    Reply::Result(json!({"result": {"type": "object", "value": value}}))
}

/// `Runtime.evaluate` result for a thrown exception.
pub(crate) fn thrown(description: &str) -> Reply {
    Reply::Result(json!({
        "result": {"type": "object", "subtype": "error"},
        "exceptionDetails": {
            "text": "Uncaught",
            "exception": {"description": description}
        }
    }))
}
