//! In-process HTTP stub standing in for a Flux service in tests.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

/// The canned answer a [`StubServer`] gives to every request.
#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    content_type: Option<&'static str>,
    body: String,
    delay: Duration,
}

impl StubResponse {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn content_type(mut self, content_type: &'static str) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<(Method, String)>>>,
}

impl StubServer {
    pub async fn start(response: StubResponse) -> Self {
        Self::start_routed(Vec::new(), response).await
    }

    /// Answers requests for a listed path with its response, everything else with `fallback`.
    pub async fn start_routed(routes: Vec<(&'static str, StubResponse)>, fallback: StubResponse) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let seen = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = routes.clone();
                let fallback = fallback.clone();
                let seen = seen.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let path = req.uri().path().to_string();
                        let response = routes
                            .iter()
                            .find(|(route, _)| *route == path)
                            .map(|(_, response)| response.clone())
                            .unwrap_or_else(|| fallback.clone());
                        seen.lock().unwrap().push((req.method().clone(), path));
                        async move {
                            tokio::time::sleep(response.delay).await;
                            Ok::<_, Infallible>(build_response(&response))
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self { addr, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Method and path of every request received so far.
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.requests.lock().unwrap().clone()
    }
}

fn build_response(stub: &StubResponse) -> Response<String> {
    let mut response = Response::new(stub.body.clone());
    *response.status_mut() = StatusCode::from_u16(stub.status).expect("valid stub status");
    if let Some(content_type) = stub.content_type {
        response.headers_mut().insert(
            hyper::header::CONTENT_TYPE,
            hyper::header::HeaderValue::from_static(content_type),
        );
    }
    response
}

/// A local url nothing is listening on.
pub async fn unused_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe listener address");
    drop(listener);
    format!("http://{addr}")
}
