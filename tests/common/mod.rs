//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use api_gateway::config::UpstreamConfig;
use api_gateway::health::HealthAggregator;
use api_gateway::http::{AppState, HttpServer};
use api_gateway::lifecycle::Shutdown;
use api_gateway::observability::metrics::GatewayMetrics;
use api_gateway::proxy::InstrumentedProxy;
use api_gateway::upstream::{self, ServiceClient};

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        201 => "201 Created",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Read one request (headers plus any advertised body) from the socket.
async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut request = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
        }

        if let Some(head_end) = request
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
        {
            let head = String::from_utf8_lossy(&request[..head_end]);
            let content_length = head
                .lines()
                .find_map(|line| line.to_ascii_lowercase().strip_prefix("content-length:").map(str::trim).map(String::from))
                .and_then(|value| value.parse::<usize>().ok())
                .unwrap_or(0);

            if request.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }

    request
}

async fn respond(socket: &mut TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text(status),
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Start a mock downstream service that answers every request with a fixed
/// status and JSON body. Returns the bound address.
pub async fn start_mock_backend(status: u16, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        read_request(&mut socket).await;
                        respond(&mut socket, status, body).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock backend that records every request it receives before
/// answering with the fixed response.
#[allow(dead_code)]
pub async fn start_recording_backend(
    status: u16,
    body: &'static str,
) -> (SocketAddr, Arc<Mutex<Vec<Vec<u8>>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        recorded.lock().await.push(request);
                        respond(&mut socket, status, body).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, requests)
}

/// Start a backend that accepts connections but never responds, to exercise
/// probe timeouts.
#[allow(dead_code)]
pub async fn start_stalled_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        loop {
            match listener.accept().await {
                Ok((socket, _)) => held.push(socket),
                Err(_) => break,
            }
        }
    });

    addr
}

/// Reserve an address nothing is listening on.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Upstream config pointing the identity and media services at the given
/// addresses.
pub fn upstreams_for(auth: SocketAddr, image: SocketAddr, health_timeout_secs: u64) -> UpstreamConfig {
    UpstreamConfig {
        auth_service_url: format!("http://{auth}"),
        image_service_url: format!("http://{image}"),
        health_timeout_secs,
    }
}

/// Spawn a gateway with no store or cache handle, serving on an ephemeral
/// port. Returns the bound address and the shutdown trigger.
pub async fn spawn_gateway(upstreams: UpstreamConfig) -> (SocketAddr, Shutdown) {
    let http_client = upstream::build_client().unwrap();
    let metrics = Arc::new(GatewayMetrics::new().unwrap());

    let state = AppState {
        health: Arc::new(HealthAggregator::new(
            None,
            None,
            http_client.clone(),
            &upstreams,
        )),
        proxy: Arc::new(InstrumentedProxy::new(metrics.clone())),
        upstream: Arc::new(ServiceClient::new(http_client, &upstreams)),
        metrics,
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = HttpServer::new(state);
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    (addr, shutdown)
}

/// HTTP client that talks straight to the local gateway.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}
