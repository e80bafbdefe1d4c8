//! Integration tests: HTTP adapters against an in-process stub server
//! (rc-client).

use pretty_assertions::assert_eq;
use rc_client::{ClientConfig, ClientError, HttpClient};
use rc_core::id::NodeId;
use rc_core::model::{Edge, Graph, Node, RouteRequest, RouteResult, RouteStep, SaveGraphRequest};
use rc_editor::{GraphStore, RouteService};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

fn id(s: &str) -> NodeId {
    NodeId::intern(s)
}

/// Serve exactly one request with a canned answer. The handle yields the
/// raw request text.
async fn serve_once(status: &'static str, body: &'static str) -> (HttpClient, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });
    let config = ClientConfig::default().with_base_url(format!("http://{addr}/"));
    (HttpClient::new(&config).unwrap(), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn unreachable_client() -> HttpClient {
    // Port 9 (discard) is closed on any sane test machine.
    let config = ClientConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_secs(2),
    };
    HttpClient::new(&config).unwrap()
}

fn route_request() -> RouteRequest {
    let mut graph = Graph::new();
    graph.add_node(Node::new(id("1"), "A", 0.0, 0.0));
    graph.add_node(Node::new(id("2"), "B", 100.0, 0.0));
    graph.add_edge(Edge::new(id("1"), id("2"), 50.0)).unwrap();
    RouteRequest::new(&graph, id("1"), id("2"))
}

#[tokio::test]
async fn route_request_posts_camel_case_json() {
    let (client, server) = serve_once(
        "200 OK",
        r#"{"path":["1","2"],"total":50,"edgePath":[{"a":"1","b":"2"}]}"#,
    )
    .await;
    let result = client.request_route(&route_request()).await;
    assert_eq!(
        result,
        RouteResult {
            path: vec![id("1"), id("2")],
            total: Some(50.0),
            edge_path: vec![RouteStep { a: id("1"), b: id("2") }],
        }
    );

    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST /route HTTP/1.1"), "{raw}");
    assert!(raw.contains(r#""startId":"1""#), "{raw}");
    assert!(raw.contains(r#""endId":"2""#), "{raw}");
}

#[tokio::test]
async fn no_route_answer_decodes_to_not_found() {
    let (client, _server) = serve_once("200 OK", r#"{"path":[],"total":null,"edgePath":[]}"#).await;
    let result = client.request_route(&route_request()).await;
    assert!(!result.found());
    assert_eq!(result, RouteResult::empty());
}

#[tokio::test]
async fn server_error_becomes_empty_route() {
    let (client, _server) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
    assert_eq!(client.request_route(&route_request()).await, RouteResult::empty());
}

#[tokio::test]
async fn unreachable_service_never_panics() {
    let client = unreachable_client();
    assert_eq!(client.request_route(&route_request()).await, RouteResult::empty());
    assert!(client.list_graphs().await.is_empty());
    assert_eq!(client.load_graph(1).await, None);

    let save = SaveGraphRequest {
        name: "x".to_string(),
        nodes: Vec::new(),
        edges: Vec::new(),
    };
    let err = client.save_graph(&save).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "{err}");
}

#[tokio::test]
async fn lists_and_loads_graphs() {
    let (client, server) = serve_once(
        "200 OK",
        r#"[{"id":7,"name":"Campus","createdAt":"2024-05-01 10:00:00"},{"id":3,"name":"Old"}]"#,
    )
    .await;
    let graphs = client.list_graphs().await;
    assert_eq!(graphs.len(), 2);
    assert_eq!((graphs[0].id, graphs[0].name.as_str()), (7, "Campus"));
    assert_eq!(graphs[1].created_at, "");
    assert!(server.await.unwrap().starts_with("GET /graphs HTTP/1.1"));

    let (client, server) = serve_once("200 OK", include_str!("fixtures/stored.json")).await;
    let data = client.load_graph(7).await.unwrap();
    assert_eq!(data.nodes.len(), 2);
    assert_eq!(data.edges[0].weight, 27.0);
    assert!(server.await.unwrap().starts_with("GET /graphs/7 HTTP/1.1"));
}

#[tokio::test]
async fn missing_graph_is_none() {
    let (client, _server) = serve_once("404 Not Found", r#"{"detail":"Graph not found"}"#).await;
    assert_eq!(client.load_graph(99).await, None);
}

#[tokio::test]
async fn save_reports_status_errors() {
    let (client, _server) = serve_once("422 Unprocessable Entity", r#"{"detail":"bad"}"#).await;
    let save = SaveGraphRequest {
        name: "Campus".to_string(),
        nodes: vec![Node::new(id("1"), "Gate", 40.0, 40.0)],
        edges: Vec::new(),
    };
    match client.save_graph(&save).await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status, 422);
            assert!(body.contains("bad"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn save_returns_receipt() {
    let (client, server) = serve_once("200 OK", r#"{"id":12,"name":"Campus"}"#).await;
    let save = SaveGraphRequest {
        name: "Campus".to_string(),
        nodes: vec![Node::new(id("1"), "Gate", 40.0, 40.0)],
        edges: Vec::new(),
    };
    let receipt = client.save_graph(&save).await.unwrap();
    assert_eq!((receipt.id, receipt.name.as_str()), (12, "Campus"));
    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST /graphs HTTP/1.1"));
    assert!(raw.contains(r#""name":"Gate""#));
}
