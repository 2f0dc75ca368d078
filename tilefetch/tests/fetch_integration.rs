//! Integration tests for tile resolution against a real HTTP server.
//!
//! A small HTTP/1.1 server on the loopback interface stands in for a tile
//! service, so these tests drive the actual reqwest client, TCP probe,
//! image decoder and disk cache together.
//!
//! Run with: `cargo test --test fetch_integration`

use std::io::{BufRead, BufReader, Cursor, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};

use filetime::FileTime;
use image::{ImageFormat, Rgba, RgbaImage};
use parking_lot::Mutex;
use tempfile::TempDir;

use tilefetch::cache::TileCache;
use tilefetch::coord::TileCoord;
use tilefetch::decode::ImageDecoder;
use tilefetch::fetcher::{TileFetcher, TileOutcome};
use tilefetch::layer::{RemoteTmsLayer, TileSource};
use tilefetch::network::{StaticConnectivity, TcpProbe};
use tilefetch::ngw::{Connection, ResourceKind};
use tilefetch::pool::FetchPool;
use tilefetch::provider::{HttpClientConfig, ReqwestClient};

// ============================================================================
// Test Server
// ============================================================================

/// A request as seen by the test server.
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    cookie: Option<String>,
    body: String,
}

/// Loopback HTTP server with fixed routes:
///
/// - `/login` sets a session cookie
/// - `/resource/schema` returns a schema document
/// - `/missing/...` answers 404
/// - `/moved/...` answers 302
/// - `/empty/...` answers 200 with no body
/// - `/garbage/...` answers 200 with bytes that are not an image
/// - anything else answers 200 with a 4x4 PNG
struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl TestServer {
    fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let log = Arc::clone(&log);
                thread::spawn(move || handle(stream, &log));
            }
        });

        Self { addr, requests }
    }

    fn base(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn tile_paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == "GET")
            .map(|r| r.path.clone())
            .collect()
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }
}

fn handle(stream: TcpStream, log: &Mutex<Vec<Recorded>>) {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
        // Connectivity probes connect and close without a request
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0;
    let mut cookie = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim().to_string();
            match name.to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.parse().unwrap_or(0),
                "cookie" => cookie = Some(value),
                _ => {}
            }
        }
    }
    let mut body = vec![0u8; content_length];
    let _ = reader.read_exact(&mut body);

    log.lock().push(Recorded {
        method,
        path: path.clone(),
        cookie,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let (status, headers, payload): (&str, Vec<String>, Vec<u8>) = if path == "/login" {
        (
            "200 OK",
            vec!["Set-Cookie: tkt=abc123; Path=/".to_string()],
            Vec::new(),
        )
    } else if path == "/resource/schema" {
        (
            "200 OK",
            vec!["Content-Type: application/json".to_string()],
            br#"{"resources": {"raster_layer": {}, "webmap": {}, "something_new": {}}}"#.to_vec(),
        )
    } else if path.starts_with("/missing/") {
        ("404 Not Found", Vec::new(), b"not here".to_vec())
    } else if path.starts_with("/moved/") {
        (
            "302 Found",
            vec!["Location: /p/0/0/0.png".to_string()],
            Vec::new(),
        )
    } else if path.starts_with("/empty/") {
        ("200 OK", Vec::new(), Vec::new())
    } else if path.starts_with("/garbage/") {
        ("200 OK", Vec::new(), b"definitely not a png".to_vec())
    } else {
        ("200 OK", vec!["Content-Type: image/png".to_string()], png_tile())
    };

    let mut response = format!("HTTP/1.1 {}\r\nContent-Length: {}\r\n", status, payload.len());
    for header in headers {
        response.push_str(&header);
        response.push_str("\r\n");
    }
    response.push_str("Connection: close\r\n\r\n");

    let mut stream = reader.into_inner();
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&payload);
    let _ = stream.flush();
}

fn png_tile() -> Vec<u8> {
    let image = RgbaImage::from_pixel(4, 4, Rgba([10, 200, 30, 255]));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

// ============================================================================
// Helper Functions
// ============================================================================

type LiveFetcher = TileFetcher<ReqwestClient, StaticConnectivity, ImageDecoder>;

fn fetcher(url: String, temp_dir: &TempDir, online: bool) -> LiveFetcher {
    let config = HttpClientConfig {
        connect_timeout: Duration::from_secs(2),
        read_timeout: Duration::from_secs(5),
        ..HttpClientConfig::default()
    };
    TileFetcher::new(
        url,
        TileCache::new(temp_dir.path()).with_max_age(Duration::from_secs(3600)),
        ReqwestClient::with_config(&config).unwrap(),
        StaticConnectivity::new(online),
        ImageDecoder,
    )
}

/// Writes a decodable tile and backdates it past the maximum age.
fn seed_stale(cache: &TileCache, tile: &TileCoord) {
    let path = cache.write(tile, &png_tile()).unwrap();
    let old = SystemTime::now() - Duration::from_secs(7200);
    filetime::set_file_mtime(&path, FileTime::from_system_time(old)).unwrap();
}

// ============================================================================
// Tile Resolution
// ============================================================================

#[test]
fn test_download_is_cached_and_served_fresh() {
    let server = TestServer::start();
    let temp_dir = TempDir::new().unwrap();
    let fetcher = fetcher(format!("{}/{{p,q}}/{{z}}/{{x}}/{{y}}.png", server.base()), &temp_dir, true);
    let tile = TileCoord::new(3, 2, 5);

    let outcome = fetcher.resolve(&tile);
    let image = outcome.image().expect("tile should resolve");
    assert!(outcome.is_fresh());
    assert_eq!((image.width(), image.height()), (4, 4));
    assert!(fetcher.cache().is_fresh(&tile));

    // Second request is served from disk without another download
    assert!(fetcher.resolve(&tile).is_fresh());
    assert_eq!(server.tile_paths(), vec!["/p/3/2/5.png"]);

    let snapshot = fetcher.metrics().snapshot();
    assert_eq!(snapshot.fresh, 2);
    assert_eq!(snapshot.downloads, 1);
    assert_eq!(snapshot.bytes_downloaded, png_tile().len() as u64);
}

#[test]
fn test_subdomains_rotate_across_requests() {
    let server = TestServer::start();
    let temp_dir = TempDir::new().unwrap();
    let fetcher = fetcher(format!("{}/{{p,q}}/{{z}}/{{x}}/{{y}}.png", server.base()), &temp_dir, true);

    for x in 0..4 {
        assert!(fetcher.resolve(&TileCoord::new(2, x, 0)).is_fresh());
    }

    assert_eq!(
        server.tile_paths(),
        vec!["/p/2/0/0.png", "/q/2/1/0.png", "/p/2/2/0.png", "/q/2/3/0.png"]
    );
}

#[test]
fn test_not_found_without_cache_is_absent() {
    let server = TestServer::start();
    let temp_dir = TempDir::new().unwrap();
    let fetcher = fetcher(format!("{}/missing/{{z}}/{{x}}/{{y}}", server.base()), &temp_dir, true);
    let tile = TileCoord::new(1, 1, 1);

    assert!(fetcher.resolve(&tile).is_absent());
    assert!(!fetcher.cache().exists(&tile));
    assert_eq!(fetcher.metrics().snapshot().download_failures, 1);
}

#[test]
fn test_not_found_serves_stale_copy() {
    let server = TestServer::start();
    let temp_dir = TempDir::new().unwrap();
    let fetcher = fetcher(format!("{}/missing/{{z}}/{{x}}/{{y}}", server.base()), &temp_dir, true);
    let tile = TileCoord::new(4, 3, 2);
    seed_stale(fetcher.cache(), &tile);

    assert!(fetcher.resolve(&tile).is_stale());
    assert!(!fetcher.cache().is_fresh(&tile));
}

#[test]
fn test_redirect_is_not_followed() {
    let server = TestServer::start();
    let temp_dir = TempDir::new().unwrap();
    let fetcher = fetcher(format!("{}/moved/{{z}}/{{x}}/{{y}}", server.base()), &temp_dir, true);
    let tile = TileCoord::new(2, 1, 1);
    seed_stale(fetcher.cache(), &tile);

    assert!(fetcher.resolve(&tile).is_stale());
    assert_eq!(server.tile_paths(), vec!["/moved/2/1/1"]);
}

#[test]
fn test_empty_body_serves_stale_copy() {
    let server = TestServer::start();
    let temp_dir = TempDir::new().unwrap();
    let fetcher = fetcher(format!("{}/empty/{{z}}/{{x}}/{{y}}", server.base()), &temp_dir, true);
    let tile = TileCoord::new(5, 6, 7);
    seed_stale(fetcher.cache(), &tile);

    assert!(fetcher.resolve(&tile).is_stale());
    // The stale file was not overwritten with the empty body
    assert_eq!(fetcher.cache().read_stale(&tile), Some(png_tile()));
}

#[test]
fn test_undecodable_download_is_absent_but_kept() {
    let server = TestServer::start();
    let temp_dir = TempDir::new().unwrap();
    let fetcher = fetcher(format!("{}/garbage/{{z}}/{{x}}/{{y}}", server.base()), &temp_dir, true);
    let tile = TileCoord::new(2, 2, 2);
    seed_stale(fetcher.cache(), &tile);

    assert!(fetcher.resolve(&tile).is_absent());
    assert_eq!(
        fetcher.cache().read_stale(&tile),
        Some(b"definitely not a png".to_vec())
    );
}

#[test]
fn test_offline_never_contacts_server() {
    let server = TestServer::start();
    let temp_dir = TempDir::new().unwrap();
    let fetcher = fetcher(format!("{}/{{p,q}}/{{z}}/{{x}}/{{y}}.png", server.base()), &temp_dir, false);
    let cached = TileCoord::new(6, 1, 1);
    seed_stale(fetcher.cache(), &cached);

    assert!(fetcher.resolve(&cached).is_stale());
    assert!(fetcher.resolve(&TileCoord::new(6, 2, 2)).is_absent());
    assert!(server.requests().is_empty());
    assert_eq!(fetcher.metrics().snapshot().offline_skips, 2);
}

#[test]
fn test_connection_refused_serves_stale_copy() {
    // Bind then drop to get a port nobody listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let temp_dir = TempDir::new().unwrap();
    let fetcher = fetcher(format!("http://127.0.0.1:{}/{{z}}/{{x}}/{{y}}", port), &temp_dir, true);
    let tile = TileCoord::new(3, 3, 3);
    seed_stale(fetcher.cache(), &tile);

    assert!(fetcher.resolve(&tile).is_stale());
}

#[test]
fn test_set_url_switches_server_paths() {
    let server = TestServer::start();
    let temp_dir = TempDir::new().unwrap();
    let fetcher = fetcher(format!("{}/missing/{{z}}/{{x}}/{{y}}", server.base()), &temp_dir, true);
    let tile = TileCoord::new(1, 0, 0);

    assert!(fetcher.resolve(&tile).is_absent());
    fetcher.set_url(format!("{}/{{q,p}}/{{z}}/{{x}}/{{y}}.png", server.base()));
    assert!(fetcher.resolve(&tile).is_fresh());

    assert_eq!(server.tile_paths(), vec!["/missing/1/0/0", "/q/1/0/0.png"]);
}

// ============================================================================
// Connectivity Probe
// ============================================================================

#[test]
fn test_tcp_probe_gates_downloads() {
    let server = TestServer::start();
    let temp_dir = TempDir::new().unwrap();
    let probe = TcpProbe::new(server.addr.to_string(), Duration::from_secs(1));
    let fetcher = TileFetcher::new(
        format!("{}/{{z}}/{{x}}/{{y}}.png", server.base()),
        TileCache::new(temp_dir.path()),
        ReqwestClient::new().unwrap(),
        probe,
        ImageDecoder,
    );

    assert!(fetcher.resolve(&TileCoord::new(0, 0, 0)).is_fresh());
    assert_eq!(server.tile_paths(), vec!["/0/0/0.png"]);
}

// ============================================================================
// Layers and Worker Pool
// ============================================================================

#[test]
fn test_pool_prefetches_layer() {
    let server = TestServer::start();
    let temp_dir = TempDir::new().unwrap();
    let json = format!(r#"{{"url": "{}/{{p,q}}/{{z}}/{{x}}/{{y}}.png"}}"#, server.base());
    let layer = RemoteTmsLayer::from_json(
        &json,
        TileCache::new(temp_dir.path()),
        ReqwestClient::new().unwrap(),
        StaticConnectivity::online(),
        ImageDecoder,
    )
    .unwrap();
    assert_eq!(layer.max_thread_count(), 4);

    let tiles: Vec<TileCoord> = (0..8).map(|x| TileCoord::new(3, x, 1)).collect();
    let pool = FetchPool::for_source(layer).unwrap();
    let results = pool.resolve_all(&tiles);

    assert!(results.iter().all(TileOutcome::is_fresh));
    let paths = server.tile_paths();
    assert_eq!(paths.len(), 8);
    assert_eq!(paths.iter().filter(|p| p.starts_with("/p/")).count(), 4);
    assert_eq!(paths.iter().filter(|p| p.starts_with("/q/")).count(), 4);
    assert!(tiles.iter().all(|t| pool.source().fetcher().cache().is_fresh(t)));
}

// ============================================================================
// Capability Discovery
// ============================================================================

#[test]
fn test_connection_discovers_resource_kinds() {
    let server = TestServer::start();
    let mut connection = Connection::new(
        "local",
        "admin",
        "s3cret",
        &server.base(),
        &HttpClientConfig::default(),
    )
    .unwrap();

    connection.connect().unwrap();

    assert!(connection.is_connected());
    assert_eq!(connection.cookie(), Some("tkt=abc123; Path=/"));
    let kinds = connection.supported_kinds();
    assert_eq!(kinds.len(), 2);
    assert!(connection.is_type_supported(ResourceKind::RasterLayer));
    assert!(connection.is_type_supported(ResourceKind::WebMap));
    assert!(!connection.is_type_supported(ResourceKind::VectorLayer));

    let requests = server.requests();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/login");
    assert!(requests[0].body.contains("login=admin"));
    assert!(requests[0].body.contains("password=s3cret"));
    assert_eq!(requests[1].path, "/resource/schema");
    assert_eq!(requests[1].cookie.as_deref(), Some("tkt=abc123; Path=/"));
}
