//! End-to-end page tests against a live server on an ephemeral port

use std::net::SocketAddr;

use folio_core::projects::{ProjectRegistry, ProjectService, demo_projects};
use folio_server::{AppState, build_router};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

struct TestServer {
    addr: SocketAddr,
    projects: ProjectService,
    _public: TempDir,
}

async fn start_server() -> TestServer {
    let public = TempDir::new().expect("tempdir");
    std::fs::create_dir_all(public.path().join("css")).expect("css dir");
    std::fs::write(public.path().join("css/style.css"), "body { margin: 0; }").expect("css");

    let registry = ProjectRegistry::with_projects(demo_projects().expect("demo projects"));
    let projects = ProjectService::with_registry(registry);
    let app = build_router(AppState::new(projects.clone(), public.path()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    TestServer {
        addr,
        projects,
        _public: public,
    }
}

async fn send_raw(addr: SocketAddr, request: String) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_ascii_lowercase(), body.to_string())
}

async fn get(addr: SocketAddr, path: &str) -> (u16, String, String) {
    send_raw(
        addr,
        format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"),
    )
    .await
}

async fn post_form(addr: SocketAddr, path: &str, body: &str) -> (u16, String, String) {
    send_raw(
        addr,
        format!(
            "POST {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\
Content-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ),
    )
    .await
}

#[tokio::test]
async fn home_lists_seeded_projects() {
    let server = start_server().await;

    let (status, head, body) = get(server.addr, "/").await;
    assert_eq!(status, 200);
    assert!(head.contains("content-type: text/html; charset=utf-8"));
    assert!(head.contains("x-request-id:"));
    assert!(body.contains("Test Project Main"));
    assert!(body.contains("Test Project Additional"));
    assert!(body.contains("href=\"/detail-project/1\""));
}

#[tokio::test]
async fn static_pages_render() {
    let server = start_server().await;

    let (status, _, body) = get(server.addr, "/contact").await;
    assert_eq!(status, 200);
    assert!(body.contains("Contact Me"));

    let (status, _, body) = get(server.addr, "/project").await;
    assert_eq!(status, 200);
    assert!(body.contains("action=\"/project/create\""));

    let (status, _, body) = get(server.addr, "/healthz").await;
    assert_eq!(status, 200);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn detail_page_and_missing_index() {
    let server = start_server().await;

    let (status, _, body) = get(server.addr, "/detail-project/1").await;
    assert_eq!(status, 200);
    assert!(body.contains("Test Project Additional"));
    assert!(body.contains("20 October 2022"));
    assert!(body.contains("21 November 2022"));
    assert!(body.contains("1 Month"));

    let (status, _, body) = get(server.addr, "/detail-project/9").await;
    assert_eq!(status, 404);
    assert!(body.contains("E001"));

    let (status, _, _) = get(server.addr, "/detail-project/first").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn create_project_appends_and_redirects() {
    let server = start_server().await;

    let (status, head, _) = post_form(
        server.addr,
        "/project/create",
        "project-name=New+Site&date-start=2023-01-01&date-end=2023-03-15\
&project-description=Hello%20there&nodejs=checked&typescript=checked",
    )
    .await;
    assert_eq!(status, 303);
    assert!(head.contains("location: /"));
    assert_eq!(server.projects.len().await, 3);

    let (status, _, body) = get(server.addr, "/detail-project/2").await;
    assert_eq!(status, 200);
    assert!(body.contains("New Site"));
    assert!(body.contains("01 January 2023"));
    assert!(body.contains("15 March 2023"));
    assert!(body.contains("2 Months"));
    assert!(body.contains("Hello there"));

    let created = server.projects.get(2).await.unwrap();
    assert_eq!(created.technologies.slots(), [true, false, false, true]);
}

#[tokio::test]
async fn create_with_bad_input_is_rejected() {
    let server = start_server().await;

    let (status, _, body) = post_form(
        server.addr,
        "/project/create",
        "project-name=Broken&date-start=01%2F10%2F2022&date-end=2022-12-01",
    )
    .await;
    assert_eq!(status, 400);
    assert!(body.contains("E800"));

    let (status, _, body) = post_form(
        server.addr,
        "/project/create",
        "project-name=&date-start=2022-10-01&date-end=2022-12-01",
    )
    .await;
    assert_eq!(status, 400);
    assert!(body.contains("E801"));

    assert_eq!(server.projects.len().await, 2);
}

#[tokio::test]
async fn unreadable_form_bodies_render_error_pages() {
    let server = start_server().await;

    let (status, head, body) = post_form(
        server.addr,
        "/project/create",
        "project-name=a&project-name=b&date-start=2022-10-01&date-end=2022-12-01",
    )
    .await;
    assert_eq!(status, 400);
    assert!(head.contains("content-type: text/html"));
    assert!(body.contains("E801"));

    let body = "project-name=x&date-start=2022-10-01&date-end=2022-10-15";
    let (status, head, page) = send_raw(
        server.addr,
        format!(
            "POST /project/create HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\
Content-Length: {}\r\n\r\n{body}",
            server.addr,
            body.len()
        ),
    )
    .await;
    assert_eq!(status, 400);
    assert!(head.contains("content-type: text/html"));
    assert!(page.contains("E801"));

    let id = server.projects.get(0).await.unwrap().id;
    let (status, _, page) = post_form(
        server.addr,
        &format!("/project/update/{id}"),
        "project-name=a&project-name=b&date-start=2022-10-01&date-end=2022-12-01",
    )
    .await;
    assert_eq!(status, 400);
    assert!(page.contains("E801"));

    assert_eq!(server.projects.len().await, 2);
    assert_eq!(
        server.projects.get(0).await.unwrap().name,
        "Test Project Main"
    );
}

#[tokio::test]
async fn edit_form_keeps_project_live() {
    let server = start_server().await;

    let (status, _, body) = get(server.addr, "/update-project/0").await;
    assert_eq!(status, 200);
    assert!(body.contains("value=\"2022-10-01\""));
    assert!(body.contains("value=\"2022-12-01\""));

    // The form was never submitted; nothing was lost
    assert_eq!(server.projects.len().await, 2);
    let (status, _, body) = get(server.addr, "/detail-project/0").await;
    assert_eq!(status, 200);
    assert!(body.contains("Test Project Main"));

    let (status, _, _) = get(server.addr, "/update-project/2").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn submit_update_replaces_in_place() {
    let server = start_server().await;
    let id = server.projects.get(0).await.unwrap().id;

    let (status, _, _) = post_form(
        server.addr,
        &format!("/project/update/{id}"),
        "project-name=Renamed&date-start=2022-10-01&date-end=2022-10-15\
&project-description=Updated&reactjs=checked",
    )
    .await;
    assert_eq!(status, 303);
    assert_eq!(server.projects.len().await, 2);

    let updated = server.projects.get(0).await.unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.duration, "14 Days");
    assert_eq!(updated.technologies.slots(), [false, true, false, false]);

    let (status, _, _) = post_form(
        server.addr,
        "/project/update/not-a-uuid",
        "project-name=x&date-start=2022-10-01&date-end=2022-10-15",
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn delete_shifts_indices_and_rejects_out_of_range() {
    let server = start_server().await;

    let (status, head, _) = get(server.addr, "/delete-project/0").await;
    assert_eq!(status, 303);
    assert!(head.contains("location: /"));

    let (status, _, body) = get(server.addr, "/detail-project/0").await;
    assert_eq!(status, 200);
    assert!(body.contains("Test Project Additional"));

    let (status, _, _) = get(server.addr, "/delete-project/5").await;
    assert_eq!(status, 404);
    assert_eq!(server.projects.len().await, 1);
}

#[tokio::test]
async fn public_assets_are_served_from_public_dir() {
    let server = start_server().await;

    let (status, head, body) = get(server.addr, "/public/css/style.css").await;
    assert_eq!(status, 200);
    assert!(head.contains("content-type: text/css"));
    assert_eq!(body, "body { margin: 0; }");

    let (status, _, _) = get(server.addr, "/public/css/missing.css").await;
    assert_eq!(status, 404);

    let (status, _, _) = get(server.addr, "/public/../Cargo.toml").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn incoming_request_id_is_echoed() {
    let server = start_server().await;
    let (status, head, _) = send_raw(
        server.addr,
        format!(
            "GET /healthz HTTP/1.1\r\nHost: {}\r\nX-Request-Id: trace-42\r\nConnection: close\r\n\r\n",
            server.addr
        ),
    )
    .await;
    assert_eq!(status, 200);
    assert!(head.contains("x-request-id: trace-42"));
}

#[tokio::test]
async fn unknown_route_renders_not_found_page() {
    let server = start_server().await;

    let (status, _, body) = get(server.addr, "/nowhere").await;
    assert_eq!(status, 404);
    assert!(body.contains("Back to home"));
}
