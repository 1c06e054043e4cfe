use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use common::backend::BackendClient;
use reqwest::StatusCode as HttpStatusCode;
use service::submission::repository::mock::MemorySubmissionRepository;
use service::submission::SubmissionService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, FrontendState, StoreState};
use server::startup::{build_app, Deployment};

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
}

async fn serve(app: Router) -> anyhow::Result<TestApp> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

/// Backend on an in-memory store plus a frontend pointed at it.
async fn start_split() -> anyhow::Result<(TestApp, TestApp, Arc<MemorySubmissionRepository>)> {
    let repo = Arc::new(MemorySubmissionRepository::default());
    let store = StoreState { submissions: SubmissionService::new(repo.clone()) };
    let backend = serve(routes::build_backend_router(store, cors())).await?;
    let frontend_state = FrontendState { backend: BackendClient::new(backend.base_url.clone()) };
    let frontend = serve(routes::build_frontend_router(frontend_state, cors())).await?;
    Ok((backend, frontend, repo))
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn post_form(url: &str, fields: &[(&str, &str)]) -> anyhow::Result<(HttpStatusCode, String)> {
    let res = client().post(url).form(fields).send().await?;
    let status = res.status();
    Ok((status, res.text().await?))
}

#[tokio::test]
async fn e2e_frontend_submit_matches_backend_submit() -> anyhow::Result<()> {
    let (backend, frontend, repo) = start_split().await?;

    let cases: [&[(&str, &str)]; 4] = [
        &[("name", "Ada"), ("email", "ada@example.com")],
        &[("name", "Ada")],
        &[("email", "ada@example.com"), ("name", "")],
        &[("name", "Grace Hopper"), ("email", "grace@example.com"), ("extra", "ignored")],
    ];
    for fields in cases {
        let (bs, direct) = post_form(&format!("{}/submit", backend.base_url), fields).await?;
        let (fs, proxied) = post_form(&format!("{}/submit", frontend.base_url), fields).await?;
        assert_eq!(bs, HttpStatusCode::OK);
        assert_eq!(fs, HttpStatusCode::OK);
        assert_eq!(proxied, direct, "fields {fields:?}");
    }
    // two valid cases, each sent once directly and once through the frontend
    assert_eq!(repo.len(), 4);
    Ok(())
}

#[tokio::test]
async fn e2e_round_trip_through_frontend() -> anyhow::Result<()> {
    let (backend, frontend, _repo) = start_split().await?;

    let (_, msg) = post_form(
        &format!("{}/submit", frontend.base_url),
        &[("name", "Ada"), ("email", "ada@example.com")],
    )
    .await?;
    assert_eq!(msg, "Thank you Ada, your email ada@example.com has been recorded!");

    let proxied = client().get(format!("{}/get_data", frontend.base_url)).send().await?;
    assert_eq!(proxied.status(), HttpStatusCode::OK);
    let proxied = proxied.json::<serde_json::Value>().await?;
    let direct = client().get(format!("{}/view", backend.base_url)).send().await?.json::<serde_json::Value>().await?;
    assert_eq!(proxied, direct);
    assert_eq!(proxied, serde_json::json!({"data": [{"name": "Ada", "email": "ada@example.com"}]}));
    Ok(())
}

#[tokio::test]
async fn e2e_frontend_forwards_repeated_key_like_backend() -> anyhow::Result<()> {
    let (backend, frontend, repo) = start_split().await?;
    let fields = [("name", "Ada"), ("name", "Bob"), ("email", "ada@example.com")];
    let (_, direct) = post_form(&format!("{}/submit", backend.base_url), &fields).await?;
    let (_, proxied) = post_form(&format!("{}/submit", frontend.base_url), &fields).await?;
    assert_eq!(direct, "Thank you Ada, your email ada@example.com has been recorded!");
    assert_eq!(proxied, direct);
    assert_eq!(repo.len(), 2);
    Ok(())
}

#[tokio::test]
async fn e2e_frontend_home_page() -> anyhow::Result<()> {
    let (_backend, frontend, _repo) = start_split().await?;
    let res = client().get(format!("{}/", frontend.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let html = res.text().await?;
    assert!(html.contains(r#"<form action="/submit" method="post">"#));
    assert!(html.contains(r#"href="/get_data""#));
    Ok(())
}

#[tokio::test]
async fn e2e_backend_down_is_bad_gateway() -> anyhow::Result<()> {
    // reserve a port, then free it so nothing listens there
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let dead = listener.local_addr()?;
    drop(listener);

    let state = FrontendState { backend: BackendClient::new(format!("http://{}", dead)) };
    let frontend = serve(routes::build_frontend_router(state, cors())).await?;

    let (status, body) = post_form(&format!("{}/submit", frontend.base_url), &[("name", "Ada"), ("email", "a@b")]).await?;
    assert_eq!(status, HttpStatusCode::BAD_GATEWAY);
    let v: serde_json::Value = serde_json::from_str(&body)?;
    assert!(v["error"].as_str().is_some());

    let res = client().get(format!("{}/get_data", frontend.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_GATEWAY);
    Ok(())
}

#[tokio::test]
async fn e2e_backend_error_body_passes_through() -> anyhow::Result<()> {
    // a backend whose store is down answers 500 with a JSON body; the frontend relays the body as-is
    let store = StoreState {
        submissions: SubmissionService::new(Arc::new(service::submission::repository::mock::UnavailableSubmissionRepository)),
    };
    let backend = serve(routes::build_backend_router(store, cors())).await?;
    let frontend = serve(routes::build_frontend_router(
        FrontendState { backend: BackendClient::new(backend.base_url.clone()) },
        cors(),
    ))
    .await?;

    let fields = [("name", "Ada"), ("email", "ada@example.com")];
    let (bs, direct) = post_form(&format!("{}/submit", backend.base_url), &fields).await?;
    let (fs, proxied) = post_form(&format!("{}/submit", frontend.base_url), &fields).await?;
    assert_eq!(bs, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(fs, HttpStatusCode::OK);
    assert_eq!(proxied, direct);
    Ok(())
}

#[tokio::test]
async fn e2e_backend_against_postgres() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip postgres e2e test.");
        return Ok(());
    }
    // env only, so a stray config.toml cannot leak in
    let mut cfg = configs::AppConfig::default();
    cfg.apply_env_with(|k| std::env::var(k).ok());
    let backend = serve(build_app(&cfg, Deployment::Backend).await?).await?;

    let name = format!("Ada {}", Uuid::new_v4());
    let (status, msg) = post_form(&format!("{}/submit", backend.base_url), &[("name", name.as_str()), ("email", "ada@example.com")]).await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert!(msg.contains(&name));

    let list = client().get(format!("{}/view", backend.base_url)).send().await?.json::<common::types::SubmissionList>().await?;
    let matching: Vec<_> = list.data.iter().filter(|s| s.name == name).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].email, "ada@example.com");
    Ok(())
}
