//! Panel refreshes against a local axum server standing in for the
//! suggestions endpoint.

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::Json,
    routing::post,
    Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use track_suggestions::{
    FilterControls, GenreMode, HttpBackend, MemoryView, PanelContext, RefreshOutcome,
    SortOrder, SuggestionsBackend, SuggestionsError, SuggestionsPanel, SuggestionsRequest,
};

#[derive(Default)]
struct Recorded {
    requests: Mutex<Vec<(Option<String>, Value)>>,
}

async fn suggest(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    recorded.requests.lock().unwrap().push((content_type, body));

    Json(json!({
        "suggestions": [
            {"id": 31, "title": "<script>alert('x')</script>", "artist": "Tom & Jerry",
             "bpm": 126.0, "musical_key": "8A", "ranking": 3},
            {"id": 32, "title": "Quiet", "artist": "Someone",
             "bpm": null, "musical_key": null, "ranking": null}
        ],
        "count": 2
    }))
}

async fn start_server() -> (SocketAddr, Arc<Recorded>) {
    let recorded = Arc::new(Recorded::default());
    let app = Router::new()
        .route("/suggestions", post(suggest))
        .route(
            "/broken",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/garbage", post(|| async { "not json" }))
        .with_state(recorded.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, recorded)
}

fn panel_for(url: String) -> SuggestionsPanel<MemoryView> {
    SuggestionsPanel::new(
        PanelContext::new(17, url),
        MemoryView::new(["title", "artist", "bpm", "musical_key", "ranking"]),
    )
}

#[tokio::test]
async fn test_header_click_posts_sort_and_renders() {
    let (addr, recorded) = start_server().await;
    let mut panel = panel_for(format!("http://{}/suggestions", addr)).with_controls(
        FilterControls::default()
            .with_bpm_slider(8)
            .with_checked_genre(GenreMode::new("same")),
    );

    panel.on_header_click("bpm");
    let outcome = panel.refresh(&HttpBackend::new()).await;
    assert_eq!(outcome, Some(RefreshOutcome::Rendered { count: 2 }));

    let requests = recorded.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (content_type, body) = &requests[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        &json!({
            "track_id": 17,
            "bpm_range": 8,
            "genre_mode": "same",
            "sort_by": "bpm",
            "sort_order": "asc"
        })
    );

    let html = panel.view().tbody_html().unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("Tom &amp; Jerry"));
    assert!(html.contains("<td class=\"track-bpm\">126</td>"));
    assert!(html.contains("★★★☆☆"));
    assert!(html.contains("<td class=\"track-ranking\">--</td>"));
    assert_eq!(panel.view().count.as_deref(), Some("2"));
    assert_eq!(panel.bound_rows(), &[31, 32]);
}

#[tokio::test]
async fn test_server_error_keeps_previous_table() {
    let (addr, _recorded) = start_server().await;
    let mut panel = panel_for(format!("http://{}/suggestions", addr));
    let backend = HttpBackend::new();

    panel.refresh(&backend).await;
    let before = panel.view().tbody_html().unwrap().to_string();

    let ticket = panel.request_refresh().unwrap();
    let result = backend
        .fetch(&format!("http://{}/broken", addr), &ticket.request)
        .await;
    assert_eq!(
        panel.apply_response(ticket.seq, result),
        RefreshOutcome::Failed
    );
    assert_eq!(panel.view().tbody_html().unwrap(), before);
    assert_eq!(panel.view().count.as_deref(), Some("2"));
    assert_eq!(panel.bound_rows(), &[31, 32]);
}

#[tokio::test]
async fn test_backend_error_kinds() {
    let (addr, _recorded) = start_server().await;
    let backend = HttpBackend::new();
    let request = SuggestionsRequest {
        track_id: 1,
        bpm_range: 10,
        genre_mode: GenreMode::default(),
        sort_by: "title".to_string(),
        sort_order: SortOrder::Asc,
    };

    let err = backend
        .fetch(&format!("http://{}/broken", addr), &request)
        .await
        .unwrap_err();
    assert!(matches!(err, SuggestionsError::Status(s) if s.as_u16() == 500));

    let err = backend
        .fetch(&format!("http://{}/garbage", addr), &request)
        .await
        .unwrap_err();
    assert!(matches!(err, SuggestionsError::Decode(_)));

    // Nothing listens on port 9 of the loopback interface.
    let err = backend
        .fetch("http://127.0.0.1:9/suggestions", &request)
        .await
        .unwrap_err();
    assert!(matches!(err, SuggestionsError::Http(_)));
}
