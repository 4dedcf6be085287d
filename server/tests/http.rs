//! End-to-end checks of the HTTP surface through `warp::test`.

use std::path::PathBuf;

use pathlab_server::{AppState, Config, routes};
use serde_json::{Value, json};
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::Reply;

fn app_with(config: Config) -> BoxedFilter<(Box<dyn Reply>,)> {
    routes(AppState::new(&config), &config)
}

fn app() -> BoxedFilter<(Box<dyn Reply>,)> {
    app_with(Config::default())
}

async fn post(path: &str, body: &Value) -> (StatusCode, Value) {
    let res = warp::test::request()
        .method("POST")
        .path(path)
        .json(body)
        .reply(&app())
        .await;
    let v = serde_json::from_slice(res.body()).unwrap();
    (res.status(), v)
}

fn open_grid(w: usize, h: usize) -> Value {
    json!(vec![vec![0; w]; h])
}

#[tokio::test]
async fn health_reports_ok() {
    let res = warp::test::request()
        .method("GET")
        .path("/healthz")
        .reply(&app())
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let v: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(v, json!({ "status": "ok" }));
}

#[tokio::test]
async fn generates_seeded_maze() {
    let body = json!({ "width": 5, "height": 5, "seed": 42 });
    let (status, a) = post("/maze/generate", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(a["width"], 11);
    assert_eq!(a["height"], 11);
    assert_eq!(a["seed"], 42);
    assert_eq!(a["grid"].as_array().unwrap().len(), 11);

    let (_, b) = post("/maze/generate", &body).await;
    assert_eq!(a["grid"], b["grid"]);
}

#[tokio::test]
async fn unseeded_maze_has_no_seed() {
    let (status, v) = post("/maze/generate", &json!({ "width": 3, "height": 2 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!((v["width"].as_i64(), v["height"].as_i64()), (Some(7), Some(5)));
    assert!(v.get("seed").is_none());
}

#[tokio::test]
async fn rejects_bad_maze_dimensions() {
    for body in [
        json!({ "width": 1, "height": 5 }),
        json!({ "width": 5, "height": 0 }),
        json!({ "width": 101, "height": 5 }),
        json!({ "width": 5, "height": 500 }),
    ] {
        let (status, v) = post("/maze/generate", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(v["code"], "INVALID_DIMENSIONS", "{body}");
    }
}

#[tokio::test]
async fn maze_limit_follows_config() {
    let config = Config {
        max_maze_dimension: 10,
        ..Config::default()
    };
    let res = warp::test::request()
        .method("POST")
        .path("/maze/generate")
        .json(&json!({ "width": 11, "height": 3 }))
        .reply(&app_with(config))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let v: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(v["code"], "INVALID_DIMENSIONS");
    assert!(v["message"].as_str().unwrap().contains("at most 10x10"));
}

#[tokio::test]
async fn simulate_found() {
    let body = json!({
        "algorithm": "bfs",
        "grid": open_grid(3, 3),
        "start": { "x": 0, "y": 0 },
        "goal": { "x": 2, "y": 2 },
    });
    let (status, v) = post("/simulate", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["found"], true);
    assert_eq!(v["path"][0], json!({ "x": 0, "y": 0 }));
    assert_eq!(v["path"].as_array().unwrap().last(), Some(&json!({ "x": 2, "y": 2 })));
    assert_eq!(v["stats"]["pathLength"], 4);
    assert_eq!(
        v["stats"]["expandedNodes"].as_u64(),
        Some(v["visitedOrder"].as_array().unwrap().len() as u64)
    );
    assert!(v["stats"]["elapsedMs"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn simulate_not_found_is_unprocessable() {
    let body = json!({
        "algorithm": "dfs",
        "grid": [[0, 1, 0], [0, 1, 0], [0, 1, 0]],
        "start": { "x": 0, "y": 0 },
        "goal": { "x": 2, "y": 0 },
    });
    let (status, v) = post("/simulate", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["found"], false);
    assert_eq!(v["path"], json!([]));
    assert_eq!(v["stats"]["pathLength"], 0);
    assert_eq!(v["stats"]["expandedNodes"], 3);
}

#[tokio::test]
async fn simulate_domain_errors() {
    let cases = [
        (json!({ "algorithm": "greedy", "grid": open_grid(2, 2),
                 "start": { "x": 0, "y": 0 }, "goal": { "x": 1, "y": 1 } }),
         "UNKNOWN_ALGORITHM"),
        (json!({ "algorithm": "", "grid": open_grid(2, 2),
                 "start": { "x": 0, "y": 0 }, "goal": { "x": 1, "y": 1 } }),
         "VALIDATION_ERROR"),
        (json!({ "algorithm": "astar", "grid": open_grid(2, 2),
                 "start": { "x": 0, "y": 0 }, "goal": { "x": 2, "y": 0 } }),
         "OUT_OF_BOUNDS"),
        (json!({ "algorithm": "a*", "grid": [[0, 1], [0, 0]],
                 "start": { "x": 0, "y": 0 }, "goal": { "x": 1, "y": 0 } }),
         "BLOCKED"),
        (json!({ "algorithm": "bfs", "grid": [[0, 0], [0]],
                 "start": { "x": 0, "y": 0 }, "goal": { "x": 1, "y": 0 } }),
         "VALIDATION_ERROR"),
        (json!({ "algorithm": "bfs", "grid": [],
                 "start": { "x": 0, "y": 0 }, "goal": { "x": 0, "y": 0 } }),
         "VALIDATION_ERROR"),
    ];
    for (body, code) in cases {
        let (status, v) = post("/simulate", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(v["code"], code, "{body}");
        assert!(!v["message"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn malformed_body_is_validation_error() {
    let res = warp::test::request()
        .method("POST")
        .path("/simulate")
        .header("content-type", "application/json")
        .body("{\"algorithm\": \"bfs\", \"grid\": ")
        .reply(&app())
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let v: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(v["code"], "VALIDATION_ERROR");
    assert!(v["details"].is_string());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let config = Config {
        max_body_bytes: 64,
        ..Config::default()
    };
    let res = warp::test::request()
        .method("POST")
        .path("/simulate")
        .json(&json!({
            "algorithm": "bfs",
            "grid": open_grid(20, 20),
            "start": { "x": 0, "y": 0 },
            "goal": { "x": 1, "y": 1 },
        }))
        .reply(&app_with(config))
        .await;
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let v: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(v["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn unknown_route_and_wrong_method() {
    let res = warp::test::request()
        .method("GET")
        .path("/nope")
        .reply(&app())
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let v: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(v["code"], "NOT_FOUND");

    let res = warp::test::request()
        .method("GET")
        .path("/simulate")
        .reply(&app())
        .await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn generated_maze_is_solvable() {
    let (_, maze) = post("/maze/generate", &json!({ "width": 6, "height": 4, "seed": 7 })).await;
    let goal = json!({ "x": maze["width"].as_i64().unwrap() - 2, "y": maze["height"].as_i64().unwrap() - 2 });
    for algorithm in ["bfs", "dfs", "astar"] {
        let body = json!({
            "algorithm": algorithm,
            "grid": maze["grid"],
            "start": { "x": 1, "y": 1 },
            "goal": goal,
        });
        let (status, v) = post("/simulate", &body).await;
        assert_eq!(status, StatusCode::OK, "{algorithm}");
        assert_eq!(v["found"], true);
    }
}

#[tokio::test]
async fn dev_mode_answers_cors_preflight() {
    let config = Config {
        dev: true,
        ..Config::default()
    };
    let res = warp::test::request()
        .method("OPTIONS")
        .path("/simulate")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .reply(&app_with(config))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("access-control-allow-origin"));
}

fn static_fixture(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pathlab-{name}-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("assets")).unwrap();
    std::fs::write(dir.join("index.html"), "<html>pathlab</html>").unwrap();
    std::fs::write(dir.join("assets").join("app.js"), "console.log('hi')").unwrap();
    dir
}

#[tokio::test]
async fn serves_static_files_with_index_fallback() {
    let dir = static_fixture("static");
    let config = Config {
        static_dir: Some(dir.clone()),
        ..Config::default()
    };
    let app = app_with(config);

    let res = warp::test::request().path("/assets/app.js").reply(&app).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.body().as_ref(), b"console.log('hi')");

    let res = warp::test::request().path("/some/client/route").reply(&app).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.body().as_ref(), b"<html>pathlab</html>");

    let res = warp::test::request().path("/healthz").reply(&app).await;
    let v: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(v["status"], "ok");

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn unknown_post_with_static_dir_is_not_found() {
    let dir = static_fixture("post");
    let config = Config {
        static_dir: Some(dir.clone()),
        ..Config::default()
    };
    let app = app_with(config);

    let res = warp::test::request()
        .method("POST")
        .path("/nope")
        .json(&json!({}))
        .reply(&app)
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let v: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(v["code"], "NOT_FOUND");

    let res = warp::test::request()
        .method("DELETE")
        .path("/index.html")
        .reply(&app)
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = warp::test::request().path("/index.html").reply(&app).await;
    assert_eq!(res.status(), StatusCode::OK);

    std::fs::remove_dir_all(dir).ok();
}
