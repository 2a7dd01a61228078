// Drives the real reqwest client against an in-process axum server.

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use focos_dashboard::api::{ApiClient, ApiError, Endpoint, FireApi};
use focos_dashboard::dashboard::{load_dashboard, DashboardView};
use focos_dashboard::filters::FilterCriteria;
use focos_dashboard::table::{RecordTable, PAGE_SIZE};
use serde_json::{json, Value};
use std::error::Error;
use std::sync::{Arc, Mutex};

type Queries = Arc<Mutex<Vec<Option<String>>>>;

async fn serve(router: Router) -> Result<ApiClient, Box<dyn Error>> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(ApiClient::new(&format!("http://{addr}"), None)?)
}

fn records(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "municipio": format!("MUNICIPIO {i}"),
                    "estado": "SP",
                    "bioma": "Mata Atlântica",
                    "data_hora_gmt": "2025-11-02T13:20:00",
                    "frp": i
                })
            })
            .collect(),
    )
}

async fn focos(State(queries): State<Queries>, RawQuery(query): RawQuery) -> Json<Value> {
    if let Ok(mut seen) = queries.lock() {
        seen.push(query);
    }
    Json(records(120))
}

fn dashboard_router(failing: Option<&'static str>) -> Router {
    let route = |path: &'static str, body: Value| {
        let fail = failing == Some(path);
        get(move || async move {
            if fail {
                Err((StatusCode::INTERNAL_SERVER_ERROR, "boom"))
            } else {
                Ok(Json(body))
            }
        })
    };

    Router::new()
        .route(
            "/metricas",
            route(
                "/metricas",
                json!({"total_focos": 1500, "focos_por_estado": {"PARA": 1000, "ACRE": 500}}),
            ),
        )
        .route(
            "/focos_por_bioma",
            route("/focos_por_bioma", json!({"Amazônia": 1200, "Cerrado": 300})),
        )
        .route(
            "/focos_por_dia",
            route(
                "/focos_por_dia",
                json!({"2025-11-01": 700, "2025-11-02": 800}),
            ),
        )
        .route(
            "/risco_fogo",
            route("/risco_fogo", json!({"Baixo": 1000, "Crítico": 500})),
        )
        .route(
            "/frp_estados",
            route("/frp_estados", json!({"ACRE": 12.0, "PARA": 40.0})),
        )
}

#[tokio::test]
async fn occurrences_send_filters_and_page_client_side() -> Result<(), Box<dyn Error>> {
    let queries: Queries = Arc::default();
    let router = Router::new()
        .route("/focos", get(focos))
        .with_state(Arc::clone(&queries));
    let api = serve(router).await?;

    let filters = FilterCriteria {
        state: Some("SP".to_string()),
        limit: Some(1000),
        ..FilterCriteria::default()
    };
    let fetched = api.occurrences(&filters).await?;

    let seen = queries.lock().map(|q| q.clone()).unwrap_or_default();
    assert_eq!(seen, [Some("estado=SP&limit=1000".to_string())]);

    let mut table = RecordTable::new();
    table.load(fetched.clone());
    assert_eq!(table.total_pages(), 3);
    assert_eq!(table.page_records(), &fetched[..PAGE_SIZE]);
    assert_eq!(
        table.page_records()[0].municipality.as_deref(),
        Some("MUNICIPIO 0")
    );
    assert_eq!(table.page_rows()[49].municipality, "MUNICIPIO 49");
    Ok(())
}

#[tokio::test]
async fn dashboard_loads_in_response_order() -> Result<(), Box<dyn Error>> {
    let api = serve(dashboard_router(None)).await?;
    let data = load_dashboard(&api).await?;
    let view = DashboardView::new(&data, chrono::Local::now());

    assert_eq!(view.cards.total, "1.500");
    assert_eq!(view.cards.mean_frp, "26.0");
    let states: Vec<&str> = data.metrics.by_state.iter().map(|(k, _)| k).collect();
    assert_eq!(states, ["PARA", "ACRE"]);
    let frp_leader = view.charts.frp.as_ref().map(|c| c.points[0].label.as_str());
    assert_eq!(frp_leader, Some("PARA"));
    Ok(())
}

#[tokio::test]
async fn one_failing_endpoint_fails_the_dashboard() -> Result<(), Box<dyn Error>> {
    let api = serve(dashboard_router(Some("/risco_fogo"))).await?;
    match load_dashboard(&api).await {
        Err(ApiError::Status { endpoint, status }) => {
            assert_eq!(endpoint, Endpoint::FireRisk);
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        }
        other => panic!("expected a status error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() -> Result<(), Box<dyn Error>> {
    let router = Router::new().route("/status", get(|| async { "not json" }));
    let api = serve(router).await?;
    assert!(matches!(
        api.status().await,
        Err(ApiError::Decode {
            endpoint: Endpoint::Status,
            ..
        })
    ));
    Ok(())
}

#[tokio::test]
async fn export_returns_csv_text() -> Result<(), Box<dyn Error>> {
    let router = Router::new().route(
        "/exportar/csv",
        get(|RawQuery(query): RawQuery| async move {
            format!("query\n{}\n", query.unwrap_or_default())
        }),
    );
    let api = serve(router).await?;
    let filters = FilterCriteria {
        biome: Some("Cerrado".to_string()),
        frp_min: Some(10.0),
        ..FilterCriteria::default()
    };
    assert_eq!(api.export_csv(&filters).await?, "query\nbioma=Cerrado\n");
    Ok(())
}
