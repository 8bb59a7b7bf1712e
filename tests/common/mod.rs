//! Local stand-in for the public holiday API

#![allow(dead_code)]

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted `getRestDeInfo` answers keyed by (year, month, page)
///
/// Answers scripted without a year apply to every year. Unscripted pages
/// answer with an empty month.
#[derive(Clone, Default)]
pub struct MockApi {
    pages: Arc<Mutex<HashMap<(Option<i32>, u32, u32), String>>>,
    failures: Arc<Mutex<HashMap<u32, StatusCode>>>,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl MockApi {
    pub fn respond(&self, month: u32, page: u32, body: String) {
        self.pages.lock().unwrap().insert((None, month, page), body);
    }

    pub fn respond_for(&self, year: i32, month: u32, page: u32, body: String) {
        self.pages
            .lock()
            .unwrap()
            .insert((Some(year), month, page), body);
    }

    /// Answers every page of `month` with `body`, whatever `pageNo` says
    pub fn respond_every_page(&self, month: u32, body: String) {
        self.pages.lock().unwrap().insert((None, month, 0), body);
    }

    pub fn fail(&self, month: u32, status: StatusCode) {
        self.failures.lock().unwrap().insert(month, status);
    }

    /// Query parameters of every request received so far
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for_month(&self, month: &str) -> usize {
        self.requests()
            .iter()
            .filter(|params| params.get("solMonth").map(String::as_str) == Some(month))
            .count()
    }

    pub fn requests_for_year(&self, year: &str) -> usize {
        self.requests()
            .iter()
            .filter(|params| params.get("solYear").map(String::as_str) == Some(year))
            .count()
    }
}

async fn rest_de_info(
    State(api): State<MockApi>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    api.requests.lock().unwrap().push(params.clone());

    let year: Option<i32> = params.get("solYear").and_then(|y| y.parse().ok());
    let month: u32 = params
        .get("solMonth")
        .and_then(|m| m.parse().ok())
        .unwrap_or(0);
    let page: u32 = params
        .get("pageNo")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);

    if let Some(status) = api.failures.lock().unwrap().get(&month) {
        return (*status, "upstream failure").into_response();
    }

    let scripted = {
        let pages = api.pages.lock().unwrap();
        pages
            .get(&(year, month, page))
            .or_else(|| pages.get(&(None, month, page)))
            .or_else(|| pages.get(&(None, month, 0)))
            .cloned()
    };
    let body = scripted.unwrap_or_else(|| month_body(r#""""#, 0));
    (StatusCode::OK, body).into_response()
}

/// Serves `api` on an ephemeral port and returns the service root URL
pub async fn spawn_mock(api: MockApi) -> String {
    let app = Router::new()
        .route("/svc/getRestDeInfo", get(rest_de_info))
        .with_state(api);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/svc")
}

/// Successful response with the given raw `items` value
pub fn month_body(items: &str, total_count: usize) -> String {
    format!(
        r#"{{"response":{{"header":{{"resultCode":"00","resultMsg":"NORMAL SERVICE."}},"body":{{"items":{items},"numOfRows":100,"pageNo":1,"totalCount":{total_count}}}}}}}"#
    )
}

pub fn item(locdate: u32, name: &str, is_holiday: &str) -> String {
    format!(
        r#"{{"dateKind":"01","dateName":"{name}","isHoliday":"{is_holiday}","locdate":{locdate},"seq":1}}"#
    )
}

/// Month body holding a single New Year's Day entry for `year`
pub fn new_year(year: i32) -> String {
    month_body(
        &format!(
            r#"{{"item":{}}}"#,
            item(u32::try_from(year).unwrap() * 10000 + 101, "1월1일", "Y")
        ),
        1,
    )
}
