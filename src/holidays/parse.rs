// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Holiday API response parsing helpers
//!
//! The public data API wraps results as `response.body.items.item`, where
//! `item` is a list, a single object, or absent, and `items` itself turns into
//! an empty string when a month has no entries.

use serde::Deserialize;

use super::types::HolidayRecord;

/// Result code the API uses for a successful call
const RESULT_CODE_OK: &str = "00";

/// One decoded page of a month query
#[derive(Debug, Default)]
pub(crate) struct MonthPage {
    pub records: Vec<HolidayRecord>,
    /// `totalCount` reported by the API, if any
    pub total_count: Option<usize>,
}

#[derive(Deserialize)]
struct Envelope {
    response: Option<ApiResponse>,
}

#[derive(Deserialize)]
struct ApiResponse {
    header: Option<ApiHeader>,
    body: Option<ApiBody>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiHeader {
    result_code: String,
    #[serde(default)]
    result_msg: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiBody {
    #[serde(default)]
    items: Option<Items>,
    #[serde(default)]
    total_count: Option<Scalar>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Items {
    Listed {
        #[serde(default)]
        item: Option<OneOrMany<RawItem>>,
    },
    // "" when the month is empty
    Placeholder(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(u64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }

    fn as_usize(&self) -> Option<usize> {
        match self {
            Self::Number(n) => usize::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    locdate: Scalar,
    #[serde(default)]
    date_name: String,
    #[serde(default)]
    is_holiday: Option<String>,
}

impl From<RawItem> for HolidayRecord {
    fn from(item: RawItem) -> Self {
        HolidayRecord {
            date: item.locdate.into_text(),
            name: item.date_name,
            is_holiday: item.is_holiday.as_deref().is_some_and(|v| v == "Y"),
        }
    }
}

/// Decodes one month page into normalized records
pub(crate) fn parse_month_page(body: &str) -> Result<MonthPage, String> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| format!("Invalid response body: {e}"))?;

    let Some(response) = envelope.response else {
        return Ok(MonthPage::default());
    };

    if let Some(header) = response.header {
        if header.result_code != RESULT_CODE_OK {
            return Err(format!(
                "API returned result code {}: {}",
                header.result_code, header.result_msg
            ));
        }
    }

    let Some(body) = response.body else {
        return Ok(MonthPage::default());
    };

    let total_count = body.total_count.as_ref().and_then(Scalar::as_usize);
    let records = match body.items {
        Some(Items::Listed { item: Some(items) }) => {
            items.into_vec().into_iter().map(HolidayRecord::from).collect()
        }
        Some(Items::Listed { item: None } | Items::Placeholder(_)) | None => Vec::new(),
    };

    Ok(MonthPage {
        records,
        total_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap_body(body: &str) -> String {
        format!(
            r#"{{"response":{{"header":{{"resultCode":"00","resultMsg":"NORMAL SERVICE."}},"body":{body}}}}}"#
        )
    }

    #[test]
    fn test_parse_month_page_list() {
        let json = wrap_body(
            r#"{"items":{"item":[
                {"dateKind":"01","dateName":"설날","isHoliday":"Y","locdate":20250128,"seq":1},
                {"dateKind":"01","dateName":"설날","isHoliday":"Y","locdate":20250129,"seq":1}
            ]},"numOfRows":100,"pageNo":1,"totalCount":2}"#,
        );

        let page = parse_month_page(&json).unwrap();
        assert_eq!(page.total_count, Some(2));
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].date, "20250128");
        assert_eq!(page.records[0].name, "설날");
        assert!(page.records[0].is_holiday);
    }

    #[test]
    fn test_parse_month_page_single_object() {
        let json = wrap_body(
            r#"{"items":{"item":{"dateKind":"01","dateName":"삼일절","isHoliday":"Y","locdate":20250301,"seq":1}},"numOfRows":100,"pageNo":1,"totalCount":1}"#,
        );

        let page = parse_month_page(&json).unwrap();
        assert_eq!(
            page.records,
            vec![HolidayRecord {
                date: "20250301".to_string(),
                name: "삼일절".to_string(),
                is_holiday: true,
            }]
        );
    }

    #[test]
    fn test_parse_month_page_keeps_non_holiday_entries() {
        let json = wrap_body(
            r#"{"items":{"item":{"dateName":"제헌절","isHoliday":"N","locdate":"20250717"}},"totalCount":"1"}"#,
        );

        let page = parse_month_page(&json).unwrap();
        assert_eq!(page.total_count, Some(1));
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].date, "20250717");
        assert!(!page.records[0].is_holiday);
    }

    #[test]
    fn test_parse_month_page_empty_string_items() {
        let json = wrap_body(r#"{"items":"","numOfRows":100,"pageNo":1,"totalCount":0}"#);

        let page = parse_month_page(&json).unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.total_count, Some(0));
    }

    #[test]
    fn test_parse_month_page_missing_item_field() {
        let json = wrap_body(r#"{"items":{},"totalCount":0}"#);
        assert!(parse_month_page(&json).unwrap().records.is_empty());
    }

    #[test]
    fn test_parse_month_page_missing_response() {
        let page = parse_month_page("{}").unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.total_count, None);
    }

    #[test]
    fn test_parse_month_page_error_result_code() {
        let json = r#"{"response":{"header":{"resultCode":"30","resultMsg":"SERVICE_KEY_IS_NOT_REGISTERED_ERROR"}}}"#;

        let err = parse_month_page(json).unwrap_err();
        assert!(err.contains("30"));
        assert!(err.contains("SERVICE_KEY_IS_NOT_REGISTERED_ERROR"));
    }

    #[test]
    fn test_parse_month_page_rejects_non_json() {
        let xml = "<OpenAPI_ServiceResponse><cmmMsgHeader/></OpenAPI_ServiceResponse>";
        assert!(parse_month_page(xml).is_err());
    }
}
