//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use expense_core::{
    ApiError, ExpenseClient, ExpenseDraft, ExpenseRecord, HttpMethod, HttpRequest, HttpResponse,
};
use rust_decimal::Decimal;

const BASE_URL: &str = "http://localhost:8000";

fn client() -> ExpenseClient {
    ExpenseClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn check_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
    assert_eq!(req.header("content-type"), Some("application/json"), "{name}: content-type");
    assert_eq!(req.header("cache-control"), Some("no-store"), "{name}: cache-control");

    if let Some(headers) = expected["headers"].as_array() {
        let expected_headers: Vec<(String, String)> = headers
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: serde_json::Value =
                serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        check_request(name, &c.build_list_expenses(), &case["expected_request"]);

        let records = c.parse_list_expenses(simulated(case)).unwrap();
        let expected: Vec<ExpenseRecord> =
            serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(records, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: ExpenseDraft = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_add_expense(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let record = c.parse_add_expense(simulated(case)).unwrap();
        let expected: ExpenseRecord =
            serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(record, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Approve
// ---------------------------------------------------------------------------

#[test]
fn approve_test_vectors() {
    let raw = include_str!("../../test-vectors/approve.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        check_request(name, &c.build_approve_expense(id), &case["expected_request"]);

        let record = c.parse_approve_expense(simulated(case)).unwrap();
        let expected: ExpenseRecord =
            serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(record, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Reimburse
// ---------------------------------------------------------------------------

#[test]
fn reimburse_test_vectors() {
    let raw = include_str!("../../test-vectors/reimburse.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let amount: Decimal = case["input_amount"].as_str().unwrap().parse().unwrap();

        let req = c.build_reimburse(amount).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let remaining = c.parse_reimburse(simulated(case)).unwrap();
        let expected: Decimal = case["expected_remaining"].as_str().unwrap().parse().unwrap();
        assert_eq!(remaining, expected, "{name}: remaining");
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let status = case["status"].as_u64().unwrap() as u16;
        let response = HttpResponse::new(status, case["body"].as_str().unwrap());

        let err = match case["operation"].as_str().unwrap() {
            "list_expenses" => c.parse_list_expenses(response).map(|_| ()).unwrap_err(),
            "add_expense" => c.parse_add_expense(response).map(|_| ()).unwrap_err(),
            "approve_expense" => c.parse_approve_expense(response).map(|_| ()).unwrap_err(),
            "reimburse" => c.parse_reimburse(response).map(|_| ()).unwrap_err(),
            other => panic!("unknown operation: {other}"),
        };

        assert!(
            matches!(&err, ApiError::Http { status: s, body } if *s == status && body == case["body"].as_str().unwrap()),
            "{name}: variant"
        );
        assert_eq!(err.to_string(), case["expected_message"].as_str().unwrap(), "{name}: message");
    }
}
