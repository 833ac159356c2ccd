//! Request dispatch tests using mocked HTTP responses
//!
//! These tests verify the form parameters each operation sends and how the
//! response body is handed back, without making real API calls.

mod common;

use common::{TEST_EMAIL, TEST_TOOL, create_mock_client, run_blocking};
use eutils_client::{EutilsError, Params, Payload, Value};
use tracing_test::traced_test;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ESEARCH: &str = include_str!("test_data/esearch_autism.xml");
const ESUMMARY: &str = include_str!("test_data/esummary_pubmed.xml");
const EINFO: &str = include_str!("test_data/einfo_pubmed.xml");
const EINFO_DBLIST: &str = include_str!("test_data/einfo_dblist.xml");
const EGQUERY: &str = include_str!("test_data/egquery_autism.xml");
const ELINK: &str = include_str!("test_data/elink_neighbor.xml");

/// Body received by the mock server for its only request
async fn single_request_body(mock_server: &MockServer) -> String {
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    String::from_utf8(requests[0].body.clone()).unwrap()
}

#[tokio::test]
#[traced_test]
async fn test_esearch_sends_trimmed_term_and_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/esearch.fcgi"))
        .and(body_string_contains("term=autism"))
        .and(body_string_contains("db=pubmed"))
        .and(body_string_contains("usehistory=y"))
        .and(body_string_contains(format!("tool={TEST_TOOL}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESEARCH))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let result = run_blocking(move || {
        create_mock_client(&uri).esearch("  autism \n", " pubmed ", Params::new())
    })
    .await
    .expect("ESearch should succeed");

    let search = result.get("eSearchResult").unwrap();
    assert_eq!(search.get("Count"), Some(&Value::Integer(61742)));

    let body = single_request_body(&mock_server).await;
    assert!(body.contains("email=eutilstest%40example.com"), "body: {body}");
    assert!(!body.contains("term=+"), "term must be trimmed: {body}");
}

#[tokio::test]
async fn test_esearch_caller_params_win_over_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESEARCH))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let params = Params::new()
        .with("usehistory", "n")
        .with("retmax", 3)
        .with("tool", "impostor");
    run_blocking(move || create_mock_client(&uri).esearch("autism", "pubmed", params))
        .await
        .expect("ESearch should succeed");

    let body = single_request_body(&mock_server).await;
    assert!(body.contains("usehistory=n"), "body: {body}");
    assert!(!body.contains("usehistory=y"), "body: {body}");
    assert!(body.contains("retmax=3"), "body: {body}");
    // identification is always the client's own
    assert!(body.contains(&format!("tool={TEST_TOOL}")), "body: {body}");
    assert!(!body.contains("impostor"), "body: {body}");
}

#[tokio::test]
async fn test_einfo_with_database() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/einfo.fcgi"))
        .and(body_string_contains("db=pubmed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EINFO))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let info = run_blocking(move || create_mock_client(&uri).einfo(" pubmed "))
        .await
        .unwrap();

    let db_name = info
        .get("eInfoResult")
        .and_then(|r| r.get("DbInfo"))
        .and_then(|d| d.get("DbName"))
        .and_then(Value::as_str);
    assert_eq!(db_name, Some("pubmed"));
}

#[tokio::test]
async fn test_einfo_blank_database_omits_db() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/einfo.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EINFO_DBLIST))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let info = run_blocking(move || create_mock_client(&uri).einfo("   "))
        .await
        .unwrap();

    assert!(info.get("eInfoResult").and_then(|r| r.get("DbList")).is_some());
    let body = single_request_body(&mock_server).await;
    assert!(!body.contains("db="), "body: {body}");
}

#[tokio::test]
async fn test_database_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/einfo.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EINFO_DBLIST))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let names = run_blocking(move || create_mock_client(&uri).database_names())
        .await
        .unwrap();

    assert_eq!(names.len(), 9);
    assert!(names.iter().any(|n| n == "pubmed"));
}

#[tokio::test]
async fn test_esummary_joins_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/esummary.fcgi"))
        .and(body_string_contains("id=11850928%2C11482001"))
        .and(body_string_contains("db=pubmed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESUMMARY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let result = run_blocking(move || {
        create_mock_client(&uri).esummary(&[11850928u64, 11482001], "pubmed", Params::new())
    })
    .await
    .unwrap();

    let first_id = result
        .get("eSummaryResult")
        .and_then(|r| r.get("DocSum"))
        .and_then(|d| d.at(0))
        .and_then(|d| d.get("Id"))
        .and_then(Value::as_u64);
    assert_eq!(first_id, Some(11850928));
}

#[tokio::test]
async fn test_efetch_defaults_to_xml() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/efetch.fcgi"))
        .and(body_string_contains("WebEnv=MCID_abc"))
        .and(body_string_contains("query_key=2"))
        .and(body_string_contains("retmode=xml"))
        .and(body_string_contains("retstart=0"))
        .and(body_string_contains("retmax=10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESUMMARY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let payload = run_blocking(move || {
        create_mock_client(&uri).efetch("pubmed", "MCID_abc", 2, Params::new())
    })
    .await
    .unwrap();

    let doc = payload.as_xml().expect("XML payload");
    assert!(doc.get("eSummaryResult").is_some());
}

#[tokio::test]
async fn test_efetch_text_mode_returns_body_verbatim() {
    let mock_server = MockServer::start().await;
    let medline = "PMID- 31978945\nOWN - NLM\nTI  - A Novel Coronavirus from Patients with Pneumonia in China, 2019.\n";

    Mock::given(method("POST"))
        .and(path("/efetch.fcgi"))
        .and(body_string_contains("retmode=text"))
        .and(body_string_contains("rettype=medline"))
        .and(body_string_contains("retmax=1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(medline))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let params = Params::new()
        .with("retmode", "text")
        .with("rettype", "medline")
        .with("retmax", 1);
    let payload = run_blocking(move || {
        create_mock_client(&uri).efetch("pubmed", "MCID_abc", 1, params)
    })
    .await
    .unwrap();

    assert_eq!(payload, Payload::Text(medline.to_string()));
    let body = single_request_body(&mock_server).await;
    assert!(!body.contains("retmode=xml"), "body: {body}");
}

#[tokio::test]
async fn test_elink_defaults_and_overrides() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/elink.fcgi"))
        .and(body_string_contains("id=31978945"))
        .and(body_string_contains("cmd=neighbor"))
        .and(body_string_contains("dbfrom=pubmed"))
        .and(body_string_contains("db=pmc"))
        .and(body_string_contains("retmode=xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ELINK))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let payload = run_blocking(move || {
        create_mock_client(&uri).elink(&["31978945"], Params::new().with("db", "pmc"))
    })
    .await
    .unwrap();

    let link_set = payload
        .as_xml()
        .and_then(|v| v.get("eLinkResult"))
        .and_then(|r| r.get("LinkSet"))
        .unwrap();
    assert_eq!(link_set.get("DbFrom").and_then(Value::as_str), Some("pubmed"));

    let body = single_request_body(&mock_server).await;
    assert!(!body.contains("&db=pubmed"), "caller's db must win: {body}");
}

#[tokio::test]
async fn test_egquery_forces_xml() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/egquery.fcgi"))
        .and(body_string_contains("term=autism"))
        .and(body_string_contains("retmode=xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EGQUERY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let result = run_blocking(move || create_mock_client(&uri).egquery(" autism "))
        .await
        .unwrap();

    let map = result.as_map().unwrap();
    assert_eq!(map.keys().next().map(String::as_str), Some("Result"));
    assert_eq!(
        result.get("Result").and_then(|r| r.get("Term")).and_then(Value::as_str),
        Some("autism")
    );
}

#[tokio::test]
async fn test_server_error_is_surfaced_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let err = run_blocking(move || {
        create_mock_client(&uri).esearch("autism", "pubmed", Params::new())
    })
    .await
    .unwrap_err();

    assert!(err.is_transport_error());
    assert!(matches!(err, EutilsError::ApiError { status: 500, .. }));
}

#[tokio::test]
async fn test_malformed_response_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/esummary.fcgi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<eSummaryResult><DocSum><Id>1</Id>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let err = run_blocking(move || {
        create_mock_client(&uri).esummary(&[1], "pubmed", Params::new())
    })
    .await
    .unwrap_err();

    assert!(matches!(err, EutilsError::XmlParseError { .. }));
}

#[test]
fn test_test_credentials_are_valid() {
    assert!(!TEST_TOOL.is_empty());
    assert!(TEST_EMAIL.contains('@'));
}
