//! Integration tests for PA-API lookups using recorded responses.

use books_data::commands::SearchCommand;
use books_data::config::Config;
use books_data::ecode::ErrorCode;
use books_data::entity::Creator;
use books_data::error::Error;
use books_data::facade::{Lookup, PaapiFactory};
use books_data::format::TemplateFormatter;
use books_data::paapi::parser::parse_book;
use books_data::paapi::ClientOptions;
use chrono::NaiveDate;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GET_ITEMS_FIXTURE: &str = include_str!("fixtures/get_items.json");
const GET_ITEMS_ERROR_FIXTURE: &str = include_str!("fixtures/get_items_error.json");

fn make_config() -> Config {
    Config {
        associate_tag: "tag-22".to_string(),
        access_key: "AK".to_string(),
        secret_key: "SK".to_string(),
        ..Config::default()
    }
}

fn make_lookup(server: &MockServer) -> Lookup<PaapiFactory, TemplateFormatter> {
    let factory =
        PaapiFactory::with_options(ClientOptions { base_url: Some(server.uri()), proxy: None });
    Lookup::new(factory, TemplateFormatter::new(), None)
}

#[test]
fn test_parse_recorded_response() {
    let book = parse_book(GET_ITEMS_FIXTURE.as_bytes(), "4621300253").unwrap();

    assert_eq!(book.id, "4621300253");
    assert_eq!(book.title, "数学ガールの秘密ノート/整数で遊ぼう");
    assert!(book.url.starts_with("https://www.amazon.co.jp/dp/4621300253"));
    assert_eq!(book.product_type, "単行本（ソフトカバー）");
    assert_eq!(book.publisher, "丸善出版");
    assert_eq!(book.creators, vec![Creator::new("結城 浩", "著")]);
    assert_eq!(book.publication_date, NaiveDate::from_ymd_opt(2015, 9, 1));
    assert_eq!(book.last_release, NaiveDate::from_ymd_opt(2015, 9, 1));
    assert_eq!(book.service.name, "PA-API");

    let image = book.image.unwrap();
    assert_eq!(image.url, "https://m.media-amazon.com/images/I/41meaDSm2FL._SL160_.jpg");
    assert_eq!((image.height, image.width), (160, 111));
}

#[test]
fn test_parse_recorded_error() {
    let err = parse_book(GET_ITEMS_ERROR_FIXTURE.as_bytes(), "0000000000").unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::INVALID_API_RESPONSE));
    assert!(err.message().contains("InvalidParameterValue"));
}

#[tokio::test]
async fn test_search_by_isbn_with_template() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/paapi5/getitems"))
        .and(body_partial_json(serde_json::json!({
            "ItemIds": ["4621300253"],
            "Marketplace": "www.amazon.co.jp"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(GET_ITEMS_FIXTURE))
        .expect(1)
        .mount(&server)
        .await;

    let mut template = NamedTempFile::new().unwrap();
    write!(
        template,
        "{{{{ title }}}} / {{% for c in creators %}}{{{{ c.name }}}}{{% endfor %}} ({{{{ publisher }}}}, {{{{ publication_date }}}})"
    )
    .unwrap();

    let factory =
        PaapiFactory::with_options(ClientOptions { base_url: Some(server.uri()), proxy: None });
    let lookup =
        Lookup::new(factory, TemplateFormatter::new(), Some(template.path().to_path_buf()));

    let cmd = SearchCommand::new(make_config());
    let output = cmd.execute_with_lookup(&lookup, "978-4-621-30025-1", true, false).await.unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "数学ガールの秘密ノート/整数で遊ぼう / 結城 浩 (丸善出版, 2015-09-01)"
    );
}

#[tokio::test]
async fn test_search_raw_passthrough() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/paapi5/getitems"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GET_ITEMS_FIXTURE))
        .mount(&server)
        .await;

    let cmd = SearchCommand::new(make_config());
    let output =
        cmd.execute_with_lookup(&make_lookup(&server), "4621300253", false, true).await.unwrap();
    assert_eq!(output, GET_ITEMS_FIXTURE.as_bytes());
}

#[tokio::test]
async fn test_search_isbn_without_isbn10() {
    let server = MockServer::start().await;

    let cmd = SearchCommand::new(make_config());
    let err = cmd
        .execute_with_lookup(&make_lookup(&server), "9791032300824", true, false)
        .await
        .unwrap_err();

    let err = err.downcast_ref::<Error>().unwrap();
    assert_eq!(err.code(), Some(ErrorCode::INVALID_API_PARAMETER));
    assert_eq!(err.param("id"), Some("9791032300824"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_api_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/paapi5/getitems"))
        .respond_with(ResponseTemplate::new(400).set_body_string(GET_ITEMS_ERROR_FIXTURE))
        .mount(&server)
        .await;

    let cmd = SearchCommand::new(make_config());
    let err = cmd
        .execute_with_lookup(&make_lookup(&server), "0000000000", false, false)
        .await
        .unwrap_err();

    let rendered = format!("{:#}", err);
    assert!(rendered.contains("failed to look up book"));
    assert!(rendered.contains("400"));

    let err = err.downcast_ref::<Error>().unwrap();
    assert_eq!(err.code(), Some(ErrorCode::INVALID_API_RESPONSE));
}
