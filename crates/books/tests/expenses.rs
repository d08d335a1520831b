use books::BooksClient;
use books_core::models::Expense;
use books_core::payload::{Attachment, Attachments};
use books_core::query::QueryParameters;
use books_core::tenant::{Region, TenantContext};
use books_core::Error;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client(server: &MockServer) -> BooksClient {
    let tenant =
        TenantContext::new("test-token", "T1", Region::Default).with_base_endpoint(server.uri());
    BooksClient::new(tenant).unwrap()
}

async fn single_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one exchange");
    requests.remove(0)
}

fn content_type(request: &Request) -> String {
    request
        .headers
        .get("content-type")
        .map(|value| value.to_str().unwrap().to_string())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_list_sends_filters_tenant_and_bearer() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/expenses"))
        .and(query_param("status", "unbilled"))
        .and(query_param("organization_id", "T1"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "code": 0,
                "message": "success",
                "expenses": [
                    {"expense_id": "982", "total": 12.5, "status": "unbilled"},
                    {"expense_id": "981", "total": 40.0, "status": "unbilled"}
                ],
                "page_context": {"page": 1, "per_page": 200, "has_more_page": false}
            }"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let filters = QueryParameters::new().with("status", "unbilled");

    // Act
    let listing = client(&server)
        .expenses()
        .list(Some(&filters))
        .await
        .unwrap();

    // Assert
    let ids: Vec<_> = listing
        .items
        .iter()
        .map(|expense| expense.expense_id.as_deref().unwrap())
        .collect();
    assert_eq!(ids, vec!["982", "981"]);
    assert!(!listing.has_more_page());
    assert_eq!(filters.len(), 1);
}

#[tokio::test]
async fn test_create_with_receipt_is_multipart() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/expenses"))
        .and(query_param("organization_id", "T1"))
        .respond_with(ResponseTemplate::new(201).set_body_string(
            r#"{
                "code": 0,
                "message": "The expense has been recorded.",
                "expense": {
                    "expense_id": "982",
                    "amount": 12.5,
                    "expense_receipt_name": "receipt.pdf"
                }
            }"#,
        ))
        .mount(&server)
        .await;

    let expense = Expense::new("acc-1", "acc-2", 12.5);
    let receipt = Attachment::new("file", "receipt.pdf", b"%PDF-1.4 receipt".to_vec());

    // Act
    let created = client(&server)
        .expenses()
        .create(&expense, Attachments::single(receipt))
        .await
        .unwrap();

    // Assert
    assert_eq!(created.expense_id.as_deref(), Some("982"));
    assert_eq!(created.expense_receipt_name.as_deref(), Some("receipt.pdf"));

    let request = single_request(&server).await;
    assert!(content_type(&request).starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains(r#"name="JSONString""#));
    assert!(body.contains(r#""account_id":"acc-1""#));
    assert!(body.contains(r#"name="receipt""#));
    assert!(body.contains(r#"filename="receipt.pdf""#));
    assert!(body.contains("%PDF-1.4 receipt"));
}

#[tokio::test]
async fn test_create_without_receipt_is_form_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/expenses"))
        .respond_with(ResponseTemplate::new(201).set_body_string(
            r#"{
                "code": 0,
                "message": "The expense has been recorded.",
                "expense": {"expense_id": "983"}
            }"#,
        ))
        .mount(&server)
        .await;

    let created = client(&server)
        .expenses()
        .create_simple("acc-1", "acc-2", 7.0)
        .await
        .unwrap();

    assert_eq!(created.expense_id.as_deref(), Some("983"));

    let request = single_request(&server).await;
    assert!(content_type(&request).starts_with("application/x-www-form-urlencoded"));
    assert!(String::from_utf8_lossy(&request.body).starts_with("JSONString="));
}

#[tokio::test]
async fn test_not_found_with_json_body_is_remote() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/expenses/404"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"code":1002,"message":"Expense does not exist."}"#),
        )
        .mount(&server)
        .await;

    // Act
    let err = client(&server).expenses().get("404").await.unwrap_err();

    // Assert
    match err {
        Error::Remote {
            status,
            code,
            message,
            body,
            ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(code, Some(1002));
            assert_eq!(message.as_deref(), Some("Expense does not exist."));
            assert!(body.contains("1002"));
        }
        other => panic!("expected Remote, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unexpected_success_shape_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/expenses/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"code":0,"message":"success"}"#),
        )
        .mount(&server)
        .await;

    let err = client(&server).expenses().get("1").await.unwrap_err();

    assert!(err.is_parse());
    assert!(!err.is_remote());
}

#[tokio::test]
async fn test_delete_returns_message_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/expenses/982"))
        .and(query_param("organization_id", "T1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"code":0,"message":"The expense has been deleted."}"#),
        )
        .mount(&server)
        .await;

    let message = client(&server).expenses().delete("982").await.unwrap();

    assert_eq!(message, "The expense has been deleted.");
    assert!(single_request(&server).await.body.is_empty());
}

#[tokio::test]
async fn test_update_without_identifier_sends_nothing() {
    let server = MockServer::start().await;

    let err = client(&server)
        .expenses()
        .update(&Expense::new("acc-1", "acc-2", 1.0), Attachments::none())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingIdentifier { kind: "Expense" }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_uses_identifier_from_object() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/expenses/982"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "code": 0,
                "message": "Expense information has been updated.",
                "expense": {"expense_id": "982", "amount": 20.0}
            }"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let expense = Expense {
        expense_id: Some("982".to_string()),
        amount: Some(20.0),
        ..Default::default()
    };

    let updated = client(&server)
        .expenses()
        .update(&expense, Attachments::none())
        .await
        .unwrap();

    assert_eq!(updated.amount, Some(20.0));
}

#[tokio::test]
async fn test_add_receipt_sends_only_the_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/expenses/982/receipt"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_string(r#"{"code":0,"message":"The receipt has been attached."}"#),
        )
        .mount(&server)
        .await;

    let receipt = Attachment::new("upload", "taxi.png", b"png bytes".to_vec());

    let message = client(&server)
        .expenses()
        .add_receipt("982", receipt)
        .await
        .unwrap();

    assert_eq!(message, "The receipt has been attached.");

    let request = single_request(&server).await;
    let body = String::from_utf8_lossy(&request.body);
    assert!(content_type(&request).starts_with("multipart/form-data"));
    assert!(body.contains(r#"name="receipt""#));
    assert!(!body.contains("JSONString"));
}

#[tokio::test]
async fn test_receipt_download_is_returned_raw() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/expenses/982/receipt"))
        .and(query_param("organization_id", "T1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"\x89PNG not json".to_vec(), "image/png")
                .insert_header(
                    "Content-Disposition",
                    "attachment; filename=\"taxi.png\"",
                ),
        )
        .mount(&server)
        .await;

    // Act
    let file = client(&server).expenses().receipt("982").await.unwrap();

    // Assert
    assert_eq!(file.bytes, b"\x89PNG not json".to_vec());
    assert_eq!(file.file_name.as_deref(), Some("taxi.png"));
    assert_eq!(file.content_type.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn test_comments_are_listed_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/expenses/982/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"code":0,"message":"success","comments":[
                {"comment_id":"2","description":"Expense updated"},
                {"comment_id":"1","description":"Expense created"}
            ]}"#,
        ))
        .mount(&server)
        .await;

    let comments = client(&server).expenses().comments("982").await.unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments.items[0].comment_id.as_deref(), Some("2"));
    assert_eq!(
        comments.items[1].description.as_deref(),
        Some("Expense created")
    );
}
