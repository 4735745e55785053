use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use reqwest::StatusCode as HttpStatusCode;
use tokio::net::TcpListener;
use weft_provider::{ProviderClient, ProviderError};
use weft_store::{ServiceAccount, ServiceKind};

const FRIENDS_BODY: &str = r#"{"data":[{"name":"Maxwell Salzberg","id":"820651","picture":""},{"name":"Person to Invite","id":"abc123","picture":"http://cdn.fn.com/pic1.jpg"}]}"#;

async fn start_stub(router: Router) -> String {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("stub server error: {e}");
        }
    });

    format!("http://{}:{}", addr.ip(), addr.port())
}

fn facebook_account(token: &str) -> ServiceAccount {
    ServiceAccount {
        id: 1,
        person_id: 1,
        service: ServiceKind::Facebook,
        uid: "820651".to_string(),
        access_token: Some(token.to_string()),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_fetch_and_convert_friend_list() {
    let router = Router::new().route("/me/friends", get(|| async { FRIENDS_BODY }));
    let base_url = start_stub(router).await;

    let client = ProviderClient::with_base_url(base_url);
    let friends = client
        .fetch_friends(&facebook_account("token"))
        .await
        .unwrap();

    assert_eq!(friends.len(), 2);
    assert_eq!(friends[0].service, ServiceKind::Facebook);
    assert_eq!(friends[0].uid, "820651");
    assert_eq!(friends[0].name, "Maxwell Salzberg");
    assert_eq!(friends[0].photo_url, "");
    assert_eq!(friends[1].uid, "abc123");
    assert_eq!(friends[1].name, "Person to Invite");
    assert_eq!(friends[1].photo_url, "http://cdn.fn.com/pic1.jpg");
}

#[tokio::test]
async fn test_token_and_fields_pass_through() {
    let router = Router::new().route(
        "/me/friends",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let authorized = params.get("access_token").map(String::as_str) == Some("sekret")
                && params.get("fields").map(String::as_str) == Some("name,picture");
            if authorized {
                (StatusCode::OK, FRIENDS_BODY)
            } else {
                (StatusCode::UNAUTHORIZED, r#"{"error":"bad token"}"#)
            }
        }),
    );
    let base_url = start_stub(router).await;

    let client = ProviderClient::with_base_url(base_url);
    let friends = client
        .fetch_friends(&facebook_account("sekret"))
        .await
        .unwrap();

    assert_eq!(friends.len(), 2);
}

#[tokio::test]
async fn test_error_status_reported_as_is() {
    let router = Router::new().route(
        "/me/friends",
        get(|| async {
            (
                StatusCode::BAD_REQUEST,
                r#"{"error":{"message":"token expired"}}"#,
            )
        }),
    );
    let base_url = start_stub(router).await;

    let client = ProviderClient::with_base_url(base_url);
    let err = client
        .fetch_friends(&facebook_account("expired"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Api(status) if status == HttpStatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let router = Router::new().route("/me/friends", get(|| async { "<html>rate limited</html>" }));
    let base_url = start_stub(router).await;

    let client = ProviderClient::with_base_url(base_url);
    let err = client
        .fetch_friends(&facebook_account("token"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Json(_)));
}
