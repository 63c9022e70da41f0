mod utils;

use gazopti_sdk::{DeliveryUpdate, Error, KeyValueStore, NewDelivery};
use mockito::Matcher;
use serde_json::json;
use utils::test_utils::{bearer, create_test_client, delivery_json, TEST_TOKEN};

#[tokio::test]
async fn test_login_persists_token_for_dispatcher() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(
            json!({ "email": "dispatch@gazopti.test", "password": "secret" }),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"abc","role":"dispatcher"}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, store) = create_test_client(&server.url(), None);
    let session = client
        .login("dispatch@gazopti.test", "secret")
        .await
        .expect("login should succeed");

    assert_eq!(session.role.as_deref(), Some("dispatcher"));
    assert_eq!(store.get("token").unwrap().as_deref(), Some("abc"));
    assert!(client.has_session().unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_refuses_driver_without_persisting() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"abc","role":"driver"}"#)
        .create_async()
        .await;

    let (client, store) = create_test_client(&server.url(), None);
    let result = client.login("driver@gazopti.test", "secret").await;

    assert!(matches!(result, Err(Error::RoleNotAllowed(_))));
    assert_eq!(store.get("token").unwrap(), None);
}

#[tokio::test]
async fn test_login_without_token_in_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"role":"dispatcher"}"#)
        .create_async()
        .await;

    let (client, store) = create_test_client(&server.url(), None);
    let result = client.login("dispatch@gazopti.test", "secret").await;

    assert!(matches!(result, Err(Error::MissingToken)));
    assert_eq!(store.get("token").unwrap(), None);
}

#[tokio::test]
async fn test_login_failure_messages() {
    let mut server = mockito::Server::new_async().await;
    let _with_message = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::PartialJson(json!({ "email": "locked@gazopti.test" })))
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Account locked"}"#)
        .create_async()
        .await;
    let _without_message = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::PartialJson(json!({ "email": "wrong@gazopti.test" })))
        .with_status(401)
        .with_body("{}")
        .create_async()
        .await;

    let (client, _store) = create_test_client(&server.url(), None);

    match client.login("locked@gazopti.test", "secret").await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Account locked");
        }
        other => panic!("unexpected result: {:?}", other),
    }

    match client.login("wrong@gazopti.test", "secret").await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_requests_without_token_skip_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/deliveries")
        .expect(0)
        .create_async()
        .await;

    let (client, _store) = create_test_client(&server.url(), None);
    let result = client.list_deliveries().await;

    assert!(matches!(result, Err(Error::Unauthenticated)));
    assert!(result.unwrap_err().requires_login());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_drivers_sends_bearer_and_filters_roles() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/users")
        .match_query(Matcher::UrlEncoded("role".into(), "driver".into()))
        .match_header("authorization", bearer().as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                { "_id": "d1", "name": "Karim", "role": "driver" },
                { "_id": "u2", "name": "Sofia", "role": "dispatcher" },
                { "_id": "d3", "name": "Yanis", "role": "driver" }
            ])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let (client, _store) = create_test_client(&server.url(), Some(TEST_TOKEN));
    let drivers = client.list_drivers().await.unwrap();

    let ids: Vec<&str> = drivers.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["d1", "d3"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_array_list_is_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/trucks")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"trucks":[]}"#)
        .create_async()
        .await;

    let (client, _store) = create_test_client(&server.url(), Some(TEST_TOKEN));
    let trucks = client.list_trucks().await.unwrap();
    assert!(trucks.is_empty());
}

#[tokio::test]
async fn test_create_delivery_reports_server_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/deliveries")
        .match_header("authorization", bearer().as_str())
        .match_body(Matcher::Json(json!({
            "driver": "d1",
            "truck": "t1",
            "fullBottlesSent": 12,
            "emptyBottlesSent": 3
        })))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Truck already on the road"}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, _store) = create_test_client(&server.url(), Some(TEST_TOKEN));
    let result = client
        .create_delivery(&NewDelivery {
            driver: "d1".to_string(),
            truck: "t1".to_string(),
            full_bottles_sent: 12,
            empty_bottles_sent: 3,
        })
        .await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Truck already on the road");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_status_fallback_when_body_has_no_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/trucks")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let (client, _store) = create_test_client(&server.url(), Some(TEST_TOKEN));
    let err = client.list_trucks().await.unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.to_string(), "Request failed with status 502");
    assert!(!err.requires_login());
}

#[tokio::test]
async fn test_update_delivery_patches_sent_counts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/api/deliveries/60d5ec49f7e5b10015f8a2c1")
        .match_header("authorization", bearer().as_str())
        .match_body(Matcher::Json(
            json!({ "fullBottlesSent": 20, "emptyBottlesSent": 5 }),
        ))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let (client, _store) = create_test_client(&server.url(), Some(TEST_TOKEN));
    client
        .update_delivery(
            "60d5ec49f7e5b10015f8a2c1",
            &DeliveryUpdate {
                full_bottles_sent: 20,
                empty_bottles_sent: 5,
            },
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_delivery_keeps_id_in_one_segment() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "PATCH",
            Matcher::Regex(r"^/api/deliveries/a%2Fb%3Fc$".to_string()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Delivery updated"}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, _store) = create_test_client(&server.url(), Some(TEST_TOKEN));
    client
        .update_delivery(
            "a/b?c",
            &DeliveryUpdate {
                full_bottles_sent: 1,
                empty_bottles_sent: 1,
            },
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_delivery_accepts_any_success_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/deliveries")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Delivery created","delivery":{"_id":"x"}}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, _store) = create_test_client(&server.url(), Some(TEST_TOKEN));
    let result = client
        .create_delivery(&NewDelivery {
            driver: "d1".to_string(),
            truck: "t1".to_string(),
            full_bottles_sent: 5,
            empty_bottles_sent: 0,
        })
        .await;

    assert!(result.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_lists_tolerate_null_fields_and_skip_malformed_records() {
    let mut server = mockito::Server::new_async().await;
    let _drivers = server
        .mock("GET", "/api/users")
        .match_query(Matcher::UrlEncoded("role".into(), "driver".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                { "_id": "d1", "name": null, "role": "driver" },
                { "name": "No id", "role": "driver" },
                { "_id": "d3", "name": "Karim", "role": "driver" }
            ])
            .to_string(),
        )
        .create_async()
        .await;
    let _deliveries = server
        .mock("GET", "/api/deliveries")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                delivery_json("a1", 10, 2),
                { "_id": "a2", "driver": { "name": "NoId" } },
                { "_id": "a3", "fullBottlesSent": "many" },
                "garbage"
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let (client, _store) = create_test_client(&server.url(), Some(TEST_TOKEN));

    let drivers = client.list_drivers().await.unwrap();
    let ids: Vec<&str> = drivers.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["d1", "d3"]);
    assert_eq!(drivers[0].name, "");

    let deliveries = client.list_deliveries().await.unwrap();
    assert_eq!(deliveries.len(), 2);
    assert_eq!(deliveries[0].driver_label(), "Karim");
    assert_eq!(deliveries[1].driver_label(), "NoId");
}

#[tokio::test]
async fn test_expired_token_requires_login() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/deliveries")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"jwt expired"}"#)
        .create_async()
        .await;

    let (client, _store) = create_test_client(&server.url(), Some(TEST_TOKEN));
    let err = client.list_deliveries().await.unwrap_err();
    assert!(err.requires_login());
}

#[tokio::test]
async fn test_transport_failure() {
    // Nothing listens on port 1
    let (client, _store) = create_test_client("http://127.0.0.1:1", Some(TEST_TOKEN));
    let result = client.list_deliveries().await;
    assert!(matches!(result, Err(Error::Transport(_))));
}
