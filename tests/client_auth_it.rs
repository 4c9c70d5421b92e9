mod common;

// crates.io
use httpmock::prelude::*;
// self
use oilfox_client::{
	error::{AuthError, Error},
	session::Session,
};

#[tokio::test]
async fn login_exchanges_credentials_for_a_session() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/customer-api/v1/login").json_body(serde_json::json!({
				"email": common::EMAIL,
				"password": common::PASSWORD,
			}));
			then.status(200)
				.header("content-type", "application/json")
				.body(common::token_body("access-1", "refresh-1"));
		})
		.await;
	let session = client.login().await.expect("Login against the mock should succeed.");

	mock.assert_async().await;

	assert_eq!(session.access_token.expose(), "access-1");
	assert_eq!(session.refresh_token.expose(), "refresh-1");
}

#[tokio::test]
async fn login_rejection_surfaces_as_auth_error() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/customer-api/v1/login");
			then.status(401);
		})
		.await;
	let err = client.login().await.expect_err("Rejected credentials should surface an error.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Auth(AuthError::LoginRejected { status: 401 })));
	assert!(err.is_auth());
	assert!(!err.is_transient());
}

#[tokio::test]
async fn refresh_posts_the_grant_form_encoded() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/customer-api/v1/token")
				.header("content-type", "application/x-www-form-urlencoded")
				.body("refresh_token=refresh-old");
			then.status(200)
				.header("content-type", "application/json")
				.body(common::token_body("access-new", "refresh-new"));
		})
		.await;
	let old = Session::issued_now("access-old", "refresh-old");
	let fresh = client.refresh(&old).await.expect("Refresh against the mock should succeed.");

	mock.assert_async().await;

	assert_eq!(fresh.access_token.expose(), "access-new");
	assert_eq!(fresh.refresh_token.expose(), "refresh-new");
	assert!(fresh.issued_at > old.issued_at - time::Duration::seconds(1));
}

#[tokio::test]
async fn refresh_rejection_surfaces_as_auth_error() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/customer-api/v1/token");
			then.status(400);
		})
		.await;
	let old = Session::issued_now("access-old", "refresh-old");
	let err =
		client.refresh(&old).await.expect_err("Rejected refresh grant should surface an error.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Auth(AuthError::RefreshRejected { status: 400 })));
	assert!(err.is_auth());
}

#[tokio::test]
async fn malformed_token_reply_reports_the_failing_field() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/customer-api/v1/login");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"access-1\"}");
		})
		.await;
	let err = client.login().await.expect_err("Half a token pair should fail to decode.");

	assert!(matches!(err, Error::Auth(AuthError::MalformedTokenResponse { .. })));
}

#[tokio::test]
async fn ping_probes_the_origin_without_credentials() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/");
			then.status(200);
		})
		.await;

	assert!(client.ping().await.expect("Ping against the mock should succeed."));

	mock.assert_async().await;
}
