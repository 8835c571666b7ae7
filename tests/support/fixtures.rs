//! Mock service responses.

use crypto_box::SecretKey;
use keyturn::core::cipher::SealedBox;
use keyturn::core::credentials::IamCredentials;
use keyturn::core::secrets::GithubClient;
use serde_json::Value;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockBuilder, MockServer, Request, ResponseTemplate};

const IAM_NS: &str = "https://iam.amazonaws.com/doc/2010-05-08/";

fn xml(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/xml")
}

/// `ListAccessKeys` response; keys are `(id, create_date)`.
pub fn list_access_keys_response(user: &str, keys: &[(&str, &str)]) -> ResponseTemplate {
    let members: String = keys
        .iter()
        .map(|(id, created)| {
            format!(
                "<member><UserName>{user}</UserName><AccessKeyId>{id}</AccessKeyId>\
                 <Status>Active</Status><CreateDate>{created}</CreateDate></member>"
            )
        })
        .collect();

    xml(format!(
        "<ListAccessKeysResponse xmlns=\"{IAM_NS}\"><ListAccessKeysResult>\
         <AccessKeyMetadata>{members}</AccessKeyMetadata><IsTruncated>false</IsTruncated>\
         </ListAccessKeysResult><ResponseMetadata><RequestId>req-list</RequestId>\
         </ResponseMetadata></ListAccessKeysResponse>"
    ))
}

/// `CreateAccessKey` response; `None` leaves the secret out.
pub fn create_access_key_response(user: &str, id: &str, secret: Option<&str>) -> ResponseTemplate {
    let secret = secret
        .map(|s| format!("<SecretAccessKey>{s}</SecretAccessKey>"))
        .unwrap_or_default();

    xml(format!(
        "<CreateAccessKeyResponse xmlns=\"{IAM_NS}\"><CreateAccessKeyResult><AccessKey>\
         <UserName>{user}</UserName><AccessKeyId>{id}</AccessKeyId><Status>Active</Status>\
         {secret}<CreateDate>2024-06-01T12:00:00Z</CreateDate></AccessKey>\
         </CreateAccessKeyResult><ResponseMetadata><RequestId>req-create</RequestId>\
         </ResponseMetadata></CreateAccessKeyResponse>"
    ))
}

/// `DeleteAccessKey` response.
pub fn delete_access_key_response() -> ResponseTemplate {
    xml(format!(
        "<DeleteAccessKeyResponse xmlns=\"{IAM_NS}\"><ResponseMetadata>\
         <RequestId>req-delete</RequestId></ResponseMetadata></DeleteAccessKeyResponse>"
    ))
}

/// `GetUser` response.
pub fn get_user_response(user: &str) -> ResponseTemplate {
    xml(format!(
        "<GetUserResponse xmlns=\"{IAM_NS}\"><GetUserResult><User><Path>/</Path>\
         <UserName>{user}</UserName><UserId>AIDATEST</UserId>\
         <Arn>arn:aws:iam::123456789012:user/{user}</Arn>\
         <CreateDate>2020-01-01T00:00:00Z</CreateDate></User></GetUserResult>\
         <ResponseMetadata><RequestId>req-user</RequestId></ResponseMetadata></GetUserResponse>"
    ))
}

/// IAM query-protocol error response.
pub fn iam_error_response(status: u16, code: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(
        format!(
            "<ErrorResponse xmlns=\"{IAM_NS}\"><Error><Type>Sender</Type><Code>{code}</Code>\
             <Message>{message}</Message></Error><RequestId>req-error</RequestId></ErrorResponse>"
        ),
        "text/xml",
    )
}

/// Mock matching one IAM action.
pub fn iam_action(action: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains(format!("Action={}", action)))
}

/// IAM provider talking to a mock server.
pub fn iam_credentials(server: &MockServer) -> IamCredentials {
    let config = aws_sdk_iam::Config::builder()
        .behavior_version(aws_config::BehaviorVersion::latest())
        .region(aws_sdk_iam::config::Region::new("us-east-1"))
        .credentials_provider(aws_sdk_iam::config::Credentials::new(
            "AKIDTEST", "test-secret", None, None, "test",
        ))
        .endpoint_url(server.uri())
        .build();

    IamCredentials::from_client(aws_sdk_iam::Client::from_conf(config))
}

/// GitHub client talking to a mock server.
pub fn github_client(server: &MockServer) -> GithubClient {
    GithubClient::new("ghp_test", server.uri()).expect("failed to build client")
}

/// A repository public key payload plus the secret key that opens it.
pub fn github_public_key(key_id: &str) -> (SecretKey, Value) {
    let (secret_key, public_key) = SealedBox::generate_keypair();
    let body = serde_json::json!({ "key_id": key_id, "key": public_key });
    (secret_key, body)
}

/// JSON bodies of all PUT requests the server received, in order.
pub async fn put_bodies(server: &MockServer) -> Vec<(String, Value)> {
    let requests: Vec<Request> = server.received_requests().await.unwrap_or_default();
    requests
        .into_iter()
        .filter(|r| r.method.as_str() == "PUT")
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).expect("PUT body is JSON");
            (r.url.path().to_string(), body)
        })
        .collect()
}

/// Open the `encrypted_value` of a PUT body.
pub fn open_value(body: &Value, secret_key: &SecretKey) -> String {
    let sealed = body["encrypted_value"]
        .as_str()
        .expect("encrypted_value is a string");
    let opened = SealedBox::open(sealed, secret_key).expect("value opens with the target key");
    String::from_utf8(opened).expect("value is UTF-8")
}
