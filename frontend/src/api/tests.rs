use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use restohub_shared::{
    HEADER_AUTHORIZATION, Role, STORAGE_KEY_EMAIL, STORAGE_KEY_NAME, STORAGE_KEY_ROLE,
    STORAGE_KEY_TOKEN,
};

use crate::session::store::{
    MemStore, SessionIdentity, clear_session, read_session, write_session,
};

use super::*;

// =========================================================
// 测试工具: MockTransport
// =========================================================

/// 内存传输：按 URL 返回预置响应并记录每个发出的请求
struct MockTransport {
    // URL -> (状态码, 响应体)
    responses: RefCell<HashMap<String, (u16, String)>>,
    requests: Rc<RefCell<Vec<PreparedRequest>>>,
}

impl MockTransport {
    fn new() -> (Self, Rc<RefCell<Vec<PreparedRequest>>>) {
        let requests = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                responses: RefCell::new(HashMap::new()),
                requests: requests.clone(),
            },
            requests,
        )
    }

    fn mock_response(&self, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), (status, body.to_string()));
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn execute(&self, req: PreparedRequest) -> Result<RawResponse, ApiError> {
        self.requests.borrow_mut().push(req.clone());

        let responses = self.responses.borrow();
        match responses.get(&req.url) {
            Some((status, body)) => Ok(RawResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(RawResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

const BASE: &str = "http://test/api";

fn api_with(token: Option<&str>, transport: MockTransport) -> RestoHubApi<MockTransport> {
    RestoHubApi::with_transport(BASE, token.map(str::to_string), None, transport)
}

// =========================================================
// Bearer 凭据附加
// =========================================================

#[tokio::test]
async fn test_protected_request_without_token_has_no_auth_header() {
    let (transport, log) = MockTransport::new();
    transport.mock_response("http://test/api/restaurants", 200, "[]");

    let api = api_with(None, transport);
    api.list_restaurants().await.unwrap();

    let requests = log.borrow();
    assert_eq!(requests.len(), 1);
    // 无凭据的受保护请求原样发出，不附 Authorization 头
    assert!(requests[0].header(HEADER_AUTHORIZATION).is_none());
}

#[tokio::test]
async fn test_protected_request_with_token_carries_bearer() {
    let (transport, log) = MockTransport::new();
    transport.mock_response("http://test/api/restaurants", 200, "[]");

    let api = api_with(Some("tok-9"), transport);
    api.list_restaurants().await.unwrap();

    let requests = log.borrow();
    assert_eq!(
        requests[0].header(HEADER_AUTHORIZATION),
        Some("Bearer tok-9")
    );
}

#[tokio::test]
async fn test_public_endpoint_never_carries_bearer() {
    let (transport, log) = MockTransport::new();
    transport.mock_response(
        "http://test/api/auth/login",
        200,
        r#"{"accessToken":"t","role":"CLIENT","fullName":"C"}"#,
    );

    // 即使客户端持有旧凭据，公开端点也不附加
    let api = api_with(Some("stale"), transport);
    let auth = api.login("a@b.com", "pw").await.unwrap();

    assert_eq!(auth.role, Role::Client);
    let requests = log.borrow();
    assert!(requests[0].header(HEADER_AUTHORIZATION).is_none());
    assert_eq!(requests[0].method.as_str(), "POST");
    assert!(requests[0].body.as_deref().unwrap().contains("a@b.com"));
}

// =========================================================
// 401 过期路径
// =========================================================

#[tokio::test]
async fn test_401_invokes_callback_and_session_cleanup_for_any_path() {
    let store = Arc::new(MemStore::new());
    write_session(
        &*store,
        "tok-1",
        &SessionIdentity {
            email: "a@b.com".into(),
            role: Role::Admin,
            name: "A".into(),
        },
    );

    let (transport, _log) = MockTransport::new();
    transport.mock_response("http://test/api/events", 401, "");
    transport.mock_response("http://test/api/users", 401, "");

    let calls = Arc::new(AtomicU32::new(0));
    let on_unauthorized: Arc<dyn Fn() + Send + Sync> = {
        let store = store.clone();
        let calls = calls.clone();
        Arc::new(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            // 会话容器的过期处理：统一清掉四个键
            clear_session(&*store);
        })
    };

    let api = RestoHubApi::with_transport(
        BASE,
        Some("tok-1".to_string()),
        Some(on_unauthorized),
        transport,
    );

    // 与触发请求的页面无关，任何路径的 401 都走同一条清理路径
    assert_eq!(api.list_events().await, Err(ApiError::Unauthorized));
    assert_eq!(api.list_users().await, Err(ApiError::Unauthorized));

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    for key in [
        STORAGE_KEY_TOKEN,
        STORAGE_KEY_EMAIL,
        STORAGE_KEY_ROLE,
        STORAGE_KEY_NAME,
    ] {
        assert!(!store.contains(key));
    }
    assert!(read_session(&*store).is_none());
}

// =========================================================
// 响应解析
// =========================================================

#[tokio::test]
async fn test_error_body_message_is_surfaced() {
    let (transport, _log) = MockTransport::new();
    transport.mock_response(
        "http://test/api/auth/register",
        422,
        r#"{"message":"邮箱已被注册"}"#,
    );

    let api = api_with(None, transport);
    let req = restohub_shared::models::RegisterRequest {
        full_name: "A".into(),
        email: "a@b.com".into(),
        password: "pw".into(),
        role: Role::Client,
    };
    let err = api.register(&req).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Api {
            status: 422,
            message: "邮箱已被注册".to_string()
        }
    );
}

#[tokio::test]
async fn test_error_without_json_body_falls_back_to_status() {
    let (transport, _log) = MockTransport::new();
    transport.mock_response("http://test/api/offers", 500, "boom");

    let api = api_with(Some("t"), transport);
    let err = api.list_offers().await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Api {
            status: 500,
            message: "HTTP 500".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_body_decodes_unit_response() {
    let (transport, log) = MockTransport::new();
    // 删除成功返回 204 空响应体
    transport.mock_response("http://test/api/restaurants/r1", 204, "");

    let api = api_with(Some("t"), transport);
    api.delete_restaurant("r1").await.unwrap();

    let requests = log.borrow();
    assert_eq!(requests[0].method.as_str(), "DELETE");
    assert!(requests[0].body.is_none());
}

#[tokio::test]
async fn test_typed_list_decoding_and_query_url() {
    let (transport, log) = MockTransport::new();
    transport.mock_response(
        "http://test/api/menus?restaurantId=r1",
        200,
        r#"[{"id":"m1","restaurantId":"r1","name":"晚市"}]"#,
    );

    let api = api_with(Some("t"), transport);
    let menus = api.list_menus("r1").await.unwrap();

    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].name, "晚市");
    assert_eq!(log.borrow()[0].url, "http://test/api/menus?restaurantId=r1");
}

#[tokio::test]
async fn test_create_sends_json_content_type() {
    let (transport, log) = MockTransport::new();
    transport.mock_response(
        "http://test/api/menus",
        201,
        r#"{"id":"m2","restaurantId":"r1","name":"午市"}"#,
    );

    let api = api_with(Some("t"), transport);
    let draft = restohub_shared::models::MenuDraft {
        restaurant_id: "r1".into(),
        name: "午市".into(),
        description: None,
    };
    api.create_menu(&draft).await.unwrap();

    let requests = log.borrow();
    assert_eq!(requests[0].header("Content-Type"), Some("application/json"));
    assert!(requests[0].body.as_deref().unwrap().contains("restaurantId"));
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let (transport, _log) = MockTransport::new();
    transport.mock_response("http://test/api/restaurants", 200, "{not json");

    let api = api_with(Some("t"), transport);
    assert!(matches!(
        api.list_restaurants().await,
        Err(ApiError::Decode(_))
    ));
}
