use restohub_shared::{
    Role, STORAGE_KEY_EMAIL, STORAGE_KEY_NAME, STORAGE_KEY_ROLE, STORAGE_KEY_TOKEN,
};

use super::store::{
    MemStore, SessionIdentity, SessionStore, clear_session, read_session, write_session,
};

// =========================================================
// 辅助函数
// =========================================================

fn seeded_store() -> MemStore {
    let store = MemStore::new();
    store.set(STORAGE_KEY_TOKEN, "tok-abc");
    store.set(STORAGE_KEY_EMAIL, "a@b.com");
    store.set(STORAGE_KEY_ROLE, "ADMIN");
    store.set(STORAGE_KEY_NAME, "A");
    store
}

fn identity(email: &str, role: Role, name: &str) -> SessionIdentity {
    SessionIdentity {
        email: email.to_string(),
        role,
        name: name.to_string(),
    }
}

// =========================================================
// restore 语义
// =========================================================

#[test]
fn test_restore_with_all_keys_yields_exact_values() {
    let store = seeded_store();

    let (token, identity) = read_session(&store).unwrap();
    assert_eq!(token, "tok-abc");
    assert_eq!(identity.email, "a@b.com");
    assert_eq!(identity.role, Role::Admin);
    assert_eq!(identity.name, "A");
}

#[test]
fn test_restore_missing_token_is_unauthenticated() {
    let store = seeded_store();
    store.delete(STORAGE_KEY_TOKEN);
    assert!(read_session(&store).is_none());
}

#[test]
fn test_restore_missing_email_is_unauthenticated() {
    let store = seeded_store();
    store.delete(STORAGE_KEY_EMAIL);
    assert!(read_session(&store).is_none());
}

#[test]
fn test_restore_missing_role_is_unauthenticated() {
    let store = seeded_store();
    store.delete(STORAGE_KEY_ROLE);
    assert!(read_session(&store).is_none());
}

#[test]
fn test_restore_unparseable_role_is_unauthenticated() {
    // 存储被手工改动或产生自旧版本，不报错，按未认证处理
    let store = seeded_store();
    store.set(STORAGE_KEY_ROLE, "SUPERVISOR");
    assert!(read_session(&store).is_none());
}

#[test]
fn test_restore_missing_name_degrades_to_empty() {
    // 显示名是装饰性字段，缺失不影响认证判定
    let store = seeded_store();
    store.delete(STORAGE_KEY_NAME);

    let (_, identity) = read_session(&store).unwrap();
    assert_eq!(identity.name, "");
}

#[test]
fn test_restore_empty_store_is_unauthenticated() {
    assert!(read_session(&MemStore::new()).is_none());
}

// =========================================================
// login / logout 往返
// =========================================================

#[test]
fn test_login_then_restore_reproduces_identity() {
    // 模拟登录后整页刷新
    let store = MemStore::new();
    let original = identity("a@b.com", Role::Admin, "A");
    write_session(&store, "tok-1", &original);

    let (token, restored) = read_session(&store).unwrap();
    assert_eq!(token, "tok-1");
    assert_eq!(restored, original);
}

#[test]
fn test_relogin_replaces_session_wholesale() {
    let store = seeded_store();
    let next = identity("c@d.fr", Role::Client, "C");
    write_session(&store, "tok-2", &next);

    let (token, restored) = read_session(&store).unwrap();
    assert_eq!(token, "tok-2");
    assert_eq!(restored, next);
    // 四个键仍然各占一席，没有残留第五个
    assert_eq!(store.len(), 4);
}

#[test]
fn test_logout_removes_all_four_keys() {
    let store = seeded_store();
    clear_session(&store);

    for key in [
        STORAGE_KEY_TOKEN,
        STORAGE_KEY_EMAIL,
        STORAGE_KEY_ROLE,
        STORAGE_KEY_NAME,
    ] {
        assert!(!store.contains(key), "{} 应当已被删除", key);
    }
    assert!(read_session(&store).is_none());
}
