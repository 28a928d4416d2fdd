//! 会话持久化核心
//!
//! 四个独立字符串键是历史契约：无结构化封装、无版本号、无过期时间。
//! 存取通过 [`SessionStore`] 抽象注入，纯逻辑可在原生环境直接测试。

use std::str::FromStr;

use restohub_shared::{
    Role, STORAGE_KEY_EMAIL, STORAGE_KEY_NAME, STORAGE_KEY_ROLE, STORAGE_KEY_TOKEN,
};

use crate::web::LocalStorage;

/// 已认证身份（token 单独持有，不在此结构中）
#[derive(Debug, Clone, PartialEq)]
pub struct SessionIdentity {
    pub email: String,
    pub role: Role,
    pub name: String,
}

/// 会话键值存取抽象
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn delete(&self, key: &str);
}

/// 浏览器 LocalStorage 实现
///
/// 写入失败（配额、隐私模式）静默忽略，与读取到空等价。
pub struct BrowserStore;

impl SessionStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get(key)
    }

    fn set(&self, key: &str, value: &str) {
        LocalStorage::set(key, value);
    }

    fn delete(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// 从存储重建会话，从不报错
///
/// token、邮箱、角色三者齐备且角色可解析才算已认证；
/// 显示名缺失只降级为空串，不影响认证判定。
pub fn read_session(store: &impl SessionStore) -> Option<(String, SessionIdentity)> {
    let token = store.get(STORAGE_KEY_TOKEN)?;
    let email = store.get(STORAGE_KEY_EMAIL)?;
    let role = Role::from_str(&store.get(STORAGE_KEY_ROLE)?).ok()?;
    let name = store.get(STORAGE_KEY_NAME).unwrap_or_default();

    Some((token, SessionIdentity { email, role, name }))
}

/// 写入全部四个键
pub fn write_session(store: &impl SessionStore, token: &str, identity: &SessionIdentity) {
    store.set(STORAGE_KEY_TOKEN, token);
    store.set(STORAGE_KEY_EMAIL, &identity.email);
    store.set(STORAGE_KEY_ROLE, identity.role.as_str());
    store.set(STORAGE_KEY_NAME, &identity.name);
}

/// 删除全部四个键
pub fn clear_session(store: &impl SessionStore) {
    for key in [
        STORAGE_KEY_TOKEN,
        STORAGE_KEY_EMAIL,
        STORAGE_KEY_ROLE,
        STORAGE_KEY_NAME,
    ] {
        store.delete(key);
    }
}

// =========================================================
// 测试工具: MemStore
// =========================================================

// Mutex 而非 RefCell：401 测试把 store 塞进 Send + Sync 的过期回调里
#[cfg(test)]
pub struct MemStore {
    entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemStore {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[cfg(test)]
impl SessionStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn delete(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}
