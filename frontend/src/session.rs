//! 会话状态容器
//!
//! "谁在登录、以什么角色"的唯一事实来源，页面刷新靠持久化存储恢复。
//! 所有对四个会话键的读写都经过本模块：组件不直接碰存储，
//! HTTP 层凭据过期时也只回调 [`expire`]，由这里统一清理。
//! 路由服务通过注入的认证信号完成后续导航。

use leptos::prelude::*;
use restohub_shared::Role;
use restohub_shared::models::AuthResponse;
use std::sync::Arc;

use crate::API_BASE_URL;
use crate::api::RestoHubApi;

pub mod store;
#[cfg(test)]
mod tests;

pub use store::SessionIdentity;
use store::BrowserStore;

/// 会话状态
#[derive(Clone)]
pub struct SessionState {
    /// API 客户端实例（仅在认证成功后存在）
    pub api: Option<RestoHubApi>,
    /// 当前身份（未认证时为 None）
    pub identity: Option<SessionIdentity>,
    /// 启动恢复是否仍在进行，依赖方据此延迟渲染
    pub is_loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            api: None,
            identity: None,
            // 初始处于 LOADING，restore() 完成后翻转
            is_loading: true,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// 会话上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<SessionState>,
    pub set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    /// 认证状态信号（注入路由守卫）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated())
    }

    /// 角色信号（注入路由守卫与角色门控 UI）
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let state = self.state;
        Signal::derive(move || state.get().identity.map(|i| i.role))
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 构造认证客户端，凭据过期回调接回本模块
fn make_api(ctx: SessionContext, token: String) -> RestoHubApi {
    RestoHubApi::new(API_BASE_URL, token, Arc::new(move || expire(&ctx)))
}

/// 应用启动时恢复会话（只调用一次）
///
/// 从不失败：数据缺失或角色不可解析都只表现为未认证。
pub fn restore(ctx: &SessionContext) {
    let restored = store::read_session(&BrowserStore);
    let ctx_copy = *ctx;

    ctx.set_state.update(|state| {
        state.is_loading = false;
        if let Some((token, identity)) = restored {
            state.api = Some(make_api(ctx_copy, token));
            state.identity = Some(identity);
        }
    });
}

/// 登录 / 注册成功后建立会话
///
/// 容器信任调用方刚拿到的凭据，不做真实性校验。
/// 先落存储再更新内存状态，刷新不丢会话。
pub fn login(ctx: &SessionContext, email: String, auth: AuthResponse) {
    let identity = SessionIdentity {
        email,
        role: auth.role,
        name: auth.full_name,
    };
    store::write_session(&BrowserStore, &auth.access_token, &identity);

    let ctx_copy = *ctx;
    ctx.set_state.update(|state| {
        state.api = Some(make_api(ctx_copy, auth.access_token.clone()));
        state.identity = Some(identity);
        state.is_loading = false;
    });
}

/// 注销：清空存储与内存状态
///
/// 不做导航，路由服务监听认证信号自动重定向。
pub fn logout(ctx: &SessionContext) {
    store::clear_session(&BrowserStore);
    ctx.set_state.update(|state| {
        state.api = None;
        state.identity = None;
    });
}

/// 凭据过期（HTTP 层收到 401 时回调）
///
/// 与 [`logout`] 走同一条变更路径，存储清理不再散落在拦截器里。
pub fn expire(ctx: &SessionContext) {
    web_sys::console::log_1(&"[Session] 凭据过期，清除会话".into());
    logout(ctx);
}
