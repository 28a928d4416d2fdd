//! 路由服务模块 - 核心引擎
//!
//! 封装 History API，所有对 window.history 的操作集中在此模块。
//! 导航流程：请求 -> 守卫（认证 + 角色）-> 处理 -> 加载。
//! 认证状态由外部信号注入，本模块不持有会话。

use leptos::prelude::*;
use restohub_shared::Role;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向，不产生后退记录）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；认证与角色信号由外部注入实现解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
    /// 当前角色（未认证时为 None）
    role: Signal<Option<Role>>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>, role: Signal<Option<Role>>) -> Self {
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
            role,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 守卫判定：返回重定向目标，`None` 表示放行
    fn guard(&self, target: AppRoute) -> Option<AppRoute> {
        let is_auth = self.is_authenticated.get_untracked();

        // 需要认证但未认证
        if target.requires_auth() && !is_auth {
            web_sys::console::log_1(&"[Router] 未认证，重定向到登录页".into());
            return Some(AppRoute::auth_failure_redirect());
        }

        // 已认证却访问登录 / 注册页
        if target.should_redirect_when_authenticated() && is_auth {
            return Some(AppRoute::auth_success_redirect());
        }

        // 角色不符（如非管理员访问用户管理）
        if is_auth {
            if let Some(role) = self.role.get_untracked() {
                if !target.visible_for(role) {
                    web_sys::console::log_1(
                        &format!("[Router] 角色 {} 无权访问 {}", role, target).into(),
                    );
                    return Some(AppRoute::role_failure_redirect());
                }
            }
        }

        None
    }

    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        let resolved = match self.guard(target) {
            Some(redirect) => redirect,
            None => target,
        };

        if use_push {
            push_history_state(resolved.to_path());
        } else {
            replace_history_state(resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退 / 前进按钮监听
    fn init_popstate_listener(&self) {
        let service = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            // popstate 同样过守卫，重定向用 replace 避免污染历史
            match service.guard(target) {
                Some(redirect) => {
                    replace_history_state(redirect.to_path());
                    service.set_route.set(redirect);
                }
                None => service.set_route.set(target),
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向
    ///
    /// 登录成功离开登录页；登出或凭据过期时离开受保护页面。
    /// 401 过期路径也由此兜底：会话容器清状态后，这里负责导航。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;
        let role = self.role;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if is_auth {
                if route.should_redirect_when_authenticated() {
                    let redirect = AppRoute::auth_success_redirect();
                    push_history_state(redirect.to_path());
                    set_route.set(redirect);
                } else if let Some(role) = role.get() {
                    // 直接输入 URL 进入的页面也要过角色守卫
                    if !route.visible_for(role) {
                        let redirect = AppRoute::role_failure_redirect();
                        replace_history_state(redirect.to_path());
                        set_route.set(redirect);
                    }
                }
            } else if route.requires_auth() {
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(redirect.to_path());
                set_route.set(redirect);
                web_sys::console::log_1(&"[Router] 会话结束，返回登录页".into());
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>, role: Signal<Option<Role>>) -> RouterService {
    let router = RouterService::new(is_authenticated, role);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 当前角色信号
    role: Signal<Option<Role>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated, role);

    children()
}

/// 路由出口组件：根据当前路由渲染对应视图
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
