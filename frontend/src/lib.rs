//! RestoHub 前端应用
//!
//! 多餐厅管理平台的单页应用，采用 Context-Driven 架构：
//! - `web::route` / `web::router`: 路由定义与路由服务（认证 + 角色守卫）
//! - `session`: 会话状态容器（唯一事实来源）
//! - `api`: 类型化 API 客户端（凭据附加、401 回调）
//! - `components`: UI 组件层

pub mod api;
pub mod hooks;
pub mod session;
pub mod state;

mod components {
    pub mod chatbot;
    pub mod dashboard;
    pub mod events;
    mod icons;
    pub mod login;
    pub mod marketplace;
    pub mod menus;
    mod nav;
    pub mod register;
    pub mod restaurants;
    pub mod reviews;
    pub mod rooms;
    pub mod users;
}

use crate::components::chatbot::ChatbotPage;
use crate::components::dashboard::DashboardPage;
use crate::components::events::EventsPage;
use crate::components::login::LoginPage;
use crate::components::marketplace::MarketplacePage;
use crate::components::menus::MenusPage;
use crate::components::register::RegisterPage;
use crate::components::restaurants::RestaurantsPage;
use crate::components::reviews::ReviewsPage;
use crate::components::rooms::RoomsPage;
use crate::components::users::UsersPage;
use crate::session::SessionContext;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 轻量封装浏览器原生 API，替代 gloo-* 系列 crate 以减小 WASM 体积。
pub(crate) mod web {
    pub mod dialog;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::{HttpClient, HttpError};
    pub use storage::LocalStorage;
    pub use timer::Interval;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 后端基础 URL，构建时通过环境变量覆盖
pub const API_BASE_URL: &str = match option_env!("RESTOHUB_API_URL") {
    Some(url) => url,
    None => "http://localhost:8080/api",
};

/// 路由匹配函数：根据 AppRoute 枚举返回对应的视图组件
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Restaurants => view! { <RestaurantsPage /> }.into_any(),
        AppRoute::Menus => view! { <MenusPage /> }.into_any(),
        AppRoute::Events => view! { <EventsPage /> }.into_any(),
        AppRoute::Marketplace => view! { <MarketplacePage /> }.into_any(),
        AppRoute::Reviews => view! { <ReviewsPage /> }.into_any(),
        AppRoute::Chatbot => view! { <ChatbotPage /> }.into_any(),
        AppRoute::Rooms => view! { <RoomsPage /> }.into_any(),
        AppRoute::Users => view! { <UsersPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文
    let session_ctx = SessionContext::new();
    provide_context(session_ctx);

    // 2. 启动时恢复会话（从持久化存储读取四个键）
    session::restore(&session_ctx);

    // 3. 把认证与角色信号注入路由服务（解耦）
    let is_authenticated = session_ctx.is_authenticated_signal();
    let role = session_ctx.role_signal();

    view! {
        <Router is_authenticated=is_authenticated role=role>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
