//! 顶部导航组件
//!
//! 所有受保护页面共用：按角色过滤导航项，展示当前身份并提供注销。

use leptos::prelude::*;
use restohub_shared::Role;

use crate::components::icons::{ChefHat, LogOut};
use crate::session::{logout, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 当前角色可见的导航项
fn nav_items(role: Option<Role>) -> Vec<AppRoute> {
    AppRoute::NAV
        .into_iter()
        .filter(|route| match role {
            Some(role) => route.visible_for(role),
            None => false,
        })
        .collect()
}

#[component]
pub fn TopNav() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let role = move || session.state.get().identity.map(|i| i.role);
    let display_name = move || {
        session
            .state
            .get()
            .identity
            .map(|i| if i.name.is_empty() { i.email } else { i.name })
            .unwrap_or_default()
    };
    let role_label = move || {
        session
            .state
            .get()
            .identity
            .map(|i| i.role.label())
            .unwrap_or("")
    };

    let on_logout = move |_| {
        // 导航由路由服务监听认证信号自动完成
        logout(&session);
    };

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <ChefHat attr:class="text-primary h-6 w-6" />
                <a
                    class="btn btn-ghost text-xl"
                    on:click=move |_| router.navigate(AppRoute::Dashboard)
                >
                    "RestoHub"
                </a>
                <ul class="menu menu-horizontal px-1 hidden lg:flex">
                    <For
                        each=move || nav_items(role())
                        key=|route| route.to_path()
                        children=move |route| {
                            let is_active = move || router.current_route().get() == route;
                            view! {
                                <li>
                                    <a
                                        class=move || {
                                            if is_active() { "active" } else { "" }
                                        }
                                        on:click=move |_| router.navigate(route)
                                    >
                                        {route.label()}
                                    </a>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
            <div class="flex-none gap-2">
                <span class="badge badge-neutral hidden md:inline-flex">
                    {display_name} " · " {role_label}
                </span>
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                    <LogOut attr:class="h-4 w-4" /> "注销"
                </button>
            </div>
        </div>
    }
}
