use leptos::prelude::*;
use leptos::task::spawn_local;
use restohub_shared::Role;
use restohub_shared::models::{User, UserUpdate};
use std::str::FromStr;

use crate::components::icons::{RefreshCw, Trash2, Users};
use crate::components::nav::TopNav;
use crate::session::use_session;
use crate::state::RequestState;
use crate::web::dialog::confirm;

/// 用户管理（仅管理员，路由守卫已挡掉其他角色）
#[component]
pub fn UsersPage() -> impl IntoView {
    let session = use_session();

    let users_state = RwSignal::new(RequestState::<Vec<User>>::Idle);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    let load_users = move || {
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            users_state.set(RequestState::Pending);
            spawn_local(async move {
                match api.list_users().await {
                    Ok(list) => users_state.set(RequestState::Success(list)),
                    Err(e) => users_state.set(RequestState::Failure(e.to_string())),
                }
            });
        }
    };

    Effect::new(move |_| {
        let state = session.state.get();
        if state.is_authenticated() && !state.is_loading {
            load_users();
        }
    });

    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let current_email = move || {
        session
            .state
            .get()
            .identity
            .map(|i| i.email)
            .unwrap_or_default()
    };

    let change_role = move |user: User, role: Role| {
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                let update = UserUpdate {
                    full_name: None,
                    role: Some(role),
                };
                match api.update_user(&user.id, update).await {
                    Ok(updated) => {
                        set_notification.set(Some((
                            format!("{} 的角色已改为 {}", updated.full_name, updated.role.label()),
                            false,
                        )));
                        users_state.update(|state| {
                            if let RequestState::Success(list) = state {
                                if let Some(slot) = list.iter_mut().find(|u| u.id == updated.id) {
                                    *slot = updated;
                                }
                            }
                        });
                    }
                    Err(e) => set_notification.set(Some((format!("修改失败: {}", e), true))),
                }
            });
        }
    };

    let delete_user = move |user: User| {
        if !confirm(&format!("确定删除用户 {}？该操作不可恢复。", user.email)) {
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api.delete_user(&user.id).await {
                    Ok(()) => {
                        set_notification.set(Some(("用户已删除".to_string(), false)));
                        users_state.update(|state| {
                            if let RequestState::Success(list) = state {
                                list.retain(|u| u.id != user.id);
                            }
                        });
                    }
                    Err(e) => set_notification.set(Some((format!("删除失败: {}", e), true))),
                }
            });
        }
    };

    let loading = move || users_state.get().is_pending();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-5xl mx-auto space-y-8">
                <TopNav />

                <Show when=move || notification.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class=move || {
                            let (_, is_err) = notification.get().unwrap();
                            if is_err { "alert alert-error shadow-lg" } else { "alert alert-success shadow-lg" }
                        }>
                            <span>{move || notification.get().unwrap().0}</span>
                        </div>
                    </div>
                </Show>

                <div class="flex items-center justify-between">
                    <div>
                        <h2 class="text-2xl font-bold">"用户管理"</h2>
                        <p class="text-base-content/70 text-sm">"平台账号与角色分配。"</p>
                    </div>
                    <button on:click=move |_| load_users() disabled=loading class="btn btn-ghost btn-circle">
                        <RefreshCw attr:class=move || if loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                    </button>
                </div>

                <Show when=move || users_state.get().failure().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || users_state.get().failure().unwrap_or("").to_string()}</span>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"姓名"</th>
                                        <th>"邮箱"</th>
                                        <th>"角色"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || users_state.get().items().is_empty() && !loading()>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                <Users attr:class="h-8 w-8 mx-auto mb-2 opacity-40" />
                                                "没有用户。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || users_state.get().items()
                                        key=|user| (user.id.clone(), user.role)
                                        children=move |user| {
                                            let user_for_role = user.clone();
                                            let user_for_delete = user.clone();
                                            let email = user.email.clone();
                                            // 不允许管理员在这里动自己的账号
                                            let is_self = move || current_email() == email;
                                            view! {
                                                <tr>
                                                    <td class="font-bold">{user.full_name.clone()}</td>
                                                    <td class="font-mono text-sm">{user.email.clone()}</td>
                                                    <td>
                                                        <select
                                                            class="select select-bordered select-sm"
                                                            disabled=is_self.clone()
                                                            on:change=move |ev| {
                                                                if let Ok(role) = Role::from_str(&event_target_value(&ev)) {
                                                                    change_role(user_for_role.clone(), role);
                                                                }
                                                            }
                                                        >
                                                            {Role::ALL
                                                                .into_iter()
                                                                .map(|r| {
                                                                    let current = user.role;
                                                                    view! {
                                                                        <option
                                                                            value=r.as_str()
                                                                            selected=move || current == r
                                                                        >
                                                                            {r.label()}
                                                                        </option>
                                                                    }
                                                                })
                                                                .collect_view()}
                                                        </select>
                                                    </td>
                                                    <td class="text-right">
                                                        <button
                                                            class="btn btn-ghost btn-sm text-error"
                                                            disabled=is_self.clone()
                                                            on:click=move |_| delete_user(user_for_delete.clone())
                                                        >
                                                            <Trash2 attr:class="h-4 w-4" />
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
