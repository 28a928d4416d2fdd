use leptos::prelude::*;
use leptos::task::spawn_local;
use restohub_shared::Role;
use restohub_shared::models::RegisterRequest;
use std::str::FromStr;

use crate::API_BASE_URL;
use crate::api::RestoHubApi;
use crate::components::icons::ChefHat;
use crate::session::{login, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (role, set_role) = signal(Role::Client);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        // 浅层校验，与登录同一口径
        if full_name.get().trim().is_empty() || email.get().is_empty() || password.get().is_empty()
        {
            set_error_msg.set(Some("请填写所有字段".to_string()));
            return;
        }
        if password.get() != confirm.get() {
            set_error_msg.set(Some("两次输入的密码不一致".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let api = RestoHubApi::public(API_BASE_URL);
            let req = RegisterRequest {
                full_name: full_name.get_untracked().trim().to_string(),
                email: email.get_untracked(),
                password: password.get_untracked(),
                role: role.get_untracked(),
            };
            match api.register(&req).await {
                Ok(auth) => {
                    // 注册即登录，响应外形与登录一致
                    login(&session, req.email.clone(), auth);
                }
                Err(e) => {
                    set_error_msg.set(Some(format!("注册失败: {}", e)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ChefHat attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"创建账号"</h1>
                        <p class="text-base-content/70">"选择角色以解锁对应功能"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="full_name">
                                <span class="label-text">"姓名"</span>
                            </label>
                            <input
                                id="full_name"
                                type="text"
                                placeholder="Marie Dupont"
                                on:input=move |ev| set_full_name.set(event_target_value(&ev))
                                prop:value=full_name
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_email">
                                <span class="label-text">"邮箱"</span>
                            </label>
                            <input
                                id="reg_email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="reg_password">
                                    <span class="label-text">"密码"</span>
                                </label>
                                <input
                                    id="reg_password"
                                    type="password"
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="reg_confirm">
                                    <span class="label-text">"确认密码"</span>
                                </label>
                                <input
                                    id="reg_confirm"
                                    type="password"
                                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                                    prop:value=confirm
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                        </div>
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"角色"</span>
                            </label>
                            <select
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    if let Ok(parsed) = Role::from_str(&event_target_value(&ev)) {
                                        set_role.set(parsed);
                                    }
                                }
                            >
                                {Role::ALL
                                    .into_iter()
                                    .map(|r| {
                                        view! {
                                            <option
                                                value=r.as_str()
                                                selected=move || role.get() == r
                                            >
                                                {r.label()}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "注册中..." }.into_any()
                                } else {
                                    "注册".into_any()
                                }}
                            </button>
                        </div>
                        <div class="text-center text-sm mt-2">
                            "已有账号？"
                            <a
                                class="link link-primary ml-1"
                                on:click=move |_| router.navigate(AppRoute::Login)
                            >
                                "去登录"
                            </a>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
