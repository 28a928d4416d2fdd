use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::API_BASE_URL;
use crate::api::RestoHubApi;
use crate::components::icons::ChefHat;
use crate::session::{login, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let is_loading = move || session.state.get().is_loading;

    view! {
        <Show when=move || !is_loading() fallback=|| view! { <div class="flex items-center justify-center min-h-screen"><span class="loading loading-spinner loading-lg text-primary"></span></div> }>
            {
                let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
                    ev.prevent_default();
                    // 浅层校验：只拦空字段，真实校验在后端
                    if email.get().is_empty() || password.get().is_empty() {
                        set_error_msg.set(Some("请填写邮箱和密码".to_string()));
                        return;
                    }

                    set_is_submitting.set(true);
                    set_error_msg.set(None);

                    spawn_local(async move {
                        let api = RestoHubApi::public(API_BASE_URL);
                        match api.login(&email.get_untracked(), &password.get_untracked()).await {
                            Ok(auth) => {
                                // 会话建立后路由服务自动跳转到控制面板
                                login(&session, email.get_untracked(), auth);
                            }
                            Err(e) => {
                                set_error_msg.set(Some(format!("登录失败: {}", e)));
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
                                    <h1 class="text-3xl font-bold">"RestoHub"</h1>
                                    <p class="text-base-content/70">
                                        "登录以管理您的餐厅、菜单与活动"
                                    </p>
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
                                        <label class="label" for="email">
                                            <span class="label-text">"邮箱"</span>
                                        </label>
                                        <input
                                            id="email"
                                            type="email"
                                            placeholder="you@example.com"
                                            on:input=move |ev| set_email.set(event_target_value(&ev))
                                            prop:value=email
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control">
                                        <label class="label" for="password">
                                            <span class="label-text">"密码"</span>
                                        </label>
                                        <input
                                            id="password"
                                            type="password"
                                            placeholder="••••••••"
                                            on:input=move |ev| set_password.set(event_target_value(&ev))
                                            prop:value=password
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control mt-6">
                                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                            {move || if is_submitting.get() {
                                                view! { <span class="loading loading-spinner"></span> "登录中..." }.into_any()
                                            } else {
                                                "登录".into_any()
                                            }}
                                        </button>
                                    </div>
                                    <div class="text-center text-sm mt-2">
                                        "还没有账号？"
                                        <a
                                            class="link link-primary ml-1"
                                            on:click=move |_| router.navigate(AppRoute::Register)
                                        >
                                            "去注册"
                                        </a>
                                    </div>
                                </form>
                            </div>
                        </div>
                    </div>
                }
            }
        </Show>
    }
}
