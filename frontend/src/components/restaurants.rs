use leptos::prelude::*;
use leptos::task::spawn_local;
use restohub_shared::models::{Restaurant, RestaurantDraft};

use crate::components::icons::{Pencil, Plus, RefreshCw, Trash2};
use crate::components::nav::TopNav;
use crate::hooks::use_restaurants;
use crate::session::use_session;
use crate::web::dialog::confirm;

#[component]
pub fn RestaurantsPage() -> impl IntoView {
    let session = use_session();
    let (restaurants, reload) = use_restaurants();

    let (notification, set_notification) = signal(Option::<(String, bool)>::None);
    let (dialog_open, set_dialog_open) = signal(false);
    let (submitting, set_submitting) = signal(false);
    // 正在编辑的餐厅 id；None 表示新建
    let (editing_id, set_editing_id) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // 表单字段
    let name = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let cuisine = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());

    let reset_form = move || {
        name.set(String::new());
        address.set(String::new());
        cuisine.set(String::new());
        phone.set(String::new());
        description.set(String::new());
        set_editing_id.set(None);
    };

    // 初始加载
    {
        let reload = reload.clone();
        Effect::new(move |_| {
            let state = session.state.get();
            if state.is_authenticated() && !state.is_loading {
                reload();
            }
        });
    }

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if dialog_open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let can_manage = move || {
        session
            .state
            .get()
            .identity
            .map(|i| i.role.can_manage_catalog())
            .unwrap_or(false)
    };

    let open_create = move |_| {
        reset_form();
        set_dialog_open.set(true);
    };

    let open_edit = move |restaurant: Restaurant| {
        name.set(restaurant.name);
        address.set(restaurant.address);
        cuisine.set(restaurant.cuisine);
        phone.set(restaurant.phone.unwrap_or_default());
        description.set(restaurant.description.unwrap_or_default());
        set_editing_id.set(Some(restaurant.id));
        set_dialog_open.set(true);
    };

    let on_submit = {
        let reload = reload.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            if name.get().trim().is_empty() || address.get().trim().is_empty() {
                set_notification.set(Some(("请填写名称与地址".to_string(), true)));
                return;
            }

            let state = session.state.get_untracked();
            let Some(api) = state.api.clone() else {
                return;
            };

            let draft = RestaurantDraft {
                name: name.get_untracked().trim().to_string(),
                address: address.get_untracked().trim().to_string(),
                cuisine: cuisine.get_untracked().trim().to_string(),
                phone: Some(phone.get_untracked())
                    .filter(|p| !p.trim().is_empty()),
                description: Some(description.get_untracked())
                    .filter(|d| !d.trim().is_empty()),
            };
            let editing = editing_id.get_untracked();
            let reload = reload.clone();

            set_submitting.set(true);
            spawn_local(async move {
                let result = match &editing {
                    Some(id) => api.update_restaurant(id, draft).await.map(|_| ()),
                    None => api.create_restaurant(&draft).await.map(|_| ()),
                };
                match result {
                    Ok(()) => {
                        let verb = if editing.is_some() { "更新" } else { "创建" };
                        set_notification.set(Some((format!("餐厅{}成功", verb), false)));
                        set_dialog_open.set(false);
                        reset_form();
                        reload();
                    }
                    Err(e) => {
                        set_notification.set(Some((format!("保存失败: {}", e), true)));
                    }
                }
                set_submitting.set(false);
            });
        }
    };

    let handle_delete = {
        let reload = reload.clone();
        move |id: String| {
            if !confirm("确定删除该餐厅？关联的菜单与活动将无法访问。") {
                return;
            }
            let state = session.state.get_untracked();
            if let Some(api) = state.api.clone() {
                let reload = reload.clone();
                spawn_local(async move {
                    match api.delete_restaurant(&id).await {
                        Ok(()) => {
                            set_notification.set(Some(("餐厅已删除".to_string(), false)));
                            reload();
                        }
                        Err(e) => {
                            set_notification.set(Some((format!("删除失败: {}", e), true)));
                        }
                    }
                });
            }
        }
    };

    let loading = move || restaurants.state.get().is_pending();
    let reload_btn = reload.clone();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
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
                        <h2 class="text-2xl font-bold">"餐厅"</h2>
                        <p class="text-base-content/70 text-sm">"平台上的全部餐厅。"</p>
                    </div>
                    <div class="flex gap-2">
                        <button on:click=move |_| reload_btn() disabled=loading class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                        // 目录管理角色才能新建
                        <Show when=can_manage>
                            <button class="btn btn-primary gap-2" on:click=open_create>
                                <Plus attr:class="h-4 w-4" /> "添加餐厅"
                            </button>
                        </Show>
                    </div>
                </div>

                <Show when=move || {
                    restaurants.state.get().failure().is_some()
                }>
                    <div role="alert" class="alert alert-error">
                        <span>{move || restaurants.state.get().failure().unwrap_or("").to_string()}</span>
                    </div>
                </Show>

                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                    <For
                        each=move || restaurants.list()
                        key=|restaurant| restaurant.id.clone()
                        children=move |restaurant| {
                            let for_edit = restaurant.clone();
                            let id_for_delete = restaurant.id.clone();
                            let open_edit = open_edit.clone();
                            let handle_delete = handle_delete.clone();
                            view! {
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h3 class="card-title">{restaurant.name.clone()}</h3>
                                        <p class="text-sm text-base-content/70">{restaurant.address.clone()}</p>
                                        <div class="badge badge-accent badge-outline">{restaurant.cuisine.clone()}</div>
                                        {restaurant.description.clone().map(|d| view! {
                                            <p class="text-sm mt-2">{d}</p>
                                        })}
                                        <Show when=can_manage>
                                            {
                                                let for_edit = for_edit.clone();
                                                let id_for_delete = id_for_delete.clone();
                                                let open_edit = open_edit.clone();
                                                let handle_delete = handle_delete.clone();
                                                view! {
                                                    <div class="card-actions justify-end mt-2">
                                                        <button
                                                            class="btn btn-ghost btn-sm gap-1"
                                                            on:click=move |_| open_edit(for_edit.clone())
                                                        >
                                                            <Pencil attr:class="h-4 w-4" /> "编辑"
                                                        </button>
                                                        <button
                                                            class="btn btn-ghost btn-sm text-error gap-1"
                                                            on:click=move |_| handle_delete(id_for_delete.clone())
                                                        >
                                                            <Trash2 attr:class="h-4 w-4" /> "删除"
                                                        </button>
                                                    </div>
                                                }
                                            }
                                        </Show>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>

                <Show when=move || restaurants.list().is_empty() && !loading()>
                    <div class="text-center py-12 text-base-content/50">
                        "暂无餐厅。"
                    </div>
                </Show>

                // 创建 / 编辑模态框
                <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_dialog_open.set(false)>
                    <div class="modal-box">
                        <h3 class="font-bold text-lg">
                            {move || if editing_id.get().is_some() { "编辑餐厅" } else { "添加餐厅" }}
                        </h3>

                        <form on:submit=on_submit class="space-y-4 mt-4">
                            <div class="form-control">
                                <label for="r_name" class="label">
                                    <span class="label-text">"名称"</span>
                                </label>
                                <input id="r_name" required
                                    type="text"
                                    placeholder="Chez Marie"
                                    on:input=move |ev| name.set(event_target_value(&ev))
                                    prop:value=move || name.get()
                                    class="input input-bordered w-full"
                                />
                            </div>
                            <div class="form-control">
                                <label for="r_address" class="label">
                                    <span class="label-text">"地址"</span>
                                </label>
                                <input id="r_address" required
                                    type="text"
                                    placeholder="12 rue des Halles"
                                    on:input=move |ev| address.set(event_target_value(&ev))
                                    prop:value=move || address.get()
                                    class="input input-bordered w-full"
                                />
                            </div>
                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label for="r_cuisine" class="label">
                                        <span class="label-text">"菜系"</span>
                                    </label>
                                    <input id="r_cuisine" required
                                        type="text"
                                        placeholder="法餐"
                                        on:input=move |ev| cuisine.set(event_target_value(&ev))
                                        prop:value=move || cuisine.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
                                <div class="form-control">
                                    <label for="r_phone" class="label">
                                        <span class="label-text">"电话 (可选)"</span>
                                    </label>
                                    <input id="r_phone"
                                        type="tel"
                                        on:input=move |ev| phone.set(event_target_value(&ev))
                                        prop:value=move || phone.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
                            </div>
                            <div class="form-control">
                                <label for="r_desc" class="label">
                                    <span class="label-text">"简介 (可选)"</span>
                                </label>
                                <textarea id="r_desc"
                                    class="textarea textarea-bordered w-full"
                                    on:input=move |ev| description.set(event_target_value(&ev))
                                    prop:value=move || description.get()
                                ></textarea>
                            </div>

                            <div class="modal-action">
                                <button type="button" class="btn btn-ghost" on:click=move |_| set_dialog_open.set(false)>"取消"</button>
                                <button type="submit" disabled=move || submitting.get() class="btn btn-primary">
                                    {move || if submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "保存中..." }.into_any()
                                    } else {
                                        "保存".into_any()
                                    }}
                                </button>
                            </div>
                        </form>
                    </div>
                    <form method="dialog" class="modal-backdrop">
                        <button>"close"</button>
                    </form>
                </dialog>
            </div>
        </div>
    }
}
