use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;
use restohub_shared::models::{Menu, MenuDraft, MenuItem, MenuItemDraft};

use crate::components::icons::{Plus, RefreshCw, Trash2, UtensilsCrossed};
use crate::components::nav::TopNav;
use crate::hooks::use_restaurants;
use crate::session::use_session;
use crate::state::RequestState;
use crate::web::dialog::{confirm, prompt};

mod form_state;
use form_state::MenuFormState;

/// 菜单管理页
///
/// 创建是一个两步流程：先建菜单，再按顺序逐个创建菜品。
/// 中途失败不回滚，部分创建的结果会保留并提示。
#[component]
pub fn MenusPage() -> impl IntoView {
    let session = use_session();
    let (restaurants, reload_restaurants) = use_restaurants();

    let selected = RwSignal::new(String::new());
    let menus_state = RwSignal::new(RequestState::<Vec<Menu>>::Idle);
    let items_map = RwSignal::new(HashMap::<String, Vec<MenuItem>>::new());

    let (notification, set_notification) = signal(Option::<(String, bool)>::None);
    let (dialog_open, set_dialog_open) = signal(false);
    let (submitting, set_submitting) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let form = MenuFormState::new();

    let load_menus = move || {
        let restaurant_id = selected.get_untracked();
        if restaurant_id.is_empty() {
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            menus_state.set(RequestState::Pending);
            spawn_local(async move {
                match api.list_menus(&restaurant_id).await {
                    Ok(menus) => {
                        // 菜品并行拉取；单个菜单失败只表现为空列表
                        let fetches = menus.iter().map(|menu| {
                            let api = api.clone();
                            let id = menu.id.clone();
                            async move {
                                let items = api.list_menu_items(&id).await.unwrap_or_default();
                                (id, items)
                            }
                        });
                        let results = futures::future::join_all(fetches).await;
                        items_map.set(results.into_iter().collect());
                        menus_state.set(RequestState::Success(menus));
                    }
                    Err(e) => menus_state.set(RequestState::Failure(e.to_string())),
                }
            });
        }
    };

    // 初始加载餐厅列表
    {
        let reload_restaurants = reload_restaurants.clone();
        Effect::new(move |_| {
            let state = session.state.get();
            if state.is_authenticated() && !state.is_loading {
                reload_restaurants();
            }
        });
    }

    // 餐厅列表就绪后默认选中第一家
    Effect::new(move |_| {
        let list = restaurants.list();
        if selected.with_untracked(|s| s.is_empty()) {
            if let Some(first) = list.first() {
                selected.set(first.id.clone());
            }
        }
    });

    // 选择变化时重载菜单
    Effect::new(move |_| {
        let _restaurant = selected.get();
        let state = session.state.get();
        if state.is_authenticated() && !state.is_loading {
            load_menus();
        }
    });

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
        form.reset();
        form.restaurant_id.set(selected.get_untracked());
        set_dialog_open.set(true);
    };

    // 两步创建：菜单成功后菜品严格按顺序提交
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let (draft, items) = match form.to_drafts() {
            Ok(parts) => parts,
            Err(reason) => {
                set_notification.set(Some((reason, true)));
                return;
            }
        };

        let state = session.state.get_untracked();
        let Some(api) = state.api.clone() else {
            return;
        };

        set_submitting.set(true);
        spawn_local(async move {
            let menu = match api.create_menu(&draft).await {
                Ok(menu) => menu,
                Err(e) => {
                    set_notification.set(Some((format!("创建菜单失败: {}", e), true)));
                    set_submitting.set(false);
                    return;
                }
            };

            let total = items.len();
            let mut created = 0usize;
            let mut first_error = None;
            for item in items {
                let item_draft = MenuItemDraft {
                    menu_id: menu.id.clone(),
                    name: item.name,
                    price: item.price,
                    category: item.category,
                    available: true,
                };
                match api.create_menu_item(&item_draft).await {
                    Ok(_) => created += 1,
                    Err(e) => {
                        // 不回滚：已创建的菜单与菜品保留
                        first_error = Some(e.to_string());
                        break;
                    }
                }
            }

            match first_error {
                Some(reason) => set_notification.set(Some((
                    format!("菜单已创建，但菜品只成功 {}/{} 道: {}", created, total, reason),
                    true,
                ))),
                None => set_notification.set(Some(("菜单创建成功".to_string(), false))),
            }

            set_dialog_open.set(false);
            form.reset();
            load_menus();
            set_submitting.set(false);
        });
    };

    let rename_menu = move |menu: Menu| {
        let Some(new_name) = prompt("菜单名称", &menu.name) else {
            return;
        };
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                let draft = MenuDraft {
                    restaurant_id: menu.restaurant_id.clone(),
                    name: new_name,
                    description: menu.description.clone(),
                };
                match api.update_menu(&menu.id, draft).await {
                    Ok(_) => {
                        set_notification.set(Some(("菜单已更新".to_string(), false)));
                        load_menus();
                    }
                    Err(e) => set_notification.set(Some((format!("更新失败: {}", e), true))),
                }
            });
        }
    };

    let delete_menu = move |id: String| {
        if !confirm("确定删除该菜单？其下菜品将一并删除。") {
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api.delete_menu(&id).await {
                    Ok(()) => {
                        set_notification.set(Some(("菜单已删除".to_string(), false)));
                        load_menus();
                    }
                    Err(e) => set_notification.set(Some((format!("删除失败: {}", e), true))),
                }
            });
        }
    };

    // 上下架切换，成功后就地替换行
    let toggle_item = move |item: MenuItem| {
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                let draft = MenuItemDraft {
                    menu_id: item.menu_id.clone(),
                    name: item.name.clone(),
                    price: item.price,
                    category: item.category.clone(),
                    available: !item.available,
                };
                match api.update_menu_item(&item.id, draft).await {
                    Ok(updated) => {
                        items_map.update(|map| {
                            if let Some(list) = map.get_mut(&updated.menu_id) {
                                if let Some(slot) =
                                    list.iter_mut().find(|i| i.id == updated.id)
                                {
                                    *slot = updated;
                                }
                            }
                        });
                    }
                    Err(e) => set_notification.set(Some((format!("更新失败: {}", e), true))),
                }
            });
        }
    };

    let delete_item = move |item: MenuItem| {
        if !confirm("确定删除该菜品？") {
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api.delete_menu_item(&item.id).await {
                    Ok(()) => {
                        items_map.update(|map| {
                            if let Some(list) = map.get_mut(&item.menu_id) {
                                list.retain(|i| i.id != item.id);
                            }
                        });
                    }
                    Err(e) => set_notification.set(Some((format!("删除失败: {}", e), true))),
                }
            });
        }
    };

    let loading = move || menus_state.get().is_pending();

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

                <div class="flex flex-wrap items-center justify-between gap-4">
                    <div>
                        <h2 class="text-2xl font-bold">"菜单"</h2>
                        <p class="text-base-content/70 text-sm">"按餐厅管理菜单与菜品。"</p>
                    </div>
                    <div class="flex gap-2 items-center">
                        <select
                            class="select select-bordered"
                            on:change=move |ev| selected.set(event_target_value(&ev))
                        >
                            <For
                                each=move || restaurants.list()
                                key=|restaurant| restaurant.id.clone()
                                children=move |restaurant| {
                                    let id = restaurant.id.clone();
                                    let value = restaurant.id.clone();
                                    view! {
                                        <option
                                            value=value
                                            selected=move || selected.get() == id
                                        >
                                            {restaurant.name.clone()}
                                        </option>
                                    }
                                }
                            />
                        </select>
                        <button on:click=move |_| load_menus() disabled=loading class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                        <Show when=can_manage>
                            <button class="btn btn-primary gap-2" on:click=open_create>
                                <Plus attr:class="h-4 w-4" /> "新建菜单"
                            </button>
                        </Show>
                    </div>
                </div>

                <Show when=move || menus_state.get().failure().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || menus_state.get().failure().unwrap_or("").to_string()}</span>
                    </div>
                </Show>

                <Show when=move || menus_state.get().items().is_empty() && !loading()>
                    <div class="text-center py-12 text-base-content/50">
                        <UtensilsCrossed attr:class="h-10 w-10 mx-auto mb-2 opacity-40" />
                        "该餐厅还没有菜单。"
                    </div>
                </Show>

                <div class="space-y-6">
                    <For
                        each=move || menus_state.get().items()
                        key=|menu| menu.id.clone()
                        children=move |menu| {
                            let menu_for_rename = menu.clone();
                            let menu_id_for_delete = menu.id.clone();
                            let menu_id_for_items = menu.id.clone();
                            view! {
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <div class="flex items-center justify-between">
                                            <div>
                                                <h3 class="card-title">{menu.name.clone()}</h3>
                                                {menu.description.clone().map(|d| view! {
                                                    <p class="text-sm text-base-content/70">{d}</p>
                                                })}
                                            </div>
                                            <Show when=can_manage>
                                                {
                                                    let menu_for_rename = menu_for_rename.clone();
                                                    let menu_id_for_delete = menu_id_for_delete.clone();
                                                    view! {
                                                        <div class="flex gap-1">
                                                            <button
                                                                class="btn btn-ghost btn-sm"
                                                                on:click=move |_| rename_menu(menu_for_rename.clone())
                                                            >
                                                                "重命名"
                                                            </button>
                                                            <button
                                                                class="btn btn-ghost btn-sm text-error"
                                                                on:click=move |_| delete_menu(menu_id_for_delete.clone())
                                                            >
                                                                <Trash2 attr:class="h-4 w-4" />
                                                            </button>
                                                        </div>
                                                    }
                                                }
                                            </Show>
                                        </div>

                                        <div class="overflow-x-auto">
                                            <table class="table table-sm w-full">
                                                <thead>
                                                    <tr>
                                                        <th>"菜品"</th>
                                                        <th>"分类"</th>
                                                        <th>"价格"</th>
                                                        <th>"在售"</th>
                                                        <th></th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    <For
                                                        each=move || {
                                                            items_map
                                                                .get()
                                                                .get(&menu_id_for_items)
                                                                .cloned()
                                                                .unwrap_or_default()
                                                        }
                                                        key=|item| item.id.clone()
                                                        children=move |item| {
                                                            let item_for_toggle = item.clone();
                                                            let item_for_delete = item.clone();
                                                            view! {
                                                                <tr>
                                                                    <td class="font-bold">{item.name.clone()}</td>
                                                                    <td>{item.category.clone().unwrap_or_else(|| "—".to_string())}</td>
                                                                    <td class="font-mono">{format!("¥{:.2}", item.price)}</td>
                                                                    <td>
                                                                        <input
                                                                            type="checkbox"
                                                                            class="toggle toggle-success toggle-sm"
                                                                            prop:checked=item.available
                                                                            disabled=move || !can_manage()
                                                                            on:change=move |_| toggle_item(item_for_toggle.clone())
                                                                        />
                                                                    </td>
                                                                    <td class="text-right">
                                                                        <Show when=can_manage>
                                                                            {
                                                                                let item_for_delete = item_for_delete.clone();
                                                                                view! {
                                                                                    <button
                                                                                        class="btn btn-ghost btn-xs text-error"
                                                                                        on:click=move |_| delete_item(item_for_delete.clone())
                                                                                    >
                                                                                        <Trash2 attr:class="h-3 w-3" />
                                                                                    </button>
                                                                                }
                                                                            }
                                                                        </Show>
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
                            }
                        }
                    />
                </div>

                // 两步创建模态框
                <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_dialog_open.set(false)>
                    <div class="modal-box max-w-2xl">
                        <h3 class="font-bold text-lg">"新建菜单"</h3>
                        <p class="py-2 text-base-content/70 text-sm">
                            "先创建菜单，再依次创建菜品；中途失败时已创建的部分会保留。"
                        </p>

                        <form on:submit=on_submit class="space-y-4">
                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label for="m_name" class="label">
                                        <span class="label-text">"菜单名称"</span>
                                    </label>
                                    <input id="m_name" required
                                        type="text"
                                        placeholder="午市套餐"
                                        on:input=move |ev| form.name.set(event_target_value(&ev))
                                        prop:value=move || form.name.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
                                <div class="form-control">
                                    <label for="m_desc" class="label">
                                        <span class="label-text">"描述 (可选)"</span>
                                    </label>
                                    <input id="m_desc"
                                        type="text"
                                        on:input=move |ev| form.description.set(event_target_value(&ev))
                                        prop:value=move || form.description.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
                            </div>

                            <div class="divider text-sm">"菜品"</div>

                            <For
                                each=move || form.rows.get()
                                key=|row| row.id
                                children=move |row| {
                                    let row_id = row.id;
                                    view! {
                                        <div class="grid grid-cols-[1fr_6rem_8rem_auto] gap-2 items-center">
                                            <input
                                                type="text"
                                                placeholder="菜品名称"
                                                on:input=move |ev| row.name.set(event_target_value(&ev))
                                                prop:value=move || row.name.get()
                                                class="input input-bordered input-sm w-full"
                                            />
                                            <input
                                                type="number"
                                                step="0.01"
                                                min="0"
                                                placeholder="价格"
                                                on:input=move |ev| row.price.set(event_target_value(&ev))
                                                prop:value=move || row.price.get()
                                                class="input input-bordered input-sm w-full"
                                            />
                                            <input
                                                type="text"
                                                placeholder="分类 (可选)"
                                                on:input=move |ev| row.category.set(event_target_value(&ev))
                                                prop:value=move || row.category.get()
                                                class="input input-bordered input-sm w-full"
                                            />
                                            <button
                                                type="button"
                                                class="btn btn-ghost btn-sm text-error"
                                                on:click=move |_| form.remove_row(row_id)
                                            >
                                                <Trash2 attr:class="h-4 w-4" />
                                            </button>
                                        </div>
                                    }
                                }
                            />

                            <button type="button" class="btn btn-ghost btn-sm gap-1" on:click=move |_| form.add_row()>
                                <Plus attr:class="h-4 w-4" /> "添加菜品行"
                            </button>

                            <div class="modal-action">
                                <button type="button" class="btn btn-ghost" on:click=move |_| set_dialog_open.set(false)>"取消"</button>
                                <button type="submit" disabled=move || submitting.get() class="btn btn-primary">
                                    {move || if submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "创建中..." }.into_any()
                                    } else {
                                        "创建菜单".into_any()
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
