use leptos::prelude::*;
use leptos::task::spawn_local;
use restohub_shared::date;
use restohub_shared::models::{EventDraft, EventItem, EventStatus};

use crate::components::icons::{CalendarDays, Pencil, Plus, RefreshCw, Trash2};
use crate::components::nav::TopNav;
use crate::hooks::use_restaurants;
use crate::session::use_session;
use crate::state::RequestState;
use crate::web::dialog::confirm;

#[component]
pub fn EventsPage() -> impl IntoView {
    let session = use_session();
    let (restaurants, reload_restaurants) = use_restaurants();

    let events_state = RwSignal::new(RequestState::<Vec<EventItem>>::Idle);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);
    let (dialog_open, set_dialog_open) = signal(false);
    let (submitting, set_submitting) = signal(false);
    let (editing_id, set_editing_id) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // 表单字段
    let restaurant_id = RwSignal::new(String::new());
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let starts_at = RwSignal::new(String::new());
    let ends_at = RwSignal::new(String::new());
    let capacity = RwSignal::new(String::new());

    let reset_form = move || {
        restaurant_id.set(String::new());
        title.set(String::new());
        description.set(String::new());
        starts_at.set(String::new());
        ends_at.set(String::new());
        capacity.set(String::new());
        set_editing_id.set(None);
    };

    let load_events = move || {
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            events_state.set(RequestState::Pending);
            spawn_local(async move {
                match api.list_events().await {
                    Ok(list) => events_state.set(RequestState::Success(list)),
                    Err(e) => events_state.set(RequestState::Failure(e.to_string())),
                }
            });
        }
    };

    {
        let reload_restaurants = reload_restaurants.clone();
        Effect::new(move |_| {
            let state = session.state.get();
            if state.is_authenticated() && !state.is_loading {
                reload_restaurants();
                load_events();
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
        if let Some(first) = restaurants.list().first() {
            restaurant_id.set(first.id.clone());
        }
        set_dialog_open.set(true);
    };

    let open_edit = move |event: EventItem| {
        restaurant_id.set(event.restaurant_id);
        title.set(event.title);
        description.set(event.description.unwrap_or_default());
        starts_at.set(event.starts_at);
        ends_at.set(event.ends_at);
        capacity.set(event.capacity.map(|c| c.to_string()).unwrap_or_default());
        set_editing_id.set(Some(event.id));
        set_dialog_open.set(true);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        if title.get().trim().is_empty() || restaurant_id.get().is_empty() {
            set_notification.set(Some(("请填写标题并选择餐厅".to_string(), true)));
            return;
        }
        // 浅层校验：结束必须晚于开始，解析失败同样拦下
        if !date::ends_after_starts(&starts_at.get(), &ends_at.get()) {
            set_notification.set(Some(("结束时间必须晚于开始时间".to_string(), true)));
            return;
        }

        let capacity_value = {
            let text = capacity.get_untracked();
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                match trimmed.parse::<u32>() {
                    Ok(parsed) => Some(parsed),
                    Err(_) => {
                        set_notification.set(Some(("容量必须是正整数".to_string(), true)));
                        return;
                    }
                }
            }
        };

        let state = session.state.get_untracked();
        let Some(api) = state.api.clone() else {
            return;
        };

        let draft = EventDraft {
            restaurant_id: restaurant_id.get_untracked(),
            title: title.get_untracked().trim().to_string(),
            description: Some(description.get_untracked())
                .filter(|d| !d.trim().is_empty()),
            starts_at: starts_at.get_untracked(),
            ends_at: ends_at.get_untracked(),
            capacity: capacity_value,
        };
        let editing = editing_id.get_untracked();

        set_submitting.set(true);
        spawn_local(async move {
            let result = match &editing {
                Some(id) => api.update_event(id, draft).await.map(|_| ()),
                None => api.create_event(&draft).await.map(|_| ()),
            };
            match result {
                Ok(()) => {
                    let verb = if editing.is_some() { "更新" } else { "创建" };
                    set_notification.set(Some((format!("活动{}成功", verb), false)));
                    set_dialog_open.set(false);
                    reset_form();
                    load_events();
                }
                Err(e) => set_notification.set(Some((format!("保存失败: {}", e), true))),
            }
            set_submitting.set(false);
        });
    };

    let handle_cancel = move |id: String| {
        if !confirm("确定取消该活动？已报名的顾客将收到通知。") {
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api.cancel_event(&id).await {
                    Ok(updated) => {
                        set_notification.set(Some(("活动已取消".to_string(), false)));
                        // 就地替换，省一次整表刷新
                        events_state.update(|state| {
                            if let RequestState::Success(list) = state {
                                if let Some(slot) = list.iter_mut().find(|e| e.id == updated.id) {
                                    *slot = updated;
                                }
                            }
                        });
                    }
                    Err(e) => set_notification.set(Some((format!("取消失败: {}", e), true))),
                }
            });
        }
    };

    let handle_delete = move |id: String| {
        if !confirm("确定删除该活动记录？") {
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api.delete_event(&id).await {
                    Ok(()) => {
                        set_notification.set(Some(("活动已删除".to_string(), false)));
                        events_state.update(|state| {
                            if let RequestState::Success(list) = state {
                                list.retain(|e| e.id != id);
                            }
                        });
                    }
                    Err(e) => set_notification.set(Some((format!("删除失败: {}", e), true))),
                }
            });
        }
    };

    let loading = move || events_state.get().is_pending();

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
                        <h2 class="text-2xl font-bold">"活动"</h2>
                        <p class="text-base-content/70 text-sm">"品酒会、主题晚宴与档期管理。"</p>
                    </div>
                    <div class="flex gap-2">
                        <button on:click=move |_| load_events() disabled=loading class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                        <Show when=can_manage>
                            <button class="btn btn-primary gap-2" on:click=open_create>
                                <Plus attr:class="h-4 w-4" /> "新建活动"
                            </button>
                        </Show>
                    </div>
                </div>

                <Show when=move || events_state.get().failure().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || events_state.get().failure().unwrap_or("").to_string()}</span>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"活动"</th>
                                        <th>"餐厅"</th>
                                        <th class="hidden md:table-cell">"时间"</th>
                                        <th class="hidden md:table-cell">"容量"</th>
                                        <th>"状态"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || events_state.get().items().is_empty() && !loading()>
                                        <tr>
                                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                                <CalendarDays attr:class="h-8 w-8 mx-auto mb-2 opacity-40" />
                                                "暂无活动。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || events_state.get().items()
                                        key=|event| (event.id.clone(), event.status)
                                        children=move |event| {
                                            let status = event.status;
                                            let cancellable = status == EventStatus::Scheduled;
                                            let event_for_edit = event.clone();
                                            let id_for_cancel = event.id.clone();
                                            let id_for_delete = event.id.clone();
                                            let badge_class = match status {
                                                EventStatus::Scheduled => "badge badge-success badge-outline",
                                                EventStatus::Cancelled => "badge badge-error badge-outline",
                                                _ => "badge badge-ghost badge-outline",
                                            };
                                            view! {
                                                <tr>
                                                    <td>
                                                        <div class="font-bold">{event.title.clone()}</div>
                                                        {event.description.clone().map(|d| view! {
                                                            <div class="text-sm opacity-60">{d}</div>
                                                        })}
                                                    </td>
                                                    <td>{restaurants.name_of(&event.restaurant_id)}</td>
                                                    <td class="hidden md:table-cell font-mono text-sm opacity-70">
                                                        {date::format_display(&event.starts_at)}
                                                        " ~ "
                                                        {date::format_display(&event.ends_at)}
                                                    </td>
                                                    <td class="hidden md:table-cell">
                                                        {event.capacity.map(|c| c.to_string()).unwrap_or_else(|| "不限".to_string())}
                                                    </td>
                                                    <td><div class=badge_class>{status.label()}</div></td>
                                                    <td class="text-right">
                                                        <Show when=can_manage>
                                                            {
                                                                let event_for_edit = event_for_edit.clone();
                                                                let id_for_cancel = id_for_cancel.clone();
                                                                let id_for_delete = id_for_delete.clone();
                                                                view! {
                                                                    <div class="flex justify-end gap-1">
                                                                        <button
                                                                            class="btn btn-ghost btn-xs"
                                                                            on:click=move |_| open_edit(event_for_edit.clone())
                                                                        >
                                                                            <Pencil attr:class="h-3 w-3" />
                                                                        </button>
                                                                        <Show when=move || cancellable>
                                                                            {
                                                                                let id_for_cancel = id_for_cancel.clone();
                                                                                view! {
                                                                                    <button
                                                                                        class="btn btn-ghost btn-xs text-warning"
                                                                                        on:click=move |_| handle_cancel(id_for_cancel.clone())
                                                                                    >
                                                                                        "取消"
                                                                                    </button>
                                                                                }
                                                                            }
                                                                        </Show>
                                                                        <button
                                                                            class="btn btn-ghost btn-xs text-error"
                                                                            on:click=move |_| handle_delete(id_for_delete.clone())
                                                                        >
                                                                            <Trash2 attr:class="h-3 w-3" />
                                                                        </button>
                                                                    </div>
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

                // 创建 / 编辑模态框
                <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_dialog_open.set(false)>
                    <div class="modal-box">
                        <h3 class="font-bold text-lg">
                            {move || if editing_id.get().is_some() { "编辑活动" } else { "新建活动" }}
                        </h3>

                        <form on:submit=on_submit class="space-y-4 mt-4">
                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"餐厅"</span>
                                </label>
                                <select
                                    class="select select-bordered w-full"
                                    on:change=move |ev| restaurant_id.set(event_target_value(&ev))
                                >
                                    <For
                                        each=move || restaurants.list()
                                        key=|restaurant| restaurant.id.clone()
                                        children=move |restaurant| {
                                            let id = restaurant.id.clone();
                                            let value = restaurant.id.clone();
                                            view! {
                                                <option value=value selected=move || restaurant_id.get() == id>
                                                    {restaurant.name.clone()}
                                                </option>
                                            }
                                        }
                                    />
                                </select>
                            </div>
                            <div class="form-control">
                                <label for="e_title" class="label">
                                    <span class="label-text">"标题"</span>
                                </label>
                                <input id="e_title" required
                                    type="text"
                                    placeholder="波尔多品酒夜"
                                    on:input=move |ev| title.set(event_target_value(&ev))
                                    prop:value=move || title.get()
                                    class="input input-bordered w-full"
                                />
                            </div>
                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label for="e_starts" class="label">
                                        <span class="label-text">"开始"</span>
                                    </label>
                                    <input id="e_starts" required
                                        type="datetime-local"
                                        on:input=move |ev| starts_at.set(event_target_value(&ev))
                                        prop:value=move || starts_at.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
                                <div class="form-control">
                                    <label for="e_ends" class="label">
                                        <span class="label-text">"结束"</span>
                                    </label>
                                    <input id="e_ends" required
                                        type="datetime-local"
                                        on:input=move |ev| ends_at.set(event_target_value(&ev))
                                        prop:value=move || ends_at.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
                            </div>
                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label for="e_capacity" class="label">
                                        <span class="label-text">"容量 (可选)"</span>
                                    </label>
                                    <input id="e_capacity"
                                        type="number"
                                        min="1"
                                        on:input=move |ev| capacity.set(event_target_value(&ev))
                                        prop:value=move || capacity.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
                                <div class="form-control">
                                    <label for="e_desc" class="label">
                                        <span class="label-text">"描述 (可选)"</span>
                                    </label>
                                    <input id="e_desc"
                                        type="text"
                                        on:input=move |ev| description.set(event_target_value(&ev))
                                        prop:value=move || description.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
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
