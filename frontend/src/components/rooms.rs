use leptos::prelude::*;
use leptos::task::spawn_local;
use restohub_shared::date;
use restohub_shared::models::{Reservation, ReservationDraft, Room, RoomDraft};

use crate::components::icons::{DoorOpen, Plus, RefreshCw, Trash2};
use crate::components::nav::TopNav;
use crate::hooks::use_restaurants;
use crate::session::use_session;
use crate::state::RequestState;
use crate::web::dialog::confirm;

#[component]
pub fn RoomsPage() -> impl IntoView {
    let session = use_session();
    let (restaurants, reload_restaurants) = use_restaurants();

    let selected = RwSignal::new(String::new());
    let rooms_state = RwSignal::new(RequestState::<Vec<Room>>::Idle);
    let reservations_state = RwSignal::new(RequestState::<Vec<Reservation>>::Idle);

    let (notification, set_notification) = signal(Option::<(String, bool)>::None);
    let (submitting, set_submitting) = signal(false);

    // 包间内联表单
    let room_name = RwSignal::new(String::new());
    let room_capacity = RwSignal::new(String::new());

    // 预订表单
    let reservation_room = RwSignal::new(String::new());
    let reservation_date = RwSignal::new(String::new());
    let party_size = RwSignal::new(String::from("2"));

    let load_rooms = move || {
        let restaurant = selected.get_untracked();
        if restaurant.is_empty() {
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            rooms_state.set(RequestState::Pending);
            reservations_state.set(RequestState::Pending);
            spawn_local(async move {
                // 包间与预订并行加载
                let (rooms, reservations) =
                    futures::join!(api.list_rooms(&restaurant), api.list_reservations(None));
                match rooms {
                    Ok(list) => rooms_state.set(RequestState::Success(list)),
                    Err(e) => rooms_state.set(RequestState::Failure(e.to_string())),
                }
                match reservations {
                    Ok(list) => reservations_state.set(RequestState::Success(list)),
                    Err(e) => reservations_state.set(RequestState::Failure(e.to_string())),
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
            }
        });
    }

    Effect::new(move |_| {
        let list = restaurants.list();
        if selected.with_untracked(|s| s.is_empty()) {
            if let Some(first) = list.first() {
                selected.set(first.id.clone());
            }
        }
    });

    Effect::new(move |_| {
        let _restaurant = selected.get();
        let state = session.state.get();
        if state.is_authenticated() && !state.is_loading {
            load_rooms();
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

    let on_add_room = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        if room_name.get().trim().is_empty() {
            set_notification.set(Some(("请填写包间名称".to_string(), true)));
            return;
        }
        let Ok(capacity) = room_capacity.get_untracked().trim().parse::<u32>() else {
            set_notification.set(Some(("容量必须是正整数".to_string(), true)));
            return;
        };

        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            let draft = RoomDraft {
                restaurant_id: selected.get_untracked(),
                name: room_name.get_untracked().trim().to_string(),
                capacity,
            };
            spawn_local(async move {
                match api.create_room(&draft).await {
                    Ok(_) => {
                        set_notification.set(Some(("包间已添加".to_string(), false)));
                        room_name.set(String::new());
                        room_capacity.set(String::new());
                        load_rooms();
                    }
                    Err(e) => set_notification.set(Some((format!("添加失败: {}", e), true))),
                }
            });
        }
    };

    let delete_room = move |id: String| {
        if !confirm("确定删除该包间？相关预订将失效。") {
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api.delete_room(&id).await {
                    Ok(()) => {
                        set_notification.set(Some(("包间已删除".to_string(), false)));
                        load_rooms();
                    }
                    Err(e) => set_notification.set(Some((format!("删除失败: {}", e), true))),
                }
            });
        }
    };

    let on_reserve = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let room = reservation_room.get_untracked();
        if room.is_empty() {
            set_notification.set(Some(("请选择包间".to_string(), true)));
            return;
        }
        // 浅层校验：日期可解析即可，档期冲突由后端裁决
        if date::parse_date(&reservation_date.get_untracked()).is_none() {
            set_notification.set(Some(("请选择日期".to_string(), true)));
            return;
        }
        let Ok(size) = party_size.get_untracked().trim().parse::<u32>() else {
            set_notification.set(Some(("人数必须是正整数".to_string(), true)));
            return;
        };

        let state = session.state.get_untracked();
        let Some(api) = state.api.clone() else {
            return;
        };

        let draft = ReservationDraft {
            room_id: room,
            date: reservation_date.get_untracked(),
            party_size: size,
        };

        set_submitting.set(true);
        spawn_local(async move {
            match api.create_reservation(&draft).await {
                Ok(_) => {
                    set_notification.set(Some(("预订成功".to_string(), false)));
                    load_rooms();
                }
                Err(e) => set_notification.set(Some((format!("预订失败: {}", e), true))),
            }
            set_submitting.set(false);
        });
    };

    let cancel_reservation = move |id: String| {
        if !confirm("确定取消该预订？") {
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api.delete_reservation(&id).await {
                    Ok(()) => {
                        set_notification.set(Some(("预订已取消".to_string(), false)));
                        load_rooms();
                    }
                    Err(e) => set_notification.set(Some((format!("取消失败: {}", e), true))),
                }
            });
        }
    };

    let room_name_of = move |id: String| {
        rooms_state.with(|state| {
            state
                .success()
                .and_then(|list| list.iter().find(|r| r.id == id))
                .map(|r| r.name.clone())
                .unwrap_or(id)
        })
    };

    // 只展示当前餐厅包间下的预订
    let visible_reservations = move || {
        let room_ids: Vec<String> = rooms_state
            .get()
            .items()
            .into_iter()
            .map(|r| r.id)
            .collect();
        reservations_state
            .get()
            .items()
            .into_iter()
            .filter(|res| room_ids.contains(&res.room_id))
            .collect::<Vec<_>>()
    };

    let loading = move || rooms_state.get().is_pending();

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
                        <h2 class="text-2xl font-bold">"包间预订"</h2>
                        <p class="text-base-content/70 text-sm">"按餐厅管理包间与预订。"</p>
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
                                        <option value=value selected=move || selected.get() == id>
                                            {restaurant.name.clone()}
                                        </option>
                                    }
                                }
                            />
                        </select>
                        <button on:click=move |_| load_rooms() disabled=loading class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                    </div>
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                    // 包间列表
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">
                                <DoorOpen attr:class="h-5 w-5" /> "包间"
                            </h3>
                            <Show when=move || rooms_state.get().items().is_empty() && !loading()>
                                <p class="text-sm text-base-content/50">"该餐厅还没有包间。"</p>
                            </Show>
                            <For
                                each=move || rooms_state.get().items()
                                key=|room| room.id.clone()
                                children=move |room| {
                                    let id_for_delete = room.id.clone();
                                    view! {
                                        <div class="flex items-center justify-between text-sm">
                                            <span>
                                                <span class="font-bold">{room.name.clone()}</span>
                                                <span class="opacity-60">{format!("（{} 人）", room.capacity)}</span>
                                            </span>
                                            <Show when=can_manage>
                                                {
                                                    let id_for_delete = id_for_delete.clone();
                                                    view! {
                                                        <button
                                                            class="btn btn-ghost btn-xs text-error"
                                                            on:click=move |_| delete_room(id_for_delete.clone())
                                                        >
                                                            <Trash2 attr:class="h-3 w-3" />
                                                        </button>
                                                    }
                                                }
                                            </Show>
                                        </div>
                                    }
                                }
                            />
                            <Show when=can_manage>
                                <form class="mt-4 space-y-2" on:submit=on_add_room>
                                    <input
                                        type="text"
                                        placeholder="包间名称"
                                        on:input=move |ev| room_name.set(event_target_value(&ev))
                                        prop:value=move || room_name.get()
                                        class="input input-bordered input-sm w-full"
                                    />
                                    <input
                                        type="number"
                                        min="1"
                                        placeholder="容量"
                                        on:input=move |ev| room_capacity.set(event_target_value(&ev))
                                        prop:value=move || room_capacity.get()
                                        class="input input-bordered input-sm w-full"
                                    />
                                    <button type="submit" class="btn btn-outline btn-sm w-full gap-1">
                                        <Plus attr:class="h-4 w-4" /> "添加包间"
                                    </button>
                                </form>
                            </Show>
                        </div>
                    </div>

                    // 预订列表
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"预订"</h3>
                            <Show when=move || visible_reservations().is_empty()>
                                <p class="text-sm text-base-content/50">"暂无预订。"</p>
                            </Show>
                            <For
                                each=visible_reservations
                                key=|reservation| reservation.id.clone()
                                children=move |reservation| {
                                    let id_for_cancel = reservation.id.clone();
                                    view! {
                                        <div class="border-b border-base-200 pb-2 text-sm">
                                            <div class="flex items-center justify-between">
                                                <span class="font-bold">{room_name_of(reservation.room_id.clone())}</span>
                                                <span class="font-mono">{reservation.date.clone()}</span>
                                            </div>
                                            <div class="flex items-center justify-between mt-1">
                                                <span class="opacity-60">
                                                    {reservation.customer_email.clone()}
                                                    {format!(" · {} 人", reservation.party_size)}
                                                </span>
                                                <button
                                                    class="btn btn-ghost btn-xs text-error"
                                                    on:click=move |_| cancel_reservation(id_for_cancel.clone())
                                                >
                                                    "取消"
                                                </button>
                                            </div>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    </div>

                    // 发起预订
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"发起预订"</h3>
                            <form class="space-y-3" on:submit=on_reserve>
                                <div class="form-control">
                                    <label class="label">
                                        <span class="label-text">"包间"</span>
                                    </label>
                                    <select
                                        class="select select-bordered w-full"
                                        on:change=move |ev| reservation_room.set(event_target_value(&ev))
                                    >
                                        <option value="" selected=move || reservation_room.get().is_empty()>"选择包间"</option>
                                        <For
                                            each=move || rooms_state.get().items()
                                            key=|room| room.id.clone()
                                            children=move |room| {
                                                let id = room.id.clone();
                                                let value = room.id.clone();
                                                view! {
                                                    <option value=value selected=move || reservation_room.get() == id>
                                                        {room.name.clone()}
                                                    </option>
                                                }
                                            }
                                        />
                                    </select>
                                </div>
                                <div class="form-control">
                                    <label class="label">
                                        <span class="label-text">"日期"</span>
                                    </label>
                                    <input
                                        type="date"
                                        on:input=move |ev| reservation_date.set(event_target_value(&ev))
                                        prop:value=move || reservation_date.get()
                                        class="input input-bordered w-full"
                                        required
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label">
                                        <span class="label-text">"人数"</span>
                                    </label>
                                    <input
                                        type="number"
                                        min="1"
                                        on:input=move |ev| party_size.set(event_target_value(&ev))
                                        prop:value=move || party_size.get()
                                        class="input input-bordered w-full"
                                        required
                                    />
                                </div>
                                <button type="submit" disabled=move || submitting.get() class="btn btn-primary w-full">
                                    {move || if submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "提交中..." }.into_any()
                                    } else {
                                        "预订".into_any()
                                    }}
                                </button>
                            </form>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
