use leptos::prelude::*;
use leptos::task::spawn_local;
use restohub_shared::models::{Report, ReportDraft, ReportStatus, Review, ReviewDraft};

use crate::components::icons::{RefreshCw, Star};
use crate::components::nav::TopNav;
use crate::hooks::use_restaurants;
use crate::session::use_session;
use crate::state::RequestState;
use crate::web::dialog::{confirm, prompt};

/// 星级展示
fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    "★".repeat(filled) + &"☆".repeat(5 - filled)
}

#[component]
pub fn ReviewsPage() -> impl IntoView {
    let session = use_session();
    let (restaurants, reload_restaurants) = use_restaurants();

    let selected = RwSignal::new(String::new());
    let reviews_state = RwSignal::new(RequestState::<Vec<Review>>::Idle);
    let reports_state = RwSignal::new(RequestState::<Vec<Report>>::Idle);

    let (notification, set_notification) = signal(Option::<(String, bool)>::None);
    let (submitting, set_submitting) = signal(false);

    // 点评表单
    let rating = RwSignal::new(5u8);
    let comment = RwSignal::new(String::new());

    let current_email = move || {
        session
            .state
            .get()
            .identity
            .map(|i| i.email)
            .unwrap_or_default()
    };
    let is_moderator = move || {
        session
            .state
            .get()
            .identity
            .map(|i| i.role.can_moderate())
            .unwrap_or(false)
    };

    let load_reviews = move || {
        let restaurant = selected.get_untracked();
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            reviews_state.set(RequestState::Pending);
            spawn_local(async move {
                let filter = if restaurant.is_empty() {
                    None
                } else {
                    Some(restaurant.as_str())
                };
                match api.list_reviews(filter).await {
                    Ok(list) => reviews_state.set(RequestState::Success(list)),
                    Err(e) => reviews_state.set(RequestState::Failure(e.to_string())),
                }
            });
        }
    };

    let load_reports = move || {
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            reports_state.set(RequestState::Pending);
            spawn_local(async move {
                match api.list_reports().await {
                    Ok(list) => reports_state.set(RequestState::Success(list)),
                    Err(e) => reports_state.set(RequestState::Failure(e.to_string())),
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
                if state.identity.map(|i| i.role.can_moderate()).unwrap_or(false) {
                    load_reports();
                }
            }
        });
    }

    Effect::new(move |_| {
        let _restaurant = selected.get();
        let state = session.state.get();
        if state.is_authenticated() && !state.is_loading {
            load_reviews();
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

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let restaurant = selected.get_untracked();
        if restaurant.is_empty() {
            set_notification.set(Some(("请先选择餐厅".to_string(), true)));
            return;
        }

        let state = session.state.get_untracked();
        let Some(api) = state.api.clone() else {
            return;
        };

        let draft = ReviewDraft {
            restaurant_id: restaurant,
            rating: rating.get_untracked(),
            comment: Some(comment.get_untracked())
                .filter(|c| !c.trim().is_empty()),
        };

        set_submitting.set(true);
        spawn_local(async move {
            match api.create_review(&draft).await {
                Ok(_) => {
                    set_notification.set(Some(("点评已发布".to_string(), false)));
                    comment.set(String::new());
                    rating.set(5);
                    load_reviews();
                }
                Err(e) => set_notification.set(Some((format!("发布失败: {}", e), true))),
            }
            set_submitting.set(false);
        });
    };

    // 修改自己的点评：只开放改评分
    let edit_review = move |review: Review| {
        let Some(text) = prompt("新的评分 (1-5)", &review.rating.to_string()) else {
            return;
        };
        let Ok(new_rating) = text.parse::<u8>() else {
            set_notification.set(Some(("评分必须是 1-5 的整数".to_string(), true)));
            return;
        };
        if !(1..=5).contains(&new_rating) {
            set_notification.set(Some(("评分必须是 1-5 的整数".to_string(), true)));
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api
                    .update_review(&review.id, new_rating, review.comment.clone())
                    .await
                {
                    Ok(_) => {
                        set_notification.set(Some(("点评已更新".to_string(), false)));
                        load_reviews();
                    }
                    Err(e) => set_notification.set(Some((format!("更新失败: {}", e), true))),
                }
            });
        }
    };

    let delete_review = move |id: String| {
        if !confirm("确定删除该点评？") {
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api.delete_review(&id).await {
                    Ok(()) => {
                        set_notification.set(Some(("点评已删除".to_string(), false)));
                        load_reviews();
                    }
                    Err(e) => set_notification.set(Some((format!("删除失败: {}", e), true))),
                }
            });
        }
    };

    let report_review = move |id: String| {
        let Some(reason) = prompt("举报原因", "") else {
            return;
        };
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            let is_moderator = state
                .identity
                .map(|i| i.role.can_moderate())
                .unwrap_or(false);
            spawn_local(async move {
                let draft = ReportDraft {
                    review_id: id,
                    reason,
                };
                match api.create_report(&draft).await {
                    Ok(_) => {
                        set_notification.set(Some(("已提交举报".to_string(), false)));
                        if is_moderator {
                            load_reports();
                        }
                    }
                    Err(e) => set_notification.set(Some((format!("举报失败: {}", e), true))),
                }
            });
        }
    };

    let resolve_report = move |id: String, status: ReportStatus| {
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api.resolve_report(&id, status).await {
                    Ok(_) => {
                        set_notification.set(Some(("举报已处理".to_string(), false)));
                        load_reports();
                    }
                    Err(e) => set_notification.set(Some((format!("处理失败: {}", e), true))),
                }
            });
        }
    };

    let delete_report = move |id: String| {
        if !confirm("确定删除该举报记录？") {
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api.delete_report(&id).await {
                    Ok(()) => load_reports(),
                    Err(e) => set_notification.set(Some((format!("删除失败: {}", e), true))),
                }
            });
        }
    };

    let loading = move || reviews_state.get().is_pending();

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
                        <h2 class="text-2xl font-bold">"点评"</h2>
                        <p class="text-base-content/70 text-sm">"顾客点评与举报处理。"</p>
                    </div>
                    <div class="flex gap-2 items-center">
                        <select
                            class="select select-bordered"
                            on:change=move |ev| selected.set(event_target_value(&ev))
                        >
                            <option value="" selected=move || selected.get().is_empty()>"全部餐厅"</option>
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
                        <button on:click=move |_| load_reviews() disabled=loading class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                    </div>
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                    <div class="lg:col-span-2 space-y-4">
                        <Show when=move || reviews_state.get().items().is_empty() && !loading()>
                            <div class="text-center py-12 text-base-content/50">
                                <Star attr:class="h-10 w-10 mx-auto mb-2 opacity-40" />
                                "暂无点评。"
                            </div>
                        </Show>
                        <For
                            each=move || reviews_state.get().items()
                            key=|review| review.id.clone()
                            children=move |review| {
                                let author = review.author_email.clone();
                                let mine_or_admin = {
                                    let author = author.clone();
                                    move || current_email() == author || is_moderator()
                                };
                                let review_for_edit = review.clone();
                                let id_for_delete = review.id.clone();
                                let id_for_report = review.id.clone();
                                view! {
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body py-4">
                                            <div class="flex items-center justify-between">
                                                <div>
                                                    <span class="text-warning font-mono">{stars(review.rating)}</span>
                                                    <span class="ml-2 text-sm font-bold">{restaurants.name_of(&review.restaurant_id)}</span>
                                                </div>
                                                <span class="text-xs opacity-50">{review.author_email.clone()}</span>
                                            </div>
                                            {review.comment.clone().map(|c| view! {
                                                <p class="text-sm">{c}</p>
                                            })}
                                            <div class="flex justify-end gap-1">
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    on:click=move |_| report_review(id_for_report.clone())
                                                >
                                                    "举报"
                                                </button>
                                                <Show when=mine_or_admin.clone()>
                                                    {
                                                        let review_for_edit = review_for_edit.clone();
                                                        let id_for_delete = id_for_delete.clone();
                                                        view! {
                                                            <button
                                                                class="btn btn-ghost btn-xs"
                                                                on:click=move |_| edit_review(review_for_edit.clone())
                                                            >
                                                                "改评分"
                                                            </button>
                                                            <button
                                                                class="btn btn-ghost btn-xs text-error"
                                                                on:click=move |_| delete_review(id_for_delete.clone())
                                                            >
                                                                "删除"
                                                            </button>
                                                        }
                                                    }
                                                </Show>
                                            </div>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>

                    <div class="space-y-6">
                        // 发表点评
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h3 class="card-title">"发表点评"</h3>
                                <form class="space-y-3" on:submit=on_submit>
                                    <div class="form-control">
                                        <label class="label">
                                            <span class="label-text">"评分"</span>
                                        </label>
                                        <select
                                            class="select select-bordered w-full"
                                            on:change=move |ev| {
                                                if let Ok(parsed) = event_target_value(&ev).parse::<u8>() {
                                                    rating.set(parsed);
                                                }
                                            }
                                        >
                                            {(1u8..=5)
                                                .rev()
                                                .map(|value| {
                                                    view! {
                                                        <option
                                                            value=value.to_string()
                                                            selected=move || rating.get() == value
                                                        >
                                                            {stars(value)}
                                                        </option>
                                                    }
                                                })
                                                .collect_view()}
                                        </select>
                                    </div>
                                    <div class="form-control">
                                        <label class="label">
                                            <span class="label-text">"评价 (可选)"</span>
                                        </label>
                                        <textarea
                                            class="textarea textarea-bordered w-full"
                                            placeholder="菜品与服务如何？"
                                            on:input=move |ev| comment.set(event_target_value(&ev))
                                            prop:value=move || comment.get()
                                        ></textarea>
                                    </div>
                                    <button type="submit" disabled=move || submitting.get() class="btn btn-primary w-full">
                                        {move || if submitting.get() {
                                            view! { <span class="loading loading-spinner"></span> "发布中..." }.into_any()
                                        } else {
                                            "发布".into_any()
                                        }}
                                    </button>
                                </form>
                            </div>
                        </div>

                        // 举报处理（仅管理员）
                        <Show when=is_moderator>
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <h3 class="card-title">"待处理举报"</h3>
                                    <Show when=move || reports_state.get().items().is_empty()>
                                        <p class="text-sm text-base-content/50">"没有待处理的举报。"</p>
                                    </Show>
                                    <For
                                        each=move || reports_state.get().items()
                                        key=|report| (report.id.clone(), report.status)
                                        children=move |report| {
                                            let id_resolve = report.id.clone();
                                            let id_dismiss = report.id.clone();
                                            let id_delete = report.id.clone();
                                            let open = report.status == ReportStatus::Open;
                                            view! {
                                                <div class="border-b border-base-200 pb-2 text-sm">
                                                    <div class="flex items-center justify-between">
                                                        <span class="font-bold">{report.reason.clone()}</span>
                                                        <span class="badge badge-outline badge-sm">{report.status.label()}</span>
                                                    </div>
                                                    <div class="flex justify-end gap-1 mt-1">
                                                        <Show when=move || open>
                                                            {
                                                                let id_resolve = id_resolve.clone();
                                                                let id_dismiss = id_dismiss.clone();
                                                                view! {
                                                                    <button
                                                                        class="btn btn-ghost btn-xs text-success"
                                                                        on:click=move |_| resolve_report(id_resolve.clone(), ReportStatus::Resolved)
                                                                    >
                                                                        "处理"
                                                                    </button>
                                                                    <button
                                                                        class="btn btn-ghost btn-xs"
                                                                        on:click=move |_| resolve_report(id_dismiss.clone(), ReportStatus::Dismissed)
                                                                    >
                                                                        "驳回"
                                                                    </button>
                                                                }
                                                            }
                                                        </Show>
                                                        <button
                                                            class="btn btn-ghost btn-xs text-error"
                                                            on:click=move |_| delete_report(id_delete.clone())
                                                        >
                                                            "删除"
                                                        </button>
                                                    </div>
                                                </div>
                                            }
                                        }
                                    />
                                </div>
                            </div>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
