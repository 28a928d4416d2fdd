use leptos::prelude::*;
use leptos::task::spawn_local;
use restohub_shared::date;
use restohub_shared::models::{EventItem, Offer, Restaurant, Review};

use crate::components::icons::{CalendarDays, RefreshCw, ShoppingCart, Star, Store};
use crate::components::nav::TopNav;
use crate::session::use_session;
use crate::web::Interval;

/// 控制面板：并行聚合多个来源的概览数据
///
/// 各来源独立失败：失败的来源降级为空 / 零，不拖垮整屏。
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();

    let (restaurants, set_restaurants) = signal(Vec::<Restaurant>::new());
    let (events, set_events) = signal(Vec::<EventItem>::new());
    let (offers, set_offers) = signal(Vec::<Offer>::new());
    let (reviews, set_reviews) = signal(Vec::<Review>::new());
    let (loading, set_loading) = signal(true);

    let load_stats = move || {
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            set_loading.set(true);
            spawn_local(async move {
                // 并行发出，全部落地后统一渲染；单个失败只记录到控制台
                let (restaurants, events, offers, reviews) = futures::join!(
                    api.list_restaurants(),
                    api.list_events(),
                    api.list_offers(),
                    api.list_reviews(None),
                );

                set_restaurants.set(restaurants.unwrap_or_else(|e| {
                    web_sys::console::warn_1(&format!("[Dashboard] 餐厅加载失败: {}", e).into());
                    Vec::new()
                }));
                set_events.set(events.unwrap_or_else(|e| {
                    web_sys::console::warn_1(&format!("[Dashboard] 活动加载失败: {}", e).into());
                    Vec::new()
                }));
                set_offers.set(offers.unwrap_or_else(|e| {
                    web_sys::console::warn_1(&format!("[Dashboard] 报价加载失败: {}", e).into());
                    Vec::new()
                }));
                set_reviews.set(reviews.unwrap_or_else(|e| {
                    web_sys::console::warn_1(&format!("[Dashboard] 点评加载失败: {}", e).into());
                    Vec::new()
                }));
                set_loading.set(false);
            });
        }
    };

    // 初始加载：认证就绪后触发一次
    Effect::new(move |_| {
        let state = session.state.get();
        if state.is_authenticated() && !state.is_loading {
            load_stats();
        }
    });

    // 周期刷新；随组件所有者销毁而 drop，定时器自动清除
    let _refresh = StoredValue::new_local(Interval::new(60_000, load_stats));

    let restaurant_count = move || restaurants.with(|r| r.len());
    let offer_count = move || offers.with(|o| o.len());
    let upcoming_events = move || {
        events.with(|list| {
            list.iter()
                .filter(|e| e.status == restohub_shared::models::EventStatus::Scheduled)
                .count()
        })
    };
    let avg_rating = move || {
        reviews.with(|list| {
            if list.is_empty() {
                "—".to_string()
            } else {
                let sum: u32 = list.iter().map(|r| r.rating as u32).sum();
                format!("{:.1}", sum as f64 / list.len() as f64)
            }
        })
    };
    let restaurant_name = move |id: String| {
        restaurants.with(|list| {
            list.iter()
                .find(|r| r.id == id)
                .map(|r| r.name.clone())
                .unwrap_or(id)
        })
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <TopNav />

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-primary">
                            <Store attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"餐厅总数"</div>
                        <div class="stat-value text-primary">{restaurant_count}</div>
                    </div>

                    <div class="stat">
                        <div class="stat-figure text-secondary">
                            <CalendarDays attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"排期中的活动"</div>
                        <div class="stat-value text-secondary">{upcoming_events}</div>
                    </div>

                    <div class="stat">
                        <div class="stat-figure text-accent">
                            <ShoppingCart attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"在售报价"</div>
                        <div class="stat-value text-accent">{offer_count}</div>
                    </div>

                    <div class="stat">
                        <div class="stat-figure text-warning">
                            <Star attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"平均评分"</div>
                        <div class="stat-value text-warning">{avg_rating}</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"近期活动"</h3>
                                <p class="text-base-content/70 text-sm">"全平台最近的餐厅活动。"</p>
                            </div>
                            <button on:click=move |_| load_stats() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                                <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                            </button>
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"活动"</th>
                                        <th>"餐厅"</th>
                                        <th class="hidden md:table-cell">"开始时间"</th>
                                        <th>"状态"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || events.with(|e| e.is_empty()) && !loading.get()>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                "暂无活动。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading.get() && events.with(|e| e.is_empty())>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || events.get().into_iter().take(5).collect::<Vec<_>>()
                                        key=|event| event.id.clone()
                                        children=move |event| {
                                            let status = event.status;
                                            let badge_class = match status {
                                                restohub_shared::models::EventStatus::Scheduled => "badge badge-success badge-outline",
                                                restohub_shared::models::EventStatus::Cancelled => "badge badge-error badge-outline",
                                                _ => "badge badge-ghost badge-outline",
                                            };
                                            view! {
                                                <tr>
                                                    <td class="font-bold">{event.title.clone()}</td>
                                                    <td>{restaurant_name(event.restaurant_id.clone())}</td>
                                                    <td class="hidden md:table-cell font-mono text-sm opacity-70">
                                                        {date::format_display(&event.starts_at)}
                                                    </td>
                                                    <td>
                                                        <div class=badge_class>{status.label()}</div>
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
