use leptos::prelude::*;
use leptos::task::spawn_local;
use restohub_shared::models::{CartLine, Offer, OfferDraft, Supplier, SupplierDraft, cart_total};

use crate::components::icons::{Plus, RefreshCw, ShoppingCart, Trash2};
use crate::components::nav::TopNav;
use crate::session::use_session;
use crate::state::RequestState;

/// 供应集市：报价目录、供应商名录与仅客户端的购物车
///
/// 购物车只存在于本页内存，合计为派生值，下单结算不在当前范围。
#[component]
pub fn MarketplacePage() -> impl IntoView {
    let session = use_session();

    let offers_state = RwSignal::new(RequestState::<Vec<Offer>>::Idle);
    let suppliers_state = RwSignal::new(RequestState::<Vec<Supplier>>::Idle);
    let cart = RwSignal::new(Vec::<CartLine>::new());

    let (notification, set_notification) = signal(Option::<(String, bool)>::None);
    let (dialog_open, set_dialog_open) = signal(false);
    let (submitting, set_submitting) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // 报价表单
    let supplier_id = RwSignal::new(String::new());
    let offer_title = RwSignal::new(String::new());
    let product = RwSignal::new(String::new());
    let unit_price = RwSignal::new(String::new());
    let quantity = RwSignal::new(String::new());
    let unit = RwSignal::new(String::new());

    // 供应商内联表单
    let supplier_name = RwSignal::new(String::new());
    let supplier_email = RwSignal::new(String::new());

    let load_all = move || {
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            offers_state.set(RequestState::Pending);
            suppliers_state.set(RequestState::Pending);
            spawn_local(async move {
                // 两个目录并行拉取，互不拖累
                let (offers, suppliers) =
                    futures::join!(api.list_offers(), api.list_suppliers());
                match offers {
                    Ok(list) => offers_state.set(RequestState::Success(list)),
                    Err(e) => offers_state.set(RequestState::Failure(e.to_string())),
                }
                match suppliers {
                    Ok(list) => suppliers_state.set(RequestState::Success(list)),
                    Err(e) => suppliers_state.set(RequestState::Failure(e.to_string())),
                }
            });
        }
    };

    Effect::new(move |_| {
        let state = session.state.get();
        if state.is_authenticated() && !state.is_loading {
            load_all();
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

    let can_publish = move || {
        session
            .state
            .get()
            .identity
            .map(|i| i.role.can_publish_offers())
            .unwrap_or(false)
    };

    let open_publish = move |_| {
        if let Some(first) = suppliers_state.get_untracked().items().first() {
            supplier_id.set(first.id.clone());
        }
        set_dialog_open.set(true);
    };

    let on_publish = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        if offer_title.get().trim().is_empty() || product.get().trim().is_empty() {
            set_notification.set(Some(("请填写标题与产品".to_string(), true)));
            return;
        }
        let Ok(price) = unit_price.get_untracked().trim().parse::<f64>() else {
            set_notification.set(Some(("单价无效".to_string(), true)));
            return;
        };
        let Ok(qty) = quantity.get_untracked().trim().parse::<u32>() else {
            set_notification.set(Some(("数量无效".to_string(), true)));
            return;
        };

        let state = session.state.get_untracked();
        let Some(api) = state.api.clone() else {
            return;
        };

        let draft = OfferDraft {
            supplier_id: supplier_id.get_untracked(),
            title: offer_title.get_untracked().trim().to_string(),
            product: product.get_untracked().trim().to_string(),
            unit_price: price,
            quantity: qty,
            unit: Some(unit.get_untracked()).filter(|u| !u.trim().is_empty()),
        };

        set_submitting.set(true);
        spawn_local(async move {
            match api.create_offer(&draft).await {
                Ok(_) => {
                    set_notification.set(Some(("报价已发布".to_string(), false)));
                    set_dialog_open.set(false);
                    offer_title.set(String::new());
                    product.set(String::new());
                    unit_price.set(String::new());
                    quantity.set(String::new());
                    unit.set(String::new());
                    load_all();
                }
                Err(e) => set_notification.set(Some((format!("发布失败: {}", e), true))),
            }
            set_submitting.set(false);
        });
    };

    let on_add_supplier = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if supplier_name.get().trim().is_empty() {
            set_notification.set(Some(("请填写供应商名称".to_string(), true)));
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            let draft = SupplierDraft {
                name: supplier_name.get_untracked().trim().to_string(),
                email: Some(supplier_email.get_untracked()).filter(|e| !e.trim().is_empty()),
                phone: None,
            };
            spawn_local(async move {
                match api.create_supplier(&draft).await {
                    Ok(_) => {
                        set_notification.set(Some(("供应商已登记".to_string(), false)));
                        supplier_name.set(String::new());
                        supplier_email.set(String::new());
                        load_all();
                    }
                    Err(e) => set_notification.set(Some((format!("登记失败: {}", e), true))),
                }
            });
        }
    };

    // 加入购物车：已有行数量 +1
    let add_to_cart = move |offer: Offer| {
        cart.update(|lines| {
            match lines.iter_mut().find(|l| l.offer.id == offer.id) {
                Some(line) => line.quantity += 1,
                None => lines.push(CartLine { offer, quantity: 1 }),
            }
        });
    };

    let remove_from_cart = move |offer_id: String| {
        cart.update(|lines| lines.retain(|l| l.offer.id != offer_id));
    };

    let supplier_name_of = move |id: String| {
        suppliers_state.with(|state| {
            state
                .success()
                .and_then(|list| list.iter().find(|s| s.id == id))
                .map(|s| s.name.clone())
                .unwrap_or(id)
        })
    };

    let loading = move || offers_state.get().is_pending();
    let cart_count = move || cart.with(|lines| lines.len());

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
                        <h2 class="text-2xl font-bold">"供应集市"</h2>
                        <p class="text-base-content/70 text-sm">"供应商报价与采购清单。"</p>
                    </div>
                    <div class="flex gap-2">
                        <button on:click=move |_| load_all() disabled=loading class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                        <Show when=can_publish>
                            <button class="btn btn-primary gap-2" on:click=open_publish>
                                <Plus attr:class="h-4 w-4" /> "发布报价"
                            </button>
                        </Show>
                    </div>
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                    // 报价目录
                    <div class="lg:col-span-2 card bg-base-100 shadow-xl">
                        <div class="card-body p-0">
                            <div class="p-6 pb-2">
                                <h3 class="card-title">"在售报价"</h3>
                            </div>
                            <div class="overflow-x-auto w-full">
                                <table class="table table-zebra w-full">
                                    <thead>
                                        <tr>
                                            <th>"产品"</th>
                                            <th>"供应商"</th>
                                            <th>"单价"</th>
                                            <th class="hidden md:table-cell">"库存"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <Show when=move || offers_state.get().items().is_empty() && !loading()>
                                            <tr>
                                                <td colspan="5" class="text-center py-8 text-base-content/50">
                                                    "暂无报价。"
                                                </td>
                                            </tr>
                                        </Show>
                                        <For
                                            each=move || offers_state.get().items()
                                            key=|offer| offer.id.clone()
                                            children=move |offer| {
                                                let offer_for_cart = offer.clone();
                                                view! {
                                                    <tr>
                                                        <td>
                                                            <div class="font-bold">{offer.title.clone()}</div>
                                                            <div class="text-sm opacity-60">{offer.product.clone()}</div>
                                                        </td>
                                                        <td>{supplier_name_of(offer.supplier_id.clone())}</td>
                                                        <td class="font-mono">
                                                            {format!("¥{:.2}", offer.unit_price)}
                                                            {offer.unit.clone().map(|u| format!(" / {}", u)).unwrap_or_default()}
                                                        </td>
                                                        <td class="hidden md:table-cell">{offer.quantity}</td>
                                                        <td class="text-right">
                                                            <button
                                                                class="btn btn-ghost btn-sm gap-1"
                                                                on:click=move |_| add_to_cart(offer_for_cart.clone())
                                                            >
                                                                <ShoppingCart attr:class="h-4 w-4" /> "加入"
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

                    <div class="space-y-6">
                        // 购物车
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h3 class="card-title">
                                    <ShoppingCart attr:class="h-5 w-5" />
                                    "采购清单"
                                    <span class="badge badge-primary">{cart_count}</span>
                                </h3>
                                <Show when=move || cart.with(|c| c.is_empty())>
                                    <p class="text-sm text-base-content/50">"清单为空。"</p>
                                </Show>
                                <For
                                    each=move || cart.get()
                                    key=|line| (line.offer.id.clone(), line.quantity)
                                    children=move |line| {
                                        let id_for_remove = line.offer.id.clone();
                                        view! {
                                            <div class="flex items-center justify-between text-sm">
                                                <span>
                                                    {line.offer.title.clone()}
                                                    " × "
                                                    {line.quantity}
                                                </span>
                                                <span class="flex items-center gap-2">
                                                    <span class="font-mono">{format!("¥{:.2}", line.line_total())}</span>
                                                    <button
                                                        class="btn btn-ghost btn-xs text-error"
                                                        on:click=move |_| remove_from_cart(id_for_remove.clone())
                                                    >
                                                        <Trash2 attr:class="h-3 w-3" />
                                                    </button>
                                                </span>
                                            </div>
                                        }
                                    }
                                />
                                <div class="divider my-1"></div>
                                <div class="flex items-center justify-between font-bold">
                                    <span>"合计"</span>
                                    <span class="font-mono">
                                        {move || cart.with(|lines| format!("¥{:.2}", cart_total(lines)))}
                                    </span>
                                </div>
                                <button
                                    class="btn btn-ghost btn-sm"
                                    on:click=move |_| cart.set(Vec::new())
                                    disabled=move || cart.with(|c| c.is_empty())
                                >
                                    "清空"
                                </button>
                            </div>
                        </div>

                        // 供应商名录
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h3 class="card-title">"供应商"</h3>
                                <For
                                    each=move || suppliers_state.get().items()
                                    key=|supplier| supplier.id.clone()
                                    children=move |supplier| {
                                        view! {
                                            <div class="flex items-center justify-between text-sm">
                                                <span class="font-bold">{supplier.name.clone()}</span>
                                                <span class="opacity-60">{supplier.email.clone().unwrap_or_default()}</span>
                                            </div>
                                        }
                                    }
                                />
                                <Show when=can_publish>
                                    <form class="mt-2 space-y-2" on:submit=on_add_supplier>
                                        <input
                                            type="text"
                                            placeholder="供应商名称"
                                            on:input=move |ev| supplier_name.set(event_target_value(&ev))
                                            prop:value=move || supplier_name.get()
                                            class="input input-bordered input-sm w-full"
                                        />
                                        <input
                                            type="email"
                                            placeholder="联系邮箱 (可选)"
                                            on:input=move |ev| supplier_email.set(event_target_value(&ev))
                                            prop:value=move || supplier_email.get()
                                            class="input input-bordered input-sm w-full"
                                        />
                                        <button type="submit" class="btn btn-outline btn-sm w-full">"登记供应商"</button>
                                    </form>
                                </Show>
                            </div>
                        </div>
                    </div>
                </div>

                // 发布报价模态框
                <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_dialog_open.set(false)>
                    <div class="modal-box">
                        <h3 class="font-bold text-lg">"发布报价"</h3>

                        <form on:submit=on_publish class="space-y-4 mt-4">
                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"供应商"</span>
                                </label>
                                <select
                                    class="select select-bordered w-full"
                                    on:change=move |ev| supplier_id.set(event_target_value(&ev))
                                >
                                    <For
                                        each=move || suppliers_state.get().items()
                                        key=|supplier| supplier.id.clone()
                                        children=move |supplier| {
                                            let id = supplier.id.clone();
                                            let value = supplier.id.clone();
                                            view! {
                                                <option value=value selected=move || supplier_id.get() == id>
                                                    {supplier.name.clone()}
                                                </option>
                                            }
                                        }
                                    />
                                </select>
                            </div>
                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label for="o_title" class="label">
                                        <span class="label-text">"标题"</span>
                                    </label>
                                    <input id="o_title" required
                                        type="text"
                                        placeholder="AOP 黄油整箱"
                                        on:input=move |ev| offer_title.set(event_target_value(&ev))
                                        prop:value=move || offer_title.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
                                <div class="form-control">
                                    <label for="o_product" class="label">
                                        <span class="label-text">"产品"</span>
                                    </label>
                                    <input id="o_product" required
                                        type="text"
                                        placeholder="黄油"
                                        on:input=move |ev| product.set(event_target_value(&ev))
                                        prop:value=move || product.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
                            </div>
                            <div class="grid grid-cols-3 gap-4">
                                <div class="form-control">
                                    <label for="o_price" class="label">
                                        <span class="label-text">"单价"</span>
                                    </label>
                                    <input id="o_price" required
                                        type="number" step="0.01" min="0"
                                        on:input=move |ev| unit_price.set(event_target_value(&ev))
                                        prop:value=move || unit_price.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
                                <div class="form-control">
                                    <label for="o_qty" class="label">
                                        <span class="label-text">"数量"</span>
                                    </label>
                                    <input id="o_qty" required
                                        type="number" min="1"
                                        on:input=move |ev| quantity.set(event_target_value(&ev))
                                        prop:value=move || quantity.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
                                <div class="form-control">
                                    <label for="o_unit" class="label">
                                        <span class="label-text">"单位 (可选)"</span>
                                    </label>
                                    <input id="o_unit"
                                        type="text"
                                        placeholder="kg / 箱"
                                        on:input=move |ev| unit.set(event_target_value(&ev))
                                        prop:value=move || unit.get()
                                        class="input input-bordered w-full"
                                    />
                                </div>
                            </div>

                            <div class="modal-action">
                                <button type="button" class="btn btn-ghost" on:click=move |_| set_dialog_open.set(false)>"取消"</button>
                                <button type="submit" disabled=move || submitting.get() class="btn btn-primary">
                                    {move || if submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "发布中..." }.into_any()
                                    } else {
                                        "发布".into_any()
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
