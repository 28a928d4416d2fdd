//! 数据获取钩子
//!
//! 多个页面重复的取数逻辑收拢成可复用单元。

use leptos::prelude::*;
use leptos::task::spawn_local;
use restohub_shared::models::Restaurant;

use crate::session::use_session;
use crate::state::RequestState;

/// 餐厅列表资源
///
/// 菜单、活动、点评、包间页面都需要"餐厅 id -> 名称"的查找，
/// 统一从这里拿，不各自再发一遍列表请求。
#[derive(Clone, Copy)]
pub struct RestaurantsResource {
    pub state: RwSignal<RequestState<Vec<Restaurant>>>,
}

impl RestaurantsResource {
    /// 当前列表，未加载 / 失败时为空
    pub fn list(&self) -> Vec<Restaurant> {
        self.state.get().items()
    }

    /// 名称查找，查不到时退回 id 原样展示
    pub fn name_of(&self, id: &str) -> String {
        self.state.with(|state| {
            state
                .success()
                .and_then(|list| list.iter().find(|r| r.id == id))
                .map(|r| r.name.clone())
                .unwrap_or_else(|| id.to_string())
        })
    }
}

/// 创建餐厅列表钩子
///
/// 返回资源与重载闭包；首次加载由调用方在认证就绪的 Effect 里触发。
pub fn use_restaurants() -> (RestaurantsResource, impl Fn() + Clone + 'static) {
    let session = use_session();
    let state = RwSignal::new(RequestState::Idle);
    let resource = RestaurantsResource { state };

    let reload = move || {
        let auth = session.state.get_untracked();
        if let Some(api) = auth.api.clone() {
            state.set(RequestState::Pending);
            spawn_local(async move {
                match api.list_restaurants().await {
                    Ok(list) => state.set(RequestState::Success(list)),
                    Err(e) => state.set(RequestState::Failure(e.to_string())),
                }
            });
        }
    };

    (resource, reload)
}
