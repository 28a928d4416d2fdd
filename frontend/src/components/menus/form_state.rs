//! 菜单表单状态管理模块
//!
//! 将零散的 signal 整合为 `MenuFormState`，负责数据持有、重置，
//! 以及提交前把表单行转换为待创建的载荷序列。

use leptos::prelude::*;
use restohub_shared::models::MenuDraft;

/// 动态菜品行
///
/// `id` 只用于列表 key，与后端无关。
#[derive(Clone)]
pub struct ItemRow {
    pub id: u32,
    pub name: RwSignal<String>,
    pub price: RwSignal<String>,
    pub category: RwSignal<String>,
}

/// 校验通过、等待逐个创建的菜品
#[derive(Debug, Clone, PartialEq)]
pub struct PendingItem {
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
}

/// 菜单创建表单状态
///
/// `RwSignal` 实现 `Copy`，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct MenuFormState {
    pub restaurant_id: RwSignal<String>,
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub rows: RwSignal<Vec<ItemRow>>,
    next_row_id: RwSignal<u32>,
}

impl MenuFormState {
    pub fn new() -> Self {
        let state = Self {
            restaurant_id: RwSignal::new(String::new()),
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            rows: RwSignal::new(Vec::new()),
            next_row_id: RwSignal::new(0),
        };
        state.add_row();
        state
    }

    /// 追加一个空白菜品行
    pub fn add_row(&self) {
        let id = self.next_row_id.get_untracked();
        self.next_row_id.set(id + 1);
        self.rows.update(|rows| {
            rows.push(ItemRow {
                id,
                name: RwSignal::new(String::new()),
                price: RwSignal::new(String::new()),
                category: RwSignal::new(String::new()),
            });
        });
    }

    pub fn remove_row(&self, id: u32) {
        self.rows.update(|rows| rows.retain(|row| row.id != id));
    }

    /// 重置表单到初始状态（保留当前选中的餐厅）
    pub fn reset(&self) {
        self.name.set(String::new());
        self.description.set(String::new());
        self.rows.set(Vec::new());
        self.add_row();
    }

    /// 校验并转换为提交载荷
    ///
    /// 空白行（名称与价格都为空）直接忽略；部分填写的行按校验失败处理。
    pub fn to_drafts(&self) -> Result<(MenuDraft, Vec<PendingItem>), String> {
        let restaurant_id = self.restaurant_id.get_untracked();
        if restaurant_id.is_empty() {
            return Err("请先选择餐厅".to_string());
        }
        let name = self.name.get_untracked().trim().to_string();
        if name.is_empty() {
            return Err("请填写菜单名称".to_string());
        }

        let mut items = Vec::new();
        for row in self.rows.get_untracked() {
            let item_name = row.name.get_untracked().trim().to_string();
            let price_text = row.price.get_untracked().trim().to_string();

            if item_name.is_empty() && price_text.is_empty() {
                continue;
            }
            if item_name.is_empty() {
                return Err("有菜品缺少名称".to_string());
            }
            let price: f64 = price_text
                .parse()
                .map_err(|_| format!("菜品 \"{}\" 的价格无效", item_name))?;
            if price < 0.0 {
                return Err(format!("菜品 \"{}\" 的价格不能为负", item_name));
            }

            let category = row.category.get_untracked().trim().to_string();
            items.push(PendingItem {
                name: item_name,
                price,
                category: if category.is_empty() { None } else { Some(category) },
            });
        }

        let description = self.description.get_untracked().trim().to_string();
        let draft = MenuDraft {
            restaurant_id,
            name,
            description: if description.is_empty() { None } else { Some(description) },
        };
        Ok((draft, items))
    }
}

impl Default for MenuFormState {
    fn default() -> Self {
        Self::new()
    }
}
