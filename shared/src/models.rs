//! 领域数据模型
//!
//! 与后端 JSON 逐字段对应的传输对象，线上传输统一 camelCase。
//! 跨字段一致性（如活动结束晚于开始）由后端负责，客户端仅做浅层校验。

use serde::{Deserialize, Serialize};

use crate::Role;

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// 登录 / 注册成功后的统一响应
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub role: Role,
    pub full_name: String,
}

// =========================================================
// 餐厅与菜单 (Restaurants & Menus)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub address: String,
    pub cuisine: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 创建 / 编辑餐厅的表单载荷
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDraft {
    pub name: String,
    pub address: String,
    pub cuisine: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuDraft {
    pub restaurant_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub menu_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDraft {
    pub menu_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub available: bool,
}

fn default_true() -> bool {
    true
}

// =========================================================
// 活动 (Events)
// =========================================================

/// 活动状态。后端可能演进出新状态，未知值落入 `Unknown` 而不是解析失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventStatus {
    #[default]
    #[serde(rename = "SCHEDULED")]
    Scheduled,
    #[serde(rename = "CANCELLED")]
    Cancelled,
    #[serde(rename = "FINISHED")]
    Finished,
    #[serde(other)]
    Unknown,
}

impl EventStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Scheduled => "已排期",
            EventStatus::Cancelled => "已取消",
            EventStatus::Finished => "已结束",
            EventStatus::Unknown => "未知",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    pub id: String,
    pub restaurant_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO 8601 本地时间字符串，解析见 [`crate::date`]
    pub starts_at: String,
    pub ends_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub status: EventStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub restaurant_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

// =========================================================
// 集市 (Marketplace)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub supplier_id: String,
    pub title: String,
    pub product: String,
    pub unit_price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct OfferDraft {
    pub supplier_id: String,
    pub title: String,
    pub product: String,
    pub unit_price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

// =========================================================
// 点评与举报 (Reviews & Reports)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub restaurant_id: String,
    pub author_email: String,
    /// 1 ~ 5 星
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub restaurant_id: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReportStatus {
    #[default]
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "RESOLVED")]
    Resolved,
    #[serde(rename = "DISMISSED")]
    Dismissed,
    #[serde(other)]
    Unknown,
}

impl ReportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Open => "待处理",
            ReportStatus::Resolved => "已处理",
            ReportStatus::Dismissed => "已驳回",
            ReportStatus::Unknown => "未知",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub review_id: String,
    pub reason: String,
    #[serde(default)]
    pub status: ReportStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    pub review_id: String,
    pub reason: String,
}

// =========================================================
// 聊天助手 (Chatbot)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Bot,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
}

// =========================================================
// 用户管理 (Users)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// 管理端更新载荷，未填字段不提交
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

// =========================================================
// 包间与预订 (Rooms & Reservations)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub capacity: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RoomDraft {
    pub restaurant_id: String,
    pub name: String,
    pub capacity: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub room_id: String,
    pub customer_email: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub party_size: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    pub room_id: String,
    pub date: String,
    pub party_size: u32,
}

// =========================================================
// 购物车（仅客户端，无一致性约束）
// =========================================================

/// 集市购物车行，总价为派生值，后端不参与
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub offer: Offer,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.offer.unit_price * self.quantity as f64
    }
}

/// 购物车合计
pub fn cart_total(lines: &[CartLine]) -> f64 {
    lines.iter().map(CartLine::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_wire_shape() {
        // 后端返回 camelCase 字段
        let json = r#"{"accessToken":"tok-1","role":"RESTAURATEUR","fullName":"Marie"}"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "tok-1");
        assert_eq!(resp.role, crate::Role::Restaurateur);
        assert_eq!(resp.full_name, "Marie");
    }

    #[test]
    fn test_restaurant_optional_fields_absent() {
        let json = r#"{"id":"r1","name":"Chez Lu","address":"1 rue A","cuisine":"french"}"#;
        let r: Restaurant = serde_json::from_str(json).unwrap();
        assert!(r.phone.is_none());
        assert!(r.description.is_none());
        // 序列化时缺省字段不回写
        let back = serde_json::to_string(&r).unwrap();
        assert!(!back.contains("phone"));
    }

    #[test]
    fn test_menu_item_defaults_available() {
        let json = r#"{"id":"i1","menuId":"m1","name":"汤","price":6.5}"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert!(item.available);
    }

    #[test]
    fn test_event_status_unknown_does_not_fail() {
        let json = r#"{"id":"e1","restaurantId":"r1","title":"品酒夜",
            "startsAt":"2026-09-01T19:00:00","endsAt":"2026-09-01T22:00:00",
            "status":"POSTPONED"}"#;
        let ev: EventItem = serde_json::from_str(json).unwrap();
        assert_eq!(ev.status, EventStatus::Unknown);
    }

    #[test]
    fn test_cart_total_is_sum_of_lines() {
        let offer = |price: f64| Offer {
            id: "o".into(),
            supplier_id: "s".into(),
            title: "t".into(),
            product: "p".into(),
            unit_price: price,
            quantity: 99,
            unit: None,
        };
        let lines = vec![
            CartLine { offer: offer(2.0), quantity: 3 },
            CartLine { offer: offer(1.5), quantity: 2 },
        ];
        assert!((cart_total(&lines) - 9.0).abs() < f64::EPSILON);
        assert!(cart_total(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_user_update_skips_empty_fields() {
        let upd = UserUpdate { full_name: None, role: Some(crate::Role::Admin) };
        let json = serde_json::to_string(&upd).unwrap();
        assert_eq!(json, r#"{"role":"ADMIN"}"#);
    }
}
