//! 端点协议模块
//!
//! 用类型描述 REST 契约：每个操作一个请求类型，声明自己的响应类型、
//! HTTP 方法、路径与是否公开端点。客户端据此统一构造请求，
//! 路径与方法不再散落在各调用点。

use serde::{Serialize, de::DeserializeOwned};

use crate::models::*;

/// HTTP 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// 描述一次 API 调用的请求-响应关系与元数据
pub trait ApiRequest: Serialize {
    /// 该请求的响应体类型
    type Response: DeserializeOwned;
    /// HTTP 方法
    const METHOD: HttpMethod;
    /// 公开端点不附带 Bearer 凭据（仅 /auth/*）
    const PUBLIC: bool = false;
    /// 请求路径（含路径参数与查询串）
    fn path(&self) -> String;

    /// 请求体。GET / DELETE 默认无体，其余方法默认序列化自身。
    fn body(&self) -> Option<String> {
        match Self::METHOD {
            HttpMethod::Get | HttpMethod::Delete => None,
            _ => serde_json::to_string(self).ok(),
        }
    }
}

// =========================================================
// 认证 (Auth) — 仅有的公开端点
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PUBLIC: bool = true;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PUBLIC: bool = true;

    fn path(&self) -> String {
        "/auth/register".to_string()
    }
}

// =========================================================
// 餐厅 (Restaurants)
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListRestaurants;

impl ApiRequest for ListRestaurants {
    type Response = Vec<Restaurant>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/restaurants".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct GetRestaurant {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for GetRestaurant {
    type Response = Restaurant;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/restaurants/{}", self.id)
    }
}

/// 创建餐厅即提交表单载荷本身
impl ApiRequest for RestaurantDraft {
    type Response = Restaurant;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/restaurants".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateRestaurant {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub draft: RestaurantDraft,
}

impl ApiRequest for UpdateRestaurant {
    type Response = Restaurant;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/restaurants/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteRestaurant {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteRestaurant {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/restaurants/{}", self.id)
    }
}

// =========================================================
// 菜单与菜品 (Menus & Menu items)
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListMenus {
    #[serde(skip)]
    pub restaurant_id: String,
}

impl ApiRequest for ListMenus {
    type Response = Vec<Menu>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/menus?restaurantId={}", self.restaurant_id)
    }
}

impl ApiRequest for MenuDraft {
    type Response = Menu;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/menus".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateMenu {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub draft: MenuDraft,
}

impl ApiRequest for UpdateMenu {
    type Response = Menu;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/menus/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteMenu {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteMenu {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/menus/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct ListMenuItems {
    #[serde(skip)]
    pub menu_id: String,
}

impl ApiRequest for ListMenuItems {
    type Response = Vec<MenuItem>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/menu-items?menuId={}", self.menu_id)
    }
}

impl ApiRequest for MenuItemDraft {
    type Response = MenuItem;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/menu-items".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateMenuItem {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub draft: MenuItemDraft,
}

impl ApiRequest for UpdateMenuItem {
    type Response = MenuItem;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/menu-items/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteMenuItem {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteMenuItem {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/menu-items/{}", self.id)
    }
}

// =========================================================
// 活动 (Events) — 更新走 PATCH，取消是独立子路径
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListEvents;

impl ApiRequest for ListEvents {
    type Response = Vec<EventItem>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/events".to_string()
    }
}

impl ApiRequest for EventDraft {
    type Response = EventItem;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/events".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateEvent {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub draft: EventDraft,
}

impl ApiRequest for UpdateEvent {
    type Response = EventItem;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/events/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct CancelEvent {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for CancelEvent {
    type Response = EventItem;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/events/{}/cancel", self.id)
    }

    // 取消不携带载荷
    fn body(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteEvent {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteEvent {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/events/{}", self.id)
    }
}

// =========================================================
// 集市 (Marketplace)
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListOffers;

impl ApiRequest for ListOffers {
    type Response = Vec<Offer>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/offers".to_string()
    }
}

impl ApiRequest for OfferDraft {
    type Response = Offer;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/offers".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct ListSuppliers;

impl ApiRequest for ListSuppliers {
    type Response = Vec<Supplier>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/suppliers".to_string()
    }
}

impl ApiRequest for SupplierDraft {
    type Response = Supplier;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/suppliers".to_string()
    }
}

// =========================================================
// 点评与举报 (Reviews & Reports)
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListReviews {
    #[serde(skip)]
    pub restaurant_id: Option<String>,
}

impl ApiRequest for ListReviews {
    type Response = Vec<Review>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        match &self.restaurant_id {
            Some(id) => format!("/reviews?restaurantId={}", id),
            None => "/reviews".to_string(),
        }
    }
}

impl ApiRequest for ReviewDraft {
    type Response = Review;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/reviews".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateReview {
    #[serde(skip)]
    pub id: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ApiRequest for UpdateReview {
    type Response = Review;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/reviews/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteReview {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteReview {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/reviews/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct ListReports;

impl ApiRequest for ListReports {
    type Response = Vec<Report>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/reports".to_string()
    }
}

impl ApiRequest for ReportDraft {
    type Response = Report;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/reports".to_string()
    }
}

/// 处理举报：置为已处理或已驳回
#[derive(Debug, Serialize)]
pub struct ResolveReport {
    #[serde(skip)]
    pub id: String,
    pub status: ReportStatus,
}

impl ApiRequest for ResolveReport {
    type Response = Report;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/reports/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteReport {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteReport {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/reports/{}", self.id)
    }
}

// =========================================================
// 聊天助手 (Chatbot)
// =========================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSend {
    pub message: String,
}

impl ApiRequest for ChatSend {
    type Response = ChatReply;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/chatbot/message".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct ChatHistory;

impl ApiRequest for ChatHistory {
    type Response = Vec<ChatMessage>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/chatbot/history".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct ClearChatHistory;

impl ApiRequest for ClearChatHistory {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        "/chatbot/history".to_string()
    }
}

// =========================================================
// 用户管理 (Users)
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListUsers;

impl ApiRequest for ListUsers {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/users".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateUser {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub update: UserUpdate,
}

impl ApiRequest for UpdateUser {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/users/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteUser {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteUser {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/users/{}", self.id)
    }
}

// =========================================================
// 包间与预订 (Rooms & Reservations)
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListRooms {
    #[serde(skip)]
    pub restaurant_id: String,
}

impl ApiRequest for ListRooms {
    type Response = Vec<Room>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/rooms?restaurantId={}", self.restaurant_id)
    }
}

impl ApiRequest for RoomDraft {
    type Response = Room;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/rooms".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteRoom {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteRoom {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/rooms/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct ListReservations {
    #[serde(skip)]
    pub room_id: Option<String>,
}

impl ApiRequest for ListReservations {
    type Response = Vec<Reservation>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        match &self.room_id {
            Some(id) => format!("/reservations?roomId={}", id),
            None => "/reservations".to_string(),
        }
    }
}

impl ApiRequest for ReservationDraft {
    type Response = Reservation;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/reservations".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteReservation {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteReservation {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/reservations/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_endpoints_are_public() {
        assert!(LoginRequest::PUBLIC);
        assert!(RegisterRequest::PUBLIC);
        // 其余端点默认受保护
        assert!(!ListRestaurants::PUBLIC);
        assert!(!ChatSend::PUBLIC);
    }

    #[test]
    fn test_path_parameters() {
        let get = GetRestaurant { id: "r42".into() };
        assert_eq!(get.path(), "/restaurants/r42");

        let cancel = CancelEvent { id: "e7".into() };
        assert_eq!(cancel.path(), "/events/e7/cancel");

        let menus = ListMenus { restaurant_id: "r1".into() };
        assert_eq!(menus.path(), "/menus?restaurantId=r1");

        let all_reviews = ListReviews { restaurant_id: None };
        assert_eq!(all_reviews.path(), "/reviews");
        let one = ListReviews { restaurant_id: Some("r1".into()) };
        assert_eq!(one.path(), "/reviews?restaurantId=r1");
    }

    #[test]
    fn test_get_and_delete_have_no_body() {
        assert!(ListRestaurants.body().is_none());
        assert!(DeleteMenu { id: "m1".into() }.body().is_none());
        // 取消活动显式声明无载荷
        assert!(CancelEvent { id: "e1".into() }.body().is_none());
    }

    #[test]
    fn test_post_body_is_camel_case() {
        let draft = MenuDraft {
            restaurant_id: "r1".into(),
            name: "午市套餐".into(),
            description: None,
        };
        let body = draft.body().unwrap();
        assert!(body.contains("\"restaurantId\":\"r1\""));
        assert!(!body.contains("restaurant_id"));
    }

    #[test]
    fn test_update_skips_id_in_body() {
        let upd = UpdateRestaurant {
            id: "r9".into(),
            draft: RestaurantDraft {
                name: "新名字".into(),
                address: "2 rue B".into(),
                cuisine: "fusion".into(),
                phone: None,
                description: None,
            },
        };
        let body = upd.body().unwrap();
        assert!(!body.contains("\"id\""));
        assert!(body.contains("新名字"));
        assert_eq!(upd.path(), "/restaurants/r9");
    }

    #[test]
    fn test_resolve_report_body() {
        let resolve = ResolveReport { id: "rep1".into(), status: ReportStatus::Resolved };
        assert_eq!(resolve.body().unwrap(), r#"{"status":"RESOLVED"}"#);
        assert_eq!(resolve.path(), "/reports/rep1");
    }
}
