//! 按资源分组的服务方法
//!
//! 每个方法 1:1 封装一个 REST 操作，路径与方法由端点协议类型声明。

use restohub_shared::models::*;
use restohub_shared::protocol::*;

use super::{ApiError, RestoHubApi, Transport};

impl<T: Transport> RestoHubApi<T> {
    // =========================================================
    // 认证 (Auth)
    // =========================================================

    /// 用凭据交换访问令牌
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.send(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    /// 注册新账号，响应外形与登录一致
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.send(req).await
    }

    // =========================================================
    // 餐厅 (Restaurants)
    // =========================================================

    /// 获取餐厅列表
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        self.send(&ListRestaurants).await
    }

    pub async fn get_restaurant(&self, id: &str) -> Result<Restaurant, ApiError> {
        self.send(&GetRestaurant { id: id.to_string() }).await
    }

    /// 创建餐厅
    pub async fn create_restaurant(&self, draft: &RestaurantDraft) -> Result<Restaurant, ApiError> {
        self.send(draft).await
    }

    /// 更新餐厅
    pub async fn update_restaurant(
        &self,
        id: &str,
        draft: RestaurantDraft,
    ) -> Result<Restaurant, ApiError> {
        self.send(&UpdateRestaurant {
            id: id.to_string(),
            draft,
        })
        .await
    }

    /// 删除餐厅
    pub async fn delete_restaurant(&self, id: &str) -> Result<(), ApiError> {
        self.send(&DeleteRestaurant { id: id.to_string() }).await
    }

    // =========================================================
    // 菜单与菜品 (Menus & Menu items)
    // =========================================================

    /// 获取某餐厅的菜单列表
    pub async fn list_menus(&self, restaurant_id: &str) -> Result<Vec<Menu>, ApiError> {
        self.send(&ListMenus {
            restaurant_id: restaurant_id.to_string(),
        })
        .await
    }

    pub async fn create_menu(&self, draft: &MenuDraft) -> Result<Menu, ApiError> {
        self.send(draft).await
    }

    pub async fn update_menu(&self, id: &str, draft: MenuDraft) -> Result<Menu, ApiError> {
        self.send(&UpdateMenu {
            id: id.to_string(),
            draft,
        })
        .await
    }

    pub async fn delete_menu(&self, id: &str) -> Result<(), ApiError> {
        self.send(&DeleteMenu { id: id.to_string() }).await
    }

    /// 获取某菜单下的菜品
    pub async fn list_menu_items(&self, menu_id: &str) -> Result<Vec<MenuItem>, ApiError> {
        self.send(&ListMenuItems {
            menu_id: menu_id.to_string(),
        })
        .await
    }

    pub async fn create_menu_item(&self, draft: &MenuItemDraft) -> Result<MenuItem, ApiError> {
        self.send(draft).await
    }

    pub async fn update_menu_item(
        &self,
        id: &str,
        draft: MenuItemDraft,
    ) -> Result<MenuItem, ApiError> {
        self.send(&UpdateMenuItem {
            id: id.to_string(),
            draft,
        })
        .await
    }

    pub async fn delete_menu_item(&self, id: &str) -> Result<(), ApiError> {
        self.send(&DeleteMenuItem { id: id.to_string() }).await
    }

    // =========================================================
    // 活动 (Events)
    // =========================================================

    pub async fn list_events(&self) -> Result<Vec<EventItem>, ApiError> {
        self.send(&ListEvents).await
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<EventItem, ApiError> {
        self.send(draft).await
    }

    pub async fn update_event(&self, id: &str, draft: EventDraft) -> Result<EventItem, ApiError> {
        self.send(&UpdateEvent {
            id: id.to_string(),
            draft,
        })
        .await
    }

    /// 取消活动（独立子路径，不带载荷）
    pub async fn cancel_event(&self, id: &str) -> Result<EventItem, ApiError> {
        self.send(&CancelEvent { id: id.to_string() }).await
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), ApiError> {
        self.send(&DeleteEvent { id: id.to_string() }).await
    }

    // =========================================================
    // 集市 (Marketplace)
    // =========================================================

    pub async fn list_offers(&self) -> Result<Vec<Offer>, ApiError> {
        self.send(&ListOffers).await
    }

    /// 发布供应报价
    pub async fn create_offer(&self, draft: &OfferDraft) -> Result<Offer, ApiError> {
        self.send(draft).await
    }

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        self.send(&ListSuppliers).await
    }

    pub async fn create_supplier(&self, draft: &SupplierDraft) -> Result<Supplier, ApiError> {
        self.send(draft).await
    }

    // =========================================================
    // 点评与举报 (Reviews & Reports)
    // =========================================================

    /// 获取点评，可按餐厅过滤
    pub async fn list_reviews(
        &self,
        restaurant_id: Option<&str>,
    ) -> Result<Vec<Review>, ApiError> {
        self.send(&ListReviews {
            restaurant_id: restaurant_id.map(str::to_string),
        })
        .await
    }

    pub async fn create_review(&self, draft: &ReviewDraft) -> Result<Review, ApiError> {
        self.send(draft).await
    }

    pub async fn update_review(
        &self,
        id: &str,
        rating: u8,
        comment: Option<String>,
    ) -> Result<Review, ApiError> {
        self.send(&UpdateReview {
            id: id.to_string(),
            rating,
            comment,
        })
        .await
    }

    pub async fn delete_review(&self, id: &str) -> Result<(), ApiError> {
        self.send(&DeleteReview { id: id.to_string() }).await
    }

    pub async fn list_reports(&self) -> Result<Vec<Report>, ApiError> {
        self.send(&ListReports).await
    }

    /// 举报一条点评
    pub async fn create_report(&self, draft: &ReportDraft) -> Result<Report, ApiError> {
        self.send(draft).await
    }

    /// 处理举报：置为已处理或已驳回
    pub async fn resolve_report(
        &self,
        id: &str,
        status: ReportStatus,
    ) -> Result<Report, ApiError> {
        self.send(&ResolveReport {
            id: id.to_string(),
            status,
        })
        .await
    }

    pub async fn delete_report(&self, id: &str) -> Result<(), ApiError> {
        self.send(&DeleteReport { id: id.to_string() }).await
    }

    // =========================================================
    // 聊天助手 (Chatbot)
    // =========================================================

    /// 发送一轮对话，返回助手回复
    pub async fn chat_send(&self, message: &str) -> Result<ChatReply, ApiError> {
        self.send(&ChatSend {
            message: message.to_string(),
        })
        .await
    }

    pub async fn chat_history(&self) -> Result<Vec<ChatMessage>, ApiError> {
        self.send(&ChatHistory).await
    }

    pub async fn chat_clear(&self) -> Result<(), ApiError> {
        self.send(&ClearChatHistory).await
    }

    // =========================================================
    // 用户管理 (Users)
    // =========================================================

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.send(&ListUsers).await
    }

    pub async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User, ApiError> {
        self.send(&UpdateUser {
            id: id.to_string(),
            update,
        })
        .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.send(&DeleteUser { id: id.to_string() }).await
    }

    // =========================================================
    // 包间与预订 (Rooms & Reservations)
    // =========================================================

    pub async fn list_rooms(&self, restaurant_id: &str) -> Result<Vec<Room>, ApiError> {
        self.send(&ListRooms {
            restaurant_id: restaurant_id.to_string(),
        })
        .await
    }

    pub async fn create_room(&self, draft: &RoomDraft) -> Result<Room, ApiError> {
        self.send(draft).await
    }

    pub async fn delete_room(&self, id: &str) -> Result<(), ApiError> {
        self.send(&DeleteRoom { id: id.to_string() }).await
    }

    /// 获取预订，可按包间过滤
    pub async fn list_reservations(
        &self,
        room_id: Option<&str>,
    ) -> Result<Vec<Reservation>, ApiError> {
        self.send(&ListReservations {
            room_id: room_id.map(str::to_string),
        })
        .await
    }

    pub async fn create_reservation(
        &self,
        draft: &ReservationDraft,
    ) -> Result<Reservation, ApiError> {
        self.send(draft).await
    }

    pub async fn delete_reservation(&self, id: &str) -> Result<(), ApiError> {
        self.send(&DeleteReservation { id: id.to_string() }).await
    }
}
