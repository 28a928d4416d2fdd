//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用全部路由、认证要求与角色可见性。

use restohub_shared::Role;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面（默认路由）
    #[default]
    Login,
    /// 注册页面
    Register,
    /// 控制面板（需要认证）
    Dashboard,
    /// 餐厅管理
    Restaurants,
    /// 菜单管理
    Menus,
    /// 活动管理
    Events,
    /// 供应集市
    Marketplace,
    /// 点评与举报
    Reviews,
    /// 聊天助手
    Chatbot,
    /// 包间预订
    Rooms,
    /// 用户管理（仅管理员）
    Users,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 顶部导航展示顺序
    pub const NAV: [AppRoute; 9] = [
        AppRoute::Dashboard,
        AppRoute::Restaurants,
        AppRoute::Menus,
        AppRoute::Events,
        AppRoute::Marketplace,
        AppRoute::Reviews,
        AppRoute::Rooms,
        AppRoute::Chatbot,
        AppRoute::Users,
    ];

    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/restaurants" => Self::Restaurants,
            "/menus" => Self::Menus,
            "/events" => Self::Events,
            "/marketplace" => Self::Marketplace,
            "/reviews" => Self::Reviews,
            "/chatbot" => Self::Chatbot,
            "/rooms" => Self::Rooms,
            "/users" => Self::Users,
            _ => Self::NotFound,
        }
    }

    /// 路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Restaurants => "/restaurants",
            Self::Menus => "/menus",
            Self::Events => "/events",
            Self::Marketplace => "/marketplace",
            Self::Reviews => "/reviews",
            Self::Chatbot => "/chatbot",
            Self::Rooms => "/rooms",
            Self::Users => "/users",
            Self::NotFound => "/404",
        }
    }

    /// 导航标签
    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "登录",
            Self::Register => "注册",
            Self::Dashboard => "控制面板",
            Self::Restaurants => "餐厅",
            Self::Menus => "菜单",
            Self::Events => "活动",
            Self::Marketplace => "集市",
            Self::Reviews => "点评",
            Self::Chatbot => "助手",
            Self::Rooms => "包间",
            Self::Users => "用户管理",
            Self::NotFound => "未找到",
        }
    }

    /// **核心守卫逻辑：该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::Register | Self::NotFound)
    }

    /// 角色限制。`None` 表示任何已认证角色均可访问。
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Self::Users => Some(&[Role::Admin]),
            _ => None,
        }
    }

    /// 给定角色是否可见 / 可进入该路由
    pub fn visible_for(&self, role: Role) -> bool {
        match self.allowed_roles() {
            Some(roles) => roles.contains(&role),
            None => true,
        }
    }

    /// 已认证用户是否应离开此路由（登录 / 注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的重定向目标（从登录 / 注册页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 角色不符时的重定向目标
    pub fn role_failure_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip() {
        for route in [
            AppRoute::Register,
            AppRoute::Dashboard,
            AppRoute::Restaurants,
            AppRoute::Menus,
            AppRoute::Events,
            AppRoute::Marketplace,
            AppRoute::Reviews,
            AppRoute::Chatbot,
            AppRoute::Rooms,
            AppRoute::Users,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        // 登录页有两个入口路径
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/whatever"), AppRoute::NotFound);
    }

    #[test]
    fn test_public_routes() {
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Register.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::Users.requires_auth());
    }

    #[test]
    fn test_users_route_admin_only() {
        assert!(AppRoute::Users.visible_for(Role::Admin));
        assert!(!AppRoute::Users.visible_for(Role::Restaurateur));
        assert!(!AppRoute::Users.visible_for(Role::Client));
        assert!(!AppRoute::Users.visible_for(Role::Fournisseur));
        // 其余路由对所有已认证角色可见
        assert!(AppRoute::Restaurants.visible_for(Role::Client));
    }
}
