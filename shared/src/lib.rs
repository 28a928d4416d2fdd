use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod date;
pub mod models;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 携带 Bearer 凭据的请求头
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// Bearer 凭据前缀
pub const BEARER_PREFIX: &str = "Bearer ";

// 会话在持久化存储中的四个独立键（历史契约，不带结构化封装）
pub const STORAGE_KEY_TOKEN: &str = "token";
pub const STORAGE_KEY_EMAIL: &str = "userEmail";
pub const STORAGE_KEY_ROLE: &str = "userRole";
pub const STORAGE_KEY_NAME: &str = "userName";

// =========================================================
// 角色 (Role)
// =========================================================

/// 平台角色
///
/// 线上传输值为大写字符串（`ADMIN` 等），与后端枚举一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Restaurateur,
    Client,
    Fournisseur,
}

impl Role {
    /// 全部角色，按注册表单展示顺序
    pub const ALL: [Role; 4] = [
        Role::Client,
        Role::Restaurateur,
        Role::Fournisseur,
        Role::Admin,
    ];

    /// 线上传输值
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Restaurateur => "RESTAURATEUR",
            Role::Client => "CLIENT",
            Role::Fournisseur => "FOURNISSEUR",
        }
    }

    /// 界面展示名
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "管理员",
            Role::Restaurateur => "餐厅经营者",
            Role::Client => "顾客",
            Role::Fournisseur => "供应商",
        }
    }

    /// 是否可以管理餐厅目录（餐厅、菜单、活动、包间）
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, Role::Admin | Role::Restaurateur)
    }

    /// 是否可以在集市发布供应报价
    pub fn can_publish_offers(&self) -> bool {
        matches!(self, Role::Admin | Role::Fournisseur)
    }

    /// 是否可以处理举报与用户管理
    pub fn can_moderate(&self) -> bool {
        self.is_admin()
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = ();

    /// 解析线上传输值。未知字符串解析失败，交由调用方决定语义。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "RESTAURATEUR" => Ok(Role::Restaurateur),
            "CLIENT" => Ok(Role::Client),
            "FOURNISSEUR" => Ok(Role::Fournisseur),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_round_trip() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn test_role_from_str_rejects_unknown() {
        assert!(Role::from_str("SUPERADMIN").is_err());
        assert!(Role::from_str("admin").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_catalog_gating() {
        // 目录管理按钮仅对 ADMIN 与 RESTAURATEUR 可见
        assert!(Role::Admin.can_manage_catalog());
        assert!(Role::Restaurateur.can_manage_catalog());
        assert!(!Role::Client.can_manage_catalog());
        assert!(!Role::Fournisseur.can_manage_catalog());
    }

    #[test]
    fn test_offer_gating() {
        assert!(Role::Admin.can_publish_offers());
        assert!(Role::Fournisseur.can_publish_offers());
        assert!(!Role::Restaurateur.can_publish_offers());
        assert!(!Role::Client.can_publish_offers());
    }

    #[test]
    fn test_moderation_gating() {
        assert!(Role::Admin.can_moderate());
        assert!(!Role::Restaurateur.can_moderate());
        assert!(!Role::Client.can_moderate());
        assert!(!Role::Fournisseur.can_moderate());
    }
}
