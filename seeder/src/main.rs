//! 演示数据填充脚本
//!
//! 对一个正在运行的后端按顺序发起创建请求：注册四类演示账号，
//! 然后以各自身份创建餐厅、菜单、菜品、活动、包间、报价、点评与预订。
//! 严格顺序执行、出错即停，不做重试与回滚。

use anyhow::{Context, Result};
use restohub_shared::models::*;
use restohub_shared::protocol::ApiRequest;
use restohub_shared::{BEARER_PREFIX, HEADER_AUTHORIZATION, Role};
use tracing::{info, warn};

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEMO_PASSWORD: &str = "demo-password-1";

struct Seeder {
    client: reqwest::Client,
    base_url: String,
}

impl Seeder {
    fn new(base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("构建 HTTP 客户端失败")?;
        Ok(Self { client, base_url })
    }

    /// 发送一次类型化请求，端点元数据来自共享协议
    async fn send<R: ApiRequest>(&self, token: Option<&str>, req: &R) -> Result<R::Response> {
        let url = format!("{}{}", self.base_url, req.path());
        let method = reqwest::Method::from_bytes(R::METHOD.as_str().as_bytes())
            .expect("协议中的方法都是合法的 HTTP 方法");

        let mut builder = self.client.request(method, &url);
        if let Some(body) = req.body() {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body);
        }
        if !R::PUBLIC {
            if let Some(token) = token {
                builder =
                    builder.header(HEADER_AUTHORIZATION, format!("{}{}", BEARER_PREFIX, token));
            }
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("请求 {} 失败", url))?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            anyhow::bail!("{} 返回 {}: {}", url, status, text);
        }

        // 空响应体按 null 解析，配合 `()` 响应类型
        let source = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(source).with_context(|| format!("解析 {} 的响应失败", url))
    }

    /// 注册演示账号；已存在时退回登录
    async fn ensure_account(&self, name: &str, email: &str, role: Role) -> Result<String> {
        let register = RegisterRequest {
            full_name: name.to_string(),
            email: email.to_string(),
            password: DEMO_PASSWORD.to_string(),
            role,
        };
        match self.send(None, &register).await {
            Ok(auth) => {
                info!(email, role = %role, "账号已注册");
                Ok(auth.access_token)
            }
            Err(register_err) => {
                // 多半是重复运行导致账号已存在
                warn!(email, "注册失败，尝试登录: {register_err:#}");
                let login = LoginRequest {
                    email: email.to_string(),
                    password: DEMO_PASSWORD.to_string(),
                };
                let auth = self
                    .send(None, &login)
                    .await
                    .with_context(|| format!("{} 注册与登录均失败", email))?;
                info!(email, "已登录既有账号");
                Ok(auth.access_token)
            }
        }
    }
}

async fn run(seeder: &Seeder) -> Result<()> {
    // 1. 四类演示账号
    let admin = seeder
        .ensure_account("Alice Admin", "admin@restohub.demo", Role::Admin)
        .await?;
    let restaurateur = seeder
        .ensure_account("Marie Dupont", "marie@restohub.demo", Role::Restaurateur)
        .await?;
    let fournisseur = seeder
        .ensure_account("Fermes Léon", "leon@restohub.demo", Role::Fournisseur)
        .await?;
    let client = seeder
        .ensure_account("Chloé Martin", "chloe@restohub.demo", Role::Client)
        .await?;

    // 2. 餐厅经营者：餐厅 -> 菜单 -> 菜品 -> 活动 -> 包间
    let restaurants = [
        RestaurantDraft {
            name: "Chez Marie".into(),
            address: "12 rue des Halles, Paris".into(),
            cuisine: "法餐".into(),
            phone: Some("+33 1 40 00 00 01".into()),
            description: Some("主打勃艮第家常菜的小馆".into()),
        },
        RestaurantDraft {
            name: "Bistro du Port".into(),
            address: "3 quai Sud, Marseille".into(),
            cuisine: "海鲜".into(),
            phone: None,
            description: None,
        },
    ];

    let mut first_restaurant = None;
    let mut first_room = None;
    for draft in &restaurants {
        let restaurant = seeder.send(Some(restaurateur.as_str()), draft).await?;
        info!(name = %restaurant.name, id = %restaurant.id, "餐厅已创建");

        let menu = seeder
            .send(
                Some(restaurateur.as_str()),
                &MenuDraft {
                    restaurant_id: restaurant.id.clone(),
                    name: "晚市菜单".into(),
                    description: Some("每日 18:30 起".into()),
                },
            )
            .await?;
        info!(menu = %menu.name, "菜单已创建");

        // 菜品严格按顺序创建
        let items = [
            ("洋葱汤", 8.5, Some("前菜")),
            ("红酒炖牛肉", 21.0, Some("主菜")),
            ("焦糖布丁", 7.0, Some("甜点")),
        ];
        for (name, price, category) in items {
            seeder
                .send(
                    Some(restaurateur.as_str()),
                    &MenuItemDraft {
                        menu_id: menu.id.clone(),
                        name: name.into(),
                        price,
                        category: category.map(str::to_string),
                        available: true,
                    },
                )
                .await?;
            info!(item = name, "菜品已创建");
        }

        let event = seeder
            .send(
                Some(restaurateur.as_str()),
                &EventDraft {
                    restaurant_id: restaurant.id.clone(),
                    title: "波尔多品酒夜".into(),
                    description: Some("六款酒庄直供".into()),
                    starts_at: "2026-09-18T19:00:00".into(),
                    ends_at: "2026-09-18T22:30:00".into(),
                    capacity: Some(24),
                },
            )
            .await?;
        info!(event = %event.title, "活动已创建");

        for (name, capacity) in [("玫瑰厅", 8u32), ("葡萄园厅", 12u32)] {
            let room = seeder
                .send(
                    Some(restaurateur.as_str()),
                    &RoomDraft {
                        restaurant_id: restaurant.id.clone(),
                        name: name.into(),
                        capacity,
                    },
                )
                .await?;
            info!(room = %room.name, "包间已创建");
            if first_room.is_none() {
                first_room = Some(room.id);
            }
        }

        if first_restaurant.is_none() {
            first_restaurant = Some(restaurant.id);
        }
    }

    // 3. 供应商：名录 + 报价
    let supplier = seeder
        .send(
            Some(fournisseur.as_str()),
            &SupplierDraft {
                name: "Fermes Léon".into(),
                email: Some("contact@fermes-leon.fr".into()),
                phone: None,
            },
        )
        .await?;
    info!(supplier = %supplier.name, "供应商已登记");

    for (title, product, price, quantity, unit) in [
        ("AOP 黄油整箱", "黄油", 6.8, 40u32, Some("kg")),
        ("当季黑松露", "松露", 320.0, 5, Some("kg")),
        ("农场鸡蛋", "鸡蛋", 0.45, 600, None),
    ] {
        seeder
            .send(
                Some(fournisseur.as_str()),
                &OfferDraft {
                    supplier_id: supplier.id.clone(),
                    title: title.into(),
                    product: product.into(),
                    unit_price: price,
                    quantity,
                    unit: unit.map(str::to_string),
                },
            )
            .await?;
        info!(offer = title, "报价已发布");
    }

    // 4. 顾客：点评 + 预订
    let restaurant_id = first_restaurant.expect("至少创建了一家餐厅");
    for (rating, comment) in [
        (5u8, Some("炖牛肉一绝，下次还来。")),
        (4u8, None),
    ] {
        seeder
            .send(
                Some(client.as_str()),
                &ReviewDraft {
                    restaurant_id: restaurant_id.clone(),
                    rating,
                    comment: comment.map(str::to_string),
                },
            )
            .await?;
        info!(rating, "点评已发布");
    }

    let room_id = first_room.expect("至少创建了一个包间");
    let reservation = seeder
        .send(
            Some(client.as_str()),
            &ReservationDraft {
                room_id,
                date: "2026-09-20".into(),
                party_size: 4,
            },
        )
        .await?;
    info!(date = %reservation.date, "预订已创建");

    // 5. 管理端冒烟：确认用户列表可读
    let users = seeder.send(Some(admin.as_str()), &restohub_shared::protocol::ListUsers).await?;
    info!(count = users.len(), "用户列表核对完成");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let base_url = std::env::var("RESTOHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
    info!(%base_url, "开始填充演示数据");

    let seeder = Seeder::new(base_url)?;
    run(&seeder).await?;

    info!("演示数据填充完成");
    Ok(())
}
