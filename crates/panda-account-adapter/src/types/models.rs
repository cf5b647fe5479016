/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs for panel data objects
[POS]:    Data layer - domain, account, and subscription models
[UPDATE]: When the panel API schema changes or new objects are added
*/

use serde::{Deserialize, Serialize};

/// One entry of the remote domain candidate list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCandidate {
    pub name: String,
    pub url: String,
}

/// The endpoint chosen by the selector, persisted across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedDomain {
    pub name: String,
    pub url: String,
}

/// Account profile returned by `/user/info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    pub transfer_enable: i64,
    pub last_login_at: Option<i64>,
    pub created_at: i64,
    pub banned: i64,
    pub remind_expire: i64,
    pub remind_traffic: i64,
    pub expired_at: Option<i64>,
    pub balance: i64,
    pub commission_balance: i64,
    pub plan_id: Option<i64>,
    pub discount: Option<i64>,
    pub commission_rate: Option<i64>,
    pub telegram_id: Option<i64>,
    pub uuid: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Guest-visible panel configuration returned by `/user/comm/config`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCommConfig {
    pub is_telegram: i64,
    #[serde(default)]
    pub telegram_discuss_link: Option<String>,
    #[serde(default)]
    pub stripe_pk: Option<String>,
    #[serde(default)]
    pub withdraw_methods: Option<Vec<String>>,
    pub withdraw_close: i64,
    pub currency: String,
    pub currency_symbol: String,
    pub commission_distribution_enable: i64,
    pub commission_distribution_l1: String,
    pub commission_distribution_l2: String,
    pub commission_distribution_l3: String,
    #[serde(default)]
    pub configs: Option<serde_json::Value>,
    #[serde(default, rename = "customFooterHtml")]
    pub custom_footer_html: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPrices {
    pub month_price: f64,
}

/// Subscription plan attached to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanInfo {
    pub id: i64,
    pub group_id: i64,
    pub transfer_enable: i64,
    pub name: String,
    pub prices: PlanPrices,
}

/// Subscription details returned by `/user/getSubscribe`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSubscribe {
    pub plan_id: i64,
    pub token: String,
    pub expired_at: Option<i64>,
    pub u: i64,
    pub d: i64,
    pub transfer_enable: i64,
    pub email: String,
    pub uuid: String,
    pub plan: PlanInfo,
    pub subscribe_url: String,
    pub reset_day: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramBotInfo {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteCodeItem {
    pub user_id: i64,
    pub code: String,
    pub pv: i64,
    pub status: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Invite codes plus the five-slot stat array (registered users, orders,
/// pending/available/total commission amounts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteDetails {
    pub codes: Vec<InviteCodeItem>,
    pub stat: [f64; 5],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRecord {
    pub id: i64,
    pub order_amount: i64,
    pub trade_no: String,
    pub get_amount: i64,
    pub created_at: i64,
}

/// The panel emits notice timestamps as either a unix number or a
/// pre-formatted string depending on version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Unix(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}
