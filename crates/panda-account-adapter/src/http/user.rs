/*
[INPUT]:  Bearer-authenticated requests via the shared client
[OUTPUT]: Account, subscription, commission, invite, and notice data
[POS]:    HTTP layer - user endpoints (require stored bearer token)
[UPDATE]: When adding new user endpoints or changing payloads
*/

// ### User Endpoints

use reqwest::Method;

use crate::http::{PandaClient, Result};
use crate::types::{
    ChangePasswordRequest, CommissionRecordsPage, InviteDetails, NoticePage, TelegramBotInfo,
    TransferRequest, UserCommConfig, UserInfo, UserSubscribe, UserUpdateRequest,
};

impl PandaClient {
    /// Fetch the account profile
    ///
    /// GET /globalize/v1/user/info
    pub async fn fetch_user_info(&self) -> Result<UserInfo> {
        let builder = self.request(Method::GET, "/globalize/v1/user/info").await?;
        self.send_enveloped(builder).await
    }

    /// Fetch panel-wide user configuration
    ///
    /// GET /globalize/v1/user/comm/config
    pub async fn fetch_user_comm_config(&self) -> Result<UserCommConfig> {
        let builder = self
            .request(Method::GET, "/globalize/v1/user/comm/config")
            .await?;
        self.send_enveloped(builder).await
    }

    /// Update reminder settings
    ///
    /// POST /globalize/v1/user/update
    pub async fn update_user_settings(&self, payload: &UserUpdateRequest) -> Result<bool> {
        let builder = self
            .request(Method::POST, "/globalize/v1/user/update")
            .await?
            .json(payload);
        self.send_enveloped(builder).await
    }

    /// Change the account password
    ///
    /// POST /globalize/v1/user/changePassword
    pub async fn change_password(&self, payload: &ChangePasswordRequest) -> Result<bool> {
        let builder = self
            .request(Method::POST, "/globalize/v1/user/changePassword")
            .await?
            .json(payload);
        self.send_enveloped(builder).await
    }

    /// Fetch the active subscription
    ///
    /// GET /globalize/v1/user/getSubscribe
    pub async fn fetch_user_subscribe(&self) -> Result<UserSubscribe> {
        let builder = self
            .request(Method::GET, "/globalize/v1/user/getSubscribe")
            .await?;
        self.send_enveloped(builder).await
    }

    /// Fetch the Telegram bot handle
    ///
    /// GET /globalize/v1/user/telegram/getBotInfo
    pub async fn fetch_telegram_bot_info(&self) -> Result<TelegramBotInfo> {
        let builder = self
            .request(Method::GET, "/globalize/v1/user/telegram/getBotInfo")
            .await?;
        self.send_enveloped(builder).await
    }

    /// Rotate the subscription credential; returns the new subscribe URL
    ///
    /// GET /globalize/v1/user/resetSecurity
    pub async fn reset_subscription(&self) -> Result<String> {
        let builder = self
            .request(Method::GET, "/globalize/v1/user/resetSecurity")
            .await?;
        self.send_enveloped(builder).await
    }

    /// Move commission balance to the account balance
    ///
    /// POST /globalize/v1/user/transfer
    pub async fn transfer_commission(&self, payload: &TransferRequest) -> Result<bool> {
        let builder = self
            .request(Method::POST, "/globalize/v1/user/transfer")
            .await?
            .json(payload);
        self.send_enveloped(builder).await
    }

    /// Fetch invite codes and stats
    ///
    /// GET /globalize/v1/user/invite/fetch
    pub async fn fetch_invite_details(&self) -> Result<InviteDetails> {
        let builder = self
            .request(Method::GET, "/globalize/v1/user/invite/fetch")
            .await?;
        self.send_enveloped(builder).await
    }

    /// Generate a new invite code
    ///
    /// GET /globalize/v1/user/invite/save
    pub async fn create_invite_code(&self) -> Result<bool> {
        let builder = self
            .request(Method::GET, "/globalize/v1/user/invite/save")
            .await?;
        self.send_enveloped(builder).await
    }

    /// Fetch commission records; this endpoint responds without the envelope
    ///
    /// GET /globalize/v1/user/invite/details
    pub async fn fetch_commission_records(&self) -> Result<CommissionRecordsPage> {
        let builder = self
            .request(Method::GET, "/globalize/v1/user/invite/details")
            .await?;
        self.send_json(builder).await
    }

    /// Fetch panel notices; this endpoint responds without the envelope
    ///
    /// GET /globalize/v1/user/notice/fetch
    pub async fn fetch_notices(&self) -> Result<NoticePage> {
        let builder = self
            .request(Method::GET, "/globalize/v1/user/notice/fetch")
            .await?;
        self.send_json(builder).await
    }
}
