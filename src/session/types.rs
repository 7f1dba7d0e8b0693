use crate::model::{
    BillAnalysis, BillAnalysisRequest, BillPassPrediction, BillSpeeches, DashboardStats,
    FilterOptions, GroupSummary, LegislatorBills, LegislatorDetail, LegislatorRecord,
    UnifiedSearchResponse, UserDashboard,
};
use crate::session::auth::AuthSession;
use crate::session::dto::{TokenResponse, UserOut};
use async_trait::async_trait;

/// 后端请求失败的分类。界面上统一显示 `user_message()`。
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("empty response")]
    Empty,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub const GENERIC_ERROR_MESSAGE: &str = "데이터를 불러오지 못했습니다. 잠시 후 다시 시도해 주세요.";

impl ApiError {
    pub fn user_message(&self) -> &'static str {
        GENERIC_ERROR_MESSAGE
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Http(e.to_string())
    }
}

/// 分析后端的全部接口
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    async fn list_legislators(&self) -> Result<Vec<LegislatorRecord>, ApiError>;
    async fn filter_options(&self) -> Result<FilterOptions, ApiError>;
    async fn legislator_detail(&self, member_id: &str) -> Result<LegislatorDetail, ApiError>;
    async fn legislator_bills(&self, member_id: &str) -> Result<LegislatorBills, ApiError>;
    async fn bill_speeches(&self, member_id: &str, bill_id: &str)
        -> Result<BillSpeeches, ApiError>;
    async fn analyze_bill(&self, req: BillAnalysisRequest) -> Result<BillAnalysis, ApiError>;
    async fn bill_detail(&self, bill_id: &str) -> Result<BillAnalysis, ApiError>;
    async fn predict_bill_pass(&self, keyword: &str) -> Result<BillPassPrediction, ApiError>;
    async fn committee_summary(&self, committee_id: &str) -> Result<GroupSummary, ApiError>;
    async fn party_summary(&self, party_id: &str) -> Result<GroupSummary, ApiError>;
    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;
    async fn my_dashboard(&self, auth: &AuthSession) -> Result<UserDashboard, ApiError>;
    async fn unified_search(&self, query: &str) -> Result<UnifiedSearchResponse, ApiError>;
    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError>;
    async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<UserOut, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_shows_the_same_message() {
        let errors = [
            ApiError::Http("connection refused".into()),
            ApiError::Status {
                status: 500,
                body: "boom".into(),
            },
            ApiError::Unauthorized,
            ApiError::Empty,
            ApiError::InvalidResponse("eof".into()),
        ];
        for e in errors {
            assert_eq!(e.user_message(), GENERIC_ERROR_MESSAGE);
        }
    }
}
