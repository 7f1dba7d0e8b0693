use super::api_session::ApiSession;
use super::auth::AuthSession;
use super::dto::{KeywordRequest, LoginRequest, RegisterRequest, TokenResponse, UserOut};
use super::types::{AnalyticsApi, ApiError};
use super::urls::*;
use crate::model::{
    BillAnalysis, BillAnalysisRequest, BillPassPrediction, BillSpeeches, DashboardStats,
    FilterOptions, GroupSummary, LegislatorBills, LegislatorDetail, LegislatorRecord,
    UnifiedSearchResponse, UserDashboard,
};
use async_trait::async_trait;
use log::info;
use std::time::Duration;

/// LegiSight Session - K-LegiSight 分析后端的会话
///
/// 基于 ApiSession，提供每个后端接口的强类型方法。
pub struct LegiSession {
    session: ApiSession,
}

impl LegiSession {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            session: ApiSession::new(base_url, timeout)?,
        })
    }
}

#[async_trait]
impl AnalyticsApi for LegiSession {
    /// 议员全量列表（无分页，过滤在本地进行）
    async fn list_legislators(&self) -> Result<Vec<LegislatorRecord>, ApiError> {
        let rows: Vec<LegislatorRecord> = self.session.get_json(PATH_LEGISLATORS, None).await?;
        info!("{} list_legislators(...) [{} rows]", self, rows.len());
        Ok(rows)
    }

    async fn filter_options(&self) -> Result<FilterOptions, ApiError> {
        self.session.get_json(PATH_FILTERS, None).await
    }

    async fn legislator_detail(&self, member_id: &str) -> Result<LegislatorDetail, ApiError> {
        let path = path_legislator_detail(member_id);
        let detail = self.session.get_json(&path, None).await?;
        info!("{} legislator_detail(...) [{}]", self, path);
        Ok(detail)
    }

    async fn legislator_bills(&self, member_id: &str) -> Result<LegislatorBills, ApiError> {
        let path = path_legislator_bills(member_id);
        let bills = self.session.get_json(&path, None).await?;
        info!("{} legislator_bills(...) [{}]", self, path);
        Ok(bills)
    }

    async fn bill_speeches(
        &self,
        member_id: &str,
        bill_id: &str,
    ) -> Result<BillSpeeches, ApiError> {
        let path = path_legislator_bill_speeches(member_id, bill_id);
        self.session.get_json(&path, None).await
    }

    async fn analyze_bill(&self, req: BillAnalysisRequest) -> Result<BillAnalysis, ApiError> {
        let req = req.normalized();
        let analysis = self
            .session
            .post_json(PATH_BILL_ANALYSIS, &req, None)
            .await?;
        info!("{} analyze_bill(...) [{:?}]", self, req.bill_name);
        Ok(analysis)
    }

    async fn bill_detail(&self, bill_id: &str) -> Result<BillAnalysis, ApiError> {
        self.session.get_json(&path_bill_detail(bill_id), None).await
    }

    async fn predict_bill_pass(&self, keyword: &str) -> Result<BillPassPrediction, ApiError> {
        let body = KeywordRequest { keyword };
        let prediction = self
            .session
            .post_json(PATH_PREDICT_BILL_PASS, &body, None)
            .await?;
        info!("{} predict_bill_pass(...) [{}]", self, keyword);
        Ok(prediction)
    }

    async fn committee_summary(&self, committee_id: &str) -> Result<GroupSummary, ApiError> {
        self.session
            .get_json(&path_committee_summary(committee_id), None)
            .await
    }

    async fn party_summary(&self, party_id: &str) -> Result<GroupSummary, ApiError> {
        self.session
            .get_json(&path_party_summary(party_id), None)
            .await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.session.get_json(PATH_DASHBOARD_STATS, None).await
    }

    async fn my_dashboard(&self, auth: &AuthSession) -> Result<UserDashboard, ApiError> {
        self.session
            .get_json(PATH_DASHBOARD_ME, Some(auth.access_token()))
            .await
    }

    async fn unified_search(&self, query: &str) -> Result<UnifiedSearchResponse, ApiError> {
        self.session
            .get_json_query(PATH_UNIFIED_SEARCH, &[("q", query)], None)
            .await
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let token: TokenResponse = self
            .session
            .post_json(PATH_TOKEN, &LoginRequest { email, password }, None)
            .await?;
        info!("{} login(...) [{}]", self, email);
        Ok(token)
    }

    async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<UserOut, ApiError> {
        let body = RegisterRequest {
            email,
            username,
            password,
        };
        self.session.post_json(PATH_REGISTER, &body, None).await
    }
}

impl std::fmt::Display for LegiSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<LegiSession [{}]>", self.session.base_url())
    }
}

impl std::fmt::Debug for LegiSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<LegiSession [{}]>", self.session.base_url())
    }
}
