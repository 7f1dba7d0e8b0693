use crate::fetch::FetchSlot;
use crate::model::BillAnalysisRequest;
use crate::session::AuthSession;

/// 发往后台命令循环的请求
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    Legislators,
    FilterOptions,
    Detail { member_id: String },
    Bills { member_id: String },
    Speeches { member_id: String, bill_id: String },
    AnalyzeBill(BillAnalysisRequest),
    BillDetail { bill_id: String },
    Predict { keyword: String },
    Party { party_id: String },
    Committee { committee_id: String },
    DashboardStats,
    MyDashboard(AuthSession),
    Search { query: String },
    Login { email: String, password: String },
    Register { email: String, username: String, password: String },
}

impl ApiRequest {
    pub fn slot(&self) -> FetchSlot {
        match self {
            ApiRequest::Legislators => FetchSlot::Legislators,
            ApiRequest::FilterOptions => FetchSlot::Options,
            ApiRequest::Detail { .. } => FetchSlot::Detail,
            ApiRequest::Bills { .. } => FetchSlot::Bills,
            ApiRequest::Speeches { .. } => FetchSlot::Speeches,
            ApiRequest::AnalyzeBill(_) | ApiRequest::BillDetail { .. } => FetchSlot::BillAnalysis,
            ApiRequest::Predict { .. } => FetchSlot::Prediction,
            ApiRequest::Party { .. } => FetchSlot::Party,
            ApiRequest::Committee { .. } => FetchSlot::Committee,
            ApiRequest::DashboardStats => FetchSlot::Stats,
            ApiRequest::MyDashboard(_) => FetchSlot::Dashboard,
            ApiRequest::Search { .. } => FetchSlot::Search,
            ApiRequest::Login { .. } | ApiRequest::Register { .. } => FetchSlot::Auth,
        }
    }
}

/// 带请求代号的命令
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCommand {
    pub generation: u64,
    pub request: ApiRequest,
}

impl FetchCommand {
    pub fn slot(&self) -> FetchSlot {
        self.request.slot()
    }
}
