pub mod bill;
pub mod dashboard;
pub mod de;
pub mod display;
pub mod legislator;
pub mod prediction;
pub mod speech;

pub use bill::{BillAnalysis, BillAnalysisRequest, BillRecord};
pub use dashboard::{DashboardStats, GroupSummary, UnifiedSearchResponse, UserDashboard, UserInfo};
pub use legislator::{
    party_rollups, FilterOptions, LegislatorBills, LegislatorDetail, LegislatorRecord, MemberBill,
    PartyRollup, StanceTally,
};
pub use prediction::BillPassPrediction;
pub use speech::{BillSpeeches, SentimentLabel};
