/// K-LegiSight API 默认地址
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// 列表 / 筛选
pub const PATH_LEGISLATORS: &str = "/api/legislators";
pub const PATH_FILTERS: &str = "/api/filters";

/// 议员相关
pub fn path_legislator_detail(member_id: &str) -> String {
    format!("{}/{}/detail", PATH_LEGISLATORS, member_id)
}
pub fn path_legislator_bills(member_id: &str) -> String {
    format!("{}/{}/bills", PATH_LEGISLATORS, member_id)
}
pub fn path_legislator_bill_speeches(member_id: &str, bill_id: &str) -> String {
    format!("{}/{}/bills/{}/speeches", PATH_LEGISLATORS, member_id, bill_id)
}

/// 法案相关
pub const PATH_BILL_ANALYSIS: &str = "/api/bills/analysis";
pub fn path_bill_detail(bill_id: &str) -> String {
    format!("/api/bills/{}/detail", bill_id)
}
pub const PATH_PREDICT_BILL_PASS: &str = "/api/predict/bill-pass";

/// 委员会 / 政党
pub fn path_committee_summary(committee_id: &str) -> String {
    format!("/api/committee-summary/{}", committee_id)
}
pub fn path_party_summary(party_id: &str) -> String {
    format!("/api/parties/{}/summary", party_id)
}

/// 看板 / 搜索
pub const PATH_DASHBOARD_STATS: &str = "/api/dashboard-stats";
pub const PATH_DASHBOARD_ME: &str = "/api/dashboard/me";
pub const PATH_UNIFIED_SEARCH: &str = "/api/unified-search";

/// 认证
pub const PATH_TOKEN: &str = "/token";
pub const PATH_REGISTER: &str = "/register";

/// 拼接 base 与 path，去掉多余的斜杠
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_paths() {
        assert_eq!(path_legislator_detail("101"), "/api/legislators/101/detail");
        assert_eq!(
            path_legislator_bill_speeches("7", "2100001"),
            "/api/legislators/7/bills/2100001/speeches"
        );
        assert_eq!(path_party_summary("106"), "/api/parties/106/summary");
        assert_eq!(path_committee_summary("c1"), "/api/committee-summary/c1");
        assert_eq!(path_bill_detail("9"), "/api/bills/9/detail");
    }

    #[test]
    fn joins_without_double_slash() {
        assert_eq!(
            join_url("http://localhost:8000/", "/api/legislators"),
            "http://localhost:8000/api/legislators"
        );
        assert_eq!(join_url(DEFAULT_API_URL, "token"), "http://localhost:8000/token");
    }
}
