use std::fmt;
use std::str::FromStr;

/// 导航目标，保留后端前端共用的路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    SentimentPage,
    SentimentMember,
    SentimentParty,
    SentimentCommittee,
    SentimentBill,
    PersonView,
    BillSpeeches,
    BillView,
    BillPrediction,
    PartyMembers,
    Dashboard,
}

impl Route {
    pub const ALL: [Route; 14] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::SentimentPage,
        Route::SentimentMember,
        Route::SentimentParty,
        Route::SentimentCommittee,
        Route::SentimentBill,
        Route::PersonView,
        Route::BillSpeeches,
        Route::BillView,
        Route::BillPrediction,
        Route::PartyMembers,
        Route::Dashboard,
    ];

    /// 左侧菜单里出现的页面
    pub const MENU: [Route; 8] = [
        Route::Home,
        Route::SentimentPage,
        Route::SentimentParty,
        Route::SentimentCommittee,
        Route::SentimentBill,
        Route::BillPrediction,
        Route::Dashboard,
        Route::Login,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/home",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::SentimentPage => "/sentimentpage",
            Route::SentimentMember => "/sentiment/member",
            Route::SentimentParty => "/sentiment/party",
            Route::SentimentCommittee => "/sentiment/committee",
            Route::SentimentBill => "/sentiment/bill",
            Route::PersonView => "/analysis/person-view",
            Route::BillSpeeches => "/analysis/detail",
            Route::BillView => "/analysis/bill-view",
            Route::BillPrediction => "/billprediction",
            Route::PartyMembers => "/analysis/party-members",
            Route::Dashboard => "/dashboard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "홈",
            Route::Login => "로그인",
            Route::Register => "회원가입",
            Route::SentimentPage => "의원 분석",
            Route::SentimentMember => "의원별 성향",
            Route::SentimentParty => "정당별 성향",
            Route::SentimentCommittee => "위원회별 성향",
            Route::SentimentBill => "법안 분석",
            Route::PersonView => "의원 상세",
            Route::BillSpeeches => "법안 발언",
            Route::BillView => "법안 상세",
            Route::BillPrediction => "가결 예측",
            Route::PartyMembers => "정당 소속 의원",
            Route::Dashboard => "내 대시보드",
        }
    }

    /// 需要登录才能进入
    pub fn is_protected(self) -> bool {
        matches!(self, Route::Dashboard)
    }

    /// 未登录时访问受保护页面跳转到登录页
    pub fn resolve(self, logged_in: bool) -> Route {
        if self.is_protected() && !logged_in {
            Route::Login
        } else {
            self
        }
    }

    /// 解析路径；"/" 和空串视为首页，多余的斜杠忽略
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Home);
        }
        let mut normalized = String::from("/");
        normalized.push_str(
            &trimmed
                .split('/')
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("/"),
        );
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_path(s).ok_or_else(|| format!("알 수 없는 경로: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_path_parses_back() {
        for r in Route::ALL {
            assert_eq!(Route::from_path(r.path()), Some(r));
        }
    }

    #[test]
    fn root_and_double_slash() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("//analysis/detail"), Some(Route::BillSpeeches));
        assert_eq!(Route::from_path("/billprediction/"), Some(Route::BillPrediction));
        assert_eq!(Route::from_path("/nope"), None);
        assert!("/nope".parse::<Route>().is_err());
    }

    #[test]
    fn dashboard_requires_login() {
        assert!(Route::Dashboard.is_protected());
        assert_eq!(Route::Dashboard.resolve(false), Route::Login);
        assert_eq!(Route::Dashboard.resolve(true), Route::Dashboard);
        assert_eq!(Route::Home.resolve(false), Route::Home);
    }
}
