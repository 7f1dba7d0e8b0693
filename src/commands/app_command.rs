use crate::filter::FilterField;
use crate::filter::state::normalize_value;
use crate::model::BillAnalysisRequest;
use crate::routes::Route;
use std::str::FromStr;

/// 命令行输入解析出的用户意图
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Filter {
        field: FilterField,
        value: Option<String>,
    },
    Reset,
    Reload,
    Member {
        member_id: String,
    },
    Speeches {
        member_id: String,
        bill_id: String,
    },
    AnalyzeBill(BillAnalysisRequest),
    BillDetail {
        bill_id: String,
    },
    Predict {
        keyword: String,
    },
    Party {
        party_id: String,
    },
    Committee {
        committee_id: String,
    },
    Stats,
    Me,
    Search {
        query: String,
    },
    Login {
        email: String,
        password: String,
    },
    Register {
        email: String,
        username: String,
        password: String,
    },
    Logout,
    Go(Route),
    Help,
    Quit,
    Unknown(String),
}

pub const HELP_TEXT: &str = "명령: filter <field> <value|all> | reset | reload | member <id> | speeches <member_id> <bill_id> | bill <name> | billno <number> | proposer <name> | billid <id> | predict <keyword> | party <id> | committee <id> | stats | me | search <q> | login <email> <pw> | register <email> <username> <pw> | logout | go <path> | help | quit";

impl FromStr for AppCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(AppCommand::Unknown("".to_string()));
        }
        let rest = || parts[1..].join(" ");

        match parts[0] {
            "filter" | "f" => {
                let Some(raw_field) = parts.get(1) else {
                    return Ok(AppCommand::Unknown(
                        "사용법: filter <field> <value|all>".to_string(),
                    ));
                };
                match raw_field.parse::<FilterField>() {
                    Ok(field) => {
                        let value = parts[2..].join(" ");
                        Ok(AppCommand::Filter {
                            field,
                            value: normalize_value(Some(value)),
                        })
                    }
                    Err(e) => Ok(AppCommand::Unknown(e)),
                }
            }
            "reset" => Ok(AppCommand::Reset),
            "reload" => Ok(AppCommand::Reload),
            "member" => match parts.get(1) {
                Some(id) => Ok(AppCommand::Member {
                    member_id: id.to_string(),
                }),
                None => Ok(AppCommand::Unknown("사용법: member <id>".to_string())),
            },
            "speeches" => match (parts.get(1), parts.get(2)) {
                (Some(m), Some(b)) => Ok(AppCommand::Speeches {
                    member_id: m.to_string(),
                    bill_id: b.to_string(),
                }),
                _ => Ok(AppCommand::Unknown(
                    "사용법: speeches <member_id> <bill_id>".to_string(),
                )),
            },
            "bill" | "billno" | "proposer" => {
                let value = rest();
                if value.is_empty() {
                    return Ok(AppCommand::Unknown(format!("사용법: {} <value>", parts[0])));
                }
                let req = match parts[0] {
                    "bill" => BillAnalysisRequest::by_name(value),
                    "billno" => BillAnalysisRequest {
                        bill_number: Some(value),
                        ..Default::default()
                    },
                    _ => BillAnalysisRequest {
                        proposer: Some(value),
                        ..Default::default()
                    },
                };
                Ok(AppCommand::AnalyzeBill(req))
            }
            "billid" => match parts.get(1) {
                Some(id) => Ok(AppCommand::BillDetail {
                    bill_id: id.to_string(),
                }),
                None => Ok(AppCommand::Unknown("사용법: billid <id>".to_string())),
            },
            "predict" => {
                let keyword = rest();
                if keyword.is_empty() {
                    Ok(AppCommand::Unknown("사용법: predict <keyword>".to_string()))
                } else {
                    Ok(AppCommand::Predict { keyword })
                }
            }
            "party" => match parts.get(1) {
                Some(id) => Ok(AppCommand::Party {
                    party_id: id.to_string(),
                }),
                None => Ok(AppCommand::Go(Route::SentimentParty)),
            },
            "committee" => match parts.get(1) {
                Some(id) => Ok(AppCommand::Committee {
                    committee_id: id.to_string(),
                }),
                None => Ok(AppCommand::Go(Route::SentimentCommittee)),
            },
            "stats" => Ok(AppCommand::Stats),
            "me" | "dashboard" => Ok(AppCommand::Me),
            "search" => {
                let query = rest();
                if query.is_empty() {
                    Ok(AppCommand::Unknown("사용법: search <query>".to_string()))
                } else {
                    Ok(AppCommand::Search { query })
                }
            }
            "login" => match (parts.get(1), parts.get(2)) {
                (Some(e), Some(p)) => Ok(AppCommand::Login {
                    email: e.to_string(),
                    password: p.to_string(),
                }),
                _ => Ok(AppCommand::Unknown(
                    "사용법: login <email> <password>".to_string(),
                )),
            },
            "register" => match (parts.get(1), parts.get(2), parts.get(3)) {
                (Some(e), Some(u), Some(p)) => Ok(AppCommand::Register {
                    email: e.to_string(),
                    username: u.to_string(),
                    password: p.to_string(),
                }),
                _ => Ok(AppCommand::Unknown(
                    "사용법: register <email> <username> <password>".to_string(),
                )),
            },
            "logout" => Ok(AppCommand::Logout),
            "go" => match parts.get(1).map(|p| p.parse::<Route>()) {
                Some(Ok(route)) => Ok(AppCommand::Go(route)),
                Some(Err(e)) => Ok(AppCommand::Unknown(e)),
                None => Ok(AppCommand::Unknown("사용법: go <path>".to_string())),
            },
            "help" | "h" => Ok(AppCommand::Help),
            "quit" | "q" | "exit" => Ok(AppCommand::Quit),
            _ => Ok(AppCommand::Unknown(format!("알 수 없는 명령: {}", parts[0]))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> AppCommand {
        AppCommand::from_str(s).unwrap()
    }

    #[test]
    fn filter_commands() {
        assert_eq!(
            parse("filter party 국민의힘"),
            AppCommand::Filter {
                field: FilterField::Party,
                value: Some("국민의힘".to_string())
            }
        );
        assert_eq!(
            parse("filter region 서울"),
            AppCommand::Filter {
                field: FilterField::City,
                value: Some("서울".to_string())
            }
        );
        assert_eq!(
            parse("filter party all"),
            AppCommand::Filter {
                field: FilterField::Party,
                value: None
            }
        );
        assert_eq!(
            parse("filter name"),
            AppCommand::Filter {
                field: FilterField::Name,
                value: None
            }
        );
        assert!(matches!(parse("filter colour red"), AppCommand::Unknown(_)));
        assert!(matches!(parse("filter"), AppCommand::Unknown(_)));
    }

    #[test]
    fn bill_commands_keep_spaces() {
        assert_eq!(
            parse("bill 인공지능 기본법"),
            AppCommand::AnalyzeBill(BillAnalysisRequest::by_name("인공지능 기본법"))
        );
        match parse("billno 2100001") {
            AppCommand::AnalyzeBill(req) => assert_eq!(req.bill_number.as_deref(), Some("2100001")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            parse("predict 반도체 특별법"),
            AppCommand::Predict {
                keyword: "반도체 특별법".to_string()
            }
        );
    }

    #[test]
    fn navigation_and_auth() {
        assert_eq!(parse("go /"), AppCommand::Go(Route::Home));
        assert_eq!(parse("go /dashboard"), AppCommand::Go(Route::Dashboard));
        assert!(matches!(parse("go /nowhere"), AppCommand::Unknown(_)));
        assert_eq!(parse("party"), AppCommand::Go(Route::SentimentParty));
        assert_eq!(
            parse("login kim@example.com pw"),
            AppCommand::Login {
                email: "kim@example.com".to_string(),
                password: "pw".to_string()
            }
        );
        assert!(matches!(parse("login kim@example.com"), AppCommand::Unknown(_)));
        assert_eq!(parse("logout"), AppCommand::Logout);
        assert_eq!(parse("q"), AppCommand::Quit);
    }

    #[test]
    fn unknown_commands() {
        assert_eq!(parse(""), AppCommand::Unknown("".to_string()));
        assert!(matches!(parse("frobnicate"), AppCommand::Unknown(_)));
        assert!(matches!(parse("member"), AppCommand::Unknown(_)));
    }
}
