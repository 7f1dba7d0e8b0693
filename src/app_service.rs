use crate::app_state::{AppEvent, Fetched};
use crate::commands::{ApiRequest, FetchCommand};
use crate::config::AppConfig;
use crate::fetch::FetchSlot;
use crate::session::{AnalyticsApi, ApiError, AuthSession, TokenStore};
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::mpsc;

/// 后台命令循环：每个请求一个任务，结果以 AppEvent 送回界面
///
/// 任务只做 HTTP，token 文件由界面在确认响应未过期后再读写。
pub async fn run_command_loop(
    api: Arc<dyn AnalyticsApi>,
    mut cmd_rx: mpsc::UnboundedReceiver<FetchCommand>,
    evt_tx: mpsc::UnboundedSender<AppEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        let api = api.clone();
        let tx = evt_tx.clone();
        tokio::spawn(async move {
            let event = execute(api.as_ref(), cmd).await;
            let _ = tx.send(event);
        });
    }
    info!("command loop stopped");
}

/// 执行单个请求
pub async fn execute(api: &dyn AnalyticsApi, cmd: FetchCommand) -> AppEvent {
    let slot = cmd.slot();
    let generation = cmd.generation;
    match fetch(api, cmd.request).await {
        Ok(data) => AppEvent::Fetched { generation, data },
        Err(e) => {
            warn!("{:?} request failed (gen {}): {}", slot, generation, e);
            // 登录/注册的 401 是凭据错误，不代表当前会话失效
            let unauthorized = matches!(e, ApiError::Unauthorized) && slot != FetchSlot::Auth;
            AppEvent::Failed {
                slot,
                generation,
                message: e.user_message().to_string(),
                unauthorized,
            }
        }
    }
}

async fn fetch(api: &dyn AnalyticsApi, request: ApiRequest) -> Result<Fetched, ApiError> {
    let data = match request {
        ApiRequest::Legislators => Fetched::Legislators(api.list_legislators().await?),
        ApiRequest::FilterOptions => Fetched::Options(api.filter_options().await?),
        ApiRequest::Detail { member_id } => {
            Fetched::Detail(api.legislator_detail(&member_id).await?)
        }
        ApiRequest::Bills { member_id } => Fetched::Bills(api.legislator_bills(&member_id).await?),
        ApiRequest::Speeches { member_id, bill_id } => {
            Fetched::Speeches(api.bill_speeches(&member_id, &bill_id).await?)
        }
        ApiRequest::AnalyzeBill(req) => {
            let analysis = api.analyze_bill(req).await?;
            let message = analysis_message(analysis.found(), analysis.message.clone());
            Fetched::Bill(analysis.into_record(), message)
        }
        ApiRequest::BillDetail { bill_id } => {
            let analysis = api.bill_detail(&bill_id).await?;
            let message = analysis_message(analysis.found(), analysis.message.clone());
            Fetched::Bill(analysis.into_record(), message)
        }
        ApiRequest::Predict { keyword } => {
            Fetched::Prediction(api.predict_bill_pass(&keyword).await?)
        }
        ApiRequest::Party { party_id } => Fetched::Party(api.party_summary(&party_id).await?),
        ApiRequest::Committee { committee_id } => {
            Fetched::Committee(api.committee_summary(&committee_id).await?)
        }
        ApiRequest::DashboardStats => Fetched::Stats(api.dashboard_stats().await?),
        ApiRequest::MyDashboard(auth) => Fetched::Dashboard(api.my_dashboard(&auth).await?),
        ApiRequest::Search { query } => Fetched::Search(api.unified_search(&query).await?),
        ApiRequest::Login { email, password } => {
            Fetched::LoggedIn(AuthSession::from_token_response(api.login(&email, &password).await?))
        }
        ApiRequest::Register {
            email,
            username,
            password,
        } => Fetched::Registered(api.register(&email, &username, &password).await?),
    };
    Ok(data)
}

fn analysis_message(found: bool, message: Option<String>) -> Option<String> {
    if found {
        message
    } else {
        Some(message.unwrap_or_else(|| "해당 법안을 찾을 수 없습니다".to_string()))
    }
}

/// 启动时恢复登录：先读 token 文件，没有则用配置里的账号登录
pub async fn restore_auth(
    api: &dyn AnalyticsApi,
    tokens: &TokenStore,
    config: &AppConfig,
    session_info: &mut Vec<String>,
) -> Option<AuthSession> {
    match tokens.load() {
        Ok(Some(session)) => {
            session_info.push(format!("✓ 저장된 로그인 복원: {}", session.display_name()));
            return Some(session);
        }
        Ok(None) => {}
        Err(e) => {
            warn!("token file unreadable: {}", e);
            session_info.push("⚠ 토큰 파일을 읽을 수 없습니다".to_string());
        }
    }

    let (email, password) = config.credentials.as_ref()?;
    session_info.push(format!("자동 로그인 시도: {}", email));
    match api.login(email, password).await {
        Ok(resp) => {
            let session = AuthSession::from_token_response(resp);
            if let Err(e) = tokens.save(&session) {
                warn!("failed to persist token: {}", e);
            }
            session_info.push(format!("✓ 로그인 성공: {}", session.display_name()));
            Some(session)
        }
        Err(e) => {
            warn!("auto login failed: {}", e);
            session_info.push(format!("✗ 로그인 실패: {}", e.user_message()));
            None
        }
    }
}
