use crate::commands::{ApiRequest, AppCommand, FetchCommand, HELP_TEXT};
use crate::fetch::{FetchSlot, RequestTracker};
use crate::filter::{FilterCriteria, FilterField, FilterState, FilterableCollection, ResultSummary};
use crate::model::{
    party_rollups, BillPassPrediction, BillRecord, BillSpeeches, DashboardStats, FilterOptions,
    GroupSummary, LegislatorBills, LegislatorDetail, LegislatorRecord, MemberBill, PartyRollup,
    UnifiedSearchResponse, UserDashboard,
};
use crate::routes::Route;
use crate::session::dto::UserOut;
use crate::session::{AuthSession, TokenStore};
use crossterm::event::KeyCode;
use log::warn;
use ratatui::widgets::ListState;
use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;
use tokio::sync::mpsc;

#[derive(PartialEq, Debug, Clone)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(PartialEq, Debug, Clone)]
pub enum FocusArea {
    Menu,     // 左侧菜单
    Filters,  // 筛选面板
    MainView, // 主视图
}

/// 后台返回的数据
#[derive(Debug)]
pub enum Fetched {
    Legislators(Vec<LegislatorRecord>),
    Options(FilterOptions),
    Detail(LegislatorDetail),
    Bills(LegislatorBills),
    Speeches(BillSpeeches),
    Bill(BillRecord, Option<String>),
    Prediction(BillPassPrediction),
    Party(GroupSummary),
    Committee(GroupSummary),
    Stats(DashboardStats),
    Dashboard(UserDashboard),
    Search(UnifiedSearchResponse),
    LoggedIn(AuthSession),
    Registered(UserOut),
}

impl Fetched {
    pub fn slot(&self) -> FetchSlot {
        match self {
            Fetched::Legislators(_) => FetchSlot::Legislators,
            Fetched::Options(_) => FetchSlot::Options,
            Fetched::Detail(_) => FetchSlot::Detail,
            Fetched::Bills(_) => FetchSlot::Bills,
            Fetched::Speeches(_) => FetchSlot::Speeches,
            Fetched::Bill(..) => FetchSlot::BillAnalysis,
            Fetched::Prediction(_) => FetchSlot::Prediction,
            Fetched::Party(_) => FetchSlot::Party,
            Fetched::Committee(_) => FetchSlot::Committee,
            Fetched::Stats(_) => FetchSlot::Stats,
            Fetched::Dashboard(_) => FetchSlot::Dashboard,
            Fetched::Search(_) => FetchSlot::Search,
            Fetched::LoggedIn(_) | Fetched::Registered(_) => FetchSlot::Auth,
        }
    }
}

#[derive(Debug)]
pub enum AppEvent {
    Log(String),
    Message(String),
    Error(String),
    Fetched {
        generation: u64,
        data: Fetched,
    },
    Failed {
        slot: FetchSlot,
        generation: u64,
        message: String,
        unauthorized: bool,
    },
}

/// 列表页上显示的筛选字段
pub const LIST_FILTER_FIELDS: [FilterField; 9] = [
    FilterField::Name,
    FilterField::Party,
    FilterField::City,
    FilterField::District,
    FilterField::Committee,
    FilterField::Gender,
    FilterField::AgeBracket,
    FilterField::ElectedCount,
    FilterField::ElectedMethod,
];

pub struct App {
    pub route: Route,
    pub input_mode: InputMode,
    pub focus_area: FocusArea,
    pub menu_selected_index: usize,

    // 议员列表与筛选
    pub filter: FilterState,
    pub filter_field_index: usize,
    pub filter_options: FilterOptions,
    pub legislators: FilterableCollection<LegislatorRecord>,
    pub visible: Vec<LegislatorRecord>,
    pub summary: ResultSummary,
    pub selected_index: usize,
    pub list_state: ListState,

    // 议员详情
    pub selected_member: Option<String>,
    pub detail: Option<LegislatorDetail>,
    pub member_bills: FilterableCollection<MemberBill>,
    pub bill_filter: FilterState,
    pub visible_bills: Vec<MemberBill>,
    pub ai_summary: Option<String>,
    pub bill_selected: usize,
    pub speeches: Option<BillSpeeches>,

    // 其余页面
    pub bill: Option<BillRecord>,
    pub bill_message: Option<String>,
    pub prediction: Option<BillPassPrediction>,
    pub party_rollups: Vec<PartyRollup>,
    pub party_selected: usize,
    pub party: Option<GroupSummary>,
    pub committee: Option<GroupSummary>,
    pub stats: Option<DashboardStats>,
    pub my_dashboard: Option<UserDashboard>,
    pub search: Option<UnifiedSearchResponse>,

    pub auth: Option<AuthSession>,
    pub tokens: TokenStore,
    pub loading: HashSet<FetchSlot>,
    pub tracker: RequestTracker,

    pub detail_scroll: u16,
    pub command_input: String,
    pub command_cursor: usize,
    pub command_history: Vec<String>,
    pub command_history_index: Option<usize>,
    pub log_messages: Vec<String>,
    pub cmd_tx: mpsc::UnboundedSender<FetchCommand>,
    pub evt_rx: Option<mpsc::UnboundedReceiver<AppEvent>>,
}

impl App {
    pub fn new(
        session_info: Vec<String>,
        auth: Option<AuthSession>,
        tokens: TokenStore,
        cmd_tx: mpsc::UnboundedSender<FetchCommand>,
        evt_rx: mpsc::UnboundedReceiver<AppEvent>,
    ) -> App {
        let mut log_messages = vec!["앱이 시작되었습니다".to_string()];
        log_messages.extend(session_info);

        App {
            route: Route::Home,
            input_mode: InputMode::Normal,
            focus_area: FocusArea::Menu,
            menu_selected_index: 0,
            filter: FilterState::new(),
            filter_field_index: 0,
            filter_options: FilterOptions::default(),
            legislators: FilterableCollection::default(),
            visible: Vec::new(),
            summary: ResultSummary::default(),
            selected_index: 0,
            list_state: {
                let mut s = ListState::default();
                s.select(Some(0));
                s
            },
            selected_member: None,
            detail: None,
            member_bills: FilterableCollection::default(),
            bill_filter: FilterState::new(),
            visible_bills: Vec::new(),
            ai_summary: None,
            bill_selected: 0,
            speeches: None,
            bill: None,
            bill_message: None,
            prediction: None,
            party_rollups: Vec::new(),
            party_selected: 0,
            party: None,
            committee: None,
            stats: None,
            my_dashboard: None,
            search: None,
            auth,
            tokens,
            loading: HashSet::new(),
            tracker: RequestTracker::new(),
            detail_scroll: 0,
            command_input: String::new(),
            command_cursor: 0,
            command_history: Vec::new(),
            command_history_index: None,
            log_messages,
            cmd_tx,
            evt_rx: Some(evt_rx),
        }
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth.is_some()
    }

    pub fn is_loading(&self, slot: FetchSlot) -> bool {
        self.loading.contains(&slot)
    }

    /// 发起请求：推进该 slot 的代号并交给后台
    pub fn request(&mut self, request: ApiRequest) {
        let slot = request.slot();
        let generation = self.tracker.begin(slot);
        self.loading.insert(slot);
        let _ = self.cmd_tx.send(FetchCommand {
            generation,
            request,
        });
    }

    // ---------------------------------------------------------------
    // 导航
    // ---------------------------------------------------------------

    pub fn navigate(&mut self, route: Route) {
        let target = route.resolve(self.is_logged_in());
        if target != route {
            self.add_log(format!("{} 페이지는 로그인이 필요합니다", route.label()));
        }
        self.route = target;
        self.detail_scroll = 0;
        if let Some(i) = Route::MENU.iter().position(|r| *r == target) {
            self.menu_selected_index = i;
        }

        match target {
            Route::Home => {
                if self.stats.is_none() {
                    self.request(ApiRequest::DashboardStats);
                }
            }
            Route::SentimentPage | Route::SentimentMember | Route::PartyMembers => {
                self.ensure_legislators();
            }
            Route::SentimentParty => {
                self.ensure_legislators();
                self.party_rollups = party_rollups(self.legislators.snapshot());
            }
            Route::Dashboard => {
                if let Some(auth) = self.auth.clone() {
                    self.request(ApiRequest::MyDashboard(auth));
                }
            }
            _ => {}
        }
    }

    fn ensure_legislators(&mut self) {
        if self.legislators.is_empty() && !self.is_loading(FetchSlot::Legislators) {
            self.request(ApiRequest::Legislators);
            self.request(ApiRequest::FilterOptions);
        }
    }

    /// 打开议员详情：详情和法案列表各自独立加载
    pub fn open_member(&mut self, member_id: String) {
        self.selected_member = Some(member_id.clone());
        self.detail = None;
        self.member_bills = FilterableCollection::default();
        self.visible_bills.clear();
        self.ai_summary = None;
        self.bill_selected = 0;
        self.route = Route::PersonView;
        self.detail_scroll = 0;
        self.request(ApiRequest::Detail {
            member_id: member_id.clone(),
        });
        self.request(ApiRequest::Bills { member_id });
    }

    pub fn open_speeches(&mut self, member_id: String, bill_id: String) {
        self.speeches = None;
        self.route = Route::BillSpeeches;
        self.detail_scroll = 0;
        self.request(ApiRequest::Speeches { member_id, bill_id });
    }

    /// 从政党汇总跳到该党议员列表，带上政党筛选
    pub fn open_party_members(&mut self, party: &str) {
        let criteria = FilterCriteria::new().with(FilterField::Party, party);
        self.filter = FilterState::from_criteria(criteria);
        self.apply_filters();
        self.navigate(Route::PartyMembers);
    }

    // ---------------------------------------------------------------
    // 筛选
    // ---------------------------------------------------------------

    pub fn apply_filters(&mut self) {
        let (rows, summary) = self.legislators.apply(&self.filter.to_criteria());
        self.visible = rows;
        self.summary = summary;
        self.clamp_selection();
    }

    pub fn apply_bill_filter(&mut self) {
        let (rows, _) = self.member_bills.apply(&self.bill_filter.to_criteria());
        self.visible_bills = rows;
        if self.bill_selected >= self.visible_bills.len() {
            self.bill_selected = 0;
        }
    }

    pub fn clamp_selection(&mut self) {
        if self.selected_index >= self.visible.len() {
            self.selected_index = self.visible.len().saturating_sub(1);
        }
        self.list_state.select(Some(self.selected_index));
    }

    pub fn focused_filter_field(&self) -> FilterField {
        LIST_FILTER_FIELDS[self.filter_field_index % LIST_FILTER_FIELDS.len()]
    }

    /// 字段的候选值；District 由当前选中城市下的实际数据生成
    pub fn options_for(&self, field: FilterField) -> Vec<String> {
        if field == FilterField::District {
            let Some(city) = self.filter.get(FilterField::City) else {
                return Vec::new();
            };
            let districts: BTreeSet<&str> = self
                .legislators
                .snapshot()
                .iter()
                .filter(|m| m.city() == Some(city))
                .filter_map(|m| m.district())
                .collect();
            return districts.into_iter().map(str::to_string).collect();
        }
        self.filter_options.options_for(field)
    }

    pub fn set_filter(&mut self, field: FilterField, value: Option<String>) {
        if field == FilterField::BillName {
            self.bill_filter.set_field(field, value);
            self.apply_bill_filter();
        } else {
            self.filter.set_field(field, value);
            self.apply_filters();
        }
    }

    fn cycle_focused_filter(&mut self) {
        let field = self.focused_filter_field();
        if field.is_free_text() {
            self.input_mode = InputMode::Command;
            self.command_input = format!("filter {} ", field.key());
            self.command_cursor = self.command_input.len();
            return;
        }
        let options = self.options_for(field);
        self.filter.cycle_option(field, &options);
        self.apply_filters();
    }

    // ---------------------------------------------------------------
    // 后台事件
    // ---------------------------------------------------------------

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Log(msg) | AppEvent::Message(msg) | AppEvent::Error(msg) => {
                self.log_messages.push(msg)
            }
            AppEvent::Fetched { generation, data } => {
                let slot = data.slot();
                if !self.tracker.is_current(slot, generation) {
                    log::debug!("drop stale {:?} response (gen {})", slot, generation);
                    return;
                }
                self.loading.remove(&slot);
                self.apply_fetched(data);
            }
            AppEvent::Failed {
                slot,
                generation,
                message,
                unauthorized,
            } => {
                if !self.tracker.is_current(slot, generation) {
                    return;
                }
                self.loading.remove(&slot);
                self.log_messages.push(message);
                if unauthorized && self.auth.is_some() {
                    self.forget_session();
                    if self.route.is_protected() {
                        self.navigate(Route::Login);
                    }
                }
            }
        }
    }

    fn apply_fetched(&mut self, data: Fetched) {
        match data {
            Fetched::Legislators(rows) => {
                self.add_log(format!("의원 {}명을 불러왔습니다", rows.len()));
                self.legislators = FilterableCollection::new(rows);
                self.apply_filters();
                self.party_rollups = party_rollups(self.legislators.snapshot());
            }
            Fetched::Options(options) => self.filter_options = options,
            Fetched::Detail(detail) => self.detail = Some(detail),
            Fetched::Bills(bills) => {
                self.ai_summary = bills.ai_summary;
                self.member_bills = FilterableCollection::new(bills.bills);
                self.apply_bill_filter();
            }
            Fetched::Speeches(speeches) => self.speeches = Some(speeches),
            Fetched::Bill(record, message) => {
                self.bill = Some(record);
                self.bill_message = message;
            }
            Fetched::Prediction(p) => self.prediction = Some(p),
            Fetched::Party(s) => self.party = Some(s),
            Fetched::Committee(s) => self.committee = Some(s),
            Fetched::Stats(s) => self.stats = Some(s),
            Fetched::Dashboard(d) => self.my_dashboard = Some(d),
            Fetched::Search(r) => self.search = Some(r),
            Fetched::LoggedIn(auth) => {
                self.add_log(format!("{}님 로그인되었습니다", auth.display_name()));
                if let Err(e) = self.tokens.save(&auth) {
                    warn!("failed to persist token: {}", e);
                }
                // 旧 token 发出的请求不再算数
                self.tracker.invalidate(FetchSlot::Dashboard);
                self.loading.remove(&FetchSlot::Dashboard);
                self.auth = Some(auth);
                if self.route == Route::Login || self.route == Route::Register {
                    self.navigate(Route::Dashboard);
                }
            }
            Fetched::Registered(user) => {
                self.add_log(format!("회원가입 완료: {}", user.email));
                self.navigate(Route::Login);
            }
        }
    }

    /// 清掉内存和磁盘上的会话，并作废还在路上的个人面板请求
    fn forget_session(&mut self) {
        self.auth = None;
        self.my_dashboard = None;
        self.tracker.invalidate(FetchSlot::Dashboard);
        self.loading.remove(&FetchSlot::Dashboard);
        if let Err(e) = self.tokens.clear() {
            warn!("failed to remove token file: {}", e);
        }
    }

    // ---------------------------------------------------------------
    // 命令
    // ---------------------------------------------------------------

    /// 执行命令，返回 true 表示退出
    pub fn execute(&mut self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::Filter { field, value } => self.set_filter(field, value),
            AppCommand::Reset => {
                self.filter.reset();
                self.bill_filter.reset();
                self.apply_filters();
                self.apply_bill_filter();
            }
            AppCommand::Reload => {
                self.request(ApiRequest::Legislators);
                self.request(ApiRequest::FilterOptions);
            }
            AppCommand::Member { member_id } => self.open_member(member_id),
            AppCommand::Speeches { member_id, bill_id } => self.open_speeches(member_id, bill_id),
            AppCommand::AnalyzeBill(req) => {
                if req.clone().normalized().is_empty() {
                    self.add_log("검색 조건을 입력해 주세요".to_string());
                    return false;
                }
                self.bill = None;
                self.bill_message = None;
                self.route = Route::SentimentBill;
                self.request(ApiRequest::AnalyzeBill(req));
            }
            AppCommand::BillDetail { bill_id } => {
                self.bill = None;
                self.bill_message = None;
                self.route = Route::BillView;
                self.request(ApiRequest::BillDetail { bill_id });
            }
            AppCommand::Predict { keyword } => {
                self.prediction = None;
                self.route = Route::BillPrediction;
                self.request(ApiRequest::Predict { keyword });
            }
            AppCommand::Party { party_id } => {
                self.party = None;
                self.navigate(Route::SentimentParty);
                self.request(ApiRequest::Party { party_id });
            }
            AppCommand::Committee { committee_id } => {
                self.committee = None;
                self.navigate(Route::SentimentCommittee);
                self.request(ApiRequest::Committee { committee_id });
            }
            AppCommand::Stats => {
                self.route = Route::Home;
                self.request(ApiRequest::DashboardStats);
            }
            AppCommand::Me => self.navigate(Route::Dashboard),
            AppCommand::Search { query } => {
                self.search = None;
                self.route = Route::Home;
                self.request(ApiRequest::Search { query });
            }
            AppCommand::Login { email, password } => {
                self.route = Route::Login;
                self.request(ApiRequest::Login { email, password });
            }
            AppCommand::Register {
                email,
                username,
                password,
            } => {
                self.route = Route::Register;
                self.request(ApiRequest::Register {
                    email,
                    username,
                    password,
                });
            }
            AppCommand::Logout => {
                // 登出后才返回的登录结果直接丢弃
                self.tracker.invalidate(FetchSlot::Auth);
                self.loading.remove(&FetchSlot::Auth);
                self.forget_session();
                self.add_log("로그아웃되었습니다".to_string());
                if self.route.is_protected() {
                    self.navigate(Route::Home);
                }
            }
            AppCommand::Go(route) => self.navigate(route),
            AppCommand::Help => self.add_log(HELP_TEXT.to_string()),
            AppCommand::Quit => return true,
            AppCommand::Unknown(msg) => {
                if !msg.is_empty() {
                    self.add_log(msg);
                }
            }
        }
        false
    }

    /// 获取当前的补全建议
    pub fn get_completion_hint(&self) -> Option<String> {
        let commands = [
            "filter", "reset", "reload", "member", "speeches", "bill", "billno", "billid",
            "predict", "party", "committee", "stats", "search", "login", "logout", "register",
            "go", "help", "quit",
        ];
        let input = self.command_input.trim_start();
        if input.is_empty() {
            return None;
        }
        let parts: Vec<&str> = input.split_whitespace().collect();
        let ends_with_space = input.ends_with(' ');

        if parts.len() == 1 && !ends_with_space {
            return commands
                .iter()
                .find(|c| c.starts_with(parts[0]) && **c != parts[0])
                .map(|c| c[parts[0].len()..].to_string());
        }

        if parts[0] == "filter" {
            let cur = if ends_with_space { "" } else { parts.get(1).copied().unwrap_or("") };
            if parts.len() > 2 || (parts.len() == 2 && ends_with_space) {
                return None;
            }
            return FilterField::ALL
                .iter()
                .map(|f| f.key())
                .find(|k| k.starts_with(cur) && *k != cur)
                .map(|k| k[cur.len()..].to_string());
        }
        None
    }

    // ---------------------------------------------------------------
    // 按键
    // ---------------------------------------------------------------

    fn is_list_route(&self) -> bool {
        matches!(
            self.route,
            Route::SentimentPage | Route::SentimentMember | Route::PartyMembers
        )
    }

    fn submit_command(&mut self) -> bool {
        let cmd_owned = self.command_input.trim().to_string();
        self.command_input.clear();
        self.command_cursor = 0;
        self.input_mode = InputMode::Normal;
        if cmd_owned.is_empty() {
            return false;
        }
        self.command_history.push(cmd_owned.clone());
        self.command_history_index = None;

        let cmd = AppCommand::from_str(&cmd_owned).unwrap_or(AppCommand::Unknown(cmd_owned));
        self.execute(cmd)
    }

    pub fn handle_key_event(&mut self, key: KeyCode) -> bool {
        if self.input_mode == InputMode::Command {
            return self.handle_command_key(key);
        }

        match key {
            KeyCode::Char('/') | KeyCode::Char(':') => {
                self.input_mode = InputMode::Command;
                self.command_input.clear();
                self.command_cursor = 0;
                false
            }
            KeyCode::Char('q') => true,
            KeyCode::Left => {
                self.focus_area = match self.focus_area {
                    FocusArea::MainView if self.is_list_route() => FocusArea::Filters,
                    _ => FocusArea::Menu,
                };
                false
            }
            KeyCode::Right => {
                self.focus_area = match self.focus_area {
                    FocusArea::Menu if self.is_list_route() => FocusArea::Filters,
                    _ => FocusArea::MainView,
                };
                false
            }
            KeyCode::Up => {
                self.move_selection(-1);
                false
            }
            KeyCode::Down => {
                self.move_selection(1);
                false
            }
            KeyCode::Enter => {
                self.confirm();
                false
            }
            KeyCode::Tab => {
                if self.is_list_route() {
                    self.filter_field_index =
                        (self.filter_field_index + 1) % LIST_FILTER_FIELDS.len();
                }
                false
            }
            KeyCode::Char('f') => {
                if self.is_list_route() {
                    self.cycle_focused_filter();
                }
                false
            }
            KeyCode::Char('r') => {
                if self.is_list_route() {
                    self.filter.reset();
                    self.apply_filters();
                }
                false
            }
            KeyCode::Char('x') | KeyCode::Esc => {
                self.back();
                false
            }
            _ => false,
        }
    }

    fn back(&mut self) {
        match self.route {
            Route::PersonView => self.navigate(Route::SentimentPage),
            Route::BillSpeeches => self.route = Route::PersonView,
            Route::PartyMembers => self.navigate(Route::SentimentParty),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: i32) {
        match self.focus_area {
            FocusArea::Menu => {
                self.menu_selected_index =
                    step(self.menu_selected_index, delta, Route::MENU.len());
            }
            FocusArea::Filters => {
                self.filter_field_index =
                    step(self.filter_field_index, delta, LIST_FILTER_FIELDS.len());
            }
            FocusArea::MainView => match self.route {
                _ if self.is_list_route() => {
                    self.selected_index = step(self.selected_index, delta, self.visible.len());
                    self.list_state.select(Some(self.selected_index));
                }
                Route::PersonView => {
                    self.bill_selected = step(self.bill_selected, delta, self.visible_bills.len());
                }
                Route::SentimentParty => {
                    self.party_selected =
                        step(self.party_selected, delta, self.party_rollups.len());
                }
                _ => {
                    self.detail_scroll = if delta < 0 {
                        self.detail_scroll.saturating_sub(1)
                    } else {
                        self.detail_scroll.saturating_add(1)
                    };
                }
            },
        }
    }

    fn confirm(&mut self) {
        match self.focus_area {
            FocusArea::Menu => {
                if let Some(route) = Route::MENU.get(self.menu_selected_index).copied() {
                    self.navigate(route);
                    self.focus_area = FocusArea::MainView;
                }
            }
            FocusArea::Filters => self.cycle_focused_filter(),
            FocusArea::MainView => match self.route {
                _ if self.is_list_route() => {
                    let id = self
                        .visible
                        .get(self.selected_index)
                        .and_then(|m| m.key())
                        .map(str::to_string);
                    if let Some(id) = id {
                        self.open_member(id);
                    }
                }
                Route::PersonView => {
                    let bill_id = self
                        .visible_bills
                        .get(self.bill_selected)
                        .and_then(|b| b.id.clone().or_else(|| b.bill_number.clone()));
                    if let (Some(member), Some(bill)) = (self.selected_member.clone(), bill_id) {
                        self.open_speeches(member, bill);
                    }
                }
                Route::SentimentParty => {
                    let party = self
                        .party_rollups
                        .get(self.party_selected)
                        .map(|r| r.party.clone());
                    if let Some(party) = party {
                        self.open_party_members(&party);
                    }
                }
                _ => {}
            },
        }
    }

    fn prev_char_boundary(&self) -> Option<usize> {
        self.command_input[..self.command_cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
    }

    fn handle_command_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Enter => return self.submit_command(),
            KeyCode::Esc => {
                self.command_input.clear();
                self.command_cursor = 0;
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Tab => {
                if let Some(hint) = self.get_completion_hint() {
                    let insert = format!("{} ", hint);
                    self.command_input.insert_str(self.command_cursor, &insert);
                    self.command_cursor += insert.len();
                }
            }
            KeyCode::Up => {
                if self.command_history.is_empty() {
                    return false;
                }
                let next = match self.command_history_index {
                    None => self.command_history.len().saturating_sub(1),
                    Some(i) => i.saturating_sub(1),
                };
                self.command_history_index = Some(next);
                if let Some(cmd) = self.command_history.get(next) {
                    self.command_input = cmd.clone();
                    self.command_cursor = self.command_input.len();
                }
            }
            KeyCode::Down => {
                let Some(i) = self.command_history_index else {
                    return false;
                };
                let n = i + 1;
                if n >= self.command_history.len() {
                    self.command_history_index = None;
                    self.command_input.clear();
                    self.command_cursor = 0;
                    return false;
                }
                self.command_history_index = Some(n);
                self.command_input = self.command_history[n].clone();
                self.command_cursor = self.command_input.len();
            }
            KeyCode::Backspace => {
                let prev = self.prev_char_boundary();
                if let Some(idx) = prev {
                    self.command_input.remove(idx);
                    self.command_cursor = idx;
                }
            }
            KeyCode::Delete => {
                if self.command_cursor < self.command_input.len() {
                    self.command_input.remove(self.command_cursor);
                }
            }
            KeyCode::Left => {
                if let Some(idx) = self.prev_char_boundary() {
                    self.command_cursor = idx;
                }
            }
            KeyCode::Right => {
                if let Some(c) = self.command_input[self.command_cursor..].chars().next() {
                    self.command_cursor += c.len_utf8();
                }
            }
            KeyCode::Home => self.command_cursor = 0,
            KeyCode::End => self.command_cursor = self.command_input.len(),
            KeyCode::Char(c) => {
                self.command_input.insert(self.command_cursor, c);
                self.command_cursor += c.len_utf8();
            }
            _ => {}
        }
        false
    }
}

fn step(current: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if delta < 0 {
        current.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        (current + delta as usize).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserInfo;

    fn member(id: &str, name: &str, party: &str, region: &str) -> LegislatorRecord {
        LegislatorRecord {
            member_id: Some(id.to_string()),
            name: Some(name.to_string()),
            party: Some(party.to_string()),
            region: Some(region.to_string()),
            ..Default::default()
        }
    }

    type Harness = (App, mpsc::UnboundedReceiver<FetchCommand>, tempfile::TempDir);

    fn app() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let tokens = TokenStore::new(dir.path().join("token.json"));
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (_evt_tx, evt_rx) = mpsc::unbounded_channel();
        (App::new(Vec::new(), None, tokens, cmd_tx, evt_rx), cmd_rx, dir)
    }

    fn loaded_app() -> Harness {
        let (mut app, mut rx, dir) = app();
        app.navigate(Route::SentimentPage);
        let mut gen = 0;
        while let Ok(cmd) = rx.try_recv() {
            if cmd.request == ApiRequest::Legislators {
                gen = cmd.generation;
            }
        }
        app.handle_event(AppEvent::Fetched {
            generation: gen,
            data: Fetched::Legislators(vec![
                member("1", "김철수", "A", "서울 종로구"),
                member("2", "이영희", "B", "서울 강남구"),
                member("3", "박민수", "A", "부산 해운대구"),
            ]),
        });
        (app, rx, dir)
    }

    #[test]
    fn list_route_fetches_once() {
        let (mut app, mut rx, _dir) = app();
        app.navigate(Route::SentimentPage);
        let sent: Vec<ApiRequest> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|c| c.request)
            .collect();
        assert_eq!(sent, vec![ApiRequest::Legislators, ApiRequest::FilterOptions]);
        app.navigate(Route::SentimentPage);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn filter_workflow_through_commands() {
        let (mut app, _rx, _dir) = loaded_app();
        assert_eq!(app.summary, ResultSummary::new(3, 3));

        app.execute(AppCommand::from_str("filter party A").unwrap());
        assert_eq!(app.visible.len(), 2);
        assert_eq!(app.summary.percentage_label(), "66.67%");

        app.execute(AppCommand::from_str("filter city 서울").unwrap());
        assert_eq!(app.visible.len(), 1);
        assert_eq!(app.visible[0].name.as_deref(), Some("김철수"));

        app.execute(AppCommand::Reset);
        assert_eq!(app.visible.len(), 3);
        assert!(app.filter.is_default());
    }

    #[test]
    fn district_options_follow_city() {
        let (mut app, _rx, _dir) = loaded_app();
        assert!(app.options_for(FilterField::District).is_empty());
        app.set_filter(FilterField::City, Some("서울".into()));
        assert_eq!(app.options_for(FilterField::District), vec!["강남구", "종로구"]);
        app.set_filter(FilterField::District, Some("강남구".into()));
        app.set_filter(FilterField::City, Some("부산".into()));
        assert_eq!(app.filter.get(FilterField::District), None);
    }

    #[test]
    fn stale_response_is_dropped() {
        let (mut app, _rx, _dir) = app();
        app.open_member("1".into());
        let first = app.tracker.begin(FetchSlot::Detail) - 1;
        let second = first + 1;

        let detail = |name: &str| LegislatorDetail {
            member_id: Some(name.to_string()),
            ..Default::default()
        };
        app.handle_event(AppEvent::Fetched {
            generation: second,
            data: Fetched::Detail(detail("second")),
        });
        app.handle_event(AppEvent::Fetched {
            generation: first,
            data: Fetched::Detail(detail("first")),
        });
        assert_eq!(
            app.detail.as_ref().and_then(|d| d.member_id.as_deref()),
            Some("second")
        );
        assert!(!app.is_loading(FetchSlot::Detail));
    }

    #[test]
    fn key_driven_filter_and_open_member() {
        let (mut app, mut rx, _dir) = loaded_app();
        while rx.try_recv().is_ok() {}

        app.focus_area = FocusArea::MainView;
        app.handle_key_event(KeyCode::Tab); // Party
        assert_eq!(app.focused_filter_field(), FilterField::Party);
        app.handle_key_event(KeyCode::Char('f'));
        assert_eq!(app.filter.get(FilterField::Party), Some("더불어민주당"));
        app.handle_key_event(KeyCode::Char('r'));
        assert!(app.filter.is_default());

        app.handle_key_event(KeyCode::Down);
        app.handle_key_event(KeyCode::Enter);
        assert_eq!(app.route, Route::PersonView);
        assert_eq!(app.selected_member.as_deref(), Some("2"));
        let sent: Vec<FetchSlot> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|c| c.slot())
            .collect();
        assert_eq!(sent, vec![FetchSlot::Detail, FetchSlot::Bills]);
    }

    #[test]
    fn command_mode_round_trip() {
        let (mut app, _rx, _dir) = loaded_app();
        app.handle_key_event(KeyCode::Char('/'));
        for c in "filter name 이".chars() {
            app.handle_key_event(KeyCode::Char(c));
        }
        assert!(!app.handle_key_event(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.visible.len(), 1);
        assert_eq!(app.command_history, vec!["filter name 이".to_string()]);

        app.handle_key_event(KeyCode::Char('/'));
        for c in "quit".chars() {
            app.handle_key_event(KeyCode::Char(c));
        }
        assert!(app.handle_key_event(KeyCode::Enter));
    }

    #[test]
    fn dashboard_is_protected() {
        let (mut app, mut rx, _dir) = app();
        app.execute(AppCommand::Me);
        assert_eq!(app.route, Route::Login);
        assert!(rx.try_recv().is_err());

        app.auth = Some(AuthSession::new("tok", UserInfo::default()));
        app.execute(AppCommand::Me);
        assert_eq!(app.route, Route::Dashboard);
        assert!(matches!(
            rx.try_recv().map(|c| c.request),
            Ok(ApiRequest::MyDashboard(_))
        ));
    }

    #[test]
    fn unauthorized_clears_session() {
        let (mut app, _rx, _dir) = app();
        let expired = AuthSession::new("expired", UserInfo::default());
        app.tokens.save(&expired).unwrap();
        app.auth = Some(expired);
        app.navigate(Route::Dashboard);
        let gen = app.tracker.begin(FetchSlot::Dashboard);
        app.handle_event(AppEvent::Failed {
            slot: FetchSlot::Dashboard,
            generation: gen,
            message: "x".into(),
            unauthorized: true,
        });
        assert!(app.auth.is_none());
        assert!(app.tokens.load().unwrap().is_none());
        assert_eq!(app.route, Route::Login);
    }

    #[test]
    fn login_finishing_after_logout_is_dropped() {
        let (mut app, mut rx, _dir) = app();
        app.execute(AppCommand::Login {
            email: "kim@example.com".into(),
            password: "pw".into(),
        });
        let gen = rx.try_recv().unwrap().generation;
        app.execute(AppCommand::Logout);

        app.handle_event(AppEvent::Fetched {
            generation: gen,
            data: Fetched::LoggedIn(AuthSession::new("late", UserInfo::default())),
        });
        assert!(app.auth.is_none());
        assert!(app.tokens.load().unwrap().is_none());
    }

    #[test]
    fn old_dashboard_401_does_not_undo_new_login() {
        let (mut app, mut rx, _dir) = app();
        app.auth = Some(AuthSession::new("old", UserInfo::default()));
        app.navigate(Route::Dashboard);
        let old_gen = rx.try_recv().unwrap().generation;

        let auth_gen = app.tracker.begin(FetchSlot::Auth);
        app.handle_event(AppEvent::Fetched {
            generation: auth_gen,
            data: Fetched::LoggedIn(AuthSession::new("new", UserInfo::default())),
        });
        assert_eq!(app.tokens.load().unwrap().unwrap().access_token(), "new");

        app.handle_event(AppEvent::Failed {
            slot: FetchSlot::Dashboard,
            generation: old_gen,
            message: "x".into(),
            unauthorized: true,
        });
        assert_eq!(app.auth.as_ref().map(|a| a.access_token()), Some("new"));
        assert_eq!(app.tokens.load().unwrap().unwrap().access_token(), "new");
        assert_eq!(app.route, Route::Dashboard);
    }

    #[test]
    fn party_rollup_opens_filtered_members() {
        let (mut app, _rx, _dir) = loaded_app();
        app.navigate(Route::SentimentParty);
        assert_eq!(app.party_rollups[0].party, "A");
        app.focus_area = FocusArea::MainView;
        app.handle_key_event(KeyCode::Enter);
        assert_eq!(app.route, Route::PartyMembers);
        assert_eq!(app.filter.get(FilterField::Party), Some("A"));
        assert_eq!(app.visible.len(), 2);
    }
}
