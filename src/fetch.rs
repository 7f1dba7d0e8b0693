use std::collections::HashMap;

/// 界面上各自独立刷新的数据块
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchSlot {
    Legislators,
    Options,
    Detail,
    Bills,
    Speeches,
    BillAnalysis,
    Prediction,
    Party,
    Committee,
    Dashboard,
    Search,
    Stats,
    Auth,
}

/// 请求代号
///
/// 每次发起请求时该 slot 的代号加一，响应带回发起时的代号；
/// 只有与最新代号一致的响应才会被采用，晚到的旧响应直接丢弃。
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: HashMap<FetchSlot, u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, slot: FetchSlot) -> u64 {
        let gen = self.latest.entry(slot).or_insert(0);
        *gen += 1;
        *gen
    }

    pub fn is_current(&self, slot: FetchSlot, generation: u64) -> bool {
        self.latest.get(&slot).copied() == Some(generation)
    }

    /// 使该 slot 上所有在途请求失效（例如登出）
    pub fn invalidate(&mut self, slot: FetchSlot) {
        self.begin(slot);
    }
}
