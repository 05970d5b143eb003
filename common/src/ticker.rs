//! タイマー抽象
//!
//! コントローラは Ticker 経由でタイマーを開始/キャンセルし、
//! 発火は TimerToken としてコントローラに戻される。
//! 実時間の実装はCLI側（tokio）、ここには手動で進める ManualTicker を置く。

use std::time::Duration;
use uuid::Uuid;

pub type TimerId = u64;

/// タイマー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// アップロード進捗（周期）
    UploadProgress,
    /// 100%到達後の待ち（単発）
    UploadSettled,
    /// 処理完了（単発）
    ProcessingComplete,
    /// 結果表示までの待ち（単発）
    ResultReveal,
}

/// 発火スケジュール
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Interval(Duration),
    Once(Duration),
}

impl Schedule {
    pub fn period(&self) -> Duration {
        match self {
            Schedule::Interval(d) | Schedule::Once(d) => *d,
        }
    }
}

/// 発火時にコントローラへ渡されるトークン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub id: TimerId,
    pub kind: TimerKind,
    /// タイマーを開始したときのアクティブファイル
    pub file_id: Uuid,
}

/// タイマー実装
pub trait Ticker {
    fn start(&mut self, schedule: Schedule, kind: TimerKind, file_id: Uuid) -> TimerToken;
    fn cancel(&mut self, token: &TimerToken);

    fn start_interval(&mut self, period: Duration, kind: TimerKind, file_id: Uuid) -> TimerToken {
        self.start(Schedule::Interval(period), kind, file_id)
    }

    fn start_timeout(&mut self, delay: Duration, kind: TimerKind, file_id: Uuid) -> TimerToken {
        self.start(Schedule::Once(delay), kind, file_id)
    }
}

#[derive(Debug, Clone)]
struct ScheduledTimer {
    token: TimerToken,
    schedule: Schedule,
    due: Duration,
}

/// 仮想時計で動く手動タイマー
///
/// `advance` で次に期限が来るタイマーまで仮想時間を進め、そのトークンを返す。
#[derive(Debug, Default)]
pub struct ManualTicker {
    next_id: TimerId,
    now: Duration,
    timers: Vec<ScheduledTimer>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 経過した仮想時間
    pub fn elapsed(&self) -> Duration {
        self.now
    }

    /// 未キャンセルのタイマー
    pub fn active(&self) -> Vec<TimerToken> {
        self.timers.iter().map(|t| t.token).collect()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.token.id == id)
    }

    /// 次のタイマーを発火させる（期限が同じならIDの小さい順）
    pub fn advance(&mut self) -> Option<TimerToken> {
        let (index, due) = self
            .timers
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| (t.due, t.token.id))
            .map(|(i, t)| (i, t.due))?;

        self.now = due;
        let token = self.timers[index].token;

        match self.timers[index].schedule {
            Schedule::Interval(period) => self.timers[index].due = due + period,
            Schedule::Once(_) => {
                self.timers.remove(index);
            }
        }

        Some(token)
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self, schedule: Schedule, kind: TimerKind, file_id: Uuid) -> TimerToken {
        self.next_id += 1;
        let token = TimerToken {
            id: self.next_id,
            kind,
            file_id,
        };
        self.timers.push(ScheduledTimer {
            token,
            schedule,
            due: self.now + schedule.period(),
        });
        token
    }

    fn cancel(&mut self, token: &TimerToken) {
        self.timers.retain(|t| t.token.id != token.id);
    }
}
