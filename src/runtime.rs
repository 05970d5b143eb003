//! 実時間タイマー（tokio）
//!
//! タイマーごとにタスクを起動し、発火したトークンをチャネルで返す。
//! キャンセルはタスクのabort。チャネルに残った古いトークンは
//! コントローラ側で無視される。

use aac_intake_common::{
    Analyzer, Schedule, Ticker, TimerId, TimerKind, TimerToken, Uuid, WorkflowController,
    WorkflowEvent, WorkflowState,
};
use rand::RngCore;
use std::collections::HashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

pub struct TokioTicker {
    next_id: TimerId,
    sender: UnboundedSender<TimerToken>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioTicker {
    /// タイマーと発火トークンの受信側を作成
    pub fn new() -> (Self, UnboundedReceiver<TimerToken>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let ticker = Self {
            next_id: 0,
            sender,
            tasks: HashMap::new(),
        };
        (ticker, receiver)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }
}

impl Ticker for TokioTicker {
    fn start(&mut self, schedule: Schedule, kind: TimerKind, file_id: Uuid) -> TimerToken {
        self.next_id += 1;
        let token = TimerToken {
            id: self.next_id,
            kind,
            file_id,
        };
        let sender = self.sender.clone();

        let handle = match schedule {
            Schedule::Interval(period) => tokio::spawn(async move {
                let mut ticks = interval_at(Instant::now() + period, period);
                ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticks.tick().await;
                    if sender.send(token).is_err() {
                        break;
                    }
                }
            }),
            Schedule::Once(delay) => tokio::spawn(async move {
                sleep(delay).await;
                let _ = sender.send(token);
            }),
        };

        // 終了済みのタスクはここで掃除
        self.tasks.retain(|_, h| !h.is_finished());
        self.tasks.insert(token.id, handle);
        token
    }

    fn cancel(&mut self, token: &TimerToken) {
        if let Some(handle) = self.tasks.remove(&token.id) {
            handle.abort();
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

/// 待ち状態を抜けるまでタイマー発火を処理する
///
/// イベントは発生順に `on_event` へ渡す。
pub async fn settle<A, R, F>(
    controller: &mut WorkflowController<TokioTicker, A, R>,
    receiver: &mut UnboundedReceiver<TimerToken>,
    mut on_event: F,
) -> WorkflowState
where
    A: Analyzer,
    R: RngCore,
    F: FnMut(&WorkflowEvent),
{
    loop {
        for event in controller.drain_events() {
            on_event(&event);
        }

        if !controller.state().is_busy() {
            break;
        }

        match receiver.recv().await {
            Some(token) => {
                controller.on_timer(token);
            }
            None => break,
        }
    }

    controller.state()
}
