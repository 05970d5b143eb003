//! 進捗表示（indicatif）
//!
//! WorkflowEvent を受けて、アップロード中はバー、処理中はスピナーを表示する。
//! 通知は標準出力に1行で出す。

use aac_intake_common::{Notice, NoticeLevel, Theme, WorkflowEvent, WorkflowState};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressView {
    bar: Option<ProgressBar>,
    theme: Theme,
    quiet: bool,
}

impl ProgressView {
    pub fn new(theme: Theme) -> Self {
        Self {
            bar: None,
            theme,
            quiet: false,
        }
    }

    /// 何も表示しない（バッチ処理用）
    pub fn quiet() -> Self {
        Self {
            bar: None,
            theme: Theme::Light,
            quiet: true,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn handle(&mut self, event: &WorkflowEvent) {
        if self.quiet {
            return;
        }

        match event {
            WorkflowEvent::StateChanged { to, .. } => self.on_state(*to),
            WorkflowEvent::Progress { progress, .. } => {
                if let Some(bar) = &self.bar {
                    bar.set_position(progress.round() as u64);
                }
            }
            WorkflowEvent::Notice(notice) => self.print_notice(notice),
        }
    }

    fn on_state(&mut self, state: WorkflowState) {
        self.finish();
        match state {
            WorkflowState::Uploading => {
                let bar = ProgressBar::new(100);
                bar.set_style(self.bar_style());
                bar.set_message("アップロード中");
                self.bar = Some(bar);
            }
            WorkflowState::Processing => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(self.spinner_style());
                spinner.set_message("AI解析中...");
                spinner.enable_steady_tick(Duration::from_millis(100));
                self.bar = Some(spinner);
            }
            _ => {}
        }
    }

    fn print_notice(&self, notice: &Notice) {
        let mark = match notice.level {
            NoticeLevel::Success => "✔",
            NoticeLevel::Info => "-",
            NoticeLevel::Error => "✖",
        };
        let line = format!("{} {}: {}", mark, notice.title, notice.description);
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    }

    fn bar_style(&self) -> ProgressStyle {
        let template = if self.theme.is_dark() {
            "{msg} [{bar:40.cyan/blue}] {pos:>3}%"
        } else {
            "{msg} [{bar:40.blue/white}] {pos:>3}%"
        };
        ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }

    fn spinner_style(&self) -> ProgressStyle {
        let template = if self.theme.is_dark() {
            "{spinner:.cyan} {msg}"
        } else {
            "{spinner:.blue} {msg}"
        };
        ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// 表示中のバーを閉じる
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for ProgressView {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_view_ignores_events() {
        let mut view = ProgressView::quiet();
        view.handle(&WorkflowEvent::StateChanged {
            from: WorkflowState::Idle,
            to: WorkflowState::Uploading,
        });
        assert!(view.bar.is_none());
    }

    #[test]
    fn test_bar_lifecycle() {
        let mut view = ProgressView::new(Theme::Dark);
        view.handle(&WorkflowEvent::StateChanged {
            from: WorkflowState::Idle,
            to: WorkflowState::Uploading,
        });
        assert!(view.bar.is_some());

        view.handle(&WorkflowEvent::StateChanged {
            from: WorkflowState::Processing,
            to: WorkflowState::Complete,
        });
        assert!(view.bar.is_none());
    }
}
