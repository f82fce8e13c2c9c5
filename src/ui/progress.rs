use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 스피너 스타일 (명령어 생성/실행 대기 중)
///
/// 스피너 틱은 백그라운드 스레드에서 돌고, `finish_and_clear`가 "done"
/// 신호를 보낸 뒤 출력이 지워질 때까지 기다립니다. 이후 출력과
/// 섞이는 것을 막기 위해 블로킹 작업이 끝나면 반드시 먼저 스피너를
/// 정리해야 합니다.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
