pub mod selection;

use crate::ai::CommandGenerator;
use crate::error::Result;
use crate::executor::BatchRunner;
use crate::ui;
use std::sync::Arc;

pub use selection::{CommandItem, SelectionOutcome};

/// 선택 컨트롤러 seam. 터미널 구현은 ui::select에 있으며
/// 테스트에서는 스크립트된 구현으로 대체됩니다.
pub trait Selector {
    fn select(&mut self, items: Vec<CommandItem>, original_query: &str) -> Result<SelectionOutcome>;
}

/// 리뷰 세션 외부 루프
///
/// 생성 → 분류 → 선택 → (재생성 반복) → 배치 실행 순으로 진행합니다.
/// 명시적 취소 외에는 재생성 횟수 제한이 없습니다.
pub struct ReviewSession {
    generator: Arc<dyn CommandGenerator>,
    shell_name: String,
    selector: Box<dyn Selector>,
    runner: BatchRunner,
}

impl ReviewSession {
    pub fn new(
        generator: Arc<dyn CommandGenerator>,
        shell_name: &str,
        selector: Box<dyn Selector>,
        runner: BatchRunner,
    ) -> Self {
        Self {
            generator,
            shell_name: shell_name.to_string(),
            selector,
            runner,
        }
    }

    /// 세션 실행. 생성 실패는 이 레이어에서 재시도하지 않고 종료합니다.
    pub async fn run(&mut self, initial_query: &str) -> Result<()> {
        let mut current_query = initial_query.to_string();

        loop {
            let spinner = ui::progress::create_spinner("Generating commands...");
            let generated = self.generator.generate(&current_query, &self.shell_name).await;
            spinner.finish_and_clear();

            let commands = match generated {
                Ok(commands) => commands,
                Err(e) => {
                    ui::prompt::display_error(&e.to_string());
                    return Ok(());
                }
            };

            if commands.is_empty() {
                ui::prompt::display_warning(
                    "No commands generated. The request may be unclear or potentially unsafe.",
                );
                return Ok(());
            }

            let items: Vec<CommandItem> =
                commands.into_iter().map(CommandItem::classified).collect();

            match self.selector.select(items, &current_query)? {
                SelectionOutcome::Cancelled => {
                    ui::prompt::display_warning("Execution cancelled.");
                    return Ok(());
                }
                SelectionOutcome::Regenerate(refined_query) => {
                    current_query = refined_query;
                }
                SelectionOutcome::Executed(selected) => {
                    if selected.is_empty() {
                        ui::prompt::display_warning("No commands selected.");
                        return Ok(());
                    }
                    self.runner.run(&selected).await;
                    return Ok(());
                }
            }
        }
    }
}
