use crate::error::ShaiError;
use crate::executor::shell::{ExecOutput, ShellAdapter};
use crate::safety;
use crate::ui;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 명령어별 실행 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// 쉘이 spawn되어 종료까지 완료된 경우 (종료 코드와 무관)
    Completed {
        command: String,
        output: ExecOutput,
    },
    /// 실행 시점 재검사에서 차단되어 쉘을 호출하지 않은 경우
    Blocked { command: String },
    /// 쉘 프로세스 spawn 자체가 실패한 경우
    SpawnFailed { command: String, error: String },
}

/// spawn 실패 후 나머지 배치 계속 여부를 묻는 seam
pub trait ContinuePrompt: Send + Sync {
    fn confirm_continue(&self, message: &str) -> bool;
}

/// 협조적 취소 플래그. 명령어 경계에서만 검사되며 실행 중인
/// 프로세스를 강제 종료하지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 선택된 명령어들을 순차 실행하는 배치 실행기
///
/// 명령어 간 순서 의존성(mkdir 후 cp 등)이 있을 수 있으므로 절대
/// 병렬화하지 않습니다. 재시도도 하지 않습니다.
pub struct BatchRunner {
    shell: Arc<dyn ShellAdapter>,
    prompt: Box<dyn ContinuePrompt>,
    cancel: CancelFlag,
}

impl BatchRunner {
    pub fn new(shell: Arc<dyn ShellAdapter>, prompt: Box<dyn ContinuePrompt>, cancel: CancelFlag) -> Self {
        Self { shell, prompt, cancel }
    }

    /// 명령어들을 순서대로 실행하고 명령어별 결과를 반환
    ///
    /// - 차단 명령어는 선택 상태를 신뢰하지 않고 재검사하며, 쉘을 거치지 않고
    ///   spawn 실패와 동일하게 처리합니다.
    /// - 실행되지 못한 명령어(spawn 실패/차단)가 마지막이 아니면 계속 여부를
    ///   묻고, 거부하면 남은 배치를 중단합니다. 이미 실행된 명령어는
    ///   되돌리지 않습니다.
    /// - 0이 아닌 종료 코드는 경고로만 보고하고 무조건 다음 명령어로 진행합니다.
    pub async fn run(&self, commands: &[String]) -> Vec<ExecutionOutcome> {
        let total = commands.len();
        let mut outcomes = Vec::with_capacity(total);

        for (i, command) in commands.iter().enumerate() {
            if self.cancel.is_cancelled() {
                ui::prompt::display_warning("Interrupted. Remaining commands skipped.");
                break;
            }

            if safety::is_blocked(command) {
                let error = ShaiError::Blocked("not executed".to_string());
                ui::prompt::display_error(&format!("[{}/{}] {}", i + 1, total, preview(command)));
                ui::prompt::display_error(&format!("  Failed: {}", error));
                outcomes.push(ExecutionOutcome::Blocked {
                    command: command.clone(),
                });

                if i + 1 < total && !self.prompt.confirm_continue("Continue with next command?") {
                    break;
                }
                continue;
            }

            let spinner = ui::progress::create_spinner(&format!(
                "Executing {} of {}: {}",
                i + 1,
                total,
                preview(command)
            ));
            let result = self.shell.execute(command).await;
            spinner.finish_and_clear();

            match result {
                Ok(output) => {
                    ui::prompt::display_output(&output.stdout, false);
                    ui::prompt::display_output(&output.stderr, true);

                    if output.succeeded() {
                        ui::prompt::display_success(&format!(
                            "[{}/{}] {}",
                            i + 1,
                            total,
                            preview(command)
                        ));
                    } else {
                        ui::prompt::display_warning(&format!(
                            "[{}/{}] {} - exited with code {}",
                            i + 1,
                            total,
                            preview(command),
                            output.exit_code
                        ));
                    }

                    outcomes.push(ExecutionOutcome::Completed {
                        command: command.clone(),
                        output,
                    });
                }
                Err(e) => {
                    ui::prompt::display_error(&format!("[{}/{}] {}", i + 1, total, preview(command)));
                    ui::prompt::display_error(&format!("  Failed: {}", e));
                    outcomes.push(ExecutionOutcome::SpawnFailed {
                        command: command.clone(),
                        error: e.to_string(),
                    });

                    if i + 1 < total && !self.prompt.confirm_continue("Continue with next command?") {
                        break;
                    }
                }
            }
        }

        outcomes
    }
}

fn preview(command: &str) -> String {
    if command.chars().count() > 50 {
        let head: String = command.chars().take(47).collect();
        format!("{}...", head)
    } else {
        command.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, ShaiError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    /// 스크립트된 응답을 순서대로 돌려주는 mock 쉘
    struct MockShell {
        responses: Mutex<VecDeque<Result<ExecOutput>>>,
        executed: Mutex<Vec<String>>,
    }

    impl MockShell {
        fn new(responses: Vec<Result<ExecOutput>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                executed: Mutex::new(Vec::new()),
            })
        }

        fn executed(&self) -> Vec<String> {
            self.executed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ShellAdapter for MockShell {
        fn shell_name(&self) -> &str {
            "mock"
        }

        async fn execute(&self, command: &str) -> Result<ExecOutput> {
            self.executed.lock().unwrap().push(command.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ok_output(0)))
        }
    }

    struct ScriptedPrompt {
        answer: bool,
        asked: Arc<AtomicUsize>,
    }

    impl ScriptedPrompt {
        fn boxed(answer: bool) -> Box<Self> {
            Box::new(Self {
                answer,
                asked: Arc::new(AtomicUsize::new(0)),
            })
        }
    }

    impl ContinuePrompt for ScriptedPrompt {
        fn confirm_continue(&self, _message: &str) -> bool {
            self.asked.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    fn ok_output(exit_code: i32) -> ExecOutput {
        ExecOutput {
            stdout: "out".to_string(),
            stderr: String::new(),
            exit_code,
        }
    }

    fn commands(cmds: &[&str]) -> Vec<String> {
        cmds.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn test_runs_in_order() {
        let shell = MockShell::new(vec![Ok(ok_output(0)), Ok(ok_output(0)), Ok(ok_output(0))]);
        let runner = BatchRunner::new(shell.clone(), ScriptedPrompt::boxed(true), CancelFlag::new());

        let outcomes = runner.run(&commands(&["mkdir -p dst", "cp a dst", "ls dst"])).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(shell.executed(), vec!["mkdir -p dst", "cp a dst", "ls dst"]);
    }

    #[tokio::test]
    async fn test_blocked_command_never_reaches_shell() {
        let shell = MockShell::new(vec![Ok(ok_output(0))]);
        let runner = BatchRunner::new(shell.clone(), ScriptedPrompt::boxed(true), CancelFlag::new());

        let outcomes = runner.run(&commands(&["rm -rf /", "ls -la"])).await;

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(&outcomes[0], ExecutionOutcome::Blocked { command } if command == "rm -rf /"));
        assert_eq!(shell.executed(), vec!["ls -la"]);
    }

    #[tokio::test]
    async fn test_blocked_mid_batch_offers_continue_prompt() {
        let shell = MockShell::new(vec![Ok(ok_output(0))]);
        let prompt = ScriptedPrompt::boxed(true);
        let asked = prompt.asked.clone();
        let runner = BatchRunner::new(shell.clone(), prompt, CancelFlag::new());

        let outcomes = runner.run(&commands(&["rm -rf /", "ls"])).await;

        // spawn 실패와 동일하게 계속 여부를 한 번 물은 뒤 진행
        assert_eq!(asked.load(Ordering::SeqCst), 1);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(shell.executed(), vec!["ls"]);
    }

    #[tokio::test]
    async fn test_blocked_mid_batch_decline_aborts_rest() {
        let shell = MockShell::new(vec![]);
        let runner = BatchRunner::new(shell.clone(), ScriptedPrompt::boxed(false), CancelFlag::new());

        let outcomes = runner.run(&commands(&["echo a", "rm -rf /", "echo c"])).await;

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(&outcomes[1], ExecutionOutcome::Blocked { .. }));
        assert_eq!(shell.executed(), vec!["echo a"]);
    }

    #[tokio::test]
    async fn test_blocked_as_last_command_does_not_prompt() {
        let shell = MockShell::new(vec![Ok(ok_output(0))]);
        let prompt = ScriptedPrompt::boxed(false);
        let asked = prompt.asked.clone();
        let runner = BatchRunner::new(shell, prompt, CancelFlag::new());

        let outcomes = runner.run(&commands(&["echo a", "sudo rm -rf /"])).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(asked.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_nonzero_exit_does_not_halt_batch() {
        let shell = MockShell::new(vec![Ok(ok_output(1)), Ok(ok_output(0))]);
        let prompt = ScriptedPrompt::boxed(false);
        let runner = BatchRunner::new(shell.clone(), prompt, CancelFlag::new());

        let outcomes = runner.run(&commands(&["false", "echo next"])).await;

        // 계속 여부를 묻지 않고 무조건 다음 명령어 실행
        assert_eq!(outcomes.len(), 2);
        assert_eq!(shell.executed().len(), 2);
    }

    #[tokio::test]
    async fn test_spawn_failure_decline_aborts_rest() {
        let shell = MockShell::new(vec![
            Ok(ok_output(0)),
            Err(ShaiError::Spawn("no such shell".to_string())),
            Ok(ok_output(0)),
        ]);
        let runner = BatchRunner::new(shell.clone(), ScriptedPrompt::boxed(false), CancelFlag::new());

        let outcomes = runner.run(&commands(&["echo a", "broken", "echo c"])).await;

        // 세 번째 명령어는 시도조차 하지 않음
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(&outcomes[1], ExecutionOutcome::SpawnFailed { .. }));
        assert_eq!(shell.executed(), vec!["echo a", "broken"]);
    }

    #[tokio::test]
    async fn test_spawn_failure_accept_continues() {
        let shell = MockShell::new(vec![
            Err(ShaiError::Spawn("no such shell".to_string())),
            Ok(ok_output(0)),
        ]);
        let runner = BatchRunner::new(shell.clone(), ScriptedPrompt::boxed(true), CancelFlag::new());

        let outcomes = runner.run(&commands(&["broken", "echo b"])).await;

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(&outcomes[1], ExecutionOutcome::Completed { .. }));
    }

    #[tokio::test]
    async fn test_spawn_failure_on_last_command_does_not_prompt() {
        let shell = MockShell::new(vec![Err(ShaiError::Spawn("boom".to_string()))]);
        let prompt = ScriptedPrompt::boxed(false);
        let asked = prompt.asked.clone();
        let runner = BatchRunner::new(shell, prompt, CancelFlag::new());

        let outcomes = runner.run(&commands(&["broken"])).await;

        assert_eq!(outcomes.len(), 1);
        // 마지막 명령어였으므로 질문 없음
        assert_eq!(asked.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_stops_before_next_command() {
        let cancel = CancelFlag::new();
        cancel.cancel();

        let shell = MockShell::new(vec![]);
        let runner = BatchRunner::new(shell.clone(), ScriptedPrompt::boxed(true), cancel);

        let outcomes = runner.run(&commands(&["echo a", "echo b"])).await;

        assert!(outcomes.is_empty());
        assert!(shell.executed().is_empty());
    }
}
