use crate::error::{Result, ShaiError};
use async_trait::async_trait;
use tokio::process::Command;

/// 명령어 실행 결과 (정상 spawn된 경우)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// 쉘 실행 collaborator trait
///
/// 에러는 spawn 실패만 의미합니다. 0이 아닌 종료 코드는 정상 결과로
/// `ExecOutput`에 담겨 반환됩니다. 안전성 필터링은 호출자의 책임이며
/// 이 레이어는 어떤 차단도 하지 않습니다.
#[async_trait]
pub trait ShellAdapter: Send + Sync {
    /// 대상 쉘 이름 (bash, zsh, fish, sh)
    fn shell_name(&self) -> &str;

    /// 현재 작업 디렉토리와 상속된 환경에서 명령어 실행
    async fn execute(&self, command: &str) -> Result<ExecOutput>;
}

/// 실제 쉘 프로세스를 spawn하는 어댑터
pub struct SystemShell {
    shell: String,
}

impl SystemShell {
    pub fn new(shell: &str) -> Self {
        let shell = match shell {
            "zsh" | "fish" | "sh" => shell,
            _ => "bash",
        };
        Self {
            shell: shell.to_string(),
        }
    }
}

#[async_trait]
impl ShellAdapter for SystemShell {
    fn shell_name(&self) -> &str {
        &self.shell
    }

    async fn execute(&self, command: &str) -> Result<ExecOutput> {
        let cwd = std::env::current_dir()?;

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .output()
            .await
            .map_err(|e| ShaiError::Spawn(e.to_string()))?;

        Ok(ExecOutput {
            stdout: String::from_utf8_lossy(&output.stdout).trim_end().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

/// $SHELL 환경변수로 사용자 쉘 감지 (기본값 bash)
pub fn detect_shell() -> String {
    shell_from_path(&std::env::var("SHELL").unwrap_or_default())
}

fn shell_from_path(path: &str) -> String {
    for shell in ["zsh", "fish", "bash", "sh"] {
        if path.ends_with(&format!("/{}", shell)) {
            return shell.to_string();
        }
    }
    "bash".to_string()
}
