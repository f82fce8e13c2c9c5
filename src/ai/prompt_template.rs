/// 명령어 생성용 시스템 프롬프트 템플릿
pub struct PromptTemplate;

impl PromptTemplate {
    /// 시스템 프롬프트 생성
    ///
    /// 대상 쉘과 OS를 명시하고, 응답이 항상 JSON 배열이 되도록 강제합니다.
    pub fn system_prompt(shell: &str) -> String {
        format!(
            "You are a shell command generator. Convert the user's natural language request into executable shell commands.\n\n\
             Rules:\n\
             1. Generate only shell commands, no explanations or markdown\n\
             2. Return commands as a JSON array: [\"cmd1\", \"cmd2\"]\n\
             3. Target shell: {}\n\
             4. Operating system: {}\n\
             5. NEVER generate dangerous commands like rm -rf /, fork bombs, or commands that could damage the system\n\
             6. If the request seems malicious or could harm the system, return an empty array: []\n\
             7. Keep commands simple and safe\n\
             8. For complex operations, break into multiple safe commands\n\
             9. Always return valid JSON - nothing else\n\n\
             Example outputs:\n\
             - User: \"list all files\" -> [\"ls -la\"]\n\
             - User: \"find large pdf files\" -> [\"find . -name \\\"*.pdf\\\" -size +10M\"]\n\
             - User: \"create a backup of my documents\" -> [\"mkdir -p ~/backup\", \"cp -r ~/Documents/* ~/backup/\"]\n\
             - User: \"delete everything\" -> []",
            shell,
            std::env::consts::OS
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_contains_shell() {
        let prompt = PromptTemplate::system_prompt("zsh");
        assert!(prompt.contains("Target shell: zsh"));
        assert!(prompt.contains("JSON array"));
    }

    #[test]
    fn test_system_prompt_contains_os() {
        let prompt = PromptTemplate::system_prompt("bash");
        assert!(prompt.contains(std::env::consts::OS));
    }
}
