use crate::error::Result;
use crate::review::selection::{
    CommandItem, ConfirmModel, SelectionEvent, SelectionModel, SelectionOutcome, SingleAction,
    SingleEvent,
};
use crate::review::Selector;
use crate::ui::prompt::{risk_colored, risk_label};
use colored::*;
use crossterm::cursor::{MoveToColumn, MoveToNextLine, MoveUp};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{queue, style::Print};
use std::io::{stdout, Write};

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
    }
}

/// 이전에 그린 블록을 지우고 새 블록을 출력하는 인플레이스 렌더러
struct BlockRenderer {
    last_lines: u16,
}

impl BlockRenderer {
    fn new() -> Self {
        Self { last_lines: 0 }
    }

    fn draw(&mut self, lines: &[String]) -> Result<()> {
        let mut out = stdout();

        if self.last_lines > 0 {
            queue!(out, MoveUp(self.last_lines))?;
        }
        queue!(out, MoveToColumn(0), Clear(ClearType::FromCursorDown))?;

        for line in lines {
            queue!(out, Print(line), MoveToNextLine(1))?;
        }

        out.flush()?;
        self.last_lines = lines.len() as u16;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.draw(&[])
    }
}

/// crossterm raw 모드로 선택 상태 기계를 구동하는 터미널 셀렉터
pub struct TerminalSelector;

impl TerminalSelector {
    pub fn new() -> Self {
        Self
    }

    fn select_single(&self, item: CommandItem, original_query: &str) -> Result<SelectionOutcome> {
        let mut model = ConfirmModel::new(item);

        if let Some(outcome) = model.blocked_outcome() {
            crate::ui::prompt::display_error("This command has been blocked for safety reasons.");
            return Ok(outcome);
        }

        enable_raw_mode()?;
        let _guard = RawModeGuard;
        let mut renderer = BlockRenderer::new();

        loop {
            renderer.draw(&render_single(&model))?;

            let Some(single_event) = map_single_event(read_key()?) else {
                continue;
            };

            if let Some(action) = model.apply(single_event) {
                renderer.clear()?;
                return Ok(match action {
                    SingleAction::Execute => SelectionOutcome::Executed(vec![model.item.text.clone()]),
                    SingleAction::Regenerate => {
                        SelectionOutcome::Regenerate(original_query.to_string())
                    }
                    SingleAction::Cancel => SelectionOutcome::Cancelled,
                });
            }
        }
    }

    fn select_list(
        &self,
        items: Vec<CommandItem>,
        original_query: &str,
    ) -> Result<SelectionOutcome> {
        let mut model = SelectionModel::new(items, original_query);

        enable_raw_mode()?;
        let _guard = RawModeGuard;
        let mut renderer = BlockRenderer::new();

        loop {
            let lines = if model.is_regenerating() {
                render_regenerate(&model)
            } else {
                render_listing(&model)
            };
            renderer.draw(&lines)?;

            let key = read_key()?;
            let event = if model.is_regenerating() {
                map_regenerate_event(key)
            } else {
                map_listing_event(key)
            };

            let Some(event) = event else { continue };

            if let Some(outcome) = model.apply(event) {
                renderer.clear()?;
                return Ok(outcome);
            }
        }
    }
}

impl Default for TerminalSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector for TerminalSelector {
    fn select(&mut self, items: Vec<CommandItem>, original_query: &str) -> Result<SelectionOutcome> {
        if items.len() == 1 {
            let item = items.into_iter().next().expect("checked length");
            self.select_single(item, original_query)
        } else {
            self.select_list(items, original_query)
        }
    }
}

fn read_key() -> Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn map_listing_event(key: KeyEvent) -> Option<SelectionEvent> {
    if is_ctrl_c(&key) {
        return Some(SelectionEvent::Cancel);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(SelectionEvent::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(SelectionEvent::CursorDown),
        KeyCode::Char(' ') => Some(SelectionEvent::Toggle),
        KeyCode::Char('a') => Some(SelectionEvent::SelectAll),
        KeyCode::Char('n') => Some(SelectionEvent::SelectNone),
        KeyCode::Char('r') => Some(SelectionEvent::BeginRegenerate),
        KeyCode::Enter => Some(SelectionEvent::Confirm),
        KeyCode::Char('q') | KeyCode::Esc => Some(SelectionEvent::Cancel),
        _ => None,
    }
}

fn map_regenerate_event(key: KeyEvent) -> Option<SelectionEvent> {
    if is_ctrl_c(&key) {
        return Some(SelectionEvent::Cancel);
    }

    match key.code {
        KeyCode::Enter => Some(SelectionEvent::Confirm),
        KeyCode::Esc => Some(SelectionEvent::Escape),
        KeyCode::Backspace => Some(SelectionEvent::Backspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(SelectionEvent::Input(c))
        }
        _ => None,
    }
}

fn map_single_event(key: KeyEvent) -> Option<SingleEvent> {
    if is_ctrl_c(&key) {
        return Some(SingleEvent::Cancel);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(SingleEvent::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(SingleEvent::CursorDown),
        KeyCode::Enter | KeyCode::Char(' ') => Some(SingleEvent::Confirm),
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(SingleEvent::Execute),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(SingleEvent::Regenerate),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
            Some(SingleEvent::Cancel)
        }
        _ => None,
    }
}

fn truncated(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// 목록 화면 렌더링 (로직과 분리된 교체 가능한 뷰)
fn render_listing(model: &SelectionModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(String::new());
    lines.push(format!(
        "{}",
        format!("Generated Commands ({})", model.items().len()).cyan().bold()
    ));

    for (i, item) in model.items().iter().enumerate() {
        let cursor = if model.cursor() == i {
            "> ".cyan().bold().to_string()
        } else {
            "  ".to_string()
        };

        let checkbox = if item.blocked {
            "[!]".red().bold().to_string()
        } else if item.selected {
            "[x]".green().to_string()
        } else {
            "[ ]".to_string()
        };

        let text = if model.cursor() == i {
            item.text.bold().to_string()
        } else {
            item.text.clone()
        };

        lines.push(format!("{}{} {}  {}", cursor, checkbox, text, risk_label(item.risk)));
    }

    lines.push(String::new());
    lines.push(
        format!("  {} of {} selected", model.selected_count(), model.items().len())
            .dimmed()
            .to_string(),
    );
    lines.push(
        "  ↑/↓: navigate • space: toggle • a: all • n: none • r: regenerate • enter: execute • q: quit"
            .dimmed()
            .to_string(),
    );

    lines
}

/// 재생성 입력 화면 렌더링
fn render_regenerate(model: &SelectionModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(String::new());
    lines.push("Refine your request".magenta().bold().to_string());
    lines.push(
        format!("  Original: \"{}\"", truncated(model.original_query(), 60))
            .dimmed()
            .to_string(),
    );
    lines.push(format!(
        "  {}",
        "Add to your request (or press Enter to retry):".cyan()
    ));
    lines.push(format!("  > {}{}", model.refinement(), "_".dimmed()));
    lines.push(String::new());
    lines.push("  enter: regenerate • esc: back".dimmed().to_string());

    lines
}

/// 단일 후보 확인 화면 렌더링
fn render_single(model: &ConfirmModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(String::new());
    lines.push("Generated command:".dimmed().to_string());
    lines.push(format!("  {}", risk_colored(&model.item.text, model.item.risk)));
    lines.push(format!("Risk: {}", risk_label(model.item.risk)));
    lines.push(String::new());

    let icons = ["▶", "↻", "×"];
    for (i, choice) in ConfirmModel::CHOICES.iter().enumerate() {
        if model.cursor() == i {
            lines.push(format!(
                "{}{} {}",
                "› ".cyan().bold(),
                icons[i].cyan(),
                choice.bold()
            ));
        } else {
            lines.push(format!("  {} {}", icons[i].dimmed(), choice));
        }
    }

    lines.push(String::new());
    lines.push(
        "↑/↓: navigate • enter: select • y: execute • r: regenerate • q: cancel"
            .dimmed()
            .to_string(),
    );

    lines
}
