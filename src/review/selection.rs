use crate::safety::{self, RiskLevel};

/// 재생성 입력 최대 길이
pub const MAX_REFINEMENT_LEN: usize = 200;

/// 리뷰 라운드 한 건에서의 후보 명령어
///
/// 목록은 현재 라운드가 소유하며, 재생성 시 전부 폐기되고 새로 만들어집니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandItem {
    pub text: String,
    pub risk: RiskLevel,
    pub blocked: bool,
    pub selected: bool,
}

impl CommandItem {
    /// 분류기를 거쳐 항목 생성. 차단되지 않은 명령어는 기본 선택됩니다.
    pub fn classified(text: String) -> Self {
        let classification = safety::classify(&text);
        Self {
            text,
            risk: classification.risk,
            blocked: classification.blocked,
            selected: !classification.blocked,
        }
    }
}

/// 선택 컨트롤러의 최종 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// 선택된 명령어들 (원래 순서 유지)
    Executed(Vec<String>),
    /// 정제된 질의로 재생성 요청
    Regenerate(String),
    Cancelled,
}

/// 목록 화면 입력 이벤트
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    CursorUp,
    CursorDown,
    Toggle,
    SelectAll,
    SelectNone,
    BeginRegenerate,
    Confirm,
    Cancel,
    /// 재생성 모드 전용: 문자 입력
    Input(char),
    /// 재생성 모드 전용: 뒤로 지우기
    Backspace,
    /// 재생성 모드 전용: 목록으로 복귀 (입력 폐기)
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Listing,
    Regenerating { input: String },
}

/// 후보 목록(2개 이상)용 순수 상태 기계
///
/// `(state, event) -> state` 전이만 담당하며 렌더링은 ui 레이어가
/// 별도로 수행합니다. 잘못된 플래그 조합은 Mode enum으로 원천 차단됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionModel {
    items: Vec<CommandItem>,
    cursor: usize,
    mode: Mode,
    original_query: String,
}

impl SelectionModel {
    pub fn new(items: Vec<CommandItem>, original_query: &str) -> Self {
        Self {
            items,
            cursor: 0,
            mode: Mode::Listing,
            original_query: original_query.to_string(),
        }
    }

    pub fn items(&self) -> &[CommandItem] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn original_query(&self) -> &str {
        &self.original_query
    }

    pub fn is_regenerating(&self) -> bool {
        matches!(self.mode, Mode::Regenerating { .. })
    }

    /// 재생성 모드의 현재 입력 (목록 모드에서는 빈 문자열)
    pub fn refinement(&self) -> &str {
        match &self.mode {
            Mode::Regenerating { input } => input,
            Mode::Listing => "",
        }
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|i| i.selected).count()
    }

    /// 이벤트 적용. 종료 상태에 도달하면 결과를 반환합니다.
    pub fn apply(&mut self, event: SelectionEvent) -> Option<SelectionOutcome> {
        if self.is_regenerating() {
            self.apply_regenerating(event)
        } else {
            self.apply_listing(event)
        }
    }

    fn apply_listing(&mut self, event: SelectionEvent) -> Option<SelectionOutcome> {
        match event {
            SelectionEvent::CursorUp => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            SelectionEvent::CursorDown => {
                if self.cursor + 1 < self.items.len() {
                    self.cursor += 1;
                }
            }
            SelectionEvent::Toggle => {
                if let Some(item) = self.items.get_mut(self.cursor) {
                    if !item.blocked {
                        item.selected = !item.selected;
                    }
                }
            }
            SelectionEvent::SelectAll => {
                for item in &mut self.items {
                    if !item.blocked {
                        item.selected = true;
                    }
                }
            }
            SelectionEvent::SelectNone => {
                for item in &mut self.items {
                    item.selected = false;
                }
            }
            SelectionEvent::BeginRegenerate => {
                self.mode = Mode::Regenerating {
                    input: String::new(),
                };
            }
            SelectionEvent::Confirm => {
                let selected = self
                    .items
                    .iter()
                    .filter(|i| i.selected)
                    .map(|i| i.text.clone())
                    .collect();
                return Some(SelectionOutcome::Executed(selected));
            }
            SelectionEvent::Cancel => return Some(SelectionOutcome::Cancelled),
            SelectionEvent::Input(_) | SelectionEvent::Backspace | SelectionEvent::Escape => {}
        }
        None
    }

    fn apply_regenerating(&mut self, event: SelectionEvent) -> Option<SelectionOutcome> {
        match event {
            SelectionEvent::Input(c) => {
                if let Mode::Regenerating { input } = &mut self.mode {
                    if input.chars().count() < MAX_REFINEMENT_LEN {
                        input.push(c);
                    }
                }
            }
            SelectionEvent::Backspace => {
                if let Mode::Regenerating { input } = &mut self.mode {
                    input.pop();
                }
            }
            SelectionEvent::Confirm => {
                let refined = compose_refined_query(&self.original_query, self.refinement());
                return Some(SelectionOutcome::Regenerate(refined));
            }
            SelectionEvent::Escape => {
                self.mode = Mode::Listing;
            }
            SelectionEvent::Cancel => return Some(SelectionOutcome::Cancelled),
            _ => {}
        }
        None
    }
}

/// 정제 입력이 비어 있으면 원래 질의 그대로, 아니면 ", "로 이어 붙입니다.
pub fn compose_refined_query(original: &str, refinement: &str) -> String {
    let trimmed = refinement.trim();
    if trimmed.is_empty() {
        original.to_string()
    } else {
        format!("{}, {}", original, trimmed)
    }
}

/// 단일 후보 확인 화면의 선택지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleAction {
    Execute,
    Regenerate,
    Cancel,
}

/// 단일 후보 확인 화면 입력 이벤트
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleEvent {
    CursorUp,
    CursorDown,
    Confirm,
    Execute,
    Regenerate,
    Cancel,
}

/// 후보가 정확히 하나일 때의 확인 모델 (목록 UI 없음)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmModel {
    pub item: CommandItem,
    cursor: usize,
}

impl ConfirmModel {
    pub const CHOICES: [&'static str; 3] = ["Execute", "Regenerate", "Cancel"];

    const ACTIONS: [SingleAction; 3] = [
        SingleAction::Execute,
        SingleAction::Regenerate,
        SingleAction::Cancel,
    ];

    pub fn new(item: CommandItem) -> Self {
        Self { item, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 차단된 명령어는 Execute를 제시하지 않고 즉시 취소로 단락됩니다.
    pub fn blocked_outcome(&self) -> Option<SelectionOutcome> {
        if self.item.blocked {
            Some(SelectionOutcome::Cancelled)
        } else {
            None
        }
    }

    pub fn apply(&mut self, event: SingleEvent) -> Option<SingleAction> {
        match event {
            SingleEvent::CursorUp => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            SingleEvent::CursorDown => {
                if self.cursor + 1 < Self::CHOICES.len() {
                    self.cursor += 1;
                }
            }
            SingleEvent::Confirm => return Some(Self::ACTIONS[self.cursor]),
            SingleEvent::Execute => return Some(SingleAction::Execute),
            SingleEvent::Regenerate => return Some(SingleAction::Regenerate),
            SingleEvent::Cancel => return Some(SingleAction::Cancel),
        }
        None
    }
}
