//! The closed set of question shapes the normalizer understands.

use serde::{Deserialize, Serialize};

/// One of the known question shapes, keyed by its numeric `workTypeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum WorkType {
    Vocabulary,
    Grammar,
    BlankWord,
    BlankSentence,
    Order,
    Insertion,
    Irrelevant,
    Topic,
    Title,
    Summary,
    Unscramble,
    PassageTranslation,
    Reference,
    /// A session mixing other work types.
    Composite,
}

impl WorkType {
    pub const ALL: [WorkType; 14] = [
        WorkType::Vocabulary,
        WorkType::Grammar,
        WorkType::BlankWord,
        WorkType::BlankSentence,
        WorkType::Order,
        WorkType::Insertion,
        WorkType::Irrelevant,
        WorkType::Topic,
        WorkType::Title,
        WorkType::Summary,
        WorkType::Unscramble,
        WorkType::PassageTranslation,
        WorkType::Reference,
        WorkType::Composite,
    ];

    pub fn from_id(id: u32) -> Option<Self> {
        id.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize))
            .copied()
    }

    pub fn id(self) -> u32 {
        match self {
            WorkType::Vocabulary => 1,
            WorkType::Grammar => 2,
            WorkType::BlankWord => 3,
            WorkType::BlankSentence => 4,
            WorkType::Order => 5,
            WorkType::Insertion => 6,
            WorkType::Irrelevant => 7,
            WorkType::Topic => 8,
            WorkType::Title => 9,
            WorkType::Summary => 10,
            WorkType::Unscramble => 11,
            WorkType::PassageTranslation => 12,
            WorkType::Reference => 13,
            WorkType::Composite => 14,
        }
    }

    /// Human label printed in the question title.
    pub fn label(self) -> &'static str {
        match self {
            WorkType::Vocabulary => "어휘 선택",
            WorkType::Grammar => "어법 판단",
            WorkType::BlankWord => "빈칸 어휘",
            WorkType::BlankSentence => "빈칸 문장",
            WorkType::Order => "순서 배열",
            WorkType::Insertion => "문장 삽입",
            WorkType::Irrelevant => "무관한 문장",
            WorkType::Topic => "주제 찾기",
            WorkType::Title => "제목 찾기",
            WorkType::Summary => "요약문 완성",
            WorkType::Unscramble => "단어 배열",
            WorkType::PassageTranslation => "본문 해석",
            WorkType::Reference => "지칭 대상",
            WorkType::Composite => "종합 문제",
        }
    }

    /// Instruction used when the record does not carry its own.
    pub fn default_instruction(self) -> &'static str {
        match self {
            WorkType::Vocabulary => "다음 글의 밑줄 친 부분과 의미가 가장 가까운 것은?",
            WorkType::Grammar => "다음 글의 밑줄 친 부분 중, 어법상 틀린 것은?",
            WorkType::BlankWord => "다음 빈칸에 들어갈 알맞은 단어를 쓰시오.",
            WorkType::BlankSentence => "다음 빈칸에 들어갈 알맞은 문장을 쓰시오.",
            WorkType::Order => "주어진 글 다음에 이어질 글의 순서로 가장 적절한 것은?",
            WorkType::Insertion => "글의 흐름으로 보아, 주어진 문장이 들어가기에 가장 적절한 곳은?",
            WorkType::Irrelevant => "다음 글에서 전체 흐름과 관계 없는 문장은?",
            WorkType::Topic => "다음 글의 주제로 가장 적절한 것은?",
            WorkType::Title => "다음 글의 제목으로 가장 적절한 것은?",
            WorkType::Summary => {
                "다음 글의 내용을 한 문장으로 요약하고자 한다. 빈칸 (A), (B)에 들어갈 말로 가장 적절한 것은?"
            }
            WorkType::Unscramble => "우리말과 같은 뜻이 되도록 주어진 단어를 배열하시오.",
            WorkType::PassageTranslation => "다음 글을 읽고 해석하시오.",
            WorkType::Reference => "밑줄 친 부분이 가리키는 대상이 나머지 넷과 다른 것은?",
            WorkType::Composite => "다음 글을 읽고 물음에 답하시오.",
        }
    }
}

impl TryFrom<u32> for WorkType {
    type Error = String;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("unknown work type id {id}"))
    }
}

impl From<WorkType> for u32 {
    fn from(wt: WorkType) -> Self {
        wt.id()
    }
}
