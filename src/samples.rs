//! Sample question records for testing and demonstration.
//!
//! Each sample exercises a different work type in the shape the generation
//! service returns it.

use crate::record::RawRecord;

/// Vocabulary choice with an underlined target word.
pub fn vocabulary_record() -> &'static str {
    r##"{
  "workTypeId": 1,
  "id": 1,
  "passage": "The committee decided to <u>postpone</u> the meeting until every member could attend.",
  "options": [
    {"text": "delay", "translation": "미루다"},
    {"text": "cancel", "translation": "취소하다"},
    {"text": "announce", "translation": "발표하다"},
    {"text": "arrange", "translation": "마련하다"},
    {"text": "attend", "translation": "참석하다"}
  ],
  "answer": 1,
  "translation": "위원회는 모든 구성원이 참석할 수 있을 때까지 회의를 미루기로 결정했다.",
  "explanation": "postpone은 '연기하다'라는 뜻으로 delay와 의미가 가장 가깝다."
}"##
}

/// Grammar judgement over numbered, underlined segments.
pub fn grammar_record() -> &'static str {
    r##"{
  "workTypeId": 2,
  "id": 2,
  "passage": "Many people ① <u>believe</u> that success ② <u>depends</u> on talent alone, but research ③ <u>showing</u> that steady practice ④ <u>matters</u> more than most of us ⑤ <u>expect</u>.",
  "options": ["①", "②", "③", "④", "⑤"],
  "answer": 3,
  "translation": "많은 사람들은 성공이 재능에만 달려 있다고 믿지만, 연구는 꾸준한 연습이 우리 대부분이 예상하는 것보다 더 중요하다는 것을 보여 준다.",
  "explanation": "문장의 본동사가 필요하므로 showing은 shows가 되어야 한다."
}"##
}

/// Single-word blanks, free response.
pub fn blank_word_record() -> &'static str {
    r##"{
  "workTypeId": 3,
  "id": 3,
  "blankedText": "I (_____) school because my friends are there. We (_____) lunch together every day.",
  "answers": ["like", "eat"],
  "translation": "나는 친구들이 있어서 학교를 좋아한다. 우리는 매일 함께 점심을 먹는다."
}"##
}

/// Sentence blank answered by choice.
pub fn blank_sentence_record() -> &'static str {
    r##"{
  "workTypeId": 4,
  "id": 4,
  "blankedText": "Scientists once thought the brain stopped changing after childhood. We now know that (__________), which is why adults can still learn new skills.",
  "options": [
    "the brain keeps reorganizing itself throughout life",
    "memory declines sharply after the age of twenty",
    "children learn languages faster than adults",
    "sleep has little effect on learning",
    "talent is fixed at birth"
  ],
  "answer": 1,
  "translation": "과학자들은 한때 뇌가 어린 시절 이후 변화를 멈춘다고 생각했다. 이제 우리는 뇌가 평생 동안 스스로를 재구성한다는 것을 알고 있으며, 그것이 성인도 새로운 기술을 배울 수 있는 이유이다."
}"##
}

/// Paragraph ordering.
pub fn order_record() -> &'static str {
    r##"{
  "workTypeId": 5,
  "id": 5,
  "intro": "When you plant a seed, it does not grow right away.",
  "segments": [
    "(A) Once the root is established, a small shoot pushes up toward the light.",
    "(B) First, it absorbs water and swells until its coat splits open.",
    "(C) Then a tiny root emerges and anchors the seed in the soil."
  ],
  "options": ["(A)-(C)-(B)", "(B)-(A)-(C)", "(B)-(C)-(A)", "(C)-(A)-(B)", "(C)-(B)-(A)"],
  "answer": 3,
  "translation": "씨앗을 심으면 바로 자라지 않는다. 먼저 물을 흡수해 껍질이 갈라질 때까지 부풀고, 작은 뿌리가 나와 씨앗을 흙에 고정한다. 뿌리가 자리를 잡으면 작은 싹이 빛을 향해 올라온다."
}"##
}

/// Sentence insertion.
pub fn insertion_record() -> &'static str {
    r##"{
  "workTypeId": 6,
  "id": 6,
  "givenSentence": "As a result, the town became famous for its clean streets.",
  "passage": "Ten years ago the town started a recycling program. ( ① ) Every household received three bins. ( ② ) Volunteers visited schools to explain the rules. ( ③ ) Tourists began to arrive in large numbers. ( ④ ) Today the program is copied by cities across the country. ( ⑤ )",
  "options": ["①", "②", "③", "④", "⑤"],
  "answer": 3,
  "translation": "10년 전 그 마을은 재활용 프로그램을 시작했다. 그 결과 마을은 깨끗한 거리로 유명해졌다."
}"##
}

/// Irrelevant sentence.
pub fn irrelevant_record() -> &'static str {
    r##"{
  "workTypeId": 7,
  "id": 7,
  "passage": "Regular exercise improves mood. ① It releases chemicals that reduce stress. ② It also helps people sleep better at night. ③ Many gyms offer discounts in January. ④ Better sleep, in turn, makes people feel more positive. ⑤ Even a short daily walk can make a difference.",
  "options": ["①", "②", "③", "④", "⑤"],
  "answer": 3
}"##
}

/// Topic choice.
pub fn topic_record() -> &'static str {
    r##"{
  "workTypeId": 8,
  "id": 8,
  "passage": "Honeybees share the location of food by dancing. A bee that finds flowers returns to the hive and moves in a figure-eight pattern. The angle of the dance shows the direction, and its length shows the distance.",
  "options": [
    "how bees communicate the location of food",
    "why flowers attract bees",
    "the structure of a beehive",
    "the life cycle of honeybees"
  ],
  "answer": 1,
  "translation": "꿀벌은 춤으로 먹이의 위치를 공유한다. 꽃을 찾은 벌은 벌집으로 돌아와 8자 모양으로 움직인다. 춤의 각도는 방향을, 길이는 거리를 나타낸다."
}"##
}

/// Title choice.
pub fn title_record() -> &'static str {
    r##"{
  "workTypeId": 9,
  "id": 9,
  "passage": "Before clocks were common, towns relied on church bells to mark the hours. Railways changed this: trains needed precise schedules, and local times differed from town to town. Standard time zones were created so that a timetable meant the same thing everywhere.",
  "options": [
    "How Trains Gave Us Standard Time",
    "The History of Church Bells",
    "Why Clocks Break",
    "Travelling by Train Today",
    "Life in Small Towns"
  ],
  "answer": 1
}"##
}

/// Summary completion with an (A)/(B) choice table.
pub fn summary_record() -> &'static str {
    r##"{
  "workTypeId": 10,
  "id": 10,
  "passage": "In one study, students who explained a lesson to a classmate remembered more a week later than students who simply reread it. Teaching forced them to organize the ideas in their own words.",
  "summary": "Explaining material to others leads to (A) learning because it requires learners to (B) what they know.",
  "rows": [
    ["deeper", "organize"],
    ["faster", "forget"],
    ["deeper", "repeat"],
    ["shallower", "organize"],
    ["shallower", "repeat"]
  ],
  "answer": 1,
  "translation": "한 연구에서 반 친구에게 수업 내용을 설명한 학생들은 단순히 다시 읽은 학생들보다 일주일 후 더 많이 기억했다."
}"##
}

/// Word ordering with a Korean prompt.
pub fn unscramble_record() -> &'static str {
    r##"{
  "workTypeId": 11,
  "id": 11,
  "prompt": "그녀는 내게 도서관에 가는 길을 물었다.",
  "words": ["asked", "me", "the way", "she", "to the library"],
  "answer": "She asked me the way to the library."
}"##
}

/// Passage to translate.
pub fn passage_translation_record() -> &'static str {
    r##"{
  "workTypeId": 12,
  "id": 12,
  "passage": "Octopuses can change the color and texture of their skin in less than a second. They do this to hide from predators and to surprise their prey.",
  "translation": "문어는 1초도 안 되어 피부의 색과 질감을 바꿀 수 있다. 그들은 포식자에게서 숨고 먹이를 놀라게 하기 위해 이렇게 한다."
}"##
}

/// Reference (what an underlined pronoun points to).
pub fn reference_record() -> &'static str {
    r##"{
  "workTypeId": 13,
  "id": 13,
  "passage": "Mina lent her bike to Jisu. ① <u>She</u> needed it for a trip. When ② <u>she</u> returned it, ③ <u>she</u> thanked Mina. Mina smiled because ④ <u>she</u> was happy to help. Later ⑤ <u>she</u> used the bike again herself.",
  "options": ["①", "②", "③", "④", "⑤"],
  "answer": 4
}"##
}

/// Composite session: a shared passage with mixed sub-questions.
pub fn composite_record() -> &'static str {
    r##"{
  "workTypeId": 14,
  "id": 14,
  "passage": "Coral reefs cover less than one percent of the ocean floor, yet they support about a quarter of all marine species. Rising water temperatures cause corals to lose the algae that feed them, a process called bleaching.",
  "questions": [
    {
      "workTypeId": 8,
      "id": 1,
      "passage": "Which best describes the passage?",
      "options": ["the importance and threat to coral reefs", "how algae grow", "deep-sea fishing", "ocean currents"],
      "answer": 1,
      "translation": "산호초의 중요성과 위협"
    },
    {
      "workTypeId": 3,
      "id": 2,
      "blankedText": "Rising water temperatures cause (_____).",
      "answers": ["bleaching"],
      "translation": "산호초는 해저의 1퍼센트도 안 되는 면적을 차지하지만 해양 생물 종의 약 4분의 1을 부양한다. 수온 상승은 산호가 자신에게 먹이를 주는 조류를 잃게 만드는데, 이를 백화 현상이라고 한다."
    }
  ]
}"##
}

/// All samples above, as one JSON array.
pub fn sample_batch_json() -> String {
    let records = [
        vocabulary_record(),
        grammar_record(),
        blank_word_record(),
        blank_sentence_record(),
        order_record(),
        insertion_record(),
        irrelevant_record(),
        topic_record(),
        title_record(),
        summary_record(),
        unscramble_record(),
        passage_translation_record(),
        reference_record(),
        composite_record(),
    ];
    format!("[{}]", records.join(",\n"))
}

/// The sample batch parsed into records.
pub fn sample_records() -> crate::error::Result<Vec<RawRecord>> {
    Ok(serde_json::from_str(&sample_batch_json())?)
}

/// A passage-translation record whose passage alone estimates to roughly
/// `columns` times the default column height.
pub fn long_passage_record(columns: f32) -> RawRecord {
    let sentence = "The quick brown fox jumps over the lazy dog near the river bank. ";
    let metrics = crate::metrics::LayoutMetrics::default();
    let lines_needed =
        ((metrics.column_capacity * columns - metrics.paragraph_padding) / metrics.line_height).ceil();
    let chars_needed = lines_needed as usize * metrics.chars_per_line_en;
    let passage: String = sentence.chars().cycle().take(chars_needed).collect();
    RawRecord::new(
        12,
        serde_json::json!({
            "id": 99,
            "passage": passage,
            "translation": "빠른 갈색 여우가 강둑 근처의 게으른 개를 뛰어넘는다."
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::work_type::WorkType;

    #[test]
    fn sample_batch_parses_and_covers_every_work_type() {
        let records = sample_records().unwrap();
        assert_eq!(records.len(), WorkType::ALL.len());
        for (record, wt) in records.iter().zip(WorkType::ALL) {
            assert_eq!(record.work_type_id, wt.id());
        }
    }
}
