//! Semantic classification of answer strings.
//!
//! Distractors are only plausible when they are the same *kind* of thing as
//! the correct answer (a person among people, a treaty among treaties). The
//! classifier maps an answer string to one of nine coarse kinds: a curated
//! dictionary of known proper nouns first, then ordered suffix rules, then a
//! catch-all default.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Coarse semantic kind of an answer, used to bucket distractor pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerKind {
    Person,
    Place,
    Event,
    Document,
    Law,
    Concept,
    Group,
    Technical,
    Country,
}

impl AnswerKind {
    /// Every kind, in a stable order.
    pub const ALL: [Self; 9] = [
        Self::Person,
        Self::Place,
        Self::Event,
        Self::Document,
        Self::Law,
        Self::Concept,
        Self::Group,
        Self::Technical,
        Self::Country,
    ];
}

/// Curated kinds for proper nouns and terms the suffix rules cannot catch.
static KNOWN_ANSWERS: LazyLock<HashMap<&'static str, AnswerKind>> = LazyLock::new(|| {
    const ENTRIES: &[(AnswerKind, &[&str])] = &[
        (
            AnswerKind::Person,
            &[
                // イスラーム系
                "ムハンマド",
                "アブー=バクル",
                "ウマル",
                "ウスマン",
                "アリー",
                "ムアーウィヤ",
                "アブー=アルアッバース",
                "マンスール",
                "ハールーン=アッラシード",
                "タバリー",
                "フワーリズミー",
                "イブン=シーナー",
                // ヨーロッパ系
                "クローヴィス",
                "ピピン(小ピピン)",
                "カール大帝(シャルルマーニュ)",
                "アルクィン",
                "レオ3世",
                "オットー1世",
                "ユーグ=カペー",
                "ロロ",
                "ルッジェーロ2世",
                "エグバート",
                "アルフレッド大王",
                "クヌート(カヌート)",
                "ウィリアム1世",
                "リューリク",
                "アッティラ",
                "オドアケル",
                "テオドリック大王",
            ],
        ),
        (
            AnswerKind::Place,
            &[
                "メッカ(マッカ)",
                "メディナ",
                "ダマスクス",
                "バグダード",
                "コルドバ",
                "カイロ",
                "ブハラ",
                "アーヘン",
                "ノルマンディー公国",
                "アイスランド",
                "グリーンランド",
                "パンノニア",
                "ラヴェンナ地方",
            ],
        ),
        (
            AnswerKind::Event,
            &[
                "ヒジュラ(聖遷)",
                "ニハーヴァンドの戦い",
                "タラス河畔の戦い",
                "トゥール・ポワティエ間の戦い",
                "カールの戴冠",
                "教会の東西分裂",
                "ノルマン=コンクェスト",
                "ヘースティングズの戦い",
                "カタラウヌムの戦い",
                "ピピンの寄進",
            ],
        ),
        (
            AnswerKind::Document,
            &[
                "『コーラン』(『クルアーン』)",
                "ハディース",
                "『千夜一夜物語』(『アラビアン=ナイト』)",
                "『医学典範』",
                "『ガリア戦記』",
                "『ゲルマニア』",
                "『ローマ法大全』",
            ],
        ),
        (
            AnswerKind::Law,
            &[
                "シャリーア",
                "イスラーム法(シャリーア)",
                "聖像禁止令",
                "ヴェルダン条約",
                "メルセン条約",
            ],
        ),
        (
            AnswerKind::Concept,
            &[
                "カリフ",
                "ウンマ",
                "ジハード(聖戦)",
                "ハラージュ",
                "ジズヤ",
                "アター",
                "ワクフ",
                "封建社会",
                "荘園",
                "恩貸地制度",
                "従士制",
                "賦役",
                "貢納",
                "不輸不入権(インムニテート)",
                "騎士道精神",
                "イタリア政策",
            ],
        ),
        (
            AnswerKind::Group,
            &[
                "ウマイヤ朝",
                "アッバース朝",
                "シーア派",
                "スンナ派(スンニー派)",
                "後ウマイヤ朝",
                "ファーティマ朝",
                "ブワイフ朝",
                "クライシュ族",
                "メロヴィング朝",
                "カロリング朝",
                "カペー朝",
                "ノルマン朝",
                "ザクセン家",
                "神聖ローマ帝国",
                "アングロ=サクソン人",
                "ノルマン人",
            ],
        ),
        (
            AnswerKind::Technical,
            &[
                "アラビア数字",
                "アラベスク",
                "製紙法",
                "ゼロの概念",
                "養蚕技術",
                "絹織物産業",
            ],
        ),
    ];

    ENTRIES
        .iter()
        .flat_map(|(kind, answers)| answers.iter().map(|a| (*a, *kind)))
        .collect()
});

/// One structural classification rule: an answer matches when it ends with
/// any of `suffixes` or contains any of `infixes`.
struct KindRule {
    kind: AnswerKind,
    suffixes: &'static [&'static str],
    infixes: &'static [&'static str],
}

impl KindRule {
    fn matches(&self, answer: &str) -> bool {
        self.suffixes.iter().any(|s| answer.ends_with(s))
            || self.infixes.iter().any(|i| answer.contains(i))
    }
}

/// Evaluated top to bottom; the first hit wins, so 〜法 reads as a law
/// before the technical rule can see it.
const KIND_RULES: &[KindRule] = &[
    KindRule {
        kind: AnswerKind::Group,
        suffixes: &["朝", "家", "派", "王国", "軍", "一族"],
        infixes: &[],
    },
    KindRule {
        kind: AnswerKind::Law,
        suffixes: &["法", "条約", "令", "法規"],
        infixes: &[],
    },
    KindRule {
        kind: AnswerKind::Event,
        suffixes: &["の戦い", "変", "事件", "運動", "大移動"],
        infixes: &[],
    },
    KindRule {
        kind: AnswerKind::Document,
        suffixes: &["書", "記", "典"],
        infixes: &["『"],
    },
    KindRule {
        kind: AnswerKind::Place,
        suffixes: &["市", "地方", "半島", "島", "都"],
        infixes: &[],
    },
    KindRule {
        kind: AnswerKind::Concept,
        suffixes: &["制", "権", "税", "道", "者"],
        infixes: &[],
    },
    KindRule {
        kind: AnswerKind::Technical,
        suffixes: &["法", "技術", "数字", "様式"],
        infixes: &[],
    },
];

/// Classify an answer string into its semantic kind.
///
/// Pure and deterministic: the curated dictionary is consulted first, then
/// the ordered structural rules, and anything unmatched falls back to
/// [`AnswerKind::Concept`].
#[must_use]
pub fn classify(answer: &str) -> AnswerKind {
    if let Some(kind) = KNOWN_ANSWERS.get(answer) {
        return *kind;
    }
    KIND_RULES
        .iter()
        .find(|rule| rule.matches(answer))
        .map_or(AnswerKind::Concept, |rule| rule.kind)
}
