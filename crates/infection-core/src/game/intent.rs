use serde::{Deserialize, Serialize};

/// User intents issued by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    AdjustDeckCount { city: String, delta: i64 },
    SetDeckCount { city: String, count: u32 },
    AddCity { name: String },
    AdjustRoundCount { round: usize, city: String, delta: i64 },
    SetRoundCount { round: usize, city: String, count: u32 },
    /// +1 on the open round.
    RecordDraw { city: String },
    /// -1 on the open round.
    RetractDraw { city: String },
    DeclareEpidemic,
    /// `None` cancels the pending selection.
    SelectEpidemicCity { city: Option<String> },
    CancelEpidemicSelection,
    UndoLastEpidemic,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::AdjustDeckCount { .. } => "adjust_deck_count",
            Intent::SetDeckCount { .. } => "set_deck_count",
            Intent::AddCity { .. } => "add_city",
            Intent::AdjustRoundCount { .. } => "adjust_round_count",
            Intent::SetRoundCount { .. } => "set_round_count",
            Intent::RecordDraw { .. } => "record_draw",
            Intent::RetractDraw { .. } => "retract_draw",
            Intent::DeclareEpidemic => "declare_epidemic",
            Intent::SelectEpidemicCity { .. } => "select_epidemic_city",
            Intent::CancelEpidemicSelection => "cancel_epidemic_selection",
            Intent::UndoLastEpidemic => "undo_last_epidemic",
        }
    }
}
