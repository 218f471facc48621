// crates/campus-care-server/src/assessment/instruments.rs
// Questionnaire catalogs and severity band tables

use campus_care_types::{Instrument, InstrumentInfo, QuestionInfo, SeverityTier};

/// One questionnaire item
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: u32,
    pub prompt: &'static str,
    pub category: &'static str,
}

/// Scores up to and including `upper` fall in `tier`; `None` is the open top band
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub upper: Option<u32>,
    pub tier: SeverityTier,
    pub guidance: &'static str,
}

/// Static definition of an instrument
#[derive(Debug)]
pub struct InstrumentSpec {
    pub instrument: Instrument,
    pub name: &'static str,
    pub instructions: &'static str,
    pub min_response: u32,
    pub max_response: u32,
    pub scale_labels: &'static [&'static str],
    /// Category order used for the breakdown
    pub categories: &'static [&'static str],
    pub questions: &'static [Question],
    /// Ordered by ascending `upper`
    pub bands: &'static [Band],
}

impl InstrumentSpec {
    pub fn max_score(&self) -> u32 {
        self.questions.len() as u32 * self.max_response
    }

    /// First band whose upper bound admits the score
    pub fn band_for(&self, total: u32) -> &Band {
        self.bands
            .iter()
            .find(|band| band.upper.is_none_or(|upper| total <= upper))
            .unwrap_or(&self.bands[self.bands.len() - 1])
    }

    pub fn questions_in(&self, category: &str) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.category == category)
    }

    /// Catalog as sent to front-ends
    pub fn info(&self) -> InstrumentInfo {
        InstrumentInfo {
            instrument: self.instrument,
            name: self.name.to_string(),
            instructions: self.instructions.to_string(),
            min_response: self.min_response,
            max_response: self.max_response,
            scale_labels: self.scale_labels.iter().map(|s| s.to_string()).collect(),
            questions: self
                .questions
                .iter()
                .map(|q| QuestionInfo {
                    id: q.id,
                    prompt: q.prompt.to_string(),
                    category: q.category.to_string(),
                })
                .collect(),
        }
    }
}

/// Look up the static definition for an instrument
pub fn instrument_spec(instrument: Instrument) -> &'static InstrumentSpec {
    match instrument {
        Instrument::Who5 => &WHO5,
        Instrument::Gad7 => &GAD7,
        Instrument::Phq9 => &PHQ9,
    }
}

const FREQUENCY_LABELS: &[&str] = &[
    "Not at all",
    "Several days",
    "More than half the days",
    "Nearly every day",
];

// ═══════════════════════════════════════
// WHO-5
// ═══════════════════════════════════════

static WHO5: InstrumentSpec = InstrumentSpec {
    instrument: Instrument::Who5,
    name: "WHO-5 Well-Being Index",
    instructions: "Over the last two weeks, how often have you felt the following?",
    min_response: 0,
    max_response: 5,
    scale_labels: &[
        "At no time",
        "Some of the time",
        "Less than half of the time",
        "More than half of the time",
        "Most of the time",
        "All of the time",
    ],
    categories: &["Mood", "Vitality", "Interest"],
    questions: &[
        Question { id: 1, prompt: "I have felt cheerful and in good spirits", category: "Mood" },
        Question { id: 2, prompt: "I have felt calm and relaxed", category: "Mood" },
        Question { id: 3, prompt: "I have felt active and vigorous", category: "Vitality" },
        Question { id: 4, prompt: "I woke up feeling fresh and rested", category: "Vitality" },
        Question {
            id: 5,
            prompt: "My daily life has been filled with things that interest me",
            category: "Interest",
        },
    ],
    bands: &[
        Band {
            upper: Some(8),
            tier: SeverityTier::Low,
            guidance: "Your well-being has been low lately. Talking to a counselor can really help.",
        },
        Band {
            upper: Some(16),
            tier: SeverityTier::Moderate,
            guidance: "Your well-being is moderate. Small routines like sleep, movement and time with friends can lift it.",
        },
        Band {
            upper: None,
            tier: SeverityTier::Good,
            guidance: "Your well-being looks good. Keep doing what is working for you.",
        },
    ],
};

// ═══════════════════════════════════════
// GAD-7
// ═══════════════════════════════════════

static GAD7: InstrumentSpec = InstrumentSpec {
    instrument: Instrument::Gad7,
    name: "GAD-7 Anxiety Scale",
    instructions: "Over the last two weeks, how often have you been bothered by the following problems?",
    min_response: 0,
    max_response: 3,
    scale_labels: FREQUENCY_LABELS,
    categories: &["Worry", "Tension", "Irritability", "Apprehension"],
    questions: &[
        Question { id: 1, prompt: "Feeling nervous, anxious, or on edge", category: "Worry" },
        Question { id: 2, prompt: "Not being able to stop or control worrying", category: "Worry" },
        Question { id: 3, prompt: "Worrying too much about different things", category: "Worry" },
        Question { id: 4, prompt: "Trouble relaxing", category: "Tension" },
        Question { id: 5, prompt: "Being so restless that it is hard to sit still", category: "Tension" },
        Question { id: 6, prompt: "Becoming easily annoyed or irritable", category: "Irritability" },
        Question { id: 7, prompt: "Feeling afraid, as if something awful might happen", category: "Apprehension" },
    ],
    bands: &[
        Band {
            upper: Some(4),
            tier: SeverityTier::Minimal,
            guidance: "Minimal anxiety. Keep an eye on how you feel around exams and deadlines.",
        },
        Band {
            upper: Some(9),
            tier: SeverityTier::Mild,
            guidance: "Mild anxiety. Relaxation exercises and the resource library may help.",
        },
        Band {
            upper: Some(14),
            tier: SeverityTier::Moderate,
            guidance: "Moderate anxiety. Consider booking a session with a campus counselor.",
        },
        Band {
            upper: None,
            tier: SeverityTier::Severe,
            guidance: "Severe anxiety. Please reach out to a counselor soon; you do not have to manage this alone.",
        },
    ],
};

// ═══════════════════════════════════════
// PHQ-9
// ═══════════════════════════════════════

/// PHQ-9 item asking about thoughts of self-harm
pub const PHQ9_SELF_HARM_ITEM: u32 = 9;

static PHQ9: InstrumentSpec = InstrumentSpec {
    instrument: Instrument::Phq9,
    name: "PHQ-9 Depression Questionnaire",
    instructions: "Over the last two weeks, how often have you been bothered by any of the following problems?",
    min_response: 0,
    max_response: 3,
    scale_labels: FREQUENCY_LABELS,
    categories: &["Mood", "Somatic", "Self-perception", "Cognition", "Safety"],
    questions: &[
        Question { id: 1, prompt: "Little interest or pleasure in doing things", category: "Mood" },
        Question { id: 2, prompt: "Feeling down, depressed, or hopeless", category: "Mood" },
        Question { id: 3, prompt: "Trouble falling or staying asleep, or sleeping too much", category: "Somatic" },
        Question { id: 4, prompt: "Feeling tired or having little energy", category: "Somatic" },
        Question { id: 5, prompt: "Poor appetite or overeating", category: "Somatic" },
        Question {
            id: 6,
            prompt: "Feeling bad about yourself, or that you are a failure or have let yourself or your family down",
            category: "Self-perception",
        },
        Question {
            id: 7,
            prompt: "Trouble concentrating on things, such as reading or watching videos",
            category: "Cognition",
        },
        Question {
            id: 8,
            prompt: "Moving or speaking so slowly that other people could have noticed, or being unusually restless",
            category: "Cognition",
        },
        Question {
            id: PHQ9_SELF_HARM_ITEM,
            prompt: "Thoughts that you would be better off dead, or of hurting yourself",
            category: "Safety",
        },
    ],
    bands: &[
        Band {
            upper: Some(4),
            tier: SeverityTier::Minimal,
            guidance: "Minimal depressive symptoms.",
        },
        Band {
            upper: Some(9),
            tier: SeverityTier::Mild,
            guidance: "Mild depressive symptoms. Check in with yourself again in a couple of weeks.",
        },
        Band {
            upper: Some(14),
            tier: SeverityTier::Moderate,
            guidance: "Moderate depressive symptoms. Talking to a counselor is recommended.",
        },
        Band {
            upper: Some(19),
            tier: SeverityTier::ModeratelySevere,
            guidance: "Moderately severe depressive symptoms. Please book a counselor session.",
        },
        Band {
            upper: None,
            tier: SeverityTier::Severe,
            guidance: "Severe depressive symptoms. Please contact a counselor or a helpline as soon as you can.",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_ids_are_contiguous() {
        for instrument in Instrument::ALL {
            let spec = instrument_spec(instrument);
            for (i, q) in spec.questions.iter().enumerate() {
                assert_eq!(q.id, i as u32 + 1, "{} question order", instrument);
            }
        }
    }

    #[test]
    fn test_every_question_has_a_listed_category() {
        for instrument in Instrument::ALL {
            let spec = instrument_spec(instrument);
            for q in spec.questions {
                assert!(spec.categories.contains(&q.category), "{} q{}", instrument, q.id);
            }
            for category in spec.categories {
                assert!(spec.questions_in(category).count() > 0, "{} {}", instrument, category);
            }
        }
    }

    #[test]
    fn test_max_scores() {
        assert_eq!(instrument_spec(Instrument::Who5).max_score(), 25);
        assert_eq!(instrument_spec(Instrument::Gad7).max_score(), 21);
        assert_eq!(instrument_spec(Instrument::Phq9).max_score(), 27);
    }

    #[test]
    fn test_bands_ascending_with_open_top() {
        for instrument in Instrument::ALL {
            let bands = instrument_spec(instrument).bands;
            assert!(bands.last().unwrap().upper.is_none());
            let uppers: Vec<u32> = bands.iter().filter_map(|b| b.upper).collect();
            assert!(uppers.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(uppers.len(), bands.len() - 1);
        }
    }

    #[test]
    fn test_band_edges() {
        let phq9 = instrument_spec(Instrument::Phq9);
        assert_eq!(phq9.band_for(4).tier, SeverityTier::Minimal);
        assert_eq!(phq9.band_for(5).tier, SeverityTier::Mild);
        assert_eq!(phq9.band_for(19).tier, SeverityTier::ModeratelySevere);
        assert_eq!(phq9.band_for(20).tier, SeverityTier::Severe);
        assert_eq!(phq9.band_for(500).tier, SeverityTier::Severe);
    }

    #[test]
    fn test_info_mirrors_catalog() {
        let info = instrument_spec(Instrument::Gad7).info();
        assert_eq!(info.questions.len(), 7);
        assert_eq!(info.scale_labels.len(), 4);
        assert_eq!(info.max_response, 3);
        assert_eq!(info.questions[0].category, "Worry");
    }
}
