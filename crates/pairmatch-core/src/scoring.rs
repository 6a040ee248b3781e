//! Compatibility scoring.
//!
//! Compares two answer sets over the active questions of a shared list and
//! maps the resulting percentage to a narrative band. Scoring never fails:
//! missing data simply counts as a non-match.

use serde::{Deserialize, Serialize};

use crate::model::{Answers, Band, NarrativeBands, Question, ResultData};

/// How one question compared between the two participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionComparison {
    pub question_id: u32,
    pub category: String,
    pub text: String,
    pub creator_answer: Option<String>,
    pub partner_answer: Option<String>,
    pub matched: bool,
}

/// Summary of a compatibility comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    /// Active questions where both answered identically.
    pub matches: u32,
    /// Number of active questions.
    pub total: u32,
    /// `round(matches / total * 100)`, or 0 when there are no questions.
    pub percentage: u8,
    pub band: Band,
    pub narrative: String,
    /// Per-question breakdown, in question-list order.
    pub breakdown: Vec<QuestionComparison>,
}

impl CompatibilityScore {
    pub fn differences(&self) -> impl Iterator<Item = &QuestionComparison> {
        self.breakdown.iter().filter(|c| !c.matched)
    }
}

/// Score two answer sets against the active questions of `questions`.
pub fn score(
    questions: &[Question],
    creator: &Answers,
    partner: &Answers,
    bands: &NarrativeBands,
) -> CompatibilityScore {
    let breakdown: Vec<QuestionComparison> = questions
        .iter()
        .filter(|q| q.active)
        .map(|q| {
            let creator_answer = non_empty(creator, q.id);
            let partner_answer = non_empty(partner, q.id);
            let matched = matches!(
                (creator_answer, partner_answer),
                (Some(a), Some(b)) if a == b
            );
            QuestionComparison {
                question_id: q.id,
                category: q.category.clone(),
                text: q.text.clone(),
                creator_answer: creator_answer.map(str::to_string),
                partner_answer: partner_answer.map(str::to_string),
                matched,
            }
        })
        .collect();

    let total = breakdown.len() as u32;
    let matches = breakdown.iter().filter(|c| c.matched).count() as u32;
    let percentage = percentage(matches, total);
    let band = Band::for_percentage(percentage);

    CompatibilityScore {
        matches,
        total,
        percentage,
        band,
        narrative: bands.text(band).to_string(),
        breakdown,
    }
}

/// Score a finished result.
pub fn score_result(result: &ResultData) -> CompatibilityScore {
    score(
        &result.session.questions,
        &result.session.creator_answers,
        &result.partner_answers,
        &result.session.narrative_bands,
    )
}

fn non_empty(answers: &Answers, id: u32) -> Option<&str> {
    answers
        .get(&id)
        .map(String::as_str)
        .filter(|a| !a.is_empty())
}

/// Integer percentage with halves rounded up.
fn percentage(matches: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let matches = u64::from(matches.min(total));
    let total = u64::from(total);
    ((matches * 200 + total) / (total * 2)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(id: u32) -> Question {
        Question::new(id, "General", &format!("Question {id}"), &["X", "Y", "Z"])
    }

    fn answers(pairs: &[(u32, &str)]) -> Answers {
        pairs.iter().map(|(id, a)| (*id, a.to_string())).collect()
    }

    #[test]
    fn identical_answer_is_full_match() {
        let bands = NarrativeBands::default();
        let s = score(&[q(1)], &answers(&[(1, "X")]), &answers(&[(1, "X")]), &bands);
        assert_eq!((s.matches, s.total, s.percentage), (1, 1, 100));
        assert_eq!(s.band, Band::Range76To100);
        assert_eq!(s.narrative, bands.range_76_100);
    }

    #[test]
    fn different_answer_is_no_match() {
        let bands = NarrativeBands::default();
        let s = score(&[q(1)], &answers(&[(1, "X")]), &answers(&[(1, "Y")]), &bands);
        assert_eq!((s.matches, s.total, s.percentage), (0, 1, 0));
        assert_eq!(s.band, Band::Range0To25);
        assert_eq!(s.narrative, bands.range_0_25);
        assert_eq!(s.differences().count(), 1);
    }

    #[test]
    fn no_active_questions_scores_zero() {
        let bands = NarrativeBands::default();
        let mut inactive = q(1);
        inactive.active = false;

        for questions in [vec![], vec![inactive]] {
            let s = score(&questions, &answers(&[(1, "X")]), &answers(&[(1, "X")]), &bands);
            assert_eq!((s.matches, s.total, s.percentage), (0, 0, 0));
            assert_eq!(s.band, Band::Range0To25);
            assert_eq!(s.narrative, bands.range_0_25);
        }
    }

    #[test]
    fn unanswered_questions_count_in_denominator() {
        let questions = [q(1), q(2), q(3), q(4)];
        let s = score(
            &questions,
            &answers(&[(1, "X"), (2, "Y"), (3, "Z")]),
            &answers(&[(1, "X"), (2, "Y")]),
            &NarrativeBands::default(),
        );
        assert_eq!((s.matches, s.total, s.percentage), (2, 4, 50));
        assert_eq!(s.band, Band::Range26To50);
        assert_eq!(s.breakdown[2].partner_answer, None);
        assert_eq!(s.breakdown[3].creator_answer, None);
    }

    #[test]
    fn empty_strings_never_match() {
        let s = score(
            &[q(1)],
            &answers(&[(1, "")]),
            &answers(&[(1, "")]),
            &NarrativeBands::default(),
        );
        assert_eq!(s.matches, 0);
        assert_eq!(s.breakdown[0].creator_answer, None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let s = score(
            &[q(1)],
            &answers(&[(1, "Tea")]),
            &answers(&[(1, "tea")]),
            &NarrativeBands::default(),
        );
        assert_eq!(s.matches, 0);
    }

    #[test]
    fn inactive_questions_are_ignored() {
        let mut off = q(2);
        off.active = false;
        let s = score(
            &[q(1), off],
            &answers(&[(1, "X"), (2, "X")]),
            &answers(&[(1, "X"), (2, "Y")]),
            &NarrativeBands::default(),
        );
        assert_eq!((s.matches, s.total, s.percentage), (1, 1, 100));
        assert_eq!(s.breakdown.len(), 1);
    }

    #[test]
    fn half_rounds_up() {
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(5, 8), 63); // 62.5
    }

    #[test]
    fn percentage_stays_in_bounds() {
        for total in 0..=40u32 {
            for matches in 0..=total {
                assert!(percentage(matches, total) <= 100);
            }
        }
        assert_eq!(percentage(7, 7), 100);
    }

    #[test]
    fn bands_follow_percentage() {
        let bands = NarrativeBands::default();
        let questions: Vec<Question> = (1..=4).map(q).collect();
        let creator = answers(&[(1, "X"), (2, "X"), (3, "X"), (4, "X")]);
        let expected = [
            Band::Range0To25,   // 0%
            Band::Range0To25,   // 25%
            Band::Range26To50,  // 50%
            Band::Range51To75,  // 75%
            Band::Range76To100, // 100%
        ];
        for (n, band) in expected.iter().enumerate() {
            let partner: Answers = (1..=n as u32).map(|id| (id, "X".to_string())).collect();
            let s = score(&questions, &creator, &partner, &bands);
            assert_eq!(s.band, *band, "{n} matches");
        }
    }
}
