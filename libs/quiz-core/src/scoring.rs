//! Difficulty-weighted scoring and level classification.

use std::collections::HashMap;

use crate::types::{AnswerRecord, Classification, Difficulty, Level, Question, TierAccuracy};

const EASY_ENTRY: f64 = 0.70;
const EASY_INTERMEDIATE: f64 = 0.80;
const EASY_EXPERT: f64 = 0.90;
const MEDIUM_ENTRY: f64 = 0.50;
const MEDIUM_EXPERT: f64 = 0.70;
const HARD_EXPERT: f64 = 0.40;
const MIN_POINTS: u32 = 25;
const MAX_INTERMEDIATE_POINTS: u32 = 45;
const MIN_EXPERT_POINTS: u32 = 46;

/// Score answered questions and classify the result.
///
/// Questions without an answer, or answered wrong, contribute no points.
pub fn evaluate(questions: &[Question], answers: &HashMap<String, AnswerRecord>) -> Classification {
    let mut points = 0;
    let mut max_points = 0;
    let mut totals = [0usize; 3];
    let mut correct = [0usize; 3];

    for question in questions {
        let slot = tier_slot(question.difficulty);
        let weight = question.difficulty.points();
        max_points += weight;
        totals[slot] += 1;

        if answers.get(&question.id).is_some_and(|a| a.is_correct) {
            points += weight;
            correct[slot] += 1;
        }
    }

    let accuracy = TierAccuracy {
        easy: ratio(correct[0], totals[0]),
        medium: ratio(correct[1], totals[1]),
        hard: ratio(correct[2], totals[2]),
    };

    Classification {
        points,
        max_points,
        accuracy,
        level: classify(points, &accuracy),
    }
}

/// Map points and tier accuracy onto a level. The first matching rule wins.
pub fn classify(points: u32, accuracy: &TierAccuracy) -> Level {
    let TierAccuracy { easy, medium, hard } = *accuracy;

    if easy < EASY_ENTRY {
        Level::Beginner
    } else if medium < MEDIUM_ENTRY || points < MIN_POINTS {
        Level::Beginner
    } else if easy >= EASY_INTERMEDIATE
        && medium >= MEDIUM_ENTRY
        && hard < HARD_EXPERT
        && (MIN_POINTS..=MAX_INTERMEDIATE_POINTS).contains(&points)
    {
        Level::Intermediate
    } else if easy >= EASY_EXPERT
        && medium >= MEDIUM_EXPERT
        && hard >= HARD_EXPERT
        && points >= MIN_EXPERT_POINTS
    {
        Level::Expert
    } else if medium < MEDIUM_ENTRY {
        Level::Beginner
    } else if hard < HARD_EXPERT {
        Level::Intermediate
    } else {
        Level::Intermediate
    }
}

fn tier_slot(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 0,
        Difficulty::Medium => 1,
        Difficulty::Hard => 2,
    }
}

fn ratio(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}
