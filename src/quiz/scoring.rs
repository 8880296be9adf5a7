use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use super::category::Category;
use super::feedback::FeedbackTier;
use super::model::{CategoryScore, QuizItem, QuizResponse, QuizResult};

/// Categories scoring strictly below this rounded percentage are flagged.
pub const UNDERPERFORMING_BELOW: u32 = 60;

const CATEGORY_RECOMMENDATIONS: usize = 2;
const TOP_RECOMMENDATIONS: usize = 3;

/// Raised only for a misconfigured catalog; answers can never cause it.
#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("Cannot score an empty catalog")]
    EmptyCatalog,

    #[error("Category {0} has no scorable weight")]
    ZeroPossible(Category),
}

#[derive(Default)]
struct Tally<'a> {
    achieved: f64,
    possible: f64,
    unmet: Vec<&'a QuizItem>,
}

pub fn is_underperforming(percentage: u32) -> bool {
    percentage < UNDERPERFORMING_BELOW
}

fn percentage(achieved: f64, possible: f64) -> u32 {
    ((achieved / possible) * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Scores a set of answers against the catalog.
///
/// Items without a response count as not deployed. Responses naming an item
/// that is not in the catalog are ignored, and for a repeated item id the last
/// response wins. Category scores are listed in [`Category::ALL`] order and
/// only for categories that have items.
pub fn score(catalog: &[QuizItem], responses: &[QuizResponse]) -> Result<QuizResult, ScoreError> {
    if catalog.is_empty() {
        return Err(ScoreError::EmptyCatalog);
    }

    let answers: HashMap<&str, bool> = responses
        .iter()
        .map(|response| (response.item_id.as_str(), response.deployed))
        .collect();

    let mut tallies: BTreeMap<Category, Tally> = BTreeMap::new();
    for item in catalog {
        let tally = tallies.entry(item.category).or_default();
        tally.possible += item.weighted_points;
        if answers.get(item.id.as_str()).copied().unwrap_or(false) {
            tally.achieved += item.weighted_points;
        } else {
            tally.unmet.push(item);
        }
    }

    let mut category_scores = Vec::with_capacity(tallies.len());
    let mut total_score = 0.0;
    let mut total_possible = 0.0;

    for (category, tally) in tallies {
        // also rejects NaN
        if !(tally.possible > 0.0) {
            return Err(ScoreError::ZeroPossible(category));
        }

        let category_percentage = percentage(tally.achieved, tally.possible);
        category_scores.push(CategoryScore {
            category,
            score: tally.achieved,
            total_possible: tally.possible,
            percentage: category_percentage,
            is_underperforming: is_underperforming(category_percentage),
            summary: category.summary().to_string(),
            recommendations: tally
                .unmet
                .iter()
                .take(CATEGORY_RECOMMENDATIONS)
                .map(|item| item.advice.clone())
                .collect(),
        });

        total_score += tally.achieved;
        total_possible += tally.possible;
    }

    let overall_percentage = percentage(total_score, total_possible);
    let tier = FeedbackTier::for_percentage(overall_percentage);

    let mut weakest: Vec<&CategoryScore> = category_scores
        .iter()
        .filter(|category| category.is_underperforming)
        .collect();
    weakest.sort_by_key(|category| category.percentage);

    let mut recommendations: Vec<String> = weakest
        .into_iter()
        .take(TOP_RECOMMENDATIONS)
        .filter_map(|category| category.recommendations.first().cloned())
        .collect();

    if recommendations.is_empty() {
        recommendations = tier
            .recommendations()
            .iter()
            .map(|recommendation| recommendation.to_string())
            .collect();
    }

    Ok(QuizResult {
        total_score,
        total_possible,
        overall_percentage,
        category_scores,
        overall_feedback: tier.feedback().to_string(),
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Catalog;

    fn item(id: &str, category: Category, weight: f64) -> QuizItem {
        QuizItem::new(id, category, id, id, weight, &format!("advice for {}", id))
    }

    fn two_category_catalog() -> Vec<QuizItem> {
        vec![
            item("c1", Category::CustomerCentricApproach, 4.0),
            item("c2", Category::CustomerCentricApproach, 4.0),
            item("e1", Category::EngagementAndCommunication, 4.0),
            item("e2", Category::EngagementAndCommunication, 4.0),
        ]
    }

    fn answer_all(catalog: &[QuizItem], deployed: bool) -> Vec<QuizResponse> {
        catalog
            .iter()
            .map(|item| QuizResponse::new(item.id.clone(), deployed))
            .collect()
    }

    #[test]
    fn split_categories_score_fifty_percent() {
        let catalog = two_category_catalog();
        let responses = vec![
            QuizResponse::new("c1", true),
            QuizResponse::new("c2", true),
            QuizResponse::new("e1", false),
            QuizResponse::new("e2", false),
        ];

        let result = score(&catalog, &responses).unwrap();

        assert_eq!(result.total_score, 8.0);
        assert_eq!(result.total_possible, 16.0);
        assert_eq!(result.overall_percentage, 50);
        assert_eq!(result.overall_feedback, FeedbackTier::SignificantGaps.feedback());

        let [customer, engagement] = result.category_scores.as_slice() else {
            panic!("expected two category scores");
        };
        assert_eq!(customer.percentage, 100);
        assert!(!customer.is_underperforming);
        assert!(customer.recommendations.is_empty());

        assert_eq!(engagement.percentage, 0);
        assert!(engagement.is_underperforming);
        assert_eq!(
            engagement.recommendations,
            vec!["advice for e1".to_string(), "advice for e2".to_string()]
        );
        assert_eq!(result.recommendations, vec!["advice for e1".to_string()]);
    }

    #[test]
    fn perfect_score_falls_back_to_tier_recommendations() {
        let catalog = Catalog::builtin();
        let result = score(catalog.items(), &answer_all(catalog.items(), true)).unwrap();

        assert_eq!(result.overall_percentage, 100);
        assert_eq!(result.category_scores.len(), 8);
        assert!(result.category_scores.iter().all(|c| !c.is_underperforming));
        assert_eq!(result.overall_feedback, FeedbackTier::Exceptional.feedback());
        assert_eq!(result.recommendations, FeedbackTier::Exceptional.recommendations());
    }

    #[test]
    fn zero_score_takes_three_weakest_in_display_order() {
        let catalog = Catalog::builtin();
        let result = score(catalog.items(), &[]).unwrap();

        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.overall_percentage, 0);
        assert_eq!(result.overall_feedback, FeedbackTier::MajorOverhaul.feedback());
        let expected: Vec<String> = ["cca1", "ec1", "dua1"]
            .iter()
            .map(|id| catalog.get(id).unwrap().advice.clone())
            .collect();
        assert_eq!(result.recommendations, expected);
    }

    #[test]
    fn weakest_categories_are_ranked_by_percentage() {
        let catalog = vec![
            item("a1", Category::CustomerCentricApproach, 1.0),
            item("a2", Category::CustomerCentricApproach, 1.0),
            item("b1", Category::AttractiveRewards, 1.0),
            item("b2", Category::AttractiveRewards, 1.0),
            item("b3", Category::AttractiveRewards, 1.0),
            item("m1", Category::MultiChannelAccessibility, 1.0),
        ];
        // customer 50%, rewards 33%, multi-channel 0%
        let responses = vec![QuizResponse::new("a1", true), QuizResponse::new("b1", true)];

        let result = score(&catalog, &responses).unwrap();
        assert_eq!(
            result.recommendations,
            vec![
                "advice for m1".to_string(),
                "advice for b2".to_string(),
                "advice for a2".to_string()
            ]
        );
    }

    #[test]
    fn exactly_sixty_percent_is_not_underperforming() {
        let catalog = vec![
            item("x1", Category::AttractiveRewards, 3.0),
            item("x2", Category::AttractiveRewards, 2.0),
        ];
        let result = score(&catalog, &[QuizResponse::new("x1", true)]).unwrap();
        assert_eq!(result.category_scores[0].percentage, 60);
        assert!(!result.category_scores[0].is_underperforming);
    }

    #[test]
    fn underperforming_is_judged_after_rounding() {
        // 59.9% rounds up to 60
        let catalog = vec![
            item("x1", Category::AttractiveRewards, 59.9),
            item("x2", Category::AttractiveRewards, 40.1),
        ];
        let result = score(&catalog, &[QuizResponse::new("x1", true)]).unwrap();
        assert_eq!(result.category_scores[0].percentage, 60);
        assert!(!result.category_scores[0].is_underperforming);

        // 59.4% rounds down to 59
        let catalog = vec![
            item("x1", Category::AttractiveRewards, 59.4),
            item("x2", Category::AttractiveRewards, 40.6),
        ];
        let result = score(&catalog, &[QuizResponse::new("x1", true)]).unwrap();
        assert_eq!(result.category_scores[0].percentage, 59);
        assert!(result.category_scores[0].is_underperforming);
    }

    #[test]
    fn omitted_responses_equal_explicit_false() {
        let catalog = Catalog::builtin();
        let partial = vec![QuizResponse::new("cca1", true), QuizResponse::new("ec3", true)];
        let mut explicit = answer_all(catalog.items(), false);
        for response in explicit.iter_mut() {
            if response.item_id == "cca1" || response.item_id == "ec3" {
                response.deployed = true;
            }
        }

        assert_eq!(
            score(catalog.items(), &partial).unwrap(),
            score(catalog.items(), &explicit).unwrap()
        );
    }

    #[test]
    fn unknown_item_ids_are_ignored() {
        let catalog = two_category_catalog();
        let baseline = score(&catalog, &[QuizResponse::new("c1", true)]).unwrap();
        let with_unknown = score(
            &catalog,
            &[QuizResponse::new("c1", true), QuizResponse::new("nope", true)],
        )
        .unwrap();
        assert_eq!(baseline, with_unknown);
    }

    #[test]
    fn last_duplicate_response_wins() {
        let catalog = two_category_catalog();
        let result = score(
            &catalog,
            &[QuizResponse::new("c1", true), QuizResponse::new("c1", false)],
        )
        .unwrap();
        assert_eq!(result.total_score, 0.0);
    }

    #[test]
    fn total_possible_is_independent_of_answers() {
        let catalog = Catalog::builtin();
        let expected = catalog.total_points();
        for deployed in [true, false] {
            let result = score(catalog.items(), &answer_all(catalog.items(), deployed)).unwrap();
            assert!((result.total_possible - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn percentages_stay_within_bounds_and_scoring_is_repeatable() {
        let catalog = Catalog::builtin();
        // deploy every third item
        let responses: Vec<QuizResponse> = catalog
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| QuizResponse::new(item.id.clone(), i % 3 == 0))
            .collect();

        let first = score(catalog.items(), &responses).unwrap();
        let second = score(catalog.items(), &responses).unwrap();
        assert_eq!(first, second);
        assert!(first.overall_percentage <= 100);
        assert!(first.category_scores.iter().all(|c| c.percentage <= 100));
        assert!(first.recommendations.len() <= TOP_RECOMMENDATIONS);
        assert!(first
            .category_scores
            .iter()
            .all(|c| c.recommendations.len() <= CATEGORY_RECOMMENDATIONS));
    }

    #[test]
    fn category_order_follows_enumeration() {
        let catalog = vec![
            item("m1", Category::MultiChannelAccessibility, 1.0),
            item("r1", Category::ReferralsAndSocialSharing, 1.0),
            item("c1", Category::CustomerCentricApproach, 1.0),
        ];
        let result = score(&catalog, &[]).unwrap();
        let order: Vec<Category> = result.category_scores.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![
                Category::CustomerCentricApproach,
                Category::ReferralsAndSocialSharing,
                Category::MultiChannelAccessibility
            ]
        );
    }

    #[test]
    fn misconfigured_catalogs_are_errors() {
        assert_eq!(score(&[], &[]), Err(ScoreError::EmptyCatalog));

        let catalog = vec![item("z", Category::AttractiveRewards, 0.0)];
        assert_eq!(
            score(&catalog, &[QuizResponse::new("z", true)]),
            Err(ScoreError::ZeroPossible(Category::AttractiveRewards))
        );
    }
}
