use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// The eight maturity dimensions a quiz item can belong to.
///
/// Variant order is the display order used everywhere results are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Customer-Centric Approach")]
    CustomerCentricApproach,
    #[serde(rename = "Engagement & Communication")]
    EngagementAndCommunication,
    #[serde(rename = "Data Utilization & Analytics")]
    DataUtilizationAndAnalytics,
    #[serde(rename = "Referrals & Social Sharing")]
    ReferralsAndSocialSharing,
    #[serde(rename = "Flexibility & Adaptability")]
    FlexibilityAndAdaptability,
    #[serde(rename = "Attractive Rewards")]
    AttractiveRewards,
    #[serde(rename = "Exceptional Customer Service")]
    ExceptionalCustomerService,
    #[serde(rename = "Multi-Channel Accessibility")]
    MultiChannelAccessibility,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::CustomerCentricApproach,
        Category::EngagementAndCommunication,
        Category::DataUtilizationAndAnalytics,
        Category::ReferralsAndSocialSharing,
        Category::FlexibilityAndAdaptability,
        Category::AttractiveRewards,
        Category::ExceptionalCustomerService,
        Category::MultiChannelAccessibility,
    ];

    /// Human-readable name, identical to the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            Category::CustomerCentricApproach => "Customer-Centric Approach",
            Category::EngagementAndCommunication => "Engagement & Communication",
            Category::DataUtilizationAndAnalytics => "Data Utilization & Analytics",
            Category::ReferralsAndSocialSharing => "Referrals & Social Sharing",
            Category::FlexibilityAndAdaptability => "Flexibility & Adaptability",
            Category::AttractiveRewards => "Attractive Rewards",
            Category::ExceptionalCustomerService => "Exceptional Customer Service",
            Category::MultiChannelAccessibility => "Multi-Channel Accessibility",
        }
    }

    /// Static one-line description shown next to a category's score
    pub fn summary(&self) -> &'static str {
        match self {
            Category::CustomerCentricApproach => "Measures how well your program puts customer needs and preferences at the center of reward design and experience.",
            Category::EngagementAndCommunication => "Evaluates your ability to maintain regular, meaningful contact with loyalty program members.",
            Category::DataUtilizationAndAnalytics => "Assesses how effectively you use data to track, measure, and improve your loyalty program performance.",
            Category::ReferralsAndSocialSharing => "Reviews your program's ability to leverage word-of-mouth and social proof to acquire new customers.",
            Category::FlexibilityAndAdaptability => "Examines how well your program can evolve and adapt to changing business needs and customer feedback.",
            Category::AttractiveRewards => "Analyzes whether your rewards are compelling, attainable, and appeal to different customer segments.",
            Category::ExceptionalCustomerService => "Measures the quality of support and training around your loyalty program experience.",
            Category::MultiChannelAccessibility => "Evaluates how consistently your program works across all customer touchpoints and channels.",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_order_follows_variant_order() {
        assert!(Category::ALL.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(Category::CustomerCentricApproach < Category::MultiChannelAccessibility);
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&Category::EngagementAndCommunication).unwrap();
        assert_eq!(json, "\"Engagement & Communication\"");

        let parsed: Category = serde_json::from_str("\"Attractive Rewards\"").unwrap();
        assert_eq!(parsed, Category::AttractiveRewards);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(
            "multi-channel accessibility".parse::<Category>().unwrap(),
            Category::MultiChannelAccessibility
        );
        assert!("Pricing".parse::<Category>().is_err());
    }

    #[test]
    fn every_category_has_a_summary() {
        assert!(Category::ALL.iter().all(|c| !c.summary().is_empty()));
    }
}
