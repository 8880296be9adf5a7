use serde::Serialize;

/// Overall feedback bands, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeedbackTier {
    Exceptional,
    Strong,
    GoodFoundation,
    NeedsImprovement,
    SignificantGaps,
    MajorOverhaul,
}

impl FeedbackTier {
    /// Thresholded tiers scanned in descending order. `MajorOverhaul` is the floor.
    const LADDER: [FeedbackTier; 5] = [
        FeedbackTier::Exceptional,
        FeedbackTier::Strong,
        FeedbackTier::GoodFoundation,
        FeedbackTier::NeedsImprovement,
        FeedbackTier::SignificantGaps,
    ];

    /// Picks the first tier whose threshold the percentage meets or exceeds
    pub fn for_percentage(percentage: u32) -> Self {
        Self::LADDER
            .into_iter()
            .find(|tier| percentage >= tier.threshold())
            .unwrap_or(FeedbackTier::MajorOverhaul)
    }

    pub fn threshold(&self) -> u32 {
        match self {
            FeedbackTier::Exceptional => 90,
            FeedbackTier::Strong => 80,
            FeedbackTier::GoodFoundation => 70,
            FeedbackTier::NeedsImprovement => 60,
            FeedbackTier::SignificantGaps => 50,
            FeedbackTier::MajorOverhaul => 0,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FeedbackTier::Exceptional => "Exceptional Loyalty Program",
            FeedbackTier::Strong => "Strong Loyalty Program",
            FeedbackTier::GoodFoundation => "Good Foundation",
            FeedbackTier::NeedsImprovement => "Needs Improvement",
            FeedbackTier::SignificantGaps => "Significant Gaps",
            FeedbackTier::MajorOverhaul => "Major Overhaul Needed",
        }
    }

    pub fn feedback(&self) -> &'static str {
        match self {
            FeedbackTier::Exceptional => "You're running a world-class loyalty program that truly drives customer retention and engagement. Your program demonstrates excellence across all key areas.",
            FeedbackTier::Strong => "Your loyalty program is performing well above average with solid foundations in place. There are opportunities to fine-tune certain areas for even better results.",
            FeedbackTier::GoodFoundation => "You have a solid loyalty program foundation with room for meaningful improvements. Most core elements are in place but need optimization.",
            FeedbackTier::NeedsImprovement => "Your loyalty program has the basics but isn't reaching its full potential. Several key areas need attention to drive better customer engagement.",
            FeedbackTier::SignificantGaps => "Your loyalty program has substantial gaps that are likely limiting its effectiveness. A comprehensive review and improvement plan is needed.",
            FeedbackTier::MajorOverhaul => "Your loyalty program requires fundamental changes to become effective. Consider rebuilding from the ground up with customer needs as the focus.",
        }
    }

    /// Default recommendations used when no category is underperforming
    pub fn recommendations(&self) -> [&'static str; 3] {
        match self {
            FeedbackTier::Exceptional => [
                "Continue monitoring performance",
                "Share best practices with industry peers",
                "Consider expanding successful elements",
            ],
            FeedbackTier::Strong => [
                "Focus on underperforming categories",
                "Implement advanced personalization",
                "Strengthen data analytics capabilities",
            ],
            FeedbackTier::GoodFoundation => [
                "Prioritize customer-centric features",
                "Improve communication consistency",
                "Enhance reward variety and appeal",
            ],
            FeedbackTier::NeedsImprovement => [
                "Conduct customer feedback surveys",
                "Implement regular program reviews",
                "Focus on communication and personalization",
            ],
            FeedbackTier::SignificantGaps => [
                "Start with customer-centric improvements",
                "Establish consistent communication",
                "Implement basic analytics and tracking",
            ],
            FeedbackTier::MajorOverhaul => [
                "Redesign program from customer perspective",
                "Establish clear value proposition",
                "Implement essential features first",
            ],
        }
    }
}
