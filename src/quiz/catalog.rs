use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::category::Category;
use super::model::QuizItem;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog contains no items")]
    Empty,

    #[error("Catalog item at position {0} has an empty id")]
    EmptyId(usize),

    #[error("Duplicate catalog item id: {0}")]
    DuplicateId(String),

    #[error("Catalog item {id} has invalid weight {weight}")]
    InvalidWeight { id: String, weight: f64 },

    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Validated, ordered list of quiz items.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<QuizItem>,
}

impl Catalog {
    pub fn new(items: Vec<QuizItem>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
            if !item.weighted_points.is_finite() || item.weighted_points <= 0.0 {
                return Err(CatalogError::InvalidWeight {
                    id: item.id.clone(),
                    weight: item.weighted_points,
                });
            }
        }

        Ok(Self { items })
    }

    /// The production question set
    pub fn builtin() -> Self {
        Self {
            items: builtin_items(),
        }
    }

    /// Loads a catalog from a JSON array of quiz items
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let items: Vec<QuizItem> = serde_json::from_str(&raw)?;
        Self::new(items)
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&QuizItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Items of one category, in catalog order
    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &QuizItem> + '_ {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Categories that have at least one item, in display order
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| self.items_in(*category).next().is_some())
            .collect()
    }

    pub fn total_points(&self) -> f64 {
        self.items.iter().map(|item| item.weighted_points).sum()
    }
}

fn builtin_items() -> Vec<QuizItem> {
    use Category::*;

    vec![
        QuizItem::new(
            "cca1",
            CustomerCentricApproach,
            "Do you offer rewards that are tailored to each customer's preferences and purchase history?",
            "This means using past purchase data to create personalized rewards rather than generic offers for everyone.",
            4.0,
            "Use past purchase history to drive reward offerings. This makes the program feel intentional, not generic.",
        ),
        QuizItem::new(
            "cca2",
            CustomerCentricApproach,
            "Do you send personalized offers based on individual shopping habits and browsing behavior?",
            "Automated systems that track what customers buy or browse to send relevant, targeted offers.",
            4.0,
            "Set up automations that send offers based on what each customer buys or browses. Targeted relevance increases conversion.",
        ),
        QuizItem::new(
            "cca3",
            CustomerCentricApproach,
            "Do you reward customers for high-value behaviors beyond just purchases?",
            "This includes rewards for actions like referring friends, reaching visit milestones, or making purchases at key intervals.",
            3.6,
            "Reward customers for high-value actions like referring friends, visiting multiple times, or purchasing at key intervals.",
        ),
        QuizItem::new(
            "cca4",
            CustomerCentricApproach,
            "Do you offer multiple ways for customers to redeem their points and rewards?",
            "Various redemption options like discounts, exclusive products, surprise gifts, or special experiences.",
            3.6,
            "Offer multiple ways to use points, like discounts, exclusive drops, or surprise gifts. Give customers a reason to keep checking back.",
        ),
        QuizItem::new(
            "cca5",
            CustomerCentricApproach,
            "Can customers sign up for your program in under 30 seconds and easily track their status?",
            "Quick enrollment process with easy access to points and status through receipts, online accounts, or SMS.",
            4.0,
            "Make sure customers can join in seconds and easily view their points and status on receipts, online, or via SMS.",
        ),
        QuizItem::new(
            "cca6",
            CustomerCentricApproach,
            "Can customers easily see their point balance and available rewards without asking staff?",
            "Clear visibility of points and rewards both in-store and through digital channels.",
            3.6,
            "Display point balances and reward options clearly in-store and digitally. Lack of visibility kills engagement.",
        ),
        QuizItem::new(
            "ec1",
            EngagementAndCommunication,
            "Do you send regular updates about customer status, rewards, and promotions?",
            "Consistent messaging rhythm through SMS, email, or app notifications to keep loyalty top of mind.",
            3.6,
            "Build a rhythm of messaging, weekly SMS, monthly email, occasional surprises to keep loyalty top of mind.",
        ),
        QuizItem::new(
            "ec2",
            EngagementAndCommunication,
            "Do you maintain a consistent and reliable communication schedule with loyalty members?",
            "Regular, predictable outreach schedule rather than sporadic or inconsistent messaging.",
            3.6,
            "Set a reliable cadence for outreach. Infrequent or inconsistent messaging causes drop-off.",
        ),
        QuizItem::new(
            "ec3",
            EngagementAndCommunication,
            "Do your notifications include personalized details like the customer's name and point balance?",
            "Customized alerts that show individual customer information and tailored reward suggestions.",
            3.2,
            "Send alerts that include the customer's name, point balance, and personalized reward suggestions.",
        ),
        QuizItem::new(
            "ec4",
            EngagementAndCommunication,
            "Do you create engaging content that connects your loyalty program to seasonal offers or lifestyle benefits?",
            "Content marketing that ties loyalty rewards to current promotions, staff picks, or lifestyle advantages.",
            3.2,
            "Use content that links the loyalty program to seasonal drops, staff picks, or lifestyle benefits. Give people a reason to come back.",
        ),
        QuizItem::new(
            "dua1",
            DataUtilizationAndAnalytics,
            "Do you track which loyalty offers perform best and use that data to refine your program?",
            "Analytics system that measures offer performance and uses insights to adjust budget and strategy.",
            4.0,
            "Start tracking which offers perform best. Use that data to shift budget and strategy accordingly.",
        ),
        QuizItem::new(
            "dua2",
            DataUtilizationAndAnalytics,
            "Do you monitor key performance indicators like return visit rate and reward redemption rate?",
            "Defined KPIs with dashboards to track metrics like customer frequency, redemption rates, and program engagement over time.",
            3.6,
            "Define KPIs like return visit rate, reward redemption rate, and frequency. Build dashboards to track over time.",
        ),
        QuizItem::new(
            "dua3",
            DataUtilizationAndAnalytics,
            "Do you log and analyze loyalty program metrics on a monthly basis?",
            "Regular monthly tracking of key metrics to identify trends, catch customer churn, or spot seasonal patterns.",
            3.6,
            "Log key metrics monthly. Track trends to catch churn or spot seasonal patterns.",
        ),
        QuizItem::new(
            "dua4",
            DataUtilizationAndAnalytics,
            "Do you conduct quarterly reviews to evaluate and adjust your loyalty program strategy?",
            "Scheduled quarterly assessments to determine what's working and where to modify campaigns or offers.",
            3.6,
            "Put time on the calendar every quarter to evaluate what's working and where to adjust campaigns or offers.",
        ),
        QuizItem::new(
            "rss1",
            ReferralsAndSocialSharing,
            "Do you offer referral bonuses that reward both the referring customer and the new customer?",
            "Simple referral incentives like points or discounts for both the person making the referral and the new customer.",
            3.2,
            "Add a referral bonus. Keep it simple - points or a small discount for both sender and receiver.",
        ),
        QuizItem::new(
            "rss2",
            ReferralsAndSocialSharing,
            "Do you provide easy ways for members to share your loyalty program benefits on social media?",
            "Tools, templates, or incentives that make it simple for customers to share program benefits and extend your reach.",
            2.8,
            "Give members ways to share program benefits on social. Templates or rewards for sharing help extend reach.",
        ),
        QuizItem::new(
            "rss3",
            ReferralsAndSocialSharing,
            "Do you consistently promote referral opportunities across all your loyalty communications?",
            "Regular mentions of referral programs in emails, SMS, in-store signage, and other customer touchpoints.",
            2.8,
            "Mention referral opportunities in every loyalty message\u{2014}email, SMS, in-store signage. Reinforcement drives action.",
        ),
        QuizItem::new(
            "fa1",
            FlexibilityAndAdaptability,
            "Is your loyalty program designed to scale with business growth and changing needs?",
            "Program structure that can adapt to more locations, traffic changes, or business expansion without hitting limits.",
            3.6,
            "Structure rewards so they can flex with more locations or changes in foot traffic. Avoid setting limits you'll later outgrow.",
        ),
        QuizItem::new(
            "fa2",
            FlexibilityAndAdaptability,
            "Do you regularly collect and act on customer feedback about your loyalty program?",
            "Systems for gathering customer input through surveys or staff feedback to understand what's working and what isn't.",
            3.2,
            "Run quick surveys or use budtender feedback to learn what's landing and what isn't.",
        ),
        QuizItem::new(
            "fa3",
            FlexibilityAndAdaptability,
            "Do you refresh your program visuals, rewards, and structure every six months?",
            "Regular updates to keep the program fresh, competitive, and aligned with current customer preferences.",
            3.2,
            "Refresh your program visuals, rewards, and point logic every six months to stay fresh and competitive.",
        ),
        QuizItem::new(
            "ar1",
            AttractiveRewards,
            "Do you offer different types of rewards that appeal to casual, regular, and frequent customers?",
            "Varied reward options that resonate with different customer segments, from occasional visitors to power shoppers.",
            3.2,
            "Create rewards that resonate with casual, mid-tier, and power shoppers. Each group needs a different hook.",
        ),
        QuizItem::new(
            "ar2",
            AttractiveRewards,
            "Can even your least frequent customers redeem rewards without waiting months or years?",
            "Achievable reward thresholds that allow low-frequency customers to experience early wins and build loyalty.",
            3.2,
            "Ensure even low-frequency customers can redeem something without years of spend. Early wins build loyalty.",
        ),
        QuizItem::new(
            "ar3",
            AttractiveRewards,
            "Do you offer multiple ways to earn points beyond just making purchases?",
            "Various earning opportunities like visiting milestones, writing reviews, social sharing, or completing challenges.",
            2.8,
            "Add new ways to earn\u{2014}gamified visits, reviews, social shares, milestone visits\u{2014}not just spend-based points.",
        ),
        QuizItem::new(
            "ecs1",
            ExceptionalCustomerService,
            "Can your staff easily troubleshoot loyalty program issues and look up customer point balances?",
            "Well-trained staff with access to tools needed to resolve customer loyalty questions without creating friction.",
            4.0,
            "Make sure staff know how to troubleshoot rewards or look up point balances. Friction kills trust.",
        ),
        QuizItem::new(
            "ecs2",
            ExceptionalCustomerService,
            "Do you actively collect customer feedback about your loyalty program experience?",
            "Systems like surveys, comment boxes, or post-visit messages to gather customer input on program improvements.",
            3.6,
            "Set up short surveys, comment boxes, or post-visit messages to collect input. Customers will tell you what's missing.",
        ),
        QuizItem::new(
            "ecs3",
            ExceptionalCustomerService,
            "Do both customers and staff know exactly where to get help with loyalty program issues?",
            "Clear support channels and processes for loyalty program assistance, whether in-store, by phone, or through chat.",
            3.6,
            "Ensure both staff and customers know where to go for loyalty help\u{2014}in-store, phone, or chat.",
        ),
        QuizItem::new(
            "ecs4",
            ExceptionalCustomerService,
            "Are your staff members trained to confidently explain how customers earn and use rewards?",
            "Comprehensive staff training on loyalty program details to ensure confident, accurate information sharing with customers.",
            3.6,
            "Train staff to speak confidently about how to earn and use rewards. Internal buy-in drives external adoption.",
        ),
        QuizItem::new(
            "mca1",
            MultiChannelAccessibility,
            "Does your loyalty program work consistently whether customers shop online, on mobile, or in-store?",
            "Seamless program functionality across all shopping channels with consistent access to points and rewards.",
            2.8,
            "Your program should work whether someone shops online, on mobile, or in-store. Keep it consistent and connected.",
        ),
        QuizItem::new(
            "mca2",
            MultiChannelAccessibility,
            "Is your loyalty program branding and messaging consistent across all customer touchpoints?",
            "Unified loyalty voice, visuals, and value proposition across email, SMS, in-store signage, website, and mobile app.",
            3.2,
            "Your loyalty voice, visuals, and value should feel unified across email, SMS, signage, and website. Avoid disjointed experiences.",
        ),
    ]
}
