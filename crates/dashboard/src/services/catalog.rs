//! Static catalogs: AI tools and strategy templates.

use serde::Serialize;

/// Category of an AI tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    Marketing,
    Seo,
    Sales,
    Research,
    Email,
}

impl ToolCategory {
    pub const ALL: &'static [Self] = &[
        Self::Marketing,
        Self::Seo,
        Self::Sales,
        Self::Research,
        Self::Email,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Marketing => "marketing",
            Self::Seo => "seo",
            Self::Sales => "sales",
            Self::Research => "research",
            Self::Email => "email",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Marketing => "Marketing",
            Self::Seo => "SEO",
            Self::Sales => "Sales",
            Self::Research => "Research",
            Self::Email => "Email",
        }
    }

    /// Parse a query-string value; unknown values mean "all".
    #[must_use]
    pub fn from_query(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

/// An AI copywriting tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tool {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: ToolCategory,
    pub icon: &'static str,
    /// Hint shown in the empty input box.
    pub placeholder: &'static str,
}

pub const TOOLS: &[Tool] = &[
    Tool {
        id: "1",
        title: "A/B Test Generator",
        description: "Create 5 headline variations built on different psychological angles.",
        category: ToolCategory::Marketing,
        icon: "bar-chart",
        placeholder: "Describe your product or offer...",
    },
    Tool {
        id: "2",
        title: "Search Intent Mapping (SEO)",
        description: "Find out what your customer asks before they buy.",
        category: ToolCategory::Seo,
        icon: "search",
        placeholder: "Which topic or niche should we map?",
    },
    Tool {
        id: "3",
        title: "Objection Mining",
        description: "Get inside the buyer's head to write bulletproof copy.",
        category: ToolCategory::Research,
        icon: "message-square",
        placeholder: "Describe the offer buyers are skeptical about...",
    },
    Tool {
        id: "4",
        title: "Sales Chatbot Script",
        description: "Automate first contact with a persuasive script.",
        category: ToolCategory::Sales,
        icon: "bot",
        placeholder: "What does your site sell, and to whom?",
    },
    Tool {
        id: "5",
        title: "Cart Rescue Email Sequence",
        description: "Recover abandoned carts with emotional copy.",
        category: ToolCategory::Email,
        icon: "mail",
        placeholder: "Which product was left in the cart?",
    },
    Tool {
        id: "6",
        title: "Ideal Customer Profile (ICP)",
        description: "Build a detailed persona of your ideal buyer.",
        category: ToolCategory::Marketing,
        icon: "target",
        placeholder: "Describe your business...",
    },
];

/// Find a tool by id.
#[must_use]
pub fn tool(id: &str) -> Option<&'static Tool> {
    TOOLS.iter().find(|t| t.id == id)
}

/// Tools in `category`, or all tools when `None`.
#[must_use]
pub fn tools(category: Option<ToolCategory>) -> Vec<&'static Tool> {
    TOOLS
        .iter()
        .filter(|t| category.is_none_or(|c| t.category == c))
        .collect()
}

/// Category of a strategy template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    Launches,
    EmailMarketing,
    SocialMedia,
    AdsTraffic,
    Sales,
}

impl TemplateCategory {
    pub const ALL: &'static [Self] = &[
        Self::Launches,
        Self::EmailMarketing,
        Self::SocialMedia,
        Self::AdsTraffic,
        Self::Sales,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Launches => "launches",
            Self::EmailMarketing => "email_marketing",
            Self::SocialMedia => "social_media",
            Self::AdsTraffic => "ads_traffic",
            Self::Sales => "sales",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Launches => "Launches",
            Self::EmailMarketing => "Email Marketing",
            Self::SocialMedia => "Social Media",
            Self::AdsTraffic => "Ads & Traffic",
            Self::Sales => "Sales",
        }
    }

    #[must_use]
    pub fn from_query(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateMetric {
    pub kpi: &'static str,
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateStep {
    pub title: &'static str,
    pub description: &'static str,
}

/// A proven copy strategy the user can start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: u32,
    pub title: &'static str,
    pub category: TemplateCategory,
    pub difficulty: Difficulty,
    pub time_estimate: &'static str,
    pub icon: &'static str,
    pub short_description: &'static str,
    pub full_description: &'static str,
    pub metrics: &'static [TemplateMetric],
    pub structure: &'static [TemplateStep],
    /// Request placed in the Magic Box when the template is used.
    pub prompt_context: &'static str,
}

const fn metric(kpi: &'static str, value: &'static str, label: &'static str) -> TemplateMetric {
    TemplateMetric { kpi, value, label }
}

const fn step(title: &'static str, description: &'static str) -> TemplateStep {
    TemplateStep { title, description }
}

pub const TEMPLATES: &[Template] = &[
    Template {
        id: 1,
        title: "Seed Launch Funnel",
        category: TemplateCategory::Launches,
        difficulty: Difficulty::Intermediate,
        time_estimate: "7 days",
        icon: "shopping-cart",
        short_description: "The classic strategy to validate an offer before the product exists.",
        full_description: "Build a list of interested leads, deliver massive value through an event or a series of lives, then sell the promise of the product as a co-created beta.",
        metrics: &[
            metric("Conv.", "2-5%", "Conversion rate"),
            metric("ROI", "5x", "Average return"),
        ],
        structure: &[
            step("Research", "Email that surfaces the audience's pains."),
            step("Warm-up", "3 days of content breaking objections."),
            step("Webinar", "Sales script for the live class."),
            step("Follow-up", "Sequence of 4 closing emails."),
        ],
        prompt_context: "Write all the copy for a Seed Launch of [PRODUCT].",
    },
    Template {
        id: 2,
        title: "Welcome Sequence (Soap Opera)",
        category: TemplateCategory::EmailMarketing,
        difficulty: Difficulty::Beginner,
        time_estimate: "3 days",
        icon: "mail",
        short_description: "Connect emotionally with new leads through storytelling.",
        full_description: "A dramatic arc that hooks the reader and establishes authority from the first email.",
        metrics: &[
            metric("Open", "45%+", "Average open rate"),
            metric("CTR", "12%", "Link clicks"),
        ],
        structure: &[
            step("The Stage", "Introduction and an open curiosity loop."),
            step("The Drama", "The origin story."),
            step("The Epiphany", "Discovering the method or solution."),
            step("The Offer", "Soft sell of the main product."),
        ],
        prompt_context: "Write a 4-email Soap Opera Sequence for [NICHE].",
    },
    Template {
        id: 3,
        title: "High-Ticket VSL Script",
        category: TemplateCategory::Sales,
        difficulty: Difficulty::Advanced,
        time_estimate: "20 min video",
        icon: "video",
        short_description: "Video sales letter for premium products.",
        full_description: "A dense psychological structure designed to filter out the curious and sell only to qualified buyers, with a heavy focus on breaking limiting beliefs.",
        metrics: &[
            metric("Retention", "35%", "Until the pitch"),
            metric("Ticket", "1k+", "Ideal price"),
        ],
        structure: &[
            step("The Hook", "A bold promise in the first 30 seconds."),
            step("The Problem", "Agitate the pain and rule out other solutions."),
            step("The Unique Mechanism", "Present your exclusive method."),
            step("The Close", "Irresistible offer and guarantee."),
        ],
        prompt_context: "Write a VSL script to sell high-ticket [PRODUCT].",
    },
    Template {
        id: 4,
        title: "Pillar Article for SEO",
        category: TemplateCategory::SocialMedia,
        difficulty: Difficulty::Intermediate,
        time_estimate: "2000 words",
        icon: "file-text",
        short_description: "Own the first page of Google with dense content.",
        full_description: "The skyscraper format: the most complete guide on the internet for one topic, earning backlinks naturally.",
        metrics: &[
            metric("Traffic", "High", "Organic"),
            metric("Time", "4m", "On page"),
        ],
        structure: &[
            step("Intro", "APP hook (Agree, Promise, Preview)."),
            step("What It Is", "Definitions for the featured snippet."),
            step("Tutorial", "Detailed step by step."),
            step("FAQ", "Mapped frequent questions."),
        ],
        prompt_context: "Write a 2000-word pillar article about [TOPIC].",
    },
    Template {
        id: 5,
        title: "Facebook Ads (3-3-3 Method)",
        category: TemplateCategory::AdsTraffic,
        difficulty: Difficulty::Beginner,
        time_estimate: "Instant",
        icon: "target",
        short_description: "Fast creative testing to find the winner.",
        full_description: "Test 3 hooks, 3 bodies, and 3 CTAs to quickly find the combination that brings the cheapest lead.",
        metrics: &[
            metric("CTR", "2%+", "Click-through rate"),
            metric("CPL", "Low", "Cost per lead"),
        ],
        structure: &[
            step("Visual Hook", "Image or video that stops the scroll."),
            step("Text Hook", "A striking first sentence."),
            step("Retention", "Body that builds desire."),
            step("CTA", "A clear call to click."),
        ],
        prompt_context: "Write 3 Facebook ad copy variations for [OFFER].",
    },
    Template {
        id: 6,
        title: "Editorial Calendar (30 Days)",
        category: TemplateCategory::SocialMedia,
        difficulty: Difficulty::Beginner,
        time_estimate: "Whole month",
        icon: "users",
        short_description: "Endless content planning for Instagram.",
        full_description: "A balanced 80/20 mix of authority, connection, objection-breaking, and direct-sale posts.",
        metrics: &[
            metric("Engag.", "High", "Consistency"),
            metric("Sales", "Recurring", "Daily sales"),
        ],
        structure: &[
            step("Week 1", "Authority and teaching."),
            step("Week 2", "Connection and behind the scenes."),
            step("Week 3", "Social proof and case studies."),
            step("Week 4", "Offer and scarcity."),
        ],
        prompt_context: "Create a calendar of 30 post ideas for [NICHE].",
    },
];

/// Find a template by id.
#[must_use]
pub fn template(id: u32) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Templates in `category` whose title or short description contains
/// `search` (case-insensitive).
#[must_use]
pub fn templates(category: Option<TemplateCategory>, search: &str) -> Vec<&'static Template> {
    let query = search.trim().to_lowercase();
    TEMPLATES
        .iter()
        .filter(|t| category.is_none_or(|c| t.category == c))
        .filter(|t| {
            query.is_empty()
                || t.title.to_lowercase().contains(&query)
                || t.short_description.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_ids_are_unique_and_sequential() {
        let ids: Vec<_> = TOOLS.iter().map(|t| t.id).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
        assert!(tool("7").is_none());
        assert_eq!(tool("5").map(|t| t.category), Some(ToolCategory::Email));
    }

    #[test]
    fn test_tool_category_filter() {
        assert_eq!(tools(None).len(), 6);
        assert_eq!(tools(Some(ToolCategory::Marketing)).len(), 2);
        assert_eq!(ToolCategory::from_query("seo"), Some(ToolCategory::Seo));
        assert_eq!(ToolCategory::from_query("all"), None);
    }

    #[test]
    fn test_template_filters() {
        assert_eq!(templates(None, "").len(), 6);
        assert_eq!(templates(Some(TemplateCategory::SocialMedia), "").len(), 2);
        assert_eq!(templates(None, "INSTAGRAM").len(), 1);
        assert_eq!(templates(Some(TemplateCategory::Sales), "instagram").len(), 0);
        assert_eq!(template(3).map(|t| t.difficulty), Some(Difficulty::Advanced));
    }
}
