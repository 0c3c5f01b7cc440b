//! Personas and prompt construction for copy generation.

/// Tool id of the free-form Magic Box.
pub const MAGIC_BOX: &str = "magic-box";

/// System persona Claude answers as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    General,
    Cro,
    Seo,
    Sales,
    Email,
}

impl Persona {
    /// System prompt for this persona.
    #[must_use]
    pub const fn system_prompt(self) -> &'static str {
        match self {
            Self::General => {
                "You are ViralCopy AI, a world-class marketing strategist and copywriter. \
                 Your tone is persuasive, direct, and focused on high conversion. You use \
                 frameworks such as AIDA, PAS, and FAB. No fluff. Get straight to the value."
            }
            Self::Cro => {
                "You are a Conversion Rate Optimization (CRO) specialist. Your only goal is \
                 to raise click-through and sales rates. You understand behavioral \
                 psychology, cognitive biases, and user experience."
            }
            Self::Seo => {
                "You are a senior SEO specialist. You focus on search intent, semantic \
                 keywords, and topical authority. You write for humans first but follow \
                 Google's E-E-A-T guidelines strictly."
            }
            Self::Sales => {
                "You are a high-ticket sales closer. You write scripts that overcome \
                 objections and build massive trust. Your language is confident and \
                 authoritative."
            }
            Self::Email => {
                "You are a direct-response email marketer. You specialize in open rates \
                 (subject lines) and click-through rates (body copy). You write like a \
                 human, not like a corporation."
            }
        }
    }
}

/// System and user prompt for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub persona: Persona,
    pub user: String,
}

impl Prompt {
    /// Build the prompt for `tool` around the user's `input`.
    ///
    /// Unknown tool ids use the general persona with the input unchanged.
    #[must_use]
    pub fn build(tool: &str, input: &str) -> Self {
        let (persona, user) = match tool {
            MAGIC_BOX => (
                Persona::General,
                format!(
                    "Act as a senior strategist.\n\nUser request: \"{input}\"\n\n\
                     Analyze the request in depth and deliver a strategic, creative, \
                     ready-to-use answer."
                ),
            ),
            "1" => (
                Persona::Cro,
                format!(
                    "Generate 5 headline variations for the following product or offer. \
                     For each variation, explain the psychological angle used (e.g. \
                     urgency, curiosity, social proof).\n\nProduct/context: {input}\n\n\
                     Output format:\n1. [Headline] - [Angle explanation]\n..."
                ),
            ),
            "2" => (
                Persona::Seo,
                format!(
                    "Analyze the search intent for the following topic. List 5 specific \
                     long-tail keywords users might search *before* buying and, for each, \
                     write a 50-word answer snippet that could rank for position zero.\n\n\
                     Topic: {input}"
                ),
            ),
            "3" => (
                Persona::Sales,
                format!(
                    "List the 5 main objections a skeptical buyer could have about this \
                     offer. For each objection, write a reframe or counter-argument that \
                     dissolves the concern.\n\nOffer: {input}"
                ),
            ),
            "4" => (
                Persona::Sales,
                format!(
                    "Write a 5-step chatbot conversation flow for a new visitor arriving on \
                     this website. The goal is to qualify the lead and book a demo. Keep \
                     messages short (under 20 words each).\n\nContext: {input}"
                ),
            ),
            "5" => (
                Persona::Email,
                format!(
                    "Write a 3-email cart abandonment sequence.\n\
                     Email 1: Helpful reminder (1 hour later).\n\
                     Email 2: Social proof and objection handling (24 hours later).\n\
                     Email 3: Scarcity or last-chance discount (48 hours later).\n\n\
                     Product: {input}"
                ),
            ),
            "6" => (
                Persona::General,
                format!(
                    "Create a detailed Ideal Customer Profile (avatar/ICP) for this \
                     business. Think deeply about consumer psychology. Include \
                     demographics, psychographics, deepest fears, and secret desires.\n\n\
                     Business: {input}"
                ),
            ),
            _ => (Persona::General, input.to_string()),
        };

        Self { persona, user }
    }

    #[must_use]
    pub const fn system(&self) -> &'static str {
        self.persona.system_prompt()
    }
}
