//! Static course and book content fed into plan generation and book seeding.

use crate::domain::plan::{CatalogEntry, PlanCatalogs};

pub struct BookSeed {
    pub title: &'static str,
    pub focus: &'static str,
    pub link: &'static str,
}

pub const AI_CATALOG: &[CatalogEntry<'static>] = &[
    CatalogEntry {
        title: "Elements of AI — Intro",
        link: "https://www.elementsofai.com/",
        tasks: &[
            "Read Chapters 1–2",
            "Write 5 AI use-cases",
            "Write your AI vision (4 lines)",
        ],
    },
    CatalogEntry {
        title: "AI for Everyone (audit mode)",
        link: "https://www.coursera.org/learn/ai-for-everyone",
        tasks: &[
            "Watch Week 1–2",
            "AI vs non-AI notes",
            "Brand impact summary",
        ],
    },
    CatalogEntry {
        title: "Prompt Engineering Basics",
        link: "https://learn.deeplearning.ai/courses/chatgpt-prompt-engineering-for-developers",
        tasks: &[
            "Role + Context + Constraints",
            "Write 5 marketing prompts",
            "Refine them",
        ],
    },
    CatalogEntry {
        title: "Google AI Crash Course",
        link: "https://developers.google.com/machine-learning/crash-course",
        tasks: &["Intro lessons", "Define 10 terms", "1 practical example"],
    },
    CatalogEntry {
        title: "freeCodeCamp: Data Analysis with Python",
        link: "https://www.freecodecamp.org/learn/data-analysis-with-python/",
        tasks: &["Do 1 section", "Note pandas basics", "1 data insight"],
    },
    CatalogEntry {
        title: "Storyboard / Canva Visual Concept",
        link: "https://www.canva.com/",
        tasks: &[
            "Make 6-frame storyboard",
            "1 line per frame",
            "Prep short video",
        ],
    },
    CatalogEntry {
        title: "AI Content Calendar",
        link: "https://www.hootsuite.com/resources/templates/social-media-content-calendar",
        tasks: &["Plan 7 posts", "Define 3 CTAs", "Write 1 hook per post"],
    },
];

pub const BRAND_CATALOG: &[CatalogEntry<'static>] = &[
    CatalogEntry {
        title: "StoryBrand (free resources)",
        link: "https://storybrand.com/resources/",
        tasks: &[
            "Define hero & villain",
            "Write your brand story",
            "Problem → solution",
        ],
    },
    CatalogEntry {
        title: "HubSpot Content Marketing",
        link: "https://academy.hubspot.com/",
        tasks: &[
            "Watch Lesson 1–2",
            "List 10 content ideas",
            "Pick best channel",
        ],
    },
    CatalogEntry {
        title: "The Brand Gap (summary)",
        link: "https://www.youtube.com/results?search_query=the+brand+gap+summary",
        tasks: &[
            "Choose 5 brand adjectives",
            "Write position sentence",
            "Competitor set",
        ],
    },
    CatalogEntry {
        title: "Canva Design School",
        link: "https://www.canva.com/learn/",
        tasks: &["Make moodboard", "Pick brand colors", "Choose 2 fonts"],
    },
    CatalogEntry {
        title: "Copywriting Basics (Copyblogger)",
        link: "https://www.copyblogger.com/",
        tasks: &["Write 10 hooks", "H/S/O outline", "Draft hero section"],
    },
    CatalogEntry {
        title: "Content Strategy (Backlinko)",
        link: "https://www.backlinko.com/content-marketing-strategy",
        tasks: &[
            "Plan 1-week content map",
            "Define channel",
            "Define success metric",
        ],
    },
    CatalogEntry {
        title: "Landing Page (freeCodeCamp)",
        link: "https://www.freecodecamp.org/learn/2022/responsive-web-design/",
        tasks: &["Draft landing page", "Hero + USP + CTA", "Collect feedback"],
    },
];

pub const LAW_CATALOG: &[CatalogEntry<'static>] = &[
    CatalogEntry {
        title: "Business Law for Entrepreneurs",
        link: "https://www.coursera.org/learn/business-law-entrepreneurs",
        tasks: &["10 key terms", "NDA headings", "Contract basics"],
    },
    CatalogEntry {
        title: "WIPO DL-101 (IP)",
        link: "https://www.wipo.int/academy/en/courses/dl101/",
        tasks: &["TM vs Copyright", "AI-output IP", "Attribution plan"],
    },
    CatalogEntry {
        title: "Successful Negotiation",
        link: "https://www.coursera.org/learn/negotiation#syllabus",
        tasks: &[
            "Mirroring & labeling",
            "Accusation audit",
            "Practice script",
        ],
    },
    CatalogEntry {
        title: "International Business Law (edX)",
        link: "https://www.edx.org/course/international-business-law",
        tasks: &["Entity types", "Jurisdiction", "Risk list"],
    },
    CatalogEntry {
        title: "EU AI Act – official",
        link: "https://digital-strategy.ec.europa.eu/en/policies/european-ai-act",
        tasks: &["Marketing impact", "Risk checklist", "Compliance note"],
    },
    CatalogEntry {
        title: "Personal MBA – finance",
        link: "https://personalmba.com/",
        tasks: &["P&L / BS / CF", "Unit economics", "Pricing thought"],
    },
    CatalogEntry {
        title: "Presentation basics",
        link: "https://www.duarte.com/presentation-skills-resources/",
        tasks: &["3-min pitch", "Slide outline", "Rehearse x2"],
    },
];

pub const BOOK_CATALOG: &[BookSeed] = &[
    BookSeed {
        title: "Deep Work — Cal Newport",
        focus: "Focus",
        link: "https://www.youtube.com/results?search_query=deep+work+cal+newport+summary",
    },
    BookSeed {
        title: "The Personal MBA — Josh Kaufman",
        focus: "Business",
        link: "https://personalmba.com/",
    },
    BookSeed {
        title: "Show Your Work! — Austin Kleon",
        focus: "Creative",
        link: "https://austinkleon.com/show-your-work/",
    },
    BookSeed {
        title: "The Brand Gap — Marty Neumeier",
        focus: "Brand",
        link: "https://www.youtube.com/results?search_query=the+brand+gap+summary",
    },
    BookSeed {
        title: "This Is Marketing — Seth Godin",
        focus: "Marketing",
        link: "https://www.youtube.com/results?search_query=this+is+marketing+summary",
    },
    BookSeed {
        title: "Never Split the Difference — Chris Voss",
        focus: "Negotiation",
        link: "https://www.youtube.com/results?search_query=never+split+the+difference+summary",
    },
    BookSeed {
        title: "Influence — Robert Cialdini",
        focus: "Persuasion",
        link: "https://www.youtube.com/results?search_query=influence+cialdini+summary",
    },
    BookSeed {
        title: "Made to Stick — Heath Brothers",
        focus: "Communication",
        link: "https://www.youtube.com/results?search_query=made+to+stick+summary",
    },
    BookSeed {
        title: "Hooked — Nir Eyal",
        focus: "Product",
        link: "https://www.youtube.com/results?search_query=hooked+nir+eyal+summary",
    },
    BookSeed {
        title: "Think Again — Adam Grant",
        focus: "Learning",
        link: "https://www.youtube.com/results?search_query=think+again+adam+grant+summary",
    },
    BookSeed {
        title: "The Mom Test — Rob Fitzpatrick",
        focus: "Validation",
        link: "https://www.youtube.com/results?search_query=the+mom+test+summary",
    },
    BookSeed {
        title: "Atomic Habits — James Clear",
        focus: "Systems",
        link: "https://jamesclear.com/atomic-habits",
    },
];

pub fn default_catalogs() -> PlanCatalogs<'static> {
    PlanCatalogs {
        ai: AI_CATALOG,
        brand: BRAND_CATALOG,
        law: LAW_CATALOG,
    }
}
