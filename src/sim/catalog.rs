//! Little Dipper content: the seven stars, their lore and quizzes
//!
//! Each quiz must have exactly one correct option. This is checked by
//! [`validate_catalog`] in tests and in debug builds at spawn time.

use glam::Vec2;
use rand::Rng;

use super::state::{CelestialBody, GameState, QuizOption};

/// Narrative and quiz attached to a body
#[derive(Debug)]
pub struct BodyLore {
    /// Step 0: astronomy fact (Space Guide)
    pub fact: &'static str,
    /// Step 1: financial insight (Finance Broker)
    pub insight: &'static str,
    /// Step 2: quiz
    pub question: &'static str,
    pub options: &'static [QuizOption],
}

/// Static authoring record for one body
#[derive(Debug)]
pub struct BodySpec {
    pub key: &'static str,
    pub name: &'static str,
    pub pos: Vec2,
    pub radius: f32,
    pub color: &'static str,
    pub lore: BodyLore,
}

const fn wrong(text: &'static str) -> QuizOption {
    QuizOption {
        text,
        correct: false,
    }
}

const fn right(text: &'static str) -> QuizOption {
    QuizOption {
        text,
        correct: true,
    }
}

/// The constellation, handle first
pub static BODIES: [BodySpec; 7] = [
    BodySpec {
        key: "polaris",
        name: "Polaris (North Star)",
        pos: Vec2::new(2500.0, 500.0),
        radius: 35.0,
        color: "#fbbf24",
        lore: BodyLore {
            fact: "Polaris is the North Star, located almost directly above Earth's North Pole. It has guided travelers for centuries!",
            insight: "Like Polaris guiding travelers, setting clear financial goals helps you navigate your money journey. Always keep your 'North Star' in sight!",
            question: "Which financial concept is best represented by Polaris, the 'North Star'?",
            options: &[
                wrong("Tracking stock prices"),
                right("Setting long-term financial goals"),
                wrong("Buying cryptocurrency"),
                wrong("Paying monthly rent"),
            ],
        },
    },
    BodySpec {
        key: "yildun",
        name: "Yildun",
        pos: Vec2::new(2300.0, 700.0),
        radius: 30.0,
        color: "#94a3b8",
        lore: BodyLore {
            fact: "Yildun is the second star from Polaris in the Little Dipper's handle. Its name means 'star' in Turkish!",
            insight: "Building a strong credit foundation is like following the stars - start with the basics: pay bills on time and keep debt low.",
            question: "What is the foundational principle of a strong credit score?",
            options: &[
                wrong("Opening many new credit cards at once"),
                right("Paying bills on time and using low credit limits"),
                wrong("Investing in volatile assets"),
                wrong("Avoiding banks entirely"),
            ],
        },
    },
    BodySpec {
        key: "epsilon",
        name: "Epsilon Ursae Minoris",
        pos: Vec2::new(2000.0, 1000.0),
        radius: 28.0,
        color: "#8b5cf6",
        lore: BodyLore {
            fact: "Epsilon is the third star in the handle, connecting to the bowl of the Little Dipper.",
            insight: "Diversification spreads risk across different investments. Don't put all your eggs in one basket!",
            question: "The financial fact about Epsilon suggests you should NOT:",
            options: &[
                right("Invest all your money into a single company's stock"),
                wrong("Save money in a high-yield savings account"),
                wrong("Regularly check your bank account balance"),
                wrong("Use a budget tracker"),
            ],
        },
    },
    BodySpec {
        key: "delta",
        name: "Delta (Yildiz)",
        pos: Vec2::new(1600.0, 1200.0),
        radius: 32.0,
        color: "#60a5fa",
        lore: BodyLore {
            fact: "Delta marks the transition from handle to bowl. It's also called Yildiz, meaning 'star' in Arabic.",
            insight: "Emergency savings create a buffer between you and financial disaster. Aim for 3-6 months of expenses!",
            question: "What is the primary function of an 'Emergency Fund'?",
            options: &[
                wrong("To buy luxury goods"),
                wrong("To invest in high-risk stocks"),
                right("To act as a financial buffer during unexpected events"),
                wrong("To pay off long-term mortgages"),
            ],
        },
    },
    BodySpec {
        key: "gamma",
        name: "Gamma (Pherkad)",
        pos: Vec2::new(1200.0, 1500.0),
        radius: 33.0,
        color: "#ec4899",
        lore: BodyLore {
            fact: "Pherkad is one of the 'Guardians of the Pole.' It forms the outer corner of the Little Dipper's bowl.",
            insight: "Guard your financial future! Start investing early - even small amounts grow significantly over time through compound interest.",
            question: "What powerful principle makes early investing so effective?",
            options: &[
                wrong("Inflation"),
                right("Compound Interest"),
                wrong("Financial Leverage"),
                wrong("Asset Liquidation"),
            ],
        },
    },
    BodySpec {
        key: "beta",
        name: "Beta (Kochab)",
        pos: Vec2::new(800.0, 1350.0),
        radius: 36.0,
        color: "#f59e0b",
        lore: BodyLore {
            fact: "Kochab is the brightest star in the Little Dipper after Polaris. It was Earth's North Pole star around 1500 BC!",
            insight: "Like how pole stars shift over time, your financial priorities will change. Review and adjust your budget regularly!",
            question: "Why is it important to regularly review your personal budget?",
            options: &[
                wrong("Because currency rates are always changing"),
                right("Because your income, expenses, and goals change over time"),
                wrong("Because banks require it for account maintenance"),
                wrong("Only when you get a new job"),
            ],
        },
    },
    BodySpec {
        key: "zeta",
        name: "Zeta Ursae Minoris",
        pos: Vec2::new(950.0, 1700.0),
        radius: 30.0,
        color: "#ef4444",
        lore: BodyLore {
            fact: "Zeta forms the bottom of the Little Dipper's bowl along with Eta. Together they complete the constellation!",
            insight: "Complete your financial foundation: budget, save, invest, and protect with insurance. All parts work together!",
            question: "Which component is essential for completing a solid financial foundation and mitigating risk?",
            options: &[
                wrong("Taking out a personal loan"),
                right("Getting adequate insurance coverage"),
                wrong("Trading options and futures"),
                wrong("Holding physical gold"),
            ],
        },
    },
];

/// Polyline through catalog indices tracing the constellation (closes the bowl)
pub const CONSTELLATION_PATH: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 4];

/// Catalog authoring check: every quiz has exactly one correct answer
pub fn validate_catalog(entries: &[BodySpec]) -> Result<(), &'static str> {
    for entry in entries {
        let correct = entry.lore.options.iter().filter(|o| o.correct).count();
        if correct != 1 {
            return Err(entry.key);
        }
    }
    Ok(())
}

/// Create the body set with fresh multipliers, all unvisited
pub fn spawn_bodies(state: &mut GameState) {
    debug_assert!(validate_catalog(&BODIES).is_ok());

    let lo = state.config.min_score_multiplier;
    let hi = state.config.max_score_multiplier;
    for entry in BODIES.iter() {
        let id = state.next_entity_id();
        let score_multiplier = state.rng.random_range(lo..hi);
        state.bodies.push(CelestialBody {
            id,
            key: entry.key,
            name: entry.name,
            pos: entry.pos,
            radius: entry.radius,
            color: entry.color,
            score_multiplier,
            visited: false,
            lore: &entry.lore,
        });
    }
}

/// Constellation segments as pairs of body IDs
pub fn constellation_links(bodies: &[CelestialBody]) -> Vec<[u32; 2]> {
    CONSTELLATION_PATH
        .windows(2)
        .filter_map(|w| Some([bodies.get(w[0])?.id, bodies.get(w[1])?.id]))
        .collect()
}
