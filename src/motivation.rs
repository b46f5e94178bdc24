use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Yellow,
    Green,
    Blue,
    Indigo,
    Purple,
    Orange,
    Red,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationTier {
    #[serde(skip)]
    pub min_sgpa: f64,
    pub emoji: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub accent: Accent,
}

/// Sorted by `min_sgpa`, highest first. The last tier has no lower bound.
pub static TIERS: [MotivationTier; 7] = [
    MotivationTier {
        min_sgpa: 9.5,
        emoji: "🌟",
        title: "Outstanding!",
        message: "You're on the path to excellence. Keep pushing boundaries — you're among the top achievers! 🚀",
        accent: Accent::Yellow,
    },
    MotivationTier {
        min_sgpa: 9.0,
        emoji: "💪",
        title: "Great Job!",
        message: "You've built a strong academic foundation. Stay consistent, and you'll soon be a topper! ✨",
        accent: Accent::Green,
    },
    MotivationTier {
        min_sgpa: 8.5,
        emoji: "🔥",
        title: "Very Good!",
        message: "Solid performance! With just a bit more effort, you'll break into the top tier. Keep going! 📈",
        accent: Accent::Blue,
    },
    MotivationTier {
        min_sgpa: 8.0,
        emoji: "🧠",
        title: "Good Work!",
        message: "You're doing well — a little more focus and discipline can take you far. Stay steady and aim high! 🎯",
        accent: Accent::Indigo,
    },
    MotivationTier {
        min_sgpa: 7.0,
        emoji: "📘",
        title: "Fair Performance",
        message: "You've got the potential — now it's time to sharpen your focus and aim higher. You can do it! 💡",
        accent: Accent::Purple,
    },
    MotivationTier {
        min_sgpa: 6.0,
        emoji: "🌱",
        title: "Needs Improvement",
        message: "Don't lose hope — this is your chance to bounce back stronger. Start fresh, aim higher! 💥",
        accent: Accent::Orange,
    },
    MotivationTier {
        min_sgpa: f64::NEG_INFINITY,
        emoji: "❤️",
        title: "Don't Give Up",
        message: "Numbers don't define you. Learn from mistakes, rise with determination, and rewrite your story! 🔁",
        accent: Accent::Red,
    },
];

pub fn select(sgpa: f64) -> &'static MotivationTier {
    let lowest = &TIERS[TIERS.len() - 1];
    TIERS
        .iter()
        .find(|tier| sgpa >= tier.min_sgpa)
        .unwrap_or(lowest)
}
