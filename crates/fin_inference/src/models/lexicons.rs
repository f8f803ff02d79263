//! Word valences used by [`super::LexiconModel`].

/// General-purpose valences, always consulted.
pub const GENERAL: &[(&str, f64)] = &[
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("happy", 2.7),
    ("hope", 1.9),
    ("hopeful", 2.3),
    ("love", 3.2),
    ("win", 2.8),
    ("wins", 2.7),
    ("won", 2.7),
    ("benefit", 2.0),
    ("benefits", 1.6),
    ("relief", 2.1),
    ("welcome", 2.0),
    ("boost", 1.7),
    ("bad", -2.5),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("sad", -2.1),
    ("hate", -2.7),
    ("fear", -2.2),
    ("fears", -1.8),
    ("worry", -1.9),
    ("worried", -1.2),
    ("crisis", -3.1),
    ("panic", -2.3),
    ("lose", -1.8),
    ("loses", -1.6),
    ("lost", -1.3),
    ("problem", -1.7),
    ("problems", -1.7),
    ("trouble", -1.7),
    ("scandal", -2.2),
    ("fraud", -2.8),
    ("lawsuit", -1.2),
    ("war", -2.9),
];

/// Finance-specific weighted terms, enabled by `use_sentibignomics`.
pub const SENTIBIGNOMICS: &[(&str, f64)] = &[
    ("profit", 1.8),
    ("profits", 1.8),
    ("profitable", 2.0),
    ("surge", 2.2),
    ("surged", 2.2),
    ("surges", 2.2),
    ("soar", 2.5),
    ("soared", 2.5),
    ("rally", 2.0),
    ("rallied", 2.0),
    ("bullish", 2.4),
    ("upgrade", 1.9),
    ("upgraded", 1.9),
    ("dividend", 0.9),
    ("buyback", 1.2),
    ("beat", 1.6),
    ("outperform", 2.0),
    ("recovery", 1.5),
    ("rebound", 1.6),
    ("raised", 1.0),
    ("loss", -1.9),
    ("losses", -1.9),
    ("plunge", -2.6),
    ("plunged", -2.6),
    ("plunges", -2.6),
    ("slump", -2.2),
    ("slumped", -2.2),
    ("tumble", -2.1),
    ("tumbled", -2.1),
    ("bearish", -2.4),
    ("downgrade", -1.9),
    ("downgraded", -1.9),
    ("recession", -2.7),
    ("inflation", -0.8),
    ("default", -2.5),
    ("bankruptcy", -3.0),
    ("layoffs", -2.0),
    ("selloff", -2.1),
    ("volatility", -0.9),
    ("debt", -0.7),
];

pub const HENRY_WEIGHT: f64 = 1.5;

/// Henry (2008) positive tone words, enabled by `use_henry`.
pub const HENRY_POSITIVE: &[&str] = &[
    "above", "accomplish", "accomplished", "accomplishment", "achieve", "achieved",
    "achievement", "advance", "advanced", "attain", "attained", "beat", "beats",
    "better", "best", "certain", "certainty", "confidence", "confident", "deliver",
    "delivered", "encouraged", "encouraging", "exceed", "exceeded", "exceeding",
    "exceeds", "excellent", "expand", "expanded", "expanding", "expansion", "gain",
    "gained", "gaining", "gains", "good", "great", "greater", "greatest", "grew",
    "grow", "growing", "grown", "grows", "growth", "high", "higher", "highest",
    "improve", "improved", "improvement", "improves", "improving", "increase",
    "increased", "increases", "increasing", "larger", "largest", "leader",
    "leading", "opportunities", "opportunity", "optimistic", "outperform",
    "outperformed", "pleased", "positive", "profitability", "progress", "record",
    "reward", "rewarded", "rise", "rises", "rising", "strength", "strengthen",
    "strong", "stronger", "strongest", "succeed", "success", "successful",
    "surpass", "surpassed", "up", "upturn",
];

/// Henry (2008) negative tone words, enabled by `use_henry`.
pub const HENRY_NEGATIVE: &[&str] = &[
    "below", "challenge", "challenges", "challenging", "decline", "declined",
    "declines", "declining", "decrease", "decreased", "decreases", "decreasing",
    "difficult", "difficulty", "disappoint", "disappointed", "disappointing",
    "disappointment", "down", "drop", "dropped", "dropping", "drops", "fail",
    "failed", "failing", "fails", "failure", "fall", "fallen", "falling", "falls",
    "fell", "hurt", "lower", "lowest", "negative", "negatively", "poor", "poorly",
    "risk", "risks", "risky", "threat", "threaten", "uncertain", "uncertainty",
    "unfavorable", "weak", "weaken", "weakened", "weaker", "weakness", "worse",
    "worst",
];

pub const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "neither", "nor", "without", "cannot",
    "isnt", "wasnt", "arent", "dont", "doesnt", "didnt", "wont",
];

pub const BOOSTERS: &[&str] = &[
    "very", "extremely", "highly", "sharply", "significantly", "strongly",
    "substantially", "hugely", "deeply",
];
