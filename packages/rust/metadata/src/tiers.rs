//! Discrete tiers for continuous AI sentiment/confidence scores.
//!
//! Both mappers are total over any `f64` (NaN falls through every
//! comparison into the final branch) and render a missing score as "N/A".

/// Map a sentiment score to its display tier.
pub fn sentiment_tier(score: Option<f64>) -> &'static str {
    let Some(score) = score else {
        return "N/A";
    };
    if score >= 0.5 {
        "Very Positive"
    } else if score > 0.0 {
        "Positive"
    } else if score == 0.0 {
        "Neutral"
    } else if score > -0.5 {
        "Negative"
    } else {
        "Very Negative"
    }
}

/// Map a confidence score to its display tier.
pub fn confidence_tier(score: Option<f64>) -> &'static str {
    let Some(score) = score else {
        return "N/A";
    };
    if score >= 0.8 {
        "High"
    } else if score >= 0.5 {
        "Medium"
    } else {
        "Low"
    }
}
